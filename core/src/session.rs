//! `MatchSession` — a reusable pattern/target conversation
//!
//! A session is created from a single string, which is either a pattern
//! literal or a target; the other half arrives through [`supply`]. Binding
//! both halves compiles the pattern, scans the target once, and freezes the
//! result into an immutable snapshot; every query after that reads the
//! snapshot without recomputation. Either half can be replaced later, which
//! rebuilds the snapshot from scratch.
//!
//! [`supply`]: MatchSession::supply

use crate::iter::{GroupIter, SessionIter};
use crate::literal::{compile_source, PatternSpec};
use crate::record::MatchRecord;
use crate::{OptionFlag, PatternOptions, SessionError};
use regex::Regex;
use std::fmt;

/// The frozen result of one scan: compiled pattern, per-match records, and
/// the whole-match list that `g`-mode addressing reads.
///
/// Replaced wholesale on every rebuild; never mutated in place.
#[derive(Debug, Clone)]
struct Snapshot {
    engine: Regex,
    records: Vec<MatchRecord>,
    wholes: Vec<String>,
}

/// Session lifecycle. A session holds one half until the other arrives;
/// once `Bound` it never regresses, only rebuilds into another `Bound`.
#[derive(Debug, Clone)]
enum State {
    /// Pattern supplied, target still missing.
    Pattern(PatternSpec),
    /// Target supplied, pattern still missing.
    Target(String),
    /// Both halves present; `snap` is consistent with exactly this pair.
    Bound {
        spec: PatternSpec,
        target: String,
        snap: Snapshot,
    },
}

/// A stateful, reusable match session.
///
/// Not for sharing across threads: one session is one linear conversation
/// between a pattern and a sequence of targets (or the other way around).
///
/// # Addressing modes
///
/// [`group`](Self::group), [`to_vec`](Self::to_vec),
/// [`group_count`](Self::group_count) and [`iter`](Self::iter) change
/// meaning with the `g` option:
///
/// - with `g`, an index selects *which match*, and the whole text of that
///   match comes back;
/// - without `g`, an index selects *which slot of the first match* (0 is
///   the whole text, `n` is group `n`).
///
/// [`find`](Self::find) and [`group_iter`](Self::group_iter) ignore `g`.
///
/// # Example
///
/// ```
/// use rematch::MatchSession;
///
/// let session = MatchSession::from_pair("/(tes)t/gi", "testTestTESTtEst")?;
/// assert_eq!(session.match_count()?, 4);
/// assert_eq!(session.group(2)?, Some("TEST")); // g: third match
/// assert_eq!(session.find(2)?.group(1)?, Some("TES"));
/// # Ok::<(), rematch::SessionError>(())
/// ```
#[derive(Clone)]
pub struct MatchSession {
    state: State,
}

impl MatchSession {
    /// Create a session from either half of the pair.
    ///
    /// If `pattern_or_target` parses as a pattern literal it becomes the
    /// pattern half, otherwise it is stored verbatim as the target. Never
    /// fails; even a literal with an invalid body is accepted here, and the
    /// compile error surfaces at [`supply`](Self::supply).
    pub fn new(pattern_or_target: impl Into<String>) -> Self {
        let arg = pattern_or_target.into();
        let state = match PatternSpec::parse(&arg) {
            Some(spec) => State::Pattern(spec),
            None => State::Target(arg),
        };
        Self { state }
    }

    /// Create a bound session from a pattern/target pair, in either order.
    ///
    /// # Errors
    ///
    /// [`SessionError::PatternNotFound`] when neither argument is a
    /// literal, [`SessionError::TargetNotFound`] when both are, plus any
    /// compile error from the pattern body.
    pub fn from_pair(a: &str, b: &str) -> Result<Self, SessionError> {
        let mut session = Self::new(a);
        session.supply(b)?;
        Ok(session)
    }

    /// Supply the missing half, or replace one half of a bound session.
    ///
    /// A literal argument replaces the pattern, a plain argument replaces
    /// the target. The pattern is then (re)compiled and the target scanned
    /// from the start, rebuilding the whole snapshot in one pass. On any
    /// error the session is left exactly as it was.
    ///
    /// Returns the session itself for chaining.
    ///
    /// # Errors
    ///
    /// [`SessionError::TargetNotFound`] when a literal arrives but no
    /// target is held, [`SessionError::PatternNotFound`] the other way
    /// around, [`SessionError::InvalidPattern`] and
    /// [`SessionError::PatternTooLong`] from compilation.
    pub fn supply(&mut self, pattern_or_target: &str) -> Result<&mut Self, SessionError> {
        let (spec, target) = match (&self.state, PatternSpec::parse(pattern_or_target)) {
            (State::Pattern(_), Some(_)) => return Err(SessionError::TargetNotFound),
            (State::Target(_), None) => return Err(SessionError::PatternNotFound),
            (State::Pattern(spec), None) => (spec.clone(), pattern_or_target.to_string()),
            (State::Target(target), Some(spec)) => (spec, target.clone()),
            (State::Bound { target, .. }, Some(spec)) => (spec, target.clone()),
            (State::Bound { spec, .. }, None) => (spec.clone(), pattern_or_target.to_string()),
        };
        self.state = rebuild(spec, target)?;
        Ok(self)
    }

    // ── Queries over the snapshot ────────────────────────────────────────────

    /// The record of match `index`. Independent of the `g` option.
    ///
    /// # Errors
    ///
    /// The unbound-state errors, [`SessionError::NoMatches`] when nothing
    /// matched, [`SessionError::IndexOutOfRange`] outside
    /// `0..match_count()`.
    pub fn find(&self, index: usize) -> Result<&MatchRecord, SessionError> {
        let snap = self.snapshot()?;
        if snap.records.is_empty() {
            return Err(SessionError::NoMatches);
        }
        let len = snap.records.len();
        snap.records
            .get(index)
            .ok_or(SessionError::IndexOutOfRange { index, len })
    }

    /// The `g`-dependent group accessor.
    ///
    /// With `g`: the whole text of match `index` (always present). Without
    /// `g`: slot `index` of the first match, equal to
    /// `find(0)?.group(index)`, where an absent group is `Ok(None)`. The
    /// valid range is `0..group_count()` either way.
    ///
    /// # Errors
    ///
    /// The unbound-state errors, [`SessionError::NoMatches`],
    /// [`SessionError::IndexOutOfRange`].
    pub fn group(&self, index: usize) -> Result<Option<&str>, SessionError> {
        let snap = self.snapshot()?;
        if snap.records.is_empty() {
            return Err(SessionError::NoMatches);
        }
        let len = self.group_count()?;
        if index >= len {
            return Err(SessionError::IndexOutOfRange { index, len });
        }
        if self.is_global() {
            Ok(match_at(snap, index))
        } else {
            slot_of_first(snap, index)
        }
    }

    /// Everything [`group`](Self::group) can reach, as one vector.
    ///
    /// With `g` every whole-match text; without `g` the first record's
    /// slots. Empty when nothing matched.
    ///
    /// # Errors
    ///
    /// The unbound-state errors.
    pub fn to_vec(&self) -> Result<Vec<Option<String>>, SessionError> {
        let snap = self.snapshot()?;
        if self.is_global() {
            Ok(snap.wholes.iter().cloned().map(Some).collect())
        } else {
            Ok(snap.records.first().map(MatchRecord::to_vec).unwrap_or_default())
        }
    }

    /// Total number of matches. Zero when the pattern matched nowhere.
    ///
    /// # Errors
    ///
    /// The unbound-state errors.
    pub fn match_count(&self) -> Result<usize, SessionError> {
        Ok(self.snapshot()?.records.len())
    }

    /// Number of values [`group`](Self::group) can address.
    ///
    /// With `g` this equals [`match_count`](Self::match_count); without `g`
    /// it is the first record's slot count, or zero when nothing matched.
    ///
    /// # Errors
    ///
    /// The unbound-state errors.
    pub fn group_count(&self) -> Result<usize, SessionError> {
        let snap = self.snapshot()?;
        if self.is_global() {
            Ok(snap.wholes.len())
        } else {
            Ok(snap.records.first().map_or(0, MatchRecord::size))
        }
    }

    /// Replace every match occurrence in the target with `replacement`.
    ///
    /// Pure with respect to the session: returns a new string, the snapshot
    /// is untouched. `$1`-style references address captured groups.
    ///
    /// # Errors
    ///
    /// The unbound-state errors.
    pub fn replace_all(&self, replacement: &str) -> Result<String, SessionError> {
        match &self.state {
            State::Pattern(_) => Err(SessionError::TargetUnbound),
            State::Target(_) => Err(SessionError::PatternUnbound),
            State::Bound { target, snap, .. } => {
                Ok(snap.engine.replace_all(target, replacement).into_owned())
            }
        }
    }

    /// Whether the pattern matched anywhere in the target.
    ///
    /// # Errors
    ///
    /// The unbound-state errors.
    pub fn test(&self) -> Result<bool, SessionError> {
        Ok(!self.snapshot()?.records.is_empty())
    }

    /// Whether the *entire* target, start to end, matches the pattern.
    ///
    /// Computed directly from the pattern, independent of the snapshot.
    ///
    /// # Errors
    ///
    /// The unbound-state errors, plus compile errors for the anchored form.
    pub fn matches(&self) -> Result<bool, SessionError> {
        match &self.state {
            State::Pattern(_) => Err(SessionError::TargetUnbound),
            State::Target(_) => Err(SessionError::PatternUnbound),
            State::Bound { spec, target, .. } => {
                Ok(spec.compile_anchored()?.is_match(target))
            }
        }
    }

    /// Stateless form of [`test`](Self::test) over an ad hoc pair, in
    /// either order. Option letters on the literal are applied.
    ///
    /// # Errors
    ///
    /// The pair disambiguation errors, plus compile errors.
    pub fn test_pair(a: &str, b: &str) -> Result<bool, SessionError> {
        let (spec, target) = split_pair(a, b)?;
        Ok(spec.compile()?.is_match(target))
    }

    /// Stateless form of [`matches`](Self::matches) over an ad hoc pair, in
    /// either order.
    ///
    /// Option letters are *not* applied here; put inline flags such as
    /// `(?i)` in the body instead.
    ///
    /// # Errors
    ///
    /// The pair disambiguation errors, plus compile errors.
    pub fn matches_pair(a: &str, b: &str) -> Result<bool, SessionError> {
        let (spec, target) = split_pair(a, b)?;
        let engine = compile_source(spec.body(), PatternOptions::empty(), true)?;
        Ok(engine.is_match(target))
    }

    // ── Iteration ────────────────────────────────────────────────────────────

    /// Iterate what [`group`](Self::group) can address: with `g` every
    /// whole-match text, without `g` the first record's slots (whole text,
    /// then each group).
    ///
    /// Finite and single-pass; call again for a fresh traversal.
    ///
    /// # Errors
    ///
    /// The unbound-state errors; without `g` also
    /// [`SessionError::NoMatches`] (there is no first record to walk).
    pub fn iter(&self) -> Result<SessionIter<'_>, SessionError> {
        let snap = self.snapshot()?;
        if self.is_global() {
            Ok(SessionIter::over_matches(&snap.wholes))
        } else {
            Ok(SessionIter::over_slots(self.find(0)?.slots()))
        }
    }

    /// Iterate one fixed slot across every match: element `i` is
    /// `find(i)?.group(group_index)`. Independent of the `g` option;
    /// `group_iter(0)` walks the whole-match texts.
    ///
    /// # Errors
    ///
    /// The unbound-state errors, [`SessionError::NoMatches`], and
    /// [`SessionError::IndexOutOfRange`] when `group_index` is outside
    /// `0..group_count()` or beyond the records' slot range.
    pub fn group_iter(&self, group_index: usize) -> Result<GroupIter<'_>, SessionError> {
        let snap = self.snapshot()?;
        if snap.records.is_empty() {
            return Err(SessionError::NoMatches);
        }
        let len = self.group_count()?;
        if group_index >= len {
            return Err(SessionError::IndexOutOfRange {
                index: group_index,
                len,
            });
        }
        // With g, group_count() counts matches, but each step still reads a
        // record slot; an index past the slot range could never produce a
        // well-defined element.
        let slots = snap.records.first().map_or(0, MatchRecord::size);
        if group_index >= slots {
            return Err(SessionError::IndexOutOfRange {
                index: group_index,
                len: slots,
            });
        }
        Ok(GroupIter::new(self, group_index, snap.records.len()))
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    /// The pattern body, if a pattern has been supplied. No slashes, no
    /// option letters.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.spec().map(PatternSpec::body)
    }

    /// The target string, if one has been supplied.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match &self.state {
            State::Target(target) | State::Bound { target, .. } => Some(target),
            State::Pattern(_) => None,
        }
    }

    /// Whether the `g` option was requested on the current pattern.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.spec().is_some_and(PatternSpec::is_global)
    }

    /// The engine options of the current pattern; empty without a pattern.
    #[must_use]
    pub fn options(&self) -> PatternOptions {
        self.spec().map_or(PatternOptions::empty(), PatternSpec::options)
    }

    /// Whether the given option letter was requested on the current
    /// pattern. Inline flags inside the body are not reflected.
    #[must_use]
    pub fn has_option(&self, letter: char) -> bool {
        if letter == 'g' {
            self.is_global()
        } else {
            OptionFlag::has_option(self.options(), letter)
        }
    }

    /// The requested option letters, `g` first, then canonical order.
    #[must_use]
    pub fn options_string(&self) -> String {
        self.spec().map(PatternSpec::letters).unwrap_or_default()
    }

    // ── Internal ─────────────────────────────────────────────────────────────

    fn spec(&self) -> Option<&PatternSpec> {
        match &self.state {
            State::Pattern(spec) | State::Bound { spec, .. } => Some(spec),
            State::Target(_) => None,
        }
    }

    /// The bound snapshot, or the state error naming the missing half.
    fn snapshot(&self) -> Result<&Snapshot, SessionError> {
        match &self.state {
            State::Pattern(_) => Err(SessionError::TargetUnbound),
            State::Target(_) => Err(SessionError::PatternUnbound),
            State::Bound { snap, .. } => Ok(snap),
        }
    }
}

/// `g` addressing: the whole text of match `index`.
fn match_at(snap: &Snapshot, index: usize) -> Option<&str> {
    snap.wholes.get(index).map(String::as_str)
}

/// Non-`g` addressing: slot `index` of the first match.
fn slot_of_first(snap: &Snapshot, index: usize) -> Result<Option<&str>, SessionError> {
    snap.records
        .first()
        .ok_or(SessionError::NoMatches)?
        .group(index)
}

/// Compile the pattern, scan the target once, and freeze the result.
///
/// Runs entirely on locals so a failure leaves the caller's state alone.
fn rebuild(spec: PatternSpec, target: String) -> Result<State, SessionError> {
    let engine = spec.compile()?;
    let mut records = Vec::new();
    let mut wholes = Vec::new();
    for caps in engine.captures_iter(&target) {
        let slots: Vec<Option<String>> = (0..caps.len())
            .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
            .collect();
        if let Some(m) = caps.get(0) {
            wholes.push(m.as_str().to_string());
        }
        records.push(MatchRecord::new(slots));
    }
    Ok(State::Bound {
        spec,
        target,
        snap: Snapshot {
            engine,
            records,
            wholes,
        },
    })
}

fn split_pair<'a>(a: &'a str, b: &'a str) -> Result<(PatternSpec, &'a str), SessionError> {
    match (PatternSpec::parse(a), PatternSpec::parse(b)) {
        (Some(_), Some(_)) => Err(SessionError::TargetNotFound),
        (None, None) => Err(SessionError::PatternNotFound),
        (Some(spec), None) => Ok((spec, b)),
        (None, Some(spec)) => Ok((spec, a)),
    }
}

impl fmt::Debug for MatchSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchSession")
            .field("pattern", &self.pattern())
            .field("target", &self.target())
            .field("options", &self.options_string())
            .field("match_count", &self.match_count().unwrap_or(0))
            .finish()
    }
}

impl fmt::Display for MatchSession {
    /// `[]` unless bound with at least one match; with `g` the whole-match
    /// list, without `g` the first record's rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Bound { spec, snap, .. } if !snap.records.is_empty() => {
                if spec.is_global() {
                    f.write_str("[")?;
                    for (i, whole) in snap.wholes.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        f.write_str(whole)?;
                    }
                    f.write_str("]")
                } else {
                    write!(f, "{}", snap.records[0])
                }
            }
            _ => f.write_str("[]"),
        }
    }
}
