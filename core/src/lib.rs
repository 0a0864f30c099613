//! rematch - reusable regex match sessions over slash-delimited pattern literals
//!
//! A pattern is written the way scripting languages write one: a body between
//! slashes followed by single-letter options, e.g. `/sample (\S+)/gi`. A
//! [`MatchSession`] holds one such pattern and one target string, scans the
//! target once, and answers every subsequent query from an immutable snapshot
//! of the matches and their captured groups.
//!
//! # Architecture
//!
//! - [`OptionFlag`] / [`PatternOptions`] — the closed registry of option
//!   letters (`g i m s u d x l`) and their engine bitmask
//! - [`PatternSpec`] — a parsed pattern literal (body + options + `g`);
//!   "not a literal" is how a plain target string is recognized
//! - [`MatchRecord`] — one match occurrence: whole text plus captured groups,
//!   absent groups kept distinct from empty ones
//! - [`MatchSession`] — the stateful core: pattern and target can arrive in
//!   either order, and either half can be replaced later, rebuilding the
//!   snapshot in one pass
//! - [`SessionIter`] / [`GroupIter`] — derived iteration over the snapshot
//!
//! # Key Design Insights
//!
//! 1. **Order independence**: every two-argument entry point accepts the
//!    pattern literal and the target in either position; exactly one of the
//!    two must parse as a literal.
//!
//! 2. **The `g` option switches addressing**: with `g`, `group(i)` addresses
//!    *which match*; without it, `group(i)` addresses *which slot of the
//!    first match*. [`GroupIter`] ignores `g` entirely.
//!
//! 3. **All-or-nothing rebuild**: a failed [`supply`](MatchSession::supply)
//!    leaves the session exactly as it was; no query ever observes a
//!    half-rebuilt snapshot.
//!
//! # Example
//!
//! ```
//! use rematch::MatchSession;
//!
//! let mut session = MatchSession::new("sample test sample regex");
//! session.supply(r"/sample (\S+)/")?;
//!
//! assert_eq!(session.match_count()?, 2);
//! assert_eq!(session.find(0)?.group(1)?, Some("test"));
//! assert_eq!(session.find(1)?.group(1)?, Some("regex"));
//!
//! // Rebind the target; the pattern is kept and the snapshot rebuilt.
//! session.supply("sample crate")?;
//! assert_eq!(session.find(0)?.group(1)?, Some("crate"));
//! # Ok::<(), rematch::SessionError>(())
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod iter;
mod literal;
mod option;
mod record;
mod session;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use iter::{GroupIter, SessionIter};
pub use literal::PatternSpec;
pub use option::{OptionFlag, PatternOptions};
pub use record::MatchRecord;
pub use session::MatchSession;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use rematch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        GroupIter, MatchRecord, MatchSession, OptionFlag, PatternOptions, PatternSpec,
        SessionError, SessionIter,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum length in bytes for a pattern body.
///
/// Regex compilation is expensive even with a linear-time engine; the cap
/// rejects oversized bodies before any engine work. Enforced by
/// [`MatchSession::supply`] and the static pair forms.
pub const MAX_PATTERN_LENGTH: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from session construction, binding, and queries.
///
/// All errors are raised synchronously at the offending call; nothing is
/// retried or suppressed internally. A failed [`MatchSession::supply`] leaves
/// the session untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Neither half of a pattern/target pair parses as a pattern literal.
    PatternNotFound,
    /// Both halves of a pattern/target pair parse as pattern literals;
    /// a literal cannot serve as a target.
    TargetNotFound,
    /// A query was issued before a pattern was supplied.
    PatternUnbound,
    /// A query was issued before a target was supplied.
    TargetUnbound,
    /// A query that requires at least one match ran against a session whose
    /// pattern matched nowhere in the target.
    NoMatches,
    /// A match, group, or iterator index outside its valid range.
    IndexOutOfRange {
        /// The index that was passed.
        index: usize,
        /// Number of valid positions; the valid range is `0..len`.
        len: usize,
    },
    /// The pattern body was rejected by the regex engine.
    InvalidPattern {
        /// The body that failed to compile.
        pattern: String,
        /// The underlying error message.
        source: String,
    },
    /// A pattern body exceeds [`MAX_PATTERN_LENGTH`].
    PatternTooLong {
        /// Actual length of the body.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PatternNotFound => {
                write!(
                    f,
                    "no pattern found: neither argument is a /body/options literal"
                )
            }
            Self::TargetNotFound => {
                write!(
                    f,
                    "no target found: both arguments are /body/options literals"
                )
            }
            Self::PatternUnbound => write!(f, "no pattern has been supplied to this session"),
            Self::TargetUnbound => write!(f, "no target has been supplied to this session"),
            Self::NoMatches => write!(f, "the pattern matched nowhere in the target"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index is {index}, but the valid range is 0..{len}")
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid pattern \"{pattern}\": {source}")
            }
            Self::PatternTooLong { len, max } => {
                write!(f, "pattern length is {len}, but maximum allowed is {max}")
            }
        }
    }
}

impl std::error::Error for SessionError {}
