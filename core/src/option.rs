//! `OptionFlag` / `PatternOptions` — the closed registry of option letters
//!
//! A pattern literal carries zero or more single-letter options after its
//! closing slash (`/body/gim`). Each letter is one [`OptionFlag`]; the
//! engine-relevant subset combines into a [`PatternOptions`] bitmask. The
//! `g` flag is session-level only (it switches the addressing mode of the
//! group accessors) and contributes no engine bits.

use bitflags::bitflags;

bitflags! {
    /// Combined bitmask of the engine-relevant option flags.
    ///
    /// The bit values are registry-internal; they exist so that a set of
    /// options can be stored, ORed, and reverse-checked as one integer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PatternOptions: u32 {
        /// Case-insensitive matching (`i`).
        const CASE_INSENSITIVE = 1 << 0;
        /// Multi-line anchors (`m`).
        const MULTILINE = 1 << 1;
        /// Dot matches newline (`s`).
        const DOT_ALL = 1 << 2;
        /// Unicode-aware case folding (`u`).
        const UNICODE_CASE = 1 << 3;
        /// `\n`-only line terminators (`d`).
        const UNIX_LINES = 1 << 4;
        /// Free-spacing mode with `#` comments (`x`).
        const COMMENTS = 1 << 5;
        /// Treat the body as a literal string, no metacharacters (`l`).
        const LITERAL = 1 << 6;
    }
}

/// One member of the closed option registry.
///
/// Flags are independent and freely combinable; nothing here enforces the
/// conventional pairing of `u` with `i`.
///
/// # Example
///
/// ```
/// use rematch::{OptionFlag, PatternOptions};
///
/// let flags = OptionFlag::set_from("ig");
/// let bits = OptionFlag::combined_bits(&flags);
/// assert!(bits.contains(PatternOptions::CASE_INSENSITIVE));
/// assert!(OptionFlag::has_option(bits, 'i'));
/// // `g` is session-level and never contributes engine bits.
/// assert!(!OptionFlag::has_option(bits, 'g'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionFlag {
    /// `g`: address across all matches instead of within the first match.
    Global,
    /// `i`: case-insensitive matching.
    CaseInsensitive,
    /// `m`: `^` and `$` match at line boundaries.
    Multiline,
    /// `s`: `.` matches line terminators too.
    DotAll,
    /// `u`: Unicode-aware case folding.
    UnicodeCase,
    /// `d`: only `\n` is recognized as a line terminator.
    UnixLines,
    /// `x`: whitespace is ignored and `#` starts a comment.
    Comments,
    /// `l`: the body is matched verbatim, metacharacters and all.
    Literal,
}

impl OptionFlag {
    /// Every flag, in canonical letter order (`g i m s u d x l`).
    pub const ALL: [OptionFlag; 8] = [
        OptionFlag::Global,
        OptionFlag::CaseInsensitive,
        OptionFlag::Multiline,
        OptionFlag::DotAll,
        OptionFlag::UnicodeCase,
        OptionFlag::UnixLines,
        OptionFlag::Comments,
        OptionFlag::Literal,
    ];

    /// The single-letter code of this flag.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::Global => 'g',
            Self::CaseInsensitive => 'i',
            Self::Multiline => 'm',
            Self::DotAll => 's',
            Self::UnicodeCase => 'u',
            Self::UnixLines => 'd',
            Self::Comments => 'x',
            Self::Literal => 'l',
        }
    }

    /// The engine bits this flag contributes. Empty for [`Global`](Self::Global).
    #[must_use]
    pub fn bits(self) -> PatternOptions {
        match self {
            Self::Global => PatternOptions::empty(),
            Self::CaseInsensitive => PatternOptions::CASE_INSENSITIVE,
            Self::Multiline => PatternOptions::MULTILINE,
            Self::DotAll => PatternOptions::DOT_ALL,
            Self::UnicodeCase => PatternOptions::UNICODE_CASE,
            Self::UnixLines => PatternOptions::UNIX_LINES,
            Self::Comments => PatternOptions::COMMENTS,
            Self::Literal => PatternOptions::LITERAL,
        }
    }

    /// A human-readable description of the flag.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Global => "group accessors address across all matches",
            Self::CaseInsensitive => "case-insensitive matching",
            Self::Multiline => "multi-line anchors",
            Self::DotAll => "dot matches line terminators",
            Self::UnicodeCase => "Unicode-aware case folding",
            Self::UnixLines => "only \\n is a line terminator",
            Self::Comments => "free-spacing and #-comments in the body",
            Self::Literal => "body is matched verbatim",
        }
    }

    /// Look up a flag by its letter.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.letter() == letter)
    }

    /// The set of flags named in `letters`, in canonical order.
    ///
    /// Letter order and duplicates in the input are irrelevant; letters
    /// outside the registry are ignored.
    #[must_use]
    pub fn set_from(letters: &str) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|f| letters.contains(f.letter()))
            .collect()
    }

    /// OR of the engine bits of every flag in `flags`.
    ///
    /// Flags without engine bits (`g`) contribute nothing.
    #[must_use]
    pub fn combined_bits(flags: &[Self]) -> PatternOptions {
        flags
            .iter()
            .fold(PatternOptions::empty(), |acc, f| acc | f.bits())
    }

    /// Reverse-check a single letter against a combined bitmask.
    ///
    /// Always `false` for `g` (no engine bits) and for letters outside the
    /// registry.
    #[must_use]
    pub fn has_option(bits: PatternOptions, letter: char) -> bool {
        Self::from_letter(letter)
            .is_some_and(|f| !f.bits().is_empty() && bits.contains(f.bits()))
    }
}
