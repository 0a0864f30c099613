//! `PatternSpec` — a parsed slash-delimited pattern literal
//!
//! This type represents what the caller *wrote* (body, option letters, `g`),
//! before any engine work. It compiles to a runtime [`regex::Regex`] when a
//! session binds it to a target.
//!
//! The grammar is `/body/options`: a non-empty body between slashes, then
//! zero or more of the letters `g i m s u d x l` in any order. The body is
//! matched greedily, so `/a/b/gi` has the body `a/b`. A literal may span
//! embedded newlines (free-spacing bodies carry `#` comments terminated by
//! newlines). Anything that does not fit the grammar is simply not a
//! literal, never an error; that is how a plain target string is told apart
//! from a pattern.

use crate::{OptionFlag, PatternOptions, SessionError, MAX_PATTERN_LENGTH};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^/(.+)/([gimsudxl]*)$").expect("literal grammar regex"));

/// A parsed pattern literal: raw body, engine options, and the `g` flag.
///
/// Immutable; produced by [`parse`](Self::parse) and folded into a
/// [`MatchSession`](crate::MatchSession) by `supply`.
///
/// # Example
///
/// ```
/// use rematch::{PatternSpec, PatternOptions};
///
/// let spec = PatternSpec::parse(r"/sample (\S+)/gi").unwrap();
/// assert_eq!(spec.body(), r"sample (\S+)");
/// assert!(spec.is_global());
/// assert!(spec.options().contains(PatternOptions::CASE_INSENSITIVE));
///
/// // A plain string is not a literal.
/// assert!(PatternSpec::parse("sample test").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    body: String,
    options: PatternOptions,
    global: bool,
}

impl PatternSpec {
    /// Parse `input` against the literal grammar.
    ///
    /// Returns `None` when `input` is not a pattern literal. Pure; no engine
    /// compilation happens here.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let caps = LITERAL_RE.captures(input)?;
        let body = caps.get(1)?.as_str().to_string();
        let letters = caps.get(2).map_or("", |m| m.as_str());
        let flags = OptionFlag::set_from(letters);
        Some(Self {
            body,
            options: OptionFlag::combined_bits(&flags),
            global: letters.contains('g'),
        })
    }

    /// The raw body, without the surrounding slashes or option letters.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The combined engine options.
    #[must_use]
    pub fn options(&self) -> PatternOptions {
        self.options
    }

    /// Whether the `g` option was requested.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.global
    }

    /// The option letters, `g` first, then canonical registry order.
    ///
    /// The order the caller originally wrote is not preserved.
    #[must_use]
    pub fn letters(&self) -> String {
        let mut out = String::new();
        if self.global {
            out.push('g');
        }
        for flag in OptionFlag::ALL {
            if !flag.bits().is_empty() && self.options.contains(flag.bits()) {
                out.push(flag.letter());
            }
        }
        out
    }

    /// Reconstruct the literal notation, `/body/letters`.
    #[must_use]
    pub fn to_literal(&self) -> String {
        format!("/{}/{}", self.body, self.letters())
    }

    /// Compile the body with this spec's options.
    pub(crate) fn compile(&self) -> Result<Regex, SessionError> {
        compile_source(&self.body, self.options, false)
    }

    /// Compile the body anchored to the whole haystack.
    pub(crate) fn compile_anchored(&self) -> Result<Regex, SessionError> {
        compile_source(&self.body, self.options, true)
    }
}

impl fmt::Display for PatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

/// Compile a body with the given options into an engine pattern.
///
/// Options become an inline-flag prefix. In literal mode the body is escaped
/// first and only the case flags remain meaningful. Line-terminator handling
/// mirrors the notation's home engine: CRLF mode is on unless `d` restricts
/// terminators to `\n`.
///
/// When `anchored`, the body is wrapped as `\A(?:body)\z` so the whole
/// haystack must match; multi-line anchors inside the body keep their own
/// meaning.
pub(crate) fn compile_source(
    body: &str,
    options: PatternOptions,
    anchored: bool,
) -> Result<Regex, SessionError> {
    if body.len() > MAX_PATTERN_LENGTH {
        return Err(SessionError::PatternTooLong {
            len: body.len(),
            max: MAX_PATTERN_LENGTH,
        });
    }

    let mut inline = String::new();
    if options.contains(PatternOptions::LITERAL) {
        // Metacharacters are escaped away below; only case folding still applies.
        if options.contains(PatternOptions::CASE_INSENSITIVE) {
            inline.push('i');
        }
        if options.contains(PatternOptions::UNICODE_CASE) {
            inline.push('u');
        }
    } else {
        if options.contains(PatternOptions::CASE_INSENSITIVE) {
            inline.push('i');
        }
        if options.contains(PatternOptions::MULTILINE) {
            inline.push('m');
        }
        if options.contains(PatternOptions::DOT_ALL) {
            inline.push('s');
        }
        if options.contains(PatternOptions::UNICODE_CASE) {
            inline.push('u');
        }
        if options.contains(PatternOptions::COMMENTS) {
            inline.push('x');
        }
        if !options.contains(PatternOptions::UNIX_LINES) {
            inline.push('R');
        }
    }
    let prefix = if inline.is_empty() {
        String::new()
    } else {
        format!("(?{inline})")
    };

    let source = if options.contains(PatternOptions::LITERAL) {
        regex::escape(body)
    } else {
        body.to_string()
    };

    let pattern = if anchored {
        // The newline ends a trailing #-comment in free-spacing bodies and is
        // ignored whitespace otherwise in that mode.
        if options.contains(PatternOptions::COMMENTS) {
            format!("{prefix}\\A(?:{source}\n)\\z")
        } else {
            format!("{prefix}\\A(?:{source})\\z")
        }
    } else {
        format!("{prefix}{source}")
    };

    Regex::new(&pattern).map_err(|e| SessionError::InvalidPattern {
        pattern: body.to_string(),
        source: e.to_string(),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Serde (feature = "serde")
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "serde")]
mod serde_impls {
    use super::PatternSpec;
    use serde::de::{Deserialize, Deserializer, Error};
    use serde::ser::{Serialize, Serializer};

    /// A `PatternSpec` serializes as its literal notation, so patterns embed
    /// naturally in configuration files: `"/user-\\d+/i"`.
    impl Serialize for PatternSpec {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_literal())
        }
    }

    impl<'de> Deserialize<'de> for PatternSpec {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            PatternSpec::parse(&s).ok_or_else(|| {
                D::Error::custom(format!("\"{s}\" is not a /body/options pattern literal"))
            })
        }
    }
}
