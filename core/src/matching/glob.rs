use crate::error::{BidsMatchError, Result};
use regex::Regex;
use std::fmt;

/// Shell-style wildcard pattern
///
/// Supports `*` (any run of characters), `?` (one character), `[seq]` and
/// `[!seq]` (one character in or not in seq). Every other character is
/// literal and matching is case-sensitive and anchored at both ends.
///
/// # Example
///
/// ```
/// use bidsmatch_core::GlobPattern;
///
/// let pattern = GlobPattern::new("T1*").unwrap();
/// assert!(pattern.matches("T1w"));
/// assert!(pattern.matches("T1"));
/// assert!(!pattern.matches("t1w"));
/// ```
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compiles a pattern
    ///
    /// # Errors
    ///
    /// Returns [`BidsMatchError::InvalidPattern`] when a bracket set cannot be
    /// compiled, e.g. a reversed range such as `[z-a]`.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&translate(pattern)).map_err(|e| BidsMatchError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Tests a whole string against the pattern
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Translates a shell pattern into an anchored regular expression
///
/// An unterminated `[` is a literal bracket. A `]` directly after `[` or
/// `[!` belongs to the set.
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2 + 8);
    out.push_str("(?s)^");

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                // Consecutive stars are equivalent to one
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => match bracket_end(&chars, i) {
                Some(end) => {
                    out.push_str(&translate_set(&chars[i..end]));
                    i = end + 1;
                }
                None => out.push_str(r"\["),
            },
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }

    out.push('$');
    out
}

/// Index of the `]` closing a set whose contents start at `start`
fn bracket_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if j < chars.len() && chars[j] == '!' {
        j += 1;
    }
    if j < chars.len() && chars[j] == ']' {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

/// Translates the contents of a `[...]` set into a regex class
fn translate_set(contents: &[char]) -> String {
    let (negated, body) = match contents.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, contents),
    };

    let mut class = String::from("[");
    if negated {
        class.push('^');
    }
    for &c in body {
        match c {
            // Ranges pass through, everything else is literal inside the class
            '-' => class.push('-'),
            '\\' | '[' | ']' | '^' | '&' | '~' => {
                class.push('\\');
                class.push(c);
            }
            _ => class.push(c),
        }
    }
    class.push(']');
    class
}
