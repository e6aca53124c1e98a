//! String interpolation
//!
//! Substitutes `${name}` references inside raw string text against a flat
//! variable map, with `$$` as the escape for a literal dollar sign. A name
//! with no entry in the map substitutes the empty string. This pass knows
//! nothing about the surrounding grammar; it sees only the text between the
//! quotes.

use std::collections::HashMap;
use thiserror::Error;

/// Error produced while scanning substitution sequences
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterpolateError {
    /// A `$` not followed by `$` or `{`
    #[error("Stray '$' at byte {offset}; write '$$' for a literal dollar")]
    StrayDollar { offset: usize },
    /// A `${` with no closing `}`
    #[error("Unterminated '${{' substitution starting at byte {offset}")]
    Unterminated { offset: usize },
    /// A substitution whose name is not a valid identifier
    #[error("Invalid substitution name '{name}' at byte {offset}")]
    InvalidName { name: String, offset: usize },
}

/// Substitute `${name}` references in `text` using `vars`
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// let vars = HashMap::from([("who".to_string(), "world".to_string())]);
/// let out = kestrel_syntax::interpolate("hello ${who}", &vars).unwrap();
/// assert_eq!(out, "hello world");
/// ```
pub fn interpolate(
    text: &str,
    vars: &HashMap<String, String>,
) -> Result<String, InterpolateError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some(&(_, '$')) => {
                chars.next();
                out.push('$');
            }
            Some(&(_, '{')) => {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, ch)) => name.push(ch),
                        None => return Err(InterpolateError::Unterminated { offset }),
                    }
                }
                if !is_identifier(&name) {
                    return Err(InterpolateError::InvalidName { name, offset });
                }
                out.push_str(vars.get(&name).map(String::as_str).unwrap_or(""));
            }
            _ => return Err(InterpolateError::StrayDollar { offset }),
        }
    }

    Ok(out)
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
