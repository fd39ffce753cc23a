//! # Formatter
//!
//! The template resolver: substitutes `{name}` placeholders in a command
//! template from a configuration snapshot. Placeholders named in
//! [`DELAYED_PLACEHOLDERS`] are never substituted; they survive verbatim so
//! a build driver can bind them per rule invocation later.

use crate::constants::DELAYED_PLACEHOLDERS;
use crate::models::ConfigSnapshot;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    // Matches brace escapes (`{{`, `}}`) and `{name}` placeholders in one pass.
    static ref PLACEHOLDER_RE: Regex =
        Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// Policy for placeholders that are absent from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// A missing non-delayed key fails the whole resolution.
    Strict,
    /// A missing non-delayed key substitutes as the empty string.
    Partial,
}

/// Represents errors that can occur while resolving a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A non-delayed placeholder had no value in the snapshot (strict mode only).
    #[error("missing required key '{name}' for template resolution")]
    MissingKey {
        /// The placeholder name that could not be resolved.
        name: String,
    },
    /// A `{` or `}` that is neither an escape nor part of a valid placeholder.
    #[error("stray or malformed brace at byte {position} of template")]
    StrayBrace {
        /// Byte offset of the offending brace within the template.
        position: usize,
    },
}

/// Resolves a single template against a configuration snapshot.
///
/// Resolution policy per placeholder, in order:
/// 1. Delayed names (`input`, `output`) are emitted as the literal
///    placeholder text, regardless of mode.
/// 2. In [`ResolveMode::Strict`], an absent key fails with
///    [`FormatError::MissingKey`].
/// 3. In [`ResolveMode::Partial`], an absent key substitutes as `""`.
/// 4. Otherwise the snapshot value is substituted.
///
/// `{{` and `}}` render as literal braces. Any other brace is a syntax
/// error in every mode.
pub fn resolve_template(
    template: &str,
    snapshot: &ConfigSnapshot,
    mode: ResolveMode,
) -> Result<String, FormatError> {
    let mut resolved = String::with_capacity(template.len());

    // Literal text between matches must be brace-free: anything the regex
    // did not consume is a stray brace.
    let check_literal = |segment: &str, offset: usize| -> Result<(), FormatError> {
        match segment.find(['{', '}']) {
            Some(pos) => Err(FormatError::StrayBrace {
                position: offset + pos,
            }),
            None => Ok(()),
        }
    };

    let mut last_index = 0;
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let full_match = caps.get(0).unwrap();
        let literal = template.get(last_index..full_match.start()).unwrap_or("");
        check_literal(literal, last_index)?;
        resolved.push_str(literal);

        match caps.get(1) {
            // A brace escape: emit half of it.
            None => match full_match.as_str() {
                "{{" => resolved.push('{'),
                _ => resolved.push('}'),
            },
            Some(name_match) => {
                let name = name_match.as_str();
                if DELAYED_PLACEHOLDERS.contains(&name) {
                    // Delayed: keep the placeholder text untouched.
                    resolved.push_str(full_match.as_str());
                } else {
                    match snapshot.get(name) {
                        Some(value) => resolved.push_str(value),
                        None if mode == ResolveMode::Strict => {
                            return Err(FormatError::MissingKey {
                                name: name.to_string(),
                            });
                        }
                        None => (), // Partial: substitute as empty.
                    }
                }
            }
        }
        last_index = full_match.end();
    }

    let tail = template.get(last_index..).unwrap_or("");
    check_literal(tail, last_index)?;
    resolved.push_str(tail);

    Ok(resolved)
}
