//! Tolerant decoding of extracted windows.
//!
//! The decoder ladder, in priority order:
//!
//! 1. JSON, including truncated JSON as produced by an interrupted stream.
//!    Unterminated strings and containers are closed at the cut point;
//!    dangling keys, separators, and half-written literals are dropped.
//! 2. YAML, for complete non-JSON blocks (indentation-style mappings and
//!    lists).
//! 3. The raw window text itself, unchanged.
//!
//! Decoding never fails: content no decoder understands comes back as a
//! string candidate, and schema validation decides what to do with it.

use serde_json::Value;
use tracing::trace;

use crate::error::value_kind;

/// Decode a window into a candidate value.
///
/// Returns the first decoder's result in the priority order above. The
/// result is a plain [`Value`]; whether it satisfies the caller's schema is
/// a separate question answered during validation.
#[must_use]
pub fn parse_tolerant(window: &str) -> Value {
    let trimmed = window.trim();
    if !trimmed.is_empty() {
        if let Some(value) = parse_partial_json(trimmed) {
            trace!(kind = value_kind(&value), "decoded window as JSON");
            return value;
        }
        match serde_yaml::from_str::<Value>(trimmed) {
            // A plain string scalar is the window itself; fall through to
            // the verbatim fallback instead.
            Ok(value) if !value.is_string() => {
                trace!(kind = value_kind(&value), "decoded window as YAML");
                return value;
            }
            _ => {}
        }
    }
    trace!("window kept as raw text");
    Value::String(window.to_owned())
}

/// Parse JSON that may have been cut off mid-document.
///
/// Complete documents parse as-is. For truncated ones the document is
/// completed first: unterminated strings and containers are closed at the
/// truncation point, a trailing scalar literal is kept only if it is
/// already syntactically complete (`[1, 2` keeps the 2), and dangling
/// commas, keys, and half literals are dropped back to the last complete
/// element. Returns `None` for input that is not JSON at all.
#[must_use]
pub fn parse_partial_json(input: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(input) {
        return Some(value);
    }
    let completed = complete_truncated_json(input)?;
    serde_json::from_str(&completed).ok()
}

/// What a container is waiting for at the current position.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    /// Array just opened: a value or `]`.
    FirstElement,
    /// Array after a comma: a value.
    NextElement,
    /// Object just opened: a key or `}`.
    FirstKey,
    /// Object after a comma: a key.
    NextKey,
    /// Object after a key: `:`.
    Colon,
    /// Object after `:`: a value.
    Value,
    /// After a complete value: `,` or the closer.
    Separator,
}

#[derive(Debug)]
struct Frame {
    closer: char,
    /// Byte index just past the last complete element or pair.
    committed: usize,
    slot: Slot,
}

fn complete_value(stack: &mut [Frame], end: usize) {
    if let Some(frame) = stack.last_mut() {
        frame.committed = end;
        frame.slot = Slot::Separator;
    }
}

fn at_value_position(stack: &[Frame], started: bool) -> bool {
    match stack.last() {
        Some(frame) => matches!(
            frame.slot,
            Slot::FirstElement | Slot::NextElement | Slot::Value
        ),
        None => !started,
    }
}

fn is_token_end(c: char) -> bool {
    matches!(c, ',' | '}' | ']' | ' ' | '\t' | '\n' | '\r')
}

fn is_complete_scalar(token: &str) -> bool {
    matches!(token, "true" | "false" | "null")
        || serde_json::from_str::<Value>(token).map_or(false, |v| v.is_number())
}

/// Complete a truncated JSON document, or `None` if the input is not a
/// truncated JSON document to begin with.
///
/// Single pass. Each open container tracks the position just past its last
/// complete element, so a dangling tail can be cut back to it before the
/// missing closers are appended.
fn complete_truncated_json(input: &str) -> Option<String> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut in_string = false;
    let mut string_is_key = false;
    let mut escape = false;
    let mut unicode_left: u8 = 0;
    // Index just past the last byte that can safely end the current string.
    let mut string_sound = 0usize;
    let mut token_start: Option<usize> = None;
    let mut started = false;

    for (i, c) in input.char_indices() {
        if in_string {
            if unicode_left > 0 {
                if c.is_ascii_hexdigit() {
                    unicode_left -= 1;
                    if unicode_left == 0 {
                        string_sound = i + 1;
                    }
                } else {
                    return None;
                }
            } else if escape {
                escape = false;
                match c {
                    '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => string_sound = i + 1,
                    'u' => unicode_left = 4,
                    _ => return None,
                }
            } else if c == '\\' {
                escape = true;
            } else if c == '"' {
                in_string = false;
                if string_is_key {
                    stack.last_mut()?.slot = Slot::Colon;
                } else {
                    complete_value(&mut stack, i + 1);
                }
            } else {
                string_sound = i + c.len_utf8();
            }
            continue;
        }

        if let Some(start) = token_start {
            if is_token_end(c) {
                if !is_complete_scalar(&input[start..i]) {
                    return None;
                }
                complete_value(&mut stack, i);
                token_start = None;
            } else {
                continue;
            }
        }

        match c {
            ' ' | '\t' | '\n' | '\r' => {}
            '{' | '[' => {
                if !at_value_position(&stack, started) {
                    return None;
                }
                started = true;
                let (closer, slot) = if c == '{' {
                    ('}', Slot::FirstKey)
                } else {
                    (']', Slot::FirstElement)
                };
                stack.push(Frame {
                    closer,
                    committed: i + 1,
                    slot,
                });
            }
            '}' | ']' => {
                let frame = stack.pop()?;
                if frame.closer != c
                    || !matches!(
                        frame.slot,
                        Slot::Separator | Slot::FirstKey | Slot::FirstElement
                    )
                {
                    return None;
                }
                complete_value(&mut stack, i + 1);
            }
            ',' => match stack.last_mut() {
                Some(frame) if frame.slot == Slot::Separator => {
                    frame.slot = if frame.closer == '}' {
                        Slot::NextKey
                    } else {
                        Slot::NextElement
                    };
                }
                _ => return None,
            },
            ':' => match stack.last_mut() {
                Some(frame) if frame.slot == Slot::Colon => frame.slot = Slot::Value,
                _ => return None,
            },
            '"' => {
                string_is_key = match stack.last() {
                    Some(frame) => match frame.slot {
                        Slot::FirstKey | Slot::NextKey => true,
                        Slot::FirstElement | Slot::NextElement | Slot::Value => false,
                        Slot::Colon | Slot::Separator => return None,
                    },
                    None => {
                        if started {
                            return None;
                        }
                        false
                    }
                };
                started = true;
                in_string = true;
                escape = false;
                unicode_left = 0;
                string_sound = i + 1;
            }
            _ => {
                if !at_value_position(&stack, started) {
                    return None;
                }
                started = true;
                token_start = Some(i);
            }
        }
    }

    // End of input: decide what stands, what gets cut, what gets closed.
    let (kept, close_string) = if in_string {
        if string_is_key {
            // A half-written key contributes nothing; drop the pair.
            (stack.last()?.committed, false)
        } else {
            (string_sound, true)
        }
    } else if let Some(start) = token_start {
        if is_complete_scalar(&input[start..]) {
            (input.len(), false)
        } else {
            (stack.last()?.committed, false)
        }
    } else {
        let frame = stack.last()?;
        match frame.slot {
            Slot::Separator | Slot::FirstKey | Slot::FirstElement => (input.len(), false),
            Slot::NextKey | Slot::NextElement | Slot::Colon | Slot::Value => {
                (frame.committed, false)
            }
        }
    };

    let mut result = String::with_capacity(kept + 1 + stack.len());
    result.push_str(&input[..kept]);
    if close_string {
        result.push('"');
    }
    for frame in stack.iter().rev() {
        result.push(frame.closer);
    }
    Some(result)
}
