//! Bracket-aware string splitting.
//!
//! Selectors, variant lists and function arguments all nest: `a:(b:c):d` has only
//! two top-level `:` and `theme('colors', 'a,b')` has one top-level `,`. The helpers
//! here split and expand such strings without a full tokenizer.

use crate::BcssError;

/// Splits `input` on `separator` wherever the bracket depth is zero.
///
/// - `(`, `[` and `{` open a nesting level closed by their matching bracket.
/// - A backslash skips the next character, so an escaped bracket never nests.
/// - Quoted strings (`'...'`, `"..."`) are opaque.
///
/// Empty segments are kept, and an input without a top-level separator comes back as
/// a single segment equal to the input. Balance is not validated.
///
/// ```rust
/// use bcss::segment;
///
/// assert_eq!(segment("a:(b:c):d", ':'), vec!["a", "(b:c)", "d"]);
/// assert_eq!(segment("hover", ':'), vec!["hover"]);
/// ```
pub fn segment(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut closing: Vec<char> = Vec::new();
    let mut last = 0;
    let mut chars = input.char_indices();

    while let Some((idx, c)) = chars.next() {
        // The separator wins over escapes so that `\` itself can be a separator.
        if closing.is_empty() && c == separator {
            parts.push(&input[last..idx]);
            last = idx + c.len_utf8();
            continue;
        }

        match c {
            '\\' => {
                chars.next();
            }
            '\'' | '"' => {
                while let Some((_, next)) = chars.next() {
                    if next == '\\' {
                        chars.next();
                    } else if next == c {
                        break;
                    }
                }
            }
            '(' => closing.push(')'),
            '[' => closing.push(']'),
            '{' => closing.push('}'),
            ')' | ']' | '}' => {
                if closing.last() == Some(&c) {
                    closing.pop();
                }
            }
            _ => {}
        }
    }

    parts.push(&input[last..]);
    parts
}

/// Expands shell-style braces: `a-{b,c}` becomes `["a-b", "a-c"]`.
///
/// Alternatives may nest, and `{start..end}` / `{start..end..step}` expand to
/// integer sequences. A pattern without braces expands to itself.
///
/// # Errors
///
/// [`BcssError::UnbalancedBrackets`] when an opening brace is never closed or a
/// closing brace was never opened, and [`BcssError::InvalidSequence`] for a zero step.
pub fn expand_braces(pattern: &str) -> Result<Vec<String>, BcssError> {
    let open = pattern.find('{');
    if pattern[..open.unwrap_or(pattern.len())].contains('}') {
        return Err(BcssError::UnbalancedBrackets {
            input: pattern.to_string(),
        });
    }
    let Some(open) = open else {
        return Ok(vec![pattern.to_string()]);
    };

    let prefix = &pattern[..open];
    let rest = &pattern[open..];

    let mut depth = 0usize;
    let mut close = None;
    for (idx, c) in rest.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
            }
            _ => {}
        }
    }

    let close = close.ok_or_else(|| BcssError::UnbalancedBrackets {
        input: pattern.to_string(),
    })?;

    let inside = &rest[1..close];
    let suffix = &rest[close + 1..];

    let alternatives = match expand_sequence(inside)? {
        Some(sequence) => sequence,
        None => segment(inside, ',').into_iter().map(str::to_string).collect(),
    };

    let mut parts = Vec::new();
    for alternative in &alternatives {
        parts.extend(expand_braces(alternative)?);
    }

    let mut expanded = Vec::new();
    for tail in expand_braces(suffix)? {
        for part in &parts {
            expanded.push(format!("{prefix}{part}{tail}"));
        }
    }
    Ok(expanded)
}

/// `1..3` or `0..20..10`; returns `None` when `inside` is not a sequence.
fn expand_sequence(inside: &str) -> Result<Option<Vec<String>>, BcssError> {
    let bounds: Vec<&str> = inside.split("..").collect();
    if !(2..=3).contains(&bounds.len()) {
        return Ok(None);
    }

    let numbers: Option<Vec<i64>> = bounds.iter().map(|b| b.parse::<i64>().ok()).collect();
    let Some(numbers) = numbers else {
        return Ok(None);
    };

    let (start, end) = (numbers[0], numbers[1]);
    let increasing = start <= end;
    let invalid = || BcssError::InvalidSequence(inside.to_string());
    let magnitude = match numbers.get(2) {
        Some(0) => return Err(invalid()),
        Some(step) => step.checked_abs().ok_or_else(invalid)?,
        None => 1,
    };
    let step = if increasing { magnitude } else { -magnitude };

    // Stepping stops before leaving the range, so bounds near i64::MAX never overflow.
    let mut values = vec![start.to_string()];
    let mut current = start;
    while let Some(next) = current.checked_add(step) {
        if (increasing && next > end) || (!increasing && next < end) {
            break;
        }
        values.push(next.to_string());
        current = next;
    }
    Ok(Some(values))
}
