use std::fmt::Write;

/// Escapes a string so it can be used as a CSS class name.
///
/// Follows the identifier rules used by common CSS escaping libraries: punctuation
/// gets a single backslash, control and non-ASCII characters become hex escapes, and
/// a leading digit (or `-` followed by a digit or `-`) is escaped so the result is a
/// valid identifier.
///
/// ```rust
/// use bcss::selector::escape_class_name;
///
/// assert_eq!(escape_class_name("sm:p-4"), r"sm\:p-4");
/// assert_eq!(escape_class_name("w-1/2"), r"w-1\/2");
/// assert_eq!(escape_class_name("2xl"), r"\32 xl");
/// ```
pub fn escape_class_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        let code = c as u32;
        if !(0x20..=0x7E).contains(&code) {
            let _ = write!(escaped, "\\{code:X} ");
        } else if needs_single_escape(c) {
            escaped.push('\\');
            escaped.push(c);
        } else {
            escaped.push(c);
        }
    }

    let mut chars = escaped.chars();
    match (chars.next(), chars.next()) {
        (Some('-'), Some(next)) if next == '-' || next.is_ascii_digit() => {
            format!("\\-{}", &escaped[1..])
        }
        (Some(first), _) if first.is_ascii_digit() => {
            format!("\\3{first} {}", &escaped[1..])
        }
        _ => escaped,
    }
}

fn needs_single_escape(c: char) -> bool {
    matches!(c,
        ' '..=',' | '.' | '/' | ':'..='@' | '['..='^' | '`' | '{'..='~'
    )
}

/// Resolves CSS escapes in an identifier: `sm\:p-4` becomes `sm:p-4`.
pub fn unescape_ident(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let mut hex = String::new();
        while hex.len() < 6 {
            match chars.peek() {
                Some(h) if h.is_ascii_hexdigit() => {
                    hex.push(*h);
                    chars.next();
                }
                _ => break,
            }
        }
        if hex.is_empty() {
            if let Some(next) = chars.next() {
                out.push(next);
            }
            continue;
        }
        if chars.peek() == Some(&' ') {
            chars.next();
        }
        let decoded = u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        out.push(decoded);
    }
    out
}
