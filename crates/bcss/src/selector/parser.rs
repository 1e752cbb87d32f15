use nom::{
    IResult,
    branch::alt,
    character::complete::{char, multispace0},
    combinator::map,
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{pair, preceded},
};

use super::{Combinator, ComplexSelector, CompoundSelector, Selector, SelectorList, SelectorPart};
use crate::{BcssError, segment};

/// Parses a comma-separated selector list. The whole input must be consumed.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, BcssError> {
    let mut selectors = Vec::new();
    for raw in segment(input, ',') {
        let raw = raw.trim();
        let (remaining, complex) = parse_complex_selector(raw)
            .map_err(|e| BcssError::InvalidSelector(format!("`{input}` ({e})")))?;
        if !remaining.trim().is_empty() {
            return Err(BcssError::InvalidSelector(format!(
                "`{input}` (unexpected `{}`)",
                remaining.trim()
            )));
        }
        selectors.push(complex);
    }
    Ok(SelectorList::new(selectors))
}

/// Parses an identifier, keeping escapes (`sm\:p-4`, `\32 xl`) verbatim.
fn parse_ident(input: &str) -> IResult<&str, &str> {
    let mut end = 0;
    let mut chars = input.char_indices().peekable();

    while let Some(&(idx, c)) = chars.peek() {
        if c == '\\' {
            chars.next();
            let Some((escaped_idx, escaped)) = chars.next() else {
                break;
            };
            end = escaped_idx + escaped.len_utf8();
            if escaped.is_ascii_hexdigit() {
                let mut digits = 1;
                while let Some(&(hex_idx, hex)) = chars.peek() {
                    if digits < 6 && hex.is_ascii_hexdigit() {
                        chars.next();
                        end = hex_idx + 1;
                        digits += 1;
                    } else {
                        break;
                    }
                }
                // A single whitespace terminates a hex escape and belongs to it.
                if let Some(&(space_idx, ' ')) = chars.peek() {
                    chars.next();
                    end = space_idx + 1;
                }
            }
            continue;
        }

        if c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            end = idx + c.len_utf8();
            chars.next();
        } else {
            break;
        }
    }

    if end == 0 {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::AlphaNumeric)));
    }
    Ok((&input[end..], &input[..end]))
}

/// Takes a bracketed group starting at `open`, returning its inner text.
fn parse_group(open: char, close: char) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input: &str| {
        let (rest, _) = char(open)(input)?;
        let inner = segment(rest, close);
        if inner.len() < 2 {
            return Err(nom::Err::Error(Error::new(input, ErrorKind::Char)));
        }
        let inner = inner[0];
        Ok((&rest[inner.len() + close.len_utf8()..], inner))
    }
}

fn parse_pseudo(input: &str) -> IResult<&str, Selector> {
    let (input, element) = alt((
        map(nom::bytes::complete::tag("::"), |_| true),
        map(char(':'), |_| false),
    ))(input)?;
    let (input, name) = parse_ident(input)?;

    let (input, full) = match parse_group('(', ')')(input) {
        Ok((rest, args)) => (rest, format!("{name}({args})")),
        Err(_) => (input, name.to_string()),
    };

    let selector = if element {
        Selector::PseudoElement(full)
    } else {
        Selector::PseudoClass(full)
    };
    Ok((input, selector))
}

fn parse_attribute_selector(input: &str) -> IResult<&str, Selector> {
    let (input, content) = parse_group('[', ']')(input)?;

    // `[.banana]` is the anchor marker, anything else is a real attribute selector.
    if let Some(class) = content.strip_prefix('.') {
        if let Ok(("", name)) = parse_ident(class) {
            return Ok((input, Selector::Anchor(name.to_string())));
        }
    }
    Ok((input, Selector::Attribute(content.to_string())))
}

/// Parses a simple selector: Type, .Class, #ID, pseudo, attribute or anchor.
pub fn parse_simple_selector(input: &str) -> IResult<&str, Selector> {
    alt((
        map(preceded(char('#'), parse_ident), |s| {
            Selector::Id(s.to_string())
        }),
        map(preceded(char('.'), parse_ident), |s| {
            Selector::Class(s.to_string())
        }),
        parse_pseudo,
        map(char('&'), |_| Selector::Nesting),
        map(char('*'), |_| Selector::Universal),
        parse_attribute_selector,
        map(parse_ident, |s| Selector::Type(s.to_string())),
    ))(input)
}

/// Parses a compound selector (e.g., "div.card:hover").
pub fn parse_compound_selector(input: &str) -> IResult<&str, CompoundSelector> {
    let (input, first) = parse_simple_selector(input)?;
    let (input, rest) = many0(parse_simple_selector)(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, CompoundSelector::new(selectors)))
}

/// A combinator between two compounds. Bare whitespace is a descendant
/// combinator; `>`, `+` and `~` may be padded with whitespace on either side.
fn parse_combinator(input: &str) -> IResult<&str, Combinator> {
    let (rest, ws) = multispace0(input)?;
    let explicit: IResult<&str, Combinator> = alt((
        map(char('>'), |_| Combinator::Child),
        map(char('+'), |_| Combinator::AdjacentSibling),
        map(char('~'), |_| Combinator::GeneralSibling),
    ))(rest);

    match explicit {
        Ok((after, combinator)) => {
            let (after, _) = multispace0(after)?;
            Ok((after, combinator))
        }
        Err(_) if !ws.is_empty() => Ok((rest, Combinator::Descendant)),
        Err(err) => Err(err),
    }
}

/// Parses compounds joined by combinators (`[.group]:hover > .item`).
///
/// Each part records the combinator that follows it, the last one `None`. A
/// combinator with no compound after it is left in the remaining input so the
/// list parser can report it.
pub fn parse_complex_selector(input: &str) -> IResult<&str, ComplexSelector> {
    let (mut input, head) = parse_compound_selector(input)?;
    let mut parts = vec![SelectorPart::new(head, Combinator::None)];

    while let Ok((rest, (combinator, compound))) =
        pair(parse_combinator, parse_compound_selector)(input)
    {
        if let Some(previous) = parts.last_mut() {
            previous.combinator = combinator;
        }
        parts.push(SelectorPart::new(compound, Combinator::None));
        input = rest;
    }

    Ok((input, ComplexSelector::new(parts)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_keeps_escapes() {
        assert_eq!(parse_ident(r"sm\:p-4 rest"), Ok((" rest", r"sm\:p-4")));
        assert_eq!(parse_ident(r"\32 xl\:flex"), Ok(("", r"\32 xl\:flex")));
        assert_eq!(parse_ident(r"w-1\/2"), Ok(("", r"w-1\/2")));
    }

    #[test]
    fn pseudo_with_arguments() {
        let (rest, selector) = parse_simple_selector(":nth-child(2n+1) .x").unwrap();
        assert_eq!(rest, " .x");
        assert_eq!(selector, Selector::PseudoClass("nth-child(2n+1)".into()));
    }

    #[test]
    fn anchor_and_attribute() {
        assert_eq!(
            parse_simple_selector("[.banana]").unwrap().1,
            Selector::Anchor("banana".into())
        );
        assert_eq!(
            parse_simple_selector("[dir='rtl']").unwrap().1,
            Selector::Attribute("dir='rtl'".into())
        );
    }

    #[test]
    fn round_trips_combinators() {
        let list = parse_selector_list(".a>.b  .c + .d ~ .e::before, div").unwrap();
        assert_eq!(list.to_string(), ".a > .b .c + .d ~ .e::before, div");
    }

    #[test]
    fn anchors_join_like_classes() {
        let (rest, complex) = parse_complex_selector("[.group]:hover > .item +").unwrap();
        assert_eq!(rest, " +");
        assert_eq!(complex.parts.len(), 2);
        assert_eq!(complex.parts[0].combinator, Combinator::Child);
        assert_eq!(complex.to_string(), "[.group]:hover > .item");
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(matches!(
            parse_selector_list(".a {"),
            Err(BcssError::InvalidSelector(_))
        ));
    }
}
