//! Test-case input literal classification
//!
//! Marshaling is purely syntactic: an input line is one of four literal
//! shapes (bracketed array, quoted string, integer, raw token), and the
//! problem catalog is designed to stay inside that envelope. Interpreted
//! harnesses re-parse lines at runtime with the language's own literal
//! parser; the compiled-language generators use this classifier to choose
//! statically-typed argument construction at synthesis time.

/// Classified shape of one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    /// Quoted string with the quotes stripped
    Str(String),
    /// Flat array; `null` sentinels are kept for level-order tree encodings
    Array(Vec<Option<i64>>),
    /// Array of flat arrays (e.g. the mergeKLists input shape)
    NestedArray(Vec<Vec<Option<i64>>>),
    /// Anything else passes through verbatim
    Raw(String),
}

impl Literal {
    /// Classify a single input line.
    pub fn parse(line: &str) -> Literal {
        let line = line.trim();

        if line.starts_with('[') && line.ends_with(']') && line.len() >= 2 {
            let inner = line[1..line.len() - 1].trim();
            if inner.is_empty() {
                return Literal::Array(Vec::new());
            }
            if inner.starts_with('[') {
                if let Some(nested) = parse_nested(inner) {
                    return Literal::NestedArray(nested);
                }
                return Literal::Raw(line.to_string());
            }
            if let Some(items) = parse_flat(inner) {
                return Literal::Array(items);
            }
            return Literal::Raw(line.to_string());
        }

        if is_quoted(line) {
            return Literal::Str(line[1..line.len() - 1].to_string());
        }

        match line.parse::<i64>() {
            Ok(n) => Literal::Int(n),
            Err(_) => Literal::Raw(line.to_string()),
        }
    }

    /// Whether the literal carries a `null` sentinel anywhere, meaning it is
    /// a level-order tree or list encoding rather than a plain numeric array.
    pub fn has_null(&self) -> bool {
        match self {
            Literal::Array(items) => items.iter().any(|i| i.is_none()),
            Literal::NestedArray(arrays) => {
                arrays.iter().any(|a| a.iter().any(|i| i.is_none()))
            }
            _ => false,
        }
    }
}

fn is_quoted(line: &str) -> bool {
    line.len() >= 2
        && ((line.starts_with('"') && line.ends_with('"'))
            || (line.starts_with('\'') && line.ends_with('\'')))
}

fn parse_flat(inner: &str) -> Option<Vec<Option<i64>>> {
    inner
        .split(',')
        .map(|item| {
            let item = item.trim();
            if item == "null" || item == "None" {
                Some(None)
            } else {
                item.parse::<i64>().ok().map(Some)
            }
        })
        .collect()
}

/// Split `[..],[..]` at depth zero and parse each element as a flat array.
fn parse_nested(inner: &str) -> Option<Vec<Vec<Option<i64>>>> {
    let mut arrays = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in inner.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                arrays.push(parse_element(&inner[start..i])?);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    arrays.push(parse_element(&inner[start..])?);
    Some(arrays)
}

fn parse_element(element: &str) -> Option<Vec<Option<i64>>> {
    let element = element.trim();
    if !(element.starts_with('[') && element.ends_with(']')) {
        return None;
    }
    let inner = element[1..element.len() - 1].trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }
    parse_flat(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_integers() {
        assert_eq!(Literal::parse("9"), Literal::Int(9));
        assert_eq!(Literal::parse(" -42 "), Literal::Int(-42));
    }

    #[test]
    fn classifies_quoted_strings() {
        assert_eq!(
            Literal::parse("\"anagram\""),
            Literal::Str("anagram".into())
        );
        assert_eq!(Literal::parse("'abc'"), Literal::Str("abc".into()));
    }

    #[test]
    fn classifies_flat_arrays() {
        assert_eq!(
            Literal::parse("[2,7,11,15]"),
            Literal::Array(vec![Some(2), Some(7), Some(11), Some(15)])
        );
        assert_eq!(Literal::parse("[]"), Literal::Array(vec![]));
    }

    #[test]
    fn keeps_null_sentinels_in_level_order_arrays() {
        let lit = Literal::parse("[3,9,20,null,null,15,7]");
        assert_eq!(
            lit,
            Literal::Array(vec![
                Some(3),
                Some(9),
                Some(20),
                None,
                None,
                Some(15),
                Some(7)
            ])
        );
        assert!(lit.has_null());
        assert!(!Literal::parse("[1,2,3]").has_null());
    }

    #[test]
    fn classifies_nested_arrays() {
        assert_eq!(
            Literal::parse("[[1,4,5],[1,3,4],[2,6]]"),
            Literal::NestedArray(vec![
                vec![Some(1), Some(4), Some(5)],
                vec![Some(1), Some(3), Some(4)],
                vec![Some(2), Some(6)]
            ])
        );
    }

    #[test]
    fn unparseable_input_passes_through_raw() {
        assert_eq!(Literal::parse("abc"), Literal::Raw("abc".into()));
        assert_eq!(
            Literal::parse("[1,x,3]"),
            Literal::Raw("[1,x,3]".into())
        );
    }
}
