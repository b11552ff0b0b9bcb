use conll_protocol::AttributeMap;
use nom::{
    bytes::complete::{take_till, take_till1},
    character::complete::char,
    combinator::{all_consuming, rest},
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};

use crate::error::RecordError;
use crate::record::EMPTY_FIELD;

/// `Case=Nom|Animacy=Anim` -> ["Case=Nom", "Animacy=Anim"]
fn segments(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(separated_list1(char('|'), take_till(|c: char| c == '|')))(input)
}

/// `Case=Nom` -> ("Case", "Nom"). Splits on the first `=` only.
fn key_value(segment: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_till1(|c: char| c == '='), char('='), rest)(segment)
}

/// Parses the FEATS column of one record.
pub fn parse_attributes(line: usize, field: &str) -> Result<AttributeMap, RecordError> {
    let mut attributes = AttributeMap::new();
    if field.is_empty() || field == EMPTY_FIELD {
        return Ok(attributes);
    }

    let malformed = |segment: &str| RecordError::MalformedAttribute {
        line,
        segment: segment.to_string(),
    };

    let (_, parts) = segments(field).map_err(|_| malformed(field))?;
    for segment in parts {
        let (_, (key, value)) = key_value(segment).map_err(|_| malformed(segment))?;
        attributes.insert(key, value);
    }

    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_features() {
        let attrs = parse_attributes(1, "Animacy=Anim|Case=Nom|Gender=Masc").unwrap();
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get("Case"), Some("Nom"));
        assert_eq!(attrs.get("Gender"), Some("Masc"));
    }

    #[test]
    fn test_placeholder_is_empty() {
        assert!(parse_attributes(1, "_").unwrap().is_empty());
        assert!(parse_attributes(1, "").unwrap().is_empty());
    }

    #[test]
    fn test_value_may_contain_equals() {
        let attrs = parse_attributes(1, "Note=a=b").unwrap();
        assert_eq!(attrs.get("Note"), Some("a=b"));
    }

    #[test]
    fn test_segment_without_equals() {
        let err = parse_attributes(7, "Case=Nom|Plural").unwrap_err();
        assert_eq!(
            err,
            RecordError::MalformedAttribute { line: 7, segment: "Plural".to_string() }
        );
    }

    #[test]
    fn test_empty_key_and_trailing_pipe() {
        assert!(matches!(
            parse_attributes(1, "=Nom"),
            Err(RecordError::MalformedAttribute { .. })
        ));
        assert!(matches!(
            parse_attributes(1, "Case=Nom|"),
            Err(RecordError::MalformedAttribute { ref segment, .. }) if segment.is_empty()
        ));
    }
}
