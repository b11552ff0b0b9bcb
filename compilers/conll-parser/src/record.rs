use conll_protocol::{PosTag, Token, TokenId};
use nom::{
    bytes::complete::take_till,
    character::complete::{char, u32 as decimal},
    combinator::all_consuming,
    multi::separated_list1,
    IResult,
};
use tracing::debug;

use crate::attributes::parse_attributes;
use crate::error::RecordError;

/// Placeholder for an empty column.
pub const EMPTY_FIELD: &str = "_";

/// Columns a record must have (ID .. DEPREL). Later columns are ignored.
pub const MIN_FIELDS: usize = 8;

const ID: usize = 0;
const FORM: usize = 1;
const POS: usize = 3;
const FEATS: usize = 5;
const HEAD: usize = 6;
const DEPREL: usize = 7;

fn fields(line: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('\t'), take_till(|c: char| c == '\t'))(line)
}

fn number(field: &str) -> Option<u32> {
    all_consuming(decimal::<&str, nom::error::Error<&str>>)(field)
        .ok()
        .map(|(_, n)| n)
}

/// Parses one tab-separated record. `line` is the 1-based line number used in
/// error reports.
pub fn parse_record(line: usize, input: &str) -> Result<Token, RecordError> {
    let malformed = |reason: String| RecordError::MalformedRecord { line, reason };

    let (_, parts) = fields(input).map_err(|_| malformed("unreadable record".to_string()))?;
    if parts.len() < MIN_FIELDS {
        return Err(malformed(format!(
            "expected at least {MIN_FIELDS} tab-separated fields, found {}",
            parts.len()
        )));
    }

    let id = number(parts[ID])
        .ok_or_else(|| malformed(format!("token id {:?} is not a non-negative integer", parts[ID])))?;
    if id == 0 {
        return Err(malformed("token id 0 is reserved for \"no head\"".to_string()));
    }
    let head = number(parts[HEAD])
        .ok_or_else(|| malformed(format!("head id {:?} is not a non-negative integer", parts[HEAD])))?;

    Ok(Token {
        id: TokenId(id),
        word: parts[FORM].to_string(),
        pos_tag: PosTag::from(parts[POS]),
        attributes: parse_attributes(line, parts[FEATS])?,
        head_id: TokenId(head),
        relation: parts[DEPREL].to_string(),
    })
}

/// Parses every record of one sentence, in input order.
///
/// Blank lines and `#` comment lines are skipped; a trailing `\r` is ignored.
pub fn parse_records(text: &str) -> Result<Vec<Token>, RecordError> {
    parse_records_from(1, text)
}

/// Like [`parse_records`], for a block that starts on line `first_line` of a
/// larger document. Error line numbers count from the document.
pub fn parse_records_from(first_line: usize, text: &str) -> Result<Vec<Token>, RecordError> {
    let mut tokens = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        tokens.push(parse_record(first_line + idx, line)?);
    }
    debug!(tokens = tokens.len(), "parsed records");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let token = parse_record(1, "1\tJohn\t_\tNOUN\t_\tCase=Nom|Animacy=Anim\t3\tnsubj").unwrap();
        assert_eq!(token.id, TokenId(1));
        assert_eq!(token.word, "John");
        assert_eq!(token.pos_tag, PosTag::Noun);
        assert_eq!(token.attributes.get("Animacy"), Some("Anim"));
        assert_eq!(token.head_id, TokenId(3));
        assert_eq!(token.relation, "nsubj");
    }

    #[test]
    fn test_ignored_columns_and_extra_columns() {
        // LEMMA and XPOS are ignored, DEPS and MISC too
        let token = parse_record(1, "3\tleft\tleave\tVERB\tVBD\t_\t0\tROOT\t_\tSpaceAfter=No").unwrap();
        assert_eq!(token.word, "left");
        assert!(token.is_root());
        assert!(token.attributes.is_empty());
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_record(4, "1\tJohn\t_\tNOUN\t_\t_\t3").unwrap_err();
        assert!(matches!(err, RecordError::MalformedRecord { line: 4, .. }));
        assert!(err.to_string().contains("found 7"));
    }

    #[test]
    fn test_non_numeric_ids() {
        assert!(matches!(
            parse_record(1, "one\tJohn\t_\tNOUN\t_\t_\t3\tnsubj"),
            Err(RecordError::MalformedRecord { .. })
        ));
        assert!(matches!(
            parse_record(1, "1\tJohn\t_\tNOUN\t_\t_\t-3\tnsubj"),
            Err(RecordError::MalformedRecord { .. })
        ));
        // Multiword ranges are not single tokens
        assert!(matches!(
            parse_record(1, "1-2\tdel\t_\tADP\t_\t_\t_\t_"),
            Err(RecordError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_zero_id_rejected() {
        assert!(matches!(
            parse_record(1, "0\tJohn\t_\tNOUN\t_\t_\t3\tnsubj"),
            Err(RecordError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_bad_attribute_carries_line() {
        let err = parse_record(9, "1\tJohn\t_\tNOUN\t_\tCase\t3\tnsubj").unwrap_err();
        assert_eq!(err, RecordError::MalformedAttribute { line: 9, segment: "Case".to_string() });
    }

    #[test]
    fn test_parse_records_skips_blank_and_comments() {
        let text = "# text = John left\n1\tJohn\t_\tNOUN\t_\t_\t2\tnsubj\r\n\n2\tleft\t_\tVERB\t_\t_\t0\tROOT\n";
        let tokens = parse_records(text).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].relation, "nsubj");
        assert_eq!(tokens[1].relation, "ROOT");
    }

    #[test]
    fn test_parse_records_reports_line_number() {
        let text = "1\tJohn\t_\tNOUN\t_\t_\t2\tnsubj\n\nbroken\n";
        let err = parse_records(text).unwrap_err();
        assert!(matches!(err, RecordError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_parse_records_from_offsets_line_numbers() {
        let text = "1\tJohn\t_\tNOUN\t_\tCase\t2\tnsubj\n";
        assert_eq!(
            parse_records_from(12, text).unwrap_err(),
            RecordError::MalformedAttribute { line: 12, segment: "Case".to_string() }
        );
    }
}
