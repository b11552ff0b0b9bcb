/// Splits a multi-sentence CoNLL document into sentence blocks.
///
/// Sentences are separated by one or more blank lines. Each returned block
/// keeps its lines (comments included) and is paired with the 1-based line
/// number it starts on, ready for
/// [`parse_records_from`](crate::parse_records_from).
pub fn split_sentences(text: &str) -> Vec<(usize, &str)> {
    let mut blocks = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut end = 0;
    let mut offset = 0;

    for (idx, raw) in text.split_inclusive('\n').enumerate() {
        let blank = raw.trim().is_empty();
        match (blank, start) {
            (false, None) => {
                start = Some((idx + 1, offset));
                end = offset + raw.len();
            }
            (false, Some(_)) => end = offset + raw.len(),
            (true, Some((line, s))) => {
                blocks.push((line, &text[s..end]));
                start = None;
            }
            (true, None) => {}
        }
        offset += raw.len();
    }
    if let Some((line, s)) = start {
        blocks.push((line, &text[s..end]));
    }

    blocks
}
