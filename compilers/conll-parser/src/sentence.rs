use conll_protocol::Token;

/// Rebuilds the surface sentence: words ordered by ascending token id,
/// separated by single spaces.
pub fn reconstruct(tokens: &[Token]) -> String {
    let mut ordered: Vec<&Token> = tokens.iter().collect();
    ordered.sort_by_key(|t| t.id);
    ordered
        .iter()
        .map(|t| t.word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_records;
    use proptest::prelude::*;

    #[test]
    fn test_orders_by_id_not_input() {
        let tokens = parse_records(
            "3\tleft\t_\tVERB\t_\t_\t0\tROOT\n\
             1\tJohn\t_\tNOUN\t_\t_\t3\tnsubj\n\
             2\tSmith\t_\tPROPN\t_\t_\t1\tname\n",
        )
        .unwrap();
        assert_eq!(reconstruct(&tokens), "John Smith left");
    }

    #[test]
    fn test_empty() {
        assert_eq!(reconstruct(&[]), "");
    }

    proptest! {
        #[test]
        fn test_reconstruction_identity(words in prop::collection::vec("[a-zA-Z]{1,8}", 1..20)) {
            // Feed the records in reverse order; output must follow ids.
            let text: String = words
                .iter()
                .enumerate()
                .rev()
                .map(|(i, w)| format!("{}\t{}\t_\tX\t_\t_\t0\tdep\n", i + 1, w))
                .collect();
            let tokens = parse_records(&text).unwrap();

            let first = reconstruct(&tokens);
            prop_assert_eq!(&first, &words.join(" "));
            prop_assert_eq!(first, reconstruct(&parse_records(&text).unwrap()));
        }
    }
}
