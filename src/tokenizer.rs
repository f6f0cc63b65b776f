use crate::vocab::{Vocabulary, PAD, UNK};

/// Every review is encoded to exactly this many token ids, matching the
/// models' input shape.
pub const MAX_SEQUENCE_LENGTH: usize = 200;

/// The models were trained on the top 10 000 words; known words ranked past
/// the cap are dropped outright rather than mapped to `<UNK>`. That
/// asymmetry is deliberate and preserved (see DESIGN.md).
pub const VOCABULARY_CAP: u32 = 10_000;

/// Encodes raw review text into a fixed-length token sequence:
/// lowercase, strip everything that is not an ASCII letter or whitespace,
/// split on whitespace, map words through the vocabulary, then truncate or
/// right-pad with `<PAD>` to [`MAX_SEQUENCE_LENGTH`].
pub fn encode(text: &str, vocab: &Vocabulary) -> Vec<u32> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();

    let mut sequence = Vec::with_capacity(MAX_SEQUENCE_LENGTH);
    for word in cleaned.split_whitespace() {
        match vocab.id_of(word) {
            Some(id) if id < VOCABULARY_CAP => sequence.push(id),
            Some(_) => {}
            None => sequence.push(UNK),
        }
    }

    sequence.truncate(MAX_SEQUENCE_LENGTH);
    sequence.resize(MAX_SEQUENCE_LENGTH, PAD);
    sequence
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_vocab() -> Vocabulary {
        let mut raw = HashMap::new();
        raw.insert("great".to_string(), 50);
        raw.insert("movie".to_string(), 12);
        raw.insert("dont".to_string(), 33);
        // shifts to exactly the cap, so this word must be dropped
        raw.insert("arcane".to_string(), 9_997);
        Vocabulary::from_word_index(raw)
    }

    #[test]
    fn test_output_is_always_fixed_length() {
        let vocab = test_vocab();
        assert_eq!(encode("", &vocab).len(), MAX_SEQUENCE_LENGTH);
        assert_eq!(encode("great movie", &vocab).len(), MAX_SEQUENCE_LENGTH);

        let long = "movie ".repeat(500);
        let seq = encode(&long, &vocab);
        assert_eq!(seq.len(), MAX_SEQUENCE_LENGTH);
        assert!(seq.iter().all(|&id| id == 15));
    }

    #[test]
    fn test_known_words_and_padding() {
        let vocab = test_vocab();
        let seq = encode("great movie", &vocab);
        assert_eq!(seq[0], 53);
        assert_eq!(seq[1], 15);
        assert!(seq[2..].iter().all(|&id| id == PAD));
    }

    #[test]
    fn test_unknown_word_maps_to_unk() {
        let vocab = test_vocab();
        let seq = encode("zzyzx", &vocab);
        assert_eq!(seq[0], UNK);
    }

    #[test]
    fn test_high_id_word_dropped_not_unk() {
        let vocab = test_vocab();
        // "arcane" is known but its shifted id (10 000) is past the cap
        let seq = encode("arcane movie", &vocab);
        assert_eq!(seq[0], 15);
        assert_eq!(seq[1], PAD);
    }

    #[test]
    fn test_punctuation_digits_and_case_stripped() {
        let vocab = test_vocab();
        assert_eq!(encode("GREAT!!! Movie...", &vocab), encode("great movie", &vocab));
        // the apostrophe is stripped, joining the contraction into one word
        let seq = encode("don't", &vocab);
        assert_eq!(seq[0], 36);
        // digits vanish entirely
        assert_eq!(encode("10 out of 10", &vocab)[0], UNK);
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let vocab = test_vocab();
        let text = "A truly GREAT movie, 10/10 -- don't miss it!";
        assert_eq!(encode(text, &vocab), encode(text, &vocab));
    }
}
