use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use super::round_to;

/// Words longer than this count as complex.
const COMPLEX_WORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    /// 1–10, higher reads easier. 0 when the text has no words.
    pub readability_score: f64,
    pub avg_sentence_length: f64,
    pub word_count: usize,
    pub sentence_count: usize,
    /// Share of complex words, 0–1.
    pub complexity_ratio: f64,
}

pub fn calculate_readability(text: &str) -> Readability {
    let words: Vec<&str> = text.unicode_words().collect();
    let sentence_count = text
        .unicode_sentences()
        .filter(|s| s.unicode_words().next().is_some())
        .count();
    let word_count = words.len();

    if word_count == 0 || sentence_count == 0 {
        return Readability {
            word_count,
            ..Readability::default()
        };
    }

    let avg_sentence_length = word_count as f64 / sentence_count as f64;
    let complex_words = words
        .iter()
        .filter(|w| w.chars().count() > COMPLEX_WORD_LEN)
        .count();
    let complexity_ratio = complex_words as f64 / word_count as f64;
    let readability_score = (10.0 - avg_sentence_length / 3.0 - complexity_ratio * 5.0).max(1.0);

    Readability {
        readability_score: round_to(readability_score, 2),
        avg_sentence_length: round_to(avg_sentence_length, 2),
        word_count,
        sentence_count,
        complexity_ratio: round_to(complexity_ratio, 2),
    }
}
