//! Text extraction utilities shared by the detectors

pub mod sentences;
pub mod similarity;

pub use sentences::{is_noise_sentence, prose_sentences, split_sentences, CharOffsets, Sentence};
pub use similarity::{fuzzy_ratio, max_ratio, normalize_sentence, token_set};
