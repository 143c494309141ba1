//! Text primitives shared by the answer validators.
//!
//! The tokenizer splits sentences into word and punctuation tokens for the
//! sentence-reordering mode; the similarity scorer gives fuzzy "almost
//! correct" feedback for typed answers.

pub mod similarity;
pub mod tokenizer;

pub use similarity::{levenshtein, similarity};
pub use tokenizer::{detokenize, is_punctuation, normalize, tokenize, tokens_match, PUNCTUATION};
