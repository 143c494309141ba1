//! Sentence tokenizer.
//!
//! Words are split on whitespace. Each of `. , ! ? ; :` becomes a token of its
//! own; apostrophes stay inside the word, so "don't" is a single token.
//! Joining puts a single space between tokens except before punctuation.

/// Characters that always form their own token.
pub const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Check whether a token is a single punctuation mark.
pub fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => PUNCTUATION.contains(&c),
        _ => false,
    }
}

/// Split a sentence into word and punctuation tokens.
///
/// Whitespace runs of any length separate words and are not kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    for c in text.chars() {
        if c.is_whitespace() {
            flush(&mut word, &mut tokens);
        } else if PUNCTUATION.contains(&c) {
            flush(&mut word, &mut tokens);
            tokens.push(c.to_string());
        } else {
            word.push(c);
        }
    }
    flush(&mut word, &mut tokens);

    tokens
}

fn flush(word: &mut String, tokens: &mut Vec<String>) {
    if !word.is_empty() {
        tokens.push(std::mem::take(word));
    }
}

/// Join tokens back into a sentence.
///
/// Punctuation attaches to the preceding token; every other token is
/// separated by exactly one space.
pub fn detokenize<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();

    for token in tokens {
        let token = token.as_ref();
        if !out.is_empty() && !is_punctuation(token) {
            out.push(' ');
        }
        out.push_str(token);
    }

    out
}

/// Compare two tokens the way the validators do.
///
/// Punctuation must match exactly; words compare case-insensitively.
pub fn tokens_match(a: &str, b: &str) -> bool {
    if is_punctuation(a) || is_punctuation(b) {
        return a == b;
    }
    a.to_lowercase() == b.to_lowercase()
}

/// Canonical comparison form of a sentence: re-tokenized and lowercased.
///
/// Two sentences with the same words and punctuation normalize to the same
/// string regardless of spacing or case.
pub fn normalize(text: &str) -> String {
    detokenize(&tokenize(text)).to_lowercase()
}
