use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALPHA: Regex = Regex::new(r"[^a-zA-Z]+").expect("valid regex");
}

/// Tokenize document text into lowercase ASCII-alphabetic words, in document order.
///
/// Every run of non-letters acts as a separator, so punctuation, digits and
/// non-ASCII characters never survive into a token.
pub fn tokenize(text: &str) -> Vec<String> {
    NON_ALPHA
        .split(text)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_ascii_lowercase())
        .collect()
}

/// Split free-form user input into lowercase words on whitespace only.
///
/// Unlike [`tokenize`], punctuation is kept: `"fox."` stays `"fox."`.
pub fn split_words(input: &str) -> Vec<String> {
    input.split_whitespace().map(|w| w.to_lowercase()).collect()
}
