//! Text normalization shared by taxonomy titles and free-text queries.
//!
//! Both sides of every lexical comparison go through `tokenize`, so a title
//! keyword and a query token match exactly when their normalized forms are equal.

/// Words that carry no classification signal. Includes the filler vocabulary
/// the taxonomies use in their titles ("n.e.c.", "activities", "other").
const STOPWORDS: &[&str] = &[
    "a", "about", "activities", "activity", "all", "also", "an", "and", "any", "are", "as", "at",
    "be", "been", "but", "by", "can", "company", "did", "do", "does", "each", "etc", "except",
    "for", "from", "general", "had", "has", "have", "he", "her", "his", "i", "if", "in",
    "including", "into", "is", "it", "its", "job", "ltd", "may", "more", "most", "n", "nec",
    "no", "not", "of", "on", "or", "other", "our", "out", "over", "pte", "related", "role",
    "she", "so", "such", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "those", "through", "to", "under", "up", "us", "was", "we", "were", "what",
    "when", "which", "while", "who", "will", "with", "within", "would", "you", "your",
];

/// Splits text into normalized tokens: lowercased, punctuation stripped,
/// stopwords removed, light suffix stemming applied. Order is preserved so
/// callers can derive adjacent-token phrases.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|raw| !raw.is_empty())
        .filter(|raw| !is_stopword(raw))
        .map(stem)
        .filter(|token| token.len() > 1 && !is_stopword(token))
        .collect()
}

/// Adjacent token pairs, joined by a single space.
pub fn phrases(tokens: &[String]) -> Vec<String> {
    tokens
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect()
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.binary_search(&token).is_ok()
}

/// Folds the common English inflections onto one form so "banks", "banking"
/// and "bank" compare equal, as do "nurse" and "nursing". Deliberately
/// conservative: short words and double-s endings are left alone.
fn stem(token: &str) -> String {
    if !token.is_ascii() {
        return token.to_string();
    }
    let len = token.len();
    let base = if len > 4 && token.ends_with("ies") {
        format!("{}y", &token[..len - 3])
    } else if len >= 6 && token.ends_with("ing") {
        token[..len - 3].to_string()
    } else if len > 3 && token.ends_with('s') && !token.ends_with("ss") && !token.ends_with("us") {
        token[..len - 1].to_string()
    } else {
        token.to_string()
    };
    match base.strip_suffix('e') {
        Some(stripped) if base.len() > 4 => stripped.to_string(),
        _ => base,
    }
}
