use std::sync::LazyLock;

use regex::Regex;

static PERCENTAGE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?\s*%").ok());

static QUANTITY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d+(?:[.,]\d+)?\s*(?:kg|g|gr|mg|l|dl|cl|ml|stk|pk|pakke|ps|x)?\b\.?|\b(?:stk|pk|ca)\.",
    )
    .ok()
});

static ADJECTIVES: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:økologiske?|friske?|hakkede?|hakket|danske?|ferske?|mager|magre|magert|frosne?|frossen|hele?|store?|små|lille|organic|fresh|large|small|chopped|lean|frozen|whole)\b",
    )
    .ok()
});

static PUNCTUATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s-]").ok());

/// Strips figures and qualifiers that upstream search handles badly, e.g.
/// `"Økologisk minimælk 0,5%"` becomes `"minimælk"`.
///
/// Best effort: the stop list only knows common Danish and English
/// adjectives. An empty result means there is nothing worth sending.
pub fn clean_query(raw: &str) -> String {
    let cleaned = [&PERCENTAGE, &QUANTITY, &ADJECTIVES, &PUNCTUATION]
        .into_iter()
        .fold(raw.to_string(), |text, pattern| strip(&text, pattern));

    cleaned
        .split_whitespace()
        .filter(|word| !word.chars().all(|c| c == '-'))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn strip(text: &str, pattern: &LazyLock<Option<Regex>>) -> String {
    match pattern.as_ref() {
        Some(regex) => regex.replace_all(text, " ").into_owned(),
        None => text.to_string(),
    }
}
