use serde::{Deserialize, Serialize};

// Free-text query normalization for catalog search: diacritic folding,
// quoted-phrase extraction and tokenization. Pure string processing, no
// engine state involved.

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NormalizedQuery {
    pub original: String,
    pub normalized: String,
    pub phrases: Vec<String>,
    pub tokens: Vec<String>,
}

// common latin diacritics folded to their ascii base letter
fn fold_char(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ç' => 'c',
        'ñ' => 'n',
        'ß' => 's',
        _ => c,
    }
}

pub fn fold_diacritics(text: &str) -> String {
    text.to_lowercase().chars().map(fold_char).collect()
}

/// Normalizes free-text search input: the folded lowercase form, any
/// double-quoted phrases, and the remaining word tokens in order.
pub fn normalize_query(text: &str) -> NormalizedQuery {
    let original = text.to_string();
    let folded = fold_diacritics(text.trim());

    let mut phrases = Vec::new();
    let mut remainder = String::new();
    let mut in_phrase = false;
    let mut current = String::new();
    for c in folded.chars() {
        if c == '"' {
            if in_phrase {
                let phrase = current.trim().to_string();
                if !phrase.is_empty() {
                    phrases.push(phrase);
                }
                current.clear();
            }
            in_phrase = !in_phrase;
        } else if in_phrase {
            current.push(c);
        } else {
            remainder.push(c);
        }
    }
    // an unterminated quote is treated as plain text
    if in_phrase {
        remainder.push_str(&current);
    }

    let tokens: Vec<String> = remainder
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    let normalized = folded.replace('"', " ").split_whitespace()
        .collect::<Vec<&str>>().join(" ");

    NormalizedQuery {
        original,
        normalized,
        phrases,
        tokens,
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::query::{fold_diacritics, normalize_query};

    #[tokio::test]
    async fn test_should_fold_diacritics() {
        assert_eq!("cafe", fold_diacritics("Café"));
        assert_eq!("senor garcia", fold_diacritics("Señor García"));
    }

    #[tokio::test]
    async fn test_should_extract_quoted_phrases() {
        let query = normalize_query(" \"Data Science\" and AI in libraries ");
        assert_eq!(vec!["data science".to_string()], query.phrases);
        assert_eq!(vec!["and", "ai", "in", "libraries"], query.tokens);
        assert_eq!("data science and ai in libraries", query.normalized);
    }

    #[tokio::test]
    async fn test_should_tokenize_plain_text() {
        let query = normalize_query("clean code by Martin");
        assert!(query.phrases.is_empty());
        assert_eq!(vec!["clean", "code", "by", "martin"], query.tokens);
    }

    #[tokio::test]
    async fn test_should_treat_unterminated_quote_as_text() {
        let query = normalize_query("\"clean code");
        assert!(query.phrases.is_empty());
        assert_eq!(vec!["clean", "code"], query.tokens);
    }

    #[tokio::test]
    async fn test_should_keep_original_verbatim() {
        let query = normalize_query("  Café ");
        assert_eq!("  Café ", query.original);
        assert_eq!("cafe", query.normalized);
    }
}
