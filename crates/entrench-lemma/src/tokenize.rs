use entrench_core::error::{Error, Result};
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};
use unicode_categories::UnicodeCategories;

/// Split on whitespace and isolate every punctuation character, keeping order.
pub fn split_words(text: &str) -> Result<Vec<String>> {
    let mut pretokenized = PreTokenizedString::from(text);
    BertPreTokenizer
        .pre_tokenize(&mut pretokenized)
        .map_err(|e| Error::Operation(format!("Tokenization failed: {}", e)))?;
    Ok(pretokenized
        .get_splits(OffsetReferential::Original, OffsetType::Byte)
        .into_iter()
        .filter(|(word, _, _)| !word.is_empty())
        .map(|(word, _, _)| word.to_string())
        .collect())
}

/// True when every character is in a Unicode punctuation (P*) category.
/// Symbols such as `$` or `+` are not punctuation.
pub fn is_punct(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_punctuation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_punctuation_off_words() {
        let words = split_words("The Constitution.").unwrap();
        assert_eq!(words, vec!["The", "Constitution", "."]);
    }

    #[test]
    fn whitespace_never_becomes_a_token() {
        let words = split_words("  Article 1\n\n  Section\t2 ").unwrap();
        assert_eq!(words, vec!["Article", "1", "Section", "2"]);
        assert!(split_words("").unwrap().is_empty());
        assert!(split_words(" \n ").unwrap().is_empty());
    }

    #[test]
    fn punctuation_classes() {
        for p in [".", ",", ";", "(", "\u{201c}", "\u{2014}", "\u{00bf}", "_"] {
            assert!(is_punct(p), "{p:?} should be punctuation");
        }
        for w in ["$", "+", "1", "Art", "§1", ""] {
            assert!(!is_punct(w), "{w:?} should not be punctuation");
        }
    }
}
