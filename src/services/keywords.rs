//! Keyword extraction over generated voiceover scripts.
//!
//! Scripts come back from the model full of stage directions in parentheses,
//! sound-effect cues in square brackets, and prompt boilerplate. All of that
//! is stripped before counting word frequency.

use regex_lite::Regex;
use std::collections::HashMap;

/// Prompt boilerplate removed by plain substring replacement.
///
/// Known limitation: because this is a substring replace (not a tokenized
/// match), it can corrupt unrelated words — "scripted" loses its "script"
/// and the leftover "ed" is then dropped by the 3-letter token rule.
const STOP_PHRASES: &[&str] = &["speech speed should be 5x", "voiceover:", "generate", "script"];

/// Common English function words excluded from keyword counts.
const STOP_WORDS: &[&str] = &[
    "the", "and", "you", "that", "was", "for", "are", "with", "his", "they",
    "this", "have", "from", "one", "had", "word", "but", "not", "what",
    "all", "were", "when", "your", "can", "said", "there", "each", "which",
    "she", "how", "will", "about", "out", "many", "then", "them", "these",
    "has", "her", "would", "make", "like", "him", "into", "time", "two",
    "more", "very", "after", "words", "long", "than", "way", "been",
    "its", "who", "did", "get", "may", "day", "use", "man", "new", "now",
    "old", "see", "come", "could", "people", "just", "know", "take", "year",
];

/// Lowercase a script and strip stage directions `(...)`, sound-effect cues
/// `[...]`, and prompt boilerplate phrases. Bracket removal is non-greedy and
/// non-nested, one pair at a time.
pub fn clean_script(text: &str) -> String {
    let mut cleaned = text.to_lowercase();

    let stage_directions = Regex::new(r"\([^)]*\)").unwrap();
    cleaned = stage_directions.replace_all(&cleaned, "").into_owned();

    let sound_effects = Regex::new(r"\[[^\]]*\]").unwrap();
    cleaned = sound_effects.replace_all(&cleaned, "").into_owned();

    for phrase in STOP_PHRASES {
        cleaned = cleaned.replace(phrase, "");
    }

    cleaned
}

/// Extract the top `limit` most frequent content words from a script.
///
/// Deterministic: ties are broken by order of first appearance in the cleaned
/// text, so the same input always yields the same ordered output. Empty or
/// whitespace-only input yields an empty list.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    let cleaned = clean_script(text);

    // Runs of 3+ ASCII letters; shorter tokens are never keywords.
    let word_re = Regex::new(r"\b[a-zA-Z]{3,}\b").unwrap();

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for m in word_re.find_iter(&cleaned) {
        let word = m.as_str();
        if STOP_WORDS.contains(&word) {
            continue;
        }
        match counts.get_mut(word) {
            Some(c) => *c += 1,
            None => {
                counts.insert(word.to_string(), 1);
                order.push(word.to_string());
            }
        }
    }

    // `order` is first-appearance order; the stable sort keeps it as the
    // tie-break within equal counts.
    let mut ranked = order;
    ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_stage_directions_and_cues() {
        let cleaned = clean_script("(laugh) Sharks [SPLASH] swim");
        assert_eq!(cleaned.trim(), "sharks  swim".trim());
        assert!(!cleaned.contains("laugh"));
        assert!(!cleaned.contains("splash"));
    }

    #[test]
    fn test_strips_boilerplate_phrases() {
        let cleaned = clean_script("Voiceover: Speech speed should be 5x please");
        assert!(!cleaned.contains("voiceover"));
        assert!(!cleaned.contains("speech speed"));
        assert!(cleaned.contains("please"));
    }

    #[test]
    fn test_substring_replacement_corrupts_partial_words() {
        // Documented limitation: "script" is removed as a substring, so
        // "scripted" degrades to "ed" and falls below the 3-letter rule.
        let keywords = extract_keywords("scripted scripted scripted", 5);
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_ranked_by_frequency_then_first_appearance() {
        let keywords = extract_keywords("(laugh) Sharks [SPLASH] swim fast, sharks swim", 5);
        assert_eq!(keywords, vec!["sharks", "swim", "fast"]);
    }

    #[test]
    fn test_limit_respected() {
        let keywords = extract_keywords("alpha bravo charlie delta", 2);
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords, vec!["alpha", "bravo"]);
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        assert!(extract_keywords("", 10).is_empty());
        assert!(extract_keywords("   \n\t  ", 10).is_empty());
    }

    #[test]
    fn test_stop_words_excluded() {
        let keywords = extract_keywords("the and you that octopus", 10);
        assert_eq!(keywords, vec!["octopus"]);
    }

    #[test]
    fn test_short_tokens_excluded() {
        let keywords = extract_keywords("ox is so big", 10);
        assert_eq!(keywords, vec!["big"]);
    }

    #[test]
    fn test_deterministic() {
        let text = "zebra yak zebra xerus yak walrus";
        assert_eq!(extract_keywords(text, 10), extract_keywords(text, 10));
        assert_eq!(extract_keywords(text, 10), vec!["zebra", "yak", "xerus", "walrus"]);
    }
}
