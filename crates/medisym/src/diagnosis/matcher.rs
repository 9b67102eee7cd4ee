use super::similarity::sequence_ratio;

pub const EXACT_MATCH: f64 = 1.0;
pub const ROOT_MATCH: f64 = 0.7;
pub const FULL_COVERAGE_MATCH: f64 = 0.9;
pub const PARTIAL_COVERAGE_MATCH: f64 = 0.6;
pub const FUZZY_MATCH: f64 = 0.8;

/// Length of the stem compared by the root-prefix rule.
pub const ROOT_PREFIX_CHARS: usize = 5;
/// Words shorter than this never count towards multi-word coverage.
pub const MIN_SIGNIFICANT_WORD_CHARS: usize = 4;
pub const FUZZY_MIN_KEYWORD_CHARS: usize = 6;
pub const FUZZY_RATIO_THRESHOLD: f64 = 0.85;

/// Grades how strongly `keyword` is present in `text`, in `[0, 1]`.
///
/// Rules are tried in order and the first hit wins: verbatim substring, shared
/// five-character root, multi-word coverage, then a fuzzy comparison against
/// each whitespace-separated token of `text`. Lengths count characters.
pub fn partial_match(keyword: &str, text: &str) -> f64 {
    let keyword = keyword.to_lowercase();
    let text = text.to_lowercase();

    if text.contains(keyword.as_str()) {
        return EXACT_MATCH;
    }

    let keyword_chars = keyword.chars().count();
    if keyword_chars >= ROOT_PREFIX_CHARS {
        let root: String = keyword.chars().take(ROOT_PREFIX_CHARS).collect();
        if text.contains(root.as_str()) {
            return ROOT_MATCH;
        }
    }

    if let Some(strength) = word_coverage(&keyword, &text) {
        return strength;
    }

    if keyword_chars >= FUZZY_MIN_KEYWORD_CHARS
        && text
            .split_whitespace()
            .any(|token| sequence_ratio(&keyword, token) >= FUZZY_RATIO_THRESHOLD)
    {
        return FUZZY_MATCH;
    }

    0.0
}

fn word_coverage(keyword: &str, text: &str) -> Option<f64> {
    let words: Vec<&str> = keyword.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }

    let matched = words
        .iter()
        .filter(|word| word.chars().count() >= MIN_SIGNIFICANT_WORD_CHARS && text.contains(**word))
        .count();

    if matched == words.len() {
        Some(FULL_COVERAGE_MATCH)
    } else if matched + 1 >= words.len() {
        Some(PARTIAL_COVERAGE_MATCH)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_substring_scores_full_strength() {
        assert_eq!(partial_match("frissons", "il a des frissons"), EXACT_MATCH);
        assert_eq!(partial_match("FRISSONS", "Il a des Frissons"), EXACT_MATCH);
    }

    #[test]
    fn shared_root_scores_seventy_percent() {
        assert_eq!(partial_match("courbatures", "courbature légère"), ROOT_MATCH);
        assert_eq!(partial_match("malaria", "malarai"), ROOT_MATCH);
        assert_eq!(partial_match("maux de tête", "maux terribles tête"), ROOT_MATCH);
    }

    #[test]
    fn root_needs_five_characters() {
        // "toux" is too short for the root rule and too short to be fuzzy.
        assert_eq!(partial_match("toux", "tou"), 0.0);
        // The root is counted in characters, so accented stems still work.
        assert_eq!(partial_match("éternuements", "éternue"), ROOT_MATCH);
    }

    #[test]
    fn every_significant_word_present_scores_ninety_percent() {
        assert_eq!(partial_match("sang crachats", "crachats avec sang"), FULL_COVERAGE_MATCH);
    }

    #[test]
    fn all_but_one_word_present_scores_sixty_percent() {
        assert_eq!(
            partial_match("douleur poitrine", "une poitrine douloureuse"),
            PARTIAL_COVERAGE_MATCH
        );
    }

    #[test]
    fn short_words_never_count_towards_coverage() {
        // "de" cannot match, so "mal de dos" covers at most two of three words.
        assert_eq!(partial_match("mal de dos", "dos et mal"), 0.0);
        assert_eq!(partial_match("toux nuit fort", "fort la nuit"), PARTIAL_COVERAGE_MATCH);
    }

    #[test]
    fn fuzzy_token_similarity_catches_typos() {
        assert_eq!(partial_match("diarrhée", "diarhée depuis hier"), FUZZY_MATCH);
        assert_eq!(partial_match("vomissements", "vomisements"), ROOT_MATCH);
    }

    #[test]
    fn fuzzy_rule_requires_six_characters_and_threshold() {
        // "fièvre" vs "fievre": ratio 10/12 stays under 0.85.
        assert_eq!(partial_match("fièvre", "fievre"), 0.0);
        assert!(sequence_ratio("fièvre", "fievre") < FUZZY_RATIO_THRESHOLD);
        // Five characters is below the fuzzy floor even at high similarity.
        assert_eq!(partial_match("sueur", "seur"), 0.0);
    }

    #[test]
    fn empty_text_never_matches_a_keyword() {
        assert_eq!(partial_match("toux", ""), 0.0);
        assert_eq!(partial_match("paludisme", ""), 0.0);
        assert_eq!(partial_match("maux de tête", ""), 0.0);
    }
}
