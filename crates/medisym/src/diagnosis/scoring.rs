use super::catalog::DiseaseProfile;
use super::matcher::partial_match;

pub(crate) const KEY_SYMPTOM_WEIGHT: f64 = 3.0;
pub(crate) const COMMON_SYMPTOM_WEIGHT: f64 = 1.0;
pub(crate) const KEYWORD_WEIGHT: f64 = 0.8;
pub(crate) const EXCLUSION_PENALTY: f64 = 0.5;
pub(crate) const KEY_SYMPTOM_BOOST: f64 = 1.15;
pub(crate) const KEY_SYMPTOM_BOOST_RATIO: f64 = 0.5;
pub(crate) const PROVISIONAL_CEILING: f64 = 95.0;
pub(crate) const MIN_PROVISIONAL_CONFIDENCE: u8 = 5;
pub(crate) const MAX_MATCHED_KEYWORDS: usize = 8;

/// Outcome of scoring one disease against normalized text, before ranking.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProfileScore<'a> {
    pub disease: &'a DiseaseProfile,
    /// Weighted, penalised score rounded to two decimals.
    pub score: f64,
    /// Gate used only to drop weak candidates; ranking replaces it.
    pub provisional_confidence: u8,
    pub key_ratio: f64,
    pub matched_keywords: Vec<String>,
    pub matched_key_symptoms: Vec<String>,
}

#[derive(Default)]
struct TermMatches<'a> {
    score: f64,
    keywords: Vec<&'a str>,
    key_symptoms: Vec<&'a str>,
}

impl<'a> TermMatches<'a> {
    fn record_keyword(&mut self, term: &'a str) {
        if !self.keywords.contains(&term) {
            self.keywords.push(term);
        }
    }
}

/// Scores `disease` against already-normalized text. Returns `None` when no
/// term matched at all or when the provisional confidence falls under the
/// reporting floor.
pub(crate) fn score_profile<'a>(
    disease: &'a DiseaseProfile,
    normalized: &str,
) -> Option<ProfileScore<'a>> {
    let mut matches = TermMatches::default();

    for term in &disease.key_symptoms {
        let strength = partial_match(term, normalized);
        if strength > 0.0 {
            matches.score += KEY_SYMPTOM_WEIGHT * strength;
            matches.key_symptoms.push(term.as_str());
            matches.record_keyword(term);
        }
    }

    for term in &disease.common_symptoms {
        let strength = partial_match(term, normalized);
        if strength > 0.0 {
            matches.score += COMMON_SYMPTOM_WEIGHT * strength;
            matches.record_keyword(term);
        }
    }

    for term in legacy_keywords(disease) {
        let strength = partial_match(term, normalized);
        if strength > 0.0 {
            matches.score += KEYWORD_WEIGHT * strength;
            matches.record_keyword(term);
        }
    }

    if matches.score == 0.0 {
        return None;
    }

    let penalty = disease
        .excludes
        .iter()
        .filter(|term| partial_match(term, normalized) > 0.0)
        .fold(1.0, |penalty, _| penalty * EXCLUSION_PENALTY);
    let score = matches.score * penalty;

    let ceiling = max_possible_score(disease);
    let mut raw_confidence = if ceiling > 0.0 {
        score / ceiling * 100.0
    } else {
        0.0
    };

    let key_ratio =
        matches.key_symptoms.len() as f64 / disease.key_symptoms.len().max(1) as f64;
    if key_ratio >= KEY_SYMPTOM_BOOST_RATIO {
        raw_confidence = (raw_confidence * KEY_SYMPTOM_BOOST).min(PROVISIONAL_CEILING);
    }

    let provisional_confidence = raw_confidence.min(PROVISIONAL_CEILING) as u8;
    if provisional_confidence < MIN_PROVISIONAL_CONFIDENCE {
        return None;
    }

    Some(ProfileScore {
        disease,
        score: round_to_hundredths(score),
        provisional_confidence,
        key_ratio,
        matched_keywords: matches
            .keywords
            .into_iter()
            .take(MAX_MATCHED_KEYWORDS)
            .map(str::to_string)
            .collect(),
        matched_key_symptoms: matches
            .key_symptoms
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// Generic keywords not already listed as key or common symptoms.
fn legacy_keywords(disease: &DiseaseProfile) -> impl Iterator<Item = &String> {
    disease.keywords.iter().filter(|term| {
        !disease.key_symptoms.contains(term) && !disease.common_symptoms.contains(term)
    })
}

/// Score reached if every term of every tier matched at full strength. The
/// keyword tier is sized by list lengths, not by the filtered set.
pub(crate) fn max_possible_score(disease: &DiseaseProfile) -> f64 {
    let tiered = disease.key_symptoms.len() + disease.common_symptoms.len();
    KEY_SYMPTOM_WEIGHT * disease.key_symptoms.len() as f64
        + COMMON_SYMPTOM_WEIGHT * disease.common_symptoms.len() as f64
        + KEYWORD_WEIGHT * disease.keywords.len().saturating_sub(tiered) as f64
}

/// Rounds through the exact decimal expansion, so ties go to the even digit
/// and values stored just under a tie stay under it.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
