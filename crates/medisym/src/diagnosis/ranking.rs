use super::scoring::ProfileScore;
use super::MatchResult;

pub(crate) const RESCALE_CEILING: f64 = 90.0;
pub(crate) const RESCALE_MAX: u8 = 90;
pub(crate) const RESCALE_FLOOR: u8 = 15;
pub(crate) const TOP_RESULT_BASE: u8 = 75;
pub(crate) const TOP_RESULT_KEY_SPAN: f64 = 17.0;
pub(crate) const TOP_RESULT_MAX: u8 = 92;

/// Orders candidates by score and assigns display confidences relative to the
/// best candidate. Equal scores keep catalog order.
pub(crate) fn rank_candidates(
    mut candidates: Vec<ProfileScore<'_>>,
    top_n: usize,
) -> Vec<MatchResult> {
    candidates.sort_by(|left, right| right.score.total_cmp(&left.score));

    let top_score = candidates.first().map(|best| best.score).unwrap_or(0.0);

    candidates
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(position, candidate)| {
            let confidence = if top_score <= 0.0 {
                candidate.provisional_confidence
            } else if position == 0 {
                top_result_confidence(candidate.key_ratio)
            } else {
                relative_confidence(candidate.score, top_score)
            };

            MatchResult {
                disease: candidate.disease.clone(),
                score: candidate.score,
                confidence,
                provisional_confidence: candidate.provisional_confidence,
                key_ratio: candidate.key_ratio,
                matched_keywords: candidate.matched_keywords,
                matched_key_symptoms: candidate.matched_key_symptoms,
            }
        })
        .collect()
}

fn relative_confidence(score: f64, top_score: f64) -> u8 {
    let scaled = (score / top_score * RESCALE_CEILING) as u8;
    scaled.clamp(RESCALE_FLOOR, RESCALE_MAX)
}

fn top_result_confidence(key_ratio: f64) -> u8 {
    let bonus = (key_ratio * TOP_RESULT_KEY_SPAN) as u8;
    TOP_RESULT_BASE.saturating_add(bonus).min(TOP_RESULT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_confidence_is_clamped_between_fifteen_and_ninety() {
        assert_eq!(relative_confidence(10.0, 10.0), 90);
        assert_eq!(relative_confidence(5.0, 10.0), 45);
        assert_eq!(relative_confidence(0.5, 10.0), 15);
        assert_eq!(relative_confidence(2.55, 13.46), 17);
    }

    #[test]
    fn top_result_confidence_tracks_key_symptom_ratio() {
        assert_eq!(top_result_confidence(0.0), 75);
        assert_eq!(top_result_confidence(0.5), 83);
        assert_eq!(top_result_confidence(1.0), 92);
    }
}
