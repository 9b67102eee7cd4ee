/// One rewrite rule: an informal phrase and its canonical replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynonymRule {
    pub source: &'static str,
    pub canonical: &'static str,
}

impl SynonymRule {
    pub const fn new(source: &'static str, canonical: &'static str) -> Self {
        Self { source, canonical }
    }
}

/// Rules are applied top to bottom, each one over the output of the previous
/// rule, so a canonical phrase can feed a later source phrase.
pub static SYNONYMS: &[SynonymRule] = &[
    SynonymRule::new("mal de tête", "maux de tête"),
    SynonymRule::new("mal de ventre", "douleur abdominale"),
    SynonymRule::new("mal au ventre", "douleur abdominale"),
    SynonymRule::new("douleur au ventre", "douleur abdominale"),
    SynonymRule::new("ventre douloureux", "douleur abdominale"),
    SynonymRule::new("nez bouché", "congestion nasale"),
    SynonymRule::new("nez qui coule", "écoulements nasaux"),
    SynonymRule::new("se sentir faible", "fatigue"),
    SynonymRule::new("perte de poids", "amaigrissement"),
    SynonymRule::new("grosses fièvres", "fièvre élevée"),
    SynonymRule::new("forte fièvre", "fièvre élevée"),
    SynonymRule::new("piqûre moustique", "moustique"),
    SynonymRule::new("manger terre", "pica"),
    SynonymRule::new("pipi brûle", "brûlure en urinant"),
    SynonymRule::new("faire pipi souvent", "uriner fréquemment"),
    SynonymRule::new("envie d'uriner souvent", "uriner fréquemment"),
    SynonymRule::new("diarrhée liquide", "diarrhée aqueuse"),
    SynonymRule::new("selles liquides", "diarrhée aqueuse"),
    SynonymRule::new("beaucoup vomir", "vomissements abondants"),
    SynonymRule::new("envie de vomir", "nausées"),
    SynonymRule::new("yeux qui piquent", "démangeaison yeux"),
    SynonymRule::new("dos qui fait mal", "douleur dorsale"),
    SynonymRule::new("difficulté à respirer", "essoufflement"),
    SynonymRule::new("toux sèche", "toux"),
    SynonymRule::new("toux avec crachat", "toux productive"),
    SynonymRule::new("crachat du sang", "sang dans les crachats"),
    SynonymRule::new("urine qui brûle", "brûlure en urinant"),
    SynonymRule::new("paralysie", "hémiplégie"),
    SynonymRule::new("bouche tordue", "visage asymétrique"),
    SynonymRule::new("bouche déviée", "visage asymétrique"),
    SynonymRule::new("frissons", "frissons"),
    SynonymRule::new("sueurs la nuit", "sueurs nocturnes"),
    SynonymRule::new("transpiration nuit", "sueurs nocturnes"),
    SynonymRule::new("grossesse", "enceinte"),
    SynonymRule::new("mal aux reins", "douleur lombaire"),
    SynonymRule::new("vertiges", "étourdissements"),
];

/// Lowercases and trims free text, then rewrites it with [`SYNONYMS`].
pub fn normalize_symptoms(text: &str) -> String {
    normalize_with(text, SYNONYMS)
}

pub(crate) fn normalize_with(text: &str, rules: &[SynonymRule]) -> String {
    let mut normalized = text.trim().to_lowercase();
    for rule in rules {
        if normalized.contains(rule.source) {
            normalized = normalized.replace(rule.source, rule.canonical);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_trims_and_rewrites() {
        let normalized = normalize_symptoms("  J'ai MAL DE TÊTE et mal au ventre  ");
        assert_eq!(normalized, "j'ai maux de tête et douleur abdominale");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_symptoms(""), "");
        assert_eq!(normalize_symptoms("   "), "");
    }

    #[test]
    fn earlier_rules_feed_later_ones() {
        // "toux sèche" collapses to "toux", which then completes "toux avec crachat".
        assert_eq!(
            normalize_symptoms("toux sèche avec crachat"),
            "toux productive"
        );
    }

    #[test]
    fn rule_order_changes_the_outcome() {
        let forward = [
            SynonymRule::new("a b", "c"),
            SynonymRule::new("c d", "e"),
        ];
        let reversed = [forward[1], forward[0]];
        assert_eq!(normalize_with("a b d", &forward), "e");
        assert_eq!(normalize_with("a b d", &reversed), "c d");
    }

    #[test]
    fn replaces_every_occurrence() {
        assert_eq!(
            normalize_symptoms("vertiges le matin, vertiges le soir"),
            "étourdissements le matin, étourdissements le soir"
        );
    }

    #[test]
    fn table_has_unique_sources() {
        let mut sources: Vec<_> = SYNONYMS.iter().map(|rule| rule.source).collect();
        let total = sources.len();
        sources.sort_unstable();
        sources.dedup();
        assert_eq!(sources.len(), total);
        assert_eq!(total, 36);
    }
}
