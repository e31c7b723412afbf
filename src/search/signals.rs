//! Fixed indicator tables for mood, period and quality signals.
//!
//! A single-word indicator matches any word token that starts with it, so
//! inflected forms count ("populaires", "classiques") while "méconnu" never
//! counts as "connu". Multi-word indicators match a run of consecutive tokens.

use super::filters::{Mood, Period};
use super::normalizer::word_tokens;

pub const MOOD_INDICATORS: &[(Mood, &[&str])] = &[
    (Mood::Intense, &["intense", "palpitant", "adrénaline", "action"]),
    (Mood::Light, &["léger", "amusant", "divertissant", "feel-good"]),
    (Mood::Serious, &["sérieux", "profond", "réflexion", "pensée"]),
    (
        Mood::Emotional,
        &["émotion", "touchant", "sensible", "bouleversant"],
    ),
    (Mood::Scary, &["peur", "terrifiant", "angoissant", "stress"]),
    (Mood::Mysterious, &["mystère", "intrigue", "énigme", "suspense"]),
];

pub const PERIOD_INDICATORS: &[(Period, &[&str])] = &[
    (Period::Recent, &["récent", "nouveau", "nouveauté", "derniers"]),
    (Period::Classic, &["classique", "culte", "ancien", "vintage"]),
    (Period::Modern, &["moderne", "contemporain"]),
];

pub const POPULAR_INDICATORS: &[&str] = &["populaire", "connu", "célèbre", "succès", "blockbuster"];
pub const ACCLAIMED_INDICATORS: &[&str] = &["acclamé", "critique", "récompense", "oscar", "césar"];
pub const UNDER_THE_RADAR_INDICATORS: &[&str] =
    &["méconnu", "rare", "confidentiel", "découverte", "indie"];

/// Quality preference expressed by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualitySignal {
    Popular,
    Acclaimed,
    UnderTheRadar,
}

/// `token` is `indicator` or one of its inflections. Indicators ending in
/// "e" also match their past participle ("récompense" -> "récompensés").
fn token_matches(token: &str, indicator: &str) -> bool {
    if token.starts_with(indicator) {
        return true;
    }
    indicator
        .strip_suffix('e')
        .and_then(|stem| token.strip_prefix(stem))
        .is_some_and(|rest| rest.starts_with('é'))
}

/// True when `indicator` appears in `tokens`: as an inflected word for a
/// single-word indicator, as consecutive exact tokens for a phrase.
pub fn contains_indicator(tokens: &[&str], indicator: &str) -> bool {
    let needle = word_tokens(indicator);
    match needle.as_slice() {
        [] => false,
        [word] => tokens.iter().any(|t| token_matches(t, word)),
        phrase => {
            phrase.len() <= tokens.len() && tokens.windows(phrase.len()).any(|w| w == phrase)
        }
    }
}

fn contains_any(tokens: &[&str], indicators: &[&str]) -> bool {
    indicators.iter().any(|i| contains_indicator(tokens, i))
}

fn first_match<T: Copy>(tokens: &[&str], table: &[(T, &[&str])]) -> Option<T> {
    table
        .iter()
        .find(|(_, indicators)| contains_any(tokens, indicators))
        .map(|(value, _)| *value)
}

pub fn detect_mood(tokens: &[&str]) -> Option<Mood> {
    first_match(tokens, MOOD_INDICATORS)
}

pub fn detect_period(tokens: &[&str]) -> Option<Period> {
    first_match(tokens, PERIOD_INDICATORS)
}

/// Strongest quality signal present. Popular beats acclaimed, which beats
/// under-the-radar.
pub fn detect_quality(tokens: &[&str]) -> Option<QualitySignal> {
    if contains_any(tokens, POPULAR_INDICATORS) {
        Some(QualitySignal::Popular)
    } else if contains_any(tokens, ACCLAIMED_INDICATORS) {
        Some(QualitySignal::Acclaimed)
    } else if contains_any(tokens, UNDER_THE_RADAR_INDICATORS) {
        Some(QualitySignal::UnderTheRadar)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_indicator_from_word_start_only() {
        let tokens = ["un", "film", "méconnu"];
        assert!(contains_indicator(&tokens, "méconnu"));
        assert!(!contains_indicator(&tokens, "connu"));
    }

    #[test]
    fn test_inflected_forms_match() {
        let tokens = word_tokens("les plus populaires, des classiques récents");
        assert!(contains_indicator(&tokens, "populaire"));
        assert!(contains_indicator(&tokens, "classique"));
        assert!(contains_indicator(&tokens, "récent"));

        assert!(contains_indicator(&["récompensé"], "récompense"));
        assert!(contains_indicator(&["récompensées"], "récompense"));
        assert!(contains_indicator(&["critiques"], "critique"));
        assert!(!contains_indicator(&["récompe"], "récompense"));
        assert!(!contains_indicator(&["cult"], "culte"));
    }

    #[test]
    fn test_quality_from_inflected_forms() {
        for text in ["les comédies les plus populaires", "des films célèbres"] {
            assert_eq!(
                detect_quality(&word_tokens(text)),
                Some(QualitySignal::Popular),
                "{}",
                text
            );
        }
        for text in ["un drame récompensé", "un thriller que les critiques adorent"] {
            assert_eq!(
                detect_quality(&word_tokens(text)),
                Some(QualitySignal::Acclaimed),
                "{}",
                text
            );
        }
        assert_eq!(
            detect_quality(&word_tokens("des pépites méconnues")),
            Some(QualitySignal::UnderTheRadar)
        );
    }

    #[test]
    fn test_contains_indicator_phrase() {
        let tokens = word_tokens("un vrai feel good movie");
        assert!(contains_indicator(&tokens, "feel-good"));
        assert!(!contains_indicator(&["good", "feel"], "feel-good"));
        assert!(!contains_indicator(&[], "feel-good"));
        assert!(!contains_indicator(&tokens, " "));
    }

    #[test]
    fn test_quality_priority() {
        let tokens = word_tokens("un film populaire et acclamé mais méconnu");
        assert_eq!(detect_quality(&tokens), Some(QualitySignal::Popular));

        let tokens = word_tokens("un film acclamé mais méconnu");
        assert_eq!(detect_quality(&tokens), Some(QualitySignal::Acclaimed));

        let tokens = word_tokens("une pépite méconnu");
        assert_eq!(detect_quality(&tokens), Some(QualitySignal::UnderTheRadar));

        assert_eq!(detect_quality(&word_tokens("un western")), None);
    }

    #[test]
    fn test_mood_uses_table_order() {
        // "suspense" is mysterious, "peur" is scary; scary comes first.
        let tokens = word_tokens("du suspense et de la peur");
        assert_eq!(detect_mood(&tokens), Some(Mood::Scary));
        assert_eq!(detect_mood(&word_tokens("rien de spécial")), None);
    }

    #[test]
    fn test_period_detection() {
        assert_eq!(
            detect_period(&word_tokens("un film culte")),
            Some(Period::Classic)
        );
        assert_eq!(
            detect_period(&word_tokens("un nouveau film moderne")),
            Some(Period::Recent)
        );
        assert_eq!(
            detect_period(&word_tokens("des films récents")),
            Some(Period::Recent)
        );
        assert_eq!(detect_period(&word_tokens("sorti en 2024")), None);
    }
}
