//! Rule-based keyword scoring.
//!
//! A single pure scorer replaces the overlapping keyword detectors of the
//! original scripts: it lower-cases the concatenated title and body, sums the
//! weights of matched fake and real indicators, adds a few text-pattern
//! bonuses, and maps the result into a 0–100 fake probability with a risk
//! category.
//!
//! The keyword tables and every threshold are configuration
//! ([`HeuristicConfig`]); the defaults reproduce the original constants
//! literally. Scoring has no state, so identical input always yields an
//! identical report.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// An ordered `{keyword: weight}` table.
///
/// `BTreeMap` keeps iteration order deterministic, so matched-keyword lists
/// come out in a stable order.
pub type KeywordTable = BTreeMap<String, f64>;

/// Default weighted fake-news indicator table.
pub static DEFAULT_FAKE_INDICATORS: LazyLock<KeywordTable> = LazyLock::new(|| {
    keyword_table(&[
        ("viral claim", 3.0),
        ("deepfake", 4.0),
        ("fabricated", 3.0),
        ("hoax", 3.0),
        ("misinformation", 3.0),
        ("conspiracy", 2.0),
        ("false", 3.0),
        ("fake", 4.0),
        ("baseless", 2.0),
        ("computer generated", 3.0),
        ("ai-generated", 3.0),
        ("unverified", 2.0),
        ("misleading", 2.0),
        ("old video", 2.0),
        ("photoshopped", 3.0),
        ("doctored", 3.0),
        ("satirical", 1.0),
        ("parody", 1.0),
        ("clickbait", 2.0),
        ("sensational", 2.0),
        ("breaking exclusive", 2.0),
        ("shocking", 2.0),
        ("you won't believe", 2.0),
        ("secret they don't want you to know", 3.0),
    ])
});

/// Default weighted real-news indicator table.
pub static DEFAULT_REAL_INDICATORS: LazyLock<KeywordTable> = LazyLock::new(|| {
    keyword_table(&[
        ("confirmed", 3.0),
        ("official", 3.0),
        ("police", 2.0),
        ("government", 2.0),
        ("verified", 3.0),
        ("according to", 2.0),
        ("statement", 2.0),
        ("report", 2.0),
        ("authorities", 2.0),
        ("bilateral", 1.0),
        ("rescue operations", 2.0),
        ("fact check", 2.0),
        ("experts confirm", 3.0),
        ("official sources", 3.0),
        ("nia", 2.0),
        ("pib", 3.0),
        ("investigation", 2.0),
        ("press conference", 2.0),
        ("ministry", 2.0),
        ("authenticated", 3.0),
        ("evidence-based", 2.0),
        ("peer-reviewed", 2.0),
        ("transparent", 1.0),
    ])
});

/// Unweighted suspicious words attached to model predictions.
const SUSPICIOUS_WORDS: &[&str] = &[
    "breaking", "shocking", "conspiracy", "secret", "hoax", "rumor", "viral", "exposed",
    "miracle", "100%",
];

/// Trusted-source mentions attached to model predictions.
const TRUSTED_SOURCES: &[&str] = &[
    "bbc", "reuters", "associated press", "official", "research", "study", "report",
];

fn keyword_table(entries: &[(&str, f64)]) -> KeywordTable {
    entries
        .iter()
        .map(|&(word, weight)| (word.to_string(), weight))
        .collect()
}

/// Tuning constants for the heuristic scorer.
///
/// All values are arbitrary constants carried over from the original
/// detectors; they are configuration, not derived quantities.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Weighted fake-news indicator table.
    pub fake_indicators: KeywordTable,
    /// Weighted real-news indicator table.
    pub real_indicators: KeywordTable,
    /// Fake probability at or above this is high risk.
    pub high_risk_threshold: f64,
    /// Fake probability at or above this is suspicious.
    pub suspicious_threshold: f64,
    /// Divisor scaling the total matched weight into a confidence factor.
    pub confidence_divisor: f64,
    /// Final probability clamp bounds.
    pub probability_floor: f64,
    /// Final probability clamp bounds.
    pub probability_ceiling: f64,
    /// Exclamation count above which the fake score gets a bonus.
    pub max_exclamations: usize,
    /// Question count above which the fake score gets a bonus.
    pub max_questions: usize,
    /// Uppercase ratio above which the fake score gets a bonus.
    pub max_capital_ratio: f64,
    /// Text length below which the fake score gets a bonus.
    pub min_text_length: usize,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        HeuristicConfig {
            fake_indicators: DEFAULT_FAKE_INDICATORS.clone(),
            real_indicators: DEFAULT_REAL_INDICATORS.clone(),
            high_risk_threshold: 70.0,
            suspicious_threshold: 40.0,
            confidence_divisor: 20.0,
            probability_floor: 5.0,
            probability_ceiling: 95.0,
            max_exclamations: 3,
            max_questions: 5,
            max_capital_ratio: 0.4,
            min_text_length: 100,
        }
    }
}

/// Risk category derived from the fake probability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Likely fake news.
    High,
    /// Suspicious content.
    Suspicious,
    /// Likely real news.
    Low,
}

impl RiskLevel {
    /// Human-readable verdict line for this risk level.
    pub fn verdict(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH RISK - LIKELY FAKE NEWS",
            RiskLevel::Suspicious => "SUSPICIOUS - VERIFY BEFORE SHARING",
            RiskLevel::Low => "LOW RISK - LIKELY REAL NEWS",
        }
    }
}

/// Surface statistics of the analyzed text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    /// Character length of the lower-cased title + body.
    pub length: usize,
    /// Number of exclamation marks.
    pub exclamations: usize,
    /// Number of question marks.
    pub questions: usize,
    /// Ratio of uppercase characters in the original text.
    pub capital_ratio: f64,
}

/// Output of the heuristic scorer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeuristicReport {
    /// Fake probability in [floor, ceiling].
    pub fake_probability: f64,
    /// Sum of matched fake-indicator weights plus pattern bonuses.
    pub fake_score: f64,
    /// Sum of matched real-indicator weights.
    pub real_score: f64,
    /// Matched fake indicators, in table order.
    pub detected_fake: Vec<String>,
    /// Matched real indicators, in table order.
    pub detected_real: Vec<String>,
    /// Risk category from the configured thresholds.
    pub risk: RiskLevel,
    /// Surface statistics of the analyzed text.
    pub stats: TextStats,
}

/// Score a (title, content) pair against a heuristic configuration.
///
/// Pure function: no state, no randomness. Matching is literal substring
/// membership over the lower-cased `title + " " + content`.
pub fn score(title: &str, content: &str, config: &HeuristicConfig) -> HeuristicReport {
    let original = format!("{title} {content}");
    let full_text = original.to_lowercase();

    let mut fake_score = 0.0;
    let mut real_score = 0.0;
    let mut detected_fake = Vec::new();
    let mut detected_real = Vec::new();

    for (word, weight) in &config.fake_indicators {
        if full_text.contains(word.as_str()) {
            fake_score += weight;
            detected_fake.push(word.clone());
        }
    }
    for (word, weight) in &config.real_indicators {
        if full_text.contains(word.as_str()) {
            real_score += weight;
            detected_real.push(word.clone());
        }
    }

    let stats = text_stats(&original, &full_text);

    // Pattern bonuses on top of keyword weights.
    if stats.exclamations > config.max_exclamations {
        fake_score += 2.0;
    }
    if stats.questions > config.max_questions {
        fake_score += 1.0;
    }
    if stats.capital_ratio > config.max_capital_ratio {
        fake_score += 2.0;
    }
    if stats.length < config.min_text_length {
        fake_score += 1.0;
    }

    // Relative score → probability, pulled toward 50 when few indicators
    // matched, then clamped.
    let total_score = fake_score + real_score;
    let raw_probability = if total_score > 0.0 {
        (fake_score / total_score * 100.0).min(100.0)
    } else {
        50.0
    };
    let confidence_factor = (total_score / config.confidence_divisor).min(1.0);
    let fake_probability = (50.0 + (raw_probability - 50.0) * confidence_factor)
        .clamp(config.probability_floor, config.probability_ceiling);

    let risk = if fake_probability >= config.high_risk_threshold {
        RiskLevel::High
    } else if fake_probability >= config.suspicious_threshold {
        RiskLevel::Suspicious
    } else {
        RiskLevel::Low
    };

    HeuristicReport {
        fake_probability,
        fake_score,
        real_score,
        detected_fake,
        detected_real,
        risk,
        stats,
    }
}

fn text_stats(original: &str, full_text: &str) -> TextStats {
    let char_count = original.chars().count();
    let upper_count = original.chars().filter(|c| c.is_uppercase()).count();
    TextStats {
        length: full_text.chars().count(),
        exclamations: full_text.matches('!').count(),
        questions: full_text.matches('?').count(),
        capital_ratio: if char_count > 0 {
            upper_count as f64 / char_count as f64
        } else {
            0.0
        },
    }
}

/// Unweighted indicator scan attached to model predictions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IndicatorScan {
    /// Suspicious words found in the text.
    pub indicators: Vec<String>,
    /// Whether a trusted source is mentioned.
    pub trusted_source: bool,
}

/// Scan a text for suspicious words and trusted-source mentions.
pub fn scan_indicators(text: &str) -> IndicatorScan {
    let lowered = text.to_lowercase();
    IndicatorScan {
        indicators: SUSPICIOUS_WORDS
            .iter()
            .filter(|word| lowered.contains(*word))
            .map(|word| word.to_string())
            .collect(),
        trusted_source: TRUSTED_SOURCES.iter().any(|source| lowered.contains(source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_is_idempotent() {
        let config = HeuristicConfig::default();
        let a = score("Viral claim about airports", "PIB fact check confirmed this is fake", &config);
        let b = score("Viral claim about airports", "PIB fact check confirmed this is fake", &config);

        assert_eq!(a.fake_probability, b.fake_probability);
        assert_eq!(a.detected_fake, b.detected_fake);
        assert_eq!(a.detected_real, b.detected_real);
    }

    #[test]
    fn test_reuters_example_scores_real() {
        let config = HeuristicConfig::default();
        let report = score("Reuters reports economic growth", "", &config);

        // "report" matches as a substring of "reports".
        assert!(report.real_score > 0.0);
        assert!(report.fake_probability < 50.0);
    }

    #[test]
    fn test_heavy_fake_text_is_high_risk() {
        let config = HeuristicConfig::default();
        let report = score(
            "Shocking deepfake hoax exposed!!!!",
            "This fabricated viral claim is completely false and fake. \
             Sensational clickbait misinformation spreads the baseless conspiracy.",
            &config,
        );

        assert!(report.fake_score > report.real_score);
        assert!(report.fake_probability >= config.high_risk_threshold);
        assert_eq!(report.risk, RiskLevel::High);
        assert!(report.detected_fake.contains(&"deepfake".to_string()));
    }

    #[test]
    fn test_no_indicators_is_neutral() {
        let config = HeuristicConfig::default();
        let report = score(
            "Gardening tips",
            "Water tomato plants regularly during warm months and prune side shoots \
             to encourage steady growth through the long season.",
            &config,
        );

        // Long neutral text matches nothing: probability stays at 50.
        assert_eq!(report.fake_score, 0.0);
        assert_eq!(report.real_score, 0.0);
        assert_eq!(report.fake_probability, 50.0);
        assert_eq!(report.risk, RiskLevel::Suspicious);
    }

    #[test]
    fn test_pattern_bonuses() {
        let config = HeuristicConfig::default();
        let shouty = score("READ THIS NOW!!!!", "IT IS URGENT!!!", &config);
        // Four exclamation bonus + capitals bonus + short-text bonus.
        assert!(shouty.stats.exclamations > config.max_exclamations);
        assert!(shouty.stats.capital_ratio > config.max_capital_ratio);
        assert!(shouty.fake_score >= 5.0);
    }

    #[test]
    fn test_probability_clamped() {
        let config = HeuristicConfig::default();
        let report = score(
            "fake fake deepfake hoax",
            "fabricated false misinformation photoshopped doctored viral claim \
             shocking sensational clickbait baseless conspiracy unverified misleading",
            &config,
        );
        assert!(report.fake_probability <= config.probability_ceiling);
        assert!(report.fake_probability >= config.probability_floor);
    }

    #[test]
    fn test_custom_table_drives_score() {
        let mut config = HeuristicConfig::default();
        config.fake_indicators = keyword_table(&[("flying pigs", 10.0)]);
        config.real_indicators = KeywordTable::new();

        let report = score(
            "Flying pigs spotted over the city",
            "Several witnesses described a formation of flying pigs above the harbor today.",
            &config,
        );
        assert_eq!(report.detected_fake, vec!["flying pigs".to_string()]);
        assert_eq!(report.fake_score, 10.0);
    }

    #[test]
    fn test_scan_indicators() {
        let scan = scan_indicators("Breaking news! Shocking conspiracy exposed by Reuters");
        assert!(scan.indicators.contains(&"breaking".to_string()));
        assert!(scan.indicators.contains(&"conspiracy".to_string()));
        assert!(scan.trusted_source);

        let scan = scan_indicators("Mild weather expected tomorrow");
        assert!(scan.indicators.is_empty());
        assert!(!scan.trusted_source);
    }
}
