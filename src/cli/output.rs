//! Output formatting for CLI commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cli::args::{CanardArgs, OutputFormat};
use crate::dataset::Label;
use crate::error::Result;
use crate::heuristic::{HeuristicReport, RiskLevel};
use crate::pipeline::{Analysis, TrainReport};

/// Result structure for a training run.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub samples: usize,
    pub real_count: usize,
    pub fake_count: usize,
    pub vocabulary_size: usize,
    pub accuracy: f64,
}

impl From<TrainReport> for TrainResult {
    fn from(report: TrainReport) -> Self {
        TrainResult {
            samples: report.samples,
            real_count: report.real_count,
            fake_count: report.fake_count,
            vocabulary_size: report.vocabulary_size,
            accuracy: report.accuracy,
        }
    }
}

impl fmt::Display for TrainResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Training complete")?;
        writeln!(f, "  Samples:    {} ({} real, {} fake)", self.samples, self.real_count, self.fake_count)?;
        writeln!(f, "  Vocabulary: {} terms", self.vocabulary_size)?;
        write!(f, "  Accuracy:   {:.2}%", self.accuracy * 100.0)
    }
}

/// Result structure for a model prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Label,
    pub confidence: f64,
    pub indicators: Vec<String>,
    pub trusted_source: bool,
}

impl From<Analysis> for PredictionResult {
    fn from(analysis: Analysis) -> Self {
        PredictionResult {
            label: analysis.prediction.label,
            confidence: analysis.prediction.confidence,
            indicators: analysis.scan.indicators,
            trusted_source: analysis.scan.trusted_source,
        }
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prediction: {}", self.label.as_str().to_uppercase())?;
        writeln!(f, "Confidence: {:.1}%", self.confidence * 100.0)?;
        if self.indicators.is_empty() {
            writeln!(f, "No suspicious words detected")?;
        } else {
            writeln!(f, "Suspicious words: {}", self.indicators.join(", "))?;
        }
        if self.trusted_source {
            write!(f, "Trusted source mentioned")
        } else {
            write!(f, "No trusted source mentioned")
        }
    }
}

/// Result structure for heuristic analysis.
#[derive(Debug, Serialize, Deserialize)]
pub struct HeuristicResult {
    pub fake_probability: f64,
    pub fake_score: f64,
    pub real_score: f64,
    pub risk: RiskLevel,
    pub detected_fake: Vec<String>,
    pub detected_real: Vec<String>,
}

impl From<HeuristicReport> for HeuristicResult {
    fn from(report: HeuristicReport) -> Self {
        HeuristicResult {
            fake_probability: report.fake_probability,
            fake_score: report.fake_score,
            real_score: report.real_score,
            risk: report.risk,
            detected_fake: report.detected_fake,
            detected_real: report.detected_real,
        }
    }
}

impl fmt::Display for HeuristicResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Verdict: {}", self.risk.verdict())?;
        writeln!(
            f,
            "Fake probability: {:5.1}%  {}",
            self.fake_probability,
            progress_bar(self.fake_probability)
        )?;
        writeln!(f, "Fake score: {}  Real score: {}", self.fake_score, self.real_score)?;
        if self.detected_fake.is_empty() {
            writeln!(f, "Fake indicators: none")?;
        } else {
            writeln!(f, "Fake indicators: {}", self.detected_fake.join(", "))?;
        }
        if self.detected_real.is_empty() {
            write!(f, "Real indicators: none")
        } else {
            write!(f, "Real indicators: {}", self.detected_real.join(", "))
        }
    }
}

/// Render a 0-100 value as a 20-cell text progress bar.
pub fn progress_bar(percent: f64) -> String {
    let filled = (percent.clamp(0.0, 100.0) / 5.0).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(20 - filled))
}

/// Output a result in the format selected on the command line.
pub fn output_result<T: Serialize + fmt::Display>(result: &T, args: &CanardArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{result}");
            Ok(())
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            println!("{json}");
            Ok(())
        }
    }
}
