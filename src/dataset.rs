//! Labeled dataset loading and splitting.
//!
//! The source of truth is a CSV table with named `text` and `label` columns.
//! Row order is irrelevant; extra columns are ignored. A fixed seed makes the
//! train/test split reproducible.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use csv::ReaderBuilder;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{CanardError, Result};

/// Binary class label for a news sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Legitimate news.
    Real,
    /// Fabricated news.
    Fake,
}

impl Label {
    /// String form used in dataset files and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Real => "real",
            Label::Fake => "fake",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = CanardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "real" => Ok(Label::Real),
            "fake" => Ok(Label::Fake),
            other => Err(CanardError::dataset(format!(
                "unknown label '{other}' (expected 'real' or 'fake')"
            ))),
        }
    }
}

/// A single labeled training sample.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Raw news text.
    pub text: String,
    /// Class label.
    pub label: Label,
}

/// A labeled dataset loaded from a CSV snapshot.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Create a dataset from samples already in memory.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Dataset { samples }
    }

    /// Load a dataset from a CSV file with `text` and `label` columns.
    ///
    /// The header row determines column positions, so column order does not
    /// matter. A missing file, missing column, or unparseable label is a
    /// dataset error with a message naming the problem.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CanardError::dataset(format!(
                "dataset file not found: {}",
                path.display()
            )));
        }

        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| CanardError::dataset(format!("failed to open CSV: {e}")))?;

        let headers = reader
            .headers()
            .map_err(|e| CanardError::dataset(format!("failed to read CSV headers: {e}")))?
            .clone();

        let text_idx = headers
            .iter()
            .position(|h| h == "text")
            .ok_or_else(|| CanardError::dataset("CSV is missing a 'text' column"))?;
        let label_idx = headers
            .iter()
            .position(|h| h == "label")
            .ok_or_else(|| CanardError::dataset("CSV is missing a 'label' column"))?;

        let mut samples = Vec::new();
        for (line_num, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                CanardError::dataset(format!("failed to read CSV record {}: {e}", line_num + 2))
            })?;

            let text = record.get(text_idx).unwrap_or("").to_string();
            let label_str = record.get(label_idx).unwrap_or("");
            if text.is_empty() {
                log::warn!("skipping row {} with empty text", line_num + 2);
                continue;
            }

            let label = Label::from_str(label_str).map_err(|e| {
                CanardError::dataset(format!("row {}: {e}", line_num + 2))
            })?;

            samples.push(Sample { text, label });
        }

        log::info!("loaded {} samples from {}", samples.len(), path.display());
        Ok(Dataset { samples })
    }

    /// All samples in the dataset.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Count of (real, fake) samples.
    pub fn class_counts(&self) -> (usize, usize) {
        let real = self
            .samples
            .iter()
            .filter(|s| s.label == Label::Real)
            .count();
        (real, self.samples.len() - real)
    }

    /// Validate that the dataset can train a binary classifier.
    ///
    /// Both classes must be present with a nonzero count; a single-class fit
    /// would be degenerate.
    pub fn validate_for_training(&self) -> Result<()> {
        let (real, fake) = self.class_counts();
        if real == 0 || fake == 0 {
            return Err(CanardError::dataset(format!(
                "training requires both classes: got {real} real and {fake} fake samples"
            )));
        }
        Ok(())
    }

    /// Split the dataset into (train, test) partitions.
    ///
    /// The split shuffles indices with a seeded RNG, so repeated runs with
    /// the same seed produce the same partitioning.
    pub fn train_test_split(&self, test_ratio: f64, seed: u64) -> Result<(Dataset, Dataset)> {
        if !(0.0..1.0).contains(&test_ratio) {
            return Err(CanardError::invalid_argument(format!(
                "test_ratio must be in [0, 1): got {test_ratio}"
            )));
        }

        let mut indices: Vec<usize> = (0..self.samples.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let test_len = (self.samples.len() as f64 * test_ratio).round() as usize;
        let (test_idx, train_idx) = indices.split_at(test_len);

        let train = train_idx
            .iter()
            .map(|&i| self.samples[i].clone())
            .collect();
        let test = test_idx.iter().map(|&i| self.samples[i].clone()).collect();

        Ok((Dataset::from_samples(train), Dataset::from_samples(test)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample(text: &str, label: Label) -> Sample {
        Sample {
            text: text.to_string(),
            label,
        }
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_label_round_trip() {
        assert_eq!(Label::from_str("real").unwrap(), Label::Real);
        assert_eq!(Label::from_str("FAKE").unwrap(), Label::Fake);
        assert_eq!(Label::Real.to_string(), "real");
        assert!(Label::from_str("maybe").is_err());
    }

    #[test]
    fn test_load_csv() {
        let file = write_csv("text,label\nofficial report confirmed,real\nshocking hoax exposed,fake\n");
        let dataset = Dataset::load_csv(file.path()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.class_counts(), (1, 1));
        assert_eq!(dataset.samples()[0].label, Label::Real);
    }

    #[test]
    fn test_load_csv_column_order_irrelevant() {
        let file = write_csv("label,source,text\nfake,web,miracle cure discovered\n");
        let dataset = Dataset::load_csv(file.path()).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.samples()[0].text, "miracle cure discovered");
        assert_eq!(dataset.samples()[0].label, Label::Fake);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = Dataset::load_csv("/nonexistent/dataset.csv").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_csv_missing_column() {
        let file = write_csv("text,tag\nhello,real\n");
        let err = Dataset::load_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_validate_for_training_single_class() {
        let dataset = Dataset::from_samples(vec![
            sample("a", Label::Real),
            sample("b", Label::Real),
        ]);
        assert!(dataset.validate_for_training().is_err());

        let dataset = Dataset::from_samples(vec![
            sample("a", Label::Real),
            sample("b", Label::Fake),
        ]);
        assert!(dataset.validate_for_training().is_ok());
    }

    #[test]
    fn test_train_test_split_deterministic() {
        let samples: Vec<Sample> = (0..50)
            .map(|i| {
                sample(
                    &format!("document number {i}"),
                    if i % 2 == 0 { Label::Real } else { Label::Fake },
                )
            })
            .collect();
        let dataset = Dataset::from_samples(samples);

        let (train_a, test_a) = dataset.train_test_split(0.2, 42).unwrap();
        let (train_b, test_b) = dataset.train_test_split(0.2, 42).unwrap();

        assert_eq!(test_a.len(), 10);
        assert_eq!(train_a.len(), 40);
        assert_eq!(train_a.samples(), train_b.samples());
        assert_eq!(test_a.samples(), test_b.samples());
    }

    #[test]
    fn test_train_test_split_invalid_ratio() {
        let dataset = Dataset::from_samples(vec![sample("a", Label::Real)]);
        assert!(dataset.train_test_split(1.5, 42).is_err());
    }
}
