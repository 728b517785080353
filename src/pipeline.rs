//! Training pipeline and inference context.
//!
//! [`train`] is the one-shot offline job: load the CSV snapshot, fit the
//! vectorizer and classifier, evaluate held-out accuracy, and persist both
//! artifacts. [`Detector`] is the explicitly constructed, read-only context
//! the predictor side owns for its whole lifetime: it loads the artifacts
//! once (optionally falling back to a fresh training run) and serves
//! per-query predictions with no shared mutable state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassProbabilities, LogisticRegression};
use crate::dataset::{Dataset, Label, Sample};
use crate::error::{CanardError, Result};
use crate::heuristic::{scan_indicators, IndicatorScan};
use crate::storage;
use crate::vectorizer::{TfIdfVectorizer, DEFAULT_MAX_FEATURES};

/// Configuration for a training run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Path to the labeled CSV dataset.
    pub dataset_path: PathBuf,
    /// Directory for the persisted artifacts.
    pub model_dir: PathBuf,
    /// Maximum vocabulary size.
    pub max_features: usize,
    /// Fraction of samples held out for evaluation.
    pub test_ratio: f64,
    /// Seed for the train/test shuffle.
    pub seed: u64,
    /// Gradient descent learning rate.
    pub learning_rate: f64,
    /// Maximum gradient descent iterations.
    pub max_iterations: usize,
}

impl TrainConfig {
    /// Create a config with default hyperparameters for the given paths.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(dataset_path: P, model_dir: Q) -> Self {
        TrainConfig {
            dataset_path: dataset_path.into(),
            model_dir: model_dir.into(),
            max_features: DEFAULT_MAX_FEATURES,
            test_ratio: 0.2,
            seed: 42,
            learning_rate: crate::classifier::DEFAULT_LEARNING_RATE,
            max_iterations: crate::classifier::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Summary of a completed training run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainReport {
    /// Total number of samples in the dataset.
    pub samples: usize,
    /// Number of real-labeled samples.
    pub real_count: usize,
    /// Number of fake-labeled samples.
    pub fake_count: usize,
    /// Size of the fitted vocabulary.
    pub vocabulary_size: usize,
    /// Accuracy on the held-out split, in [0, 1].
    pub accuracy: f64,
}

/// Run the full training pipeline and persist the artifacts.
///
/// Fails before writing anything if the dataset is missing or single-class,
/// so a failed run never leaves partial artifacts behind.
pub fn train(config: &TrainConfig) -> Result<TrainReport> {
    let dataset = Dataset::load_csv(&config.dataset_path)?;
    dataset.validate_for_training()?;
    let (real_count, fake_count) = dataset.class_counts();
    log::info!(
        "training on {} samples ({real_count} real, {fake_count} fake)",
        dataset.len()
    );

    let (train_set, test_set) = dataset.train_test_split(config.test_ratio, config.seed)?;
    let (train_texts, train_labels) = split_columns(train_set.samples());
    let (test_texts, test_labels) = split_columns(test_set.samples());

    let mut vectorizer = TfIdfVectorizer::with_max_features(config.max_features);
    vectorizer.fit(&train_texts)?;

    let train_rows = vectorizer.transform_batch(&train_texts)?;
    let mut classifier = LogisticRegression::new()
        .with_learning_rate(config.learning_rate)
        .with_max_iterations(config.max_iterations);
    classifier.fit(&train_rows, &train_labels, vectorizer.vocabulary_size())?;

    let test_rows = vectorizer.transform_batch(&test_texts)?;
    let accuracy = classifier.score(&test_rows, &test_labels)?;
    classifier.record_metric("accuracy", accuracy);
    log::info!("held-out accuracy: {:.2}%", accuracy * 100.0);

    storage::save_artifacts(&config.model_dir, &vectorizer, &classifier)?;

    Ok(TrainReport {
        samples: dataset.len(),
        real_count,
        fake_count,
        vocabulary_size: vectorizer.vocabulary_size(),
        accuracy,
    })
}

fn split_columns(samples: &[Sample]) -> (Vec<String>, Vec<Label>) {
    let texts = samples.iter().map(|s| s.text.clone()).collect();
    let labels = samples.iter().map(|s| s.label).collect();
    (texts, labels)
}

/// A single model prediction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class label.
    pub label: Label,
    /// Max class probability, reported as confidence.
    pub confidence: f64,
    /// Per-class probabilities.
    pub probabilities: ClassProbabilities,
}

/// A prediction enriched with the rule-based indicator scan.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Analysis {
    /// The model prediction.
    pub prediction: Prediction,
    /// Suspicious words and trusted-source scan of the input.
    pub scan: IndicatorScan,
}

/// Read-only inference context holding the loaded vectorizer and classifier.
///
/// Constructed once at startup and owned by the caller; predictions never
/// mutate it, so multiple independent processes can each hold their own copy.
pub struct Detector {
    vectorizer: TfIdfVectorizer,
    classifier: LogisticRegression,
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("vocabulary_size", &self.vectorizer.vocabulary_size())
            .field("trained", &self.classifier.is_trained())
            .finish()
    }
}

impl Detector {
    /// Load a detector from persisted artifacts.
    pub fn load<P: AsRef<Path>>(model_dir: P) -> Result<Self> {
        let (vectorizer, classifier) = storage::load_artifacts(model_dir.as_ref())?;
        Ok(Detector {
            vectorizer,
            classifier,
        })
    }

    /// Load a detector, falling back to a fresh training run.
    ///
    /// When the artifacts are missing or unreadable and a dataset is
    /// available, trains from scratch and then loads the result. Without a
    /// dataset the original "model not available" error is reported so the
    /// caller can refuse predictions instead of crashing.
    pub fn load_or_train<P: AsRef<Path>>(
        model_dir: P,
        dataset_path: Option<&Path>,
    ) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        match Self::load(model_dir) {
            Ok(detector) => Ok(detector),
            Err(CanardError::ModelUnavailable(reason)) => {
                let Some(dataset_path) = dataset_path.filter(|p| p.exists()) else {
                    return Err(CanardError::ModelUnavailable(reason));
                };
                log::warn!("model artifacts not found, training from {}", dataset_path.display());
                train(&TrainConfig::new(dataset_path, model_dir))?;
                Self::load(model_dir)
            }
            Err(e) => Err(e),
        }
    }

    /// Classify a text, returning the label and confidence score.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let features = self.vectorizer.transform(text)?;
        let probabilities = self.classifier.predict_proba(&features)?;
        Ok(Prediction {
            label: probabilities.argmax(),
            confidence: probabilities.confidence(),
            probabilities,
        })
    }

    /// Classify a text and attach the rule-based indicator scan.
    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        Ok(Analysis {
            prediction: self.predict(text)?,
            scan: scan_indicators(text),
        })
    }

    /// Size of the loaded vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Metadata recorded when the loaded classifier was trained.
    pub fn metadata(&self) -> &crate::classifier::ModelMetadata {
        self.classifier.metadata()
    }
}
