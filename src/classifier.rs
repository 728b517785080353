//! Binary logistic regression over sparse TF-IDF features.
//!
//! The classifier is a linear weight vector plus bias, trained with batch
//! gradient descent on the logistic loss. Training starts from zero weights
//! and uses no randomness, so a fixed dataset always produces the same
//! parameters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dataset::Label;
use crate::error::{CanardError, Result};
use crate::vectorizer::SparseVector;

/// Default learning rate for gradient descent.
pub const DEFAULT_LEARNING_RATE: f64 = 0.5;

/// Default maximum number of gradient descent iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 500;

/// Default convergence tolerance on the logistic loss.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Model metadata recorded at training time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name/identifier.
    pub name: String,
    /// Training timestamp.
    pub trained_at: chrono::DateTime<chrono::Utc>,
    /// Number of training examples used.
    pub training_examples: usize,
    /// Model hyperparameters.
    pub hyperparameters: HashMap<String, f64>,
    /// Performance metrics on the held-out split.
    pub validation_metrics: HashMap<String, f64>,
}

impl ModelMetadata {
    fn new() -> Self {
        ModelMetadata {
            name: "logistic_regression".to_string(),
            trained_at: chrono::Utc::now(),
            training_examples: 0,
            hyperparameters: HashMap::new(),
            validation_metrics: HashMap::new(),
        }
    }
}

/// Per-class probabilities for a prediction, summing to 1.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ClassProbabilities {
    /// Probability that the sample is real news.
    pub real: f64,
    /// Probability that the sample is fake news.
    pub fake: f64,
}

impl ClassProbabilities {
    /// The label with the highest probability.
    pub fn argmax(&self) -> Label {
        if self.fake > self.real {
            Label::Fake
        } else {
            Label::Real
        }
    }

    /// The highest class probability, reported as the confidence score.
    pub fn confidence(&self) -> f64 {
        self.fake.max(self.real)
    }
}

/// Binary logistic regression classifier.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Linear weights over the feature space (empty until trained).
    weights: Vec<f64>,
    /// Bias term.
    bias: f64,
    /// Learning rate for gradient descent.
    learning_rate: f64,
    /// Maximum number of iterations.
    max_iterations: usize,
    /// Convergence tolerance on the loss.
    tolerance: f64,
    /// Metadata recorded at training time.
    metadata: ModelMetadata,
}

impl LogisticRegression {
    /// Create a new untrained classifier with default hyperparameters.
    pub fn new() -> Self {
        LogisticRegression {
            weights: Vec::new(),
            bias: 0.0,
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            metadata: ModelMetadata::new(),
        }
    }

    /// Set the learning rate.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Whether the classifier has been trained.
    pub fn is_trained(&self) -> bool {
        !self.weights.is_empty()
    }

    /// Metadata recorded at training time.
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Record a validation metric in the model metadata.
    pub fn record_metric(&mut self, name: &str, value: f64) {
        self.metadata
            .validation_metrics
            .insert(name.to_string(), value);
    }

    /// Train the classifier on sparse feature rows and labels.
    ///
    /// `n_features` is the dimensionality of the feature space (the
    /// vectorizer's vocabulary size). Fails when rows and labels disagree in
    /// length, when there are no rows, or when only one class is present.
    pub fn fit(
        &mut self,
        rows: &[SparseVector],
        labels: &[Label],
        n_features: usize,
    ) -> Result<()> {
        if rows.len() != labels.len() {
            return Err(CanardError::model(format!(
                "feature/label length mismatch: {} rows vs {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if rows.is_empty() {
            return Err(CanardError::model("cannot train on an empty feature set"));
        }
        let fake_count = labels.iter().filter(|&&l| l == Label::Fake).count();
        if fake_count == 0 || fake_count == rows.len() {
            return Err(CanardError::model(
                "training requires both classes with nonzero count",
            ));
        }

        let targets: Vec<f64> = labels
            .iter()
            .map(|&l| if l == Label::Fake { 1.0 } else { 0.0 })
            .collect();

        let n = rows.len() as f64;
        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;
        let mut previous_loss = f64::INFINITY;

        for iteration in 0..self.max_iterations {
            let mut gradient = vec![0.0; n_features];
            let mut bias_gradient = 0.0;
            let mut loss = 0.0;

            for (row, &target) in rows.iter().zip(targets.iter()) {
                let p = sigmoid(bias + row.dot(&weights));
                let error = p - target;
                for &(idx, value) in row.entries() {
                    gradient[idx] += error * value;
                }
                bias_gradient += error;
                loss += logistic_loss(p, target);
            }

            for (w, g) in weights.iter_mut().zip(gradient.iter()) {
                *w -= self.learning_rate * g / n;
            }
            bias -= self.learning_rate * bias_gradient / n;

            let mean_loss = loss / n;
            if (previous_loss - mean_loss).abs() < self.tolerance {
                log::debug!("converged after {} iterations (loss {mean_loss:.6})", iteration + 1);
                break;
            }
            previous_loss = mean_loss;
        }

        self.weights = weights;
        self.bias = bias;
        self.metadata.trained_at = chrono::Utc::now();
        self.metadata.training_examples = rows.len();
        self.metadata
            .hyperparameters
            .insert("learning_rate".to_string(), self.learning_rate);
        self.metadata
            .hyperparameters
            .insert("max_iterations".to_string(), self.max_iterations as f64);
        self.metadata
            .hyperparameters
            .insert("n_features".to_string(), n_features as f64);

        Ok(())
    }

    /// Per-class probabilities for a feature row.
    pub fn predict_proba(&self, row: &SparseVector) -> Result<ClassProbabilities> {
        if !self.is_trained() {
            return Err(CanardError::model("classifier has not been trained"));
        }
        let fake = sigmoid(self.bias + row.dot(&self.weights));
        Ok(ClassProbabilities {
            real: 1.0 - fake,
            fake,
        })
    }

    /// Predicted label for a feature row.
    pub fn predict(&self, row: &SparseVector) -> Result<Label> {
        Ok(self.predict_proba(row)?.argmax())
    }

    /// Accuracy on a labeled evaluation set, in [0, 1].
    pub fn score(&self, rows: &[SparseVector], labels: &[Label]) -> Result<f64> {
        if rows.is_empty() {
            return Err(CanardError::model("cannot score an empty evaluation set"));
        }
        let mut correct = 0usize;
        for (row, &label) in rows.iter().zip(labels.iter()) {
            if self.predict(row)? == label {
                correct += 1;
            }
        }
        Ok(correct as f64 / rows.len() as f64)
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

/// Numerically stable sigmoid.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Binary cross-entropy for one prediction, clamped away from log(0).
fn logistic_loss(p: f64, target: f64) -> f64 {
    let p = p.clamp(1e-12, 1.0 - 1e-12);
    -(target * p.ln() + (1.0 - target) * (1.0 - p).ln())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<SparseVector>, Vec<Label>) {
        // Feature 0 signals real, feature 1 signals fake.
        let rows = vec![
            SparseVector::from_entries(vec![(0, 1.0)]),
            SparseVector::from_entries(vec![(0, 0.8)]),
            SparseVector::from_entries(vec![(0, 1.2)]),
            SparseVector::from_entries(vec![(1, 1.0)]),
            SparseVector::from_entries(vec![(1, 0.9)]),
            SparseVector::from_entries(vec![(1, 1.1)]),
        ];
        let labels = vec![
            Label::Real,
            Label::Real,
            Label::Real,
            Label::Fake,
            Label::Fake,
            Label::Fake,
        ];
        (rows, labels)
    }

    #[test]
    fn test_fit_and_predict() {
        let (rows, labels) = separable_data();
        let mut model = LogisticRegression::new();
        model.fit(&rows, &labels, 2).unwrap();

        assert!(model.is_trained());
        assert_eq!(
            model
                .predict(&SparseVector::from_entries(vec![(0, 1.0)]))
                .unwrap(),
            Label::Real
        );
        assert_eq!(
            model
                .predict(&SparseVector::from_entries(vec![(1, 1.0)]))
                .unwrap(),
            Label::Fake
        );
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (rows, labels) = separable_data();
        let mut model = LogisticRegression::new();
        model.fit(&rows, &labels, 2).unwrap();

        for row in &rows {
            let proba = model.predict_proba(row).unwrap();
            assert!((proba.real + proba.fake - 1.0).abs() < 1e-9);
            assert!(proba.confidence() >= 0.5);
        }
        // A row with no known features lands on the bias alone.
        let proba = model.predict_proba(&SparseVector::default()).unwrap();
        assert!((proba.real + proba.fake - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_training_is_deterministic() {
        let (rows, labels) = separable_data();
        let mut a = LogisticRegression::new();
        let mut b = LogisticRegression::new();
        a.fit(&rows, &labels, 2).unwrap();
        b.fit(&rows, &labels, 2).unwrap();

        let row = SparseVector::from_entries(vec![(0, 0.5), (1, 0.5)]);
        let pa = a.predict_proba(&row).unwrap();
        let pb = b.predict_proba(&row).unwrap();
        assert_eq!(pa.fake, pb.fake);
    }

    #[test]
    fn test_score_on_separable_data() {
        let (rows, labels) = separable_data();
        let mut model = LogisticRegression::new();
        model.fit(&rows, &labels, 2).unwrap();

        let accuracy = model.score(&rows, &labels).unwrap();
        assert!((0.0..=1.0).contains(&accuracy));
        assert!(accuracy > 0.9);
    }

    #[test]
    fn test_single_class_refused() {
        let rows = vec![
            SparseVector::from_entries(vec![(0, 1.0)]),
            SparseVector::from_entries(vec![(0, 0.5)]),
        ];
        let labels = vec![Label::Real, Label::Real];
        let mut model = LogisticRegression::new();
        assert!(model.fit(&rows, &labels, 1).is_err());
    }

    #[test]
    fn test_empty_and_mismatched_input_refused() {
        let mut model = LogisticRegression::new();
        assert!(model.fit(&[], &[], 1).is_err());

        let rows = vec![SparseVector::default()];
        assert!(model.fit(&rows, &[Label::Real, Label::Fake], 1).is_err());
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let model = LogisticRegression::new();
        assert!(model.predict(&SparseVector::default()).is_err());
    }

    #[test]
    fn test_metadata_recorded() {
        let (rows, labels) = separable_data();
        let mut model = LogisticRegression::new();
        model.fit(&rows, &labels, 2).unwrap();
        model.record_metric("accuracy", 1.0);

        let meta = model.metadata();
        assert_eq!(meta.training_examples, 6);
        assert_eq!(meta.validation_metrics.get("accuracy"), Some(&1.0));
        assert!(meta.hyperparameters.contains_key("learning_rate"));
    }

    #[test]
    fn test_serde_round_trip_preserves_predictions() {
        let (rows, labels) = separable_data();
        let mut model = LogisticRegression::new();
        model.fit(&rows, &labels, 2).unwrap();

        let bytes = bincode::serialize(&model).unwrap();
        let restored: LogisticRegression = bincode::deserialize(&bytes).unwrap();

        for row in &rows {
            assert_eq!(
                model.predict_proba(row).unwrap().fake,
                restored.predict_proba(row).unwrap().fake
            );
        }
    }
}
