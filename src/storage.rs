//! Persistence for trained artifacts.
//!
//! The fitted vectorizer and classifier are serialized as two independent
//! opaque bincode blobs under a model directory. Writes go through a
//! temporary file followed by a rename, so a failed save never leaves a
//! partial artifact behind. Loads fail with a distinct "model not available"
//! error naming the missing or unreadable file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::classifier::LogisticRegression;
use crate::error::{CanardError, Result};
use crate::vectorizer::TfIdfVectorizer;

/// File name of the persisted vectorizer blob.
pub const VECTORIZER_FILE: &str = "vectorizer.bin";

/// File name of the persisted classifier blob.
pub const MODEL_FILE: &str = "model.bin";

/// Path of the vectorizer artifact under a model directory.
pub fn vectorizer_path(model_dir: &Path) -> PathBuf {
    model_dir.join(VECTORIZER_FILE)
}

/// Path of the classifier artifact under a model directory.
pub fn model_path(model_dir: &Path) -> PathBuf {
    model_dir.join(MODEL_FILE)
}

/// Whether both artifacts exist under the model directory.
pub fn artifacts_exist(model_dir: &Path) -> bool {
    vectorizer_path(model_dir).exists() && model_path(model_dir).exists()
}

/// Save the fitted vectorizer and classifier under `model_dir`.
///
/// Creates the directory if needed. Each artifact is written atomically.
pub fn save_artifacts(
    model_dir: &Path,
    vectorizer: &TfIdfVectorizer,
    classifier: &LogisticRegression,
) -> Result<()> {
    fs::create_dir_all(model_dir)?;
    write_blob(&vectorizer_path(model_dir), vectorizer)?;
    write_blob(&model_path(model_dir), classifier)?;
    log::info!("saved model artifacts to {}", model_dir.display());
    Ok(())
}

/// Load the fitted vectorizer and classifier from `model_dir`.
///
/// Each blob is loaded independently so the error names exactly which
/// artifact is missing or unreadable.
pub fn load_artifacts(model_dir: &Path) -> Result<(TfIdfVectorizer, LogisticRegression)> {
    let vectorizer: TfIdfVectorizer = read_blob(&vectorizer_path(model_dir))?;
    let classifier: LogisticRegression = read_blob(&model_path(model_dir))?;
    log::info!("loaded model artifacts from {}", model_dir.display());
    Ok((vectorizer, classifier))
}

fn write_blob<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, value).map_err(|e| {
            CanardError::serialization(format!("failed to write {}: {e}", path.display()))
        })?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn read_blob<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(CanardError::model_unavailable(path));
    }
    let file = File::open(path).map_err(|_| CanardError::model_unavailable(path))?;
    let reader = BufReader::new(file);
    bincode::deserialize_from(reader).map_err(|_| CanardError::model_unavailable(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Label;
    use crate::vectorizer::SparseVector;

    fn fitted_artifacts() -> (TfIdfVectorizer, LogisticRegression) {
        let corpus = vec![
            "official report confirms growth".to_string(),
            "shocking miracle hoax exposed".to_string(),
        ];
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&corpus).unwrap();

        let rows = vec![
            vectorizer.transform(&corpus[0]).unwrap(),
            vectorizer.transform(&corpus[1]).unwrap(),
        ];
        let mut classifier = LogisticRegression::new();
        classifier
            .fit(&rows, &[Label::Real, Label::Fake], vectorizer.vocabulary_size())
            .unwrap();
        (vectorizer, classifier)
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (vectorizer, classifier) = fitted_artifacts();
        save_artifacts(dir.path(), &vectorizer, &classifier).unwrap();
        assert!(artifacts_exist(dir.path()));

        let (loaded_vec, loaded_clf) = load_artifacts(dir.path()).unwrap();
        let text = "official report on a shocking hoax";
        let original_features = vectorizer.transform(text).unwrap();
        let loaded_features = loaded_vec.transform(text).unwrap();
        assert_eq!(original_features, loaded_features);
        assert_eq!(
            classifier.predict(&original_features).unwrap(),
            loaded_clf.predict(&loaded_features).unwrap()
        );
    }

    #[test]
    fn test_missing_artifacts_distinct_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_artifacts(dir.path()).unwrap_err();
        assert!(matches!(err, CanardError::ModelUnavailable(_)));
        assert!(err.to_string().contains(VECTORIZER_FILE));

        // Vectorizer present but classifier missing: the error names the
        // classifier blob.
        let (vectorizer, _) = fitted_artifacts();
        write_blob(&vectorizer_path(dir.path()), &vectorizer).unwrap();
        let err = load_artifacts(dir.path()).unwrap_err();
        assert!(err.to_string().contains(MODEL_FILE));
    }

    #[test]
    fn test_corrupt_blob_is_model_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(vectorizer_path(dir.path()), b"not a bincode blob").unwrap();
        let result: Result<TfIdfVectorizer> = read_blob(&vectorizer_path(dir.path()));
        assert!(matches!(result, Err(CanardError::ModelUnavailable(_))));
    }

    #[test]
    fn test_classifier_row_shape_survives() {
        let dir = tempfile::tempdir().unwrap();
        let (vectorizer, classifier) = fitted_artifacts();
        save_artifacts(dir.path(), &vectorizer, &classifier).unwrap();
        let (_, loaded_clf) = load_artifacts(dir.path()).unwrap();

        let empty = SparseVector::default();
        let a = classifier.predict_proba(&empty).unwrap();
        let b = loaded_clf.predict_proba(&empty).unwrap();
        assert_eq!(a.fake, b.fake);
    }
}
