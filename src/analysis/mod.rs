//! Text analysis pipeline: tokenizers, token filters, and analyzers.
//!
//! The vectorizer runs every document through the same [`analyzer::Analyzer`]
//! at training and inference time, so feature extraction stays deterministic.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
