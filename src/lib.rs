//! # Canard
//!
//! A small fake news classifier: TF-IDF features over a capped vocabulary,
//! a binary logistic regression, and a rule-based keyword scorer.
//!
//! ## Features
//!
//! - Deterministic train/evaluate pipeline from a labeled CSV
//! - Text analysis pipeline (tokenizer, lowercase, stop words)
//! - Opaque binary artifacts with loss-free save/load
//! - Configurable keyword heuristic producing a 0-100 fake probability
//! - Interactive and one-shot CLI front ends

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod heuristic;
pub mod pipeline;
pub mod storage;
pub mod vectorizer;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
