//! Command line argument parsing for the canard CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Canard - a small fake news classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "canard")]
#[command(about = "TF-IDF + logistic regression news classifier with a keyword heuristic scorer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct CanardArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl CanardArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output formats for CLI results
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train the classifier from a labeled CSV dataset
    Train(TrainArgs),

    /// Classify a news text with the trained model
    Predict(PredictArgs),

    /// Score a title and body with the keyword heuristic only
    Analyze(AnalyzeArgs),

    /// Run the interactive menu
    Interactive(InteractiveArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Path to the labeled CSV dataset (text,label columns)
    #[arg(value_name = "DATASET", env = "CANARD_DATASET")]
    pub dataset: PathBuf,

    /// Directory for the persisted model artifacts
    #[arg(short, long, default_value = "models", env = "CANARD_MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Maximum vocabulary size
    #[arg(long, default_value = "1000")]
    pub max_features: usize,

    /// Fraction of samples held out for evaluation
    #[arg(long, default_value = "0.2")]
    pub test_ratio: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// News text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Directory holding the persisted model artifacts
    #[arg(short, long, default_value = "models", env = "CANARD_MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Dataset to train from when artifacts are missing
    #[arg(long, env = "CANARD_DATASET")]
    pub dataset: Option<PathBuf>,
}

/// Arguments for heuristic analysis
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// News title
    #[arg(short, long)]
    pub title: String,

    /// News body
    #[arg(short, long)]
    pub content: String,
}

/// Arguments for the interactive menu
#[derive(Parser, Debug, Clone)]
pub struct InteractiveArgs {
    /// Directory holding the persisted model artifacts
    #[arg(short, long, default_value = "models", env = "CANARD_MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Dataset to train from when artifacts are missing
    #[arg(long, env = "CANARD_DATASET")]
    pub dataset: Option<PathBuf>,
}
