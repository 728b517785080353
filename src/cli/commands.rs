//! Command implementations for the canard CLI.

use std::io::{self, BufRead, Write};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{CanardError, Result};
use crate::heuristic::{self, HeuristicConfig};
use crate::pipeline::{train, Detector, TrainConfig};

/// Built-in example snippets for the interactive menu.
const EXAMPLE_NEWS: &[&str] = &[
    "Breaking news! Shocking conspiracy about government secrets exposed!",
    "Reuters reports economic growth in developing countries",
    "Miracle cure discovered for all diseases - doctors shocked!",
    "Scientific study confirms climate change effects on agriculture",
    "Viral rumor claims new phone update will damage your device",
];

/// Execute a CLI command.
pub fn execute_command(args: CanardArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => run_train(train_args.clone(), &args),
        Command::Predict(predict_args) => run_predict(predict_args.clone(), &args),
        Command::Analyze(analyze_args) => run_analyze(analyze_args.clone(), &args),
        Command::Interactive(interactive_args) => run_interactive(interactive_args.clone(), &args),
    }
}

/// Train the classifier and report the run summary.
fn run_train(args: TrainArgs, cli_args: &CanardArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!("Training from: {}", args.dataset.display());
    }

    let mut config = TrainConfig::new(&args.dataset, &args.model_dir);
    config.max_features = args.max_features;
    config.test_ratio = args.test_ratio;
    config.seed = args.seed;

    let report = train(&config)?;
    output_result(&TrainResult::from(report), cli_args)
}

/// Classify a text with the trained model.
fn run_predict(args: PredictArgs, cli_args: &CanardArgs) -> Result<()> {
    if args.text.trim().is_empty() {
        return Err(CanardError::invalid_argument("text must not be empty"));
    }

    let detector = Detector::load_or_train(&args.model_dir, args.dataset.as_deref())?;
    let analysis = detector.analyze(&args.text)?;
    output_result(&PredictionResult::from(analysis), cli_args)
}

/// Score a title and body with the keyword heuristic only.
fn run_analyze(args: AnalyzeArgs, cli_args: &CanardArgs) -> Result<()> {
    if args.title.trim().is_empty() || args.content.trim().is_empty() {
        return Err(CanardError::invalid_argument(
            "both title and content must be provided",
        ));
    }

    let report = heuristic::score(&args.title, &args.content, &HeuristicConfig::default());
    output_result(&HeuristicResult::from(report), cli_args)
}

/// Run the interactive menu against stdin/stdout.
fn run_interactive(args: InteractiveArgs, _cli_args: &CanardArgs) -> Result<()> {
    let detector = Detector::load_or_train(&args.model_dir, args.dataset.as_deref())?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    interactive_loop(&detector, &mut stdin.lock(), &mut stdout.lock())
}

/// Menu-driven analysis loop.
///
/// Generic over the I/O handles so tests can drive the menu with in-memory
/// buffers. Terminates cleanly on the exit option or end of input.
pub fn interactive_loop<R: BufRead, W: Write>(
    detector: &Detector,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        writeln!(output)?;
        writeln!(output, "Choose an option:")?;
        writeln!(output, "1. Check news text")?;
        writeln!(output, "2. Check example news")?;
        writeln!(output, "3. View model info")?;
        writeln!(output, "4. Exit")?;
        write!(output, "> ")?;
        output.flush()?;

        let Some(choice) = read_line(input)? else {
            // End of input behaves like exit.
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                writeln!(output, "Enter the news text to check:")?;
                write!(output, "> ")?;
                output.flush()?;
                let Some(text) = read_line(input)? else {
                    return Ok(());
                };
                if text.is_empty() {
                    writeln!(output, "Please enter some text.")?;
                    continue;
                }
                report_analysis(detector, &text, output)?;
            }
            "2" => {
                writeln!(output, "Example news:")?;
                for (i, example) in EXAMPLE_NEWS.iter().enumerate() {
                    writeln!(output, "{}. {example}", i + 1)?;
                }
                write!(output, "Select example (1-{}): ", EXAMPLE_NEWS.len())?;
                output.flush()?;
                let Some(selection) = read_line(input)? else {
                    return Ok(());
                };
                match selection.parse::<usize>() {
                    Ok(n) if (1..=EXAMPLE_NEWS.len()).contains(&n) => {
                        let text = EXAMPLE_NEWS[n - 1];
                        writeln!(output, "Text: {text}")?;
                        report_analysis(detector, text, output)?;
                    }
                    _ => writeln!(output, "Please enter a number between 1 and {}.", EXAMPLE_NEWS.len())?,
                }
            }
            "3" => {
                let meta = detector.metadata();
                writeln!(output, "Model information:")?;
                writeln!(output, "  Algorithm:  logistic regression")?;
                writeln!(output, "  Features:   TF-IDF ({} terms)", detector.vocabulary_size())?;
                writeln!(output, "  Trained at: {}", meta.trained_at.to_rfc3339())?;
                writeln!(output, "  Examples:   {}", meta.training_examples)?;
                if let Some(accuracy) = meta.validation_metrics.get("accuracy") {
                    writeln!(output, "  Accuracy:   {:.2}%", accuracy * 100.0)?;
                }
            }
            "4" => {
                writeln!(output, "Goodbye.")?;
                return Ok(());
            }
            _ => {
                writeln!(output, "Invalid choice. Please enter 1, 2, 3, or 4.")?;
            }
        }
    }
}

fn report_analysis<W: Write>(detector: &Detector, text: &str, output: &mut W) -> Result<()> {
    let analysis = detector.analyze(text)?;
    let result = PredictionResult::from(analysis);
    writeln!(output, "{result}")?;
    Ok(())
}

/// Read one trimmed line; `None` on end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
