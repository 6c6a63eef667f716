//! rclassify Command Line Interface
//!
//! Loads a CSV dataset, splits it into training and test parts, trains the
//! SVM ensemble and/or the decision tree and prints their evaluation reports.

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{error, info, warn};
use rclassify::api::{SvmClassifier, TrainedSvm, TrainedTree, TreeClassifier};
use rclassify::core::{ClassifyError, Dataset, Result};
use rclassify::data::{train_test_split, CsvDataset, CsvOptions};
use rclassify::metrics::{BinaryReport, MulticlassReport};
use serde::Serialize;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "rclassify")]
#[command(about = "Linear SVM and entropy decision tree classifiers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train and evaluate the one-vs-rest SVM ensemble
    Svm(SvmCommand),
    /// Train and evaluate the decision tree
    Tree(TreeCommand),
    /// Train and evaluate both models on the same split
    Compare(CompareCommand),
}

#[derive(Args)]
struct DataArgs {
    /// CSV data file (last column is the class label)
    #[arg(long)]
    data: PathBuf,

    /// Field delimiter
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Fraction of samples held out for testing
    #[arg(long, default_value = "0.2")]
    test_ratio: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Print the reports as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SvmArgs {
    /// Sub-gradient step size
    #[arg(long, default_value = "0.001")]
    learning_rate: f64,

    /// L2 regularization strength
    #[arg(long, default_value = "0.01")]
    lambda: f64,

    /// Passes over the training data
    #[arg(long, default_value = "1000")]
    iterations: usize,
}

#[derive(Args)]
struct TreeArgs {
    /// Maximum number of split levels (0 = unlimited)
    #[arg(long, default_value = "5")]
    max_depth: usize,

    /// Write the fitted tree as a Mermaid flowchart
    #[arg(long)]
    flowchart: Option<PathBuf>,
}

#[derive(Args)]
struct SvmCommand {
    #[command(flatten)]
    data: DataArgs,
    #[command(flatten)]
    svm: SvmArgs,
}

#[derive(Args)]
struct TreeCommand {
    #[command(flatten)]
    data: DataArgs,
    #[command(flatten)]
    tree: TreeArgs,
}

#[derive(Args)]
struct CompareCommand {
    #[command(flatten)]
    data: DataArgs,
    #[command(flatten)]
    svm: SvmArgs,
    #[command(flatten)]
    tree: TreeArgs,
}

/// Tree metrics: binary when the labels are `{0, 1}`, per class otherwise
#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum TreeMetrics {
    Binary(BinaryReport),
    Multiclass(MulticlassReport),
}

#[derive(Serialize)]
struct TreeSummary {
    depth: usize,
    n_leaves: usize,
    metrics: TreeMetrics,
}

#[derive(Serialize)]
struct JsonReport {
    generated_at: String,
    data: PathBuf,
    seed: u64,
    train_samples: usize,
    test_samples: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    svm: Option<MulticlassReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<TreeSummary>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Svm(cmd) => run(&cmd.data, Some(&cmd.svm), None),
        Commands::Tree(cmd) => run(&cmd.data, None, Some(&cmd.tree)),
        Commands::Compare(cmd) => run(&cmd.data, Some(&cmd.svm), Some(&cmd.tree)),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run(data: &DataArgs, svm_args: Option<&SvmArgs>, tree_args: Option<&TreeArgs>) -> Result<()> {
    let (train, test) = load_and_split(data)?;

    let svm = match svm_args {
        Some(args) => Some(train_svm(args, &train)?),
        None => None,
    };
    let tree = match tree_args {
        Some(args) => Some(train_tree(args, &train)?),
        None => None,
    };

    let svm_report = match &svm {
        Some(model) => Some(model.analyze(&test)?),
        None => None,
    };
    let tree_summary = match &tree {
        Some(model) => Some(summarize_tree(model, &test)?),
        None => None,
    };

    if data.json {
        let report = JsonReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            data: data.data.clone(),
            seed: data.seed,
            train_samples: train.len(),
            test_samples: test.len(),
            svm: svm_report,
            tree: tree_summary,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| ClassifyError::SerializationError(e.to_string()))?;
        println!("{json}");
        return Ok(());
    }

    println!("Training samples: {}", train.len());
    println!("Test samples: {}", test.len());

    if let (Some(model), Some(report)) = (&svm, &svm_report) {
        println!("\n=== SVM (one-vs-rest) ===");
        println!("Classes: {:?}", model.classes());
        print!("{report}");
    }

    if let Some(summary) = &tree_summary {
        println!("\n=== Decision Tree ===");
        println!("Depth: {}", summary.depth);
        println!("Leaves: {}", summary.n_leaves);
        match &summary.metrics {
            TreeMetrics::Binary(report) => print!("{report}"),
            TreeMetrics::Multiclass(report) => print!("{report}"),
        }
    }

    Ok(())
}

fn load_and_split(args: &DataArgs) -> Result<(Dataset, Dataset)> {
    info!("Loading dataset from {:?}", args.data);
    let options = CsvOptions {
        delimiter: args.delimiter,
        ..CsvOptions::default()
    };
    let dataset = CsvDataset::from_file_with_options(&args.data, &options)?;

    let (train, test) = train_test_split(&dataset, args.test_ratio, args.seed)?;
    if test.is_empty() {
        warn!("Test split is empty, every metric will be undefined");
    }
    info!(
        "Split {} samples into {} training and {} test samples",
        dataset.len(),
        train.len(),
        test.len()
    );
    Ok((train, test))
}

fn train_svm(args: &SvmArgs, train: &Dataset) -> Result<TrainedSvm> {
    info!(
        "Training SVM ensemble: learning_rate={}, lambda={}, iterations={}",
        args.learning_rate, args.lambda, args.iterations
    );
    let model = SvmClassifier::new()
        .with_learning_rate(args.learning_rate)
        .with_lambda(args.lambda)
        .with_iterations(args.iterations)
        .fit(train)?;
    info!("Trained {} one-vs-rest models", model.classes().len());
    Ok(model)
}

fn train_tree(args: &TreeArgs, train: &Dataset) -> Result<TrainedTree> {
    info!("Training decision tree: max_depth={}", args.max_depth);
    let model = TreeClassifier::new()
        .with_max_depth(args.max_depth)
        .fit(train)?;

    if let Some(path) = &args.flowchart {
        model.save_flowchart(path)?;
    }
    Ok(model)
}

fn summarize_tree(model: &TrainedTree, test: &Dataset) -> Result<TreeSummary> {
    let metrics = match model.analyze(test) {
        Ok(report) => TreeMetrics::Binary(report),
        Err(ClassifyError::UnsupportedLabelSpace(reason)) => {
            warn!("Binary tree metrics unavailable ({reason}), reporting per class");
            TreeMetrics::Multiclass(model.analyze_multiclass(test)?)
        }
        Err(e) => return Err(e),
    };

    let info = model.info();
    Ok(TreeSummary {
        depth: info.depth,
        n_leaves: info.n_leaves,
        metrics,
    })
}
