use anyhow::{bail, Context, Result};
use checker_core::persist::{load_index, save_index, IndexPaths};
use checker_core::{CheckConfig, Checker, CheckerError, IndexBuilder, StemmingTokenizer, DEFAULT_THRESHOLD};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

mod report;

use report::{render, Format, Report};

#[derive(Parser)]
#[command(name = "checker")]
#[command(about = "Check documents for textual similarity against an indexed corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from every file in a directory
    Index {
        /// Directory containing the corpus files
        dir: PathBuf,
        /// Where to write the index
        #[arg(long, default_value = "./index")]
        index_dir: PathBuf,
        /// Drop common English stop words when tokenizing
        #[arg(long, default_value_t = false)]
        stopwords: bool,
    },
    /// Check a file, every file in a directory, or stdin (`-`) against the index
    Query {
        file: String,
        #[arg(long, default_value = "./index")]
        index_dir: PathBuf,
        /// Only report scores strictly above this value
        #[arg(long, env = "CHECKER_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let start = Instant::now();

    let result = match cli.command {
        Commands::Index { dir, index_dir, stopwords } => build_index(&dir, &index_dir, stopwords),
        Commands::Query { file, index_dir, threshold, format } => query(&file, &index_dir, threshold, format),
    };
    eprintln!("{}", execution_time_line(start.elapsed()));
    result
}

fn execution_time_line(elapsed: Duration) -> String {
    format!("Execution time: {:.3}s", elapsed.as_secs_f64())
}

fn build_index(dir: &Path, index_dir: &Path, stopwords: bool) -> Result<()> {
    if !dir.is_dir() {
        bail!("index path must be a directory containing the corpus files: {}", dir.display());
    }
    let mut builder = IndexBuilder::new(StemmingTokenizer::new().with_stopwords_removed(stopwords));
    for file in list_files(dir)? {
        let text = read_text(&file)?;
        builder.add_doc(file.to_string_lossy(), &text)?;
    }
    tracing::info!(num_docs = builder.len(), "ingested documents");

    let index = builder.finalize();
    let paths = IndexPaths::new(index_dir);
    save_index(&paths, &index).with_context(|| format!("failed to write index to {}", index_dir.display()))?;
    println!("Index generated in {}", index_dir.display());
    Ok(())
}

fn query(file: &str, index_dir: &Path, threshold: f64, format: Format) -> Result<()> {
    let config = CheckConfig::new(threshold)?;
    let reports = check_inputs(file, index_dir, &config)?;
    print!("{}", render(&reports, format)?);
    Ok(())
}

/// Score `file` (a file, a directory of files, or `-` for stdin) against the persisted index.
fn check_inputs(file: &str, index_dir: &Path, config: &CheckConfig) -> Result<Vec<Report>> {
    let mut inputs: Vec<(String, String)> = Vec::new();
    if file == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
        inputs.push(("stdin".to_string(), text));
    } else {
        let path = Path::new(file);
        if path.is_file() {
            inputs.push((file.to_string(), read_text(path)?));
        } else if path.is_dir() {
            for p in list_files(path)? {
                let text = read_text(&p)?;
                inputs.push((p.to_string_lossy().into_owned(), text));
            }
        } else {
            bail!("query path does not exist: {file}");
        }
    }

    let paths = IndexPaths::new(index_dir);
    let index = match load_index(&paths) {
        Ok(index) => index,
        Err(CheckerError::NoIndex(root)) => {
            bail!("no index available in {}, run `checker index <DIR>` first", root.display())
        }
        Err(e) => return Err(e).context("failed to load index"),
    };
    let tokenizer = StemmingTokenizer::from_name(index.tokenizer()).unwrap_or_default();
    let checker = Checker::new(&index, tokenizer)?;

    let reports = inputs
        .into_iter()
        .map(|(document, text)| {
            let matches = checker.check(&text, config);
            Report { document, matches }
        })
        .collect();
    Ok(reports)
}

/// Regular files directly inside `dir`, sorted by name.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
