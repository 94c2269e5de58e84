use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use prosody_eval::contour::report::{
    aggregate_outcomes, FileOutcome, Meta, Report, REPORT_SCHEMA_VERSION,
};
use prosody_eval::{OllamaConfig, ProsodyEvaluatorBuilder};

#[path = "prosody_report/csv_report_formatter.rs"]
mod csv_report_formatter;

const RESULTS_FILE_NAME: &str = "results.csv";
const SUMMARY_FILE_NAME: &str = "summary.json";

#[derive(Debug, Parser)]
#[command(name = "prosody_report")]
#[command(about = "Score a local language model on interrogative-vs-declarative pitch contours")]
struct Args {
    #[arg(long, env = "PROSODY_REPORT_INPUT_DIR", default_value = "pitch_csv")]
    input_dir: PathBuf,
    #[arg(long, env = "PROSODY_REPORT_OUT_DIR", default_value = "results")]
    out_dir: PathBuf,
    #[arg(long, env = "PROSODY_REPORT_MODEL", default_value = OllamaConfig::DEFAULT_MODEL)]
    model: String,
    #[arg(long, env = "PROSODY_REPORT_BINARY", default_value = OllamaConfig::DEFAULT_BINARY)]
    binary: String,
    #[arg(long, env = "PROSODY_REPORT_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "PROSODY_REPORT_OFFSET", default_value_t = 0)]
    offset: usize,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let input_dir = resolve_path(&repo_root, &args.input_dir);
    let out_dir = resolve_path(&repo_root, &args.out_dir);

    require_path_exists(&input_dir, "Missing pitch contour input directory.")?;

    let mut files = collect_contour_files(&input_dir)?;
    if args.offset > 0 {
        files = files.into_iter().skip(args.offset).collect();
    }
    if let Some(limit) = args.limit {
        files.truncate(limit);
    }
    if files.is_empty() {
        return Err("No contour files selected after applying offset/limit.".to_string());
    }
    let selected_file_count = files.len();

    let evaluator = ProsodyEvaluatorBuilder::new(OllamaConfig {
        binary: args.binary,
        model: args.model.clone(),
    })
    .build();

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("starting...");

    let mut outcomes: Vec<FileOutcome> = Vec::with_capacity(files.len());
    let mut eval_elapsed = Duration::ZERO;
    for file in &files {
        let display_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        progress.set_message(display_name.clone());

        let eval_started = Instant::now();
        let outcome = evaluator.evaluate_file(file);
        eval_elapsed += eval_started.elapsed();

        progress.println(format!(
            "{display_name}: actual={} predicted={}",
            outcome.actual, outcome.predicted
        ));
        outcomes.push(outcome);
        progress.inc(1);
    }
    progress.finish_with_message("classification pass complete");

    let eval_seconds = eval_elapsed.as_secs_f64();
    let avg_file_ms = eval_seconds * 1000.0 / selected_file_count as f64;
    println!(
        "classification_elapsed: {:.2}s ({}) avg_per_file: {:.2}ms",
        eval_seconds,
        format_duration_hms(eval_elapsed),
        avg_file_ms
    );

    let aggregates = aggregate_outcomes(&outcomes);
    let accuracy_line = match aggregates.accuracy.as_ref() {
        Some(accuracy) => format!(
            "accuracy: {}/{} ({:.1}%)",
            accuracy.matched,
            accuracy.scored,
            accuracy.accuracy * 100.0
        ),
        None => "accuracy: n/a (no files with a known label)".to_string(),
    };

    let report = Report {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            model: args.model,
            case_count: outcomes.len(),
        },
        outcomes,
        aggregates,
    };

    let results_path = out_dir.join(RESULTS_FILE_NAME);
    let summary_path = out_dir.join(SUMMARY_FILE_NAME);
    csv_report_formatter::write_results_csv(&results_path, &report.outcomes)?;
    csv_report_formatter::write_summary_json(&summary_path, &report)?;

    println!("{}", results_path.display());
    println!("{}", summary_path.display());
    println!("{accuracy_line}");
    Ok(())
}

fn collect_contour_files(input_dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(input_dir)
        .map_err(|err| format!("Failed to read directory '{}': {err}", input_dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            format!(
                "Failed to read directory entry in '{}': {err}",
                input_dir.display()
            )
        })?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        // Extension match is case-sensitive; PITCH.CSV is not a contour file.
        if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "csv")
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn resolve_path(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}

fn format_duration_hms(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    let hours = total_ms / 3_600_000;
    let rem_after_hours = total_ms % 3_600_000;
    let minutes = rem_after_hours / 60_000;
    let rem_after_minutes = rem_after_hours % 60_000;
    let seconds = rem_after_minutes / 1_000;
    let millis = rem_after_minutes % 1_000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

fn require_path_exists(path: &Path, message: &str) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    Err(format!("{message} Missing path: {}", path.display()))
}
