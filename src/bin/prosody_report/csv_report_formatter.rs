use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use prosody_eval::contour::report::{render_results_csv, FileOutcome, Report};

pub fn write_results_csv(path: &Path, outcomes: &[FileOutcome]) -> Result<(), String> {
    create_parent_dir(path)?;
    fs::write(path, render_results_csv(outcomes))
        .map_err(|err| format!("Failed to write results file '{}': {err}", path.display()))
}

pub fn write_summary_json(path: &Path, report: &Report) -> Result<(), String> {
    create_parent_dir(path)?;

    let mut file = File::create(path)
        .map_err(|err| format!("Failed to create summary file '{}': {err}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, report).map_err(|err| {
        format!(
            "Failed to serialize summary JSON '{}': {err}",
            path.display()
        )
    })?;
    file.write_all(b"\n")
        .map_err(|err| format!("Failed to finalize summary file '{}': {err}", path.display()))
}

fn create_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create output directory '{}': {err}",
                parent.display()
            )
        })?;
    }
    Ok(())
}
