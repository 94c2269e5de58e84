use std::path::Path;

use crate::error::EvalError;
use crate::types::{ContourPoint, PitchContour, PitchSample};

const TIME_COLUMN: &str = "Time";
const PITCH_COLUMN: &str = "Pitch_Hz";
/// Literal marking an unvoiced frame in the pitch column.
const SILENCE_MARKER: &str = "NA";

/// Reads one utterance's pitch contour from a two-column CSV file.
///
/// Columns are located by header name so their order does not matter. The
/// pitch column is interpreted as text: `NA` becomes [`PitchSample::Silence`]
/// and any cell that does not parse as a finite number becomes
/// [`PitchSample::Malformed`]. A time cell that does not parse as a finite
/// number fails the whole file.
pub fn read_contour(path: &Path) -> Result<PitchContour, EvalError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| EvalError::io("reading contour csv", e))?;
    let contour = parse_contour(&contents, path)?;
    tracing::debug!(
        path = %path.display(),
        rows = contour.points.len(),
        "parsed pitch contour"
    );
    Ok(contour)
}

fn parse_contour(contents: &str, origin: &Path) -> Result<PitchContour, EvalError> {
    let mut lines = contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(EvalError::invalid_input(format!(
            "empty contour file '{}'",
            origin.display()
        )));
    };
    let (time_idx, pitch_idx) = locate_columns(header, origin)?;

    let mut points = Vec::new();
    for (line_no, line) in lines {
        let cells: Vec<&str> = line.split(',').map(|cell| strip_quotes(cell.trim())).collect();

        let time_cell = cells.get(time_idx).copied().unwrap_or("");
        let time_s = parse_time(time_cell, line_no + 1, origin)?;

        let pitch_cell = cells.get(pitch_idx).copied().unwrap_or("");
        points.push(ContourPoint {
            time_s,
            pitch: parse_pitch(pitch_cell),
        });
    }

    Ok(PitchContour { points })
}

fn locate_columns(header: &str, origin: &Path) -> Result<(usize, usize), EvalError> {
    let mut time_idx = None;
    let mut pitch_idx = None;
    for (idx, cell) in header.split(',').enumerate() {
        match strip_quotes(cell.trim()) {
            TIME_COLUMN => time_idx = Some(idx),
            PITCH_COLUMN => pitch_idx = Some(idx),
            _ => {}
        }
    }

    match (time_idx, pitch_idx) {
        (Some(time_idx), Some(pitch_idx)) => Ok((time_idx, pitch_idx)),
        (None, _) => Err(missing_column(TIME_COLUMN, origin)),
        (_, None) => Err(missing_column(PITCH_COLUMN, origin)),
    }
}

fn missing_column(column: &str, origin: &Path) -> EvalError {
    EvalError::invalid_input(format!(
        "missing '{column}' column in '{}'",
        origin.display()
    ))
}

fn parse_time(cell: &str, line_no: usize, origin: &Path) -> Result<f64, EvalError> {
    let value: f64 = cell.parse().map_err(|err| {
        EvalError::invalid_input(format!(
            "failed to parse {TIME_COLUMN}='{cell}' at line {line_no} in '{}': {err}",
            origin.display()
        ))
    })?;
    if !value.is_finite() {
        return Err(EvalError::invalid_input(format!(
            "non-finite {TIME_COLUMN}='{cell}' at line {line_no} in '{}'",
            origin.display()
        )));
    }
    Ok(value)
}

fn parse_pitch(cell: &str) -> PitchSample {
    if cell == SILENCE_MARKER {
        return PitchSample::Silence;
    }
    // str::parse accepts "nan"/"inf"; those are malformed pitch readings too.
    match cell.parse::<f64>() {
        Ok(hz) if hz.is_finite() => PitchSample::Voiced(hz),
        _ => PitchSample::Malformed,
    }
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}
