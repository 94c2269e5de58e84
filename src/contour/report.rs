use std::fmt::Write as _;

use serde::Serialize;

use crate::types::ActualLabel;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Sentinel recorded in the predicted column when a file fails before the
/// classifier produces a verdict.
pub const ERROR_LABEL: &str = "Error";

const INTERROGATIVE_NORMALIZED: &str = "interrogative";
const DECLARATIVE_NORMALIZED: &str = "declarative";

/// One evaluated file: ground truth next to the verbatim predicted token.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file: String,
    pub actual: ActualLabel,
    pub predicted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub outcomes: Vec<FileOutcome>,
    pub aggregates: AggregateReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub model: String,
    pub case_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub counts: AggregateCounts,
    pub accuracy: Option<AccuracyReport>,
    pub confusion: ConfusionCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateCounts {
    pub total: u32,
    pub interrogative: u32,
    pub declarative: u32,
    pub unknown: u32,
    pub error_predictions: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccuracyReport {
    pub scored: u32,
    pub matched: u32,
    pub accuracy: f32,
}

/// Confusion over the two known labels. Files with an `Unknown` ground truth
/// are excluded entirely; predictions that normalize to neither label land in
/// the `_other` buckets (including the error sentinel).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub interrogative_as_interrogative: u32,
    pub interrogative_as_declarative: u32,
    pub interrogative_other: u32,
    pub declarative_as_declarative: u32,
    pub declarative_as_interrogative: u32,
    pub declarative_other: u32,
}

pub fn aggregate_outcomes(outcomes: &[FileOutcome]) -> AggregateReport {
    let mut interrogative = 0usize;
    let mut declarative = 0usize;
    let mut unknown = 0usize;
    let mut error_predictions = 0usize;
    let mut matched = 0usize;
    let mut confusion = ConfusionCounts::default();

    for outcome in outcomes {
        if outcome.predicted == ERROR_LABEL {
            error_predictions += 1;
        }

        let normalized = normalize_predicted(&outcome.predicted);
        match outcome.actual {
            ActualLabel::Interrogative => {
                interrogative += 1;
                match normalized.as_str() {
                    INTERROGATIVE_NORMALIZED => {
                        matched += 1;
                        confusion.interrogative_as_interrogative += 1;
                    }
                    DECLARATIVE_NORMALIZED => confusion.interrogative_as_declarative += 1,
                    _ => confusion.interrogative_other += 1,
                }
            }
            ActualLabel::Declarative => {
                declarative += 1;
                match normalized.as_str() {
                    DECLARATIVE_NORMALIZED => {
                        matched += 1;
                        confusion.declarative_as_declarative += 1;
                    }
                    INTERROGATIVE_NORMALIZED => confusion.declarative_as_interrogative += 1,
                    _ => confusion.declarative_other += 1,
                }
            }
            ActualLabel::Unknown => unknown += 1,
        }
    }

    let scored = interrogative + declarative;
    let accuracy = (scored > 0).then(|| AccuracyReport {
        scored: to_u32(scored),
        matched: to_u32(matched),
        accuracy: matched as f32 / scored as f32,
    });

    AggregateReport {
        counts: AggregateCounts {
            total: to_u32(outcomes.len()),
            interrogative: to_u32(interrogative),
            declarative: to_u32(declarative),
            unknown: to_u32(unknown),
            error_predictions: to_u32(error_predictions),
        },
        accuracy,
        confusion,
    }
}

/// Lowercases and strips trailing ASCII punctuation for match counting only.
/// The recorded predicted token is never altered.
fn normalize_predicted(predicted: &str) -> String {
    predicted
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .to_ascii_lowercase()
}

pub fn render_results_csv(outcomes: &[FileOutcome]) -> String {
    let mut output = String::from("actual,predicted\n");
    for outcome in outcomes {
        writeln!(
            output,
            "{},{}",
            csv_field(outcome.actual.as_str()),
            csv_field(&outcome.predicted)
        )
        .ok();
    }
    output
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
