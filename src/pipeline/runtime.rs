use std::path::Path;

use crate::contour::labels::{actual_label_from_filename, extract_predicted_label};
use crate::contour::prompt::build_prompt;
use crate::contour::reader::read_contour;
use crate::contour::report::{FileOutcome, ERROR_LABEL};
use crate::error::EvalError;
use crate::pipeline::traits::Classifier;
use crate::types::PitchContour;

pub struct ProsodyEvaluator {
    classifier: Box<dyn Classifier>,
}

impl ProsodyEvaluator {
    pub(crate) fn from_classifier(classifier: Box<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Classifies one already-parsed contour and returns the predicted token.
    pub fn classify_contour(&self, contour: &PitchContour) -> Result<String, EvalError> {
        let prompt = build_prompt(contour);
        let response = self.classifier.classify(&prompt)?;
        let predicted = extract_predicted_label(&response)?;
        tracing::debug!(
            rows = contour.points.len(),
            predicted = %predicted,
            "contour classified"
        );
        Ok(predicted)
    }

    /// Evaluates one file end to end.
    ///
    /// A failure on this file never aborts the pass: the outcome records the
    /// error sentinel in the predicted column and the cause is logged.
    pub fn evaluate_file(&self, path: &Path) -> FileOutcome {
        let actual = actual_label_from_filename(path);
        let predicted = read_contour(path)
            .and_then(|contour| self.classify_contour(&contour))
            .unwrap_or_else(|err| {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "file evaluation failed"
                );
                ERROR_LABEL.to_string()
            });

        FileOutcome {
            file: path.display().to_string(),
            actual,
            predicted,
        }
    }
}
