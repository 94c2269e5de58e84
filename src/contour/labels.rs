use std::path::Path;

use crate::error::EvalError;
use crate::types::ActualLabel;

/// Marker preceding the verdict in a well-formed classifier response.
pub const ANSWER_MARKER: &str = "Answer:";

/// Derives the ground-truth label from the file name (not the full path).
///
/// Matching is case-insensitive and `int` is checked before `dec`, so a name
/// containing both is read as interrogative.
pub fn actual_label_from_filename(path: &Path) -> ActualLabel {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return ActualLabel::Unknown;
    };
    let name = name.to_lowercase();
    if name.contains("int") {
        ActualLabel::Interrogative
    } else if name.contains("dec") {
        ActualLabel::Declarative
    } else {
        ActualLabel::Unknown
    }
}

/// Pulls the predicted label out of a raw classifier response.
///
/// Takes the first whitespace-delimited token after the last `Answer:`
/// marker, or the first token of the whole response when no marker is
/// present. The token is recorded verbatim, punctuation included.
pub fn extract_predicted_label(response: &str) -> Result<String, EvalError> {
    let tail = response
        .rsplit_once(ANSWER_MARKER)
        .map_or(response, |(_, after)| after);
    tail.split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| {
            EvalError::classifier("extracting predicted label", "empty classifier response")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_marker_yields_following_token() {
        let response = "Reasoning: pitch rises toward the end.\nAnswer: Interrogative\n";
        assert_eq!(extract_predicted_label(response).unwrap(), "Interrogative");
    }

    #[test]
    fn missing_marker_falls_back_to_first_token() {
        assert_eq!(
            extract_predicted_label("Declarative, since the contour falls.").unwrap(),
            "Declarative,"
        );
    }

    #[test]
    fn last_marker_wins() {
        let response = "The format is Answer: <label>.\nReasoning: flat trend.\nAnswer: Declarative";
        assert_eq!(extract_predicted_label(response).unwrap(), "Declarative");
    }

    #[test]
    fn token_punctuation_is_retained() {
        assert_eq!(
            extract_predicted_label("Answer: Interrogative.").unwrap(),
            "Interrogative."
        );
    }

    #[test]
    fn empty_response_is_an_error() {
        assert!(extract_predicted_label("").is_err());
    }

    #[test]
    fn whitespace_after_marker_is_an_error() {
        assert!(extract_predicted_label("Reasoning: unsure.\nAnswer:   \n").is_err());
    }

    #[test]
    fn filenames_map_to_labels() {
        let cases = [
            ("Q1_int_05.csv", ActualLabel::Interrogative),
            ("Q2_INT_rise.csv", ActualLabel::Interrogative),
            ("stmt_dec_02.csv", ActualLabel::Declarative),
            ("STMT_DEC_09.csv", ActualLabel::Declarative),
            ("sample07.csv", ActualLabel::Unknown),
        ];
        for (name, expected) in cases {
            assert_eq!(actual_label_from_filename(Path::new(name)), expected, "{name}");
        }
    }

    #[test]
    fn int_wins_over_dec() {
        assert_eq!(
            actual_label_from_filename(Path::new("interview_dec_03.csv")),
            ActualLabel::Interrogative
        );
    }

    #[test]
    fn only_the_file_name_is_inspected() {
        assert_eq!(
            actual_label_from_filename(Path::new("interrogative/sample07.csv")),
            ActualLabel::Unknown
        );
    }
}
