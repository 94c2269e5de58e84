use std::fmt::Write as _;

use crate::types::PitchContour;

pub const TABLE_HEADER: &str = "Time (s)\tPitch (Hz)";

const PROMPT_PREAMBLE: &str = "\
You are an expert in speech prosody. Your task is to classify the utterance as either:

- Interrogative: A question
- Declarative: A statement

Here is the pitch contour data (each row is a time and pitch value):
";

const PROMPT_DIRECTIVES: &str = "\
Notes:
- 'Silence' in the Pitch (Hz) column means no voice was detected at that time (a silent segment, not a neutral or unaccented pitch).
- 'Malformed' in the Pitch (Hz) column means the pitch reading at that time was unusable.

Instructions:
1. For each time step, analyze whether the pitch is rising, falling, or flat compared to the previous value.
2. Pay special attention to the trend in the utterance.
3. Summarize the overall pitch movement (e.g., mostly rising, mostly falling, or flat).
4. Use this analysis to decide if the utterance is Interrogative or Declarative.
5. Briefly explain your reasoning in 1-2 sentences, then respond with only one word on a new line: Interrogative or Declarative.

Format:
Reasoning: <your explanation>
Answer: <Interrogative or Declarative>
";

/// Renders the classification prompt for one contour.
///
/// Rows keep source order, times are fixed to three decimals and voiced
/// pitches to two, so equal contours always produce byte-identical prompts.
pub fn build_prompt(contour: &PitchContour) -> String {
    let mut table = String::from(TABLE_HEADER);
    table.push('\n');
    for point in &contour.points {
        writeln!(table, "{:.3}\t{}", point.time_s, point.pitch).ok();
    }
    format!("{PROMPT_PREAMBLE}\n{table}\n{PROMPT_DIRECTIVES}")
}
