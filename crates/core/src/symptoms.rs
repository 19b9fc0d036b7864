//! Symptom codec.
//!
//! Patients carry a list of free-text symptoms, but the store keeps a single
//! text column. [`encode`] flattens a list into that column and [`decode`]
//! turns the column back into a list.
//!
//! Commas inside a symptom are not escaped, so a symptom such as `"dolor, leve"`
//! comes back as two symptoms. [`decode`] also keeps degenerate text (only
//! commas and whitespace) as a single raw entry rather than returning nothing.

use crate::constants::{SYMPTOM_DELIMITER, SYMPTOM_SEPARATOR};
use api_shared::SymptomsInput;

/// Joins symptoms into the stored text form.
///
/// Each symptom is trimmed and empty ones are dropped. An empty list encodes
/// to an empty string.
pub fn encode<S: AsRef<str>>(symptoms: &[S]) -> String {
    symptoms
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(SYMPTOM_SEPARATOR)
}

/// Encodes symptoms exactly as received from a client.
///
/// A single string is trimmed but never split.
pub fn encode_input(input: SymptomsInput) -> String {
    encode(&input.into_list())
}

/// Splits stored text back into symptoms.
///
/// Parts are trimmed and empty parts dropped. Non-empty text with no surviving
/// parts is returned unchanged as the only element.
pub fn decode(text: &str) -> Vec<String> {
    let parts: Vec<String> = text
        .split(SYMPTOM_DELIMITER)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if parts.is_empty() && !text.is_empty() {
        return vec![text.to_string()];
    }
    parts
}
