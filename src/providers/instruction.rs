// Shared system instruction for cross-provider behavioral consistency
//
// Both clients send the same role framing so switching providers does not
// change the voice or scope of answers.

use crate::wisdom::types::Version;

/// System instruction templated with the selected translation.
pub fn system_instruction(version: Version) -> String {
    format!(
        "You are a wise and scholarly assistant with deep knowledge of the Bible. \
         Answer the user's question using only the Bible, quoting from the {} ({}). \
         Provide a direct answer drawn from scripture, the supporting scripture \
         reference (book, chapter and verse), a one- or two-word topic, and a brief \
         explanation of how the passage speaks to the question.",
        version.full_name(),
        version.code()
    )
}

/// Appended on the local path, where no response schema is enforced
/// server-side and the model must be told to emit the envelope itself.
pub const STRICT_JSON_DIRECTIVE: &str =
    "Respond with a single JSON object containing exactly these string keys: \
     \"answer\", \"reference\", \"topic\", \"explanation\". Do not include any text \
     outside the JSON object.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_names_the_translation() {
        for version in Version::all() {
            let instruction = system_instruction(version);
            assert!(instruction.contains(version.full_name()));
            assert!(instruction.contains(version.code()));
        }
    }

    #[test]
    fn test_directive_names_all_four_keys() {
        for key in ["answer", "reference", "topic", "explanation"] {
            assert!(STRICT_JSON_DIRECTIVE.contains(key));
        }
    }
}
