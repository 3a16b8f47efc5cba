//! Output comparison and the validation verdict shown to the player.

/// Normalises program output for comparison: CRLF and lone CR become LF, and
/// surrounding whitespace is trimmed. Case and inner whitespace are kept.
pub fn normalize_output(output: &str) -> String {
    output.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}

/// Byte-exact, case-sensitive comparison after normalisation.
pub fn outputs_match(actual: &str, expected: &str) -> bool {
    normalize_output(actual) == normalize_output(expected)
}

/// Verdict of a puzzle submission.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
    /// Zero unless this submission was the first correct one.
    pub points_earned: u32,
}

impl ValidationResult {
    pub fn accepted(message: impl Into<String>, points_earned: u32) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
            points_earned,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            points_earned: 0,
        }
    }
}
