use std::fmt;

use serde::{Deserialize, Serialize};

/// Assertion value the service uses for findings affirmed in the patient.
pub const ASSERTION_PRESENT: &str = "present";

/// Identifier the analysis service assigns to a stored conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Polarity tag attached to an extracted entity.
///
/// The vocabulary is owned by the service ("present", "absent", "negated",
/// "uncertain", ...). Only the literal [`ASSERTION_PRESENT`] is treated as
/// affirmed; every other value, including the empty string, is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assertion(pub String);

impl Assertion {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn is_present(&self) -> bool {
        self.0 == ASSERTION_PRESENT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_literal_present_counts_as_present() {
        assert!(Assertion::new("present").is_present());
        for other in ["absent", "negated", "uncertain", "hypothetical", "", "Present"] {
            assert!(!Assertion::new(other).is_present(), "{other:?}");
        }
    }

    #[test]
    fn conversation_id_is_a_bare_json_string() {
        let id: ConversationId = serde_json::from_str("\"c-42\"").expect("parse");
        assert_eq!(id.as_str(), "c-42");
        assert_eq!(serde_json::to_string(&id).expect("encode"), "\"c-42\"");
    }
}
