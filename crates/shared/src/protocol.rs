use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Assertion, ConversationId};

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const STATS_PATH: &str = "/api/stats";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub transcript: String,
}

impl AnalyzeRequest {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub conversation_id: ConversationId,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub code_proposals: Vec<CodeProposal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub assertion: Assertion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<NormalizedConcept>,
}

/// Terminology concept the service mapped an entity to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedConcept {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeProposal {
    pub code: String,
    #[serde(default)]
    pub display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_conversations: u64,
    #[serde(default)]
    pub top_codes: Vec<CodeSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSummary {
    pub code: String,
    #[serde(default)]
    pub display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn analysis_result_reads_camel_case_body() {
        let body = json!({
            "conversationId": "conv-1",
            "entities": [
                {"text": "fever", "type": "symptom", "assertion": "present"},
                {
                    "text": "flu",
                    "type": "diagnosis",
                    "assertion": "uncertain",
                    "normalized": {"display": "Influenza", "system": "icd10cm", "code": "J11.1"}
                }
            ],
            "codeProposals": [{"code": "J11.1", "display": "Influenza", "confidence": 0.82}]
        });

        let result: AnalysisResult = serde_json::from_value(body).expect("parse");
        assert_eq!(result.conversation_id.as_str(), "conv-1");
        assert_eq!(result.entities[0].kind, "symptom");
        assert!(result.entities[0].assertion.is_present());
        let normalized = result.entities[1].normalized.as_ref().expect("normalized");
        assert_eq!(normalized.display.as_deref(), Some("Influenza"));
        assert_eq!(normalized.extra.get("system"), Some(&json!("icd10cm")));
        assert_eq!(result.code_proposals[0].confidence, Some(0.82));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let result: AnalysisResult =
            serde_json::from_value(json!({"conversationId": "conv-2"})).expect("parse");
        assert!(result.entities.is_empty());
        assert!(result.code_proposals.is_empty());
    }

    #[test]
    fn missing_conversation_id_is_rejected() {
        let parsed = serde_json::from_value::<AnalysisResult>(json!({"entities": []}));
        assert!(parsed.is_err());
    }

    #[test]
    fn code_proposal_without_confidence_parses() {
        let proposal: CodeProposal =
            serde_json::from_value(json!({"code": "R50.9", "display": "Fever"})).expect("parse");
        assert_eq!(proposal.confidence, None);
    }

    #[test]
    fn stats_snapshot_keeps_unknown_top_code_fields() {
        let stats: StatsSnapshot = serde_json::from_value(json!({
            "totalConversations": 12,
            "topCodes": [{"code": "J11.1", "display": "Influenza", "count": 5, "share": 0.4}]
        }))
        .expect("parse");
        assert_eq!(stats.total_conversations, 12);
        assert_eq!(stats.top_codes[0].count, Some(5));
        assert_eq!(stats.top_codes[0].extra.get("share"), Some(&json!(0.4)));
    }

    #[test]
    fn analyze_request_serializes_transcript_verbatim() {
        let request = AnalyzeRequest::new("  Patient: hi\n");
        assert_eq!(
            serde_json::to_value(&request).expect("encode"),
            json!({"transcript": "  Patient: hi\n"})
        );
    }
}
