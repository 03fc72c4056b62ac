//! Pure derivation of what the analyzer view shows from [`WorkflowState`].

use shared::protocol::{CodeProposal, Entity, StatsSnapshot};

use crate::workflow::WorkflowState;

pub const ENTITIES_PLACEHOLDER: &str = "Run analysis to see extracted findings.";
pub const CODES_PLACEHOLDER: &str = "No proposals yet.";
pub const UNKNOWN_VALUE: &str = "-";
pub const ANALYZE_LABEL: &str = "Analyze & Code";
pub const ANALYZING_LABEL: &str = "Analyzing...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section<T> {
    Rows(Vec<T>),
    Placeholder(&'static str),
}

impl<T> Section<T> {
    fn from_rows(rows: Vec<T>, placeholder: &'static str) -> Self {
        if rows.is_empty() {
            Self::Placeholder(placeholder)
        } else {
            Self::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Self::Rows(rows) => rows,
            Self::Placeholder(_) => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Rows(_) => None,
            Self::Placeholder(text) => Some(*text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionStyle {
    Present,
    NotPresent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCardView {
    pub title: &'static str,
    pub value: String,
    pub sub: Option<String>,
}

impl StatCardView {
    pub fn new(title: &'static str, value: Option<String>, sub: Option<String>) -> Self {
        Self {
            title,
            value: value.unwrap_or_else(|| UNKNOWN_VALUE.to_string()),
            sub,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePillView {
    pub code: String,
    pub display: String,
    pub percent: u32,
}

impl CodePillView {
    pub fn from_proposal(proposal: &CodeProposal) -> Self {
        Self {
            code: proposal.code.clone(),
            display: proposal.display.clone(),
            percent: confidence_percent(proposal.confidence),
        }
    }

    pub fn confidence_label(&self) -> String {
        format!("{}%", self.percent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRowView {
    pub type_tag: String,
    pub label: String,
    pub badge: String,
    pub style: AssertionStyle,
}

impl EntityRowView {
    pub fn from_entity(entity: &Entity) -> Self {
        let label = entity
            .normalized
            .as_ref()
            .and_then(|concept| concept.display.as_deref())
            .filter(|display| !display.is_empty())
            .unwrap_or(entity.text.as_str())
            .to_string();
        let style = if entity.assertion.is_present() {
            AssertionStyle::Present
        } else {
            AssertionStyle::NotPresent
        };
        Self {
            type_tag: entity.kind.to_uppercase(),
            label,
            badge: entity.assertion.to_string(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationBanner {
    pub conversation_id: String,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButtonView {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderModel {
    pub stat_cards: Vec<StatCardView>,
    pub submit: SubmitButtonView,
    pub error: Option<String>,
    pub entities: Section<EntityRowView>,
    pub codes: Section<CodePillView>,
    pub conversation: Option<ConversationBanner>,
}

impl RenderModel {
    pub fn derive(state: &WorkflowState) -> Self {
        let result = state.result();
        let entities: Vec<EntityRowView> = result
            .map(|r| r.entities.iter().map(EntityRowView::from_entity).collect())
            .unwrap_or_default();
        let codes: Vec<CodePillView> = result
            .map(|r| r.code_proposals.iter().map(CodePillView::from_proposal).collect())
            .unwrap_or_default();

        let loading = state.is_loading();
        Self {
            stat_cards: stat_cards(state.stats()),
            submit: SubmitButtonView {
                label: if loading { ANALYZING_LABEL } else { ANALYZE_LABEL },
                enabled: !loading,
            },
            error: state.error_message().map(str::to_string),
            entities: Section::from_rows(entities, ENTITIES_PLACEHOLDER),
            codes: Section::from_rows(codes, CODES_PLACEHOLDER),
            conversation: result.map(|r| ConversationBanner {
                conversation_id: r.conversation_id.to_string(),
                completed_at: state
                    .completed_at()
                    .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string()),
            }),
        }
    }
}

pub fn stat_cards(stats: Option<&StatsSnapshot>) -> Vec<StatCardView> {
    let mut cards = vec![StatCardView::new(
        "Conversations",
        stats.map(|s| s.total_conversations.to_string()),
        None,
    )];
    if let Some(top) = stats.and_then(|s| s.top_codes.first()) {
        cards.push(StatCardView::new(
            "Top Code",
            Some(top.code.clone()),
            Some(top.display.clone()).filter(|display| !display.is_empty()),
        ));
    }
    cards
}

/// Confidence in `[0, 1]` as a whole percentage, rounding half away from zero.
/// Missing or non-finite values read as 0.
pub fn confidence_percent(confidence: Option<f64>) -> u32 {
    let Some(confidence) = confidence.filter(|c| c.is_finite()) else {
        return 0;
    };
    (confidence * 100.0).round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
