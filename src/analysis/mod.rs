//! One submission cycle: request in, prompt built, one generation call, result out.
//!
//! This is the boundary where remote failures stop being errors and become a
//! message to show. Nothing past `analyze` ever sees a `GenerationError`.

mod cycle;

pub use cycle::{Cycle, Phase, PhaseError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::gemini::GenerationClient;
use crate::prompt::PromptTemplate;

/// Prefix on every user-facing remote failure.
pub const ERROR_PREFIX: &str = "連線錯誤：";

/// A validated submission. Both fields are non-empty and kept exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    person: String,
    event: String,
}

impl AnalysisRequest {
    /// `None` when either field is empty.
    pub fn new(person: &str, event: &str) -> Option<Self> {
        if person.is_empty() || event.is_empty() {
            return None;
        }
        Some(Self {
            person: person.to_string(),
            event: event.to_string(),
        })
    }

    pub fn person(&self) -> &str {
        &self.person
    }

    pub fn event(&self) -> &str {
        &self.event
    }
}

/// What the output region shows for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisResult {
    Text(String),
    Error(String),
}

impl AnalysisResult {
    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisResult::Error(_))
    }
}

/// Run one cycle. Consumes the request; always yields a result.
pub async fn analyze(
    client: &dyn GenerationClient,
    template: &PromptTemplate,
    request: AnalysisRequest,
) -> AnalysisResult {
    let mut cycle = Cycle::new();
    step(&mut cycle, Phase::Submitted);

    let prompt = template.render(request.person(), request.event());
    debug!(
        "Analyzing {} / {}, prompt is {} chars",
        request.person(),
        request.event(),
        prompt.chars().count()
    );

    step(&mut cycle, Phase::AwaitingResponse);
    let result = match client.generate(&prompt).await {
        Ok(text) => AnalysisResult::Text(text),
        Err(e) => {
            warn!("{} call failed: {}", client.name(), e);
            AnalysisResult::Error(format!("{ERROR_PREFIX}{e}"))
        }
    };

    step(&mut cycle, if result.is_error() { Phase::Failed } else { Phase::Displayed });
    step(&mut cycle, Phase::Idle);
    result
}

fn step(cycle: &mut Cycle, next: Phase) {
    if let Err(e) = cycle.advance(next) {
        warn!("{}", e);
    }
}
