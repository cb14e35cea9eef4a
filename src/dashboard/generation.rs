// Generation tasks
//
// A task is everything an AI call needs, captured under the dashboard lock
// together with its ticket. It runs with the lock released and comes back as
// a result for `Dashboard::apply_generation`.

use crate::ai::{AiGateway, JournalAnalysis, VisionContext, VisionPair};

use super::requests::{Operation, Ticket};

#[derive(Debug)]
pub enum GenerationTask {
    Visions {
        ticket: Ticket,
        directive: String,
    },
    Vision {
        ticket: Ticket,
        context: VisionContext,
    },
    AntiVision {
        ticket: Ticket,
        directive: String,
        current_vision: String,
    },
    JournalAnalysis {
        ticket: Ticket,
        responses: Vec<String>,
        /// Size of the whole journal, blank entries included
        entry_count: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutput {
    Visions(VisionPair),
    Vision(String),
    AntiVision(String),
    JournalAnalysis(JournalAnalysis),
}

#[derive(Debug)]
pub struct GenerationResult {
    pub(super) ticket: Ticket,
    pub output: GenerationOutput,
}

impl GenerationTask {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Visions { ticket, .. }
            | Self::Vision { ticket, .. }
            | Self::AntiVision { ticket, .. }
            | Self::JournalAnalysis { ticket, .. } => ticket.operation(),
        }
    }

    /// Call the gateway. Never fails; an empty output means the call failed.
    pub async fn run(self, gateway: &AiGateway) -> GenerationResult {
        match self {
            Self::Visions { ticket, directive } => GenerationResult {
                ticket,
                output: GenerationOutput::Visions(gateway.generate_visions(&directive).await),
            },
            Self::Vision { ticket, context } => GenerationResult {
                ticket,
                output: GenerationOutput::Vision(gateway.generate_vision(&context).await),
            },
            Self::AntiVision {
                ticket,
                directive,
                current_vision,
            } => GenerationResult {
                ticket,
                output: GenerationOutput::AntiVision(
                    gateway
                        .generate_anti_vision(&directive, &current_vision)
                        .await,
                ),
            },
            Self::JournalAnalysis {
                ticket,
                responses,
                entry_count,
            } => GenerationResult {
                ticket,
                output: GenerationOutput::JournalAnalysis(
                    gateway.analyze_journal(&responses, entry_count).await,
                ),
            },
        }
    }
}
