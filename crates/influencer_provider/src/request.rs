use influencer_domain::ModelId;
use serde::Serialize;

/// Instruction sent ahead of every text prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are an AI influencer assistant.";

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    System,
    User,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct ChatRequest {
    pub model: ModelId,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(model: ModelId, prompt: impl Into<String>) -> Self {
        Self {
            model,
            messages: vec![
                ChatMessage { role: Role::System, content: SYSTEM_INSTRUCTION.to_string() },
                ChatMessage { role: Role::User, content: prompt.into() },
            ],
        }
    }
}
