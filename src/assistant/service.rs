// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! One chat turn with the campground assistant
//!
//! The user turn is enriched with the closest knowledge-base passages, sent
//! to the model with the tool declarations, and any function calls are
//! answered in a single follow-up request.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::errors::AssistantError;
use super::settings::{AssistantSettings, SettingsStore};
use super::tools::{self, ToolExecutor, UNHANDLED_WARNING};
use crate::llm::{
    Content, FunctionCall, FunctionResponse, GenerateRequest, GenerateResponse, GenerationConfig,
    LlmProvider, ROLE_MODEL,
};
use crate::rag::RagRetriever;

/// Passages retrieved per chat turn
pub const CONTEXT_PASSAGES: usize = 5;

pub const NO_ANSWER: &str =
    "Désolé, je n'ai pas pu récupérer une réponse pour le moment. Pouvez-vous reformuler ou réessayer ?";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
}

pub struct AssistantService {
    provider: Arc<dyn LlmProvider>,
    retriever: Option<RagRetriever>,
    settings: Arc<SettingsStore>,
    tools: ToolExecutor,
    generation: GenerationConfig,
}

impl AssistantService {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        retriever: Option<RagRetriever>,
        settings: Arc<SettingsStore>,
        tools: ToolExecutor,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            provider,
            retriever,
            settings,
            tools,
            generation,
        }
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    pub fn tools(&self) -> &ToolExecutor {
        &self.tools
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatReply, AssistantError> {
        let message = request
            .message
            .filter(|m| !m.trim().is_empty())
            .ok_or(AssistantError::MissingMessage)?;

        let settings = self.settings.load().await;
        debug!(
            "Chat turn: model={} history={} file_search_store={:?}",
            self.provider.model(),
            request.history.len(),
            settings.file_search_store_name
        );

        let context = self.retrieve_context(&message).await;
        let user_turn = match &context {
            Some(passages) => format!(
                "{}\n\nContextes retrouvés (RAG local) :\n{}",
                message, passages
            ),
            None => message,
        };

        let mut conversation = request.history;
        conversation.push(Content::user(user_turn));

        let mut response = self
            .provider
            .generate(&self.request(&settings, conversation.clone()))
            .await?;

        if let Some(follow_up) = self.answer_function_calls(&response, conversation).await {
            response = self.provider.generate(&self.request(&settings, follow_up)).await?;
        }

        log_grounding(&response);

        let mut text = response.text().trim().to_string();
        if text.is_empty() {
            text = match &context {
                Some(passages) => format!(
                    "Voici des passages trouvés dans la base locale :\n{}\n\nPouvez-vous préciser votre question ?",
                    passages
                ),
                None => NO_ANSWER.to_string(),
            };
        }

        Ok(ChatReply { text })
    }

    /// Bullet list of the closest passages, or `None` when nothing matched.
    /// Retrieval failures never fail the chat turn.
    async fn retrieve_context(&self, message: &str) -> Option<String> {
        let retriever = self.retriever.as_ref()?;
        match retriever.search(message, CONTEXT_PASSAGES).await {
            Ok(matches) if !matches.is_empty() => Some(
                matches
                    .iter()
                    .map(|m| format!("- {}", m.chunk.text))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Ok(_) => None,
            Err(e) => {
                warn!("RAG retrieval failed: {}", e);
                None
            }
        }
    }

    /// Execute the function calls of `response`, returning the follow-up
    /// conversation, or `None` when the model asked for no tool.
    async fn answer_function_calls(
        &self,
        response: &GenerateResponse,
        conversation: Vec<Content>,
    ) -> Option<Vec<Content>> {
        let mut model_turn = response.first_content()?.clone();
        let calls: Vec<FunctionCall> = model_turn.function_calls().cloned().collect();
        if calls.is_empty() {
            return None;
        }

        let (handled, ignored): (Vec<_>, Vec<_>) =
            calls.into_iter().partition(|c| self.tools.handles(&c.name));
        info!(
            "Function calls: {} handled, {} ignored",
            handled.len(),
            ignored.len()
        );
        if !ignored.is_empty() {
            debug!(
                "Ignoring function calls: {:?}",
                ignored.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
            );
        }

        let mut responses = Vec::with_capacity(handled.len() + ignored.len());
        for call in &handled {
            if let Some(result) = self.tools.execute(call).await {
                responses.push(FunctionResponse {
                    name: call.name.clone(),
                    response: result,
                });
            }
        }
        responses.extend(ignored.into_iter().map(|call| FunctionResponse {
            name: call.name,
            response: serde_json::json!({ "warning": UNHANDLED_WARNING }),
        }));

        if model_turn.role.is_none() {
            model_turn.role = Some(ROLE_MODEL.to_string());
        }

        let mut follow_up = conversation;
        follow_up.push(model_turn);
        follow_up.push(Content::function_responses(responses));
        Some(follow_up)
    }

    fn request(&self, settings: &AssistantSettings, contents: Vec<Content>) -> GenerateRequest {
        GenerateRequest {
            contents,
            system_instruction: Some(Content::system(settings.system_instruction.clone())),
            tools: vec![tools::tool()],
            generation_config: Some(self.generation.clone()),
        }
    }
}

fn log_grounding(response: &GenerateResponse) {
    match response.candidates.first() {
        Some(candidate) if candidate.grounding_metadata.is_some() => {
            info!("Grounding metadata present in model answer");
            debug!("Grounding metadata: {:?}", candidate.grounding_metadata);
        }
        Some(candidate) => debug!(
            "No grounding metadata (finish reason {:?})",
            candidate.finish_reason
        ),
        None => warn!(
            "Model returned no candidates (prompt feedback {:?})",
            response.prompt_feedback
        ),
    }
}
