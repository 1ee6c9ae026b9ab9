//! # Classification provider abstraction
//!
//! Defines the [`ClassificationProvider`] trait (one call: instruction + seed example + post +
//! response schema in, raw text out) and an OpenAI implementation. The provider does not
//! interpret the reply; decoding and validation belong to the classifier.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, ClassificationRequest, MessageRole};

mod config;
mod openai_provider;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use openai_provider::OpenAIClassificationProvider;

/// External classification endpoint.
#[async_trait]
pub trait ClassificationProvider: Send + Sync {
    /// Issues a single call and returns the raw reply text. Transport failures are `Err`.
    async fn complete(&self, request: &ClassificationRequest) -> Result<String>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
