//! OpenAI-backed ClassificationProvider: sends the request as chat messages with a strict
//! json_schema response format.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{CompletionParams, JsonSchemaFormat, OpenAIClient};
use prompt::ClassificationRequest;
use tracing::instrument;

use super::{chat_message_to_openai, ClassificationProvider, LlmConfig, DEFAULT_MODEL};

#[derive(Clone)]
pub struct OpenAIClassificationProvider {
    client: OpenAIClient,
    model: String,
    params: CompletionParams,
}

impl OpenAIClassificationProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: OpenAIClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            params: CompletionParams::default(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
            params: CompletionParams::default(),
        }
    }

    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model())
            .with_params(config.completion_params())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_params(mut self, params: CompletionParams) -> Self {
        self.params = params;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ClassificationProvider for OpenAIClassificationProvider {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &ClassificationRequest) -> Result<String> {
        let messages = request
            .to_messages()
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        let format = JsonSchemaFormat {
            name: request.response_schema.name.clone(),
            schema: request.response_schema.to_json_schema(),
            strict: true,
        };
        self.client
            .structured_completion(&self.model, messages, &format, self.params)
            .await
    }

    fn name(&self) -> &str {
        "openai"
    }
}
