//! # Prompt
//!
//! Builds the provider request for classifying one post.
//!
//! ## Layout
//!
//! A [`ClassificationRequest`] turns into four chat messages:
//!
//! 1. **System**: [`CLASSIFICATION_SYSTEM_PROMPT`], naming the four categories and the JSON contract
//! 2. **User**: the seed example post
//! 3. **Assistant**: the seed example answer, showing the expected JSON shape
//! 4. **User**: the post to classify
//!
//! The request also carries a [`ResponseSchema`] that providers supporting structured output
//! enforce. The schema is advisory: callers still validate what comes back.
//!
//! ## External interactions
//!
//! - **AI models**: messages and schema are sent to an OpenAI-compatible chat completions API.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Fixed classification instruction. Names exactly the four real categories.
pub const CLASSIFICATION_SYSTEM_PROMPT: &str = "\
Classify the following social media post into exactly one of the categories:
1. Harassment
2. Threat
3. Inappropriate
4. Safe

Respond strictly with a JSON object of the form:
{\"category\": \"...\", \"probability\": 0.0}

`category` must be one of Harassment, Threat, Inappropriate, Safe.
`probability` is your confidence in that category, a number between 0 and 1.
Do not add any other keys, text, or formatting.";

/// Post text of the seed example turn.
pub const SEED_EXAMPLE_POST: &str = "Congrats on the new job, can't wait to celebrate with you this weekend!";

/// Answer of the seed example turn.
pub const SEED_EXAMPLE_ANSWER: &str = r#"{"category": "Safe", "probability": 0.9}"#;

/// Formats a post as the user turn of the conversation.
pub fn format_post(post_text: &str) -> String {
    format!("Post: \"{}\"", post_text)
}

/// One demonstration turn: an input post and the expected JSON answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedExample {
    pub input: String,
    pub output: String,
}

impl Default for SeedExample {
    fn default() -> Self {
        Self {
            input: format_post(SEED_EXAMPLE_POST),
            output: SEED_EXAMPLE_ANSWER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub field_type: FieldType,
}

/// Declared output schema: an object whose named fields are all required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSchema {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

impl ResponseSchema {
    /// `{ category: string, probability: number }`.
    pub fn classification() -> Self {
        Self {
            name: "post_classification".to_string(),
            fields: vec![
                SchemaField {
                    name: "category".to_string(),
                    field_type: FieldType::String,
                },
                SchemaField {
                    name: "probability".to_string(),
                    field_type: FieldType::Number,
                },
            ],
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// JSON Schema document for the provider's structured-output option.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(field.name.clone(), json!({ "type": field.field_type }));
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": self.field_names().collect::<Vec<_>>(),
            "additionalProperties": false,
        })
    }
}

/// Everything a provider needs for one classification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub system_prompt: String,
    pub seed_example: SeedExample,
    pub user_message: String,
    pub response_schema: ResponseSchema,
}

impl ClassificationRequest {
    /// Request with the fixed instruction, the default seed example and the classification schema.
    pub fn for_post(post_text: &str) -> Self {
        Self {
            system_prompt: CLASSIFICATION_SYSTEM_PROMPT.to_string(),
            seed_example: SeedExample::default(),
            user_message: format_post(post_text),
            response_schema: ResponseSchema::classification(),
        }
    }

    /// System, seed user, seed assistant, user.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(&self.system_prompt),
            ChatMessage::user(&self.seed_example.input),
            ChatMessage::assistant(&self.seed_example.output),
            ChatMessage::user(&self.user_message),
        ]
    }
}
