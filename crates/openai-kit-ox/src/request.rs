use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    Message,
    audio::{AudioFormat, Voice},
    images::{ImageQuality, ImageResponseFormat, ImageSize, ImageStyle},
    model::{ChatModel, ImageModel, SpeechModel},
};

/// Request for chat completion
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct ChatRequest {
    /// List of messages in the conversation
    #[builder(field)]
    pub messages: Vec<Message>,

    /// The model to use for completion
    #[builder(into)]
    pub model: ChatModel,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 to 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// User identifier for abuse monitoring
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub user: Option<String>,
}

// Builder extensions for convenience methods
impl<S: chat_request_builder::State> ChatRequestBuilder<S> {
    /// Add a user message
    pub fn user_message(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Add an assistant message
    pub fn assistant_message(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::assistant(content));
        self
    }

    /// Add a system message
    pub fn system_message(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::system(content));
        self
    }

    /// Add a message
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add several messages, keeping their order
    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }
}

/// Request for image generation
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
pub struct ImageRequest {
    #[builder(into)]
    pub prompt: String,

    pub model: ImageModel,

    /// Number of images; the convenience calls always ask for one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<ImageQuality>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ImageResponseFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,

    /// DALL-E 3 only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ImageStyle>,
}

/// Request for text-to-speech synthesis
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
pub struct SpeechRequest {
    /// The model to use for speech synthesis
    pub model: SpeechModel,

    /// The text to convert to speech
    #[builder(into)]
    pub input: String,

    /// The voice to use for synthesis
    pub voice: Voice,

    /// The format of the output audio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<AudioFormat>,

    /// The speed of the generated audio (0.25 to 4.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}
