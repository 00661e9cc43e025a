use base64::Engine;
use bon::Builder;
use bytes::Bytes;

use crate::{
    ChatRequest, OpenAI, OpenAIError,
    message::{ContentPart, ImageDetail, Message},
    model::ChatModel,
};

/// Instruction sent alongside the image unless overridden
pub const DEFAULT_VISION_INSTRUCTION: &str = "Describe this image";

/// Output token limit applied unless overridden or disabled
pub const DEFAULT_VISION_MAX_TOKENS: u32 = 300;

/// Ask a vision model to describe an image
#[derive(Debug, Clone, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct VisionPrompt {
    #[builder(field)]
    unlimited_tokens: bool,

    /// Raw image bytes; sent inline as a base64 `data:` URL
    #[builder(into)]
    image: Bytes,

    #[builder(default)]
    detail: ImageDetail,

    /// Output token limit; see [`VisionPromptBuilder::without_token_limit`]
    #[builder(default = DEFAULT_VISION_MAX_TOKENS)]
    max_tokens: u32,

    #[builder(default = ChatModel::Gpt4o, into)]
    model: ChatModel,

    #[builder(default = DEFAULT_VISION_INSTRUCTION.to_string(), into)]
    instruction: String,

    #[builder(default = "image/jpeg".to_string(), into)]
    mime_type: String,

    openai: OpenAI,
}

impl<S: vision_prompt_builder::State> VisionPromptBuilder<S> {
    /// Send no output token limit at all
    pub fn without_token_limit(mut self) -> Self {
        self.unlimited_tokens = true;
        self
    }
}

/// Encode bytes as a base64 `data:` URL
pub fn data_url(mime_type: &str, data: &[u8]) -> String {
    format!(
        "data:{mime_type};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(data)
    )
}

impl VisionPrompt {
    fn effective_max_tokens(&self) -> Option<u32> {
        if self.unlimited_tokens {
            None
        } else {
            Some(self.max_tokens)
        }
    }

    /// Wire request for this prompt
    pub fn to_request(&self) -> ChatRequest {
        let message = Message::user_parts([
            ContentPart::text(self.instruction.clone()),
            ContentPart::image_url(data_url(&self.mime_type, &self.image), Some(self.detail)),
        ]);

        ChatRequest::builder()
            .message(message)
            .model(self.model.clone())
            .maybe_max_tokens(self.effective_max_tokens())
            .build()
    }

    /// Send the image and return the first choice's text
    pub async fn send(self) -> Result<String, OpenAIError> {
        let request = self.to_request();
        self.openai
            .create_chat_completion(&request)
            .await?
            .into_content()
            .ok_or(OpenAIError::NoContent)
    }
}

impl OpenAI {
    /// Start a vision prompt
    pub fn vision(&self) -> VisionPromptBuilder<vision_prompt_builder::SetOpenai> {
        VisionPrompt::builder().openai(self.clone())
    }
}
