use bon::Builder;
use log::debug;

use crate::{ChatRequest, Message, OpenAI, OpenAIError, model::ChatModel};

/// Priming text sent ahead of every conversation unless overridden
pub const DEFAULT_ASSISTANT_PROMPT: &str = "You are a helpful assistant";

/// A single chat prompt with optional prior history.
///
/// The request is assembled as `[priming] + history + [prompt]` and the text
/// of the first choice is returned.
///
/// ```rust,no_run
/// # use openai_kit_ox::OpenAI;
/// # async fn run() -> Result<(), openai_kit_ox::OpenAIError> {
/// let client = OpenAI::new("your-api-key");
/// let reply = client.chat().prompt("Say hello").build().send().await?;
/// println!("{reply}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct ChatPrompt {
    /// Earlier turns of the conversation, oldest first
    #[builder(field)]
    previous_messages: Vec<Message>,

    #[builder(into)]
    prompt: String,

    #[builder(default = ChatModel::Gpt4, into)]
    model: ChatModel,

    #[builder(default = DEFAULT_ASSISTANT_PROMPT.to_string(), into)]
    assistant_prompt: String,

    max_tokens: Option<u32>,

    temperature: Option<f32>,

    openai: OpenAI,
}

impl<S: chat_prompt_builder::State> ChatPromptBuilder<S> {
    /// Append one message to the prior history
    pub fn previous_message(mut self, message: Message) -> Self {
        self.previous_messages.push(message);
        self
    }

    /// Append prior history, keeping its order
    pub fn previous_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.previous_messages.extend(messages);
        self
    }
}

impl ChatPrompt {
    /// Wire request for this prompt
    pub fn to_request(&self) -> ChatRequest {
        ChatRequest::builder()
            .message(Message::assistant(self.assistant_prompt.clone()))
            .messages(self.previous_messages.iter().cloned())
            .message(Message::user(self.prompt.clone()))
            .model(self.model.clone())
            .maybe_max_tokens(self.max_tokens)
            .maybe_temperature(self.temperature)
            .build()
    }

    /// Send the prompt and return the first choice's text
    pub async fn send(self) -> Result<String, OpenAIError> {
        let request = self.to_request();
        debug!(
            "chat completion with {} messages on {}",
            request.messages.len(),
            request.model
        );

        self.openai
            .create_chat_completion(&request)
            .await?
            .into_content()
            .ok_or(OpenAIError::NoContent)
    }
}

impl OpenAI {
    /// Start a chat prompt
    pub fn chat(&self) -> ChatPromptBuilder<chat_prompt_builder::SetOpenai> {
        ChatPrompt::builder().openai(self.clone())
    }
}
