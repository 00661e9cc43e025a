use std::{fmt, time::Duration};

use bon::Builder;
use bytes::Bytes;
use ox_transport::{BearerAuth, Endpoint, OperationOutput, Transport};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    ChatRequest, ChatResponse, ImageRequest, ImageResponse, OpenAIError, SpeechRequest,
};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Timeout applied to multipart uploads
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings used to construct an [`OpenAI`] client
#[derive(Clone, Builder)]
pub struct OpenAIConfig {
    /// API key for authentication
    #[builder(into)]
    pub api_key: String,

    /// Base URL for the API (allows for custom endpoints)
    #[builder(default = DEFAULT_BASE_URL.to_string(), into)]
    pub base_url: String,

    /// Timeout for the raw multipart upload path
    #[builder(default = DEFAULT_UPLOAD_TIMEOUT)]
    pub upload_timeout: Duration,

    /// HTTP client for making requests
    #[builder(default)]
    pub http_client: reqwest::Client,
}

impl fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("upload_timeout", &self.upload_timeout)
            .finish_non_exhaustive()
    }
}

/// OpenAI API client.
///
/// Holds the API key and a transport whose interceptor adds the bearer
/// token to every typed call. Neither changes after construction, so a
/// client can be cloned and used from many tasks at once.
#[derive(Clone)]
pub struct OpenAI {
    api_key: String,
    transport: Transport,
    upload_timeout: Duration,
}

impl fmt::Debug for OpenAI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAI")
            .field("api_key", &"<redacted>")
            .field("transport", &self.transport)
            .field("upload_timeout", &self.upload_timeout)
            .finish()
    }
}

impl OpenAI {
    /// Create a new OpenAI client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(OpenAIConfig::builder().api_key(api_key).build())
    }

    /// Create a client from explicit settings
    pub fn from_config(config: OpenAIConfig) -> Self {
        let transport = Transport::new(config.http_client, config.base_url)
            .with_interceptor(BearerAuth::new(config.api_key.clone()));

        Self {
            api_key: config.api_key,
            transport,
            upload_timeout: config.upload_timeout,
        }
    }

    /// Create a new OpenAI client from environment variables.
    ///
    /// Reads `OPENAI_API_KEY` and, when present, `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self, OpenAIError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(OpenAIError::MissingApiKey)?;
        let base_url = std::env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|url| !url.is_empty());

        Ok(Self::from_config(
            OpenAIConfig::builder()
                .api_key(api_key)
                .maybe_base_url(base_url)
                .build(),
        ))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn upload_timeout(&self) -> Duration {
        self.upload_timeout
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Run a JSON operation and unwrap its documented response
    async fn call<B, T>(&self, endpoint: &Endpoint, body: &B) -> Result<T, OpenAIError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match self.transport.execute_json(endpoint, body).await? {
            OperationOutput::Ok(value) => Ok(value),
            OperationOutput::Undocumented {
                status_code,
                payload,
            } => Err(OpenAIError::unexpected(status_code, &payload)),
        }
    }

    /// Send a chat completion request
    pub async fn create_chat_completion(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatResponse, OpenAIError> {
        let endpoint = Endpoint::post("createChatCompletion", "chat/completions");
        self.call(&endpoint, request).await
    }

    /// Generate images
    pub async fn create_image(&self, request: &ImageRequest) -> Result<ImageResponse, OpenAIError> {
        let endpoint = Endpoint::post("createImage", "images/generations");
        self.call(&endpoint, request).await
    }

    /// Synthesize speech, returning the complete audio payload
    pub async fn create_speech(&self, request: &SpeechRequest) -> Result<Bytes, OpenAIError> {
        let endpoint = Endpoint::post("createSpeech", "audio/speech");
        match self.transport.execute_binary(&endpoint, request).await? {
            OperationOutput::Ok(audio) => Ok(audio),
            OperationOutput::Undocumented {
                status_code,
                payload,
            } => Err(OpenAIError::unexpected(status_code, &payload)),
        }
    }
}
