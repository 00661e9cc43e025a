use bon::Builder;
use bytes::Bytes;
use log::debug;
use ox_transport::{
    Method, MultipartForm, RawRequest, TransportError, bearer_header,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
    multipart::random_boundary,
};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::{
    OpenAI, OpenAIError, SpeechRequest,
    model::{SpeechModel, TRANSCRIPTION_MODEL},
};

/// File name sent with transcription uploads unless overridden
pub const DEFAULT_TRANSCRIPTION_FILE_NAME: &str = "recording.m4a";

/// Synthetic voices available for speech
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

/// Audio output format
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Opus,
    #[default]
    Aac,
    Flac,
}

/// Text-to-speech synthesis
#[derive(Debug, Clone, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct Speech {
    /// The text to convert to speech
    #[builder(into)]
    input: String,

    #[builder(default)]
    model: SpeechModel,

    #[builder(default)]
    voice: Voice,

    #[builder(default)]
    format: AudioFormat,

    /// The speed of the generated audio (0.25 to 4.0)
    speed: Option<f32>,

    openai: OpenAI,
}

impl Speech {
    pub fn to_request(&self) -> SpeechRequest {
        SpeechRequest::builder()
            .model(self.model)
            .input(self.input.clone())
            .voice(self.voice)
            .response_format(self.format)
            .maybe_speed(self.speed)
            .build()
    }

    /// Synthesize the input and return the whole audio payload
    pub async fn send(self) -> Result<Bytes, OpenAIError> {
        self.openai.create_speech(&self.to_request()).await
    }
}

/// Audio transcription upload.
///
/// Sent as a hand-built `multipart/form-data` body over the raw transport
/// path, with a fresh boundary per call and the client's upload timeout.
#[derive(Debug, Clone, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct Transcription {
    /// Raw audio bytes
    #[builder(into)]
    audio: Bytes,

    /// File name reported to the API; its extension picks the part's MIME type
    #[builder(default = DEFAULT_TRANSCRIPTION_FILE_NAME.to_string(), into)]
    file_name: String,

    /// ISO-639-1 language of the audio
    #[builder(into)]
    language: Option<String>,

    /// Text to guide the model's style or continue a previous segment
    #[builder(into)]
    prompt: Option<String>,

    openai: OpenAI,
}

impl Transcription {
    /// Multipart form with a fresh random boundary
    pub fn to_form(&self) -> MultipartForm {
        self.to_form_with_boundary(random_boundary())
    }

    /// Multipart form: file, model, response format, then optional fields
    pub fn to_form_with_boundary(&self, boundary: impl Into<String>) -> MultipartForm {
        let content_type = mime_guess::from_path(&self.file_name).first_or_octet_stream();

        let form = MultipartForm::with_boundary(boundary)
            .file(
                "file",
                self.file_name.clone(),
                self.audio.clone(),
                content_type.essence_str(),
            )
            .text("model", TRANSCRIPTION_MODEL)
            .text("response_format", "text");

        let form = if let Some(ref language) = self.language {
            form.text("language", language)
        } else {
            form
        };

        if let Some(ref prompt) = self.prompt {
            form.text("prompt", prompt)
        } else {
            form
        }
    }

    /// Upload the audio and return the transcript text
    pub async fn send(self) -> Result<String, OpenAIError> {
        let form = self.to_form();
        let transport = self.openai.transport();

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer_header(self.openai.api_key())?);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(&form.content_type())
                .map_err(|e| TransportError::InvalidHeader(format!("content-type: {e}")))?,
        );

        let request = RawRequest::builder()
            .method(Method::POST)
            .url(transport.url_for("audio/transcriptions"))
            .headers(headers)
            .body(form.encode())
            .timeout(self.openai.upload_timeout())
            .build();

        debug!(
            "uploading {} ({} bytes) for transcription",
            self.file_name,
            self.audio.len()
        );
        let response = transport.send_raw(request).await?;

        if response.status != 200 {
            return Err(OpenAIError::InvalidStatusCode {
                code: response.status,
            });
        }

        String::from_utf8(response.body.to_vec()).map_err(OpenAIError::InvalidEncoding)
    }
}

impl OpenAI {
    /// Start a text-to-speech request
    pub fn speech(&self) -> SpeechBuilder<speech_builder::SetOpenai> {
        Speech::builder().openai(self.clone())
    }

    /// Start a transcription upload
    pub fn transcription(&self) -> TranscriptionBuilder<transcription_builder::SetOpenai> {
        Transcription::builder().openai(self.clone())
    }
}
