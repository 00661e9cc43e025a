use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Chat completion models
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChatModel {
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt3_5Turbo,

    #[serde(rename = "gpt-4")]
    Gpt4,

    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,

    #[serde(rename = "gpt-4o")]
    Gpt4o,

    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,

    /// Custom model (for models not in this enum)
    #[serde(untagged)]
    Custom(String),
}

impl ChatModel {
    /// Get the string representation of the model
    pub fn as_str(&self) -> &str {
        match self {
            ChatModel::Gpt3_5Turbo => "gpt-3.5-turbo",
            ChatModel::Gpt4 => "gpt-4",
            ChatModel::Gpt4Turbo => "gpt-4-turbo",
            ChatModel::Gpt4o => "gpt-4o",
            ChatModel::Gpt4oMini => "gpt-4o-mini",
            ChatModel::Custom(s) => s,
        }
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ChatModel {
    fn from(s: String) -> Self {
        match s.as_str() {
            "gpt-3.5-turbo" => ChatModel::Gpt3_5Turbo,
            "gpt-4" => ChatModel::Gpt4,
            "gpt-4-turbo" => ChatModel::Gpt4Turbo,
            "gpt-4o" => ChatModel::Gpt4o,
            "gpt-4o-mini" => ChatModel::Gpt4oMini,
            _ => ChatModel::Custom(s),
        }
    }
}

impl From<&str> for ChatModel {
    fn from(s: &str) -> Self {
        ChatModel::from(s.to_string())
    }
}

/// Image generation models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
pub enum ImageModel {
    #[serde(rename = "dall-e-2")]
    #[strum(serialize = "dall-e-2")]
    DallE2,

    #[serde(rename = "dall-e-3")]
    #[strum(serialize = "dall-e-3")]
    DallE3,
}

/// Text-to-speech models
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum SpeechModel {
    #[default]
    #[serde(rename = "tts-1")]
    #[strum(serialize = "tts-1")]
    Tts1,

    #[serde(rename = "tts-1-hd")]
    #[strum(serialize = "tts-1-hd")]
    Tts1Hd,
}

/// Speech-to-text model used for transcriptions
pub const TRANSCRIPTION_MODEL: &str = "whisper-1";
