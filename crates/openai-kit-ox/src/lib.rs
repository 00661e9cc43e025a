//! Convenience OpenAI client for Rust
//!
//! A thin facade over the OpenAI HTTP API with one call per capability:
//! - Chat completions with optional prior history
//! - Image description (vision)
//! - Image generation (DALL-E 2 and DALL-E 3)
//! - Text-to-speech
//! - Audio transcription (Whisper), uploaded as `multipart/form-data`
//!
//! Every call is a single request/response exchange. Failures are returned
//! as [`OpenAIError`] and never retried.
//!
//! # Example
//!
//! ```rust,no_run
//! use openai_kit_ox::{OpenAI, Voice};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAI::new("your-api-key");
//!
//!     let reply = client.chat().prompt("Hello, world!").build().send().await?;
//!     println!("{reply}");
//!
//!     let audio = client
//!         .speech()
//!         .input(reply)
//!         .voice(Voice::Nova)
//!         .build()
//!         .send()
//!         .await?;
//!     println!("{} bytes of audio", audio.len());
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod chat;
pub mod client;
pub mod error;
pub mod images;
pub mod message;
pub mod model;
pub mod request;
pub mod response;
pub mod usage;
pub mod vision;

// Re-export main types
pub use client::{OpenAI, OpenAIConfig};
pub use error::OpenAIError;
pub use message::{ContentPart, ImageDetail, ImageUrl, Message, MessageContent, Role};
pub use model::{ChatModel, ImageModel, SpeechModel};
pub use usage::Usage;

// Re-export request types
pub use request::{ChatRequest, ImageRequest, SpeechRequest};

// Re-export response types
pub use response::{ChatResponse, Choice, ImageData, ImageResponse, ResponseMessage};

// Re-export capability calls
pub use audio::{AudioFormat, Speech, Transcription, Voice};
pub use chat::ChatPrompt;
pub use images::{
    DallE2Image, DallE3Image, ImageQuality, ImageResponseFormat, ImageSize, ImageStyle,
};
pub use vision::VisionPrompt;

pub use bytes::Bytes;
