use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::{ImageData, ImageRequest, OpenAI, OpenAIError, model::ImageModel};

/// Output image dimensions.
///
/// DALL-E 2 accepts the square sizes; DALL-E 3 accepts 1024x1024 and the
/// two wide/tall variants.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    #[strum(serialize = "256x256")]
    S256x256,

    #[serde(rename = "512x512")]
    #[strum(serialize = "512x512")]
    S512x512,

    #[default]
    #[serde(rename = "1024x1024")]
    #[strum(serialize = "1024x1024")]
    S1024x1024,

    #[serde(rename = "1792x1024")]
    #[strum(serialize = "1792x1024")]
    S1792x1024,

    #[serde(rename = "1024x1792")]
    #[strum(serialize = "1024x1792")]
    S1024x1792,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageQuality {
    #[default]
    Standard,
    Hd,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageStyle {
    #[default]
    Vivid,
    Natural,
}

/// Whether images come back as hosted URLs or inline base64
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ImageResponseFormat {
    #[default]
    Url,
    B64Json,
}

/// Single DALL-E 2 image
#[derive(Debug, Clone, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(name = dalle2_image_builder, vis = "pub"))]
pub struct DallE2Image {
    #[builder(into)]
    prompt: String,

    #[builder(default)]
    size: ImageSize,

    #[builder(default)]
    response_format: ImageResponseFormat,

    openai: OpenAI,
}

/// Single DALL-E 3 image
#[derive(Debug, Clone, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(name = dalle3_image_builder, vis = "pub"))]
pub struct DallE3Image {
    #[builder(into)]
    prompt: String,

    #[builder(default)]
    size: ImageSize,

    #[builder(default)]
    quality: ImageQuality,

    #[builder(default)]
    style: ImageStyle,

    #[builder(default)]
    response_format: ImageResponseFormat,

    openai: OpenAI,
}

impl DallE2Image {
    pub fn to_request(&self) -> ImageRequest {
        ImageRequest::builder()
            .prompt(self.prompt.clone())
            .model(ImageModel::DallE2)
            .n(1)
            .size(self.size)
            .response_format(self.response_format)
            .build()
    }

    /// Generate the image and return it
    pub async fn send(self) -> Result<ImageData, OpenAIError> {
        first_image(&self.openai, &self.to_request()).await
    }
}

impl DallE3Image {
    pub fn to_request(&self) -> ImageRequest {
        ImageRequest::builder()
            .prompt(self.prompt.clone())
            .model(ImageModel::DallE3)
            .n(1)
            .quality(self.quality)
            .size(self.size)
            .style(self.style)
            .response_format(self.response_format)
            .build()
    }

    /// Generate the image and return it
    pub async fn send(self) -> Result<ImageData, OpenAIError> {
        first_image(&self.openai, &self.to_request()).await
    }
}

async fn first_image(openai: &OpenAI, request: &ImageRequest) -> Result<ImageData, OpenAIError> {
    openai
        .create_image(request)
        .await?
        .into_first()
        .ok_or(OpenAIError::EmptyResult)
}

impl OpenAI {
    /// Start a DALL-E 2 image request
    pub fn dalle2_image(&self) -> DallE2ImageBuilder<dalle2_image_builder::SetOpenai> {
        DallE2Image::builder().openai(self.clone())
    }

    /// Start a DALL-E 3 image request
    pub fn dalle3_image(&self) -> DallE3ImageBuilder<dalle3_image_builder::SetOpenai> {
        DallE3Image::builder().openai(self.clone())
    }
}
