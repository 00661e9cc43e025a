//! Live API integration tests
//!
//! These tests require a valid API key and make real API calls.
//! They are ignored by default - run with `cargo test -- --ignored` to execute.

#[cfg(test)]
mod tests {
    use openai_kit_ox::{
        AudioFormat, ChatModel, ImageResponseFormat, ImageSize, Message, OpenAI, OpenAIError,
        Voice,
    };

    fn create_client() -> Result<OpenAI, OpenAIError> {
        dotenv::dotenv().ok();
        OpenAI::from_env()
    }

    #[tokio::test]
    #[ignore = "requires API key and makes live API calls"]
    async fn test_simple_chat() {
        let client = create_client().expect("Failed to create client");

        let reply = client
            .chat()
            .prompt("Say hello in exactly 3 words")
            .model(ChatModel::Gpt4oMini)
            .max_tokens(10)
            .build()
            .send()
            .await
            .expect("Failed to send request");

        assert!(!reply.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires API key and makes live API calls"]
    async fn test_chat_with_history() {
        let client = create_client().expect("Failed to create client");

        let reply = client
            .chat()
            .prompt("What number did I just tell you? Answer with digits only.")
            .model(ChatModel::Gpt4oMini)
            .previous_messages([
                Message::user("Remember the number 42."),
                Message::assistant("Got it."),
            ])
            .build()
            .send()
            .await
            .expect("Failed to send request");

        assert!(reply.contains("42"));
    }

    #[tokio::test]
    #[ignore = "requires API key and makes live API calls"]
    async fn test_image_generation() {
        let client = create_client().expect("Failed to create client");

        let image = client
            .dalle2_image()
            .prompt("A single red circle on a white background")
            .size(ImageSize::S256x256)
            .response_format(ImageResponseFormat::Url)
            .build()
            .send()
            .await
            .expect("Failed to generate image");

        assert!(image.url.is_some());
    }

    #[tokio::test]
    #[ignore = "requires API key and makes live API calls"]
    async fn test_speech_then_transcription() {
        let client = create_client().expect("Failed to create client");

        let audio = client
            .speech()
            .input("The quick brown fox jumps over the lazy dog.")
            .voice(Voice::Echo)
            .format(AudioFormat::Mp3)
            .build()
            .send()
            .await
            .expect("Failed to synthesize speech");
        assert!(!audio.is_empty());

        let text = client
            .transcription()
            .audio(audio)
            .file_name("speech.mp3")
            .language("en")
            .build()
            .send()
            .await
            .expect("Failed to transcribe audio");

        assert!(text.to_lowercase().contains("fox"));
    }

    #[tokio::test]
    #[ignore = "requires API key and makes live API calls"]
    async fn test_invalid_api_key() {
        let client = OpenAI::new("sk-invalid");

        let err = client
            .chat()
            .prompt("Hello")
            .build()
            .send()
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(401));
    }
}
