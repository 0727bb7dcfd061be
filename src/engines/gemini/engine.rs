use std::time::Duration;

use derive_builder::Builder;

use crate::audio::decode_base64;
use crate::error::{Result, VoiceError};
use crate::http::{HttpTransport, ReqwestTransport};
use crate::{SynthesisEngine, SynthesisResult};

use super::api::{error_from_status, extract_inline_audio, GenerateContentRequest, InlineAudio};
use super::voices::{system_instruction, Emotion, SpeakingStyle, Voice};

/// Speech model used unless configured otherwise.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Root of the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Connection settings for the Gemini speech endpoint.
#[derive(Clone, Builder)]
#[builder(setter(into))]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`.
    pub api_key: String,
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    pub model: String,
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    pub base_url: String,
    /// Speech generation can take a while for long texts.
    #[builder(default = "Duration::from_secs(60)")]
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Read the key from `GEMINI_API_KEY` (or `API_KEY`) and the model from
    /// `GEMINI_MODEL` when set.
    pub fn from_env() -> Result<Self> {
        let non_blank = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        let api_key = non_blank("GEMINI_API_KEY")
            .or_else(|| non_blank("API_KEY"))
            .ok_or_else(|| VoiceError::Config("GEMINI_API_KEY must be set".to_string()))?;

        let mut builder = GeminiConfigBuilder::default();
        builder.api_key(api_key);
        if let Some(model) = non_blank("GEMINI_MODEL") {
            builder.model(model);
        }
        builder
            .build()
            .map_err(|e| VoiceError::Config(e.to_string()))
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Parameters for a single Gemini synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeminiSynthesisParams {
    pub voice: Voice,
    pub emotion: Emotion,
    pub style: SpeakingStyle,
}

impl GeminiSynthesisParams {
    /// Full prompt: the persona instruction followed by the text to read.
    pub fn prompt(&self, text: &str) -> String {
        format!(
            "{}\n\nText: {text}",
            system_instruction(self.style, self.emotion)
        )
    }
}

/// Gemini text-to-speech engine.
///
/// Sends one `generateContent` request per synthesis and returns the 16-bit
/// mono PCM the model produces.
///
/// ```rust,no_run
/// use roman_voice::{SynthesisEngine, engines::gemini::{GeminiConfig, GeminiEngine}};
/// use std::path::PathBuf;
///
/// let mut engine = GeminiEngine::new(GeminiConfig::from_env()?)?;
/// engine.synthesize_to_file("Hello, world!", &PathBuf::from("hello.wav"), None)?;
/// # Ok::<(), roman_voice::VoiceError>(())
/// ```
pub struct GeminiEngine<T = ReqwestTransport> {
    config: GeminiConfig,
    transport: T,
}

impl GeminiEngine<ReqwestTransport> {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> GeminiEngine<T> {
    pub fn with_transport(config: GeminiConfig, transport: T) -> Self {
        log::info!("Gemini speech engine using model {}", config.model);
        Self { config, transport }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Ask the model to speak `text` and return the base64 audio it sends back.
    pub fn generate_speech(
        &self,
        text: &str,
        params: &GeminiSynthesisParams,
    ) -> Result<InlineAudio> {
        if text.trim().is_empty() {
            return Err(VoiceError::InvalidInput("nothing to speak".to_string()));
        }
        if self.config.api_key.trim().is_empty() {
            return Err(VoiceError::Config("Gemini API key is empty".to_string()));
        }

        let prompt = params.prompt(text);
        let body = serde_json::to_value(GenerateContentRequest::speech(&prompt, params.voice))?;

        log::debug!(
            "Requesting speech: voice={}, emotion={}, style={}",
            params.voice,
            params.emotion,
            params.style
        );
        let resp = self.transport.post_json(
            &self.endpoint(),
            &[("x-goog-api-key", self.config.api_key.as_str())],
            &body,
        )?;

        if !resp.is_success() {
            log::warn!("Gemini speech request failed with status {}", resp.status);
            return Err(error_from_status(resp.status, &resp.body));
        }

        extract_inline_audio(&resp.body)
    }
}

impl<T: HttpTransport> SynthesisEngine for GeminiEngine<T> {
    type SynthesisParams = GeminiSynthesisParams;

    fn synthesize(
        &mut self,
        text: &str,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult> {
        let p = params.unwrap_or_default();
        let audio = self.generate_speech(text, &p)?;
        let pcm = decode_base64(&audio.data)?;
        log::info!(
            "Received {} bytes of PCM at {} Hz",
            pcm.len(),
            audio.sample_rate
        );

        Ok(SynthesisResult {
            pcm,
            sample_rate: audio.sample_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamKind;
    use crate::http::testing::CannedTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config() -> GeminiConfig {
        GeminiConfigBuilder::default()
            .api_key("test-key")
            .build()
            .unwrap()
    }

    fn audio_body(data: &str) -> String {
        json!({
            "candidates": [{ "content": { "parts": [{
                "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": data }
            }]}}]
        })
        .to_string()
    }

    #[test]
    fn builder_defaults() {
        let cfg = config();
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(60));
        assert!(!format!("{cfg:?}").contains("test-key"));
        assert!(GeminiConfigBuilder::default().build().is_err());
    }

    // Only test that touches the process environment.
    #[test]
    fn from_env_skips_blank_values() {
        std::env::set_var("GEMINI_API_KEY", "");
        std::env::set_var("API_KEY", "fallback-key");
        std::env::set_var("GEMINI_MODEL", "gemini-test-tts");
        let cfg = GeminiConfig::from_env().unwrap();
        assert_eq!(cfg.api_key, "fallback-key");
        assert_eq!(cfg.model, "gemini-test-tts");

        std::env::set_var("GEMINI_API_KEY", "primary-key");
        std::env::set_var("GEMINI_MODEL", "  ");
        let cfg = GeminiConfig::from_env().unwrap();
        assert_eq!(cfg.api_key, "primary-key");
        assert_eq!(cfg.model, DEFAULT_MODEL);

        std::env::set_var("GEMINI_API_KEY", " ");
        std::env::remove_var("API_KEY");
        assert!(matches!(
            GeminiConfig::from_env(),
            Err(VoiceError::Config(_))
        ));

        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("GEMINI_MODEL");
    }

    #[test]
    fn prompt_combines_instruction_and_text() {
        let params = GeminiSynthesisParams {
            emotion: Emotion::Sad,
            ..Default::default()
        };
        assert_eq!(
            params.prompt("goodbye"),
            "Read the following text with a sad emotional tone.\n\nText: goodbye"
        );
    }

    #[test]
    fn sends_voice_prompt_and_key() {
        let transport = CannedTransport::new().reply(200, &audio_body("AAA="));
        let mut engine = GeminiEngine::with_transport(config(), &transport);
        let params = GeminiSynthesisParams {
            voice: Voice::Charon,
            emotion: Emotion::Happy,
            style: SpeakingStyle::Normal,
        };

        let result = engine.synthesize("hello", Some(params)).unwrap();
        assert_eq!(result.pcm, vec![0, 0]);
        assert_eq!(result.sample_rate, 24000);

        let requests = transport.requests.borrow();
        let req = &requests[0];
        assert_eq!(req.method, "POST");
        assert_eq!(
            req.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-tts:generateContent"
        );
        assert_eq!(
            req.headers,
            vec![("x-goog-api-key".to_string(), "test-key".to_string())]
        );
        let body = req.body.as_ref().unwrap();
        assert_eq!(
            body["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            "Charon"
        );
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Read the following text with a happy emotional tone.\n\nText: hello"
        );
    }

    #[test]
    fn missing_inline_data_is_upstream_not_transport() {
        let body = json!({ "candidates": [{ "content": { "parts": [{ "text": "sorry" }] } }] });
        let transport = CannedTransport::new()
            .reply(200, &body.to_string())
            .fail("connection reset");
        let mut engine = GeminiEngine::with_transport(config(), &transport);

        let missing = engine.synthesize("hello", None).unwrap_err();
        assert_eq!(missing.upstream_kind(), Some(UpstreamKind::MissingPayload));

        let network = engine.synthesize("hello", None).unwrap_err();
        assert!(matches!(network, VoiceError::Transport(_)));
        assert_ne!(missing.user_message(), network.user_message());
    }

    #[test]
    fn error_status_is_classified() {
        let transport = CannedTransport::new().reply(
            429,
            r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
        );
        let engine = GeminiEngine::with_transport(config(), &transport);
        let err = engine
            .generate_speech("hi", &GeminiSynthesisParams::default())
            .unwrap_err();
        assert_eq!(err.upstream_kind(), Some(UpstreamKind::RateLimit));
    }

    #[test]
    fn malformed_audio_is_decode_error() {
        let transport = CannedTransport::new().reply(200, &audio_body("not*base64"));
        let mut engine = GeminiEngine::with_transport(config(), &transport);
        assert!(matches!(
            engine.synthesize("hello", None).unwrap_err(),
            VoiceError::Decode(_)
        ));
    }

    #[test]
    fn blank_text_is_not_sent() {
        let transport = CannedTransport::new();
        let engine = GeminiEngine::with_transport(config(), &transport);
        assert!(matches!(
            engine.generate_speech("  ", &GeminiSynthesisParams::default()),
            Err(VoiceError::InvalidInput(_))
        ));
        assert!(transport.requests.borrow().is_empty());
    }

    #[test]
    fn synthesize_to_file_writes_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let transport = CannedTransport::new().reply(200, &audio_body("AAABAA=="));
        let mut engine = GeminiEngine::with_transport(config(), &transport);

        engine.synthesize_to_file("hello", &path, None).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 48);
        assert_eq!(crate::audio::extract_pcm(&bytes).unwrap(), vec![0, 0, 1, 0]);
    }
}
