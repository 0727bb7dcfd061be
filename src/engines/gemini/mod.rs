//! Gemini text-to-speech engine implementation.
//!
//! This module drives the hosted Gemini speech models through the
//! `generateContent` endpoint. The model answers with base64-encoded,
//! little-endian 16-bit mono PCM (24 kHz unless the returned MIME type says
//! otherwise), which the engine decodes into a [`SynthesisResult`](crate::SynthesisResult).
//!
//! # Configuration
//!
//! An API key is required. [`GeminiConfig::from_env`] reads it from
//! `GEMINI_API_KEY` (or `API_KEY`); the model can be overridden with
//! `GEMINI_MODEL`.
//!
//! # Voices and Delivery
//!
//! | Voice | Label | Gender |
//! |---|---|---|
//! | `Kore` | Clear | female |
//! | `Puck` | Youthful | male |
//! | `Charon` | Deep | male |
//! | `Fenrir` | Mature | male |
//! | `Zephyr` | Soft | female |
//!
//! Emotions (`Neutral`, `Happy`, `Sad`, `Excited`, `Angry`, `Calm`) and the
//! speaking style (`Normal`, `News Presenter`) are turned into an instruction
//! placed in front of the text. The news presenter style overrides the
//! emotion.
//!
//! # Examples
//!
//! ```rust,no_run
//! use roman_voice::SynthesisEngine;
//! use roman_voice::engines::gemini::{
//!     Emotion, GeminiConfig, GeminiEngine, GeminiSynthesisParams, SpeakingStyle, Voice,
//! };
//!
//! let mut engine = GeminiEngine::new(GeminiConfig::from_env()?)?;
//! let params = GeminiSynthesisParams {
//!     voice: Voice::Kore,
//!     emotion: Emotion::Calm,
//!     style: SpeakingStyle::Normal,
//! };
//!
//! let result = engine.synthesize("Hello from Kore!", Some(params))?;
//! println!("{:.2}s of audio at {}Hz", result.duration_secs(), result.sample_rate);
//! # Ok::<(), roman_voice::VoiceError>(())
//! ```

pub mod api;
pub mod engine;
pub mod voices;

pub use api::InlineAudio;
pub use engine::{
    GeminiConfig, GeminiConfigBuilder, GeminiEngine, GeminiSynthesisParams, DEFAULT_BASE_URL,
    DEFAULT_MODEL,
};
pub use voices::{system_instruction, Emotion, Gender, SpeakingStyle, Voice};
