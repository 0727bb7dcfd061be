//! End-user workflows built from the translator, the speech engine and the
//! playback adapter.
//!
//! [`TranslatorView`] translates text and speaks the translation;
//! [`StandaloneTts`] speaks text as entered. Both keep at most one playable
//! resource alive and ignore results from superseded requests.
//!
//! ```rust,no_run
//! use roman_voice::engines::gemini::{GeminiConfig, GeminiEngine};
//! use roman_voice::playback::{download_as, suggested_filename, AudioRegistry};
//! use roman_voice::studio::TranslatorView;
//! use roman_voice::translate::{Translator, TranslatorConfig};
//! use std::path::Path;
//!
//! let translator = Translator::new(TranslatorConfig::default())?;
//! let engine = GeminiEngine::new(GeminiConfig::from_env()?)?;
//! let registry = AudioRegistry::new();
//!
//! let mut view = TranslatorView::new();
//! view.source_text = "Good morning".to_string();
//! view.translate(&translator);
//! view.speak(&engine, &registry);
//!
//! if let Some(audio) = view.speech.audio() {
//!     download_as(audio, Path::new("."), &suggested_filename())?;
//! }
//! # Ok::<(), roman_voice::VoiceError>(())
//! ```

pub mod speech;
pub mod standalone;
pub mod translator;

pub use speech::SpeechOutput;
pub use standalone::StandaloneTts;
pub use translator::TranslatorView;
