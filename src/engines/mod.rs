//! Speech synthesis engines.
//!
//! This module contains implementations of text-to-speech engines.
//!
//! # Available Engines
//!
//! Enable engines via Cargo features:
//! - `gemini` - Gemini hosted TTS (enabled by default, requires an API key)

#[cfg(feature = "gemini")]
pub mod gemini;
