//! # roman-voice
//!
//! A Rust library for translating text and turning it into playable speech
//! with the Gemini TTS engine.
//!
//! ## Features
//!
//! - **Gemini TTS**: Hosted speech synthesis with five voices, six emotions and a news-presenter style
//! - **Translation**: MyMemory-backed translation between 12 languages
//! - **WAV Packaging**: Byte-exact 16-bit mono WAV containers for raw model PCM
//! - **Resource Lifecycle**: Explicitly released playback handles and one-shot downloads
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! roman-voice = { version = "2026.2", features = ["gemini"] }
//! ```
//!
//! ```ignore
//! use std::path::PathBuf;
//! use roman_voice::{engines::gemini::{GeminiConfig, GeminiEngine}, SynthesisEngine};
//!
//! let mut engine = GeminiEngine::new(GeminiConfig::from_env()?)?;
//!
//! let result = engine.synthesize("Hello, world!", None)?;
//! result.write_wav(&PathBuf::from("output.wav"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod audio;
pub mod engines;
pub mod error;
pub mod http;
pub mod playback;
pub mod request;
#[cfg(feature = "gemini")]
pub mod studio;
pub mod translate;

pub use error::{UpstreamKind, VoiceError};

use std::path::Path;

use audio::{build_wav, WavFile};

/// The result of a synthesis (text-to-speech) operation.
///
/// Contains raw little-endian 16-bit mono PCM and its sample rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    /// Raw PCM bytes, two per sample
    pub pcm: Vec<u8>,
    /// Sample rate of the audio (24000 for Gemini)
    pub sample_rate: u32,
}

impl SynthesisResult {
    /// Wrap the PCM in an in-memory WAV container.
    pub fn to_wav(&self) -> error::Result<WavFile> {
        build_wav(&self.pcm, self.sample_rate)
    }

    /// Write the audio to a 16-bit PCM WAV file.
    pub fn write_wav(&self, path: &Path) -> error::Result<()> {
        let wav = self.to_wav()?;
        std::fs::write(path, wav.bytes())?;
        log::debug!("Wrote {} bytes to {}", wav.len(), path.display());
        Ok(())
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        (self.pcm.len() / 2) as f64 / self.sample_rate as f64
    }
}

/// Common interface for text-to-speech synthesis engines.
///
/// This trait defines the standard operations that all synthesis engines must support.
/// Each engine may have its own parameter type for voice and delivery settings.
pub trait SynthesisEngine {
    /// Parameters for configuring synthesis behavior (voice, emotion, etc.)
    type SynthesisParams: Default;

    /// Synthesize speech from the given text.
    fn synthesize(
        &mut self,
        text: &str,
        params: Option<Self::SynthesisParams>,
    ) -> error::Result<SynthesisResult>;

    /// Synthesize speech from the given text and write to a WAV file.
    ///
    /// Default implementation calls `synthesize()` then `SynthesisResult::write_wav()`.
    fn synthesize_to_file(
        &mut self,
        text: &str,
        wav_path: &Path,
        params: Option<Self::SynthesisParams>,
    ) -> error::Result<()> {
        self.synthesize(text, params)?.write_wav(wav_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_from_pcm_length() {
        let result = SynthesisResult {
            pcm: vec![0; 24000],
            sample_rate: 24000,
        };
        assert!((result.duration_secs() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn write_wav_produces_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let result = SynthesisResult {
            pcm: vec![0x10, 0x00, 0x20, 0x00],
            sample_rate: 24000,
        };
        result.write_wav(&path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 24000);
        let samples: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![16, 32]);
    }

    #[test]
    fn odd_pcm_fails_to_package() {
        let result = SynthesisResult {
            pcm: vec![0; 3],
            sample_rate: 24000,
        };
        assert!(matches!(result.to_wav(), Err(VoiceError::InvalidInput(_))));
    }
}
