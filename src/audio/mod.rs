//! Raw audio packaging.
//!
//! Speech engines hand back base64 text wrapping little-endian 16-bit mono
//! PCM. This module turns that text into bytes ([`decode_base64`]) and the
//! bytes into a playable WAV file ([`build_wav`]).
//!
//! ```rust
//! use roman_voice::audio::{pcm_base64_to_wav, DEFAULT_SAMPLE_RATE};
//!
//! let wav = pcm_base64_to_wav("AAA=", DEFAULT_SAMPLE_RATE)?;
//! assert_eq!(wav.len(), 46);
//! # Ok::<(), roman_voice::VoiceError>(())
//! ```

pub mod decode;
pub mod wav;

pub use decode::decode_base64;
pub use wav::{build_wav, extract_pcm, WavFile, WAV_HEADER_LEN};

use crate::error::Result;

/// Sample rate of the PCM produced by the Gemini speech models.
pub const DEFAULT_SAMPLE_RATE: u32 = 24000;

/// Decode base64 PCM and wrap it in a WAV container in one step.
pub fn pcm_base64_to_wav(encoded: &str, sample_rate: u32) -> Result<WavFile> {
    let pcm = decode_base64(encoded)?;
    build_wav(&pcm, sample_rate)
}
