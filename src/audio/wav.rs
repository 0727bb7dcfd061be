use std::io::Cursor;
use std::sync::Arc;

use crate::error::{Result, VoiceError};

/// Size of the canonical PCM WAV header written by [`build_wav`].
pub const WAV_HEADER_LEN: usize = 44;

/// Mono output only.
pub const NUM_CHANNELS: u16 = 1;

/// Signed 16-bit linear PCM.
pub const BITS_PER_SAMPLE: u16 = 16;

const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;
const PCM_FORMAT_TAG: u16 = 1;

/// A complete, immutable WAV file held in memory.
///
/// The bytes are reference counted so the same file can back a playback
/// resource and a download at once without copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavFile {
    bytes: Arc<[u8]>,
    sample_rate: u32,
}

impl WavFile {
    pub const MIME_TYPE: &'static str = "audio/wav";

    /// The full file: header followed by PCM data.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The PCM payload after the header.
    pub fn pcm(&self) -> &[u8] {
        &self.bytes[WAV_HEADER_LEN..]
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pcm().is_empty()
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        let frames = self.pcm().len() / (BYTES_PER_SAMPLE as usize * NUM_CHANNELS as usize);
        frames as f64 / self.sample_rate as f64
    }
}

/// Wrap little-endian 16-bit mono PCM in a RIFF/WAVE container.
///
/// The PCM bytes are appended verbatim after a 44-byte header. Fails with
/// [`VoiceError::InvalidInput`] when the buffer holds a partial sample, the
/// sample rate is zero, or the data is too large for a 32-bit RIFF size.
pub fn build_wav(pcm: &[u8], sample_rate: u32) -> Result<WavFile> {
    if pcm.len() % BYTES_PER_SAMPLE as usize != 0 {
        return Err(VoiceError::InvalidInput(format!(
            "PCM buffer length {} is not a multiple of {BYTES_PER_SAMPLE}",
            pcm.len()
        )));
    }
    if sample_rate == 0 {
        return Err(VoiceError::InvalidInput(
            "sample rate must be positive".to_string(),
        ));
    }

    let data_len = u32::try_from(pcm.len())
        .ok()
        .filter(|len| len.checked_add(36).is_some())
        .ok_or_else(|| {
            VoiceError::InvalidInput(format!(
                "PCM buffer of {} bytes does not fit in a WAV container",
                pcm.len()
            ))
        })?;

    let block_align = NUM_CHANNELS * BYTES_PER_SAMPLE;
    let byte_rate = sample_rate
        .checked_mul(block_align as u32)
        .ok_or_else(|| VoiceError::InvalidInput(format!("sample rate {sample_rate} too high")))?;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT_TAG.to_le_bytes());
    out.extend_from_slice(&NUM_CHANNELS.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm);

    debug_assert_eq!(out.len(), WAV_HEADER_LEN + pcm.len());

    Ok(WavFile {
        bytes: out.into(),
        sample_rate,
    })
}

/// Read the PCM payload back out of a 16-bit mono WAV file.
///
/// Parsing goes through `hound`, so this also checks that a container is
/// readable by an independent decoder.
pub fn extract_pcm(wav: &[u8]) -> Result<Vec<u8>> {
    let reader = hound::WavReader::new(Cursor::new(wav))?;
    let spec = reader.spec();
    if spec.channels != NUM_CHANNELS
        || spec.bits_per_sample != BITS_PER_SAMPLE
        || spec.sample_format != hound::SampleFormat::Int
    {
        return Err(VoiceError::InvalidInput(format!(
            "expected 16-bit mono PCM, got {} channel(s) at {} bits ({:?})",
            spec.channels, spec.bits_per_sample, spec.sample_format
        )));
    }

    let mut pcm = Vec::with_capacity(reader.len() as usize * BYTES_PER_SAMPLE as usize);
    for sample in reader.into_samples::<i16>() {
        pcm.extend_from_slice(&sample?.to_le_bytes());
    }
    Ok(pcm)
}
