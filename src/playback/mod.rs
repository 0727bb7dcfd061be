//! Playback and download of synthesized audio.
//!
//! A [`WavFile`](crate::audio::WavFile) becomes playable by registering it in
//! an [`AudioRegistry`], which hands back a [`ResourceHandle`]. Handles must
//! be released when superseded; a [`PlaybackSession`] does this for the one
//! resource a view shows at a time.
//!
//! ```rust
//! use roman_voice::audio::build_wav;
//! use roman_voice::playback::{AudioRegistry, PlaybackSession};
//!
//! let registry = AudioRegistry::new();
//! let mut session = PlaybackSession::new();
//!
//! let wav = build_wav(&[0, 0, 0, 0], 24000)?;
//! session.replace(registry.create_playable_resource(wav));
//! session.set_playback_rate(1.25)?;
//! session.play();
//!
//! session.teardown();
//! assert_eq!(registry.live_count(), 0);
//! # Ok::<(), roman_voice::VoiceError>(())
//! ```

pub mod registry;
pub mod session;

pub use registry::{AudioRegistry, ResourceHandle};
pub use session::{PlayState, PlaybackSession, PlaybackSpeed};

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, VoiceError};

/// File name offered for a download: `roman_voice_<unix millis>.wav`.
pub fn suggested_filename() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("roman_voice_{millis}.wav")
}

/// Save the resource's WAV bytes as `dir/filename`.
///
/// This is a one-shot write. An existing file of the same name is
/// overwritten; choosing a unique name is up to the caller.
pub fn download_as(handle: &ResourceHandle, dir: &Path, filename: &str) -> Result<PathBuf> {
    let name = Path::new(filename);
    if filename.is_empty() || name.file_name() != Some(name.as_os_str()) {
        return Err(VoiceError::InvalidParameter(format!(
            "download name {filename:?} must be a plain file name"
        )));
    }

    let path = dir.join(name);
    std::fs::write(&path, handle.wav().bytes())?;
    log::info!(
        "Saved {} ({} bytes) to {}",
        handle.url(),
        handle.wav().len(),
        path.display()
    );
    Ok(path)
}
