use std::fmt;

use super::registry::ResourceHandle;
use crate::error::{Result, VoiceError};

/// Playback speed multipliers offered to the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackSpeed {
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    OneAndAQuarter,
    OneAndAHalf,
    OneAndThreeQuarters,
    Double,
}

impl PlaybackSpeed {
    pub const ALL: [PlaybackSpeed; 7] = [
        PlaybackSpeed::Half,
        PlaybackSpeed::ThreeQuarters,
        PlaybackSpeed::Normal,
        PlaybackSpeed::OneAndAQuarter,
        PlaybackSpeed::OneAndAHalf,
        PlaybackSpeed::OneAndThreeQuarters,
        PlaybackSpeed::Double,
    ];

    pub fn rate(self) -> f32 {
        match self {
            PlaybackSpeed::Half => 0.5,
            PlaybackSpeed::ThreeQuarters => 0.75,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::OneAndAQuarter => 1.25,
            PlaybackSpeed::OneAndAHalf => 1.5,
            PlaybackSpeed::OneAndThreeQuarters => 1.75,
            PlaybackSpeed::Double => 2.0,
        }
    }
}

impl TryFrom<f32> for PlaybackSpeed {
    type Error = VoiceError;

    /// Only the exact listed multipliers are accepted; nothing is clamped.
    fn try_from(rate: f32) -> Result<Self> {
        PlaybackSpeed::ALL
            .into_iter()
            .find(|speed| speed.rate() == rate)
            .ok_or_else(|| {
                VoiceError::InvalidParameter(format!(
                    "playback rate {rate} is not one of 0.5, 0.75, 1, 1.25, 1.5, 1.75, 2"
                ))
            })
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.rate())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// The audio currently offered by one view.
///
/// Holds at most one live resource. Installing a new one releases the old
/// one; the chosen speed carries over to the new audio.
#[derive(Debug, Default)]
pub struct PlaybackSession {
    current: Option<ResourceHandle>,
    speed: PlaybackSpeed,
    state: PlayState,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly synthesized resource, releasing the previous one.
    pub fn replace(&mut self, handle: ResourceHandle) {
        let previous = self.current.replace(handle);
        self.state = PlayState::Stopped;
        if let Some(previous) = previous {
            previous.release();
        }
    }

    /// Drop the current resource, e.g. when the view is cleared or unmounted.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.release();
        }
        self.state = PlayState::Stopped;
    }

    pub fn current(&self) -> Option<&ResourceHandle> {
        self.current.as_ref()
    }

    pub fn set_playback_rate(&mut self, rate: f32) -> Result<()> {
        self.speed = PlaybackSpeed::try_from(rate)?;
        Ok(())
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Start or resume playback. No-op when there is nothing to play.
    pub fn play(&mut self) {
        if self.current.is_some() {
            self.state = PlayState::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
        }
    }

    /// Playback reached the end of the audio.
    pub fn finish(&mut self) {
        self.state = PlayState::Stopped;
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
