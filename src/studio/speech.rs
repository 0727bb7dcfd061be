use crate::audio::{pcm_base64_to_wav, WavFile};
use crate::engines::gemini::{GeminiEngine, GeminiSynthesisParams, Voice};
use crate::error::{Result, VoiceError};
use crate::http::HttpTransport;
use crate::playback::{AudioRegistry, PlaybackSession, ResourceHandle};
use crate::request::{RequestState, RequestTracker, Ticket};

/// Voice settings, synthesis status and playback for one view.
#[derive(Debug)]
pub struct SpeechOutput {
    pub params: GeminiSynthesisParams,
    request: RequestTracker<()>,
    playback: PlaybackSession,
}

impl SpeechOutput {
    pub fn new(voice: Voice) -> Self {
        Self {
            params: GeminiSynthesisParams {
                voice,
                ..Default::default()
            },
            request: RequestTracker::new(),
            playback: PlaybackSession::new(),
        }
    }

    /// Synthesize `text` and, if this is still the latest request, make the
    /// audio playable. Blank text is ignored.
    pub fn speak<T: HttpTransport>(
        &mut self,
        engine: &GeminiEngine<T>,
        registry: &AudioRegistry,
        text: &str,
    ) -> &RequestState<()> {
        if text.trim().is_empty() {
            return self.request.state();
        }
        let ticket = self.begin();
        let outcome = engine
            .generate_speech(text, &self.params)
            .and_then(|audio| pcm_base64_to_wav(&audio.data, audio.sample_rate));
        self.finish(ticket, outcome, registry);
        self.request.state()
    }

    /// Mark a synthesis as started. The previous audio is withdrawn right
    /// away so it cannot be mistaken for the new result.
    pub fn begin(&mut self) -> Ticket {
        let (ticket, _) = self.request.begin();
        self.playback.teardown();
        ticket
    }

    /// Deliver the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` when a newer request has superseded it; the stale
    /// audio is dropped without ever being registered.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        outcome: Result<WavFile>,
        registry: &AudioRegistry,
    ) -> bool {
        if !self.request.is_current(ticket) {
            log::debug!(
                "Ignoring superseded speech result {}",
                ticket.generation()
            );
            return false;
        }
        match outcome {
            Ok(wav) => {
                log::info!("Speech ready: {:.2}s", wav.duration_secs());
                self.playback.replace(registry.create_playable_resource(wav));
                self.request.complete(ticket, Ok(())).is_ok()
            }
            Err(e) => {
                log::warn!("Speech synthesis failed: {e}");
                self.request.complete(ticket, Err(e)).is_ok()
            }
        }
    }

    /// Withdraw the current audio and forget any pending request.
    pub fn reset(&mut self) {
        self.request.reset();
        self.playback.teardown();
    }

    pub fn status(&self) -> &RequestState<()> {
        self.request.state()
    }

    pub fn error(&self) -> Option<&VoiceError> {
        self.request.state().error()
    }

    pub fn audio(&self) -> Option<&ResourceHandle> {
        self.playback.current()
    }

    pub fn playback(&self) -> &PlaybackSession {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackSession {
        &mut self.playback
    }
}
