use crate::engines::gemini::{GeminiEngine, Voice};
use crate::http::HttpTransport;
use crate::playback::AudioRegistry;
use crate::request::RequestState;

use super::speech::SpeechOutput;

/// Direct text-to-speech without a translation step.
#[derive(Debug)]
pub struct StandaloneTts {
    pub text: String,
    pub speech: SpeechOutput,
}

impl Default for StandaloneTts {
    fn default() -> Self {
        Self {
            text: String::new(),
            speech: SpeechOutput::new(Voice::Zephyr),
        }
    }
}

impl StandaloneTts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak<T: HttpTransport>(
        &mut self,
        engine: &GeminiEngine<T>,
        registry: &AudioRegistry,
    ) -> &RequestState<()> {
        self.speech.speak(engine, registry, &self.text)
    }
}
