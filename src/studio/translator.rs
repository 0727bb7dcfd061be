use crate::engines::gemini::{GeminiEngine, Voice};
use crate::error::{Result, VoiceError};
use crate::http::HttpTransport;
use crate::playback::AudioRegistry;
use crate::request::{RequestState, RequestTracker, Ticket};
use crate::translate::{Language, Translator};

use super::speech::SpeechOutput;

/// Translate-then-speak workflow.
///
/// Holds the source text, the latest translation and the audio generated
/// from it. Any new translation withdraws the previous audio.
#[derive(Debug)]
pub struct TranslatorView {
    pub source_text: String,
    pub source: Language,
    pub target: Language,
    translated_text: String,
    translation: RequestTracker<String>,
    pub speech: SpeechOutput,
}

impl Default for TranslatorView {
    fn default() -> Self {
        Self {
            source_text: String::new(),
            source: Language::English,
            target: Language::Bengali,
            translated_text: String::new(),
            translation: RequestTracker::new(),
            speech: SpeechOutput::new(Voice::Kore),
        }
    }
}

impl TranslatorView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn status(&self) -> &RequestState<String> {
        self.translation.state()
    }

    /// The most recent failure of either step, for display.
    pub fn error(&self) -> Option<&VoiceError> {
        self.translation.state().error().or_else(|| self.speech.error())
    }

    /// Translate the source text. Blank source text is ignored.
    pub fn translate<T: HttpTransport>(&mut self, translator: &Translator<T>) -> &RequestState<String> {
        if self.source_text.trim().is_empty() {
            return self.translation.state();
        }
        let ticket = self.begin_translation();
        let result = translator.translate(&self.source_text, self.source, self.target);
        self.finish_translation(ticket, result);
        self.translation.state()
    }

    /// Mark a translation as started and withdraw any audio.
    pub fn begin_translation(&mut self) -> Ticket {
        let (ticket, _) = self.translation.begin();
        self.speech.reset();
        ticket
    }

    /// Apply a translation outcome unless a newer request superseded it.
    pub fn finish_translation(&mut self, ticket: Ticket, result: Result<String>) -> bool {
        if !self.translation.is_current(ticket) {
            log::debug!("Ignoring superseded translation {}", ticket.generation());
            return false;
        }
        match &result {
            Ok(text) => self.translated_text = text.clone(),
            Err(e) => log::warn!("Translation failed: {e}"),
        }
        self.translation.complete(ticket, result).is_ok()
    }

    /// Speak the current translation. Does nothing until there is one.
    pub fn speak<T: HttpTransport>(
        &mut self,
        engine: &GeminiEngine<T>,
        registry: &AudioRegistry,
    ) -> &RequestState<()> {
        let text = self.translated_text.clone();
        self.speech.speak(engine, registry, &text)
    }

    /// Swap languages and move the translation into the source box.
    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
        std::mem::swap(&mut self.source_text, &mut self.translated_text);
    }

    /// Empty both text boxes and withdraw the audio.
    pub fn clear(&mut self) {
        self.source_text.clear();
        self.translated_text.clear();
        self.translation.reset();
        self.speech.reset();
    }
}
