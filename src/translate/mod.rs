//! Text translation through the MyMemory service.
//!
//! ```rust,no_run
//! use roman_voice::translate::{Language, Translator, TranslatorConfig};
//!
//! let translator = Translator::new(TranslatorConfig::default())?;
//! let bengali = translator.translate("hello", Language::English, Language::Bengali)?;
//! println!("{bengali}");
//! # Ok::<(), roman_voice::VoiceError>(())
//! ```

pub mod languages;
pub mod mymemory;

pub use languages::Language;
pub use mymemory::{Translator, TranslatorConfig, TranslatorConfigBuilder, MYMEMORY_ENDPOINT};
