use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use roman_voice::{
    engines::gemini::{Emotion, GeminiConfig, GeminiEngine, SpeakingStyle, Voice},
    playback::{download_as, suggested_filename, AudioRegistry},
    request::RequestState,
    studio::{StandaloneTts, TranslatorView},
    translate::{Language, Translator, TranslatorConfig},
};

#[derive(Parser)]
#[command(about = "Translate text and synthesize it with Gemini voices")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate text, optionally speaking the result
    Translate {
        #[arg(long, default_value = "en")]
        from: Language,
        #[arg(long, default_value = "bn")]
        to: Language,
        /// Also synthesize the translation into DIR
        #[arg(long, value_name = "DIR")]
        speak_to: Option<PathBuf>,
        #[arg(long, default_value = "Kore")]
        voice: Voice,
        text: String,
    },
    /// Speak text directly
    Speak {
        #[arg(long, default_value = "Zephyr")]
        voice: Voice,
        #[arg(long, default_value = "Neutral")]
        emotion: Emotion,
        #[arg(long, default_value = "Normal")]
        style: SpeakingStyle,
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Playback speed the listener picked (only reported)
        #[arg(long, default_value_t = 1.0)]
        speed: f32,
        text: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let registry = AudioRegistry::new();

    match cli.command {
        Command::Translate {
            from,
            to,
            speak_to,
            voice,
            text,
        } => {
            let translator = Translator::new(TranslatorConfig::default())?;
            let mut view = TranslatorView::new();
            view.source = from;
            view.target = to;
            view.source_text = text;

            if let RequestState::Failed(e) = view.translate(&translator) {
                eprintln!("{}", e.user_message());
                return Err(e.to_string().into());
            }
            println!("{}", view.translated_text());

            if let Some(dir) = speak_to {
                let engine = GeminiEngine::new(GeminiConfig::from_env()?)?;
                view.speech.params.voice = voice;
                let start = Instant::now();
                if let RequestState::Failed(e) = view.speak(&engine, &registry) {
                    eprintln!("{}", e.user_message());
                    return Err(e.to_string().into());
                }
                if let Some(audio) = view.speech.audio() {
                    let path = download_as(audio, &dir, &suggested_filename())?;
                    println!(
                        "Saved {:.2}s of audio to {} in {:.2?}",
                        audio.wav().duration_secs(),
                        path.display(),
                        start.elapsed()
                    );
                }
            }
        }
        Command::Speak {
            voice,
            emotion,
            style,
            out,
            speed,
            text,
        } => {
            let engine = GeminiEngine::new(GeminiConfig::from_env()?)?;
            let mut tts = StandaloneTts::new();
            tts.text = text;
            tts.speech.params.voice = voice;
            tts.speech.params.emotion = emotion;
            tts.speech.params.style = style;
            tts.speech.playback_mut().set_playback_rate(speed)?;

            let start = Instant::now();
            if let RequestState::Failed(e) = tts.speak(&engine, &registry) {
                eprintln!("{}", e.user_message());
                return Err(e.to_string().into());
            }
            if let Some(audio) = tts.speech.audio() {
                let path = download_as(audio, &out, &suggested_filename())?;
                println!(
                    "Synthesized {:.2}s in {:.2?} (playback at {}), saved to {}",
                    audio.wav().duration_secs(),
                    start.elapsed(),
                    tts.speech.playback().speed(),
                    path.display()
                );
            }
        }
    }

    Ok(())
}
