use std::fmt;
use std::str::FromStr;

use crate::error::VoiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

/// Prebuilt Gemini voices offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Voice {
    Kore,
    Puck,
    Charon,
    Fenrir,
    #[default]
    Zephyr,
}

impl Voice {
    pub const ALL: [Voice; 5] = [
        Voice::Kore,
        Voice::Puck,
        Voice::Charon,
        Voice::Fenrir,
        Voice::Zephyr,
    ];

    /// Name sent as `prebuiltVoiceConfig.voiceName`.
    pub fn api_name(self) -> &'static str {
        match self {
            Voice::Kore => "Kore",
            Voice::Puck => "Puck",
            Voice::Charon => "Charon",
            Voice::Fenrir => "Fenrir",
            Voice::Zephyr => "Zephyr",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Voice::Kore => "Kore (Clear)",
            Voice::Puck => "Puck (Youthful)",
            Voice::Charon => "Charon (Deep)",
            Voice::Fenrir => "Fenrir (Mature)",
            Voice::Zephyr => "Zephyr (Soft)",
        }
    }

    pub fn gender(self) -> Gender {
        match self {
            Voice::Kore | Voice::Zephyr => Gender::Female,
            Voice::Puck | Voice::Charon | Voice::Fenrir => Gender::Male,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Voice::Kore => "Bright and articulate",
            Voice::Puck => "Energetic and clear",
            Voice::Charon => "Authoritative and resonant",
            Voice::Fenrir => "Sophisticated tone",
            Voice::Zephyr => "Gentle and friendly",
        }
    }
}

/// Emotional tone requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Sad,
    Excited,
    Angry,
    Calm,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Excited,
        Emotion::Angry,
        Emotion::Calm,
    ];

    pub fn api_name(self) -> &'static str {
        match self {
            Emotion::Neutral => "Neutral",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Excited => "Excited",
            Emotion::Angry => "Angry",
            Emotion::Calm => "Calm",
        }
    }

    /// Bengali label shown in the interface.
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Neutral => "স্বাভাবিক",
            Emotion::Happy => "খুশি",
            Emotion::Sad => "দুঃখিত",
            Emotion::Excited => "উত্তেজিত",
            Emotion::Angry => "রাগান্বিত",
            Emotion::Calm => "শান্ত",
        }
    }
}

/// Delivery style. A news presenter reading ignores the chosen emotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpeakingStyle {
    #[default]
    Normal,
    NewsPresenter,
}

impl SpeakingStyle {
    pub const ALL: [SpeakingStyle; 2] = [SpeakingStyle::Normal, SpeakingStyle::NewsPresenter];

    pub fn api_name(self) -> &'static str {
        match self {
            SpeakingStyle::Normal => "Normal",
            SpeakingStyle::NewsPresenter => "News Presenter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeakingStyle::Normal => "সাধারণ কথা",
            SpeakingStyle::NewsPresenter => "সংবাদ পাঠক",
        }
    }

    /// Whether the emotion selector has any effect in this style.
    pub fn uses_emotion(self) -> bool {
        self == SpeakingStyle::Normal
    }
}

/// Instruction prepended to the text so the model reads it in character.
pub fn system_instruction(style: SpeakingStyle, emotion: Emotion) -> String {
    match style {
        SpeakingStyle::NewsPresenter => "Read the following text strictly as a professional \
             news anchor/presenter with a formal and authoritative tone."
            .to_string(),
        SpeakingStyle::Normal => format!(
            "Read the following text with a {} emotional tone.",
            emotion.api_name().to_lowercase()
        ),
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! parse_by_api_name {
    ($ty:ident, $what:literal) => {
        impl FromStr for $ty {
            type Err = VoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                $ty::ALL
                    .into_iter()
                    .find(|v| normalize(v.api_name()) == wanted)
                    .ok_or_else(|| {
                        VoiceError::InvalidParameter(format!(concat!("unknown ", $what, " {:?}"), s))
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.api_name())
            }
        }
    };
}

parse_by_api_name!(Voice, "voice");
parse_by_api_name!(Emotion, "emotion");
parse_by_api_name!(SpeakingStyle, "style");
