use std::fmt;

/// Cause of a failure reported by a remote collaborator (translation or
/// speech endpoint).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    /// Credentials were rejected (401/403, or a 400 naming an invalid key).
    Auth,
    /// Quota exhausted or too many requests (429).
    RateLimit,
    /// The service failed internally (5xx).
    Server,
    /// The call succeeded but the expected payload field was absent.
    MissingPayload,
    /// Any other non-success status.
    Other,
}

impl UpstreamKind {
    /// Classify a non-success HTTP status and its body.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => UpstreamKind::Auth,
            400 if body.contains("API_KEY_INVALID") || body.contains("API key not valid") => {
                UpstreamKind::Auth
            }
            429 => UpstreamKind::RateLimit,
            500..=599 => UpstreamKind::Server,
            _ => UpstreamKind::Other,
        }
    }
}

impl fmt::Display for UpstreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UpstreamKind::Auth => "authentication",
            UpstreamKind::RateLimit => "rate limit",
            UpstreamKind::Server => "server",
            UpstreamKind::MissingPayload => "missing payload",
            UpstreamKind::Other => "request",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum VoiceError {
    #[error("Invalid base64 audio payload: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Upstream {kind} error: {message}")]
    Upstream { kind: UpstreamKind, message: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VoiceError {
    pub(crate) fn upstream(kind: UpstreamKind, message: impl Into<String>) -> Self {
        VoiceError::Upstream {
            kind,
            message: message.into(),
        }
    }

    /// The upstream cause, if this error came from a remote collaborator.
    pub fn upstream_kind(&self) -> Option<UpstreamKind> {
        match self {
            VoiceError::Upstream { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Short Bengali text suitable for showing to an end user, in the same
    /// locale as the emotion and style labels.
    ///
    /// Errors are grouped into invalid credentials, rate limiting, server
    /// faults and a generic failure; nothing is retried automatically.
    pub fn user_message(&self) -> &'static str {
        match self {
            VoiceError::Upstream {
                kind: UpstreamKind::Auth,
                ..
            }
            | VoiceError::Config(_) => "API কী অনুপস্থিত বা অবৈধ। আপনার ক্রেডেনশিয়াল যাচাই করুন।",
            VoiceError::Upstream {
                kind: UpstreamKind::RateLimit,
                ..
            } => "অনেক বেশি অনুরোধ পাঠানো হয়েছে। কিছুক্ষণ অপেক্ষা করে আবার চেষ্টা করুন।",
            VoiceError::Upstream {
                kind: UpstreamKind::Server,
                ..
            } => "সার্ভারে সমস্যা হচ্ছে। পরে আবার চেষ্টা করুন।",
            VoiceError::Transport(_) => "সার্ভারের সাথে সংযোগ করা যায়নি। ইন্টারনেট সংযোগ যাচাই করুন।",
            _ => "একটি সমস্যা হয়েছে। আবার চেষ্টা করুন।",
        }
    }
}

impl From<reqwest::Error> for VoiceError {
    fn from(e: reqwest::Error) -> Self {
        VoiceError::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VoiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses() {
        assert_eq!(UpstreamKind::from_status(401, ""), UpstreamKind::Auth);
        assert_eq!(UpstreamKind::from_status(403, ""), UpstreamKind::Auth);
        assert_eq!(
            UpstreamKind::from_status(400, r#"{"error":{"status":"API_KEY_INVALID"}}"#),
            UpstreamKind::Auth
        );
        assert_eq!(UpstreamKind::from_status(400, "bad"), UpstreamKind::Other);
        assert_eq!(UpstreamKind::from_status(429, ""), UpstreamKind::RateLimit);
        assert_eq!(UpstreamKind::from_status(503, ""), UpstreamKind::Server);
    }

    #[test]
    fn user_messages_distinguish_transport_from_upstream() {
        let transport = VoiceError::Transport("connection refused".into());
        let upstream = VoiceError::upstream(UpstreamKind::MissingPayload, "no audio");
        assert_ne!(transport.user_message(), upstream.user_message());
        assert_eq!(transport.upstream_kind(), None);
        assert_eq!(upstream.upstream_kind(), Some(UpstreamKind::MissingPayload));
    }

    #[test]
    fn user_messages_are_bengali() {
        let errors = [
            VoiceError::upstream(UpstreamKind::Auth, "bad key"),
            VoiceError::upstream(UpstreamKind::RateLimit, "slow down"),
            VoiceError::upstream(UpstreamKind::Server, "500"),
            VoiceError::Transport("refused".into()),
            VoiceError::InvalidInput("odd".into()),
        ];
        for err in &errors {
            let msg = err.user_message();
            assert!(
                msg.chars().any(|c| ('\u{0980}'..='\u{09FF}').contains(&c)),
                "{msg}"
            );
        }
        assert_eq!(
            VoiceError::Config("missing".into()).user_message(),
            errors[0].user_message()
        );
    }
}
