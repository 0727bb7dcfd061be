use serde::{Deserialize, Serialize};

use super::voices::Voice;
use crate::audio::DEFAULT_SAMPLE_RATE;
use crate::error::{Result, UpstreamKind, VoiceError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_modalities: [&'static str; 1],
    speech_config: SpeechConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig<'a> {
    voice_config: VoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig<'a> {
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig<'a> {
    voice_name: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// Single-turn audio request for `prompt` spoken by `voice`.
    pub(crate) fn speech(prompt: &'a str, voice: Voice) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.api_name(),
                        },
                    },
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Base64 audio returned by the model, with the sample rate it declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAudio {
    pub data: String,
    pub sample_rate: u32,
}

/// Find the first content part of the first candidate carrying inline audio.
pub(crate) fn extract_inline_audio(body: &str) -> Result<InlineAudio> {
    let resp: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        VoiceError::upstream(
            UpstreamKind::MissingPayload,
            format!("speech response is not valid JSON: {e}"),
        )
    })?;

    if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(VoiceError::upstream(
            UpstreamKind::Other,
            format!("speech request was blocked: {reason}"),
        ));
    }

    let candidate = resp.candidates.into_iter().next();
    let finish_reason = candidate
        .as_ref()
        .and_then(|c| c.finish_reason.clone())
        .unwrap_or_else(|| "none".to_string());

    let inline = candidate
        .and_then(|c| c.content)
        .into_iter()
        .flat_map(|content| content.parts)
        .filter_map(|part| part.inline_data)
        .find(|inline| inline.data.as_deref().is_some_and(|d| !d.is_empty()));

    match inline {
        Some(InlineData {
            mime_type,
            data: Some(data),
        }) => Ok(InlineAudio {
            sample_rate: mime_type
                .as_deref()
                .and_then(sample_rate_from_mime)
                .unwrap_or(DEFAULT_SAMPLE_RATE),
            data,
        }),
        _ => Err(VoiceError::upstream(
            UpstreamKind::MissingPayload,
            format!("speech response contained no inline audio data (finish reason: {finish_reason})"),
        )),
    }
}

/// Describe a non-success response, preferring the API's own message.
pub(crate) fn error_from_status(status: u16, body: &str) -> VoiceError {
    let kind = UpstreamKind::from_status(status, body);
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|env| {
            let status_name = env.error.status.unwrap_or_default();
            let message = env.error.message.unwrap_or_default();
            format!("{status_name} {message}").trim().to_string()
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"));
    VoiceError::upstream(kind, format!("speech service error: {detail}"))
}

/// Parse `rate=NNNN` out of a MIME type such as `audio/L16;codec=pcm;rate=24000`.
fn sample_rate_from_mime(mime: &str) -> Option<u32> {
    mime.split(';')
        .filter_map(|param| param.trim().strip_prefix("rate="))
        .find_map(|rate| rate.trim().parse().ok())
        .filter(|&rate| rate > 0)
}
