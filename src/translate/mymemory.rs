use std::time::Duration;

use derive_builder::Builder;
use serde::Deserialize;

use super::languages::Language;
use crate::error::{Result, UpstreamKind, VoiceError};
use crate::http::{HttpTransport, ReqwestTransport};

/// Public MyMemory lookup endpoint.
pub const MYMEMORY_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Settings for the translation client.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), default)]
pub struct TranslatorConfig {
    /// Full URL of the `get` endpoint.
    pub endpoint: String,
    /// Overall request timeout.
    pub timeout: Duration,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: MYMEMORY_ENDPOINT.to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
    #[serde(rename = "responseStatus")]
    response_status: Option<serde_json::Value>,
    #[serde(rename = "responseDetails")]
    response_details: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// Client for the MyMemory translation service.
pub struct Translator<T = ReqwestTransport> {
    config: TranslatorConfig,
    transport: T,
}

impl Translator<ReqwestTransport> {
    /// Create a translator that talks to the network.
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> Translator<T> {
    pub fn with_transport(config: TranslatorConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate `text` from one language to another.
    ///
    /// Blank input returns an empty string without contacting the service.
    pub fn translate(&self, text: &str, from: Language, to: Language) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        if from == to {
            return Err(VoiceError::InvalidParameter(format!(
                "source and target language are both {from}"
            )));
        }

        let langpair = Language::pair(from, to);
        log::debug!("Translating {} chars ({langpair})", text.chars().count());
        let resp = self
            .transport
            .get(&self.config.endpoint, &[("q", text), ("langpair", langpair.as_str())])?;

        if !resp.is_success() {
            let kind = UpstreamKind::from_status(resp.status, &resp.body);
            log::warn!("Translation request failed with status {}", resp.status);
            return Err(VoiceError::upstream(
                kind,
                format!("translation service returned HTTP {}", resp.status),
            ));
        }

        parse_lookup(&resp.body)
    }
}

/// Pull `responseData.translatedText` out of a lookup response body.
fn parse_lookup(body: &str) -> Result<String> {
    let parsed: LookupResponse = serde_json::from_str(body).map_err(|e| {
        VoiceError::upstream(
            UpstreamKind::MissingPayload,
            format!("translation response is not valid JSON: {e}"),
        )
    })?;

    if let Some(status) = parsed.response_status.as_ref().and_then(status_code) {
        if !(200..300).contains(&status) {
            let details = parsed.response_details.unwrap_or_default();
            return Err(VoiceError::upstream(
                UpstreamKind::from_status(status, &details),
                format!("translation failed ({status}): {details}"),
            ));
        }
    }

    parsed
        .response_data
        .and_then(|data| data.translated_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| {
            VoiceError::upstream(
                UpstreamKind::MissingPayload,
                "translation response has no responseData.translatedText",
            )
        })
}

// The service reports its status as either a number or a numeric string.
fn status_code(value: &serde_json::Value) -> Option<u16> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::CannedTransport;
    use pretty_assertions::assert_eq;

    fn translator(transport: &CannedTransport) -> Translator<&CannedTransport> {
        Translator::with_transport(TranslatorConfig::default(), transport)
    }

    #[test]
    fn returns_translated_text() {
        let transport = CannedTransport::new().reply(
            200,
            r#"{"responseData":{"translatedText":"হ্যালো"},"responseStatus":200}"#,
        );
        let out = translator(&transport)
            .translate("hello", Language::English, Language::Bengali)
            .unwrap();
        assert_eq!(out, "হ্যালো");

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url, MYMEMORY_ENDPOINT);
        assert_eq!(
            requests[0].query,
            vec![
                ("q".to_string(), "hello".to_string()),
                ("langpair".to_string(), "en|bn".to_string()),
            ]
        );
    }

    #[test]
    fn missing_translated_text_is_upstream_error() {
        let transport = CannedTransport::new().reply(200, r#"{"responseData":{}}"#);
        let err = translator(&transport)
            .translate("hello", Language::English, Language::Bengali)
            .unwrap_err();
        assert_eq!(err.upstream_kind(), Some(UpstreamKind::MissingPayload));
    }

    #[test]
    fn missing_response_data_is_upstream_error() {
        let transport = CannedTransport::new().reply(200, r#"{"matches":[]}"#);
        let err = translator(&transport)
            .translate("hello", Language::English, Language::French)
            .unwrap_err();
        assert!(matches!(err, VoiceError::Upstream { .. }));
    }

    #[test]
    fn blank_text_skips_request() {
        let transport = CannedTransport::new();
        let out = translator(&transport)
            .translate("   \n", Language::English, Language::Bengali)
            .unwrap();
        assert_eq!(out, "");
        assert!(transport.requests.borrow().is_empty());
    }

    #[test]
    fn http_status_is_classified() {
        let transport = CannedTransport::new()
            .reply(429, "slow down")
            .reply(503, "unavailable");
        let t = translator(&transport);
        assert_eq!(
            t.translate("a", Language::English, Language::Hindi)
                .unwrap_err()
                .upstream_kind(),
            Some(UpstreamKind::RateLimit)
        );
        assert_eq!(
            t.translate("a", Language::English, Language::Hindi)
                .unwrap_err()
                .upstream_kind(),
            Some(UpstreamKind::Server)
        );
    }

    #[test]
    fn quota_reported_in_body_status() {
        let transport = CannedTransport::new().reply(
            200,
            r#"{"responseData":{"translatedText":"MYMEMORY WARNING"},"responseStatus":"429","responseDetails":"quota"}"#,
        );
        let err = translator(&transport)
            .translate("a", Language::English, Language::German)
            .unwrap_err();
        assert_eq!(err.upstream_kind(), Some(UpstreamKind::RateLimit));
    }

    #[test]
    fn transport_failure_stays_transport() {
        let transport = CannedTransport::new().fail("connection reset");
        let err = translator(&transport)
            .translate("a", Language::English, Language::German)
            .unwrap_err();
        assert!(matches!(err, VoiceError::Transport(_)));
    }

    #[test]
    fn same_language_is_rejected() {
        let transport = CannedTransport::new();
        let err = translator(&transport)
            .translate("a", Language::Bengali, Language::Bengali)
            .unwrap_err();
        assert!(matches!(err, VoiceError::InvalidParameter(_)));
    }

    #[test]
    fn builder_overrides_endpoint() {
        let config = TranslatorConfigBuilder::default()
            .endpoint("http://localhost:9/get")
            .build()
            .unwrap();
        assert_eq!(config.endpoint, "http://localhost:9/get");
        assert_eq!(config.timeout, Duration::from_secs(20));
    }
}
