use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use scraper::{Html, Selector};
use validator_core::Playability;
use validator_logging::{validator_info, validator_warn};

use crate::decode::decode_html;
use crate::types::{CheckError, CheckFailure};

/// CSS class itch.io puts on the frame embedding a browser-playable build.
const GAME_FRAME_SELECTOR: &str = ".game_frame";

/// Identifying client header sent with every probe.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; GameValidator/1.0)";

#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
        }
    }
}

/// Decides whether a submitted URL points at a browser-playable game.
#[async_trait::async_trait]
pub trait PlayabilityChecker: Send + Sync {
    async fn check(&self, url: &str) -> Result<Playability, CheckError>;
}

/// Production checker: fetches the page and probes it for the game frame
/// marker.
#[derive(Debug, Clone)]
pub struct ItchChecker {
    settings: CheckSettings,
}

impl ItchChecker {
    pub fn new(settings: CheckSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, CheckError> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(self.settings.redirect_limit))
            .build()
            .map_err(|err| CheckError::new(CheckFailure::Network, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    async fn read_capped(&self, response: reqwest::Response) -> Result<Vec<u8>, CheckError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(CheckError::new(
                    CheckFailure::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(CheckError::new(
                    CheckFailure::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl PlayabilityChecker for ItchChecker {
    async fn check(&self, url: &str) -> Result<Playability, CheckError> {
        if url.trim().is_empty() {
            return Err(CheckError::new(CheckFailure::EmptyUrl, "no url to check"));
        }

        let parsed = reqwest::Url::parse(url)
            .map_err(|err| CheckError::new(CheckFailure::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            validator_warn!("HTTP {} for {}", status.as_u16(), url);
            return Err(CheckError::new(
                CheckFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(CheckError::new(
                    CheckFailure::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let bytes = self.read_capped(response).await?;
        let html = decode_html(&bytes, content_type.as_deref())
            .map_err(|err| CheckError::new(CheckFailure::DecodeFailure, err.to_string()))?;

        let playable = if has_game_frame(&html) {
            Playability::Playable
        } else {
            Playability::NotPlayable
        };
        validator_info!(
            "URL {} - playable: {}",
            url,
            playable == Playability::Playable
        );
        Ok(playable)
    }
}

/// True when at least one element carries the game frame class.
fn has_game_frame(html: &str) -> bool {
    let doc = Html::parse_document(html);
    match Selector::parse(GAME_FRAME_SELECTOR) {
        Ok(selector) => doc.select(&selector).next().is_some(),
        Err(_) => false,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> CheckError {
    if err.is_timeout() {
        return CheckError::new(CheckFailure::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return CheckError::new(CheckFailure::RedirectLimitExceeded, err.to_string());
    }
    CheckError::new(CheckFailure::Network, err.to_string())
}
