use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use validator_core::{Candidate, ValidationStatus};
use validator_logging::validator_info;

use crate::types::StoreError;

/// Production record store endpoint.
pub const AIRTABLE_ENDPOINT: &str = "https://api.airtable.com";
/// Table holding game submissions.
pub const PROJECTS_TABLE: &str = "projects";
/// View listing submissions awaiting validation.
pub const VALIDATION_VIEW: &str = "viwTShFXBXjhP4w9s";

const STORE_TIMEOUT: Duration = Duration::from_secs(30);

/// Read/write access to the external submission records.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the records that still need validation.
    async fn list_candidates(&self) -> Result<Vec<Candidate>, StoreError>;

    /// Writes the status field of one record.
    async fn update_status(
        &self,
        record_id: &str,
        status: ValidationStatus,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Deserialize)]
struct RecordPage {
    records: Vec<RawRecord>,
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    id: String,
    #[serde(default)]
    fields: RecordFields,
}

#[derive(Debug, Default, Deserialize)]
struct RecordFields {
    gameplay_url: Option<String>,
    ysws_status: Option<String>,
}

/// Airtable-backed record store.
///
/// Reads the validation view of the projects table and patches single
/// status fields. Credentials are taken as given; validating their presence
/// is the configuration layer's job.
pub struct AirtableStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    base_id: String,
}

impl AirtableStore {
    /// Client against the production endpoint.
    pub fn new(api_key: &str, base_id: &str) -> Result<Self, StoreError> {
        Self::with_endpoint(AIRTABLE_ENDPOINT, api_key, base_id)
    }

    /// Client against an explicit endpoint, for tests.
    pub fn with_endpoint(endpoint: &str, api_key: &str, base_id: &str) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(STORE_TIMEOUT)
            .build()
            .map_err(|err| StoreError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            base_id: base_id.to_string(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/v0/{}/{}", self.endpoint, self.base_id, PROJECTS_TABLE)
    }
}

#[async_trait::async_trait]
impl RecordStore for AirtableStore {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, StoreError> {
        let mut candidates = Vec::new();
        let mut offset: Option<String> = None;

        // The store pages its listings; follow the offset cursor until done.
        loop {
            let mut request = self
                .client
                .get(self.table_url())
                .bearer_auth(&self.api_key)
                .query(&[("view", VALIDATION_VIEW)]);
            if let Some(cursor) = offset.as_deref() {
                request = request.query(&[("offset", cursor)]);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(StoreError::HttpStatus(status.as_u16()));
            }

            let page: RecordPage = response
                .json()
                .await
                .map_err(|err| StoreError::Payload(err.to_string()))?;

            for record in page.records {
                if let Some(candidate) = Candidate::from_fields(
                    &record.id,
                    record.fields.gameplay_url.as_deref(),
                    record.fields.ysws_status.as_deref(),
                ) {
                    candidates.push(candidate);
                }
            }

            match page.offset {
                Some(cursor) => offset = Some(cursor),
                None => break,
            }
        }

        validator_info!("Found {} projects to validate", candidates.len());
        Ok(candidates)
    }

    async fn update_status(
        &self,
        record_id: &str,
        status: ValidationStatus,
    ) -> Result<(), StoreError> {
        let url = format!("{}/{}", self.table_url(), record_id);
        let body = json!({ "fields": { "ysws_status": status.as_str() } });

        let response = self
            .client
            .patch(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let http = response.status();
        if !http.is_success() {
            return Err(StoreError::HttpStatus(http.as_u16()));
        }

        validator_info!("Updated record {} to status: {}", record_id, status);
        Ok(())
    }
}
