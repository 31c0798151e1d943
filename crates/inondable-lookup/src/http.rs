//! HTTP record source for the Opendatasoft v1 search API.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{LookupError, RecordSource, SearchQuery, SearchResponse};

const SEARCH_PATH: &str = "/api/records/1.0/search/";

/// Queries an open-data portal's record search endpoint.
///
/// One GET per search: no retries, no timeout beyond the client's defaults.
pub struct HttpRecordSource {
    client: reqwest::Client,
    search_url: String,
}

impl HttpRecordSource {
    /// `base_url` should be like `https://data.strasbourg.eu` (a trailing slash is tolerated).
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            search_url: format!("{}{SEARCH_PATH}", base_url.trim_end_matches('/')),
        }
    }

    fn request(&self, query: &SearchQuery<'_>) -> reqwest::RequestBuilder {
        self.client.get(&self.search_url).query(&[
            ("dataset", query.dataset),
            ("q", ""),
            ("geofilter.distance", query.geofilter_distance().as_str()),
        ])
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn search(&self, query: &SearchQuery<'_>) -> Result<SearchResponse, LookupError> {
        info!(url = %self.search_url, dataset = query.dataset, "searching records");

        let resp = self.request(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LookupError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        debug!(dataset = query.dataset, count = parsed.records.len(), "records received");
        Ok(parsed)
    }
}
