//! Blocking HTTP adapter for the admin chart endpoints.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::api::{ChartRequest, ChartTransport, HttpMethod, TransportResponse};
use crate::error::{ChartError, ChartResult};

pub struct HttpChartTransport {
    client: Client,
    base_url: String,
}

impl HttpChartTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ChartResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChartError::Transport(format!("http client error: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

impl ChartTransport for HttpChartTransport {
    fn send(&mut self, request: &ChartRequest) -> ChartResult<TransportResponse> {
        let url = self.url(&request.path);
        debug!(method = request.method.as_str(), %url, "sending chart request");
        let builder = match request.method {
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
        };
        let response = builder
            .header(CONTENT_TYPE, "application/json")
            .body(request.body.clone())
            .send()
            .map_err(|e| ChartError::Transport(format!("chart request error: {e}")))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ChartError::Transport(format!("chart response read error: {e}")))?;
        Ok(TransportResponse { status, body })
    }
}
