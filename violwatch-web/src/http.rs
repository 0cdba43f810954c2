// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use violwatch_core::config::EndpointConfig;
use violwatch_core::error::DecodeResultExt;
use violwatch_core::{
    DashboardApi, DashboardError, DetectorStatus, Result, ViolationRecord, ViolationStats,
};

/// [`DashboardApi`] over `fetch`, relative to the page origin.
#[derive(Debug, Clone)]
pub struct HttpApi {
    endpoints: EndpointConfig,
}

impl HttpApi {
    pub fn new(endpoints: EndpointConfig) -> Self {
        Self { endpoints }
    }

    /// Non-2xx counts as a failed request.
    async fn send(request: RequestBuilder, endpoint: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| DashboardError::network(endpoint, e.to_string()))?;
        if !response.ok() {
            return Err(DashboardError::http_status(endpoint, response.status()));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(endpoint: &str) -> Result<T> {
        let response = Self::send(Request::get(endpoint), endpoint).await?;
        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::network(endpoint, e.to_string()))?;
        serde_json::from_str(&body).malformed_at(endpoint)
    }
}

#[async_trait(?Send)]
impl DashboardApi for HttpApi {
    async fn fetch_violations(&self) -> Result<Vec<ViolationRecord>> {
        Self::get_json(&self.endpoints.violations).await
    }

    async fn fetch_stats(&self) -> Result<ViolationStats> {
        Self::get_json(&self.endpoints.stats).await
    }

    async fn fetch_detector_status(&self) -> Result<DetectorStatus> {
        Self::get_json(&self.endpoints.detector_status).await
    }

    async fn toggle_detector(&self) -> Result<()> {
        let endpoint = &self.endpoints.detector_toggle;
        Self::send(Request::post(endpoint), endpoint).await?;
        Ok(())
    }
}
