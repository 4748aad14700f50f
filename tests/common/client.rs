//! HTTP client for end-to-end tests
//!
//! Wraps reqwest and provides one method per jobs-server endpoint.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    #[allow(dead_code)]
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // Server
    // ========================================================================

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    // ========================================================================
    // Jobs
    // ========================================================================

    /// POST /v1/jobs
    pub async fn create_job(&self) -> Response {
        self.client
            .post(format!("{}/v1/jobs", self.base_url))
            .send()
            .await
            .expect("Create job request failed")
    }

    /// GET /v1/jobs/{id}
    pub async fn get_job(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/v1/jobs/{}", self.base_url, id))
            .send()
            .await
            .expect("Get job request failed")
    }

    /// GET /v1/greeting?subject=...
    pub async fn get_greeting(&self, subject: &str) -> Response {
        self.client
            .get(format!("{}/v1/greeting", self.base_url))
            .query(&[("subject", subject)])
            .send()
            .await
            .expect("Greeting request failed")
    }

    // ========================================================================
    // Query
    // ========================================================================

    /// POST /v1/query with a raw query object
    pub async fn query(&self, query: Value) -> Response {
        self.client
            .post(format!("{}/v1/query", self.base_url))
            .json(&json!({ "query": query }))
            .send()
            .await
            .expect("Query request failed")
    }

    /// Runs a query and returns its decoded response envelope
    pub async fn query_json(&self, query: Value) -> Value {
        let response = self.query(query).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Query response is not JSON")
    }

    /// Creates a job through the query endpoint and returns its id
    pub async fn query_create_job(&self) -> String {
        let body = self.query_json(json!({ "op": "summaryCreate" })).await;
        body["data"]["id"]
            .as_str()
            .expect("summaryCreate returned no id")
            .to_string()
    }
}
