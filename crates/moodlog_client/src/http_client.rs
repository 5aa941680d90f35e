//! HTTP client implementation for the mood-journal backend.
//!
//! This module provides a reqwest-based implementation of the
//! [`MoodlogClient`](crate::MoodlogClient) trait.

use crate::retry::RetryPolicy;
use crate::{DateRange, EmotionRecord, MoodlogClient, MoodlogError, TrackInfo};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// Header the backend reads the bearer access token from.
pub const AUTH_HEADER: &str = "authorization-access";

/// Supplier of the current bearer credential.
///
/// The credential is an injected capability rather than ambient global
/// state, so the client can be constructed against a fixed token in tests
/// or against a session store in an application.
pub trait CredentialProvider: Send + Sync + 'static {
    fn bearer_token(&self) -> Option<SecretString>;
}

/// A credential that never changes for the lifetime of the client.
pub struct StaticCredential(SecretString);

impl StaticCredential {
    pub fn new(token: SecretString) -> Self {
        Self(token)
    }
}

impl CredentialProvider for StaticCredential {
    fn bearer_token(&self) -> Option<SecretString> {
        Some(self.0.clone())
    }
}

/// Client for the mood-journal backend using reqwest.
#[derive(Clone)]
pub struct ReqwestMoodlogClient {
    base_url: String,
    music_base_url: String,
    credentials: Arc<dyn CredentialProvider>,
    retry: RetryPolicy,
    client: reqwest::Client,
}

impl ReqwestMoodlogClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the diary backend (e.g., "http://localhost:8080")
    /// * `music_base_url` - The base URL of the music recommendation service
    /// * `credentials` - Supplier of the bearer access token
    pub fn new(
        base_url: &str,
        music_base_url: &str,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            music_base_url: music_base_url.trim_end_matches('/').to_string(),
            credentials,
            retry: RetryPolicy::default(),
            client,
        }
    }

    /// Build a client from a [`Config`](crate::config::Config) with a fixed token.
    pub fn from_config(cfg: crate::config::Config) -> Self {
        Self::new(
            &cfg.base_url,
            &cfg.music_base_url,
            Arc::new(StaticCredential::new(cfg.access_token)),
        )
    }

    /// Override the retry policy used for idempotent GET requests.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Resolve the current bearer token, failing fast when no session exists.
    fn bearer(&self) -> Result<SecretString, MoodlogError> {
        self.credentials
            .bearer_token()
            .ok_or_else(|| MoodlogError::Auth("no access token available".into()))
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> Result<reqwest::RequestBuilder, MoodlogError> {
        let token = self.bearer()?;
        Ok(self
            .client
            .get(url)
            .header(AUTH_HEADER, format!("Bearer {}", token.expose_secret())))
    }

    /// Build an authenticated POST request.
    fn post_request(&self, url: &str) -> Result<reqwest::RequestBuilder, MoodlogError> {
        let token = self.bearer()?;
        Ok(self
            .client
            .post(url)
            .header(AUTH_HEADER, format!("Bearer {}", token.expose_secret())))
    }

    /// Build an authenticated PUT request.
    fn put_request(&self, url: &str) -> Result<reqwest::RequestBuilder, MoodlogError> {
        let token = self.bearer()?;
        Ok(self
            .client
            .put(url)
            .header(AUTH_HEADER, format!("Bearer {}", token.expose_secret())))
    }

    /// Execute a request with no expected response body.
    async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), MoodlogError> {
        metrics::counter!("moodlog_client_requests_total").increment(1);
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(())
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> MoodlogError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        metrics::counter!("moodlog_client_request_failures_total").increment(1);

        match status {
            404 => MoodlogError::NotFound(body_snippet),
            401 | 403 => MoodlogError::Auth(body_snippet),
            422 => MoodlogError::InvalidInput(body_snippet),
            _ => MoodlogError::Status(status, body_snippet),
        }
    }

    /// Whether an error is worth another attempt: transport failures and
    /// server-side 5xx only. Decode failures are not transport failures.
    fn is_retryable(err: &MoodlogError) -> bool {
        match err {
            MoodlogError::Http(e) => !e.is_decode(),
            MoodlogError::Status(status, _) => *status >= 500,
            _ => false,
        }
    }

    async fn fetch_emotion_statistics(
        &self,
        range: DateRange,
    ) -> Result<Vec<EmotionRecord>, MoodlogError> {
        let url = format!("{}/statistic/emotion", self.base_url);
        let pairs = range.query_pairs();
        let qp: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();

        metrics::counter!("moodlog_client_requests_total").increment(1);
        tracing::debug!(start = %range.start, end = %range.end, "fetching emotion statistics");

        let resp = self.get_request(&url)?.query(&qp).send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }

        // Read the body as text first so a shape mismatch surfaces as a
        // malformed-record error with a snippet instead of a bare decode
        // failure. A record missing any of the seven categories fails here.
        let text = resp.text().await?;
        let records: Vec<EmotionRecord> = serde_json::from_str(&text).map_err(|e| {
            let body_snippet: String = text.chars().take(512).collect();
            MoodlogError::MalformedRecord(format!(
                "decoding emotion records: {} - body: {}",
                e, body_snippet
            ))
        })?;

        for record in &records {
            record.scores.validate().map_err(|e| match e {
                MoodlogError::MalformedRecord(msg) => {
                    MoodlogError::MalformedRecord(format!("{}: {}", record.date, msg))
                }
                other => other,
            })?;
        }
        Ok(records)
    }
}

#[async_trait]
impl MoodlogClient for ReqwestMoodlogClient {
    async fn get_emotion_statistics(
        &self,
        range: DateRange,
    ) -> Result<Vec<EmotionRecord>, MoodlogError> {
        self.retry
            .retry_async_if(
                || self.fetch_emotion_statistics(range),
                Self::is_retryable,
            )
            .await
    }

    async fn get_track_info(&self, track_id: &str) -> Result<TrackInfo, MoodlogError> {
        // The music service wraps its payload in a status envelope and is
        // called without the diary backend's bearer header.
        #[derive(serde::Deserialize)]
        struct TrackEnvelope {
            status_code: u16,
            response: Option<TrackInfo>,
        }

        let url = format!("{}/spotify/track/{}", self.music_base_url, track_id);
        let fetch = || async {
            metrics::counter!("moodlog_client_requests_total").increment(1);
            let resp = self.client.get(&url).send().await?;
            if !resp.status().is_success() {
                return Err(self.error_from_response(resp).await);
            }
            let envelope: TrackEnvelope = resp.json().await?;
            match envelope.status_code {
                200 => envelope.response.ok_or_else(|| {
                    MoodlogError::MalformedRecord("track envelope missing response".into())
                }),
                204 => Err(MoodlogError::Auth(
                    "music service could not obtain a provider token".into(),
                )),
                404 => Err(MoodlogError::NotFound(format!("track {}", track_id))),
                other => Err(MoodlogError::Status(
                    other,
                    "music service returned a failure envelope".into(),
                )),
            }
        };
        self.retry.retry_async_if(fetch, Self::is_retryable).await
    }

    async fn set_track_liked(
        &self,
        social_id: &str,
        track_id: &str,
        liked: bool,
    ) -> Result<(), MoodlogError> {
        let url = format!("{}/music/likes", self.base_url);
        let body = serde_json::json!({
            "socialId": social_id,
            "spotify": track_id,
            "like": liked,
        });
        self.execute_empty(self.put_request(&url)?.json(&body)).await
    }

    async fn logout(&self) -> Result<(), MoodlogError> {
        let url = format!("{}/token/logout", self.base_url);
        self.execute_empty(self.post_request(&url)?).await
    }
}
