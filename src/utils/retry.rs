// src/utils/retry.rs

//! Capped exponential backoff for list requests.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;
use crate::utils::http::HttpTransport;

/// Attempt budget and backoff ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            max_backoff: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            max_backoff: Duration::from_secs(config.max_backoff_secs),
        }
    }

    /// Sleep after failed attempt `attempt` (counted from 1): `min(cap, 2^attempt)` seconds.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let secs = 2u64.checked_pow(attempt).unwrap_or(u64::MAX);
        Duration::from_secs(secs).min(self.max_backoff)
    }

    /// GET a JSON document, repeating transient failures.
    ///
    /// Permanent failures return at once. When the budget runs out the last
    /// failure is wrapped in [`AppError::RetriesExhausted`].
    pub async fn get_json(&self, transport: &dyn HttpTransport, url: &Url) -> Result<Value> {
        let mut last = None;

        for attempt in 1..=self.max_attempts {
            let error = match transport.get(url).await {
                Ok(response) if response.is_ok() => {
                    return Ok(serde_json::from_str(&response.body)?);
                }
                Ok(response) => AppError::status(url.as_str(), response.status),
                Err(error) => error,
            };

            if !error.is_retryable() {
                return Err(error);
            }

            log::debug!(
                "Attempt {}/{} for {} failed: {}",
                attempt,
                self.max_attempts,
                url,
                error
            );
            last = Some(error);

            if attempt < self.max_attempts {
                tokio::time::sleep(self.backoff(attempt)).await;
            }
        }

        let last = last.unwrap_or_else(|| AppError::transport(url.as_str(), "no attempt made"));
        Err(AppError::RetriesExhausted {
            url: url.to_string(),
            attempts: self.max_attempts,
            last: Box::new(last),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::http::fake::{FakeTransport, Reply};

    const URL: &str = "https://example.com/list";

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(2), Duration::from_secs(4));
        assert_eq!(policy.backoff(3), Duration::from_secs(8));
        assert_eq!(policy.backoff(4), Duration::from_secs(10));
        assert_eq!(policy.backoff(70), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failures() {
        let transport = FakeTransport::new().on(
            URL,
            vec![
                Reply::Status(503, String::new()),
                Reply::Fail,
                Reply::Status(200, r#"{"data": []}"#.into()),
            ],
        );
        let url = Url::parse(URL).unwrap();

        let value = RetryPolicy::default().get_json(&transport, &url).await.unwrap();
        assert!(value["data"].is_array());
        assert_eq!(transport.calls(URL), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let transport = FakeTransport::new().on(URL, vec![Reply::Status(500, String::new())]);
        let url = Url::parse(URL).unwrap();

        let err = RetryPolicy::default()
            .get_json(&transport, &url)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RetriesExhausted { attempts: 3, .. }));
        assert_eq!(transport.calls(URL), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_status_is_not_retried() {
        let transport = FakeTransport::new().on(URL, vec![Reply::Status(403, String::new())]);
        let url = Url::parse(URL).unwrap();

        let err = RetryPolicy::default()
            .get_json(&transport, &url)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Status { status: 403, .. }));
        assert_eq!(transport.calls(URL), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_is_retried() {
        let transport = FakeTransport::new().on(
            URL,
            vec![
                Reply::Status(429, String::new()),
                Reply::Status(200, "{}".into()),
            ],
        );
        let url = Url::parse(URL).unwrap();

        assert!(RetryPolicy::default().get_json(&transport, &url).await.is_ok());
        assert_eq!(transport.calls(URL), 2);
    }
}
