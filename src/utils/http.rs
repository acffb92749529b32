// src/utils/http.rs

//! HTTP client utilities.
//!
//! Fetchers talk to the monitoring service through [`HttpTransport`] so the
//! connection pool can be scoped per port worker and swapped out in tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Minimal GET transport.
///
/// A returned `Err` means the request never produced a status line
/// (connect failure, reset, timeout).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse>;
}

/// Builds a fresh transport (and connection pool) per port worker.
pub trait TransportFactory: Send + Sync {
    fn create(&self) -> Result<Arc<dyn HttpTransport>>;
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .pool_max_idle_per_host(config.max_concurrent_details)
        .build()?;
    Ok(client)
}

/// [`HttpTransport`] backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

/// Creates one `reqwest::Client` per call from the crawler settings.
#[derive(Debug, Clone)]
pub struct ReqwestFactory {
    config: CrawlerConfig,
}

impl ReqwestFactory {
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl TransportFactory for ReqwestFactory {
    fn create(&self) -> Result<Arc<dyn HttpTransport>> {
        let client = create_async_client(&self.config)?;
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(client));
        Ok(transport)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory transport for tests.

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::error::AppError;

    /// Scripted reply for a URL.
    #[derive(Debug, Clone)]
    pub enum Reply {
        Status(u16, String),
        Fail,
    }

    /// Answers from a URL → replies script; unknown URLs get 404.
    ///
    /// A script with several replies is consumed in order and its last reply
    /// repeats. Tracks call counts and the peak number of requests in flight.
    #[derive(Default)]
    pub struct FakeTransport {
        script: Mutex<HashMap<String, Vec<Reply>>>,
        calls: Mutex<HashMap<String, usize>>,
        delay: Option<Duration>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_delay(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::default()
            }
        }

        pub fn on(self, url: &str, replies: Vec<Reply>) -> Self {
            self.script
                .lock()
                .unwrap()
                .insert(url.to_string(), replies);
            self
        }

        pub fn ok(self, url: &str, body: &str) -> Self {
            self.on(url, vec![Reply::Status(200, body.to_string())])
        }

        pub fn calls(&self, url: &str) -> usize {
            self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
        }

        pub fn total_calls(&self) -> usize {
            self.calls.lock().unwrap().values().sum()
        }

        pub fn peak_in_flight(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HttpTransport for FakeTransport {
        async fn get(&self, url: &Url) -> Result<HttpResponse> {
            let key = url.as_str().to_string();
            let seen = {
                let mut calls = self.calls.lock().unwrap();
                let count = calls.entry(key.clone()).or_insert(0);
                *count += 1;
                *count
            };

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let reply = {
                let script = self.script.lock().unwrap();
                script
                    .get(&key)
                    .and_then(|replies| replies.get(seen - 1).or(replies.last()).cloned())
            };

            match reply {
                Some(Reply::Status(status, body)) => Ok(HttpResponse { status, body }),
                Some(Reply::Fail) => Err(AppError::transport(key, "connection reset")),
                None => Ok(HttpResponse {
                    status: 404,
                    body: String::new(),
                }),
            }
        }
    }

    /// Hands out the same shared fake to every port worker.
    pub struct SharedFactory(pub Arc<FakeTransport>);

    impl TransportFactory for SharedFactory {
        fn create(&self) -> Result<Arc<dyn HttpTransport>> {
            let transport: Arc<dyn HttpTransport> = self.0.clone();
            Ok(transport)
        }
    }
}
