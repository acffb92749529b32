// src/services/detail.rs

//! PKK detail fetcher.

use std::sync::Arc;

use url::Url;

use crate::error::Result;
use crate::utils::endpoint;
use crate::utils::http::HttpTransport;

const DETAIL_PATH: &str = "monitoring/detail";

/// Fetches the raw detail page of one record. Single attempt, no retry.
pub struct DetailFetcher {
    transport: Arc<dyn HttpTransport>,
    detail_url: Url,
}

impl DetailFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: &str) -> Result<Self> {
        Ok(Self {
            transport,
            detail_url: endpoint(base_url, DETAIL_PATH)?,
        })
    }

    /// Detail URL for `identifier`.
    pub fn url_for(&self, identifier: &str) -> Url {
        let mut url = self.detail_url.clone();
        url.query_pairs_mut().append_pair("nomor_pkk", identifier);
        url
    }

    /// The page body on HTTP 200; `None` on any other status or a transport
    /// failure.
    pub async fn fetch(&self, identifier: &str) -> Option<String> {
        let url = self.url_for(identifier);
        match self.transport.get(&url).await {
            Ok(response) if response.is_ok() => Some(response.body),
            Ok(response) => {
                log::debug!("Detail {} answered HTTP {}", identifier, response.status);
                None
            }
            Err(error) => {
                log::debug!("Detail {} failed: {}", identifier, error);
                None
            }
        }
    }
}
