// src/services/list.rs

//! PKK list fetcher.
//!
//! Asks the monitoring service which clearance records exist for one
//! (port, period, direction) unit.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::models::FetchUnit;
use crate::utils::endpoint;
use crate::utils::http::HttpTransport;
use crate::utils::retry::RetryPolicy;

/// JSON field holding a record identifier.
const IDENTIFIER_FIELD: &str = "nomor_pkk";

/// Fetches record identifiers per [`FetchUnit`], with retry.
pub struct ListFetcher {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    policy: RetryPolicy,
}

impl ListFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: &str, policy: RetryPolicy) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
            policy,
        }
    }

    /// Identifiers listed for `unit`, in response order.
    ///
    /// Transient failures are retried per the policy; a permanent failure or
    /// an exhausted budget is returned to the caller.
    pub async fn fetch(&self, unit: &FetchUnit) -> Result<Vec<String>> {
        let url = endpoint(&self.base_url, &unit.list_path())?;
        let payload = self.policy.get_json(self.transport.as_ref(), &url).await?;
        Ok(Self::identifiers(&payload))
    }

    /// Non-empty `nomor_pkk` strings from the payload's `data` array.
    /// Entries without one are dropped.
    pub fn identifiers(payload: &Value) -> Vec<String> {
        payload
            .get("data")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get(IDENTIFIER_FIELD))
                    .filter_map(Value::as_str)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
