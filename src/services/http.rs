// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared response handling for the enrichment HTTP clients.

use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

/// Send a request and parse a JSON body, mapping every failure through `err`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    err: fn(String) -> AppError,
) -> Result<T> {
    let response = request.send().await.map_err(|e| err(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("Enrichment service rate limit hit (429)");
            return Err(err(RATE_LIMITED.to_string()));
        }

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(err(BAD_KEY.to_string()));
        }

        return Err(err(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| err(format!("JSON parse error: {}", e)))
}

pub(crate) const RATE_LIMITED: &str = "Rate limit exceeded, try again later";
pub(crate) const BAD_KEY: &str = "API key rejected";
