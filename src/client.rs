// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Delivery of card payloads to a Feishu incoming webhook.
//!
//! A single POST is made per card. Feishu reports failures in the response
//! body rather than the HTTP status, so the body is always decoded and its
//! `code` inspected.

use serde::Deserialize;
use tracing::{debug, error, info};

use crate::{card::WebhookPayload, error::Error};

/// Response envelope returned by the incoming webhook.
#[derive(Debug, Clone, Deserialize)]
struct WebhookResponse {
    /// `0` on success.
    #[serde(default)]
    code: Option<i64>,
    /// Human readable status.
    #[serde(default)]
    msg:  Option<String>
}

/// Client bound to one incoming webhook URL.
#[derive(Debug, Clone)]
pub struct FeishuClient {
    http:        reqwest::Client,
    webhook_url: String
}

impl FeishuClient {
    /// Creates a client for the given webhook URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the URL is blank.
    pub fn new(webhook_url: impl Into<String>) -> Result<Self, Error> {
        Self::with_http(reqwest::Client::new(), webhook_url)
    }

    /// Creates a client reusing an existing [`reqwest::Client`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the URL is blank.
    pub fn with_http(http: reqwest::Client, webhook_url: impl Into<String>) -> Result<Self, Error> {
        let webhook_url = webhook_url.into();
        if webhook_url.trim().is_empty() {
            return Err(Error::config("Feishu webhook URL must not be empty"));
        }

        Ok(Self {
            http,
            webhook_url
        })
    }

    /// Posts the payload once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the request cannot be sent or the
    /// body cannot be read. Returns [`Error::Delivery`] when the body is not a
    /// webhook response, or the response `code` is absent or non-zero.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use feishu_notifier::{CardDocument, Color, FeishuClient, WebhookPayload};
    ///
    /// # async fn example() -> Result<(), feishu_notifier::Error> {
    /// let client = FeishuClient::new("https://open.feishu.cn/open-apis/bot/v2/hook/token",)?;
    /// let card = CardDocument::new("[o/r] Hello", Color::Blue, Vec::new(),);
    /// client.send_card(&WebhookPayload::interactive(card,),).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_card(&self, payload: &WebhookPayload) -> Result<(), Error> {
        debug!("Posting card '{}' to Feishu", payload.card.title());

        let response = self
            .http
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let decoded: WebhookResponse = serde_json::from_str(&body).map_err(|_| {
            error!("Feishu returned an unexpected response (HTTP {}): {}", status, body);
            Error::delivery(format!("unexpected response (HTTP {status}): {body}"))
        })?;

        match decoded.code {
            Some(0) => {
                info!("Feishu card delivered: {}", payload.card.title());
                Ok(())
            }
            code => {
                error!("Feishu rejected the card: {}", body);
                let code = code.map_or_else(|| "none".to_owned(), |value| value.to_string());
                let msg = decoded.msg.unwrap_or_default();
                Err(Error::delivery(format!("Feishu API returned code {code}: {msg}")))
            }
        }
    }
}
