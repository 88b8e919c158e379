// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Runtime configuration for a single notifier invocation.
//!
//! Inputs arrive from command-line flags and the GitHub Actions environment.
//! They are resolved into [`Settings`] eagerly so that a bad event type or a
//! missing webhook is reported before the event file is touched.

use std::{fmt, path::PathBuf, str::FromStr};

use crate::error::Error;

/// Environment variable holding the Feishu incoming webhook URL.
pub const WEBHOOK_ENV: &str = "FEISHU_WEBHOOK";
/// Environment variable GitHub Actions sets to the event payload path.
pub const EVENT_PATH_ENV: &str = "GITHUB_EVENT_PATH";

/// GitHub webhook event kinds the notifier knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash,)]
pub enum EventKind
{
    /// `pull_request` deliveries.
    PullRequest,
    /// `pull_request_review` deliveries.
    PullRequestReview,
    /// `pull_request_review_comment` deliveries.
    PullRequestReviewComment,
    /// `issues` deliveries.
    Issues,
    /// `issue_comment` deliveries.
    IssueComment,
    /// `release` deliveries.
    Release,
}

impl EventKind
{
    /// Every supported kind in declaration order.
    pub const ALL: [Self; 6] = [
        Self::PullRequest,
        Self::PullRequestReview,
        Self::PullRequestReviewComment,
        Self::Issues,
        Self::IssueComment,
        Self::Release,
    ];

    /// Returns the GitHub event name for this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use feishu_notifier::EventKind;
    ///
    /// assert_eq!(EventKind::IssueComment.as_str(), "issue_comment");
    /// ```
    pub const fn as_str(self,) -> &'static str
    {
        match self {
            Self::PullRequest => "pull_request",
            Self::PullRequestReview => "pull_request_review",
            Self::PullRequestReviewComment => "pull_request_review_comment",
            Self::Issues => "issues",
            Self::IssueComment => "issue_comment",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for EventKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(self.as_str(),)
    }
}

impl FromStr for EventKind
{
    type Err = Error;

    fn from_str(value: &str,) -> Result<Self, Self::Err,>
    {
        let trimmed = value.trim();
        Self::ALL.into_iter().find(|kind| kind.as_str() == trimmed,).ok_or_else(|| {
            Error::UnknownEventType {
                value: value.to_owned(),
            }
        },)
    }
}

/// Where the rendered card should go.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum Delivery
{
    /// POST the card to the Feishu incoming webhook.
    Webhook
    {
        /// Incoming webhook URL.
        url: String,
    },
    /// Write the payload to stdout without contacting Feishu.
    DryRun
    {
        /// Pretty-print the JSON.
        pretty: bool,
    },
}

/// Unvalidated inputs as collected from flags and the environment.
#[derive(Debug, Clone, Default,)]
pub struct RawSettings
{
    /// Value of `--event-type`.
    pub event_type:  Option<String,>,
    /// Value of `--webhook-url` or `FEISHU_WEBHOOK`.
    pub webhook_url: Option<String,>,
    /// Value of `--event-path` or `GITHUB_EVENT_PATH`.
    pub event_path:  Option<PathBuf,>,
    /// Whether `--dry-run` was passed.
    pub dry_run:     bool,
    /// Whether `--pretty` was passed.
    pub pretty:      bool,
}

/// Validated configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Settings
{
    /// Event kind selecting the normalizer and card builder.
    pub event_kind: EventKind,
    /// Location of the webhook payload JSON.
    pub event_path: PathBuf,
    /// Delivery target for the rendered card.
    pub delivery:   Delivery,
}

impl Settings
{
    /// Validates raw inputs in the order event type, webhook, event path.
    ///
    /// Blank values count as absent. The webhook URL is only required when
    /// the card is actually delivered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for absent inputs and
    /// [`Error::UnknownEventType`] for an unsupported discriminator.
    pub fn resolve(raw: RawSettings,) -> Result<Self, Error,>
    {
        let event_type = non_blank(raw.event_type,)
            .ok_or_else(|| Error::config("missing required --event-type <KIND> argument",),)?;
        let event_kind = event_type.parse::<EventKind,>()?;

        let delivery = if raw.dry_run {
            Delivery::DryRun {
                pretty: raw.pretty,
            }
        } else {
            let url = non_blank(raw.webhook_url,).ok_or_else(|| {
                Error::config(format!("{WEBHOOK_ENV} environment variable is not set"),)
            },)?;
            Delivery::Webhook {
                url,
            }
        };

        let event_path = raw
            .event_path
            .filter(|path| !path.as_os_str().is_empty(),)
            .ok_or_else(|| {
                Error::config(format!("{EVENT_PATH_ENV} environment variable is not set"),)
            },)?;

        Ok(Self {
            event_kind,
            event_path,
            delivery,
        },)
    }
}

fn non_blank(value: Option<String,>,) -> Option<String,>
{
    value.map(|raw| raw.trim().to_owned(),).filter(|trimmed| !trimmed.is_empty(),)
}
