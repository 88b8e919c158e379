//! Deliver GitHub webhook events to Feishu (Lark) groups as interactive cards.
//!
//! The library splits the work into a pure core and a thin delivery shell.
//! [`normalize`] projects a raw webhook payload onto a typed [`InfoRecord`],
//! [`build_card`] turns that record into a [`CardDocument`], and
//! [`FeishuClient`] posts the result to an incoming webhook. The core never
//! performs I/O or logging so it can be exercised deterministically.

mod builder;
mod card;
mod client;
mod config;
mod error;
mod event;
mod normalizer;

pub use builder::{
    BUTTON_LABEL, build_card, build_comment_card, build_issue_card, build_pull_request_card,
    build_release_card, build_review_card, render_body, should_skip,
};
pub use card::{
    Behavior, ButtonKind, CardBody, CardDocument, CardElement, CardHeader, Color, Icon, IconToken,
    MessageType, SchemaVersion, Text, WebhookPayload,
};
pub use client::FeishuClient;
pub use config::{Delivery, EVENT_PATH_ENV, EventKind, RawSettings, Settings, WEBHOOK_ENV};
pub use error::{Error, io_error, serialize_error};
pub use event::{
    ActorRef, BranchRef, CommentInfo, InfoRecord, IssueAction, IssueInfo, ItemState, ParentKind,
    PullRequestAction, PullRequestInfo, ReleaseInfo, ReviewInfo, ReviewState,
};
pub use normalizer::{load_event, normalize, parse_event};
