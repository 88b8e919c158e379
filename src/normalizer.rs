// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Projection of raw webhook payloads onto typed info records.
//!
//! The payload is kept as an untyped [`serde_json::Value`] and each event
//! kind reads exactly the fields it needs through JSON pointers. Any absent
//! field is reported as [`Error::MissingField`] with the pointer that failed,
//! except textual bodies which default to an empty string.

use std::{fs, path::Path};

use serde_json::Value;

use crate::{
    config::EventKind,
    error::{self, Error},
    event::{
        ActorRef, BranchRef, CommentInfo, InfoRecord, IssueAction, IssueInfo, ItemState,
        ParentKind, PullRequestAction, PullRequestInfo, ReleaseInfo, ReviewInfo, ReviewState,
    },
};

/// Loads the webhook payload from the provided file path.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and [`Error::Parse`]
/// when its contents are not valid JSON.
pub fn load_event(path: &Path,) -> Result<Value, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_event(&contents,)
}

/// Parses a webhook payload from an in-memory JSON document.
///
/// # Errors
///
/// Propagates [`Error::Parse`] when the document is not valid JSON.
pub fn parse_event(contents: &str,) -> Result<Value, Error,>
{
    Ok(serde_json::from_str(contents,)?,)
}

/// Projects a payload onto the record shape selected by `kind`.
///
/// Both `issue_comment` and `pull_request_review_comment` produce
/// [`InfoRecord::Comment`].
///
/// # Errors
///
/// Returns [`Error::MissingField`] when a required field is absent, `null`,
/// or of the wrong JSON type.
///
/// # Examples
///
/// ```
/// use feishu_notifier::{EventKind, InfoRecord, normalize};
/// use serde_json::json;
///
/// let payload = json!({
///     "action": "published",
///     "repository": { "full_name": "o/r" },
///     "release": {
///         "prerelease": false,
///         "tag_name": "v1.0.0",
///         "name": "First",
///         "body": null,
///         "html_url": "https://github.com/o/r/releases/v1.0.0",
///         "created_at": "2025-01-01T00:00:00Z",
///         "published_at": "2025-01-01T00:00:00Z"
///     },
///     "sender": { "login": "octocat", "html_url": "https://github.com/octocat" }
/// });
/// let record = normalize(EventKind::Release, &payload,)?;
/// assert!(matches!(record, InfoRecord::Release(ref info) if info.body.is_empty()));
/// # Ok::<(), feishu_notifier::Error>(())
/// ```
pub fn normalize(kind: EventKind, payload: &Value,) -> Result<InfoRecord, Error,>
{
    match kind {
        EventKind::PullRequest => pull_request(payload,).map(InfoRecord::PullRequest,),
        EventKind::PullRequestReview => review(payload,).map(InfoRecord::Review,),
        EventKind::PullRequestReviewComment => review_comment(payload,).map(InfoRecord::Comment,),
        EventKind::Issues => issue(payload,).map(InfoRecord::Issue,),
        EventKind::IssueComment => issue_comment(payload,).map(InfoRecord::Comment,),
        EventKind::Release => release(payload,).map(InfoRecord::Release,),
    }
}

fn pull_request(payload: &Value,) -> Result<PullRequestInfo, Error,>
{
    let reviewers = match payload.pointer("/pull_request/requested_reviewers",) {
        Some(Value::Array(entries,),) => Some(
            (0..entries.len())
                .map(|index| actor(payload, &format!("/pull_request/requested_reviewers/{index}"),),)
                .collect::<Result<Vec<_,>, _,>>()?,
        ),
        _ => None,
    };

    Ok(PullRequestInfo {
        action: PullRequestAction::from_wire(&string(payload, "/action",)?,),
        number: number(payload, "/pull_request/number",)?,
        repo_full_name: string(payload, "/pull_request/base/repo/full_name",)?,
        title: string(payload, "/pull_request/title",)?,
        body: body(payload, "/pull_request/body",),
        url: string(payload, "/pull_request/html_url",)?,
        actor: actor(payload, "/sender",)?,
        is_draft: flag(payload, "/pull_request/draft",)?,
        state: ItemState::from_wire(&string(payload, "/pull_request/state",)?,),
        created_at: string(payload, "/pull_request/created_at",)?,
        updated_at: string(payload, "/pull_request/updated_at",)?,
        merged: flag(payload, "/pull_request/merged",)?,
        base: branch(payload, "/pull_request/base",)?,
        head: branch(payload, "/pull_request/head",)?,
        reviewers,
    },)
}

fn issue(payload: &Value,) -> Result<IssueInfo, Error,>
{
    Ok(IssueInfo {
        action:         IssueAction::from_wire(&string(payload, "/action",)?,),
        number:         number(payload, "/issue/number",)?,
        repo_full_name: string(payload, "/repository/full_name",)?,
        title:          string(payload, "/issue/title",)?,
        body:           body(payload, "/issue/body",),
        url:            string(payload, "/issue/html_url",)?,
        actor:          actor(payload, "/sender",)?,
        state:          ItemState::from_wire(&string(payload, "/issue/state",)?,),
        created_at:     string(payload, "/issue/created_at",)?,
        updated_at:     string(payload, "/issue/updated_at",)?,
    },)
}

fn issue_comment(payload: &Value,) -> Result<CommentInfo, Error,>
{
    let parent_kind = match payload.pointer("/issue/pull_request",) {
        Some(value,) if !value.is_null() => ParentKind::PullRequest,
        _ => ParentKind::Issue,
    };

    Ok(CommentInfo {
        action: string(payload, "/action",)?,
        number: number(payload, "/issue/number",)?,
        parent_kind,
        repo_full_name: string(payload, "/repository/full_name",)?,
        title: string(payload, "/issue/title",)?,
        body: body(payload, "/comment/body",),
        url: string(payload, "/comment/html_url",)?,
        actor: actor(payload, "/sender",)?,
        created_at: string(payload, "/comment/created_at",)?,
        updated_at: string(payload, "/comment/updated_at",)?,
    },)
}

fn review_comment(payload: &Value,) -> Result<CommentInfo, Error,>
{
    Ok(CommentInfo {
        action:         string(payload, "/action",)?,
        number:         number(payload, "/pull_request/number",)?,
        parent_kind:    ParentKind::Review,
        repo_full_name: string(payload, "/repository/full_name",)?,
        title:          string(payload, "/pull_request/title",)?,
        body:           body(payload, "/comment/body",),
        url:            string(payload, "/comment/html_url",)?,
        actor:          actor(payload, "/sender",)?,
        created_at:     string(payload, "/comment/created_at",)?,
        updated_at:     string(payload, "/comment/updated_at",)?,
    },)
}

fn release(payload: &Value,) -> Result<ReleaseInfo, Error,>
{
    let created_at = string(payload, "/release/created_at",)?;
    let updated_at = optional_string(payload, "/release/updated_at",)
        .or_else(|| optional_string(payload, "/release/published_at",),)
        .unwrap_or_else(|| created_at.clone(),);
    let tag_name = string(payload, "/release/tag_name",)?;
    // Unnamed releases are titled by their tag.
    let title = optional_string(payload, "/release/name",)
        .filter(|name| !name.trim().is_empty(),)
        .unwrap_or_else(|| tag_name.clone(),);

    Ok(ReleaseInfo {
        action:         string(payload, "/action",)?,
        repo_full_name: string(payload, "/repository/full_name",)?,
        is_prerelease:  flag(payload, "/release/prerelease",)?,
        tag_name,
        title,
        body:           body(payload, "/release/body",),
        url:            string(payload, "/release/html_url",)?,
        actor:          actor(payload, "/sender",)?,
        created_at,
        updated_at,
    },)
}

fn review(payload: &Value,) -> Result<ReviewInfo, Error,>
{
    let submitted_at = string(payload, "/review/submitted_at",)?;
    let updated_at =
        optional_string(payload, "/review/updated_at",).unwrap_or_else(|| submitted_at.clone(),);

    Ok(ReviewInfo {
        action: string(payload, "/action",)?,
        number: number(payload, "/pull_request/number",)?,
        repo_full_name: string(payload, "/pull_request/base/repo/full_name",)?,
        title: string(payload, "/pull_request/title",)?,
        body: body(payload, "/review/body",),
        url: string(payload, "/review/html_url",)?,
        reviewer: actor(payload, "/review/user",)?,
        state: ReviewState::from_wire(&string(payload, "/review/state",)?,),
        base: branch(payload, "/pull_request/base",)?,
        head: branch(payload, "/pull_request/head",)?,
        created_at: submitted_at,
        updated_at,
    },)
}

fn field<'payload,>(payload: &'payload Value, pointer: &str,) -> Result<&'payload Value, Error,>
{
    payload
        .pointer(pointer,)
        .filter(|value| !value.is_null(),)
        .ok_or_else(|| Error::missing_field(pointer,),)
}

fn string(payload: &Value, pointer: &str,) -> Result<String, Error,>
{
    field(payload, pointer,)?
        .as_str()
        .map(str::to_owned,)
        .ok_or_else(|| Error::missing_field(pointer,),)
}

fn optional_string(payload: &Value, pointer: &str,) -> Option<String,>
{
    payload.pointer(pointer,).and_then(Value::as_str,).map(str::to_owned,)
}

fn number(payload: &Value, pointer: &str,) -> Result<u64, Error,>
{
    field(payload, pointer,)?.as_u64().ok_or_else(|| Error::missing_field(pointer,),)
}

fn flag(payload: &Value, pointer: &str,) -> Result<bool, Error,>
{
    field(payload, pointer,)?.as_bool().ok_or_else(|| Error::missing_field(pointer,),)
}

fn body(payload: &Value, pointer: &str,) -> String
{
    optional_string(payload, pointer,).unwrap_or_default()
}

fn actor(payload: &Value, prefix: &str,) -> Result<ActorRef, Error,>
{
    Ok(ActorRef {
        login:       string(payload, &format!("{prefix}/login"),)?,
        profile_url: string(payload, &format!("{prefix}/html_url"),)?,
    },)
}

fn branch(payload: &Value, prefix: &str,) -> Result<BranchRef, Error,>
{
    Ok(BranchRef {
        label: string(payload, &format!("{prefix}/label"),)?,
    },)
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use serde_json::{Value, json};
    use tempfile::tempdir;

    use super::{load_event, normalize, parse_event};
    use crate::{
        Error, EventKind, InfoRecord, IssueAction, ItemState, ParentKind, PullRequestAction,
        ReviewState,
    };

    fn sender() -> Value
    {
        json!({ "login": "alice", "html_url": "https://gh/alice" })
    }

    fn pull_request_payload() -> Value
    {
        json!({
            "action": "opened",
            "pull_request": {
                "number": 12,
                "title": "Add cards",
                "body": null,
                "html_url": "https://github.com/o/r/pull/12",
                "draft": false,
                "state": "open",
                "merged": false,
                "created_at": "2025-03-01T10:00:00Z",
                "updated_at": "2025-03-01T10:05:00Z",
                "base": { "label": "o:main", "repo": { "full_name": "o/r" } },
                "head": { "label": "alice:cards" }
            },
            "sender": sender()
        })
    }

    fn issue_comment_payload(on_pull_request: bool,) -> Value
    {
        let mut issue = json!({ "number": 7, "title": "Crash on start" });
        if on_pull_request {
            issue["pull_request"] = json!({ "url": "https://api.github.com/repos/o/r/pulls/7" });
        }
        json!({
            "action": "created",
            "issue": issue,
            "comment": {
                "body": "looks good",
                "html_url": "https://github.com/o/r/issues/7#issuecomment-1",
                "created_at": "2025-03-02T00:00:00Z",
                "updated_at": "2025-03-02T00:00:00Z"
            },
            "repository": { "full_name": "o/r" },
            "sender": sender()
        })
    }

    #[test]
    fn pull_request_projection_reads_nested_fields()
    {
        let record = normalize(EventKind::PullRequest, &pull_request_payload(),)
            .expect("valid pull request payload",);
        let InfoRecord::PullRequest(info,) = record else {
            panic!("expected pull request record");
        };

        assert_eq!(info.action, PullRequestAction::Opened);
        assert_eq!(info.number, 12);
        assert_eq!(info.repo_full_name, "o/r");
        assert_eq!(info.body, "");
        assert_eq!(info.state, ItemState::Open);
        assert_eq!(info.base.label, "o:main");
        assert_eq!(info.head.label, "alice:cards");
        assert_eq!(info.actor.login, "alice");
        assert!(info.reviewers.is_none());
    }

    #[test]
    fn requested_reviewers_are_mapped_when_present()
    {
        let mut payload = pull_request_payload();
        payload["action"] = json!("review_requested");
        payload["pull_request"]["requested_reviewers"] = json!([
            { "login": "bob", "html_url": "https://gh/bob" },
            { "login": "carol", "html_url": "https://gh/carol" }
        ]);

        let InfoRecord::PullRequest(info,) =
            normalize(EventKind::PullRequest, &payload,).expect("valid payload",)
        else {
            panic!("expected pull request record");
        };

        let reviewers = info.reviewers.expect("reviewers present",);
        let logins: Vec<_,> = reviewers.iter().map(|actor| actor.login.as_str(),).collect();
        assert_eq!(logins, ["bob", "carol"]);
    }

    #[test]
    fn empty_requested_reviewers_stay_defined()
    {
        let mut payload = pull_request_payload();
        payload["pull_request"]["requested_reviewers"] = json!([]);

        let InfoRecord::PullRequest(info,) =
            normalize(EventKind::PullRequest, &payload,).expect("valid payload",)
        else {
            panic!("expected pull request record");
        };
        assert_eq!(info.reviewers, Some(Vec::new()));
    }

    #[test]
    fn missing_required_field_reports_pointer()
    {
        let mut payload = pull_request_payload();
        payload["pull_request"]["base"] = json!({ "label": "o:main" });

        let error = normalize(EventKind::PullRequest, &payload,).expect_err("missing repo",);
        match error {
            Error::MissingField {
                pointer,
            } => assert_eq!(pointer, "/pull_request/base/repo/full_name"),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn wrongly_typed_field_is_reported_as_missing()
    {
        let mut payload = pull_request_payload();
        payload["pull_request"]["number"] = json!("twelve");

        let error = normalize(EventKind::PullRequest, &payload,).expect_err("bad number",);
        assert!(matches!(error, Error::MissingField { ref pointer } if pointer == "/pull_request/number"));
    }

    #[test]
    fn issue_projection_matches_documented_scenario()
    {
        let payload = json!({
            "action": "opened",
            "issue": {
                "number": 5,
                "title": "Bug",
                "body": "steps",
                "html_url": "https://x/5",
                "state": "open",
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-01-01T00:00:00Z"
            },
            "repository": { "full_name": "o/r" },
            "sender": sender()
        });

        let InfoRecord::Issue(info,) = normalize(EventKind::Issues, &payload,).expect("valid",)
        else {
            panic!("expected issue record");
        };
        assert_eq!(info.action, IssueAction::Opened);
        assert_eq!(info.number, 5);
        assert_eq!(info.body, "steps");
        assert_eq!(info.url, "https://x/5");
    }

    #[test]
    fn issue_comment_on_pull_request_is_tagged_pull_request()
    {
        let InfoRecord::Comment(info,) =
            normalize(EventKind::IssueComment, &issue_comment_payload(true,),).expect("valid",)
        else {
            panic!("expected comment record");
        };
        assert_eq!(info.parent_kind, ParentKind::PullRequest);
        assert_eq!(info.url, "https://github.com/o/r/issues/7#issuecomment-1");
    }

    #[test]
    fn issue_comment_on_issue_is_tagged_issue()
    {
        let InfoRecord::Comment(info,) =
            normalize(EventKind::IssueComment, &issue_comment_payload(false,),).expect("valid",)
        else {
            panic!("expected comment record");
        };
        assert_eq!(info.parent_kind, ParentKind::Issue);
        assert_eq!(info.title, "Crash on start");
    }

    #[test]
    fn review_comment_is_always_tagged_review()
    {
        let payload = json!({
            "action": "created",
            "pull_request": { "number": 3, "title": "Refactor" },
            "comment": {
                "body": "nit",
                "html_url": "https://github.com/o/r/pull/3#discussion_r1",
                "created_at": "2025-03-02T00:00:00Z",
                "updated_at": "2025-03-02T00:00:00Z"
            },
            "repository": { "full_name": "o/r" },
            "sender": sender()
        });

        let InfoRecord::Comment(info,) =
            normalize(EventKind::PullRequestReviewComment, &payload,).expect("valid",)
        else {
            panic!("expected comment record");
        };
        assert_eq!(info.parent_kind, ParentKind::Review);
        assert_eq!(info.number, 3);
    }

    #[test]
    fn review_projection_uses_review_author_and_submission_time()
    {
        let payload = json!({
            "action": "submitted",
            "review": {
                "body": null,
                "html_url": "https://github.com/o/r/pull/3#pullrequestreview-9",
                "state": "approved",
                "submitted_at": "2025-03-03T00:00:00Z",
                "user": { "login": "bob", "html_url": "https://gh/bob" }
            },
            "pull_request": {
                "number": 3,
                "title": "Refactor",
                "base": { "label": "o:main", "repo": { "full_name": "o/r" } },
                "head": { "label": "o:refactor" }
            },
            "sender": sender()
        });

        let InfoRecord::Review(info,) =
            normalize(EventKind::PullRequestReview, &payload,).expect("valid",)
        else {
            panic!("expected review record");
        };
        assert_eq!(info.reviewer.login, "bob");
        assert_eq!(info.state, ReviewState::Approved);
        assert_eq!(info.body, "");
        assert_eq!(info.created_at, "2025-03-03T00:00:00Z");
        assert_eq!(info.updated_at, info.created_at);
    }

    #[test]
    fn release_projection_reads_tag_and_prerelease()
    {
        let payload = json!({
            "action": "published",
            "repository": { "full_name": "o/r" },
            "release": {
                "prerelease": true,
                "tag_name": "v1.0.0-rc1",
                "name": "RC 1",
                "body": "notes",
                "html_url": "https://github.com/o/r/releases/tag/v1.0.0-rc1",
                "created_at": "2025-03-04T00:00:00Z",
                "published_at": "2025-03-04T01:00:00Z"
            },
            "sender": sender()
        });

        let InfoRecord::Release(info,) = normalize(EventKind::Release, &payload,).expect("valid",)
        else {
            panic!("expected release record");
        };
        assert!(info.is_prerelease);
        assert_eq!(info.tag_name, "v1.0.0-rc1");
        assert_eq!(info.title, "RC 1");
        assert_eq!(info.updated_at, "2025-03-04T01:00:00Z");
    }

    #[test]
    fn unnamed_release_is_titled_by_tag()
    {
        let payload = json!({
            "action": "published",
            "repository": { "full_name": "o/r" },
            "release": {
                "prerelease": false,
                "tag_name": "v2.0.0",
                "name": null,
                "html_url": "https://github.com/o/r/releases/tag/v2.0.0",
                "created_at": "2025-03-04T00:00:00Z"
            },
            "sender": sender()
        });

        let InfoRecord::Release(info,) = normalize(EventKind::Release, &payload,).expect("valid",)
        else {
            panic!("expected release record");
        };
        assert_eq!(info.title, "v2.0.0");
        assert_eq!(info.updated_at, "2025-03-04T00:00:00Z");
    }

    #[test]
    fn parse_event_rejects_malformed_json()
    {
        let error = parse_event("{ not json",).expect_err("malformed",);
        assert!(matches!(error, Error::Parse { .. }));
    }

    #[test]
    fn load_event_reads_file_from_disk()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("event.json",);
        fs::write(&path, pull_request_payload().to_string(),).expect("failed to write event",);

        let payload = load_event(&path,).expect("event loads",);
        assert_eq!(payload["pull_request"]["number"], 12);
    }

    #[test]
    fn load_event_reports_missing_file()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("absent.json",);

        let error = load_event(&path,).expect_err("missing file",);
        assert!(matches!(error, Error::Io { .. }));
    }
}
