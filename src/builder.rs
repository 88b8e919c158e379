// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Card construction for every supported event kind.
//!
//! All cards share one layout: a summary line mentioning the actor, an
//! optional divider followed by the event body, and a button linking back to
//! GitHub. The builders differ only in the summary phrasing, the icon, and
//! the rule deciding whether the body is shown.

use regex::{Captures, Regex};

use crate::{
    card::{CardDocument, CardElement, Color, Icon, IconToken, Text},
    config::EventKind,
    error::Error,
    event::{
        BranchRef, CommentInfo, InfoRecord, IssueAction, IssueInfo, ItemState, ParentKind,
        PullRequestAction, PullRequestInfo, ReleaseInfo, ReviewInfo, ReviewState,
    },
};

/// Label of the link button appended to every card.
pub const BUTTON_LABEL: &str = "在 GitHub 上查看";
/// Markdown image reference: `![alt](url)`.
const IMAGE_PATTERN: &str = r"!\[(.*?)\]\((.*?)\)";
const HEADER_TEMPLATE: Color = Color::Blue;

/// What the header title suffix refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
enum Subject
{
    PullRequest(u64,),
    Issue(u64,),
    Release,
}

/// Summary line content before it becomes a card element.
struct Summary
{
    content: String,
    token:   IconToken,
    color:   Color,
}

impl Summary
{
    fn new(content: String, token: IconToken, color: Color,) -> Self
    {
        Self {
            content,
            token,
            color,
        }
    }

    fn into_element(self,) -> CardElement
    {
        CardElement::Div {
            text: Text::lark_md(self.content,),
            icon: Icon::standard(self.token, self.color,),
        }
    }
}

/// Builds the card for the record selected by `kind`.
///
/// `issue_comment` and `pull_request_review_comment` both expect a
/// [`InfoRecord::Comment`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedVariant`] when the record shape does not match
/// `kind`, and propagates [`build_pull_request_card`] and friends' errors.
pub fn build_card(kind: EventKind, record: &InfoRecord,) -> Result<CardDocument, Error,>
{
    match (kind, record,) {
        (EventKind::PullRequest, InfoRecord::PullRequest(info,),) => build_pull_request_card(info,),
        (EventKind::Issues, InfoRecord::Issue(info,),) => build_issue_card(info,),
        (
            EventKind::IssueComment | EventKind::PullRequestReviewComment,
            InfoRecord::Comment(info,),
        ) => build_comment_card(info,),
        (EventKind::Release, InfoRecord::Release(info,),) => build_release_card(info,),
        (EventKind::PullRequestReview, InfoRecord::Review(info,),) => build_review_card(info,),
        (kind, record,) => Err(Error::UnsupportedVariant {
            expected: kind.as_str(),
            found:    record.shape(),
        },),
    }
}

/// Returns `true` for deliveries that should not produce a card.
///
/// Only a review left in the `commented` state with an empty body is
/// skipped. Its inline comments arrive as separate
/// `pull_request_review_comment` deliveries.
pub fn should_skip(record: &InfoRecord,) -> bool
{
    matches!(
        record,
        InfoRecord::Review(info) if info.state == ReviewState::Commented && info.body.is_empty()
    )
}

/// Builds the card for a pull request delivery.
///
/// The body is shown only when the pull request was just opened or marked
/// ready for review.
///
/// # Errors
///
/// Returns [`Error::Pattern`] if the image pattern fails to compile.
pub fn build_pull_request_card(info: &PullRequestInfo,) -> Result<CardDocument, Error,>
{
    let shows_body =
        matches!(info.action, PullRequestAction::Opened | PullRequestAction::ReadyForReview);

    assemble(
        header_title(&info.repo_full_name, &info.title, Subject::PullRequest(info.number,),),
        pull_request_summary(info,),
        shows_body.then_some(info.body.as_str(),),
        &info.url,
    )
}

/// Builds the card for an issue delivery. The body is shown only on `opened`.
///
/// # Errors
///
/// Returns [`Error::Pattern`] if the image pattern fails to compile.
pub fn build_issue_card(info: &IssueInfo,) -> Result<CardDocument, Error,>
{
    let shows_body = info.action == IssueAction::Opened;

    assemble(
        header_title(&info.repo_full_name, &info.title, Subject::Issue(info.number,),),
        issue_summary(info,),
        shows_body.then_some(info.body.as_str(),),
        &info.url,
    )
}

/// Builds the card for an issue, pull request, or review comment.
///
/// # Errors
///
/// Returns [`Error::Pattern`] if the image pattern fails to compile.
pub fn build_comment_card(info: &CommentInfo,) -> Result<CardDocument, Error,>
{
    let subject = match info.parent_kind {
        ParentKind::Issue => Subject::Issue(info.number,),
        ParentKind::PullRequest | ParentKind::Review => Subject::PullRequest(info.number,),
    };
    let summary = Summary::new(
        format!("{} 添加了一条新评论：", info.actor.mention()),
        IconToken::Bell,
        Color::Blue,
    );

    assemble(
        header_title(&info.repo_full_name, &info.title, subject,),
        summary,
        Some(info.body.as_str(),),
        &info.url,
    )
}

/// Builds the card for a release delivery.
///
/// # Errors
///
/// Returns [`Error::Pattern`] if the image pattern fails to compile.
pub fn build_release_card(info: &ReleaseInfo,) -> Result<CardDocument, Error,>
{
    let tag = format!("(<text_tag color='neutral'>{}</text_tag>)", info.tag_name);
    let verb = if info.is_prerelease { "预发布了一个新版本" } else { "发布了一个新版本" };
    let summary = Summary::new(
        format!("{} {verb} {tag}：", info.actor.mention()),
        IconToken::Launch,
        Color::Blue,
    );

    assemble(
        header_title(&info.repo_full_name, &info.title, Subject::Release,),
        summary,
        Some(info.body.as_str(),),
        &info.url,
    )
}

/// Builds the card for a pull request review delivery.
///
/// # Errors
///
/// Returns [`Error::Pattern`] if the image pattern fails to compile.
pub fn build_review_card(info: &ReviewInfo,) -> Result<CardDocument, Error,>
{
    assemble(
        header_title(&info.repo_full_name, &info.title, Subject::PullRequest(info.number,),),
        review_summary(info,),
        Some(info.body.as_str(),),
        &info.url,
    )
}

/// Rewrites markdown images into `<img>` tags Feishu markdown can render.
///
/// Double quotes inside the alt text or URL are escaped as `&quot;`. Text
/// outside image references is returned unchanged.
///
/// # Errors
///
/// Returns [`Error::Pattern`] if the image pattern fails to compile.
///
/// # Examples
///
/// ```
/// use feishu_notifier::render_body;
///
/// let rendered = render_body("see ![cat](http://x/y.png)",)?;
/// assert_eq!(rendered, r#"see <img src="http://x/y.png" alt="cat" />"#);
/// # Ok::<(), feishu_notifier::Error>(())
/// ```
pub fn render_body(body: &str,) -> Result<String, Error,>
{
    let pattern = Regex::new(IMAGE_PATTERN,)?;
    let rendered = pattern.replace_all(body, |captures: &Captures<'_,>| {
        let alt = captures[1].replace('"', "&quot;",);
        let url = captures[2].replace('"', "&quot;",);
        format!(r#"<img src="{url}" alt="{alt}" />"#)
    },);

    Ok(rendered.into_owned(),)
}

fn assemble(
    title: String,
    summary: Summary,
    body: Option<&str,>,
    url: &str,
) -> Result<CardDocument, Error,>
{
    let mut elements = vec![summary.into_element()];

    if let Some(body,) = body.filter(|body| !body.is_empty(),) {
        elements.push(CardElement::Divider,);
        elements.push(CardElement::Markdown {
            content: render_body(body,)?,
            icon:    Icon::standard(IconToken::Chat, Color::Blue,),
        },);
    }

    elements.push(CardElement::link_button(BUTTON_LABEL, url,),);

    Ok(CardDocument::new(title, HEADER_TEMPLATE, elements,),)
}

fn header_title(repo: &str, title: &str, subject: Subject,) -> String
{
    match subject {
        Subject::PullRequest(number,) => format!("[{repo}] {title} (PR #{number})"),
        Subject::Issue(number,) => format!("[{repo}] {title} (Issue #{number})"),
        Subject::Release => format!("[{repo}] {title}"),
    }
}

fn branch_info(head: &BranchRef, base: &BranchRef,) -> String
{
    format!(
        "(<text_tag color='neutral'>{}</text_tag> → <text_tag color='neutral'>{}</text_tag> )",
        head.label, base.label
    )
}

fn pull_request_summary(info: &PullRequestInfo,) -> Summary
{
    let author = info.actor.mention();
    let branch = branch_info(&info.head, &info.base,);

    if info.merged {
        return Summary::new(
            format!("{author} 合并了这项 Pull request {branch}"),
            IconToken::Yes,
            Color::Green,
        );
    }
    if info.state == ItemState::Closed {
        return Summary::new(
            format!("{author} 关闭了这项 Pull request {branch}"),
            IconToken::Close,
            Color::Red,
        );
    }

    match info.action {
        PullRequestAction::Reopened => Summary::new(
            format!("{author} 重新打开了这项 Pull request {branch}"),
            IconToken::Refresh,
            Color::Blue,
        ),
        PullRequestAction::Opened | PullRequestAction::ReadyForReview => Summary::new(
            format!("{author} 创建了一项新 Pull request {branch}"),
            IconToken::NewPullRequest,
            Color::Blue,
        ),
        PullRequestAction::ReviewRequested => {
            let reviewers = info
                .reviewers
                .iter()
                .flatten()
                .map(|reviewer| reviewer.mention(),)
                .collect::<Vec<_,>>()
                .join(" ",);
            Summary::new(
                format!("{author} 请求 {reviewers} 对这项 Pull request 开展代码审查 {branch}"),
                IconToken::MemberNew,
                Color::Blue,
            )
        }
        PullRequestAction::Closed
        | PullRequestAction::Synchronize
        | PullRequestAction::Edited
        | PullRequestAction::Other(_,) => Summary::new(
            format!("{author} 更新了这项 Pull request {branch}"),
            IconToken::Refresh,
            Color::Blue,
        ),
    }
}

fn issue_summary(info: &IssueInfo,) -> Summary
{
    let author = info.actor.mention();

    if info.state == ItemState::Closed {
        return Summary::new(format!("{author} 关闭了这项 Issue"), IconToken::Yes, Color::Green,);
    }

    match info.action {
        IssueAction::Reopened => {
            Summary::new(format!("{author} 重新打开了这项 Issue"), IconToken::Refresh, Color::Blue,)
        }
        IssueAction::Opened => {
            Summary::new(format!("{author} 创建了一项新 Issue"), IconToken::NewIssue, Color::Blue,)
        }
        IssueAction::Closed | IssueAction::Edited | IssueAction::Other(_,) => {
            Summary::new(format!("{author} 更新了这项 Issue"), IconToken::Refresh, Color::Blue,)
        }
    }
}

fn review_summary(info: &ReviewInfo,) -> Summary
{
    let reviewer = info.reviewer.mention();
    let branch = branch_info(&info.head, &info.base,);

    match info.state {
        ReviewState::Approved => Summary::new(
            format!("{reviewer} 审查并同意了这项 Pull request {branch}"),
            IconToken::Yes,
            Color::Green,
        ),
        ReviewState::Commented => Summary::new(
            format!("{reviewer} 审查并留下了对这项 Pull request {branch} 的评论"),
            IconToken::Chat,
            Color::Blue,
        ),
        ReviewState::ChangesRequested => Summary::new(
            format!("{reviewer} 审查并认为这项 Pull request {branch} 需要改动"),
            IconToken::Feedback,
            Color::Red,
        ),
        ReviewState::Dismissed | ReviewState::Other(_,) => Summary::new(
            format!("{reviewer} 更新了对这项 Pull request {branch} 的审查"),
            IconToken::Refresh,
            Color::Blue,
        ),
    }
}
