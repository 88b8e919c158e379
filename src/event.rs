// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Typed records projected from GitHub webhook payloads.
//!
//! Each record carries only the fields the card builder reads. Free-form
//! `action` and `state` strings are lifted into closed enums; values GitHub
//! may add later land in an `Other` variant instead of failing.

/// GitHub user reference rendered as a mention link.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ActorRef
{
    /// Account login.
    pub login:       String,
    /// Profile page URL.
    pub profile_url: String,
}

impl ActorRef
{
    /// Creates a reference from a login and profile URL.
    pub fn new(login: impl Into<String,>, profile_url: impl Into<String,>,) -> Self
    {
        Self {
            login:       login.into(),
            profile_url: profile_url.into(),
        }
    }

    /// Renders the actor as `[@login](profile)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use feishu_notifier::ActorRef;
    ///
    /// let actor = ActorRef::new("octocat", "https://github.com/octocat",);
    /// assert_eq!(actor.mention(), "[@octocat](https://github.com/octocat)");
    /// ```
    pub fn mention(&self,) -> String
    {
        format!("[@{}]({})", self.login, self.profile_url)
    }
}

/// Head or base branch label of a pull request, e.g. `octocat:feature`.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct BranchRef
{
    /// Branch label as reported by GitHub.
    pub label: String,
}

/// Open/closed state shared by issues and pull requests.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum ItemState
{
    /// `open`
    Open,
    /// `closed`
    Closed,
    /// Any other value.
    Other(String,),
}

impl ItemState
{
    /// Maps the wire value onto a variant.
    pub fn from_wire(value: &str,) -> Self
    {
        match value {
            "open" => Self::Open,
            "closed" => Self::Closed,
            other => Self::Other(other.to_owned(),),
        }
    }
}

/// `action` values of `pull_request` deliveries the builder distinguishes.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum PullRequestAction
{
    /// `opened`.
    Opened,
    /// `ready_for_review`, a draft leaving draft state.
    ReadyForReview,
    /// `reopened`.
    Reopened,
    /// `review_requested`.
    ReviewRequested,
    /// `closed`, merged or not.
    Closed,
    /// `synchronize`, new commits pushed to the head branch.
    Synchronize,
    /// `edited`.
    Edited,
    /// Any action without dedicated rendering.
    Other(String,),
}

impl PullRequestAction
{
    /// Maps the wire value onto a variant.
    pub fn from_wire(value: &str,) -> Self
    {
        match value {
            "opened" => Self::Opened,
            "ready_for_review" => Self::ReadyForReview,
            "reopened" => Self::Reopened,
            "review_requested" => Self::ReviewRequested,
            "closed" => Self::Closed,
            "synchronize" => Self::Synchronize,
            "edited" => Self::Edited,
            other => Self::Other(other.to_owned(),),
        }
    }
}

/// `action` values of `issues` deliveries the builder distinguishes.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum IssueAction
{
    /// `opened`.
    Opened,
    /// `reopened`.
    Reopened,
    /// `closed`.
    Closed,
    /// `edited`.
    Edited,
    /// Any action without dedicated rendering.
    Other(String,),
}

impl IssueAction
{
    /// Maps the wire value onto a variant.
    pub fn from_wire(value: &str,) -> Self
    {
        match value {
            "opened" => Self::Opened,
            "reopened" => Self::Reopened,
            "closed" => Self::Closed,
            "edited" => Self::Edited,
            other => Self::Other(other.to_owned(),),
        }
    }
}

/// Review verdict. GitHub reports it lowercase in webhook payloads.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum ReviewState
{
    /// `approved`.
    Approved,
    /// `commented`.
    Commented,
    /// `changes_requested`.
    ChangesRequested,
    /// `dismissed`.
    Dismissed,
    /// Any state without dedicated rendering.
    Other(String,),
}

impl ReviewState
{
    /// Maps the wire value onto a variant, ignoring ASCII case.
    pub fn from_wire(value: &str,) -> Self
    {
        match value.to_ascii_lowercase().as_str() {
            "approved" => Self::Approved,
            "commented" => Self::Commented,
            "changes_requested" => Self::ChangesRequested,
            "dismissed" => Self::Dismissed,
            _ => Self::Other(value.to_owned(),),
        }
    }
}

/// What a comment was left on.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum ParentKind
{
    Issue,
    PullRequest,
    /// Inline comment on a pull request diff.
    Review,
}

/// Projection of a `pull_request` delivery.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct PullRequestInfo
{
    pub action:         PullRequestAction,
    pub number:         u64,
    pub repo_full_name: String,
    pub title:          String,
    /// Description, empty when GitHub sent `null`.
    pub body:           String,
    pub url:            String,
    pub actor:          ActorRef,
    pub is_draft:       bool,
    pub state:          ItemState,
    pub created_at:     String,
    pub updated_at:     String,
    pub merged:         bool,
    pub base:           BranchRef,
    pub head:           BranchRef,
    /// `None` when the payload carried no `requested_reviewers` array.
    pub reviewers:      Option<Vec<ActorRef,>,>,
}

/// Projection of an `issues` delivery.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct IssueInfo
{
    pub action:         IssueAction,
    pub number:         u64,
    pub repo_full_name: String,
    pub title:          String,
    pub body:           String,
    pub url:            String,
    pub actor:          ActorRef,
    pub state:          ItemState,
    pub created_at:     String,
    pub updated_at:     String,
}

/// Projection of an `issue_comment` or `pull_request_review_comment`
/// delivery.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct CommentInfo
{
    pub action:         String,
    /// Number of the issue or pull request commented on.
    pub number:         u64,
    pub parent_kind:    ParentKind,
    pub repo_full_name: String,
    /// Title of the parent issue or pull request.
    pub title:          String,
    pub body:           String,
    /// Link to the comment itself.
    pub url:            String,
    pub actor:          ActorRef,
    pub created_at:     String,
    pub updated_at:     String,
}

/// Projection of a `release` delivery.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ReleaseInfo
{
    pub action:         String,
    pub repo_full_name: String,
    pub is_prerelease:  bool,
    pub tag_name:       String,
    /// Release name.
    pub title:          String,
    pub body:           String,
    pub url:            String,
    pub actor:          ActorRef,
    pub created_at:     String,
    pub updated_at:     String,
}

/// Projection of a `pull_request_review` delivery.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ReviewInfo
{
    pub action:         String,
    pub number:         u64,
    pub repo_full_name: String,
    /// Title of the reviewed pull request.
    pub title:          String,
    pub body:           String,
    /// Link to the review.
    pub url:            String,
    pub reviewer:       ActorRef,
    pub state:          ReviewState,
    pub base:           BranchRef,
    pub head:           BranchRef,
    pub created_at:     String,
    pub updated_at:     String,
}

/// One projected event, tagged by record shape.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum InfoRecord
{
    PullRequest(PullRequestInfo,),
    Issue(IssueInfo,),
    Comment(CommentInfo,),
    Release(ReleaseInfo,),
    Review(ReviewInfo,),
}

impl InfoRecord
{
    /// Short name of the record shape used in diagnostics.
    pub const fn shape(&self,) -> &'static str
    {
        match self {
            Self::PullRequest(_,) => "pull request",
            Self::Issue(_,) => "issue",
            Self::Comment(_,) => "comment",
            Self::Release(_,) => "release",
            Self::Review(_,) => "review",
        }
    }

    /// Link the card button points at.
    pub fn url(&self,) -> &str
    {
        match self {
            Self::PullRequest(info,) => &info.url,
            Self::Issue(info,) => &info.url,
            Self::Comment(info,) => &info.url,
            Self::Release(info,) => &info.url,
            Self::Review(info,) => &info.url,
        }
    }
}
