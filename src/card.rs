// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Feishu card JSON 2.0 document model.
//!
//! Only the subset of the card schema the notifier emits is modelled. Every
//! element kind is a variant of [`CardElement`], so an element with an
//! unknown `tag` cannot be constructed and fails to deserialize.

use serde::{Deserialize, Serialize};

/// Card schema revision understood by Feishu clients 7.20 and later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchemaVersion {
    /// `"2.0"`
    #[default]
    #[serde(rename = "2.0")]
    V2
}

/// Message envelope posted to the incoming webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Always `interactive` for card messages.
    pub msg_type: MessageType,
    /// Card to render in the group.
    pub card:     CardDocument
}

impl WebhookPayload {
    /// Wraps a card in an `interactive` message envelope.
    pub fn interactive(card: CardDocument) -> Self {
        Self {
            msg_type: MessageType::Interactive,
            card
        }
    }
}

/// Webhook message type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Card message.
    Interactive
}

/// Card document delivered to the chat group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDocument {
    /// Schema revision.
    pub schema: SchemaVersion,
    /// Title bar.
    pub header: CardHeader,
    /// Ordered display elements.
    pub body:   CardBody
}

impl CardDocument {
    /// Creates a schema 2.0 card with a plain-text title.
    pub fn new(title: impl Into<String>, template: Color, elements: Vec<CardElement>) -> Self {
        Self {
            schema: SchemaVersion::V2,
            header: CardHeader {
                title: Text::plain(title),
                template
            },
            body:   CardBody {
                elements
            }
        }
    }

    /// Title text shown in the header.
    pub fn title(&self) -> &str {
        self.header.title.content()
    }

    /// Body elements in display order.
    pub fn elements(&self) -> &[CardElement] {
        &self.body.elements
    }
}

/// Card title bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardHeader {
    /// Title text.
    pub title:    Text,
    /// Accent color of the title bar.
    pub template: Color
}

/// Card body container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBody {
    /// Display elements rendered top to bottom.
    pub elements: Vec<CardElement>
}

/// Text block, either verbatim or Feishu-flavoured markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum Text {
    /// Rendered verbatim.
    PlainText {
        /// Text content.
        content: String
    },
    /// Rendered as lark markdown, supporting links and `<text_tag>`.
    LarkMd {
        /// Markdown content.
        content: String
    }
}

impl Text {
    /// Creates a `plain_text` block.
    pub fn plain(content: impl Into<String>) -> Self {
        Self::PlainText {
            content: content.into()
        }
    }

    /// Creates a `lark_md` block.
    pub fn lark_md(content: impl Into<String>) -> Self {
        Self::LarkMd {
            content: content.into()
        }
    }

    /// Text content regardless of rendering mode.
    pub fn content(&self) -> &str {
        match self {
            Self::PlainText {
                content
            }
            | Self::LarkMd {
                content
            } => content
        }
    }
}

/// Palette shared by header templates and icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Blue,
    Green,
    Red
}

/// Built-in Feishu icon tokens used by the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconToken {
    /// Check mark.
    #[serde(rename = "yes_outlined")]
    Yes,
    /// Stop sign.
    #[serde(rename = "more-close_outlined")]
    Close,
    /// Circular arrows.
    #[serde(rename = "replace_outlined")]
    Refresh,
    /// Location pin, used for new pull requests.
    #[serde(rename = "privacy-location_outlined")]
    NewPullRequest,
    /// Push pin, used for new issues.
    #[serde(rename = "pin_outlined")]
    NewIssue,
    /// Person with a plus sign, used for review requests.
    #[serde(rename = "member-new_outlined")]
    MemberNew,
    /// Bell, used for new comments.
    #[serde(rename = "bell_outlined")]
    Bell,
    /// Rocket, used for releases.
    #[serde(rename = "start_outlined")]
    Launch,
    /// Speech bubble, used for review comments and detail blocks.
    #[serde(rename = "chat_outlined")]
    Chat,
    /// Feedback bubble, used for requested changes.
    #[serde(rename = "feedback_outlined")]
    Feedback
}

/// Icon attached to a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag")]
pub enum Icon {
    /// Icon from the built-in Feishu set.
    #[serde(rename = "standard_icon")]
    Standard {
        /// Icon identifier.
        token: IconToken,
        /// Icon tint.
        color: Color
    }
}

impl Icon {
    /// Creates a standard icon.
    pub const fn standard(token: IconToken, color: Color) -> Self {
        Self::Standard {
            token,
            color
        }
    }
}

/// Button styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    Primary
}

/// Interaction triggered by a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Behavior {
    /// Open a URL in the browser.
    OpenUrl {
        /// Target URL on every platform.
        default_url: String
    }
}

/// Element of the card body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum CardElement {
    /// Text block with a leading icon.
    Div {
        /// Rendered text.
        text: Text,
        /// Leading icon.
        icon: Icon
    },
    /// Horizontal rule.
    #[serde(rename = "hr")]
    Divider,
    /// Rich-text block supporting images and full markdown.
    Markdown {
        /// Markdown content.
        content: String,
        /// Leading icon.
        icon:    Icon
    },
    /// Clickable button.
    Button {
        /// Button label.
        text:      Text,
        /// Visual style.
        #[serde(rename = "type")]
        kind:      ButtonKind,
        /// Actions performed on click.
        behaviors: Vec<Behavior>
    }
}

impl CardElement {
    /// Primary button opening `url` in the browser.
    pub fn link_button(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Button {
            text:      Text::plain(label),
            kind:      ButtonKind::Primary,
            behaviors: vec![Behavior::OpenUrl {
                default_url: url.into()
            }]
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CardDocument, CardElement, Color, Icon, IconToken, Text, WebhookPayload};

    #[test]
    fn payload_serializes_to_card_json_v2() {
        let card = CardDocument::new(
            "[o/r] Bug (Issue #5)",
            Color::Blue,
            vec![
                CardElement::Div {
                    text: Text::lark_md("summary"),
                    icon: Icon::standard(IconToken::NewIssue, Color::Blue)
                },
                CardElement::Divider,
                CardElement::Markdown {
                    content: "steps".to_owned(),
                    icon:    Icon::standard(IconToken::Chat, Color::Blue)
                },
                CardElement::link_button("在 GitHub 上查看", "https://x/5"),
            ]
        );

        let value = serde_json::to_value(WebhookPayload::interactive(card)).expect("serializes");
        assert_eq!(
            value,
            json!({
                "msg_type": "interactive",
                "card": {
                    "schema": "2.0",
                    "header": {
                        "title": { "tag": "plain_text", "content": "[o/r] Bug (Issue #5)" },
                        "template": "blue"
                    },
                    "body": {
                        "elements": [
                            {
                                "tag": "div",
                                "text": { "tag": "lark_md", "content": "summary" },
                                "icon": { "tag": "standard_icon", "token": "pin_outlined", "color": "blue" }
                            },
                            { "tag": "hr" },
                            {
                                "tag": "markdown",
                                "content": "steps",
                                "icon": { "tag": "standard_icon", "token": "chat_outlined", "color": "blue" }
                            },
                            {
                                "tag": "button",
                                "text": { "tag": "plain_text", "content": "在 GitHub 上查看" },
                                "type": "primary",
                                "behaviors": [ { "type": "open_url", "default_url": "https://x/5" } ]
                            }
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn icon_tokens_use_feishu_identifiers() {
        let value = serde_json::to_value(Icon::standard(IconToken::Close, Color::Red))
            .expect("serializes");
        assert_eq!(
            value,
            json!({ "tag": "standard_icon", "token": "more-close_outlined", "color": "red" })
        );
    }

    #[test]
    fn unknown_element_tag_is_rejected() {
        let result = serde_json::from_value::<CardElement>(json!({ "tag": "column_set" }));
        assert!(result.is_err());
    }

    #[test]
    fn divider_deserializes_from_hr_tag() {
        let element: CardElement =
            serde_json::from_value(json!({ "tag": "hr" })).expect("hr is known");
        assert_eq!(element, CardElement::Divider);
    }
}
