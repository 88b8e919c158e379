#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the notifier crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the normalizer, card builder, delivery
/// client, and CLI.
///
/// Configuration variants are raised before any file is read. Parse variants
/// surface problems with the event payload. [`Error::Transport`] and
/// [`Error::Delivery`] cover failures once the card leaves the process.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Required configuration is absent or blank.
    #[error("invalid configuration: {message}")]
    Config {
        /// Human readable message naming the missing input.
        message: String
    },
    /// The event type discriminator is not one of the supported kinds.
    #[error(
        "unknown event type '{value}', expected one of pull_request, pull_request_review, \
         pull_request_review_comment, issues, issue_comment, release"
    )]
    UnknownEventType {
        /// Raw value supplied by the caller.
        value: String
    },
    /// Wraps I/O errors that occur while reading the event file.
    #[error("failed to read event payload from {path:?}: {source}")]
    Io {
        /// Location of the event file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps JSON decoding errors for the event payload.
    #[error("failed to parse event payload: {source}")]
    Parse {
        /// Source decoding error from serde_json.
        source: serde_json::Error
    },
    /// A field the projection requires is absent or has the wrong type.
    #[error("event payload is missing required field '{pointer}'")]
    MissingField {
        /// JSON pointer of the absent field.
        pointer: String
    },
    /// An info record was handed to the builder for a different event kind.
    #[error("cannot build a {expected} card from a {found} record")]
    UnsupportedVariant {
        /// Event kind the caller dispatched on.
        expected: &'static str,
        /// Kind of record actually supplied.
        found:    &'static str
    },
    /// Wraps regular expression compilation errors.
    #[error("failed to compile body pattern: {source}")]
    Pattern {
        /// Underlying regex error.
        source: regex::Error
    },
    /// Wraps serialization errors when writing the card payload.
    #[error("failed to serialize card: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    },
    /// The webhook could not be reached or its response body not read.
    #[error("failed to reach webhook: {source}")]
    Transport {
        /// Underlying HTTP client error.
        source: reqwest::Error
    },
    /// The webhook answered but rejected the card.
    #[error("delivery failed: {message}")]
    Delivery {
        /// Human readable message describing the delivery failure.
        message: String
    }
}

impl Error {
    /// Constructs a configuration error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the missing input.
    pub fn config<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Config {
            message: message.into()
        }
    }

    /// Constructs a delivery error from the provided displayable value.
    pub fn delivery<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Delivery {
            message: message.into()
        }
    }

    /// Constructs a missing field error for the given JSON pointer.
    pub fn missing_field<P>(pointer: P) -> Self
    where
        P: Into<String>
    {
        Self::MissingField {
            pointer: pointer.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<regex::Error> for Error {
    fn from(source: regex::Error) -> Self {
        Self::Pattern {
            source
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Transport {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the event file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Serialize`] variant from a serde_json failure.
pub fn serialize_error(source: serde_json::Error) -> Error {
    Error::Serialize {
        source
    }
}
