// Polyteia SDK - Insight and Report Builders
//
// Copyright (c) 2025 Polyteia SDK contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types shared by the insight and report builders.

use std::fmt;
use thiserror::Error;

/// The kind of error raised by a builder or gateway helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkErrorKind {
    /// A value outside the accepted enumeration or range.
    InvalidArgument,
    /// An operation invoked in a state that does not support it.
    State,
    /// The API gateway answered with an unexpected status or body.
    Gateway,
    /// JSON serialization or deserialization failed.
    Serialization,
}

impl fmt::Display for SdkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "InvalidArgumentError"),
            Self::State => write!(f, "StateError"),
            Self::Gateway => write!(f, "GatewayError"),
            Self::Serialization => write!(f, "SerializationError"),
        }
    }
}

/// An error raised while constructing or submitting a document.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct SdkError {
    /// The kind of error.
    pub kind: SdkErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Additional context (e.g., "Create insight").
    pub context: Option<String>,
}

impl SdkError {
    /// Create a new error.
    pub fn new(kind: SdkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(SdkErrorKind::InvalidArgument, message)
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::new(SdkErrorKind::State, message)
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        Self::new(SdkErrorKind::Gateway, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(SdkErrorKind::Serialization, message)
    }

    /// True for errors caused by a rejected argument.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind == SdkErrorKind::InvalidArgument
    }

    /// True for errors caused by an operation in the wrong state.
    pub fn is_state(&self) -> bool {
        self.kind == SdkErrorKind::State
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

/// Result type for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;
