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

//! Error context helpers.
//!
//! ```rust
//! use polyteia::{insight, SdkResultExt};
//!
//! let mut builder = insight();
//! let err = builder
//!     .add_filter("year", "between", 2020)
//!     .context("filter on year")
//!     .unwrap_err();
//! assert_eq!(err.context.as_deref(), Some("filter on year"));
//! ```

use crate::{SdkError, SdkResult};
use std::fmt;

/// Extension trait adding context to fallible results.
///
/// Context is stored in the error's `context` field; the message is left
/// untouched. Newer context is prepended: `"outer; inner"`.
pub trait SdkResultExt<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> SdkResult<T>
    where
        C: fmt::Display;

    /// Add context computed only on the error path.
    fn with_context<C, F>(self, f: F) -> SdkResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T> SdkResultExt<T> for Result<T, SdkError> {
    fn context<C>(self, context: C) -> SdkResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context(e, context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> SdkResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context(e, f().to_string()))
    }
}

impl<T> SdkResultExt<T> for Result<T, serde_json::Error> {
    fn context<C>(self, context: C) -> SdkResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| SdkError::from(e).with_context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> SdkResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| SdkError::from(e).with_context(f().to_string()))
    }
}

fn add_context(mut error: SdkError, new_context: String) -> SdkError {
    if new_context.is_empty() {
        return error;
    }
    error.context = Some(match error.context {
        Some(existing) => format!("{}; {}", new_context, existing),
        None => new_context,
    });
    error
}
