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

//! Shared building blocks for the Polyteia SDK.
//!
//! This crate holds what the insight and report builders have in common:
//!
//! - [`SdkError`] and [`SdkErrorKind`]: the error taxonomy raised at the call
//!   that introduced a bad value or an invalid state transition
//! - [`FilterOperator`], [`QueryMode`], [`SortDirection`]: the enumerated
//!   vocabularies the query model accepts
//! - [`QuerySchema`], [`ReportSchema`]: wire-format generations
//! - [`ids`]: identifier generation for query elements and blocks
//! - [`gateway`]: command/query envelopes and response validation
//!
//! # Example
//!
//! ```rust
//! use polyteia_core::{FilterOperator, QueryMode};
//!
//! let op: FilterOperator = "greater_than".parse().unwrap();
//! assert_eq!(op, FilterOperator::GreaterThan);
//!
//! assert!("bogus".parse::<QueryMode>().is_err());
//! ```

mod error;
pub mod gateway;
pub mod ids;
mod schema;
mod vocab;

pub use error::{SdkError, SdkErrorKind, SdkResult};
pub use gateway::{Expectation, GatewayRequest, GatewayResponse, RequestKind};
pub use schema::{QuerySchema, ReportSchema};
pub use vocab::{FilterOperator, QueryMode, SortDirection};
