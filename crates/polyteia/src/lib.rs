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

//! # Polyteia SDK
//!
//! Fluent builders for the two documents the Polyteia platform stores:
//! insights (a saved analytical query plus its visualization) and reports
//! (rich-text pages that embed insights as widgets).
//!
//! Both builders are pure in-memory constructions. They produce plain JSON
//! that is sent to the API gateway inside a command envelope; the transport
//! itself is left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use polyteia::{insight, report, HeadingLevel, SdkResult, SelectSpec};
//!
//! # fn main() -> SdkResult<()> {
//! let mut query = insight();
//! query
//!     .set_solution("sol_1")
//!     .set_name("Inhabitants per district")
//!     .add_dataset("ds_people")
//!     .add_select("district")
//!     .add_select(SelectSpec::new("inhabitants").aggregate("sum"))
//!     .set_limit(20)?;
//! let request = query.build().create_request()?;
//! assert_eq!(request.name, "create_insight");
//!
//! let mut page = report();
//! page.set_name("District overview")
//!     .add_heading("Districts", HeadingLevel::H1, None)
//!     .add_widget("insight_1", None);
//! let json = page.build().to_json_string(false)?;
//! assert!(json.contains("\"insightId\":\"insight_1\""));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`gateway`]: command/query envelopes and response validation
//! - [`visualization`]: chart configs for insights
//! - [`scan`]: reference scanning over stored reports
//!
//! ## Errors
//!
//! Every fallible call returns [`SdkResult`]. Invalid values fail at the
//! call that introduced them; `build()` never fails. [`SdkResultExt`] adds
//! context as errors propagate.

pub use polyteia_core::{
    ids, FilterOperator, QueryMode, QuerySchema, ReportSchema, SdkError, SdkErrorKind,
    SdkResult, SortDirection,
};

pub use polyteia_insight::{
    ColumnRef, DatasetRef, Insight, InsightBuilder, InsightPayload, Join, LegacyInsight,
    OrderSpec, Pivot, Predicate, Projection, Query, QueryBody, SelectSpec, SortSpec, SqlEditor,
    SqlVariable, Visualization,
};

pub use polyteia_report::{
    Block, ColumnLayout, HeadingLevel, InsightDiff, ListType, Report, ReportBuilder,
    ReportMetadata, ReportOptions, ReportUpdate, TextAlign, TextFormatting, TextRun,
    ToggleContent,
};

mod error_ext;
pub use error_ext::SdkResultExt;

pub mod gateway {
    //! Gateway envelopes and response validation
    pub use polyteia_core::gateway::{
        commands, queries, Expectation, GatewayRequest, GatewayResponse, RequestKind,
    };
}

pub mod visualization {
    //! Chart configurations
    pub use polyteia_insight::visualization::*;
}

pub mod scan {
    //! Reference scanning over stored reports and insight payloads
    pub use polyteia_report::scan::{dataset_ids, insight_ids};
}

use gateway::{Expectation, GatewayResponse};
use serde_json::Value;
use tracing::debug;

/// Start a new insight.
#[inline]
pub fn insight() -> InsightBuilder {
    InsightBuilder::new()
}

/// Start a new report with default options.
#[inline]
pub fn report() -> ReportBuilder {
    ReportBuilder::new()
}

/// Start a new report with explicit options.
#[inline]
pub fn report_with(options: ReportOptions) -> ReportBuilder {
    ReportBuilder::with_options(options)
}

/// Extract the id of a freshly created resource from a gateway answer.
///
/// The answer must be JSON of the form `{"data": {"id": "..."}}` with a
/// 200 or 201 status.
///
/// # Examples
///
/// ```rust
/// use polyteia::created_id;
/// use polyteia::gateway::GatewayResponse;
///
/// let resp = GatewayResponse::new(201, "application/json", r#"{"data": {"id": "ins_1"}}"#);
/// assert_eq!(created_id(resp, "Create insight").unwrap(), "ins_1");
/// ```
pub fn created_id(response: GatewayResponse, context: &str) -> SdkResult<String> {
    let expect = Expectation::new(context).require(&["data", "id"]);
    let data = response.into_data(&expect)?;
    let id = match data.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    debug!(context, id = %id, "resource created");
    Ok(id)
}
