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

//! Insight builder for the Polyteia SDK.
//!
//! An insight is a saved analytical query plus an optional visualization.
//! [`InsightBuilder`] assembles one call by call and serializes it into the
//! payload the gateway's `create_insight` command expects.
//!
//! - [`model`]: the typed wire model ([`Insight`], [`Projection`], ...)
//! - [`visualization`]: chart configs derived from selects
//! - [`LegacyInsight`]: the deprecated v3 schema
//!
//! # Example
//!
//! ```rust
//! use polyteia_insight::{InsightBuilder, OrderSpec, SelectSpec};
//!
//! # fn main() -> polyteia_core::SdkResult<()> {
//! let mut builder = InsightBuilder::new();
//! builder
//!     .set_solution("sol_1")
//!     .set_name("Population")
//!     .add_dataset("ds_people")
//!     .add_select("district")
//!     .add_select(SelectSpec::new("inhabitants").aggregate("sum"))
//!     .add_order_by(OrderSpec::new("district"));
//! builder.add_filter("district", "not_equals", "unknown")?;
//!
//! let json = builder.build().to_json_string(false)?;
//! assert!(json.contains("\"where\""));
//! # Ok(())
//! # }
//! ```

mod builder;
mod legacy;
pub mod model;
pub mod visualization;

pub use builder::{InsightBuilder, InsightPayload, OrderSpec, SelectSpec};
pub use legacy::{LegacyInsight, LegacyQuery, LegacyQueryBody, LegacySqlEditor};
pub use model::{
    ColumnRef, DatasetRef, Insight, Join, Pivot, Predicate, Projection, Query, QueryBody,
    SortSpec, SqlEditor, SqlVariable,
};
pub use visualization::{
    BarChart, BarGroupType, BarLayout, BigNumber, Interpolation, LineChart, MapChart,
    MapLayerType, PieAppearance, PieChart, TableChart, TicksLayout, Visualization,
};
