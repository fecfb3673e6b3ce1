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

//! Report builder for the Polyteia SDK.
//!
//! A report is a rich-text document of [`Block`]s, optionally embedding
//! insights as widgets. [`ReportBuilder`] appends blocks to the top-level
//! content or, while a column group is open, to the active column, and
//! tracks the insights and datasets the report references.
//!
//! # Column groups
//!
//! ```rust
//! use polyteia_report::{ColumnLayout, ReportBuilder};
//!
//! # fn main() -> polyteia_core::SdkResult<()> {
//! let mut builder = ReportBuilder::new();
//! builder.start_columns(ColumnLayout::LeftWide)?;
//! builder.add_text("Left", None, None);
//! builder.next_column()?;
//! assert!(builder.next_column().is_err());
//!
//! // `build` closes the group; the empty right column gets a placeholder.
//! let report = builder.build();
//! let json = report.to_json();
//! assert_eq!(json["content"]["editorState"][0]["type"], "column_group");
//! # Ok(())
//! # }
//! ```
//!
//! [`scan`] and [`ReportUpdate`] work on reports as stored by the gateway.

mod block;
mod builder;
mod layout;
pub mod scan;
mod update;

pub use block::{
    Block, Column, ColumnGroup, HeadingLevel, ListType, TextAlign, TextFormatting, TextRun,
    ToggleContent, Widget,
};
pub use builder::{Report, ReportBuilder, ReportMetadata};
pub use layout::{ColumnLayout, ReportOptions};
pub use update::{InsightDiff, ReportUpdate};
