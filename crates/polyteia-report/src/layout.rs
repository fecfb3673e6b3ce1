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

//! Column layouts and report options.

use polyteia_core::{
    ids::{self, DEFAULT_BLOCK_ID_LEN},
    ReportSchema,
};

const THIRD: &str = "33.333333333333336%";

/// Widths of a column group: a named preset or explicit width strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnLayout {
    /// 50% / 50%
    TwoEqual,
    /// 70% / 30%
    LeftWide,
    /// 30% / 70%
    RightWide,
    /// Three equal thirds.
    ThreeEqual,
    /// 25% / 50% / 25%
    CenterWide,
    Custom(Vec<String>),
}

impl ColumnLayout {
    pub fn widths(&self) -> Vec<String> {
        let preset: &[&str] = match self {
            Self::TwoEqual => &["50%", "50%"],
            Self::LeftWide => &["70%", "30%"],
            Self::RightWide => &["30%", "70%"],
            Self::ThreeEqual => &[THIRD, THIRD, THIRD],
            Self::CenterWide => &["25%", "50%", "25%"],
            Self::Custom(widths) => return widths.clone(),
        };
        preset.iter().map(|w| w.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        match self {
            Self::TwoEqual | Self::LeftWide | Self::RightWide => 2,
            Self::ThreeEqual | Self::CenterWide => 3,
            Self::Custom(widths) => widths.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<String>> for ColumnLayout {
    fn from(widths: Vec<String>) -> Self {
        Self::Custom(widths)
    }
}

impl From<Vec<&str>> for ColumnLayout {
    fn from(widths: Vec<&str>) -> Self {
        Self::Custom(widths.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnLayout {
    fn from(widths: [&str; N]) -> Self {
        Self::Custom(widths.iter().map(|w| w.to_string()).collect())
    }
}

/// Options of a [`ReportBuilder`](crate::ReportBuilder).
///
/// # Examples
///
/// ```rust
/// use polyteia_core::ReportSchema;
/// use polyteia_report::ReportOptions;
///
/// let options = ReportOptions::new()
///     .fill_empty_columns(false)
///     .schema(ReportSchema::Legacy);
/// assert_eq!(options.block_id_len, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Insert an empty paragraph into every column left empty when a
    /// column group is closed.
    pub fill_empty_columns: bool,
    /// Length of generated block ids, kept within 8..=32.
    pub block_id_len: usize,
    pub schema: ReportSchema,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            fill_empty_columns: true,
            block_id_len: DEFAULT_BLOCK_ID_LEN,
            schema: ReportSchema::default(),
        }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_empty_columns(mut self, fill: bool) -> Self {
        self.fill_empty_columns = fill;
        self
    }

    /// Set the block id length; values outside `8..=32` are clamped.
    pub fn block_id_len(mut self, len: usize) -> Self {
        self.block_id_len = ids::clamp_block_id_len(len);
        self
    }

    pub fn schema(mut self, schema: ReportSchema) -> Self {
        self.schema = schema;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(ColumnLayout::TwoEqual.widths(), vec!["50%", "50%"]);
        assert_eq!(ColumnLayout::LeftWide.widths(), vec!["70%", "30%"]);
        assert_eq!(ColumnLayout::RightWide.widths(), vec!["30%", "70%"]);
        assert_eq!(ColumnLayout::CenterWide.widths(), vec!["25%", "50%", "25%"]);
        assert_eq!(ColumnLayout::ThreeEqual.widths(), vec![THIRD; 3]);
        assert_eq!(ColumnLayout::ThreeEqual.len(), 3);
    }

    #[test]
    fn test_custom_layouts() {
        let layout: ColumnLayout = ["60%", "40%"].into();
        assert_eq!(layout.widths(), vec!["60%", "40%"]);
        assert!(ColumnLayout::from(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_default_options() {
        let options = ReportOptions::default();
        assert!(options.fill_empty_columns);
        assert_eq!(options.block_id_len, 10);
        assert_eq!(options.schema, ReportSchema::Current);
    }

    #[test]
    fn test_block_id_len_is_clamped() {
        assert_eq!(ReportOptions::new().block_id_len(0).block_id_len, 8);
        assert_eq!(ReportOptions::new().block_id_len(4).block_id_len, 8);
        assert_eq!(ReportOptions::new().block_id_len(20).block_id_len, 20);
        assert_eq!(ReportOptions::new().block_id_len(99).block_id_len, 32);
    }
}
