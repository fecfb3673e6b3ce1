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

//! Report fixtures.

use polyteia_report::{
    ColumnLayout, HeadingLevel, ListType, Report, ReportBuilder, TextAlign, TextFormatting,
};
use serde_json::{json, Value};

/// A report touching every block kind, with a two-column section holding
/// two widgets.
pub fn overview_builder() -> ReportBuilder {
    let mut builder = ReportBuilder::new();
    builder
        .set_organization("org_1")
        .set_solution("sol_1")
        .set_name("Overview")
        .set_description("Quarterly numbers")
        .add_heading("Overview", HeadingLevel::H1, Some(TextAlign::Center))
        .add_text("Highlights", Some(TextFormatting::new().bold()), None)
        .add_list(["one", "two"], ListType::Numbered)
        .add_table(vec![vec!["Region", "Revenue"], vec!["EU", "10"]], true)
        .add_horizontal_rule()
        .add_link("Docs", "https://example.org")
        .add_blockquote("Quote")
        .add_code("SELECT 1", Some("sql"))
        .add_date("2024-06-30")
        .add_toggle("Details", "Hidden text")
        .add_equation("E = mc^2", false);

    builder
        .start_columns(ColumnLayout::TwoEqual)
        .expect("non-empty layout")
        .add_widget("insight_1", Some(400));
    builder
        .next_column()
        .expect("second column")
        .add_widget("insight_2", None)
        .end_columns();
    builder
}

pub fn overview_report() -> Report {
    overview_builder().build()
}

/// A report as returned by `get_report`.
pub fn stored_report() -> Value {
    json!({
        "id": "rep_1",
        "name": "Stored",
        "description": "As saved",
        "version": 3,
        "structure": {"editorState": [
            {"type": "widget", "id": "w1", "widgetData": {"insightId": "insight_1"}, "children": [{"text": ""}]}
        ]},
        "metadata": {"insights": ["insight_1", "insight_stale"]}
    })
}
