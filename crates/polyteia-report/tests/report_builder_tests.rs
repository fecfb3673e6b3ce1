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

//! End-to-end tests of the report builder against the wire format.

use polyteia_core::ReportSchema;
use polyteia_report::{
    scan, ColumnLayout, ReportBuilder, ReportOptions, ReportUpdate, TextFormatting, TextRun,
};
use polyteia_test::{count_nodes, fixtures, node_types};
use serde_json::{json, Value};
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_target(true)
        .with_test_writer()
        .try_init();
}

fn editor_state(value: &Value) -> &Vec<Value> {
    value["content"]["editorState"].as_array().unwrap()
}

#[test]
fn test_overview_report_shape() {
    init_tracing();
    let value = fixtures::overview_report().to_json();

    assert_eq!(value["organization_id"], "org_1");
    assert_eq!(value["solution_id"], "sol_1");
    assert_eq!(value["name"], "Overview");
    assert_eq!(value["description"], "Quarterly numbers");
    assert_eq!(value["metadata"], json!({"insights": ["insight_1", "insight_2"]}));

    let types: Vec<&str> = editor_state(&value)
        .iter()
        .map(|b| b["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        vec![
            "h1", "p", "list", "table", "hr", "link", "blockquote", "code_block", "date",
            "toggle", "equation", "column_group"
        ]
    );
    for block in editor_state(&value) {
        assert_eq!(block["id"].as_str().unwrap().len(), 10);
        assert!(block["children"].is_array());
    }
}

#[test]
fn test_columns_hold_widgets() {
    let value = fixtures::overview_report().to_json();
    let group = editor_state(&value).last().unwrap();
    let columns = group["children"].as_array().unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0]["width"], "50%");
    assert_eq!(columns[0]["children"][0]["widgetData"]["insightId"], "insight_1");
    assert_eq!(columns[0]["children"][0]["height"], 400);
    assert_eq!(columns[1]["children"][0]["widgetData"]["insightId"], "insight_2");
    assert_eq!(count_nodes(&value["content"]["editorState"], "p"), 1);
}

#[test]
fn test_repeated_widget_listed_once() {
    let mut builder = ReportBuilder::new();
    builder.add_widget("insight_1", None).add_widget("insight_1", None);
    let value = builder.build().to_json();
    assert_eq!(value["metadata"]["insights"], json!(["insight_1"]));
    assert_eq!(count_nodes(&value["content"]["editorState"], "widget"), 2);
}

#[test]
fn test_empty_columns_are_filled() {
    let mut builder = ReportBuilder::new();
    builder.start_columns(["50%", "50%"]).unwrap().end_columns();
    let value = builder.build().to_json();
    let group = &editor_state(&value)[0];
    for column in group["children"].as_array().unwrap() {
        let children = column["children"].as_array().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0]["type"], "p");
        assert_eq!(children[0]["children"], json!([{"text": ""}]));
    }
    assert_eq!(
        node_types(&value["content"]["editorState"]),
        vec!["column_group", "column", "p", "column", "p"]
    );
}

#[test]
fn test_only_empty_columns_are_filled() {
    let mut builder = ReportBuilder::new();
    builder
        .start_columns(ColumnLayout::CenterWide)
        .unwrap()
        .add_text("left", None, None);
    let value = builder.build().to_json();
    let group = &editor_state(&value)[0];
    assert_eq!(group["children"][0]["children"][0]["children"][0]["text"], "left");
    assert_eq!(group["children"][1]["children"][0]["children"][0]["text"], "");
    assert_eq!(group["children"][2]["width"], "25%");
}

#[test]
fn test_column_state_errors() {
    let mut builder = ReportBuilder::new();
    let err = builder.next_column().unwrap_err();
    assert_eq!(err.to_string(), "StateError: No active column group");

    builder.start_columns(ColumnLayout::TwoEqual).unwrap();
    builder.next_column().unwrap();
    let err = builder.next_column().unwrap_err();
    assert_eq!(err.to_string(), "StateError: No more columns available in this group");

    // The group is still usable after the failed call.
    builder.add_horizontal_rule().end_columns();
    assert!(builder.next_column().is_err());
}

#[test]
fn test_rich_paragraph_and_toggle() {
    let mut builder = ReportBuilder::new();
    builder
        .add_paragraph(
            vec![
                TextRun::plain("Plain "),
                TextRun::styled("red", TextFormatting::new().italic().color("red")),
            ],
            None,
        )
        .add_toggle("More", vec![json!({"text": "rich", "underline": true})]);
    let value = builder.build().to_json();
    let state = editor_state(&value);
    assert_eq!(
        state[0]["children"],
        json!([{"text": "Plain "}, {"text": "red", "italic": true, "color": "red"}])
    );
    assert_eq!(state[1]["children"][1]["children"][0]["underline"], true);
}

#[test]
fn test_insight_payload_widgets() {
    let mut builder = ReportBuilder::new();
    builder
        .add_insight_widget(&fixtures::sql_insight_payload(), Some(350))
        .unwrap()
        .add_insight_widget(&fixtures::builder_insight_payload(), None)
        .unwrap();
    let value = builder.build().to_json();

    assert_eq!(
        value["metadata"],
        json!({
            "insights": ["insight_sql", "insight_revenue"],
            "datasets": ["ds_orders", "ds_customers", "ds1"]
        })
    );
    let widget = &editor_state(&value)[0];
    assert_eq!(widget["widgetData"]["insight"]["name"], "Joined");
    assert_eq!(widget["height"], 350);
}

#[test]
fn test_legacy_schema_keeps_ids_only() {
    let mut builder =
        ReportBuilder::with_options(ReportOptions::new().schema(ReportSchema::Legacy));
    builder
        .add_insight_widget(&fixtures::sql_insight_payload(), None)
        .unwrap()
        .add_dataset("ds_extra");
    let value = builder.build().to_json();
    assert_eq!(value["metadata"], json!({"insights": ["insight_sql"]}));
    assert_eq!(
        editor_state(&value)[0]["widgetData"],
        json!({"insightId": "insight_sql"})
    );
}

#[test]
fn test_custom_block_id_length() {
    let mut builder = ReportBuilder::with_options(ReportOptions::new().block_id_len(16));
    builder.add_date("today");
    assert_eq!(builder.build().content[0].id().len(), 16);
}

#[test]
fn test_zero_block_id_length_still_yields_unique_ids() {
    let mut builder = ReportBuilder::with_options(ReportOptions::new().block_id_len(0));
    builder.add_horizontal_rule().add_horizontal_rule();
    let report = builder.build();

    let first = report.content[0].id();
    let second = report.content[1].id();
    assert_eq!(first.len(), 8);
    assert_ne!(first, second);
}

#[test]
fn test_short_block_id_length_set_directly_is_clamped() {
    let mut options = ReportOptions::new();
    options.block_id_len = 2;
    let mut builder = ReportBuilder::with_options(options);
    builder.add_date("today");
    assert_eq!(builder.build().content[0].id().len(), 8);
}

#[test]
fn test_built_report_scans_back() {
    let value = fixtures::overview_report().to_json();
    let ids: Vec<String> = scan::insight_ids(&value).into_iter().collect();
    assert_eq!(ids, vec!["insight_1", "insight_2"]);
}

#[test]
fn test_update_against_stored_report() {
    let stored = fixtures::stored_report();
    let new_structure = fixtures::overview_report().to_json()["content"].clone();
    let update = ReportUpdate::new()
        .name("Renamed")
        .structure(new_structure.clone());

    let request = update.to_request("rep_1", &stored).unwrap();
    let params = &request.params;
    assert_eq!(params["id"], "rep_1");
    assert_eq!(params["name"], "Renamed");
    assert_eq!(params["description"], "As saved");
    assert_eq!(params["version"], 3);
    assert_eq!(params["structure"], new_structure);

    let diff = update.insight_diff(&stored).unwrap();
    assert_eq!(diff.to_add, vec!["insight_2"]);
    assert_eq!(diff.to_remove, vec!["insight_stale"]);
    assert_eq!(diff.requests("rep_1").len(), 2);
}

#[test]
fn test_report_json_string() {
    let report = fixtures::overview_report();
    let compact = report.to_json_string(false).unwrap();
    let pretty = report.to_json_string(true).unwrap();
    assert!(!compact.contains('\n'));
    assert!(pretty.contains('\n'));
    let a: Value = serde_json::from_str(&compact).unwrap();
    let b: Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(a, b);
    assert_eq!(serde_json::to_value(&report).unwrap(), a);
}
