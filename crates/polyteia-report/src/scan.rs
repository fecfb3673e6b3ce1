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

//! Reference scanning over raw JSON.
//!
//! Reports fetched from the gateway and insight payloads handed to the
//! builder are untyped JSON; these helpers pull the ids out of them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;

static DATASET_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*(ds_[A-Za-z0-9_-]+)\s*\}\}").expect("dataset placeholder regex")
});

/// Collect the insight id of every widget node anywhere in `structure`.
///
/// A widget node is an object with `"type": "widget"` and a
/// `widgetData.insightId` string. Nesting depth and container keys do not
/// matter: sections, columns and toggles are all searched.
pub fn insight_ids(structure: &Value) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    collect_insight_ids(structure, &mut found);
    found
}

fn collect_insight_ids(value: &Value, found: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("widget") {
                let id = map
                    .get("widgetData")
                    .and_then(|data| data.get("insightId"))
                    .and_then(Value::as_str)
                    .filter(|id| !id.is_empty());
                if let Some(id) = id {
                    found.insert(id.to_string());
                }
            }
            for child in map.values() {
                collect_insight_ids(child, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_insight_ids(item, found);
            }
        }
        _ => {}
    }
}

/// Dataset ids referenced by an insight payload, in first-seen order.
///
/// In `sqlEditor` mode the ids are the `{{ds_...}}` placeholders of the SQL
/// string; otherwise they are the structured query's dataset list.
pub fn dataset_ids(insight: &Value) -> Vec<String> {
    let query = &insight["query"];
    let mut ids: Vec<String> = Vec::new();
    let mut push = |id: &str| {
        if !id.is_empty() && !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    };

    if query["mode"].as_str() == Some("sqlEditor") {
        let sql = query["sqlEditor"]["sqlString"].as_str().unwrap_or_default();
        for caps in DATASET_PLACEHOLDER.captures_iter(sql) {
            push(&caps[1]);
        }
    } else if let Some(datasets) = query["queryBuilder"]["datasets"].as_array() {
        for ds in datasets {
            if let Some(id) = ds["datasetId"].as_str() {
                push(id);
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insight_ids_nested() {
        let structure = json!({
            "editorState": [
                {"type": "widget", "widgetData": {"insightId": "a"}},
                {"type": "column_group", "children": [
                    {"type": "column", "children": [
                        {"type": "widget", "widgetData": {"insightId": "b"}},
                        {"type": "widget", "widgetData": {"insightId": "a"}}
                    ]}
                ]},
                {"type": "p", "widgetData": {"insightId": "not-a-widget"}},
                {"type": "widget", "widgetData": {}}
            ]
        });
        let ids: Vec<_> = insight_ids(&structure).into_iter().collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_insight_ids_top_level_list() {
        let structure = json!([[{"type": "widget", "widgetData": {"insightId": "x"}}]]);
        assert!(insight_ids(&structure).contains("x"));
        assert!(insight_ids(&json!("widget")).is_empty());
    }

    #[test]
    fn test_dataset_ids_from_query_builder() {
        let insight = json!({
            "query": {
                "mode": "queryBuilder",
                "queryBuilder": {"datasets": [
                    {"datasetId": "ds1"}, {"datasetId": "ds2"}, {"datasetId": "ds1"}
                ]}
            }
        });
        assert_eq!(dataset_ids(&insight), vec!["ds1", "ds2"]);
    }

    #[test]
    fn test_dataset_ids_from_sql_placeholders() {
        let insight = json!({
            "query": {
                "mode": "sqlEditor",
                "sqlEditor": {
                    "sqlString": "SELECT * FROM '{{ds_abc123}}' JOIN '{{ ds_x-9 }}' ON 1=1 -- {{other}}"
                },
                "queryBuilder": {"datasets": [{"datasetId": "ignored"}]}
            }
        });
        assert_eq!(dataset_ids(&insight), vec!["ds_abc123", "ds_x-9"]);
    }

    #[test]
    fn test_dataset_ids_missing_query() {
        assert!(dataset_ids(&json!({"id": "i"})).is_empty());
    }
}
