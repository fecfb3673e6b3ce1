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

//! Partial report updates.
//!
//! An update overlays the fields that are set onto the report as currently
//! stored, producing the `update_report` params. When the structure
//! changes, the insights linked to the report are reconciled against the
//! widgets the new structure actually contains.

use crate::scan;
use polyteia_core::gateway::{commands, queries};
use polyteia_core::{GatewayRequest, SdkError, SdkResult};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use tracing::debug;

const CARRIED_KEYS: [&str; 4] = ["name", "description", "version", "structure"];

/// Fields to change on an existing report. Unset fields keep their
/// current value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub structure: Option<Value>,
    pub metadata: Option<Value>,
}

impl ReportUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn structure(mut self, structure: Value) -> Self {
        self.structure = Some(structure);
        self
    }

    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.structure.is_none()
            && self.metadata.is_none()
    }

    /// The `get_report` query fetching the stored report that
    /// [`params`](Self::params) overlays.
    pub fn fetch_request(report_id: &str) -> GatewayRequest {
        GatewayRequest::query(queries::GET_REPORT, json!({ "id": report_id }))
    }

    /// Build the `update_report` params from the current report data.
    ///
    /// `current` is the `data` object of a `get_report` answer and must
    /// carry `name`, `description`, `version` and `structure`; `metadata`
    /// is carried over when present.
    pub fn params(&self, report_id: &str, current: &Value) -> SdkResult<Value> {
        let mut params = Map::new();
        params.insert("id".to_string(), json!(report_id));
        for key in CARRIED_KEYS {
            let value = current.get(key).ok_or_else(|| {
                SdkError::gateway(format!("Missing key '{}' in current report", key))
                    .with_context("Update report")
            })?;
            params.insert(key.to_string(), value.clone());
        }
        if let Some(metadata) = current.get("metadata") {
            params.insert("metadata".to_string(), metadata.clone());
        }

        if let Some(name) = &self.name {
            params.insert("name".to_string(), json!(name));
        }
        if let Some(description) = &self.description {
            params.insert("description".to_string(), json!(description));
        }
        if let Some(structure) = &self.structure {
            params.insert("structure".to_string(), structure.clone());
        }
        if let Some(metadata) = &self.metadata {
            params.insert("metadata".to_string(), metadata.clone());
        }
        Ok(Value::Object(params))
    }

    /// The `update_report` command envelope.
    pub fn to_request(&self, report_id: &str, current: &Value) -> SdkResult<GatewayRequest> {
        let params = self.params(report_id, current)?;
        Ok(GatewayRequest::update(commands::UPDATE_REPORT, report_id, params))
    }

    /// Insight links to add and remove, if the structure changes.
    pub fn insight_diff(&self, current: &Value) -> Option<InsightDiff> {
        let structure = self.structure.as_ref()?;
        let linked: BTreeSet<String> = current["metadata"]["insights"]
            .as_array()
            .map(|ids| {
                ids.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let diff = InsightDiff::between(&linked, &scan::insight_ids(structure));
        debug!(
            to_add = diff.to_add.len(),
            to_remove = diff.to_remove.len(),
            "reconciled report insights"
        );
        Some(diff)
    }
}

/// Insight links that differ between a stored report and its new structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InsightDiff {
    pub to_add: Vec<String>,
    pub to_remove: Vec<String>,
}

impl InsightDiff {
    pub fn between(current: &BTreeSet<String>, wanted: &BTreeSet<String>) -> Self {
        Self {
            to_add: wanted.difference(current).cloned().collect(),
            to_remove: current.difference(wanted).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// `add_insight_to_report` / `remove_insight_from_report` commands,
    /// additions first.
    pub fn requests(&self, report_id: &str) -> Vec<GatewayRequest> {
        let link = |command: &str, insight_id: &String| {
            GatewayRequest::command(
                command,
                json!({"insight_id": insight_id, "report_id": report_id}),
            )
        };
        self.to_add
            .iter()
            .map(|id| link(commands::ADD_INSIGHT_TO_REPORT, id))
            .chain(
                self.to_remove
                    .iter()
                    .map(|id| link(commands::REMOVE_INSIGHT_FROM_REPORT, id)),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Value {
        json!({
            "id": "rep_1",
            "name": "Old",
            "description": "desc",
            "version": 7,
            "structure": {"editorState": []},
            "metadata": {"insights": ["a", "b"]}
        })
    }

    #[test]
    fn test_params_carry_current_values() {
        let params = ReportUpdate::new().params("rep_1", &stored()).unwrap();
        assert_eq!(
            params,
            json!({
                "id": "rep_1",
                "name": "Old",
                "description": "desc",
                "version": 7,
                "structure": {"editorState": []},
                "metadata": {"insights": ["a", "b"]}
            })
        );
    }

    #[test]
    fn test_params_overlay_set_fields() {
        let update = ReportUpdate::new().name("New").structure(json!({"editorState": [1]}));
        let params = update.params("rep_1", &stored()).unwrap();
        assert_eq!(params["name"], "New");
        assert_eq!(params["description"], "desc");
        assert_eq!(params["structure"], json!({"editorState": [1]}));
    }

    #[test]
    fn test_params_require_current_keys() {
        let err = ReportUpdate::new()
            .params("rep_1", &json!({"name": "x"}))
            .unwrap_err();
        assert_eq!(err.context.as_deref(), Some("Update report"));
        assert!(err.message.contains("description"));
    }

    #[test]
    fn test_fetch_request() {
        assert_eq!(
            ReportUpdate::fetch_request("rep_1").to_json(),
            json!({"query": "get_report", "params": {"id": "rep_1"}})
        );
    }

    #[test]
    fn test_request_envelope() {
        let request = ReportUpdate::new()
            .description("d")
            .to_request("rep_1", &stored())
            .unwrap();
        let value = request.to_json();
        assert_eq!(value["command"], "update_report");
        assert_eq!(value["params"]["id"], "rep_1");
        assert_eq!(value["params"]["description"], "d");
    }

    #[test]
    fn test_no_diff_without_structure() {
        assert!(ReportUpdate::new().name("x").insight_diff(&stored()).is_none());
    }

    #[test]
    fn test_insight_diff() {
        let structure = json!({"editorState": [
            {"type": "widget", "widgetData": {"insightId": "b"}},
            {"type": "widget", "widgetData": {"insightId": "c"}}
        ]});
        let diff = ReportUpdate::new()
            .structure(structure)
            .insight_diff(&stored())
            .unwrap();
        assert_eq!(diff.to_add, vec!["c"]);
        assert_eq!(diff.to_remove, vec!["a"]);

        let requests = diff.requests("rep_1");
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].name, "add_insight_to_report");
        assert_eq!(requests[1].name, "remove_insight_from_report");
        assert_eq!(
            requests[1].params,
            json!({"insight_id": "a", "report_id": "rep_1"})
        );
    }

    #[test]
    fn test_diff_with_missing_metadata() {
        let current = json!({"name": "n"});
        let diff = ReportUpdate::new()
            .structure(json!([]))
            .insight_diff(&current)
            .unwrap();
        assert!(diff.is_empty());
    }
}
