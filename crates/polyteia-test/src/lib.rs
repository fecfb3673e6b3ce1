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

//! Shared test fixtures for the Polyteia SDK crates.
//!
//! # Quick Start
//!
//! ```rust
//! use polyteia_test::fixtures;
//!
//! let insight = fixtures::revenue_insight();
//! assert_eq!(insight.query.query_builder.limit, Some(50));
//!
//! let report = fixtures::overview_report();
//! assert!(report.metadata.insights.contains(&"insight_1".to_string()));
//! ```

pub mod fixtures;

use serde_json::Value;

/// Walk every node of a built document and return the `type` of each,
/// depth first.
pub fn node_types(value: &Value) -> Vec<String> {
    let mut types = Vec::new();
    collect_types(value, &mut types);
    types
}

fn collect_types(value: &Value, types: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(kind) = map.get("type").and_then(Value::as_str) {
                types.push(kind.to_string());
            }
            if let Some(children) = map.get("children") {
                collect_types(children, types);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_types(item, types);
            }
        }
        _ => {}
    }
}

/// Count nodes whose `type` equals `kind`.
pub fn count_nodes(value: &Value, kind: &str) -> usize {
    node_types(value).iter().filter(|t| *t == kind).count()
}
