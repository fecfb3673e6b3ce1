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

//! Insight fixtures.

use polyteia_insight::{BarChart, Insight, InsightBuilder, Projection, SelectSpec};
use serde_json::{json, Value};

/// A projection with a fixed id, for chart helpers and bulk appends.
pub fn projection(column_id: &str, dataset_id: &str) -> Projection {
    Projection {
        id: format!("sel_{}", column_id),
        dataset_id: dataset_id.to_string(),
        column_id: column_id.to_string(),
        aggregate: None,
        label: column_id.to_string(),
    }
}

/// Revenue by region: one dataset, a summed select, an equality filter,
/// a limit of 50 and a bar chart.
pub fn revenue_builder() -> InsightBuilder {
    let mut builder = InsightBuilder::new();
    builder
        .set_solution("sol_1")
        .set_name("Revenue by region")
        .set_slug("revenue-by-region")
        .add_dataset("ds1")
        .add_select(SelectSpec::new("region").id("sel_region"))
        .add_select(
            SelectSpec::new("revenue")
                .aggregate("sum")
                .label("Total Revenue")
                .id("sel_revenue"),
        );
    builder
        .add_filter("region", "equals", "EU")
        .expect("valid operator");
    builder.set_limit(50).expect("non-negative limit");

    let x = builder.selects()[0].clone();
    let y = builder.selects()[1].clone();
    builder.set_bar_chart(BarChart::new(&x, &y));
    builder
}

pub fn revenue_insight() -> Insight {
    revenue_builder().build()
}

/// A stored insight payload as returned by `get_insight`, in sqlEditor mode
/// with two dataset placeholders.
pub fn sql_insight_payload() -> Value {
    json!({
        "id": "insight_sql",
        "solution_id": "sol_1",
        "name": "Joined",
        "description": "",
        "slug": "joined",
        "query": {
            "version": 4,
            "mode": "sqlEditor",
            "sqlEditor": {
                "sqlString": "SELECT * FROM '{{ds_orders}}' o JOIN '{{ds_customers}}' c ON o.cid = c.id",
                "variables": []
            },
            "queryBuilder": {
                "version": 3, "datasets": [], "select": [], "where": [],
                "orderBy": [], "limit": null
            }
        },
        "config": null
    })
}

/// A stored insight payload in queryBuilder mode reading from `ds1`.
pub fn builder_insight_payload() -> Value {
    let mut value = serde_json::to_value(revenue_insight()).expect("insight serializes");
    if let Value::Object(map) = &mut value {
        map.insert("id".to_string(), json!("insight_revenue"));
    }
    value
}
