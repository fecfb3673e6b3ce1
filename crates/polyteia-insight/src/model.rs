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

//! Wire model of an insight in the current (v4) schema generation.
//!
//! Field names follow the gateway's camelCase JSON; the insight envelope
//! itself keeps the snake_case keys the gateway expects for its params.

use polyteia_core::gateway::commands;
use polyteia_core::{
    FilterOperator, GatewayRequest, QueryMode, QuerySchema, SdkResult, SortDirection,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Join specification of a dataset reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    /// Join kind, e.g. `inner` or `left`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Join conditions, passed through verbatim.
    pub on: Vec<Value>,
}

impl Join {
    pub fn new(kind: impl Into<String>, on: Vec<Value>) -> Self {
        Self {
            kind: kind.into(),
            on,
        }
    }

    pub fn inner() -> Self {
        Self::new("inner", Vec::new())
    }
}

impl Default for Join {
    fn default() -> Self {
        Self::inner()
    }
}

/// A dataset taking part in a structured query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRef {
    pub dataset_id: String,
    pub join: Join,
}

/// A selected output column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub id: String,
    pub dataset_id: String,
    pub column_id: String,
    pub aggregate: Option<String>,
    pub label: String,
}

/// Column reference used by filters and order-bys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRef {
    pub dataset_id: String,
    pub column_id: String,
    pub aggregate: Option<String>,
}

/// A filter condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub id: String,
    pub column: ColumnRef,
    pub operator: FilterOperator,
    pub value: Value,
}

/// An order-by clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub id: String,
    pub column: ColumnRef,
    pub direction: SortDirection,
}

/// Pivot settings of the structured body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pivot {
    pub enabled: bool,
    pub columns: Vec<Value>,
    pub rows: Vec<Value>,
    pub values: Vec<Value>,
}

impl Pivot {
    /// An enabled pivot over the given columns, rows and values.
    pub fn enabled(columns: Vec<Value>, rows: Vec<Value>, values: Vec<Value>) -> Self {
        Self {
            enabled: true,
            columns,
            rows,
            values,
        }
    }
}

/// A parameter of a raw SQL query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlVariable {
    pub id: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub input_option: String,
    pub dropdown_option: String,
    pub available_values_source: String,
    pub custom_values: String,
    pub default_value: Option<String>,
    pub always_required: bool,
}

impl SqlVariable {
    /// A required single-choice text dropdown fed by custom values.
    pub fn new(id: impl Into<String>, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            label: label.into(),
            kind: "text".to_string(),
            input_option: "dropdown".to_string(),
            dropdown_option: "single".to_string(),
            available_values_source: "custom".to_string(),
            custom_values: String::new(),
            default_value: None,
            always_required: true,
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn input_option(mut self, option: impl Into<String>) -> Self {
        self.input_option = option.into();
        self
    }

    pub fn dropdown_option(mut self, option: impl Into<String>) -> Self {
        self.dropdown_option = option.into();
        self
    }

    pub fn available_values_source(mut self, source: impl Into<String>) -> Self {
        self.available_values_source = source.into();
        self
    }

    pub fn custom_values(mut self, values: impl Into<String>) -> Self {
        self.custom_values = values.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn always_required(mut self, required: bool) -> Self {
        self.always_required = required;
        self
    }
}

/// Raw SQL body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlEditor {
    pub sql_string: String,
    #[serde(default)]
    pub variables: Vec<SqlVariable>,
}

/// Structured query body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBody {
    pub version: u32,
    pub datasets: Vec<DatasetRef>,
    pub select: Vec<Projection>,
    #[serde(rename = "where")]
    pub filters: Vec<Predicate>,
    pub order_by: Vec<SortSpec>,
    #[serde(default)]
    pub pivot: Pivot,
    pub limit: Option<u64>,
}

impl Default for QueryBody {
    fn default() -> Self {
        Self {
            version: QuerySchema::V4.builder_version(),
            datasets: Vec::new(),
            select: Vec::new(),
            filters: Vec::new(),
            order_by: Vec::new(),
            pivot: Pivot::default(),
            limit: None,
        }
    }
}

/// The query of an insight: a mode plus both bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub version: u32,
    pub mode: QueryMode,
    pub sql_editor: SqlEditor,
    pub query_builder: QueryBody,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            version: QuerySchema::V4.query_version(),
            mode: QueryMode::default(),
            sql_editor: SqlEditor::default(),
            query_builder: QueryBody::default(),
        }
    }
}

/// An insight payload as accepted by `create_insight`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Insight {
    pub solution_id: String,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub query: Query,
    pub config: Option<Value>,
}

impl Insight {
    /// Serialize to a JSON string.
    pub fn to_json_string(&self, pretty: bool) -> SdkResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// The `create_insight` command envelope.
    pub fn create_request(&self) -> SdkResult<GatewayRequest> {
        Ok(GatewayRequest::command(
            commands::CREATE_INSIGHT,
            serde_json::to_value(self)?,
        ))
    }

    /// The `update_insight` command envelope for an existing insight.
    pub fn update_request(&self, insight_id: &str) -> SdkResult<GatewayRequest> {
        Ok(GatewayRequest::update(
            commands::UPDATE_INSIGHT,
            insight_id,
            serde_json::to_value(self)?,
        ))
    }

    /// Ids of every dataset the structured body references.
    pub fn dataset_ids(&self) -> Vec<&str> {
        self.query
            .query_builder
            .datasets
            .iter()
            .map(|ds| ds.dataset_id.as_str())
            .collect()
    }
}
