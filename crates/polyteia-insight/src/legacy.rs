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

//! Deprecated v3 insight schema.
//!
//! The v3 generation predates SQL variables and pivot tables. Converting a
//! current insight down drops both; converting up fills them with defaults.

use crate::model::{
    DatasetRef, Insight, Pivot, Predicate, Projection, Query, QueryBody, SortSpec, SqlEditor,
};
use polyteia_core::{QueryMode, QuerySchema, SdkResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySqlEditor {
    pub sql_string: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyQueryBody {
    pub version: u32,
    pub datasets: Vec<DatasetRef>,
    pub select: Vec<Projection>,
    #[serde(rename = "where")]
    pub filters: Vec<Predicate>,
    pub order_by: Vec<SortSpec>,
    pub limit: Option<u64>,
}

impl Default for LegacyQueryBody {
    fn default() -> Self {
        Self {
            version: QuerySchema::V3.builder_version(),
            datasets: Vec::new(),
            select: Vec::new(),
            filters: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyQuery {
    pub version: u32,
    pub mode: QueryMode,
    pub sql_editor: LegacySqlEditor,
    pub query_builder: LegacyQueryBody,
}

impl Default for LegacyQuery {
    fn default() -> Self {
        Self {
            version: QuerySchema::V3.query_version(),
            mode: QueryMode::default(),
            sql_editor: LegacySqlEditor::default(),
            query_builder: LegacyQueryBody::default(),
        }
    }
}

/// An insight in the deprecated v3 schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegacyInsight {
    pub solution_id: String,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub query: LegacyQuery,
    pub config: Option<Value>,
}

impl LegacyInsight {
    pub fn to_json_string(&self, pretty: bool) -> SdkResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

const SCHEMA: QuerySchema = QuerySchema::V3;

impl From<&Insight> for LegacyInsight {
    fn from(insight: &Insight) -> Self {
        let query = &insight.query;
        if !SCHEMA.supports_sql_variables() && !query.sql_editor.variables.is_empty() {
            warn!(
                schema = %SCHEMA,
                count = query.sql_editor.variables.len(),
                "schema has no sql variables, dropping them"
            );
        }
        if !SCHEMA.supports_pivot() && query.query_builder.pivot.enabled {
            warn!(schema = %SCHEMA, "schema has no pivot support, dropping pivot");
        }
        let body = &query.query_builder;
        Self {
            solution_id: insight.solution_id.clone(),
            name: insight.name.clone(),
            description: insight.description.clone(),
            slug: insight.slug.clone(),
            query: LegacyQuery {
                version: SCHEMA.query_version(),
                mode: query.mode,
                sql_editor: LegacySqlEditor {
                    sql_string: query.sql_editor.sql_string.clone(),
                },
                query_builder: LegacyQueryBody {
                    version: SCHEMA.builder_version(),
                    datasets: body.datasets.clone(),
                    select: body.select.clone(),
                    filters: body.filters.clone(),
                    order_by: body.order_by.clone(),
                    limit: body.limit,
                },
            },
            config: insight.config.clone(),
        }
    }
}

impl From<Insight> for LegacyInsight {
    fn from(insight: Insight) -> Self {
        Self::from(&insight)
    }
}

impl From<LegacyInsight> for Insight {
    fn from(legacy: LegacyInsight) -> Self {
        if QuerySchema::from_query_version(legacy.query.version) != Some(SCHEMA) {
            warn!(
                version = legacy.query.version,
                "upgrading insight with unexpected query version"
            );
        }
        let LegacyQuery {
            mode,
            sql_editor,
            query_builder: body,
            ..
        } = legacy.query;
        Insight {
            solution_id: legacy.solution_id,
            name: legacy.name,
            description: legacy.description,
            slug: legacy.slug,
            query: Query {
                version: QuerySchema::V4.query_version(),
                mode,
                sql_editor: SqlEditor {
                    sql_string: sql_editor.sql_string,
                    variables: Vec::new(),
                },
                query_builder: QueryBody {
                    version: QuerySchema::V4.builder_version(),
                    datasets: body.datasets,
                    select: body.select,
                    filters: body.filters,
                    order_by: body.order_by,
                    pivot: Pivot::default(),
                    limit: body.limit,
                },
            },
            config: legacy.config,
        }
    }
}
