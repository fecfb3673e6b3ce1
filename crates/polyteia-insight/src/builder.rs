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

//! Fluent insight builder.
//!
//! The builder is append-only: every `add_*` call appends one element and
//! nothing is ever removed. Invalid operators, modes and limits are rejected
//! at the call that introduced them, so [`InsightBuilder::build`] cannot
//! fail and may be called any number of times.

use crate::legacy::LegacyInsight;
use crate::model::{
    ColumnRef, DatasetRef, Insight, Join, Pivot, Predicate, Projection, Query, QueryBody,
    SortSpec, SqlEditor, SqlVariable,
};
use crate::visualization::{BarChart, BigNumber, LineChart, MapChart, PieChart, TableChart, Visualization};
use polyteia_core::{
    ids, FilterOperator, QueryMode, QuerySchema, SdkError, SdkResult, SortDirection,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Options of a single select.
///
/// A bare column id converts into a spec with every option left to its
/// default: the first dataset, no aggregate, the column id as label and a
/// generated id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectSpec {
    pub column_id: String,
    pub dataset_id: Option<String>,
    pub aggregate: Option<String>,
    pub label: Option<String>,
    pub id: Option<String>,
}

impl SelectSpec {
    pub fn new(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            ..Self::default()
        }
    }

    pub fn dataset(mut self, dataset_id: impl Into<String>) -> Self {
        self.dataset_id = Some(dataset_id.into());
        self
    }

    pub fn aggregate(mut self, aggregate: impl Into<String>) -> Self {
        self.aggregate = Some(aggregate.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl From<&str> for SelectSpec {
    fn from(column_id: &str) -> Self {
        Self::new(column_id)
    }
}

impl From<String> for SelectSpec {
    fn from(column_id: String) -> Self {
        Self::new(column_id)
    }
}

/// Options of a single order-by clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderSpec {
    pub column_id: String,
    pub dataset_id: Option<String>,
    pub aggregate: Option<String>,
    pub direction: SortDirection,
}

impl OrderSpec {
    pub fn new(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            ..Self::default()
        }
    }

    pub fn dataset(mut self, dataset_id: impl Into<String>) -> Self {
        self.dataset_id = Some(dataset_id.into());
        self
    }

    pub fn aggregate(mut self, aggregate: impl Into<String>) -> Self {
        self.aggregate = Some(aggregate.into());
        self
    }

    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn desc(self) -> Self {
        self.direction(SortDirection::Desc)
    }
}

impl From<&str> for OrderSpec {
    fn from(column_id: &str) -> Self {
        Self::new(column_id)
    }
}

impl From<String> for OrderSpec {
    fn from(column_id: String) -> Self {
        Self::new(column_id)
    }
}

/// A built insight in one of the supported schema generations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InsightPayload {
    Current(Insight),
    Legacy(LegacyInsight),
}

/// Incrementally assembles an insight.
///
/// # Examples
///
/// ```rust
/// use polyteia_insight::{BarChart, InsightBuilder, SelectSpec};
///
/// # fn main() -> polyteia_core::SdkResult<()> {
/// let mut builder = InsightBuilder::new();
/// builder
///     .set_name("Revenue by region")
///     .add_dataset("ds1")
///     .add_select(SelectSpec::new("region").id("sel_region"))
///     .add_select(SelectSpec::new("revenue").aggregate("sum").label("Total Revenue"))
///     .add_filter("region", "equals", "EU")?
///     .set_limit(50)?;
///
/// let x = builder.selects()[0].clone();
/// let y = builder.selects()[1].clone();
/// builder.set_bar_chart(BarChart::new(&x, &y));
///
/// let insight = builder.build();
/// assert_eq!(insight.query.query_builder.limit, Some(50));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InsightBuilder {
    solution_id: String,
    name: String,
    slug: String,
    description: String,
    mode: QueryMode,
    sql: String,
    variables: Vec<SqlVariable>,
    datasets: Vec<DatasetRef>,
    selects: Vec<Projection>,
    filters: Vec<Predicate>,
    order_by: Vec<SortSpec>,
    pivot: Pivot,
    limit: Option<u64>,
    visualization: Option<Visualization>,
}

impl InsightBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_solution(&mut self, solution_id: impl Into<String>) -> &mut Self {
        self.solution_id = solution_id.into();
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) -> &mut Self {
        self.slug = slug.into();
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// Set the query mode by its wire name (`queryBuilder` or `sqlEditor`).
    pub fn set_mode(&mut self, mode: &str) -> SdkResult<&mut Self> {
        self.mode = mode.parse()?;
        Ok(self)
    }

    pub fn set_query_mode(&mut self, mode: QueryMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Replace the raw SQL string. Only used in `sqlEditor` mode.
    pub fn set_sql(&mut self, sql: impl Into<String>) -> &mut Self {
        self.sql = sql.into();
        self
    }

    pub fn add_sql_variable(&mut self, variable: SqlVariable) -> &mut Self {
        trace!(variable = %variable.name, "adding sql variable");
        self.variables.push(variable);
        self
    }

    /// Add a dataset with an inner join and no conditions.
    ///
    /// The first dataset added is the default target of later selects,
    /// filters and order-bys.
    pub fn add_dataset(&mut self, dataset_id: impl Into<String>) -> &mut Self {
        self.add_joined_dataset(dataset_id, Join::inner())
    }

    pub fn add_joined_dataset(&mut self, dataset_id: impl Into<String>, join: Join) -> &mut Self {
        self.datasets.push(DatasetRef {
            dataset_id: dataset_id.into(),
            join,
        });
        self
    }

    pub fn add_select(&mut self, spec: impl Into<SelectSpec>) -> &mut Self {
        let spec = spec.into();
        let dataset_id = self.resolve_dataset(spec.dataset_id, &spec.column_id);
        let label = spec.label.unwrap_or_else(|| spec.column_id.clone());
        let projection = Projection {
            id: spec.id.unwrap_or_else(ids::new_element_id),
            dataset_id,
            column_id: spec.column_id,
            aggregate: spec.aggregate,
            label,
        };
        trace!(id = %projection.id, column = %projection.column_id, "adding select");
        self.selects.push(projection);
        self
    }

    /// Add a filter on the default dataset.
    ///
    /// Fails with an invalid-argument error when `operator` is not one of
    /// [`FilterOperator::ALL`].
    pub fn add_filter(
        &mut self,
        column_id: impl Into<String>,
        operator: &str,
        value: impl Into<Value>,
    ) -> SdkResult<&mut Self> {
        self.push_filter(None, column_id.into(), operator, value.into())
    }

    /// Add a filter on an explicit dataset.
    pub fn add_filter_on(
        &mut self,
        dataset_id: impl Into<String>,
        column_id: impl Into<String>,
        operator: &str,
        value: impl Into<Value>,
    ) -> SdkResult<&mut Self> {
        self.push_filter(Some(dataset_id.into()), column_id.into(), operator, value.into())
    }

    fn push_filter(
        &mut self,
        dataset_id: Option<String>,
        column_id: String,
        operator: &str,
        value: Value,
    ) -> SdkResult<&mut Self> {
        let operator: FilterOperator = operator.parse()?;
        let dataset_id = self.resolve_dataset(dataset_id, &column_id);
        self.filters.push(Predicate {
            id: ids::new_element_id(),
            column: ColumnRef {
                dataset_id,
                column_id,
                aggregate: None,
            },
            operator,
            value,
        });
        Ok(self)
    }

    pub fn add_order_by(&mut self, spec: impl Into<OrderSpec>) -> &mut Self {
        let spec = spec.into();
        let dataset_id = self.resolve_dataset(spec.dataset_id, &spec.column_id);
        self.order_by.push(SortSpec {
            id: ids::new_element_id(),
            column: ColumnRef {
                dataset_id,
                column_id: spec.column_id,
                aggregate: spec.aggregate,
            },
            direction: spec.direction,
        });
        self
    }

    /// Append pre-built selects verbatim.
    pub fn add_select_defs(&mut self, selects: impl IntoIterator<Item = Projection>) -> &mut Self {
        self.selects.extend(selects);
        self
    }

    /// Append pre-built filters verbatim.
    pub fn add_filter_defs(&mut self, filters: impl IntoIterator<Item = Predicate>) -> &mut Self {
        self.filters.extend(filters);
        self
    }

    /// Limit the number of result rows. Negative limits are rejected.
    pub fn set_limit(&mut self, limit: i64) -> SdkResult<&mut Self> {
        let limit = u64::try_from(limit).map_err(|_| {
            SdkError::invalid_argument(format!(
                "Limit must be a non-negative integer, got {}",
                limit
            ))
        })?;
        self.limit = Some(limit);
        Ok(self)
    }

    pub fn set_pivot(&mut self, pivot: Pivot) -> &mut Self {
        self.pivot = pivot;
        self
    }

    /// Set an arbitrary visualization config.
    pub fn set_config(&mut self, config: Value) -> &mut Self {
        self.set_visualization(Visualization::Custom(config))
    }

    /// Set the visualization; the last call wins.
    pub fn set_visualization(&mut self, visualization: Visualization) -> &mut Self {
        self.visualization = Some(visualization);
        self
    }

    pub fn set_bar_chart(&mut self, chart: BarChart) -> &mut Self {
        self.set_visualization(Visualization::BarChart(chart))
    }

    pub fn set_line_chart(&mut self, chart: LineChart) -> &mut Self {
        self.set_visualization(Visualization::LineChart(chart))
    }

    pub fn set_pie_chart(&mut self, chart: PieChart) -> &mut Self {
        self.set_visualization(Visualization::PieChart(chart))
    }

    pub fn set_table(&mut self, chart: TableChart) -> &mut Self {
        self.set_visualization(Visualization::Table(chart))
    }

    pub fn set_big_number(&mut self, chart: BigNumber) -> &mut Self {
        self.set_visualization(Visualization::BigNumber(chart))
    }

    pub fn set_map_chart(&mut self, chart: MapChart) -> &mut Self {
        self.set_visualization(Visualization::MapChart(chart))
    }

    /// Selects added so far, in insertion order.
    pub fn selects(&self) -> &[Projection] {
        &self.selects
    }

    /// Find a select by id.
    pub fn projection(&self, id: &str) -> Option<&Projection> {
        self.selects.iter().find(|p| p.id == id)
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    pub fn visualization(&self) -> Option<&Visualization> {
        self.visualization.as_ref()
    }

    /// Serialize the current state into a current-generation insight.
    pub fn build(&self) -> Insight {
        debug!(
            name = %self.name,
            mode = %self.mode,
            datasets = self.datasets.len(),
            selects = self.selects.len(),
            filters = self.filters.len(),
            "building insight"
        );
        Insight {
            solution_id: self.solution_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            slug: self.slug.clone(),
            query: Query {
                version: QuerySchema::V4.query_version(),
                mode: self.mode,
                sql_editor: SqlEditor {
                    sql_string: self.sql.clone(),
                    variables: self.variables.clone(),
                },
                query_builder: QueryBody {
                    version: QuerySchema::V4.builder_version(),
                    datasets: self.datasets.clone(),
                    select: self.selects.clone(),
                    filters: self.filters.clone(),
                    order_by: self.order_by.clone(),
                    pivot: self.pivot.clone(),
                    limit: self.limit,
                },
            },
            config: self.visualization.as_ref().map(Visualization::to_json),
        }
    }

    /// Serialize the current state into the requested schema generation.
    pub fn build_for(&self, schema: QuerySchema) -> InsightPayload {
        if schema.is_deprecated() {
            warn!(%schema, "building insight in a deprecated schema");
        }
        match schema {
            QuerySchema::V4 => InsightPayload::Current(self.build()),
            QuerySchema::V3 => InsightPayload::Legacy(LegacyInsight::from(&self.build())),
        }
    }

    // An explicit, non-empty dataset wins; otherwise the first added
    // dataset; otherwise the empty string.
    fn resolve_dataset(&self, explicit: Option<String>, column_id: &str) -> String {
        if let Some(id) = explicit.filter(|id| !id.is_empty()) {
            return id;
        }
        match self.datasets.first() {
            Some(ds) => ds.dataset_id.clone(),
            None => {
                warn!(
                    column = column_id,
                    "no dataset added yet, column reference resolves to an empty dataset id"
                );
                String::new()
            }
        }
    }
}
