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

//! Visualization configurations attached to an insight.
//!
//! Each chart kind is its own struct with fluent option setters; the
//! [`Visualization`] sum type wraps them and renders the tagged JSON the
//! frontend expects. All variants share a title, a subtitle and an empty
//! filter list.

use crate::model::Projection;
use polyteia_core::ids;
use serde_json::{json, Map, Value};

/// Data type advertised for a chart column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Text,
    Number,
}

fn chart_column(projection: &Projection, column_type: ColumnType) -> Value {
    json!({
        "id": projection.id,
        "key": projection.column_id,
        "label": projection.label,
        "type": match column_type {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
        },
    })
}

macro_rules! titled {
    ($ty:ty) => {
        impl $ty {
            pub fn title(mut self, title: impl Into<String>) -> Self {
                self.title = title.into();
                self
            }

            pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
                self.subtitle = subtitle.into();
                self
            }
        }
    };
}

/// How bars of several series are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarGroupType {
    #[default]
    Group,
    Stack,
    StackPercentage,
}

impl BarGroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Stack => "stack",
            Self::StackPercentage => "stack-percentage",
        }
    }
}

/// Orientation of a bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarLayout {
    #[default]
    Vertical,
    Horizontal,
}

impl BarLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

/// Layout of x-axis tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TicksLayout {
    #[default]
    Normal,
    Rotate,
}

impl TicksLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Rotate => "rotate",
        }
    }
}

/// Line interpolation of a line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    #[default]
    Linear,
    Smooth,
    Step,
}

impl Interpolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Smooth => "smooth",
            Self::Step => "step",
        }
    }
}

/// Pie or donut rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PieAppearance {
    #[default]
    Pie,
    Donut,
}

impl PieAppearance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pie => "pie",
            Self::Donut => "donut",
        }
    }
}

/// Layer kind of a map chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapLayerType {
    #[default]
    Choropleth,
    Scatter,
}

impl MapLayerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Choropleth => "choropleth",
            Self::Scatter => "scatter",
        }
    }
}

/// Bar chart over an x-axis category and a y-axis measure.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub x_axis: Projection,
    pub y_axis: Projection,
    /// Column used for grouping or stacking.
    pub metric: Option<Projection>,
    pub group_type: BarGroupType,
    pub layout: BarLayout,
    pub show_label: bool,
    pub ticks_layout: TicksLayout,
    pub title: String,
    pub subtitle: String,
}

impl BarChart {
    pub fn new(x_axis: &Projection, y_axis: &Projection) -> Self {
        Self {
            x_axis: x_axis.clone(),
            y_axis: y_axis.clone(),
            metric: None,
            group_type: BarGroupType::default(),
            layout: BarLayout::default(),
            show_label: true,
            ticks_layout: TicksLayout::default(),
            title: String::new(),
            subtitle: String::new(),
        }
    }

    pub fn metric(mut self, metric: &Projection) -> Self {
        self.metric = Some(metric.clone());
        self
    }

    pub fn group_type(mut self, group_type: BarGroupType) -> Self {
        self.group_type = group_type;
        self
    }

    pub fn layout(mut self, layout: BarLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn show_label(mut self, show: bool) -> Self {
        self.show_label = show;
        self
    }

    pub fn ticks_layout(mut self, ticks: TicksLayout) -> Self {
        self.ticks_layout = ticks;
        self
    }
}

titled!(BarChart);

/// Line chart over an x-axis category and a y-axis measure.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub x_axis: Projection,
    pub y_axis: Projection,
    pub metric: Option<Projection>,
    pub interpolation: Interpolation,
    pub show_label: bool,
    /// Stacking mode, `none` by default.
    pub stack: String,
    pub ticks_layout: TicksLayout,
    pub title: String,
    pub subtitle: String,
}

impl LineChart {
    pub fn new(x_axis: &Projection, y_axis: &Projection) -> Self {
        Self {
            x_axis: x_axis.clone(),
            y_axis: y_axis.clone(),
            metric: None,
            interpolation: Interpolation::default(),
            show_label: true,
            stack: "none".to_string(),
            ticks_layout: TicksLayout::default(),
            title: String::new(),
            subtitle: String::new(),
        }
    }

    pub fn metric(mut self, metric: &Projection) -> Self {
        self.metric = Some(metric.clone());
        self
    }

    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn show_label(mut self, show: bool) -> Self {
        self.show_label = show;
        self
    }

    pub fn stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }

    pub fn ticks_layout(mut self, ticks: TicksLayout) -> Self {
        self.ticks_layout = ticks;
        self
    }
}

titled!(LineChart);

/// Pie chart of a measure split by a label column.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub label: Projection,
    pub measure: Projection,
    pub appearance: PieAppearance,
    pub title: String,
    pub subtitle: String,
}

impl PieChart {
    pub fn new(label: &Projection, measure: &Projection) -> Self {
        Self {
            label: label.clone(),
            measure: measure.clone(),
            appearance: PieAppearance::default(),
            title: String::new(),
            subtitle: String::new(),
        }
    }

    pub fn appearance(mut self, appearance: PieAppearance) -> Self {
        self.appearance = appearance;
        self
    }
}

titled!(PieChart);

/// Plain table of the selected columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TableChart {
    pub columns: Vec<Projection>,
    pub title: String,
    pub subtitle: String,
}

impl TableChart {
    pub fn new(columns: &[Projection]) -> Self {
        Self {
            columns: columns.to_vec(),
            title: String::new(),
            subtitle: String::new(),
        }
    }
}

titled!(TableChart);

/// A single aggregated figure.
#[derive(Debug, Clone, PartialEq)]
pub struct BigNumber {
    pub measure: Projection,
    /// One of `sum`, `mean`, `median`, `min`, `max`.
    pub aggregate: String,
    pub title: String,
    pub subtitle: String,
}

impl BigNumber {
    pub fn new(measure: &Projection) -> Self {
        Self {
            measure: measure.clone(),
            aggregate: "sum".to_string(),
            title: String::new(),
            subtitle: String::new(),
        }
    }

    pub fn aggregate(mut self, aggregate: impl Into<String>) -> Self {
        self.aggregate = aggregate.into();
        self
    }
}

titled!(BigNumber);

/// Single-layer map over a GeoJSON geometry column.
#[derive(Debug, Clone, PartialEq)]
pub struct MapChart {
    pub geometry: Projection,
    pub label: Option<Projection>,
    pub value: Option<Projection>,
    pub show_label: bool,
    pub layer_type: MapLayerType,
    pub layer_title: String,
    pub fill_style: String,
    pub background_map: String,
    /// Scatter layers only.
    pub enable_feature_grouping: Option<bool>,
    /// Scatter layers only.
    pub group_column: Option<Projection>,
    /// Fixed when the chart is created so repeated builds agree.
    pub layer_id: String,
    pub title: String,
    pub subtitle: String,
}

impl MapChart {
    pub fn new(geometry: &Projection) -> Self {
        Self {
            geometry: geometry.clone(),
            label: None,
            value: None,
            show_label: true,
            layer_type: MapLayerType::default(),
            layer_title: String::new(),
            fill_style: "opaque".to_string(),
            background_map: "osm".to_string(),
            enable_feature_grouping: None,
            group_column: None,
            layer_id: ids::new_compact_id(),
            title: String::new(),
            subtitle: String::new(),
        }
    }

    pub fn label(mut self, label: &Projection) -> Self {
        self.label = Some(label.clone());
        self
    }

    pub fn value(mut self, value: &Projection) -> Self {
        self.value = Some(value.clone());
        self
    }

    pub fn show_label(mut self, show: bool) -> Self {
        self.show_label = show;
        self
    }

    pub fn layer_type(mut self, layer_type: MapLayerType) -> Self {
        self.layer_type = layer_type;
        self
    }

    pub fn layer_title(mut self, title: impl Into<String>) -> Self {
        self.layer_title = title.into();
        self
    }

    pub fn fill_style(mut self, style: impl Into<String>) -> Self {
        self.fill_style = style.into();
        self
    }

    pub fn background_map(mut self, map: impl Into<String>) -> Self {
        self.background_map = map.into();
        self
    }

    pub fn enable_feature_grouping(mut self, enable: bool) -> Self {
        self.enable_feature_grouping = Some(enable);
        self
    }

    pub fn group_column(mut self, column: &Projection) -> Self {
        self.group_column = Some(column.clone());
        self
    }

    fn layer_json(&self) -> Value {
        let mut layer = Map::new();
        layer.insert("type".into(), json!(self.layer_type.as_str()));
        layer.insert("fillStyle".into(), json!(self.fill_style));
        layer.insert("id".into(), json!(self.layer_id));
        layer.insert("showLabel".into(), json!(self.show_label));
        layer.insert("title".into(), json!(self.layer_title));
        layer.insert("tooltip".into(), json!({ "fields": null }));
        layer.insert(
            "geometryColumn".into(),
            chart_column(&self.geometry, ColumnType::Text),
        );
        if let Some(label) = &self.label {
            layer.insert("labelColumn".into(), chart_column(label, ColumnType::Text));
        }
        if let Some(value) = &self.value {
            layer.insert("valueColumn".into(), chart_column(value, ColumnType::Number));
        }
        if self.layer_type == MapLayerType::Scatter {
            layer.insert(
                "enableFeatureGrouping".into(),
                json!(self.enable_feature_grouping.unwrap_or(false)),
            );
            layer.insert(
                "groupColumn".into(),
                self.group_column
                    .as_ref()
                    .map(|c| chart_column(c, ColumnType::Text))
                    .unwrap_or(Value::Null),
            );
        }
        Value::Object(layer)
    }
}

titled!(MapChart);

/// Visualization attached to an insight.
#[derive(Debug, Clone, PartialEq)]
pub enum Visualization {
    BarChart(BarChart),
    LineChart(LineChart),
    PieChart(PieChart),
    Table(TableChart),
    BigNumber(BigNumber),
    MapChart(MapChart),
    /// Caller-supplied configuration, passed through verbatim.
    Custom(Value),
}

impl Visualization {
    /// The `type` discriminator written to the config, if known.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::BarChart(_) => Some("bar-chart"),
            Self::LineChart(_) => Some("line-chart"),
            Self::PieChart(_) => Some("pie-chart"),
            Self::Table(_) => Some("table"),
            Self::BigNumber(_) => Some("big-number"),
            Self::MapChart(_) => Some("map-chart"),
            Self::Custom(cfg) => cfg.get("type").and_then(Value::as_str),
        }
    }

    /// Render the config JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Self::BarChart(c) => json!({
                "type": "bar-chart",
                "barGroupType": c.group_type.as_str(),
                "barLayout": c.layout.as_str(),
                "showLabel": c.show_label,
                "title": c.title,
                "subtitle": c.subtitle,
                "xAxis": {
                    "column": chart_column(&c.x_axis, ColumnType::Text),
                    "ticksLayout": c.ticks_layout.as_str(),
                },
                "yAxis": { "column": chart_column(&c.y_axis, ColumnType::Number) },
                "metric": {
                    "column": c.metric.as_ref().map(|m| chart_column(m, ColumnType::Text)),
                },
                "filters": [],
            }),
            Self::LineChart(c) => json!({
                "type": "line-chart",
                "lineInterpolation": c.interpolation.as_str(),
                "showLabel": c.show_label,
                "title": c.title,
                "subtitle": c.subtitle,
                "stack": c.stack,
                "xAxis": {
                    "column": chart_column(&c.x_axis, ColumnType::Text),
                    "ticksLayout": c.ticks_layout.as_str(),
                },
                "yAxis": { "column": chart_column(&c.y_axis, ColumnType::Number) },
                "metric": {
                    "column": c.metric.as_ref().map(|m| chart_column(m, ColumnType::Text)),
                },
                "filters": [],
            }),
            Self::PieChart(c) => json!({
                "type": "pie-chart",
                "appearance": c.appearance.as_str(),
                "title": c.title,
                "subtitle": c.subtitle,
                "label": { "column": chart_column(&c.label, ColumnType::Text) },
                "measure": { "column": chart_column(&c.measure, ColumnType::Number) },
                "filters": [],
            }),
            Self::Table(c) => {
                let series: Vec<Value> = c
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(i, col)| table_series(i, col))
                    .collect();
                json!({
                    "type": "table",
                    "subtitle": c.subtitle,
                    "title": c.title,
                    "series": series,
                    "filters": [],
                })
            }
            Self::BigNumber(c) => json!({
                "type": "big-number",
                "title": c.title,
                "subtitle": c.subtitle,
                "measure": {
                    "column": chart_column(&c.measure, ColumnType::Number),
                    "aggregate": c.aggregate,
                },
                "filters": [],
            }),
            Self::MapChart(c) => json!({
                "type": "map-chart",
                "title": c.title,
                "subtitle": c.subtitle,
                "backgroundMap": c.background_map,
                "version": 2,
                "layers": [c.layer_json()],
                "filters": [],
            }),
            Self::Custom(cfg) => cfg.clone(),
        }
    }
}

// Table series are keyed by label; columns whose label looks like a count
// or a percentage are rendered as numbers.
fn table_series(index: usize, column: &Projection) -> Value {
    let lowered = column.label.to_lowercase();
    let column_type = if column.label.contains('%') || lowered.contains("anzahl") {
        "number"
    } else {
        "text"
    };
    json!({
        "column": {
            "id": column.label,
            "key": column.label,
            "label": column.label,
            "type": column_type,
        },
        "id": format!("col_{}", index),
        "sortable": true,
        "title": { "text": "" },
    })
}
