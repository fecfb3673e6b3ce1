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

//! Fluent report builder and the built report.

use crate::block::{
    Block, Column, ColumnGroup, HeadingLevel, ListType, TextAlign, TextFormatting, TextRun,
    ToggleContent, Widget,
};
use crate::layout::{ColumnLayout, ReportOptions};
use crate::scan;
use polyteia_core::gateway::commands;
use polyteia_core::{ids, GatewayRequest, ReportSchema, SdkError, SdkResult};
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use tracing::{debug, trace};

/// Insight and dataset ids a report references, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportMetadata {
    pub insights: Vec<String>,
    pub datasets: Vec<String>,
}

impl ReportMetadata {
    fn add_insight(&mut self, insight_id: &str) {
        if !self.insights.iter().any(|id| id == insight_id) {
            self.insights.push(insight_id.to_string());
        }
    }

    fn add_dataset(&mut self, dataset_id: &str) {
        if !self.datasets.iter().any(|id| id == dataset_id) {
            self.datasets.push(dataset_id.to_string());
        }
    }

    fn to_json(&self, schema: ReportSchema) -> Value {
        let mut map = Map::new();
        map.insert("insights".to_string(), json!(self.insights));
        if schema.supports_dataset_metadata() && !self.datasets.is_empty() {
            map.insert("datasets".to_string(), json!(self.datasets));
        }
        Value::Object(map)
    }
}

/// A built report, ready for `create_report`.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub organization_id: String,
    pub solution_id: String,
    pub name: String,
    pub description: String,
    pub content: Vec<Block>,
    pub metadata: ReportMetadata,
    pub schema: ReportSchema,
}

impl Report {
    pub fn to_json(&self) -> Value {
        let inline = self.schema.supports_inline_insights();
        let editor_state: Vec<Value> = self.content.iter().map(|b| b.render(inline)).collect();
        json!({
            "organization_id": self.organization_id,
            "solution_id": self.solution_id,
            "name": self.name,
            "description": self.description,
            "content": { "editorState": editor_state },
            "metadata": self.metadata.to_json(self.schema),
        })
    }

    /// The `create_report` command envelope.
    pub fn create_request(&self) -> GatewayRequest {
        GatewayRequest::command(commands::CREATE_REPORT, self.to_json())
    }

    pub fn to_json_string(&self, pretty: bool) -> SdkResult<String> {
        let value = self.to_json();
        let json = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(json)
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[derive(Debug, Clone)]
struct OpenGroup {
    group: ColumnGroup,
    active: usize,
}

/// Incrementally assembles a report.
///
/// Blocks are appended to the top-level content, or to the active column
/// while a column group is open.
///
/// # Examples
///
/// ```rust
/// use polyteia_report::{ColumnLayout, HeadingLevel, ReportBuilder};
///
/// # fn main() -> polyteia_core::SdkResult<()> {
/// let mut builder = ReportBuilder::new();
/// builder
///     .set_name("Quarterly report")
///     .add_heading("Overview", HeadingLevel::H1, None)
///     .start_columns(ColumnLayout::TwoEqual)?
///     .add_widget("insight_1", Some(400));
/// builder.next_column()?.add_widget("insight_2", None);
///
/// let report = builder.build();
/// assert_eq!(report.metadata.insights, vec!["insight_1", "insight_2"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    options: ReportOptions,
    organization_id: String,
    solution_id: String,
    name: String,
    description: String,
    content: Vec<Block>,
    open_group: Option<OpenGroup>,
    metadata: ReportMetadata,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ReportOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    pub fn set_solution(&mut self, solution_id: impl Into<String>) -> &mut Self {
        self.solution_id = solution_id.into();
        self
    }

    pub fn set_organization(&mut self, organization_id: impl Into<String>) -> &mut Self {
        self.organization_id = organization_id.into();
        self
    }

    pub fn add_heading(
        &mut self,
        text: impl Into<String>,
        level: HeadingLevel,
        align: Option<TextAlign>,
    ) -> &mut Self {
        let block = Block::Heading {
            id: self.block_id(),
            level,
            text: text.into(),
            align,
        };
        self.push(block)
    }

    /// Add a paragraph with a single text run.
    pub fn add_text(
        &mut self,
        text: impl Into<String>,
        formatting: Option<TextFormatting>,
        align: Option<TextAlign>,
    ) -> &mut Self {
        let run = TextRun::styled(text, formatting.unwrap_or_default());
        self.add_paragraph(vec![run], align)
    }

    /// Add a paragraph made of several differently styled runs.
    pub fn add_paragraph(&mut self, runs: Vec<TextRun>, align: Option<TextAlign>) -> &mut Self {
        let block = Block::Paragraph {
            id: self.block_id(),
            runs,
            align,
        };
        self.push(block)
    }

    pub fn add_list<I>(&mut self, items: I, style: ListType) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let block = Block::List {
            id: self.block_id(),
            style,
            items: items.into_iter().map(Into::into).collect(),
        };
        self.push(block)
    }

    /// Add a table. With `has_header` the first row renders as header cells.
    pub fn add_table<R, C>(&mut self, rows: R, has_header: bool) -> &mut Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let block = Block::Table {
            id: self.block_id(),
            rows,
            has_header,
        };
        self.push(block)
    }

    /// Add a widget showing an insight by id.
    pub fn add_widget(&mut self, insight_id: impl Into<String>, height: Option<u32>) -> &mut Self {
        let insight_id = insight_id.into();
        self.metadata.add_insight(&insight_id);
        let block = Block::Widget(Widget {
            id: self.block_id(),
            insight_id,
            height,
            insight: None,
        });
        self.push(block)
    }

    /// Add a widget from a full insight payload.
    ///
    /// The payload must carry a string `id`. Datasets the insight reads from
    /// are registered in the metadata. The payload itself is only kept when
    /// the report schema inlines insights.
    pub fn add_insight_widget(&mut self, insight: &Value, height: Option<u32>) -> SdkResult<&mut Self> {
        let insight_id = insight
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                SdkError::invalid_argument("Insight payload must contain a string 'id'")
            })?
            .to_string();

        for dataset_id in scan::dataset_ids(insight) {
            self.metadata.add_dataset(&dataset_id);
        }
        self.metadata.add_insight(&insight_id);

        let payload = self
            .options
            .schema
            .supports_inline_insights()
            .then(|| insight.clone());
        let block = Block::Widget(Widget {
            id: self.block_id(),
            insight_id,
            height,
            insight: payload,
        });
        Ok(self.push(block))
    }

    pub fn add_horizontal_rule(&mut self) -> &mut Self {
        let block = Block::HorizontalRule { id: self.block_id() };
        self.push(block)
    }

    pub fn add_link(&mut self, text: impl Into<String>, url: impl Into<String>) -> &mut Self {
        let block = Block::Link {
            id: self.block_id(),
            text: text.into(),
            url: url.into(),
        };
        self.push(block)
    }

    pub fn add_blockquote(&mut self, text: impl Into<String>) -> &mut Self {
        let block = Block::Blockquote {
            id: self.block_id(),
            text: text.into(),
        };
        self.push(block)
    }

    pub fn add_code(&mut self, code: impl Into<String>, language: Option<&str>) -> &mut Self {
        let block = Block::Code {
            id: self.block_id(),
            code: code.into(),
            language: language.map(str::to_string),
        };
        self.push(block)
    }

    pub fn add_date(&mut self, date: impl Into<String>) -> &mut Self {
        let block = Block::Date {
            id: self.block_id(),
            text: date.into(),
        };
        self.push(block)
    }

    /// Add a collapsible section.
    pub fn add_toggle(
        &mut self,
        header: impl Into<String>,
        content: impl Into<ToggleContent>,
    ) -> &mut Self {
        let block = Block::Toggle {
            id: self.block_id(),
            header: header.into(),
            content: content.into(),
        };
        self.push(block)
    }

    /// Add a LaTeX equation, as its own block or inline.
    pub fn add_equation(&mut self, latex: impl Into<String>, inline: bool) -> &mut Self {
        let block = Block::Equation {
            id: self.block_id(),
            latex: latex.into(),
            inline,
        };
        self.push(block)
    }

    /// Register a dataset in the metadata without a widget.
    pub fn add_dataset(&mut self, dataset_id: impl AsRef<str>) -> &mut Self {
        self.metadata.add_dataset(dataset_id.as_ref());
        self
    }

    /// Open a column group; later blocks go into its first column.
    ///
    /// A group that is still open is closed first. Fails with an
    /// invalid-argument error when the layout has no columns.
    pub fn start_columns(&mut self, layout: impl Into<ColumnLayout>) -> SdkResult<&mut Self> {
        let layout = layout.into();
        if layout.is_empty() {
            return Err(SdkError::invalid_argument(
                "Column layout must contain at least one column",
            ));
        }
        self.close_group();

        let group_id = self.block_id();
        let columns = layout
            .widths()
            .into_iter()
            .map(|width| Column {
                id: self.block_id(),
                width,
                blocks: Vec::new(),
            })
            .collect();
        trace!(group = %group_id, columns = layout.len(), "opening column group");
        self.open_group = Some(OpenGroup {
            group: ColumnGroup {
                id: group_id,
                columns,
            },
            active: 0,
        });
        Ok(self)
    }

    /// Move to the next column of the open group.
    ///
    /// Fails with a state error when no group is open or the active column
    /// is the last one; the active column is left unchanged.
    pub fn next_column(&mut self) -> SdkResult<&mut Self> {
        let open = self
            .open_group
            .as_mut()
            .ok_or_else(|| SdkError::state("No active column group"))?;
        if open.active + 1 >= open.group.columns.len() {
            return Err(SdkError::state("No more columns available in this group"));
        }
        open.active += 1;
        Ok(self)
    }

    /// Close the open column group, if any.
    pub fn end_columns(&mut self) -> &mut Self {
        self.close_group();
        self
    }

    /// Index of the active column, if a group is open.
    pub fn active_column(&self) -> Option<usize> {
        self.open_group.as_ref().map(|open| open.active)
    }

    /// Close any open column group and return the report.
    pub fn build(&mut self) -> Report {
        self.close_group();
        debug!(
            name = %self.name,
            blocks = self.content.len(),
            insights = self.metadata.insights.len(),
            datasets = self.metadata.datasets.len(),
            "building report"
        );
        Report {
            organization_id: self.organization_id.clone(),
            solution_id: self.solution_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            content: self.content.clone(),
            metadata: self.metadata.clone(),
            schema: self.options.schema,
        }
    }

    fn block_id(&self) -> String {
        ids::new_block_id(self.options.block_id_len)
    }

    fn push(&mut self, block: Block) -> &mut Self {
        trace!(block = %block, "adding block");
        match self.open_group.as_mut() {
            Some(open) => open.group.columns[open.active].blocks.push(block),
            None => self.content.push(block),
        }
        self
    }

    fn close_group(&mut self) {
        let Some(OpenGroup { mut group, .. }) = self.open_group.take() else {
            return;
        };
        if self.options.fill_empty_columns {
            for column in group.columns.iter_mut().filter(|c| c.blocks.is_empty()) {
                column.blocks.push(Block::placeholder(self.block_id()));
            }
        }
        trace!(group = %group.id, "closing column group");
        self.content.push(Block::ColumnGroup(group));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_state(report: &Report) -> Vec<Value> {
        report.to_json()["content"]["editorState"]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }

    #[test]
    fn test_block_ids_are_short_and_unique() {
        let mut b = ReportBuilder::new();
        b.add_horizontal_rule().add_horizontal_rule();
        let report = b.build();
        assert_eq!(report.content[0].id().len(), 10);
        assert_ne!(report.content[0].id(), report.content[1].id());
    }

    #[test]
    fn test_widget_dedup() {
        let mut b = ReportBuilder::new();
        b.add_widget("insight_1", None).add_widget("insight_1", Some(300));
        let report = b.build();
        assert_eq!(report.metadata.insights, vec!["insight_1"]);
        assert_eq!(report.content.len(), 2);
    }

    #[test]
    fn test_next_column_errors() {
        let mut b = ReportBuilder::new();
        assert!(b.next_column().unwrap_err().is_state());

        b.start_columns(["50%", "50%"]).unwrap();
        b.next_column().unwrap();
        let err = b.next_column().unwrap_err();
        assert!(err.is_state());
        assert_eq!(err.message, "No more columns available in this group");
        assert_eq!(b.active_column(), Some(1));
    }

    #[test]
    fn test_empty_columns_get_placeholders() {
        let mut b = ReportBuilder::new();
        b.start_columns(["50%", "50%"]).unwrap().end_columns();
        let state = editor_state(&b.build());
        assert_eq!(state.len(), 1);
        for column in state[0]["children"].as_array().unwrap() {
            let children = column["children"].as_array().unwrap();
            assert_eq!(children.len(), 1);
            assert_eq!(children[0]["type"], "p");
            assert_eq!(children[0]["children"], json!([{"text": ""}]));
        }
    }

    #[test]
    fn test_placeholders_can_be_disabled() {
        let mut b = ReportBuilder::with_options(ReportOptions::new().fill_empty_columns(false));
        b.start_columns(ColumnLayout::TwoEqual).unwrap();
        b.add_text("left", None, None);
        let report = b.build();
        let Block::ColumnGroup(group) = &report.content[0] else {
            panic!("expected a column group");
        };
        assert_eq!(group.columns[0].blocks.len(), 1);
        assert!(group.columns[1].blocks.is_empty());
    }

    #[test]
    fn test_build_closes_open_group() {
        let mut b = ReportBuilder::new();
        b.start_columns(ColumnLayout::ThreeEqual).unwrap();
        b.add_date("2024-01-01");
        let report = b.build();
        assert_eq!(b.active_column(), None);
        assert_eq!(report.content.len(), 1);
        assert_eq!(report.content[0].type_name(), "column_group");
        b.add_horizontal_rule();
        assert_eq!(b.build().content.len(), 2);
    }

    #[test]
    fn test_start_columns_closes_previous_group() {
        let mut b = ReportBuilder::new();
        b.start_columns(ColumnLayout::LeftWide).unwrap();
        b.start_columns(ColumnLayout::RightWide).unwrap();
        assert_eq!(b.build().content.len(), 2);
    }

    #[test]
    fn test_start_columns_rejects_empty_layout() {
        let mut b = ReportBuilder::new();
        let err = b.start_columns(Vec::<String>::new()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(b.active_column(), None);
    }

    #[test]
    fn test_insight_widget_requires_id() {
        let mut b = ReportBuilder::new();
        assert!(b
            .add_insight_widget(&json!({"name": "x"}), None)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_insight_widget_registers_datasets() {
        let insight = json!({
            "id": "ins_1",
            "query": {"mode": "queryBuilder", "queryBuilder": {"datasets": [{"datasetId": "ds1"}]}}
        });
        let mut b = ReportBuilder::new();
        b.add_insight_widget(&insight, Some(500)).unwrap().add_dataset("ds1").add_dataset("ds2");
        let report = b.build();
        assert_eq!(report.metadata.datasets, vec!["ds1", "ds2"]);
        let value = report.to_json();
        assert_eq!(value["metadata"]["datasets"], json!(["ds1", "ds2"]));
        assert_eq!(
            value["content"]["editorState"][0]["widgetData"]["insight"]["id"],
            "ins_1"
        );
    }

    #[test]
    fn test_legacy_schema_output() {
        let insight = json!({
            "id": "ins_1",
            "query": {"mode": "queryBuilder", "queryBuilder": {"datasets": [{"datasetId": "ds1"}]}}
        });
        let mut b = ReportBuilder::with_options(ReportOptions::new().schema(ReportSchema::Legacy));
        b.add_insight_widget(&insight, None).unwrap();
        let value = b.build().to_json();
        assert_eq!(value["metadata"], json!({"insights": ["ins_1"]}));
        assert!(value["content"]["editorState"][0]["widgetData"].get("insight").is_none());
    }

    #[test]
    fn test_create_request() {
        let mut b = ReportBuilder::new();
        b.set_name("R").set_organization("org").set_solution("sol");
        let value = b.build().create_request().to_json();
        assert_eq!(value["command"], "create_report");
        assert_eq!(value["params"]["organization_id"], "org");
        assert_eq!(value["params"]["solution_id"], "sol");
    }

    #[test]
    fn test_datasets_omitted_when_empty() {
        let value = ReportBuilder::new().build().to_json();
        assert_eq!(value["metadata"], json!({"insights": []}));
        assert_eq!(value["content"], json!({"editorState": []}));
    }
}
