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

//! Block model of a report document.
//!
//! Blocks serialize into the rich-text editor convention used by the
//! gateway: every node has a `type` discriminator, an `id` and a
//! `children` array holding either nested nodes or text leaves.

use polyteia_core::{SdkError, SdkResult};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::fmt;

/// Heading level, `h1` through `h6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    #[default]
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = SdkError;

    fn try_from(level: u8) -> SdkResult<Self> {
        match level {
            1 => Ok(Self::H1),
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            4 => Ok(Self::H4),
            5 => Ok(Self::H5),
            6 => Ok(Self::H6),
            other => Err(SdkError::invalid_argument(format!(
                "Invalid heading level: {}. Valid levels are 1 to 6",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

/// List style; serialized as the CSS `listStyleType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ListType {
    #[default]
    #[serde(rename = "disc")]
    Bullet,
    #[serde(rename = "decimal")]
    Numbered,
    #[serde(rename = "todo")]
    Todo,
}

impl ListType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bullet => "disc",
            Self::Numbered => "decimal",
            Self::Todo => "todo",
        }
    }
}

/// Inline styling of a text run. Unset fields are omitted from the output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextFormatting {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub highlight: bool,
    pub color: Option<String>,
    pub background_color: Option<String>,
}

impl TextFormatting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    pub fn code(mut self) -> Self {
        self.code = true;
        self
    }

    pub fn highlight(mut self) -> Self {
        self.highlight = true;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    fn write_into(&self, leaf: &mut Map<String, Value>) {
        let flags = [
            ("bold", self.bold),
            ("italic", self.italic),
            ("underline", self.underline),
            ("strikethrough", self.strikethrough),
            ("code", self.code),
            ("highlight", self.highlight),
        ];
        for (key, set) in flags {
            if set {
                leaf.insert(key.to_string(), Value::Bool(true));
            }
        }
        let colors = [
            ("color", &self.color),
            ("backgroundColor", &self.background_color),
        ];
        for (key, color) in colors {
            if let Some(color) = color.as_ref().filter(|c| !c.is_empty()) {
                leaf.insert(key.to_string(), Value::String(color.clone()));
            }
        }
    }
}

/// A run of uniformly styled text inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRun {
    pub text: String,
    pub formatting: TextFormatting,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            formatting: TextFormatting::default(),
        }
    }

    pub fn styled(text: impl Into<String>, formatting: TextFormatting) -> Self {
        Self {
            text: text.into(),
            formatting,
        }
    }

    fn to_json(&self) -> Value {
        let mut leaf = Map::new();
        leaf.insert("text".to_string(), Value::String(self.text.clone()));
        self.formatting.write_into(&mut leaf);
        Value::Object(leaf)
    }
}

/// Body of a toggle: plain text or pre-built rich-text children.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleContent {
    Text(String),
    Rich(Vec<Value>),
}

impl ToggleContent {
    fn children(&self) -> Vec<Value> {
        match self {
            Self::Text(text) => vec![text_leaf(text)],
            Self::Rich(children) => children.clone(),
        }
    }
}

impl From<&str> for ToggleContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ToggleContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<Value>> for ToggleContent {
    fn from(children: Vec<Value>) -> Self {
        Self::Rich(children)
    }
}

/// Embedded insight widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub id: String,
    pub insight_id: String,
    /// Explicit pixel height; `null` lets the editor choose.
    pub height: Option<u32>,
    /// Full insight payload, inlined in the current report schema only.
    pub insight: Option<Value>,
}

/// One column of a column group.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: String,
    /// Fractional width such as `"50%"`.
    pub width: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    pub id: String,
    pub columns: Vec<Column>,
}

/// A node of the report content tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        id: String,
        level: HeadingLevel,
        text: String,
        align: Option<TextAlign>,
    },
    Paragraph {
        id: String,
        runs: Vec<TextRun>,
        align: Option<TextAlign>,
    },
    List {
        id: String,
        style: ListType,
        items: Vec<String>,
    },
    Table {
        id: String,
        rows: Vec<Vec<String>>,
        has_header: bool,
    },
    Widget(Widget),
    HorizontalRule {
        id: String,
    },
    Link {
        id: String,
        text: String,
        url: String,
    },
    Blockquote {
        id: String,
        text: String,
    },
    Code {
        id: String,
        code: String,
        language: Option<String>,
    },
    Date {
        id: String,
        text: String,
    },
    Toggle {
        id: String,
        header: String,
        content: ToggleContent,
    },
    Equation {
        id: String,
        latex: String,
        inline: bool,
    },
    ColumnGroup(ColumnGroup),
}

impl Block {
    /// Empty paragraph used to fill columns that received no blocks.
    pub fn placeholder(id: String) -> Self {
        Self::Paragraph {
            id,
            runs: vec![TextRun::plain("")],
            align: None,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Heading { id, .. }
            | Self::Paragraph { id, .. }
            | Self::List { id, .. }
            | Self::Table { id, .. }
            | Self::HorizontalRule { id }
            | Self::Link { id, .. }
            | Self::Blockquote { id, .. }
            | Self::Code { id, .. }
            | Self::Date { id, .. }
            | Self::Toggle { id, .. }
            | Self::Equation { id, .. } => id,
            Self::Widget(w) => &w.id,
            Self::ColumnGroup(g) => &g.id,
        }
    }

    /// The `type` discriminator written to the output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Heading { level, .. } => level.as_str(),
            Self::Paragraph { .. } => "p",
            Self::List { .. } => "list",
            Self::Table { .. } => "table",
            Self::Widget(_) => "widget",
            Self::HorizontalRule { .. } => "hr",
            Self::Link { .. } => "link",
            Self::Blockquote { .. } => "blockquote",
            Self::Code { .. } => "code_block",
            Self::Date { .. } => "date",
            Self::Toggle { .. } => "toggle",
            Self::Equation { inline: false, .. } => "equation",
            Self::Equation { inline: true, .. } => "inline_equation",
            Self::ColumnGroup(_) => "column_group",
        }
    }

    /// Render the block with inlined insight payloads.
    pub fn to_json(&self) -> Value {
        self.render(true)
    }

    /// Render the block; `inline_insights` controls whether widgets carry
    /// their insight payload.
    pub fn render(&self, inline_insights: bool) -> Value {
        let mut node = Map::new();
        node.insert("type".to_string(), Value::String(self.type_name().to_string()));
        node.insert("id".to_string(), Value::String(self.id().to_string()));

        let children = match self {
            Self::Heading { text, align, .. } => {
                insert_align(&mut node, align);
                vec![text_leaf(text)]
            }
            Self::Paragraph { runs, align, .. } => {
                insert_align(&mut node, align);
                runs.iter().map(TextRun::to_json).collect()
            }
            Self::List { style, items, .. } => {
                node.insert("listStyleType".to_string(), json!(style.as_str()));
                items
                    .iter()
                    .map(|item| json!({"type": "li", "children": [text_leaf(item)]}))
                    .collect()
            }
            Self::Table {
                rows, has_header, ..
            } => rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let cell_type = if i == 0 && *has_header { "th" } else { "td" };
                    let cells: Vec<Value> = row
                        .iter()
                        .map(|cell| json!({"type": cell_type, "children": [text_leaf(cell)]}))
                        .collect();
                    json!({"type": "tr", "children": cells})
                })
                .collect(),
            Self::Widget(widget) => {
                let mut data = Map::new();
                data.insert("insightId".to_string(), json!(widget.insight_id));
                if inline_insights {
                    if let Some(insight) = &widget.insight {
                        data.insert("insight".to_string(), insight.clone());
                    }
                }
                node.insert("widgetData".to_string(), Value::Object(data));
                node.insert("height".to_string(), json!(widget.height));
                vec![text_leaf("")]
            }
            Self::HorizontalRule { .. } => vec![text_leaf("")],
            Self::Link { text, url, .. } => {
                node.insert("url".to_string(), json!(url));
                vec![text_leaf(text)]
            }
            Self::Blockquote { text, .. } | Self::Date { text, .. } => vec![text_leaf(text)],
            Self::Code { code, language, .. } => {
                node.insert("language".to_string(), json!(language));
                vec![json!({"type": "code_line", "children": [text_leaf(code)]})]
            }
            Self::Toggle {
                header, content, ..
            } => vec![
                text_leaf(header),
                json!({"type": "toggle_content", "children": content.children()}),
            ],
            Self::Equation { latex, .. } => {
                node.insert("equation".to_string(), json!(latex));
                vec![text_leaf("")]
            }
            Self::ColumnGroup(group) => group
                .columns
                .iter()
                .map(|column| {
                    let blocks: Vec<Value> = column
                        .blocks
                        .iter()
                        .map(|b| b.render(inline_insights))
                        .collect();
                    json!({
                        "type": "column",
                        "id": column.id,
                        "width": column.width,
                        "children": blocks,
                    })
                })
                .collect(),
        };
        node.insert("children".to_string(), Value::Array(children));
        Value::Object(node)
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_name(), self.id())
    }
}

fn text_leaf(text: &str) -> Value {
    json!({ "text": text })
}

fn insert_align(node: &mut Map<String, Value>, align: &Option<TextAlign>) {
    if let Some(align) = align {
        node.insert("align".to_string(), json!(align.as_str()));
    }
}
