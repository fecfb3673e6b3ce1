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

//! Property-based tests for the report builder.

use polyteia_report::{ColumnLayout, HeadingLevel, ReportBuilder};
use polyteia_test::count_nodes;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Heading(String),
    Text(String),
    Widget(u8),
    StartColumns(usize),
    NextColumn,
    EndColumns,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[A-Za-z ]{0,12}".prop_map(Op::Heading),
        "[A-Za-z ]{0,12}".prop_map(Op::Text),
        (0u8..5).prop_map(Op::Widget),
        (1usize..4).prop_map(Op::StartColumns),
        Just(Op::NextColumn),
        Just(Op::EndColumns),
    ]
}

fn apply(builder: &mut ReportBuilder, op: &Op) {
    match op {
        Op::Heading(text) => {
            builder.add_heading(text.as_str(), HeadingLevel::H2, None);
        }
        Op::Text(text) => {
            builder.add_text(text.as_str(), None, None);
        }
        Op::Widget(n) => {
            builder.add_widget(format!("insight_{}", n), None);
        }
        Op::StartColumns(n) => {
            let layout = ColumnLayout::Custom(vec!["10%".to_string(); *n]);
            let _ = builder.start_columns(layout);
        }
        Op::NextColumn => {
            let _ = builder.next_column();
        }
        Op::EndColumns => {
            builder.end_columns();
        }
    }
}

proptest! {
    /// Property: a second build without mutation yields the same document
    #[test]
    fn prop_build_is_idempotent(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut builder = ReportBuilder::new();
        for op in &ops {
            apply(&mut builder, op);
        }
        let first = builder.build();
        let second = builder.build();
        prop_assert_eq!(first.to_json(), second.to_json());
    }

    /// Property: metadata lists each widget insight exactly once
    #[test]
    fn prop_insights_deduplicated(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut builder = ReportBuilder::new();
        for op in &ops {
            apply(&mut builder, op);
        }
        let report = builder.build();
        let mut expected: Vec<String> = Vec::new();
        for op in &ops {
            if let Op::Widget(n) = op {
                let id = format!("insight_{}", n);
                if !expected.contains(&id) {
                    expected.push(id);
                }
            }
        }
        prop_assert_eq!(&report.metadata.insights, &expected);

        let widgets = ops.iter().filter(|op| matches!(op, Op::Widget(_))).count();
        prop_assert_eq!(count_nodes(&report.to_json()["content"]["editorState"], "widget"), widgets);
    }

    /// Property: after build no column is ever empty
    #[test]
    fn prop_no_empty_columns(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut builder = ReportBuilder::new();
        for op in &ops {
            apply(&mut builder, op);
        }
        let value = builder.build().to_json();
        let columns = count_nodes(&value["content"]["editorState"], "column");
        let groups = count_nodes(&value["content"]["editorState"], "column_group");
        let started = ops.iter().filter(|op| matches!(op, Op::StartColumns(_))).count();
        prop_assert_eq!(groups, started);
        prop_assert!(columns >= groups);
        fn check(value: &serde_json::Value) -> bool {
            match value {
                serde_json::Value::Object(map) => {
                    let empty_column = map.get("type").and_then(|t| t.as_str()) == Some("column")
                        && map.get("children").and_then(|c| c.as_array()).map_or(true, |c| c.is_empty());
                    !empty_column && map.values().all(check)
                }
                serde_json::Value::Array(items) => items.iter().all(check),
                _ => true,
            }
        }
        prop_assert!(check(&value));
    }
}
