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

//! Enumerated vocabularies accepted by the query model.
//!
//! Every enumeration parses from its wire name and rejects anything else
//! with an [`SdkErrorKind::InvalidArgument`](crate::SdkErrorKind) error, so
//! a bad value fails at the call that introduced it.

use crate::{SdkError, SdkResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Like,
    NotLike,
    StartsWith,
    EndsWith,
    Contains,
    NotContains,
    IsNull,
    IsNotNull,
    GreaterThan,
    LessThan,
    GreaterOrEquals,
    LessOrEquals,
    IsNullOrEmpty,
    IsNotNullOrEmpty,
}

impl FilterOperator {
    /// Every accepted operator, in declaration order.
    pub const ALL: [FilterOperator; 16] = [
        Self::Equals,
        Self::NotEquals,
        Self::Like,
        Self::NotLike,
        Self::StartsWith,
        Self::EndsWith,
        Self::Contains,
        Self::NotContains,
        Self::IsNull,
        Self::IsNotNull,
        Self::GreaterThan,
        Self::LessThan,
        Self::GreaterOrEquals,
        Self::LessOrEquals,
        Self::IsNullOrEmpty,
        Self::IsNotNullOrEmpty,
    ];

    /// The wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Like => "like",
            Self::NotLike => "not_like",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::IsNull => "is_null",
            Self::IsNotNull => "is_not_null",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::GreaterOrEquals => "greater_or_equals",
            Self::LessOrEquals => "less_or_equals",
            Self::IsNullOrEmpty => "is_null_or_empty",
            Self::IsNotNullOrEmpty => "is_not_null_or_empty",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = SdkError;

    fn from_str(s: &str) -> SdkResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| {
                SdkError::invalid_argument(format!(
                    "Invalid operator: {}. Valid operators are: {}",
                    s,
                    join_names(Self::ALL.iter().map(|op| op.as_str()))
                ))
            })
    }
}

/// Authoring mode of an insight query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QueryMode {
    /// Structured query assembled from datasets, selects and filters.
    #[default]
    #[serde(rename = "queryBuilder")]
    QueryBuilder,
    /// Raw SQL with optional variables.
    #[serde(rename = "sqlEditor")]
    SqlEditor,
}

impl QueryMode {
    pub const ALL: [QueryMode; 2] = [Self::QueryBuilder, Self::SqlEditor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QueryBuilder => "queryBuilder",
            Self::SqlEditor => "sqlEditor",
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryMode {
    type Err = SdkError;

    fn from_str(s: &str) -> SdkResult<Self> {
        match s {
            "queryBuilder" => Ok(Self::QueryBuilder),
            "sqlEditor" => Ok(Self::SqlEditor),
            other => Err(SdkError::invalid_argument(format!(
                "Invalid mode: {}. Valid modes are: {}",
                other,
                join_names(Self::ALL.iter().map(|m| m.as_str()))
            ))),
        }
    }
}

/// Direction of an order-by clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = SdkError;

    fn from_str(s: &str) -> SdkResult<Self> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(SdkError::invalid_argument(format!(
                "Invalid sort direction: {}. Valid directions are: asc, desc",
                other
            ))),
        }
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}
