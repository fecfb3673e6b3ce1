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

//! Schema generations of the insight and report wire formats.

use std::fmt;

/// Generation of the insight query wire format.
///
/// The query version advanced 3 → 4 while the structured body advanced
/// 2 → 3; the newer generation added SQL variables and pivoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuerySchema {
    /// Query v3 with query-builder v2. Deprecated.
    V3,
    /// Query v4 with query-builder v3.
    #[default]
    V4,
}

impl QuerySchema {
    /// Version number written to `query.version`.
    pub fn query_version(&self) -> u32 {
        match self {
            Self::V3 => 3,
            Self::V4 => 4,
        }
    }

    /// Version number written to `query.queryBuilder.version`.
    pub fn builder_version(&self) -> u32 {
        match self {
            Self::V3 => 2,
            Self::V4 => 3,
        }
    }

    pub fn supports_sql_variables(&self) -> bool {
        matches!(self, Self::V4)
    }

    pub fn supports_pivot(&self) -> bool {
        matches!(self, Self::V4)
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, Self::V3)
    }

    /// Look a generation up by its query version.
    pub fn from_query_version(version: u32) -> Option<Self> {
        match version {
            3 => Some(Self::V3),
            4 => Some(Self::V4),
            _ => None,
        }
    }
}

impl fmt::Display for QuerySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.query_version())
    }
}

/// Generation of the report document wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportSchema {
    /// Widgets carry only an insight id and height; metadata lists insights.
    Legacy,
    /// Widgets may inline the insight payload; metadata also lists datasets.
    #[default]
    Current,
}

impl ReportSchema {
    pub fn supports_inline_insights(&self) -> bool {
        matches!(self, Self::Current)
    }

    pub fn supports_dataset_metadata(&self) -> bool {
        matches!(self, Self::Current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_schema_versions() {
        assert_eq!(QuerySchema::V3.query_version(), 3);
        assert_eq!(QuerySchema::V3.builder_version(), 2);
        assert_eq!(QuerySchema::V4.query_version(), 4);
        assert_eq!(QuerySchema::V4.builder_version(), 3);
    }

    #[test]
    fn test_versions_increase_monotonically() {
        assert!(QuerySchema::V4.query_version() > QuerySchema::V3.query_version());
        assert!(QuerySchema::V4.builder_version() > QuerySchema::V3.builder_version());
    }

    #[test]
    fn test_default_is_current() {
        assert_eq!(QuerySchema::default(), QuerySchema::V4);
        assert!(!QuerySchema::default().is_deprecated());
        assert_eq!(ReportSchema::default(), ReportSchema::Current);
    }

    #[test]
    fn test_from_query_version() {
        assert_eq!(QuerySchema::from_query_version(3), Some(QuerySchema::V3));
        assert_eq!(QuerySchema::from_query_version(4), Some(QuerySchema::V4));
        assert_eq!(QuerySchema::from_query_version(2), None);
    }

    #[test]
    fn test_feature_flags() {
        assert!(!QuerySchema::V3.supports_pivot());
        assert!(QuerySchema::V4.supports_sql_variables());
        assert!(!ReportSchema::Legacy.supports_inline_insights());
        assert!(ReportSchema::Current.supports_dataset_metadata());
    }

    #[test]
    fn test_display() {
        assert_eq!(QuerySchema::V4.to_string(), "v4");
    }
}
