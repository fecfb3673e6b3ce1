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


//! Property-based tests for the shared vocabularies and id generation.

use polyteia_core::ids::{self, MAX_BLOCK_ID_LEN, MIN_BLOCK_ID_LEN};
use polyteia_core::{FilterOperator, QueryMode, SdkErrorKind};
use proptest::prelude::*;

fn arb_operator() -> impl Strategy<Value = FilterOperator> {
    prop::sample::select(FilterOperator::ALL.to_vec())
}

fn is_operator_name(s: &str) -> bool {
    FilterOperator::ALL.iter().any(|op| op.as_str() == s)
}

proptest! {
    #[test]
    fn prop_operator_name_round_trips(op in arb_operator()) {
        let parsed: FilterOperator = op.to_string().parse().unwrap();
        prop_assert_eq!(parsed, op);
        prop_assert_eq!(op.to_string(), op.as_str());
    }

    #[test]
    fn prop_unknown_operator_is_invalid_argument(name in "[a-z_]{0,24}") {
        prop_assume!(!is_operator_name(&name));
        let err = name.parse::<FilterOperator>().unwrap_err();
        prop_assert_eq!(err.kind, SdkErrorKind::InvalidArgument);
        prop_assert!(err.message.contains(&name));
    }

    #[test]
    fn prop_unknown_mode_is_invalid_argument(name in "[A-Za-z]{0,16}") {
        prop_assume!(name != "queryBuilder" && name != "sqlEditor");
        let err = name.parse::<QueryMode>().unwrap_err();
        prop_assert_eq!(err.kind, SdkErrorKind::InvalidArgument);
    }

    #[test]
    fn prop_block_id_length_within_bounds(len in 0usize..128) {
        let id = ids::new_block_id(len);
        prop_assert!(id.len() >= MIN_BLOCK_ID_LEN);
        prop_assert!(id.len() <= MAX_BLOCK_ID_LEN);
        prop_assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
