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

//! Identifier generation for query elements and document blocks.

use uuid::Uuid;

/// Default length of a document block id.
pub const DEFAULT_BLOCK_ID_LEN: usize = 10;

/// Shortest block id handed out; shorter requested lengths are raised to it.
pub const MIN_BLOCK_ID_LEN: usize = 8;

/// Longest block id, the full width of a compact UUID.
pub const MAX_BLOCK_ID_LEN: usize = 32;

/// A fresh hyphenated UUID v4, used for selects, filters and order-bys.
pub fn new_element_id() -> String {
    Uuid::new_v4().to_string()
}

/// A fresh hyphen-free UUID v4 (32 hex characters).
pub fn new_compact_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// A short block id: the first `len` hex characters of a compact UUID.
///
/// `len` is clamped to `MIN_BLOCK_ID_LEN..=MAX_BLOCK_ID_LEN`.
pub fn new_block_id(len: usize) -> String {
    let mut id = new_compact_id();
    id.truncate(clamp_block_id_len(len));
    id
}

/// The block id length actually used for a requested `len`.
pub fn clamp_block_id_len(len: usize) -> usize {
    len.clamp(MIN_BLOCK_ID_LEN, MAX_BLOCK_ID_LEN)
}
