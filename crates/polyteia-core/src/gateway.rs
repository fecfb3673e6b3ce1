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

//! Request and response envelopes of the API gateway.
//!
//! The gateway exposes a single RPC-style endpoint. Writes are sent as
//! `{"command": <name>, "params": {...}}` and reads as
//! `{"query": <name>, "params": {...}}`; successful answers wrap their
//! payload as `{"data": ...}`. Nothing here performs I/O: callers hand the
//! envelope to their HTTP client of choice and feed the raw answer back
//! through [`GatewayResponse::validate`].

use crate::{SdkError, SdkResult};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

/// Command names understood by the gateway.
pub mod commands {
    pub const CREATE_INSIGHT: &str = "create_insight";
    pub const UPDATE_INSIGHT: &str = "update_insight";
    pub const CREATE_REPORT: &str = "create_report";
    pub const UPDATE_REPORT: &str = "update_report";
    pub const ADD_INSIGHT_TO_REPORT: &str = "add_insight_to_report";
    pub const REMOVE_INSIGHT_FROM_REPORT: &str = "remove_insight_from_report";
}

/// Query names understood by the gateway.
pub mod queries {
    pub const GET_REPORT: &str = "get_report";
}

/// Whether a request mutates state or only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Command,
    Query,
}

impl RequestKind {
    fn key(&self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Query => "query",
        }
    }
}

/// A command or query envelope ready to be posted to the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub kind: RequestKind,
    pub name: String,
    pub params: Value,
}

impl GatewayRequest {
    pub fn command(name: impl Into<String>, params: Value) -> Self {
        Self {
            kind: RequestKind::Command,
            name: name.into(),
            params,
        }
    }

    pub fn query(name: impl Into<String>, params: Value) -> Self {
        Self {
            kind: RequestKind::Query,
            name: name.into(),
            params,
        }
    }

    /// Envelope for an update: the target id is merged in front of the body.
    ///
    /// Non-object bodies are replaced by `{"id": id}`.
    pub fn update(name: impl Into<String>, id: impl Into<String>, body: Value) -> Self {
        let mut params = Map::new();
        params.insert("id".to_string(), Value::String(id.into()));
        if let Value::Object(fields) = body {
            for (key, value) in fields {
                if key != "id" {
                    params.insert(key, value);
                }
            }
        }
        Self::command(name, Value::Object(params))
    }

    /// The envelope as a JSON value.
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(2);
        map.insert(self.kind.key().to_string(), Value::String(self.name.clone()));
        map.insert("params".to_string(), self.params.clone());
        Value::Object(map)
    }
}

impl Serialize for GatewayRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.kind.key(), &self.name)?;
        map.serialize_entry("params", &self.params)?;
        map.end()
    }
}

/// What a caller expects from a gateway answer.
#[derive(Debug, Clone)]
pub struct Expectation {
    /// Human-readable name of the operation (e.g. "Create insight").
    pub context: String,
    /// Acceptable HTTP status codes.
    pub statuses: Vec<u16>,
    /// Nested key path that must exist in a JSON answer.
    pub required_keys: Vec<String>,
}

impl Expectation {
    /// Expect 200 or 201 with no required keys.
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            statuses: vec![200, 201],
            required_keys: Vec::new(),
        }
    }

    pub fn statuses(mut self, statuses: &[u16]) -> Self {
        self.statuses = statuses.to_vec();
        self
    }

    pub fn require(mut self, path: &[&str]) -> Self {
        self.required_keys = path.iter().map(|k| k.to_string()).collect();
        self
    }
}

/// A raw gateway answer as received by the transport.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl GatewayResponse {
    pub fn new(status: u16, content_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Check the answer against `expect` and return the parsed JSON body.
    ///
    /// A non-JSON answer with an accepted status yields an empty object.
    pub fn validate(&self, expect: &Expectation) -> SdkResult<Value> {
        let accepted = expect.statuses.contains(&self.status);

        if !self.content_type.contains("application/json") {
            if accepted {
                return Ok(Value::Object(Map::new()));
            }
            return Err(self.failure(expect, &self.body));
        }

        let json: Value = serde_json::from_str(&self.body).map_err(|_| {
            SdkError::gateway(format!(
                "{} failed: Invalid JSON response:\n{}",
                expect.context, self.body
            ))
            .with_context(expect.context.clone())
        })?;

        if !accepted {
            return Err(self.failure(expect, &json.to_string()));
        }

        let mut current = &json;
        for key in &expect.required_keys {
            current = current.get(key).ok_or_else(|| {
                SdkError::gateway(format!(
                    "{} failed: Missing key '{}' in response:\n{}",
                    expect.context, key, json
                ))
                .with_context(expect.context.clone())
            })?;
        }

        debug!(context = %expect.context, status = self.status, "gateway response accepted");
        Ok(json)
    }

    /// Validate and return the `data` payload.
    ///
    /// A non-JSON answer with an accepted status yields an empty object.
    pub fn into_data(self, expect: &Expectation) -> SdkResult<Value> {
        let mut json = self.validate(expect)?;
        if !self.content_type.contains("application/json") {
            return Ok(json);
        }
        match json.get_mut("data") {
            Some(data) => Ok(data.take()),
            None => Err(SdkError::gateway(format!(
                "{} failed: Missing key 'data' in response:\n{}",
                expect.context, json
            ))
            .with_context(expect.context.clone())),
        }
    }

    fn failure(&self, expect: &Expectation, detail: &str) -> SdkError {
        SdkError::gateway(format!(
            "{} failed (HTTP {}):\n{}",
            expect.context, self.status, detail
        ))
        .with_context(expect.context.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SdkErrorKind;
    use serde_json::json;

    const JSON: &str = "application/json; charset=utf-8";

    #[test]
    fn test_command_envelope() {
        let req = GatewayRequest::command(commands::CREATE_INSIGHT, json!({"name": "x"}));
        assert_eq!(
            req.to_json(),
            json!({"command": "create_insight", "params": {"name": "x"}})
        );
        assert_eq!(serde_json::to_value(&req).unwrap(), req.to_json());
    }

    #[test]
    fn test_query_envelope() {
        let req = GatewayRequest::query(queries::GET_REPORT, json!({"id": "r1"}));
        assert_eq!(
            req.to_json(),
            json!({"query": "get_report", "params": {"id": "r1"}})
        );
    }

    #[test]
    fn test_update_envelope_puts_id_first() {
        let req = GatewayRequest::update(
            commands::UPDATE_INSIGHT,
            "ins_1",
            json!({"id": "ignored", "name": "Revenue"}),
        );
        assert_eq!(req.params, json!({"id": "ins_1", "name": "Revenue"}));
    }

    #[test]
    fn test_validate_success() {
        let resp = GatewayResponse::new(200, JSON, r#"{"data": {"id": "abc"}}"#);
        let expect = Expectation::new("Create insight").require(&["data", "id"]);
        let json = resp.validate(&expect).unwrap();
        assert_eq!(json["data"]["id"], "abc");
    }

    #[test]
    fn test_validate_missing_key() {
        let resp = GatewayResponse::new(200, JSON, r#"{"data": {}}"#);
        let expect = Expectation::new("Create insight").require(&["data", "id"]);
        let err = resp.validate(&expect).unwrap_err();
        assert_eq!(err.kind, SdkErrorKind::Gateway);
        assert!(err.message.contains("Missing key 'id'"));
    }

    #[test]
    fn test_validate_unexpected_status() {
        let resp = GatewayResponse::new(403, JSON, r#"{"error": "forbidden"}"#);
        let err = resp.validate(&Expectation::new("Get report")).unwrap_err();
        assert!(err.message.contains("HTTP 403"));
        assert_eq!(err.context.as_deref(), Some("Get report"));
    }

    #[test]
    fn test_validate_non_json_success() {
        let resp = GatewayResponse::new(204, "text/plain", "");
        let expect = Expectation::new("Upload").statuses(&[200, 204]);
        assert_eq!(resp.validate(&expect).unwrap(), json!({}));
    }

    #[test]
    fn test_validate_non_json_failure() {
        let resp = GatewayResponse::new(502, "text/html", "Bad Gateway");
        let err = resp.validate(&Expectation::new("Upload")).unwrap_err();
        assert!(err.message.contains("Bad Gateway"));
    }

    #[test]
    fn test_validate_invalid_json() {
        let resp = GatewayResponse::new(200, JSON, "{oops");
        let err = resp.validate(&Expectation::new("Get insight")).unwrap_err();
        assert!(err.message.contains("Invalid JSON"));
    }

    #[test]
    fn test_into_data() {
        let resp = GatewayResponse::new(201, JSON, r#"{"data": {"id": "r9"}}"#);
        let data = resp.into_data(&Expectation::new("Create report")).unwrap();
        assert_eq!(data, json!({"id": "r9"}));
    }

    #[test]
    fn test_into_data_non_json_success() {
        let resp = GatewayResponse::new(200, "text/plain", "ok");
        let data = resp.into_data(&Expectation::new("Delete report")).unwrap();
        assert_eq!(data, json!({}));
    }
}
