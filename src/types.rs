//! Shared policy document types used by synthesis and explanation.
//!
//! The wire shape is the standard resource-policy JSON: `Version` plus a
//! `Statement` list whose entries carry `Sid`, `Effect`, `Principal`,
//! `Action`, `Resource`, and an optional `Condition`. Synthesis always
//! emits lists for `Action`/`Resource`; parsing accepts the scalar forms
//! found in hand-written documents as well.

use std::collections::BTreeMap;

use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{PolicyStudioError, Result};

/// AWS policy language version token, treated as an opaque literal
pub const POLICY_VERSION: &str = "2012-10-17";

/// Principal value granting access to anyone
pub(crate) const WILDCARD_PRINCIPAL: &str = "*";

/// ARN prefix for S3 bucket resources
pub(crate) const S3_ARN_PREFIX: &str = "arn:aws:s3:::";

/// Service namespace prefixed onto permission names
pub(crate) const ACTION_NAMESPACE: &str = "s3";

/// Condition operator for source-IP restrictions
pub(crate) const IP_ADDRESS_OPERATOR: &str = "IpAddress";

/// Condition key carrying the whitelisted source addresses
pub(crate) const SOURCE_IP_CONDITION_KEY: &str = "aws:SourceIp";

/// Condition operator recognized as a time-based restriction
pub(crate) const DATE_CONDITION_OPERATOR: &str = "DateGreaterThan";

/// Statement effect. Only `Allow` is ever synthesized; `Deny` parses so
/// that pasted documents round-trip, but no component branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

impl Default for Effect {
    fn default() -> Self {
        Self::Allow
    }
}

/// Who a statement applies to.
///
/// Serialized as the literal string `"*"` for `Wildcard` and as
/// `{"AWS": "<arn>"}` for `Aws`. Any other wire shape (a bare ARN string,
/// a principal list, a service principal) is rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Anyone on the internet
    Wildcard,
    /// A specific AWS identity, carried verbatim
    Aws(String),
}

impl Serialize for Principal {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Wildcard => serializer.serialize_str(WILDCARD_PRINCIPAL),
            Self::Aws(arn) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("AWS", arn)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(literal) if literal == WILDCARD_PRINCIPAL => {
                Ok(Self::Wildcard)
            }
            serde_json::Value::Object(map) => match map.get("AWS") {
                Some(serde_json::Value::String(arn)) => Ok(Self::Aws(arn.clone())),
                _ => Err(DeError::custom(
                    "Principal object must carry a single AWS identity string",
                )),
            },
            _ => Err(DeError::custom(
                "Principal must be \"*\" or an object with an AWS identity string",
            )),
        }
    }
}

/// Accept either a scalar string or a list of strings, normalizing to a list
pub(crate) fn string_or_seq<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrSeq {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrSeq::deserialize(deserializer)? {
        StringOrSeq::One(single) => vec![single],
        StringOrSeq::Many(many) => many,
    })
}

/// Value list of a single condition key, tolerating the scalar form on parse
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ConditionValues(pub Vec<String>);

impl<'de> Deserialize<'de> for ConditionValues {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        string_or_seq(deserializer).map(Self)
    }
}

/// Condition block: operator -> condition key -> value list.
///
/// Operators this system interprets are `IpAddress` and `DateGreaterThan`;
/// anything else is preserved without being described.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionMap(pub BTreeMap<String, BTreeMap<String, ConditionValues>>);

impl ConditionMap {
    /// Whether any condition key is present under the given operator
    pub fn has_operator(&self, operator: &str) -> bool {
        self.0.contains_key(operator)
    }
}

/// A single access-control rule of a policy document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    /// Statement label, not semantically used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(default)]
    pub effect: Effect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
    #[serde(deserialize_with = "string_or_seq")]
    pub action: Vec<String>,
    #[serde(deserialize_with = "string_or_seq")]
    pub resource: Vec<String>,
    /// Absent entirely when no condition applies, never an empty object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionMap>,
}

impl Statement {
    /// Create an Allow statement for the given principal, actions, and resources
    pub fn allow(principal: Principal, action: Vec<String>, resource: Vec<String>) -> Self {
        Self {
            sid: None,
            effect: Effect::Allow,
            principal: Some(principal),
            action,
            resource,
            condition: None,
        }
    }

    /// Attach a statement ID
    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    /// Attach one condition key with its values under the given operator
    pub fn with_condition(
        mut self,
        operator: impl Into<String>,
        key: impl Into<String>,
        values: Vec<String>,
    ) -> Self {
        self.condition
            .get_or_insert_with(ConditionMap::default)
            .0
            .entry(operator.into())
            .or_default()
            .insert(key.into(), ConditionValues(values));
        self
    }
}

/// A policy document: fixed version plus a statement list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    #[serde(default = "default_version")]
    pub version: String,
    pub statement: Vec<Statement>,
}

fn default_version() -> String {
    POLICY_VERSION.to_string()
}

impl PolicyDocument {
    /// Create an empty policy document with the fixed version token
    pub fn new() -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement: Vec::new(),
        }
    }

    /// Append a statement to the document
    pub fn add_statement(&mut self, statement: Statement) {
        self.statement.push(statement);
    }

    /// Render the document as two-space-indented JSON text for display or export
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PolicyStudioError::json_parsing("policy document serialization", e))
    }
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self::new()
    }
}
