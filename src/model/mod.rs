//! Input contract for one audit run: the role snapshot produced by an
//! external collector (live IAM API, cached export, test fixture).
//!
//! IAM policy JSON writes several fields as either a scalar or an array;
//! [`OneOrMany`] absorbs that at ingestion so the pipeline only ever sees
//! sequences. Missing `Statement`/`Action`/`Resource` fields normalize to
//! empty sequences and are never an error.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A field that policy JSON writes as either a single value or a sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(v) => std::slice::from_ref(v),
            Self::Many(v) => v,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// One IAM role as collected, read-only input to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub role_name: String,
    /// Passthrough; the pipeline never inspects it.
    #[serde(default)]
    pub arn: String,
    /// When the role itself was last used, if the collector recorded it.
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_used_services: Vec<UsageRecord>,
    #[serde(default)]
    pub inline_policies: BTreeMap<String, PolicyDocument>,
    #[serde(default)]
    pub managed_policies: BTreeMap<String, PolicyDocument>,
}

/// An IAM policy document: one or more statements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "Statement", default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<OneOrMany<Statement>>,
}

impl PolicyDocument {
    pub fn statements(&self) -> &[Statement] {
        self.statement.as_ref().map(OneOrMany::as_slice).unwrap_or(&[])
    }
}

/// One policy statement. Effect is carried through but never evaluated;
/// conditions and NotAction/NotResource forms are out of scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statement {
    #[serde(rename = "Sid", default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(rename = "Effect", default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(rename = "Action", default, skip_serializing_if = "Option::is_none")]
    pub action: Option<OneOrMany<String>>,
    #[serde(rename = "Resource", default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<OneOrMany<String>>,
}

impl Statement {
    pub fn actions(&self) -> &[String] {
        self.action.as_ref().map(OneOrMany::as_slice).unwrap_or(&[])
    }

    pub fn resources(&self) -> &[String] {
        self.resource.as_ref().map(OneOrMany::as_slice).unwrap_or(&[])
    }
}

/// Evidence of whether a role recently invoked a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    #[serde(rename = "ServiceName")]
    pub service_name: String,
    /// The IAM API reports a timestamp; older exports carry a boolean.
    /// Absent means the service was granted but never authenticated.
    #[serde(
        rename = "LastAuthenticated",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_authenticated: Option<LastAuthenticated>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LastAuthenticated {
    Flag(bool),
    Timestamp(DateTime<Utc>),
}

impl UsageRecord {
    /// A record counts as use only when it is affirmatively authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(
            self.last_authenticated,
            Some(LastAuthenticated::Flag(true)) | Some(LastAuthenticated::Timestamp(_))
        )
    }
}
