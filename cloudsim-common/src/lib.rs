//! Common types shared between cloudsim-core and cloudsim-cli

use serde::{Deserialize, Serialize};

/// Timestamp layout used in every metadata snapshot
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a creation or upload timestamp for display
pub fn format_timestamp<Tz>(ts: &chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub const DEFAULT_INSTANCE_TYPE: &str = "t2.micro";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_NAMESPACE: &str = "default";

/// Snapshot of a resource's identity, as returned by `describe` and by manager listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceMetadata {
    pub id: String,
    pub name: String,
    pub created_at: String, // formatted with TIMESTAMP_FORMAT
}

/// Compute instance state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    #[default]
    Stopped,
    Running,
    Terminated,
}

impl std::fmt::Display for InstanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Running => write!(f, "running"),
            Self::Terminated => write!(f, "terminated"),
        }
    }
}

/// Pod status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PodStatus {
    #[default]
    Pending,
    Running,
    Stopped,
    Deleted,
}

impl std::fmt::Display for PodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Running => write!(f, "Running"),
            Self::Stopped => write!(f, "Stopped"),
            Self::Deleted => write!(f, "Deleted"),
        }
    }
}

/// Declarative instance definition. Missing fields fall back to the manager defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
}

/// Declarative bucket definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BucketSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Declarative pod definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PodSpec {
    pub name: String,
    #[serde(default)]
    pub containers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Read-only view of an instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceInfo {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub instance_type: String,
    pub state: InstanceState,
}

/// Read-only view of a bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BucketInfo {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub region: String,
    pub files: usize,
}

/// Read-only view of a pod
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PodInfo {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub namespace: String,
    pub status: PodStatus,
    pub containers: Vec<String>,
}

/// Simulator error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Stable error code for programmatic handling
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidStateTransition(_) => "INVALID_STATE_TRANSITION",
            Error::InvalidOperation(_) => "INVALID_OPERATION",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
