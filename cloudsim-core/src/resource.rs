//! Resource identity and the capability traits shared by every resource kind

use chrono::{DateTime, Local};
use cloudsim_common::{format_timestamp, ResourceMetadata, Result};
use uuid::Uuid;

/// Identity fixed at construction: id, display name and creation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    id: String,
    name: String,
    created_at: DateTime<Local>,
}

impl ResourceIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: Local::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn metadata(&self) -> ResourceMetadata {
        ResourceMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: format_timestamp(&self.created_at),
        }
    }
}

/// Behaviour common to every simulated resource
pub trait CloudResource {
    /// Human-readable kind used in messages and logs ("Instance", "Bucket", "Pod")
    const KIND: &'static str;

    fn identity(&self) -> &ResourceIdentity;

    /// Whether the resource has reached its terminal state
    fn is_terminal(&self) -> bool;

    fn id(&self) -> &str {
        self.identity().id()
    }

    fn name(&self) -> &str {
        self.identity().name()
    }

    fn created_at(&self) -> DateTime<Local> {
        self.identity().created_at()
    }

    /// Snapshot of `{id, name, created_at}`
    fn describe(&self) -> ResourceMetadata {
        self.identity().metadata()
    }
}

/// Start/stop/terminate state machine for resources that run
pub trait Lifecycle: CloudResource {
    /// Move into the active state. Fails if already active or terminal.
    fn start(&mut self) -> Result<()>;

    /// Leave the active state. Fails if not active.
    fn stop(&mut self) -> Result<()>;

    /// Move into the terminal state from any state
    fn terminate(&mut self);

    fn is_active(&self) -> bool;
}
