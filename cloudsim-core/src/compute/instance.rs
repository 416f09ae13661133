///! Simulated compute instance
///! stopped -> running -> stopped ... ; any state -> terminated

use crate::resource::{CloudResource, Lifecycle, ResourceIdentity};
use crate::{log_rejected_operation, log_resource_operation};
use cloudsim_common::{Error, InstanceInfo, InstanceState, Result};

#[derive(Debug, Clone)]
pub struct Instance {
    identity: ResourceIdentity,
    instance_type: String,
    state: InstanceState,
}

impl Instance {
    pub(crate) fn new(name: impl Into<String>, instance_type: impl Into<String>) -> Self {
        Self {
            identity: ResourceIdentity::new(name),
            instance_type: instance_type.into(),
            state: InstanceState::Stopped,
        }
    }

    pub fn state(&self) -> InstanceState {
        self.state
    }

    pub fn instance_type(&self) -> &str {
        &self.instance_type
    }

    /// Change the instance type. Only allowed while stopped.
    pub fn set_instance_type(&mut self, instance_type: impl Into<String>) -> Result<()> {
        let reason = match self.state {
            InstanceState::Stopped => None,
            InstanceState::Running => Some("while running"),
            InstanceState::Terminated => Some("after termination"),
        };
        if let Some(reason) = reason {
            let err = Error::InvalidOperation(format!(
                "Cannot change instance type of '{}' {}",
                self.name(),
                reason
            ));
            log_rejected_operation!(Self::KIND, "set_instance_type", self.name(), err);
            return Err(err);
        }

        let instance_type = instance_type.into();
        log_resource_operation!(
            Self::KIND,
            "set_instance_type",
            self.id(),
            self.name(),
            from = self.instance_type.as_str(),
            to = instance_type.as_str()
        );
        self.instance_type = instance_type;
        Ok(())
    }

    pub fn to_info(&self) -> InstanceInfo {
        let meta = self.describe();
        InstanceInfo {
            id: meta.id,
            name: meta.name,
            created_at: meta.created_at,
            instance_type: self.instance_type.clone(),
            state: self.state,
        }
    }

    fn reject(&self, op: &str, message: String) -> Result<()> {
        let err = Error::InvalidStateTransition(message);
        log_rejected_operation!(Self::KIND, op, self.name(), err);
        Err(err)
    }
}

impl CloudResource for Instance {
    const KIND: &'static str = "Instance";

    fn identity(&self) -> &ResourceIdentity {
        &self.identity
    }

    fn is_terminal(&self) -> bool {
        self.state == InstanceState::Terminated
    }
}

impl Lifecycle for Instance {
    fn start(&mut self) -> Result<()> {
        match self.state {
            InstanceState::Running => {
                self.reject("start", format!("{} is already running", self.name()))
            }
            InstanceState::Terminated => {
                self.reject("start", format!("{} has been terminated", self.name()))
            }
            InstanceState::Stopped => {
                self.state = InstanceState::Running;
                log_resource_operation!(Self::KIND, "start", self.id(), self.name());
                Ok(())
            }
        }
    }

    fn stop(&mut self) -> Result<()> {
        match self.state {
            InstanceState::Running => {
                self.state = InstanceState::Stopped;
                log_resource_operation!(Self::KIND, "stop", self.id(), self.name());
                Ok(())
            }
            InstanceState::Stopped => {
                self.reject("stop", format!("{} is already stopped", self.name()))
            }
            InstanceState::Terminated => {
                self.reject("stop", format!("{} has been terminated", self.name()))
            }
        }
    }

    fn terminate(&mut self) {
        self.state = InstanceState::Terminated;
        log_resource_operation!(Self::KIND, "terminate", self.id(), self.name());
    }

    fn is_active(&self) -> bool {
        self.state == InstanceState::Running
    }
}

impl std::fmt::Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<{}, {}>", Self::KIND, self.name(), self.id())
    }
}
