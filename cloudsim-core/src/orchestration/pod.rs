///! Simulated pod
///! Pending -> Running -> Stopped -> Running ... ; any state -> Deleted

use crate::resource::{CloudResource, Lifecycle, ResourceIdentity};
use crate::validation::validate_container_name;
use crate::{log_rejected_operation, log_resource_operation};
use cloudsim_common::{Error, PodInfo, PodStatus, Result};

#[derive(Debug, Clone)]
pub struct Pod {
    identity: ResourceIdentity,
    namespace: String,
    containers: Vec<String>,
    status: PodStatus,
}

impl Pod {
    pub(crate) fn new(
        name: impl Into<String>,
        containers: Vec<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            identity: ResourceIdentity::new(name),
            namespace: namespace.into(),
            containers,
            status: PodStatus::Pending,
        }
    }

    pub fn status(&self) -> PodStatus {
        self.status
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Append a container to the pod
    pub fn add_container(&mut self, container_name: &str) -> Result<()> {
        if let Err(err) = validate_container_name(container_name) {
            log_rejected_operation!(Self::KIND, "add_container", self.name(), err);
            return Err(err);
        }

        self.containers.push(container_name.to_string());
        log_resource_operation!(
            Self::KIND,
            "add_container",
            self.id(),
            self.name(),
            container = container_name
        );
        Ok(())
    }

    /// Containers in the order they were added
    pub fn list_containers(&self) -> &[String] {
        &self.containers
    }

    /// Mark the pod deleted. Always succeeds.
    pub fn delete(&mut self) {
        self.status = PodStatus::Deleted;
        log_resource_operation!(Self::KIND, "delete", self.id(), self.name());
    }

    pub fn to_info(&self) -> PodInfo {
        let meta = self.describe();
        PodInfo {
            id: meta.id,
            name: meta.name,
            created_at: meta.created_at,
            namespace: self.namespace.clone(),
            status: self.status,
            containers: self.containers.clone(),
        }
    }

    fn reject(&self, op: &str, message: String) -> Result<()> {
        let err = Error::InvalidStateTransition(message);
        log_rejected_operation!(Self::KIND, op, self.name(), err);
        Err(err)
    }
}

impl CloudResource for Pod {
    const KIND: &'static str = "Pod";

    fn identity(&self) -> &ResourceIdentity {
        &self.identity
    }

    fn is_terminal(&self) -> bool {
        self.status == PodStatus::Deleted
    }
}

impl Lifecycle for Pod {
    fn start(&mut self) -> Result<()> {
        match self.status {
            PodStatus::Running => {
                self.reject("start", format!("Pod '{}' is already running", self.name()))
            }
            PodStatus::Deleted => {
                self.reject("start", format!("Pod '{}' has been deleted", self.name()))
            }
            PodStatus::Pending | PodStatus::Stopped => {
                self.status = PodStatus::Running;
                let containers = self.containers.join(",");
                log_resource_operation!(
                    Self::KIND,
                    "start",
                    self.id(),
                    self.name(),
                    containers = containers.as_str()
                );
                Ok(())
            }
        }
    }

    fn stop(&mut self) -> Result<()> {
        if self.status != PodStatus::Running {
            return self.reject("stop", format!("Pod '{}' is not running", self.name()));
        }

        self.status = PodStatus::Stopped;
        log_resource_operation!(Self::KIND, "stop", self.id(), self.name());
        Ok(())
    }

    fn terminate(&mut self) {
        self.delete();
    }

    fn is_active(&self) -> bool {
        self.status == PodStatus::Running
    }
}

impl std::fmt::Display for Pod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<{}, {}>", Self::KIND, self.name(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pod() -> Pod {
        Pod::new(
            "nginx-pod",
            vec!["nginx".to_string(), "sidecar".to_string()],
            "default",
        )
    }

    #[test]
    fn test_lifecycle() {
        let mut p = pod();
        assert_eq!(p.status(), PodStatus::Pending);

        p.start().unwrap();
        assert_eq!(p.status(), PodStatus::Running);

        p.stop().unwrap();
        assert_eq!(p.status(), PodStatus::Stopped);

        p.start().unwrap();
        assert!(p.is_active());
    }

    #[test]
    fn test_double_start_fails() {
        let mut p = pod();
        p.start().unwrap();
        assert!(matches!(p.start(), Err(Error::InvalidStateTransition(_))));
    }

    #[test]
    fn test_stop_pending_fails() {
        let mut p = pod();
        assert!(matches!(p.stop(), Err(Error::InvalidStateTransition(_))));
        assert_eq!(p.status(), PodStatus::Pending);
    }

    #[test]
    fn test_delete_is_terminal() {
        let mut p = pod();
        p.start().unwrap();
        p.delete();
        assert!(p.is_terminal());

        p.terminate();
        assert_eq!(p.status(), PodStatus::Deleted);
        assert!(matches!(p.start(), Err(Error::InvalidStateTransition(_))));
        assert!(matches!(p.stop(), Err(Error::InvalidStateTransition(_))));
    }

    #[test]
    fn test_add_container() {
        let mut p = pod();
        p.add_container("metrics_exporter").unwrap();
        p.add_container(&"a".repeat(300)).unwrap();

        let err = p.add_container("123bad").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(p.list_containers().len(), 4);
        assert_eq!(p.list_containers()[2], "metrics_exporter");
    }

    #[test]
    fn test_info() {
        let p = Pod::new("db-pod", vec!["postgres".to_string()], "data");
        let info = p.to_info();

        assert_eq!(info.namespace, "data");
        assert_eq!(info.status, PodStatus::Pending);
        assert_eq!(info.containers, vec!["postgres"]);
        assert_eq!(p.to_string(), format!("Pod<db-pod, {}>", p.id()));
    }
}
