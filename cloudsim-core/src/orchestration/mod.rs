///! Pod orchestration module
///! A single simulated cluster that schedules, lists and deletes pods

pub mod pod;

pub use pod::Pod;

use crate::config::OrchestrationConfig;
use crate::log_resource_operation;
use crate::registry::{Handle, Registry};
use crate::resource::CloudResource;
use cloudsim_common::{PodInfo, PodSpec, ResourceMetadata, Result};

pub type PodHandle = Handle<Pod>;

/// Pod manager
pub struct PodCluster {
    pods: Registry<Pod>,
    config: OrchestrationConfig,
}

impl PodCluster {
    pub fn new() -> Self {
        Self::with_config(OrchestrationConfig::default())
    }

    pub fn with_config(config: OrchestrationConfig) -> Self {
        Self {
            pods: Registry::new(),
            config,
        }
    }

    /// Create a pod in the default namespace
    pub fn create_pod(&self, name: &str, containers: Vec<String>) -> PodHandle {
        let namespace = self.config.default_namespace.clone();
        self.create_pod_in_namespace(name, containers, &namespace)
    }

    pub fn create_pod_in_namespace(
        &self,
        name: &str,
        containers: Vec<String>,
        namespace: &str,
    ) -> PodHandle {
        let pod = Pod::new(name, containers, namespace);
        log_resource_operation!(
            Pod::KIND,
            "create",
            pod.id(),
            pod.name(),
            namespace = namespace
        );
        self.pods.insert(pod)
    }

    /// Create a pod from a declarative definition
    pub fn create_pod_from_spec(&self, spec: &PodSpec) -> PodHandle {
        match spec.namespace.as_deref() {
            Some(namespace) => {
                self.create_pod_in_namespace(&spec.name, spec.containers.clone(), namespace)
            }
            None => self.create_pod(&spec.name, spec.containers.clone()),
        }
    }

    /// List all pods that have not been deleted
    pub fn list_pods(&self) -> Vec<ResourceMetadata> {
        self.pods.list()
    }

    pub fn pod_infos(&self) -> Vec<PodInfo> {
        self.pods.map_active(Pod::to_info)
    }

    /// Get the first non-deleted pod with this name
    pub fn find_pod(&self, name: &str) -> Result<PodHandle> {
        self.pods.find(name)
    }

    /// Delete a pod by name
    pub fn delete_pod(&self, name: &str) -> Result<()> {
        let pod = self.find_pod(name)?;
        pod.write().delete();
        Ok(())
    }

    pub fn config(&self) -> &OrchestrationConfig {
        &self.config
    }

    pub fn usage() -> &'static str {
        "Use `create_pod`, `start`, `stop`, `delete_pod`, and `list_pods` to simulate pod operations."
    }
}

impl Default for PodCluster {
    fn default() -> Self {
        Self::new()
    }
}
