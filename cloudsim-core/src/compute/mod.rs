///! Compute management module
///! Creates, lists and terminates simulated instances

pub mod instance;

pub use instance::Instance;

use crate::config::ComputeConfig;
use crate::log_resource_operation;
use crate::registry::{Handle, Registry};
use crate::resource::{CloudResource, Lifecycle};
use cloudsim_common::{InstanceInfo, InstanceSpec, ResourceMetadata, Result};

pub type InstanceHandle = Handle<Instance>;

/// Instance manager
pub struct ComputeManager {
    instances: Registry<Instance>,
    config: ComputeConfig,
}

impl ComputeManager {
    pub fn new() -> Self {
        Self::with_config(ComputeConfig::default())
    }

    pub fn with_config(config: ComputeConfig) -> Self {
        Self {
            instances: Registry::new(),
            config,
        }
    }

    /// Create an instance of the default type
    pub fn create_instance(&self, name: &str) -> InstanceHandle {
        let instance_type = self.config.default_instance_type.clone();
        self.create_instance_with_type(name, &instance_type)
    }

    /// Create an instance of the given type
    pub fn create_instance_with_type(&self, name: &str, instance_type: &str) -> InstanceHandle {
        let instance = Instance::new(name, instance_type);
        log_resource_operation!(
            Instance::KIND,
            "create",
            instance.id(),
            instance.name(),
            instance_type = instance_type
        );
        self.instances.insert(instance)
    }

    /// Create an instance from a declarative definition
    pub fn create_instance_from_spec(&self, spec: &InstanceSpec) -> InstanceHandle {
        match spec.instance_type.as_deref() {
            Some(instance_type) => self.create_instance_with_type(&spec.name, instance_type),
            None => self.create_instance(&spec.name),
        }
    }

    /// List all non-terminated instances
    pub fn list_instances(&self) -> Vec<ResourceMetadata> {
        self.instances.list()
    }

    /// Detailed view of all non-terminated instances
    pub fn instance_infos(&self) -> Vec<InstanceInfo> {
        self.instances.map_active(Instance::to_info)
    }

    /// Get the first non-terminated instance with this name
    pub fn find_instance(&self, name: &str) -> Result<InstanceHandle> {
        self.instances.find(name)
    }

    /// Terminate an instance by name
    pub fn terminate_instance(&self, name: &str) -> Result<()> {
        let instance = self.find_instance(name)?;
        instance.write().terminate();
        Ok(())
    }

    /// Number of instances ever created, terminated ones included
    pub fn total_instances(&self) -> usize {
        self.instances.len()
    }

    pub fn config(&self) -> &ComputeConfig {
        &self.config
    }

    pub fn usage() -> &'static str {
        "Use `create_instance`, `start`, `stop`, `terminate`, and `list_instances` to simulate compute instances."
    }
}

impl Default for ComputeManager {
    fn default() -> Self {
        Self::new()
    }
}
