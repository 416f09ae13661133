//! Cloudsim Core Library
//!
//! In-memory simulators for three cloud resource kinds: compute instances,
//! object storage buckets and orchestrated pods. Each kind has its own manager
//! that creates, lists, looks up and retires resources of that kind.

// Core modules
pub mod config;
pub mod logging;
pub mod validation;

// Resource model
pub mod registry;
pub mod resource;

// Resource kinds
pub mod compute;
pub mod orchestration;
pub mod storage;

// Declarative runs across all managers
pub mod scenario;

pub use cloudsim_common::{Error, Result};
pub use compute::{ComputeManager, Instance, InstanceHandle};
pub use config::SimConfig;
pub use orchestration::{Pod, PodCluster, PodHandle};
pub use resource::{CloudResource, Lifecycle};
pub use scenario::{Scenario, Simulator};
pub use storage::{Bucket, BucketHandle, StorageManager};
