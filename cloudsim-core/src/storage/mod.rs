///! Object storage management module
///! Creates and looks up simulated buckets

pub mod bucket;

pub use bucket::{Bucket, StoredFile};

use crate::config::StorageConfig;
use crate::log_resource_operation;
use crate::registry::{Handle, Registry};
use crate::resource::CloudResource;
use cloudsim_common::{BucketInfo, BucketSpec, ResourceMetadata, Result};

pub type BucketHandle = Handle<Bucket>;

/// Bucket manager
pub struct StorageManager {
    buckets: Registry<Bucket>,
    config: StorageConfig,
}

impl StorageManager {
    pub fn new() -> Self {
        Self::with_config(StorageConfig::default())
    }

    pub fn with_config(config: StorageConfig) -> Self {
        Self {
            buckets: Registry::new(),
            config,
        }
    }

    /// Create a bucket in the default region
    pub fn create_bucket(&self, name: &str) -> BucketHandle {
        let region = self.config.default_region.clone();
        self.create_bucket_in_region(name, &region)
    }

    pub fn create_bucket_in_region(&self, name: &str, region: &str) -> BucketHandle {
        let bucket = Bucket::new(name, region);
        log_resource_operation!(
            Bucket::KIND,
            "create",
            bucket.id(),
            bucket.name(),
            region = region
        );
        self.buckets.insert(bucket)
    }

    /// Create a bucket from a declarative definition
    pub fn create_bucket_from_spec(&self, spec: &BucketSpec) -> BucketHandle {
        match spec.region.as_deref() {
            Some(region) => self.create_bucket_in_region(&spec.name, region),
            None => self.create_bucket(&spec.name),
        }
    }

    /// List all buckets
    pub fn list_buckets(&self) -> Vec<ResourceMetadata> {
        self.buckets.list()
    }

    pub fn bucket_infos(&self) -> Vec<BucketInfo> {
        self.buckets.map_active(Bucket::to_info)
    }

    /// Get the first bucket with this name
    pub fn find_bucket(&self, name: &str) -> Result<BucketHandle> {
        self.buckets.find(name)
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn usage() -> &'static str {
        "Use `create_bucket`, `upload`, `delete`, `list_files`, and `list_buckets` to simulate object storage."
    }
}

impl Default for StorageManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudsim_common::Error;

    #[test]
    fn test_create_and_list() {
        let manager = StorageManager::new();
        let logs = manager.create_bucket("my-logs");
        manager.create_bucket_in_region("backups", "eu-central-1");

        assert_eq!(logs.read().region(), "us-east-1");

        let names: Vec<_> = manager.list_buckets().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["my-logs", "backups"]);
    }

    #[test]
    fn test_create_from_spec() {
        let manager = StorageManager::with_config(StorageConfig {
            default_region: "ap-south-1".to_string(),
        });

        let spec = BucketSpec {
            name: "assets".to_string(),
            region: None,
        };
        let assets = manager.create_bucket_from_spec(&spec);
        assert_eq!(assets.read().region(), "ap-south-1");
    }

    #[test]
    fn test_find_bucket() {
        let manager = StorageManager::new();
        let logs = manager.create_bucket("my-logs");
        logs.write().upload("log1.txt", "hello").unwrap();

        let found = manager.find_bucket("my-logs").unwrap();
        assert_eq!(found.read().get_file_content("log1.txt"), Some("hello"));

        assert!(matches!(manager.find_bucket("nope"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_bucket_infos() {
        let manager = StorageManager::new();
        let logs = manager.create_bucket("my-logs");
        logs.write().upload("a.txt", "1").unwrap();
        logs.write().upload("b.txt", "2").unwrap();

        let infos = manager.bucket_infos();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].files, 2);
    }
}
