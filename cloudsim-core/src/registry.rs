//! Ordered, name-addressable collection of resources of one kind
//!
//! Resources are appended in creation order and never removed. Terminal
//! resources stay in the collection but are hidden from listings and lookups.

use crate::resource::CloudResource;
use cloudsim_common::{Error, ResourceMetadata, Result};
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared handle to a resource; the registry and callers hold aliases of the same value
pub type Handle<R> = Arc<RwLock<R>>;

pub struct Registry<R> {
    resources: RwLock<Vec<Handle<R>>>,
}

impl<R: CloudResource> Registry<R> {
    pub fn new() -> Self {
        Self {
            resources: RwLock::new(Vec::new()),
        }
    }

    /// Append a resource and return a handle to it
    pub fn insert(&self, resource: R) -> Handle<R> {
        let handle = Arc::new(RwLock::new(resource));
        self.resources.write().push(Arc::clone(&handle));
        handle
    }

    /// Metadata of every non-terminal resource, in creation order
    pub fn list(&self) -> Vec<ResourceMetadata> {
        self.map_active(|r| r.describe())
    }

    /// Apply `f` to every non-terminal resource, in creation order
    pub fn map_active<T>(&self, f: impl Fn(&R) -> T) -> Vec<T> {
        let resources = self.resources.read();
        resources
            .iter()
            .filter_map(|handle| {
                let resource = handle.read();
                (!resource.is_terminal()).then(|| f(&*resource))
            })
            .collect()
    }

    /// First non-terminal resource named `name`, by insertion order.
    ///
    /// Must not be called while the caller holds a write guard on one of this
    /// registry's handles.
    pub fn find(&self, name: &str) -> Result<Handle<R>> {
        let resources = self.resources.read();
        resources
            .iter()
            .find(|handle| {
                let resource = handle.read();
                resource.name() == name && !resource.is_terminal()
            })
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("{} '{}' not found", R::KIND, name)))
    }

    /// Number of resources ever created, terminal ones included
    pub fn len(&self) -> usize {
        self.resources.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.read().is_empty()
    }
}

impl<R: CloudResource> Default for Registry<R> {
    fn default() -> Self {
        Self::new()
    }
}
