///! Simulated object storage bucket
///! A bucket holds named text objects; it has no lifecycle of its own

use crate::resource::{CloudResource, ResourceIdentity};
use crate::validation::validate_file_name;
use crate::{log_rejected_operation, log_resource_operation};
use chrono::{DateTime, Local};
use cloudsim_common::{BucketInfo, Error, Result};
use std::collections::HashMap;

/// Stored object with its upload time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub content: String,
    pub uploaded_at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct Bucket {
    identity: ResourceIdentity,
    region: String,
    files: HashMap<String, StoredFile>,
}

impl Bucket {
    pub(crate) fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            identity: ResourceIdentity::new(name),
            region: region.into(),
            files: HashMap::new(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Store `content` under `file_name`, replacing any existing object and its timestamp
    pub fn upload(&mut self, file_name: &str, content: impl Into<String>) -> Result<()> {
        if let Err(err) = validate_file_name(file_name) {
            log_rejected_operation!(Self::KIND, "upload", self.name(), err);
            return Err(err);
        }

        let content = content.into();
        let size = content.len();
        self.files.insert(
            file_name.to_string(),
            StoredFile {
                content,
                uploaded_at: Local::now(),
            },
        );
        log_resource_operation!(
            Self::KIND,
            "upload",
            self.id(),
            self.name(),
            file = file_name,
            bytes = size
        );
        Ok(())
    }

    /// Remove an object
    pub fn delete(&mut self, file_name: &str) -> Result<()> {
        if self.files.remove(file_name).is_none() {
            let err = Error::NotFound(format!(
                "'{}' not found in bucket '{}'",
                file_name,
                self.name()
            ));
            log_rejected_operation!(Self::KIND, "delete", self.name(), err);
            return Err(err);
        }

        log_resource_operation!(Self::KIND, "delete", self.id(), self.name(), file = file_name);
        Ok(())
    }

    /// Names of all stored objects, sorted
    pub fn list_files(&self) -> Vec<String> {
        let mut names: Vec<String> = self.files.keys().cloned().collect();
        names.sort();
        names
    }

    /// Content of an object, or `None` if absent
    pub fn get_file_content(&self, file_name: &str) -> Option<&str> {
        self.files.get(file_name).map(|f| f.content.as_str())
    }

    pub fn file(&self, file_name: &str) -> Option<&StoredFile> {
        self.files.get(file_name)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn to_info(&self) -> BucketInfo {
        let meta = self.describe();
        BucketInfo {
            id: meta.id,
            name: meta.name,
            created_at: meta.created_at,
            region: self.region.clone(),
            files: self.files.len(),
        }
    }
}

impl CloudResource for Bucket {
    const KIND: &'static str = "Bucket";

    fn identity(&self) -> &ResourceIdentity {
        &self.identity
    }

    // Buckets are never retired; only their objects are removed
    fn is_terminal(&self) -> bool {
        false
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<{}, {}>", Self::KIND, self.name(), self.id())
    }
}
