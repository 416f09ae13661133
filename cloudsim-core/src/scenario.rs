//! Declarative scenario runner
//!
//! A scenario is an ordered list of steps applied to one [`Simulator`], which
//! owns a manager for every resource kind. Scenarios are read from YAML, TOML
//! or JSON files. Execution stops at the first failing step unless
//! `continue_on_error` is set.

use crate::compute::ComputeManager;
use crate::config::SimConfig;
use crate::orchestration::PodCluster;
use crate::resource::Lifecycle;
use crate::storage::StorageManager;
use cloudsim_common::{BucketSpec, Error, InstanceSpec, PodSpec, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One manager per resource kind
#[derive(Default)]
pub struct Simulator {
    pub compute: ComputeManager,
    pub storage: StorageManager,
    pub orchestration: PodCluster,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            compute: ComputeManager::with_config(config.compute.clone()),
            storage: StorageManager::with_config(config.storage.clone()),
            orchestration: PodCluster::with_config(config.orchestration.clone()),
        }
    }

    /// Apply a single step
    pub fn apply(&self, step: &Step) -> Result<()> {
        match step {
            Step::CreateInstance(spec) => {
                self.compute.create_instance_from_spec(spec);
            }
            Step::StartInstance { name } => self.compute.find_instance(name)?.write().start()?,
            Step::StopInstance { name } => self.compute.find_instance(name)?.write().stop()?,
            Step::TerminateInstance { name } => self.compute.terminate_instance(name)?,
            Step::SetInstanceType { name, instance_type } => self
                .compute
                .find_instance(name)?
                .write()
                .set_instance_type(instance_type.as_str())?,
            Step::CreateBucket(spec) => {
                self.storage.create_bucket_from_spec(spec);
            }
            Step::Upload { bucket, file, content } => self
                .storage
                .find_bucket(bucket)?
                .write()
                .upload(file, content.as_str())?,
            Step::DeleteFile { bucket, file } => {
                self.storage.find_bucket(bucket)?.write().delete(file)?
            }
            Step::CreatePod(spec) => {
                self.orchestration.create_pod_from_spec(spec);
            }
            Step::StartPod { name } => self.orchestration.find_pod(name)?.write().start()?,
            Step::StopPod { name } => self.orchestration.find_pod(name)?.write().stop()?,
            Step::DeletePod { name } => self.orchestration.delete_pod(name)?,
            Step::AddContainer { pod, container } => self
                .orchestration
                .find_pod(pod)?
                .write()
                .add_container(container)?,
        }
        Ok(())
    }

    /// Run every step of a scenario and report the outcome of each
    pub fn run(&self, scenario: &Scenario) -> RunReport {
        let mut report = RunReport::default();

        for (index, step) in scenario.steps.iter().enumerate() {
            let result = self.apply(step);
            let failed = result.is_err();

            if let Err(ref err) = result {
                tracing::warn!(step = index, kind = err.kind(), "Scenario step failed: {}", err);
            }

            report.outcomes.push(StepOutcome {
                index,
                step: step.to_string(),
                error: result.err(),
            });

            if failed && !scenario.continue_on_error {
                report.aborted = index + 1 < scenario.steps.len();
                break;
            }
        }

        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            aborted = report.aborted,
            "Scenario finished"
        );
        report
    }
}

/// A declarative operation against one of the managers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    CreateInstance(InstanceSpec),
    StartInstance { name: String },
    StopInstance { name: String },
    TerminateInstance { name: String },
    SetInstanceType { name: String, instance_type: String },
    CreateBucket(BucketSpec),
    Upload { bucket: String, file: String, content: String },
    DeleteFile { bucket: String, file: String },
    CreatePod(PodSpec),
    StartPod { name: String },
    StopPod { name: String },
    DeletePod { name: String },
    AddContainer { pod: String, container: String },
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::CreateInstance(spec) => write!(f, "create_instance {}", spec.name),
            Step::StartInstance { name } => write!(f, "start_instance {}", name),
            Step::StopInstance { name } => write!(f, "stop_instance {}", name),
            Step::TerminateInstance { name } => write!(f, "terminate_instance {}", name),
            Step::SetInstanceType { name, instance_type } => {
                write!(f, "set_instance_type {} {}", name, instance_type)
            }
            Step::CreateBucket(spec) => write!(f, "create_bucket {}", spec.name),
            Step::Upload { bucket, file, .. } => write!(f, "upload {}/{}", bucket, file),
            Step::DeleteFile { bucket, file } => write!(f, "delete_file {}/{}", bucket, file),
            Step::CreatePod(spec) => write!(f, "create_pod {}", spec.name),
            Step::StartPod { name } => write!(f, "start_pod {}", name),
            Step::StopPod { name } => write!(f, "stop_pod {}", name),
            Step::DeletePod { name } => write!(f, "delete_pod {}", name),
            Step::AddContainer { pod, container } => {
                write!(f, "add_container {} {}", pod, container)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub continue_on_error: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Steps are written as single-key maps (`- start_pod: { name: x }`), not `!tag`s
    pub fn from_yaml_str(s: &str) -> std::result::Result<Self, ScenarioError> {
        let deserializer = serde_yaml::Deserializer::from_str(s);
        serde_yaml::with::singleton_map_recursive::deserialize(deserializer)
            .map_err(|e| ScenarioError::Parse(e.to_string()))
    }

    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ScenarioError> {
        toml::from_str(s).map_err(|e| ScenarioError::Parse(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> std::result::Result<Self, ScenarioError> {
        serde_json::from_str(s).map_err(|e| ScenarioError::Parse(e.to_string()))
    }

    /// Load a scenario file, choosing the format by extension
    pub fn load(path: &Path) -> std::result::Result<Self, ScenarioError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let parse: fn(&str) -> std::result::Result<Self, ScenarioError> = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str,
            "toml" => Self::from_toml_str,
            "json" => Self::from_json_str,
            _ => return Err(ScenarioError::UnsupportedFormat(path.to_path_buf())),
        };

        let content = std::fs::read_to_string(path)
            .map_err(|e| ScenarioError::Io(path.to_path_buf(), e.to_string()))?;
        parse(&content)
    }
}

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub index: usize,
    pub step: String,
    pub error: Option<Error>,
}

impl StepOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<StepOutcome>,
    /// Steps were left unexecuted after a failure
    pub aborted: bool,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn first_error(&self) -> Option<&Error> {
        self.outcomes.iter().find_map(|o| o.error.as_ref())
    }
}

/// Scenario loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario {0:?}: {1}")]
    Io(PathBuf, String),

    #[error("Failed to parse scenario: {0}")]
    Parse(String),

    #[error("Unsupported scenario format: {0:?} (expected .yaml, .yml, .toml or .json)")]
    UnsupportedFormat(PathBuf),
}
