///! Scenario run command

use crate::output::{self, truncate, OutputFormat};
use anyhow::{bail, Result};
use cloudsim_common::{BucketInfo, InstanceInfo, PodInfo};
use cloudsim_core::scenario::{RunReport, StepOutcome};
use cloudsim_core::{Scenario, SimConfig, Simulator};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

#[derive(Tabled, Serialize)]
struct InstanceRow {
    id: String,
    name: String,
    #[tabled(rename = "type")]
    instance_type: String,
    state: String,
    created: String,
}

impl From<InstanceInfo> for InstanceRow {
    fn from(i: InstanceInfo) -> Self {
        Self {
            id: i.id,
            name: truncate(&i.name, 30),
            instance_type: i.instance_type,
            state: i.state.to_string(),
            created: i.created_at,
        }
    }
}

#[derive(Tabled, Serialize)]
struct BucketRow {
    id: String,
    name: String,
    region: String,
    files: usize,
    created: String,
}

impl From<BucketInfo> for BucketRow {
    fn from(b: BucketInfo) -> Self {
        Self {
            id: b.id,
            name: truncate(&b.name, 30),
            region: b.region,
            files: b.files,
            created: b.created_at,
        }
    }
}

#[derive(Tabled, Serialize)]
struct PodRow {
    id: String,
    name: String,
    namespace: String,
    status: String,
    containers: String,
}

impl From<PodInfo> for PodRow {
    fn from(p: PodInfo) -> Self {
        Self {
            id: p.id,
            name: truncate(&p.name, 30),
            namespace: p.namespace,
            status: p.status.to_string(),
            containers: truncate(&p.containers.join(","), 40),
        }
    }
}

#[derive(Serialize)]
struct StepRecord {
    index: usize,
    step: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<&StepOutcome> for StepRecord {
    fn from(o: &StepOutcome) -> Self {
        Self {
            index: o.index,
            step: o.step.clone(),
            ok: o.is_ok(),
            error: o.error.as_ref().map(|e| e.to_string()),
        }
    }
}

/// Everything a run produced, for structured output
#[derive(Serialize)]
struct RunSummary {
    steps: Vec<StepRecord>,
    aborted: bool,
    instances: Vec<InstanceInfo>,
    buckets: Vec<BucketInfo>,
    pods: Vec<PodInfo>,
}

pub fn handle_run_command(
    file: &Path,
    continue_on_error: bool,
    config: &SimConfig,
    output_format: OutputFormat,
) -> Result<()> {
    let mut scenario = Scenario::load(file)?;
    scenario.continue_on_error |= continue_on_error;
    tracing::info!(
        file = %file.display(),
        steps = scenario.steps.len(),
        continue_on_error = scenario.continue_on_error,
        "Running scenario"
    );

    let simulator = Simulator::from_config(config);
    let report = simulator.run(&scenario);

    match output_format {
        OutputFormat::Table => print_tables(&report, &simulator),
        OutputFormat::Json | OutputFormat::Yaml => {
            let summary = RunSummary {
                steps: report.outcomes.iter().map(StepRecord::from).collect(),
                aborted: report.aborted,
                instances: simulator.compute.instance_infos(),
                buckets: simulator.storage.bucket_infos(),
                pods: simulator.orchestration.pod_infos(),
            };
            output::print_single(&summary, output_format)?;
        }
    }

    if report.failed() > 0 {
        bail!(
            "{} of {} step(s) failed",
            report.failed(),
            report.outcomes.len()
        );
    }

    Ok(())
}

fn print_tables(report: &RunReport, simulator: &Simulator) {
    for outcome in &report.outcomes {
        match &outcome.error {
            None => output::print_success(&format!("[{}] {}", outcome.index, outcome.step)),
            Some(err) => {
                output::print_error(&format!("[{}] {}: {}", outcome.index, outcome.step, err))
            }
        }
    }
    if report.aborted {
        output::print_warning("Scenario aborted; remaining steps were skipped");
    }
    println!();

    let instances: Vec<InstanceRow> = simulator
        .compute
        .instance_infos()
        .into_iter()
        .map(InstanceRow::from)
        .collect();
    output::print_table("Instances", instances);

    let buckets: Vec<BucketRow> = simulator
        .storage
        .bucket_infos()
        .into_iter()
        .map(BucketRow::from)
        .collect();
    output::print_table("Buckets", buckets);

    let pods: Vec<PodRow> = simulator
        .orchestration
        .pod_infos()
        .into_iter()
        .map(PodRow::from)
        .collect();
    output::print_table("Pods", pods);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudsim_common::{Error, PodStatus};
    use std::path::PathBuf;

    fn demo(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../demos")
            .join(name)
    }

    #[test]
    fn test_run_demo_scenarios() {
        let config = SimConfig::default();
        for name in ["compute.yaml", "storage.toml", "orchestration.yaml"] {
            handle_run_command(&demo(name), false, &config, OutputFormat::Json)
                .unwrap_or_else(|e| panic!("{} failed: {}", name, e));
        }
    }

    #[test]
    fn test_run_missing_file() {
        let config = SimConfig::default();
        let result =
            handle_run_command(&demo("missing.yaml"), false, &config, OutputFormat::Table);
        assert!(result.is_err());
    }

    #[test]
    fn test_pod_row_joins_containers() {
        let row = PodRow::from(PodInfo {
            id: "id-1".to_string(),
            name: "nginx-pod".to_string(),
            created_at: "2024-01-01 00:00:00".to_string(),
            namespace: "default".to_string(),
            status: PodStatus::Running,
            containers: vec!["nginx".to_string(), "sidecar".to_string()],
        });

        assert_eq!(row.containers, "nginx,sidecar");
        assert_eq!(row.status, "Running");
    }

    #[test]
    fn test_step_record_from_failure() {
        let outcome = StepOutcome {
            index: 3,
            step: "stop_instance db-server".to_string(),
            error: Some(Error::InvalidStateTransition(
                "db-server is already stopped".to_string(),
            )),
        };

        let record = StepRecord::from(&outcome);
        assert!(!record.ok);
        assert_eq!(
            record.error.as_deref(),
            Some("Invalid state transition: db-server is already stopped")
        );
    }
}
