///! Simulator usage text

use crate::ResourceKind;
use cloudsim_core::{ComputeManager, PodCluster, StorageManager};

pub fn usage_text(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Compute => ComputeManager::usage(),
        ResourceKind::Storage => StorageManager::usage(),
        ResourceKind::Orchestration => PodCluster::usage(),
    }
}

pub fn handle_usage_command(kind: Option<ResourceKind>) {
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => vec![
            ResourceKind::Compute,
            ResourceKind::Storage,
            ResourceKind::Orchestration,
        ],
    };

    for kind in kinds {
        println!("{:<14} {}", format!("{:?}:", kind).to_lowercase(), usage_text(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_text_mentions_entry_points() {
        assert!(usage_text(ResourceKind::Compute).contains("create_instance"));
        assert!(usage_text(ResourceKind::Storage).contains("upload"));
        assert!(usage_text(ResourceKind::Orchestration).contains("delete_pod"));
    }
}
