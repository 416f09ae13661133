//! Compute simulator tests
//! Instance lifecycle through the manager's handles

mod common;

use cloudsim_core::{CloudResource, ComputeManager, Error, Lifecycle};
use cloudsim_common::InstanceState;
use common::names;

#[test]
fn test_web_and_db_scenario() {
    let manager = ComputeManager::new();
    let web = manager.create_instance("web-server");
    let db = manager.create_instance_with_type("db-server", "t2.large");

    web.write().start().unwrap();

    let listing = manager.list_instances();
    assert_eq!(names(&listing), vec!["web-server", "db-server"]);
    assert_eq!(listing[0].id, web.read().id());

    let infos = manager.instance_infos();
    assert_eq!(infos[0].state, InstanceState::Running);
    assert_eq!(infos[1].state, InstanceState::Stopped);
    assert_eq!(infos[1].instance_type, "t2.large");

    let err = db.write().stop().unwrap_err();
    assert!(matches!(err, Error::InvalidStateTransition(_)));
    assert_eq!(db.read().state(), InstanceState::Stopped);
}

#[test]
fn test_start_twice_fails() {
    let manager = ComputeManager::new();
    let web = manager.create_instance("web-server");

    web.write().start().unwrap();
    assert!(matches!(
        web.write().start(),
        Err(Error::InvalidStateTransition(_))
    ));
}

#[test]
fn test_terminated_instance_leaves_listing() {
    let manager = ComputeManager::new();
    let web = manager.create_instance("web-server");
    web.write().start().unwrap();

    web.write().terminate();
    assert!(manager.list_instances().is_empty());
    assert_eq!(manager.total_instances(), 1);

    // Still not found even though a terminated instance carries the name
    assert!(matches!(
        manager.find_instance("web-server"),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_ids_are_unique_for_duplicate_names() {
    let manager = ComputeManager::new();
    let a = manager.create_instance("worker");
    let b = manager.create_instance("worker");

    assert_ne!(a.read().id(), b.read().id());
    assert_eq!(manager.list_instances().len(), 2);

    let found = manager.find_instance("worker").unwrap();
    assert_eq!(found.read().id(), a.read().id());
}

#[test]
fn test_resize_while_stopped_only() {
    let manager = ComputeManager::new();
    let web = manager.create_instance("web-server");

    web.write().set_instance_type("t3.medium").unwrap();
    web.write().start().unwrap();
    assert!(matches!(
        web.write().set_instance_type("t3.large"),
        Err(Error::InvalidOperation(_))
    ));

    web.write().stop().unwrap();
    web.write().set_instance_type("t3.large").unwrap();
    assert_eq!(web.read().instance_type(), "t3.large");
}

#[test]
fn test_describe_format() {
    let manager = ComputeManager::new();
    let web = manager.create_instance("web-server");

    let meta = web.read().describe();
    assert_eq!(meta.name, "web-server");
    assert!(chrono::NaiveDateTime::parse_from_str(&meta.created_at, "%Y-%m-%d %H:%M:%S").is_ok());
}
