//! Directory view behaviour through the service: load, search, paging and
//! the status toggle.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use common::{Harness, RepoFaults};
use employees_info::contract::model::{EmployeeStatus, EmptyReason};
use employees_info::domain::error::DomainError;
use employees_info::domain::provisioning::ProvisioningOptions;
use employees_info::domain::service::ServiceConfig;

#[tokio::test]
async fn five_employees_page_four_then_one() {
    let h = Harness::loaded().await;

    let first = h.service.page();
    assert_eq!(first.directory_size, 5);
    assert_eq!(first.rows.len(), 4);
    assert_eq!(first.total_pages, 2);
    assert!(first.shows_pagination());

    let second = h.service.next_page();
    assert_eq!(second.current_page, 2);
    assert_eq!(second.rows.len(), 1);
    assert_eq!(second.rows[0].name, "Robert Taylor");

    // Clamped at the last page.
    assert_eq!(h.service.next_page().current_page, 2);
    assert_eq!(h.service.go_to_page(1).rows.len(), 4);
}

#[tokio::test]
async fn search_filters_and_resets_page() {
    let h = Harness::loaded().await;
    h.service.go_to_page(2);

    let view = h.service.set_search_query("market");
    assert_eq!(view.current_page, 1);
    assert_eq!(view.filtered_count, 1);
    assert_eq!(view.rows[0].department, "Marketing");
    assert!(!view.shows_pagination());

    let none = h.service.set_search_query("zzz");
    assert!(none.rows.is_empty());
    assert_eq!(none.display_total_pages(), 1);
    assert_eq!(none.empty_reason(), Some(EmptyReason::NoMatches));

    let all = h.service.set_search_query("");
    assert_eq!(all.filtered_count, 5);
}

#[tokio::test]
async fn failed_load_empties_directory_and_notifies() {
    let h = Harness::loaded().await;
    assert_eq!(h.service.employees().len(), 5);

    h.repo.faults.lock().list = Some("JWT expired".into());
    let err = h.service.load().await.unwrap_err();

    assert!(matches!(err, DomainError::Fetch { ref message } if message == "JWT expired"));
    assert!(err.is_retryable());
    assert!(h.service.employees().is_empty());
    assert!(!h.service.is_loading());
    assert_eq!(
        h.service.page().empty_reason(),
        Some(EmptyReason::NoEmployees)
    );

    let n = h.notifier.last().unwrap();
    assert!(n.is_destructive());
    assert_eq!(n.title, "Error fetching employees");
    assert_eq!(n.description.as_deref(), Some("JWT expired"));
}

#[tokio::test]
async fn loading_flag_is_raised_while_fetch_is_outstanding() {
    let gate = Arc::new(Notify::new());
    let h = Harness::with_faults(
        ProvisioningOptions::default(),
        ServiceConfig::default(),
        RepoFaults {
            list_gate: Some(gate.clone()),
            ..Default::default()
        },
    );
    assert!(!h.service.is_loading());

    let service = h.service.clone();
    let load = tokio::spawn(async move { service.load().await });
    while !h.journal.entries().contains(&"repo:list".to_string()) {
        tokio::task::yield_now().await;
    }
    assert!(h.service.is_loading());

    gate.notify_one();
    assert_eq!(load.await.unwrap().unwrap(), 5);
    assert!(!h.service.is_loading());
}

#[tokio::test]
async fn cancelled_load_clears_loading_flag() {
    let gate = Arc::new(Notify::new());
    let h = Harness::with_faults(
        ProvisioningOptions::default(),
        ServiceConfig::default(),
        RepoFaults {
            list_gate: Some(gate),
            ..Default::default()
        },
    );

    let service = h.service.clone();
    let load = tokio::spawn(async move { service.load().await });
    while !h.service.is_loading() {
        tokio::task::yield_now().await;
    }
    load.abort();
    assert!(load.await.unwrap_err().is_cancelled());
    assert!(!h.service.is_loading());
}

#[tokio::test]
async fn reload_clamps_a_page_that_no_longer_exists() {
    let h = Harness::loaded().await;
    assert_eq!(h.service.go_to_page(2).current_page, 2);

    h.repo.faults.lock().list = Some("offline".into());
    let _ = h.service.load().await;
    assert_eq!(h.service.page().current_page, 1);
}

#[tokio::test]
async fn toggle_active_employee_becomes_inactive() {
    let h = Harness::loaded().await;

    let updated = h.service.toggle_status("1").await.unwrap();
    assert_eq!(updated.status, EmployeeStatus::Inactive);
    assert_eq!(h.journal.entries(), vec!["repo:update:1:inactive"]);

    let stored = h.service.employees();
    assert_eq!(stored[0].status, EmployeeStatus::Inactive);

    let n = h.notifier.last().unwrap();
    assert!(!n.is_destructive());
    assert_eq!(n.title, "Employee Inactivated");
    assert_eq!(n.description.as_deref(), Some("John Smith is now inactive."));

    // And back.
    h.service.toggle_status("1").await.unwrap();
    assert_eq!(h.service.employees()[0].status, EmployeeStatus::Active);
    assert_eq!(h.notifier.last().unwrap().title, "Employee Activated");
}

#[tokio::test]
async fn failed_update_leaves_status_unchanged() {
    let h = Harness::loaded().await;
    h.repo.faults.lock().update = Some("permission denied for table employees".into());

    let err = h.service.toggle_status("2").await.unwrap_err();
    assert!(matches!(err, DomainError::Update { .. }));

    let sarah = h
        .service
        .employees()
        .into_iter()
        .find(|e| e.id == "2")
        .unwrap();
    assert_eq!(sarah.status, EmployeeStatus::Active);
    assert!(!h.service.is_busy("2"));

    let n = h.notifier.last().unwrap();
    assert!(n.is_destructive());
    assert_eq!(n.title, "Status Update Failed");
    assert_eq!(
        n.description.as_deref(),
        Some("permission denied for table employees")
    );
}

#[tokio::test]
async fn on_leave_employee_cannot_be_toggled() {
    let h = Harness::loaded().await;

    let err = h.service.toggle_status("4").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::UnsupportedTransition {
            status: EmployeeStatus::OnLeave
        }
    ));
    assert!(h.journal.entries().is_empty(), "no remote call expected");
}

#[tokio::test]
async fn unknown_employee_is_not_found() {
    let h = Harness::loaded().await;
    let err = h.service.toggle_status("nope").await.unwrap_err();
    assert!(matches!(err, DomainError::EmployeeNotFound { .. }));
    assert!(h.journal.entries().is_empty());
}

#[tokio::test]
async fn second_toggle_while_in_flight_is_rejected() {
    let gate = Arc::new(Notify::new());
    let h = Harness::with_faults(
        ProvisioningOptions::default(),
        ServiceConfig::default(),
        RepoFaults {
            update_gate: Some(gate.clone()),
            ..Default::default()
        },
    );
    h.service.load().await.unwrap();

    let service = h.service.clone();
    let first = tokio::spawn(async move { service.toggle_status("3").await });

    while !h.service.is_busy("3") {
        tokio::task::yield_now().await;
    }
    let err = h.service.toggle_status("3").await.unwrap_err();
    assert!(matches!(err, DomainError::Busy { .. }));

    assert!(!h.service.is_busy("5"));

    gate.notify_one();
    let updated = first.await.unwrap().unwrap();
    assert_eq!(updated.status, EmployeeStatus::Inactive);
    assert!(!h.service.is_busy("3"));
}

#[tokio::test(start_paused = true)]
async fn slow_update_times_out_without_local_change() {
    let h = Harness::with_faults(
        ProvisioningOptions::default(),
        ServiceConfig {
            request_timeout: Duration::from_millis(200),
            ..Default::default()
        },
        RepoFaults {
            update_delay: Some(Duration::from_secs(60)),
            ..Default::default()
        },
    );
    h.service.load().await.unwrap();

    let err = h.service.toggle_status("1").await.unwrap_err();
    assert!(matches!(err, DomainError::Timeout { .. }));
    assert!(err.is_retryable());
    assert_eq!(h.service.employees()[0].status, EmployeeStatus::Active);
    assert!(!h.service.is_busy("1"));
    assert_eq!(h.notifier.last().unwrap().title, "Request timed out");
}
