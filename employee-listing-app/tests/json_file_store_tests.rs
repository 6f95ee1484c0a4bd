#![cfg(feature = "json-file-store")]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `JsonFileEmployeeStore`.

use std::sync::Arc;

use chrono::NaiveDate;
use employee_listing_app::adapters::JsonFileEmployeeStore;
use employee_listing_app::ListingAppBuilder;
use employee_listing_core::error::CoreError;
use employee_listing_core::traits::EmployeeStore;
use employee_listing_core::types::{Department, EmployeeFields, EmployeeId};

async fn create_test_store() -> (JsonFileEmployeeStore, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("data").join("employees.json");
    let store = JsonFileEmployeeStore::new(&path)
        .await
        .expect("failed to create JsonFileEmployeeStore");
    (store, tmp)
}

fn fields(name: &str) -> EmployeeFields {
    EmployeeFields {
        name: name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1992, 11, 30),
        department: Some(Department::Sales),
        experience_years: 5,
    }
}

#[tokio::test]
async fn missing_file_is_an_empty_store() {
    let (store, _tmp) = create_test_store().await;
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_update_delete_round_trip_through_file() {
    let (store, _tmp) = create_test_store().await;

    let first = store.create(&fields("Gil")).await.unwrap();
    let second = store.create(&fields("Hana")).await.unwrap();
    assert_eq!((first, second), (EmployeeId(1), EmployeeId(2)));

    store.update(first, &fields("Gilbert")).await.unwrap();
    store.delete(second).await.unwrap();

    let rows = store.list_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name.as_deref(), Some("Gilbert"));
    assert_eq!(rows[0].department.as_deref(), Some("Sales"));

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"Name1\": \"Gilbert\""));
    assert!(raw.contains("1992-11-30T00:00:00Z"));
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let (store, _tmp) = create_test_store().await;
    assert!(matches!(
        store.delete(EmployeeId(3)).await,
        Err(CoreError::RecordNotFound(_))
    ));
}

#[tokio::test]
async fn rows_with_odd_values_still_mount() {
    let (store, _tmp) = create_test_store().await;
    std::fs::write(
        store.path(),
        r#"[
            { "Id": 1, "Name1": "Ann", "DOB": "1990-01-01T00:00:00Z", "Experience": 2 },
            { "Id": 2, "Name1": "Ben", "DOB": "not a date", "Experience": 4.5 }
        ]"#,
    )
    .unwrap();

    let app = ListingAppBuilder::new()
        .store(Arc::new(store))
        .build()
        .unwrap();
    let controller = app.mount().await;

    assert_eq!(controller.last_error(), None);
    let rows = controller.view().rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date_of_birth, "01/01/1990");
    assert_eq!(rows[1].date_of_birth, "");
    assert_eq!(rows[1].experience_years, 4);
}

#[tokio::test]
async fn corrupt_file_fails_the_mount_load() {
    let (store, _tmp) = create_test_store().await;
    std::fs::write(store.path(), "{ not json").unwrap();

    let app = ListingAppBuilder::new()
        .store(Arc::new(store))
        .build()
        .unwrap();
    let controller = app.mount().await;

    assert!(controller.all_records().is_empty());
    assert!(controller.last_error().unwrap().contains("Invalid store file"));
}
