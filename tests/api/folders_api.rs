use crate::helpers::{AUTH_HEADER, Descriptors, MEDIA_TYPE, TestVmrest};
use serde_json::json;
use std::time::Duration;
use vmrest_control::prelude::Error;
use vmrest_control::services::folders::{self, FolderTask};
use vmrest_control::vmrest::request::FolderParams;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn task(action: &str, name: Option<&str>, path: Option<&str>, access: Option<&str>) -> FolderTask {
    FolderTask {
        target_vm: Some("42".to_owned()),
        target_vm_name: String::new(),
        action: action.to_owned(),
        params: FolderParams {
            folder_name: name.map(str::to_owned),
            folder_path: path.map(str::to_owned),
            access: access.map(str::to_owned),
        },
    }
}

fn listing() -> serde_json::Value {
    json!({"Count": 1, "value": [
        {"flags": 4, "folder_id": "ODBG110", "host_path": "C:\\Users\\qsypoq\\Desktop\\odbg110"}
    ]})
}

#[tokio::test]
async fn infos_returns_folders() {
    // Arrange
    let vmrest = TestVmrest::new().await;
    Mock::given(method("GET"))
        .and(path("/api/vms/42/sharedfolders"))
        .and(header("Authorization", AUTH_HEADER))
        .and(header("Accept", MEDIA_TYPE))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .expect(1)
        .mount(&vmrest.server)
        .await;

    // Act
    let result = folders::run(&vmrest.client, task("infos", None, None, None)).await;

    // Assert
    let record = result.unwrap();
    assert!(!record.changed);
    assert_eq!(record.msg, listing());
}

#[tokio::test]
async fn create_posts_folder_and_reports_unchanged() {
    // Arrange
    let vmrest = TestVmrest::new().await;
    Mock::given(method("POST"))
        .and(path("/api/vms/42/sharedfolders"))
        .and(header("Content-Type", MEDIA_TYPE))
        .and(body_json(json!({
            "folder_id": "ODBG110",
            "host_path": "C:\\Users\\qsypoq\\Desktop\\odbg110",
            "flags": 4
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .expect(1)
        .mount(&vmrest.server)
        .await;

    // Act
    let result = folders::run(
        &vmrest.client,
        task(
            "create",
            Some("ODBG110"),
            Some(r"C:\Users\qsypoq\Desktop\odbg110"),
            Some("rw"),
        ),
    )
    .await;

    // Assert
    let record = result.unwrap();
    // vmrest answered with the new folder, yet nothing is reported as changed.
    assert!(!record.changed);
    assert_eq!(record.msg["value"][0]["flags"], json!(4));
}

#[tokio::test]
async fn update_defaults_to_read_only() {
    // Arrange
    let vmrest = TestVmrest::new().await;
    Mock::given(method("PUT"))
        .and(path("/api/vms/42/sharedfolders/ODBG110"))
        .and(body_json(json!({"host_path": "C:\\Users\\qsypoq\\Desktop", "flags": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .expect(1)
        .mount(&vmrest.server)
        .await;

    // Act
    let result = folders::run(
        &vmrest.client,
        task("update", Some("ODBG110"), Some(r"C:\Users\qsypoq\Desktop"), None),
    )
    .await;

    // Assert
    assert!(result.is_ok());
}

#[tokio::test]
async fn delete_sends_vm_id_and_returns_empty_message() {
    // Arrange
    let vmrest = TestVmrest::new().await;
    Mock::given(method("DELETE"))
        .and(path("/api/vms/42/sharedfolders/ODBG110"))
        .and(body_json(json!({"id": "42"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&vmrest.server)
        .await;

    // Act
    let result = folders::run(&vmrest.client, task("delete", Some("ODBG110"), None, None)).await;

    // Assert
    let record = result.unwrap();
    assert!(!record.changed);
    assert_eq!(record.msg, json!(""));
}

#[tokio::test]
async fn remote_error_is_relayed() {
    // Arrange
    let vmrest = TestVmrest::new().await;
    let error_json = json!({"Code": 120, "Message": "The shared folder was not found"});
    Mock::given(method("DELETE"))
        .and(path("/api/vms/42/sharedfolders/MISSING"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_json.clone()))
        .mount(&vmrest.server)
        .await;

    // Act
    let result = folders::run(&vmrest.client, task("delete", Some("MISSING"), None, None)).await;

    // Assert
    assert_eq!(result.unwrap().msg, error_json);
}

#[tokio::test]
async fn unsupported_action_sends_nothing() {
    // Arrange
    let vmrest = TestVmrest::new().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&vmrest.server)
        .await;

    // Act
    let mut unsupported = task("rename", Some("ODBG110"), None, None);
    unsupported.target_vm_name = "odbg110".to_owned();
    let result = folders::run(&vmrest.client, unsupported).await;

    // Assert
    assert!(matches!(result, Err(Error::NotSupported(_))));
}

#[tokio::test]
async fn display_name_selects_the_vm() {
    // Arrange
    let vmrest = TestVmrest::new().await;
    let descriptors = Descriptors::new();
    vmrest
        .mount_vm_list(&[
            ("7", descriptors.write("win10", "Win10")),
            ("42", descriptors.write("odbg", "odbg110")),
        ])
        .await;
    Mock::given(method("GET"))
        .and(path("/api/vms/42/sharedfolders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .expect(1)
        .mount(&vmrest.server)
        .await;

    // Act
    let mut by_name = task("infos", None, None, None);
    by_name.target_vm = None;
    by_name.target_vm_name = "OdBg110".to_owned();
    let result = folders::run(&vmrest.client, by_name).await;

    // Assert
    assert_eq!(result.unwrap().msg, listing());
}

#[tokio::test]
async fn stalled_infos_fails_with_communication_error() {
    // Arrange
    let vmrest = TestVmrest::new()
        .await
        .with_default_timeout(Duration::from_millis(100));
    Mock::given(method("GET"))
        .and(path("/api/vms/42/sharedfolders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(listing())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&vmrest.server)
        .await;

    // Act
    let result = folders::run(&vmrest.client, task("infos", None, None, None)).await;

    // Assert
    assert!(matches!(result, Err(Error::Communication(_))));
}

#[tokio::test]
async fn backslash_folder_name_is_sent_as_one_segment() {
    // Arrange
    let vmrest = TestVmrest::new().await;
    Mock::given(method("DELETE"))
        .and(path("/api/vms/42/sharedfolders/odbg%5C110"))
        .and(body_json(json!({"id": "42"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&vmrest.server)
        .await;

    // Act
    let result = folders::run(&vmrest.client, task("delete", Some(r"odbg\110"), None, None)).await;

    // Assert
    assert_eq!(result.unwrap().msg, json!(""));
}
