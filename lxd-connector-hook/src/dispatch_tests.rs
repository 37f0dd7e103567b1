use super::test_mocks::*;
use super::*;

use lxd_connector_core::traits::{HostRepository, NatRuleRepository};
use lxd_connector_core::types::HostStatus;
use serde_json::json;

#[test]
fn exit_status_follows_result() {
    let ok = EventOutcome {
        body: json!({"status": "success"}),
        success: true,
    };
    let failed = EventOutcome {
        body: json!({"status": "error"}),
        success: false,
    };
    assert_eq!(ok.exit_status(), 0);
    assert_eq!(failed.exit_status(), 1);
    assert_eq!(EXIT_BOOTSTRAP_FAILURE, 2);
}

#[test]
fn read_params_accepts_panel_bundle() {
    let raw = r#"{"domain":"c1","server_ip":"10.0.0.1","port":"8080","accesshash":"k","hostid":7}"#;
    let params = read_params(raw.as_bytes()).unwrap();
    assert_eq!(params.domain, "c1");
    assert_eq!(params.port, 8080);
    assert_eq!(params.host_id, "7");
}

#[test]
fn read_params_rejects_garbage() {
    let err = read_params("not json".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("Invalid parameter bundle"));
}

#[test]
fn only_meta_skips_the_bundle() {
    assert!(!needs_params(&Event::Meta));
    assert!(needs_params(&Event::TestLink));
    assert!(needs_params(&Event::NatAdd));
}

#[tokio::test]
async fn meta_returns_profile() {
    let t = build_state().await;

    let outcome = dispatch(&t.state, &Event::Meta, &bundle(json!({})))
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.body["id"], "lxdserver");
    assert_eq!(outcome.body["displayName"], "魔方财务-LXD对接插件");
    assert_eq!(outcome.body["apiVersion"], "1.0.0");
    assert_eq!(
        outcome.body["helpDoc"],
        "https://github.com/xkatld/zjmf-lxd-server"
    );
    assert!(t.client.paths().is_empty());
}

#[tokio::test]
async fn create_registers_host_and_succeeds() {
    let t = build_state().await;
    t.client.push(200, Some("ok"), None);

    let outcome = dispatch(&t.state, &Event::Create, &bundle(json!({})))
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.exit_status(), 0);
    assert_eq!(outcome.body, json!({"status": "success", "msg": "ok"}));
    assert_eq!(t.client.paths(), vec!["/api/create"]);

    let record = t.store.find_by_id("42").await.unwrap().unwrap();
    assert_eq!(record.domain_status, HostStatus::Active);
}

#[tokio::test]
async fn rejected_result_exits_with_error() {
    let t = build_state().await;
    t.client.push(500, Some("容器不存在"), None);

    let outcome = dispatch(&t.state, &Event::Reboot, &bundle(json!({})))
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.exit_status(), 1);
    assert_eq!(outcome.body["status"], "error");
    assert_eq!(outcome.body["msg"], "容器不存在");
    assert_eq!(outcome.body["errorKind"], "rejected");
}

#[tokio::test]
async fn transport_failure_is_reported_as_transport() {
    let t = build_state().await;

    let outcome = dispatch(&t.state, &Event::On, &bundle(json!({})))
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.body["errorKind"], "transport");
    assert_eq!(outcome.body["msg"], "开机失败");
}

#[tokio::test]
async fn test_link_success_flag_follows_server_status() {
    let t = build_state().await;
    t.client.push(200, Some("ok"), None);

    let outcome = dispatch(&t.state, &Event::TestLink, &bundle(json!({})))
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.body["serverStatus"], 1);
    assert_eq!(t.client.paths(), vec!["/api/check"]);

    t.client.push(401, Some("unauthorized"), None);
    let outcome = dispatch(&t.state, &Event::TestLink, &bundle(json!({})))
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.exit_status(), 1);
    assert_eq!(outcome.body["serverStatus"], 0);
}

#[tokio::test]
async fn registration_failure_stops_before_remote_call() {
    let t = build_state_with_read_only_hosts().await;
    t.client.push(200, Some("ok"), None);

    let outcome = dispatch(&t.state, &Event::Create, &bundle(json!({})))
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.body["errorKind"], "storage");
    assert_eq!(outcome.body["msg"], "创建失败");
    assert!(outcome.body["detail"]
        .as_str()
        .unwrap()
        .contains("database is locked"));
    assert!(t.client.paths().is_empty());

    let outcome = dispatch(&t.state, &Event::Sync, &bundle(json!({})))
        .await
        .unwrap();
    assert_eq!(outcome.body["msg"], "同步失败");
    assert!(t.client.paths().is_empty());
}

#[tokio::test]
async fn nat_add_and_del_read_nat_form() {
    let t = build_state().await;

    t.client.push(200, Some("添加成功"), None);
    let add = bundle(json!({"natForm": {"dtype": "UDP", "sport": "53", "dport": "10053"}}));
    let outcome = dispatch(&t.state, &Event::NatAdd, &add).await.unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.body["msg"], "添加成功");

    let listed = dispatch(&t.state, &Event::NatList, &add).await.unwrap();
    assert_eq!(listed.body["data"][0]["protocol"], "udp");
    assert_eq!(listed.body["data"][0]["hostPort"], 10053);
    assert_eq!(listed.body["data"][0]["containerPort"], 53);

    t.client.push(200, None, None);
    let del = bundle(json!({"natForm": {"dtype": "udp", "sport": 53, "dport": 10053}}));
    let outcome = dispatch(&t.state, &Event::NatDel, &del).await.unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.body["msg"], "NAT转发删除成功");

    assert_eq!(t.client.paths(), vec!["/api/addport", "/api/delport"]);
    assert!(t.store.find_by_hostname("c1").await.unwrap().is_empty());
}

#[tokio::test]
async fn nat_add_without_form_fails_validation() {
    let t = build_state().await;

    let outcome = dispatch(&t.state, &Event::NatAdd, &bundle(json!({})))
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.body["errorKind"], "validation");
    assert_eq!(outcome.body["msg"], "未知映射类型");
    assert!(t.client.paths().is_empty());
}
