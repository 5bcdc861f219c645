// capistars-client/tests/facade_integration.rs
// Façade and adapter against an in-process backend

mod common;

use capistars_client::rpc::{RpcTransport, encode_uri_component};
use capistars_client::{
    ActionKind, ClientConfig, ClientError, EntityKind, Establishment, Facade, Fetched,
    InputEncoding, NetworkRpcClient, ProcedurePreset, ProcedureTable, ResourceList, SalesRep,
    SalesRepUpdate, Stats,
};
use common::{
    MockBackend, Reply, client_json, establishment_json, sales_rep_json, unreachable_url,
};
use serde_json::{Value, json};

fn facade(base_url: &str) -> Facade<NetworkRpcClient> {
    Facade::from_config(&ClientConfig::new(base_url)).unwrap()
}

#[tokio::test]
async fn test_list_returns_backend_array_in_order() {
    let backend = MockBackend::spawn([(
        "salesReps.list",
        Reply::Data(json!([sales_rep_json(3, true), sales_rep_json(1, false), sales_rep_json(2, true)])),
    )])
    .await;

    let reps = facade(&backend.base_url).sales_reps().list().await;
    assert!(reps.is_loaded());

    let ids: Vec<i64> = reps.into_inner().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);

    let calls = backend.calls_to("salesReps.list");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "GET");
    assert!(calls[0].raw_query.is_none());
}

#[tokio::test]
async fn test_list_on_transport_error_is_empty() {
    let facade = facade(&unreachable_url().await);

    let reps = facade.sales_reps().list().await;
    assert!(reps.is_unavailable());
    assert!(reps.into_inner().is_empty());
}

#[tokio::test]
async fn test_list_on_status_or_malformed_envelope_is_unavailable() {
    let backend = MockBackend::spawn([
        ("establishments.list", Reply::Status(500)),
        ("admin.listClients", Reply::Raw(r#"{"data":[]}"#)),
    ])
    .await;
    let facade = facade(&backend.base_url);

    assert_eq!(facade.establishments().list().await, Fetched::Unavailable);
    assert_eq!(facade.clients().list().await, Fetched::Unavailable);
}

#[tokio::test]
async fn test_empty_list_is_loaded_not_unavailable() {
    let backend = MockBackend::spawn([("admin.getActionLogs", Reply::Data(json!([])))]).await;

    let logs = facade(&backend.base_url).action_logs().list().await;
    assert_eq!(logs, Fetched::Loaded(Vec::new()));
}

#[tokio::test]
async fn test_toggle_active_sends_negated_flag() {
    let backend = MockBackend::spawn([("salesReps.toggleActive", Reply::Data(json!({ "success": true })))]).await;
    let facade = facade(&backend.base_url);

    assert!(facade.sales_reps().toggle_active(4, true).await);
    assert!(facade.sales_reps().set_active(4, true).await);

    let calls = backend.calls_to("salesReps.toggleActive");
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].body, Some(json!({ "id": 4, "isActive": false })));
    assert_eq!(calls[1].body, Some(json!({ "id": 4, "isActive": true })));
}

#[tokio::test]
async fn test_mutation_failure_is_false() {
    let backend = MockBackend::spawn([("salesReps.delete", Reply::Status(409))]).await;

    assert!(!facade(&backend.base_url).sales_reps().delete(1).await);
    assert!(!facade(&unreachable_url().await).clients().delete(1).await);
}

#[tokio::test]
async fn test_void_mutation_reply_is_success() {
    let backend = MockBackend::spawn([("admin.deleteClient", Reply::Raw(r#"{"result":{}}"#))]).await;

    assert!(facade(&backend.base_url).clients().delete(2).await);
}

#[tokio::test]
async fn test_establishment_toggle_goes_through_update() {
    let backend = MockBackend::spawn([("establishments.update", Reply::Data(Value::Null))]).await;

    assert!(facade(&backend.base_url).establishments().toggle_active(8, false).await);
    let calls = backend.calls_to("establishments.update");
    assert_eq!(calls[0].body, Some(json!({ "id": 8, "isActive": true })));
}

#[tokio::test]
async fn test_stats_collapses_when_one_branch_fails() {
    let backend = MockBackend::spawn([
        (
            "salesReps.list",
            Reply::Data(json!([sales_rep_json(1, true), sales_rep_json(2, true), sales_rep_json(3, false)])),
        ),
        ("establishments.list", Reply::Status(503)),
    ])
    .await;

    let stats = facade(&backend.base_url).stats().await;
    assert!(stats.is_unavailable());
    assert_eq!(stats.into_inner(), Stats::default());
}

#[tokio::test]
async fn test_stats_counts_active_and_pending() {
    let backend = MockBackend::spawn([
        (
            "salesReps.list",
            Reply::Data(json!([sales_rep_json(1, true), sales_rep_json(2, false)])),
        ),
        (
            "establishments.list",
            Reply::Data(json!([establishment_json(10, true), establishment_json(11, false)])),
        ),
    ])
    .await;

    let stats = facade(&backend.base_url).stats().await.into_inner();
    assert_eq!(stats.active_sales_reps, 1);
    assert_eq!(stats.total_sales_reps, 2);
    assert_eq!(stats.active_establishments, 1);
    assert_eq!(stats.pending_validation, 2);
    assert_eq!(stats.total_clients, 0);
    assert_eq!(stats.total_bookings, 0);
}

#[tokio::test]
async fn test_stats_sources_ignore_preset() {
    let backend = MockBackend::spawn([
        ("salesReps.list", Reply::Data(json!([sales_rep_json(1, false)]))),
        ("establishments.list", Reply::Data(json!([establishment_json(2, true)]))),
    ])
    .await;
    let config = ClientConfig::new(&backend.base_url).with_procedures(ProcedurePreset::Admin);

    let stats = Facade::from_config(&config).unwrap().stats().await;
    assert!(stats.is_loaded());
    assert_eq!(stats.into_inner().pending_validation, 1);
    assert!(backend.calls_to("salesReps.getAll").is_empty());
    assert!(backend.calls_to("admin.listEstablishments").is_empty());
}

#[tokio::test]
async fn test_server_stats() {
    let backend = MockBackend::spawn([(
        "admin.getStats",
        Reply::Data(json!({ "totalClients": 12, "activeClients": 9, "monthlyRevenue": 1520.5 })),
    )])
    .await;

    let stats = facade(&backend.base_url).server_stats().await.into_inner();
    assert_eq!(stats.total_clients, 12);
    assert_eq!(stats.active_clients, 9);
    assert_eq!(stats.monthly_revenue, 1520.5);
}

#[tokio::test]
async fn test_delete_removes_row_locally() {
    let backend = MockBackend::spawn([
        (
            "establishments.list",
            Reply::Data(json!([establishment_json(4, true), establishment_json(5, true)])),
        ),
        ("establishments.delete", Reply::Data(json!({ "success": true }))),
    ])
    .await;
    let facade = facade(&backend.base_url);

    let mut list = ResourceList::<Establishment>::new();
    list.refresh(&facade).await;
    assert!(list.get(5).is_some());

    assert!(list.delete(&facade, 5).await);
    assert!(list.get(5).is_none());
    assert_eq!(list.items().len(), 1);

    let calls = backend.calls_to("establishments.delete");
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].body, Some(json!({ "id": 5 })));
}

#[tokio::test]
async fn test_failed_delete_keeps_row() {
    let backend = MockBackend::spawn([
        ("establishments.list", Reply::Data(json!([establishment_json(5, true)]))),
        ("establishments.delete", Reply::Status(500)),
    ])
    .await;
    let facade = facade(&backend.base_url);

    let mut list = ResourceList::<Establishment>::new();
    list.refresh(&facade).await;
    assert!(!list.delete(&facade, 5).await);
    assert!(list.get(5).is_some());
}

#[tokio::test]
async fn test_update_merges_exactly_what_was_sent() {
    let backend = MockBackend::spawn([
        ("salesReps.list", Reply::Data(json!([sales_rep_json(7, true)]))),
        ("salesReps.update", Reply::Data(json!({ "success": true }))),
    ])
    .await;
    let facade = facade(&backend.base_url);

    let mut list = ResourceList::<SalesRep>::new();
    list.refresh(&facade).await;
    let before = list.get(7).cloned().unwrap();

    assert!(list.begin_edit(7));
    let draft = list.draft_mut().unwrap();
    draft.email = Some("nouveau@capistars.fr".into());
    draft.phone = Some("0799999999".into());
    assert!(list.save_edit(&facade).await);
    assert!(list.editing().is_none());

    let sent = backend.calls_to("salesReps.update")[0].body.clone().unwrap();
    assert_eq!(
        sent,
        json!({
            "id": 7,
            "firstName": before.first_name,
            "lastName": before.last_name,
            "email": "nouveau@capistars.fr",
            "phone": "0799999999",
        })
    );

    let after = list.get(7).unwrap();
    assert_eq!(after.first_name, sent["firstName"]);
    assert_eq!(after.last_name, sent["lastName"]);
    assert_eq!(after.email, sent["email"]);
    assert_eq!(after.phone, sent["phone"]);
    assert_eq!(after.code, before.code);
    assert_eq!(after.territories, before.territories);
}

#[tokio::test]
async fn test_partial_update_body_carries_only_edited_fields() {
    let backend = MockBackend::spawn([("salesReps.update", Reply::Data(Value::Null))]).await;

    let update = SalesRepUpdate {
        last_name: Some("Moreau".into()),
        ..Default::default()
    };
    assert!(facade(&backend.base_url).sales_reps().update(2, &update).await);
    assert_eq!(
        backend.calls_to("salesReps.update")[0].body,
        Some(json!({ "id": 2, "lastName": "Moreau" }))
    );
}

#[tokio::test]
async fn test_inputs_keep_declaration_order_on_the_wire() {
    let backend = MockBackend::spawn([
        ("salesReps.update", Reply::Data(Value::Null)),
        ("salesReps.byDraft", Reply::Data(json!([]))),
    ])
    .await;
    let facade = facade(&backend.base_url);

    let update = SalesRepUpdate {
        first_name: Some("A".into()),
        last_name: Some("B".into()),
        email: Some("c@d".into()),
        phone: Some("1".into()),
    };
    let ordered = r#"{"firstName":"A","lastName":"B","email":"c@d","phone":"1"}"#;

    assert!(facade.sales_reps().update(2, &update).await);
    assert_eq!(
        backend.calls_to("salesReps.update")[0].raw_body.as_deref(),
        Some(r#"{"id":2,"firstName":"A","lastName":"B","email":"c@d","phone":"1"}"#)
    );

    let _: Vec<Value> = facade.rpc().query("salesReps.byDraft", Some(&update)).await.unwrap();
    let expected = format!("input={}", encode_uri_component(ordered));
    assert_eq!(
        backend.calls_to("salesReps.byDraft")[0].raw_query.as_deref(),
        Some(expected.as_str())
    );
}

#[tokio::test]
async fn test_field_edit_by_wire_name_is_saved() {
    let backend = MockBackend::spawn([
        ("establishments.list", Reply::Data(json!([establishment_json(3, true)]))),
        ("establishments.update", Reply::Data(Value::Null)),
    ])
    .await;
    let facade = facade(&backend.base_url);

    let mut list = ResourceList::<Establishment>::new();
    list.refresh(&facade).await;
    assert!(list.begin_edit(3));
    list.set_draft_field("city", "Lyon").unwrap();
    assert!(list.set_draft_field("postalCode", "69001").is_err());

    assert!(list.save_edit(&facade).await);
    assert_eq!(list.get(3).unwrap().city, "Lyon");
    assert_eq!(
        backend.calls_to("establishments.update")[0].raw_body.as_deref(),
        Some(
            r#"{"id":3,"name":"Salon 3","email":"salon3@example.fr","phone":"0100000000","address":"1 rue de la Paix","city":"Lyon"}"#
        )
    );
}

#[tokio::test]
async fn test_failed_save_keeps_draft() {
    let backend = MockBackend::spawn([
        ("admin.listClients", Reply::Data(json!([client_json(1, true)]))),
        ("admin.updateClient", Reply::Status(400)),
    ])
    .await;
    let facade = facade(&backend.base_url);

    let mut list = ResourceList::<capistars_client::Client>::new();
    list.refresh(&facade).await;
    list.begin_edit(1);
    list.draft_mut().unwrap().capimiles_points = Some(999);

    assert!(!list.save_edit(&facade).await);
    assert_eq!(list.editing().map(|d| d.id), Some(1));
    assert_eq!(list.get(1).unwrap().capimiles_points, 250);
}

#[tokio::test]
async fn test_audited_toggle_records_action() {
    let backend = MockBackend::spawn([
        ("admin.listClients", Reply::Data(json!([client_json(3, true)]))),
        ("admin.toggleClient", Reply::Data(json!({ "success": true }))),
        ("admin.logAction", Reply::Data(Value::Null)),
    ])
    .await;
    let facade = facade(&backend.base_url);

    let mut list = ResourceList::<capistars_client::Client>::new().with_audit(true);
    list.refresh(&facade).await;
    assert!(list.toggle(&facade, 3).await);
    assert!(!list.get(3).unwrap().is_active);

    let toggles = backend.calls_to("admin.toggleClient");
    assert_eq!(toggles[0].body, Some(json!({ "id": 3, "isActive": false })));

    let logs = backend.calls_to("admin.logAction");
    assert_eq!(
        logs[0].body,
        Some(json!({
            "action": ActionKind::Deactivate.as_str(),
            "entityType": EntityKind::Client.as_str(),
            "entityId": 3,
            "entityName": "Léa Client3",
        }))
    );
}

#[tokio::test]
async fn test_failed_audit_keeps_confirmed_toggle() {
    let backend = MockBackend::spawn([
        ("salesReps.list", Reply::Data(json!([sales_rep_json(9, false)]))),
        ("salesReps.toggleActive", Reply::Data(Value::Null)),
        ("admin.logAction", Reply::Status(500)),
    ])
    .await;
    let facade = facade(&backend.base_url);

    let mut list = ResourceList::<SalesRep>::new().with_audit(true);
    list.refresh(&facade).await;
    assert!(list.toggle(&facade, 9).await);
    assert!(list.get(9).unwrap().is_active);
    assert_eq!(backend.calls_to("admin.logAction").len(), 1);
}

#[tokio::test]
async fn test_unavailable_refresh_marks_list() {
    let facade = facade(&unreachable_url().await);

    let mut list = ResourceList::<SalesRep>::new();
    let status = list.refresh(&facade).await;
    assert_eq!(status, capistars_client::view::ListStatus::Unavailable);
    assert!(list.items().is_empty());
    assert!(!list.toggle(&facade, 1).await);
}

#[tokio::test]
async fn test_admin_preset_routes_establishments() {
    let backend = MockBackend::spawn([
        ("admin.listEstablishments", Reply::Data(json!([establishment_json(1, false)]))),
        ("admin.deleteEstablishment", Reply::Data(Value::Null)),
        ("salesReps.getAll", Reply::Data(json!([]))),
    ])
    .await;
    let config = ClientConfig::new(&backend.base_url).with_procedures(ProcedurePreset::Admin);
    let facade = Facade::from_config(&config).unwrap();
    assert_eq!(facade.procedures(), &ProcedureTable::admin());

    assert_eq!(facade.establishments().list().await.into_inner().len(), 1);
    assert!(facade.establishments().delete(1).await);
    assert!(facade.sales_reps().list().await.is_loaded());
    assert_eq!(backend.calls_to("admin.deleteEstablishment").len(), 1);
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let backend = MockBackend::spawn([("salesReps.list", Reply::Data(json!([])))]).await;
    let rpc = ClientConfig::new(&backend.base_url)
        .with_token("signed.session.token")
        .build_rpc_client()
        .unwrap();
    let facade = Facade::new(rpc, ProcedureTable::default());

    let _ = facade.sales_reps().list().await;
    assert_eq!(
        backend.calls()[0].authorization.as_deref(),
        Some("Bearer signed.session.token")
    );
}

#[tokio::test]
async fn test_query_input_is_uri_component_encoded() {
    let backend = MockBackend::spawn([("admin.search", Reply::Data(json!(["ok"])))]).await;
    let rpc = ClientConfig::new(&backend.base_url).build_rpc_client().unwrap();

    let input = json!({ "q": "salon & spa", "page": 1 });
    let data: Vec<String> = rpc.query("admin.search", Some(&input)).await.unwrap();
    assert_eq!(data, vec!["ok".to_string()]);

    let call = &backend.calls_to("admin.search")[0];
    assert_eq!(
        call.raw_query.as_deref(),
        Some(format!("input={}", encode_uri_component(&input.to_string())).as_str())
    );
    assert_eq!(call.input, Some(input));
}

#[tokio::test]
async fn test_transformer_encoding_wraps_inputs() {
    let backend = MockBackend::spawn([("salesReps.delete", Reply::Data(Value::Null))]).await;
    let config = ClientConfig::new(&backend.base_url).with_input_encoding(InputEncoding::Transformer);

    assert!(Facade::from_config(&config).unwrap().sales_reps().delete(6).await);
    assert_eq!(
        backend.calls_to("salesReps.delete")[0].body,
        Some(json!({ "json": { "id": 6 } }))
    );
}

#[tokio::test]
async fn test_adapter_error_taxonomy() {
    let backend = MockBackend::spawn([
        ("admin.getStats", Reply::Status(401)),
        ("admin.getActionLogs", Reply::Status(502)),
        ("salesReps.list", Reply::Raw("<html>oops</html>")),
    ])
    .await;
    let rpc = ClientConfig::new(&backend.base_url).build_rpc_client().unwrap();

    let unauthorized = rpc.query::<Value, ()>("admin.getStats", None).await.unwrap_err();
    assert!(matches!(unauthorized, ClientError::Unauthorized));

    let status = rpc.query::<Value, ()>("admin.getActionLogs", None).await.unwrap_err();
    assert!(matches!(status, ClientError::Status { status: 502, .. }));

    let malformed = rpc.query::<Value, ()>("salesReps.list", None).await.unwrap_err();
    assert!(matches!(malformed, ClientError::InvalidResponse(_)));

    let invalid = rpc.query::<Value, ()>("salesReps/list", None).await.unwrap_err();
    assert!(matches!(invalid, ClientError::InvalidProcedure(_)));
    assert_eq!(backend.calls().len(), 3);

    let offline = ClientConfig::new(unreachable_url().await).build_rpc_client().unwrap();
    let transport = offline.query::<Value, ()>("salesReps.list", None).await.unwrap_err();
    assert!(transport.is_transport());
}
