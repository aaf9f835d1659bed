//! Integration tests for the conveyor managers using wiremock
//!
//! These tests verify the verb, path, query string and body every manager
//! operation sends, and how server responses are mapped back.

use conveyor_client::api::{ConveyorClient, Session};
use conveyor_client::manager::{AzMap, CloneOptions, PlanListOptions, PlanType, ResourceRef};
use conveyor_client::ConveyorError;
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PLAN_ID: &str = "3c1f6a8e-2b7d-4e15-9a4c-7d0b5e2f1a93";
const SERVER_ID: &str = "5f1c0c7e-1d4b-4a8e-9d7a-2f0e8c1b3a44";

fn client(server: &MockServer) -> ConveyorClient {
    let session = Session::new(Some("test-token".to_string()), Some("proj-1".to_string()));
    ConveyorClient::new(&format!("{}/v1/", server.uri()), session).unwrap()
}

fn az_map(src: &str, dst: &str) -> AzMap {
    let mut map = AzMap::new();
    map.insert(src.to_string(), dst.to_string());
    map
}

fn directive(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

mod plan_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_sends_session_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/v1/plans/{}", PLAN_ID)))
            .and(header("X-Auth-Token", "test-token"))
            .and(header("X-Project-Id", "proj-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "plan": {"plan_id": PLAN_ID, "plan_status": "available", "plan_type": "clone"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let plan = client(&server).plans().get(PLAN_ID).await.unwrap();
        assert_eq!(plan.plan_id, PLAN_ID);
        assert_eq!(plan.status(), "available");
    }

    #[tokio::test]
    async fn test_create_posts_obj_type_and_obj_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/plans"))
            .and(body_json(json!({
                "plan": {
                    "type": "clone",
                    "resources": [{"obj_type": "OS::Nova::Server", "obj_id": SERVER_ID}],
                    "plan_name": "web"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "plan": {"plan_id": PLAN_ID, "plan_name": "web"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resources = vec![ResourceRef::new("OS::Nova::Server", SERVER_ID)];
        let plan = client(&server)
            .plans()
            .create(PlanType::Clone, &resources, Some("web"))
            .await
            .unwrap();
        assert_eq!(plan.plan_name.as_deref(), Some("web"));
    }

    #[tokio::test]
    async fn test_create_without_resources_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server)
            .plans()
            .create(PlanType::Migrate, &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, ConveyorError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_list_query_string() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/plans/detail"))
            .and(query_param("plan_type", "migrate"))
            .and(query_param("limit", "10"))
            .and(query_param("sort_key", "created_at"))
            .and(query_param("sort_dir", "asc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "plans": [
                    {"plan_id": "p1", "plan_type": "migrate"},
                    {"plan_id": "p2", "plan_type": "migrate"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut options = PlanListOptions {
            limit: Some(10),
            sort_key: Some("created_at".to_string()),
            sort_dir: Some("asc".to_string()),
            ..Default::default()
        };
        options
            .search_opts
            .insert("plan_type".to_string(), "migrate".to_string());
        options.search_opts.insert("plan_name".to_string(), String::new());

        let plans = client(&server).plans().list(&options).await.unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[1].plan_id, "p2");
    }

    #[tokio::test]
    async fn test_list_rejects_bad_sort_key_before_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let options = PlanListOptions {
            sort_key: Some("size".to_string()),
            ..Default::default()
        };
        let err = client(&server).plans().list(&options).await.unwrap_err();
        assert!(matches!(err, ConveyorError::InvalidValue(_)));
    }

    #[tokio::test]
    async fn test_update_puts_values() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(format!("/v1/plans/{}", PLAN_ID)))
            .and(body_json(json!({"plan": {"plan_name": "renamed"}})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut values = Map::new();
        values.insert("plan_name".to_string(), Value::from("renamed"));
        client(&server).plans().update(PLAN_ID, values).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_update_is_noop() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        client(&server)
            .plans()
            .update(PLAN_ID, Map::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_plan_resource_encodes_user_data() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/plans/{}/action", PLAN_ID)))
            .and(body_json(json!({
                "update_plan_resources": {
                    "resources": [
                        {"action": "edit", "resource_id": "server_0", "user_data": "aGk="},
                        {"action": "delete", "resource_id": "net_0"}
                    ]
                }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let resources = vec![
            directive(json!({"action": "edit", "resource_id": "server_0", "user_data": "hi"})),
            directive(json!({"action": "delete", "resource_id": "net_0"})),
        ];
        client(&server)
            .plans()
            .update_plan_resource(PLAN_ID, resources)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalid_directive_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let resources = vec![
            directive(json!({"action": "delete", "resource_id": "net_0"})),
            directive(json!({"action": "add", "id": "vol-1"})),
        ];
        let err = client(&server)
            .plans()
            .update_plan_resource(PLAN_ID, resources)
            .await
            .unwrap_err();
        assert!(matches!(err, ConveyorError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_plan_actions() {
        let server = MockServer::start().await;
        let action_path = format!("/v1/plans/{}/action", PLAN_ID);

        Mock::given(method("POST"))
            .and(path(action_path.as_str()))
            .and(body_json(json!({"os-reset_state": {"plan_status": "error"}})))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(action_path.as_str()))
            .and(body_json(json!({"force_delete-plan": {"plan_id": PLAN_ID}})))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(action_path.as_str()))
            .and(body_json(json!({"download_template": null})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"template": {"resources": {}}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let plans = client.plans();
        plans.reset_plan_state(PLAN_ID, "error").await.unwrap();
        plans.force_delete_plan(PLAN_ID).await.unwrap();
        let template = plans.download_template(PLAN_ID).await.unwrap();
        assert_eq!(template["template"]["resources"], json!({}));
    }

    #[tokio::test]
    async fn test_create_by_template_then_get() {
        let server = MockServer::start().await;
        let template = json!({"resources": {"server_0": {"type": "OS::Nova::Server"}}});

        Mock::given(method("POST"))
            .and(path("/v1/plans/create_plan_by_template"))
            .and(body_json(json!({"plan": {"template": template.clone(), "plan_name": "tpl"}})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"plan": {"plan_id": PLAN_ID}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("/v1/plans/{}", PLAN_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "plan": {"plan_id": PLAN_ID, "plan_name": "tpl", "plan_status": "available"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let created = client
            .plans()
            .create_plan_by_template(&template, Some("tpl"))
            .await
            .unwrap();
        let plan = client.plans().get(&created.plan_id).await.unwrap();
        assert_eq!(plan.plan_name.as_deref(), Some("tpl"));
    }

    #[tokio::test]
    async fn test_find_falls_back_to_plan_name() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/plans/web"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "itemNotFound": {"message": "Plan could not be found."}
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/plans/detail"))
            .and(query_param("plan_name", "web"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "plans": [
                    {"plan_id": PLAN_ID, "plan_name": "web"},
                    {"plan_id": "other", "plan_name": "web-2"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let plan = client(&server).plans().find("web").await.unwrap();
        assert_eq!(plan.plan_id, PLAN_ID);
    }

    #[tokio::test]
    async fn test_find_rejects_missing_and_ambiguous_names() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/v1/plans/(db|gone)$"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/plans/detail"))
            .and(query_param("plan_name", "db"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "plans": [
                    {"plan_id": "a", "plan_name": "db"},
                    {"plan_id": "b", "plan_name": "db"}
                ]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/plans/detail"))
            .and(query_param("plan_name", "gone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plans": []})))
            .mount(&server)
            .await;

        let plans = client(&server);
        let err = plans.plans().find("db").await.unwrap_err();
        assert!(err.to_string().starts_with("Multiple plan matches found for 'db'"));

        let err = plans.plans().find("gone").await.unwrap_err();
        assert_eq!(err.to_string(), "No plan with a name or ID of 'gone' exists.");
    }

    #[tokio::test]
    async fn test_resource_detail_from_plan() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/plans/server_0/action"))
            .and(body_json(json!({
                "get_resource_detail_from_plan": {"plan_id": PLAN_ID, "is_original": true}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"resource": {"name": "server_0", "type": "OS::Nova::Server"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let resource = client(&server)
            .plans()
            .get_resource_detail_from_plan("server_0", PLAN_ID, true)
            .await
            .unwrap();
        assert_eq!(resource["type"], "OS::Nova::Server");
    }
}

mod resource_tests {
    use super::*;

    #[tokio::test]
    async fn test_resource_type_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/resources/types"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "types": [{"type": "OS::Nova::Server"}, {"type": "OS::Cinder::Volume"}]
            })))
            .mount(&server)
            .await;

        let types = client(&server)
            .resources()
            .resource_type_list()
            .await
            .unwrap();
        let names: Vec<_> = types.iter().map(|t| t.resource_type.as_str()).collect();
        assert_eq!(names, ["OS::Nova::Server", "OS::Cinder::Volume"]);
    }

    #[tokio::test]
    async fn test_list_with_type_filter() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/resources/detail"))
            .and(query_param("type", "OS::Nova::Server"))
            .and(query_param("name", "web"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": [{"id": SERVER_ID, "name": "web"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut opts = conveyor_client::manager::SearchOpts::new();
        opts.insert("type".to_string(), "OS::Nova::Server".to_string());
        opts.insert("name".to_string(), "web".to_string());

        let resources = client(&server).resources().list(&opts).await.unwrap();
        assert_eq!(resources[0].to_string(), "<Resource: web>");
    }

    #[tokio::test]
    async fn test_resource_actions() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/resources/{}/action", SERVER_ID)))
            .and(body_json(json!({"get_resource_detail": {"type": "OS::Nova::Server"}})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"resource": {"id": SERVER_ID}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/resources/{}/action", PLAN_ID)))
            .and(body_json(json!({
                "build-resources_topo": {
                    "plan_id": PLAN_ID,
                    "availability_zone_map": {"az1": "az2"},
                    "search_opt": null
                }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"topo": {"server_0": []}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/resources/{}/action", PLAN_ID)))
            .and(body_json(json!({
                "list-clone_resources_attribute": {
                    "plan_id": PLAN_ID,
                    "attribute_name": "availability_zone"
                }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"attribute_list": ["az1"]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/resources/{}/action", PLAN_ID)))
            .and(body_json(json!({"delete-cloned_resources": {"plan_id": PLAN_ID}})))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let resources = client.resources();

        let detail = resources
            .get_resource_detail("OS::Nova::Server", SERVER_ID)
            .await
            .unwrap();
        assert_eq!(detail["id"], SERVER_ID);

        let topo = resources
            .build_resources_topo(PLAN_ID, &az_map("az1", "az2"), None)
            .await
            .unwrap();
        assert!(topo.get("server_0").is_some());

        let zones = resources
            .list_clone_resources_attribute(PLAN_ID, "availability_zone")
            .await
            .unwrap();
        assert_eq!(zones, json!(["az1"]));

        resources.delete_cloned_resources(PLAN_ID).await.unwrap();
    }

    #[tokio::test]
    async fn test_availability_zones_use_random_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(r"^/v1/resources/[0-9a-f-]{36}/action$"))
            .and(body_json(json!({"list-all_availability_zones": {}})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"availability_zone_list": ["az1", "az2"]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let zones = client(&server)
            .resources()
            .list_all_availability_zones()
            .await
            .unwrap();
        assert_eq!(zones, json!(["az1", "az2"]));
    }

    #[tokio::test]
    async fn test_missing_envelope_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/resources/{}/action", PLAN_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"other": 1})))
            .mount(&server)
            .await;

        let err = client(&server)
            .resources()
            .build_resources_topo(PLAN_ID, &AzMap::new(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ConveyorError::MissingField(ref k) if k == "topo"));
    }
}

mod clone_migrate_tests {
    use super::*;

    #[tokio::test]
    async fn test_clone_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/clones/{}/action", PLAN_ID)))
            .and(body_json(json!({
                "clone": {
                    "destination": {"az1": "az2"},
                    "clone_resources": [{"type": "OS::Nova::Server", "id": SERVER_ID}],
                    "sys_clone": true,
                    "copy_data": false
                }
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let options = CloneOptions {
            sys_clone: true,
            copy_data: false,
        };
        client(&server)
            .clones()
            .clone(
                PLAN_ID,
                &az_map("az1", "az2"),
                &[ResourceRef::new("OS::Nova::Server", SERVER_ID)],
                options,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_clone_template_actions() {
        let server = MockServer::start().await;
        let template = json!({"resources": {"server_0": {"type": "OS::Nova::Server"}}});

        Mock::given(method("POST"))
            .and(path(format!("/v1/clones/{}/action", PLAN_ID)))
            .and(body_json(json!({
                "export_clone_template": {"sys_clone": false, "copy_data": true}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"template": {}})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/clones/{}/action", PLAN_ID)))
            .and(body_json(json!({
                "clone_element_template": {
                    "disable_rollback": true,
                    "plan_id": PLAN_ID,
                    "template": template.clone()
                }
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/clones/{}/action", PLAN_ID)))
            .and(body_json(json!({
                "export_template_and_clone": {
                    "destination": {"az1": "az3"},
                    "resources": template.clone(),
                    "sys_clone": false
                }
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let clones = client.clones();

        let options = CloneOptions {
            sys_clone: false,
            copy_data: true,
        };
        clones.export_clone_template(PLAN_ID, options).await.unwrap();
        let response = clones
            .start_clone_template(PLAN_ID, true, &template)
            .await
            .unwrap();
        assert!(response.is_null());
        clones
            .export_template_and_clone(PLAN_ID, &az_map("az1", "az3"), &template, false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_migrate_actions() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/migrates/{}/action", PLAN_ID)))
            .and(body_json(json!({"export_migrate_template": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"template": {}})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/migrates/{}/action", PLAN_ID)))
            .and(body_json(json!({"migrate": {"destination": {"az1": "az2"}}})))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client
            .migrates()
            .export_migrate_template(PLAN_ID)
            .await
            .unwrap();
        client
            .migrates()
            .migrate(PLAN_ID, &az_map("az1", "az2"))
            .await
            .unwrap();
    }
}

mod configuration_and_service_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_configs() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/configurations"))
            .and(body_json(json!({
                "configurations": {
                    "config_file": "/etc/conveyor/conveyor.conf",
                    "config_info": [{"DEFAULT": {"debug": true}}]
                }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut info = Map::new();
        info.insert("DEFAULT".to_string(), json!({"debug": true}));
        client(&server)
            .configurations()
            .update_configs(Some("/etc/conveyor/conveyor.conf"), info)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_services() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/services/detail"))
            .and(query_param("host", "conveyor-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": [{"id": "svc-1", "status": "enabled"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/services/svc-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"resource": {"id": "svc-1"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/v1/services/svc-1"))
            .and(body_json(json!({"volume": {"status": "disabled"}})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/v1/services/svc-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let services = client.services();

        let mut opts = conveyor_client::manager::SearchOpts::new();
        opts.insert("host".to_string(), "conveyor-1".to_string());
        let listed = services.list(true, &opts).await.unwrap();
        assert_eq!(listed[0].id(), Some("svc-1"));

        let service = services.get("svc-1").await.unwrap();
        assert_eq!(service.to_string(), "<Service: svc-1>");

        let mut values = Map::new();
        values.insert("status".to_string(), Value::from("disabled"));
        services.update("svc-1", values).await.unwrap();
        services.delete("svc-1").await.unwrap();
    }
}

mod error_tests {
    use super::*;
    use conveyor_client::api::format_api_error;

    #[tokio::test]
    async fn test_404_maps_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/v1/plans/{}", PLAN_ID)))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "itemNotFound": {"message": "Plan could not be found.", "code": 404}
            })))
            .mount(&server)
            .await;

        let err = client(&server).plans().get(PLAN_ID).await.unwrap_err();
        match &err {
            ConveyorError::Api { status, message } => {
                assert_eq!(*status, 404);
                assert_eq!(message, "Plan could not be found.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(format_api_error(&err), "Not found: Plan could not be found.");
    }

    #[tokio::test]
    async fn test_plain_text_error_uses_reason() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client(&server).plans().delete(PLAN_ID).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(format_api_error(&err).starts_with("Conveyor service error (500)"));
    }

    #[tokio::test]
    async fn test_path_segments_are_encoded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/plans/a%2Fb"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"plan": {"plan_id": "a/b"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let plan = client(&server).plans().get("a/b").await.unwrap();
        assert_eq!(plan.plan_id, "a/b");
    }
}
