use swagbridge_core::parse;
use swagbridge_core::parse::operation::HttpMethod;
use swagbridge_core::parse::parameter::ParameterLocation;
use swagbridge_core::parse::server::{ServerEntry, VariableValue};

const PETSTORE: &str = include_str!("fixtures/petstore-swagger2.yaml");
const USERS: &str = include_str!("fixtures/users-openapi3.yaml");

#[test]
fn parse_swagger2_yaml() {
    let spec = parse::from_yaml(PETSTORE).expect("should parse petstore");
    assert_eq!(spec.paths().count(), 3);
    assert_eq!(spec.operation_count(), 6);
    assert!(spec.servers.is_none());
    assert_eq!(spec.extra["swagger"], "2.0");
    assert!(spec.extra.contains_key("definitions"));

    let item = spec.path("/pets/{petId}").expect("should have /pets/{petId}");
    let methods: Vec<HttpMethod> = item.operations.keys().copied().collect();
    assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Delete]);
    assert!(item.extra.contains_key("parameters"));

    let delete = &item.operations[&HttpMethod::Delete];
    assert_eq!(delete.operation_id.as_deref(), Some("deletePet"));
    assert_eq!(delete.parameters[0].location(), Some(ParameterLocation::Path));
    assert!(delete.parameters[0].required);
}

#[test]
fn parse_keeps_response_order() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let get = &spec.path("/pets").unwrap().operations[&HttpMethod::Get];
    let codes: Vec<&str> = get
        .responses
        .as_ref()
        .expect("should have responses")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(codes, vec!["404", "200"]);
}

#[test]
fn parse_unresolved_refs_stay_as_refs() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let get = &spec.path("/pets").unwrap().operations[&HttpMethod::Get];
    let ok = &get.responses.as_ref().unwrap()["200"];
    assert_eq!(
        ok.schema,
        Some(serde_json::json!({ "$ref": "#/definitions/Pets" }))
    );
}

#[test]
fn parse_openapi3_servers() {
    let spec = parse::from_yaml(USERS).expect("should parse users");
    let servers = spec.servers.as_ref().expect("should have servers");
    match servers.primary() {
        Some(ServerEntry::Object(server)) => {
            assert_eq!(
                server.url.as_deref(),
                Some("https://{region}.api.example.com/{basePath}")
            );
            let names: Vec<&str> = server.variables.keys().map(String::as_str).collect();
            assert_eq!(names, vec!["region", "basePath"]);
            assert!(matches!(
                server.variables["basePath"],
                VariableValue::Definition(_)
            ));
        }
        other => panic!("expected object server, got {other:?}"),
    }
}

#[test]
fn parse_json_input() {
    let spec = parse::from_json(
        r#"{"servers": "https://api.example.com", "paths": {"/a": {"x-hidden": {}, "get": {}}}}"#,
    )
    .unwrap();
    assert_eq!(
        spec.servers.as_ref().and_then(|s| s.primary()),
        Some(&ServerEntry::Url("https://api.example.com".to_string()))
    );
    assert_eq!(spec.operation_count(), 1);
}

#[test]
fn parse_rejects_non_mapping() {
    assert!(parse::from_yaml("- just\n- a list\n").is_err());
    assert!(parse::from_json("42").is_err());
}
