mod common;

use common::{McpServerProc, StubResponse, StubServer};
use serde_json::{Value, json};

#[test]
fn build_from_theme_surfaces_task_id() {
    let stub = StubServer::start(vec![StubResponse::ok(json!({"id": "abc123"}))]);
    let mut server = McpServerProc::spawn_with_stub(&stub);

    let result = server.call_tool("build_ppt", json!({"theme": "季度总结"}));
    let structured = common::structured(&result);
    assert_eq!(
        structured.get("task_id").and_then(Value::as_str),
        Some("abc123")
    );

    let request = stub.next_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/mcp/ppt/ppt-create");
    assert_eq!(
        request.form_pairs(),
        vec![("text".to_string(), "季度总结".to_string())]
    );
    assert_eq!(
        request.header("authorization"),
        Some(format!("Bearer  {}", common::TEST_API_KEY).as_str())
    );
}

#[test]
fn thesis_build_posts_file_key_field() {
    let stub = StubServer::start(vec![StubResponse::ok(json!({"data": {"id": "t-99"}}))]);
    let mut server = McpServerProc::spawn_with_stub(&stub);

    let result = server.call_tool(
        "build_thesis_ppt",
        json!({"file_url": "https://example.com/thesis.pdf"}),
    );
    assert_eq!(
        common::structured(&result)
            .get("task_id")
            .and_then(Value::as_str),
        Some("t-99")
    );

    let request = stub.next_request();
    assert_eq!(request.path(), "/mcp/ppt/ppt-create-thesis");
    assert_eq!(
        request.form_pairs(),
        vec![(
            "file_key".to_string(),
            "https://example.com/thesis.pdf".to_string()
        )]
    );
}

#[test]
fn build_without_task_id_in_body_is_a_format_error() {
    let stub = StubServer::start(vec![StubResponse::ok(json!({"code": 200, "msg": "ok"}))]);
    let mut server = McpServerProc::spawn_with_stub(&stub);

    let result = server.call_tool("build_ppt", json!({"theme": "季度总结"}));
    let error = common::error_object(&result);
    assert_eq!(
        error.get("kind").and_then(Value::as_str),
        Some("response_format")
    );
}
