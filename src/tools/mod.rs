//! Tool dispatch: every catalog operation reduces to one gateway call.
//!
//! Arguments are checked against the operation's parameter specs and turned
//! into wire fields before any network attempt; gateway failures are mapped
//! onto the caller-facing error kinds. Results keep the remote body intact
//! under `structuredContent.response` and add only what the operation's
//! semantics promise (a task id, or the classified poll state).

use serde_json::{Map, Value, json};
use tracing::warn;

use crate::catalog::{self, Operation, ParamKind, Semantics, Verb};
use crate::client::{ApiError, ChatpptClient};
use crate::config;
use crate::mcp::{contracts, errors};
use crate::task::{TaskSnapshot, TaskState};

pub async fn dispatch(name: &str, args: &Value) -> Value {
    if name == contracts::TOOL_CHECK {
        return check();
    }
    let Some(op) = catalog::find(name) else {
        return error_result(
            errors::INVALID_INPUT,
            format!("tool not implemented: {name}"),
            Some(name),
        );
    };
    call(op, args).await
}

/// Reports the configured credential so a user can verify wiring. No HTTP.
fn check() -> Value {
    match config::api_key() {
        Ok(key) => json!({
            "content": [{"type": "text", "text": key}],
            "structuredContent": {"api_key": key},
            "isError": false
        }),
        Err(err) => api_error_result(contracts::TOOL_CHECK, &err),
    }
}

async fn call(op: &Operation, args: &Value) -> Value {
    let fields = match build_fields(op, args) {
        Ok(fields) => fields,
        Err(message) => return error_result(errors::INVALID_INPUT, message, Some(op.name)),
    };

    let client = match ChatpptClient::from_env() {
        Ok(client) => client,
        Err(err) => return api_error_result(op.name, &err),
    };

    let outcome = match op.verb {
        Verb::Get => client.get(op.path, &fields, op.timeout()).await,
        Verb::Post => client.post_form(op.path, &fields, op.timeout()).await,
    };

    match outcome {
        Ok(body) => shape_result(op, body),
        Err(err) => {
            warn!(tool = op.name, error = %err, "remote call failed");
            api_error_result(op.name, &err)
        }
    }
}

/// Maps logical arguments onto wire fields per the operation's parameter
/// specs, applying defaults and vocabulary checks. Fails before any network
/// attempt.
fn build_fields(op: &Operation, args: &Value) -> Result<Vec<(String, String)>, String> {
    let Some(map) = args.as_object() else {
        return Err("arguments must be an object".to_string());
    };

    let mut fields: Vec<(String, String)> = Vec::new();
    for param in op.params {
        match (param.kind, map.get(param.name)) {
            (_, None) if param.required => {
                return Err(format!("{} is required", param.name));
            }
            (ParamKind::List(vocab), None) => {
                // absent list means no preference: send the full vocabulary
                for entry in vocab {
                    fields.push((param.field.to_string(), (*entry).to_string()));
                }
            }
            (_, None) => {
                if let Some(default) = param.default {
                    fields.push((param.field.to_string(), default.to_string()));
                }
            }
            (ParamKind::Text, Some(value)) => {
                let text = require_string(param.name, value)?;
                fields.push((param.field.to_string(), text.to_string()));
            }
            (ParamKind::ThemeColor, Some(value)) => {
                let text = require_string(param.name, value)?;
                if !theme_color_ok(text) {
                    return Err(format!(
                        "{} must be a named color ({}) or a literal #hex/rgb value",
                        param.name,
                        catalog::COLORS.join(", ")
                    ));
                }
                fields.push((param.field.to_string(), text.to_string()));
            }
            (ParamKind::Choice(vocab), Some(value)) => {
                let text = require_string(param.name, value)?;
                if !vocab.contains(&text) {
                    return Err(format!(
                        "{} must be one of: {}",
                        param.name,
                        vocab.join(", ")
                    ));
                }
                fields.push((param.field.to_string(), text.to_string()));
            }
            (ParamKind::List(vocab), Some(value)) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| format!("{} must be an array of strings", param.name))?;
                for item in items {
                    let text = require_string(param.name, item)?;
                    if !vocab.contains(&text) {
                        return Err(format!(
                            "{} entries must be one of: {}",
                            param.name,
                            vocab.join(", ")
                        ));
                    }
                    fields.push((param.field.to_string(), text.to_string()));
                }
            }
            (ParamKind::Integer, Some(value)) => {
                let number = value
                    .as_u64()
                    .filter(|number| *number > 0)
                    .ok_or_else(|| format!("{} must be a positive integer", param.name))?;
                fields.push((param.field.to_string(), number.to_string()));
            }
        }
    }

    for (field, value) in op.fixed {
        fields.push(((*field).to_string(), (*value).to_string()));
    }
    Ok(fields)
}

fn require_string<'a>(name: &str, value: &'a Value) -> Result<&'a str, String> {
    value
        .as_str()
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| format!("{name} must be a non-empty string"))
}

fn theme_color_ok(value: &str) -> bool {
    if catalog::COLORS.contains(&value) {
        return true;
    }
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 6) && hex.bytes().all(|byte| byte.is_ascii_hexdigit());
    }
    let lower = value.to_ascii_lowercase();
    if let Some(inner) = lower
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let mut channels = 0;
        for part in inner.split(',') {
            if part.trim().parse::<u8>().is_err() {
                return false;
            }
            channels += 1;
        }
        return channels == 3;
    }
    false
}

fn shape_result(op: &Operation, body: Value) -> Value {
    match op.semantics {
        Semantics::Task => match extract_task_id(&body) {
            Some(task_id) => json!({
                "content": [{"type": "text", "text": format!("PPT-ID: {task_id}")}],
                "structuredContent": {"task_id": task_id, "response": body},
                "isError": false
            }),
            None => api_error_result(
                op.name,
                &ApiError::Format("response carries no task id under data.id".to_string()),
            ),
        },
        Semantics::Status => match TaskSnapshot::from_body(&body) {
            Ok(snapshot) => status_result(&snapshot, body),
            Err(err) => api_error_result(op.name, &err),
        },
        Semantics::Body => {
            let text = body.to_string();
            json!({
                "content": [{"type": "text", "text": text}],
                "structuredContent": {"response": body},
                "isError": false
            })
        }
    }
}

fn status_result(snapshot: &TaskSnapshot, body: Value) -> Value {
    let text = match snapshot.state {
        TaskState::Running => match &snapshot.preview_url {
            Some(url) => format!("task is still running; partial preview: {url}"),
            None => "task is still running; poll query_ppt again".to_string(),
        },
        TaskState::Succeeded => match &snapshot.preview_url {
            Some(url) => format!("task succeeded; preview: {url}"),
            None => "task succeeded".to_string(),
        },
        TaskState::Failed => match &snapshot.detail {
            Some(detail) => format!("task failed: {detail}"),
            None => "task failed".to_string(),
        },
    };

    let mut structured = Map::new();
    structured.insert("status".to_string(), json!(snapshot.state.as_str()));
    structured.insert("terminal".to_string(), json!(snapshot.state.is_terminal()));
    if let Some(task_id) = &snapshot.task_id {
        structured.insert("task_id".to_string(), json!(task_id));
    }
    if let Some(preview_url) = &snapshot.preview_url {
        structured.insert("preview_url".to_string(), json!(preview_url));
    }
    if let Some(detail) = &snapshot.detail {
        structured.insert("detail".to_string(), json!(detail));
    }
    structured.insert("response".to_string(), body);

    json!({
        "content": [{"type": "text", "text": text}],
        "structuredContent": Value::Object(structured),
        "isError": false
    })
}

fn extract_task_id(body: &Value) -> Option<String> {
    body.get("data")
        .and_then(|data| data.get("id"))
        .or_else(|| body.get("id"))
        .and_then(|id| match id {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        })
}

pub fn error_result(
    kind: &'static str,
    message: impl Into<String>,
    source: Option<&str>,
) -> Value {
    let message = message.into();
    let mut error = json!({
        "kind": kind,
        "message": message,
    });

    if let Some(source) = source
        && let Some(obj) = error.as_object_mut()
    {
        obj.insert("source".to_string(), json!(source));
    }

    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "structuredContent": {"error": error},
        "isError": true
    })
}

/// One classified error per failure; the original cause stays in the message
/// and the machine-readable detail (status code, anomalous task status) in
/// dedicated fields.
fn api_error_result(source: &str, err: &ApiError) -> Value {
    let kind = match err {
        ApiError::Configuration(_) => errors::CONFIGURATION,
        ApiError::Transport(_) => errors::TRANSPORT,
        ApiError::Status { .. } => errors::REMOTE_STATUS,
        ApiError::Format(_) => errors::RESPONSE_FORMAT,
        ApiError::UnexpectedTaskState { .. } => errors::UNEXPECTED_TASK_STATE,
    };
    let message = err.to_string();

    let mut error = Map::new();
    error.insert("kind".to_string(), json!(kind));
    error.insert("message".to_string(), json!(message));
    error.insert("source".to_string(), json!(source));
    match err {
        ApiError::Status { code } => {
            error.insert("status_code".to_string(), json!(code));
        }
        ApiError::UnexpectedTaskState { status } => {
            error.insert("status".to_string(), json!(status));
        }
        _ => {}
    }

    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "structuredContent": {"error": Value::Object(error)},
        "isError": true
    })
}
