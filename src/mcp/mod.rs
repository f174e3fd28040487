use serde_json::{Map, Value, json};

use crate::catalog::{self, Operation, ParamKind, ParamSpec};

pub mod contracts;
pub mod errors;

/// Tool definitions for `tools/list`, derived from the operation catalog so
/// the advertised surface cannot drift from what dispatch accepts.
pub fn tool_definitions() -> Vec<Value> {
    let mut tools = vec![json!({
        "name": contracts::TOOL_CHECK,
        "description": "Report the currently configured ChatPPT API credential.",
        "inputSchema": {
            "type": "object",
            "properties": {},
            "additionalProperties": false
        }
    })];
    tools.extend(catalog::OPERATIONS.iter().map(tool_definition));
    tools
}

fn tool_definition(op: &Operation) -> Value {
    json!({
        "name": op.name,
        "description": op.description,
        "inputSchema": input_schema(op)
    })
}

fn input_schema(op: &Operation) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for param in op.params {
        properties.insert(param.name.to_string(), param_schema(param));
        if param.required {
            required.push(json!(param.name));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    schema.insert("additionalProperties".to_string(), json!(false));
    Value::Object(schema)
}

fn param_schema(param: &ParamSpec) -> Value {
    let mut schema = Map::new();
    match param.kind {
        ParamKind::Text | ParamKind::ThemeColor => {
            schema.insert("type".to_string(), json!("string"));
        }
        ParamKind::Integer => {
            schema.insert("type".to_string(), json!("integer"));
            schema.insert("minimum".to_string(), json!(1));
        }
        ParamKind::Choice(vocab) => {
            schema.insert("type".to_string(), json!("string"));
            schema.insert("enum".to_string(), json!(vocab));
        }
        ParamKind::List(vocab) => {
            schema.insert("type".to_string(), json!("array"));
            schema.insert(
                "items".to_string(),
                json!({"type": "string", "enum": vocab}),
            );
        }
    }
    schema.insert("description".to_string(), json!(param.description));
    if let Some(default) = param.default {
        match param.kind {
            ParamKind::Integer => {
                if let Ok(number) = default.parse::<u64>() {
                    schema.insert("default".to_string(), json!(number));
                }
            }
            _ => {
                schema.insert("default".to_string(), json!(default));
            }
        }
    }
    Value::Object(schema)
}
