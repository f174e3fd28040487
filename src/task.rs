//! Task lifecycle model for asynchronous generation jobs.
//!
//! Only the query tool interprets response content semantically: wire status
//! `1` means the task is still running (poll again), `2` succeeded, `3`
//! failed. Any other value is surfaced as `ApiError::UnexpectedTaskState` so
//! callers never poll forever on bad data. Polling cadence and retry budget
//! are the caller's policy; nothing here waits or retries.

use serde_json::Value;

use crate::client::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Running,
    Succeeded,
    Failed,
}

impl TaskState {
    pub fn from_code(code: i64) -> Result<Self, ApiError> {
        match code {
            1 => Ok(TaskState::Running),
            2 => Ok(TaskState::Succeeded),
            3 => Ok(TaskState::Failed),
            status => Err(ApiError::UnexpectedTaskState { status }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Running => "running",
            TaskState::Succeeded => "succeeded",
            TaskState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskState::Running)
    }
}

/// One parsed query response. The body itself is still passed through to the
/// caller unchanged; this is the interpreted slice of it.
#[derive(Debug, Clone)]
pub struct TaskSnapshot {
    pub state: TaskState,
    pub task_id: Option<String>,
    pub preview_url: Option<String>,
    pub detail: Option<String>,
}

impl TaskSnapshot {
    /// The status lives under `data.status`; some responses carry it at the
    /// top level. A body with no integer status is a format error.
    pub fn from_body(body: &Value) -> Result<Self, ApiError> {
        let data = body.get("data").unwrap_or(body);
        let code = data
            .get("status")
            .or_else(|| body.get("status"))
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                ApiError::Format("query response carries no integer status field".to_string())
            })?;
        let state = TaskState::from_code(code)?;

        Ok(Self {
            state,
            task_id: string_field(data, "id"),
            preview_url: string_field(data, "preview_url")
                .or_else(|| string_field(data, "process_url")),
            detail: string_field(data, "state_description").or_else(|| string_field(body, "msg")),
        })
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
