pub const INVALID_INPUT: &str = "invalid_input";
pub const CONFIGURATION: &str = "configuration";
pub const TRANSPORT: &str = "transport";
pub const REMOTE_STATUS: &str = "remote_status";
pub const RESPONSE_FORMAT: &str = "response_format";
pub const UNEXPECTED_TASK_STATE: &str = "unexpected_task_state";
