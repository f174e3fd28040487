//! Static catalog of ChatPPT operations.
//!
//! Each tool is one row: HTTP verb, path, timeout, parameter schema (logical
//! name to wire field), fixed wire fields, and how the response is surfaced.
//! All mutations share `/mcp/ppt/ppt-create-task` and differ only in which
//! optional fields are populated; modelling them as rows of one table keeps
//! the remote contract uniform and makes adding an operation a data change.
//!
//! Tool and parameter names match the original ChatPPT server exactly; calling
//! agents depend on them.

use std::time::Duration;

use crate::mcp::contracts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

/// How a successful response body is surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semantics {
    /// A fresh task id is expected under `data.id`.
    Task,
    /// Poll response, classified through the task lifecycle model.
    Status,
    /// Passed through unchanged.
    Body,
}

#[derive(Debug, Clone, Copy)]
pub enum ParamKind {
    Text,
    /// Positive integer, form-encoded as a decimal string.
    Integer,
    /// Single value from a closed vocabulary.
    Choice(&'static [&'static str]),
    /// Values from a closed vocabulary, form-encoded as repeated fields.
    /// When absent the full vocabulary is sent.
    List(&'static [&'static str]),
    /// Named theme color or a literal `#hex` / `rgb(...)` value.
    ThemeColor,
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Logical name as exposed to the calling agent.
    pub name: &'static str,
    /// Field name on the wire.
    pub field: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<&'static str>,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub description: &'static str,
    pub verb: Verb,
    pub path: &'static str,
    pub timeout_secs: u64,
    pub params: &'static [ParamSpec],
    /// Fields always sent regardless of arguments (selects the mutation on
    /// the shared endpoint).
    pub fixed: &'static [(&'static str, &'static str)],
    pub semantics: Semantics,
}

impl Operation {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub const COLORS: &[&str] = &[
    "紫色", "红色", "橙色", "黄色", "绿色", "青色", "蓝色", "粉色", "灰色",
];
pub const STYLES: &[&str] = &["科技风", "商务风", "小清新", "极简风", "中国风", "可爱卡通"];
pub const SLIDE_TYPES: &[&str] = &["封面页", "目录页", "章节页", "内容页", "致谢页"];
pub const ANIM_FLAGS: &[&str] = &["0", "1"];

pub const DEFAULT_SLIDE_TYPE: &str = "内容页";
pub const DEFAULT_COVER_COUNT: &str = "4";

const MUTATE_PATH: &str = "/mcp/ppt/ppt-create-task";

// Read-style and creation calls; heavier server-side work gets 60s.
const TIMEOUT_CREATE: u64 = 30;
const TIMEOUT_HEAVY: u64 = 60;

const PARAM_PPT_ID: ParamSpec = ParamSpec {
    name: "ppt_id",
    field: "id",
    kind: ParamKind::Text,
    required: true,
    default: None,
    description: "PPT-ID of the task",
};

pub const OPERATIONS: &[Operation] = &[
    Operation {
        name: contracts::TOOL_QUERY,
        description: "Query progress of an asynchronous generation task by PPT-ID. \
            status=1 means still generating (poll again), status=2 succeeded, \
            status=3 failed; the preview URL accompanies progress. Poll until a \
            terminal state, then use download_ppt and editor_ppt.",
        verb: Verb::Get,
        path: "/mcp/ppt/ppt-result",
        timeout_secs: TIMEOUT_CREATE,
        params: &[PARAM_PPT_ID],
        fixed: &[],
        semantics: Semantics::Status,
    },
    Operation {
        name: contracts::TOOL_BUILD,
        description: "Generate a presentation from a described theme or markdown. \
            Returns a PPT-ID; poll query_ppt for progress and preview URL.",
        verb: Verb::Post,
        path: "/mcp/ppt/ppt-create",
        timeout_secs: TIMEOUT_CREATE,
        params: &[ParamSpec {
            name: "theme",
            field: "text",
            kind: ParamKind::Text,
            required: true,
            default: None,
            description: "Theme text or markdown describing the presentation",
        }],
        fixed: &[],
        semantics: Semantics::Task,
    },
    Operation {
        name: contracts::TOOL_TEXT_BUILD,
        description: "Generate a presentation from a long text (50+ characters). \
            Returns a PPT-ID; poll query_ppt for progress and preview URL.",
        verb: Verb::Post,
        path: "/mcp/ppt/ppt-create",
        timeout_secs: TIMEOUT_CREATE,
        params: &[ParamSpec {
            name: "text",
            field: "text",
            kind: ParamKind::Text,
            required: true,
            default: None,
            description: "Long source text or markdown (50+ characters)",
        }],
        fixed: &[],
        semantics: Semantics::Task,
    },
    Operation {
        name: contracts::TOOL_BUILD_BY_FILE,
        description: "Generate a presentation from an uploaded document file URL \
            (Markdown, Word, PDF, XMind, FreeMind, TXT). Returns a PPT-ID; poll \
            query_ppt for progress and preview URL.",
        verb: Verb::Post,
        path: "/mcp/ppt/ppt-create-file",
        timeout_secs: TIMEOUT_CREATE,
        params: &[ParamSpec {
            name: "file_url",
            field: "file_url",
            kind: ParamKind::Text,
            required: true,
            default: None,
            description: "URL of the source document file",
        }],
        fixed: &[],
        semantics: Semantics::Task,
    },
    Operation {
        name: contracts::TOOL_BUILD_THESIS,
        description: "Generate a thesis-defense presentation from a thesis file URL \
            (PDF or Word only). Returns a PPT-ID; poll query_ppt for progress and \
            preview URL.",
        verb: Verb::Post,
        path: "/mcp/ppt/ppt-create-thesis",
        timeout_secs: TIMEOUT_CREATE,
        params: &[ParamSpec {
            name: "file_url",
            field: "file_key",
            kind: ParamKind::Text,
            required: true,
            default: None,
            description: "URL of the thesis file (PDF or Word)",
        }],
        fixed: &[],
        semantics: Semantics::Task,
    },
    Operation {
        name: contracts::TOOL_DOWNLOAD,
        description: "Fetch the download address of a finished presentation. Only \
            available once generation has completed.",
        verb: Verb::Get,
        path: "/mcp/ppt/ppt-download",
        timeout_secs: TIMEOUT_HEAVY,
        params: &[PARAM_PPT_ID],
        fixed: &[],
        semantics: Semantics::Body,
    },
    Operation {
        name: contracts::TOOL_EDITOR,
        description: "Generate an online editor URL for a finished presentation, for \
            in-browser viewing and editing.",
        verb: Verb::Post,
        path: "/mcp/ppt/ppt-editor",
        timeout_secs: TIMEOUT_HEAVY,
        params: &[PARAM_PPT_ID],
        fixed: &[],
        semantics: Semantics::Body,
    },
    Operation {
        name: contracts::TOOL_REPLACE_TEMPLATE,
        description: "Replace the presentation template with a random one. Returns a \
            new PPT-ID; poll query_ppt for progress and preview URL.",
        verb: Verb::Post,
        path: MUTATE_PATH,
        timeout_secs: TIMEOUT_HEAVY,
        params: &[PARAM_PPT_ID],
        fixed: &[],
        semantics: Semantics::Task,
    },
    Operation {
        name: contracts::TOOL_SET_COLOR,
        description: "Set the presentation theme color. Accepts a named color \
            (紫色, 红色, 橙色, 黄色, 绿色, 青色, 蓝色, 粉色) or a literal #hex/RGB \
            value. Returns a new PPT-ID; poll query_ppt for progress.",
        verb: Verb::Post,
        path: MUTATE_PATH,
        timeout_secs: TIMEOUT_HEAVY,
        params: &[
            PARAM_PPT_ID,
            ParamSpec {
                name: "color",
                field: "color",
                kind: ParamKind::ThemeColor,
                required: true,
                default: None,
                description: "Named theme color or a literal #hex/RGB value",
            },
        ],
        fixed: &[],
        semantics: Semantics::Task,
    },
    Operation {
        name: contracts::TOOL_SET_FONT,
        description: "Set the presentation font by name (e.g. 黑体, 宋体, 仿宋, 幼圆, \
            楷体, 隶书). Returns a new PPT-ID; poll query_ppt for progress.",
        verb: Verb::Post,
        path: MUTATE_PATH,
        timeout_secs: TIMEOUT_HEAVY,
        params: &[
            PARAM_PPT_ID,
            ParamSpec {
                name: "font_name",
                field: "font_name",
                kind: ParamKind::Text,
                required: true,
                default: None,
                description: "Font name, e.g. 黑体, 宋体, 仿宋, 幼圆, 楷体, 隶书",
            },
        ],
        fixed: &[],
        semantics: Semantics::Task,
    },
    Operation {
        name: contracts::TOOL_SET_ANIM,
        description: "Enable or disable slide animations. \"1\" enables (default), \
            \"0\" disables. Returns a new PPT-ID; poll query_ppt for progress.",
        verb: Verb::Post,
        path: MUTATE_PATH,
        timeout_secs: TIMEOUT_HEAVY,
        params: &[
            PARAM_PPT_ID,
            ParamSpec {
                name: "set_anim",
                field: "transition",
                kind: ParamKind::Choice(ANIM_FLAGS),
                required: false,
                default: Some("1"),
                description: "\"1\" to enable animations, \"0\" to disable",
            },
        ],
        fixed: &[],
        semantics: Semantics::Task,
    },
    Operation {
        name: contracts::TOOL_CREATE_NOTE,
        description: "Generate full speaker notes for every slide of the \
            presentation. Returns a new PPT-ID; poll query_ppt for progress.",
        verb: Verb::Post,
        path: MUTATE_PATH,
        timeout_secs: TIMEOUT_HEAVY,
        params: &[PARAM_PPT_ID],
        fixed: &[("note", "1")],
        semantics: Semantics::Task,
    },
    Operation {
        name: contracts::TOOL_ADD_SLIDES,
        description: "Insert a new slide into a generated presentation. The page \
            type may be 封面页, 目录页, 章节页, 内容页 or 致谢页 (default 内容页). \
            Returns a new PPT-ID; poll query_ppt for progress.",
        verb: Verb::Post,
        path: "/mcp/ppt/ppt-page",
        timeout_secs: TIMEOUT_HEAVY,
        params: &[
            PARAM_PPT_ID,
            ParamSpec {
                name: "slide_text",
                field: "slide_text",
                kind: ParamKind::Text,
                required: true,
                default: None,
                description: "Theme text for the inserted slide",
            },
            ParamSpec {
                name: "slide_type",
                field: "slide_type",
                kind: ParamKind::Choice(SLIDE_TYPES),
                required: false,
                default: Some(DEFAULT_SLIDE_TYPE),
                description: "Page type: 封面页, 目录页, 章节页, 内容页 or 致谢页",
            },
        ],
        fixed: &[],
        semantics: Semantics::Task,
    },
    Operation {
        name: contracts::TOOL_OUTLINE,
        description: "Generate outline content from a theme text. The outline text \
            is returned directly; no task is created.",
        verb: Verb::Post,
        path: "/mcp/ppt/ppt-structure",
        timeout_secs: TIMEOUT_HEAVY,
        params: &[ParamSpec {
            name: "ppt_text",
            field: "text",
            kind: ParamKind::Text,
            required: true,
            default: None,
            description: "Theme text to outline",
        }],
        fixed: &[],
        semantics: Semantics::Body,
    },
    Operation {
        name: contracts::TOOL_COVER_IMAGE,
        description: "Render template cover candidates for a theme text and return \
            their cover ids and images. Colors and styles may be constrained; both \
            default to the full vocabulary, and the count defaults to 4. A cover id \
            feeds ppt_replace_user_select_template.",
        verb: Verb::Post,
        path: "/mcp/ppt/ppt-cover",
        timeout_secs: TIMEOUT_HEAVY,
        params: &[
            ParamSpec {
                name: "ppt_text",
                field: "title",
                kind: ParamKind::Text,
                required: true,
                default: None,
                description: "Theme text for the cover",
            },
            ParamSpec {
                name: "ppt_color",
                field: "color",
                kind: ParamKind::List(COLORS),
                required: false,
                default: None,
                description: "Template colors to bias selection; omit for all",
            },
            ParamSpec {
                name: "ppt_style",
                field: "style",
                kind: ParamKind::List(STYLES),
                required: false,
                default: None,
                description: "Template styles to bias selection; omit for all",
            },
            ParamSpec {
                name: "ppt_num",
                field: "count",
                kind: ParamKind::Integer,
                required: false,
                default: Some(DEFAULT_COVER_COUNT),
                description: "Number of cover candidates to render (default 4)",
            },
        ],
        fixed: &[],
        semantics: Semantics::Body,
    },
    Operation {
        name: contracts::TOOL_SELECT_TEMPLATE,
        description: "Replace the presentation template with a specific cover chosen \
            by cover id (from ppt_create_template_cover_image). Returns a new \
            PPT-ID; poll query_ppt for progress.",
        verb: Verb::Post,
        path: MUTATE_PATH,
        timeout_secs: TIMEOUT_HEAVY,
        params: &[
            PARAM_PPT_ID,
            ParamSpec {
                name: "cover_id",
                field: "cover_id",
                kind: ParamKind::Text,
                required: true,
                default: None,
                description: "Cover id of the chosen template",
            },
        ],
        fixed: &[],
        semantics: Semantics::Task,
    },
];

pub fn find(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}
