//! Tool names as exposed to the calling agent. These match the original
//! ChatPPT server and must not drift.

pub const TOOL_CHECK: &str = "check";
pub const TOOL_QUERY: &str = "query_ppt";
pub const TOOL_BUILD: &str = "build_ppt";
pub const TOOL_TEXT_BUILD: &str = "text_build_ppt";
pub const TOOL_BUILD_BY_FILE: &str = "build_ppt_by_file";
pub const TOOL_BUILD_THESIS: &str = "build_thesis_ppt";
pub const TOOL_DOWNLOAD: &str = "download_ppt";
pub const TOOL_EDITOR: &str = "editor_ppt";
pub const TOOL_REPLACE_TEMPLATE: &str = "ppt_replace_template";
pub const TOOL_SET_COLOR: &str = "ppt_set_color";
pub const TOOL_SET_FONT: &str = "ppt_set_font_name";
pub const TOOL_SET_ANIM: &str = "ppt_set_anim";
pub const TOOL_CREATE_NOTE: &str = "ppt_create_note";
pub const TOOL_ADD_SLIDES: &str = "ppt_add_slides";
pub const TOOL_OUTLINE: &str = "ppt_create_outline_text";
pub const TOOL_COVER_IMAGE: &str = "ppt_create_template_cover_image";
pub const TOOL_SELECT_TEMPLATE: &str = "ppt_replace_user_select_template";
