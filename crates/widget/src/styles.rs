use crate::config::DEFAULT_THEME_COLOR;

pub const CONTAINER_ID: &str = "omni-widget-container";
pub const LAUNCHER_ID: &str = "omni-chat-btn";
pub const WINDOW_ID: &str = "omni-chat-window";
pub const HEADER_ID: &str = "omni-header";
pub const CLOSE_ID: &str = "omni-close";
pub const MESSAGES_ID: &str = "omni-messages";
pub const INPUT_AREA_ID: &str = "omni-input-area";
pub const INPUT_ID: &str = "omni-input";
pub const SEND_ID: &str = "omni-send";
pub const MESSAGE_CLASS: &str = "omni-msg";
pub const PLACEHOLDER_CLASS: &str = "omni-pending";

/// Builds the widget stylesheet for a theme color.
///
/// The color lands inside CSS declarations, so anything that could close a
/// declaration or block falls back to the default brand color.
pub fn stylesheet(theme_color: &str) -> String {
    let theme = sanitize_color(theme_color);
    format!(
        r#"
#{CONTAINER_ID} {{
    position: fixed; bottom: 20px; right: 20px; z-index: 999999;
    font-family: 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;
}}
#{LAUNCHER_ID} {{
    background: {theme}; color: white; border: none; padding: 15px; border-radius: 50%;
    cursor: pointer; box-shadow: 0 4px 12px rgba(0,0,0,0.4); width: 60px; height: 60px; font-size: 24px;
    display: flex; align-items: center; justify-content: center; transition: transform 0.2s;
}}
#{LAUNCHER_ID}:hover {{ transform: scale(1.1); }}
#{WINDOW_ID} {{
    display: none; width: 350px; height: 500px; background: white; border-radius: 12px;
    box-shadow: 0 10px 30px rgba(0,0,0,0.5); flex-direction: column; overflow: hidden;
    margin-bottom: 15px; border: 1px solid #ddd;
}}
#{HEADER_ID} {{
    background: {theme}; color: white; padding: 15px; font-weight: 600; display: flex;
    justify-content: space-between; align-items: center;
}}
#{CLOSE_ID} {{ cursor: pointer; font-size: 22px; line-height: 20px; }}
#{MESSAGES_ID} {{
    flex: 1; padding: 15px; overflow-y: auto; background: #f9f9f9; display: flex; flex-direction: column;
}}
#{INPUT_AREA_ID} {{ display: flex; border-top: 1px solid #ddd; background: white; }}
#{INPUT_ID} {{ flex: 1; padding: 12px; border: none; outline: none; font-size: 14px; }}
#{INPUT_ID}:disabled {{ background: #f3f3f3; }}
#{SEND_ID} {{
    background: transparent; border: none; color: {theme}; font-weight: bold; cursor: pointer;
    padding: 0 15px; font-size: 20px;
}}
#{SEND_ID}:disabled {{ opacity: 0.4; cursor: not-allowed; }}
.{MESSAGE_CLASS} {{
    margin: 8px 0; padding: 10px 14px; border-radius: 15px; max-width: 85%; font-size: 14px;
    word-wrap: break-word; white-space: pre-wrap;
}}
.{MESSAGE_CLASS}.user {{
    background: {theme}; color: white; align-self: flex-end; border-bottom-right-radius: 2px;
}}
.{MESSAGE_CLASS}.bot {{
    background: #eef2f7; color: #333; align-self: flex-start; border-bottom-left-radius: 2px;
    border: 1px solid #d1d9e6;
}}
.{MESSAGE_CLASS}.{PLACEHOLDER_CLASS} {{ color: #888; }}
"#
    )
}

fn sanitize_color(theme_color: &str) -> &str {
    let candidate = theme_color.trim();
    let unsafe_char = |ch: char| matches!(ch, ';' | '{' | '}' | '<' | '>' | '"' | '\'' | '\\');
    if candidate.is_empty() || candidate.contains(unsafe_char) {
        DEFAULT_THEME_COLOR
    } else {
        candidate
    }
}
