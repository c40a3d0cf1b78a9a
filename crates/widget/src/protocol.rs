use serde::Serialize;
use serde_json::Value;

use crate::config::AuthMode;

pub const CHAT_PATH: &str = "/api/v1/chat";

/// Body of `POST {base}/api/v1/chat`.
///
/// The credential flattens to exactly one of `user_id` or `api_key`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub session_id: &'a str,
    #[serde(flatten)]
    pub credential: &'a AuthMode,
}

/// Picks the reply text out of a success body: `response`, then `message`.
///
/// Fields that are missing, empty or not strings fall through; a body with
/// neither yields `None`, which is a valid (if unhelpful) reply, not an error.
pub fn reply_text(body: &Value) -> Option<&str> {
    ["response", "message"].into_iter().find_map(|field| {
        body.get(field)
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
    })
}
