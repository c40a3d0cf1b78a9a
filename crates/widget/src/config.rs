use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use snafu::OptionExt;

use crate::error::{ConfigResult, MissingConfigurationSnafu};
use crate::protocol::CHAT_PATH;

pub const API_URL_ATTRIBUTE: &str = "data-api-url";
pub const USER_ID_ATTRIBUTE: &str = "data-user-id";
pub const API_KEY_ATTRIBUTE: &str = "data-api-key";
pub const THEME_COLOR_ATTRIBUTE: &str = "data-theme-color";
pub const DEFAULT_THEME_COLOR: &str = "#007bff";

/// Read-only view over the embedding element's attributes.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl AttributeSource for HashMap<&str, &str> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).map(|value| value.to_string())
    }
}

/// Credential attached to every chat request, selected once at load time.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub enum AuthMode {
    #[serde(rename = "user_id")]
    UserId(String),
    #[serde(rename = "api_key")]
    ApiKey(String),
}

impl AuthMode {
    pub fn credential(&self) -> &str {
        match self {
            Self::UserId(value) | Self::ApiKey(value) => value,
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::UserId(_) => "user_id",
            Self::ApiKey(_) => "api_key",
        }
    }
}

impl fmt::Debug for AuthMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Host pages log configs; keep the credential out of those lines.
        match self {
            Self::UserId(_) => formatter.write_str("UserId(<redacted>)"),
            Self::ApiKey(_) => formatter.write_str("ApiKey(<redacted>)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub endpoint_base_url: String,
    pub auth: AuthMode,
    pub theme_color: String,
}

impl WidgetConfig {
    /// Reads and validates the embedding attributes.
    ///
    /// Values are trimmed and empty values count as absent. The API key wins
    /// when a page sets both credential attributes.
    pub fn load(attributes: &dyn AttributeSource) -> ConfigResult<Self> {
        let api_key = non_empty_attribute(attributes, API_KEY_ATTRIBUTE);
        let user_id = non_empty_attribute(attributes, USER_ID_ATTRIBUTE);

        let auth = match (api_key, user_id) {
            (Some(api_key), Some(_)) => {
                tracing::warn!(
                    "both {} and {} are set; using the API key",
                    API_KEY_ATTRIBUTE,
                    USER_ID_ATTRIBUTE
                );
                AuthMode::ApiKey(api_key)
            }
            (Some(api_key), None) => AuthMode::ApiKey(api_key),
            (None, Some(user_id)) => AuthMode::UserId(user_id),
            (None, None) => {
                return MissingConfigurationSnafu {
                    stage: "load-credential",
                    attribute: USER_ID_ATTRIBUTE,
                }
                .fail();
            }
        };

        let endpoint_base_url = non_empty_attribute(attributes, API_URL_ATTRIBUTE)
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .context(MissingConfigurationSnafu {
                stage: "load-api-url",
                attribute: API_URL_ATTRIBUTE,
            })?;

        let theme_color = non_empty_attribute(attributes, THEME_COLOR_ATTRIBUTE)
            .unwrap_or_else(|| DEFAULT_THEME_COLOR.to_string());

        Ok(Self {
            endpoint_base_url,
            auth,
            theme_color,
        })
    }

    pub fn chat_endpoint(&self) -> String {
        format!("{}{CHAT_PATH}", self.endpoint_base_url)
    }
}

fn non_empty_attribute(attributes: &dyn AttributeSource, name: &str) -> Option<String> {
    attributes
        .attribute(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
