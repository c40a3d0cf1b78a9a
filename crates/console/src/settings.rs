use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use omni_widget::AttributeSource;
use omni_widget::config::{
    API_KEY_ATTRIBUTE, API_URL_ATTRIBUTE, THEME_COLOR_ATTRIBUTE, USER_ID_ATTRIBUTE,
};
use serde::{Deserialize, Deserializer, Serialize};
use snafu::{ResultExt, Snafu};

pub const SETTINGS_DIRECTORY_NAME: &str = "omni-widget";
pub const SETTINGS_FILE_NAME: &str = "console.json";
pub const ENV_PREFIX: &str = "OMNI_WIDGET_";

/// Console stand-in for the embedding script's `data-*` attributes.
///
/// Nothing is validated here; the widget's configuration loader is the only
/// place that decides whether a mount can proceed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub api_url: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub api_key: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub theme_color: Option<String>,
}

/// Any scalar a provider may hand back for a `data-*` stand-in.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Flag(bool),
}

/// `Env` parses `OMNI_WIDGET_USER_ID=12345` as a number; attributes are always text.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Unsigned(number) => number.to_string(),
        Scalar::Signed(number) => number.to_string(),
        Scalar::Float(number) => number.to_string(),
        Scalar::Flag(flag) => flag.to_string(),
    }))
}

impl ConsoleSettings {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".omni-widget"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    /// Defaults, then the JSON file (if present), then `OMNI_WIDGET_*` variables.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::info!("settings file not found at {:?}, using environment only", path);
        }

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Json::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract::<Self>()
            .map_err(Box::new)
            .context(ExtractSnafu {
                stage: "extract-console-settings",
                path: path.to_path_buf(),
            })
    }
}

impl AttributeSource for ConsoleSettings {
    fn attribute(&self, name: &str) -> Option<String> {
        let value = match name {
            API_URL_ATTRIBUTE => &self.api_url,
            USER_ID_ATTRIBUTE => &self.user_id,
            API_KEY_ATTRIBUTE => &self.api_key,
            THEME_COLOR_ATTRIBUTE => &self.theme_color,
            _ => return None,
        };
        value.clone()
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SettingsError {
    #[snafu(display("failed to load console settings from {path:?} on `{stage}`: {source}"))]
    Extract {
        stage: &'static str,
        path: PathBuf,
        source: Box<figment::Error>,
    },
}
