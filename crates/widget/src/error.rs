use snafu::Snafu;

/// Boxed cause reported by a transport implementation.
pub type TransportCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("widget configuration is missing required attribute '{attribute}'"))]
    MissingConfiguration {
        stage: &'static str,
        attribute: &'static str,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TransportError {
    #[snafu(display("failed to encode chat request on `{stage}`: {source}"))]
    EncodeRequest {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("request to {url} failed on `{stage}`: {source}"))]
    Network {
        stage: &'static str,
        url: String,
        source: TransportCause,
    },
    #[snafu(display("chat endpoint returned unexpected status {status}"))]
    UnexpectedStatus { stage: &'static str, status: u16 },
    #[snafu(display("chat endpoint returned a body that is not JSON (status {status}): {source}"))]
    MalformedBody {
        stage: &'static str,
        status: u16,
        source: serde_json::Error,
    },
}

pub type TransportResult<T> = Result<T, TransportError>;
