use std::rc::Rc;

use snafu::{ResultExt, ensure};

use crate::config::{AuthMode, WidgetConfig};
use crate::diagnostics::Diagnostics;
use crate::error::{
    EncodeRequestSnafu, MalformedBodySnafu, TransportResult, UnexpectedStatusSnafu,
};
use crate::protocol::{ChatRequest, reply_text};
use crate::session::Session;
use crate::transport::{ChatTransport, TransportResponse};
use crate::turn::{AuthRejection, FALLBACK_REPLY, TurnOutcome};

/// Executes one request/response cycle against the chat endpoint.
pub struct ChatClient {
    endpoint: String,
    auth: AuthMode,
    session: Session,
    transport: Rc<dyn ChatTransport>,
    diagnostics: Rc<dyn Diagnostics>,
}

impl ChatClient {
    pub fn new(
        config: &WidgetConfig,
        session: Session,
        transport: Rc<dyn ChatTransport>,
        diagnostics: Rc<dyn Diagnostics>,
    ) -> Self {
        Self {
            endpoint: config.chat_endpoint(),
            auth: config.auth.clone(),
            session,
            transport,
            diagnostics,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `message` and classifies the result.
    ///
    /// Failures are reported to diagnostics once and collapse into
    /// `TransportFailed`; the cause never reaches the chat surface.
    pub async fn exchange(&self, message: &str) -> TurnOutcome {
        match self.try_exchange(message).await {
            Ok(outcome) => outcome,
            Err(error) => {
                self.diagnostics.transport_failed(self.session.id(), &error);
                TurnOutcome::TransportFailed
            }
        }
    }

    async fn try_exchange(&self, message: &str) -> TransportResult<TurnOutcome> {
        let body = serde_json::to_string(&ChatRequest {
            message,
            session_id: self.session.id().as_str(),
            credential: &self.auth,
        })
        .context(EncodeRequestSnafu {
            stage: "encode-chat-request",
        })?;

        tracing::debug!(
            session_id = %self.session.id(),
            endpoint = %self.endpoint,
            credential_field = self.auth.field_name(),
            "dispatching chat turn"
        );

        let response = self.transport.post_json(&self.endpoint, body).await?;
        classify(response)
    }
}

/// Maps a raw response onto a turn outcome.
///
/// 2xx with a JSON body is success even when no reply field is present;
/// 401 and 403 are security refusals; anything else is a transport failure.
pub fn classify(response: TransportResponse) -> TransportResult<TurnOutcome> {
    let TransportResponse { status, body } = response;

    if let Some(rejection) = AuthRejection::from_status(status) {
        tracing::warn!(status, ?rejection, "chat endpoint refused credentials");
        return Ok(TurnOutcome::AuthRejected(rejection));
    }

    ensure!(
        (200..300).contains(&status),
        UnexpectedStatusSnafu {
            stage: "classify-status",
            status,
        }
    );

    let payload: serde_json::Value = serde_json::from_str(&body).context(MalformedBodySnafu {
        stage: "decode-chat-response",
        status,
    })?;

    let reply = reply_text(&payload).unwrap_or(FALLBACK_REPLY).to_string();
    Ok(TurnOutcome::Fulfilled { reply })
}
