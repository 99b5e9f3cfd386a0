//! Wire DTOs for the Orienta REST API.
//!
//! Response DTOs keep every field optional so that
//! a payload of the wrong shape becomes a `MalformedPayload` error from
//! `into_domain` instead of an opaque decoding failure.

use orienta_core::error::{OrientaError, Result};
use orienta_core::guide::{DayEntry, Guide, GuideStatus, validate_day_sequence};
use orienta_core::status::ApiStatus;
use orienta_core::user::{AuthSession, DEFAULT_SESSION_TTL_SECS, UserProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Success envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Returns `data`, treating its absence as a malformed payload.
    pub fn into_data(self, what: &str) -> Result<T> {
        self.data
            .ok_or_else(|| OrientaError::malformed(format!("{what} response has no data")))
    }
}

/// Error body returned with non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub code: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GuideInputsDto {
    pub topic: Option<String>,
}

/// A guide as the backend sends it.
#[derive(Debug, Default, Deserialize)]
pub struct GuideDto {
    pub id: Option<String>,
    pub title: Option<String>,
    pub topic: Option<String>,
    pub inputs: Option<GuideInputsDto>,
    pub status: Option<String>,
    pub created_at: Option<Value>,
    pub completed_at: Option<Value>,
    pub owner: Option<String>,
    pub daily_study: Option<Vec<DayEntry>>,
}

impl GuideDto {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| OrientaError::malformed(format!("guide has an unexpected shape: {e}")))
    }

    /// Validates the payload and converts it into a domain guide.
    ///
    /// `fallback_id` is used when the payload omits `id`, which the
    /// single-guide endpoint does.
    pub fn into_domain(self, fallback_id: Option<&str>) -> Result<Guide> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .or_else(|| fallback_id.map(str::to_string))
            .ok_or_else(|| OrientaError::malformed("guide has no id"))?;

        let title = self
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| OrientaError::malformed(format!("guide '{id}' has no title")))?;

        let raw_status = self
            .status
            .ok_or_else(|| OrientaError::malformed(format!("guide '{id}' has no status")))?;
        let status = GuideStatus::from_str(&raw_status).map_err(|_| {
            OrientaError::malformed(format!("guide '{id}' has unknown status '{raw_status}'"))
        })?;

        let topic = self
            .topic
            .or_else(|| self.inputs.and_then(|inputs| inputs.topic))
            .unwrap_or_default();

        let daily_study = self.daily_study.unwrap_or_default();
        validate_day_sequence(&daily_study).map_err(|e| match e {
            OrientaError::MalformedPayload(reason) => {
                OrientaError::malformed(format!("guide '{id}': {reason}"))
            }
            other => other,
        })?;

        Ok(Guide {
            id,
            title,
            topic,
            status,
            created_at: self.created_at.map(render_timestamp).unwrap_or_default(),
            completed_at: self.completed_at.and_then(|value| {
                if value.is_null() {
                    None
                } else {
                    Some(render_timestamp(value))
                }
            }),
            owner: self.owner,
            daily_study,
        })
    }
}

/// Timestamps arrive either as preformatted strings or as raw values.
fn render_timestamp(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Body of `PATCH /guides/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdateStudiesRequest<'a> {
    pub new_studies_list: &'a [DayEntry],
}

/// Body of `POST /validate/topic`.
#[derive(Debug, Serialize)]
pub struct TopicRequest<'a> {
    pub topic: &'a str,
}

/// Data of `POST /sessions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub session_cookie: Option<String>,
    pub session_expires_in: Option<u64>,
}

impl SessionDto {
    pub fn into_domain(self) -> Result<AuthSession> {
        let session_cookie = self
            .session_cookie
            .filter(|cookie| !cookie.is_empty())
            .ok_or_else(|| OrientaError::malformed("session response has no cookie"))?;

        Ok(AuthSession {
            user_id: self.user_id.unwrap_or_default(),
            username: self.username.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            session_cookie,
            expires_in_secs: self.session_expires_in.unwrap_or(DEFAULT_SESSION_TTL_SECS),
        })
    }
}

/// Data of `GET /user`.
#[derive(Debug, Deserialize)]
pub struct UserDto {
    pub username: Option<String>,
    pub email: Option<String>,
    pub uid: Option<String>,
    pub created_at: Option<Value>,
}

impl UserDto {
    pub fn into_domain(self) -> Result<UserProfile> {
        let username = self
            .username
            .ok_or_else(|| OrientaError::malformed("user response has no username"))?;
        Ok(UserProfile {
            username,
            email: self.email.unwrap_or_default(),
            uid: self.uid,
            created_at: self.created_at.map(render_timestamp),
        })
    }
}

/// Data of `GET /status`.
#[derive(Debug, Deserialize)]
pub struct StatusDto {
    pub status: String,
}

impl StatusDto {
    pub fn into_domain(self) -> ApiStatus {
        if self.status.eq_ignore_ascii_case("online") {
            ApiStatus::Online
        } else {
            ApiStatus::Offline
        }
    }
}
