//! Core data types for ridedesk

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use validator::Validate;

/// Request identifier type
pub type RequestId = String;

/// Lifecycle status of a ride request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Waiting for an operator decision
    #[default]
    Pending,
    /// Approved by an operator
    Approved,
    /// Rejected by an operator
    Rejected,
    /// Cancelled
    Cancelled,
    /// Any status the console does not recognize
    #[serde(other)]
    Unknown,
}

impl RequestStatus {
    /// Every status a filter can select
    pub const KNOWN: [Self; 4] = [Self::Pending, Self::Approved, Self::Rejected, Self::Cancelled];

    /// Wire key of the status
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

/// Status selection applied to the request list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// Every request
    #[default]
    All,
    /// Requests with exactly this status
    Only(RequestStatus),
    /// A key outside the recognized set; matches nothing
    Unrecognized,
}

impl StatusFilter {
    /// The five filters offered as status tabs, in display order
    pub const TABS: [Self; 5] = [
        Self::All,
        Self::Only(RequestStatus::Pending),
        Self::Only(RequestStatus::Approved),
        Self::Only(RequestStatus::Rejected),
        Self::Only(RequestStatus::Cancelled),
    ];

    /// Map a filter key to a filter, treating unknown keys as [`StatusFilter::Unrecognized`]
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or(Self::Unrecognized)
    }

    /// Whether a record with `status` passes this filter
    #[must_use]
    pub fn matches(self, status: RequestStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted != RequestStatus::Unknown && wanted == status,
            Self::Unrecognized => false,
        }
    }

    /// Filter key
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Only(status) => status.key(),
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// Human label used on status tabs
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(RequestStatus::Pending) => "Pending",
            Self::Only(RequestStatus::Approved) => "Approved",
            Self::Only(RequestStatus::Rejected) => "Rejected",
            Self::Only(RequestStatus::Cancelled) => "Cancelled",
            Self::Only(RequestStatus::Unknown) | Self::Unrecognized => "Other",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "PENDING" => Ok(Self::Only(RequestStatus::Pending)),
            "APPROVED" => Ok(Self::Only(RequestStatus::Approved)),
            "REJECTED" => Ok(Self::Only(RequestStatus::Rejected)),
            "CANCELLED" => Ok(Self::Only(RequestStatus::Cancelled)),
            other => Err(crate::Error::validation(
                "status",
                format!("unrecognized status '{other}'"),
            )),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

/// A ride request as held by the admin service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    /// Unique identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_id: RequestId,

    /// Name of the requesting user
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_name: String,

    /// Pickup location
    #[serde(default, deserialize_with = "null_as_default")]
    pub from_location: String,

    /// Drop-off location
    #[serde(default, deserialize_with = "null_as_default")]
    pub to_location: String,

    /// Description of the goods carried
    #[serde(default, deserialize_with = "null_as_default")]
    pub goods_description: String,

    /// Quoted fare
    #[serde(default, deserialize_with = "null_as_default")]
    pub fare: f64,

    /// Current status; `null` reads as [`RequestStatus::Unknown`]
    #[serde(default, deserialize_with = "deserialize_nullable_status")]
    pub status: RequestStatus,

    /// Operator comments or rejection reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    /// First goods photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goods_photo1_url: Option<String>,

    /// Second goods photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goods_photo2_url: Option<String>,

    /// Creation time
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RequestRecord {
    /// Comments, treating blank strings as absent
    #[must_use]
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Rewrite both photo URLs against the file-serving origin
    #[must_use]
    pub fn with_resolved_photos(mut self, file_base: &str) -> Self {
        self.goods_photo1_url =
            crate::utils::normalize_optional_photo_url(self.goods_photo1_url.as_deref(), file_base);
        self.goods_photo2_url =
            crate::utils::normalize_optional_photo_url(self.goods_photo2_url.as_deref(), file_base);
        self
    }
}

/// `null` reads as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_nullable_status<'de, D>(deserializer: D) -> Result<RequestStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RequestStatus>::deserialize(deserializer)?.unwrap_or(RequestStatus::Unknown))
}

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse RFC 3339, or a zone-less `YYYY-MM-DD[T ]HH:MM:SS[.f]` taken as UTC
#[must_use]
pub fn parse_lenient_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Timestamps are informational, so anything unreadable becomes `None`
fn deserialize_lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(text)) => {
            let parsed = parse_lenient_datetime(&text);
            if parsed.is_none() {
                warn!(value = %text, "ignoring unparseable timestamp");
            }
            Ok(parsed)
        }
        Some(other) => {
            warn!(value = %other, "ignoring non-string timestamp");
            Ok(None)
        }
    }
}

/// Payload for creating a new request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    /// Name of the requesting user
    #[validate(length(min = 1, message = "is required"))]
    pub user_name: String,

    /// Pickup location
    #[validate(length(min = 1, message = "is required"))]
    pub from_location: String,

    /// Drop-off location
    #[validate(length(min = 1, message = "is required"))]
    pub to_location: String,

    /// Description of the goods carried
    #[validate(length(min = 1, message = "is required"))]
    pub goods_description: String,

    /// Quoted fare
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub fare: f64,

    /// Free-text comments
    #[serde(default)]
    pub comments: String,

    /// First goods photo
    #[serde(default)]
    pub goods_photo1_url: String,

    /// Second goods photo
    #[serde(default)]
    pub goods_photo2_url: String,

    /// Initial status, always PENDING
    pub status: RequestStatus,
}

impl Default for NewRequest {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            from_location: String::new(),
            to_location: String::new(),
            goods_description: String::new(),
            fare: 0.0,
            comments: String::new(),
            goods_photo1_url: String::new(),
            goods_photo2_url: String::new(),
            status: RequestStatus::Pending,
        }
    }
}

impl NewRequest {
    /// Validate the draft and pin its status to PENDING
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn prepare(mut self) -> crate::Result<Self> {
        self.user_name = self.user_name.trim().to_string();
        self.from_location = self.from_location.trim().to_string();
        self.to_location = self.to_location.trim().to_string();
        self.goods_description = self.goods_description.trim().to_string();
        if !self.fare.is_finite() {
            return Err(crate::Error::validation("fare", "must be a number"));
        }
        self.validate()?;
        self.status = RequestStatus::Pending;
        Ok(self)
    }
}

/// Identity of the operator performing approve/reject actions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Operator {
    /// Operator identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact phone
    pub phone: String,
}

/// Body returned by approve/reject calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    /// Server message, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Status reported by the server, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestStatus>,

    /// Comments attached to the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    /// Remaining fields, kept for display
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Standard `{ "data": ... }` envelope used by the admin service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Payload
    pub data: T,

    /// Optional message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Paginated container returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}
