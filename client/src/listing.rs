use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A listing as the backend returns it.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: Uuid,
    pub company_name: String,
    pub position: String,
    pub duration: String,
    pub stipend: f64,
    pub location: String,
    pub description: String,
    pub requirements: String,
    pub application_deadline: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A complete creation-form submission. Dates are sent as the calendar dates
/// the user typed; the backend widens them to timestamps.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub company_name: String,
    pub position: String,
    pub duration: String,
    pub stipend: f64,
    pub location: String,
    pub description: String,
    pub requirements: String,
    pub application_deadline: String,
    pub start_date: String,
}

/// The changed fields of an edit-form submission. Absent fields keep their
/// stored values on the server.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stipend: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

impl ListingUpdate {
    /// True if no field was changed.
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.position.is_none()
            && self.duration.is_none()
            && self.stipend.is_none()
            && self.location.is_none()
            && self.description.is_none()
            && self.requirements.is_none()
            && self.application_deadline.is_none()
            && self.start_date.is_none()
    }
}
