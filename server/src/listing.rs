use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates;
use crate::errors::BackendError;
use crate::normalization;

/// A single internship listing in the database.
#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// The ID of the listing, assigned by the store.
    pub id: Uuid,

    pub company_name: String,

    pub position: String,

    /// Free-form duration, e.g. "3 months".
    pub duration: String,

    /// Monthly stipend.
    pub stipend: f64,

    pub location: String,

    pub description: String,

    pub requirements: String,

    pub application_deadline: DateTime<Utc>,

    pub start_date: DateTime<Utc>,

    /// The time it was created. Immutable.
    pub created_at: DateTime<Utc>,

    /// The time it was last modified. Refreshed on every update.
    pub updated_at: DateTime<Utc>,
}

/// A client submission to create a listing.
///
/// Every field is optional at the parsing layer so absent ones can be
/// reported by name in a single message; `into_new_listing` performs the
/// required-field check. Text fields are trimmed as they are deserialized,
/// so a whitespace-only value counts as absent.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSubmission {
    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub company_name: Option<String>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub position: Option<String>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub duration: Option<String>,

    pub stipend: Option<f64>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub requirements: Option<String>,

    #[serde(default, deserialize_with = "dates::deserialize_option")]
    pub application_deadline: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "dates::deserialize_option")]
    pub start_date: Option<DateTime<Utc>>,
}

impl ListingSubmission {
    /// Validates that all nine required fields are present and non-empty,
    /// producing the store-ready listing.
    pub fn into_new_listing(self) -> Result<NewListing, BackendError> {
        match self {
            ListingSubmission {
                company_name: Some(company_name),
                position: Some(position),
                duration: Some(duration),
                stipend: Some(stipend),
                location: Some(location),
                description: Some(description),
                requirements: Some(requirements),
                application_deadline: Some(application_deadline),
                start_date: Some(start_date),
            } if !company_name.is_empty()
                && !position.is_empty()
                && !duration.is_empty()
                && !location.is_empty()
                && !description.is_empty()
                && !requirements.is_empty() =>
            {
                Ok(NewListing {
                    company_name,
                    position,
                    duration,
                    stipend,
                    location,
                    description,
                    requirements,
                    application_deadline,
                    start_date,
                })
            }
            submission => Err(BackendError::MissingFields(submission.missing_fields())),
        }
    }

    /// Names (as they appear in request bodies) of required fields that are
    /// absent or blank.
    fn missing_fields(&self) -> Vec<String> {
        fn absent(value: &Option<String>) -> bool {
            value.as_deref().map_or(true, str::is_empty)
        }

        let mut fields = vec![];

        if absent(&self.company_name) {
            fields.push("companyName");
        }
        if absent(&self.position) {
            fields.push("position");
        }
        if absent(&self.duration) {
            fields.push("duration");
        }
        if self.stipend.is_none() {
            fields.push("stipend");
        }
        if absent(&self.location) {
            fields.push("location");
        }
        if absent(&self.description) {
            fields.push("description");
        }
        if absent(&self.requirements) {
            fields.push("requirements");
        }
        if self.application_deadline.is_none() {
            fields.push("applicationDeadline");
        }
        if self.start_date.is_none() {
            fields.push("startDate");
        }

        fields.into_iter().map(String::from).collect()
    }
}

/// A validated submission, ready for the store to assign an ID and
/// timestamps to.
#[derive(Clone, Debug)]
pub struct NewListing {
    pub(crate) company_name: String,
    pub(crate) position: String,
    pub(crate) duration: String,
    pub(crate) stipend: f64,
    pub(crate) location: String,
    pub(crate) description: String,
    pub(crate) requirements: String,
    pub(crate) application_deadline: DateTime<Utc>,
    pub(crate) start_date: DateTime<Utc>,
}

/// The fields of an update request. Absent fields keep their stored value;
/// this is deliberate PATCH behavior under PUT, and clients rely on it.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingUpdate {
    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub company_name: Option<String>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub position: Option<String>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub duration: Option<String>,

    pub stipend: Option<f64>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub requirements: Option<String>,

    #[serde(default, deserialize_with = "dates::deserialize_option")]
    pub application_deadline: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "dates::deserialize_option")]
    pub start_date: Option<DateTime<Utc>>,
}

impl ListingUpdate {
    /// Rejects updates that would blank out a required field.
    pub fn validated(self) -> Result<Self, BackendError> {
        let empty = self.empty_fields();

        if empty.is_empty() {
            Ok(self)
        } else {
            Err(BackendError::EmptyFields(empty))
        }
    }

    fn empty_fields(&self) -> Vec<String> {
        fn blank(value: &Option<String>) -> bool {
            value.as_deref().map_or(false, str::is_empty)
        }

        let mut fields = vec![];

        if blank(&self.company_name) {
            fields.push("companyName");
        }
        if blank(&self.position) {
            fields.push("position");
        }
        if blank(&self.duration) {
            fields.push("duration");
        }
        if blank(&self.location) {
            fields.push("location");
        }
        if blank(&self.description) {
            fields.push("description");
        }
        if blank(&self.requirements) {
            fields.push("requirements");
        }

        fields.into_iter().map(String::from).collect()
    }

    /// Applies the provided fields to `listing`, refreshing `updated_at`.
    /// Used by the in-memory store; the SQL store does the equivalent with
    /// `COALESCE`.
    pub(crate) fn apply(self, listing: &mut Listing, now: DateTime<Utc>) {
        let ListingUpdate {
            company_name,
            position,
            duration,
            stipend,
            location,
            description,
            requirements,
            application_deadline,
            start_date,
        } = self;

        if let Some(company_name) = company_name {
            listing.company_name = company_name;
        }
        if let Some(position) = position {
            listing.position = position;
        }
        if let Some(duration) = duration {
            listing.duration = duration;
        }
        if let Some(stipend) = stipend {
            listing.stipend = stipend;
        }
        if let Some(location) = location {
            listing.location = location;
        }
        if let Some(description) = description {
            listing.description = description;
        }
        if let Some(requirements) = requirements {
            listing.requirements = requirements;
        }
        if let Some(application_deadline) = application_deadline {
            listing.application_deadline = application_deadline;
        }
        if let Some(start_date) = start_date {
            listing.start_date = start_date;
        }

        listing.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::{Listing, ListingSubmission, ListingUpdate};
    use crate::errors::BackendError;

    fn submission() -> ListingSubmission {
        serde_json::from_value(serde_json::json!({
            "companyName": " Acme ",
            "position": "Backend Intern",
            "duration": "3 months",
            "stipend": 5000,
            "location": "Remote",
            "description": "Work on the API.",
            "requirements": "Rust",
            "applicationDeadline": "2024-05-01",
            "startDate": "2024-06-01"
        }))
        .expect("deserialize submission")
    }

    #[test]
    fn complete_submissions_validate() {
        let new_listing = submission().into_new_listing().expect("validate submission");

        assert_eq!(new_listing.company_name, "Acme");
        assert_eq!(new_listing.stipend, 5000.0);
        assert_eq!(
            new_listing.application_deadline,
            Utc.ymd(2024, 5, 1).and_hms(0, 0, 0)
        );
    }

    #[test]
    fn absent_and_blank_fields_are_reported_together() {
        let submission = ListingSubmission {
            company_name: Some("".to_string()),
            position: Some("Backend Intern".to_string()),
            ..ListingSubmission::default()
        };

        match submission.into_new_listing() {
            Err(BackendError::MissingFields(fields)) => assert_eq!(
                fields,
                vec![
                    "companyName",
                    "duration",
                    "stipend",
                    "location",
                    "description",
                    "requirements",
                    "applicationDeadline",
                    "startDate"
                ]
            ),
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn updates_keep_absent_fields() {
        let mut listing = listing();
        let created_at = listing.created_at;
        let now = created_at + Duration::seconds(5);

        let update: ListingUpdate =
            serde_json::from_value(serde_json::json!({ "stipend": 6000 }))
                .expect("deserialize update");

        update.apply(&mut listing, now);

        assert_eq!(listing.stipend, 6000.0);
        assert_eq!(listing.company_name, "Acme");
        assert_eq!(listing.created_at, created_at);
        assert_eq!(listing.updated_at, now);
    }

    #[test]
    fn blank_update_values_are_rejected() {
        let update: ListingUpdate =
            serde_json::from_value(serde_json::json!({ "companyName": "  ", "stipend": 6000 }))
                .expect("deserialize update");

        match update.validated() {
            Err(BackendError::EmptyFields(fields)) => assert_eq!(fields, vec!["companyName"]),
            other => panic!("expected EmptyFields, got {:?}", other),
        }
    }

    fn listing() -> Listing {
        let now = Utc.ymd(2024, 4, 1).and_hms(12, 0, 0);

        Listing {
            id: Uuid::new_v4(),
            company_name: "Acme".to_string(),
            position: "Backend Intern".to_string(),
            duration: "3 months".to_string(),
            stipend: 5000.0,
            location: "Remote".to_string(),
            description: "Work on the API.".to_string(),
            requirements: "Rust".to_string(),
            application_deadline: Utc.ymd(2024, 5, 1).and_hms(0, 0, 0),
            start_date: Utc.ymd(2024, 6, 1).and_hms(0, 0, 0),
            created_at: now,
            updated_at: now,
        }
    }
}
