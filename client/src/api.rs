use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::listing::{Listing, ListingUpdate, NewListing};

/// Enumerates errors surfaced by the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the request and said why.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The request never produced a usable response.
    #[error("request failed: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("could not parse {url} as a base URL")]
    BaseUrl { url: String, source: url::ParseError },
}

/// The error body shape used by the backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// A typed view of the listings HTTP contract. All state lives on the
/// server; this only holds the connection details.
pub struct ApiClient {
    listings: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: impl AsRef<str>) -> Result<Self, ApiError> {
        let base = base.as_ref();
        let listings = Url::parse(base)
            .and_then(|base| base.join("api/internships"))
            .map_err(|source| ApiError::BaseUrl {
                url: base.to_string(),
                source,
            })?;

        Ok(ApiClient {
            listings,
            http: reqwest::Client::new(),
        })
    }

    pub async fn list(&self) -> Result<Vec<Listing>, ApiError> {
        let response = self.http.get(self.listings.clone()).send().await?;

        read(response).await
    }

    pub async fn retrieve(&self, id: &Uuid) -> Result<Listing, ApiError> {
        let response = self.http.get(self.listing_url(id)).send().await?;

        read(response).await
    }

    pub async fn create(&self, listing: &NewListing) -> Result<Listing, ApiError> {
        let response = self
            .http
            .post(self.listings.clone())
            .json(listing)
            .send()
            .await?;

        read(response).await
    }

    pub async fn update(&self, id: &Uuid, fields: &ListingUpdate) -> Result<Listing, ApiError> {
        let response = self
            .http
            .put(self.listing_url(id))
            .json(fields)
            .send()
            .await?;

        read(response).await
    }

    /// Resolves to the backend's confirmation message.
    pub async fn delete(&self, id: &Uuid) -> Result<String, ApiError> {
        let response = self.http.delete(self.listing_url(id)).send().await?;
        let confirmation: Confirmation = read(response).await?;

        Ok(confirmation.message)
    }

    fn listing_url(&self, id: &Uuid) -> Url {
        let mut url = self.listings.clone();
        url.path_segments_mut()
            .expect("listings URL has path segments")
            .push(&id.to_string());

        url
    }
}

#[derive(Debug, Deserialize)]
struct Confirmation {
    message: String,
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => format!("unexpected response ({})", status),
        };

        Err(ApiError::Api { status, message })
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;
    use uuid::Uuid;

    use super::{ApiClient, ApiError};
    use crate::listing::ListingUpdate;

    fn listing_body(id: &Uuid) -> serde_json::Value {
        json!({
            "id": id.to_string(),
            "companyName": "Acme",
            "position": "Backend Intern",
            "duration": "3 months",
            "stipend": 5000.0,
            "location": "Remote",
            "description": "Work on the API.",
            "requirements": "Rust",
            "applicationDeadline": "2024-05-01T00:00:00Z",
            "startDate": "2024-06-01T00:00:00Z",
            "createdAt": "2024-04-01T12:00:00Z",
            "updatedAt": "2024-04-01T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn fetches_the_listings_grid() {
        let server = MockServer::start_async().await;
        let id = Uuid::new_v4();

        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/internships");
                then.status(200).json_body(json!([listing_body(&id)]));
            })
            .await;

        let client = ApiClient::new(server.base_url()).expect("build client");
        let listings = client.list().await.expect("fetch listings");

        mock.assert_async().await;
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].company_name, "Acme");
        assert_eq!(listings[0].stipend, 5000.0);
    }

    #[tokio::test]
    async fn sends_only_the_changed_fields() {
        let server = MockServer::start_async().await;
        let id = Uuid::new_v4();

        let mut updated = listing_body(&id);
        updated["stipend"] = json!(6000.0);

        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path(format!("/api/internships/{}", id))
                    .json_body(json!({ "stipend": 6000.0 }));
                then.status(200).json_body(updated);
            })
            .await;

        let client = ApiClient::new(server.base_url()).expect("build client");
        let fields = ListingUpdate {
            stipend: Some(6000.0),
            ..ListingUpdate::default()
        };
        let listing = client.update(&id, &fields).await.expect("update listing");

        mock.assert_async().await;
        assert_eq!(listing.stipend, 6000.0);
        assert_eq!(listing.company_name, "Acme");
    }

    #[tokio::test]
    async fn surfaces_the_backend_message_on_failure() {
        let server = MockServer::start_async().await;
        let id = Uuid::new_v4();

        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/api/internships/{}", id));
                then.status(404)
                    .json_body(json!({ "message": "Internship not found" }));
            })
            .await;

        let client = ApiClient::new(server.base_url()).expect("build client");

        match client.retrieve(&id).await {
            Err(ApiError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Internship not found");
            }
            other => panic!("expected an API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn reports_the_deletion_confirmation() {
        let server = MockServer::start_async().await;
        let id = Uuid::new_v4();

        server
            .mock_async(|when, then| {
                when.method(DELETE).path(format!("/api/internships/{}", id));
                then.status(200)
                    .json_body(json!({ "message": "Internship deleted successfully" }));
            })
            .await;

        let client = ApiClient::new(server.base_url()).expect("build client");
        let message = client.delete(&id).await.expect("delete listing");

        assert_eq!(message, "Internship deleted successfully");
    }
}
