use std::time::{Duration, Instant};

use bytes::Bytes;
use log::debug;
use uuid::Uuid;
use warp::{
    http::StatusCode,
    reject,
    reply::{json, with_header, with_status, Reply},
};

use crate::environment::Environment;
use crate::errors::BackendError;
use crate::listing::{ListingSubmission, ListingUpdate};
use crate::routes::{
    rejection::{Context, Rejection},
    response::SuccessResponse,
};

const SERVER_TIMING_HEADER: &str = "server-timing";
type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

macro_rules! timed {
    ($($expression:stmt);+) => {
        let start = Instant::now();

        let result = { $($expression)+ };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    };
}

pub async fn list(environment: Environment) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| Rejection::new(Context::list(), e);

        debug!(environment.logger, "Listing internships...");
        let listings = environment.db.list().await.map_err(error_handler)?;

        json(&listings)
    }
}

pub async fn retrieve(environment: Environment, id: String) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| Rejection::new(Context::retrieve(id.clone()), e);

        let id = parse_id(&id).map_err(&error_handler)?;
        debug!(environment.logger, "Retrieving internship..."; "id" => format!("{}", &id));

        let option = environment.db.retrieve(&id).await.map_err(&error_handler)?;
        let listing = option.ok_or_else(|| error_handler(not_found(&id)))?;

        json(&listing)
    }
}

pub async fn create(environment: Environment, body: Bytes) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| Rejection::new(Context::create(), e);

        debug!(environment.logger, "Parsing submission...");
        let submission: ListingSubmission = parse_body(&body).map_err(&error_handler)?;

        let new_listing = submission.into_new_listing().map_err(&error_handler)?;

        debug!(environment.logger, "Creating internship...");
        let listing = environment
            .db
            .insert(new_listing)
            .await
            .map_err(&error_handler)?;

        with_header(
            with_status(json(&listing), StatusCode::CREATED),
            "location",
            environment.urls.listing(&listing.id).as_str(),
        )
    }
}

pub async fn update(environment: Environment, id: String, body: Bytes) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| Rejection::new(Context::update(id.clone()), e);

        let id = parse_id(&id).map_err(&error_handler)?;
        debug!(environment.logger, "Parsing update..."; "id" => format!("{}", &id));

        // fields absent from the body keep their stored values
        let fields: ListingUpdate = parse_body(&body).map_err(&error_handler)?;
        let fields = fields.validated().map_err(&error_handler)?;

        debug!(environment.logger, "Updating internship..."; "id" => format!("{}", &id));
        let option = environment
            .db
            .update(&id, fields)
            .await
            .map_err(&error_handler)?;
        let listing = option.ok_or_else(|| error_handler(not_found(&id)))?;

        json(&listing)
    }
}

pub async fn delete_listing(environment: Environment, id: String) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| Rejection::new(Context::delete(id.clone()), e);

        let id = parse_id(&id).map_err(&error_handler)?;
        debug!(environment.logger, "Deleting internship..."; "id" => format!("{}", &id));

        let deleted = environment.db.delete(&id).await.map_err(&error_handler)?;
        let response = if deleted {
            json(&SuccessResponse::Deleted {
                message: "Internship deleted successfully",
            })
        } else {
            return Err(error_handler(not_found(&id)).into());
        };

        response
    }
}

fn parse_body<'a, T: serde::Deserialize<'a>>(body: &'a Bytes) -> Result<T, BackendError> {
    serde_json::from_slice(body).map_err(|source| BackendError::MalformedSubmission { source })
}

fn parse_id(id: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(id).map_err(|_| BackendError::InvalidId(id.to_string()))
}

fn not_found(id: &Uuid) -> BackendError {
    BackendError::NotFound {
        id: id.to_string(),
    }
}

fn format_server_timing(elapsed: Duration) -> String {
    format!("handler;dur={}", elapsed.as_secs_f64() * 1000.0)
}
