use std::sync::Arc;

use log::{error, Logger};
use warp::http::StatusCode;
use warp::reject;
use warp::reply::{json, with_status, Json, WithStatus};

use crate::errors::BackendError;

pub mod admin;
mod handlers;
mod rejection;
mod response;

pub use internal::*;

/// The maximum request body size to accept. Listing submissions are small
/// JSON documents, so this is generous.
const MAX_CONTENT_LENGTH: u64 = 64 * 1024;

pub async fn format_rejection(
    logger: Arc<Logger>,
    rej: reject::Rejection,
) -> Result<WithStatus<Json>, reject::Rejection> {
    if let Some(r) = rej.find::<rejection::Rejection>() {
        let e = &r.error;
        error!(logger, "Backend error"; "context" => ?r.context, "error" => ?r.error, "status" => %status_code_for(e), "message" => %r.error);
        let flattened = r.flatten();

        return Ok(with_status(json(&flattened), status_code_for(e)));
    }

    Err(rej)
}

fn status_code_for(e: &BackendError) -> StatusCode {
    use BackendError::*;

    match e {
        MissingFields(..) | EmptyFields(..) | MalformedSubmission { .. } => StatusCode::BAD_REQUEST,
        NotFound { .. } | InvalidId(..) => StatusCode::NOT_FOUND,
        Sqlx { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

mod internal {
    use warp::filters::BoxedFilter;
    use warp::path::end;
    use warp::Filter;
    use warp::Reply;
    use warp::{body, delete, get as g, path as p, path::param as par, post, put};

    use super::{handlers, MAX_CONTENT_LENGTH};
    use crate::environment::Environment;

    type Route = BoxedFilter<(Box<dyn Reply>,)>;

    macro_rules! route_filter {
    ($route_variable:ident; $first:expr) => (let $route_variable = $route_variable.and($first););
    ($route_variable:ident; $first:expr, $($rest:expr),+) => (
        let $route_variable = $route_variable.and($first);
        route_filter!($route_variable; $($rest),+);
    )
}

    macro_rules! route {
    ($name:ident => $handler:ident, $route_variable:ident; $($filters:expr),+) => (
        pub fn $name(environment: Environment) -> Route {
            let r = environment.urls.listings_path.clone();

            let $route_variable = warp::any()
                .map(move || environment.clone())
                .and(p("api"))
                .and(p(r));

            route_filter!($route_variable; $($filters),+);

            $route_variable.and_then(handlers::$handler)
                .boxed()
        }
    );
}

    route!(make_list_route => list, rt; end(), g());
    route!(make_retrieve_route => retrieve, rt; par::<String>(), end(), g());
    route!(make_create_route => create, rt; end(), post(), body::content_length_limit(MAX_CONTENT_LENGTH), body::bytes());
    route!(make_update_route => update, rt; par::<String>(), end(), put(), body::content_length_limit(MAX_CONTENT_LENGTH), body::bytes());
    route!(make_delete_route => delete_listing, rt; par::<String>(), end(), delete());
}

#[cfg(test)]
mod tests {
    use warp::http::StatusCode;

    use super::status_code_for;
    use crate::errors::BackendError;

    #[test]
    fn errors_map_to_the_documented_status_codes() {
        assert_eq!(
            status_code_for(&BackendError::MissingFields(vec!["stipend".to_string()])),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_code_for(&BackendError::NotFound {
                id: "x".to_string()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_code_for(&BackendError::InvalidId("nope".to_string())),
            StatusCode::NOT_FOUND
        );
    }
}
