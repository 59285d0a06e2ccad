use serde::Serialize;
use warp::reject;

use crate::errors::BackendError;

/// A failed operation and the error it failed with.
#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: BackendError,
}

impl Rejection {
    pub fn new(context: Context, error: BackendError) -> Self {
        Rejection { context, error }
    }

    pub fn flatten(&self) -> FlattenedRejection {
        FlattenedRejection {
            message: format!("{}", self.error),
        }
    }
}

impl reject::Reject for Rejection {}

/// The client-facing shape of every error: a bare human-readable message.
#[derive(Debug, Serialize)]
pub struct FlattenedRejection {
    pub(crate) message: String,
}

/// The operation being attempted, for logging.
#[derive(Clone, Debug)]
pub enum Context {
    Create,
    Delete { id: String },
    List,
    Retrieve { id: String },
    Update { id: String },
}

impl Context {
    pub fn create() -> Context {
        Context::Create
    }

    pub fn delete(id: String) -> Context {
        Context::Delete { id }
    }

    pub fn list() -> Context {
        Context::List
    }

    pub fn retrieve(id: String) -> Context {
        Context::Retrieve { id }
    }

    pub fn update(id: String) -> Context {
        Context::Update { id }
    }
}
