use std::sync::Arc;

use log::Logger;

use crate::db::Db;
use crate::urls::Urls;

/// The explicitly constructed context handed to every route. All state lives
/// here; there are no ambient singletons.
#[derive(Clone)]
pub struct Environment {
    pub logger: Arc<Logger>,
    pub db: Arc<dyn Db + Send + Sync>,
    pub urls: Arc<Urls>,
}

impl Environment {
    pub fn new(logger: Arc<Logger>, db: Arc<dyn Db + Send + Sync>, urls: Arc<Urls>) -> Self {
        Self { logger, db, urls }
    }
}
