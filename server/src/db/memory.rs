use std::sync::RwLock;

use chrono::Utc;
use futures::future::BoxFuture;
use futures::FutureExt;
use uuid::Uuid;

use crate::db::Db;
use crate::errors::BackendError;
use crate::listing::{Listing, ListingUpdate, NewListing};

/// An in-memory `Db` for tests and local development. Listings are kept in
/// creation order, so `list` reverses to get newest-first even when two
/// creation timestamps collide.
#[derive(Default)]
pub struct MemoryDb {
    listings: RwLock<Vec<Listing>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Db for MemoryDb {
    fn delete(&self, id: &Uuid) -> BoxFuture<Result<bool, BackendError>> {
        let id = *id;

        async move {
            let mut listings = self.listings.write().unwrap();
            let before = listings.len();
            listings.retain(|listing| listing.id != id);

            Ok(listings.len() < before)
        }
        .boxed()
    }

    fn insert(&self, listing: NewListing) -> BoxFuture<Result<Listing, BackendError>> {
        async move {
            let now = Utc::now();
            let created = Listing {
                id: Uuid::new_v4(),
                company_name: listing.company_name,
                position: listing.position,
                duration: listing.duration,
                stipend: listing.stipend,
                location: listing.location,
                description: listing.description,
                requirements: listing.requirements,
                application_deadline: listing.application_deadline,
                start_date: listing.start_date,
                created_at: now,
                updated_at: now,
            };

            self.listings.write().unwrap().push(created.clone());

            Ok(created)
        }
        .boxed()
    }

    fn list(&self) -> BoxFuture<Result<Vec<Listing>, BackendError>> {
        async move {
            let listings = self.listings.read().unwrap();

            Ok(listings.iter().rev().cloned().collect())
        }
        .boxed()
    }

    fn retrieve(&self, id: &Uuid) -> BoxFuture<Result<Option<Listing>, BackendError>> {
        let id = *id;

        async move {
            let listings = self.listings.read().unwrap();

            Ok(listings.iter().find(|listing| listing.id == id).cloned())
        }
        .boxed()
    }

    fn update(
        &self,
        id: &Uuid,
        fields: ListingUpdate,
    ) -> BoxFuture<Result<Option<Listing>, BackendError>> {
        let id = *id;

        async move {
            let mut listings = self.listings.write().unwrap();

            Ok(listings.iter_mut().find(|listing| listing.id == id).map(
                |listing| {
                    fields.apply(listing, Utc::now());
                    listing.clone()
                },
            ))
        }
        .boxed()
    }
}
