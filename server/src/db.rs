use futures::future::BoxFuture;
use uuid::Uuid;

use crate::errors::BackendError;
use crate::listing::{Listing, ListingUpdate, NewListing};

pub mod memory;

pub trait Db {
    /// Removes the listing. Resolves to false if the ID is unknown.
    fn delete(&self, id: &Uuid) -> BoxFuture<Result<bool, BackendError>>;

    /// Persists a validated submission, assigning its ID and timestamps.
    fn insert(&self, listing: NewListing) -> BoxFuture<Result<Listing, BackendError>>;

    /// Produces all listings, most recently created first.
    fn list(&self) -> BoxFuture<Result<Vec<Listing>, BackendError>>;

    fn retrieve(&self, id: &Uuid) -> BoxFuture<Result<Option<Listing>, BackendError>>;

    /// Applies only the provided fields and refreshes `updated_at`.
    /// Resolves to `None` if the ID is unknown.
    fn update(
        &self,
        id: &Uuid,
        fields: ListingUpdate,
    ) -> BoxFuture<Result<Option<Listing>, BackendError>>;
}

pub use self::postgres::*;

mod postgres {
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use sqlx::postgres::PgPool;
    use uuid::Uuid;

    use crate::errors::BackendError;
    use crate::listing::{Listing, ListingUpdate, NewListing};

    pub struct PgDb {
        pool: PgPool,
    }

    impl PgDb {
        pub fn new(pool: PgPool) -> Self {
            PgDb { pool }
        }
    }

    // these can be simplified once async functions in traits are stabilized
    impl super::Db for PgDb {
        fn delete(&self, id: &Uuid) -> BoxFuture<Result<bool, BackendError>> {
            let id = *id;

            async move {
                let done = sqlx::query(include_str!("queries/delete.sql"))
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(done.rows_affected() > 0)
            }
            .boxed()
        }

        fn insert(&self, listing: NewListing) -> BoxFuture<Result<Listing, BackendError>> {
            async move {
                let query = sqlx::query_as::<_, Listing>(include_str!("queries/create.sql"));

                let created = query
                    .bind(listing.company_name)
                    .bind(listing.position)
                    .bind(listing.duration)
                    .bind(listing.stipend)
                    .bind(listing.location)
                    .bind(listing.description)
                    .bind(listing.requirements)
                    .bind(listing.application_deadline)
                    .bind(listing.start_date)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(created)
            }
            .boxed()
        }

        fn list(&self) -> BoxFuture<Result<Vec<Listing>, BackendError>> {
            async move {
                let query = sqlx::query_as::<_, Listing>(include_str!("queries/list.sql"));

                let results = query
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(results)
            }
            .boxed()
        }

        fn retrieve(&self, id: &Uuid) -> BoxFuture<Result<Option<Listing>, BackendError>> {
            let id = *id;

            async move {
                let query = sqlx::query_as::<_, Listing>(include_str!("queries/retrieve.sql"));

                let result = query
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(result)
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
                let query = sqlx::query_as::<_, Listing>(include_str!("queries/update.sql"));

                let result = query
                    .bind(id)
                    .bind(fields.company_name)
                    .bind(fields.position)
                    .bind(fields.duration)
                    .bind(fields.stipend)
                    .bind(fields.location)
                    .bind(fields.description)
                    .bind(fields.requirements)
                    .bind(fields.application_deadline)
                    .bind(fields.start_date)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(result)
            }
            .boxed()
        }
    }

    fn map_sqlx_error(error: sqlx::Error) -> BackendError {
        BackendError::Sqlx { source: error }
    }
}
