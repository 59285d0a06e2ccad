use url::Url;
use uuid::Uuid;

/// Convenience wrapper for URL generation functions.
#[derive(Clone)]
pub struct Urls {
    /// Top-level URL, including trailing slash.
    base: Url,

    /// Path segment for all listing-related actions, mounted under `/api`.
    pub(crate) listings_path: String,

    /// Prefix for all listing-related actions.
    listings_prefix: String,
}

impl Urls {
    /// Create a new instance. `listings_path` should *not* include a
    /// trailing slash.
    pub fn new(base: impl AsRef<str>, listings_path: impl Into<String>) -> Self {
        let base =
            Url::parse(base.as_ref()).unwrap_or_else(|_| panic!("parse {} as URL", base.as_ref()));
        let listings_path = listings_path.into();
        let listings_prefix = format!("api/{}/", listings_path);

        Urls {
            base,
            listings_path,
            listings_prefix,
        }
    }

    pub fn listings(&self) -> Url {
        self.base
            .join(&self.listings_prefix)
            .expect("get listings URL")
    }

    pub fn listing(&self, id: &Uuid) -> Url {
        let id = format!("{}", id);
        self.listings()
            .join(&id)
            .unwrap_or_else(|_| panic!("get URL for listing {}", id))
    }
}
