//! Manifest loading: the article data model and the HTTP fetcher.
//!
//! A manifest is a JSON array of article records, produced by the static-site
//! build and served next to the article assets. It is fetched once at startup
//! and never mutated afterwards; everything else in the application derives
//! from it.

mod fetcher;
mod types;

pub use fetcher::{fetch_manifest, ManifestError, MAX_MANIFEST_SIZE};
pub use types::Article;
