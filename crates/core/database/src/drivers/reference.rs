use std::sync::Arc;

use futures::lock::Mutex;
use indexmap::IndexMap;

use crate::Report;

database_derived!(
    /// Reference implementation
    ///
    /// Reports are keyed by id; the map keeps insertion order so recency
    /// queries can break creation-time ties exactly.
    #[derive(Default)]
    pub struct ReferenceDb {
        pub reports: Arc<Mutex<IndexMap<String, Report>>>,
    }
);
