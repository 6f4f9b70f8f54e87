pub mod paired;
pub mod policy;
pub mod task;
pub mod user;

use std::sync::Arc;

use taskboard_kv::KVStore;

use crate::store::AssignStore;

/// The assign service. Holds the typed store handle; every operation is
/// request-scoped and synchronous, so concurrent requests share nothing
/// but the store.
pub struct AssignService {
    pub(crate) store: AssignStore,
}

impl AssignService {
    pub fn new(kv: Arc<dyn KVStore>) -> Arc<Self> {
        Arc::new(Self {
            store: AssignStore::new(kv),
        })
    }
}
