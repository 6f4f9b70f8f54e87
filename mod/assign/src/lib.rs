//! Assign module — task assignment with role-scoped field permissions.
//!
//! # Resources
//!
//! - **Task** — canonical record, created and deleted by admins
//! - **User** — holds an embedded snapshot of every task assigned to it
//!
//! Every task mutation is a paired write: the canonical record and the
//! assignee's embedded snapshot are updated together (see
//! `service::paired`). Deleting a user cascades to its tasks in a single
//! store transaction.
//!
//! # Usage
//!
//! ```ignore
//! use assign::AssignModule;
//!
//! let module = AssignModule::new(kv);
//! let router = module.routes(); // Mount under /assign
//! ```

pub mod api;
pub mod model;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::Router;

use taskboard_core::Module;
use taskboard_kv::KVStore;

use crate::service::AssignService;

/// Assign module implementing the Module trait.
pub struct AssignModule {
    service: Arc<AssignService>,
}

impl AssignModule {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            service: AssignService::new(kv),
        }
    }

    /// Get a reference to the underlying AssignService.
    pub fn service(&self) -> &Arc<AssignService> {
        &self.service
    }
}

impl Module for AssignModule {
    fn name(&self) -> &str {
        "assign"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
