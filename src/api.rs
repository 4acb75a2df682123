//! HTTP API for the USSD gateway callback

mod extract;
mod handlers;

pub use extract::UssdForm;
pub use handlers::create_router;

use crate::dialog::DialogEngine;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DialogEngine>,
}

impl AppState {
    pub fn new(engine: DialogEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
