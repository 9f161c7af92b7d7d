use std::sync::Arc;

use crate::state::AppState;

/// Shared context handed to every endpoint via axum state.
#[derive(Clone)]
pub struct ApiContext {
    pub state: Arc<AppState>,
}

impl ApiContext {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}
