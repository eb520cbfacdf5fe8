use std::sync::Arc;

use crate::store::DealStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DealStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DealStore>) -> Self {
        Self { store }
    }
}
