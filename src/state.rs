use crate::store::DrinkStore;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppState {
    pub store: DrinkStore,
}

impl AppState {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            store: DrinkStore::new(data_path),
        }
    }
}
