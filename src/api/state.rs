use std::sync::Arc;

use crate::models::GameRecord;

/// Shared, read-only season snapshot.
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<Vec<GameRecord>>,
    pub season: i32,
}

impl AppState {
    pub fn new(games: Vec<GameRecord>, season: i32) -> Self {
        Self {
            games: Arc::new(games),
            season,
        }
    }
}
