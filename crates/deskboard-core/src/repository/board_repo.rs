//! Board persistence under the board key

use super::traits::KeyValueStore;
use crate::config::SuiteConfig;
use crate::domain::{now, Board};
use crate::error::DomainResult;

/// Stored board, or the sample board when nothing usable is stored
pub fn load_board<S: KeyValueStore>(store: &S, config: &SuiteConfig) -> Board {
    let raw = match store.get(&config.board_key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::info!("[STORE] No saved board, using sample board");
            return Board::sample(now());
        }
        Err(e) => {
            log::warn!("[STORE] Could not read board: {}", e);
            return Board::sample(now());
        }
    };
    match serde_json::from_str::<Board>(&raw) {
        Ok(board) => {
            log::info!("[STORE] Loaded board {} ({} tasks)", board.id, board.tasks.len());
            board
        }
        Err(e) => {
            log::warn!("[STORE] Stored board is unreadable, using sample board: {}", e);
            Board::sample(now())
        }
    }
}

pub fn save_board<S: KeyValueStore>(store: &mut S, config: &SuiteConfig, board: &Board) -> DomainResult<()> {
    let json = serde_json::to_string(board)?;
    store.set(&config.board_key, &json)?;
    log::debug!("[STORE] Saved board {}", board.id);
    Ok(())
}
