use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{PhraseId, UserId};

pub type GameId = Uuid;

/// Character shown for positions that have not been revealed yet
pub const PLACEHOLDER: char = '?';

/// Mistakes a new game allows when the request does not say otherwise
pub const DEFAULT_MISTAKES_ALLOWED: i32 = 6;

/// Persistent state of a single hangman game.
///
/// The target phrase is referenced by id only; see [`GameView`] for the
/// client-facing projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameState {
    pub id: GameId,
    pub user_id: UserId,
    pub phrase_id: PhraseId,
    pub visible_so_far: String,
    pub letters_guessed: String,
    pub mistakes_allowed: i32,
    pub mistakes_remaining: i32,
    pub game_over: bool,
    pub version: i32,
    pub created_at: String, // ISO 8601 string
}

impl GameState {
    pub fn status(&self) -> GameStatus {
        if !self.game_over {
            GameStatus::InProgress
        } else if self.mistakes_remaining == 0 {
            // A hit never costs a mistake, so only a loss ends at zero
            GameStatus::Lost
        } else {
            GameStatus::Won
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Game state as returned to clients, never exposing the target phrase
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameView {
    pub id: GameId,
    pub user_name: String,
    pub visible_so_far: String,
    pub letters_guessed: String,
    pub mistakes_allowed: i32,
    pub mistakes_remaining: i32,
    pub game_over: bool,
    pub status: GameStatus,
    pub message: String,
}

impl GameView {
    pub fn new(state: &GameState, user_name: impl Into<String>, message: impl Into<String>) -> Self {
        GameView {
            id: state.id,
            user_name: user_name.into(),
            visible_so_far: state.visible_so_far.clone(),
            letters_guessed: state.letters_guessed.clone(),
            mistakes_allowed: state.mistakes_allowed,
            mistakes_remaining: state.mistakes_remaining,
            game_over: state.game_over,
            status: state.status(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(mistakes_remaining: i32, game_over: bool) -> GameState {
        GameState {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            phrase_id: Uuid::new_v4(),
            visible_so_far: "c?t".to_string(),
            letters_guessed: "ct".to_string(),
            mistakes_allowed: 6,
            mistakes_remaining,
            game_over,
            version: 2,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_status_derivation() {
        assert_eq!(state(3, false).status(), GameStatus::InProgress);
        assert_eq!(state(0, true).status(), GameStatus::Lost);
        assert_eq!(state(2, true).status(), GameStatus::Won);
        assert!(!GameStatus::InProgress.is_terminal());
        assert!(GameStatus::Lost.is_terminal());
    }

    #[test]
    fn test_game_view_hides_phrase() {
        let game = state(4, false);
        let view = GameView::new(&game, "alice", "Time to make a move!");

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("phrase_id").is_none());
        assert_eq!(json["visible_so_far"], "c?t");
        assert_eq!(json["user_name"], "alice");
        assert_eq!(json["status"], "InProgress");
    }
}
