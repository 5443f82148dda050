use chrono::NaiveDate;
use hangman_types::{GameId, Score, UserId};
use uuid::Uuid;

/// Facts captured at the moment a game reaches a terminal state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Termination {
    pub won: bool,
    pub mistakes_remaining: i32,
    pub phrase_length: i32,
}

impl Termination {
    /// Build the ledger entry for this termination
    pub fn into_score(self, user_id: UserId, game_id: GameId, date: NaiveDate) -> Score {
        Score {
            id: Uuid::new_v4(),
            user_id,
            game_id,
            date: date.format("%Y-%m-%d").to_string(),
            won: self.won,
            mistakes_remaining: self.mistakes_remaining,
            phrase_length: self.phrase_length,
        }
    }
}
