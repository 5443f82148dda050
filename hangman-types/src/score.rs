use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{GameId, UserId};

pub type ScoreId = Uuid;

/// Immutable outcome of a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Score {
    pub id: ScoreId,
    pub user_id: UserId,
    pub game_id: GameId,
    pub date: String, // YYYY-MM-DD
    pub won: bool,
    pub mistakes_remaining: i32,
    pub phrase_length: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreView {
    pub user_name: String,
    pub date: String,
    pub won: bool,
    pub mistakes_remaining: i32,
    pub phrase_length: i32,
}

impl ScoreView {
    pub fn new(score: &Score, user_name: impl Into<String>) -> Self {
        ScoreView {
            user_name: user_name.into(),
            date: score.date.clone(),
            won: score.won,
            mistakes_remaining: score.mistakes_remaining,
            phrase_length: score.phrase_length,
        }
    }
}
