use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Guess must be a single letter, got {guess:?}")]
    InvalidGuess { guess: String },
    #[error("Mistakes allowed must be at least 1, got {value}")]
    InvalidMistakesAllowed { value: i32 },
    #[error("Phrase must not be empty")]
    EmptyPhrase,
}
