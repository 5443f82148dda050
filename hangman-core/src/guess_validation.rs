use crate::GameError;

/// Accept exactly one ASCII letter, returned as submitted (no case folding)
pub fn validate_guess(guess: &str) -> Result<char, GameError> {
    let mut chars = guess.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => Ok(letter),
        _ => Err(GameError::InvalidGuess {
            guess: guess.to_string(),
        }),
    }
}

pub fn validate_mistakes_allowed(value: i32) -> Result<i32, GameError> {
    if value < 1 {
        return Err(GameError::InvalidMistakesAllowed { value });
    }
    Ok(value)
}
