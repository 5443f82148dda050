use hangman_types::{GameId, GameState, GameStatus, PLACEHOLDER, Phrase, UserId};

use crate::{GameError, Termination, validate_guess, validate_mistakes_allowed};

pub const NEW_GAME_MESSAGE: &str = "Good luck playing Hangman!";
pub const GAME_STATE_MESSAGE: &str = "Time to make a move!";

/// What a single guess did to the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    AlreadyOver,
    AlreadyGuessed(char),
    Miss(char),
    Hit(char),
    Finished(Termination),
}

impl GuessOutcome {
    /// True when the guess changed the game and it has to be persisted
    pub fn is_mutation(&self) -> bool {
        !matches!(self, GuessOutcome::AlreadyOver | GuessOutcome::AlreadyGuessed(_))
    }

    pub fn termination(&self) -> Option<&Termination> {
        match self {
            GuessOutcome::Finished(termination) => Some(termination),
            _ => None,
        }
    }

    pub fn message(&self, phrase: &str) -> String {
        match self {
            GuessOutcome::AlreadyOver => "Game already over!".to_string(),
            GuessOutcome::AlreadyGuessed(letter) => {
                format!("You have already guessed this letter: {}", letter)
            }
            GuessOutcome::Miss(letter) => {
                format!("Nope, this letter is not in the word: {}", letter)
            }
            GuessOutcome::Hit(letter) => format!("Yes, \"{}\" was a letter in the word.", letter),
            GuessOutcome::Finished(termination) if termination.won => {
                format!("Congratulations, you win! You guessed the word: {}", phrase)
            }
            GuessOutcome::Finished(_) => {
                format!("Nope, you lose! The correct word was: {}", phrase)
            }
        }
    }
}

/// A game together with its target phrase.
///
/// `state` is what gets stored and shown (through `GameView`); the phrase
/// text stays on the server.
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    phrase: String, // Hidden from clients
}

impl Game {
    pub fn new(
        id: GameId,
        user_id: UserId,
        phrase: &Phrase,
        mistakes_allowed: i32,
    ) -> Result<Self, GameError> {
        let mistakes_allowed = validate_mistakes_allowed(mistakes_allowed)?;
        if phrase.is_empty() {
            return Err(GameError::EmptyPhrase);
        }

        // Every position starts hidden, spaces included
        let visible_so_far = PLACEHOLDER.to_string().repeat(phrase.len());

        let state = GameState {
            id,
            user_id,
            phrase_id: phrase.id,
            visible_so_far,
            letters_guessed: String::new(),
            mistakes_allowed,
            mistakes_remaining: mistakes_allowed,
            game_over: false,
            version: 0,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        Ok(Self {
            state,
            phrase: phrase.text.clone(),
        })
    }

    /// Rebuild a game from stored state and the text of its phrase
    pub fn restore(state: GameState, phrase: impl Into<String>) -> Self {
        Self {
            state,
            phrase: phrase.into(),
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    /// Apply one guess. Matching is exact: `'C'` does not reveal `'c'`.
    pub fn apply_guess(&mut self, guess: &str) -> Result<GuessOutcome, GameError> {
        let letter = validate_guess(guess)?;

        if self.state.game_over {
            return Ok(GuessOutcome::AlreadyOver);
        }

        if self.state.letters_guessed.contains(letter) {
            return Ok(GuessOutcome::AlreadyGuessed(letter));
        }

        self.state.letters_guessed.push(letter);

        if !self.phrase.contains(letter) {
            self.state.mistakes_remaining -= 1;
            if self.state.mistakes_remaining == 0 {
                return Ok(GuessOutcome::Finished(self.terminate(false)));
            }
            return Ok(GuessOutcome::Miss(letter));
        }

        self.state.visible_so_far = self
            .phrase
            .chars()
            .zip(self.state.visible_so_far.chars())
            .map(|(target, shown)| if target == letter { target } else { shown })
            .collect();

        if self.state.visible_so_far == self.phrase {
            return Ok(GuessOutcome::Finished(self.terminate(true)));
        }

        Ok(GuessOutcome::Hit(letter))
    }

    fn terminate(&mut self, won: bool) -> Termination {
        self.state.game_over = true;
        Termination {
            won,
            mistakes_remaining: self.state.mistakes_remaining,
            phrase_length: self.phrase.chars().count() as i32,
        }
    }
}
