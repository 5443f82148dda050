#![allow(dead_code)]

use hangman_core::{Game, GameEvent, GameEventHandler, GuessOutcome};
use hangman_types::Phrase;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Creates a phrase with the default category
pub fn create_test_phrase(text: &str) -> Phrase {
    Phrase::new(Uuid::new_v4(), text)
}

/// Creates a game for a fresh user against the given phrase
pub fn create_game_with_phrase(text: &str, mistakes_allowed: i32) -> Game {
    let phrase = create_test_phrase(text);
    Game::new(Uuid::new_v4(), Uuid::new_v4(), &phrase, mistakes_allowed)
        .expect("test game should be valid")
}

/// Creates the standard "cat" game with six mistakes allowed
pub fn create_standard_game() -> Game {
    create_game_with_phrase("cat", 6)
}

/// Applies each letter in order and returns the outcomes
pub fn play(game: &mut Game, letters: &str) -> Vec<GuessOutcome> {
    letters
        .chars()
        .map(|letter| {
            game.apply_guess(&letter.to_string())
                .expect("test guesses should be valid letters")
        })
        .collect()
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&self, event: &GameEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
