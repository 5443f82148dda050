use hangman_types::{GameId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameCreated {
        game_id: GameId,
        user_id: UserId,
        mistakes_allowed: i32,
    },
    GuessApplied {
        game_id: GameId,
        letter: char,
        mistakes_remaining: i32,
    },
    GameEnded {
        game_id: GameId,
        user_id: UserId,
        won: bool,
    },
}

impl GameEvent {
    pub fn game_id(&self) -> GameId {
        match self {
            GameEvent::GameCreated { game_id, .. } => *game_id,
            GameEvent::GuessApplied { game_id, .. } => *game_id,
            GameEvent::GameEnded { game_id, .. } => *game_id,
        }
    }

    /// Events that change the set of in-progress games
    pub fn changes_active_games(&self) -> bool {
        matches!(self, GameEvent::GameCreated { .. } | GameEvent::GameEnded { .. })
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send + Sync {
    fn handle_event(&self, event: &GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&self, event: GameEvent) {
        for handler in &self.handlers {
            handler.handle_event(&event);
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}
