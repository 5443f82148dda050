pub mod error;
pub mod game_events;
pub mod game_state;
pub mod guess_validation;
pub mod scoring;
pub mod statistics;

// Re-export main components
pub use error::*;
pub use game_events::*;
pub use game_state::*;
pub use guess_validation::*;
pub use scoring::*;
pub use statistics::*;
