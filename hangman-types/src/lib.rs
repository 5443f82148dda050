pub mod errors;
pub mod game;
pub mod messages;
pub mod phrase;
pub mod score;
pub mod user;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use messages::*;
pub use phrase::*;
pub use score::*;
pub use user::*;
