pub mod prelude;

pub mod games;
pub mod phrases;
pub mod scores;
pub mod users;
