pub use super::games::Entity as Games;
pub use super::phrases::Entity as Phrases;
pub use super::scores::Entity as Scores;
pub use super::users::Entity as Users;
