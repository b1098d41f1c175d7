mod store;
mod transcript;
mod types;

pub use store::{SessionStore, StagedTurn};
pub use transcript::Transcript;
pub use types::{Message, Role};
