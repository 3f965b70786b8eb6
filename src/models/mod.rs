mod incoming;
mod turn;

pub use incoming::{ChatId, IncomingMessage};
pub use turn::{Role, Turn};
