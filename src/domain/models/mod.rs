mod action;
mod backend;
mod error;
mod event;
mod plan;
mod profile;
mod search;
mod slash_commands;
mod transcript;
mod turn;

pub use action::*;
pub use backend::*;
pub use error::*;
pub use event::*;
pub use plan::*;
pub use profile::*;
pub use search::*;
pub use slash_commands::*;
pub use transcript::*;
pub use turn::*;
