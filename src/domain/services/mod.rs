pub mod actions;
mod assistant;
mod classifier;
mod conversation;
#[cfg(test)]
pub mod fakes;
mod plan_builder;
mod plan_files;
mod syllabus;

pub use assistant::*;
pub use classifier::*;
pub use conversation::*;
pub use plan_builder::*;
pub use plan_files::*;
pub use syllabus::*;
