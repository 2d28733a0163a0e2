pub mod backends;
pub mod search;
