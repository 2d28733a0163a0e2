pub mod serper;

use anyhow::Result;

use crate::domain::models::SearchBox;
use crate::domain::models::SearchName;

pub struct SearchManager {}

impl SearchManager {
    pub fn get(name: SearchName) -> Result<SearchBox> {
        match name {
            SearchName::Serper => return Ok(Box::<serper::Serper>::default()),
        }
    }
}
