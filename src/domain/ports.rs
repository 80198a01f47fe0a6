use crate::domain::model::RateTable;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Backing store for the persisted inventory file.
pub trait Storage {
    fn open_reader(&self) -> Result<Box<dyn BufRead>>;
    fn open_writer(&self) -> Result<Box<dyn Write>>;
    /// Human-readable location used in messages.
    fn location(&self) -> &str;
}

pub trait ConfigProvider {
    fn capacity(&self) -> usize;
    fn rates(&self) -> RateTable;
}
