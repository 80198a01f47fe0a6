pub mod billing;
pub mod codec;
pub mod query;
pub mod session;
pub mod store;

pub use crate::domain::model::{BoatRecord, Location, LocationKind, RateTable};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
