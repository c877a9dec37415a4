pub mod alert_store;
pub mod prefixed;

pub use crate::domain::model::{AlertConfigDesc, TemplateDesc};
pub use crate::domain::ports::{AlertStore, Bucket};
pub use crate::utils::error::Result;
