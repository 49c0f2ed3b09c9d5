pub mod etl;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod transform;

pub use crate::domain::model::{Record, Table};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
