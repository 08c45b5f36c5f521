pub mod etl;
pub mod pipeline;
pub mod validate;

pub use crate::domain::model::{InvalidRow, LogRecord, Outcome, RawRow, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
