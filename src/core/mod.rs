pub mod etl;
pub mod shape;

pub use crate::domain::model::{Cell, Column, ColumnKind, RawPayload, Table};
pub use crate::domain::ports::Pipeline;
pub use crate::utils::error::Result;
