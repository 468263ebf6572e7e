pub mod core;
pub mod domain;
pub mod pipelines;
pub mod sinks;
pub mod utils;

pub use crate::core::etl::EtlEngine;
pub use crate::domain::model::{Cell, Column, ColumnKind, RawPayload, Table};
pub use crate::domain::ports::Pipeline;
pub use crate::pipelines::{BanksPipeline, UniversitiesPipeline};
pub use crate::utils::error::{EtlError, Result};
