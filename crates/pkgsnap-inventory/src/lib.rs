//! pkgsnap-inventory: Metadata collection, report assembly and serialization

pub mod collector;
pub mod error;
pub mod report;
pub mod serialize;
pub mod types;

pub use collector::MetadataCollector;
pub use error::InventoryError;
pub use report::assemble_report;
pub use serialize::{Destination, ReportFormat, render, write_report};
pub use types::{Report, SystemMetadata, UNKNOWN};
