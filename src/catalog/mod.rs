//! Catalog records and the bundled fallback catalog

pub mod fallback;
mod types;

pub use types::{
    CatalogItem, CategoryCount, ContentKind, ContentResults, CourseRecord, EventRecord, Level,
};
