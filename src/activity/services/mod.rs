//! Service orchestration for activity definitions.

mod catalogue;

pub use catalogue::{ActivityCatalogue, ActivityCatalogueError, ActivityCatalogueResult};
