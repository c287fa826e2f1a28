pub mod catalog;
pub mod executor;
pub mod game_version;
pub mod local_version;
pub mod request;
pub mod uploader;

pub use crate::domain::model::{DependencyDescriptor, UploadOutcome, VersionCatalog};
pub use crate::domain::ports::{BuildContext, CatalogSource};
pub use crate::utils::error::Result;
