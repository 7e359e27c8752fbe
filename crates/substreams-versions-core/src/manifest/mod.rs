//! Substreams manifest handling
//!
//! Each module keeps a YAML manifest at `<root>/<module>/substreams.yaml`
//! holding its `package.version` and an `imports` mapping.

mod document;
mod store;

pub use document::{Import, ManifestDocument};
pub use store::ManifestStore;
