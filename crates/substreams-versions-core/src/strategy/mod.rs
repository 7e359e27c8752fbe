//! Version strategies

mod semver;
mod traits;
pub mod types;

pub use self::semver::SemVerStrategy;
pub use traits::VersionStrategy;
pub use types::VersionComponents;
