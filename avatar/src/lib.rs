pub mod error;
pub mod fallback;
pub mod importer;
pub mod loader;
pub mod model;
pub mod motion;
pub mod node;

pub use error::AvatarError;
pub use loader::{resolve, AvatarLoader, Resolution};
pub use node::{AvatarDriver, AvatarNode, FitTransform, DEFAULT_TARGET_HEIGHT};
