use thiserror::Error;

/// Everything that can go wrong while loading an avatar. Every variant takes
/// the same recovery path: log, notify, substitute the fallback node.
#[derive(Error, Debug)]
pub enum AvatarError {
    #[error("failed to read avatar file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse GLB: {0}")]
    Parse(#[from] gltf::Error),

    #[error("unsupported avatar content: {0}")]
    Unsupported(String),
}
