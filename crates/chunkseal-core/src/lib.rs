pub mod config;
pub mod error;
pub mod types;

pub use error::{ChunksealError, ChunksealResult};
pub use types::KeySizeClass;
