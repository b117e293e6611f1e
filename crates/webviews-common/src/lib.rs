pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, WebviewError};
pub use id::{new_id, WebviewId};
pub use types::WindowSizeHint;

pub type Result<T> = std::result::Result<T, WebviewError>;
