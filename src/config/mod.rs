pub mod loader;

pub use loader::{load_request, resolve_request, RequestOverrides};
