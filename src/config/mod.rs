mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{CacheConfig, Config, OutputConfig, RemoteConfig, DEFAULT_BASE_URL};
