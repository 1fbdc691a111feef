//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::CascadePaths;
pub use settings::Settings;
