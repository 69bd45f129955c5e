//! Application configuration

mod settings;

pub use settings::{get_settings, load_warnings, LogFormat, Settings, TokenAlgorithm};
