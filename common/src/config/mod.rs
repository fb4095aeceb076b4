mod app_config;
mod config_content_provider;
mod config_manager;
mod config_serializer;
mod validate;

pub use app_config::{AppConfig, AppConfigManager, LogSettings, MazeSettings, TicTacToeSettings};
pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider};
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};
pub use validate::Validate;
