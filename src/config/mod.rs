//! `.twosky.json` の読み込みと実行時設定
mod env;
mod loader;
mod settings;
mod types;

pub use env::{
    EnvOverrides,
    TwoskyEnv,
};
pub use settings::{
    BASE_FILE_LANG,
    DEFAULT_CONFIG_FILE,
    DEFAULT_LOCALES_DIR,
    DEFAULT_PROJECT_ID,
    DEFAULT_SOURCE_DIR,
    DEFAULT_TWOSKY_URI,
    Paths,
    Settings,
};
pub use types::{
    ConfigError,
    TwoskyConf,
    ValidationError,
};
