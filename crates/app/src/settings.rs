use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tickerview_core::config::AppConfig;

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "TICKERVIEW_CONFIG";
/// 未指定路径时在工作目录查找的配置文件名 (不含扩展名)
pub const DEFAULT_CONFIG_NAME: &str = "tickerview";
/// 覆盖单个配置项的环境变量前缀，如 `TICKERVIEW__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "TICKERVIEW";

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 作为最底层。
/// 2. 叠加配置文件：显式路径必须存在，默认文件可缺省。
/// 3. 叠加 `TICKERVIEW__*` 环境变量。
///
/// # Arguments
/// * `path` - 显式指定的配置文件路径。
///
/// # Returns
/// 合并后的配置，任一层解析失败返回 `ConfigError`。
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_env(path, env_source())
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(path: Option<&Path>, env: Environment) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(file)
        .add_source(env)
        .build()?
        .try_deserialize()
}
