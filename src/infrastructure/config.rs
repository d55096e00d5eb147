//! 配置基础设施
//!
//! 加载顺序：`config.toml` / `./config/config.toml`（都不存在时使用默认值），
//! 然后由环境变量覆盖。连接串与凭据没有默认值，由使用它们的组件检查。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::ConfigError;

/// 默认配置文件搜索路径
pub const CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

/// 商城后端配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 文档库配置
    pub database: DatabaseConfig,
    /// 缓存配置
    pub cache: CacheConfig,
    /// 邮件配置
    pub mail: MailConfig,
    /// 种子任务配置
    pub seed: SeedConfig,
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 实际加载的配置文件
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// 文档库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// MongoDB 连接串（环境变量 `MONGO_URI`）
    pub uri: Option<String>,
    /// 数据库名称
    pub name: String,
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis 连接串（环境变量 `UPSTASH_REDIS_URL`）
    pub url: Option<String>,
    /// 精选商品缓存有效期（秒）
    pub featured_ttl_seconds: u64,
}

/// 邮件配置
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// 发件账号，同时作为发件地址（环境变量 `EMAIL_USER`）
    pub username: Option<String>,
    /// 应用专用密码（环境变量 `EMAIL_PASS`）
    pub password: Option<String>,
    /// 发件人显示名称
    pub from_name: String,
    /// 金额前缀
    pub currency_symbol: String,
}

/// 种子任务配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// 外部商品列表文件，未设置时使用内置列表
    pub fixture_path: Option<PathBuf>,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// HTTP 服务端口
    pub port: u16,
    /// 绑定地址
    pub bind_address: String,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志目录
    pub log_dir: PathBuf,
    /// 日志文件名前缀
    pub file_prefix: String,
    /// 是否启用控制台输出
    pub console_output: bool,
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: None,
            name: "stepone".to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: None,
            featured_ttl_seconds: 3600,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 465,
            username: None,
            password: None,
            from_name: "StepOne Shoes".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("from_name", &self.from_name)
            .field("currency_symbol", &self.currency_symbol)
            .finish()
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_address: "0.0.0.0".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            file_prefix: "stepone".to_string(),
            console_output: true,
            level: "info".to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn require_uri(&self) -> Result<&str, ConfigError> {
        non_empty(self.uri.as_deref()).ok_or(ConfigError::Missing("database.uri"))
    }
}

impl CacheConfig {
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        non_empty(self.url.as_deref()).ok_or(ConfigError::Missing("cache.url"))
    }

    pub fn is_configured(&self) -> bool {
        non_empty(self.url.as_deref()).is_some()
    }
}

impl MailConfig {
    /// 返回 (账号, 密码)
    pub fn require_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let username =
            non_empty(self.username.as_deref()).ok_or(ConfigError::Missing("mail.username"))?;
        let password =
            non_empty(self.password.as_deref()).ok_or(ConfigError::Missing("mail.password"))?;
        Ok((username, password))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let mut config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.source = Some(path.as_ref().to_path_buf());

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// 使用环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// 使用任意键值来源覆盖配置，便于测试
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup("MONGO_URI") {
            self.database.uri = Some(uri);
        }
        if let Some(name) = lookup("MONGO_DB") {
            self.database.name = name;
        }
        if let Some(url) = lookup("UPSTASH_REDIS_URL") {
            self.cache.url = Some(url);
        }
        if let Some(user) = lookup("EMAIL_USER") {
            self.mail.username = Some(user);
        }
        if let Some(pass) = lookup("EMAIL_PASS") {
            self.mail.password = Some(pass);
        }
        if let Some(path) = lookup("SEED_FIXTURE") {
            self.seed.fixture_path = Some(PathBuf::from(path));
        }
        if let Some(port) = lookup("PORT") {
            self.http.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Validation(format!("无效的端口: {}", port)))?;
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.name.is_empty() {
            return Err(ConfigError::Validation("数据库名称不能为空".to_string()));
        }

        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }

        if self.mail.smtp_host.is_empty() {
            return Err(ConfigError::Validation("SMTP 主机不能为空".to_string()));
        }
        if self.mail.smtp_port == 0 {
            return Err(ConfigError::Validation("SMTP 端口必须大于0".to_string()));
        }

        if self.logging.file_prefix.is_empty() {
            return Err(ConfigError::Validation("日志文件前缀不能为空".to_string()));
        }
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 从文件或默认值加载配置，应用环境变量覆盖并校验
pub fn load_config() -> Result<Config, ConfigError> {
    let mut config = match CONFIG_PATHS.iter().find(|path| Path::new(path).exists()) {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    config.apply_env_overrides()?;
    config.validate()?;
    Ok(config)
}
