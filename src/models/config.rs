// ============================================================================
// UEnergy i18n - 配置数据模型
// ============================================================================
//
// 文件: src/models/config.rs
// 职责: 配置文件数据结构定义和操作
// 边界:
//   - ✅ 配置文件数据结构定义
//   - ✅ 配置序列化/反序列化
//   - ✅ 配置默认值
//   - ✅ 配置文件读写操作
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含 CLI 参数处理
//   - ❌ 不应包含页面处理逻辑
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::models::language::{builtin_languages, LanguageInfo};
use crate::utils::constants::{
    DEFAULT_LANGUAGE, DEFAULT_SELECTOR_ID, DEFAULT_STORAGE_KEY, DEFAULT_STORAGE_PATH,
};

/// 全局配置管理器
static GLOBAL_CONFIG: std::sync::OnceLock<Arc<RwLock<Config>>> = std::sync::OnceLock::new();

/// 配置文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 国际化配置
    #[serde(default)]
    pub i18n: I18nConfig,
    /// 语言偏好存储配置
    #[serde(default)]
    pub storage: StorageConfig,
    /// 页面处理配置
    #[serde(default)]
    pub pages: PagesConfig,
    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

/// 国际化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// 回退语言
    #[serde(default = "Config::default_language")]
    pub default_language: String,
    /// 固定界面语言（优先于已保存的偏好，不写入存储）
    #[serde(default)]
    pub language: Option<String>,
    /// 支持的语言
    #[serde(default = "builtin_languages")]
    pub languages: Vec<LanguageInfo>,
    /// 覆盖内置翻译的资源目录（每个语言一个 `<code>.json`）
    #[serde(default)]
    pub locales_dir: Option<String>,
    /// 语言选择器容器 id
    #[serde(default = "Config::default_selector_id")]
    pub selector_id: String,
}

/// 语言偏好存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 偏好文件路径
    #[serde(default = "Config::default_storage_path")]
    pub path: String,
    /// 语言偏好存储键
    #[serde(default = "Config::default_storage_key")]
    pub key: String,
}

/// 页面处理配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    /// 排除扫描的目录或文件模式
    #[serde(default = "Config::default_ignore_patterns")]
    pub ignore: Vec<String>,
    /// 处理页面时注入语言选择器
    #[serde(default)]
    pub inject_selector: bool,
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 是否详细输出
    #[serde(default)]
    pub verbose: bool,
    /// 是否彩色输出
    #[serde(default = "Config::default_colored")]
    pub colored: bool,
}

/// CLI 运行时参数（用于覆盖配置文件）
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub verbose: Option<bool>,
    pub colored: Option<bool>,
    pub language: Option<String>,
}

/// 配置默认值 trait - 不依赖全局配置初始化
pub trait ConfigDefaults {
    /// 获取默认语言
    fn default_language() -> String {
        DEFAULT_LANGUAGE.to_string()
    }

    /// 获取默认选择器容器 id
    fn default_selector_id() -> String {
        DEFAULT_SELECTOR_ID.to_string()
    }

    /// 获取默认偏好文件路径
    fn default_storage_path() -> String {
        DEFAULT_STORAGE_PATH.to_string()
    }

    /// 获取默认存储键
    fn default_storage_key() -> String {
        DEFAULT_STORAGE_KEY.to_string()
    }

    /// 获取默认忽略模式
    fn default_ignore_patterns() -> Vec<String> {
        vec![
            "node_modules".to_string(),
            "backups".to_string(),
            "*.min.html".to_string(),
        ]
    }

    /// 获取默认是否彩色输出
    fn default_colored() -> bool {
        true
    }
}

impl ConfigDefaults for Config {}

impl Config {
    /// 从指定路径初始化全局配置（程序启动时调用）
    pub fn initialize_from(config_path: &Path) -> anyhow::Result<()> {
        let config = Self::load_from(config_path)?;
        GLOBAL_CONFIG
            .set(Arc::new(RwLock::new(config)))
            .map_err(|_| anyhow::anyhow!("Global config already initialized"))?;
        Ok(())
    }

    /// 加载配置文件，不存在时使用默认配置
    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 合并运行时参数
    pub fn merge_runtime_args(args: RuntimeArgs) -> anyhow::Result<()> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let mut config = global_config
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config write lock"))?;

        if let Some(verbose) = args.verbose {
            config.output.verbose = verbose;
        }
        if let Some(colored) = args.colored {
            config.output.colored = colored;
        }
        if let Some(language) = args.language {
            config.i18n.language = Some(language);
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// 生成默认配置模板并保存到文件
    pub fn create_default_config_file(config_path: &Path) -> anyhow::Result<()> {
        Self::default().save_to_file(config_path)
    }

    /// 读取全局配置
    fn with_global<T>(read: impl FnOnce(&Config) -> T) -> anyhow::Result<T> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let config = global_config
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config read lock"))?;

        Ok(read(&config))
    }

    /// 获取全局配置快照
    pub fn snapshot() -> anyhow::Result<Config> {
        Self::with_global(Config::clone)
    }

    /// 获取详细输出设置（带默认值）
    pub fn get_verbose() -> bool {
        Self::with_global(|config| config.output.verbose).unwrap_or(false)
    }

    /// 获取是否彩色输出（带默认值）
    pub fn get_colored() -> bool {
        Self::with_global(|config| config.output.colored).unwrap_or_else(|_| Self::default_colored())
    }

    /// 偏好文件路径
    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.path)
    }

    /// 检查相对路径是否应该被忽略
    pub fn should_ignore_path(&self, path: &str) -> bool {
        self.pages.ignore.iter().any(|pattern| {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(path) {
                    return true;
                }
                // 也匹配路径中的任一段
                if path.split('/').any(|segment| glob_pattern.matches(segment)) {
                    return true;
                }
            }
            path.starts_with(pattern.as_str())
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            i18n: I18nConfig::default(),
            storage: StorageConfig::default(),
            pages: PagesConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: Config::default_language(),
            language: None,
            languages: builtin_languages(),
            locales_dir: None,
            selector_id: Config::default_selector_id(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: Config::default_storage_path(),
            key: Config::default_storage_key(),
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            ignore: Config::default_ignore_patterns(),
            inject_selector: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            colored: Config::default_colored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [i18n]
            default_language = "en"

            [storage]
            key = "dashboard_language"
            "#,
        )
        .unwrap();

        assert_eq!(config.i18n.default_language, "en");
        assert_eq!(config.i18n.languages.len(), 4);
        assert_eq!(config.storage.key, "dashboard_language");
        assert_eq!(config.storage.path, DEFAULT_STORAGE_PATH);
        assert!(config.output.colored);
    }

    #[test]
    fn test_default_config_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uenergy.toml");

        Config::create_default_config_file(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded.i18n.default_language, "zh");
        assert_eq!(loaded.i18n.languages, builtin_languages());
        assert_eq!(loaded.storage.key, "app_language");
    }

    #[test]
    fn test_should_ignore_path() {
        let config = Config::default();
        assert!(config.should_ignore_path("backups/old/index.html"));
        assert!(config.should_ignore_path("vendor/chart.min.html"));
        assert!(config.should_ignore_path("a/node_modules/b.html"));
        assert!(!config.should_ignore_path("pages/home.html"));
    }
}
