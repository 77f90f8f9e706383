// ============================================================================
// UEnergy i18n - 常量定义
// ============================================================================
//
// 文件: src/utils/constants.rs
// 职责: 应用程序常量定义
// 边界:
//   - ✅ 应用程序常量定义
//   - ✅ 页面标记属性名定义
//   - ✅ 终端图标字符定义
//   - ❌ 不应包含动态配置
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含文件路径处理
//
// ============================================================================

/// 应用名称常量
pub const APP_NAME: &str = "UENERGY";

/// 默认配置文件名
pub const CONFIG_FILE: &str = "uenergy.toml";

/// 默认偏好存储文件路径
pub const DEFAULT_STORAGE_PATH: &str = ".uenergy/local_storage.json";

/// 默认语言偏好存储键
pub const DEFAULT_STORAGE_KEY: &str = "app_language";

/// 默认语言
pub const DEFAULT_LANGUAGE: &str = "zh";

/// 语言选择器容器 id
pub const DEFAULT_SELECTOR_ID: &str = "languageSelector";

/// 语言切换事件名
pub const LANGUAGE_CHANGED_EVENT: &str = "languageChanged";

/// 页面标记属性
pub mod attrs {
    /// 文本键（输入框写入 placeholder）
    pub const I18N: &str = "data-i18n";
    /// 文本键（支持 `<title>`）
    pub const I18N_KEY: &str = "data-i18n-key";
    /// placeholder 键
    pub const I18N_PLACEHOLDER: &str = "data-i18n-placeholder";
    /// title 提示键
    pub const I18N_TITLE: &str = "data-i18n-title";
    /// 强制中文文本
    pub const TEXT_ZH: &str = "data-text-zh";
    /// 强制英文文本
    pub const TEXT_EN: &str = "data-text-en";

    /// 新插入内容中需要触发翻译的属性
    pub const WATCHED: &[&str] = &[I18N, I18N_KEY, I18N_PLACEHOLDER, I18N_TITLE, TEXT_ZH];
}

/// 终端图标
pub mod icons {
    /// 成功图标
    pub const SUCCESS: &str = "✓";
    /// 警告图标
    pub const WARNING: &str = "!";
    /// 页面图标
    pub const PAGE: &str = "▪";
    /// 语言图标
    pub const LANGUAGE: &str = "◉";
    /// 箭头图标
    pub const ARROW: &str = "→";
    /// 汇总图标
    pub const SUMMARY: &str = "◈";
}
