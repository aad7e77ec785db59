// ==========================================
// 活动经营预测系统 - 配置层
// ==========================================
// 职责: 引擎参数加载与默认值管理
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod engine_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, get_default_config_path, ConfigManager, CONFIG_PATH_ENV};
pub use engine_config::EngineConfig;
