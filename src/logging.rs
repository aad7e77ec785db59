// ==========================================
// 活动经营预测系统 - 日志
// ==========================================
// 职责: 安装全局 tracing 订阅者 (文本 / JSON)
// 红线: 日志只写 stderr,stdout 专供预测报表
// 过滤: EVENT_FORECAST_LOG > RUST_LOG > 默认 "warn,event_forecast=info"
// ==========================================

use std::fmt as std_fmt;
use std::str::FromStr;

use tracing_subscriber::{fmt, EnvFilter};

/// 本系统专用的过滤器环境变量
pub const LOG_FILTER_ENV: &str = "EVENT_FORECAST_LOG";

/// 依赖库只报 warn,本 crate 报 info
const DEFAULT_DIRECTIVES: &str = "warn,event_forecast=info";

// ==========================================
// LogFormat - 日志输出格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 人读文本 (命令行默认)
    #[default]
    Text,
    /// 单行 JSON,附带当前 span (供日志采集)
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("未知日志格式: {}", other)),
        }
    }
}

impl std_fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// 选出生效的过滤指令: 专用变量优先,其次 RUST_LOG,空白值视为未设置
fn resolve_directives(own: Option<String>, rust_log: Option<String>) -> String {
    own.filter(|s| !s.trim().is_empty())
        .or_else(|| rust_log.filter(|s| !s.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}

fn build_filter() -> EnvFilter {
    let directives = resolve_directives(
        std::env::var(LOG_FILTER_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    // 订阅者尚未安装,解析失败只能直接写 stderr
    EnvFilter::try_new(&directives).unwrap_or_else(|err| {
        eprintln!("日志过滤器无效 ({}): {},改用默认过滤器", directives, err);
        EnvFilter::new(DEFAULT_DIRECTIVES)
    })
}

/// 安装全局日志订阅者,进程内只应调用一次
///
/// # 示例
/// ```no_run
/// use event_forecast::logging::{self, LogFormat};
/// logging::init(LogFormat::Text);
/// ```
pub fn init(format: LogFormat) {
    let filter = build_filter();
    match format {
        LogFormat::Text => fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .init(),
    }
}

/// 测试用日志: debug 级别写入测试输出,重复调用无副作用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" Text ".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::default(), LogFormat::Text);
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_resolve_directives_precedence() {
        assert_eq!(resolve_directives(None, None), DEFAULT_DIRECTIVES);
        assert_eq!(
            resolve_directives(None, Some("debug".to_string())),
            "debug"
        );
        assert_eq!(
            resolve_directives(
                Some("event_forecast::engine=trace".to_string()),
                Some("debug".to_string())
            ),
            "event_forecast::engine=trace"
        );
        assert_eq!(
            resolve_directives(Some("  ".to_string()), Some(String::new())),
            DEFAULT_DIRECTIVES
        );
    }

    #[test]
    fn test_init_test_is_repeatable() {
        init_test();
        init_test();
        tracing::debug!("测试日志可重复初始化");
    }
}
