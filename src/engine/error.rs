// ==========================================
// 活动经营预测系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 引擎无 I/O,仅有输入边界类错误
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("预测期数无效: {0}（必须 ≥ 1）")]
    InvalidForecastPeriod(i64),

    #[error("预测期数超出上限: requested={requested}, max={max}")]
    HorizonTooLong { requested: i64, max: u32 },

    #[error("汇总区间无效: start={start}, end={end}")]
    InvalidRange { start: u32, end: u32 },

    #[error("滚动窗口无效: {0}（必须 ≥ 1）")]
    InvalidWindow(usize),
}

pub type EngineResult<T> = Result<T, EngineError>;
