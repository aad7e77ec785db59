// ==========================================
// 活动经营预测系统 - API 层
// ==========================================
// 职责: 输入校验 + 业务接口,供命令行与调用方使用
// ==========================================

pub mod error;
pub mod forecast_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use forecast_api::{ForecastApi, ScenarioProjection};
pub use validator::InputValidator;
