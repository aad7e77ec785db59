// ==========================================
// 活动经营预测系统 - 导入层
// ==========================================
// 职责: 读取预测方案与实绩文件,转换为领域对象
// 支持: JSON, CSV
// 说明: 第三方营销平台数据的适配不在此层
// ==========================================

pub mod actuals_parser;
pub mod error;
pub mod plan_file;

// 重导出核心类型
pub use actuals_parser::{
    ActualsParser, CsvActualsParser, JsonActualsParser, UniversalActualsParser,
};
pub use error::{ImportError, ImportResult};
pub use plan_file::{load_plan, parse_plan, save_plan};
