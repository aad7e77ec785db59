// ==========================================
// 活动经营预测系统 - 核心库
// ==========================================
// 系统定位: 活动/场馆类产品的周期经营预测
// 能力: 基线预测 + 情景推演 + 实绩对账
// 红线: 引擎为纯函数,无持久化、无网络
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 输入假设与预测记录
pub mod domain;

// 引擎层 - 预测规则
pub mod engine;

// 配置层 - 引擎参数
pub mod config;

// 导入层 - 方案与实绩文件
pub mod importer;

// 导出层 - CSV 报表
pub mod exporter;

// API 层 - 输入校验与业务接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    CostCategory, DataSource, ForecastCadence, GrowthModel, RevenueStream,
};

// 领域实体
pub use domain::{
    ActualRecord, CostMetrics, ForecastPlan, GrowthMetrics, ProductInfo, RevenueMetrics,
    ScenarioModel, ScenarioModifiers, WeeklyProjection,
};

// 引擎
pub use engine::{
    apply_scenario, project, reconcile, ActualsReconciler, BlendedPeriod, BreakEven,
    CostProjector, EngineError, GrowthProjector, ProjectionAssembler, RevenueProjector,
    ScenarioModifier,
};

// 配置
pub use config::{ConfigManager, EngineConfig};

// API
pub use api::{ApiError, ApiResult, ForecastApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "活动经营预测系统";
