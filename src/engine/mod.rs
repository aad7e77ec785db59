// ==========================================
// 活动经营预测系统 - 引擎层
// ==========================================
// 职责: 纯计算的预测、情景推演与实绩对账
// 红线: 引擎无状态、无 I/O,每个入口都是显式输入的纯函数
// 依赖顺序: growth → revenue → cost → assembler → scenario → reconcile
// ==========================================

pub mod assembler;
pub mod cost;
pub mod error;
pub mod growth;
pub mod normalize;
pub mod reconcile;
pub mod revenue;
pub mod scenario;

// 重导出核心引擎
pub use assembler::ProjectionAssembler;
pub use cost::{CostBreakdown, CostProjector};
pub use error::{EngineError, EngineResult};
pub use growth::{AudiencePoint, GrowthProjector};
pub use normalize::{normalize, NormalizedInputs};
pub use reconcile::{
    find_break_even, ActualsReconciler, BlendedPeriod, BreakEven, PeriodTotals,
    ReconciliationReport, VarianceRow, VarianceValue,
};
pub use revenue::{RevenueBreakdown, RevenueProjector};
pub use scenario::{PeriodDelta, ScenarioComparison, ScenarioModifier};

use crate::config::EngineConfig;
use crate::domain::actuals::ActualRecord;
use crate::domain::metrics::{CostMetrics, GrowthMetrics, RevenueMetrics};
use crate::domain::product::ProductInfo;
use crate::domain::projection::WeeklyProjection;
use crate::domain::scenario::ScenarioModifiers;

// ==========================================
// 对外入口
// ==========================================

/// 基线预测 (默认引擎参数)
pub fn project(
    product: &ProductInfo,
    growth: &GrowthMetrics,
    revenue: &RevenueMetrics,
    cost: &CostMetrics,
) -> EngineResult<Vec<WeeklyProjection>> {
    project_with_config(product, growth, revenue, cost, &EngineConfig::default())
}

/// 基线预测
pub fn project_with_config(
    product: &ProductInfo,
    growth: &GrowthMetrics,
    revenue: &RevenueMetrics,
    cost: &CostMetrics,
    config: &EngineConfig,
) -> EngineResult<Vec<WeeklyProjection>> {
    let inputs = normalize(product, growth, revenue, cost, config)?;
    Ok(ProjectionAssembler::new(config).assemble(&inputs))
}

/// 情景推演 (不修改基线)
pub fn apply_scenario(
    baseline: &[WeeklyProjection],
    modifiers: &ScenarioModifiers,
) -> Vec<WeeklyProjection> {
    ScenarioModifier::new().apply(baseline, modifiers)
}

/// 实绩覆盖预测
pub fn reconcile(series: &[WeeklyProjection], actuals: &[ActualRecord]) -> Vec<BlendedPeriod> {
    ActualsReconciler::new().reconcile(series, actuals)
}
