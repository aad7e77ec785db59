// ==========================================
// 活动经营预测系统 - 实绩对账引擎
// ==========================================
// 职责: 以稀疏实绩覆盖预测/情景序列,生成报表期数据
// 输入: 预测序列 + 按期号的实绩
// 输出: Vec<BlendedPeriod> 及汇总/趋势/盈亏平衡/偏差
// ==========================================
// 红线: 有实绩的期,报表字段全部取实绩;无实绩的期全部取预测
// 累计利润: 按混合后的本期利润重新逐期累加
// ==========================================

use crate::domain::actuals::ActualRecord;
use crate::domain::projection::{link_cumulative_profit, ProjectionField, WeeklyProjection};
use crate::domain::types::{CostCategory, DataSource, RevenueStream};
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::RangeInclusive;
use tracing::instrument;

// ==========================================
// 输出类型
// ==========================================

/// 报表期记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendedPeriod {
    pub period: u32,
    pub source: DataSource,
    pub record: WeeklyProjection,
}

/// 盈亏平衡期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "period", rename_all = "snake_case")]
pub enum BreakEven {
    /// 首个累计利润 > 0 的期号
    Period(u32),
    /// 预测期内未达到盈亏平衡
    BeyondHorizon,
}

impl fmt::Display for BreakEven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakEven::Period(period) => write!(f, "period {}", period),
            BreakEven::BeyondHorizon => write!(f, "beyond horizon"),
        }
    }
}

/// 首个累计利润 > 0 的期
pub fn find_break_even<'a, I>(records: I) -> BreakEven
where
    I: IntoIterator<Item = &'a WeeklyProjection>,
{
    records
        .into_iter()
        .find(|r| r.cumulative_profit > 0.0)
        .map(|r| BreakEven::Period(r.period))
        .unwrap_or(BreakEven::BeyondHorizon)
}

/// 区间汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PeriodTotals {
    pub start: u32,
    pub end: u32,
    pub period_count: usize,
    pub actual_count: usize,
    pub foot_traffic: f64,
    pub revenue_by_stream: BTreeMap<RevenueStream, f64>,
    pub costs_by_category: BTreeMap<CostCategory, f64>,
    pub total_revenue: f64,
    pub total_costs: f64,
    pub total_profit: f64,
}

/// 单项偏差 (实绩 - 预测)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceValue {
    pub projected: f64,
    pub actual: f64,
    pub delta: f64,
    /// 预测为 0 时无意义
    pub delta_pct: Option<f64>,
}

impl VarianceValue {
    pub fn new(projected: f64, actual: f64) -> Self {
        let delta = actual - projected;
        let delta_pct = if projected != 0.0 {
            Some(delta / projected.abs() * 100.0)
        } else {
            None
        };
        Self {
            projected,
            actual,
            delta,
            delta_pct,
        }
    }
}

/// 单期偏差
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceRow {
    pub period: u32,
    pub foot_traffic: VarianceValue,
    pub total_revenue: VarianceValue,
    pub total_costs: VarianceValue,
    pub weekly_profit: VarianceValue,
}

/// 对账报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub periods: Vec<BlendedPeriod>,
    pub totals: PeriodTotals,
    pub trend_window: usize,
    pub revenue_trend: Vec<Option<f64>>,
    pub profit_trend: Vec<Option<f64>>,
    pub break_even: BreakEven,
    pub variance: Vec<VarianceRow>,
}

// ==========================================
// ActualsReconciler - 实绩对账引擎
// ==========================================
// 无状态引擎,所有方法都是纯函数
pub struct ActualsReconciler;

impl ActualsReconciler {
    pub fn new() -> Self {
        Self
    }

    /// 按期号索引实绩
    ///
    /// 重复期号以最后一条为准;超出序列期号范围的实绩被忽略
    fn index_actuals<'a>(
        &self,
        series: &[WeeklyProjection],
        actuals: &'a [ActualRecord],
    ) -> HashMap<u32, &'a ActualRecord> {
        let max_period = series.iter().map(|r| r.period).max().unwrap_or(0);
        let mut indexed = HashMap::new();

        for actual in actuals {
            if actual.period < 1 || actual.period > max_period {
                tracing::warn!(
                    period = actual.period,
                    max_period,
                    "实绩期号超出预测范围，已忽略"
                );
                continue;
            }
            if indexed.insert(actual.period, actual).is_some() {
                tracing::warn!(period = actual.period, "实绩期号重复，以最后一条为准");
            }
        }

        indexed
    }

    /// 生成报表期序列
    #[instrument(skip(self, series, actuals), fields(periods = series.len(), actuals = actuals.len()))]
    pub fn reconcile(
        &self,
        series: &[WeeklyProjection],
        actuals: &[ActualRecord],
    ) -> Vec<BlendedPeriod> {
        let indexed = self.index_actuals(series, actuals);

        let mut records: Vec<WeeklyProjection> = Vec::with_capacity(series.len());
        let mut sources: Vec<DataSource> = Vec::with_capacity(series.len());
        for projection in series {
            match indexed.get(&projection.period) {
                Some(actual) => {
                    records.push(actual.to_projection(projection.period_start));
                    sources.push(DataSource::Actual);
                }
                None => {
                    records.push(projection.clone());
                    sources.push(DataSource::Projected);
                }
            }
        }

        link_cumulative_profit(&mut records);

        records
            .into_iter()
            .zip(sources)
            .map(|(record, source)| BlendedPeriod {
                period: record.period,
                source,
                record,
            })
            .collect()
    }

    /// 区间汇总 (含两端)
    pub fn totals(
        &self,
        blended: &[BlendedPeriod],
        range: RangeInclusive<u32>,
    ) -> EngineResult<PeriodTotals> {
        let (start, end) = (*range.start(), *range.end());
        if start < 1 || start > end {
            return Err(EngineError::InvalidRange { start, end });
        }

        let mut totals = PeriodTotals {
            start,
            end,
            ..Default::default()
        };
        for stream in RevenueStream::ALL {
            totals.revenue_by_stream.insert(stream, 0.0);
        }
        for category in CostCategory::ALL {
            totals.costs_by_category.insert(category, 0.0);
        }

        for period in blended.iter().filter(|p| range.contains(&p.period)) {
            let record = &period.record;
            totals.period_count += 1;
            if period.source == DataSource::Actual {
                totals.actual_count += 1;
            }
            totals.foot_traffic += record.foot_traffic;
            for stream in RevenueStream::ALL {
                *totals.revenue_by_stream.entry(stream).or_insert(0.0) += record.revenue(stream);
            }
            for category in CostCategory::ALL {
                *totals.costs_by_category.entry(category).or_insert(0.0) += record.cost(category);
            }
            totals.total_revenue += record.total_revenue;
            totals.total_costs += record.total_costs;
            totals.total_profit += record.weekly_profit;
        }

        Ok(totals)
    }

    /// 滚动平均
    ///
    /// 第 i 期取最近 window 期的算术平均,窗口未填满的期为 None
    pub fn rolling_average(
        &self,
        blended: &[BlendedPeriod],
        field: ProjectionField,
        window: usize,
    ) -> EngineResult<Vec<Option<f64>>> {
        if window == 0 {
            return Err(EngineError::InvalidWindow(window));
        }

        let values: Vec<f64> = blended.iter().map(|p| p.record.field(field)).collect();
        Ok((0..values.len())
            .map(|idx| {
                if idx + 1 < window {
                    None
                } else {
                    let slice = &values[idx + 1 - window..=idx];
                    Some(slice.iter().sum::<f64>() / window as f64)
                }
            })
            .collect())
    }

    /// 盈亏平衡期 (基于混合后的累计利润)
    pub fn break_even(&self, blended: &[BlendedPeriod]) -> BreakEven {
        find_break_even(blended.iter().map(|p| &p.record))
    }

    /// 实绩与预测的逐期偏差 (仅有实绩的期)
    pub fn variance(
        &self,
        series: &[WeeklyProjection],
        actuals: &[ActualRecord],
    ) -> Vec<VarianceRow> {
        let indexed = self.index_actuals(series, actuals);

        series
            .iter()
            .filter_map(|projected| {
                let actual = indexed.get(&projected.period)?.to_projection(projected.period_start);
                Some(VarianceRow {
                    period: projected.period,
                    foot_traffic: VarianceValue::new(projected.foot_traffic, actual.foot_traffic),
                    total_revenue: VarianceValue::new(projected.total_revenue, actual.total_revenue),
                    total_costs: VarianceValue::new(projected.total_costs, actual.total_costs),
                    weekly_profit: VarianceValue::new(projected.weekly_profit, actual.weekly_profit),
                })
            })
            .collect()
    }

    /// 生成完整对账报告
    #[instrument(skip(self, series, actuals), fields(periods = series.len()))]
    pub fn report(
        &self,
        series: &[WeeklyProjection],
        actuals: &[ActualRecord],
        window: usize,
    ) -> EngineResult<ReconciliationReport> {
        let periods = self.reconcile(series, actuals);
        let end = periods.last().map(|p| p.period).unwrap_or(1).max(1);
        let totals = self.totals(&periods, 1..=end)?;
        let revenue_trend = self.rolling_average(&periods, ProjectionField::TotalRevenue, window)?;
        let profit_trend = self.rolling_average(&periods, ProjectionField::WeeklyProfit, window)?;
        let break_even = self.break_even(&periods);
        let variance = self.variance(series, actuals);

        tracing::debug!(
            actual_count = totals.actual_count,
            break_even = %break_even,
            "对账报告生成完成"
        );

        Ok(ReconciliationReport {
            periods,
            totals,
            trend_window: window,
            revenue_trend,
            profit_trend,
            break_even,
            variance,
        })
    }
}

impl Default for ActualsReconciler {
    fn default() -> Self {
        Self::new()
    }
}
