// ==========================================
// 活动经营预测系统 - 客流增长引擎
// ==========================================
// 职责: 增长假设 → 每期客流序列
// 输入: GrowthParams + 预测期数 + 周期
// 输出: Vec<AudiencePoint> (长度 = N)
// ==========================================
// 第 p 期使用指数 t = p - 1,即第 1 期为基准客流
// ==========================================

use crate::config::EngineConfig;
use crate::domain::projection::average_event_attendance;
use crate::domain::types::{ForecastCadence, Quarter};
use crate::engine::normalize::{GrowthCurve, GrowthParams};
use chrono::{Datelike, Duration, Months, NaiveDate};

/// 单期客流
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudiencePoint {
    pub period: u32,
    pub period_start: Option<NaiveDate>,
    pub foot_traffic: f64,
    pub events: f64,
    pub attendance: f64,
    pub average_event_attendance: f64,
}

// ==========================================
// GrowthProjector - 客流增长引擎
// ==========================================
pub struct GrowthProjector {
    weeks_per_quarter: u32,
    months_per_quarter: u32,
}

impl GrowthProjector {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            weeks_per_quarter: config.weeks_per_quarter,
            months_per_quarter: config.months_per_quarter,
        }
    }

    /// 生成 N 期客流序列
    ///
    /// 有效客流 = 基础客流 × (1 + 回访率 + 口碑率) + 社媒客流,
    /// 设有累计上限时,累计值达到上限后不再增加
    pub fn project(
        &self,
        params: &GrowthParams,
        horizon: u32,
        cadence: ForecastCadence,
        events_per_period: f64,
        start_date: Option<NaiveDate>,
    ) -> Vec<AudiencePoint> {
        let multiplier = 1.0 + params.return_rate + params.word_of_mouth_rate;
        let mut cumulative = 0.0;

        (1..=horizon)
            .map(|period| {
                let period_start = period_start_date(start_date, cadence, period);
                let quarter = self.period_quarter(period, cadence, period_start);
                let base = self.base_count(params, period - 1, quarter);

                let mut effective = base * multiplier + params.social_visitors;
                if let Some(cap) = params.lifetime_cap {
                    let remaining = (cap - cumulative).max(0.0);
                    effective = effective.min(remaining);
                }
                cumulative += effective;

                AudiencePoint {
                    period,
                    period_start,
                    foot_traffic: effective,
                    events: events_per_period,
                    attendance: effective,
                    average_event_attendance: average_event_attendance(
                        effective,
                        events_per_period,
                    ),
                }
            })
            .collect()
    }

    /// 基础客流 count(t)
    pub fn base_count(&self, params: &GrowthParams, t: u32, quarter: Quarter) -> f64 {
        let base = params.base_visitors;
        let exponent = t.min(i32::MAX as u32) as i32;
        match params.curve {
            GrowthCurve::Exponential => base * (1.0 + params.growth_rate).powi(exponent),
            // 衰减率超过 100% 时底数截为 0,避免符号交替
            GrowthCurve::Decay => {
                let factor = (1.0 - params.growth_rate).max(0.0);
                (base * factor.powi(exponent)).max(0.0)
            }
            GrowthCurve::Seasonal => base * params.seasonal_factors[quarter.index()],
        }
    }

    /// 期号所属季度
    ///
    /// 有期初日期时取日历季度,否则按周期换算
    pub fn period_quarter(
        &self,
        period: u32,
        cadence: ForecastCadence,
        period_start: Option<NaiveDate>,
    ) -> Quarter {
        match period_start {
            Some(date) => Quarter::from_month(date.month()),
            None => {
                let per_quarter =
                    cadence.periods_per_quarter(self.weeks_per_quarter, self.months_per_quarter);
                Quarter::from_index((period.saturating_sub(1) / per_quarter) as usize)
            }
        }
    }
}

/// 第 period 期的期初日期
pub fn period_start_date(
    start_date: Option<NaiveDate>,
    cadence: ForecastCadence,
    period: u32,
) -> Option<NaiveDate> {
    let start = start_date?;
    let offset = period.saturating_sub(1);
    match cadence {
        ForecastCadence::Weekly | ForecastCadence::PerEvent => {
            start.checked_add_signed(Duration::weeks(offset as i64))
        }
        ForecastCadence::Monthly => start.checked_add_months(Months::new(offset)),
        ForecastCadence::Quarterly => start.checked_add_months(Months::new(offset.saturating_mul(3))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(curve: GrowthCurve, base: f64, rate_pct: f64) -> GrowthParams {
        GrowthParams {
            curve,
            base_visitors: base,
            growth_rate: rate_pct / 100.0,
            return_rate: 0.0,
            word_of_mouth_rate: 0.0,
            social_visitors: 0.0,
            lifetime_cap: None,
            seasonal_factors: [1.0; 4],
        }
    }

    fn traffic(points: &[AudiencePoint]) -> Vec<f64> {
        points.iter().map(|p| p.foot_traffic).collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "actual={} expected={}", a, e);
        }
    }

    #[test]
    fn test_exponential_growth() {
        let projector = GrowthProjector::new(&EngineConfig::default());
        let points = projector.project(
            &params(GrowthCurve::Exponential, 100.0, 10.0),
            3,
            ForecastCadence::Weekly,
            1.0,
            None,
        );
        assert_close(&traffic(&points), &[100.0, 110.0, 121.0]);
        let attendance: Vec<f64> = points.iter().map(|p| p.attendance).collect();
        assert_close(&attendance, &[100.0, 110.0, 121.0]);
        assert_eq!(points[2].period, 3);
    }

    #[test]
    fn test_decay_never_negative() {
        let projector = GrowthProjector::new(&EngineConfig::default());
        let points = projector.project(
            &params(GrowthCurve::Decay, 100.0, 50.0),
            3,
            ForecastCadence::Weekly,
            1.0,
            None,
        );
        assert_close(&traffic(&points), &[100.0, 50.0, 25.0]);

        let points = projector.project(
            &params(GrowthCurve::Decay, 100.0, 150.0),
            3,
            ForecastCadence::Weekly,
            1.0,
            None,
        );
        assert_close(&traffic(&points), &[100.0, 0.0, 0.0]);
    }

    #[test]
    fn test_seasonal_by_index_and_by_date() {
        let projector = GrowthProjector::new(&EngineConfig::default());
        let mut p = params(GrowthCurve::Seasonal, 200.0, 0.0);
        p.seasonal_factors = [1.0, 1.5, 0.5, 2.0];

        let points = projector.project(&p, 5, ForecastCadence::Quarterly, 1.0, None);
        assert_close(&traffic(&points), &[200.0, 300.0, 100.0, 400.0, 200.0]);

        // 起始于 3 月底的周: 第 1 期在 Q1,第 2 期在 Q2
        let start = NaiveDate::from_ymd_opt(2026, 3, 25).unwrap();
        let points = projector.project(&p, 2, ForecastCadence::Weekly, 1.0, Some(start));
        assert_close(&traffic(&points), &[200.0, 300.0]);
        assert_eq!(points[1].period_start, NaiveDate::from_ymd_opt(2026, 4, 1));
    }

    #[test]
    fn test_return_and_word_of_mouth_multiplier() {
        let projector = GrowthProjector::new(&EngineConfig::default());
        let mut p = params(GrowthCurve::Exponential, 100.0, 0.0);
        p.return_rate = 0.2;
        p.word_of_mouth_rate = 0.1;
        p.social_visitors = 5.0;
        let points = projector.project(&p, 2, ForecastCadence::Weekly, 1.0, None);
        assert_close(&traffic(&points), &[135.0, 135.0]);
    }

    #[test]
    fn test_lifetime_cap() {
        let projector = GrowthProjector::new(&EngineConfig::default());
        let mut p = params(GrowthCurve::Exponential, 100.0, 0.0);
        p.lifetime_cap = Some(250.0);
        let points = projector.project(&p, 4, ForecastCadence::Weekly, 1.0, None);
        assert_close(&traffic(&points), &[100.0, 100.0, 50.0, 0.0]);
        let total: f64 = traffic(&points).iter().sum();
        assert!(total <= 250.0);
    }

    #[test]
    fn test_average_attendance_guard() {
        assert_eq!(average_event_attendance(120.0, 4.0), 30.0);
        assert_eq!(average_event_attendance(120.0, 0.0), 0.0);

        let projector = GrowthProjector::new(&EngineConfig::default());
        let points = projector.project(
            &params(GrowthCurve::Exponential, 100.0, 0.0),
            1,
            ForecastCadence::PerEvent,
            0.0,
            None,
        );
        assert_eq!(points[0].attendance, 100.0);
        assert_eq!(points[0].average_event_attendance, 0.0);
    }

    #[test]
    fn test_period_start_dates() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 31);
        assert_eq!(
            period_start_date(start, ForecastCadence::Monthly, 2),
            NaiveDate::from_ymd_opt(2026, 2, 28)
        );
        assert_eq!(
            period_start_date(start, ForecastCadence::Quarterly, 2),
            NaiveDate::from_ymd_opt(2026, 4, 30)
        );
        assert_eq!(period_start_date(None, ForecastCadence::Weekly, 3), None);
    }
}
