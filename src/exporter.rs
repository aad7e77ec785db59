// ==========================================
// 活动经营预测系统 - 报表导出
// ==========================================
// 职责: 预测序列 / 报表期序列 → CSV
// ==========================================

use crate::domain::projection::WeeklyProjection;
use crate::engine::reconcile::BlendedPeriod;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// CSV 行 (扁平结构)
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    period: u32,
    period_start: String,
    source: &'a str,
    foot_traffic: f64,
    events: f64,
    attendance: f64,
    average_event_attendance: f64,
    ticket_revenue: f64,
    fb_revenue: f64,
    merchandise_revenue: f64,
    digital_revenue: f64,
    total_revenue: f64,
    marketing_costs: f64,
    staffing_costs: f64,
    event_costs: f64,
    setup_costs: f64,
    fb_cogs: f64,
    merchandise_cogs: f64,
    total_costs: f64,
    weekly_profit: f64,
    cumulative_profit: f64,
}

impl<'a> ExportRow<'a> {
    fn new(record: &WeeklyProjection, source: &'a str) -> Self {
        Self {
            period: record.period,
            period_start: record
                .period_start
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            source,
            foot_traffic: record.foot_traffic,
            events: record.events,
            attendance: record.attendance,
            average_event_attendance: record.average_event_attendance,
            ticket_revenue: record.ticket_revenue,
            fb_revenue: record.fb_revenue,
            merchandise_revenue: record.merchandise_revenue,
            digital_revenue: record.digital_revenue,
            total_revenue: record.total_revenue,
            marketing_costs: record.marketing_costs,
            staffing_costs: record.staffing_costs,
            event_costs: record.event_costs,
            setup_costs: record.setup_costs,
            fb_cogs: record.fb_cogs,
            merchandise_cogs: record.merchandise_cogs,
            total_costs: record.total_costs,
            weekly_profit: record.weekly_profit,
            cumulative_profit: record.cumulative_profit,
        }
    }
}

/// 写出预测序列
pub fn write_projection_csv<W: Write>(writer: W, records: &[WeeklyProjection]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(ExportRow::new(record, "PROJECTED"))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 写出报表期序列 (含数据来源列)
pub fn write_blended_csv<W: Write>(writer: W, periods: &[BlendedPeriod]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for period in periods {
        let source = period.source.to_string();
        csv_writer.serialize(ExportRow::new(&period.record, &source))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 导出到文件
pub fn export_blended_to_file(path: &Path, periods: &[BlendedPeriod]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("创建导出文件失败: {}", path.display()))?;
    write_blended_csv(file, periods)?;
    tracing::info!(path = %path.display(), rows = periods.len(), "报表导出完成");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DataSource;
    use chrono::NaiveDate;

    #[test]
    fn test_write_projection_csv() {
        let records = vec![WeeklyProjection {
            period: 1,
            period_start: NaiveDate::from_ymd_opt(2026, 3, 2),
            foot_traffic: 100.0,
            ticket_revenue: 1000.0,
            total_revenue: 1000.0,
            weekly_profit: 1000.0,
            cumulative_profit: 1000.0,
            ..Default::default()
        }];
        let mut buffer = Vec::new();
        write_projection_csv(&mut buffer, &records).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let mut lines = output.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("period,period_start,source,foot_traffic"));
        assert!(header.contains(",attendance,average_event_attendance,"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("1,2026-03-02,PROJECTED,100.0"));
    }

    #[test]
    fn test_write_blended_csv_marks_source() {
        let periods = vec![
            BlendedPeriod {
                period: 1,
                source: DataSource::Actual,
                record: WeeklyProjection {
                    period: 1,
                    ..Default::default()
                },
            },
            BlendedPeriod {
                period: 2,
                source: DataSource::Projected,
                record: WeeklyProjection {
                    period: 2,
                    ..Default::default()
                },
            },
        ];
        let mut buffer = Vec::new();
        write_blended_csv(&mut buffer, &periods).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().count(), 3);
        assert!(output.contains("1,,ACTUAL,"));
        assert!(output.contains("2,,PROJECTED,"));
    }
}
