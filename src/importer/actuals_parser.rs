// ==========================================
// 活动经营预测系统 - 实绩文件解析器
// ==========================================
// 支持: CSV (.csv) / JSON (.json)
// CSV 约定: 首行为表头 (snake_case 字段名),空单元格视为缺失,空行跳过
// ==========================================

use crate::domain::actuals::ActualRecord;
use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ==========================================
// ActualsParser Trait
// ==========================================
pub trait ActualsParser {
    /// 解析文件为实绩记录列表
    fn parse_actuals(&self, path: &Path) -> ImportResult<Vec<ActualRecord>>;
}

fn check_file(path: &Path, expected_ext: &str) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext != expected_ext {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvActualsParser;

impl CsvActualsParser {
    /// 从任意读取源解析 (行号从 1 开始,不含表头)
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<Vec<ActualRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let row = row_idx + 1;
            let record = result?;
            let mut row_map: HashMap<&str, &str> = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    let value = value.trim();
                    if !value.is_empty() {
                        row_map.insert(header.as_str(), value);
                    }
                }
            }

            // 跳过完全空白的行
            if row_map.is_empty() {
                continue;
            }

            records.push(map_row(row, &row_map)?);
        }

        Ok(records)
    }
}

impl ActualsParser for CsvActualsParser {
    fn parse_actuals(&self, path: &Path) -> ImportResult<Vec<ActualRecord>> {
        check_file(path, "csv")?;
        let file = File::open(path)?;
        let records = self.parse_reader(file)?;
        tracing::info!(path = %path.display(), count = records.len(), "实绩 CSV 解析完成");
        Ok(records)
    }
}

fn parse_number(row: usize, field: &str, map: &HashMap<&str, &str>) -> ImportResult<Option<f64>> {
    match map.get(field) {
        None => Ok(None),
        Some(raw) => {
            let cleaned = raw.replace(',', "");
            cleaned
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ImportError::TypeConversionError {
                    row,
                    field: field.to_string(),
                    value: raw.to_string(),
                })
        }
    }
}

fn map_row(row: usize, map: &HashMap<&str, &str>) -> ImportResult<ActualRecord> {
    let period_raw = map.get("period").ok_or_else(|| ImportError::MissingField {
        row,
        field: "period".to_string(),
    })?;
    let period = period_raw
        .parse::<u32>()
        .map_err(|_| ImportError::TypeConversionError {
            row,
            field: "period".to_string(),
            value: period_raw.to_string(),
        })?;

    let recorded_on = match map.get("recorded_on") {
        None => None,
        Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            ImportError::DateFormatError {
                row,
                field: "recorded_on".to_string(),
                value: raw.to_string(),
            }
        })?),
    };

    Ok(ActualRecord {
        period,
        recorded_on,
        foot_traffic: parse_number(row, "foot_traffic", map)?,
        events: parse_number(row, "events", map)?,
        ticket_revenue: parse_number(row, "ticket_revenue", map)?,
        fb_revenue: parse_number(row, "fb_revenue", map)?,
        merchandise_revenue: parse_number(row, "merchandise_revenue", map)?,
        digital_revenue: parse_number(row, "digital_revenue", map)?,
        marketing_costs: parse_number(row, "marketing_costs", map)?,
        staffing_costs: parse_number(row, "staffing_costs", map)?,
        event_costs: parse_number(row, "event_costs", map)?,
        setup_costs: parse_number(row, "setup_costs", map)?,
        fb_cogs: parse_number(row, "fb_cogs", map)?,
        merchandise_cogs: parse_number(row, "merchandise_cogs", map)?,
        total_revenue: parse_number(row, "total_revenue", map)?,
        total_costs: parse_number(row, "total_costs", map)?,
        weekly_profit: parse_number(row, "weekly_profit", map)?,
        notes: map.get("notes").map(|s| s.to_string()),
        channel_performance: Vec::new(),
    })
}

// ==========================================
// JSON Parser 实现
// ==========================================
pub struct JsonActualsParser;

impl ActualsParser for JsonActualsParser {
    fn parse_actuals(&self, path: &Path) -> ImportResult<Vec<ActualRecord>> {
        check_file(path, "json")?;
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<ActualRecord> = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), count = records.len(), "实绩 JSON 解析完成");
        Ok(records)
    }
}

// ==========================================
// 按扩展名分派
// ==========================================
pub struct UniversalActualsParser;

impl ActualsParser for UniversalActualsParser {
    fn parse_actuals(&self, path: &Path) -> ImportResult<Vec<ActualRecord>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvActualsParser.parse_actuals(path),
            "json" => JsonActualsParser.parse_actuals(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
