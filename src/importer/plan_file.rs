// ==========================================
// 活动经营预测系统 - 预测方案文件读取
// ==========================================
// 格式: JSON (ForecastPlan)
// ==========================================

use crate::domain::plan::ForecastPlan;
use crate::importer::error::{ImportError, ImportResult};
use std::path::Path;

/// 读取预测方案文件
pub fn load_plan(path: &Path) -> ImportResult<ForecastPlan> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext != "json" {
        return Err(ImportError::UnsupportedFormat(ext));
    }

    let raw = std::fs::read_to_string(path)?;
    let plan = parse_plan(&raw)?;

    tracing::info!(
        path = %path.display(),
        product_id = %plan.product.product_id,
        scenarios = plan.scenarios.len(),
        actuals = plan.actuals.len(),
        "预测方案加载完成"
    );

    Ok(plan)
}

/// 解析预测方案 JSON
pub fn parse_plan(raw: &str) -> ImportResult<ForecastPlan> {
    Ok(serde_json::from_str(raw)?)
}

/// 写出预测方案文件 (格式化 JSON)
pub fn save_plan(plan: &ForecastPlan, path: &Path) -> ImportResult<()> {
    let raw = serde_json::to_string_pretty(plan)?;
    std::fs::write(path, raw)?;
    Ok(())
}
