use crate::engine::AnalysisResult;
use anyhow::Result;

pub fn report(results: &[AnalysisResult]) -> Result<()> {
    println!("{}", format(results)?);
    Ok(())
}

/// Format results as a JSON array string without printing.
pub fn format(results: &[AnalysisResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}
