use thiserror::Error;

/// # Summary
/// 股票目录构建错误。
///
/// # Invariants
/// - 仅在构建目录时产生，查询 (`resolve`) 永不失败。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DirectoryError {
    /// 同一地区内出现重复的展示名称
    #[error("Duplicate company '{name}' in region '{region}'")]
    DuplicateName { region: String, name: String },
    /// 条目的股票代码为空
    #[error("Empty symbol for company '{name}' in region '{region}'")]
    EmptySymbol { region: String, name: String },
}
