use crate::directory::error::DirectoryError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// # Summary
/// 目录中的单个公司条目。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    // 展示名称 (例如: Apple)
    pub name: String,
    // 股票代码 (例如: AAPL, TCS.NS)
    pub symbol: String,
}

/// # Summary
/// 按地区分组的公司列表。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    // 地区名称 (例如: US, India)
    pub name: String,
    // 地区内的公司，保持声明顺序
    pub companies: Vec<Company>,
}

impl Region {
    /// 以 `(展示名称, 股票代码)` 列表快速构建地区。
    pub fn new(name: impl Into<String>, companies: &[(&str, &str)]) -> Self {
        Self {
            name: name.into(),
            companies: companies
                .iter()
                .map(|(name, symbol)| Company {
                    name: (*name).to_string(),
                    symbol: (*symbol).to_string(),
                })
                .collect(),
        }
    }
}

/// # Summary
/// 名称解析结果。
///
/// # Invariants
/// - 两种结果都携带可直接用于行情查询的代码，`Guessed` 仅表示代码未经目录确认。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 在目录中精确命中
    Listed { region: String, symbol: String },
    /// 未命中，按命名惯例将原始输入转为大写作为代码
    Guessed { symbol: String },
}

impl Resolution {
    /// 解析出的股票代码。
    pub fn symbol(&self) -> &str {
        match self {
            Resolution::Listed { symbol, .. } | Resolution::Guessed { symbol } => symbol,
        }
    }

    /// 是否为未经目录确认的猜测代码。
    pub fn is_guess(&self) -> bool {
        matches!(self, Resolution::Guessed { .. })
    }
}

/// # Summary
/// 不可变的公司名称 → 股票代码目录，按地区分组。
///
/// # Invariants
/// - 同一地区内展示名称唯一，且每个条目的代码非空 (构建时校验)。
/// - 地区与条目的顺序即页面下拉框的展示顺序。
/// - 构建后不可修改，通过 `Arc` 在请求间共享。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<Region>", into = "Vec<Region>")]
pub struct SymbolDirectory {
    regions: Vec<Region>,
}

impl SymbolDirectory {
    /// # Summary
    /// 由地区列表构建目录。
    ///
    /// # Logic
    /// 1. 逐个地区检查展示名称是否重复。
    /// 2. 检查代码是否为空。
    ///
    /// # Arguments
    /// * `regions`: 按展示顺序排列的地区列表。
    ///
    /// # Returns
    /// 校验通过返回目录，否则返回 `DirectoryError`。
    pub fn new(regions: Vec<Region>) -> Result<Self, DirectoryError> {
        for region in &regions {
            let mut seen = HashSet::new();
            for company in &region.companies {
                if !seen.insert(company.name.as_str()) {
                    return Err(DirectoryError::DuplicateName {
                        region: region.name.clone(),
                        name: company.name.clone(),
                    });
                }
                if company.symbol.trim().is_empty() {
                    return Err(DirectoryError::EmptySymbol {
                        region: region.name.clone(),
                        name: company.name.clone(),
                    });
                }
            }
        }
        Ok(Self { regions })
    }

    /// # Summary
    /// 内置目录，覆盖美国、印度及其他全球主要公司。
    pub fn builtin() -> Self {
        Self {
            regions: vec![
                Region::new(
                    "US",
                    &[
                        ("Apple", "AAPL"),
                        ("Tesla", "TSLA"),
                        ("Google", "GOOGL"),
                        ("Amazon", "AMZN"),
                        ("Microsoft", "MSFT"),
                        ("Facebook / Meta", "META"),
                        ("Netflix", "NFLX"),
                        ("Nvidia", "NVDA"),
                        ("Intel", "INTC"),
                        ("Adobe", "ADBE"),
                        ("Paypal", "PYPL"),
                        ("Disney", "DIS"),
                        ("Spotify", "SPOT"),
                        ("Zoom", "ZM"),
                    ],
                ),
                Region::new(
                    "India",
                    &[
                        ("Tata Consultancy Services", "TCS.NS"),
                        ("Tata Motors", "TATAMOTORS.NS"),
                        ("Reliance Industries", "RELIANCE.NS"),
                        ("Infosys", "INFY.NS"),
                        ("HDFC Bank", "HDFCBANK.NS"),
                        ("ICICI Bank", "ICICIBANK.NS"),
                        ("State Bank of India", "SBIN.NS"),
                        ("Larsen & Toubro", "LT.NS"),
                        ("Maruti Suzuki", "MARUTI.NS"),
                        ("Mahindra & Mahindra", "M&M.NS"),
                    ],
                ),
                Region::new(
                    "Global",
                    &[
                        ("Samsung Electronics", "005930.KS"),
                        ("Toyota", "7203.T"),
                        ("Sony", "6758.T"),
                        ("Alibaba", "BABA"),
                        ("Baidu", "BIDU"),
                    ],
                ),
            ],
        }
    }

    /// # Summary
    /// 将展示名称解析为股票代码，永不失败。
    ///
    /// # Logic
    /// 1. 按地区顺序查找与输入完全一致 (区分大小写) 的展示名称。
    /// 2. 命中返回 `Listed`。
    /// 3. 未命中则将输入原样转为大写，返回 `Guessed`。该代码是否可交易由行情源判定。
    ///
    /// # Arguments
    /// * `display_name`: 用户选择或输入的公司名称。
    ///
    /// # Returns
    /// 解析结果 `Resolution`。
    pub fn resolve(&self, display_name: &str) -> Resolution {
        self.lookup(display_name)
            .map(|(region, company)| Resolution::Listed {
                region: region.name.clone(),
                symbol: company.symbol.clone(),
            })
            .unwrap_or_else(|| Resolution::Guessed {
                symbol: display_name.to_uppercase(),
            })
    }

    /// 精确查找展示名称所在的地区与条目。
    pub fn lookup(&self, display_name: &str) -> Option<(&Region, &Company)> {
        self.regions.iter().find_map(|region| {
            region
                .companies
                .iter()
                .find(|c| c.name == display_name)
                .map(|company| (region, company))
        })
    }

    /// 按展示顺序遍历所有地区。
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// 目录内的条目总数。
    pub fn len(&self) -> usize {
        self.regions.iter().map(|r| r.companies.len()).sum()
    }

    /// 目录是否为空。
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SymbolDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<Vec<Region>> for SymbolDirectory {
    type Error = DirectoryError;

    fn try_from(regions: Vec<Region>) -> Result<Self, Self::Error> {
        Self::new(regions)
    }
}

impl From<SymbolDirectory> for Vec<Region> {
    fn from(directory: SymbolDirectory) -> Self {
        directory.regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_name_resolves_to_its_symbol() {
        let directory = SymbolDirectory::builtin();
        for region in directory.regions() {
            for company in &region.companies {
                let resolution = directory.resolve(&company.name);
                assert!(!resolution.is_guess(), "{} should be listed", company.name);
                assert_eq!(resolution.symbol(), company.symbol);
            }
        }
        assert_eq!(directory.len(), 29);
    }

    #[test]
    fn test_unknown_name_falls_back_to_uppercase() {
        let directory = SymbolDirectory::builtin();

        let resolution = directory.resolve("brk-b");
        assert!(resolution.is_guess());
        assert_eq!(resolution.symbol(), "BRK-B");

        // 名称匹配区分大小写
        assert_eq!(directory.resolve("apple").symbol(), "APPLE");
        assert_eq!(directory.resolve("Apple").symbol(), "AAPL");
    }

    #[test]
    fn test_listed_resolution_carries_region() {
        let directory = SymbolDirectory::builtin();
        assert_eq!(
            directory.resolve("Toyota"),
            Resolution::Listed {
                region: "Global".to_string(),
                symbol: "7203.T".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_name_in_region_rejected() {
        let result = SymbolDirectory::new(vec![Region::new(
            "US",
            &[("Apple", "AAPL"), ("Apple", "APLE")],
        )]);
        assert_eq!(
            result,
            Err(DirectoryError::DuplicateName {
                region: "US".to_string(),
                name: "Apple".to_string(),
            })
        );
    }

    #[test]
    fn test_same_name_across_regions_allowed() {
        let directory = SymbolDirectory::new(vec![
            Region::new("US", &[("Shell", "SHEL")]),
            Region::new("Europe", &[("Shell", "SHEL.L")]),
        ])
        .unwrap();
        // 按地区顺序命中第一个
        assert_eq!(directory.resolve("Shell").symbol(), "SHEL");
    }

    #[test]
    fn test_empty_symbol_rejected() {
        let result = SymbolDirectory::new(vec![Region::new("US", &[("Ghost", " ")])]);
        assert!(matches!(result, Err(DirectoryError::EmptySymbol { .. })));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"[{"name":"US","companies":[{"name":"A","symbol":"A"},{"name":"A","symbol":"B"}]}]"#;
        assert!(serde_json::from_str::<SymbolDirectory>(json).is_err());

        let json = r#"[{"name":"Test","companies":[{"name":"Fixture Co","symbol":"FIX"}]}]"#;
        let directory: SymbolDirectory = serde_json::from_str(json).unwrap();
        assert_eq!(directory.resolve("Fixture Co").symbol(), "FIX");
    }
}
