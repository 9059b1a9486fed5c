use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::analysis::rating::Weights;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub rating: RatingConfig,
    /// 診断情報（視点分類・スナップショット計画）を標準エラーに出す
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct RatingConfig {
    /// 指標の重み（合計1.0必須、未指定は既定値）
    #[serde(default)]
    pub weights: Weights,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.rating.weights.validate()?;
        Ok(config)
    }

    /// 設定ファイルがなければ既定値で続行
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "設定 {} を読めないため既定値を使用: {:#}",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }
}
