use crate::error::{AnalysisError, Result};

pub const DEFAULT_TOP_N: usize = 20;

/// Knobs for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// How many subcategories each ranked list keeps per location.
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl AnalysisConfig {
    pub fn with_top_n(top_n: usize) -> Result<Self> {
        if top_n == 0 {
            return Err(AnalysisError::Config("top_n must be at least 1".into()));
        }
        Ok(AnalysisConfig { top_n })
    }
}
