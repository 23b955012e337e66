use serde::{Deserialize, Serialize};

use crate::formula::FormulaLimits;

/// Settings for a [`RuleEngine`](crate::RuleEngine).
///
/// Every key is optional when deserializing; missing keys take their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Limits applied to `calculate_value` formulas.
    pub formula: FormulaLimits,
    /// Indent exported rule sets.
    pub pretty_export: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            formula: FormulaLimits::default(),
            pretty_export: true,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn formula_limits(mut self, limits: FormulaLimits) -> Self {
        self.formula = limits;
        self
    }

    #[must_use]
    pub fn compact_export(mut self) -> Self {
        self.pretty_export = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.formula.max_length, 4096);
        assert_eq!(config.formula.max_depth, 64);
        assert!(config.pretty_export);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"formula":{"maxDepth":8},"prettyExport":false}"#).unwrap();
        assert_eq!(config.formula.max_depth, 8);
        assert_eq!(config.formula.max_length, 4096);
        assert!(!config.pretty_export);

        let empty: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, EngineConfig::default());
    }

    #[test]
    fn builder_methods() {
        let limits = FormulaLimits {
            max_length: 100,
            max_depth: 4,
        };
        let config = EngineConfig::default()
            .formula_limits(limits)
            .compact_export();
        assert_eq!(config.formula, limits);
        assert!(!config.pretty_export);
    }
}
