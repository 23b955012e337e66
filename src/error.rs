use std::fmt;

use thiserror::Error;

use crate::types::ValidationError;

/// A rule that failed import, with every problem found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRejection {
    /// 1-based position in the imported array.
    pub index: usize,
    pub rule_id: Option<String>,
    pub rule_name: Option<String>,
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for RuleRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}", self.index)?;
        match (&self.rule_name, &self.rule_id) {
            (Some(name), _) if !name.is_empty() => write!(f, " '{name}'")?,
            (_, Some(id)) => write!(f, " ({id})")?,
            _ => {}
        }
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, ": {}", messages.join("; "))
    }
}

/// Why a rule set import was refused. Nothing is imported in either case.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("rule set is not a JSON array: {0}")]
    Malformed(String),

    #[error("{} rule(s) rejected: {}", .rejections.len(), join(.rejections))]
    Rejected { rejections: Vec<RuleRejection> },
}

impl ImportError {
    /// Every rejection message, one per rejected rule.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            ImportError::Malformed(_) => vec![self.to_string()],
            ImportError::Rejected { rejections } => {
                rejections.iter().map(ToString::to_string).collect()
            }
        }
    }
}

fn join(rejections: &[RuleRejection]) -> String {
    rejections
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Unified error type covering import, JSON and I/O.
///
/// Returned by [`RuleEngine::export_rules`](crate::RuleEngine::export_rules)
/// and the file helpers.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejection() -> RuleRejection {
        RuleRejection {
            index: 2,
            rule_id: Some("r2".into()),
            rule_name: Some("Broken".into()),
            errors: vec![
                ValidationError::NoConditions,
                ValidationError::MissingFormula { index: 1 },
            ],
        }
    }

    #[test]
    fn rejection_display() {
        assert_eq!(
            rejection().to_string(),
            "rule 2 'Broken': rule must have at least one condition; \
             action 1 (calculate_value) is missing a formula"
        );
    }

    #[test]
    fn rejection_display_falls_back_to_id() {
        let r = RuleRejection {
            rule_name: None,
            ..rejection()
        };
        assert!(r.to_string().starts_with("rule 2 (r2): "));
    }

    #[test]
    fn import_error_display() {
        let err = ImportError::Rejected {
            rejections: vec![rejection()],
        };
        assert!(err.to_string().starts_with("1 rule(s) rejected: rule 2 'Broken'"));
        assert_eq!(err.messages().len(), 1);

        let err = ImportError::Malformed("expected value at line 1 column 1".into());
        assert_eq!(
            err.to_string(),
            "rule set is not a JSON array: expected value at line 1 column 1"
        );
    }

    #[test]
    fn engine_error_is_transparent() {
        let err: EngineError = ImportError::Malformed("x".into()).into();
        assert_eq!(err.to_string(), "rule set is not a JSON array: x");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: EngineError = io.into();
        assert_eq!(err.to_string(), "missing");
    }
}
