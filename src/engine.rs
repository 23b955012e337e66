use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, ImportError, RuleRejection};
use crate::evaluate::{evaluate_with_config, sort_rules};
use crate::types::{
    EvaluationResult, FieldIndex, FormData, FormField, Rule, RuleDraft, RulePatch,
    ValidationError, ValidationReport,
};
use crate::validate::validate;

/// Owns the field definitions and the ordered rule set of one form.
///
/// Rules are kept sorted by descending priority, ties in insertion order. The
/// engine holds no state between evaluations, so a shared reference can be
/// evaluated from many threads at once.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    fields: Vec<FormField>,
    rules: Vec<Rule>,
    config: EngineConfig,
}

impl RuleEngine {
    #[must_use]
    pub fn new(fields: Vec<FormField>) -> Self {
        Self::with_config(fields, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(fields: Vec<FormField>, config: EngineConfig) -> Self {
        Self {
            fields,
            rules: Vec::new(),
            config,
        }
    }

    /// Replace the rule set without validating it.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        sort_rules(&mut self.rules);
        self
    }

    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate the engine's rules against a snapshot of form values.
    pub fn evaluate(&self, data: &FormData) -> EvaluationResult {
        evaluate_with_config(&self.fields, &self.rules, data, &self.config.formula)
    }

    // -- Rule management ----------------------------------------------------

    /// Store a new rule under a fresh id. Drafts are not validated here; use
    /// [`RuleEngine::validate_rule`] first when the input is untrusted.
    pub fn add_rule(&mut self, draft: RuleDraft) -> Rule {
        let rule = Rule::from_draft(Uuid::new_v4().to_string(), draft);
        debug!(id = %rule.id, name = %rule.name, priority = rule.priority, "rule added");
        self.rules.push(rule.clone());
        sort_rules(&mut self.rules);
        rule
    }

    /// Merge a patch into an existing rule. Returns the updated rule, or
    /// `None` if no rule has this id.
    pub fn update_rule(&mut self, id: &str, patch: RulePatch) -> Option<Rule> {
        let rule = self.rules.iter_mut().find(|r| r.id == id)?;
        rule.apply(patch);
        let updated = rule.clone();
        sort_rules(&mut self.rules);
        debug!(id, "rule updated");
        Some(updated)
    }

    /// Returns `true` if a rule was removed.
    pub fn delete_rule(&mut self, id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.id != id);
        let removed = self.rules.len() != before;
        if removed {
            debug!(id, "rule deleted");
        }
        removed
    }

    /// Check a rule against this engine's fields.
    pub fn validate_rule(&self, rule: &Rule) -> ValidationReport {
        let index = FieldIndex::new(&self.fields);
        ValidationReport::from_errors(validate(rule, &index, &self.config.formula))
    }

    // -- Import / export ----------------------------------------------------

    /// Serialize the rule set as a JSON array.
    ///
    /// [`import_rules`](Self::import_rules) reads the output back into an
    /// equal rule set only when every rule passes
    /// [`validate_rule`](Self::validate_rule). Rules added through
    /// [`add_rule`](Self::add_rule) skip validation, so an exported rule with
    /// no conditions is rejected on import.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] if serialization fails.
    pub fn export_rules(&self) -> Result<String, EngineError> {
        let json = if self.config.pretty_export {
            serde_json::to_string_pretty(&self.rules)?
        } else {
            serde_json::to_string(&self.rules)?
        };
        Ok(json)
    }

    /// Replace the rule set with the rules in a JSON array.
    ///
    /// The import is all-or-nothing: every rule is read and validated, and
    /// if any of them fails the current rules are kept and every failing rule
    /// is reported. Returns the number of imported rules. Output of
    /// [`export_rules`](Self::export_rules) round-trips unchanged when its
    /// rules pass [`validate_rule`](Self::validate_rule).
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Malformed`] if the document is not a JSON
    /// array, or [`ImportError::Rejected`] listing each invalid rule.
    pub fn import_rules(&mut self, json: &str) -> Result<usize, ImportError> {
        let items: Vec<serde_json::Value> = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "rule import rejected: malformed document");
            ImportError::Malformed(e.to_string())
        })?;

        let index = FieldIndex::new(&self.fields);
        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(items.len());
        let mut rejections = Vec::new();

        for (i, item) in items.into_iter().enumerate() {
            let rule_id = text_of(&item, "id");
            let rule_name = text_of(&item, "name");
            let errors = match serde_json::from_value::<Rule>(item) {
                Ok(rule) => {
                    let mut errors = validate(&rule, &index, &self.config.formula);
                    if !seen.insert(rule.id.clone()) {
                        errors.push(ValidationError::DuplicateRuleId {
                            id: rule.id.clone(),
                        });
                    }
                    rules.push(rule);
                    errors
                }
                Err(e) => vec![ValidationError::Malformed {
                    reason: e.to_string(),
                }],
            };
            if !errors.is_empty() {
                rejections.push(RuleRejection {
                    index: i + 1,
                    rule_id,
                    rule_name,
                    errors,
                });
            }
        }

        if !rejections.is_empty() {
            warn!(
                rejected = rejections.len(),
                "rule import rejected, rule set unchanged"
            );
            return Err(ImportError::Rejected { rejections });
        }

        sort_rules(&mut rules);
        let count = rules.len();
        self.rules = rules;
        info!(count, "rules imported");
        Ok(count)
    }

    /// Write [`RuleEngine::export_rules`] output to a file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] on serialization or I/O failure.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let json = self.export_rules()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read a file and pass it to [`RuleEngine::import_rules`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] on I/O failure or a refused import.
    pub fn import_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, EngineError> {
        let json = std::fs::read_to_string(path)?;
        Ok(self.import_rules(&json)?)
    }
}

fn text_of(item: &serde_json::Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}
