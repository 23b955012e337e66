
use formlogic::{evaluate, field, Action, FormData, Rule, RuleDraft, RuleEngine, Value};
use proptest::prelude::*;
use strategies::{arb_form_data, arb_rules, arb_value, schema};

// ---------------------------------------------------------------------------
// Invariant 1: Determinism
//
// The same fields, rules and form data always produce the same result.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn evaluation_is_idempotent(rules in arb_rules(6), data in arb_form_data()) {
        let fields = schema();
        let first = evaluate(&fields, &rules, &data);
        for _ in 0..3 {
            let again = evaluate(&fields, &rules, &data);
            prop_assert_eq!(&first, &again, "repeated evaluation diverged");
        }
    }

    #[test]
    fn input_order_only_matters_within_a_priority(rules in arb_rules(6), data in arb_form_data()) {
        let fields = schema();
        let mut sorted = rules.clone();
        sorted.sort_by(|a, b| b.priority.cmp(&a.priority));
        prop_assert_eq!(
            evaluate(&fields, &rules, &data),
            evaluate(&fields, &sorted, &data)
        );
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Priority ordering
//
// Fired rules are active and appear in non-increasing priority order.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn fired_rules_follow_priority(rules in arb_rules(8), data in arb_form_data()) {
        let result = evaluate(&schema(), &rules, &data);
        let fired: Vec<&Rule> = result
            .fired_rules()
            .iter()
            .map(|id| rules.iter().find(|r| &r.id == id).unwrap())
            .collect();
        prop_assert!(fired.iter().all(|r| r.active));
        prop_assert!(fired.windows(2).all(|w| w[0].priority >= w[1].priority));
    }

    #[test]
    fn no_fired_rules_means_initial_state(rules in arb_rules(4), data in arb_form_data()) {
        let fields = schema();
        let result = evaluate(&fields, &rules, &data);
        if result.fired_rules().is_empty() {
            prop_assert_eq!(result, evaluate(&fields, &[], &data));
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Emptiness
//
// `is_empty` holds exactly for missing, null, false, 0, NaN, "" and [].
// ---------------------------------------------------------------------------

fn expected_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => *n == 0.0 || n.is_nan(),
        Value::String(s) => s.is_empty(),
        Value::List(items) => items.is_empty(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn is_empty_matches_falsiness(value in arb_value()) {
        let rules = vec![Rule::from_draft(
            "r",
            RuleDraft::new("empty")
                .when(field("note").is_empty())
                .then(Action::disable("note")),
        )];
        let data = FormData::new().set("note", value.clone());
        let result = evaluate(&schema(), &rules, &data);
        prop_assert_eq!(result.is_disabled("note"), expected_empty(&value), "value: {:?}", value);
    }

    #[test]
    fn is_empty_and_is_not_empty_disagree(value in arb_value()) {
        let rules = vec![
            Rule::from_draft(
                "a",
                RuleDraft::new("a").when(field("note").is_empty()).then(Action::disable("note")),
            ),
            Rule::from_draft(
                "b",
                RuleDraft::new("b").when(field("note").is_not_empty()).then(Action::disable("note")),
            ),
        ];
        let data = FormData::new().set("note", value);
        let result = evaluate(&schema(), &rules, &data);
        prop_assert_eq!(result.fired_rules().len(), 1);
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Export / import round trip
//
// Importing an exported rule set yields an equal rule set.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn export_then_import_is_identity(rules in arb_rules(6)) {
        let source = RuleEngine::new(schema()).with_rules(rules);
        let json = source.export_rules().unwrap();

        let mut target = RuleEngine::new(schema());
        let count = target.import_rules(&json).unwrap();
        prop_assert_eq!(count, source.rules().len());
        prop_assert_eq!(target.rules(), source.rules());
    }

    #[test]
    fn generated_rules_validate(rules in arb_rules(6)) {
        let engine = RuleEngine::new(schema());
        for rule in &rules {
            let report = engine.validate_rule(rule);
            prop_assert!(report.valid, "{:?}", report.errors);
        }
    }
}
