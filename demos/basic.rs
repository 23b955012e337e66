use formlogic::{field, Action, FieldType, FormData, FormField, RuleDraft, RuleEngine};

fn main() {
    // Define the form
    let mut engine = RuleEngine::new(vec![
        FormField::new("account_type", FieldType::Radio).required(),
        FormField::new("company", FieldType::Text),
        FormField::new("vat_number", FieldType::Text),
        FormField::new("newsletter", FieldType::Checkbox),
    ]);

    // Define rules
    engine.add_rule(
        RuleDraft::new("Business details")
            .when(field("account_type").equals("business"))
            .then(Action::require("company"))
            .then(Action::require("vat_number"))
            .priority(10),
    );
    engine.add_rule(
        RuleDraft::new("Personal accounts")
            .when(field("account_type").equals("personal"))
            .when(field("account_type").is_empty().or())
            .then(Action::hide("company"))
            .then(Action::hide("vat_number")),
    );

    for rule in engine.rules() {
        let report = engine.validate_rule(rule);
        println!("{} ({}): valid = {}", rule.name, rule.id, report.valid);
    }

    // Evaluate against two submissions
    for kind in ["business", "personal"] {
        let data = FormData::new().set("account_type", kind);
        println!("{kind}: {}", engine.evaluate(&data));
    }
}
