use formlogic::{field, Action, FieldType, FormData, FormField, RuleDraft, RuleEngine};

fn main() {
    let mut engine = RuleEngine::new(vec![
        FormField::new("quantity", FieldType::Number),
        FormField::new("unit_price", FieldType::Number),
        FormField::new("express", FieldType::Checkbox),
        FormField::new("shipping", FieldType::Number),
        FormField::new("total", FieldType::Number),
    ]);

    // Shipping is written first so the total can read it in the same pass.
    engine.add_rule(
        RuleDraft::new("Express shipping")
            .when(field("express").is_checked())
            .then(Action::set_value("shipping", 15_i64))
            .priority(10),
    );
    engine.add_rule(
        RuleDraft::new("Order total")
            .when(field("quantity").greater_than(0_i64))
            .then(Action::calculate("total", "{quantity} * {unit_price} + {shipping}"))
            .then(Action::disable("total")),
    );

    let data = FormData::new()
        .set("quantity", "3")
        .set("unit_price", 19.5)
        .set("express", true);
    let result = engine.evaluate(&data);
    println!("total = {:?}", result.value("total"));

    // Rule sets travel as JSON
    match engine.export_rules() {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("export failed: {err}"),
    }
}
