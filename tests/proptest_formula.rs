use formlogic::{calculate_formula, FormData, Formula};
use proptest::prelude::*;

fn calc(formula: &str, data: &FormData) -> f64 {
    calculate_formula(formula, |id| data.get(id))
}

/// Small integers keep every intermediate result exact.
fn arb_int() -> impl Strategy<Value = i64> {
    -1000_i64..1000
}

/// A well-formed expression over literals, paired with its expected value
/// when no division is involved.
fn arb_expr() -> impl Strategy<Value = (String, i64)> {
    let leaf = (0_i64..10).prop_map(|n| (n.to_string(), n));
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|((a, x), (b, y))| (format!("({a} + {b})"), x + y)),
            (inner.clone(), inner.clone()).prop_map(|((a, x), (b, y))| (format!("({a} - {b})"), x - y)),
            (inner.clone(), inner.clone()).prop_map(|((a, x), (b, y))| (format!("{a} * {b}"), x * y)),
            inner.prop_map(|(a, x)| (format!("-{a}"), -x)),
        ]
    })
}

proptest! {
    /// Whatever the input, the result is a finite number.
    #[test]
    fn always_finite(formula in ".{0,40}", a in any::<f64>()) {
        let data = FormData::new().set("a", a);
        let n = calc(&formula, &data);
        prop_assert!(n.is_finite());
    }

    /// Text with any character outside the arithmetic alphabet fails closed.
    #[test]
    fn disallowed_characters_yield_zero(
        prefix in "[0-9+*/ ]{0,6}",
        bad in "[a-zA-Z;=\\[\\]'\"`$_!<>&|]",
        suffix in "[0-9+*/ ]{0,6}",
    ) {
        let formula = format!("{prefix}{bad}{suffix}");
        prop_assert_eq!(calc(&formula, &FormData::new()), 0.0);
    }

    /// Substituted references behave like the literal numbers.
    #[test]
    fn references_match_literals(a in arb_int(), b in arb_int()) {
        let data = FormData::new().set("a", a).set("b", b.to_string());
        prop_assert_eq!(calc("{a} + {b}", &data), (a + b) as f64);
        prop_assert_eq!(calc("{a} - {b}", &data), (a - b) as f64);
        prop_assert_eq!(calc("{a} * {b}", &data), (a * b) as f64);
    }

    /// Division by a zero-valued reference fails closed.
    #[test]
    fn division_by_zero_yields_zero(a in arb_int()) {
        let data = FormData::new().set("a", a).set("z", 0_i64);
        prop_assert_eq!(calc("{a} / {z}", &data), 0.0);
    }

    /// Generated expressions evaluate to their expected value.
    #[test]
    fn generated_expressions((src, expected) in arb_expr()) {
        let parsed = Formula::parse(&src).unwrap();
        prop_assert_eq!(parsed.eval().unwrap() + 0.0, expected as f64);
        prop_assert_eq!(calc(&src, &FormData::new()), expected as f64);
    }

    /// The result is never negative zero.
    #[test]
    fn never_negative_zero(a in arb_int()) {
        let data = FormData::new().set("a", a);
        let n = calc("{a} * 0 - 0", &data);
        prop_assert!(n != 0.0 || n.is_sign_positive());
    }
}
