use token_launch_sdk::{FieldError, TokenForm, Violation};

fn filled() -> TokenForm {
    TokenForm {
        name: "  Feels Good ".to_string(),
        num_decimals: "2".to_string(),
        symbol: "FG".to_string(),
        description: None,
        image: None,
        num_token_initial: "100".to_string(),
    }
}

#[test]
fn test_form_parses_from_camel_case_json() {
    let form: TokenForm = serde_json::from_str(
        r#"{
            "name": "Feels Good",
            "numDecimals": "6",
            "symbol": "FG",
            "description": "community token",
            "image": null,
            "numTokenInitial": "1000000"
        }"#,
    )
    .unwrap();

    let attrs = form.validate().unwrap();
    assert_eq!(attrs.num_decimals, 6);
    assert_eq!(attrs.num_tokens, 1_000_000.0);
    assert_eq!(attrs.description.as_deref(), Some("community token"));
    assert_eq!(attrs.image, None);
}

#[test]
fn test_text_fields_are_trimmed() {
    let attrs = filled().validate().unwrap();
    assert_eq!(attrs.name, "Feels Good");
}

#[test]
fn test_zero_supply_is_allowed() {
    let mut form = filled();
    form.num_token_initial = "0".to_string();
    assert_eq!(form.validate().unwrap().num_tokens, 0.0);
}

#[test]
fn test_fractional_supply_is_allowed() {
    let mut form = filled();
    form.num_token_initial = "12.5".to_string();
    assert_eq!(form.validate().unwrap().num_tokens, 12.5);
}

#[test]
fn test_supply_violations() {
    let cases = [
        ("", Violation::Required),
        ("lots", Violation::NotANumber),
        ("-1", Violation::BelowMin(0)),
        ("inf", Violation::NotANumber),
    ];
    for (raw, expected) in cases {
        let mut form = filled();
        form.num_token_initial = raw.to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("numTokenInitial"),
            Some(&FieldError::NumTokens(expected)),
            "input {:?}",
            raw
        );
    }
}

#[test]
fn test_every_error_has_a_message() {
    let form = TokenForm {
        num_decimals: "12".to_string(),
        num_token_initial: "x".to_string(),
        ..TokenForm::default()
    };
    let errors = form.validate().unwrap_err();
    let messages: Vec<_> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        vec![
            "name is a required field",
            "numDecimals must be less than or equal to 9",
            "symbol is a required field",
            "numTokenInitial must be a number",
        ]
    );
}
