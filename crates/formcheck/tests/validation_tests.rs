// Integration tests for full validation passes over an in-memory form

use formcheck::{
    ConfigError, ErrorMap, FieldConfig, FormConfig, FormDom, MemoryForm, NodeId, Reconciler,
    ValidationError,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn registration_config() -> FormConfig {
    FormConfig::from_json_str(
        r#"{
            "fieldErrorClass": "FormField-error",
            "messageErrorClass": "ErrorMessage",
            "fields": {
                "user-name": {
                    "rules": { "maxLength": 20, "minLength": 1 },
                    "message": "Please enter a valid username."
                },
                "user-email": {
                    "rules": { "email": true },
                    "message": "Please enter a valid email address."
                },
                "user-password": {
                    "rules": {
                        "minLength": 7,
                        "maxLength": 20,
                        "requireSymbols": true,
                        "requireNumbers": true,
                        "requireUppercase": true,
                        "requireLowercase": true
                    },
                    "messages": {
                        "minLength": "Password must be at least 7 characters long.",
                        "maxLength": "Password cannot be longer than 20 characters.",
                        "requireSymbols": "Password must contain at least one symbol.",
                        "requireNumbers": "Password must contain at least one number.",
                        "requireUppercase": "Password must contain at least one uppercase letter.",
                        "requireLowercase": "Password must contain at least one lowercase letter."
                    }
                },
                "user-confirm": {
                    "rules": { "equals": "Secret#123" },
                    "message": "Passwords must match."
                },
                "terms": {
                    "rules": { "requireSelection": true },
                    "message": "Please accept the terms."
                }
            }
        }"#,
    )
    .unwrap()
}

struct Registration {
    form: MemoryForm,
    name: NodeId,
    email: NodeId,
    password: NodeId,
    confirm: NodeId,
    terms: NodeId,
}

/// Each field wrapped in its own row, followed by a label
fn registration_form(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    terms: bool,
) -> Registration {
    let mut form = MemoryForm::new();
    let root = form.root();

    let row = |form: &mut MemoryForm, field: &str, ty: &str, value: &str| {
        let div = form.append_element(root, "div");
        let id = form.append_input(div, field, ty, value);
        form.append_element(div, "label");
        id
    };

    let name = row(&mut form, "user-name", "text", name);
    let email = row(&mut form, "user-email", "email", email);
    let password = row(&mut form, "user-password", "password", password);
    let confirm = row(&mut form, "user-confirm", "password", confirm);
    let terms_row = form.append_element(root, "div");
    let terms = form.append_checkable(terms_row, "terms", "checkbox", "yes", terms);

    Registration {
        form,
        name,
        email,
        password,
        confirm,
        terms,
    }
}

#[test]
fn test_all_fields_valid() {
    init_tracing();
    let mut reg = registration_form("jdoe", "jdoe@example.com", "Secret#123", "Secret#123", true);

    let report = Reconciler::new().run(&mut reg.form, &registration_config()).unwrap();

    assert!(report.is_valid());
    assert_eq!(report.errors, ErrorMap::new());
    assert!(reg.form.nodes_with_class("FormField-error").is_empty());
    assert!(reg.form.nodes_with_class("ErrorMessage").is_empty());
}

#[test]
fn test_empty_username_uses_generic_message() {
    init_tracing();
    let config = FormConfig::new().field(
        "user-name",
        FieldConfig::new()
            .rule("minLength", 1)
            .rule("maxLength", 20)
            .message("Please enter a valid username."),
    );

    let mut form = MemoryForm::new();
    let root = form.root();
    let field = form.append_input(root, "user-name", "text", "");

    let report = Reconciler::new().run(&mut form, &config).unwrap();

    assert!(!report.is_valid());
    let expected: ErrorMap = [("user-name", "Please enter a valid username.")]
        .into_iter()
        .collect();
    assert_eq!(report.errors, expected);
    assert!(form.has_class(&field, "error"));
    assert_eq!(
        form.message_after(field, "error"),
        Some("Please enter a valid username.")
    );
}

#[test]
fn test_last_failing_rule_wins() {
    init_tracing();
    let config = FormConfig::new().field(
        "user-password",
        FieldConfig::new()
            .rule("minLength", 7)
            .rule("requireUppercase", true)
            .rule_message("minLength", "too short")
            .rule_message("requireUppercase", "need uppercase"),
    );

    let mut form = MemoryForm::new();
    let root = form.root();
    let field = form.append_input(root, "user-password", "password", "abc");

    let report = Reconciler::new().run(&mut form, &config).unwrap();

    assert_eq!(report.errors.get_error("user-password"), Some("need uppercase"));
    assert_eq!(form.message_after(field, "error"), Some("need uppercase"));
}

#[rstest]
#[case("Secret#123", None)]
#[case("Sec#1", Some("Password must be at least 7 characters long."))]
#[case("secret#123", Some("Password must contain at least one uppercase letter."))]
#[case("SECRET#123", Some("Password must contain at least one lowercase letter."))]
#[case("Secret#abc", Some("Password must contain at least one number."))]
#[case("Secret1234", Some("Password must contain at least one symbol."))]
#[case("Secret#1234567890123456", Some("Password cannot be longer than 20 characters."))]
fn test_password_messages(#[case] password: &str, #[case] expected: Option<&str>) {
    let mut reg = registration_form("jdoe", "jdoe@example.com", password, "Secret#123", true);

    let report = Reconciler::new().run(&mut reg.form, &registration_config()).unwrap();

    assert_eq!(report.errors.get_error("user-password"), expected);
    assert_eq!(
        reg.form.message_after(reg.password, "ErrorMessage"),
        expected
    );
}

#[test]
fn test_repeated_validation_is_idempotent() {
    init_tracing();
    let config = registration_config();
    let mut reg = registration_form("", "nope", "abc", "different", false);

    let first = Reconciler::new().run(&mut reg.form, &config).unwrap();
    let second = Reconciler::new().run(&mut reg.form, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.errors.len(), 5);
    // One message per failing field, never duplicated
    assert_eq!(reg.form.nodes_with_class("ErrorMessage").len(), 5);
    assert_eq!(reg.form.nodes_with_class("FormField-error").len(), 5);

    for field in [reg.name, reg.email, reg.password, reg.confirm, reg.terms] {
        let message = reg.form.next_element_sibling(&field).unwrap();
        assert!(reg.form.has_class(&message, "ErrorMessage"));
    }
}

#[test]
fn test_corrected_field_loses_annotation() {
    init_tracing();
    let config = registration_config();
    let mut reg = registration_form("jdoe", "nope", "Secret#123", "Secret#123", true);

    assert!(!formcheck::validate(&mut reg.form, &config).unwrap());
    assert!(reg.form.has_class(&reg.email, "FormField-error"));
    let label_row = reg.form.children(reg.form.root())[1];
    assert_eq!(reg.form.children(label_row).len(), 3);

    reg.form.set_value(reg.email, "jdoe@example.com");
    assert!(formcheck::validate(&mut reg.form, &config).unwrap());

    assert!(!reg.form.has_class(&reg.email, "FormField-error"));
    assert_eq!(reg.form.message_after(reg.email, "ErrorMessage"), None);
    assert_eq!(reg.form.children(label_row).len(), 2);
}

#[test]
fn test_message_is_updated_when_failure_changes() {
    let config = registration_config();
    let mut reg = registration_form("jdoe", "jdoe@example.com", "ABC", "Secret#123", true);

    formcheck::validate(&mut reg.form, &config).unwrap();
    let before = reg.form.message_after(reg.password, "ErrorMessage").map(str::to_string);

    reg.form.set_value(reg.password, "abcdefgh");
    formcheck::validate(&mut reg.form, &config).unwrap();

    assert_eq!(
        before.as_deref(),
        Some("Password must contain at least one lowercase letter.")
    );
    assert_eq!(
        reg.form.message_after(reg.password, "ErrorMessage"),
        Some("Password must contain at least one uppercase letter.")
    );
    assert_eq!(reg.form.nodes_with_class("ErrorMessage").len(), 1);
}

#[test]
fn test_existing_message_element_is_reused() {
    // Markup rendered with a message placeholder already in place
    let config = FormConfig::new()
        .message_error_class("ErrorMessage")
        .field("user-email", FieldConfig::new().rule("email", true).message("bad email"));

    let mut form = MemoryForm::new();
    let root = form.root();
    let email = form.append_input(root, "user-email", "email", "nope");
    let placeholder = form.append_element(root, "span");
    form.set_class(placeholder, "ErrorMessage");

    assert!(!formcheck::validate(&mut form, &config).unwrap());

    assert_eq!(form.children(root), &[email, placeholder]);
    assert_eq!(form.text(placeholder), "bad email");
    assert!(form.has_class(&email, "error"));
}

#[test]
fn test_message_inserted_before_following_sibling() {
    let config = FormConfig::new().field("code", FieldConfig::new().rule("minLength", 4));

    let mut form = MemoryForm::new();
    let root = form.root();
    let code = form.append_input(root, "code", "text", "12");
    let hint = form.append_element(root, "small");

    formcheck::validate(&mut form, &config).unwrap();

    let children = form.children(root);
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], code);
    assert_eq!(form.text(children[1]), "Please verify your entry.");
    assert_eq!(children[2], hint);
}

#[test]
fn test_unknown_rule_is_fatal_and_leaves_form_untouched() {
    let config = FormConfig::new()
        .field("user-name", FieldConfig::new().rule("minLength", 1))
        .field("age", FieldConfig::new().rule("isAdult", true));

    let mut form = MemoryForm::new();
    let root = form.root();
    let name = form.append_input(root, "user-name", "text", "");
    form.set_class(name, "error");

    let err = formcheck::validate(&mut form, &config).unwrap_err();

    assert_eq!(
        err,
        ValidationError::Config(ConfigError::UnknownRule("isAdult".to_string()))
    );
    // The stale class from an earlier pass is still there
    assert!(form.has_class(&name, "error"));
}

#[test]
fn test_invalid_parameter_is_fatal() {
    let config =
        FormConfig::new().field("user-name", FieldConfig::new().rule("maxLength", "twenty"));

    let mut form = MemoryForm::new();
    let root = form.root();
    form.append_input(root, "user-name", "text", "jdoe");

    let err = formcheck::validate(&mut form, &config).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::Config(ConfigError::InvalidParameter { .. })
    ));
}

#[test]
fn test_radio_group_annotates_first_member() {
    init_tracing();
    let config = FormConfig::new().field(
        "plan",
        FieldConfig::new()
            .rule("requireSelection", true)
            .message("Choose a plan."),
    );

    let mut form = MemoryForm::new();
    let root = form.root();
    let basic = form.append_checkable(root, "plan", "radio", "basic", false);
    let pro = form.append_checkable(root, "plan", "radio", "pro", false);

    assert!(!formcheck::validate(&mut form, &config).unwrap());
    assert!(form.has_class(&basic, "error"));
    assert!(!form.has_class(&pro, "error"));
    assert_eq!(form.message_after(basic, "error"), Some("Choose a plan."));
    assert_eq!(form.nodes_with_class("error").len(), 2);

    form.set_checked(pro, true);
    assert!(formcheck::validate(&mut form, &config).unwrap());
    assert!(form.nodes_with_class("error").is_empty());
}

#[test]
fn test_disabled_flag_rule_is_skipped() {
    let config = FormConfig::new().field(
        "user-email",
        FieldConfig::new().rule("email", false).rule("date", json!(0)),
    );

    let mut form = MemoryForm::new();
    let root = form.root();
    form.append_input(root, "user-email", "text", "not-an-email");

    assert!(formcheck::validate(&mut form, &config).unwrap());
}

#[rstest]
#[case("abc", json!("abc"), true)]
#[case("0", json!(false), true)]
#[case("", json!(0), true)]
#[case("1", json!(true), true)]
#[case("abc", json!("ABC"), false)]
#[case("false", json!(false), false)]
#[case("0x+1", json!(1), false)]
#[case("0x10", json!(16), true)]
fn test_confirmation_uses_loose_equality(
    #[case] value: &str,
    #[case] expected: serde_json::Value,
    #[case] passes: bool,
) {
    let config = FormConfig::new().field("confirm", FieldConfig::new().rule("equals", expected));

    let mut form = MemoryForm::new();
    let root = form.root();
    form.append_input(root, "confirm", "text", value);

    assert_eq!(formcheck::validate(&mut form, &config).unwrap(), passes);
}

#[test]
fn test_values_are_trimmed_before_rules_run() {
    let config = FormConfig::new().field(
        "birthday",
        FieldConfig::new().rule("date", true).rule("maxLength", 10),
    );

    let mut form = MemoryForm::new();
    let root = form.root();
    form.append_input(root, "birthday", "text", "   07/04/1976   ");

    assert!(formcheck::validate(&mut form, &config).unwrap());
}

#[test]
fn test_select_requires_a_value() {
    let config = FormConfig::new().field(
        "country",
        FieldConfig::new().rule("requireSelection", true),
    );

    let mut form = MemoryForm::new();
    let root = form.root();
    let country = form.append_select(root, "country", "");

    assert!(!formcheck::validate(&mut form, &config).unwrap());
    form.set_value(country, "NZ");
    assert!(formcheck::validate(&mut form, &config).unwrap());
}

#[test]
fn test_errors_follow_document_order() {
    let config = FormConfig::new()
        .field("b", FieldConfig::new().rule("minLength", 1))
        .field("a", FieldConfig::new().rule("minLength", 1));

    let mut form = MemoryForm::new();
    let root = form.root();
    form.append_input(root, "a", "text", "");
    form.append_textarea(root, "b", "");

    let errors = Reconciler::new().evaluate(&form, &config).unwrap();
    let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
    assert_eq!(fields, vec!["a", "b"]);
}
