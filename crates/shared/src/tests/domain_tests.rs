use super::{Conversation, Role, ThemePreference, Turn};

#[test]
fn roles_serialize_as_lowercase_strings() {
    assert_eq!(serde_json::to_string(&Role::User).expect("json"), "\"user\"");
    assert_eq!(serde_json::to_string(&Role::Model).expect("json"), "\"model\"");
}

#[test]
fn unknown_role_is_rejected() {
    let err = serde_json::from_str::<Turn>(r#"{"role":"assistant","text":"hi"}"#);
    assert!(err.is_err());
}

#[test]
fn conversation_preserves_insertion_order() {
    let mut conversation = Conversation::new();
    conversation.push(Turn::user("first"));
    conversation.push(Turn::model("second"));
    conversation.push(Turn::user("third"));

    let texts: Vec<&str> = conversation.turns().iter().map(Turn::text).collect();
    assert_eq!(texts, ["first", "second", "third"]);
    assert_eq!(conversation.last().map(Turn::role), Some(Role::User));
}

#[test]
fn conversation_serializes_as_bare_array() {
    let mut conversation = Conversation::new();
    conversation.push(Turn::user("hi"));
    let value = serde_json::to_value(&conversation).expect("json");
    assert_eq!(value, serde_json::json!([{ "role": "user", "text": "hi" }]));
}

#[test]
fn theme_toggle_twice_is_identity() {
    for theme in [ThemePreference::Light, ThemePreference::Dark] {
        assert_eq!(theme.toggled().toggled(), theme);
        assert_ne!(theme.toggled(), theme);
    }
}

#[test]
fn theme_defaults_to_light_with_moon_icon() {
    let theme = ThemePreference::default();
    assert_eq!(theme, ThemePreference::Light);
    assert_eq!(theme.icon(), "🌙");
    assert_eq!(ThemePreference::Dark.icon(), "☀️");
}

#[test]
fn stored_theme_values_other_than_dark_read_as_light() {
    assert_eq!(ThemePreference::from_stored("dark"), ThemePreference::Dark);
    assert_eq!(ThemePreference::from_stored("light"), ThemePreference::Light);
    assert_eq!(ThemePreference::from_stored("DARK"), ThemePreference::Light);
    assert_eq!(ThemePreference::from_stored(""), ThemePreference::Light);
}

#[test]
fn strict_theme_parse_reports_offending_value() {
    assert_eq!("dark".parse::<ThemePreference>(), Ok(ThemePreference::Dark));
    let err = "sepia".parse::<ThemePreference>().expect_err("invalid");
    assert_eq!(err.value, "sepia");
}
