use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join("missing.toml"), env_from(&[]));
    assert_eq!(settings, ClientSettings::default());
    assert_eq!(settings.server_url, DEFAULT_SERVER_URL);
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(SETTINGS_FILE);
    fs::write(
        &path,
        "server_url = \"http://chat.internal:9000/\"\npreferences_path = \"/tmp/prefs.toml\"\n",
    )
    .expect("write settings");

    let settings = load_settings_from(&path, env_from(&[]));
    assert_eq!(settings.server_url, "http://chat.internal:9000");
    assert_eq!(
        settings.preferences_path,
        Some(PathBuf::from("/tmp/prefs.toml"))
    );
}

#[test]
fn environment_overrides_file_and_app_prefix_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(SETTINGS_FILE);
    fs::write(&path, "server_url = \"http://from-file:1\"\n").expect("write settings");

    let settings = load_settings_from(
        &path,
        env_from(&[
            ("CHAT_SERVER_URL", "http://from-env:2"),
            ("APP__SERVER_URL", "http://from-app-env:3"),
            ("APP__PREFERENCES_PATH", "/var/lib/chat/prefs.toml"),
        ]),
    );
    assert_eq!(settings.server_url, "http://from-app-env:3");
    assert_eq!(
        settings.preferences_path,
        Some(PathBuf::from("/var/lib/chat/prefs.toml"))
    );
}

#[test]
fn blank_environment_values_do_not_override_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(SETTINGS_FILE);
    fs::write(&path, "server_url = \"http://from-file:1\"\n").expect("write settings");

    let settings = load_settings_from(
        &path,
        env_from(&[("CHAT_SERVER_URL", ""), ("APP__SERVER_URL", "   ")]),
    );
    assert_eq!(settings.server_url, "http://from-file:1");
}

#[test]
fn malformed_file_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(SETTINGS_FILE);
    fs::write(&path, "server_url = [").expect("write settings");

    let settings = load_settings_from(&path, env_from(&[("CHAT_SERVER_URL", "http://env:4")]));
    assert_eq!(settings.server_url, "http://env:4");
}

#[test]
fn normalizes_whitespace_and_trailing_slashes() {
    assert_eq!(normalize_server_url("  http://host:1//  "), "http://host:1");
    assert_eq!(normalize_server_url("   "), DEFAULT_SERVER_URL);
}

#[test]
fn cli_overrides_replace_only_provided_values() {
    let settings = ClientSettings::default()
        .with_server_url(Some("http://cli:5/".to_string()))
        .with_preferences_path(None);
    assert_eq!(settings.server_url, "http://cli:5");
    assert_eq!(settings.preferences_path, None);

    let explicit = settings.with_preferences_path(Some(PathBuf::from("/p.toml")));
    assert_eq!(
        explicit.resolve_preferences_path().expect("path"),
        PathBuf::from("/p.toml")
    );
}
