use super::*;

#[test]
fn default_points_at_local_backend() {
    let config = ClientConfig::default();
    assert_eq!(config.backend_origin, "http://localhost:5001");
    assert_eq!(config.login_url, "http://localhost:5001/login");
    assert_eq!(config.entry_url, "/");
    assert_eq!(config.wrapped_url(), "http://localhost:5001/wrapped");
}

#[test]
fn trailing_slashes_and_whitespace_trimmed() {
    let config = ClientConfig::from_values(Some("  https://api.example.com/  "), None);
    assert_eq!(config.backend_origin, "https://api.example.com");
    assert_eq!(config.wrapped_url(), "https://api.example.com/wrapped");
    assert_eq!(config.login_url, "https://api.example.com/login");
}

#[test]
fn blank_origin_is_same_origin() {
    let config = ClientConfig::from_values(Some(""), None);
    assert_eq!(config.backend_origin, "");
    assert_eq!(config.wrapped_url(), "/wrapped");
    assert_eq!(config.login_url, "/login");
}

#[test]
fn explicit_login_url_wins() {
    let config = ClientConfig::from_values(None, Some("https://auth.example.com/start"));
    assert_eq!(config.login_url, "https://auth.example.com/start");
    assert_eq!(config.wrapped_url(), "http://localhost:5001/wrapped");
}

#[test]
fn explicit_login_url_keeps_trailing_slash() {
    let config = ClientConfig::from_values(None, Some("  https://auth.example.com/start/ \n"));
    assert_eq!(config.login_url, "https://auth.example.com/start/");
}

#[test]
fn blank_login_url_falls_back() {
    let config = ClientConfig::from_values(Some("http://127.0.0.1:9000"), Some("   "));
    assert_eq!(config.login_url, "http://127.0.0.1:9000/login");
}
