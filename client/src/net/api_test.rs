use super::*;

#[test]
fn ambient_credentials_are_included() {
    assert_eq!(fetch_credentials(&CredentialContext::Ambient), FetchCredentials::Include);
}

#[test]
fn explicit_session_is_included() {
    assert_eq!(
        fetch_credentials(&CredentialContext::Session("abc".to_owned())),
        FetchCredentials::Include
    );
}

#[test]
fn anonymous_omits_credentials() {
    assert_eq!(fetch_credentials(&CredentialContext::Anonymous), FetchCredentials::Omit);
}

#[test]
fn transport_keeps_configured_url() {
    let config = wrapped::ClientConfig::default();
    let transport = BrowserTransport::new(config.wrapped_url());
    assert_eq!(transport.url(), "http://localhost:5001/wrapped");
}
