use super::*;

#[test]
fn rejected_displays_provider_message() {
    let err = AuthError::Rejected { status: 400, message: "Invalid login credentials".to_owned() };
    assert_eq!(err.to_string(), "Invalid login credentials");
    assert_eq!(err.user_message("Login failed"), "Invalid login credentials");
}

#[test]
fn rejected_with_blank_message_uses_fallback() {
    let err = AuthError::Rejected { status: 500, message: "  ".to_owned() };
    assert_eq!(err.user_message("Login failed"), "Login failed");
}

#[test]
fn transport_error_message_is_prefixed() {
    let err = AuthError::Transport("connection refused".to_owned());
    assert_eq!(err.user_message("Logout failed"), "auth request failed: connection refused");
}

#[test]
fn profile_status_error_hides_body() {
    let err = ProfileFetchError::Status { status: 500, body: "secret detail".to_owned() };
    assert_eq!(err.to_string(), "profile request returned status 500");
}

#[test]
fn config_missing_names_variable() {
    let err = ConfigError::Missing { var: "SUPABASE_URL".to_owned() };
    assert_eq!(err.to_string(), "missing configuration: SUPABASE_URL not set");
}
