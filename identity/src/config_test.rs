use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_supabase_env() {
    unsafe {
        std::env::remove_var(SUPABASE_URL_VAR);
        std::env::remove_var(SUPABASE_ANON_KEY_VAR);
    }
}

#[test]
fn auth_config_default_uses_admin_constant() {
    assert_eq!(AuthConfig::default().admin_email, "eventspark7@gmail.com");
}

#[test]
fn new_trims_trailing_slashes() {
    let cfg = SupabaseConfig::new("https://abcd.supabase.co//", " anon ").unwrap();
    assert_eq!(cfg.url, "https://abcd.supabase.co");
    assert_eq!(cfg.anon_key, "anon");
}

#[test]
fn new_rejects_blank_url() {
    assert_eq!(
        SupabaseConfig::new("  ", "anon"),
        Err(ConfigError::Missing { var: SUPABASE_URL_VAR.into() })
    );
}

#[test]
fn new_rejects_blank_key() {
    assert_eq!(
        SupabaseConfig::new("https://abcd.supabase.co", ""),
        Err(ConfigError::Missing { var: SUPABASE_ANON_KEY_VAR.into() })
    );
}

#[test]
fn new_rejects_url_without_scheme() {
    assert!(matches!(SupabaseConfig::new("abcd.supabase.co", "anon"), Err(ConfigError::Invalid(_))));
}

#[test]
fn storage_key_uses_project_ref() {
    let cfg = SupabaseConfig::new("https://abcd.supabase.co", "anon").unwrap();
    assert_eq!(cfg.storage_key(), "sb-abcd-auth-token");
}

#[test]
fn storage_key_for_local_url() {
    let cfg = SupabaseConfig::new("http://127.0.0.1:54321", "anon").unwrap();
    assert_eq!(cfg.storage_key(), "sb-127-auth-token");
}

#[test]
fn from_env_reads_both_vars() {
    unsafe {
        clear_supabase_env();
        std::env::set_var(SUPABASE_URL_VAR, "https://proj.supabase.co/");
        std::env::set_var(SUPABASE_ANON_KEY_VAR, "public-anon");
    }
    let cfg = SupabaseConfig::from_env().unwrap();
    assert_eq!(cfg.url, "https://proj.supabase.co");
    assert_eq!(cfg.anon_key, "public-anon");
    unsafe { clear_supabase_env() };
}

#[test]
fn from_env_missing_key_is_error() {
    unsafe {
        clear_supabase_env();
        std::env::set_var(SUPABASE_URL_VAR, "https://proj.supabase.co");
    }
    assert_eq!(
        SupabaseConfig::from_env(),
        Err(ConfigError::Missing { var: SUPABASE_ANON_KEY_VAR.into() })
    );
    unsafe { clear_supabase_env() };
}
