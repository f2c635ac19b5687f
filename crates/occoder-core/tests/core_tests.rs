use std::path::Path;

use occoder_core::config::{expand_path, resolve_with_base, Config};

#[test]
fn expand_path_passes_absolute_paths_through() {
    assert_eq!(expand_path("/var/data"), Path::new("/var/data"));
}

#[test]
fn expand_path_resolves_env_vars() {
    std::env::set_var("OCCODER_TEST_DIR", "/tmp/occoder");
    assert_eq!(
        expand_path("${OCCODER_TEST_DIR}/lookups"),
        Path::new("/tmp/occoder/lookups")
    );
}

#[test]
fn resolve_with_base_joins_relative_paths() {
    let base = Path::new("/srv/app");
    assert_eq!(resolve_with_base(base, "lookups"), Path::new("/srv/app/lookups"));
    assert_eq!(resolve_with_base(base, "/etc/lookups"), Path::new("/etc/lookups"));
}

#[test]
fn config_load_always_succeeds_with_fallbacks() {
    let config = Config::load().expect("load");
    let scheme: String = config.get("coder.scheme").unwrap_or_else(|_| "soc".to_string());
    assert_eq!(scheme, "soc");
    assert!(!config.lookup_dir().as_os_str().is_empty());
}
