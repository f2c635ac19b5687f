use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use occoder_core::error::Error;
use occoder_core::lang::Lang;
use occoder_lexicon::store::list_schemes;
use occoder_lexicon::SchemeLexicon;

fn lookup_dir() -> PathBuf {
    // crates/occoder-lexicon -> crates -> repo root
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("repo root")
        .to_path_buf();
    root.join("test_data/lookups")
}

fn lang() -> Arc<Lang> {
    Arc::new(Lang::english())
}

#[test]
fn loads_soc_in_advanced_mode() {
    let lex = SchemeLexicon::load(&lookup_dir(), "soc", lang()).expect("load soc");
    assert_eq!(lex.scheme(), "soc");
    assert!(lex.normalizer().is_advanced());
    assert_eq!(lex.buckets().len(), 8);
    assert!(lex.titles_for("912").is_some());
    assert!(lex.titles_for("999").is_none());
}

#[test]
fn exact_match_finds_known_titles() {
    let lex = SchemeLexicon::load(&lookup_dir(), "soc", lang()).expect("load soc");
    assert_eq!(lex.exact_match("physicist"), Some("211"));
    assert_eq!(lex.exact_match("economist"), Some("242"));
    assert_eq!(lex.exact_match("ground worker"), None);
    assert_eq!(lex.exact_match(""), None);
}

#[test]
fn exact_match_truncates_to_three_tokens() {
    let lex = SchemeLexicon::load(&lookup_dir(), "isco", lang()).expect("load isco");
    let full = lex.exact_match("building construction labourer");
    let longer = lex.exact_match("building construction labourer hod carrier");
    assert_eq!(full, Some("9313"));
    assert_eq!(longer, full);
}

#[test]
fn code_labels_resolve() {
    let lex = SchemeLexicon::load(&lookup_dir(), "isco", lang()).expect("load isco");
    assert_eq!(lex.code_label("9111"), Some("Domestic Cleaners and Helpers"));
    assert_eq!(lex.code_label("1111"), Some("Legislators"));
    assert_eq!(lex.code_label("0000"), None);
}

#[test]
fn schemes_are_discovered() {
    let schemes = list_schemes(&lookup_dir());
    assert_eq!(schemes, vec!["isco".to_string(), "soc".to_string()]);
}

fn write_scheme(dir: &std::path::Path, scheme: &str, titles: &str, buckets: &str) {
    let scheme_dir = dir.join(scheme);
    fs::create_dir_all(&scheme_dir).expect("scheme dir");
    fs::write(scheme_dir.join(format!("titles_{}.json", scheme)), titles).expect("titles");
    fs::write(scheme_dir.join(format!("buckets_{}.json", scheme)), buckets).expect("buckets");
}

#[test]
fn duplicate_titles_resolve_to_last_code_in_file_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_scheme(
        tmp.path(),
        "mini",
        r#"{"100": ["porter"], "200": ["porter", "caretaker"]}"#,
        r#"[{"MINI_code": "100", "Titles_nospace": "porter"},
            {"MINI_code": "200", "Titles_nospace": "porter caretaker"}]"#,
    );
    let lex = SchemeLexicon::load(tmp.path(), "mini", lang()).expect("load mini");
    // Without the optional dictionaries the scheme runs in basic mode.
    assert!(!lex.normalizer().is_advanced());
    assert_eq!(lex.exact_match("porter"), Some("200"));
    assert_eq!(lex.exact_match("caretaker"), Some("200"));
}

#[test]
fn numeric_codes_become_strings_and_leading_zeros_survive() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_scheme(
        tmp.path(),
        "mini",
        r#"{"0110": ["officer"], "220": ["gardener"]}"#,
        r#"[{"MINI_code": "0110", "Titles_nospace": "officer"},
            {"MINI_code": 220, "Titles_nospace": "gardener"}]"#,
    );
    let lex = SchemeLexicon::load(tmp.path(), "mini", lang()).expect("load mini");
    assert_eq!(lex.exact_match("officer"), Some("0110"));
    assert_eq!(lex.buckets()[1].code, "220");
}

#[test]
fn missing_required_dictionary_is_fatal() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let scheme_dir = tmp.path().join("mini");
    fs::create_dir_all(&scheme_dir).expect("scheme dir");
    fs::write(
        scheme_dir.join("titles_mini.json"),
        r#"{"100": ["porter"]}"#,
    )
    .expect("titles");
    // No buckets file.
    let err = SchemeLexicon::load(tmp.path(), "mini", lang()).expect_err("must fail");
    assert!(matches!(err, Error::DictionaryMissing { .. }));
}

#[test]
fn unknown_scheme_directory_is_fatal() {
    let err = SchemeLexicon::load(&lookup_dir(), "sic", lang()).expect_err("must fail");
    assert!(matches!(err, Error::DictionaryMissing { .. }));
}
