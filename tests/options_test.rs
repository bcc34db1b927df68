#![allow(clippy::expect_used)]

use serp_xray::{Error, Options};

#[test]
fn options_default_values_are_sensible() {
    let options = Options::default();
    assert_eq!(options.target_pages, 5);
    assert_eq!(options.candidate_request_size(), 45);
    assert_eq!(options.min_content_chars, 100);
    assert_eq!(options.min_title_chars, 3);
    assert_eq!(options.cluster.min_pages, 3);
    assert_eq!(options.cluster.max_clusters, 3);
    assert!(options.excluded_domains.iter().any(|d| d == "youtube.com"));
    assert!(options.serp.api_key.is_empty());
}

#[test]
fn options_struct_update_syntax_overrides_selected_fields_only() {
    let options = Options { target_pages: 10, ..Options::default() };
    assert_eq!(options.target_pages, 10);
    assert_eq!(options.candidate_buffer, 40);
    assert_eq!(options.candidate_request_size(), 50);
}

#[test]
fn partial_toml_keeps_defaults() {
    let options = Options::from_toml_str(
        r#"
        target_pages = 8
        excluded_domains = ["reddit.com"]

        [cluster]
        seed = 7

        [serp]
        country = "us"
        language = "en"
        "#,
    )
    .expect("valid TOML");

    assert_eq!(options.target_pages, 8);
    assert_eq!(options.excluded_domains, vec!["reddit.com"]);
    assert_eq!(options.cluster.seed, 7);
    assert_eq!(options.cluster.restarts, 10);
    assert_eq!(options.serp.country, "us");
    assert_eq!(options.serp.max_results, 100);
    assert_eq!(options.fetch_timeout_secs, 12);
}

#[test]
fn invalid_values_are_config_errors() {
    let err = Options::from_toml_str("target_pages = 0").expect_err("zero target");
    assert!(matches!(err, Error::Config(_)));

    let err = Options::from_toml_str("critical_heading_ratio = 1.5").expect_err("ratio above one");
    assert!(matches!(err, Error::Config(_)));

    let err = Options::from_toml_str("target_pages = \"five\"").expect_err("wrong type");
    assert!(err.to_string().contains("invalid TOML"));
}

#[test]
fn options_load_from_file() {
    let path = std::env::temp_dir().join(format!("serp-xray-options-{}.toml", std::process::id()));
    std::fs::write(&path, "target_pages = 3\ncandidate_buffer = 7\n").expect("write options file");

    let loaded = Options::from_file(&path);
    std::fs::remove_file(&path).ok();

    let options = loaded.expect("options file");
    assert_eq!(options.target_pages, 3);
    assert_eq!(options.candidate_request_size(), 10);
}

#[test]
fn missing_file_is_config_error() {
    let err = Options::from_file(std::path::Path::new("/nonexistent/serp-xray.toml")).expect_err("missing");
    assert!(matches!(err, Error::Config(ref msg) if msg.contains("cannot read")));
}
