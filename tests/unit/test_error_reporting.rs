use blueprint::core::catalog::Catalog;
use blueprint::core::error::{AppError, DefaultErrorReporter, ErrorReporter};
use blueprint::core::types::{ErrorCategory, ErrorSeverity};

#[test]
fn test_catalog_error_carries_code_and_hint() {
    let catalog = Catalog::builtin().unwrap();
    let err = catalog.addons(&["secrets-scan"]).unwrap_err();
    assert_eq!(err.category, ErrorCategory::CatalogError);
    assert_eq!(err.severity(), ErrorSeverity::Error);
    assert!(err.to_string().starts_with("[CAT-001]"));
    assert!(err.recovery_suggestions.iter().any(|hint| hint.contains("sast")));
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "catalog.json");
    let err: AppError = io.into();
    assert_eq!(err.category, ErrorCategory::IoError);
    assert!(err.source.is_some());
}

#[test]
fn test_anyhow_conversion_keeps_message() {
    let err: AppError = anyhow::anyhow!("render exploded").into();
    assert_eq!(err.category, ErrorCategory::InternalError);
    assert_eq!(err.message, "render exploded");
}

#[test]
fn test_app_error_survives_anyhow_round_trip() {
    let original = AppError::new(ErrorCategory::PackagingError, "bad path").with_code("PKG-002");
    let wrapped: anyhow::Error = original.into();
    let recovered = wrapped.downcast_ref::<AppError>().unwrap();
    assert_eq!(recovered.code, "PKG-002");
}

#[test]
fn test_reporter_accepts_every_shape() {
    let reporter = DefaultErrorReporter::new();
    let mut err = AppError::new(ErrorCategory::ConfigError, "invalid blueprint.toml")
        .with_code("CFG-001")
        .with_suggestion("Check the [defaults] table");
    err.add_context("path", "blueprint.toml");
    reporter.report_error(&err);
    reporter.report_warning("fallback template used", Some("azdo/iac/government".to_string()));
}
