use dialer::core::plan::{
    CCS_CONNECTION_FILE, CCS_DATABASE, CCS_PACKAGE, DOTNET35, MOUNT_MEDIA, ODS_PACKAGE,
    SQL_NATIVE_CLIENT, UNMOUNT_MEDIA,
};
use dialer::core::{DatabaseSettings, MediaSettings, StepAction};
use dialer::{build_plan, DialerError, InstallRequest, Product};

fn ccs_request() -> InstallRequest {
    InstallRequest::new("Windows", "CCS", "installed", "7.2.0").with_ccs_server_name("sql01")
}

#[test]
fn test_defaults_for_all_parameters() {
    let plan = build_plan(&InstallRequest::new("Windows", "ODS", "installed", "7.2.0")).unwrap();
    assert_eq!(plan.product, Product::Ods);
    assert_eq!(plan.steps.first().unwrap().id, MOUNT_MEDIA);
    assert_eq!(plan.steps.last().unwrap().id, UNMOUNT_MEDIA);
}

#[test]
fn test_prerequisites_precede_product() {
    let plan = build_plan(&ccs_request()).unwrap();
    let position = |id: &str| plan.steps.iter().position(|s| s.id == id).unwrap();
    assert!(position(DOTNET35) < position(CCS_PACKAGE));
    assert!(position(SQL_NATIVE_CLIENT) < position(CCS_DATABASE));
    assert!(position(CCS_DATABASE) < position(CCS_CONNECTION_FILE));
}

#[test]
fn test_custom_media_and_database_settings() {
    let request = ccs_request()
        .with_media(MediaSettings {
            iso_path: r"\\share\dialer-7.2.iso".to_string(),
            drive_letter: 'x',
        })
        .with_database(DatabaseSettings {
            database_name: "DialerProd".to_string(),
            connection_file: r"D:\dialer\prod.udl".to_string(),
        });
    let plan = build_plan(&request).unwrap();

    match &plan.step(MOUNT_MEDIA).unwrap().action {
        StepAction::MountMedia {
            iso_path,
            drive_letter,
        } => {
            assert_eq!(iso_path, r"\\share\dialer-7.2.iso");
            assert_eq!(*drive_letter, 'X');
        }
        other => panic!("unexpected action: {other:?}"),
    }

    match &plan.step(CCS_CONNECTION_FILE).unwrap().action {
        StepAction::File { path, content } => {
            assert_eq!(path, r"D:\dialer\prod.udl");
            assert!(content.contains("Initial Catalog=DialerProd"));
        }
        other => panic!("unexpected action: {other:?}"),
    }
}

#[test]
fn test_ods_never_contains_ccs_steps() {
    let plan = build_plan(
        &InstallRequest::new("Windows", "ods", "installed", "1.0").with_ccs_server_name("sql01"),
    )
    .unwrap();
    assert!(plan.step(ODS_PACKAGE).is_some());
    assert!(plan.step(CCS_PACKAGE).is_none());
    assert!(plan.step(CCS_DATABASE).is_none());
    assert!(plan.step(CCS_CONNECTION_FILE).is_none());
}

#[test]
fn test_rejections_name_the_constraint() {
    let cases = [
        (
            InstallRequest::new("Not Windows", "ODS", "installed", "1.0"),
            "Unsupported OS",
        ),
        (
            InstallRequest::new("Windows", "", "installed", "1.0"),
            "product must be either ODS or CCS",
        ),
        (
            InstallRequest::new("Windows", "ODS", "", "1.0"),
            "only installed is supported for the ensure parameter at this time",
        ),
        (
            InstallRequest::new("Windows", "ODS", "installed", ""),
            "version must not be empty",
        ),
        (
            InstallRequest::new("Windows", "CCS", "installed", "1.0"),
            "ccs_server_name is required when product is CCS",
        ),
    ];

    for (request, expected) in cases {
        let err: DialerError = build_plan(&request).unwrap_err();
        assert!(err.is_validation_error());
        assert!(
            err.constraint().contains(expected),
            "Expected error to contain '{expected}', but got: {}",
            err.constraint()
        );
    }
}
