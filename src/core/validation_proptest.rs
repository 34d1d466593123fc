//! Property-based tests for request validation and planning
//!
//! These check the rejection rules and product exclusivity over generated
//! requests rather than a handful of fixed examples.

#[cfg(test)]
mod tests {
    use crate::core::plan::build_plan;
    use crate::core::request::InstallRequest;
    use crate::core::validation::*;
    use crate::error::DialerError;
    use proptest::prelude::*;

    // Strategy for operating system names that are never Windows
    prop_compose! {
        fn non_windows_os()(
            name in "[A-Za-z ]{0,20}"
        ) -> String {
            name
        }
    }

    prop_compose! {
        fn any_product_casing()(
            is_ccs in prop::bool::ANY,
            upper in prop::collection::vec(prop::bool::ANY, 3),
        ) -> String {
            let base = if is_ccs { "ccs" } else { "ods" };
            base.chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect()
        }
    }

    prop_compose! {
        fn version_string()(
            parts in prop::collection::vec(0u32..100, 1..5)
        ) -> String {
            parts.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(".")
        }
    }

    proptest! {
        #[test]
        fn test_non_windows_always_rejected(
            os in non_windows_os(),
            version in version_string(),
        ) {
            prop_assume!(!os.trim().eq_ignore_ascii_case("windows"));
            let request = InstallRequest::new(os, "ODS", "installed", version);
            let result = validate_request(&request);
            let rejected = matches!(result, Err(DialerError::UnsupportedOs { .. }));
            prop_assert!(rejected, "expected UnsupportedOs, got {:?}", result);
        }

        #[test]
        fn test_invalid_product_always_rejected(
            product in "[A-Za-z0-9]{0,6}",
        ) {
            prop_assume!(!matches!(product.to_ascii_uppercase().as_str(), "ODS" | "CCS"));
            let request = InstallRequest::new("Windows", product, "installed", "1.0");
            let result = validate_request(&request);
            let rejected = matches!(result, Err(DialerError::InvalidProduct { .. }));
            prop_assert!(rejected, "expected InvalidProduct, got {:?}", result);
        }

        #[test]
        fn test_ensure_other_than_installed_rejected(
            ensure in "[a-z]{0,12}",
        ) {
            prop_assume!(ensure != "installed");
            let request = InstallRequest::new("Windows", "ODS", ensure, "1.0");
            let result = validate_request(&request);
            let rejected = matches!(result, Err(DialerError::InvalidEnsure { .. }));
            prop_assert!(rejected, "expected InvalidEnsure, got {:?}", result);
        }

        #[test]
        fn test_blank_version_rejected(
            product in any_product_casing(),
            blank in "[ \t]{0,4}",
        ) {
            let request = InstallRequest::new("Windows", product, "installed", blank)
                .with_ccs_server_name("sql01");
            let err = validate_request(&request).unwrap_err();
            prop_assert_eq!(err.constraint(), "version must not be empty");
        }

        #[test]
        fn test_products_never_share_artifacts(
            product in any_product_casing(),
            version in version_string(),
            server in "[a-z][a-z0-9-]{0,15}",
        ) {
            let request = InstallRequest::new("Windows", product.clone(), "installed", version)
                .with_ccs_server_name(server);
            let plan = build_plan(&request).unwrap();

            if product.eq_ignore_ascii_case("ccs") {
                prop_assert!(plan.contains_ccs_artifacts());
                prop_assert!(!plan.contains_ods_artifacts());
            } else {
                prop_assert!(plan.contains_ods_artifacts());
                prop_assert!(!plan.contains_ccs_artifacts());
            }
            prop_assert!(plan.validate_ordering().is_ok());
        }
    }
}
