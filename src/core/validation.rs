//! Pure validation logic for installation requests
//!
//! Checks run in a fixed order and the first violation wins, so callers always
//! see the same error for the same bad request.

use crate::core::request::{DatabaseSettings, Ensure, InstallRequest, MediaSettings, Product};
use crate::error::{DialerError, Result};

pub const SUPPORTED_OS: &str = "windows";

/// A request that passed every check, with typed fields
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub product: Product,
    pub ensure: Ensure,
    pub version: String,
    pub ccs_server_name: Option<String>,
    pub media: MediaSettings,
    pub database: DatabaseSettings,
}

/// Validates a request, returning the first violated constraint
pub fn validate_request(request: &InstallRequest) -> Result<ValidatedRequest> {
    validate_operating_system(&request.operating_system)?;
    let product = validate_product(&request.product)?;
    let ensure = validate_ensure(&request.ensure)?;
    let version = validate_version(&request.version)?;
    let ccs_server_name = validate_ccs_server_name(product, request.ccs_server_name.as_deref())?;
    let media = validate_media(&request.media)?;
    let database = if product.requires_database() {
        validate_database(&request.database)?
    } else {
        request.database.clone()
    };

    tracing::debug!(
        product = product.as_str(),
        version = version.as_str(),
        "Install request validated"
    );

    Ok(ValidatedRequest {
        product,
        ensure,
        version,
        ccs_server_name,
        media,
        database,
    })
}

pub fn validate_operating_system(operating_system: &str) -> Result<()> {
    if operating_system.trim().eq_ignore_ascii_case(SUPPORTED_OS) {
        Ok(())
    } else {
        Err(DialerError::unsupported_os(operating_system))
    }
}

pub fn validate_product(product: &str) -> Result<Product> {
    product
        .parse::<Product>()
        .map_err(|_| DialerError::invalid_product(product))
}

pub fn validate_ensure(ensure: &str) -> Result<Ensure> {
    ensure
        .parse::<Ensure>()
        .map_err(|_| DialerError::invalid_ensure(ensure))
}

pub fn validate_version(version: &str) -> Result<String> {
    let trimmed = version.trim();
    if trimmed.is_empty() {
        return Err(DialerError::missing_field("version", "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// The server name only matters for CCS; whatever an ODS request carries is dropped.
pub fn validate_ccs_server_name(
    product: Product,
    server_name: Option<&str>,
) -> Result<Option<String>> {
    match product {
        Product::Ods => Ok(None),
        Product::Ccs => match server_name.map(str::trim) {
            Some(name) if !name.is_empty() => {
                // Written into the OLE DB init string of the connection file
                if name.contains([';', '=']) || name.chars().any(char::is_control) {
                    return Err(DialerError::invalid_field(
                        "ccs_server_name",
                        name,
                        "must not contain ';', '=' or control characters",
                    ));
                }
                Ok(Some(name.to_string()))
            }
            _ => Err(DialerError::missing_field(
                "ccs_server_name",
                "is required when product is CCS",
            )),
        },
    }
}

/// Returns the settings with the ISO path trimmed
pub fn validate_media(media: &MediaSettings) -> Result<MediaSettings> {
    let iso_path = media.iso_path.trim();
    if iso_path.is_empty() {
        return Err(DialerError::missing_field("iso_path", "must not be empty"));
    }
    if !media.drive_letter.is_ascii_alphabetic() {
        return Err(DialerError::invalid_field(
            "drive_letter",
            media.drive_letter.to_string(),
            "must be a letter A-Z",
        ));
    }
    Ok(MediaSettings {
        iso_path: iso_path.to_string(),
        drive_letter: media.drive_letter,
    })
}

/// Returns the settings with the database name and connection file trimmed
pub fn validate_database(database: &DatabaseSettings) -> Result<DatabaseSettings> {
    let name = database.database_name.trim();
    if name.is_empty() {
        return Err(DialerError::missing_field(
            "database_name",
            "must not be empty",
        ));
    }
    // Bracket-quoted in the generated script
    if name.contains([']', ';', '\'']) {
        return Err(DialerError::invalid_field(
            "database_name",
            name,
            "must not contain ']', ';' or quotes",
        ));
    }
    let connection_file = database.connection_file.trim();
    if connection_file.is_empty() {
        return Err(DialerError::missing_field(
            "connection_file",
            "must not be empty",
        ));
    }
    Ok(DatabaseSettings {
        database_name: name.to_string(),
        connection_file: connection_file.to_string(),
    })
}
