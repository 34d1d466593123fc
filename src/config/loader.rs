use std::fs;
use std::path::Path;

use crate::core::request::InstallRequest;
use crate::error::{DialerError, Result};

/// Reads an install request from a JSON file
pub fn load_request(path: &Path) -> Result<InstallRequest> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path)
        .map_err(|e| DialerError::io_error("read install request", Some(path_str.clone()), e))?;

    let request: InstallRequest = serde_json::from_str(&content)
        .map_err(|e| DialerError::config_error(&path_str, format!("Invalid request JSON: {e}")))?;

    tracing::debug!(path = path_str.as_str(), "Loaded install request");
    Ok(request)
}

/// Field-level overrides, typically collected from command-line flags.
/// `None` leaves the underlying value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOverrides {
    pub operating_system: Option<String>,
    pub product: Option<String>,
    pub ensure: Option<String>,
    pub version: Option<String>,
    pub ccs_server_name: Option<String>,
    pub iso_path: Option<String>,
    pub drive_letter: Option<char>,
    pub database_name: Option<String>,
    pub connection_file: Option<String>,
}

impl RequestOverrides {
    /// Applies the overrides on top of `base`
    pub fn apply(self, mut base: InstallRequest) -> InstallRequest {
        if let Some(os) = self.operating_system {
            base.operating_system = os;
        }
        if let Some(product) = self.product {
            base.product = product;
        }
        if let Some(ensure) = self.ensure {
            base.ensure = ensure;
        }
        if let Some(version) = self.version {
            base.version = version;
        }
        if let Some(server) = self.ccs_server_name {
            base.ccs_server_name = Some(server);
        }
        if let Some(iso_path) = self.iso_path {
            base.media.iso_path = iso_path;
        }
        if let Some(letter) = self.drive_letter {
            base.media.drive_letter = letter;
        }
        if let Some(name) = self.database_name {
            base.database.database_name = name;
        }
        if let Some(file) = self.connection_file {
            base.database.connection_file = file;
        }
        base
    }

    /// Builds a request from overrides alone. Unset required fields stay empty
    /// so validation reports them.
    pub fn into_request(self) -> InstallRequest {
        self.apply(InstallRequest::new("", "", "", ""))
    }
}

/// Loads the request file when given, then layers the overrides on top
pub fn resolve_request(path: Option<&Path>, overrides: RequestOverrides) -> Result<InstallRequest> {
    match path {
        Some(path) => Ok(overrides.apply(load_request(path)?)),
        None => Ok(overrides.into_request()),
    }
}
