//! Installation request model
//!
//! An `InstallRequest` is the raw, unvalidated input: every field is kept as the
//! caller supplied it so validation can report exactly what was wrong.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ISO_PATH: &str = r"C:\media\dialer.iso";
pub const DEFAULT_DRIVE_LETTER: char = 'D';
pub const DEFAULT_DATABASE_NAME: &str = "Dialer";
pub const DEFAULT_CONNECTION_FILE: &str = r"C:\ProgramData\Dialer\connection.udl";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallRequest {
    #[serde(default)]
    pub operating_system: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub ensure: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub ccs_server_name: Option<String>,
    #[serde(default)]
    pub media: MediaSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
}

impl InstallRequest {
    pub fn new(
        operating_system: impl Into<String>,
        product: impl Into<String>,
        ensure: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            operating_system: operating_system.into(),
            product: product.into(),
            ensure: ensure.into(),
            version: version.into(),
            ccs_server_name: None,
            media: MediaSettings::default(),
            database: DatabaseSettings::default(),
        }
    }

    pub fn with_ccs_server_name(mut self, server_name: impl Into<String>) -> Self {
        self.ccs_server_name = Some(server_name.into());
        self
    }

    pub fn with_media(mut self, media: MediaSettings) -> Self {
        self.media = media;
        self
    }

    pub fn with_database(mut self, database: DatabaseSettings) -> Self {
        self.database = database;
        self
    }
}

/// Where the installation media lives and where it gets mounted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSettings {
    pub iso_path: String,
    pub drive_letter: char,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            iso_path: DEFAULT_ISO_PATH.to_string(),
            drive_letter: DEFAULT_DRIVE_LETTER,
        }
    }
}

impl MediaSettings {
    /// Root of the mounted media, e.g. `D:\`
    pub fn mount_root(&self) -> String {
        format!(r"{}:\", self.drive_letter.to_ascii_uppercase())
    }
}

/// CCS database provisioning settings. Unused for ODS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSettings {
    pub database_name: String,
    pub connection_file: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            connection_file: DEFAULT_CONNECTION_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "ODS")]
    Ods,
    #[serde(rename = "CCS")]
    Ccs,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Ods => "ODS",
            Product::Ccs => "CCS",
        }
    }

    pub fn requires_database(&self) -> bool {
        matches!(self, Product::Ccs)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Product {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ODS" => Ok(Product::Ods),
            "CCS" => Ok(Product::Ccs),
            _ => Err(format!("unknown product '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    Installed,
}

impl fmt::Display for Ensure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ensure::Installed => f.write_str("installed"),
        }
    }
}

impl FromStr for Ensure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "installed" => Ok(Ensure::Installed),
            _ => Err(format!("unsupported ensure value '{s}'")),
        }
    }
}
