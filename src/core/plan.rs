//! Pure installation planning logic
//!
//! Turns a validated request into the ordered list of resources the
//! configuration-management engine should apply. Nothing here touches the
//! target machine.

use crate::core::request::{InstallRequest, Product};
use crate::core::validation::{validate_request, ValidatedRequest};
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub const MOUNT_MEDIA: &str = "mount-media";
pub const DOTNET35: &str = "dotnet35";
pub const SQL_NATIVE_CLIENT: &str = "sql-native-client";
pub const ODS_PACKAGE: &str = "ods-package";
pub const CCS_PACKAGE: &str = "ccs-package";
pub const CCS_DATABASE: &str = "ccs-database";
pub const CCS_CONNECTION_FILE: &str = "ccs-connection-file";
pub const UNMOUNT_MEDIA: &str = "unmount-media";

const DOTNET35_FEATURE: &str = "NET-Framework-Core";
const SQL_NATIVE_CLIENT_PACKAGE: &str = "Microsoft SQL Server Native Client";
const SQL_NATIVE_CLIENT_MSI: &str = r"prereqs\sqlncli.msi";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StepAction {
    #[serde(rename_all = "camelCase")]
    MountMedia { iso_path: String, drive_letter: char },
    #[serde(rename_all = "camelCase")]
    WindowsFeature { name: String, source: String },
    #[serde(rename_all = "camelCase")]
    Package {
        name: String,
        version: Option<String>,
        source: String,
    },
    #[serde(rename_all = "camelCase")]
    SqlScript {
        server: String,
        database: String,
        script: String,
    },
    #[serde(rename_all = "camelCase")]
    File { path: String, content: String },
    #[serde(rename_all = "camelCase")]
    UnmountMedia { iso_path: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallStep {
    pub id: String,
    pub description: String,
    pub action: StepAction,
    pub depends_on: Vec<String>,
}

impl InstallStep {
    fn new(
        id: &str,
        description: impl Into<String>,
        action: StepAction,
        depends_on: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            description: description.into(),
            action,
            depends_on: depends_on.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationPlan {
    pub product: Product,
    pub version: String,
    pub steps: Vec<InstallStep>,
}

impl InstallationPlan {
    pub fn step(&self, id: &str) -> Option<&InstallStep> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.id.as_str()).collect()
    }

    pub fn contains_ccs_artifacts(&self) -> bool {
        [CCS_PACKAGE, CCS_DATABASE, CCS_CONNECTION_FILE]
            .iter()
            .any(|id| self.step(id).is_some())
    }

    pub fn contains_ods_artifacts(&self) -> bool {
        self.step(ODS_PACKAGE).is_some()
    }

    /// Checks that every dependency refers to a step declared earlier
    pub fn validate_ordering(&self) -> std::result::Result<(), String> {
        for (index, step) in self.steps.iter().enumerate() {
            for dependency in &step.depends_on {
                let declared_before = self.steps[..index].iter().any(|s| &s.id == dependency);
                if !declared_before {
                    return Err(format!(
                        "Step '{}' depends on '{}' which is not declared before it",
                        step.id, dependency
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Validates and plans in one call
pub fn build_plan(request: &InstallRequest) -> Result<InstallationPlan> {
    let validated = validate_request(request)?;
    Ok(plan_installation(&validated))
}

/// Plans the installation steps for a validated request
pub fn plan_installation(request: &ValidatedRequest) -> InstallationPlan {
    let media_root = request.media.mount_root();
    let mut steps = Vec::with_capacity(8);

    steps.push(InstallStep::new(
        MOUNT_MEDIA,
        format!("Mount installation media on {media_root}"),
        StepAction::MountMedia {
            iso_path: request.media.iso_path.clone(),
            drive_letter: request.media.drive_letter.to_ascii_uppercase(),
        },
        &[],
    ));

    steps.extend(plan_prerequisites(&media_root));
    steps.push(plan_product_package(request, &media_root));

    if let (Product::Ccs, Some(server)) = (request.product, request.ccs_server_name.as_deref()) {
        steps.extend(plan_ccs_database(request, server));
    }

    let installed: Vec<String> = steps
        .iter()
        .filter(|step| step.id != MOUNT_MEDIA)
        .map(|step| step.id.clone())
        .collect();
    steps.push(InstallStep {
        id: UNMOUNT_MEDIA.to_string(),
        description: "Unmount installation media".to_string(),
        action: StepAction::UnmountMedia {
            iso_path: request.media.iso_path.clone(),
        },
        depends_on: installed,
    });

    InstallationPlan {
        product: request.product,
        version: request.version.clone(),
        steps,
    }
}

fn plan_prerequisites(media_root: &str) -> Vec<InstallStep> {
    vec![
        InstallStep::new(
            DOTNET35,
            "Enable .NET Framework 3.5",
            StepAction::WindowsFeature {
                name: DOTNET35_FEATURE.to_string(),
                source: format!(r"{media_root}sources\sxs"),
            },
            &[MOUNT_MEDIA],
        ),
        InstallStep::new(
            SQL_NATIVE_CLIENT,
            "Install SQL Server Native Client",
            StepAction::Package {
                name: SQL_NATIVE_CLIENT_PACKAGE.to_string(),
                version: None,
                source: format!("{media_root}{SQL_NATIVE_CLIENT_MSI}"),
            },
            &[MOUNT_MEDIA],
        ),
    ]
}

fn plan_product_package(request: &ValidatedRequest, media_root: &str) -> InstallStep {
    let (id, package_name) = match request.product {
        Product::Ods => (ODS_PACKAGE, "Dialer ODS"),
        Product::Ccs => (CCS_PACKAGE, "Dialer CCS"),
    };
    let product = request.product.as_str();

    InstallStep::new(
        id,
        format!("Install {package_name} {}", request.version),
        StepAction::Package {
            name: package_name.to_string(),
            version: Some(request.version.clone()),
            source: format!(r"{media_root}{product}\setup.msi"),
        },
        &[MOUNT_MEDIA, DOTNET35],
    )
}

fn plan_ccs_database(request: &ValidatedRequest, server: &str) -> Vec<InstallStep> {
    let database = request.database.database_name.trim();

    vec![
        InstallStep::new(
            CCS_DATABASE,
            format!("Create database {database} on {server}"),
            StepAction::SqlScript {
                server: server.to_string(),
                database: database.to_string(),
                script: create_database_script(database),
            },
            &[SQL_NATIVE_CLIENT, CCS_PACKAGE],
        ),
        InstallStep::new(
            CCS_CONNECTION_FILE,
            format!("Write connection file {}", request.database.connection_file),
            StepAction::File {
                path: request.database.connection_file.clone(),
                content: connection_file_content(server, database),
            },
            &[CCS_DATABASE],
        ),
    ]
}

pub fn create_database_script(database: &str) -> String {
    format!("IF DB_ID(N'{database}') IS NULL CREATE DATABASE [{database}];")
}

/// Universal Data Link file pointing the CCS services at the database
pub fn connection_file_content(server: &str, database: &str) -> String {
    format!(
        "[oledb]\r\n; Everything after this line is an OLE DB initstring\r\n\
         Provider=SQLNCLI11.1;Integrated Security=SSPI;Persist Security Info=False;\
         Initial Catalog={database};Data Source={server}\r\n"
    )
}
