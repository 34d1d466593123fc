//! Plan output for the command line

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::core::plan::{InstallationPlan, StepAction};
use crate::error::{DialerError, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanDocument<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    plan: &'a InstallationPlan,
}

/// Pretty JSON with a generation timestamp
pub fn render_json(plan: &InstallationPlan, generated_at: DateTime<Utc>) -> Result<String> {
    let document = PlanDocument { generated_at, plan };
    serde_json::to_string_pretty(&document)
        .map_err(|e| DialerError::Other(anyhow::anyhow!("Failed to serialize plan: {e}")))
}

pub fn render_text(plan: &InstallationPlan) -> String {
    let mut out = format!(
        "{} Installation plan for {} {}\n",
        "→".green(),
        plan.product.as_str().cyan().bold(),
        plan.version
    );

    for (index, step) in plan.steps.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {} {}\n",
            index + 1,
            step.id.bold(),
            describe_action(&step.action).dimmed()
        ));
        if !step.depends_on.is_empty() {
            out.push_str(&format!(
                "      {} requires: {}\n",
                "↳".blue(),
                step.depends_on.join(", ")
            ));
        }
    }

    out
}

fn describe_action(action: &StepAction) -> String {
    match action {
        StepAction::MountMedia {
            iso_path,
            drive_letter,
        } => format!("mount {iso_path} as {drive_letter}:"),
        StepAction::WindowsFeature { name, source } => format!("feature {name} from {source}"),
        StepAction::Package {
            name,
            version,
            source,
        } => match version {
            Some(version) => format!("package '{name}' {version} from {source}"),
            None => format!("package '{name}' from {source}"),
        },
        StepAction::SqlScript {
            server, database, ..
        } => format!("sql script for {database} on {server}"),
        StepAction::File { path, .. } => format!("file {path}"),
        StepAction::UnmountMedia { iso_path } => format!("unmount {iso_path}"),
    }
}
