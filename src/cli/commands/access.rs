use clap::Subcommand;
use serde_json::json;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::access::{resolve, Caller, Decision, JurisdictionMap, NoHierarchy, ScopeRequest};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AccessCommands {
    #[command(about = "Decide whether a caller may read a scope")]
    Check {
        #[arg(long, help = "Caller role, e.g. city_admin")]
        role: String,
        #[arg(long, help = "Caller's city (city_admin)")]
        city_id: Option<Uuid>,
        #[arg(long, help = "Caller's ward (ward_supervisor)")]
        ward_id: Option<Uuid>,
        #[arg(long, help = "Caller's zone (crc_supervisor)")]
        zone_id: Option<Uuid>,
        #[arg(long, help = "Requested scope: state, city, zone or ward")]
        scope: String,
        #[arg(long, help = "Requested jurisdiction id")]
        id: Option<String>,
        #[arg(long, help = "YAML file mapping wards and zones to their city")]
        hierarchy: Option<PathBuf>,
    },
}

pub async fn handle(cmd: AccessCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AccessCommands::Check {
            role,
            city_id,
            ward_id,
            zone_id,
            scope,
            id,
            hierarchy,
        } => {
            let caller = Caller::from_parts(&role, city_id, ward_id, zone_id)?;
            let request = ScopeRequest::parse(Some(&scope), id.as_deref())?;

            let decision = match hierarchy {
                Some(path) => resolve(&caller, &request, &load_hierarchy(&path)?),
                None => resolve(&caller, &request, &NoHierarchy),
            };

            let message = match &decision {
                Decision::Allow { filter } => match filter.predicate() {
                    Some((column, id)) => format!("allow {} on {} (issues.{} = {})", caller.role(), request, column, id),
                    None => format!("allow {} on {} (all issues)", caller.role(), request),
                },
                Decision::Deny { reason } => format!("deny {} on {}: {}", caller.role(), request, reason.message()),
            };

            output_success(
                output_format,
                &message,
                Some(json!({ "request": request, "result": decision })),
            )?;

            if !decision.is_allowed() {
                anyhow::bail!("access denied");
            }
            Ok(())
        }
    }
}

/// Read a hierarchy file of the form
///
/// ```yaml
/// wards:
///   <ward-uuid>: <city-uuid>
/// zones:
///   <zone-uuid>: <city-uuid>
/// ```
pub fn load_hierarchy(path: &Path) -> anyhow::Result<JurisdictionMap> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read hierarchy file {}: {}", path.display(), e))?;
    parse_hierarchy(&content)
}

fn parse_hierarchy(content: &str) -> anyhow::Result<JurisdictionMap> {
    Ok(serde_yaml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::JurisdictionLookup;
    use crate::access::ScopeDimension;

    #[test]
    fn parses_yaml_hierarchy() {
        let yaml = r#"
wards:
  8b5f8c1e-3a5b-4d59-9a51-3b0a2f3b9a01: 1c8a3a52-bb1f-4a63-a7a8-5a3b0f3c4d10
"#;
        let map = parse_hierarchy(yaml).unwrap();
        let ward = Uuid::parse_str("8b5f8c1e-3a5b-4d59-9a51-3b0a2f3b9a01").unwrap();
        let city = Uuid::parse_str("1c8a3a52-bb1f-4a63-a7a8-5a3b0f3c4d10").unwrap();
        assert_eq!(map.parent_city(ScopeDimension::Ward, ward), Some(city));
        assert!(map.zones.is_empty());
    }

    #[test]
    fn rejects_malformed_hierarchy() {
        assert!(parse_hierarchy("wards: [1, 2]").is_err());
    }
}
