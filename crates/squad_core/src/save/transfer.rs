//! JSON export/import of the live squad
//!
//! Exports use the key names of the original web builder (`appName`,
//! `version`, `exportedAt`, `squad`, `formation`) so files move between the
//! two. Imports accept those names and the descriptive ones (`appIdentifier`,
//! `schemaVersion`, `slotMap`, `formationId`).

use crate::error::{Result, SquadError};
use crate::models::SquadSlotMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const SQUAD_KEYS: [&str; 2] = ["squad", "slotMap"];
const FORMATION_KEYS: [&str; 2] = ["formation", "formationId"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadExport {
    #[serde(rename = "appName", alias = "appIdentifier")]
    pub app_identifier: String,
    #[serde(rename = "version", alias = "schemaVersion")]
    pub schema_version: String,
    /// Unix milliseconds
    #[serde(rename = "exportedAt")]
    pub exported_at: u64,
    #[serde(rename = "squad", alias = "slotMap")]
    pub slot_map: SquadSlotMap,
    #[serde(rename = "formation", alias = "formationId")]
    pub formation_id: String,
}

impl SquadExport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SquadError::Serialization(e.to_string()))
    }
}

/// The two fields an import replaces, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSquad {
    pub slot_map: SquadSlotMap,
    pub formation_id: String,
    pub app_identifier: Option<String>,
    pub schema_version: Option<String>,
}

/// Check presence and shape of the squad and formation fields.
///
/// Player records themselves are not validated beyond being JSON objects;
/// loosely typed fields inside them are coerced or dropped.
pub fn parse_import(raw: &str) -> Result<ImportedSquad> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| SquadError::Validation(format!("Invalid squad file: {e}")))?;
    let Value::Object(object) = value else {
        return Err(SquadError::Validation("Invalid squad file: expected a JSON object".to_string()));
    };

    let squad = take_field(&object, &SQUAD_KEYS)?;
    let slot_map: SquadSlotMap = serde_json::from_value(squad.clone())
        .map_err(|e| SquadError::Validation(format!("Invalid squad: {e}")))?;

    let formation_id = match take_field(&object, &FORMATION_KEYS)? {
        Value::String(id) if !id.trim().is_empty() => id.clone(),
        other => {
            return Err(SquadError::Validation(format!("Invalid formation: {other}")));
        }
    };

    Ok(ImportedSquad {
        slot_map,
        formation_id,
        app_identifier: string_field(&object, &["appName", "appIdentifier"]),
        schema_version: string_field(&object, &["version", "schemaVersion"]),
    })
}

/// First present, non-null value among `keys`.
fn take_field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Result<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
        .ok_or_else(|| SquadError::Validation(format!("Missing required field: {}", keys[0])))
}

fn string_field(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match object.get(*key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_original_export() {
        let raw = json!({
            "appName": "FC26-Builder",
            "version": "1.0",
            "exportedAt": 1_700_000_000_000u64,
            "squad": {"gk": {"idPlayer": "1", "strPlayer": "Keeper"}},
            "formation": "4-3-3"
        })
        .to_string();

        let imported = parse_import(&raw).unwrap();
        assert_eq!(imported.formation_id, "4-3-3");
        assert!(imported.slot_map.is_occupied("gk"));
        assert_eq!(imported.app_identifier.as_deref(), Some("FC26-Builder"));
        assert_eq!(imported.schema_version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_parse_descriptive_keys_without_metadata() {
        let raw = json!({"slotMap": {}, "formationId": "3-5-2"}).to_string();
        let imported = parse_import(&raw).unwrap();
        assert!(imported.slot_map.is_empty());
        assert_eq!(imported.formation_id, "3-5-2");
        assert_eq!(imported.app_identifier, None);
    }

    #[test]
    fn test_player_contents_are_not_schema_checked() {
        let raw = json!({
            "squad": {
                "gk": {"idPlayer": 34145937, "strPlayer": "Keeper"},
                "lb": {"strPlayer": "Back", "customRating": "97"},
                "lcb": {"strPlayer": "Centre", "customStats": {"pac": 90.5}}
            },
            "formation": "4-4-2"
        })
        .to_string();

        let imported = parse_import(&raw).unwrap();
        assert_eq!(imported.slot_map.len(), 3);
        assert_eq!(imported.slot_map.get("gk").map(|p| p.identity()), Some("34145937"));
        assert_eq!(imported.slot_map.get("lb").and_then(|p| p.custom_rating), Some(97));
        assert_eq!(
            imported.slot_map.get("lcb").and_then(|p| p.overrides).and_then(|o| o.pac),
            Some(90)
        );
    }

    #[test]
    fn test_missing_formation_is_validation_error() {
        let raw = json!({"squad": {}}).to_string();
        let err = parse_import(&raw).unwrap_err();
        assert_eq!(err, SquadError::Validation("Missing required field: formation".to_string()));
    }

    #[test]
    fn test_missing_squad_is_validation_error() {
        let raw = json!({"formation": "4-4-2", "squad": null}).to_string();
        assert!(matches!(parse_import(&raw), Err(SquadError::Validation(_))));
    }

    #[test]
    fn test_malformed_payloads_are_validation_errors() {
        let cases = [
            "not json".to_string(),
            "[1, 2]".to_string(),
            json!({"squad": [], "formation": "4-4-2"}).to_string(),
            json!({"squad": {}, "formation": 442}).to_string(),
            json!({"squad": {}, "formation": ""}).to_string(),
        ];
        for raw in cases {
            assert!(matches!(parse_import(&raw), Err(SquadError::Validation(_))), "{raw}");
        }
    }

    #[test]
    fn test_export_uses_original_key_names() {
        let export = SquadExport {
            app_identifier: "FC26-Builder".to_string(),
            schema_version: "1.0".to_string(),
            exported_at: 42,
            slot_map: SquadSlotMap::new(),
            formation_id: "4-4-2".to_string(),
        };

        let value: Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "appName": "FC26-Builder",
                "version": "1.0",
                "exportedAt": 42,
                "squad": {},
                "formation": "4-4-2"
            })
        );

        let back: SquadExport = serde_json::from_value(value).unwrap();
        assert_eq!(back, export);
    }
}
