//! Player identity as supplied by the player-data provider.
//!
//! Field names follow the provider's JSON (`idPlayer`, `strPlayer`, ...) so that
//! records fetched from search, stored in saves and exported to files all share
//! one shape. Fields the core does not interpret are kept in `extra` and
//! written back untouched.

use super::stats::{CardStats, StatKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field parsers for records written by other tools (hand-edited exports,
/// numeric provider ids). Values of the wrong type coerce when they can and
/// are dropped otherwise, so a single odd field never rejects the record.
mod lenient {
    use super::StatOverride;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Integers pass through; floats and numeric strings truncate toward zero.
    pub fn stat<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(i.clamp(i32::MIN as i64, i32::MAX as i64) as i32),
                None => n.as_f64().map(|f| f as i32),
            },
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i32>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i32))
            }
            _ => None,
        })
    }

    pub fn overrides<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<StatOverride>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            value @ Value::Object(_) => StatOverride::deserialize(value).ok().filter(|o| !o.is_empty()),
            _ => None,
        })
    }
}

/// User-supplied replacement values from the stat editor.
///
/// Every field is optional; a present field wins over the synthesized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatOverride {
    #[serde(default, deserialize_with = "lenient::stat", skip_serializing_if = "Option::is_none")]
    pub pac: Option<i32>,
    #[serde(default, deserialize_with = "lenient::stat", skip_serializing_if = "Option::is_none")]
    pub sho: Option<i32>,
    #[serde(default, deserialize_with = "lenient::stat", skip_serializing_if = "Option::is_none")]
    pub pas: Option<i32>,
    #[serde(default, deserialize_with = "lenient::stat", skip_serializing_if = "Option::is_none")]
    pub dri: Option<i32>,
    #[serde(default, deserialize_with = "lenient::stat", skip_serializing_if = "Option::is_none")]
    pub def: Option<i32>,
    #[serde(default, deserialize_with = "lenient::stat", skip_serializing_if = "Option::is_none")]
    pub phy: Option<i32>,
    #[serde(default, deserialize_with = "lenient::stat", skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
}

impl StatOverride {
    /// Override every field, as the editor does when saving a full card.
    pub fn from_stats(stats: &CardStats) -> Self {
        Self {
            pac: Some(stats.pac),
            sho: Some(stats.sho),
            pas: Some(stats.pas),
            dri: Some(stats.dri),
            def: Some(stats.def),
            phy: Some(stats.phy),
            rating: Some(stats.rating),
        }
    }

    pub fn get(&self, kind: StatKind) -> Option<i32> {
        match kind {
            StatKind::Pac => self.pac,
            StatKind::Sho => self.sho,
            StatKind::Pas => self.pas,
            StatKind::Dri => self.dri,
            StatKind::Def => self.def,
            StatKind::Phy => self.phy,
            StatKind::Rating => self.rating,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: Option<i32>) {
        match kind {
            StatKind::Pac => self.pac = value,
            StatKind::Sho => self.sho = value,
            StatKind::Pas => self.pas = value,
            StatKind::Dri => self.dri = value,
            StatKind::Def => self.def = value,
            StatKind::Phy => self.phy = value,
            StatKind::Rating => self.rating = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        StatKind::ALL.iter().all(|kind| self.get(*kind).is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Stable provider identifier; preferred hash seed
    #[serde(
        rename = "idPlayer",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        rename = "strPlayer",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// Natural position, free text (e.g. "Centre-Back", "Left Winger")
    #[serde(
        rename = "strPosition",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<String>,

    #[serde(
        rename = "strNationality",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub nationality: Option<String>,

    #[serde(
        rename = "strTeam",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub club: Option<String>,

    #[serde(
        rename = "strCutout",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cutout: Option<String>,

    #[serde(
        rename = "strThumb",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumb: Option<String>,

    #[serde(
        rename = "strRender",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub render: Option<String>,

    #[serde(
        rename = "strDescriptionEN",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub biography: Option<String>,

    #[serde(
        rename = "customStats",
        default,
        deserialize_with = "lenient::overrides",
        skip_serializing_if = "Option::is_none"
    )]
    pub overrides: Option<StatOverride>,

    /// Mirror of `overrides.rating`, or a canonical rating from the provider
    #[serde(
        rename = "customRating",
        default,
        deserialize_with = "lenient::stat",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_rating: Option<i32>,

    /// Provider fields the core treats as opaque
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: Some(id.into()), name: Some(name.into()), ..Self::default() }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = Some(nationality.into());
        self
    }

    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.club = Some(club.into());
        self
    }

    pub fn with_override(mut self, overrides: StatOverride) -> Self {
        self.apply_override(overrides);
        self
    }

    /// Hash seed: the provider id when present, otherwise the display name.
    pub fn identity(&self) -> &str {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => self.name.as_deref().unwrap_or(""),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Store an override and keep the top-level rating mirror in step with it.
    pub fn apply_override(&mut self, overrides: StatOverride) {
        self.custom_rating = overrides.rating;
        self.overrides = if overrides.is_empty() { None } else { Some(overrides) };
    }

    pub fn clear_override(&mut self) {
        self.overrides = None;
        self.custom_rating = None;
    }

    /// Rating that takes precedence over synthesis, if any.
    pub fn rating_override(&self) -> Option<i32> {
        self.overrides.and_then(|o| o.rating).or(self.custom_rating)
    }

    /// Card image in display precedence: cutout, thumb, render.
    pub fn portrait(&self) -> Option<&str> {
        [&self.cutout, &self.thumb, &self.render]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .find(|url| !url.is_empty())
    }
}
