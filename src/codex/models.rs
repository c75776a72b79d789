//! Character record types and wire-shape validation.
//!
//! Two record shapes come off the wire: the bulk basic list (one summary
//! entry per character, used for listing/search/filtering) and the detailed
//! per-character record (a superset of the basic shape with the narrative
//! fields the profile pages render). Optional detail fields deserialize to
//! empty values; their absence is never an error.

use serde::{Deserialize, Serialize};

use super::error::CodexError;

// ============================================================================
// Power tiers
// ============================================================================

/// Threat-classification labels used across the encyclopedia.
///
/// The wire format carries these as lowercase strings; anything outside the
/// known set collapses to [`PowerTier::Unranked`] rather than failing the
/// record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerTier {
    Catastrophe,
    Calamity,
    Disaster,
    Hazard,
    Danger,
    #[default]
    #[serde(other)]
    Unranked,
}

impl PowerTier {
    /// Human-readable label for list badges.
    pub fn label(&self) -> &'static str {
        match self {
            PowerTier::Catastrophe => "Catastrophe",
            PowerTier::Calamity => "Calamity",
            PowerTier::Disaster => "Disaster",
            PowerTier::Hazard => "Hazard",
            PowerTier::Danger => "Danger",
            PowerTier::Unranked => "Unranked",
        }
    }
}

/// Display colors for a character card (primary/secondary/glow).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub secondary: String,
    #[serde(default)]
    pub glow: String,
}

// ============================================================================
// Basic character record
// ============================================================================

/// Summary record used for listing, search and pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicCharacter {
    /// Stable unique key; also the detail-resource name.
    pub id: String,
    pub name: String,
    pub race: String,
    pub role: String,
    #[serde(default)]
    pub power: PowerTier,
    /// Display glyph shown before the character image loads.
    #[serde(default)]
    pub portrait: String,
    /// Relative asset path of the character image.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub color_scheme: ColorScheme,
}

impl BasicCharacter {
    /// A record is usable iff the four key fields are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.name.trim().is_empty()
            && !self.race.trim().is_empty()
            && !self.role.trim().is_empty()
    }

    /// Case-insensitive substring match against name, role and race.
    ///
    /// `needle` must already be lowercased by the caller.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.role.to_lowercase().contains(needle)
            || self.race.to_lowercase().contains(needle)
    }
}

/// Parse a bulk-list payload, dropping individually bad records.
///
/// The payload must be a JSON array; each element is deserialized and
/// validated on its own, so one malformed or incomplete record never fails
/// the batch. An empty result after filtering is treated the same as a
/// malformed payload so the caller can fail over to the next source.
pub fn parse_basic_list(
    payload: serde_json::Value,
    source: &str,
) -> Result<Vec<BasicCharacter>, CodexError> {
    let items = payload
        .as_array()
        .ok_or_else(|| CodexError::InvalidPayload {
            origin: source.to_string(),
            reason: "bulk character list is not a JSON array".to_string(),
        })?;

    let mut characters = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<BasicCharacter>(item.clone()) {
            Ok(character) if character.is_valid() => characters.push(character),
            Ok(character) => {
                let id = if character.id.is_empty() {
                    "<no id>"
                } else {
                    character.id.as_str()
                };
                log::warn!("dropping character record '{id}' from {source}: missing required fields");
            }
            Err(e) => {
                log::warn!("skipping malformed character record from {source}: {e}");
            }
        }
    }

    if characters.is_empty() {
        return Err(CodexError::EmptyList {
            origin: source.to_string(),
        });
    }

    Ok(characters)
}

// ============================================================================
// Detailed character record
// ============================================================================

/// Skill categories, broadest last so unknown labels land on `Common`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillKind {
    Ultimate,
    Unique,
    Extra,
    Intrinsic,
    #[default]
    #[serde(other)]
    Common,
}

/// A named ability on a character sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub kind: SkillKind,
    #[serde(default)]
    pub description: Option<String>,
}

/// A tie to another codex entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// ID of the related character, when it has its own codex entry.
    #[serde(default)]
    pub character_id: Option<String>,
    pub name: String,
    /// e.g. "sworn subordinate", "rival", "old friend".
    pub relation: String,
}

/// One step of a character's evolution line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionStage {
    #[serde(default)]
    pub stage: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Aggregate numbers rendered on the overview dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactStats {
    #[serde(default)]
    pub battles_won: u32,
    #[serde(default)]
    pub named_subordinates: u32,
    #[serde(default)]
    pub nations_allied: u32,
}

/// Full per-character record fetched on demand for the profile page.
///
/// Every optional field renders as "not yet available" when absent; a detail
/// record is never rejected for missing narrative content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDetail {
    #[serde(flatten)]
    pub basic: BasicCharacter,
    #[serde(default)]
    pub lore: Option<String>,
    #[serde(default)]
    pub backstory: Option<String>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub evolution: Vec<EvolutionStage>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub impact: Option<ImpactStats>,
    #[serde(default)]
    pub quotes: Vec<String>,
}

impl CharacterDetail {
    /// Wrap a basic record as a detail record with no narrative content.
    ///
    /// This is the substitution value used when the detail fetch fails but
    /// the character exists in the basic list.
    pub fn from_basic(basic: BasicCharacter) -> Self {
        Self {
            basic,
            lore: None,
            backstory: None,
            personality: None,
            skills: Vec::new(),
            relationships: Vec::new(),
            evolution: Vec::new(),
            achievements: Vec::new(),
            impact: None,
            quotes: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.basic.id
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_record() -> serde_json::Value {
        json!({
            "id": "rimuru",
            "name": "Rimuru Tempest",
            "race": "Slime",
            "role": "Founder of Tempest",
            "power": "catastrophe",
            "portrait": "~",
            "image": "assets/characters/rimuru.webp",
            "colorScheme": { "primary": "#7ec8e3", "secondary": "#c0c0c0", "glow": "#9ef0ff" }
        })
    }

    #[test]
    fn test_basic_character_deserializes() {
        let character: BasicCharacter = serde_json::from_value(valid_record()).unwrap();
        assert_eq!(character.id, "rimuru");
        assert_eq!(character.power, PowerTier::Catastrophe);
        assert_eq!(character.color_scheme.primary, "#7ec8e3");
        assert!(character.is_valid());
    }

    #[test]
    fn test_unknown_power_tier_is_unranked() {
        let mut record = valid_record();
        record["power"] = json!("mythical");
        let character: BasicCharacter = serde_json::from_value(record).unwrap();
        assert_eq!(character.power, PowerTier::Unranked);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let record = json!({
            "id": "gobta", "name": "Gobta", "race": "Hobgoblin", "role": "Goblin Rider Captain"
        });
        let character: BasicCharacter = serde_json::from_value(record).unwrap();
        assert_eq!(character.power, PowerTier::Unranked);
        assert!(character.portrait.is_empty());
        assert_eq!(character.color_scheme, ColorScheme::default());
    }

    #[test]
    fn test_validation_requires_key_fields() {
        let mut record = valid_record();
        record["role"] = json!("");
        let character: BasicCharacter = serde_json::from_value(record).unwrap();
        assert!(!character.is_valid());
    }

    #[test]
    fn test_parse_list_filters_invalid_records() {
        let payload = json!([
            valid_record(),
            { "id": "nameless", "name": "", "race": "Ogre", "role": "Guard" },
            { "id": 42 },
        ]);
        let characters = parse_basic_list(payload, "test").unwrap();
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].id, "rimuru");
    }

    #[test]
    fn test_parse_list_rejects_non_array() {
        let err = parse_basic_list(json!({ "characters": [] }), "test").unwrap_err();
        assert!(matches!(err, CodexError::InvalidPayload { .. }));
    }

    #[test]
    fn test_parse_list_rejects_empty_after_filtering() {
        let payload = json!([{ "id": "", "name": "", "race": "", "role": "" }]);
        let err = parse_basic_list(payload, "test").unwrap_err();
        assert!(matches!(err, CodexError::EmptyList { .. }));
    }

    #[test]
    fn test_search_match_is_case_insensitive() {
        let character: BasicCharacter = serde_json::from_value(valid_record()).unwrap();
        assert!(character.matches("rimuru"));
        assert!(character.matches("slime"));
        assert!(character.matches("tempest"));
        assert!(!character.matches("demon lord of flame"));
    }

    #[test]
    fn test_detail_tolerates_absent_narrative_fields() {
        let detail: CharacterDetail = serde_json::from_value(valid_record()).unwrap();
        assert_eq!(detail.id(), "rimuru");
        assert!(detail.lore.is_none());
        assert!(detail.skills.is_empty());
        assert!(detail.quotes.is_empty());
    }

    #[test]
    fn test_detail_parses_narrative_fields() {
        let mut record = valid_record();
        record["lore"] = json!("Reincarnated as a slime in a cave beneath the Sealed Cavern.");
        record["skills"] = json!([
            { "name": "Great Sage", "kind": "unique" },
            { "name": "Raphael", "kind": "ultimate", "description": "Lord of Wisdom" },
            { "name": "Water Blade", "kind": "arts" }
        ]);
        record["impact"] = json!({ "battlesWon": 40, "namedSubordinates": 12 });
        let detail: CharacterDetail = serde_json::from_value(record).unwrap();
        assert_eq!(detail.skills.len(), 3);
        assert_eq!(detail.skills[0].kind, SkillKind::Unique);
        assert_eq!(detail.skills[2].kind, SkillKind::Common);
        assert_eq!(detail.impact.unwrap().battles_won, 40);
        assert_eq!(detail.impact.unwrap().nations_allied, 0);
    }

    #[test]
    fn test_from_basic_carries_no_narrative() {
        let character: BasicCharacter = serde_json::from_value(valid_record()).unwrap();
        let detail = CharacterDetail::from_basic(character.clone());
        assert_eq!(detail.basic, character);
        assert!(detail.backstory.is_none());
        assert!(detail.relationships.is_empty());
    }
}
