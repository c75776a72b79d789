//! Embedded fallback dataset.
//!
//! A fixed basic-character list compiled into the binary, used as the last
//! link of the source chain so the codex always has something to render when
//! the live bulk source is unreachable or malformed. The set is constructed
//! in code (not parsed) so it cannot fail, and it must satisfy the same
//! validation rules as the live source.

use super::models::{BasicCharacter, ColorScheme, PowerTier};

fn character(
    id: &str,
    name: &str,
    race: &str,
    role: &str,
    power: PowerTier,
    portrait: &str,
    colors: (&str, &str, &str),
) -> BasicCharacter {
    BasicCharacter {
        id: id.to_string(),
        name: name.to_string(),
        race: race.to_string(),
        role: role.to_string(),
        power,
        portrait: portrait.to_string(),
        image: format!("assets/characters/{id}.webp"),
        color_scheme: ColorScheme {
            primary: colors.0.to_string(),
            secondary: colors.1.to_string(),
            glow: colors.2.to_string(),
        },
    }
}

/// The built-in basic list. Guaranteed non-empty and schema-valid.
pub fn fallback_characters() -> Vec<BasicCharacter> {
    vec![
        character(
            "rimuru",
            "Rimuru Tempest",
            "Slime",
            "Founder of Tempest",
            PowerTier::Catastrophe,
            "~",
            ("#7ec8e3", "#c0c0c0", "#9ef0ff"),
        ),
        character(
            "benimaru",
            "Benimaru",
            "Kijin",
            "Samurai General",
            PowerTier::Calamity,
            "炎",
            ("#e0493e", "#2b2b2b", "#ff7a5c"),
        ),
        character(
            "shion",
            "Shion",
            "Kijin",
            "First Secretary",
            PowerTier::Disaster,
            "刀",
            ("#6a4fb3", "#1d1d2e", "#a88bff"),
        ),
        character(
            "shuna",
            "Shuna",
            "Kijin",
            "Head of Wardrobe and Rites",
            PowerTier::Hazard,
            "桜",
            ("#f2a7c3", "#fdf3f7", "#ffc9dd"),
        ),
        character(
            "souei",
            "Souei",
            "Kijin",
            "Shadow Operative",
            PowerTier::Disaster,
            "影",
            ("#315d8c", "#0e1420", "#5fa8e0"),
        ),
        character(
            "ranga",
            "Ranga",
            "Tempest Star Wolf",
            "Mount and Guardian",
            PowerTier::Disaster,
            "狼",
            ("#4b4e6d", "#d9d9e3", "#8f93c9"),
        ),
        character(
            "diablo",
            "Diablo",
            "Demon",
            "Second Secretary",
            PowerTier::Catastrophe,
            "黒",
            ("#1a1a1a", "#7d0000", "#c41e3a"),
        ),
        character(
            "milim",
            "Milim Nava",
            "Dragonoid",
            "Demon Lord",
            PowerTier::Catastrophe,
            "竜",
            ("#ff5fa2", "#2d9ccc", "#ffd1e8"),
        ),
        character(
            "gobta",
            "Gobta",
            "Hobgoblin",
            "Goblin Rider Captain",
            PowerTier::Danger,
            "騎",
            ("#7da75f", "#5b4632", "#b5e08c"),
        ),
        character(
            "rigurd",
            "Rigurd",
            "Hobgoblin",
            "Goblin Lord and Prime Minister",
            PowerTier::Danger,
            "政",
            ("#9a7b4f", "#3c2f1f", "#d9b98a"),
        ),
    ]
}
