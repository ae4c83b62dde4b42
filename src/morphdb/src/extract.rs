//! Spell morph extraction from SimC spell data dumps
//!
//! A dump is a sequence of spell entries. Each entry starts with a `Name` line
//! carrying the spell id, followed by its effects. An override effect looks like:
//!
//! ```text
//! Name             : Azure Strike (id=212)
//! ...
//! #2 (id=101)      : Override Action Spell (Misc w/ Base) (332): Azure Sweep overrides Azure Strike
//!                    Misc Value: 332
//! ```
//!
//! The scan is a single pass over the lines. The most recent `Name` line wins:
//! an override is attributed to whichever spell entry was declared last, even
//! if unrelated text sits in between.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Marker that must appear on a line for it to be considered an override effect
const OVERRIDE_MARKER: &str = "Override Action Spell";

/// How many lines after an override line may carry its `Misc Value`
const MISC_VALUE_LOOKAHEAD: usize = 2;

static SPELL_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Name\s+:\s+(.+?)\s+\(id=(\d+)\)").expect("spell header pattern is valid")
});

static OVERRIDE_EFFECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Override Action Spell.*?:\s+(.+?)\s+overrides\s+(.+?)(?:\s*\||\s*$)")
        .expect("override effect pattern is valid")
});

static MISC_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Misc Value:\s*(\d+)").expect("misc value pattern is valid"));

/// One ability replacing another while its trigger aura is active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellMorph {
    /// The ability that takes over the action slot
    pub override_spell: String,

    /// Id of the spell entry the override effect was found in
    pub override_spell_id: u64,

    /// The ability being replaced
    pub base_spell: String,

    /// Base spell id taken from the effect's `Misc Value`, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_spell_id: Option<u64>,

    /// Guessed buff name that activates the morph
    pub trigger_buff: String,

    /// SimC action line using the morph
    pub rotation_usage: String,
}

impl SpellMorph {
    /// Create a morph, deriving the trigger buff and rotation usage from the names
    pub fn new(
        override_spell: impl Into<String>,
        override_spell_id: u64,
        base_spell: impl Into<String>,
        base_spell_id: Option<u64>,
    ) -> Self {
        let override_spell = override_spell.into();
        let base_spell = base_spell.into();
        let trigger_buff = Self::trigger_buff_for(&override_spell);
        let rotation_usage = Self::rotation_usage_for(&override_spell, &base_spell, &trigger_buff);

        SpellMorph {
            override_spell,
            override_spell_id,
            base_spell,
            base_spell_id,
            trigger_buff,
            rotation_usage,
        }
    }

    /// Guess the buff that triggers a morph.
    ///
    /// Heuristic only: the buff usually shares the override spell's name
    /// (Azure Sweep is gated on `buff.azure_sweep.up`). Nothing checks this
    /// against real aura data.
    pub fn trigger_buff_for(override_spell: &str) -> String {
        override_spell.to_lowercase().replace(' ', "_")
    }

    /// Build the SimC action line for a morph
    pub fn rotation_usage_for(override_spell: &str, base_spell: &str, trigger_buff: &str) -> String {
        format!("{override_spell},override={base_spell},if=buff.{trigger_buff}.up")
    }

    /// The buff condition expression, e.g. `buff.azure_sweep.up`
    pub fn trigger_condition(&self) -> String {
        format!("buff.{}.up", self.trigger_buff)
    }
}

/// Spell entry currently being scanned
struct CurrentSpell {
    name: String,
    id: u64,
}

/// Parse a dump and extract all spell morphs, in the order they appear
pub fn parse_spell_morphs(content: &str) -> Vec<SpellMorph> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut current: Option<CurrentSpell> = None;
    let mut morphs = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if let Some(spell) = parse_spell_header(line) {
            current = Some(spell);
        }

        let Some((override_spell, base_spell)) = parse_override(line) else {
            continue;
        };

        // Self-overrides are not meaningful morphs
        if override_spell == base_spell {
            continue;
        }

        let Some(spell) = &current else {
            tracing::debug!(
                "Override {} -> {} found before any spell entry, skipping",
                override_spell,
                base_spell
            );
            continue;
        };

        let base_spell_id = find_misc_value(&lines, i);

        tracing::debug!(
            "{} ({}) overrides {} in {}",
            override_spell,
            spell.id,
            base_spell,
            spell.name
        );

        morphs.push(SpellMorph::new(override_spell, spell.id, base_spell, base_spell_id));
    }

    morphs
}

fn parse_spell_header(line: &str) -> Option<CurrentSpell> {
    if !line.starts_with("Name") || !line.contains("id=") {
        return None;
    }

    let caps = SPELL_HEADER.captures(line)?;
    let id = match caps[2].parse::<u64>() {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!("Unparseable spell id in {:?}: {}", line.trim(), e);
            return None;
        }
    };

    Some(CurrentSpell {
        name: caps[1].trim().to_string(),
        id,
    })
}

fn parse_override(line: &str) -> Option<(&str, &str)> {
    if !line.contains(OVERRIDE_MARKER) || !line.contains("overrides") {
        return None;
    }

    let caps = OVERRIDE_EFFECT.captures(line)?;
    let override_spell = caps.get(1)?.as_str().trim();
    let base_spell = caps.get(2)?.as_str().trim();

    Some((override_spell, base_spell))
}

fn parse_misc_value(line: &str) -> Option<u64> {
    MISC_VALUE.captures(line)?[1].parse().ok()
}

/// Look for `Misc Value` on the override line, then on the next few lines
fn find_misc_value(lines: &[&str], index: usize) -> Option<u64> {
    lines
        .iter()
        .skip(index)
        .take(1 + MISC_VALUE_LOOKAHEAD)
        .find_map(|line| parse_misc_value(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    const AZURE_DUMP: &str = "\
Name             : Azure Strike (id=212) [Spell Family (224)]
Spell Level      : 10
Effects          :
#1 (id=1000)     : School Damage (2)
#2 (id=1001)     : Override Action Spell (Misc w/ Base) (332): Azure Sweep overrides Azure Strike
                   Base Value: 0 | Scaled Value: 0
                   Misc Value: 332
Description      : Project intense energy.
";

    #[test]
    fn test_azure_sweep_morph() {
        let morphs = parse_spell_morphs(AZURE_DUMP);

        assert_eq!(
            morphs,
            vec![SpellMorph {
                override_spell: "Azure Sweep".to_string(),
                override_spell_id: 212,
                base_spell: "Azure Strike".to_string(),
                base_spell_id: Some(332),
                trigger_buff: "azure_sweep".to_string(),
                rotation_usage: "Azure Sweep,override=Azure Strike,if=buff.azure_sweep.up"
                    .to_string(),
            }]
        );
    }

    #[test]
    fn test_no_override_lines() {
        let content = "\
Name             : Fire Breath (id=357208)
Effects          :
#1 (id=1)        : School Damage (2)
                   Misc Value: 12
";
        assert!(parse_spell_morphs(content).is_empty());
        assert!(parse_spell_morphs("").is_empty());
    }

    #[test]
    fn test_self_override_skipped() {
        let content = "\
Name             : Eternity Surge (id=359073)
#1 (id=1)        : Override Action Spell (332): Eternity Surge overrides Eternity Surge
                   Misc Value: 359073
";
        assert!(parse_spell_morphs(content).is_empty());
    }

    #[test]
    fn test_requires_marker_and_keyword() {
        let content = "\
Name             : Living Flame (id=361469)
#1 (id=1)        : Apply Aura (6): Chrono Flame overrides Living Flame
#2 (id=2)        : Override Action Spell (332): Chrono Flame replaces Living Flame
";
        assert!(parse_spell_morphs(content).is_empty());
    }

    #[test]
    fn test_override_before_any_spell_entry() {
        let content = "\
#1 (id=1)        : Override Action Spell (332): Azure Sweep overrides Azure Strike
                   Misc Value: 332
";
        assert!(parse_spell_morphs(content).is_empty());
    }

    #[test]
    fn test_misc_value_same_line() {
        let content = "\
Name             : Deep Breath (id=357210)
#1 (id=1)        : Override Action Spell (332): Breath of Eons overrides Deep Breath | Misc Value: 403631
                   Misc Value: 999
";
        let morphs = parse_spell_morphs(content);
        assert_eq!(morphs.len(), 1);
        assert_eq!(morphs[0].base_spell, "Deep Breath");
        assert_eq!(morphs[0].base_spell_id, Some(403631));
    }

    #[test]
    fn test_misc_value_outside_lookahead() {
        let content = "\
Name             : Azure Strike (id=212)
#1 (id=1)        : Override Action Spell (332): Azure Sweep overrides Azure Strike
                   Base Value: 0
                   Scaled Value: 0
                   Misc Value: 332
";
        let morphs = parse_spell_morphs(content);
        assert_eq!(morphs.len(), 1);
        assert_eq!(morphs[0].base_spell_id, None);
    }

    #[test]
    fn test_misc_value_first_match_wins() {
        let content = "\
Name             : Azure Strike (id=212)
#1 (id=1)        : Override Action Spell (332): Azure Sweep overrides Azure Strike
                   Misc Value: 100
                   Misc Value: 200
";
        let morphs = parse_spell_morphs(content);
        assert_eq!(morphs[0].base_spell_id, Some(100));
    }

    #[test]
    fn test_latest_spell_entry_wins() {
        let content = "\
Name             : Shield of the Righteous (id=53600)
Effects          :
Name             : Hammer of Wrath (id=24275)
Description      : Unrelated text.
#1 (id=1)        : Override Action Spell (332): Hammer of Light overrides Word of Glory
#2 (id=2)        : Override Action Spell (332): Hammer of Light overrides Light of Dawn
";
        let morphs = parse_spell_morphs(content);
        assert_eq!(morphs.len(), 2);
        assert!(morphs.iter().all(|m| m.override_spell_id == 24275));
        assert_eq!(morphs[0].base_spell, "Word of Glory");
        assert_eq!(morphs[1].base_spell, "Light of Dawn");
    }

    #[test]
    fn test_base_spell_followed_by_separator() {
        let content = "\
Name             : Pyroblast (id=11366)
#1 (id=1)        : Override Action Spell (332): Hot Streak Pyroblast overrides Pyroblast| Trigger Spell: 48108
";
        let morphs = parse_spell_morphs(content);
        assert_eq!(morphs.len(), 1);
        assert_eq!(morphs[0].base_spell, "Pyroblast");
        assert_eq!(morphs[0].trigger_buff, "hot_streak_pyroblast");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = AZURE_DUMP.replace('\n', "\r\n");
        let morphs = parse_spell_morphs(&content);
        assert_eq!(morphs.len(), 1);
        assert_eq!(morphs[0].base_spell, "Azure Strike");
        assert_eq!(morphs[0].base_spell_id, Some(332));
    }

    #[test]
    fn test_header_requires_id() {
        let content = "\
Name             : Azure Strike (id=212)
Name             : Talent Tree Node
#1 (id=1)        : Override Action Spell (332): Azure Sweep overrides Azure Strike
";
        let morphs = parse_spell_morphs(content);
        assert_eq!(morphs[0].override_spell_id, 212);
    }

    #[test]
    fn test_spell_id_beyond_u32() {
        let content = "\
Name             : Azure Strike (id=212)
Name             : Azure Sweep (id=4294967296)
#1 (id=1)        : Override Action Spell (332): Azure Sweep overrides Azure Strike
                   Misc Value: 5000000000
";
        let morphs = parse_spell_morphs(content);
        assert_eq!(morphs.len(), 1);
        assert_eq!(morphs[0].override_spell_id, 4_294_967_296);
        assert_eq!(morphs[0].base_spell_id, Some(5_000_000_000));
    }

    #[test]
    fn test_trigger_condition() {
        let morph = SpellMorph::new("Fire Breath Font", 1, "Fire Breath", None);
        assert_eq!(morph.trigger_buff, "fire_breath_font");
        assert_eq!(morph.trigger_condition(), "buff.fire_breath_font.up");
    }
}
