//! Playable classes and dump locations.

/// SimC spell data dump location (one `<class>.txt` file per class)
pub const SIMC_BASE_URL: &str =
    "https://raw.githubusercontent.com/simulationcraft/simc/refs/heads/midnight/SpellDataDump";

/// All playable classes, in processing order
pub const CLASSES: &[&str] = &[
    "deathknight",
    "demonhunter",
    "druid",
    "evoker",
    "hunter",
    "mage",
    "monk",
    "paladin",
    "priest",
    "rogue",
    "shaman",
    "warlock",
    "warrior",
];

/// Check whether a class name is one of [`CLASSES`]
pub fn is_known_class(class: &str) -> bool {
    CLASSES.contains(&class)
}

/// Build the dump URL for a class
pub fn dump_url(base_url: &str, class: &str) -> String {
    format!("{}/{}.txt", base_url.trim_end_matches('/'), class)
}

/// Capitalize the first letter of every word ("death knight" -> "Death Knight")
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}
