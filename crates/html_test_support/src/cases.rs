//! TOML case tables for keyboard navigation tests.
//!
//! ```toml
//! format = "caretaker-nav-cases-v1"
//!
//! [[case]]
//! id = "right-over-br"
//! markup = "<p>foo|<br>bar</p>"
//! keys = ["right"]
//! expected = "<p>foo<br>|bar</p>"
//! ```

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const CASES_FORMAT_V1: &str = "caretaker-nav-cases-v1";

#[derive(Clone, Debug, Deserialize)]
struct CaseFile {
    format: String,
    #[serde(rename = "case", default)]
    cases: Vec<Case>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Case {
    pub id: String,
    /// Marked markup placed inside an editing host.
    pub markup: String,
    /// Key chords applied in order, e.g. `"shift+left"`.
    pub keys: Vec<String>,
    /// Marked markup after the keys were applied.
    pub expected: String,
    /// Layout width; the flow default when absent.
    #[serde(default)]
    pub width: Option<f32>,
    /// Which end of the initial selection is the focus.
    #[serde(default)]
    pub focus: Option<CaseFocus>,
}

impl Case {
    pub fn chords(&self) -> Vec<Chord> {
        self.keys
            .iter()
            .map(|k| {
                Chord::parse(k)
                    .unwrap_or_else(|| panic!("case '{}': unsupported key chord '{k}'", self.id))
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CaseFocus {
    Start,
    End,
}

/// A key name plus modifier flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chord {
    pub key: String,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Chord {
    /// Parse `"ctrl+shift+right"`. Modifiers come first, the key last.
    pub fn parse(raw: &str) -> Option<Chord> {
        let mut chord = Chord::default();
        let mut parts = raw.split('+').map(str::trim).peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                if part.is_empty() {
                    return None;
                }
                chord.key = part.to_ascii_lowercase();
                return Some(chord);
            }
            match part.to_ascii_lowercase().as_str() {
                "shift" => chord.shift = true,
                "ctrl" | "control" => chord.ctrl = true,
                "alt" => chord.alt = true,
                "meta" | "cmd" => chord.meta = true,
                _ => return None,
            }
        }
        None
    }
}

pub fn load_cases(path: &Path) -> Vec<Case> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read case table {path:?}: {err}"));
    parse_cases(&content, &path.display().to_string())
}

/// Parse and validate a case table. `origin` only labels panics.
pub fn parse_cases(content: &str, origin: &str) -> Vec<Case> {
    let file: CaseFile = toml::from_str(content)
        .unwrap_or_else(|err| panic!("failed to parse case table {origin}: {err}"));
    assert_eq!(
        file.format, CASES_FORMAT_V1,
        "unsupported case table format in {origin}"
    );
    let mut seen = BTreeSet::new();
    for case in &file.cases {
        assert!(
            seen.insert(case.id.as_str()),
            "duplicate case id in {origin}: {}",
            case.id
        );
        assert!(!case.keys.is_empty(), "case '{}' in {origin} has no keys", case.id);
    }
    file.cases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chords_parse_modifiers_before_the_key() {
        let chord = Chord::parse("Ctrl+Shift+Right").unwrap();
        assert!(chord.ctrl && chord.shift && !chord.alt && !chord.meta);
        assert_eq!(chord.key, "right");
        assert_eq!(Chord::parse("up").unwrap().key, "up");
        assert_eq!(Chord::parse("hyper+up"), None);
        assert_eq!(Chord::parse("shift+"), None);
    }

    #[test]
    fn tables_parse_with_optional_fields() {
        let cases = parse_cases(
            r#"
format = "caretaker-nav-cases-v1"

[[case]]
id = "a"
markup = "<p>f|oo</p>"
keys = ["right"]
expected = "<p>fo|o</p>"

[[case]]
id = "b"
markup = "<p>[foo]</p>"
keys = ["shift+left"]
expected = "<p>[fo]o</p>"
width = 40.0
focus = "end"
"#,
            "inline",
        );
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].width, None);
        assert_eq!(cases[1].focus, Some(CaseFocus::End));
        assert!(cases[1].chords()[0].shift);
    }

    #[test]
    #[should_panic(expected = "duplicate case id")]
    fn duplicate_ids_are_rejected() {
        parse_cases(
            r#"
format = "caretaker-nav-cases-v1"
[[case]]
id = "a"
markup = ""
keys = ["up"]
expected = ""
[[case]]
id = "a"
markup = ""
keys = ["up"]
expected = ""
"#,
            "inline",
        );
    }
}
