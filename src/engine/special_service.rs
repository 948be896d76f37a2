// ==========================================
// Roteiro PCP - special-service tags
// ==========================================
// Observation-field markers for out-of-band finishing services.
// Two spellings coexist while the exporter migrates:
//   hash-prefixed (#pin) and underscore-delimited (_pin_)
// Matching is case-insensitive substring search.
// ==========================================

use crate::domain::types::SectorCode;

/// Finishing service requested through an observation tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceTag {
    Paint,
    Upholstery,
    Electrical,
}

impl ServiceTag {
    /// Fixed append order: paint -> upholstery -> electrical
    pub const ALL: [ServiceTag; 3] = [
        ServiceTag::Paint,
        ServiceTag::Upholstery,
        ServiceTag::Electrical,
    ];

    pub fn sector(&self) -> SectorCode {
        match self {
            ServiceTag::Paint => SectorCode::Paint,
            ServiceTag::Upholstery => SectorCode::Upholstery,
            ServiceTag::Electrical => SectorCode::Electrical,
        }
    }

    /// Accepted spellings, lowercase
    pub fn spellings(&self) -> [&'static str; 2] {
        match self {
            ServiceTag::Paint => ["#pin", "_pin_"],
            ServiceTag::Upholstery => ["#tap", "_tap_"],
            ServiceTag::Electrical => ["#led", "_led_"],
        }
    }

    fn is_in(&self, lowered: &str) -> bool {
        self.spellings().iter().any(|tag| lowered.contains(tag))
    }
}

/// Tags present in an observation, in fixed order, each at most once
pub fn detect_service_tags(observation: &str) -> Vec<ServiceTag> {
    let lowered = observation.to_lowercase();
    ServiceTag::ALL
        .iter()
        .copied()
        .filter(|tag| tag.is_in(&lowered))
        .collect()
}

/// Removes every recognized tag; the whitespace around each removed
/// tag collapses to one space, the rest of the text is left as is
///
/// `"pintar _PIN_  urgente"` -> `"pintar urgente"`
pub fn strip_service_tags(observation: &str) -> String {
    let mut text = observation.to_string();
    for tag in ServiceTag::ALL {
        for spelling in tag.spellings() {
            text = remove_ascii_case_insensitive(&text, spelling);
        }
    }
    text
}

/// Tags are ASCII, so byte offsets found on the ASCII-lowered copy
/// line up with the original text
fn remove_ascii_case_insensitive(text: &str, needle: &str) -> String {
    let lowered = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(offset) = lowered[cursor..].find(needle) {
        let start = cursor + offset;
        out.push_str(&text[cursor..start]);
        out.truncate(out.trim_end().len());

        let rest = &text[start + needle.len()..];
        cursor = text.len() - rest.trim_start().len();
        if !out.is_empty() && cursor < text.len() {
            out.push(' ');
        }
    }
    out.push_str(&text[cursor..]);
    out
}
