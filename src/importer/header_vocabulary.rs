// ==========================================
// Roteiro PCP - header vocabularies
// ==========================================
// Every exporter generation names the same columns differently.
// Each vocabulary is an immutable table from the accent-folded,
// uppercased header to a canonical field; the tables are tried
// in priority order. New exporter versions add a table here and
// nothing else changes.
// ==========================================

use crate::domain::piece::CanonicalField;
use crate::domain::types::{BorderVariant, VocabularyKind};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// One (folded header -> canonical field) mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub header: &'static str,
    pub field: CanonicalField,
}

#[derive(Debug)]
pub struct HeaderVocabulary {
    pub kind: VocabularyKind,
    entries: &'static [VocabularyEntry],
}

impl HeaderVocabulary {
    pub fn entries(&self) -> &'static [VocabularyEntry] {
        self.entries
    }

    /// Looks up an already folded header
    pub fn lookup(&self, folded: &str) -> Option<CanonicalField> {
        self.entries
            .iter()
            .find(|entry| entry.header == folded)
            .map(|entry| entry.field)
    }
}

const fn entry(header: &'static str, field: CanonicalField) -> VocabularyEntry {
    VocabularyEntry { header, field }
}

// ==========================================
// Standardized PCP template
// ==========================================
pub static STANDARDIZED: HeaderVocabulary = HeaderVocabulary {
    kind: VocabularyKind::Standardized,
    entries: &[
        entry("ID DO PROJETO", CanonicalField::ProjectId),
        entry("NOME DO PROJETO", CanonicalField::ProjectName),
        entry("NOME DO CLIENTE", CanonicalField::ClientName),
        entry("DESCRICAO MODULO", CanonicalField::ModuleDescription),
        entry("DESCRICAO DA PECA", CanonicalField::PieceDescription),
        entry("ID DA PECA", CanonicalField::PieceId),
        entry("QUANTIDADE", CanonicalField::Quantity),
        entry("LARGURA", CanonicalField::Width),
        entry("ALTURA", CanonicalField::Height),
        entry("ESPESSURA", CanonicalField::Thickness),
        entry("MATERIAL", CanonicalField::Material),
        entry("LOCAL", CanonicalField::Location),
        entry("BORDA_FRENTE", CanonicalField::BorderFront),
        entry("BORDA_TRASEIRA", CanonicalField::BorderBack),
        entry("BORDA_LE", CanonicalField::BorderLeft),
        entry("BORDA_LD", CanonicalField::BorderRight),
        entry("FURO", CanonicalField::Drilling),
        entry("DUPLAGEM", CanonicalField::Lamination),
        entry("OBSERVACAO", CanonicalField::Observation),
    ],
};

// ==========================================
// Legacy exports (accented names, folded here)
// ==========================================
pub static LEGACY: HeaderVocabulary = HeaderVocabulary {
    kind: VocabularyKind::Legacy,
    entries: &[
        entry("ID DO PROJETO", CanonicalField::ProjectId),
        entry("NOME DO PROJETO", CanonicalField::ProjectName),
        entry("NOME DO CLIENTE", CanonicalField::ClientName),
        entry("DESCRICAO MODULO", CanonicalField::ModuleDescription),
        entry("DESCRICAO DA PECA", CanonicalField::PieceDescription),
        entry("ID DA PECA", CanonicalField::PieceId),
        entry("QUANTIDADE", CanonicalField::Quantity),
        entry("LARGURA DA PECA", CanonicalField::Width),
        entry("ALTURA DA PECA", CanonicalField::Height),
        entry("ESPESSURA", CanonicalField::Thickness),
        entry("MATERIAL DA PECA", CanonicalField::Material),
        entry("LOCAL", CanonicalField::Location),
        entry("BORDA_FACE_FRENTE", CanonicalField::BorderFront),
        entry("BORDA_FACE_TRASEIRA", CanonicalField::BorderBack),
        entry("BORDA_FACE_LE", CanonicalField::BorderLeft),
        entry("BORDA_FACE_LD", CanonicalField::BorderRight),
        entry("FURO", CanonicalField::Drilling),
        entry("DUPLAGEM", CanonicalField::Lamination),
        entry("OBSERVACAO", CanonicalField::Observation),
    ],
};

// ==========================================
// Aliases seen in later exporter versions
// ==========================================
pub static CURRENT: HeaderVocabulary = HeaderVocabulary {
    kind: VocabularyKind::Current,
    entries: &[
        entry("CLIENTE", CanonicalField::ClientName),
        entry("DESCRICAO DO MODULO", CanonicalField::ModuleDescription),
        entry("OBSERVACOES", CanonicalField::Observation),
        entry("OBS", CanonicalField::Observation),
    ],
};

/// Vocabularies in lookup priority order
pub static VOCABULARIES: [&HeaderVocabulary; 3] = [&STANDARDIZED, &LEGACY, &CURRENT];

const STANDARD_BORDER_HEADERS: [&str; 4] =
    ["BORDA_FRENTE", "BORDA_TRASEIRA", "BORDA_LE", "BORDA_LD"];
const FACE_BORDER_HEADERS: [&str; 4] = [
    "BORDA_FACE_FRENTE",
    "BORDA_FACE_TRASEIRA",
    "BORDA_FACE_LE",
    "BORDA_FACE_LD",
];

/// Uppercases, strips diacritics and collapses inner whitespace
///
/// `" Descrição  da Peça "` -> `"DESCRICAO DA PECA"`
pub fn fold_header(raw: &str) -> String {
    let stripped: String = raw
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    stripped
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Border variant a folded header belongs to, if it is a border column
pub fn border_variant_of(folded: &str) -> Option<BorderVariant> {
    if STANDARD_BORDER_HEADERS.contains(&folded) {
        Some(BorderVariant::Standard)
    } else if FACE_BORDER_HEADERS.contains(&folded) {
        Some(BorderVariant::Face)
    } else {
        None
    }
}

/// Per-document border variant; the standardized names win when both exist
pub fn detect_border_variant<'a, I>(folded_headers: I) -> Option<BorderVariant>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut face_seen = false;
    for header in folded_headers {
        match border_variant_of(header) {
            Some(BorderVariant::Standard) => return Some(BorderVariant::Standard),
            Some(BorderVariant::Face) => face_seen = true,
            None => {}
        }
    }
    face_seen.then_some(BorderVariant::Face)
}

/// Resolves a folded header through the ordered vocabulary list
pub fn resolve_header(
    vocabularies: &[&HeaderVocabulary],
    folded: &str,
) -> Option<(CanonicalField, VocabularyKind)> {
    vocabularies
        .iter()
        .find_map(|vocabulary| vocabulary.lookup(folded).map(|field| (field, vocabulary.kind)))
}
