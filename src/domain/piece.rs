// ==========================================
// Roteiro PCP - piece records and routing results
// ==========================================
// CanonicalRecord: one furniture piece, every canonical field present
// RouteResult:     ordered, duplicate-free sector sequence
// RecordBatch:     routed pieces in source row order
// ==========================================

use crate::domain::types::{
    BorderVariant, RulesetGeneration, SectorCode, SourceFormat, TextEncoding, VocabularyKind,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Separator used when a route is shown as text
pub const ROUTE_SEPARATOR: &str = " > ";

// ==========================================
// Canonical field
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    ProjectId,
    ProjectName,
    ClientName,
    ModuleDescription,
    PieceDescription,
    PieceId,
    Quantity,
    Width,
    Height,
    Thickness,
    Material,
    Location,
    BorderFront,
    BorderBack,
    BorderLeft,
    BorderRight,
    Drilling,
    Lamination,
    Observation,
}

impl CanonicalField {
    pub const COUNT: usize = 19;

    pub const ALL: [CanonicalField; Self::COUNT] = [
        CanonicalField::ProjectId,
        CanonicalField::ProjectName,
        CanonicalField::ClientName,
        CanonicalField::ModuleDescription,
        CanonicalField::PieceDescription,
        CanonicalField::PieceId,
        CanonicalField::Quantity,
        CanonicalField::Width,
        CanonicalField::Height,
        CanonicalField::Thickness,
        CanonicalField::Material,
        CanonicalField::Location,
        CanonicalField::BorderFront,
        CanonicalField::BorderBack,
        CanonicalField::BorderLeft,
        CanonicalField::BorderRight,
        CanonicalField::Drilling,
        CanonicalField::Lamination,
        CanonicalField::Observation,
    ];

    /// Fields that must resolve before any routing happens
    pub const REQUIRED: [CanonicalField; 4] = [
        CanonicalField::Location,
        CanonicalField::Drilling,
        CanonicalField::Lamination,
        CanonicalField::PieceDescription,
    ];

    pub const BORDERS: [CanonicalField; 4] = [
        CanonicalField::BorderFront,
        CanonicalField::BorderBack,
        CanonicalField::BorderLeft,
        CanonicalField::BorderRight,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Canonical header label (the standardized template name)
    pub fn canonical_label(&self) -> &'static str {
        self.label(VocabularyKind::Standardized)
    }

    /// Header label as a given exporter generation writes it
    pub fn label(&self, vocabulary: VocabularyKind) -> &'static str {
        let legacy = vocabulary == VocabularyKind::Legacy;
        match self {
            CanonicalField::ProjectId => "ID DO PROJETO",
            CanonicalField::ProjectName => "NOME DO PROJETO",
            CanonicalField::ClientName => "NOME DO CLIENTE",
            CanonicalField::ModuleDescription if legacy => "DESCRIÇÃO MÓDULO",
            CanonicalField::ModuleDescription => "DESCRICAO MODULO",
            CanonicalField::PieceDescription if legacy => "DESCRIÇÃO DA PEÇA",
            CanonicalField::PieceDescription => "DESCRICAO DA PECA",
            CanonicalField::PieceId if legacy => "ID DA PEÇA",
            CanonicalField::PieceId => "ID DA PECA",
            CanonicalField::Quantity => "QUANTIDADE",
            CanonicalField::Width if legacy => "LARGURA DA PEÇA",
            CanonicalField::Width => "LARGURA",
            CanonicalField::Height if legacy => "ALTURA DA PEÇA",
            CanonicalField::Height => "ALTURA",
            CanonicalField::Thickness => "ESPESSURA",
            CanonicalField::Material if legacy => "MATERIAL DA PEÇA",
            CanonicalField::Material => "MATERIAL",
            CanonicalField::Location => "LOCAL",
            CanonicalField::BorderFront if legacy => "BORDA_FACE_FRENTE",
            CanonicalField::BorderFront => "BORDA_FRENTE",
            CanonicalField::BorderBack if legacy => "BORDA_FACE_TRASEIRA",
            CanonicalField::BorderBack => "BORDA_TRASEIRA",
            CanonicalField::BorderLeft if legacy => "BORDA_FACE_LE",
            CanonicalField::BorderLeft => "BORDA_LE",
            CanonicalField::BorderRight if legacy => "BORDA_FACE_LD",
            CanonicalField::BorderRight => "BORDA_LD",
            CanonicalField::Drilling => "FURO",
            CanonicalField::Lamination => "DUPLAGEM",
            CanonicalField::Observation if legacy => "OBSERVAÇÃO",
            CanonicalField::Observation => "OBSERVACAO",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_label())
    }
}

// ==========================================
// CanonicalRecord
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    values: [String; CanonicalField::COUNT],
    /// Columns kept under their cleaned source name (keep-unmapped mode)
    pub extras: Vec<(String, String)>,
}

impl CanonicalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from (field, value) pairs; fields not listed stay empty
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (CanonicalField, &'a str)>,
    {
        let mut record = Self::new();
        for (field, value) in pairs {
            record.set(field, value);
        }
        record
    }

    pub fn get(&self, field: CanonicalField) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: CanonicalField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    pub fn extra(&self, name: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn piece_description(&self) -> &str {
        self.get(CanonicalField::PieceDescription)
    }

    pub fn location(&self) -> &str {
        self.get(CanonicalField::Location)
    }

    pub fn drilling(&self) -> &str {
        self.get(CanonicalField::Drilling)
    }

    pub fn lamination(&self) -> &str {
        self.get(CanonicalField::Lamination)
    }

    pub fn observation(&self) -> &str {
        self.get(CanonicalField::Observation)
    }

    pub fn has_border(&self) -> bool {
        CanonicalField::BORDERS
            .iter()
            .any(|field| !self.get(*field).trim().is_empty())
    }
}

// ==========================================
// RouteResult
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteResult(Vec<SectorCode>);

impl RouteResult {
    /// Route built by the engine; callers outside the crate only read routes
    pub(crate) fn from_sectors(sectors: Vec<SectorCode>) -> Self {
        Self(sectors)
    }

    pub fn sectors(&self) -> &[SectorCode] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<SectorCode> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<SectorCode> {
        self.0.last().copied()
    }

    pub fn contains(&self, sector: SectorCode) -> bool {
        self.0.contains(&sector)
    }

    pub fn position(&self, sector: SectorCode) -> Option<usize> {
        self.0.iter().position(|s| *s == sector)
    }

    /// "COR > BOR > EXP"
    pub fn display(&self) -> String {
        self.0
            .iter()
            .map(|s| s.code())
            .collect::<Vec<_>>()
            .join(ROUTE_SEPARATOR)
    }
}

impl fmt::Display for RouteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

// ==========================================
// RoutedPiece / RecordBatch
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedPiece {
    pub record: CanonicalRecord,
    pub route: RouteResult,
}

/// Route histogram entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCount {
    pub route: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryOrder {
    /// Most frequent first; ties keep first-seen order
    Frequency,
    FirstSeen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordBatch {
    pub pieces: Vec<RoutedPiece>,
    pub generation: RulesetGeneration,
    pub source_format: SourceFormat,
    pub vocabulary: VocabularyKind,
    pub border_variant: Option<BorderVariant>,
    /// None for spreadsheet inputs
    pub encoding: Option<TextEncoding>,
}

impl RecordBatch {
    /// Piece count reported to the history store
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoutedPiece> {
        self.pieces.iter()
    }

    pub fn route_summary(&self, order: SummaryOrder) -> Vec<RouteCount> {
        let mut summary: Vec<RouteCount> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for piece in &self.pieces {
            let display = piece.route.display();
            match slots.get(&display) {
                Some(&slot) => summary[slot].count += 1,
                None => {
                    slots.insert(display.clone(), summary.len());
                    summary.push(RouteCount {
                        route: display,
                        count: 1,
                    });
                }
            }
        }

        if order == SummaryOrder::Frequency {
            // sort_by is stable: ties stay in first-seen order
            summary.sort_by(|a, b| b.count.cmp(&a.count));
        }
        summary
    }
}
