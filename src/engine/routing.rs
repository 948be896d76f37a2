// ==========================================
// Roteiro PCP - routing rule engine
// ==========================================
// Canonical record -> ordered sector sequence.
// Pure and total: every field is already present (possibly empty),
// so every rule is an emptiness or substring test and an unknown
// value falls through to "no sector".
//
// Generation A: COR > BOR|XBOR > DUP > USI > FUR > CAX|MAR|XMAR > EXP
// Generation B: COR > BOR > USI > FUR > DUP > MCX|MPE,MAR|MAR
//               > PIN > TAP > MEL > CQL > EXP
// ==========================================

use crate::domain::piece::{CanonicalRecord, RouteResult};
use crate::domain::types::{RulesetGeneration, SectorCode};
use crate::engine::special_service::detect_service_tags;

/// Description marker for the special ("perfil db") profile
pub const SPECIAL_PROFILE_MARKER: &str = "perfil db";

/// Lamination marker checked by generation A
pub const LAMINATION_MARKER: &str = "duplagem";

/// Ordered, duplicate-free route under construction
#[derive(Debug, Default)]
struct RouteBuilder {
    sectors: Vec<SectorCode>,
}

impl RouteBuilder {
    fn starting_at(sector: SectorCode) -> Self {
        Self {
            sectors: vec![sector],
        }
    }

    fn push(&mut self, sector: SectorCode) {
        if !self.sectors.contains(&sector) {
            self.sectors.push(sector);
        }
    }

    fn push_if(&mut self, condition: bool, sector: SectorCode) {
        if condition {
            self.push(sector);
        }
    }

    fn finish(self) -> RouteResult {
        RouteResult::from_sectors(self.sectors)
    }
}

/// Lower-cased, trimmed views of the fields the rules read
struct PieceTraits {
    description: String,
    location: String,
    has_border: bool,
    has_drilling: bool,
    lamination: String,
}

impl PieceTraits {
    fn of(record: &CanonicalRecord) -> Self {
        Self {
            description: record.piece_description().trim().to_lowercase(),
            location: record.location().trim().to_lowercase(),
            has_border: record.has_border(),
            has_drilling: !record.drilling().trim().is_empty(),
            lamination: record.lamination().trim().to_lowercase(),
        }
    }

    fn is_special_profile(&self) -> bool {
        self.description.contains(SPECIAL_PROFILE_MARKER)
    }

    fn is_drawer(&self) -> bool {
        self.description.contains("gaveta") || self.description.contains("gaveteiro")
    }

    fn is_box(&self) -> bool {
        self.location.contains("caixa")
    }

    fn has_handle_or_cover(&self) -> bool {
        self.description.contains("puxador") || self.description.contains("tampa")
    }

    fn is_door(&self) -> bool {
        self.location.contains("porta") || self.description.contains("porta")
    }

    fn is_frontal(&self) -> bool {
        self.location.contains("frontal") || self.description.contains("frontal")
    }

    fn is_infill(&self) -> bool {
        self.location.contains("tamponamento")
    }
}

// ==========================================
// RoutingEngine
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutingEngine {
    generation: RulesetGeneration,
}

impl RoutingEngine {
    pub fn new(generation: RulesetGeneration) -> Self {
        Self { generation }
    }

    pub fn generation(&self) -> RulesetGeneration {
        self.generation
    }

    /// Routes one piece; never fails
    pub fn route(&self, record: &CanonicalRecord) -> RouteResult {
        match self.generation {
            RulesetGeneration::Basic => route_basic(record),
            RulesetGeneration::Extended => route_extended(record),
        }
    }
}

/// Contract entry point
pub fn route(record: &CanonicalRecord, generation: RulesetGeneration) -> RouteResult {
    RoutingEngine::new(generation).route(record)
}

fn route_basic(record: &CanonicalRecord) -> RouteResult {
    let piece = PieceTraits::of(record);
    let mut route = RouteBuilder::starting_at(SectorCode::Cutting);

    if piece.has_border {
        route.push(if piece.is_special_profile() {
            SectorCode::ManualEdgeBanding
        } else {
            SectorCode::EdgeBanding
        });
    }

    route.push_if(
        piece.lamination.contains(LAMINATION_MARKER),
        SectorCode::Lamination,
    );

    if piece.has_drilling {
        route.push(SectorCode::Machining);
        route.push(SectorCode::Drilling);
    }

    // Exact location values, as the exporter writes them
    match record.location().trim() {
        "Caixa" | "Gaveta" => route.push(SectorCode::Boxes),
        "Porta" if piece.is_special_profile() => route.push(SectorCode::SpecialCarpentry),
        "Porta" | "Tamponamento" => route.push(SectorCode::Carpentry),
        _ => {}
    }

    route.push(SectorCode::Shipping);
    route.finish()
}

fn route_extended(record: &CanonicalRecord) -> RouteResult {
    let piece = PieceTraits::of(record);
    let mut route = RouteBuilder::starting_at(SectorCode::Cutting);

    route.push_if(piece.has_border, SectorCode::EdgeBanding);

    if piece.has_drilling {
        route.push(SectorCode::Machining);
        route.push(SectorCode::Drilling);
    }

    route.push_if(!piece.lamination.is_empty(), SectorCode::Lamination);

    // First match wins
    if piece.is_drawer() || piece.is_box() {
        route.push(SectorCode::BoxAssembly);
    } else if piece.has_handle_or_cover() || piece.is_door() || piece.is_frontal() {
        route.push(SectorCode::DoorAssembly);
        route.push(SectorCode::Carpentry);
    } else if piece.is_infill() && !piece.is_drawer() {
        route.push(SectorCode::Carpentry);
    }

    for tag in detect_service_tags(record.observation()) {
        route.push(tag.sector());
    }

    route.push(SectorCode::QualityControl);
    route.push(SectorCode::Shipping);
    route.finish()
}
