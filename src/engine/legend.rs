// ==========================================
// Roteiro PCP - sector legend
// ==========================================
// Code, name and routing criterion of every sector a
// generation can emit, in route order. Rendered next to
// the report so the shop floor can read the codes.
// ==========================================

use crate::domain::types::{RulesetGeneration, SectorCode};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub sector: SectorCode,
    pub criterion: &'static str,
}

impl LegendEntry {
    pub fn name(&self) -> &'static str {
        self.sector.display_name()
    }
}

const fn legend(sector: SectorCode, criterion: &'static str) -> LegendEntry {
    LegendEntry { sector, criterion }
}

static BASIC_LEGEND: [LegendEntry; 10] = [
    legend(SectorCode::Cutting, "Toda peça"),
    legend(SectorCode::EdgeBanding, "Tem borda, sem 'Perfil db'"),
    legend(
        SectorCode::ManualEdgeBanding,
        "Tem borda + 'Perfil db' na descrição",
    ),
    legend(SectorCode::Lamination, "Coluna DUPLAGEM contém 'duplagem'"),
    legend(SectorCode::Machining, "Coluna FURO preenchida"),
    legend(SectorCode::Drilling, "Coluna FURO preenchida"),
    legend(SectorCode::Boxes, "LOCAL = Caixa ou Gaveta"),
    legend(
        SectorCode::Carpentry,
        "LOCAL = Porta (sem Perfil db) ou Tamponamento",
    ),
    legend(SectorCode::SpecialCarpentry, "LOCAL = Porta com 'Perfil db'"),
    legend(SectorCode::Shipping, "Toda peça"),
];

static EXTENDED_LEGEND: [LegendEntry; 13] = [
    legend(SectorCode::Cutting, "Toda peça"),
    legend(SectorCode::EdgeBanding, "Alguma coluna de borda preenchida"),
    legend(SectorCode::Machining, "Coluna FURO preenchida"),
    legend(SectorCode::Drilling, "Coluna FURO preenchida"),
    legend(SectorCode::Lamination, "Coluna DUPLAGEM preenchida"),
    legend(SectorCode::BoxAssembly, "Gaveta/gaveteiro na descrição ou LOCAL com Caixa"),
    legend(
        SectorCode::DoorAssembly,
        "Puxador, tampa, porta ou frontal na descrição/LOCAL",
    ),
    legend(
        SectorCode::Carpentry,
        "Após MPE, ou LOCAL com Tamponamento (exceto gavetas)",
    ),
    legend(SectorCode::Paint, "Tag #pin ou _pin_ na observação"),
    legend(SectorCode::Upholstery, "Tag #tap ou _tap_ na observação"),
    legend(SectorCode::Electrical, "Tag #led ou _led_ na observação"),
    legend(SectorCode::QualityControl, "Toda peça"),
    legend(SectorCode::Shipping, "Toda peça"),
];

/// Legend rows for a ruleset generation
pub fn legend_for(generation: RulesetGeneration) -> &'static [LegendEntry] {
    match generation {
        RulesetGeneration::Basic => &BASIC_LEGEND,
        RulesetGeneration::Extended => &EXTENDED_LEGEND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_starts_with_cutting_ends_with_shipping() {
        for generation in [RulesetGeneration::Basic, RulesetGeneration::Extended] {
            let entries = legend_for(generation);
            assert_eq!(entries.first().map(|e| e.sector), Some(SectorCode::Cutting));
            assert_eq!(entries.last().map(|e| e.sector), Some(SectorCode::Shipping));
        }
    }

    #[test]
    fn test_box_sector_differs_per_generation() {
        let has = |generation, sector| legend_for(generation).iter().any(|e| e.sector == sector);
        assert!(has(RulesetGeneration::Basic, SectorCode::Boxes));
        assert!(!has(RulesetGeneration::Basic, SectorCode::BoxAssembly));
        assert!(has(RulesetGeneration::Extended, SectorCode::BoxAssembly));
        assert!(!has(RulesetGeneration::Extended, SectorCode::Boxes));
    }
}
