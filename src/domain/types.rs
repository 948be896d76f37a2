// ==========================================
// Roteiro PCP - domain type definitions
// ==========================================
// Closed enumerations shared by the importer, the routing
// engine and the outer layers.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// Sector code
// ==========================================
// One manufacturing station. Serialized with the shop-floor code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectorCode {
    #[serde(rename = "COR")]
    Cutting,
    #[serde(rename = "BOR")]
    EdgeBanding,
    #[serde(rename = "XBOR")]
    ManualEdgeBanding,
    #[serde(rename = "DUP")]
    Lamination,
    #[serde(rename = "USI")]
    Machining,
    #[serde(rename = "FUR")]
    Drilling,
    #[serde(rename = "CAX")]
    Boxes,
    #[serde(rename = "MCX")]
    BoxAssembly,
    #[serde(rename = "MPE")]
    DoorAssembly,
    #[serde(rename = "MAR")]
    Carpentry,
    #[serde(rename = "XMAR")]
    SpecialCarpentry,
    #[serde(rename = "PIN")]
    Paint,
    #[serde(rename = "TAP")]
    Upholstery,
    #[serde(rename = "MEL")]
    Electrical,
    #[serde(rename = "CQL")]
    QualityControl,
    #[serde(rename = "EXP")]
    Shipping,
}

impl SectorCode {
    pub const ALL: [SectorCode; 16] = [
        SectorCode::Cutting,
        SectorCode::EdgeBanding,
        SectorCode::ManualEdgeBanding,
        SectorCode::Lamination,
        SectorCode::Machining,
        SectorCode::Drilling,
        SectorCode::Boxes,
        SectorCode::BoxAssembly,
        SectorCode::DoorAssembly,
        SectorCode::Carpentry,
        SectorCode::SpecialCarpentry,
        SectorCode::Paint,
        SectorCode::Upholstery,
        SectorCode::Electrical,
        SectorCode::QualityControl,
        SectorCode::Shipping,
    ];

    /// Shop-floor code printed on the report
    pub fn code(&self) -> &'static str {
        match self {
            SectorCode::Cutting => "COR",
            SectorCode::EdgeBanding => "BOR",
            SectorCode::ManualEdgeBanding => "XBOR",
            SectorCode::Lamination => "DUP",
            SectorCode::Machining => "USI",
            SectorCode::Drilling => "FUR",
            SectorCode::Boxes => "CAX",
            SectorCode::BoxAssembly => "MCX",
            SectorCode::DoorAssembly => "MPE",
            SectorCode::Carpentry => "MAR",
            SectorCode::SpecialCarpentry => "XMAR",
            SectorCode::Paint => "PIN",
            SectorCode::Upholstery => "TAP",
            SectorCode::Electrical => "MEL",
            SectorCode::QualityControl => "CQL",
            SectorCode::Shipping => "EXP",
        }
    }

    /// Sector name as the shop floor knows it
    pub fn display_name(&self) -> &'static str {
        match self {
            SectorCode::Cutting => "Corte",
            SectorCode::EdgeBanding => "Bordo automático",
            SectorCode::ManualEdgeBanding => "Bordo manual",
            SectorCode::Lamination => "Duplagem",
            SectorCode::Machining => "Usinagem",
            SectorCode::Drilling => "Furação",
            SectorCode::Boxes => "Caixas",
            SectorCode::BoxAssembly => "Montagem de caixas",
            SectorCode::DoorAssembly => "Montagem de portas e frentes",
            SectorCode::Carpentry => "Marcenaria",
            SectorCode::SpecialCarpentry => "Marcenaria especial",
            SectorCode::Paint => "Pintura",
            SectorCode::Upholstery => "Tapeçaria",
            SectorCode::Electrical => "Montagem elétrica",
            SectorCode::QualityControl => "Controle de qualidade",
            SectorCode::Shipping => "Expedição",
        }
    }
}

impl fmt::Display for SectorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SectorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        SectorCode::ALL
            .iter()
            .copied()
            .find(|sector| sector.code() == code)
            .ok_or_else(|| format!("setor desconhecido: {}", s))
    }
}

// ==========================================
// Ruleset generation
// ==========================================
// A = basic engine, B = extended engine with special services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RulesetGeneration {
    #[default]
    Basic,
    Extended,
}

impl fmt::Display for RulesetGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesetGeneration::Basic => write!(f, "A"),
            RulesetGeneration::Extended => write!(f, "B"),
        }
    }
}

impl FromStr for RulesetGeneration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" | "BASIC" => Ok(RulesetGeneration::Basic),
            "B" | "EXTENDED" => Ok(RulesetGeneration::Extended),
            other => Err(format!("geração de regras desconhecida: {}", other)),
        }
    }
}

// ==========================================
// Unmapped column policy
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnmappedColumnPolicy {
    /// Strict mode: unmapped columns survive under their cleaned name
    #[default]
    Keep,
    /// Table-driven mode: unmapped columns are discarded
    Drop,
}

impl FromStr for UnmappedColumnPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" | "strict" => Ok(UnmappedColumnPolicy::Keep),
            "drop" | "table" => Ok(UnmappedColumnPolicy::Drop),
            other => Err(format!("política de colunas desconhecida: {}", other)),
        }
    }
}

// ==========================================
// Source file format
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SourceFormat {
    /// Resolves the format from an extension or a full file name
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = name.rsplit('.').next().unwrap_or("").trim().to_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "xlsx" => Some(SourceFormat::Xlsx),
            "xls" => Some(SourceFormat::Xls),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Csv => write!(f, "csv"),
            SourceFormat::Xlsx => write!(f, "xlsx"),
            SourceFormat::Xls => write!(f, "xls"),
        }
    }
}

// ==========================================
// Text encoding
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8-sig")]
    Utf8Sig,
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "cp1252")]
    Windows1252,
    #[serde(rename = "latin-1")]
    Latin1,
}

impl TextEncoding {
    /// Default preference order
    pub const PREFERENCE: [TextEncoding; 4] = [
        TextEncoding::Utf8Sig,
        TextEncoding::Utf8,
        TextEncoding::Windows1252,
        TextEncoding::Latin1,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Windows1252 => "cp1252",
            TextEncoding::Latin1 => "latin-1",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "utf-8-sig" | "utf8-sig" => Ok(TextEncoding::Utf8Sig),
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "cp1252" | "windows-1252" => Ok(TextEncoding::Windows1252),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            other => Err(format!("codificação desconhecida: {}", other)),
        }
    }
}

// ==========================================
// Border column variant
// ==========================================
// Detected once per document, never per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BorderVariant {
    /// BORDA_FRENTE / BORDA_TRASEIRA / BORDA_LE / BORDA_LD
    Standard,
    /// BORDA_FACE_FRENTE / BORDA_FACE_TRASEIRA / BORDA_FACE_LE / BORDA_FACE_LD
    Face,
}

// ==========================================
// Header vocabulary kind
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VocabularyKind {
    /// Older exports with accented names (DESCRIÇÃO DA PEÇA, LARGURA DA PEÇA)
    Legacy,
    /// Standardized PCP template (DESCRICAO DA PECA, LARGURA)
    Standardized,
    /// Aliases introduced by later exporter versions
    Current,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_code_roundtrip_through_str() {
        for sector in SectorCode::ALL {
            assert_eq!(sector.code().parse::<SectorCode>(), Ok(sector));
        }
        assert!("XYZ".parse::<SectorCode>().is_err());
    }

    #[test]
    fn test_source_format_from_file_name() {
        assert_eq!(SourceFormat::from_file_name("pedido.CSV"), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_file_name("a.b.xlsx"), Some(SourceFormat::Xlsx));
        assert_eq!(SourceFormat::from_file_name("xls"), Some(SourceFormat::Xls));
        assert_eq!(SourceFormat::from_file_name("pedido.pdf"), None);
    }

    #[test]
    fn test_ruleset_generation_parse() {
        assert_eq!("a".parse::<RulesetGeneration>(), Ok(RulesetGeneration::Basic));
        assert_eq!(" B ".parse::<RulesetGeneration>(), Ok(RulesetGeneration::Extended));
        assert!("C".parse::<RulesetGeneration>().is_err());
    }

    #[test]
    fn test_text_encoding_parse() {
        assert_eq!("windows-1252".parse::<TextEncoding>(), Ok(TextEncoding::Windows1252));
        assert_eq!("UTF_8".parse::<TextEncoding>(), Ok(TextEncoding::Utf8));
    }
}
