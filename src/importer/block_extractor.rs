// ==========================================
// Roteiro PCP - block extractor
// ==========================================
// Stage 0 for CSV uploads: bytes -> clean delimited lines
// 1. decode with the first encoding that accepts the bytes
// 2. drop blank lines, strip the stray trailing ';'
// 3. split [CABECALHO] / [LISTA] sections (or fall back to the
//    whole body for marker-less legacy exports)
// ==========================================

use crate::domain::types::TextEncoding;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::header_vocabulary::fold_header;
use crate::importer::importer_trait::TextExtractor;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Field separator of the Dinabox export
pub const FIELD_DELIMITER: char = ';';

/// Footer line the exporter appends
pub const FOOTER_SENTINEL: &str = "RODAPÉ";

const HEADER_START: &str = "[CABECALHO]";
const HEADER_END: &str = "[/CABECALHO]";
const LIST_START: &str = "[LISTA]";
const LIST_END: &str = "[/LISTA]";

/// Bytes Windows-1252 leaves unassigned
const CP1252_UNASSIGNED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionState {
    None,
    Header,
    List,
}

/// How the document body was delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockLayout {
    /// [CABECALHO]/[LISTA] markers present
    Sectioned,
    /// No header markers: whole body is the table
    Legacy,
}

/// Extractor output: header line(s) first, data lines after
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub lines: Vec<String>,
    pub encoding: TextEncoding,
    pub layout: BlockLayout,
}

// ==========================================
// BlockExtractor
// ==========================================
#[derive(Debug, Clone)]
pub struct BlockExtractor {
    encodings: Vec<TextEncoding>,
}

impl Default for BlockExtractor {
    fn default() -> Self {
        Self {
            encodings: TextEncoding::PREFERENCE.to_vec(),
        }
    }
}

impl BlockExtractor {
    /// Extractor trying `encodings` in the given order
    pub fn new(encodings: Vec<TextEncoding>) -> Self {
        Self { encodings }
    }

    pub fn encodings(&self) -> &[TextEncoding] {
        &self.encodings
    }

    /// Decodes with the first encoding that accepts the bytes
    pub fn decode(&self, raw: &[u8]) -> ImportResult<(String, TextEncoding)> {
        for encoding in &self.encodings {
            if let Some(text) = decode_as(*encoding, raw) {
                debug!(encoding = %encoding, bytes = raw.len(), "documento decodificado");
                return Ok((text, *encoding));
            }
            debug!(encoding = %encoding, "codificação rejeitada");
        }

        Err(ImportError::Decode {
            tried: self.encodings.clone(),
        })
    }

    /// Splits decoded text into table lines
    pub fn split_sections(text: &str) -> (Vec<String>, BlockLayout) {
        let mut state = SectionState::None;
        let mut saw_header_marker = false;
        let mut header_lines = Vec::new();
        let mut list_lines = Vec::new();
        let mut body_lines = Vec::new();

        for line in text.split(['\n', '\r']) {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match trimmed {
                HEADER_START => {
                    state = SectionState::Header;
                    saw_header_marker = true;
                    continue;
                }
                HEADER_END => {
                    state = SectionState::None;
                    saw_header_marker = true;
                    continue;
                }
                LIST_START => {
                    state = SectionState::List;
                    continue;
                }
                LIST_END => {
                    state = SectionState::None;
                    continue;
                }
                _ => {}
            }

            // Unknown marker ([RODAPE], [TOTAIS], ...) closes the open section
            if trimmed.starts_with('[') {
                state = SectionState::None;
                continue;
            }

            let data = strip_trailing_delimiter(line);
            match state {
                SectionState::Header => header_lines.push(data.to_string()),
                SectionState::List => list_lines.push(data.to_string()),
                SectionState::None => {}
            }

            if !is_footer_sentinel(trimmed) {
                body_lines.push(data.to_string());
            }
        }

        if saw_header_marker {
            header_lines.extend(list_lines);
            (header_lines, BlockLayout::Sectioned)
        } else {
            (body_lines, BlockLayout::Legacy)
        }
    }
}

impl TextExtractor for BlockExtractor {
    fn extract(&self, raw: &[u8]) -> ImportResult<ExtractedText> {
        let (text, encoding) = self.decode(raw)?;
        let (lines, layout) = Self::split_sections(&text);

        info!(
            encoding = %encoding,
            layout = ?layout,
            lines = lines.len(),
            "blocos extraídos"
        );

        Ok(ExtractedText {
            lines,
            encoding,
            layout,
        })
    }
}

/// Contract entry point with the default encoding preference
pub fn extract(raw: &[u8]) -> ImportResult<Vec<String>> {
    BlockExtractor::default()
        .extract(raw)
        .map(|extracted| extracted.lines)
}

fn decode_as(encoding: TextEncoding, raw: &[u8]) -> Option<String> {
    match encoding {
        TextEncoding::Utf8Sig => raw
            .strip_prefix(&UTF8_BOM[..])
            .and_then(|body| std::str::from_utf8(body).ok())
            .map(str::to_string),
        TextEncoding::Utf8 => std::str::from_utf8(raw).ok().map(str::to_string),
        TextEncoding::Windows1252 => {
            if raw.iter().any(|b| CP1252_UNASSIGNED.contains(b)) {
                return None;
            }
            encoding_rs::WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(raw)
                .map(|text| text.into_owned())
        }
        TextEncoding::Latin1 => Some(raw.iter().map(|&b| char::from(b)).collect()),
    }
}

fn strip_trailing_delimiter(line: &str) -> &str {
    let line = line.trim_end();
    line.strip_suffix(FIELD_DELIMITER).unwrap_or(line)
}

fn is_footer_sentinel(trimmed: &str) -> bool {
    fold_header(trimmed) == fold_header(FOOTER_SENTINEL)
}
