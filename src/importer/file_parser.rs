// ==========================================
// Roteiro PCP - tabular parsers
// ==========================================
// DelimitedTextParser: extracted ';' lines -> header + rows
// SpreadsheetParser:   XLSX / XLS bytes   -> header + rows
// Both produce a TabularSheet; the normalizer takes it from there.
// ==========================================

use crate::domain::types::SourceFormat;
use crate::importer::block_extractor::FIELD_DELIMITER;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::SheetParser;
use calamine::{Reader, Xls, Xlsx};
use csv::{ReaderBuilder, Trim};
use std::io::Cursor;
use tracing::debug;

/// Header row plus data rows, every cell as text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularSheet {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Test/fixture helper: builds a sheet from string slices
    pub fn from_str_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }
}

// ==========================================
// DelimitedTextParser
// ==========================================
#[derive(Debug, Clone)]
pub struct DelimitedTextParser {
    delimiter: u8,
}

impl Default for DelimitedTextParser {
    fn default() -> Self {
        Self {
            delimiter: FIELD_DELIMITER as u8,
        }
    }
}

impl DelimitedTextParser {
    /// First line is the header row; an empty input yields an empty sheet
    pub fn parse_lines(&self, lines: &[String]) -> ImportResult<TabularSheet> {
        if lines.is_empty() {
            return Ok(TabularSheet::default());
        }

        let body = lines.join("\n");
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true) // exporter rows are not always the header's width
            .trim(Trim::All)
            .from_reader(body.as_bytes());

        let mut records = reader.records();
        let headers: Vec<String> = match records.next() {
            Some(first) => first?.iter().map(str::to_string).collect(),
            None => return Ok(TabularSheet::default()),
        };

        let mut rows = Vec::new();
        for result in records {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(columns = headers.len(), rows = rows.len(), "texto delimitado interpretado");
        Ok(TabularSheet { headers, rows })
    }
}

// ==========================================
// SpreadsheetParser
// ==========================================
// Reads the first worksheet; first row is the header.
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetParser;

impl SpreadsheetParser {
    fn read_first_sheet<R>(mut workbook: R) -> ImportResult<TabularSheet>
    where
        R: Reader<Cursor<Vec<u8>>>,
        R::Error: std::fmt::Display,
    {
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names.first().cloned().ok_or_else(|| {
            ImportError::SpreadsheetParse("planilha sem abas".to_string())
        })?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::SpreadsheetParse(e.to_string()))?;

        let mut rows_iter = range.rows();
        let headers: Vec<String> = match rows_iter.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect(),
            None => return Ok(TabularSheet::default()),
        };

        let rows: Vec<Vec<String>> = rows_iter
            .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
            .collect();

        debug!(sheet = %sheet_name, columns = headers.len(), rows = rows.len(), "planilha interpretada");
        Ok(TabularSheet { headers, rows })
    }
}

impl SheetParser for SpreadsheetParser {
    fn parse_sheet(&self, raw: &[u8], format: SourceFormat) -> ImportResult<TabularSheet> {
        let cursor = Cursor::new(raw.to_vec());
        match format {
            SourceFormat::Xlsx => {
                let workbook: Xlsx<_> = Xlsx::new(cursor)?;
                Self::read_first_sheet(workbook)
            }
            SourceFormat::Xls => {
                let workbook: Xls<_> = Xls::new(cursor).map_err(|e| {
                    ImportError::SpreadsheetParse(format!(
                        "{} (dica: abra no Excel, salve como .xlsx e tente novamente)",
                        e
                    ))
                })?;
                Self::read_first_sheet(workbook)
            }
            SourceFormat::Csv => Err(ImportError::UnsupportedFormat(format.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_parse_lines_header_and_rows() {
        let sheet = DelimitedTextParser::default()
            .parse_lines(&lines(&["LOCAL;FURO;DUPLAGEM", "Porta; x ;", "Caixa;;"]))
            .unwrap();

        assert_eq!(sheet.headers, vec!["LOCAL", "FURO", "DUPLAGEM"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0], vec!["Porta", "x", ""]);
    }

    #[test]
    fn test_parse_lines_accepts_ragged_rows() {
        let sheet = DelimitedTextParser::default()
            .parse_lines(&lines(&["A;B;C", "1", "1;2;3;4"]))
            .unwrap();
        assert_eq!(sheet.rows[0], vec!["1"]);
        assert_eq!(sheet.rows[1].len(), 4);
    }

    #[test]
    fn test_parse_lines_empty_input() {
        let sheet = DelimitedTextParser::default().parse_lines(&[]).unwrap();
        assert!(sheet.headers.is_empty());
        assert!(sheet.rows.is_empty());
    }

    #[test]
    fn test_spreadsheet_parser_rejects_garbage() {
        let result = SpreadsheetParser.parse_sheet(b"not a workbook", SourceFormat::Xlsx);
        assert!(matches!(result, Err(ImportError::SpreadsheetParse(_))));
    }

    #[test]
    fn test_spreadsheet_parser_does_not_take_csv() {
        let result = SpreadsheetParser.parse_sheet(b"A;B", SourceFormat::Csv);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
