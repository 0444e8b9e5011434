use crate::error::{ExtractError, Result};
use crate::format::DocumentFormat;
use crate::reader::ParseResult;
use docx_rust::document::{
    BodyContent, Paragraph, ParagraphContent, Run, RunContent, Table, TableCellContent,
    TableRowContent,
};
use docx_rust::DocxFile;
use std::io::Cursor;
use tracing::info;

/// Compound File Binary signature used by legacy `.doc` files.
const OLE2_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Extract the raw text body of a Word document: no styling, no metadata.
/// Every paragraph, including those inside table cells, ends with a blank line.
pub fn extract_docx(data: &[u8]) -> Result<ParseResult> {
    if data.starts_with(&OLE2_SIGNATURE) {
        return Err(failure(
            "legacy binary .doc files are not Office Open XML documents",
        ));
    }

    // DocxFile owns the unpacked parts; Docx borrows from it.
    let file = DocxFile::from_reader(Cursor::new(data))
        .map_err(|e| failure(format!("Failed to open DOCX: {e}")))?;
    let docx = file
        .parse()
        .map_err(|e| failure(format!("Failed to parse DOCX content: {e}")))?;

    let mut text = String::new();
    for content in &docx.document.body.content {
        push_body_content(&mut text, content);
    }

    info!(total_chars = text.len(), "Extracted DOCX text");
    Ok(ParseResult::text(text))
}

fn failure(message: impl Into<String>) -> ExtractError {
    ExtractError::parse_failure(DocumentFormat::Word, message)
}

fn push_body_content(out: &mut String, content: &BodyContent) {
    match content {
        BodyContent::Paragraph(para) => push_paragraph(out, para),
        BodyContent::Table(table) => push_table(out, table),
        BodyContent::Sdt(sdt) => {
            if let Some(ref sdt_content) = sdt.content {
                for item in &sdt_content.content {
                    push_body_content(out, item);
                }
            }
        }
        _ => {}
    }
}

fn push_paragraph(out: &mut String, para: &Paragraph) {
    for pc in &para.content {
        match pc {
            ParagraphContent::Run(run) => push_run(out, run),
            ParagraphContent::Link(link) => {
                if let Some(run) = link.content.as_ref() {
                    push_run(out, run);
                }
            }
            _ => {}
        }
    }
    out.push_str("\n\n");
}

fn push_run(out: &mut String, run: &Run) {
    for rc in &run.content {
        match rc {
            RunContent::Text(t) => out.push_str(&t.text),
            RunContent::Break(_) => out.push('\n'),
            RunContent::Tab(_) => out.push('\t'),
            _ => {}
        }
    }
}

fn push_table(out: &mut String, table: &Table) {
    for row in &table.rows {
        for cell_content in &row.cells {
            if let TableRowContent::TableCell(cell) = cell_content {
                for tc in &cell.content {
                    let TableCellContent::Paragraph(para) = tc;
                    push_paragraph(out, para);
                }
            }
        }
    }
}
