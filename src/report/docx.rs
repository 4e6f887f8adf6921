// src/report/docx.rs
use crate::report::assembler::{Alignment, Block, DocumentPlan};
use crate::utils::error::RenderError;
use docx_rs::{
    AlignmentType, BorderType, BreakType, Docx, Paragraph, Pic, Run, Style, StyleType, Table,
    TableAlignmentType, TableCell, TableCellBorder, TableCellBorderPosition, TableRow,
};
use std::io::Cursor;
use std::path::Path;

const EMU_PER_INCH: f32 = 914_400.0;
// Eighths of a point.
const BORDER_SIZE: usize = 12;
const BORDER_COLOR: &str = "000000";

/// Renders a [`DocumentPlan`] into an in-memory `.docx` package.
#[derive(Debug, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, plan: &DocumentPlan) -> Result<Vec<u8>, RenderError> {
        let mut docx = Docx::new()
            .add_style(
                Style::new("Heading1", StyleType::Paragraph)
                    .name("Heading 1")
                    .size(32)
                    .bold(),
            )
            .add_style(
                Style::new("Heading2", StyleType::Paragraph)
                    .name("Heading 2")
                    .size(26)
                    .bold(),
            );

        for block in &plan.blocks {
            docx = match block {
                Block::Image {
                    path,
                    width_in,
                    height_in,
                } => docx.add_paragraph(image_paragraph(path, *width_in, *height_in)?),
                Block::Heading { text, level } => {
                    docx.add_paragraph(text_paragraph(text).style(&format!("Heading{}", level)))
                }
                Block::Paragraph { text, alignment } => {
                    docx.add_paragraph(text_paragraph(text).align(paragraph_alignment(*alignment)))
                }
                Block::Table { rows, alignment } => {
                    docx.add_table(bordered_table(rows).align(table_alignment(*alignment)))
                }
                Block::PageBreak => {
                    docx.add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
                }
            };
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| RenderError::Pack(e.to_string()))?;

        let bytes = buffer.into_inner();
        tracing::debug!("Rendered {} blocks into {} bytes of docx", plan.blocks.len(), bytes.len());
        Ok(bytes)
    }
}

fn image_paragraph(path: &Path, width_in: f32, height_in: f32) -> Result<Paragraph, RenderError> {
    let bytes = std::fs::read(path).map_err(|source| RenderError::Logo {
        path: path.display().to_string(),
        source,
    })?;
    let pic = Pic::new(&bytes).size(
        (width_in * EMU_PER_INCH) as u32,
        (height_in * EMU_PER_INCH) as u32,
    );
    Ok(Paragraph::new().add_run(Run::new().add_image(pic)))
}

/// One paragraph; embedded newlines become line breaks within it.
fn text_paragraph(text: &str) -> Paragraph {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            run = run.add_text(line);
        }
    }
    Paragraph::new().add_run(run)
}

fn bordered_table(rows: &[Vec<String>]) -> Table {
    let rows = rows
        .iter()
        .map(|row| TableRow::new(row.iter().map(|text| bordered_cell(text)).collect()))
        .collect();
    Table::new(rows)
}

fn bordered_cell(text: &str) -> TableCell {
    [
        TableCellBorderPosition::Top,
        TableCellBorderPosition::Bottom,
        TableCellBorderPosition::Left,
        TableCellBorderPosition::Right,
    ]
    .into_iter()
    .fold(
        TableCell::new().add_paragraph(text_paragraph(text)),
        |cell, position| {
            cell.set_border(
                TableCellBorder::new(position)
                    .border_type(BorderType::Single)
                    .size(BORDER_SIZE)
                    .color(BORDER_COLOR),
            )
        },
    )
}

fn paragraph_alignment(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
    }
}

fn table_alignment(alignment: Alignment) -> TableAlignmentType {
    match alignment {
        Alignment::Left => TableAlignmentType::Left,
        Alignment::Center => TableAlignmentType::Center,
        Alignment::Right => TableAlignmentType::Right,
    }
}
