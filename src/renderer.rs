#![cfg(not(tarpaulin_include))]

use crate::grouping::{self, Group};
use crate::layout;
use docx_rs::{
    BreakType, Docx, LineSpacing, PageMargin, Paragraph, Run, RunFonts, Table, TableCell,
    TableRow, WidthType,
};
use std::error::Error;
use std::io::Cursor;

const FONT: &str = "Times New Roman";

// 0.3 inch in twips, the roster page margin on all four sides
const ROSTER_MARGIN: i32 = 432;

// Column width in twips for the 6-column roster grid
const CELL_WIDTH: usize = 1896;

/// Render the attendance top sheet to DOCX
///
/// Each group gets one page: a bold `Group <n>` heading, a `Roll Range:` line
/// with the compressed range tokens, and an `Absent:` line (`0` when the
/// group has no absentees). An explicit page break separates groups; the last
/// group is not followed by one.
///
/// # Arguments
/// * `groups` - Ordered groups from the attendance grouper
///
/// # Returns
/// * `Result<Vec<u8>, Box<dyn Error>>` - DOCX file content as bytes or an error
pub fn top_sheet(groups: &[Group]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut docx = Docx::new();
    let last = groups.len().saturating_sub(1);

    for (index, group) in groups.iter().enumerate() {
        let tokens = grouping::compress_ranges(&group.present());

        docx = docx
            .add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text(format!("Group {}", index + 1))
                        .bold()
                        .size(28)
                        .fonts(RunFonts::new().ascii(FONT)),
                ),
            )
            .add_paragraph(
                Paragraph::new()
                    .line_spacing(LineSpacing::new().after(200))
                    .add_run(
                        Run::new()
                            .add_text(format!("Roll Range: {}", grouping::range_text(&tokens)))
                            .fonts(RunFonts::new().ascii(FONT)),
                    ),
            )
            .add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text(format!("Absent: {}", absent_text(&group.absents)))
                        .fonts(RunFonts::new().ascii(FONT)),
                ),
            );

        if index < last {
            docx = docx.add_paragraph(page_break());
        }
    }

    pack_docx(docx)
}

/// Render the subject-wise roster to DOCX
///
/// Rolls are paginated at the fixed grid capacity and laid out column-major,
/// one bordered table per page with narrow margins. The last grid cell of the
/// final page carries a bold running total. Pages are separated by explicit
/// page breaks, none after the last.
///
/// # Arguments
/// * `rolls` - Full ordered roll list for the subject
///
/// # Returns
/// * `Result<Vec<u8>, Box<dyn Error>>` - DOCX file content as bytes or an error
pub fn subject_roster(rolls: &[String]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut docx = Docx::new().page_margin(
        PageMargin::new()
            .top(ROSTER_MARGIN)
            .bottom(ROSTER_MARGIN)
            .left(ROSTER_MARGIN)
            .right(ROSTER_MARGIN),
    );

    let pages = layout::paginate(rolls, layout::PAGE_CAPACITY);
    let last = pages.len().saturating_sub(1);

    for (page_index, page) in pages.iter().enumerate() {
        let mut grid = layout::column_major_grid(page, layout::COLUMNS, layout::ROWS_PER_PAGE);

        // Running total goes in the last grid slot of the final page, even
        // when that slot would otherwise be empty.
        if page_index == last {
            grid[layout::ROWS_PER_PAGE - 1][layout::COLUMNS - 1] =
                format!("Total: {}", rolls.len());
        }

        let table_rows: Vec<TableRow> = grid
            .iter()
            .filter(|row| !row.iter().all(|cell| cell.is_empty()))
            .map(|row| TableRow::new(row.iter().map(|cell| roster_cell(cell)).collect()))
            .collect();

        if !table_rows.is_empty() {
            docx = docx.add_table(
                Table::new(table_rows).set_grid(vec![CELL_WIDTH; layout::COLUMNS]),
            );
        }

        if page_index < last {
            docx = docx.add_paragraph(page_break());
        }
    }

    pack_docx(docx)
}

fn roster_cell(text: &str) -> TableCell {
    let mut run = Run::new()
        .add_text(text)
        .size(24)
        .fonts(RunFonts::new().ascii(FONT));
    if text.starts_with("Total") {
        run = run.bold();
    }

    TableCell::new()
        .width(CELL_WIDTH, WidthType::Dxa)
        .add_paragraph(
            Paragraph::new()
                .line_spacing(LineSpacing::new().before(100).after(100))
                .add_run(run),
        )
}

fn page_break() -> Paragraph {
    Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
}

// The top sheet prints "0" rather than an empty absentee line.
fn absent_text(absents: &[String]) -> String {
    if absents.is_empty() {
        "0".to_string()
    } else {
        absents.join(", ")
    }
}

// Serialize the assembled document into an in-memory DOCX (ZIP) buffer
fn pack_docx(docx: Docx) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor)?;
    Ok(cursor.into_inner())
}
