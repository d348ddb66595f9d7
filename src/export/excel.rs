use std::collections::HashMap;
use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Image, Workbook, Worksheet};

use super::layout::{CellStyle, CellValue, SheetLayout, COLUMN_WIDTH, LAST_COL};
use super::ExportError;
use planner_core::models::Crew;

const LOGO_WIDTH: u32 = 140;
const LOGO_HEIGHT: u32 = 70;

/// Reusable formats, one per layout style.
struct ExcelFormats {
    by_style: HashMap<CellStyle, Format>,
    fallback: Format,
}

impl ExcelFormats {
    fn new() -> Self {
        let centered = Format::new()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        let crew = Format::new()
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::Top)
            .set_text_wrap()
            .set_border(FormatBorder::Thin);

        let mut by_style = HashMap::new();
        by_style.insert(CellStyle::Logo, centered.clone().set_font_size(10));
        by_style.insert(
            CellStyle::Title,
            centered.clone().set_bold().set_font_size(12),
        );
        by_style.insert(
            CellStyle::HeaderLabel,
            centered.clone().set_bold().set_font_size(10),
        );
        by_style.insert(CellStyle::HeaderValue, centered.clone().set_font_size(10));
        by_style.insert(
            CellStyle::Weekday,
            centered
                .clone()
                .set_bold()
                .set_font_size(12)
                .set_background_color(0xDDEBF7), // Light blue
        );
        by_style.insert(
            CellStyle::DayNumber,
            Format::new().set_bold().set_border(FormatBorder::Thin),
        );
        for crew_id in Crew::ALL {
            let fill = match crew_id {
                Crew::R1 => 0xE0F7FA, // Light cyan
                Crew::R2 => 0xFFF9C4, // Light yellow
            };
            by_style.insert(
                CellStyle::Crew { crew: crew_id, shaded: true },
                crew.clone().set_background_color(fill),
            );
            by_style.insert(
                CellStyle::Crew { crew: crew_id, shaded: false },
                crew.clone(),
            );
        }
        by_style.insert(
            CellStyle::Filler,
            Format::new()
                .set_background_color(0xF0F0F0)
                .set_border(FormatBorder::Thin),
        );
        by_style.insert(
            CellStyle::Legend,
            Format::new().set_bold().set_font_color(0xD32F2F),
        );
        by_style.insert(
            CellStyle::Footer,
            Format::new().set_italic().set_font_size(9).set_font_color(0x595959),
        );

        Self {
            by_style,
            fallback: Format::new(),
        }
    }

    fn get(&self, style: CellStyle) -> &Format {
        self.by_style.get(&style).unwrap_or(&self.fallback)
    }
}

/// Writes a `SheetLayout` into an in-memory xlsx workbook.
#[derive(Clone, Debug, Default)]
pub struct ExcelWriter {
    logo: Option<std::path::PathBuf>,
}

impl ExcelWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place this image in the top-left header block.
    pub fn logo(mut self, path: Option<&Path>) -> Self {
        self.logo = path.map(Path::to_path_buf);
        self
    }

    pub fn render_to_bytes(&self, layout: &SheetLayout) -> Result<Vec<u8>, ExportError> {
        // Check assets before doing any work so the failure is reported as such
        let logo = match &self.logo {
            Some(path) if !path.is_file() => return Err(ExportError::MissingAsset(path.clone())),
            Some(path) => Some(
                Image::new(path)?.set_scale_to_size(LOGO_WIDTH, LOGO_HEIGHT, true),
            ),
            None => None,
        };

        let formats = ExcelFormats::new();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&layout.sheet_name)?;

        write_layout(sheet, layout, &formats)?;
        if let Some(image) = &logo {
            sheet.insert_image(0, 0, image)?;
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

fn write_layout(
    sheet: &mut Worksheet,
    layout: &SheetLayout,
    formats: &ExcelFormats,
) -> Result<(), ExportError> {
    for col in 0..=LAST_COL {
        sheet.set_column_width(col, COLUMN_WIDTH)?;
    }
    for &(row, height) in &layout.row_heights {
        sheet.set_row_height(row, height)?;
    }

    for merge in &layout.merges {
        sheet.merge_range(
            merge.first_row,
            merge.first_col,
            merge.last_row,
            merge.last_col,
            &merge.text,
            formats.get(merge.style),
        )?;
    }

    for cell in &layout.cells {
        let format = formats.get(cell.style);
        match &cell.value {
            CellValue::Text(text) => {
                sheet.write_string_with_format(cell.row, cell.col, text, format)?;
            }
            CellValue::Number(n) => {
                sheet.write_number_with_format(cell.row, cell.col, *n, format)?;
            }
        }
    }
    Ok(())
}
