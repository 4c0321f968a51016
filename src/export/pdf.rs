use crate::export::model::{CheckMark, Column, PresentedRow};
use crate::export::style::{HEADER_RGB, HEADER_TEXT_RGB, RowBand, rgb_components};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

/// Report column widths in points, one per display column.
pub(crate) const REPORT_COL_WIDTHS: [f32; 8] = [25.0, 120.0, 100.0, 90.0, 70.0, 200.0, 40.0, 150.0];

// A4 landscape
const PAGE_W: f32 = 842.0;
const PAGE_H: f32 = 595.0;
const MARGIN: f32 = 36.0;

const CELL_PAD_X: f32 = 3.0;
const CELL_PAD_Y: f32 = 3.0;
const FONT_SIZE: f32 = 8.0;
const LEADING: f32 = 10.0;
const HEADER_FONT_SIZE: f32 = 9.0;
const TITLE_FONT_SIZE: f32 = 18.0;
/// Title line plus the spacer below it.
const TITLE_BLOCK_H: f32 = TITLE_FONT_SIZE + 12.0 + 12.0;

/// Average Helvetica glyph advance, in em.
const AVG_CHAR_EM: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellAlign {
    Left,
    Center,
}

pub(crate) fn column_align(column: Column) -> CellAlign {
    match column {
        Column::No | Column::Check => CellAlign::Center,
        _ => CellAlign::Left,
    }
}

#[derive(Clone, Copy)]
enum FontKind {
    Regular,
    Bold,
    Glyphs,
}

impl FontKind {
    fn resource_name(&self) -> Name<'static> {
        match self {
            FontKind::Regular => Name(b"F1"),
            FontKind::Bold => Name(b"F2"),
            FontKind::Glyphs => Name(b"F3"),
        }
    }
}

/// A table row after wrapping: one list of lines per cell.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReportRow {
    pub cells: Vec<Vec<String>>,
    /// `None` for the header row.
    pub check: Option<CheckMark>,
}

impl ReportRow {
    pub fn header(labels: &[&str], col_widths: &[f32]) -> Self {
        let cells = labels
            .iter()
            .zip(col_widths)
            .map(|(l, w)| wrap_cell(l, *w, HEADER_FONT_SIZE))
            .collect();
        Self { cells, check: None }
    }

    pub fn data(row: &PresentedRow, col_widths: &[f32]) -> Self {
        let cells = Column::ALL
            .iter()
            .zip(col_widths)
            .map(|(c, w)| match c {
                Column::Check => vec![row.check.glyph().to_string()],
                _ => wrap_cell(&row.value(*c), *w, FONT_SIZE),
            })
            .collect();
        Self {
            cells,
            check: Some(row.check),
        }
    }

    pub fn band(&self) -> Option<RowBand> {
        self.check.map(RowBand::for_check)
    }

    pub fn height(&self) -> f32 {
        let lines = self.cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        lines as f32 * LEADING + 2.0 * CELL_PAD_Y
    }
}

/// Rows placed on one page. The header row is drawn above them on every page.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PageLayout {
    pub with_title: bool,
    pub rows: Range<usize>,
}

/// Split rows across pages. A row that cannot fit even on an empty page is
/// placed alone and clipped.
pub(crate) fn paginate(header_h: f32, row_heights: &[f32]) -> Vec<PageLayout> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut first = true;

    loop {
        let mut y = PAGE_H - MARGIN - header_h;
        if first {
            y -= TITLE_BLOCK_H;
        }

        let mut end = start;
        while end < row_heights.len() && (y - row_heights[end] >= MARGIN || end == start) {
            y -= row_heights[end];
            end += 1;
        }

        pages.push(PageLayout {
            with_title: first,
            rows: start..end,
        });

        first = false;
        start = end;
        if start >= row_heights.len() {
            break;
        }
    }

    pages
}

/// Split on embedded line breaks, then wrap each line to the column width.
pub(crate) fn wrap_cell(text: &str, col_width: f32, font_size: f32) -> Vec<String> {
    let max_chars = ((col_width - 2.0 * CELL_PAD_X) / (font_size * AVG_CHAR_EM))
        .floor()
        .max(1.0) as usize;

    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let raw = raw.trim_end_matches('\r');
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        for l in textwrap::wrap(raw, max_chars) {
            lines.push(l.into_owned());
        }
    }
    lines
}

fn text_width(text: &str, size: f32) -> f32 {
    UnicodeWidthStr::width(text) as f32 * size * AVG_CHAR_EM
}

/// Encode for the standard Type1 fonts (WinAnsiEncoding).
/// Characters outside the encoding become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

/// ZapfDingbats codes for the check glyphs.
fn glyph_code(check: CheckMark) -> &'static [u8] {
    match check {
        CheckMark::Accepted => b"3",
        CheckMark::Rejected => b"7",
    }
}

pub struct ReportWriter {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,
    glyph_font_id: Ref,

    col_widths: Vec<f32>,
    x_start: f32,
}

impl ReportWriter {
    pub fn new(col_widths: &[f32]) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);
        let glyph_font_id = Ref::new(5);
        let next_id = 6;

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(glyph_font_id)
            .base_font(Name(b"ZapfDingbats"));

        let table_w: f32 = col_widths.iter().sum();

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            next_id,
            font_id,
            bold_font_id,
            glyph_font_id,

            col_widths: col_widths.to_vec(),
            x_start: ((PAGE_W - table_w) / 2.0).max(0.0),
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
            .contents(content_id);

        page.resources()
            .fonts()
            .pair(FontKind::Regular.resource_name(), self.font_id)
            .pair(FontKind::Bold.resource_name(), self.bold_font_id)
            .pair(FontKind::Glyphs.resource_name(), self.glyph_font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, font: FontKind, x: f32, y: f32, size: f32, bytes: &[u8]) {
        content.begin_text();
        content.set_font(font.resource_name(), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(bytes));
        content.end_text();
    }

    fn fill_rect(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32, rgb: u32) {
        let (r, g, b) = rgb_components(rgb);
        content.save_state();
        content.set_fill_rgb(r, g, b);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_line_width(0.5);
        content.set_stroke_rgb(0.5, 0.5, 0.5);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    /// Draw one row whose top edge is at `top`; returns the new top.
    fn draw_row(&self, content: &mut Content, top: f32, row: &ReportRow) -> f32 {
        let h = row.height();
        let bottom = top - h;
        let table_w: f32 = self.col_widths.iter().sum();
        let is_header = row.check.is_none();

        match row.band() {
            Some(band) => self.fill_rect(content, self.x_start, bottom, table_w, h, band.rgb()),
            None => self.fill_rect(content, self.x_start, bottom, table_w, h, HEADER_RGB),
        }

        let (font, size) = if is_header {
            (FontKind::Bold, HEADER_FONT_SIZE)
        } else {
            (FontKind::Regular, FONT_SIZE)
        };

        if is_header {
            let (r, g, b) = rgb_components(HEADER_TEXT_RGB);
            content.save_state();
            content.set_fill_rgb(r, g, b);
        }

        let mut x = self.x_start;
        for (i, lines) in row.cells.iter().enumerate() {
            let w = self.col_widths[i];
            let column = Column::ALL[i];
            let centered = !is_header && column_align(column) == CellAlign::Center;

            for (j, line) in lines.iter().enumerate() {
                let baseline = top - CELL_PAD_Y - size - j as f32 * LEADING;

                if let (Column::Check, Some(check)) = (column, row.check) {
                    let glyph_w = size * 0.8;
                    let gx = x + (w - glyph_w) / 2.0;
                    self.draw_text(content, FontKind::Glyphs, gx, baseline, size, glyph_code(check));
                    continue;
                }

                let tx = if centered {
                    x + ((w - text_width(line, size)) / 2.0).max(CELL_PAD_X)
                } else {
                    x + CELL_PAD_X
                };
                self.draw_text(content, font, tx, baseline, size, &win_ansi(line));
            }

            self.draw_cell_borders(content, x, bottom, w, h);
            x += w;
        }

        if is_header {
            content.restore_state();
        }

        bottom
    }

    fn draw_title(&self, content: &mut Content, title: &str) {
        let bytes = win_ansi(title);
        let x = ((PAGE_W - text_width(title, TITLE_FONT_SIZE)) / 2.0).max(MARGIN);
        let y = PAGE_H - MARGIN - TITLE_FONT_SIZE;
        self.draw_text(content, FontKind::Bold, x, y, TITLE_FONT_SIZE, &bytes);
    }

    fn draw_footer(&self, content: &mut Content, page: usize, total: usize) {
        let label = format!("Page {page} of {total}");
        let x = PAGE_W - MARGIN - text_width(&label, FONT_SIZE);
        self.draw_text(content, FontKind::Regular, x, MARGIN / 2.0, FONT_SIZE, label.as_bytes());
    }

    /// Title on the first page, then the table, header repeated per page.
    pub fn write_report(&mut self, title: &str, header: &ReportRow, rows: &[ReportRow]) {
        let heights: Vec<f32> = rows.iter().map(ReportRow::height).collect();
        let pages = paginate(header.height(), &heights);
        let total = pages.len();

        for (idx, page) in pages.iter().enumerate() {
            let mut content = self.new_page();

            let mut top = PAGE_H - MARGIN;
            if page.with_title {
                self.draw_title(&mut content, title);
                top -= TITLE_BLOCK_H;
            }

            top = self.draw_row(&mut content, top, header);
            for row in &rows[page.rows.clone()] {
                top = self.draw_row(&mut content, top, row);
            }

            self.draw_footer(&mut content, idx + 1, total);
            self.finalize_page(content);
        }
    }

    /// Close the document and return its bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();
        self.pdf.finish()
    }
}
