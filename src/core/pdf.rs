//! Minimal PDF composition on top of printpdf.
//!
//! Uses only the built-in Helvetica faces so no font files need to ship with
//! the binary. printpdf positions text at absolute coordinates, so this
//! module keeps a top-down cursor and wraps paragraphs by an estimated glyph
//! width, starting a new page when the cursor reaches the bottom margin.

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfPageIndex,
};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ReportError;

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 20.0;

const TITLE_FONT_SIZE: f64 = 16.0;
const CHAPTER_FONT_SIZE: f64 = 14.0;
const SECTION_FONT_SIZE: f64 = 12.0;
const BODY_FONT_SIZE: f64 = 11.0;
const NOTE_FONT_SIZE: f64 = 10.0;
const HEADER_FONT_SIZE: f64 = 12.0;
const FOOTER_FONT_SIZE: f64 = 8.0;

const PT_TO_MM: f64 = 0.352_778;
/// Rough Helvetica glyph advance relative to the point size
const AVG_CHAR_WIDTH_EM: f64 = 0.5;
/// Leading between lines relative to the font size
const LINE_SPACING: f64 = 1.4;

#[derive(Debug, Clone, Copy)]
enum FontFace {
    Regular,
    Bold,
    Italic,
}

/// Cursor-based PDF writer.
///
/// Every page carries the document title as a header and its page number as
/// a footer. Content flows top-down between the margins.
pub struct PdfWriter {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    title: String,
    page: PdfPageIndex,
    layer: PdfLayerIndex,
    cursor_y: f64,
    page_count: usize,
}

impl PdfWriter {
    pub fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) =
            PdfDocument::new(
                title,
                Mm(PAGE_WIDTH_MM as f32),
                Mm(PAGE_HEIGHT_MM as f32),
                "Layer 1",
            );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let italic = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;

        let mut writer = Self {
            doc,
            regular,
            bold,
            italic,
            title: title.to_string(),
            page,
            layer,
            cursor_y: PAGE_HEIGHT_MM - MARGIN_MM,
            page_count: 1,
        };
        writer.decorate_page();
        Ok(writer)
    }

    /// Large centered title line, for the cover block.
    pub fn title_line(&mut self, text: &str) {
        self.advance(TITLE_FONT_SIZE);
        self.draw_centered(text, TITLE_FONT_SIZE, FontFace::Bold, self.cursor_y);
        self.space(4.0);
    }

    /// Small centered italic line under the title.
    pub fn subtitle_line(&mut self, text: &str) {
        self.advance(NOTE_FONT_SIZE);
        self.draw_centered(text, NOTE_FONT_SIZE, FontFace::Italic, self.cursor_y);
    }

    /// Chapter heading, kept on the same page as the start of its content.
    pub fn chapter_title(&mut self, text: &str) {
        self.ensure_room(30.0);
        self.write_wrapped(text, CHAPTER_FONT_SIZE, FontFace::Bold);
        self.space(2.5);
    }

    /// Section heading for a single issue.
    pub fn section_title(&mut self, text: &str) {
        self.ensure_room(25.0);
        self.write_wrapped(text, SECTION_FONT_SIZE, FontFace::Bold);
        self.space(1.5);
    }

    /// Body paragraph, word-wrapped to the text column.
    pub fn body(&mut self, text: &str) {
        self.write_wrapped(text, BODY_FONT_SIZE, FontFace::Regular);
        self.space(2.0);
    }

    /// Small italic paragraph, used for references and attributions.
    pub fn note(&mut self, text: &str) {
        self.write_wrapped(text, NOTE_FONT_SIZE, FontFace::Italic);
        self.space(2.0);
    }

    /// Vertical gap in millimeters.
    pub fn space(&mut self, mm: f64) {
        self.cursor_y -= mm;
    }

    /// Force the next content onto a fresh page.
    pub fn page_break(&mut self) {
        self.new_page();
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Save the document, writing a temporary sibling first and renaming it
    /// into place so a failed write never leaves a partial file at the
    /// final path.
    pub fn save(self, path: &Path) -> Result<(), ReportError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| ReportError::CreateDir(parent.to_path_buf(), e))?;
            }
        }

        let tmp_path = tmp_sibling(path);
        let file =
            File::create(&tmp_path).map_err(|e| ReportError::WriteError(tmp_path.clone(), e))?;
        let mut writer = BufWriter::new(file);

        if let Err(e) = self.doc.save(&mut writer) {
            let _ = fs::remove_file(&tmp_path);
            return Err(ReportError::Pdf(e.to_string()));
        }
        if let Err(e) = writer.flush() {
            let _ = fs::remove_file(&tmp_path);
            return Err(ReportError::WriteError(tmp_path.clone(), e));
        }
        drop(writer);

        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            ReportError::RenameError(path.to_path_buf(), e)
        })?;

        debug!("Wrote PDF to {}", path.display());
        Ok(())
    }

    fn write_wrapped(&mut self, text: &str, size: f64, face: FontFace) {
        let width = max_chars_per_line(size);
        for line in wrap_text(text, width) {
            self.advance(size);
            self.draw_text_at(&line, size, face, MARGIN_MM, self.cursor_y);
        }
    }

    /// Move the cursor down one line, breaking the page when needed.
    fn advance(&mut self, size: f64) {
        let line_height = size * PT_TO_MM * LINE_SPACING;
        if self.cursor_y - line_height < MARGIN_MM {
            self.new_page();
        }
        self.cursor_y -= line_height;
    }

    fn ensure_room(&mut self, mm: f64) {
        if self.cursor_y - mm < MARGIN_MM {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1");
        self.page = page;
        self.layer = layer;
        self.page_count += 1;
        self.cursor_y = PAGE_HEIGHT_MM - MARGIN_MM;
        self.decorate_page();
    }

    /// Stamp the running header and the page-number footer.
    fn decorate_page(&mut self) {
        let title = self.title.clone();
        self.draw_centered(&title, HEADER_FONT_SIZE, FontFace::Bold, PAGE_HEIGHT_MM - 12.0);
        let footer = format!("Page {}", self.page_count);
        self.draw_centered(&footer, FOOTER_FONT_SIZE, FontFace::Italic, 10.0);
        self.cursor_y = PAGE_HEIGHT_MM - MARGIN_MM - 5.0;
    }

    fn draw_centered(&self, text: &str, size: f64, face: FontFace, y: f64) {
        let x = ((PAGE_WIDTH_MM - estimate_width(text, size)) / 2.0).max(MARGIN_MM);
        self.draw_text_at(text, size, face, x, y);
    }

    fn draw_text_at(&self, text: &str, size: f64, face: FontFace, x: f64, y: f64) {
        let layer = self.doc.get_page(self.page).get_layer(self.layer);
        layer.use_text(
            sanitize(text),
            size as f32,
            Mm(x as f32),
            Mm(y as f32),
            self.font(face),
        );
    }

    fn font(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Italic => &self.italic,
        }
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    path.with_extension("pdf.tmp")
}

fn estimate_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * PT_TO_MM * AVG_CHAR_WIDTH_EM
}

fn max_chars_per_line(size: f64) -> usize {
    let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    let char_width = size * PT_TO_MM * AVG_CHAR_WIDTH_EM;
    (usable / char_width).floor() as usize
}

/// Split a paragraph into lines of at most `max_chars` characters.
///
/// Words longer than a whole line are hard-broken. Blank source lines are
/// kept so paragraph breaks survive.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0usize;

        for word in raw_line.split_whitespace() {
            let word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len <= max_chars {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
                continue;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if word_len > max_chars {
                let (rest, rest_len) = break_long_word(word, max_chars, &mut lines);
                current = rest;
                current_len = rest_len;
            } else {
                current = word.to_string();
                current_len = word_len;
            }
        }

        if current_len > 0 {
            lines.push(current);
        }
    }

    lines
}

/// Push full-width chunks of an overlong word, returning the remainder.
fn break_long_word(word: &str, max_chars: usize, lines: &mut Vec<String>) -> (String, usize) {
    let chars: Vec<char> = word.chars().collect();
    let mut start = 0;
    while chars.len() - start > max_chars {
        lines.push(chars[start..start + max_chars].iter().collect());
        start += max_chars;
    }
    let rest: String = chars[start..].iter().collect();
    let rest_len = chars.len() - start;
    (rest, rest_len)
}

/// Replace characters the built-in fonts cannot encode.
///
/// The Base14 fonts are WinAnsi encoded, so anything outside Latin-1 is
/// mapped to a close ASCII equivalent or '?'.
fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\t' => out.push_str("    "),
            ' '..='~' => out.push(c),
            '\u{00A0}'..='\u{00FF}' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
