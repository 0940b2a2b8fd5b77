use std::borrow::Cow;
use std::path::Path;

use pdf::{content::Operation, file::File, object::Page, primitive::Primitive};
use tracing::{debug, info};

use crate::error::{Result, SummarizerError};
use crate::Transcript;

/// Two text objects closer than this vertically share a line.
const SAME_LINE_TOLERANCE: f32 = 1.0;

/// Page geometry used to drop gutters and footers from PDF transcripts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSettings {
    /// Text left of this x coordinate (line numbers) is ignored.
    pub margin_x_left: f32,
    /// Text at or below this y coordinate (page numbers) is ignored.
    pub bottom_y_cutoff: f32,
}

impl PageSettings {
    pub fn new(margin_x_left: f32, bottom_y_cutoff: f32) -> Self {
        Self {
            margin_x_left,
            bottom_y_cutoff,
        }
    }

    fn keeps(&self, obj: &TextObject<'_>) -> bool {
        obj.x >= self.margin_x_left && obj.y > self.bottom_y_cutoff
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Load a transcript from disk. `.pdf` files have their text extracted,
/// anything else is read as UTF-8 text.
pub fn read_transcript(path: impl AsRef<Path>, settings: &PageSettings) -> Result<Transcript> {
    let path = path.as_ref();
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let text = if is_pdf {
        let pdf = File::<Vec<u8>>::open(path).map_err(|e| pdf_open_error(path, e))?;
        parse_pdf_transcript(&pdf, settings).map_err(|e| SummarizerError::pdf(path, e))?
    } else {
        std::fs::read_to_string(path).map_err(|e| SummarizerError::io(path, e))?
    };

    info!(path = %path.display(), chars = text.len(), "read transcript");
    Ok(Transcript::new(text))
}

fn pdf_open_error(path: &Path, err: pdf::error::PdfError) -> SummarizerError {
    if !path.exists() {
        return SummarizerError::NotFound {
            path: path.to_path_buf(),
        };
    }
    SummarizerError::pdf(path, err)
}

/// Extract the text of every page, one output line per baseline.
pub fn parse_pdf_transcript(
    pdf: &File<Vec<u8>>,
    settings: &PageSettings,
) -> std::result::Result<String, pdf::error::PdfError> {
    let mut pages = Vec::new();

    for (i, page) in pdf.pages().enumerate() {
        let page = page?;
        let lines = lines_on_page(&page, settings)?;
        debug!(page = i + 1, lines = lines.len(), "extracted page");
        pages.push(lines.join("\n"));
    }

    Ok(pages.join("\n"))
}

fn lines_on_page(
    page: &Page,
    settings: &PageSettings,
) -> std::result::Result<Vec<String>, pdf::error::PdfError> {
    let content = match &page.contents {
        Some(c) => c,
        None => return Ok(Vec::new()),
    };

    let objects = text_objects(&content.operations)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(group_lines(objects, settings))
}

#[derive(Debug, Clone, PartialEq)]
struct TextObject<'src> {
    x: f32,
    y: f32,
    text: Cow<'src, str>,
}

/// Walks content-stream operations and yields one item per `BT … ET` block
/// that carried both a position and some text.
#[derive(Debug, Clone)]
struct TextObjectParser<'src> {
    ops: std::slice::Iter<'src, Operation>,
}

impl<'src> Iterator for TextObjectParser<'src> {
    type Item = std::result::Result<TextObject<'src>, pdf::error::PdfError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut last_coords = None;
        let mut last_text: Option<Cow<'src, str>> = None;

        while let Some(Operation { operator, operands }) = self.ops.next() {
            match (operator.as_str(), operands.as_slice()) {
                ("BT", _) => {
                    last_coords = None;
                    last_text = None;
                }
                ("Td" | "TD", [x, y]) => match (x.as_number(), y.as_number()) {
                    (Ok(x), Ok(y)) => last_coords = Some((x, y)),
                    (Err(e), _) | (_, Err(e)) => return Some(Err(e)),
                },
                // text matrix: a b c d e f, where e/f is the origin
                ("Tm", [_, _, _, _, tx, ty]) => match (tx.as_number(), ty.as_number()) {
                    (Ok(x), Ok(y)) => last_coords = Some((x, y)),
                    (Err(e), _) | (_, Err(e)) => return Some(Err(e)),
                },
                ("Tj" | "'", [Primitive::String(text)]) => match text.as_str() {
                    Ok(s) => last_text = Some(s),
                    Err(e) => return Some(Err(e)),
                },
                ("TJ", [Primitive::Array(parts)]) => {
                    let mut combined = String::new();
                    for part in parts {
                        // numbers in a TJ array are kerning offsets
                        if let Primitive::String(text) = part {
                            match text.as_str() {
                                Ok(s) => combined.push_str(&s),
                                Err(e) => return Some(Err(e)),
                            }
                        }
                    }
                    last_text = Some(Cow::Owned(combined));
                }
                ("ET", _) => {
                    if let (Some((x, y)), Some(text)) = (last_coords.take(), last_text.take()) {
                        return Some(Ok(TextObject { x, y, text }));
                    }
                }
                _ => continue,
            }
        }

        None
    }
}

fn text_objects(operations: &[Operation]) -> TextObjectParser<'_> {
    TextObjectParser {
        ops: operations.iter(),
    }
}

/// Sort top-to-bottom then left-to-right and join objects sharing a baseline.
fn group_lines(mut objects: Vec<TextObject<'_>>, settings: &PageSettings) -> Vec<String> {
    objects.retain(|o| settings.keeps(o));
    objects.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<String> = Vec::new();
    let mut current_y: Option<f32> = None;

    for obj in objects {
        match current_y {
            Some(y) if (y - obj.y).abs() < SAME_LINE_TOLERANCE => {
                if let Some(line) = lines.last_mut() {
                    line.push_str(&obj.text);
                }
            }
            _ => {
                current_y = Some(obj.y);
                lines.push(obj.text.into_owned());
            }
        }
    }

    lines
}
