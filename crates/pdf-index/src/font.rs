//! Font selection
//!
//! ASCII-only text uses the built-in Helvetica. Anything else needs an
//! embedded font whose glyphs cover the text, notably CJK; a few well-known
//! system locations are searched. When nothing usable is found the builder
//! degrades to Helvetica and the missing glyphs render as boxes.

use crate::text::{PlacedLine, TextStyle};
use printpdf::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// System fonts with broad CJK coverage, most specific first
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
    "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Medium.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
    "C:\\Windows\\Fonts\\simsun.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

/// Helvetica advance widths for ASCII 32..=126, per 1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// The font every line of an index document is written with
pub(crate) enum TextFont {
    Embedded { font: Box<ParsedFont>, id: FontId },
    Builtin,
}

impl TextFont {
    /// Pick a font for `text`, registering it with `doc` when embedded
    pub(crate) fn select(doc: &mut PdfDocument, text: &str, preferred: Option<&Path>) -> Self {
        let required: BTreeSet<char> = text
            .chars()
            .filter(|c| !c.is_ascii() && !c.is_whitespace())
            .collect();
        if required.is_empty() {
            return TextFont::Builtin;
        }

        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

        let mut best: Option<(usize, ParsedFont, PathBuf)> = None;
        for path in candidates {
            let Some(font) = parse_font_file(&path) else {
                continue;
            };
            let covered = required
                .iter()
                .filter(|&&c| font.lookup_glyph_index(c as u32).is_some())
                .count();
            log::debug!(
                "Font {} covers {}/{} characters",
                path.display(),
                covered,
                required.len()
            );

            if covered == required.len() {
                best = Some((covered, font, path));
                break;
            }
            if covered > 0 && best.as_ref().is_none_or(|(n, _, _)| covered > *n) {
                best = Some((covered, font, path));
            }
        }

        match best {
            Some((covered, font, path)) => {
                if covered < required.len() {
                    log::warn!(
                        "No font covers all index characters; using {} ({}/{} covered)",
                        path.display(),
                        covered,
                        required.len()
                    );
                } else {
                    log::info!("Using font {}", path.display());
                }
                let id = doc.add_font(&font);
                TextFont::Embedded {
                    font: Box::new(font),
                    id,
                }
            }
            None => {
                log::warn!("No font with the required glyphs found; falling back to Helvetica");
                TextFont::Builtin
            }
        }
    }

    /// Bullet glyph, `•` when the font has one
    pub(crate) fn bullet(&self) -> &'static str {
        match self {
            TextFont::Embedded { font, .. } if font.lookup_glyph_index('•' as u32).is_some() => {
                "•"
            }
            _ => "-",
        }
    }

    /// Advance width of `text` in points
    pub(crate) fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        match self {
            TextFont::Embedded { font, .. } => text
                .chars()
                .map(|ch| match font.lookup_glyph_index(ch as u32) {
                    Some(glyph_id) => scaled_advance(
                        font.get_horizontal_advance(glyph_id),
                        font.font_metrics.units_per_em,
                        style.font_size,
                    ),
                    None => style.font_size * 0.5,
                })
                .sum(),
            TextFont::Builtin => {
                let units: f32 = text.chars().map(helvetica_width).sum();
                let bold = if style.bold { 1.05 } else { 1.0 };
                units / 1000.0 * style.font_size * bold
            }
        }
    }

    /// Append the operations drawing one placed line
    pub(crate) fn write_line(&self, ops: &mut Vec<Op>, line: &PlacedLine) {
        let size = Pt(line.style.font_size);
        ops.push(Op::StartTextSection);
        match self {
            TextFont::Embedded { id, .. } => {
                ops.push(Op::SetFontSize {
                    font: id.clone(),
                    size,
                });
                ops.push(Op::SetTextMatrix {
                    matrix: TextMatrix::Translate(Pt(line.x_pt), Pt(line.baseline_pt)),
                });
                ops.push(Op::WriteText {
                    items: vec![TextItem::Text(line.text.clone())],
                    font: id.clone(),
                });
            }
            TextFont::Builtin => {
                let font = if line.style.bold {
                    BuiltinFont::HelveticaBold
                } else {
                    BuiltinFont::Helvetica
                };
                ops.push(Op::SetTextCursor {
                    pos: Point {
                        x: Pt(line.x_pt),
                        y: Pt(line.baseline_pt),
                    },
                });
                ops.push(Op::SetFontSizeBuiltinFont { font, size });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(line.text.clone())],
                    font,
                });
            }
        }
        ops.push(Op::EndTextSection);
    }
}

fn parse_font_file(path: &Path) -> Option<ParsedFont> {
    let bytes = std::fs::read(path).ok()?;
    let mut warnings = Vec::new();
    let font = ParsedFont::from_bytes(&bytes, 0, &mut warnings);
    if font.is_none() {
        log::debug!("Could not parse font {}", path.display());
    }
    font
}

/// Convert an advance in font units to points
fn scaled_advance(advance: u16, units_per_em: u16, font_size: f32) -> f32 {
    advance as f32 / units_per_em.max(1) as f32 * font_size
}

fn helvetica_width(ch: char) -> f32 {
    let code = ch as u32;
    if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[(code - 32) as usize] as f32
    } else {
        556.0
    }
}
