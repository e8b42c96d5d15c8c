//! Line breaking and pagination
//!
//! Works purely on measured widths, so the same layout drives any font.
//! Coordinates are PDF points with the origin at the bottom-left.

use crate::markup::Block;

/// Indent per bullet nesting level (points)
pub const BULLET_INDENT_PT: f32 = 20.0;

/// Font size and vertical rhythm of a block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub leading: f32,
    pub space_after: f32,
    pub bold: bool,
}

impl TextStyle {
    pub const H1: Self = Self::new(18.0, 22.0, 10.0, true);
    pub const H2: Self = Self::new(14.0, 18.0, 8.0, true);
    pub const H3: Self = Self::new(12.0, 16.0, 6.0, true);
    pub const BULLET: Self = Self::new(10.0, 14.0, 4.0, false);
    pub const BODY: Self = Self::new(10.0, 12.0, 6.0, false);

    const fn new(font_size: f32, leading: f32, space_after: f32, bold: bool) -> Self {
        Self {
            font_size,
            leading,
            space_after,
            bold,
        }
    }

    pub fn heading(level: u8) -> Self {
        match level {
            0 | 1 => Self::H1,
            2 => Self::H2,
            _ => Self::H3,
        }
    }
}

/// One line of text at its final position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_pt: f32,
    pub baseline_pt: f32,
    pub style: TextStyle,
}

/// Lay out blocks onto pages of `width_pt` x `height_pt` with a uniform
/// margin.
///
/// `measure` returns the advance width of a string in points for a style.
/// Always returns at least one page; a page is only started when the next
/// line would cross the bottom margin.
pub fn paginate<F>(
    blocks: &[Block],
    width_pt: f32,
    height_pt: f32,
    margin_pt: f32,
    bullet: &str,
    measure: F,
) -> Vec<Vec<PlacedLine>>
where
    F: Fn(&str, &TextStyle) -> f32,
{
    let mut cursor = Cursor {
        pages: vec![Vec::new()],
        top: height_pt - margin_pt,
        height_pt,
        margin_pt,
    };
    let text_width = (width_pt - 2.0 * margin_pt).max(1.0);

    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                let style = TextStyle::heading(*level);
                cursor.place_wrapped(text, margin_pt, text_width, style, &measure);
                cursor.top -= style.space_after;
            }
            Block::Paragraph { text } => {
                let style = TextStyle::BODY;
                cursor.place_wrapped(text, margin_pt, text_width, style, &measure);
                cursor.top -= style.space_after;
            }
            Block::BulletList { items } => {
                let style = TextStyle::BULLET;
                for item in items {
                    let bullet_x = margin_pt + item.depth as f32 * BULLET_INDENT_PT;
                    let text_x = bullet_x + BULLET_INDENT_PT;
                    let width = (margin_pt + text_width - text_x).max(1.0);
                    let lines = wrap_text(&item.text, width, |s| measure(s, &style));

                    for (i, line) in lines.into_iter().enumerate() {
                        let baseline = cursor.next_baseline(&style);
                        if i == 0 {
                            cursor.push(bullet.to_string(), bullet_x, baseline, style);
                        }
                        cursor.push(line, text_x, baseline, style);
                    }
                    cursor.top -= style.space_after;
                }
            }
        }
    }

    cursor.pages
}

struct Cursor {
    pages: Vec<Vec<PlacedLine>>,
    top: f32,
    height_pt: f32,
    margin_pt: f32,
}

impl Cursor {
    /// Baseline for the next line, breaking the page when it would not fit
    fn next_baseline(&mut self, style: &TextStyle) -> f32 {
        let page_has_lines = self.pages.last().is_some_and(|page| !page.is_empty());
        if self.top - style.leading < self.margin_pt && page_has_lines {
            self.pages.push(Vec::new());
            self.top = self.height_pt - self.margin_pt;
        }
        let baseline = self.top - style.font_size;
        self.top -= style.leading;
        baseline
    }

    fn push(&mut self, text: String, x_pt: f32, baseline_pt: f32, style: TextStyle) {
        if let Some(page) = self.pages.last_mut() {
            page.push(PlacedLine {
                text,
                x_pt,
                baseline_pt,
                style,
            });
        }
    }

    fn place_wrapped<F>(&mut self, text: &str, x_pt: f32, width: f32, style: TextStyle, measure: &F)
    where
        F: Fn(&str, &TextStyle) -> f32,
    {
        for line in wrap_text(text, width, |s| measure(s, &style)) {
            let baseline = self.next_baseline(&style);
            self.push(line, x_pt, baseline, style);
        }
    }
}

/// Greedy line breaking.
///
/// Words break at whitespace; CJK characters may break anywhere. A word
/// wider than the line is split between characters.
pub(crate) fn wrap_text<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for (token, spaced) in tokens(text) {
        let candidate = if current.is_empty() {
            token.to_string()
        } else if spaced {
            format!("{} {}", current, token)
        } else {
            format!("{}{}", current, token)
        };

        if measure(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if measure(token) <= max_width {
            current = token.to_string();
            continue;
        }

        // Split an overlong token, keeping at least one character per line
        for ch in token.chars() {
            current.push(ch);
            if measure(&current) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Breakable units of `text`, each with whether whitespace preceded it
fn tokens(text: &str) -> Vec<(&str, bool)> {
    let mut out = Vec::new();
    let mut spaced = false;
    let mut start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        let cjk = is_cjk(ch);
        if ch.is_whitespace() || cjk {
            if let Some(s) = start.take() {
                out.push((&text[s..i], spaced));
                spaced = false;
            }
            if cjk {
                out.push((&text[i..i + ch.len_utf8()], spaced));
                spaced = false;
            } else {
                spaced = true;
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push((&text[s..], spaced));
    }
    out
}

fn is_cjk(ch: char) -> bool {
    matches!(ch as u32,
        0x3000..=0x30FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xAC00..=0xD7AF
        | 0xF900..=0xFAFF
        | 0xFF00..=0xFFEF
        | 0x20000..=0x2FA1F)
}
