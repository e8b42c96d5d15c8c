//! Markup parsing
//!
//! Supported subset, line oriented:
//! - `#`, `##`, `###` headings (deeper levels use level 3 styling)
//! - `- item` / `* item` bullet lines, indented two columns per nesting level
//! - anything else is paragraph text; consecutive lines join into one
//!   paragraph and a blank line ends it
//!
//! Parsing never fails. Text that does not fit the grammar becomes a
//! paragraph.

/// One rendered block, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    BulletList { items: Vec<BulletItem> },
    Paragraph { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletItem {
    /// Nesting depth, 0 for top-level bullets
    pub depth: usize,
    pub text: String,
}

/// Parse markup text into blocks
pub fn parse_markup(source: &str) -> Vec<Block> {
    let mut parser = Parser::default();
    for line in source.lines() {
        parser.line(line);
    }
    parser.finish()
}

#[derive(Default)]
struct Parser {
    blocks: Vec<Block>,
    paragraph: Vec<String>,
    bullets: Vec<BulletItem>,
}

impl Parser {
    fn line(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            self.flush();
            return;
        }

        if line.starts_with('#') {
            self.flush();
            let hashes = line.chars().take_while(|&c| c == '#').count();
            let text = line[hashes..].trim();
            if !text.is_empty() {
                self.blocks.push(Block::Heading {
                    level: hashes.min(3) as u8,
                    text: text.to_string(),
                });
            }
            return;
        }

        if let Some(text) = bullet_text(line) {
            self.flush_paragraph();
            if !text.is_empty() {
                self.bullets.push(BulletItem {
                    depth: indent_width(raw) / 2,
                    text: text.to_string(),
                });
            }
            return;
        }

        self.flush_bullets();
        self.paragraph.push(line.to_string());
    }

    fn flush(&mut self) {
        self.flush_paragraph();
        self.flush_bullets();
    }

    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let text = self.paragraph.join(" ");
            self.paragraph.clear();
            self.blocks.push(Block::Paragraph { text });
        }
    }

    fn flush_bullets(&mut self) {
        if !self.bullets.is_empty() {
            let items = std::mem::take(&mut self.bullets);
            self.blocks.push(Block::BulletList { items });
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

fn bullet_text(line: &str) -> Option<&str> {
    if line == "-" || line == "*" {
        return Some("");
    }
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}

/// Leading whitespace in columns; a tab counts as four
fn indent_width(raw: &str) -> usize {
    raw.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}
