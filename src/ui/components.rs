//! Reusable UI components
//!
//! Release notes arrive as HTML; egui has no HTML widget, so they are
//! flattened into a handful of block kinds and drawn as labels.

use crate::theme;
use eframe::egui;

/// One renderable piece of the release notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteBlock {
    Heading(u8, String),
    Bullet(String),
    Paragraph(String),
}

/// Convert changelog HTML into blocks.
pub fn parse_release_notes(html: &str) -> Vec<NoteBlock> {
    let mut blocks = Vec::new();
    let mut text = String::new();
    let mut current: Option<u8> = None; // heading level being collected
    let mut in_item = false;
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            text.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let tag = rest[start + 1..start + end].trim().to_ascii_lowercase();
        rest = &rest[start + end + 1..];

        let closing = tag.starts_with('/');
        let name: String = tag
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();

        match name.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                flush(&mut blocks, &mut text, current, in_item);
                in_item = false;
                current = if closing {
                    None
                } else {
                    name[1..].parse().ok()
                };
            }
            "li" => {
                flush(&mut blocks, &mut text, current, in_item);
                in_item = !closing;
            }
            "p" | "div" | "ul" | "ol" | "br" | "tr" => {
                flush(&mut blocks, &mut text, current, in_item);
            }
            "style" | "script" if !closing => {
                // Drop the element body entirely
                let close = format!("</{}", name);
                rest = match rest.to_ascii_lowercase().find(&close) {
                    Some(i) => &rest[i..],
                    None => "",
                };
            }
            _ => {}
        }
    }
    text.push_str(rest);
    flush(&mut blocks, &mut text, current, in_item);
    blocks
}

fn flush(blocks: &mut Vec<NoteBlock>, text: &mut String, heading: Option<u8>, in_item: bool) {
    let collapsed = decode_entities(&text.split_whitespace().collect::<Vec<_>>().join(" "));
    text.clear();
    let collapsed = collapsed.trim().to_string();
    if collapsed.is_empty() {
        return;
    }
    blocks.push(match (heading, in_item) {
        (Some(level), _) => NoteBlock::Heading(level, collapsed),
        (None, true) => NoteBlock::Bullet(collapsed),
        (None, false) => NoteBlock::Paragraph(collapsed),
    });
}

/// Decode the named entities changelogs actually use plus numeric references.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').filter(|&semi| semi <= 10).and_then(|semi| {
            let entity = &tail[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" | "#39" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Draw parsed release notes inside the current layout.
pub fn render_release_notes(ui: &mut egui::Ui, blocks: &[NoteBlock]) {
    for block in blocks {
        match block {
            NoteBlock::Heading(level, text) => {
                ui.add_space(theme::SPACING_MD);
                let size = if *level <= 1 { theme::FONT_HEADING } else { theme::FONT_BODY };
                ui.label(egui::RichText::new(text).strong().size(size));
            }
            NoteBlock::Bullet(text) => {
                ui.add(egui::Label::new(format!("  •  {}", text)).wrap());
            }
            NoteBlock::Paragraph(text) => {
                ui.add(egui::Label::new(egui::RichText::new(text).color(theme::TEXT_SECONDARY)).wrap());
            }
        }
    }
}

/// Format bytes into human-readable string (B, KB, MB)
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_items_and_paragraphs() {
        let html = "<h2>2.3.0</h2><ul><li>Faster &amp; leaner sync</li>\n<li>New <b>tags</b> panel</li></ul><p>Thanks!</p>";
        assert_eq!(
            parse_release_notes(html),
            vec![
                NoteBlock::Heading(2, "2.3.0".into()),
                NoteBlock::Bullet("Faster & leaner sync".into()),
                NoteBlock::Bullet("New tags panel".into()),
                NoteBlock::Paragraph("Thanks!".into()),
            ]
        );
    }

    #[test]
    fn plain_text_is_one_paragraph() {
        assert_eq!(
            parse_release_notes("just   some\ntext"),
            vec![NoteBlock::Paragraph("just some text".into())]
        );
    }

    #[test]
    fn style_bodies_are_dropped() {
        let html = "<html><head><style>p { color: red; }</style></head><body><p>Body</p></body></html>";
        assert_eq!(parse_release_notes(html), vec![NoteBlock::Paragraph("Body".into())]);
    }

    #[test]
    fn entities() {
        assert_eq!(decode_entities("&lt;a&gt; &quot;b&quot; &#39;c&#39;"), "<a> \"b\" 'c'");
        assert_eq!(decode_entities("&#x41;&#66;"), "AB");
        assert_eq!(decode_entities("fish & chips &bogus;"), "fish & chips &bogus;");
    }

    #[test]
    fn byte_formatting() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
