//! Terminal rendering of result tables
//!
//! Tables are drawn through termimad when rich output is enabled and as
//! plain `a | b` lines otherwise.

use std::io::{self, Write};

use reel_core::Row;
use termimad::{crossterm::style::Color, MadSkin};

pub const NO_RESULTS: &str = "No results found.";

/// Width of the plain-text header rule, per column.
const RULE_WIDTH_PER_COLUMN: usize = 15;

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);

        Self { rich_enabled, skin }
    }

    /// Writes `rows` under `headers`, or [`NO_RESULTS`] when there are none.
    pub fn table<W: Write + ?Sized>(
        &self,
        out: &mut W,
        headers: &[&str],
        rows: &[Row],
    ) -> io::Result<()> {
        if rows.is_empty() {
            return writeln!(out, "{NO_RESULTS}");
        }

        if self.rich_enabled {
            let markdown = markdown_table(headers, rows);
            write!(out, "{}", self.skin.text(&markdown, None))
        } else {
            writeln!(out)?;
            writeln!(out, "{}", headers.join(" | "))?;
            writeln!(out, "{}", "-".repeat(headers.len() * RULE_WIDTH_PER_COLUMN))?;
            for row in rows {
                writeln!(out, "{}", join_row(row))?;
            }
            Ok(())
        }
    }

    /// Writes `title` between two rules.
    pub fn banner<W: Write + ?Sized>(&self, out: &mut W, title: &str) -> io::Result<()> {
        let rule = "-".repeat(50);
        if self.rich_enabled {
            write!(out, "{}", self.skin.text(&format!("\n{rule}\n**{title}**\n{rule}"), None))
        } else {
            writeln!(out, "\n{rule}\n{title}\n{rule}")
        }
    }
}

fn join_row(row: &Row) -> String {
    row.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn markdown_table(headers: &[&str], rows: &[Row]) -> String {
    let mut markdown = String::new();
    markdown.push('|');
    for header in headers {
        markdown.push_str(&format!("**{}**|", escape_cell(header)));
    }
    markdown.push_str("\n|");
    markdown.push_str(&":-|".repeat(headers.len()));
    for row in rows {
        markdown.push_str("\n|");
        for value in row {
            markdown.push_str(&escape_cell(&value.to_string()));
            markdown.push('|');
        }
    }
    markdown.push_str("\n|-\n");
    markdown
}

/// Cell text cannot contain the column separator or a line break.
fn escape_cell(text: &str) -> String {
    text.replace('|', "/").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use reel_core::Value;

    use super::*;

    fn render(renderer: &TerminalRenderer, headers: &[&str], rows: &[Row]) -> String {
        let mut out = Vec::new();
        renderer
            .table(&mut out, headers, rows)
            .expect("Render failed");
        String::from_utf8(out).expect("Output should be UTF-8")
    }

    #[test]
    fn test_plain_table() {
        let rows = vec![
            vec![Value::Text("ARK RIDGEMONT".into()), Value::Integer(2006)],
            vec![Value::Text("SILENT SHORE".into()), Value::Null],
        ];

        let out = render(&TerminalRenderer::new(false), &["Title", "Release Year"], &rows);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "Title | Release Year");
        assert_eq!(lines[2], "-".repeat(30));
        assert_eq!(lines[3], "ARK RIDGEMONT | 2006");
        assert_eq!(lines[4], "SILENT SHORE | None");
    }

    #[test]
    fn test_empty_table() {
        let out = render(&TerminalRenderer::new(false), &["Title"], &[]);
        assert_eq!(out, "No results found.\n");

        let out = render(&TerminalRenderer::new(true), &["Title"], &[]);
        assert_eq!(out, "No results found.\n");
    }

    #[test]
    fn test_markdown_table_layout() {
        let rows = vec![vec![Value::Text("A|B".into()), Value::Integer(3)]];

        let markdown = markdown_table(&["Search Term", "Usage Count"], &rows);

        assert_eq!(
            markdown,
            "|**Search Term**|**Usage Count**|\n|:-|:-|\n|A/B|3|\n|-\n"
        );
    }

    #[test]
    fn test_rich_table_contains_values() {
        let rows = vec![vec![Value::Text("ARK RIDGEMONT".into())]];
        let out = render(&TerminalRenderer::new(true), &["Title"], &rows);
        assert!(out.contains("ARK RIDGEMONT"));
    }
}
