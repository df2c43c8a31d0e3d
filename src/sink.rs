//! Formatted output for test runs.
//!
//! A [`Sink`] collects styled lines while a suite runs and renders them to
//! one of three presentations: plain text, a static HTML page, or ANSI
//! colored terminal text. The styling decisions live on [`Style`] so every
//! presentation reads from the same table.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use termcolor::{Ansi, Color, ColorSpec, NoColor, WriteColor};

/// Default file name for the plain-text artifact of a run.
pub const DEFAULT_ARTIFACT: &str = "test_results.txt";

const HTML_TITLE: &str = "Test Results";

// ============================================================================
// STYLES
// ============================================================================

/// Visual style of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    #[default]
    Plain,
    Success,
    Warning,
    Error,
}

impl Style {
    /// Maps an external style name to a style. Unrecognized names are plain.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" | "green" => Style::Success,
            "warning" | "orange" | "yellow" => Style::Warning,
            "error" | "red" => Style::Error,
            _ => Style::Plain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Plain => "plain",
            Style::Success => "success",
            Style::Warning => "warning",
            Style::Error => "error",
        }
    }

    /// Terminal color for this style, `None` for plain.
    pub fn color_spec(&self) -> Option<ColorSpec> {
        let color = match self {
            Style::Plain => return None,
            Style::Success => Color::Green,
            Style::Warning => Color::Yellow,
            Style::Error => Color::Red,
        };
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color)).set_intense(true);
        Some(spec)
    }

    /// CSS color for this style, `None` for plain.
    pub fn html_color(&self) -> Option<&'static str> {
        match self {
            Style::Plain => None,
            Style::Success => Some("green"),
            Style::Warning => Some("orange"),
            Style::Error => Some("red"),
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of sink output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    text: String,
    style: Style,
}

impl StyledLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

// ============================================================================
// SINK
// ============================================================================

/// Append-only collection of styled lines.
#[derive(Debug, Clone)]
pub struct Sink {
    lines: Vec<StyledLine>,
    artifact_path: PathBuf,
}

impl Sink {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT),
        }
    }

    /// Creates a sink whose text artifact goes to `path` instead of
    /// [`DEFAULT_ARTIFACT`].
    pub fn with_artifact_path(path: impl Into<PathBuf>) -> Self {
        Self {
            lines: Vec::new(),
            artifact_path: path.into(),
        }
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn write(&mut self, text: impl Into<String>, style: Style) {
        self.lines.push(StyledLine {
            text: text.into(),
            style,
        });
    }

    /// Appends a line styled by name; see [`Style::from_name`].
    pub fn write_named(&mut self, text: impl Into<String>, style: &str) {
        self.write(text, Style::from_name(style));
    }

    pub fn plain(&mut self, text: impl Into<String>) {
        self.write(text, Style::Plain);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.write(text, Style::Success);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.write(text, Style::Warning);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.write(text, Style::Error);
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }

    pub fn render_html(&self) -> String {
        let mut body = String::new();
        for line in &self.lines {
            let text = escape_html(&line.text);
            // Writing into a String cannot fail.
            let _ = match line.style.html_color() {
                Some(color) => writeln!(
                    body,
                    "        <p style='color: {};'>{}</p>",
                    color, text
                ),
                None => writeln!(body, "        <p>{}</p>", text),
            };
        }
        format!(
            "<!DOCTYPE html>\n\
             <html lang='en'>\n\
             <head>\n\
             \x20   <meta charset='UTF-8'>\n\
             \x20   <meta name='viewport' content='width=device-width, initial-scale=1.0'>\n\
             \x20   <title>{title}</title>\n\
             </head>\n\
             <body>\n\
             \x20   <h1>{title}</h1>\n\
             \x20   <div>\n\
             {body}\
             \x20   </div>\n\
             </body>\n\
             </html>\n",
            title = HTML_TITLE,
            body = body,
        )
    }

    /// Renders the lines with ANSI color sequences.
    pub fn render_terminal(&self) -> String {
        let mut ansi = Ansi::new(Vec::new());
        // Vec<u8> never reports a write error.
        let _ = self.write_colored(&mut ansi);
        String::from_utf8_lossy(&ansi.into_inner()).into_owned()
    }

    /// Writes every line to `out`, setting and resetting colors around
    /// styled lines. Writers without color support just receive the text.
    pub fn write_colored<W: WriteColor>(&self, out: &mut W) -> io::Result<()> {
        for line in &self.lines {
            match line.style.color_spec() {
                Some(spec) => {
                    out.set_color(&spec)?;
                    out.write_all(line.text.as_bytes())?;
                    out.reset()?;
                }
                None => out.write_all(line.text.as_bytes())?,
            }
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Writes the lines to a terminal stream, with ANSI colors when `color`
    /// is set and as plain text otherwise.
    pub fn write_terminal<W: io::Write>(&self, out: W, color: bool) -> io::Result<()> {
        if color {
            let mut ansi = Ansi::new(out);
            self.write_colored(&mut ansi)?;
            ansi.flush()
        } else {
            let mut plain = NoColor::new(out);
            self.write_colored(&mut plain)?;
            plain.flush()
        }
    }

    /// Prints the accumulated lines to stdout.
    pub fn print_terminal(&self, color: bool) -> io::Result<()> {
        self.write_terminal(io::stdout(), color)
    }

    pub fn save_text(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.render_text())
    }

    pub fn save_html(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.render_html())
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// MARKER HELPERS: one-off colored messages outside a sink
// ============================================================================

/// Colors `text` exactly as a sink line of the same style is colored.
fn paint(style: Style, text: &str) -> String {
    fn write_painted<W: WriteColor>(out: &mut W, style: Style, text: &str) -> io::Result<()> {
        match style.color_spec() {
            Some(spec) => {
                out.set_color(&spec)?;
                out.write_all(text.as_bytes())?;
                out.reset()
            }
            None => out.write_all(text.as_bytes()),
        }
    }

    let mut ansi = Ansi::new(Vec::new());
    // Vec<u8> never reports a write error.
    let _ = write_painted(&mut ansi, style, text);
    String::from_utf8_lossy(&ansi.into_inner()).into_owned()
}

/// `[+] msg` in the success color.
pub fn okay(msg: &str) -> String {
    paint(Style::Success, &format!("[+] {}", msg))
}

/// `[~] msg` in the warning color.
pub fn note(msg: &str) -> String {
    paint(Style::Warning, &format!("[~] {}", msg))
}

/// `[-] msg` in the error color.
pub fn fail(msg: &str) -> String {
    paint(Style::Error, &format!("[-] {}", msg))
}
