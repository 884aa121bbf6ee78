use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Role of a piece of printed text, mapped to a terminal color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Timestamp,
    Connection,
    Header,
    Body,
    Match,
}

impl Style {
    fn color_spec(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            Style::Plain => {}
            Style::Timestamp => {
                spec.set_fg(Some(Color::White)).set_dimmed(true);
            }
            Style::Connection => {
                spec.set_fg(Some(Color::Cyan));
            }
            Style::Header => {
                spec.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Body => {
                spec.set_fg(Some(Color::Green));
            }
            Style::Match => {
                spec.set_fg(Some(Color::Red)).set_bold(true);
            }
        }
        spec
    }
}

/// Text with a style attached to every byte
#[derive(Debug, Clone, Default)]
pub struct StyledText {
    text: String,
    styles: Vec<Style>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append `s` in the given style
    pub fn append(&mut self, s: &str, style: Style) {
        self.text.push_str(s);
        self.styles.resize(self.text.len(), style);
    }

    /// Append `s` followed by a newline, both in the given style
    pub fn append_line(&mut self, s: &str, style: Style) {
        self.append(s, style);
        self.append("\n", style);
    }

    /// Restyle a byte range; out-of-range parts are ignored
    pub fn set_style(&mut self, offset: usize, length: usize, style: Style) {
        let start = offset.min(self.styles.len());
        let end = offset.saturating_add(length).min(self.styles.len());
        for slot in &mut self.styles[start..end] {
            *slot = style;
        }
    }

    pub fn style_at(&self, offset: usize) -> Option<Style> {
        self.styles.get(offset).copied()
    }

    /// Write the text, switching colors at every style change
    pub fn write_to<W: WriteColor>(&self, out: &mut W) -> io::Result<()> {
        let mut start = 0;
        while start < self.text.len() {
            let style = self.styles[start];
            let mut end = start + 1;
            while end < self.text.len()
                && (self.styles[end] == style || !self.text.is_char_boundary(end))
            {
                end += 1;
            }

            if style == Style::Plain {
                out.reset()?;
            } else {
                out.set_color(&style.color_spec())?;
            }
            out.write_all(self.text[start..end].as_bytes())?;
            start = end;
        }
        out.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::{Ansi, NoColor};

    #[test]
    fn test_styles_follow_appended_text() {
        let mut styled = StyledText::new();
        styled.append("get", Style::Header);
        styled.append_line(" k", Style::Body);

        assert_eq!(styled.text(), "get k\n");
        assert_eq!(styled.style_at(0), Some(Style::Header));
        assert_eq!(styled.style_at(3), Some(Style::Body));
        assert_eq!(styled.style_at(5), Some(Style::Body));
        assert_eq!(styled.style_at(6), None);
    }

    #[test]
    fn test_set_style_clamps_to_text() {
        let mut styled = StyledText::new();
        styled.append("abc", Style::Plain);
        styled.set_style(1, 100, Style::Match);

        assert_eq!(styled.style_at(0), Some(Style::Plain));
        assert_eq!(styled.style_at(2), Some(Style::Match));
    }

    #[test]
    fn test_no_color_sink_gets_plain_text() {
        let mut styled = StyledText::new();
        styled.append("conn", Style::Connection);
        styled.append_line(" hdr", Style::Header);

        let mut out = NoColor::new(Vec::new());
        styled.write_to(&mut out).unwrap();
        assert_eq!(out.into_inner(), b"conn hdr\n");
    }

    #[test]
    fn test_ansi_sink_gets_escape_codes() {
        let mut styled = StyledText::new();
        styled.append("get ", Style::Header);
        styled.append("match", Style::Match);

        let mut out = Ansi::new(Vec::new());
        styled.write_to(&mut out).unwrap();
        let bytes = out.into_inner();
        let rendered = String::from_utf8_lossy(&bytes);

        assert!(rendered.contains('\x1b'));
        assert!(rendered.contains("get "));
        assert!(rendered.contains("match"));
    }
}
