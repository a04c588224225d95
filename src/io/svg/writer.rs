//! SVG writing operations.

use std::{borrow::Cow, io::Write};

use anyhow::{Context, Result};

/// String-based SVG writer; views render into memory and the caller decides where the text goes.
pub(crate) struct SvgStringWriter {
    buffer: Vec<u8>
}

impl Write for SvgStringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        std::io::Result::Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { std::io::Result::Ok(()) }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.buffer.extend_from_slice(buf);
        std::io::Result::Ok(())
    }
}

impl SvgStringWriter {
    /// Create a new string-based SVG writer
    pub(crate) fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Get the SVG string
    pub(crate) fn into_string(self) -> Result<String> {
        String::from_utf8(self.buffer)
            .context("[io::svg] SVG output is not valid UTF-8")
    }

    /// Write the SVG header, including the XML declaration and opening <svg> tag.
    pub(crate) fn write_header(&mut self, width: f64, height: f64) -> Result<()> {
        write_svg_header(self, width, height)
    }

    /// Write SVG styles for chart features.
    pub(crate) fn write_styles(&mut self) -> Result<()> {
        write_svg_styles(self)
    }

    /// Write a centered title line at the top of the figure.
    pub(crate) fn write_title(&mut self, width: f64, title: &str) -> Result<()> {
        writeln!(self, r#"<text class="title" x="{:.1}" y="28" text-anchor="middle">{}</text>"#, width / 2.0, escape_xml(title))?;
        Ok(())
    }

    /// Write the closing </svg> tag.
    pub(crate) fn write_footer(&mut self) -> Result<()> {
        write_svg_footer(self)
    }
}

/// Write SVG header to any writer (standalone function).
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"##)?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

/// Write SVG styles to any writer (standalone function).
pub(crate) fn write_svg_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    text {{ font-family: "DejaVu Sans", Helvetica, Arial, sans-serif; font-size: 12px; fill: #111827; }}
    .title {{ font-size: 16px; }}
    .tick {{ font-size: 10px; }}
    .frame {{ fill: none; stroke: #111827; stroke-width: 0.8; }}
    .grid {{ stroke: #111827; stroke-width: 0.8; }}
    .box {{ fill: none; stroke: #9ca3af; stroke-width: 0.6; }}
    .edge {{ stroke: #808080; stroke-opacity: 0.1; stroke-width: 1; }}
    .fault {{ fill: none; stroke: #000000; stroke-opacity: 0.5; stroke-width: 0.8; vector-effect: non-scaling-stroke; }}
    .pt {{ stroke: none; }}
</style>
</defs>"##)?;
    Ok(())
}

/// Write SVG footer to any writer (standalone function).
pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

/// Escape text for use in SVG/HTML content and attribute values.
pub(crate) fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) { return Cow::Borrowed(text) }

    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_leaves_plain_text_borrowed() {
        assert!(matches!(escape_xml("10 km SW of Ridgecrest, CA"), Cow::Borrowed(_)));
    }

    #[test]
    fn escape_replaces_markup_characters() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn document_is_well_formed_text() {
        let mut writer = SvgStringWriter::new();
        writer.write_header(100.0, 50.0).unwrap();
        writer.write_styles().unwrap();
        writer.write_title(100.0, "A < B").unwrap();
        writer.write_footer().unwrap();

        let svg = writer.into_string().unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("A &lt; B"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
