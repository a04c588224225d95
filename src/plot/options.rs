use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::common::{show_document, write_file_atomic};

/// File name the connectivity view persists to.
pub const CONNECTIVITY_FILE: &str = "spatial_graph_connectivity.svg";

/// Where a rendered view goes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Output {
    /// Write to a temporary file and open it in the platform viewer.
    #[default]
    Show,
    /// Write to the given path, replacing any existing file.
    Save(PathBuf),
}

/// Figure size, destination, and log verbosity shared by every view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlotOptions {
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
    /// Outer margin in pixels.
    pub margin: u32,
    pub output: Output,
    /// 0 is silent; 1 logs major steps; 2 adds sizes and counts.
    pub verbose: u8,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self { width: 1000, height: 700, margin: 60, output: Output::Show, verbose: 0 }
    }
}

impl PlotOptions {
    /// Same options, saving to `path` instead of displaying.
    pub fn save_to(self, path: impl Into<PathBuf>) -> Self {
        Self { output: Output::Save(path.into()), ..self }
    }

    /// Same options with the given verbosity.
    pub fn with_verbose(self, verbose: u8) -> Self {
        Self { verbose, ..self }
    }
}

/// Format of a rendered view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Html,
    Svg,
}

impl DocumentKind {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Html => "html",
            DocumentKind::Svg => "svg",
        }
    }
}

/// A rendered view: its format and full text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    kind: DocumentKind,
    body: String,
}

impl Document {
    pub fn new(kind: DocumentKind, body: String) -> Self { Self { kind, body } }

    #[inline] pub fn kind(&self) -> DocumentKind { self.kind }

    #[inline] pub fn body(&self) -> &str { &self.body }

    pub fn into_string(self) -> String { self.body }

    /// Write the document to `path` atomically.
    pub fn save(&self, path: &Path, verbose: u8) -> Result<()> {
        write_file_atomic(path, self.body.as_bytes())?;
        if verbose > 0 { eprintln!("[plot] wrote {}", path.display()); }
        Ok(())
    }

    /// Open the document in the platform viewer.
    pub fn show(&self, verbose: u8) -> Result<()> {
        show_document(&self.body, self.kind.extension(), verbose)
    }

    /// Send the document wherever `options.output` says.
    pub fn emit(&self, options: &PlotOptions) -> Result<()> {
        match &options.output {
            Output::Show => self.show(options.verbose),
            Output::Save(path) => self.save(path, options.verbose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_display_a_1000_by_700_figure() {
        let options = PlotOptions::default();
        assert_eq!((options.width, options.height, options.margin), (1000, 700, 60));
        assert_eq!(options.output, Output::Show);
    }

    #[test]
    fn save_emits_to_the_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.svg");
        let options = PlotOptions::default().save_to(&path);

        Document::new(DocumentKind::Svg, "<svg/>".into()).emit(&options).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
    }
}
