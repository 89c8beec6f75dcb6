//! Syntax highlighting into classed HTML.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::debug;

use osf_entity::file::split_extension;

/// Highlighter backed by the bundled syntax definitions.
///
/// Loading the syntax set is expensive; build one and share it.
#[derive(Debug)]
pub struct Highlighter {
    syntaxes: SyntaxSet,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Load the default syntax definitions.
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Find a lexer by extension, then by whole file name, then by the
    /// content's first line.
    fn detect(&self, file_name: &str, contents: &str) -> Option<&SyntaxReference> {
        let (_, ext) = split_extension(file_name);
        let ext = ext.trim_start_matches('.');
        let base = file_name.rsplit('/').next().unwrap_or(file_name);

        (!ext.is_empty())
            .then(|| self.syntaxes.find_syntax_by_extension(ext))
            .flatten()
            .or_else(|| self.syntaxes.find_syntax_by_extension(base))
            .or_else(|| {
                contents
                    .lines()
                    .next()
                    .and_then(|line| self.syntaxes.find_syntax_by_first_line(line))
            })
    }

    /// Highlight `contents` as HTML wrapped in `<div class="highlight"><pre>`.
    ///
    /// Returns `None` when no lexer matches the file; callers fall back to a
    /// placeholder.
    pub fn highlight(&self, file_name: &str, contents: &str) -> Option<String> {
        let syntax = self.detect(file_name, contents)?;
        debug!(file = file_name, lexer = %syntax.name, "Highlighting");

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);
        for line in LinesWithEndings::from(contents) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .ok()?;
        }
        Some(format!(
            "<div class=\"highlight\"><pre>{}</pre></div>",
            generator.finalize()
        ))
    }
}
