use std::path::Path;

use sponge_common::Result;
use tracing::info;

/// A rendered SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    width: u32,
    height: u32,
    svg: String,
}

impl Figure {
    /// Wrap `body` (SVG elements) in a document of the given size on a white background.
    pub(crate) fn new(width: u32, height: u32, body: &str) -> Self {
        let svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">
<rect width="{w}" height="{h}" fill="white"/>
{body}</svg>
"##,
            w = width,
            h = height,
            body = body
        );
        Self { width, height, svg }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_svg(&self) -> &str {
        &self.svg
    }

    pub fn into_svg(self) -> String {
        self.svg
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.svg)?;
        info!("Wrote figure to {:?}", path.as_ref());
        Ok(())
    }
}

/// Escape text for SVG content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Title centered at the top.
pub(crate) fn title(text: &str, width: u32) -> String {
    format!(
        r##"<text x="{:.1}" y="24" font-size="16" text-anchor="middle">{}</text>
"##,
        width as f64 / 2.0,
        escape(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("BRCA <Her2> & \"LumA\""), "BRCA &lt;Her2&gt; &amp; &quot;LumA&quot;");
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let figure = Figure::new(100, 50, &title("Heatmap", 100));
        figure.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, figure.as_svg());
        assert!(written.starts_with("<svg"));
        assert!(written.contains(">Heatmap</text>"));
    }
}
