use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sponge_api::EnrichmentPlot;

use crate::figure::Figure;

/// Wrap a decoded GSEA enrichment plot in an SVG at its native size.
pub fn enrichment_figure(plot: &EnrichmentPlot) -> Figure {
    let (width, height) = (plot.width(), plot.height());
    let body = format!(
        r##"<image x="0" y="0" width="{}" height="{}" href="data:image/png;base64,{}"/>
"##,
        width,
        height,
        STANDARD.encode(plot.png_bytes())
    );
    Figure::new(width, height, &body)
}
