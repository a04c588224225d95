use std::io::Write;

use anyhow::{Ok, Result};

use crate::catalog::ClusterLabels;

use super::{VIRIDIS, escape_xml, format_tick, nice_ticks, tick_step, viridis};

/// Horizontal space reserved on the right of a plot for its legend.
pub(crate) const LEGEND_WIDTH: f64 = 110.0;

/// Fill color of every row, from the viridis ramp over normalized cluster positions.
pub(crate) fn point_colors(labels: &ClusterLabels) -> Vec<String> {
    let palette = (0..labels.num_clusters() as u32)
        .map(|code| viridis(labels.normalized(code)).hex())
        .collect::<Vec<_>>();

    labels.codes().iter()
        .map(|&code| palette[code as usize].clone())
        .collect()
}

/// Colorbar for numeric labels, discrete swatches otherwise.
pub(crate) fn write_legend(
    writer: &mut impl Write,
    labels: &ClusterLabels,
    title: &str,
    x: f64,
    top: f64,
    height: f64,
) -> Result<()> {
    if labels.is_numeric() && labels.num_clusters() > 1 {
        write_colorbar(writer, labels.position_range(), title, x, top, height)
    } else {
        write_swatches(writer, labels, title, x, top)
    }
}

/// Vertical viridis bar with ticks over [lo, hi], low values at the bottom.
pub(crate) fn write_colorbar(
    writer: &mut impl Write,
    (lo, hi): (f64, f64),
    title: &str,
    x: f64,
    top: f64,
    height: f64,
) -> Result<()> {
    const BAR_WIDTH: f64 = 16.0;

    writeln!(writer, r#"<defs><linearGradient id="viridis" x1="0" y1="1" x2="0" y2="0">"#)?;
    for (i, color) in VIRIDIS.iter().enumerate() {
        let offset = i as f64 / (VIRIDIS.len() - 1) as f64;
        writeln!(writer, r#"<stop offset="{offset:.3}" stop-color="{}"/>"#, color.hex())?;
    }
    writeln!(writer, "</linearGradient></defs>")?;
    writeln!(writer, r##"<rect class="colorbar" x="{x:.3}" y="{top:.3}" width="{BAR_WIDTH}" height="{height:.3}" fill="url(#viridis)" stroke="#111827" stroke-width="0.6"/>"##)?;

    let ticks = nice_ticks(lo, hi, 6);
    let step = tick_step(&ticks);
    let span = if hi > lo { hi - lo } else { 1.0 };
    for &t in &ticks {
        let y = top + height - (t - lo) / span * height;
        writeln!(writer, r#"<line class="grid" x1="{:.3}" y1="{y:.3}" x2="{:.3}" y2="{y:.3}"/>"#, x + BAR_WIDTH, x + BAR_WIDTH + 4.0)?;
        writeln!(writer, r#"<text class="tick" x="{:.3}" y="{:.3}">{}</text>"#, x + BAR_WIDTH + 6.0, y + 3.5, format_tick(t, step))?;
    }

    let (lx, ly) = (x + BAR_WIDTH + 52.0, top + height / 2.0);
    writeln!(writer, r#"<text x="{lx:.3}" y="{ly:.3}" text-anchor="middle" transform="rotate(-90 {lx:.3} {ly:.3})">{}</text>"#,
        escape_xml(title))?;

    Ok(())
}

/// One colored swatch and label per cluster, in code order.
fn write_swatches(writer: &mut impl Write, labels: &ClusterLabels, title: &str, x: f64, top: f64) -> Result<()> {
    writeln!(writer, r#"<text x="{x:.3}" y="{top:.3}">{}</text>"#, escape_xml(title))?;
    for (code, name) in labels.names().iter().enumerate() {
        let y = top + 12.0 + code as f64 * 18.0;
        let color = viridis(labels.normalized(code as u32)).hex();
        writeln!(writer, r#"<circle class="swatch" cx="{:.3}" cy="{:.3}" r="5" fill="{color}"/>"#, x + 5.0, y + 5.0)?;
        writeln!(writer, r#"<text class="tick" x="{:.3}" y="{:.3}">{}</text>"#, x + 16.0, y + 8.5, escape_xml(name))?;
    }
    Ok(())
}
