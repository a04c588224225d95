//! Self-contained HTML page with a canvas point-cloud viewer.

use std::io::Write;

use anyhow::{Context, Ok, Result};
use serde::Serialize;

use crate::io::svg::escape_xml;

/// Element id of the embedded JSON payload.
pub(crate) const PAYLOAD_ID: &str = "quake-data";

/// Serialize `payload` for embedding in a `<script>` element.
/// `</` is escaped so that string values cannot close the element early.
pub(crate) fn script_json<T: Serialize>(payload: &T) -> Result<String> {
    let json = serde_json::to_string(payload)
        .context("[io::html] failed to serialize viewer payload")?;
    Ok(json.replace("</", "<\\/"))
}

/// Write a complete HTML document embedding `payload` and the viewer script.
pub(crate) fn write_viewer_html<W: Write, T: Serialize>(
    writer: &mut W,
    title: &str,
    width: u32,
    height: u32,
    payload: &T,
) -> Result<()> {
    let json = script_json(payload)?;
    let title = escape_xml(title);

    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, r#"<html lang="en">"#)?;
    writeln!(writer, "<head>")?;
    writeln!(writer, r#"<meta charset="utf-8">"#)?;
    writeln!(writer, "<title>{title}</title>")?;
    writeln!(writer, "<style>{VIEWER_CSS}</style>")?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;
    writeln!(writer, r#"<h1>{title}</h1>"#)?;
    writeln!(writer, r#"<div id="stage"><canvas id="view" width="{width}" height="{height}"></canvas><div id="legend"></div></div>"#)?;
    writeln!(writer, r#"<div id="tooltip"></div>"#)?;
    writeln!(writer, r#"<script type="application/json" id="{PAYLOAD_ID}">{json}</script>"#)?;
    writeln!(writer, "<script>{VIEWER_JS}</script>")?;
    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;
    Ok(())
}

const VIEWER_CSS: &str = r##"
body { font-family: "DejaVu Sans", Helvetica, Arial, sans-serif; margin: 16px; color: #111827; }
h1 { font-size: 18px; font-weight: normal; margin: 0 0 8px 0; }
#stage { display: flex; align-items: flex-start; gap: 12px; }
#view { border: 1px solid #e5e7eb; cursor: grab; }
#legend { font-size: 12px; }
#legend div { display: flex; align-items: center; gap: 6px; margin: 2px 0; }
#legend span.swatch { display: inline-block; width: 10px; height: 10px; border-radius: 5px; }
#tooltip { position: absolute; display: none; pointer-events: none; background: rgba(255,255,255,0.95);
  border: 1px solid #9ca3af; padding: 4px 6px; font-size: 12px; white-space: pre; }
"##;

const VIEWER_JS: &str = r##"
(function () {
  const data = JSON.parse(document.getElementById("quake-data").textContent);
  const canvas = document.getElementById("view");
  const ctx = canvas.getContext("2d");
  const tooltip = document.getElementById("tooltip");

  // Data aspect: one shared scale for all axes, centered on the data box.
  const lo = [Infinity, Infinity, Infinity], hi = [-Infinity, -Infinity, -Infinity];
  for (const p of data.points) {
    const v = [p.x, p.y, p.z];
    for (let k = 0; k < 3; k++) { lo[k] = Math.min(lo[k], v[k]); hi[k] = Math.max(hi[k], v[k]); }
  }
  const mid = lo.map((l, k) => (l + hi[k]) / 2);
  const span = Math.max(hi[0] - lo[0], hi[1] - lo[1], hi[2] - lo[2]) || 1;
  const unit = v => [(v[0] - mid[0]) / span, (v[1] - mid[1]) / span, (v[2] - mid[2]) / span];
  const cloud = data.points.map(p => unit([p.x, p.y, p.z]));

  let azimuth = -60 * Math.PI / 180, elevation = 30 * Math.PI / 180, zoom = 1;

  function basis() {
    const ca = Math.cos(azimuth), sa = Math.sin(azimuth), ce = Math.cos(elevation), se = Math.sin(elevation);
    return { right: [-sa, ca, 0], up: [-se * ca, -se * sa, ce], eye: [ce * ca, ce * sa, se] };
  }
  const dot = (a, b) => a[0] * b[0] + a[1] * b[1] + a[2] * b[2];

  let screen = [];
  function draw() {
    const b = basis();
    const scale = 0.8 * Math.min(canvas.width, canvas.height) * zoom;
    const cx = canvas.width / 2, cy = canvas.height / 2;
    const project = v => [cx + dot(v, b.right) * scale, cy - dot(v, b.up) * scale];

    ctx.clearRect(0, 0, canvas.width, canvas.height);

    // Data box with axis titles.
    const box = [0, 1].flatMap(i => [0, 1].flatMap(j => [0, 1].map(k => unit([[lo[0], hi[0]][i], [lo[1], hi[1]][j], [lo[2], hi[2]][k]]))));
    ctx.strokeStyle = "#9ca3af"; ctx.lineWidth = 0.6;
    for (let i = 0; i < 8; i++) for (const bit of [1, 2, 4]) if ((i & bit) === 0) {
      const [x1, y1] = project(box[i]), [x2, y2] = project(box[i | bit]);
      ctx.beginPath(); ctx.moveTo(x1, y1); ctx.lineTo(x2, y2); ctx.stroke();
    }
    ctx.fillStyle = "#111827"; ctx.font = "12px sans-serif"; ctx.textAlign = "center";
    const label = (v, text) => { const [x, y] = project(unit(v)); ctx.fillText(text, x, y); };
    label([mid[0], lo[1], lo[2]], data.axes[0]);
    label([hi[0], mid[1], lo[2]], data.axes[1]);
    label([lo[0], lo[1], mid[2]], data.axes[2]);

    // Points back to front.
    screen = cloud.map((v, i) => { const [x, y] = project(v); return { i, x, y, depth: dot(v, b.eye) }; });
    screen.sort((a, b) => a.depth - b.depth);
    for (const s of screen) {
      const p = data.points[s.i];
      ctx.beginPath();
      ctx.arc(s.x, s.y, p.size / 2, 0, 2 * Math.PI);
      ctx.fillStyle = data.colors[p.cluster];
      ctx.globalAlpha = 0.8;
      ctx.fill();
      ctx.globalAlpha = 1;
    }
  }

  let drag = null;
  canvas.addEventListener("mousedown", e => { drag = [e.clientX, e.clientY]; canvas.style.cursor = "grabbing"; });
  window.addEventListener("mouseup", () => { drag = null; canvas.style.cursor = "grab"; });
  window.addEventListener("mousemove", e => {
    if (drag) {
      azimuth -= (e.clientX - drag[0]) * 0.01;
      elevation = Math.max(-Math.PI / 2, Math.min(Math.PI / 2, elevation + (e.clientY - drag[1]) * 0.01));
      drag = [e.clientX, e.clientY];
      draw();
    }
    hover(e);
  });
  canvas.addEventListener("wheel", e => {
    e.preventDefault();
    zoom = Math.max(0.1, Math.min(20, zoom * Math.exp(-e.deltaY * 0.001)));
    draw();
  }, { passive: false });

  function hover(e) {
    const r = canvas.getBoundingClientRect();
    const mx = e.clientX - r.left, my = e.clientY - r.top;
    let hit = null;
    for (let n = screen.length - 1; n >= 0; n--) {
      const s = screen[n], radius = Math.max(data.points[s.i].size / 2, 3);
      if ((s.x - mx) ** 2 + (s.y - my) ** 2 <= radius * radius) { hit = s; break; }
    }
    if (!hit || drag) { tooltip.style.display = "none"; return; }
    const p = data.points[hit.i];
    tooltip.textContent = `${p.id}\n${p.place}\n${data.cluster_column}: ${data.clusters[p.cluster]}`;
    tooltip.style.left = (e.pageX + 12) + "px";
    tooltip.style.top = (e.pageY + 12) + "px";
    tooltip.style.display = "block";
  }

  const legend = document.getElementById("legend");
  const heading = document.createElement("strong");
  heading.textContent = data.cluster_column;
  legend.appendChild(heading);
  data.clusters.forEach((name, code) => {
    const row = document.createElement("div");
    const swatch = document.createElement("span");
    swatch.className = "swatch";
    swatch.style.background = data.colors[code];
    row.appendChild(swatch);
    row.appendChild(document.createTextNode(name));
    legend.appendChild(row);
  });

  draw();
})();
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Note<'a> { text: &'a str }

    #[test]
    fn script_json_cannot_close_the_element() {
        let json = script_json(&Note { text: "</script><b>" }).unwrap();
        assert!(!json.contains("</"));
        let back: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back["text"], "</script><b>");
    }

    #[test]
    fn document_embeds_payload_once() {
        let mut out = Vec::new();
        write_viewer_html(&mut out, "Quakes & Faults", 800, 600, &Note { text: "hello" }).unwrap();
        let html = String::from_utf8(out).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Quakes &amp; Faults</title>"));
        assert_eq!(html.matches(r#"id="quake-data""#).count(), 1);
        assert!(html.contains(r#"{"text":"hello"}"#));
    }
}
