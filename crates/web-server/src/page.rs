//! Server-side rendering of the dashboard page.
//!
//! Header cards and the trades table are plain HTML. Charts are drawn in the
//! browser by Plotly from the derived state, which is embedded in the page as
//! JSON, so the page is a pure function of one load/derive pass.

use crate::theme::Theme;
use analytics::view::{self, DISCLAIMER, NO_DATA_MESSAGE};
use analytics::{Dashboard, DashboardData, FrequencyCount};
use std::fmt::Write;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Renders the full HTML document for one dashboard state.
pub fn render_page(
    title: &str,
    dashboard: &Dashboard,
    theme: &Theme,
) -> Result<String, serde_json::Error> {
    let mut body = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(body, "<h1>{}</h1>", escape_html(title));

    match dashboard {
        Dashboard::NoData => {
            let _ = writeln!(body, r#"<div class="info">{NO_DATA_MESSAGE}</div>"#);
        }
        Dashboard::Ready(data) => {
            render_header(&mut body, data);
            body.push_str("<hr>\n");
            render_charts(&mut body, data);
            body.push_str("<hr>\n");
            render_trades(&mut body, data);
            let _ = writeln!(body, r#"<div class="disclaimer">{DISCLAIMER}</div>"#);
        }
    }

    let initial_label = dashboard
        .data()
        .map(|d| view::initial_capital_label(d.header.initial_capital));

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Evolutis - Live Trading</title>
<style>
:root {{ {css_vars} }}
{STYLESHEET}
</style>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<main>
{body}</main>
<script>
const DASHBOARD = {dashboard_json};
const THEME = {theme_json};
const INITIAL_LABEL = {label_json};
{CHART_SCRIPT}
</script>
</body>
</html>
"#,
        css_vars = theme.css_variables(),
        dashboard_json = script_json(dashboard)?,
        theme_json = script_json(theme)?,
        label_json = script_json(&initial_label)?,
    ))
}

fn render_header(out: &mut String, data: &DashboardData) {
    if let Some(session) = &data.session {
        let _ = writeln!(
            out,
            r#"<p class="caption">{}</p>"#,
            escape_html(&view::session_caption(session))
        );
    }

    out.push_str("<section class=\"metrics\">\n");
    for card in view::header_cards(&data.header, data.trades.logged) {
        let trend = match card.trend {
            view::Trend::Up => "up",
            view::Trend::Down => "down",
        };
        let _ = writeln!(
            out,
            r#"<div class="metric"><label>{}</label><div class="value">{}</div><div class="delta {trend}">{}</div></div>"#,
            escape_html(card.label),
            escape_html(&card.value),
            escape_html(&card.delta),
        );
    }
    out.push_str("</section>\n");
}

fn render_charts(out: &mut String, data: &DashboardData) {
    if data.series.is_empty() {
        return;
    }

    out.push_str(
        r#"<h3>Portfolio Performance</h3>
<div id="portfolio-chart" class="chart"></div>
<div class="columns even">
<div><h3>Returns (%)</h3><div id="returns-chart" class="chart"></div></div>
<div><h3>Alpha vs Buy &amp; Hold (%)</h3><div id="alpha-chart" class="chart"></div></div>
</div>
"#,
    );
}

fn render_trades(out: &mut String, data: &DashboardData) {
    let trades = &data.trades;
    if trades.logged == 0 {
        return;
    }

    out.push_str("<div class=\"columns trades\">\n<div>\n<h3>Recent Trades</h3>\n");
    out.push_str("<div class=\"table-wrap\"><table>\n<thead><tr>");
    for column in &trades.columns {
        let _ = write!(out, "<th>{}</th>", column.as_str());
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for trade in &trades.recent {
        out.push_str("<tr>");
        for column in &trades.columns {
            let _ = write!(out, "<td>{}</td>", escape_html(&view::trade_cell(trade, *column)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table></div>\n</div>\n");

    out.push_str("<div>\n<h3>Trade Distribution</h3>\n");
    if has_counts(&trades.by_symbol) {
        out.push_str("<div id=\"symbol-chart\" class=\"chart small\"></div>\n");
    }
    if has_counts(&trades.by_side) {
        out.push_str("<div id=\"side-chart\" class=\"chart small\"></div>\n");
    }
    out.push_str("</div>\n</div>\n");
}

fn has_counts(counts: &Option<Vec<FrequencyCount>>) -> bool {
    counts.as_ref().is_some_and(|c| !c.is_empty())
}

/// Serializes a value for inline `<script>` use. `</` is escaped so data can
/// never close the script element.
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const STYLESHEET: &str = r#"
body { margin: 0; background: var(--bg); color: var(--text); font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; }
main { max-width: 1400px; margin: 0 auto; padding: 24px; }
h1, h2, h3 { color: var(--text); }
hr { border: none; border-top: 1px solid var(--border); margin: 24px 0; }
.caption { color: var(--muted); font-size: 0.9em; }
.info { background: rgba(88, 166, 255, 0.1); border: 1px solid var(--accent); border-radius: 8px; padding: 16px; color: var(--accent); }
.metrics { display: grid; grid-template-columns: repeat(5, 1fr); gap: 12px; }
.metric { background: var(--card); border: 1px solid var(--border); border-radius: 8px; padding: 12px; }
.metric label { color: var(--muted); font-size: 0.85em; }
.metric .value { font-size: 1.8em; margin: 4px 0; }
.metric .delta { font-size: 0.9em; }
.metric .delta.up { color: var(--green); }
.metric .delta.down { color: var(--red); }
.columns { display: grid; gap: 24px; }
.columns.even { grid-template-columns: 1fr 1fr; }
.columns.trades { grid-template-columns: 2fr 1fr; }
.chart { width: 100%; }
.table-wrap { max-height: 400px; overflow-y: auto; border: 1px solid var(--border); border-radius: 8px; }
table { width: 100%; border-collapse: collapse; font-size: 0.9em; }
th, td { padding: 6px 10px; text-align: left; border-bottom: 1px solid var(--border); white-space: nowrap; }
th { background: var(--card); color: var(--muted); position: sticky; top: 0; }
.disclaimer { background: var(--card); border: 1px solid var(--border); border-radius: 8px; padding: 16px; color: var(--muted); font-size: 0.85em; text-align: center; margin-top: 2em; }
"#;

const CHART_SCRIPT: &str = r#"
(function () {
  if (DASHBOARD.status !== "ready" || typeof Plotly === "undefined") { return; }
  const data = DASHBOARD.data;
  const num = (v) => (v === null || v === undefined ? null : Number(v));
  const grid = { gridcolor: THEME.border };
  const legend = { orientation: "h", yanchor: "bottom", y: 1.02, xanchor: "right", x: 1 };
  const options = { responsive: true, displaylogo: false };
  const base = (height, margin) => ({
    plot_bgcolor: THEME.bg, paper_bgcolor: THEME.bg, font: { color: THEME.text },
    height: height, margin: margin, xaxis: Object.assign({}, grid), yaxis: Object.assign({}, grid),
  });
  const hline = (y) => ({ type: "line", xref: "paper", x0: 0, x1: 1, y0: y, y1: y, line: { dash: "dot", color: THEME.muted } });

  const points = data.series.points;
  if (points.length > 0) {
    const x = points.map((p, i) => (data.series.timed ? p.timestamp : i));
    const initial = num(data.header.initial_capital);

    const traces = [{
      x: x, y: points.map((p) => num(p.portfolio_value)), name: "Evolutis Agent", type: "scatter", mode: "lines",
      line: { color: THEME.cyan, width: 2 }, fill: "tozeroy", fillcolor: "rgba(6, 182, 212, 0.08)",
    }];
    if (data.series.has_buyhold) {
      traces.push({
        x: x, y: points.map((p) => num(p.buyhold_value)), name: "Buy & Hold", type: "scatter", mode: "lines",
        line: { color: THEME.gold, width: 2, dash: "dash" },
      });
    }
    const layout = base(450, { l: 60, r: 20, t: 40, b: 60 });
    layout.xaxis.title = { text: "Time" };
    layout.yaxis.title = { text: "Value (USDT)" };
    layout.hovermode = "x unified";
    layout.legend = legend;
    layout.shapes = [hline(initial)];
    layout.annotations = [{ xref: "paper", x: 1, y: initial, text: INITIAL_LABEL, showarrow: false, xanchor: "right", yanchor: "bottom" }];
    Plotly.newPlot("portfolio-chart", traces, layout, options);

    const returns = base(300, { l: 40, r: 20, t: 10, b: 40 });
    returns.legend = legend;
    returns.shapes = [hline(0)];
    Plotly.newPlot("returns-chart", [
      { x: x, y: points.map((p) => num(p.return_pct)), name: "Agent", type: "scatter", mode: "lines", line: { color: THEME.green, width: 2 } },
      { x: x, y: points.map((p) => num(p.bh_return_pct)), name: "Buy & Hold", type: "scatter", mode: "lines", line: { color: THEME.gold, width: 2, dash: "dash" } },
    ], returns, options);

    const alpha = points.map((p) => num(p.alpha_pct));
    const alphaLayout = base(300, { l: 40, r: 20, t: 10, b: 40 });
    alphaLayout.shapes = [hline(0)];
    Plotly.newPlot("alpha-chart", [{
      x: x, y: alpha, type: "bar",
      marker: { color: alpha.map((v) => (v === null ? THEME.muted : v >= 0 ? THEME.green : THEME.red)) },
    }], alphaLayout, options);
  }

  const pie = (id, counts, colors) => {
    if (!counts || counts.length === 0 || !document.getElementById(id)) { return; }
    const layout = base(200, { l: 0, r: 0, t: 0, b: 0 });
    layout.showlegend = false;
    Plotly.newPlot(id, [{
      type: "pie", labels: counts.map((c) => c.label), values: counts.map((c) => c.count),
      hole: 0.4, textinfo: "label+percent", marker: { colors: colors },
    }], layout, options);
  };
  pie("symbol-chart", data.trades.by_symbol, THEME.symbol_palette);
  pie("side-chart", data.trades.by_side, [THEME.green, THEME.red]);
})();
"#;
