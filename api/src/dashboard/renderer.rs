//! HTML renderer
//!
//! Renders a page to a standalone HTML document. Figures are embedded as JSON
//! and drawn by plotly.js on load; filters, tabs and pagination are plain
//! links and GET forms so every view has its own URL.

use serde_json::{json, Map, Value};

use super::pages::PageQuery;
use super::widgets::{
    Action, Card, Component, Container, Control, Dashboard, Graph, KpiBanner, Page, Selector,
    Table, Tabs, Trend,
};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const ICONS_CSS: &str =
    "https://fonts.googleapis.com/css2?family=Material+Symbols+Outlined:opsz,wght,FILL,GRAD@24,400,0,0";

/// Render `page` inside the dashboard chrome
pub fn render_page(dashboard: &Dashboard, page: &Page, query: &PageQuery) -> String {
    let mut figures = Map::new();
    let mut body = String::new();

    body.push_str(&render_nav(dashboard, &page.slug));
    body.push_str("<main>\n");
    body.push_str(&format!("<h1>{}</h1>\n", escape_html(&page.title)));

    for control in &page.controls {
        body.push_str(&render_control(control, page, query));
    }

    body.push_str(&render_grid(
        &page.layout,
        &page.components,
        page,
        query,
        &mut figures,
    ));
    body.push_str("</main>\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - {}</title>
    <link rel="stylesheet" href="{}">
    <script src="{}"></script>
    <style>{}</style>
</head>
<body>
{}
<script>window.FIGURES = {};</script>
<script>{}</script>
</body>
</html>"#,
        escape_html(&page.title),
        escape_html(&dashboard.title),
        ICONS_CSS,
        PLOTLY_CDN,
        css(),
        body,
        script_json(&Value::Object(figures)),
        javascript()
    )
}

/// Escape text for HTML bodies and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Escaped text with `**bold**` spans turned into `<strong>`
pub fn render_card_text(text: &str) -> String {
    let escaped = escape_html(text);
    let mut out = String::with_capacity(escaped.len());
    for (i, part) in escaped.split("**").enumerate() {
        if i % 2 == 1 {
            out.push_str("<strong>");
            out.push_str(part);
            out.push_str("</strong>");
        } else {
            out.push_str(part);
        }
    }
    out
}

/// JSON safe to embed inside a `<script>` element
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// `/pages/<slug>?...` for a query
pub fn page_href(slug: &str, query: &PageQuery) -> String {
    let mut params = Vec::new();
    if let Some(view) = &query.view {
        params.push(format!("view={}", urlencoding::encode(view)));
    }
    if let Some(country) = &query.country {
        params.push(format!("country={}", urlencoding::encode(country)));
    }
    if let Some(tab) = &query.tab {
        params.push(format!("tab={}", urlencoding::encode(tab)));
    }
    if let Some(page) = query.page {
        params.push(format!("page={}", page));
    }

    if params.is_empty() {
        format!("/pages/{}", slug)
    } else {
        format!("/pages/{}?{}", slug, params.join("&"))
    }
}

fn render_nav(dashboard: &Dashboard, active: &str) -> String {
    let mut buf = String::new();
    buf.push_str("<nav class=\"navbar\">\n");
    buf.push_str(&format!(
        "<span class=\"brand\">{}</span>\n",
        escape_html(&dashboard.title)
    ));
    for link in &dashboard.navigation {
        let class = if link.page == active { "nav-link active" } else { "nav-link" };
        buf.push_str(&format!(
            "<a class=\"{}\" href=\"/pages/{}\"><span class=\"material-symbols-outlined\">{}</span>{}</a>\n",
            class,
            escape_html(&link.page),
            escape_html(&link.icon),
            escape_html(&link.label)
        ));
    }
    buf.push_str("</nav>\n");
    buf
}

fn render_control(control: &Control, page: &Page, query: &PageQuery) -> String {
    let Control::Filter(filter) = control;
    let mut buf = String::new();

    buf.push_str(&format!(
        "<form class=\"filter\" method=\"get\" action=\"/pages/{}\">\n",
        escape_html(&page.slug)
    ));
    // Keep the other filters when this one changes
    for (name, value) in [
        ("view", query.view.as_deref()),
        ("country", query.country.as_deref()),
        ("tab", query.tab.as_deref()),
    ] {
        if name != filter.column {
            if let Some(value) = value {
                buf.push_str(&format!(
                    "<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
                    name,
                    escape_html(value)
                ));
            }
        }
    }

    let column = escape_html(&filter.column);
    let selected = filter.selected.as_deref();
    match &filter.selector {
        Selector::RadioItems(options) => {
            for option in options {
                let checked = if selected == Some(option.value.as_str()) { " checked" } else { "" };
                buf.push_str(&format!(
                    "<label><input type=\"radio\" name=\"{}\" value=\"{}\" onchange=\"this.form.submit()\"{}> {}</label>\n",
                    column,
                    escape_html(&option.value),
                    checked,
                    escape_html(&option.label)
                ));
            }
        }
        Selector::Dropdown(options) => {
            buf.push_str(&format!(
                "<label>{} <select name=\"{}\" onchange=\"this.form.submit()\">\n",
                column, column
            ));
            for option in options {
                let attr = if selected == Some(option.value.as_str()) { " selected" } else { "" };
                buf.push_str(&format!(
                    "<option value=\"{}\"{}>{}</option>\n",
                    escape_html(&option.value),
                    attr,
                    escape_html(&option.label)
                ));
            }
            buf.push_str("</select></label>\n");
        }
    }
    buf.push_str("<noscript><button type=\"submit\">Apply</button></noscript>\n");
    buf.push_str("</form>\n");
    buf
}

/// CSS grid with one named area per component index
fn render_grid(
    layout: &[Vec<usize>],
    components: &[Component],
    page: &Page,
    query: &PageQuery,
    figures: &mut Map<String, Value>,
) -> String {
    let areas: Vec<String> = if layout.is_empty() {
        (0..components.len()).map(|i| format!("\"c{}\"", i)).collect()
    } else {
        layout
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|i| format!("c{}", i)).collect();
                format!("\"{}\"", cells.join(" "))
            })
            .collect()
    };

    let mut buf = String::new();
    buf.push_str(&format!(
        "<div class=\"grid\" style='grid-template-areas: {}'>\n",
        areas.join(" ")
    ));
    for (i, component) in components.iter().enumerate() {
        buf.push_str(&format!("<section style=\"grid-area: c{}\">\n", i));
        buf.push_str(&render_component(component, page, query, figures));
        buf.push_str("</section>\n");
    }
    buf.push_str("</div>\n");
    buf
}

fn render_component(
    component: &Component,
    page: &Page,
    query: &PageQuery,
    figures: &mut Map<String, Value>,
) -> String {
    match component {
        Component::KpiBanner(banner) => render_kpi_banner(banner),
        Component::Graph(graph) => render_graph(graph, figures),
        Component::Table(table) => render_table(table, page, query),
        Component::Card(card) => render_card(card),
        Component::Tabs(tabs) => render_tabs(tabs, page, query, figures),
        Component::Container(container) => render_container(container, page, query, figures),
    }
}

fn render_kpi_banner(banner: &KpiBanner) -> String {
    let mut buf = String::from("<div class=\"kpi-banner\">\n");
    for card in &banner.cards {
        let trend = match card.trend {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Flat => "flat",
        };
        buf.push_str(&format!(
            r#"<div class="kpi-card">
    <div class="kpi-title"><span class="material-symbols-outlined">{}</span>{}</div>
    <div class="kpi-value">{}</div>
    <div class="kpi-reference trend-{}">{}</div>
</div>
"#,
            escape_html(&card.icon),
            escape_html(&card.title),
            escape_html(&card.value),
            trend,
            escape_html(&card.reference)
        ));
    }
    buf.push_str("</div>\n");
    buf
}

fn render_graph(graph: &Graph, figures: &mut Map<String, Value>) -> String {
    let param = graph.actions.iter().find_map(|action| match action {
        Action::FilterInteraction { param, .. } => Some(param.clone()),
    });
    figures.insert(
        graph.id.clone(),
        json!({
            "data": graph.figure.data,
            "layout": graph.figure.layout,
            "clickParam": param,
        }),
    );

    format!(
        "<div class=\"graph-card\"><h3>{}</h3><div class=\"graph\" id=\"{}\"></div></div>\n",
        escape_html(&graph.title),
        escape_html(&graph.id)
    )
}

fn render_card(card: &Card) -> String {
    format!("<div class=\"card\">{}</div>\n", render_card_text(&card.text))
}

fn render_container(
    container: &Container,
    page: &Page,
    query: &PageQuery,
    figures: &mut Map<String, Value>,
) -> String {
    let mut buf = String::new();
    if let Some(title) = &container.title {
        buf.push_str(&format!("<h2>{}</h2>\n", escape_html(title)));
    }
    buf.push_str(&render_grid(
        &container.layout,
        &container.components,
        page,
        query,
        figures,
    ));
    buf
}

fn render_tabs(
    tabs: &Tabs,
    page: &Page,
    query: &PageQuery,
    figures: &mut Map<String, Value>,
) -> String {
    let mut buf = String::new();
    buf.push_str(&format!("<div class=\"tabs\" id=\"{}\">\n", escape_html(&tabs.id)));
    buf.push_str("<div class=\"tab-bar\">\n");
    for (i, tab) in tabs.tabs.iter().enumerate() {
        let link = PageQuery {
            tab: Some(tab.slug.clone()),
            page: None,
            ..query.clone()
        };
        let class = if i == tabs.active { "tab active" } else { "tab" };
        buf.push_str(&format!(
            "<a class=\"{}\" href=\"{}\">{}</a>\n",
            class,
            escape_html(&page_href(&page.slug, &link)),
            escape_html(&tab.title)
        ));
    }
    buf.push_str("</div>\n");

    // Only the selected tab is rendered
    if let Some(tab) = tabs.tabs.get(tabs.active) {
        for component in &tab.components {
            buf.push_str(&render_component(component, page, query, figures));
        }
    }
    buf.push_str("</div>\n");
    buf
}

fn render_table(table: &Table, page: &Page, query: &PageQuery) -> String {
    let mut buf = String::new();
    buf.push_str(&format!(
        "<table class=\"data-table\" id=\"{}\">\n<thead><tr>",
        escape_html(&table.id)
    ));
    for column in &table.columns {
        buf.push_str(&format!(
            "<th class=\"{}\">{}</th>",
            column_class(column.pinned, column.right_aligned),
            escape_html(&column.header)
        ));
    }
    buf.push_str("</tr></thead>\n<tbody>\n");

    for row in &table.rows {
        buf.push_str("<tr>");
        for (column, cell) in table.columns.iter().zip(row) {
            let mut class = column_class(column.pinned, column.right_aligned);
            if let Some(extra) = &cell.class {
                if !class.is_empty() {
                    class.push(' ');
                }
                class.push_str(extra);
            }
            buf.push_str(&format!(
                "<td class=\"{}\">{}</td>",
                escape_html(&class),
                escape_html(&cell.text)
            ));
        }
        buf.push_str("</tr>\n");
    }
    if table.rows.is_empty() {
        buf.push_str(&format!(
            "<tr><td colspan=\"{}\" class=\"empty\">No data</td></tr>\n",
            table.columns.len().max(1)
        ));
    }
    buf.push_str("</tbody>\n</table>\n");

    let pages = table.page_count();
    buf.push_str("<div class=\"pagination\">");
    if table.page > 1 {
        buf.push_str(&pagination_link(page, query, table.page - 1, "Previous"));
    }
    buf.push_str(&format!(
        "<span>Page {} of {} ({} rows)</span>",
        table.page, pages, table.total_rows
    ));
    if table.page < pages {
        buf.push_str(&pagination_link(page, query, table.page + 1, "Next"));
    }
    buf.push_str("</div>\n");
    buf
}

fn column_class(pinned: bool, right_aligned: bool) -> String {
    match (pinned, right_aligned) {
        (true, true) => "pinned num".to_string(),
        (true, false) => "pinned".to_string(),
        (false, true) => "num".to_string(),
        (false, false) => String::new(),
    }
}

fn pagination_link(page: &Page, query: &PageQuery, target: usize, label: &str) -> String {
    let link = PageQuery {
        page: Some(target),
        ..query.clone()
    };
    format!(
        "<a href=\"{}\">{}</a>",
        escape_html(&page_href(&page.slug, &link)),
        label
    )
}

fn css() -> &'static str {
    r#"
    :root {
        --primary: #1A85FF;
        --bg: #141721;
        --card-bg: #1e2230;
        --border: #2c3142;
        --text: #e6e9f0;
        --muted: #9aa3b5;
        --up: #2fbf71;
        --down: #d41159;
    }
    * { box-sizing: border-box; }
    body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: var(--bg); color: var(--text); }
    .navbar { display: flex; gap: 1rem; align-items: center; padding: 0.75rem 1.5rem; border-bottom: 1px solid var(--border); }
    .navbar .brand { font-weight: 600; margin-right: auto; }
    .nav-link { display: inline-flex; gap: 0.35rem; align-items: center; color: var(--muted); text-decoration: none; }
    .nav-link.active, .nav-link:hover { color: var(--primary); }
    main { padding: 1.5rem; }
    h1 { font-size: 1.4rem; margin: 0 0 1rem; }
    .grid { display: grid; gap: 1rem; grid-auto-columns: 1fr; }
    section { min-width: 0; }
    .filter { display: flex; gap: 1rem; margin-bottom: 1rem; color: var(--muted); }
    .kpi-banner { display: flex; gap: 1rem; flex-wrap: wrap; }
    .kpi-card, .card, .graph-card { background: var(--card-bg); border: 1px solid var(--border); border-radius: 8px; padding: 1rem; }
    .kpi-card { flex: 1 1 180px; }
    .kpi-title { display: flex; gap: 0.35rem; align-items: center; color: var(--muted); }
    .kpi-value { font-size: 1.6rem; font-weight: 600; margin: 0.25rem 0; }
    .trend-up { color: var(--up); }
    .trend-down { color: var(--down); }
    .trend-flat { color: var(--muted); }
    .graph-card h3 { margin: 0 0 0.5rem; font-size: 1rem; }
    .graph { min-height: 360px; }
    .tab-bar { display: flex; gap: 0.5rem; margin-bottom: 1rem; }
    .tab { padding: 0.4rem 0.9rem; border-radius: 6px; color: var(--muted); text-decoration: none; border: 1px solid var(--border); }
    .tab.active { color: var(--text); border-color: var(--primary); }
    .data-table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
    .data-table th, .data-table td { padding: 0.45rem 0.6rem; border-bottom: 1px solid var(--border); text-align: left; }
    .data-table .num { text-align: right; }
    .data-table .pinned { position: sticky; left: 0; background: var(--card-bg); }
    .data-table .empty { text-align: center; color: var(--muted); }
    .pagination { display: flex; gap: 1rem; justify-content: flex-end; padding: 0.75rem 0; color: var(--muted); }
    .pagination a { color: var(--primary); }
    .cell-abc-a { color: #1a85ff; font-weight: 600; }
    .cell-abc-b { color: #7ea1ee; }
    .cell-abc-c { color: #d41159; }
    .cell-status-overdue { color: #d41159; font-weight: 600; }
    .cell-status-duesoon { color: #f0b429; }
    .cell-status-ontrack { color: #2fbf71; }
    .lift-high { color: #1a85ff; }
    .lift-mid { color: var(--text); }
    .lift-low { color: #d41159; }
    "#
}

fn javascript() -> &'static str {
    r#"
    document.addEventListener('DOMContentLoaded', function() {
        if (typeof Plotly === 'undefined' || !window.FIGURES) {
            return;
        }
        Object.keys(window.FIGURES).forEach(function(id) {
            const el = document.getElementById(id);
            const spec = window.FIGURES[id];
            if (!el) {
                return;
            }
            Plotly.newPlot(el, spec.data, spec.layout, {responsive: true, displayModeBar: false});
            if (spec.clickParam) {
                el.on('plotly_click', function(event) {
                    const point = event.points && event.points[0];
                    const value = point && (point.customdata || point.location || point.label);
                    if (!value) {
                        return;
                    }
                    const params = new URLSearchParams(window.location.search);
                    params.set(spec.clickParam, Array.isArray(value) ? value[0] : value);
                    params.delete('page');
                    window.location.search = params.toString();
                });
            }
        });
    });
    "#
}
