//! Page builders
//!
//! Turn the loaded datasets into the five dashboard pages. Filters, tab
//! selection and table pagination come from the page query string, so a
//! page is a pure function of `(datasets, query)`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::charts::{self, Agg, Point};
use super::format::{self, format_cell};
use super::widgets::{
    filter_interaction, Card, CellFormat, ColumnDef, Component, Container, Control, Dashboard,
    Filter, Graph, KpiBanner, KpiCard, NavLink, Page, PageRef, SelectOption, Selector, Tab,
    Table, Tabs, Trend,
};
use crate::app::dataset_service::Datasets;
use crate::domain::entities::{KpiCards, KpiPair};

/// Rows per table page
pub const PAGE_SIZE: usize = 25;

pub const EXECUTIVE: &str = "executive-view";
pub const REGIONAL: &str = "regional-view";
pub const RISKS: &str = "risks-diagnostics";
pub const OPPORTUNITIES: &str = "opportunities";
pub const DEEP_DIVE: &str = "deep-dive";

/// Slug, page title, nav label, nav icon
const PAGES: [(&str, &str, &str, &str); 5] = [
    (EXECUTIVE, "Executive View", "Executive View", "leaderboard"),
    (REGIONAL, "Regional View", "Regional View", "public"),
    (RISKS, "Risks & Diagnostics", "Risks", "warning"),
    (OPPORTUNITIES, "Opportunities", "Opportunities", "trending_up"),
    (DEEP_DIVE, "Deep Dive", "Deep Dive", "table_view"),
];

const TOP_VIEWS: [&str; 4] = [
    "Top Countries",
    "Top Products",
    "Top Sales Reps",
    "Top Product Lines",
];

/// Value meaning "no country filter"
pub const ALL_COUNTRIES: &str = "All";

/// Query parameters understood by every page
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageQuery {
    pub view: Option<String>,
    pub country: Option<String>,
    pub tab: Option<String>,
    pub page: Option<usize>,
}

impl PageQuery {
    /// Selected country, ignoring blanks and the "All" option
    pub fn country(&self) -> Option<&str> {
        self.country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_COUNTRIES)
    }

    fn view(&self) -> &str {
        self.view
            .as_deref()
            .filter(|v| TOP_VIEWS.contains(v))
            .unwrap_or(TOP_VIEWS[0])
    }
}

pub fn build_dashboard(title: &str) -> Dashboard {
    Dashboard {
        title: title.to_string(),
        navigation: PAGES
            .iter()
            .map(|(slug, _, label, icon)| NavLink {
                label: label.to_string(),
                icon: icon.to_string(),
                page: slug.to_string(),
            })
            .collect(),
        pages: PAGES
            .iter()
            .map(|(slug, title, _, _)| PageRef {
                slug: slug.to_string(),
                title: title.to_string(),
            })
            .collect(),
    }
}

/// Build one page, `None` for an unknown slug
pub fn build_page(slug: &str, datasets: &Datasets, query: &PageQuery) -> Option<Page> {
    let page = match slug {
        EXECUTIVE => executive_page(datasets, query),
        REGIONAL => regional_page(datasets, query),
        RISKS => risks_page(datasets, query),
        OPPORTUNITIES => opportunities_page(datasets),
        DEEP_DIVE => deep_dive_page(datasets, query),
        _ => return None,
    };
    Some(page)
}

fn page_title(slug: &str) -> &'static str {
    PAGES
        .iter()
        .find(|(s, ..)| *s == slug)
        .map(|(_, title, ..)| *title)
        .unwrap_or("")
}

// ---------------------------------------------------------------------------
// KPI banner
// ---------------------------------------------------------------------------

fn relative_reference(pair: &KpiPair, reference: String) -> String {
    match pair.delta_relative() {
        Some(delta) => format!("{} vs. {}", format::signed_ratio(delta), reference),
        None => format!("vs. {}", reference),
    }
}

pub fn kpi_banner(cards: Option<&KpiCards>) -> KpiBanner {
    let Some(cards) = cards else {
        return KpiBanner { cards: Vec::new() };
    };

    let revenue = &cards.revenue;
    let orders = &cards.orders;
    let aov = &cards.avg_order_value;
    let on_time = &cards.on_time_rate;
    let share = &cards.product_concentration;

    KpiBanner {
        cards: vec![
            KpiCard {
                title: "Total Revenue".to_string(),
                icon: "attach_money".to_string(),
                value: format::money(revenue.value),
                reference: relative_reference(revenue, format::thousands(revenue.reference, 0)),
                trend: Trend::from_delta(revenue.delta()),
            },
            KpiCard {
                title: "Total Orders".to_string(),
                icon: "shopping_cart".to_string(),
                value: format::thousands(orders.value, 0),
                reference: relative_reference(orders, format::thousands(orders.reference, 0)),
                trend: Trend::from_delta(orders.delta()),
            },
            KpiCard {
                title: "Avg Order Value".to_string(),
                icon: "local_atm".to_string(),
                value: format::money(aov.value),
                reference: relative_reference(aov, format::money(aov.reference)),
                trend: Trend::from_delta(aov.delta()),
            },
            KpiCard {
                title: "On-Time Delivery".to_string(),
                icon: "local_shipping".to_string(),
                value: format!("{:.1}%", on_time.value),
                reference: format!(
                    "{} vs. {:.1}%",
                    format::signed_points(on_time.delta()),
                    on_time.reference
                ),
                trend: Trend::from_delta(on_time.delta()),
            },
            KpiCard {
                title: "Top 10 Products Share".to_string(),
                icon: "inventory_2".to_string(),
                value: format!("{:.1}%", share.value),
                reference: format!("{} vs. prev", format::signed_points(share.delta())),
                trend: Trend::from_delta(share.delta()),
            },
        ],
    }
}

// ---------------------------------------------------------------------------
// Executive view
// ---------------------------------------------------------------------------

fn top_view_points(datasets: &Datasets, view: &str) -> Vec<Point> {
    match view {
        "Top Products" => datasets
            .products
            .iter()
            .map(|p| Point::new(&p.product_name, p.total_sales))
            .collect(),
        "Top Sales Reps" => datasets
            .salesreps
            .iter()
            .map(|r| Point::new(&r.employee_name, r.total_sales))
            .collect(),
        "Top Product Lines" => datasets
            .base
            .iter()
            .filter_map(|l| {
                l.product_line
                    .as_ref()
                    .map(|line| Point::new(line, l.line_sales))
            })
            .collect(),
        _ => datasets
            .regions
            .iter()
            .map(|r| Point::new(&r.country, r.total_sales))
            .collect(),
    }
}

fn executive_page(datasets: &Datasets, query: &PageQuery) -> Page {
    let view = query.view();
    let top_view = Graph::new(
        "exec-top-switch-graph",
        "Top view",
        charts::bar(&top_view_points(datasets, view), Agg::Sum, 12),
    );

    let abc: Vec<_> = datasets
        .customers
        .iter()
        .map(|c| (c.abc_class, 1.0))
        .collect();
    let abc_pie = Graph::new(
        "exec-abc-pie",
        "Customer ABC classes",
        charts::pie_abc_sales(&abc, Agg::Sum, "Customer ABC classes"),
    );

    let trend = Graph::new(
        "exec-sales-trend",
        "Monthly sales",
        charts::area_sales_trend(&datasets.monthly),
    );

    let context = &datasets.context;
    let quality = &datasets.data_quality;
    let footer = Container {
        title: None,
        layout: vec![vec![0, 1]],
        components: vec![
            Component::Card(Card::new(format!(
                "**Organizational Context** \u{2022} Offices: {} \u{2022} Sales Reps: {} \u{2022} Countries: {} \u{2022} Customers: {}",
                context.offices, context.sales_reps, context.countries_served, context.customers
            ))),
            Component::Card(Card::new(format!(
                "**Data Quality** \u{2022} Invalid date rows excluded from KPIs: {} ({}%)",
                quality.invalid_date_rows, quality.invalid_date_pct
            ))),
        ],
    };

    Page::new(EXECUTIVE, page_title(EXECUTIVE))
        .with_layout(vec![
            vec![0, 0],
            vec![1, 2],
            vec![1, 2],
            vec![3, 3],
            vec![4, 4],
        ])
        .with_component(Component::KpiBanner(kpi_banner(datasets.kpi_cards.as_ref())))
        .with_component(Component::Graph(top_view))
        .with_component(Component::Graph(abc_pie))
        .with_component(Component::Graph(trend))
        .with_component(Component::Container(footer))
        .with_control(Control::Filter(Filter {
            column: "view".to_string(),
            selector: Selector::RadioItems(TOP_VIEWS.iter().map(|v| SelectOption::same(v)).collect()),
            selected: Some(view.to_string()),
        }))
}

// ---------------------------------------------------------------------------
// Regional view
// ---------------------------------------------------------------------------

const REGIONAL_MAP: &str = "regional-map";
const REGIONAL_BAR_LINE: &str = "regional-bar-productline";
const REGIONAL_BAR_REP: &str = "regional-bar-salesrep";

fn regional_page(datasets: &Datasets, query: &PageQuery) -> Page {
    let country = query.country();
    let lines = datasets.base.iter().filter(|l| l.country.is_some());

    let by_country: Vec<Point> = lines
        .clone()
        .filter_map(|l| l.country.as_ref().map(|c| Point::new(c, l.line_sales)))
        .collect();

    let selected = lines
        .clone()
        .filter(|l| country.map_or(true, |c| l.country.as_deref() == Some(c)));
    let by_line: Vec<Point> = selected
        .clone()
        .filter_map(|l| l.product_line.as_ref().map(|p| Point::new(p, l.line_sales)))
        .collect();
    let by_rep: Vec<Point> = selected
        .filter_map(|l| l.employee_name.as_ref().map(|e| Point::new(e, l.line_sales)))
        .collect();

    let map = Graph::new(
        REGIONAL_MAP,
        "Sales by country (click to filter)",
        charts::choropleth(&by_country, None),
    )
    .with_action(filter_interaction(&[REGIONAL_BAR_LINE, REGIONAL_BAR_REP], "country"));

    let tabs = Tabs::new(
        "regional-tabs",
        vec![
            Tab::new(
                "product-line",
                "By Product Line",
                vec![Component::Graph(Graph::new(
                    REGIONAL_BAR_LINE,
                    "By Product Line",
                    charts::bar(&by_line, Agg::Sum, 12),
                ))],
            ),
            Tab::new(
                "sales-rep",
                "By Sales Rep",
                vec![Component::Graph(Graph::new(
                    REGIONAL_BAR_REP,
                    "By Sales Rep",
                    charts::bar(&by_rep, Agg::Sum, 12),
                ))],
            ),
        ],
        query.tab.as_deref(),
    );

    let countries: BTreeSet<&str> = lines.filter_map(|l| l.country.as_deref()).collect();
    let mut options = vec![SelectOption::same(ALL_COUNTRIES)];
    options.extend(countries.into_iter().map(SelectOption::same));

    Page::new(REGIONAL, page_title(REGIONAL))
        .with_layout(vec![vec![0, 1, 1], vec![0, 1, 1]])
        .with_component(Component::Graph(map))
        .with_component(Component::Tabs(tabs))
        .with_control(Control::Filter(Filter {
            column: "country".to_string(),
            selector: Selector::Dropdown(options),
            selected: Some(country.unwrap_or(ALL_COUNTRIES).to_string()),
        }))
}

// ---------------------------------------------------------------------------
// Risks & diagnostics
// ---------------------------------------------------------------------------

const RISK_MAP: &str = "risk-map-country";
const RISK_BAR: &str = "risk-bar-amount";

fn risks_page(datasets: &Datasets, query: &PageQuery) -> Page {
    let country = query.country();

    let at_risk: Vec<Point> = datasets
        .risk_by_country
        .iter()
        .map(|r| Point::new(&r.country, r.risk_amount))
        .collect();
    let customers: Vec<Point> = datasets
        .high_risk
        .iter()
        .filter(|c| country.map_or(true, |selected| c.country == selected))
        .map(|c| Point::new(&c.customer_name, c.amount_at_risk))
        .collect();

    let map = Graph::new(
        RISK_MAP,
        "Amount at risk by country (click to filter)",
        charts::choropleth(&at_risk, None),
    )
    .with_action(filter_interaction(&[RISK_BAR], "country"));
    let bar = Graph::new(
        RISK_BAR,
        "Top high-risk customers ($ at risk)",
        charts::bar(&customers, Agg::Sum, 10),
    );

    let diag = &datasets.diagnostic_summary;
    let footer = Container {
        title: None,
        layout: vec![vec![0, 1, 2]],
        components: vec![
            Component::Card(Card::new(format!(
                "\u{1F534} High-Risk: **{}** \u{2022} {}",
                diag.high_risk_customers_count,
                format::money(diag.amount_at_risk)
            ))),
            Component::Card(Card::new(format!(
                "\u{1F7E1} Misalignment: **{}** \u{2022} Over {} \u{2022} Under {}",
                diag.misalignment_count, diag.over_credited_count, diag.under_credited_count
            ))),
            Component::Card(Card::new("\u{1F7E2} Data Quality: OK")),
        ],
    };

    Page::new(RISKS, page_title(RISKS))
        .with_layout(vec![vec![0, 0, 1], vec![0, 0, 1], vec![2, 2, 2]])
        .with_component(Component::Graph(map))
        .with_component(Component::Graph(bar))
        .with_component(Component::Container(footer))
}

// ---------------------------------------------------------------------------
// Opportunities
// ---------------------------------------------------------------------------

fn opportunities_page(datasets: &Datasets) -> Page {
    let products: Vec<Point> = datasets
        .products
        .iter()
        .map(|p| Point::new(&p.product_name, p.total_sales))
        .collect();
    let segments: Vec<Point> = datasets
        .customer_rfm
        .iter()
        .map(|c| Point::new(c.rfm_segment.to_string(), 1.0))
        .collect();

    Page::new(OPPORTUNITIES, page_title(OPPORTUNITIES))
        .with_layout(vec![vec![0, 1], vec![0, 1]])
        .with_component(Component::Graph(Graph::new(
            "opp-top-products",
            "Top Products by Sales",
            charts::bar(&products, Agg::Sum, 15),
        )))
        .with_component(Component::Graph(Graph::new(
            "opp-rfm-segments",
            "RFM Segments",
            charts::pie(&segments, Agg::Sum, 0.45),
        )))
}

// ---------------------------------------------------------------------------
// Deep dive
// ---------------------------------------------------------------------------

/// One page of `rows` rendered through `columns`; out-of-range pages clamp
pub fn paginated_table<T: Serialize>(
    id: &str,
    columns: Vec<ColumnDef>,
    rows: &[T],
    page: usize,
) -> Table {
    let total_rows = rows.len();
    let page_count = total_rows.div_ceil(PAGE_SIZE).max(1);
    let page = page.clamp(1, page_count);

    let cells = rows
        .iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .filter_map(|row| serde_json::to_value(row).ok())
        .map(|row| {
            columns
                .iter()
                .map(|column| format_cell(column, row.get(&column.field).unwrap_or(&Value::Null)))
                .collect()
        })
        .collect();

    Table {
        id: id.to_string(),
        columns,
        rows: cells,
        page,
        page_size: PAGE_SIZE,
        total_rows,
    }
}

fn abc_column() -> ColumnDef {
    ColumnDef::text("abc_class", "ABC")
        .with_class_rule("cell-abc-a", "A")
        .with_class_rule("cell-abc-b", "B")
        .with_class_rule("cell-abc-c", "C")
}

fn customer_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::text("customer_number", "ID").pinned(),
        ColumnDef::text("customer_name", "Customer").pinned(),
        ColumnDef::text("country", "Country"),
        ColumnDef::money("total_sales", "Total Sales"),
        ColumnDef::number("num_orders", "Orders"),
        ColumnDef::number("num_products", "Products"),
        ColumnDef::money("avg_sales_per_order", "Avg / Order"),
        ColumnDef::percent("pct_of_global_sales", "% Global Sales"),
        ColumnDef::number("sales_rank", "Rank"),
        abc_column(),
    ]
}

fn product_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::text("product_code", "Code").pinned(),
        ColumnDef::text("product_name", "Product").pinned(),
        ColumnDef::text("product_line", "Line"),
        ColumnDef::money("total_sales", "Total Sales"),
        ColumnDef::number("num_orders", "Orders"),
        ColumnDef::number("num_customers", "Customers"),
        ColumnDef::percent("pct_of_global_sales", "% Global Sales"),
        ColumnDef::number("sales_rank", "Rank"),
        abc_column(),
    ]
}

fn salesrep_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::text("employee_number", "ID").pinned(),
        ColumnDef::text("employee_name", "Sales Rep").pinned(),
        ColumnDef::text("job_title", "Title"),
        ColumnDef::text("office_code", "Office"),
        ColumnDef::money("total_sales", "Total Sales"),
        ColumnDef::number("num_orders", "Orders"),
        ColumnDef::number("num_customers", "Customers"),
        ColumnDef::percent("pct_of_global_sales", "% Global Sales"),
        ColumnDef::number("sales_rank", "Rank"),
        abc_column(),
    ]
}

fn next_order_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::text("customer_number", "ID").pinned(),
        ColumnDef::text("customer_name", "Customer").pinned(),
        ColumnDef::text("country", "Country"),
        ColumnDef::text("last_order_date", "Last Order"),
        ColumnDef::number("avg_gap_days", "Avg Gap (days)"),
        ColumnDef::text("expected_next_order_date", "Expected Next"),
        ColumnDef::text("next_order_status", "Status")
            .with_class_rule("cell-status-overdue", "Overdue")
            .with_class_rule("cell-status-duesoon", "Due Soon")
            .with_class_rule("cell-status-ontrack", "On Track"),
    ]
}

fn cross_sell_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::text("product_name_1", "Product A").pinned(),
        ColumnDef::text("product_name_2", "Product B").pinned(),
        ColumnDef::number("cooccurrence_count", "Co-occur"),
        ColumnDef::decimal("support", "Support", 3),
        ColumnDef::decimal("confidence_from_p1", "Conf(A\u{2192}B)", 3),
        ColumnDef::decimal("lift", "Lift", 2).with_format(CellFormat::LiftBadge),
    ]
}

const DEEP_DIVE_TABS: [(&str, &str); 5] = [
    ("customers", "Customers"),
    ("products", "Products"),
    ("sales-reps", "Sales Reps"),
    ("next-orders", "Next Orders"),
    ("cross-sell", "Cross Sell"),
];

fn deep_dive_page(datasets: &Datasets, query: &PageQuery) -> Page {
    let requested = query.tab.as_deref();
    let active = requested
        .and_then(|slug| DEEP_DIVE_TABS.iter().position(|(s, _)| *s == slug))
        .unwrap_or(0);
    let page_for = |index: usize| {
        if index == active {
            query.page.unwrap_or(1)
        } else {
            1
        }
    };

    let tables = [
        paginated_table("deep-customers", customer_columns(), &datasets.customers, page_for(0)),
        paginated_table("deep-products", product_columns(), &datasets.products, page_for(1)),
        paginated_table("deep-salesreps", salesrep_columns(), &datasets.salesreps, page_for(2)),
        paginated_table("deep-next-orders", next_order_columns(), &datasets.next_orders, page_for(3)),
        paginated_table("deep-cross-sell", cross_sell_columns(), &datasets.cross_sell, page_for(4)),
    ];

    let tabs = DEEP_DIVE_TABS
        .iter()
        .zip(tables)
        .map(|((slug, title), table)| Tab::new(slug, title, vec![Component::Table(table)]))
        .collect();

    Page::new(DEEP_DIVE, page_title(DEEP_DIVE))
        .with_layout(vec![vec![0]])
        .with_component(Component::Tabs(Tabs::new("deep-dive-tabs", tabs, requested)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_snapshot;

    fn datasets() -> Datasets {
        Datasets::build(&sample_snapshot(), 2)
    }

    /// Graph with the given id, searched through containers and tabs
    fn find_graph<'a>(components: &'a [Component], id: &str) -> Option<&'a Graph> {
        components.iter().find_map(|c| match c {
            Component::Graph(g) if g.id == id => Some(g),
            Component::Container(c) => find_graph(&c.components, id),
            Component::Tabs(t) => t.tabs.iter().find_map(|tab| find_graph(&tab.components, id)),
            _ => None,
        })
    }

    fn graph_labels(page: &Page, id: &str) -> Value {
        find_graph(&page.components, id).unwrap().figure.data[0]["y"].clone()
    }

    #[test]
    fn dashboard_outline() {
        let dashboard = build_dashboard("Sales");
        let labels: Vec<_> = dashboard.navigation.iter().map(|n| n.label.as_str()).collect();

        assert_eq!(
            labels,
            vec!["Executive View", "Regional View", "Risks", "Opportunities", "Deep Dive"]
        );
        assert_eq!(dashboard.pages[2].title, "Risks & Diagnostics");
        assert_eq!(dashboard.pages.len(), 5);
    }

    #[test]
    fn unknown_slug_has_no_page() {
        assert!(build_page("nope", &datasets(), &PageQuery::default()).is_none());
    }

    #[test]
    fn every_page_builds_from_empty_datasets() {
        let empty = Datasets::default();
        for (slug, ..) in PAGES {
            let page = build_page(slug, &empty, &PageQuery::default()).unwrap();
            assert_eq!(page.slug, slug);
        }
    }

    #[test]
    fn kpi_banner_formats_cards() {
        let data = datasets();
        let banner = kpi_banner(data.kpi_cards.as_ref());

        assert_eq!(banner.cards.len(), 5);
        assert_eq!(banner.cards[0].value, "$15,300");
        assert_eq!(banner.cards[0].reference, "-1.3% vs. 15,500");
        assert_eq!(banner.cards[0].trend, Trend::Down);
        assert_eq!(banner.cards[2].reference, "+22.9% vs. $3,500");
        assert_eq!(banner.cards[3].value, "83.3%");
        assert_eq!(banner.cards[3].reference, "+16.7pp vs. 66.7%");
        assert_eq!(banner.cards[4].trend, Trend::Flat);
    }

    #[test]
    fn executive_view_switches_top_view() {
        let data = datasets();

        let page = build_page(EXECUTIVE, &data, &PageQuery::default()).unwrap();
        assert_eq!(
            graph_labels(&page, "exec-top-switch-graph")[0],
            "France"
        );

        let query = PageQuery {
            view: Some("Top Product Lines".to_string()),
            ..Default::default()
        };
        let page = build_page(EXECUTIVE, &data, &query).unwrap();
        let labels = graph_labels(&page, "exec-top-switch-graph");
        assert_eq!(labels.as_array().unwrap().len(), 2);

        let Control::Filter(filter) = &page.controls[0];
        assert_eq!(filter.selected.as_deref(), Some("Top Product Lines"));
        let Selector::RadioItems(options) = &filter.selector else {
            panic!("Expected radio items");
        };
        assert_eq!(options.len(), 4);
    }

    #[test]
    fn regional_country_filter_narrows_bars_only() {
        let data = datasets();
        let query = PageQuery {
            country: Some("Norway".to_string()),
            tab: Some("sales-rep".to_string()),
            ..Default::default()
        };
        let page = build_page(REGIONAL, &data, &query).unwrap();

        let map = find_graph(&page.components, REGIONAL_MAP).unwrap();
        assert!(map.figure.data[0]["locations"].as_array().unwrap().len() > 1);
        assert_eq!(graph_labels(&page, REGIONAL_BAR_LINE), serde_json::json!(["Motorcycles"]));

        let Component::Tabs(tabs) = &page.components[1] else {
            panic!("Expected tabs");
        };
        assert_eq!(tabs.active, 1);
    }

    #[test]
    fn risk_map_click_filters_bar() {
        let data = datasets();
        let all = build_page(RISKS, &data, &PageQuery::default()).unwrap();
        let all_labels = graph_labels(&all, RISK_BAR);

        let query = PageQuery {
            country: Some("Norway".to_string()),
            ..Default::default()
        };
        let filtered = build_page(RISKS, &data, &query).unwrap();
        let labels = graph_labels(&filtered, RISK_BAR);

        assert!(labels.as_array().unwrap().len() < all_labels.as_array().unwrap().len());
        assert_eq!(labels, serde_json::json!(["Baane Mini Imports"]));
        assert!(!find_graph(&all.components, RISK_MAP).unwrap().actions.is_empty());
    }

    #[test]
    fn deep_dive_tables_paginate_and_classify() {
        let rows: Vec<_> = (0..60).map(|i| serde_json::json!({"n": i})).collect();
        let table = paginated_table("t", vec![ColumnDef::number("n", "N")], &rows, 9);
        assert_eq!(table.page, 3);
        assert_eq!(table.rows.len(), 10);
        assert_eq!(table.rows[0][0].text, "50");

        let page = build_page(DEEP_DIVE, &datasets(), &PageQuery::default()).unwrap();
        let Component::Tabs(tabs) = &page.components[0] else {
            panic!("Expected tabs");
        };
        assert_eq!(tabs.tabs.len(), 5);
        let Component::Table(customers) = &tabs.tabs[0].components[0] else {
            panic!("Expected table");
        };
        assert_eq!(customers.total_rows, 4);
        let abc = customers.rows[0].last().unwrap();
        assert_eq!(abc.class.as_deref(), Some("cell-abc-a"));
    }
}
