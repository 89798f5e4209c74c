//! Widget model
//!
//! Serializable description of the dashboard: pages laid out on a grid,
//! holding graphs, KPI cards, tables, text cards, tabs and filter controls.
//! The same tree is rendered to HTML or returned as JSON.

use serde::Serialize;

use super::charts::Figure;

/// Dashboard outline
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub navigation: Vec<NavLink>,
    pub pages: Vec<PageRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub label: String,
    /// Material icon name
    pub icon: String,
    pub page: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageRef {
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub slug: String,
    pub title: String,
    /// Rows of component indices; an index spanning cells spans them
    pub layout: Vec<Vec<usize>>,
    pub components: Vec<Component>,
    pub controls: Vec<Control>,
}

impl Page {
    pub fn new(slug: &str, title: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            layout: Vec::new(),
            components: Vec::new(),
            controls: Vec::new(),
        }
    }

    pub fn with_layout(mut self, layout: Vec<Vec<usize>>) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    KpiBanner(KpiBanner),
    Graph(Graph),
    Table(Table),
    Card(Card),
    Tabs(Tabs),
    Container(Container),
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiBanner {
    pub cards: Vec<KpiCard>,
}

/// A KPI with its comparison line, e.g. `+2.5% vs. 15,500`
#[derive(Debug, Clone, Serialize)]
pub struct KpiCard {
    pub title: String,
    pub icon: String,
    pub value: String,
    pub reference: String,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Trend::Up
        } else if delta < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Graph {
    pub id: String,
    pub title: String,
    pub figure: Figure,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

impl Graph {
    pub fn new(id: &str, title: &str, figure: Figure) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            figure,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

/// Interactions triggered from a graph
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Clicking a point sets the query parameter `param` to the point's
    /// custom data, filtering the `targets`
    FilterInteraction { targets: Vec<String>, param: String },
}

pub fn filter_interaction(targets: &[&str], param: &str) -> Action {
    Action::FilterInteraction {
        targets: targets.iter().map(|t| t.to_string()).collect(),
        param: param.to_string(),
    }
}

/// Plain text card; `**bold**` spans are supported
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub text: String,
}

impl Card {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Container {
    pub title: Option<String>,
    pub layout: Vec<Vec<usize>>,
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tabs {
    pub id: String,
    pub tabs: Vec<Tab>,
    /// Index of the selected tab
    pub active: usize,
}

impl Tabs {
    /// Select the tab whose slug matches `requested`, else the first one
    pub fn new(id: &str, tabs: Vec<Tab>, requested: Option<&str>) -> Self {
        let active = requested
            .and_then(|slug| tabs.iter().position(|t| t.slug == slug))
            .unwrap_or(0);
        Self {
            id: id.to_string(),
            tabs,
            active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Tab {
    pub slug: String,
    pub title: String,
    pub components: Vec<Component>,
}

impl Tab {
    pub fn new(slug: &str, title: &str, components: Vec<Component>) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            components,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub id: String,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Vec<Cell>>,
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
}

impl Table {
    pub fn page_count(&self) -> usize {
        self.total_rows.div_ceil(self.page_size.max(1)).max(1)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnDef {
    pub field: String,
    pub header: String,
    pub format: CellFormat,
    pub pinned: bool,
    pub right_aligned: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub class_rules: Vec<ClassRule>,
}

impl ColumnDef {
    pub fn text(field: &str, header: &str) -> Self {
        Self {
            field: field.to_string(),
            header: header.to_string(),
            format: CellFormat::Text,
            pinned: false,
            right_aligned: false,
            class_rules: Vec::new(),
        }
    }

    pub fn money(field: &str, header: &str) -> Self {
        Self::numeric(field, header, CellFormat::Money)
    }

    pub fn number(field: &str, header: &str) -> Self {
        Self::numeric(field, header, CellFormat::Number { decimals: 0 })
    }

    pub fn decimal(field: &str, header: &str, decimals: usize) -> Self {
        Self::numeric(field, header, CellFormat::Number { decimals })
    }

    pub fn percent(field: &str, header: &str) -> Self {
        Self::numeric(field, header, CellFormat::Percent)
    }

    fn numeric(field: &str, header: &str, format: CellFormat) -> Self {
        Self {
            format,
            right_aligned: true,
            ..Self::text(field, header)
        }
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn with_format(mut self, format: CellFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_class_rule(mut self, class: &str, equals: &str) -> Self {
        self.class_rules.push(ClassRule {
            class: class.to_string(),
            equals: equals.to_string(),
        });
        self
    }

    /// CSS class for a raw cell value
    pub fn class_for(&self, raw: &str) -> Option<String> {
        self.class_rules
            .iter()
            .find(|r| r.equals == raw)
            .map(|r| r.class.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellFormat {
    Text,
    Money,
    Number { decimals: usize },
    Percent,
    LiftBadge,
}

/// Adds `class` to cells whose raw value equals `equals`
#[derive(Debug, Clone, Serialize)]
pub struct ClassRule {
    pub class: String,
    pub equals: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    Filter(Filter),
}

#[derive(Debug, Clone, Serialize)]
pub struct Filter {
    /// Column filtered, also the query parameter name
    pub column: String,
    pub selector: Selector,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "snake_case")]
pub enum Selector {
    RadioItems(Vec<SelectOption>),
    Dropdown(Vec<SelectOption>),
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn same(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: label.to_string(),
        }
    }
}
