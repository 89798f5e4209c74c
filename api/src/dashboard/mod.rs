//! Dashboard
//!
//! Widget model, chart builders, page builders and the HTML renderer.

pub mod charts;
pub mod format;
pub mod pages;
pub mod renderer;
pub mod widgets;

pub use pages::{build_dashboard, build_page, PageQuery};
pub use renderer::render_page;
pub use widgets::Dashboard;
