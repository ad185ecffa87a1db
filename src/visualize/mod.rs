//! The visualize page: fetch a user's transactions, total them per category
//! and draw bar, doughnut and radar charts.

mod aggregation;
mod charts;
mod handlers;
mod state;

pub use aggregation::{CategoryTotal, aggregate};
pub use charts::{ChartData, Dataset};
pub use handlers::{get_visualize_page, visualize_endpoint};
pub use state::VisualizationState;
