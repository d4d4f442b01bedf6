//! Charts module - chart planning, layout and drawing

mod layout;
mod planner;
mod plotter;
mod spec;

pub use layout::{LayoutBlock, LayoutOptions, Report, ReportComposer};
pub use plotter::ChartPlotter;
pub use spec::PlannedChart;
