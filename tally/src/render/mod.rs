//! Chart output.
//!
//! - `figure`: Plotly figure JSON for an `Analysis`.
//! - `html_page` / `write_html`: standalone page loading plotly.js from its CDN.
//! - `report_json` / `write_report`: the per-series JSON summary.
//! - `write_outputs`: chart and report together, all or nothing.

mod figure;
mod html;

pub use figure::figure;
pub use html::{PLOTLY_CDN, html_page, report_json, write_html, write_outputs, write_report};
