//! Views of a grouped roster for the command line.

pub mod html;
pub mod text;

pub use html::render_html_report;
pub use text::render_text_tree;
