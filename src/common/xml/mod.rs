//! XML part trees and markup escaping.

pub mod escape;
pub mod tree;

pub use escape::{escape_html, escape_html_preserving_spaces};
pub use tree::{XmlElement, XmlNode};
