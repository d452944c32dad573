//! Office Open XML packages.
//!
//! 1. **OPC layer** (`opc`): the ZIP container, part names and relationships
//! 2. **WordprocessingML** (`docx`): the document model and its parsers
//! 3. **Core properties** (`metadata`): `docProps/core.xml`
pub mod docx;
pub mod metadata;
pub mod opc;

pub use opc::{OpcPackage, PackURI};
