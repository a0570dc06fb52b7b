//! Maven build descriptor integration
//!
//! - **descriptor**: Parse `pom.xml` into identity, parent linkage and declared dependencies

pub mod descriptor;

pub use descriptor::Descriptor;
