pub mod property;

pub use property::{Composite, PropertyValue};
