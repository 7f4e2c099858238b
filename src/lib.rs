//! Read-only parser for Microsoft Personal Folder File (PFF/PST/OST)
//! containers: the table-block decoder, the one-off entry identifier
//! decoder, the name-to-id map value decoder, the string-encoding bridge,
//! and the generic containers the decoders are built on.

pub mod array;
pub mod byte_source;
pub mod byte_stream;
pub mod display;
pub mod error;
pub mod list;
pub mod mapi;
pub mod name_to_id;
pub mod one_off;
pub mod options;
pub mod range;
pub mod string_bridge;
pub mod table_block;

pub use array::DynamicArray;
pub use byte_source::{ByteSource, SliceSource};
pub use byte_stream::Guid;
pub use error::{Error, Result};
pub use list::OrderedList;
pub use mapi::{Composite, PropertyValue};
pub use name_to_id::NameToIdValue;
pub use one_off::OneOff;
pub use options::{Codepage, Options, SurrogatePolicy};
pub use range::Range;
pub use table_block::{Slot, TableBlock};
