//! Item value model and plain/tagged conversions.

mod mapper;
mod types;

pub use mapper::{from_attr_map, from_attr_maps, is_numeric, to_attr_map};
pub use types::{AttrMap, AttrValue, PlainItem, Scalar};
