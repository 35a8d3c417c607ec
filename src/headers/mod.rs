//! HTTP Header Multimap.
mod matches;
mod name;
mod value;
mod field;
mod map;
mod iter;
pub mod error;


pub use name::{HeaderName, standard};
pub use value::HeaderValue;
pub use field::{HeaderField, GetAll};
pub use map::{HeaderMap, AsHeaderName};
pub use iter::Iter;
pub use error::HeaderError;
