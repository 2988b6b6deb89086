//! Schema subsystem
//!
//! Column descriptors and the collection schemas built from them. Both are
//! pure values; the only behavior here is default-record computation, which
//! the model layer calls once for every record it writes.
//!
//! # Usage
//!
//! ```
//! use localstore::schema::{create_schema, number, text};
//!
//! let users = create_schema(
//!     "users",
//!     [
//!         ("age", number().required()),
//!         ("id", text().default(|| "d")),
//!     ],
//! );
//! assert_eq!(users.compute_default_record().get("id").unwrap(), "d");
//! ```

mod collection;
mod column;
mod types;

pub use collection::{create_schema, Schema};
pub use column::{boolean, date, json, number, text, timestamp, uuid, Column, DefaultFn};
pub use types::{Record, ValueType};
