//! Shared helpers for schema-driven XML data binding.
//!
//! Generated entities and the binding engine both depend on this crate:
//!
//! - [`Slot`] holds one field's value together with its "was it set" state, so
//!   an element that never appeared on the wire is distinguishable from one
//!   that appeared with an empty or default value.
//! - [`ScalarKind`], [`Scalar`] and [`ScalarRef`] describe the XML Schema
//!   simple types the engine understands and their canonical lexical forms.
//! - [`xsd`] carries the well-known namespace URIs.
//!
//! ## Lexical forms
//!
//! | XSD type | Rust type | Canonical form written |
//! |----------|-----------|------------------------|
//! | `string` | `String` | unchanged |
//! | `int` / `long` | `i32` / `i64` | decimal digits |
//! | `double` | `f64` | shortest round-trip, `INF`, `-INF`, `NaN` |
//! | `decimal` | `rust_decimal::Decimal` | digits with the value's own scale (`12.50` stays `12.50`) |
//! | `boolean` | `bool` | `true` / `false` (`1` / `0` accepted on read) |
//! | `date` | `chrono::NaiveDate` | `2024-01-15` |
//! | `time` | `chrono::NaiveTime` | `10:30:00Z`, `10:30:00.123456Z` |
//! | `dateTime` | `chrono::DateTime<Utc>` | `2024-01-15T10:30:00Z`, fractional digits kept |
//! | `base64Binary` | [`Base64Binary`] | standard alphabet with padding |

pub mod scalar;
pub mod slot;
pub mod xsd;

pub use scalar::{Base64Binary, LexicalError, Scalar, ScalarKind, ScalarRef};
pub use slot::Slot;
