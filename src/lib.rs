//! Dynvar – a dynamically-typed value type for Rust.
//!
//! Dynvar centers on a single entity, the [`var::Var`]: a tagged value
//! that holds exactly one of eight payloads at a time:
//! * nothing (`None`, the null value),
//! * a boolean, a 64-bit integer or a double (value semantics),
//! * a narrow or wide string (shared, immutable buffers),
//! * a vector of vars (shared, mutable, insertion-ordered),
//! * a map from var keys to var values (shared, mutable, keys unique
//!   and kept sorted under the total order).
//!
//! Every operation — append, insert, count, the indexing family — is a
//! runtime dispatch on the active [`var::Kind`], written as an
//! exhaustive match so that adding a kind is a compile-checked,
//! localized change. Misuse of an operation for the current kind is an
//! [`error::DynamicError`], never a panic.
//!
//! ## Modules
//! * [`var`] – The value type itself: representation, construction,
//!   append/insert/count/index dispatch and the total-order comparator.
//! * [`render`] – The two textual renderers (byte-oriented and
//!   character-oriented) and the `Display` impl.
//! * [`error`] – The error taxonomy and the crate-wide `Result` alias.
//!
//! ## Sharing
//! Cloning a var that holds a vector or a map shares the same
//! underlying container: mutation through one clone is visible through
//! every clone. This is deliberate and asymmetric from scalars and
//! strings; [`var::Var::deep_copy`] produces independent containers
//! when that is what a caller needs. The payload handles are `Rc`, so
//! vars never cross threads — there is no internal locking to rely on.
//!
//! ## Quick Start
//! ```
//! use dynvar::var::Var;
//!
//! let seq = Var::vector();
//! seq.append(1)?.append(2)?.append(3)?;
//!
//! let map = Var::map();
//! map.insert("b", 2)?.insert("a", 1)?;
//! *map.index_key("c")? = Var::from(3);
//!
//! let mut out = Vec::new();
//! seq.render(&mut out)?;
//! assert_eq!(out, b"[ 1, 2, 3 ]");
//!
//! // keys come back sorted, not in insertion order
//! assert_eq!(map.to_string(), "{ 'a' : 1, 'b' : 2, 'c' : 3 }");
//! # Ok::<(), dynvar::error::DynamicError>(())
//! ```
//!
//! ## Ordering
//! Vars are totally ordered: first by kind ordinal (none < bool < int <
//! double < string < wstring < vector < map), then by value within a
//! kind. Two vectors — or two maps — always compare equal regardless of
//! content; the comparator exists to place values, not to compare
//! container contents. `==` on vars follows the comparator.
//!
//! ## Serialization
//! [`var::Var::render`] writes double-quoted, JSON-escaped text to any
//! `io::Write`; [`var::Var::render_wide`] writes single-quoted text
//! with its own escape set to any `fmt::Write`. The two conventions are
//! intentionally distinct and neither parses back — this crate has no
//! parser.

pub mod error;
pub mod render;
pub mod var;

pub use error::{DynamicError, Result};
pub use var::{Kind, Var};
