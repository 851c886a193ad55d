// used to keep map keys unique and sorted under the total order
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

// shared ownership for the heap-backed payloads
use std::rc::Rc;
// interior mutability for the shared collection payloads
use std::cell::{Ref, RefCell, RefMut};

// custom made ordering across kinds
use std::cmp::Ordering;

// used to print out readable forms of kinds
use std::fmt;

use tracing::trace;

use crate::error::{DynamicError, Result};

// ------------- Kind -------------

/// The runtime tag identifying which payload a [`Var`] currently holds.
///
/// The declaration order is load-bearing: it is the primary key of the
/// total order over vars, so values of different kinds always rank by
/// kind before anything else is looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    None,
    Bool,
    Int,
    Double,
    String,
    WString,
    Vector,
    Map,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::None => write!(f, "none"),
            Kind::Bool => write!(f, "bool"),
            Kind::Int => write!(f, "int"),
            Kind::Double => write!(f, "double"),
            Kind::String => write!(f, "string"),
            Kind::WString => write!(f, "wstring"),
            Kind::Vector => write!(f, "vector"),
            Kind::Map => write!(f, "map"),
        }
    }
}

// ------------- Var -------------

/// The payload of a vector-holding var. Shared and mutable: every clone
/// of the var sees mutations made through any other clone.
pub type VectorPtr = Rc<RefCell<Vec<Var>>>;
/// The payload of a map-holding var. Keys are unique and kept sorted
/// under the total order of [`Var`]'s `Ord`.
pub type MapPtr = Rc<RefCell<BTreeMap<Var, Var>>>;

/// A dynamically-typed value.
///
/// A var holds exactly one of eight payloads at a time, identified by
/// its [`Kind`]. Every operation dispatches on the kind and either fully
/// completes its effect or raises a [`DynamicError`] leaving the value
/// untouched.
///
/// Ownership is asymmetric on purpose:
/// * scalars (`Bool`, `Int`, `Double`) have value semantics — cloning
///   copies them;
/// * strings are shared but immutable — cloning shares the buffer, and
///   no in-place mutation is exposed;
/// * vectors and maps are shared *and* mutable — cloning a var shares
///   the same underlying container, so appending through one clone is
///   visible through all of them. Use [`Var::deep_copy`] when an
///   independent container is needed.
///
/// Equality and ordering follow the comparator in the `Ord` impl: vars
/// of different kinds rank by kind, and any two vectors (or any two
/// maps) compare equal regardless of content. `==` on vars is therefore
/// comparator equality, not structural equality.
///
/// The payloads use `Rc`, so a `Var` is neither `Send` nor `Sync`;
/// sharing across threads must be arranged by the caller.
#[derive(Debug, Clone, Default)]
pub enum Var {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(Rc<String>),
    WString(Rc<Vec<char>>),
    Vector(VectorPtr),
    Map(MapPtr),
}

impl Var {
    /// The process-wide null value. Being a `const`, it can never be
    /// mutated in place; every use site receives its own copy of the
    /// payload-free null.
    pub const NONE: Var = Var::None;

    /// A fresh, empty vector-holding var.
    pub fn vector() -> Var {
        Var::Vector(Rc::new(RefCell::new(Vec::new())))
    }

    /// A fresh, empty map-holding var.
    pub fn map() -> Var {
        Var::Map(Rc::new(RefCell::new(BTreeMap::new())))
    }

    /// A wide-string var built from the characters of `s`.
    pub fn wide<S: AsRef<str>>(s: S) -> Var {
        Var::WString(Rc::new(s.as_ref().chars().collect()))
    }

    /// The tag identifying the active payload.
    pub fn kind(&self) -> Kind {
        match self {
            Var::None => Kind::None,
            Var::Bool(_) => Kind::Bool,
            Var::Int(_) => Kind::Int,
            Var::Double(_) => Kind::Double,
            Var::String(_) => Kind::String,
            Var::WString(_) => Kind::WString,
            Var::Vector(_) => Kind::Vector,
            Var::Map(_) => Kind::Map,
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind() == Kind::None
    }
    pub fn is_bool(&self) -> bool {
        self.kind() == Kind::Bool
    }
    pub fn is_int(&self) -> bool {
        self.kind() == Kind::Int
    }
    pub fn is_double(&self) -> bool {
        self.kind() == Kind::Double
    }
    pub fn is_numeric(&self) -> bool {
        self.is_int() || self.is_double()
    }
    pub fn is_string(&self) -> bool {
        self.kind() == Kind::String
    }
    pub fn is_wstring(&self) -> bool {
        self.kind() == Kind::WString
    }
    pub fn is_vector(&self) -> bool {
        self.kind() == Kind::Vector
    }
    pub fn is_map(&self) -> bool {
        self.kind() == Kind::Map
    }
    pub fn is_collection(&self) -> bool {
        self.is_vector() || self.is_map()
    }

    /// Append a single value to a collection.
    ///
    /// On a vector the value is pushed onto the end, preserving order.
    /// On a map the value becomes a key with a null value, unless the
    /// key is already present, in which case the existing entry is left
    /// unchanged. Returns `&self` so appends can be chained fluently:
    ///
    /// ```
    /// use dynvar::var::Var;
    /// let v = Var::vector();
    /// v.append(1)?.append(2.5)?.append("three")?;
    /// assert_eq!(v.count()?, 3);
    /// # Ok::<(), dynvar::error::DynamicError>(())
    /// ```
    pub fn append<T: Into<Var>>(&self, value: T) -> Result<&Var> {
        let value = value.into();
        match self {
            Var::Vector(ptr) => {
                ptr.borrow_mut().push(value);
                Ok(self)
            }
            Var::Map(ptr) => {
                ptr.borrow_mut().entry(value).or_insert(Var::None);
                Ok(self)
            }
            Var::None
            | Var::Bool(_)
            | Var::Int(_)
            | Var::Double(_)
            | Var::String(_)
            | Var::WString(_) => Err(DynamicError::InvalidOperation {
                op: "append",
                kind: self.kind(),
            }),
        }
    }

    /// Add a key, value pair to a map.
    ///
    /// Insert-if-absent: when the key already exists the previous value
    /// wins and the call is a no-op. Chainable like [`Var::append`].
    pub fn insert<K: Into<Var>, V: Into<Var>>(&self, key: K, value: V) -> Result<&Var> {
        match self {
            Var::Map(ptr) => {
                ptr.borrow_mut().entry(key.into()).or_insert(value.into());
                Ok(self)
            }
            Var::None
            | Var::Bool(_)
            | Var::Int(_)
            | Var::Double(_)
            | Var::String(_)
            | Var::WString(_)
            | Var::Vector(_) => Err(DynamicError::InvalidOperation {
                op: "insert",
                kind: self.kind(),
            }),
        }
    }

    /// Count of elements in a collection or characters in a string.
    pub fn count(&self) -> Result<usize> {
        match self {
            Var::String(s) => Ok(s.chars().count()),
            Var::WString(s) => Ok(s.len()),
            Var::Vector(ptr) => Ok(ptr.borrow().len()),
            Var::Map(ptr) => Ok(ptr.borrow().len()),
            Var::None | Var::Bool(_) | Var::Int(_) | Var::Double(_) => {
                Err(DynamicError::InvalidOperation {
                    op: "count",
                    kind: self.kind(),
                })
            }
        }
    }

    /// Index a collection with an integer.
    ///
    /// On a vector this is a bounds-checked positional access. On a map
    /// it looks up the key `Var::Int(n)` and fails with `NotFound` when
    /// the key is absent — unlike [`Var::index_key`], the integer path
    /// never creates an entry.
    ///
    /// The returned [`RefMut`] is a live borrow of the shared container;
    /// drop it before indexing or rendering the same collection again.
    pub fn index(&self, n: i64) -> Result<RefMut<'_, Var>> {
        match self {
            Var::Vector(ptr) => {
                let len = ptr.borrow().len();
                if n < 0 || n as usize >= len {
                    return Err(DynamicError::OutOfRange { index: n, len });
                }
                Ok(RefMut::map(ptr.borrow_mut(), |v| &mut v[n as usize]))
            }
            Var::Map(ptr) => {
                let key = Var::Int(n);
                RefMut::filter_map(ptr.borrow_mut(), |m| m.get_mut(&key))
                    .map_err(|_| DynamicError::NotFound { key: n.to_string() })
            }
            Var::None
            | Var::Bool(_)
            | Var::Int(_)
            | Var::Double(_)
            | Var::String(_)
            | Var::WString(_) => Err(DynamicError::InvalidOperation {
                op: "index",
                kind: self.kind(),
            }),
        }
    }

    /// Index a map with an arbitrary key, vivifying absent keys.
    ///
    /// When the key is present, a mutable reference to its value is
    /// returned. When it is absent, the pair `(key, none)` is inserted
    /// first and a mutable reference to the fresh null is returned, so
    /// `m.index_key("a")?` followed by an assignment through the guard
    /// both creates and sets the entry. The entry API finds the sort
    /// position once; there is no second traversal on insert.
    ///
    /// Vectors reject key indexing (positions are integers), as do all
    /// scalar kinds.
    pub fn index_key<K: Into<Var>>(&self, key: K) -> Result<RefMut<'_, Var>> {
        let key = key.into();
        match self {
            Var::Map(ptr) => Ok(RefMut::map(ptr.borrow_mut(), |m| match m.entry(key) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => {
                    trace!(key = %e.key(), "vivifying absent map key");
                    e.insert(Var::None)
                }
            })),
            Var::None
            | Var::Bool(_)
            | Var::Int(_)
            | Var::Double(_)
            | Var::String(_)
            | Var::WString(_)
            | Var::Vector(_) => Err(DynamicError::InvalidOperation {
                op: "index-by-key",
                kind: self.kind(),
            }),
        }
    }

    /// Read-only map lookup.
    ///
    /// Unlike [`Var::index_key`], an absent key is reported as
    /// `NotFound` and the map is left untouched: a read-only lookup
    /// never vivifies.
    pub fn get<K: Into<Var>>(&self, key: K) -> Result<Ref<'_, Var>> {
        let key = key.into();
        match self {
            Var::Map(ptr) => Ref::filter_map(ptr.borrow(), |m| m.get(&key))
                .map_err(|_| DynamicError::NotFound {
                    key: key.to_string(),
                }),
            Var::None
            | Var::Bool(_)
            | Var::Int(_)
            | Var::Double(_)
            | Var::String(_)
            | Var::WString(_)
            | Var::Vector(_) => Err(DynamicError::InvalidOperation {
                op: "get",
                kind: self.kind(),
            }),
        }
    }

    /// A recursively independent copy.
    ///
    /// Scalars are copied and string buffers stay shared (they are
    /// immutable), but vectors and maps are rebuilt into fresh
    /// containers, so mutating the copy never shows through the
    /// original.
    pub fn deep_copy(&self) -> Var {
        match self {
            Var::None => Var::None,
            Var::Bool(b) => Var::Bool(*b),
            Var::Int(i) => Var::Int(*i),
            Var::Double(d) => Var::Double(*d),
            Var::String(s) => Var::String(Rc::clone(s)),
            Var::WString(s) => Var::WString(Rc::clone(s)),
            Var::Vector(ptr) => Var::Vector(Rc::new(RefCell::new(
                ptr.borrow().iter().map(Var::deep_copy).collect(),
            ))),
            Var::Map(ptr) => Var::Map(Rc::new(RefCell::new(
                ptr.borrow()
                    .iter()
                    .map(|(k, v)| (k.deep_copy(), v.deep_copy()))
                    .collect(),
            ))),
        }
    }
}

// ------------- Ordering -------------

impl Ord for Var {
    /// The total order over vars: kind ordinal first, then the value
    /// for same-kind operands. Two nulls are always equal, doubles use
    /// `total_cmp` so the order stays total even for NaN, strings
    /// compare lexicographically, and any two vectors (or any two maps)
    /// are equal regardless of content. The container arm is a
    /// documented limitation: a map can hold at most one vector-valued
    /// and one map-valued key.
    fn cmp(&self, other: &Self) -> Ordering {
        let (lhs, rhs) = (self.kind(), other.kind());
        if lhs != rhs {
            return lhs.cmp(&rhs);
        }
        match (self, other) {
            (Var::None, Var::None) => Ordering::Equal,
            (Var::Bool(a), Var::Bool(b)) => a.cmp(b),
            (Var::Int(a), Var::Int(b)) => a.cmp(b),
            (Var::Double(a), Var::Double(b)) => a.total_cmp(b),
            (Var::String(a), Var::String(b)) => a.cmp(b),
            (Var::WString(a), Var::WString(b)) => a.cmp(b),
            (Var::Vector(_), Var::Vector(_)) | (Var::Map(_), Var::Map(_)) => Ordering::Equal,
            // the kind comparison above already ruled out mixed pairs
            _ => unreachable!("same-kind operands with differing variants"),
        }
    }
}
impl PartialOrd for Var {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Var {}

// ------------- Conversions -------------

impl From<bool> for Var {
    fn from(b: bool) -> Var {
        Var::Bool(b)
    }
}
impl From<i32> for Var {
    fn from(n: i32) -> Var {
        Var::Int(n as i64)
    }
}
impl From<i64> for Var {
    fn from(n: i64) -> Var {
        Var::Int(n)
    }
}
impl From<f64> for Var {
    fn from(d: f64) -> Var {
        Var::Double(d)
    }
}
impl From<&str> for Var {
    fn from(s: &str) -> Var {
        Var::String(Rc::new(s.to_owned()))
    }
}
impl From<String> for Var {
    fn from(s: String) -> Var {
        Var::String(Rc::new(s))
    }
}
impl From<Vec<char>> for Var {
    fn from(s: Vec<char>) -> Var {
        Var::WString(Rc::new(s))
    }
}
impl From<Vec<Var>> for Var {
    fn from(elements: Vec<Var>) -> Var {
        Var::Vector(Rc::new(RefCell::new(elements)))
    }
}
impl FromIterator<Var> for Var {
    fn from_iter<I: IntoIterator<Item = Var>>(iter: I) -> Var {
        Var::Vector(Rc::new(RefCell::new(iter.into_iter().collect())))
    }
}
