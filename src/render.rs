//! Textual serialization of vars.
//!
//! Two independent renderers share the same structural layout but use
//! deliberately different quoting conventions:
//!
//! * [`Var::render`] writes to a byte-oriented sink (`std::io::Write`).
//!   Strings are double-quoted with the escapes `\b \r \n \f \t \\ \" \/`.
//! * [`Var::render_wide`] writes to a character-oriented sink
//!   (`std::fmt::Write`). Strings are single-quoted with the escapes
//!   `\b \r \n \f \t \\ \'` and no `/` escape.
//!
//! In both, any remaining control character falls back to `\0ooo`
//! (backslash, a literal `0`, three octal digits). The two forms are not
//! interchangeable and neither is JSON. Map keys are always rendered in
//! sorted key order, never insertion order.

use std::fmt;
use std::io::Write;

use crate::error::Result;
use crate::var::Var;

impl Var {
    /// Write the var to a byte-oriented sink.
    ///
    /// Vectors render as `[ e1, e2, ... ]` (an empty vector is `[  ]`),
    /// maps as `{ k1 : v1, k2 : v2, ... }` with keys in sorted order.
    /// Nested collections recurse in the same shape. The borrow of a
    /// shared collection is held for the duration of the call, so do
    /// not render a collection while holding a mutable index guard
    /// into it.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        match self {
            Var::None => out.write_all(b"null")?,
            Var::Bool(b) => out.write_all(if *b { b"true" } else { b"false" })?,
            Var::Int(n) => write!(out, "{}", n)?,
            Var::Double(d) => write!(out, "{}", d)?,
            Var::String(s) => write_quoted(out, s.chars())?,
            Var::WString(s) => write_quoted(out, s.iter().copied())?,
            Var::Vector(ptr) => {
                out.write_all(b"[ ")?;
                for (i, element) in ptr.borrow().iter().enumerate() {
                    if i > 0 {
                        out.write_all(b", ")?;
                    }
                    element.render(out)?;
                }
                out.write_all(b" ]")?;
            }
            Var::Map(ptr) => {
                out.write_all(b"{ ")?;
                for (i, (key, value)) in ptr.borrow().iter().enumerate() {
                    if i > 0 {
                        out.write_all(b", ")?;
                    }
                    key.render(out)?;
                    out.write_all(b" : ")?;
                    value.render(out)?;
                }
                out.write_all(b" }")?;
            }
        }
        Ok(())
    }

    /// Write the var to a character-oriented sink.
    ///
    /// Same structural layout as [`Var::render`], but with the
    /// single-quote escaping convention described in the module docs.
    pub fn render_wide<W: fmt::Write>(&self, out: &mut W) -> Result<()> {
        match self {
            Var::None => out.write_str("null")?,
            Var::Bool(b) => out.write_str(if *b { "true" } else { "false" })?,
            Var::Int(n) => write!(out, "{}", n)?,
            Var::Double(d) => write!(out, "{}", d)?,
            Var::String(s) => write_quoted_wide(out, s.chars())?,
            Var::WString(s) => write_quoted_wide(out, s.iter().copied())?,
            Var::Vector(ptr) => {
                out.write_str("[ ")?;
                for (i, element) in ptr.borrow().iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    element.render_wide(out)?;
                }
                out.write_str(" ]")?;
            }
            Var::Map(ptr) => {
                out.write_str("{ ")?;
                for (i, (key, value)) in ptr.borrow().iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    key.render_wide(out)?;
                    out.write_str(" : ")?;
                    value.render_wide(out)?;
                }
                out.write_str(" }")?;
            }
        }
        Ok(())
    }
}

// Narrow and wide string payloads quote identically within a renderer;
// only the renderer itself picks the convention.
fn write_quoted<W: Write>(out: &mut W, chars: impl Iterator<Item = char>) -> Result<()> {
    out.write_all(b"\"")?;
    for c in chars {
        match c {
            '\u{8}' => out.write_all(b"\\b")?,
            '\r' => out.write_all(b"\\r")?,
            '\n' => out.write_all(b"\\n")?,
            '\u{c}' => out.write_all(b"\\f")?,
            '\t' => out.write_all(b"\\t")?,
            '\\' => out.write_all(b"\\\\")?,
            '"' => out.write_all(b"\\\"")?,
            '/' => out.write_all(b"\\/")?,
            c if c.is_control() => write!(out, "\\0{:03o}", c as u32)?,
            c => write!(out, "{}", c)?,
        }
    }
    out.write_all(b"\"")?;
    Ok(())
}

fn write_quoted_wide<W: fmt::Write>(out: &mut W, chars: impl Iterator<Item = char>) -> Result<()> {
    out.write_char('\'')?;
    for c in chars {
        match c {
            '\u{8}' => out.write_str("\\b")?,
            '\r' => out.write_str("\\r")?,
            '\n' => out.write_str("\\n")?,
            '\u{c}' => out.write_str("\\f")?,
            '\t' => out.write_str("\\t")?,
            '\\' => out.write_str("\\\\")?,
            '\'' => out.write_str("\\'")?,
            c if c.is_control() => write!(out, "\\0{:03o}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('\'')?;
    Ok(())
}

/// `Display` uses the character-oriented convention: a `fmt::Formatter`
/// is a wide sink.
impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.render_wide(f).map_err(|_| fmt::Error)
    }
}
