//! Runtime message templates.
//!
//! `format!` needs its template at compile time, but error catalogs keep their
//! templates in `ErrorCode` constants and fill them when the error is raised.
//! This module renders such templates against a slice of `Display` arguments
//! using the familiar brace syntax:
//!
//! | Template       | Meaning                                         |
//! |----------------|-------------------------------------------------|
//! | `{}`           | next argument, in order                         |
//! | `{N}`          | argument `N` (zero-based), cursor not advanced  |
//! | `{{` / `}}`    | literal brace                                   |
//!
//! # Never Fails
//!
//! Mismatches between a template and its arguments are written into the output
//! as markers instead of being reported:
//!
//! | Situation                          | Marker                |
//! |------------------------------------|-----------------------|
//! | `{}` with no argument left         | `{!MISSING}`          |
//! | `{N}` past the end of the args     | `{!N(MISSING)}`       |
//! | `{name}`, `{:>4}`, ...             | `{!name(BADINDEX)}`   |
//! | `{` never closed                   | `{!NOVERB}`           |
//! | arguments left over (no `{N}` used)| `{!EXTRA(a, b)}`      |
//!
//! A lone `}` is copied through unchanged.
//!
//! # Example
//!
//! ```rust
//! use coded_errors::template::render;
//!
//! assert_eq!(render("user {} not found", &[&"alice"]), "user alice not found");
//! assert_eq!(render("{1} before {0}", &[&"a", &"b"]), "b before a");
//! assert_eq!(render("count={}", &[]), "count={!MISSING}");
//! ```

use smallvec::SmallVec;
use std::fmt;

/// One parsed template fragment, borrowing from the template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'t> {
    Literal(&'t str),
    Next,
    Index(usize),
    BadIndex(&'t str),
    NoVerb,
}

/// A parsed message template.
///
/// Most catalog messages have a handful of fragments, so pieces live inline.
#[derive(Debug, Clone)]
pub struct Template<'t> {
    pieces: SmallVec<[Piece<'t>; 8]>,
}

impl<'t> Template<'t> {
    /// Parse `text`. Parsing cannot fail; malformed placeholders become markers.
    pub fn parse(text: &'t str) -> Self {
        let bytes = text.as_bytes();
        let mut pieces = SmallVec::new();
        let mut start = 0;
        let mut i = 0;

        // Braces are ASCII, so every index we slice at is a char boundary.
        while i < bytes.len() {
            match bytes[i] {
                b'{' => {
                    if start < i {
                        pieces.push(Piece::Literal(&text[start..i]));
                    }
                    if bytes.get(i + 1) == Some(&b'{') {
                        pieces.push(Piece::Literal("{"));
                        i += 2;
                    } else if let Some(rel) = text[i + 1..].find('}') {
                        let inner = &text[i + 1..i + 1 + rel];
                        pieces.push(classify(inner));
                        i += rel + 2;
                    } else {
                        pieces.push(Piece::NoVerb);
                        i += 1;
                    }
                    start = i;
                }
                b'}' => {
                    if start < i {
                        pieces.push(Piece::Literal(&text[start..i]));
                    }
                    pieces.push(Piece::Literal("}"));
                    i += if bytes.get(i + 1) == Some(&b'}') { 2 } else { 1 };
                    start = i;
                }
                _ => i += 1,
            }
        }
        if start < bytes.len() {
            pieces.push(Piece::Literal(&text[start..]));
        }

        Self { pieces }
    }

    /// Number of placeholders (`{}` and `{N}`) in the template.
    pub fn placeholders(&self) -> usize {
        self.pieces
            .iter()
            .filter(|p| matches!(p, Piece::Next | Piece::Index(_)))
            .count()
    }

    /// Lazily render against `args`; nothing is allocated until formatted.
    #[inline]
    pub fn display<'a>(&'a self, args: &'a [&'a dyn fmt::Display]) -> Rendered<'a, 't> {
        Rendered {
            template: self,
            args,
        }
    }
}

fn classify(inner: &str) -> Piece<'_> {
    if inner.is_empty() {
        return Piece::Next;
    }
    if inner.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(index) = inner.parse::<usize>() {
            return Piece::Index(index);
        }
    }
    Piece::BadIndex(inner)
}

/// A template paired with its arguments, rendered on `Display`.
pub struct Rendered<'a, 't> {
    template: &'a Template<'t>,
    args: &'a [&'a dyn fmt::Display],
}

impl fmt::Display for Rendered<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cursor = 0;
        let mut explicit = false;

        for piece in &self.template.pieces {
            match *piece {
                Piece::Literal(text) => f.write_str(text)?,
                Piece::Next => match self.args.get(cursor) {
                    Some(arg) => {
                        write!(f, "{}", arg)?;
                        cursor += 1;
                    }
                    None => f.write_str("{!MISSING}")?,
                },
                Piece::Index(index) => {
                    explicit = true;
                    match self.args.get(index) {
                        Some(arg) => write!(f, "{}", arg)?,
                        None => write!(f, "{{!{}(MISSING)}}", index)?,
                    }
                }
                Piece::BadIndex(inner) => write!(f, "{{!{}(BADINDEX)}}", inner)?,
                Piece::NoVerb => f.write_str("{!NOVERB}")?,
            }
        }

        if !explicit && cursor < self.args.len() {
            f.write_str("{!EXTRA(")?;
            for (n, arg) in self.args[cursor..].iter().enumerate() {
                if n > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(")}")?;
        }

        Ok(())
    }
}

/// Render `template` with `args` into a new string.
#[inline]
pub fn render(template: &str, args: &[&dyn fmt::Display]) -> String {
    Template::parse(template).display(args).to_string()
}

/// Render `template` with `args`, appending to `out`.
pub fn render_into(out: &mut String, template: &str, args: &[&dyn fmt::Display]) {
    use fmt::Write;
    // Writing into a String cannot fail.
    let _ = write!(out, "{}", Template::parse(template).display(args));
}
