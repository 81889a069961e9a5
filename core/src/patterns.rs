//! Small seed patterns, described using the 2-state subset of Golly's
//! [RLE format](http://golly.sourceforge.net/Help/formats.html#rle).
//!
//! Only the pattern body is supported: `b` is a dead cell, `o` is a live cell,
//! `$` ends a row, and `!` ends the pattern. Each item may be preceded by a
//! run count. Header lines beginning with `x` and comment lines beginning with
//! `#` are skipped. Rows advance along the Y axis.

use itertools::Itertools;
use std::str::FromStr;
use thiserror::Error;

/// Result type returned by fallible pattern routines.
pub type PatternResult<T> = Result<T, PatternError>;

lazy_static::lazy_static! {
    /// Regex matching an optional positive integer followed by a single RLE
    /// item.
    static ref RLE_RUN_REGEX: regex::Regex =
        regex::Regex::new(r"^(\d*)([bo$!])").unwrap();
}

/// Error encountered while parsing a pattern.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum PatternError {
    #[error("unknown symbol: '{0}'")]
    UnknownSymbol(char),
    #[error("invalid run count")]
    InvalidCount,
    #[error("pattern does not end with '!'")]
    Unterminated,
}

/// Largest coordinate a pattern may reach along either axis.
pub const MAX_EXTENT: usize = 1 << 20;

/// Moves a coordinate forward by a run count, failing if the result is past
/// [`MAX_EXTENT`].
fn advance(coord: usize, count: usize) -> PatternResult<usize> {
    coord
        .checked_add(count)
        .filter(|&end| end <= MAX_EXTENT)
        .ok_or(PatternError::InvalidCount)
}

/// Set of live cells, relative to the top-left corner of the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    cells: Vec<(usize, usize)>,
}

impl Pattern {
    /// Parses a pattern from RLE text.
    ///
    /// Run counts that are zero or that would carry the pattern past
    /// [`MAX_EXTENT`] along either axis are rejected with
    /// [`PatternError::InvalidCount`].
    pub fn from_rle(s: &str) -> PatternResult<Self> {
        let body: String = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#') && !line.starts_with('x'))
            .flat_map(|line| line.chars().filter(|c| !c.is_whitespace()))
            .collect();

        let mut cells = vec![];
        let (mut x, mut y) = (0_usize, 0_usize);
        let mut rest = body.as_str();
        loop {
            let captures = match RLE_RUN_REGEX.captures(rest) {
                Some(c) => c,
                None => {
                    return Err(match rest.chars().next() {
                        Some(ch) if !ch.is_ascii_digit() => PatternError::UnknownSymbol(ch),
                        _ => PatternError::Unterminated,
                    })
                }
            };
            let count = match &captures[1] {
                "" => 1,
                digits => digits
                    .parse::<usize>()
                    .map_err(|_| PatternError::InvalidCount)?,
            };
            if count == 0 {
                return Err(PatternError::InvalidCount);
            }
            match &captures[2] {
                "b" => x = advance(x, count)?,
                "o" => {
                    let end = advance(x, count)?;
                    cells.extend((x..end).map(|x| (x, y)));
                    x = end;
                }
                "$" => {
                    x = 0;
                    y = advance(y, count)?;
                }
                _ => return Ok(Self { cells }),
            }
            rest = &rest[captures[0].len()..];
        }
    }

    /// Returns the live cells in the pattern.
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    /// Returns the number of live cells in the pattern.
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    /// Returns the width and height of the bounding box of the live cells.
    pub fn size(&self) -> (usize, usize) {
        let width = self.cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
        let height = self.cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
        (width, height)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> PatternResult<Self> {
        Self::from_rle(s)
    }
}

/// Named pattern in RLE format.
#[derive(Debug, Copy, Clone)]
pub struct NamedPattern {
    /// Short lowercase name.
    pub name: &'static str,
    /// Pattern body.
    pub rle: &'static str,
}

impl NamedPattern {
    /// Parses the pattern.
    ///
    /// # Panics
    ///
    /// This function panics if the RLE is malformed, which never happens for
    /// the entries of [`PATTERNS`].
    pub fn pattern(&self) -> Pattern {
        Pattern::from_rle(self.rle)
            .unwrap_or_else(|e| panic!("Bad built-in pattern {:?}: {}", self.name, e))
    }
}

/// Built-in Life patterns.
pub const PATTERNS: &[NamedPattern] = &[
    NamedPattern {
        name: "glider",
        rle: "bo$2bo$3o!",
    },
    NamedPattern {
        name: "blinker",
        rle: "3o!",
    },
    NamedPattern {
        name: "toad",
        rle: "b3o$3o!",
    },
    NamedPattern {
        name: "beacon",
        rle: "2o$2o$2b2o$2b2o!",
    },
    NamedPattern {
        name: "block",
        rle: "2o$2o!",
    },
    NamedPattern {
        name: "r-pentomino",
        rle: "b2o$2o$bo!",
    },
    NamedPattern {
        name: "lwss",
        rle: "bo2bo$o$o3bo$4o!",
    },
];

/// Returns the built-in pattern with the given name.
pub fn find(name: &str) -> Option<Pattern> {
    PATTERNS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .map(NamedPattern::pattern)
}

/// Returns the names of all built-in patterns.
pub fn names() -> String {
    PATTERNS.iter().map(|p| p.name).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_glider() {
        let glider = Pattern::from_rle("bo$2bo$3o!").unwrap();
        assert_eq!(&[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)], glider.cells());
        assert_eq!((3, 3), glider.size());
        assert_eq!(5, glider.population());
    }

    #[test]
    fn test_parse_with_header_and_blank_rows() {
        let p: Pattern = "#C comment\nx = 3, y = 3, rule = B3/S23\no$2$\n2bo!"
            .parse()
            .unwrap();
        assert_eq!(&[(0, 0), (2, 3)], p.cells());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Err(PatternError::UnknownSymbol('z')), Pattern::from_rle("2oz!"));
        assert_eq!(Err(PatternError::Unterminated), Pattern::from_rle("3o"));
        assert_eq!(Err(PatternError::Unterminated), Pattern::from_rle("3o$12"));
        assert_eq!(Err(PatternError::InvalidCount), Pattern::from_rle("0o!"));
    }

    #[test]
    fn test_parse_huge_run_counts() {
        for rle in &[
            "o18446744073709551615o!",
            "$18446744073709551615$!",
            "18446744073709551615b2o!",
            "1000000000000o!",
            "99999999999999999999999o!",
        ] {
            assert_eq!(Err(PatternError::InvalidCount), Pattern::from_rle(rle), "{}", rle);
        }
        let wide = format!("{}bo!", MAX_EXTENT - 1);
        assert_eq!(&[(MAX_EXTENT - 1, 0)], Pattern::from_rle(&wide).unwrap().cells());
    }

    #[test]
    fn test_builtin_patterns_parse() {
        for p in PATTERNS {
            assert!(Pattern::from_rle(p.rle).is_ok(), "{}", p.name);
        }
        assert_eq!(Some(3), find("Blinker").map(|p| p.population()));
        assert_eq!(None, find("nonexistent"));
        assert!(names().starts_with("glider, blinker"));
    }
}
