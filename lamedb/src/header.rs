//! Header line parsing.
//!
//! The first line of a lamedb file declares the format version:
//!
//! ```text
//! eDVB services /4/
//! ```

use nom::bytes::complete::tag;
use nom::character::complete::{char, satisfy};
use nom::sequence::delimited;
use nom::IResult;

const MARKER: &str = "eDVB services /";

fn version_marker(input: &str) -> IResult<&str, char> {
    delimited(tag(MARKER), satisfy(|c| c.is_ascii_digit()), char('/'))(input)
}

/// Extract the single-digit format version from a header line.
///
/// The marker may appear anywhere in the line. Returns `None` when no
/// `eDVB services /<digit>/` marker is present.
///
/// # Example
/// ```
/// use lamedb::header::parse_version;
///
/// assert_eq!(parse_version("eDVB services /4/"), Some(4));
/// assert_eq!(parse_version("eDVB services /x/"), None);
/// ```
pub fn parse_version(line: &str) -> Option<u32> {
    line.match_indices(MARKER)
        .find_map(|(idx, _)| version_marker(&line[idx..]).ok())
        .and_then(|(_, digit)| digit.to_digit(10))
}
