//! Filename codec for lot images
//!
//! Pure parsing and rendering of the four filename shapes:
//!
//! | shape           | example       | position |
//! |-----------------|---------------|----------|
//! | bare            | `6.jpg`       | 0        |
//! | parenthesized   | `6 (2).jpg`   | 2        |
//! | underscore      | `6_2.jpeg`    | 2        |
//! | hyphen          | `6-2.png`     | 2        |
//!
//! Lot ids are digits optionally followed by letters (`6a`, `101B`).
//! Extensions are matched case-insensitively and reported lowercased.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::entities::ImageAsset;
use crate::domain::value_objects::{LotId, Scheme};

const NAME_PATTERN: &str = r"(?ix)
    ^
    (?P<lot>[0-9]+[a-z]*)
    (?:
        \s*\(\s*(?P<paren>[0-9]+)\s*\)
      | _(?P<under>[0-9]+)
      | -(?P<hyphen>[0-9]+)
    )?
    \.(?P<ext>jpe?g|png)
    $";

fn name_regex() -> &'static Regex {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    NAME_RE.get_or_init(|| Regex::new(NAME_PATTERN).expect("lot filename pattern is valid"))
}

/// Structured form of a lot filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub lot_id: LotId,
    pub position: u32,
    pub scheme: Scheme,
    pub extension: String,
}

/// Parses and renders lot filenames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameCodec {
    /// Render parenthesized names as `6 (1).jpg` instead of `6(1).jpg`
    paren_space: bool,
}

impl NameCodec {
    pub fn new(paren_space: bool) -> Self {
        Self { paren_space }
    }

    pub fn paren_space(&self) -> bool {
        self.paren_space
    }

    /// Parse a basename. Returns `None` for anything that is not a lot image.
    ///
    /// An explicit position of zero (`6(0).jpg`) is not a lot image: position 0
    /// is reserved for the bare form.
    pub fn parse(&self, file_name: &str) -> Option<ParsedName> {
        let caps = name_regex().captures(file_name)?;

        let (scheme, digits) = if let Some(m) = caps.name("paren") {
            (Scheme::Parenthesized, Some(m.as_str()))
        } else if let Some(m) = caps.name("under") {
            (Scheme::Underscore, Some(m.as_str()))
        } else if let Some(m) = caps.name("hyphen") {
            (Scheme::Hyphen, Some(m.as_str()))
        } else {
            (Scheme::Bare, None)
        };

        let position = match digits {
            Some(digits) => match digits.parse::<u32>() {
                Ok(0) | Err(_) => return None,
                Ok(n) => n,
            },
            None => 0,
        };

        Some(ParsedName {
            lot_id: LotId::new(&caps["lot"]),
            position,
            scheme,
            extension: caps["ext"].to_lowercase(),
        })
    }

    /// Parse the basename of `path` into an asset located at `path`
    pub fn parse_path(&self, path: &Path) -> Option<ImageAsset> {
        let file_name = path.file_name()?.to_str()?;
        let parsed = self.parse(file_name)?;
        Some(ImageAsset::new(
            parsed.lot_id,
            parsed.position,
            parsed.scheme,
            parsed.extension,
            path.to_path_buf(),
        ))
    }

    /// Render a basename. Inverse of `parse` for every position >= 1.
    ///
    /// Position 0 is only meaningful with `Scheme::Bare`, and `Scheme::Bare`
    /// ignores the position.
    pub fn render(&self, lot_id: &LotId, position: u32, scheme: Scheme, extension: &str) -> String {
        debug_assert!(
            scheme == Scheme::Bare || position >= 1,
            "indexed names need a position >= 1"
        );
        match scheme {
            Scheme::Bare => format!("{lot_id}.{extension}"),
            Scheme::Parenthesized if self.paren_space => {
                format!("{lot_id} ({position}).{extension}")
            }
            Scheme::Parenthesized => format!("{lot_id}({position}).{extension}"),
            Scheme::Underscore => format!("{lot_id}_{position}.{extension}"),
            Scheme::Hyphen => format!("{lot_id}-{position}.{extension}"),
        }
    }

    /// Rank shown to a reviewer and used for before/after matching
    pub fn display_order(asset: &ImageAsset) -> u32 {
        asset.display_order()
    }
}
