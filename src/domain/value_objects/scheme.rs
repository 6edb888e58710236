//! Naming scheme value objects
//!
//! - `Bare`: `6.jpg` (no position)
//! - `Parenthesized`: `6(2).jpg` / `6 (2).jpg`
//! - `Underscore`: `6_2.jpg`
//! - `Hyphen`: `6-2.jpg`

use serde::{Deserialize, Serialize};

/// How a filename encodes an image's position within its lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Bare,
    Parenthesized,
    Underscore,
    Hyphen,
}

impl Scheme {
    /// Returns true for the schemes that carry an explicit position
    pub fn is_indexed(&self) -> bool {
        !matches!(self, Scheme::Bare)
    }

    /// Parse a scheme name as used in config and env vars
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "bare" => Some(Scheme::Bare),
            "parenthesized" | "paren" | "parens" => Some(Scheme::Parenthesized),
            "underscore" => Some(Scheme::Underscore),
            "hyphen" | "dash" => Some(Scheme::Hyphen),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheme::Bare => write!(f, "bare"),
            Scheme::Parenthesized => write!(f, "parenthesized"),
            Scheme::Underscore => write!(f, "underscore"),
            Scheme::Hyphen => write!(f, "hyphen"),
        }
    }
}

/// Policy choosing the governing scheme for newly assigned positions in a lot
///
/// The first scheme in `order` that any indexed asset of the lot uses wins;
/// a lot with no indexed asset falls back to `fallback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemePreference {
    order: Vec<Scheme>,
    fallback: Scheme,
}

impl SchemePreference {
    /// Build a preference. Bare entries are ignored and a Bare fallback is
    /// replaced by Parenthesized, since new positions always need an index.
    pub fn new(order: Vec<Scheme>, fallback: Scheme) -> Self {
        let mut deduped: Vec<Scheme> = Vec::with_capacity(order.len());
        for scheme in order.into_iter().filter(Scheme::is_indexed) {
            if !deduped.contains(&scheme) {
                deduped.push(scheme);
            }
        }
        let fallback = if fallback.is_indexed() {
            fallback
        } else {
            Scheme::Parenthesized
        };
        Self {
            order: deduped,
            fallback,
        }
    }

    /// Pick the governing scheme given the schemes present among indexed assets
    pub fn governing<I>(&self, present: I) -> Scheme
    where
        I: IntoIterator<Item = Scheme>,
    {
        let present: Vec<Scheme> = present.into_iter().filter(Scheme::is_indexed).collect();
        self.order
            .iter()
            .copied()
            .find(|scheme| present.contains(scheme))
            // A scheme missing from the preference list still beats the fallback
            .or_else(|| present.iter().copied().min())
            .unwrap_or(self.fallback)
    }

    pub fn order(&self) -> &[Scheme] {
        &self.order
    }

    pub fn fallback(&self) -> Scheme {
        self.fallback
    }
}

impl Default for SchemePreference {
    fn default() -> Self {
        Self::new(
            vec![Scheme::Parenthesized, Scheme::Underscore, Scheme::Hyphen],
            Scheme::Parenthesized,
        )
    }
}
