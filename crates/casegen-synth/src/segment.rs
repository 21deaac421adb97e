//! Requirement segmentation.
//!
//! Free text is split by the first strategy whose marker pattern occurs in it:
//!
//! 1. [`Strategy::Tagged`]: `REQ-<digits>:` markers (any case).
//! 2. [`Strategy::Numbered`]: line-leading `<digits>.` markers.
//! 3. [`Strategy::Paragraphs`]: blank-line separated blocks, skipping blocks
//!    that start with `#` or `//`.
//!
//! A strategy whose markers are present but whose units are all empty still
//! wins; the cascade only moves on when a marker never matched.
//!
//! Ids are unique within one segmentation. A repeated marker number gets an
//! occurrence suffix: the second `1.` becomes `REQ-1-2`, the third `REQ-1-3`.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use casegen_core::entities::Requirement;
use casegen_core::ids::requirement_id;
use regex::{Captures, Regex};

static TAGGED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)REQ-(\d+):").expect("valid regex"));
static NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(\d+)\.").expect("valid regex"));
static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n\s*").expect("valid regex"));

/// Segmentation strategy, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Tagged,
    Numbered,
    Paragraphs,
}

impl Strategy {
    pub const CASCADE: [Self; 3] = [Self::Tagged, Self::Numbered, Self::Paragraphs];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tagged => "tagged",
            Self::Numbered => "numbered",
            Self::Paragraphs => "paragraphs",
        }
    }

    fn apply(self, text: &str) -> StrategyOutcome {
        match self {
            Self::Tagged => split_on_markers(text, &TAGGED_MARKER),
            Self::Numbered => split_on_markers(text, &NUMBERED_MARKER),
            Self::Paragraphs => split_paragraphs(text),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of trying one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    /// The strategy's marker never occurred; try the next one.
    NoMatch,
    /// The strategy applies. The list may be empty if every unit was blank.
    Matched(Vec<Requirement>),
}

/// Requirements plus the strategy that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// `None` only for blank input.
    pub strategy: Option<Strategy>,
    pub requirements: Vec<Requirement>,
}

/// Split `text` into requirements. Never fails; blank input yields nothing.
#[must_use]
pub fn split_requirements(text: &str) -> Vec<Requirement> {
    segment(text).requirements
}

/// Split `text` into requirements, reporting which strategy was used.
#[must_use]
pub fn segment(text: &str) -> Segmentation {
    if text.trim().is_empty() {
        return Segmentation {
            strategy: None,
            requirements: Vec::new(),
        };
    }

    for strategy in Strategy::CASCADE {
        if let StrategyOutcome::Matched(requirements) = strategy.apply(text) {
            tracing::debug!(%strategy, count = requirements.len(), "segmented requirements");
            return Segmentation {
                strategy: Some(strategy),
                requirements,
            };
        }
    }

    // Paragraphs always matches non-blank text.
    Segmentation {
        strategy: None,
        requirements: Vec::new(),
    }
}

/// Units run from the end of one marker to the start of the next.
fn split_on_markers(text: &str, marker: &Regex) -> StrategyOutcome {
    let markers: Vec<Captures<'_>> = marker.captures_iter(text).collect();
    if markers.is_empty() {
        return StrategyOutcome::NoMatch;
    }

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    let requirements = markers
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let digits = caps.get(1)?.as_str();
            let end = markers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |m| m.start());
            let seen = occurrences.get(digits).copied().unwrap_or(0);
            let id = if seen == 0 {
                requirement_id(digits)
            } else {
                requirement_id(&format!("{digits}-{}", seen + 1))
            };
            let requirement = build(id, &text[whole.end()..end])?;
            occurrences.insert(digits, seen + 1);
            Some(requirement)
        })
        .collect();

    StrategyOutcome::Matched(requirements)
}

fn split_paragraphs(text: &str) -> StrategyOutcome {
    let requirements = BLANK_LINE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty() && !p.starts_with('#') && !p.starts_with("//"))
        .enumerate()
        .filter_map(|(i, p)| build(requirement_id(&format!("{:03}", i + 1)), p))
        .collect();
    StrategyOutcome::Matched(requirements)
}

fn build(id: String, unit: &str) -> Option<Requirement> {
    let unit = unit.trim();
    if unit.is_empty() {
        return None;
    }
    match Requirement::new(id, unit) {
        Ok(requirement) => Some(requirement),
        Err(error) => {
            tracing::warn!(%error, "skipping unusable requirement unit");
            None
        }
    }
}
