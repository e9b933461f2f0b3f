//! Holds and hold sets
//!
//! A [`Hold`] is a point of contact on the wall in image coordinates:
//! - `x` grows to the right
//! - `y` grows downward, so a smaller `y` is higher on the wall
//!
//! Detectors hand over loosely-typed [`HoldRecord`]s; [`HoldSet::from_records`]
//! is the only way to turn them into a validated, immutable [`HoldSet`].

use std::fmt;

use fxhash::FxHashMap;
use nalgebra::Point2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Hold identifier, unique within a [`HoldSet`].
pub type HoldId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HoldColor {
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
}

impl HoldColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoldColor::Blue => "blue",
            HoldColor::Green => "green",
            HoldColor::Yellow => "yellow",
            HoldColor::Orange => "orange",
            HoldColor::Red => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HoldSize {
    Small,
    Medium,
    Large,
}

/// Grip shape. Only changes instruction text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HoldType {
    Jug,
    Crimp,
    Pinch,
    Sloper,
}

impl HoldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoldType::Jug => "jug",
            HoldType::Crimp => "crimp",
            HoldType::Pinch => "pinch",
            HoldType::Sloper => "sloper",
        }
    }

    /// Grip advice given when a hand lands on this hold type.
    pub fn hand_advice(&self) -> &'static str {
        match self {
            HoldType::Crimp => "Crimp carefully with straight fingers.",
            HoldType::Pinch => "Apply opposing thumb pressure on this pinch.",
            HoldType::Sloper => "Use open hand technique and keep weight beneath the hold.",
            HoldType::Jug => "Full grip with fingers wrapped around the jug.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Hold {
    pub id: HoldId,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<HoldColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<HoldSize>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub hold_type: Option<HoldType>,
}

impl Hold {
    pub fn new(id: HoldId, x: f64, y: f64) -> Self {
        Self { id, x, y, color: None, size: None, hold_type: None }
    }

    pub fn with_color(mut self, color: HoldColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_size(mut self, size: HoldSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_type(mut self, hold_type: HoldType) -> Self {
        self.hold_type = Some(hold_type);
        self
    }

    #[inline]
    pub fn point(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// True if `self` sits strictly higher on the wall than `other`.
    #[inline]
    pub fn is_above(&self, other: &Hold) -> bool {
        self.y < other.y
    }
}

/// Short noun phrase for instruction text, e.g. "green crimp".
impl fmt::Display for Hold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.color, self.hold_type) {
            (Some(color), Some(kind)) => write!(f, "{} {}", color.as_str(), kind.as_str()),
            (Some(color), None) => write!(f, "{} hold", color.as_str()),
            (None, Some(kind)) => write!(f, "{}", kind.as_str()),
            (None, None) => write!(f, "hold"),
        }
    }
}

/// Hold as emitted by a detector, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HoldRecord {
    #[serde(default)]
    pub id: Option<HoldId>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub color: Option<HoldColor>,
    #[serde(default)]
    pub size: Option<HoldSize>,
    #[serde(default, rename = "type")]
    pub hold_type: Option<HoldType>,
}

impl From<&Hold> for HoldRecord {
    fn from(hold: &Hold) -> Self {
        Self {
            id: Some(hold.id),
            x: Some(hold.x),
            y: Some(hold.y),
            color: hold.color,
            size: hold.size,
            hold_type: hold.hold_type,
        }
    }
}

impl HoldRecord {
    fn validate(&self, index: usize) -> Result<Hold> {
        let missing = |field: &str| PlanError::InvalidHoldData {
            index,
            reason: format!("missing required field '{}'", field),
        };

        let id = self.id.ok_or_else(|| missing("id"))?;
        let x = self.x.ok_or_else(|| missing("x"))?;
        let y = self.y.ok_or_else(|| missing("y"))?;

        if !x.is_finite() || !y.is_finite() {
            return Err(PlanError::InvalidHoldData {
                index,
                reason: format!("hold {} has non-finite coordinates ({}, {})", id, x, y),
            });
        }

        Ok(Hold { id, x, y, color: self.color, size: self.size, hold_type: self.hold_type })
    }
}

/// Immutable, ordered collection of holds indexed by id.
#[derive(Debug, Clone, Default)]
pub struct HoldSet {
    holds: Vec<Hold>,
    index: FxHashMap<HoldId, usize>,
}

impl HoldSet {
    /// Validate detector records: required fields present, finite
    /// coordinates, unique ids. Supplied order is kept.
    pub fn from_records(records: &[HoldRecord]) -> Result<Self> {
        let holds = records
            .iter()
            .enumerate()
            .map(|(index, record)| record.validate(index))
            .collect::<Result<Vec<_>>>()?;
        Self::from_holds(holds)
    }

    pub fn from_holds(holds: Vec<Hold>) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (i, hold) in holds.iter().enumerate() {
            if !hold.x.is_finite() || !hold.y.is_finite() {
                return Err(PlanError::InvalidHoldData {
                    index: i,
                    reason: format!("hold {} has non-finite coordinates", hold.id),
                });
            }
            if index.insert(hold.id, i).is_some() {
                return Err(PlanError::DuplicateHoldId { id: hold.id });
            }
        }
        Ok(Self { holds, index })
    }

    /// Build from holds already known to be valid.
    pub(super) fn from_trusted(holds: Vec<Hold>) -> Self {
        let index = holds.iter().enumerate().map(|(i, h)| (h.id, i)).collect();
        Self { holds, index }
    }

    /// Parse a JSON array of hold records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<HoldRecord> = serde_json::from_str(json)?;
        Self::from_records(&records)
    }

    pub fn len(&self) -> usize {
        self.holds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hold> {
        self.holds.iter()
    }

    pub fn as_slice(&self) -> &[Hold] {
        &self.holds
    }

    pub fn get(&self, id: HoldId) -> Option<&Hold> {
        self.index.get(&id).map(|&i| &self.holds[i])
    }

    pub fn position(&self, id: HoldId) -> Option<Point2<f64>> {
        self.get(id).map(Hold::point)
    }

    /// `(top_y, bottom_y)`: the smallest and largest `y` present.
    pub fn vertical_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.holds.iter();
        let first = iter.next()?;
        Some(iter.fold((first.y, first.y), |(top, bottom), h| (top.min(h.y), bottom.max(h.y))))
    }

    /// `(min_x, max_x)` over all holds.
    pub fn horizontal_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.holds.iter();
        let first = iter.next()?;
        Some(iter.fold((first.x, first.x), |(lo, hi), h| (lo.min(h.x), hi.max(h.x))))
    }

    pub fn to_records(&self) -> Vec<HoldRecord> {
        self.holds.iter().map(HoldRecord::from).collect()
    }
}

impl<'a> IntoIterator for &'a HoldSet {
    type Item = &'a Hold;
    type IntoIter = std::slice::Iter<'a, Hold>;

    fn into_iter(self) -> Self::IntoIter {
        self.holds.iter()
    }
}
