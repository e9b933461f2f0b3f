//! Climber body model: which hold each limb occupies, and the derived center.

use std::fmt;

use nalgebra::Point2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{HoldId, HoldSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Limb {
    LeftHand,
    RightHand,
    LeftFoot,
    RightFoot,
}

impl Limb {
    /// Selection priority when adjusted distances tie.
    pub const ALL: [Limb; 4] = [Limb::LeftHand, Limb::RightHand, Limb::LeftFoot, Limb::RightFoot];

    pub fn is_hand(&self) -> bool {
        matches!(self, Limb::LeftHand | Limb::RightHand)
    }

    pub fn is_foot(&self) -> bool {
        !self.is_hand()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Limb::LeftHand => "left_hand",
            Limb::RightHand => "right_hand",
            Limb::LeftFoot => "left_foot",
            Limb::RightFoot => "right_foot",
        }
    }

    /// Human-readable name, e.g. "left hand".
    pub fn label(&self) -> &'static str {
        match self {
            Limb::LeftHand => "left hand",
            Limb::RightHand => "right hand",
            Limb::LeftFoot => "left foot",
            Limb::RightFoot => "right foot",
        }
    }

    /// One-character marker: upper case for hands, lower case for feet.
    pub fn marker(&self) -> char {
        match self {
            Limb::LeftHand => 'L',
            Limb::RightHand => 'R',
            Limb::LeftFoot => 'l',
            Limb::RightFoot => 'r',
        }
    }
}

impl fmt::Display for Limb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BodyCenter {
    pub x: f64,
    pub y: f64,
}

impl From<Point2<f64>> for BodyCenter {
    fn from(p: Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Snapshot of the four limb slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BodyState {
    pub left_hand: Option<HoldId>,
    pub right_hand: Option<HoldId>,
    pub left_foot: Option<HoldId>,
    pub right_foot: Option<HoldId>,
    pub center: BodyCenter,
}

impl BodyState {
    /// All limbs off the wall, body at `ground`.
    pub fn on_ground(ground: Point2<f64>) -> Self {
        Self {
            left_hand: None,
            right_hand: None,
            left_foot: None,
            right_foot: None,
            center: ground.into(),
        }
    }

    pub fn slot(&self, limb: Limb) -> Option<HoldId> {
        match limb {
            Limb::LeftHand => self.left_hand,
            Limb::RightHand => self.right_hand,
            Limb::LeftFoot => self.left_foot,
            Limb::RightFoot => self.right_foot,
        }
    }

    fn slot_mut(&mut self, limb: Limb) -> &mut Option<HoldId> {
        match limb {
            Limb::LeftHand => &mut self.left_hand,
            Limb::RightHand => &mut self.right_hand,
            Limb::LeftFoot => &mut self.left_foot,
            Limb::RightFoot => &mut self.right_foot,
        }
    }

    pub fn is_occupied(&self, limb: Limb) -> bool {
        self.slot(limb).is_some()
    }

    pub fn unoccupied(&self) -> impl Iterator<Item = Limb> + '_ {
        Limb::ALL.into_iter().filter(move |&limb| !self.is_occupied(limb))
    }

    /// Put `limb` on `hold` and recompute the center. Slots whose hold is not
    /// in `holds` do not count toward the center.
    pub fn place(&mut self, limb: Limb, hold: HoldId, holds: &HoldSet, ground: Point2<f64>) {
        *self.slot_mut(limb) = Some(hold);
        self.center = self.compute_center(holds).unwrap_or(ground).into();
    }

    /// Mean position of occupied limbs, `None` if no limb is on the wall.
    pub fn compute_center(&self, holds: &HoldSet) -> Option<Point2<f64>> {
        let points: Vec<Point2<f64>> = Limb::ALL
            .iter()
            .filter_map(|&limb| self.slot(limb))
            .filter_map(|id| holds.position(id))
            .collect();
        if points.is_empty() {
            return None;
        }
        let sum = points.iter().fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
        Some(Point2::from(sum / points.len() as f64))
    }
}
