//! Limb Assigner
//!
//! Walks a planned path and decides which limb takes each hold.
//!
//! ## Rules
//! - step 1: left hand on the first hold
//! - step 2: right hand on the second hold
//! - step 3+: the limb whose adjusted distance to the target is largest moves
//!
//! Adjusted distance is the straight-line distance from the limb's current
//! hold to the target (infinite while the limb is off the wall), multiplied by
//! `bias` for the feet when the target is in the upper part of the wall
//! (`height_factor > height_split`) and for the hands otherwise.
//!
//! Equal adjusted distances resolve in [`Limb::ALL`] order. Off-wall limbs
//! always win over placed ones, so all four limbs are on the wall before any
//! placed limb is moved.

use nalgebra::Point2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::body::{BodyState, Limb};
use crate::config::LimbConfig;
use crate::models::{Hold, HoldId, HoldSet};

/// One limb placement, numbered from 1 in path order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Step {
    pub index: usize,
    pub hold: Hold,
    pub limb: Limb,
    pub movement: String,
    pub body_position: String,
    /// Body after this step was applied
    pub body: BodyState,
}

/// Normalized height of `y` within `(top, bottom)`: 1 at the top, 0 at the
/// bottom. A flat wall reads as bottom.
pub fn height_factor(y: f64, range: (f64, f64)) -> f64 {
    let (top, bottom) = range;
    let span = bottom - top;
    if span <= 0.0 {
        return 0.0;
    }
    (bottom - y) / span
}

/// Assign limbs with the default [`LimbConfig`].
pub fn assign_limbs(path: &[HoldId], holds: &HoldSet) -> Vec<Step> {
    assign_limbs_with(path, holds, &LimbConfig::default())
}

pub fn assign_limbs_with(path: &[HoldId], holds: &HoldSet, config: &LimbConfig) -> Vec<Step> {
    let route: Vec<&Hold> = path
        .iter()
        .filter_map(|&id| {
            let hold = holds.get(id);
            if hold.is_none() {
                warn!(hold = id, "path references unknown hold, skipped");
            }
            hold
        })
        .collect();

    let Some(first) = route.first() else {
        return Vec::new();
    };

    let ground = Point2::new(first.x, first.y + config.ground_offset);
    let range = holds.vertical_range().unwrap_or((first.y, first.y));
    let mut body = BodyState::on_ground(ground);
    let mut steps = Vec::with_capacity(route.len());

    for (i, &target) in route.iter().enumerate() {
        let (limb, movement, body_position) = match i {
            0 => (
                Limb::LeftHand,
                "Start with left hand on the first hold".to_string(),
                "Standing at the base, reach up with left hand".to_string(),
            ),
            1 => (
                Limb::RightHand,
                "Place right hand on the next hold".to_string(),
                "Weight balanced between both arms, feet on starting holds or features".to_string(),
            ),
            _ => {
                let limb = choose_limb(&body, target, holds, range, config);
                let next = route.get(i + 1).copied();
                (limb, describe_movement(limb, target), advise_body_position(limb, target, next))
            }
        };

        body.place(limb, target.id, holds, ground);
        debug!(step = i + 1, hold = target.id, limb = limb.as_str(), "limb assigned");

        steps.push(Step {
            index: i + 1,
            hold: target.clone(),
            limb,
            movement,
            body_position,
            body: body.clone(),
        });
    }

    steps
}

/// Adjusted distance of every limb to `target`, in [`Limb::ALL`] order.
pub fn adjusted_distances(
    body: &BodyState,
    target: &Hold,
    holds: &HoldSet,
    range: (f64, f64),
    config: &LimbConfig,
) -> [f64; 4] {
    let prefer_hands = height_factor(target.y, range) > config.height_split;
    Limb::ALL.map(|limb| {
        let distance = body
            .slot(limb)
            .and_then(|id| holds.position(id))
            .map_or(f64::INFINITY, |p| nalgebra::distance(&p, &target.point()));
        let biased = if prefer_hands { limb.is_foot() } else { limb.is_hand() };
        if biased {
            distance * config.bias
        } else {
            distance
        }
    })
}

fn choose_limb(
    body: &BodyState,
    target: &Hold,
    holds: &HoldSet,
    range: (f64, f64),
    config: &LimbConfig,
) -> Limb {
    let distances = adjusted_distances(body, target, holds, range, config);

    // First maximum wins.
    let mut chosen = 0;
    for i in 1..distances.len() {
        if distances[i] > distances[chosen] {
            chosen = i;
        }
    }
    Limb::ALL[chosen]
}

fn describe_movement(limb: Limb, hold: &Hold) -> String {
    if limb.is_hand() {
        format!("Move {} to the {}", limb, hold)
    } else {
        format!("Place {} on the {}", limb, hold)
    }
}

fn advise_body_position(limb: Limb, hold: &Hold, next: Option<&Hold>) -> String {
    let (lead, hint) = if limb.is_hand() {
        ("Keep your center of gravity beneath your handholds.", hold.hold_type.map(|t| t.hand_advice()))
    } else {
        let hint = next.map(|next| {
            if next.x > hold.x {
                "Prepare to move right next."
            } else {
                "Prepare to move left next."
            }
        });
        ("Shift your weight as you move your foot.", hint)
    };

    match hint {
        Some(hint) => format!("{} {}", lead, hint),
        None => lead.to_string(),
    }
}
