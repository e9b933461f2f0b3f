//! Instruction records: one formatted sentence per assigned step.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::body::Limb;
use super::limb_assigner::Step;
use crate::models::Hold;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Instruction {
    pub step: usize,
    pub hold: Hold,
    pub limb: Limb,
    pub movement: String,
    pub body_position: String,
    /// "Step N: <movement>. <body_position>"
    pub instruction: String,
}

impl From<&Step> for Instruction {
    fn from(step: &Step) -> Self {
        Self {
            step: step.index,
            hold: step.hold.clone(),
            limb: step.limb,
            movement: step.movement.clone(),
            body_position: step.body_position.clone(),
            instruction: format!("Step {}: {}. {}", step.index, step.movement, step.body_position),
        }
    }
}

pub fn generate_instructions(steps: &[Step]) -> Vec<Instruction> {
    steps.iter().map(Instruction::from).collect()
}
