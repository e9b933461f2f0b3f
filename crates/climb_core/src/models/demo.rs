//! Reference wall
//!
//! Holds identified by hand on the reference wall photo. Used by the CLI
//! `demo` command in place of a hold detector.

use super::hold::{Hold, HoldColor, HoldSet, HoldSize, HoldType};

impl HoldSet {
    pub fn demo_wall() -> HoldSet {
        use HoldColor::*;
        use HoldSize::*;
        use HoldType::*;

        let wall: [(u32, f64, f64, HoldColor, HoldSize, HoldType); 11] = [
            // start jugs
            (0, 275.0, 1050.0, Blue, Medium, Jug),
            (1, 450.0, 1050.0, Blue, Medium, Jug),
            // green line, bottom to top
            (2, 400.0, 900.0, Green, Small, Crimp),
            (3, 500.0, 850.0, Green, Small, Pinch),
            (4, 425.0, 750.0, Green, Small, Crimp),
            (5, 475.0, 650.0, Green, Small, Crimp),
            (6, 375.0, 600.0, Green, Small, Crimp),
            (7, 450.0, 500.0, Green, Small, Pinch),
            (8, 540.0, 450.0, Yellow, Medium, Sloper),
            (9, 475.0, 350.0, Orange, Medium, Jug),
            // finish
            (10, 400.0, 200.0, Red, Large, Jug),
        ];

        let holds = wall
            .iter()
            .map(|&(id, x, y, color, size, kind)| {
                Hold::new(id, x, y).with_color(color).with_size(size).with_type(kind)
            })
            .collect();

        HoldSet::from_trusted(holds)
    }
}
