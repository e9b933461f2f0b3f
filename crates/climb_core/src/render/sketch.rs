//! Text sketch of a planned route
//!
//! Holds of the route are scaled from the HoldSet's bounding box onto a
//! character canvas. Each step is drawn as its number followed by the limb
//! marker (`L`/`R` hands, `l`/`r` feet); numbers of 10 and above print as `#`.
//! Consecutive steps are joined with `·`.

use crate::engine::Step;
use crate::models::HoldSet;

pub const DEFAULT_SKETCH_WIDTH: usize = 80;
pub const DEFAULT_SKETCH_HEIGHT: usize = 40;

const TRAIL: char = '·';

struct Canvas {
    cells: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self { cells: vec![vec![' '; width]; height], width, height }
    }

    fn put(&mut self, col: usize, row: usize, c: char) {
        if col < self.width && row < self.height {
            self.cells[row][col] = c;
        }
    }

    fn put_if_blank(&mut self, col: usize, row: usize, c: char) {
        if col < self.width && row < self.height && self.cells[row][col] == ' ' {
            self.cells[row][col] = c;
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for row in &self.cells {
            let line: String = row.iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn scale(value: f64, lo: f64, hi: f64, cells: usize) -> usize {
    let span = hi - lo;
    if span <= 0.0 || cells <= 1 {
        return 0;
    }
    let t = ((value - lo) / span).clamp(0.0, 1.0);
    (t * (cells - 1) as f64) as usize
}

/// Draw `steps` onto a `width` × `height` canvas.
pub fn sketch(steps: &[Step], holds: &HoldSet, width: usize, height: usize) -> String {
    let width = width.max(2);
    let height = height.max(1);
    let mut canvas = Canvas::new(width, height);

    let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (holds.horizontal_range(), holds.vertical_range())
    else {
        return canvas.render();
    };

    // The limb marker takes the column right of the step number.
    let cells: Vec<(usize, usize)> = steps
        .iter()
        .map(|s| (scale(s.hold.x, x_lo, x_hi, width - 1), scale(s.hold.y, y_lo, y_hi, height)))
        .collect();

    for pair in cells.windows(2) {
        let (sx, sy) = (pair[0].0 as i64, pair[0].1 as i64);
        let (ex, ey) = (pair[1].0 as i64, pair[1].1 as i64);
        let total = (ex - sx).abs().max((ey - sy).abs());
        for k in 1..total {
            let x = sx + ((ex - sx) as f64 * k as f64 / total as f64) as i64;
            let y = sy + ((ey - sy) as f64 * k as f64 / total as f64) as i64;
            canvas.put_if_blank(x as usize, y as usize, TRAIL);
        }
    }

    for (step, &(col, row)) in steps.iter().zip(&cells) {
        let number = match step.index {
            n @ 0..=9 => char::from_digit(n as u32, 10).unwrap_or('#'),
            _ => '#',
        };
        canvas.put(col, row, number);
        canvas.put(col + 1, row, step.limb.marker());
    }

    canvas.render()
}
