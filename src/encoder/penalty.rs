//! Mask penalty rules; lower totals scan more reliably

use crate::models::ModuleGrid;

const N1: u32 = 3;
const N2: u32 = 3;
const N3: u32 = 40;
const N4: u32 = 10;

const FINDER_CORE: [bool; 7] = [true, false, true, true, true, false, true];

/// Per-rule breakdown of a penalty score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Penalty {
    pub runs: u32,
    pub blocks: u32,
    pub finder_like: u32,
    pub balance: u32,
}

impl Penalty {
    pub fn total(&self) -> u32 {
        self.runs + self.blocks + self.finder_like + self.balance
    }
}

/// Score a fully drawn grid
pub fn evaluate(grid: &ModuleGrid) -> Penalty {
    let size = grid.size();
    let mut penalty = Penalty::default();

    for i in 0..size {
        let row: Vec<bool> = grid.row(i).collect();
        let col: Vec<bool> = grid.column(i).collect();
        penalty.runs += run_penalty(&row) + run_penalty(&col);
        penalty.finder_like += finder_penalty(&row) + finder_penalty(&col);
    }

    for row in 0..size.saturating_sub(1) {
        for col in 0..size - 1 {
            let c = grid.is_dark(row, col);
            if c == grid.is_dark(row, col + 1)
                && c == grid.is_dark(row + 1, col)
                && c == grid.is_dark(row + 1, col + 1)
            {
                penalty.blocks += N2;
            }
        }
    }

    let total = size * size;
    if total > 0 {
        let percent = (grid.dark_count() * 100 / total) as i64;
        penalty.balance = N4 * ((percent - 50).unsigned_abs() / 5) as u32;
    }

    penalty
}

/// Total penalty of a fully drawn grid
pub fn score(grid: &ModuleGrid) -> u32 {
    evaluate(grid).total()
}

/// Rule 1: `3 + (len - 5)` for each same-colour run of five or more
fn run_penalty(line: &[bool]) -> u32 {
    let mut penalty = 0;
    let mut run = 0;
    for (i, &cell) in line.iter().enumerate() {
        if i > 0 && cell == line[i - 1] {
            run += 1;
        } else {
            penalty += run_cost(run);
            run = 1;
        }
    }
    penalty + run_cost(run)
}

fn run_cost(run: u32) -> u32 {
    if run >= 5 { N1 + run - 5 } else { 0 }
}

/// Rule 3: dark-light-dark×3-light-dark with four light modules on either
/// side; cells beyond the edge count as light
fn finder_penalty(line: &[bool]) -> u32 {
    let n = line.len() as isize;
    let light = |i: isize| i < 0 || i >= n || !line[i as usize];

    let mut penalty = 0;
    for start in 0..(n - 6).max(0) {
        let core = FINDER_CORE
            .iter()
            .enumerate()
            .all(|(k, &dark)| line[start as usize + k] == dark);
        if !core {
            continue;
        }
        let before = (start - 4..start).all(light);
        let after = (start + 7..start + 11).all(light);
        if before || after {
            penalty += N3;
        }
    }
    penalty
}
