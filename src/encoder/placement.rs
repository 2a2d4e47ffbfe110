//! Module placement: function patterns, zigzag data fill, masking and
//! format/version information

use crate::ecc::bch;
use crate::error::EncodeError;
use crate::models::{ECLevel, MaskPattern, Module, ModuleGrid, Version};
use crate::tables::alignment_positions;

/// Grid with every function pattern drawn and format/version cells reserved
pub fn function_patterns(version: Version) -> ModuleGrid {
    let size = version.size();
    let mut grid = ModuleGrid::new(size);

    // Finders with their separators, clipped at the symbol edge
    for (row, col) in [(3, 3), (3, size - 4), (size - 4, 3)] {
        draw_finder(&mut grid, row, col);
    }

    for i in 0..size {
        if grid.get(6, i) == Module::Empty {
            grid.set(6, i, Module::Function(i % 2 == 0));
        }
        if grid.get(i, 6) == Module::Empty {
            grid.set(i, 6, Module::Function(i % 2 == 0));
        }
    }

    let positions = alignment_positions(version);
    let last = positions.len().saturating_sub(1);
    for (i, &row) in positions.iter().enumerate() {
        for (j, &col) in positions.iter().enumerate() {
            let overlaps_finder =
                (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
            if !overlaps_finder {
                draw_alignment(&mut grid, row, col);
            }
        }
    }

    // Format areas around the finders
    for i in 0..9 {
        if grid.get(8, i) == Module::Empty {
            grid.set(8, i, Module::Reserved);
        }
        if grid.get(i, 8) == Module::Empty {
            grid.set(i, 8, Module::Reserved);
        }
    }
    for i in 0..8 {
        grid.set(8, size - 1 - i, Module::Reserved);
    }
    for i in 0..7 {
        grid.set(size - 1 - i, 8, Module::Reserved);
    }
    grid.set(size - 8, 8, Module::Function(true));

    if version.number() >= 7 {
        for i in 0..18 {
            let a = size - 11 + i % 3;
            let b = i / 3;
            grid.set(b, a, Module::Reserved);
            grid.set(a, b, Module::Reserved);
        }
    }

    grid
}

fn draw_finder(grid: &mut ModuleGrid, row: usize, col: usize) {
    let size = grid.size() as isize;
    for dr in -4isize..=4 {
        for dc in -4isize..=4 {
            let r = row as isize + dr;
            let c = col as isize + dc;
            if (0..size).contains(&r) && (0..size).contains(&c) {
                let dist = dr.abs().max(dc.abs());
                grid.set(
                    r as usize,
                    c as usize,
                    Module::Function(dist != 2 && dist != 4),
                );
            }
        }
    }
}

fn draw_alignment(grid: &mut ModuleGrid, row: usize, col: usize) {
    for dr in -2isize..=2 {
        for dc in -2isize..=2 {
            let dist = dr.abs().max(dc.abs());
            grid.set(
                (row as isize + dr) as usize,
                (col as isize + dc) as usize,
                Module::Function(dist != 1),
            );
        }
    }
}

/// Fill every empty cell in zigzag order; cells past the last codeword get
/// light remainder bits
pub fn place_data(grid: &mut ModuleGrid, codewords: &[u8]) -> Result<(), EncodeError> {
    let size = grid.size();
    let total_bits = codewords.len() * 8;
    let mut index = 0;

    let mut right = size as isize - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        let upward = ((right + 1) & 2) == 0;
        for vert in 0..size {
            let row = if upward { size - 1 - vert } else { vert };
            for j in 0..2 {
                let col = (right - j) as usize;
                if grid.get(row, col) != Module::Empty {
                    continue;
                }
                let bit = index < total_bits && (codewords[index / 8] >> (7 - index % 8)) & 1 == 1;
                grid.set(row, col, Module::Data(bit));
                index += 1;
            }
        }
        right -= 2;
    }

    if index < total_bits {
        return Err(EncodeError::MatrixPlacement(format!(
            "{} codeword bits but only {} data modules",
            total_bits, index
        )));
    }
    if index - total_bits >= 8 {
        return Err(EncodeError::MatrixPlacement(format!(
            "{} data modules left over after {} codeword bits",
            index - total_bits,
            total_bits
        )));
    }
    Ok(())
}

/// XOR the mask over data modules only
pub fn apply_mask(grid: &mut ModuleGrid, mask: MaskPattern) {
    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            if let Module::Data(dark) = grid.get(row, col) {
                if mask.is_masked(row, col) {
                    grid.set(row, col, Module::Data(!dark));
                }
            }
        }
    }
}

/// Write both format copies and, from version 7, both version blocks
pub fn draw_format_and_version(
    grid: &mut ModuleGrid,
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
) {
    let size = grid.size();
    let bits = bch::format_bits(ec_level, mask);
    let bit = |i: usize| Module::Function((bits >> i) & 1 == 1);

    // Copy around the top-left finder
    for i in 0..6 {
        grid.set(i, 8, bit(i));
    }
    grid.set(7, 8, bit(6));
    grid.set(8, 8, bit(7));
    grid.set(8, 7, bit(8));
    for i in 9..15 {
        grid.set(8, 14 - i, bit(i));
    }

    // Copy split between the top-right and bottom-left finders
    for i in 0..8 {
        grid.set(8, size - 1 - i, bit(i));
    }
    for i in 8..15 {
        grid.set(size - 15 + i, 8, bit(i));
    }
    grid.set(size - 8, 8, Module::Function(true));

    if version.number() >= 7 {
        let bits = bch::version_bits(version);
        for i in 0..18 {
            let module = Module::Function((bits >> i) & 1 == 1);
            let a = size - 11 + i % 3;
            let b = i / 3;
            grid.set(b, a, module);
            grid.set(a, b, module);
        }
    }
}
