/// A single cell of a symbol under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    /// Not yet written; belongs to the data region
    Empty,
    /// Held for format/version information, filled after masking
    Reserved,
    /// Finder, separator, timing, alignment, dark module or format/version bit
    Function(bool),
    /// Data or error correction bit (subject to masking)
    Data(bool),
}

impl Module {
    /// Whether the module is painted dark
    pub fn is_dark(self) -> bool {
        matches!(self, Module::Function(true) | Module::Data(true))
    }

    /// Whether the module is outside the data region
    pub fn is_function(self) -> bool {
        matches!(self, Module::Reserved | Module::Function(_))
    }
}

/// Square module arena addressed by (row, col)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    size: usize,
    modules: Vec<Module>,
}

impl ModuleGrid {
    /// Empty grid of `size × size` modules
    pub fn new(size: usize) -> Self {
        Self {
            size,
            modules: vec![Module::Empty; size * size],
        }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Module {
        self.modules[row * self.size + col]
    }

    /// Overwrite the module at (row, col)
    pub fn set(&mut self, row: usize, col: usize, module: Module) {
        self.modules[row * self.size + col] = module;
    }

    /// Whether the module at (row, col) is dark
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_dark()
    }

    /// Row-major iterator over all modules
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(move |col| self.is_dark(row, col))
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, col: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(move |row| self.is_dark(row, col))
    }

    /// Count of modules still `Empty`
    pub fn empty_count(&self) -> usize {
        self.modules.iter().filter(|m| **m == Module::Empty).count()
    }

    /// Count of dark modules
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_dark()).count()
    }
}
