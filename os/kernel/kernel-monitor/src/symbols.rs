//! # Symbol resolution
//!
//! The unwinder asks a [`SymbolResolver`] where a return address lives. The
//! kernel decides where the answer comes from; [`FunctionTable`] is a ready
//! implementation over a sorted, in-memory list of functions.
//!
//! Function names may carry a `:`-separated type suffix (`"monitor:F(0,25)"`).
//! Only the part before the colon is printed; [`SymbolInfo::fn_name_len`]
//! gives its length.

/// Source location of one instruction address.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SymbolInfo<'a> {
    pub file: &'a str,
    pub line: u32,
    /// Full symbol name; only the first `fn_name_len` bytes are the name.
    pub fn_name: &'a str,
    pub fn_name_len: usize,
    /// Start address of the enclosing function.
    pub fn_addr: u32,
}

impl<'a> SymbolInfo<'a> {
    /// The printable function name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.fn_name.get(..self.fn_name_len).unwrap_or(self.fn_name)
    }

    /// Distance from the function start to `addr`.
    #[must_use]
    pub const fn offset(&self, addr: u32) -> u32 {
        addr.wrapping_sub(self.fn_addr)
    }
}

/// Maps an instruction address to its source location.
pub trait SymbolResolver {
    /// `None` if `addr` lies outside every known function.
    fn resolve(&self, addr: u32) -> Option<SymbolInfo<'_>>;
}

impl<T: SymbolResolver + ?Sized> SymbolResolver for &T {
    #[inline]
    fn resolve(&self, addr: u32) -> Option<SymbolInfo<'_>> {
        (**self).resolve(addr)
    }
}

/// Line-number record: code at `addr` and above came from `line`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LineEntry {
    pub addr: u32,
    pub line: u32,
}

/// One function: its code range `[start, end)` and its line records,
/// sorted by address.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FunctionSymbol<'a> {
    pub name: &'a str,
    pub start: u32,
    pub end: u32,
    pub file: &'a str,
    pub lines: &'a [LineEntry],
}

impl FunctionSymbol<'_> {
    #[inline]
    #[must_use]
    pub const fn contains(&self, addr: u32) -> bool {
        self.start <= addr && addr < self.end
    }

    /// Line of the last record at or below `addr`; `0` if there is none.
    #[must_use]
    pub fn line_for(&self, addr: u32) -> u32 {
        let idx = self.lines.partition_point(|l| l.addr <= addr);
        idx.checked_sub(1).map_or(0, |i| self.lines[i].line)
    }
}

/// Why a function list was rejected by [`FunctionTable::new`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolTableError {
    #[error("function #{index} has an empty or inverted range")]
    EmptyRange { index: usize },
    #[error("function #{index} starts before the end of its predecessor")]
    Unsorted { index: usize },
}

/// A [`SymbolResolver`] over functions sorted by start address, with
/// non-overlapping ranges.
#[derive(Debug, Copy, Clone)]
pub struct FunctionTable<'a> {
    functions: &'a [FunctionSymbol<'a>],
}

impl<'a> FunctionTable<'a> {
    /// # Errors
    /// Rejects empty ranges and functions that are unsorted or overlap.
    pub fn new(functions: &'a [FunctionSymbol<'a>]) -> Result<Self, SymbolTableError> {
        for (index, f) in functions.iter().enumerate() {
            if f.start >= f.end {
                return Err(SymbolTableError::EmptyRange { index });
            }
            if index > 0 && functions[index - 1].end > f.start {
                return Err(SymbolTableError::Unsorted { index });
            }
        }
        Ok(Self { functions })
    }

    /// A table with no functions; every lookup fails.
    #[must_use]
    pub const fn empty() -> Self {
        Self { functions: &[] }
    }

    #[must_use]
    pub fn function_at(&self, addr: u32) -> Option<&'a FunctionSymbol<'a>> {
        let idx = self.functions.partition_point(|f| f.start <= addr);
        let f = self.functions.get(idx.checked_sub(1)?)?;
        f.contains(addr).then_some(f)
    }
}

impl SymbolResolver for FunctionTable<'_> {
    fn resolve(&self, addr: u32) -> Option<SymbolInfo<'_>> {
        let f = self.function_at(addr)?;
        Some(SymbolInfo {
            file: f.file,
            line: f.line_for(addr),
            fn_name: f.name,
            fn_name_len: f.name.find(':').unwrap_or(f.name.len()),
            fn_addr: f.start,
        })
    }
}
