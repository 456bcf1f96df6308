#![allow(dead_code)]

use kernel_memory_addresses::{PhysicalAddress, PhysicalPage, Size4K, VirtualAddress};
use kernel_monitor::{
    Console, EntryLookup, FunctionSymbol, FunctionTable, KernelLayout, LineEntry, Monitor,
    MonitorConfig, StackMemory,
};
use kernel_vmem::{FrameAlloc, PageEntryBits, PhysMapper};
use std::cell::{RefCell, UnsafeCell};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/// Page-table fake that remembers every lookup.
#[derive(Default)]
pub struct RecordingLookup {
    entries: BTreeMap<u32, PageEntryBits>,
    calls: RefCell<Vec<(u32, bool)>>,
}

impl RecordingLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `lookup_entry` return `entry` for the page at `va`.
    pub fn with(mut self, va: u32, entry: PageEntryBits) -> Self {
        self.entries.insert(va, entry);
        self
    }

    /// Addresses looked up so far, in call order.
    pub fn lookups(&self) -> Vec<u32> {
        self.calls.borrow().iter().map(|&(va, _)| va).collect()
    }

    pub fn any_create(&self) -> bool {
        self.calls.borrow().iter().any(|&(_, create)| create)
    }
}

impl EntryLookup for RecordingLookup {
    fn lookup_entry(&self, va: VirtualAddress, create: bool) -> Option<PageEntryBits> {
        self.calls.borrow_mut().push((va.as_u32(), create));
        self.entries.get(&va.as_u32()).copied()
    }
}

/// A leaf entry mapping to `pa` with the given flags.
pub fn leaf(pa: u32, flags: PageEntryBits) -> PageEntryBits {
    flags.with_frame_address(PhysicalAddress::new(pa))
}

/// Stack fake: a sparse word map plus a log of every address read.
pub struct FakeStack {
    fp: u32,
    words: BTreeMap<u32, u32>,
    reads: RefCell<Vec<u32>>,
}

impl FakeStack {
    pub fn new(fp: u32) -> Self {
        Self {
            fp,
            words: BTreeMap::new(),
            reads: RefCell::new(Vec::new()),
        }
    }

    /// Lay out one frame header plus five argument words at `fp`.
    pub fn frame(mut self, fp: u32, saved_fp: u32, ret: u32, args: [u32; 5]) -> Self {
        self.words.insert(fp, saved_fp);
        self.words.insert(fp + 4, ret);
        for (i, arg) in (0u32..).zip(args) {
            self.words.insert(fp + 8 + 4 * i, arg);
        }
        self
    }

    pub fn forget(mut self, addr: u32) -> Self {
        self.words.remove(&addr);
        self
    }

    pub fn reads(&self) -> Vec<u32> {
        self.reads.borrow().clone()
    }
}

impl StackMemory for FakeStack {
    fn frame_pointer(&self) -> u32 {
        self.fp
    }

    fn read_word(&self, addr: u32) -> Option<u32> {
        self.reads.borrow_mut().push(addr);
        self.words.get(&addr).copied()
    }
}

/// Console fake: scripted input lines, captured output.
pub struct Transcript {
    pub output: String,
    input: VecDeque<String>,
    pub reads: usize,
}

impl Transcript {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            output: String::new(),
            input: lines.iter().map(|l| (*l).to_owned()).collect(),
            reads: 0,
        }
    }
}

impl fmt::Write for Transcript {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.output.push_str(s);
        Ok(())
    }
}

impl Console for Transcript {
    fn read_line<'b>(&mut self, buf: &'b mut [u8]) -> Option<&'b str> {
        let line = self.input.pop_front()?;
        self.reads += 1;
        let n = line.len().min(buf.len());
        buf[..n].copy_from_slice(&line.as_bytes()[..n]);
        // Echo, as a terminal would.
        self.output.push_str(&line);
        self.output.push('\n');
        std::str::from_utf8(&buf[..n]).ok()
    }
}

pub const INIT_LINES: [LineEntry; 2] = [
    LineEntry {
        addr: 0xf010_0040,
        line: 13,
    },
    LineEntry {
        addr: 0xf010_0090,
        line: 16,
    },
];

pub const FUNCTIONS: [FunctionSymbol<'static>; 2] = [
    FunctionSymbol {
        name: "test_backtrace:F(0,25)",
        start: 0xf010_0040,
        end: 0xf010_00a0,
        file: "kern/init.c",
        lines: &INIT_LINES,
    },
    FunctionSymbol {
        name: "i386_init:F(0,25)",
        start: 0xf010_00a0,
        end: 0xf010_0120,
        file: "kern/init.c",
        lines: &[LineEntry {
            addr: 0xf010_00a0,
            line: 24,
        }],
    },
];

pub fn symbols() -> FunctionTable<'static> {
    FunctionTable::new(&FUNCTIONS).unwrap()
}

pub fn layout() -> KernelLayout {
    KernelLayout {
        start: PhysicalAddress::new(0x0010_000c),
        entry: VirtualAddress::new(0xf010_000c),
        etext: VirtualAddress::new(0xf010_1a2d),
        edata: VirtualAddress::new(0xf011_2300),
        end: VirtualAddress::new(0xf011_2940),
    }
}

pub fn monitor<L: EntryLookup, S: StackMemory>(
    lookup: L,
    stack: S,
) -> Monitor<L, S, FunctionTable<'static>> {
    Monitor::new(lookup, stack, symbols(), layout(), MonitorConfig::new())
}

/// Run one line and capture what it printed.
pub fn run_line<L: EntryLookup, S: StackMemory>(
    monitor: &Monitor<L, S, FunctionTable<'static>>,
    line: &str,
) -> (String, Result<kernel_monitor::Flow, String>) {
    let mut out = String::new();
    let result = monitor.run_command(line, &mut out).map_err(|e| e.to_string());
    (out, result)
}

/// Bump allocator over simulated physical frames.
pub struct BumpAlloc {
    next: u32,
    end: u32,
}

impl BumpAlloc {
    pub fn new(start: u32, end: u32) -> Self {
        Self { next: start, end }
    }
}

impl FrameAlloc for BumpAlloc {
    fn alloc_4k(&mut self) -> Option<PhysicalPage<Size4K>> {
        if self.next + 4096 > self.end {
            return None;
        }
        let p = self.next;
        self.next += 4096;
        Some(PhysicalAddress::new(p).page())
    }
}

#[repr(align(4096))]
struct Frame([u8; 4096]);

/// Simulated physical memory: frame `n` lives at physical address `n * 4096`.
pub struct TestPhys {
    frames: Vec<UnsafeCell<Frame>>,
}

impl TestPhys {
    pub fn with_frames(n: usize) -> Self {
        Self {
            frames: (0..n).map(|_| UnsafeCell::new(Frame([0; 4096]))).collect(),
        }
    }
}

impl PhysMapper for TestPhys {
    unsafe fn phys_to_mut<'a, T>(&self, pa: PhysicalAddress) -> &'a mut T {
        let idx = (pa.as_u32() >> 12) as usize;
        let ptr = self.frames[idx].get().cast::<T>();
        // SAFETY: Each frame is 4 KiB-aligned and the tests only place page tables in it.
        unsafe { &mut *ptr }
    }

    unsafe fn phys_to_ref<'a, T>(&self, pa: PhysicalAddress) -> &'a T {
        let idx = (pa.as_u32() >> 12) as usize;
        let ptr = self.frames[idx].get().cast::<T>().cast_const();
        // SAFETY: As above.
        unsafe { &*ptr }
    }
}
