//! A scripted console and a model machine for driving the monitor in tests.

#![allow(dead_code)]

use kernel_info::layout::KernelLayout;
use kernel_info::memory::{HHDM_BASE, KERNEL_BASE, PHYS_LOAD};
use kernel_memory_addresses::{PageSize, PhysicalAddress, Size2M, Size4K, VirtualAddress};
use kernel_monitor::{
    Console, EnvId, Machine, Monitor, MonitorOptions, SymbolInfo, SymbolTable,
};
use kernel_vmem::{Leaf, MappedSize, PageEntryBits, PageWalk, PhysMapper};
use std::cell::Cell;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/// Feeds prepared lines to the monitor and records everything it prints.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    script: VecDeque<Option<String>>,
    pub output: String,
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            script: lines.iter().map(|l| Some((*l).to_string())).collect(),
            ..Self::default()
        }
    }

    /// `None` entries make `read_line` fail once.
    pub fn with_gaps(lines: &[Option<&str>]) -> Self {
        Self {
            script: lines.iter().map(|l| l.map(str::to_string)).collect(),
            ..Self::default()
        }
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl fmt::Write for ScriptedConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.output.push_str(s);
        Ok(())
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.script
            .pop_front()
            .unwrap_or_else(|| panic!("script exhausted at prompt {prompt:?}"))
    }
}

/// Sparse page tables: 4 KiB leaves and 2 MiB leaves keyed by their base.
#[derive(Debug, Default)]
pub struct FakePages {
    small: BTreeMap<u64, PageEntryBits>,
    large: BTreeMap<u64, PageEntryBits>,
    /// Number of leaf lookups performed.
    pub lookups: usize,
}

impl PageWalk for FakePages {
    fn leaf_mut(&mut self, va: VirtualAddress) -> Option<Leaf<'_>> {
        self.lookups += 1;
        if let Some(e) = self.small.get_mut(&va.align_down::<Size4K>().as_u64()) {
            if !e.present() {
                return None;
            }
            return Some(Leaf::new(e, MappedSize::Size4K));
        }
        self.large
            .get_mut(&va.align_down::<Size2M>().as_u64())
            .filter(|e| e.present())
            .map(|e| Leaf::new(e, MappedSize::Size2M))
    }
}

/// A machine whose memory, page tables, stack and symbols are plain data.
pub struct FakeMachine {
    pub pages: FakePages,
    memory: BTreeMap<u64, u8>,
    pub reads: Cell<usize>,
    pub frame_pointer: u64,
    pub symbols: SymbolTable,
    pub env: Option<EnvId>,
    pub layout: KernelLayout,
    pub flushed: Vec<VirtualAddress>,
    pub power_off_calls: usize,
    pub reset_calls: usize,
}

pub fn test_layout() -> KernelLayout {
    KernelLayout {
        start: PhysicalAddress::new(PHYS_LOAD),
        entry: VirtualAddress::new(KERNEL_BASE + 0x10_0000),
        etext: VirtualAddress::new(KERNEL_BASE + 0x10_4000),
        edata: VirtualAddress::new(KERNEL_BASE + 0x10_6000),
        end: VirtualAddress::new(KERNEL_BASE + 0x10_6801),
    }
}

impl Default for FakeMachine {
    fn default() -> Self {
        Self {
            pages: FakePages::default(),
            memory: BTreeMap::new(),
            reads: Cell::new(0),
            frame_pointer: 0,
            symbols: SymbolTable::empty(),
            env: None,
            layout: test_layout(),
            flushed: Vec::new(),
            power_off_calls: 0,
            reset_calls: 0,
        }
    }
}

impl FakeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map the 4 KiB page at `va` to `pa`, present.
    pub fn map(mut self, va: u64, pa: u64, user: bool, writable: bool) -> Self {
        let mut e = PageEntryBits::new()
            .with_present(true)
            .with_user_access(user)
            .with_writable(writable);
        e.set_physical_address(PhysicalAddress::new(pa));
        self.pages.small.insert(va, e);
        self
    }

    /// Map the 2 MiB page at `va` to `pa`, present and writable.
    pub fn map_large(mut self, va: u64, pa: u64) -> Self {
        let mut e = PageEntryBits::new()
            .with_present(true)
            .with_writable(true)
            .with_large_page(true);
        e.set_physical_address(PhysicalAddress::new(pa));
        self.pages.large.insert(va, e);
        self
    }

    pub fn with_bytes(mut self, va: u64, bytes: &[u8]) -> Self {
        for (addr, b) in (va..).zip(bytes) {
            self.memory.insert(addr, *b);
        }
        self
    }

    pub fn with_word(self, va: u64, word: u64) -> Self {
        self.with_bytes(va, &word.to_le_bytes())
    }

    pub fn with_frame_pointer(mut self, fp: u64) -> Self {
        self.frame_pointer = fp;
        self
    }

    pub fn with_env(mut self, env: EnvId) -> Self {
        self.env = Some(env);
        self
    }

    pub fn with_symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    /// The 4 KiB leaf installed at `va`.
    pub fn entry(&self, va: u64) -> PageEntryBits {
        self.pages.small[&va]
    }
}

impl PhysMapper for FakeMachine {
    fn phys_to_virt(&self, pa: PhysicalAddress) -> VirtualAddress {
        VirtualAddress::new(HHDM_BASE + pa.as_u64())
    }
}

impl Machine for FakeMachine {
    fn page_walk(&mut self) -> &mut dyn PageWalk {
        &mut self.pages
    }

    fn flush_page(&mut self, va: VirtualAddress) {
        self.flushed.push(va);
    }

    fn read_byte(&self, va: VirtualAddress) -> u8 {
        self.reads.set(self.reads.get() + 1);
        self.memory.get(&va.as_u64()).copied().unwrap_or(0)
    }

    fn read_word(&self, va: VirtualAddress) -> u64 {
        self.reads.set(self.reads.get() + 1);
        let mut bytes = [0u8; 8];
        for (addr, b) in (va.as_u64()..).zip(bytes.iter_mut()) {
            *b = self.memory.get(&addr).copied().unwrap_or(0);
        }
        u64::from_le_bytes(bytes)
    }

    fn frame_pointer(&self) -> u64 {
        self.frame_pointer
    }

    fn resolve(&self, addr: u64) -> Option<SymbolInfo<'_>> {
        self.symbols.resolve(addr)
    }

    fn current_env(&self) -> Option<EnvId> {
        self.env
    }

    fn layout(&self) -> KernelLayout {
        self.layout
    }

    fn power_off(&mut self) {
        self.power_off_calls += 1;
    }

    fn reset(&mut self) {
        self.reset_calls += 1;
    }
}

pub type TestMonitor = Monitor<ScriptedConsole, FakeMachine>;

pub fn monitor(machine: FakeMachine) -> TestMonitor {
    Monitor::new(ScriptedConsole::default(), machine, MonitorOptions::default())
}

/// Run one line without a trap frame and return what it printed.
pub fn run_line(monitor: &mut TestMonitor, line: &str) -> String {
    monitor.run_command(line, None);
    monitor.console_mut().take_output()
}

/// Page size used by the mapping tests.
pub const PAGE: u64 = Size4K::SIZE;
