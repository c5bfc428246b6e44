mod support;

use kernel_info::memory::{KERNEL_STACK_FLOOR, KERNEL_STACK_TOP, kernel_stack_top};
use kernel_monitor::{Monitor, MonitorOptions, Symbol, SymbolTable};
use support::{FakeMachine, ScriptedConsole, monitor, run_line};

static SYMBOLS: &[Symbol] = &[
    Symbol {
        start: 0xffff_ffff_8010_0000,
        end: 0xffff_ffff_8010_0100,
        function: "kernel_main",
        file: "kernel/src/main.rs",
        lines: &[(0xffff_ffff_8010_0000, 40), (0xffff_ffff_8010_0040, 44)],
    },
    Symbol {
        start: 0xffff_ffff_8010_0200,
        end: 0xffff_ffff_8010_0300,
        function: "trap_dispatch",
        file: "kernel/src/trap.rs",
        lines: &[(0xffff_ffff_8010_0200, 7)],
    },
];

/// Writes a frame at `fp`: saved rbp, return address, six argument words.
fn frame(machine: FakeMachine, fp: u64, next: u64, ret: u64, first_arg: u64) -> FakeMachine {
    let mut m = machine.with_word(fp, next).with_word(fp + 8, ret);
    for i in 0..6 {
        m = m.with_word(fp + 16 + i * 8, first_arg + i);
    }
    m
}

#[test]
fn null_frame_pointer_prints_only_the_header() {
    let mut m = monitor(FakeMachine::new());
    assert_eq!(run_line(&mut m, "backtrace"), "Stack backtrace:\n");
}

#[test]
fn walks_the_chain_and_resolves_symbols() {
    let fp1 = KERNEL_STACK_TOP - 0x100;
    let fp2 = KERNEL_STACK_TOP - 0x80;
    let machine = FakeMachine::new().with_frame_pointer(fp1);
    let machine = frame(machine, fp1, fp2, 0xffff_ffff_8010_0210, 1);
    let machine = frame(machine, fp2, 0, 0xffff_ffff_8010_0048, 0x10);
    let mut m = monitor(machine.with_symbols(SymbolTable::new(SYMBOLS)));

    let out = run_line(&mut m, "backtrace");
    let expected = format!(
        "Stack backtrace:\n\
         \x20 rbp {fp1:016x}  rip ffffffff80100210  args 0000000000000001 0000000000000002 0000000000000003 0000000000000004 0000000000000005 0000000000000006\n\
         \x20        kernel/src/trap.rs:7: trap_dispatch+16\n\
         \x20 rbp {fp2:016x}  rip ffffffff80100048  args 0000000000000010 0000000000000011 0000000000000012 0000000000000013 0000000000000014 0000000000000015\n\
         \x20        kernel/src/main.rs:44: kernel_main+72\n"
    );
    assert_eq!(out, expected);
}

#[test]
fn unknown_return_addresses() {
    let fp = KERNEL_STACK_TOP - 0x40;
    let machine = frame(FakeMachine::new().with_frame_pointer(fp), fp, 0, 0x1234, 0);
    let mut m = monitor(machine);
    let out = run_line(&mut m, "backtrace");
    assert!(out.ends_with("         <unknown>:0: <unknown>+0\n"), "{out}");
    assert_eq!(out.lines().count(), 3);
}

#[test]
fn stops_below_the_kernel_stack_while_an_env_runs() {
    let user_fp = 0x7fff_ff00;
    let fp = KERNEL_STACK_TOP - 0x40;
    let machine = FakeMachine::new().with_frame_pointer(fp).with_env(0x1001);
    let machine = frame(machine, fp, user_fp, 0x1234, 0);
    let mut m = monitor(machine);

    let out = run_line(&mut m, "backtrace");
    let last = out.lines().last().unwrap();
    assert_eq!(
        last,
        "  <frame pointer 0x000000007fffff00: below kernel stack, continues in another address space>"
    );
    assert_eq!(out.lines().count(), 4);

    // Only the kernel frame was read, eight words.
    let (_, machine) = m.into_parts();
    assert_eq!(machine.reads.get(), 8);
}

#[test]
fn frames_on_any_cpu_stack_are_kernel_frames() {
    let fp1 = kernel_stack_top(2) - 0x100;
    let fp2 = kernel_stack_top(2) - 0x40;
    let user_fp = 0x7fff_ff00;
    let machine = FakeMachine::new().with_frame_pointer(fp1).with_env(0x1001);
    let machine = frame(machine, fp1, fp2, 0x1234, 0);
    let machine = frame(machine, fp2, user_fp, 0x5678, 0);
    let mut m = monitor(machine);

    let out = run_line(&mut m, "backtrace");
    assert!(out.contains(&format!("  rbp {fp1:016x}")), "{out}");
    assert!(out.contains(&format!("  rbp {fp2:016x}")), "{out}");
    assert!(out.ends_with(
        "  <frame pointer 0x000000007fffff00: below kernel stack, continues in another address space>\n"
    ));
}

#[test]
fn floor_is_not_applied_without_an_env() {
    let fp = KERNEL_STACK_FLOOR - 0x100;
    let machine = frame(FakeMachine::new().with_frame_pointer(fp), fp, 0, 0x1234, 0);
    let mut m = monitor(machine);
    let out = run_line(&mut m, "backtrace");
    assert!(out.contains(&format!("  rbp {fp:016x}")));
    assert!(!out.contains("below kernel stack"));
}

#[test]
fn cyclic_chain_hits_the_frame_limit() {
    let fp = KERNEL_STACK_TOP - 0x40;
    let machine = frame(FakeMachine::new().with_frame_pointer(fp), fp, fp, 0x1234, 0);
    let mut m = Monitor::new(
        ScriptedConsole::default(),
        machine,
        MonitorOptions::default().with_max_frames(3),
    );

    let out = run_line(&mut m, "backtrace");
    assert_eq!(out.matches("  rbp ").count(), 3);
    assert!(out.ends_with("  <frame limit reached>\n"));
}
