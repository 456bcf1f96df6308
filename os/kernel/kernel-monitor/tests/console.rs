mod common;

use common::{FakeStack, RecordingLookup, Transcript, leaf, monitor};
use kernel_monitor::console;
use kernel_monitor::{Flow, MonitorError};
use kernel_vmem::PageEntryBits;

const BANNER: &str = "Welcome to the kernel monitor!\nType 'help' for a list of commands.\n";

#[test]
fn session_survives_every_kind_of_bad_input() {
    let lookup =
        RecordingLookup::new().with(0xf000_0000, leaf(0, PageEntryBits::kernel_rw()));
    let m = monitor(&lookup, FakeStack::new(0));
    let mut console = Transcript::new(&[
        "frobnicate",
        "sm 10g0",
        "sm f0001000 f0000000",
        "sm",
        "",
        "sm f0000000",
    ]);

    m.run(&mut console);

    assert_eq!(console.reads, 6);
    assert_eq!(
        console.output,
        format!(
            "{BANNER}\
             K> frobnicate\n\
             Unknown command 'frobnicate'\n\
             K> sm 10g0\n\
             invalid start address.\n\
             K> sm f0001000 f0000000\n\
             start address higher than end address\n\
             K> sm\n\
             require one or two arguments,\n\
             i.e., start [and end] address.\n\
             K> \n\
             K> sm f0000000\n\
             VA [0xf0000000] mapped at PA [0x00000000], permission: --------(W)(P)\n\
             K> "
        )
    );
}

#[test]
fn loop_ends_when_a_handler_asks_to_exit() {
    let mut console = Transcript::new(&["one", "quit", "never read"]);
    let mut seen = Vec::new();

    console::run(&mut console, "> ", |line, _out| {
        seen.push(line.to_owned());
        Ok(if line == "quit" { Flow::Exit } else { Flow::Continue })
    });

    assert_eq!(seen, ["one", "quit"]);
    assert_eq!(console.reads, 2);
    assert!(console.output.ends_with("> one\n> quit\n"));
}

#[test]
fn handler_errors_are_printed_and_do_not_stop_the_loop() {
    let mut console = Transcript::new(&["a", "b"]);
    let mut calls = 0;

    console::run(&mut console, "> ", |_line, _out| {
        calls += 1;
        Err(MonitorError::Usage)
    });

    assert_eq!(calls, 2);
    assert_eq!(
        console
            .output
            .matches("require one or two arguments,\ni.e., start [and end] address.\n")
            .count(),
        2
    );
}

#[test]
fn closed_input_leaves_after_the_banner_and_one_prompt() {
    let m = monitor(RecordingLookup::new(), FakeStack::new(0));
    let mut console = Transcript::new(&[]);
    m.run(&mut console);
    assert_eq!(console.output, format!("{BANNER}K> "));
}
