mod common;

use common::{FakeStack, RecordingLookup, monitor, run_line};
use kernel_monitor::{COMMANDS, Flow, MonitorError};

const HELP: &str = "help - Display this list of commands\n\
                    kerninfo - Display information about the kernel\n\
                    backtrace - show the kernel stack backtrace\n\
                    showmappings - show mapping of the physical address range\n";

#[test]
fn help_lists_commands_in_table_order_under_either_name() {
    let m = monitor(RecordingLookup::new(), FakeStack::new(0));
    for line in ["help", "h", "  h  extra args  "] {
        let (out, result) = run_line(&m, line);
        assert_eq!(result, Ok(Flow::Continue));
        assert_eq!(out, HELP);
    }
    let names: Vec<_> = COMMANDS.iter().map(|c| c.name).collect();
    assert_eq!(names, ["help", "kerninfo", "backtrace", "showmappings"]);
}

#[test]
fn kerninfo_under_either_name() {
    let m = monitor(RecordingLookup::new(), FakeStack::new(0));
    let (long, _) = run_line(&m, "kerninfo");
    let (short, _) = run_line(&m, "ki");
    assert_eq!(long, short);
    assert!(long.starts_with("Special kernel symbols:\n"));
    assert!(long.ends_with("Kernel executable memory footprint: 75KB\n"));
}

#[test]
fn blank_line_does_nothing() {
    let lookup = RecordingLookup::new();
    let m = monitor(&lookup, FakeStack::new(0));
    for line in ["", "   ", "\t\r\n"] {
        let (out, result) = run_line(&m, line);
        assert_eq!(result, Ok(Flow::Continue));
        assert!(out.is_empty());
    }
    assert!(lookup.lookups().is_empty());
}

#[test]
fn unknown_command_quotes_the_name() {
    let m = monitor(RecordingLookup::new(), FakeStack::new(0));
    let mut out = String::new();
    let err = m.run_command("  reboot now", &mut out).unwrap_err();
    assert_eq!(err, MonitorError::UnknownCommand("reboot"));
    assert_eq!(err.to_string(), "Unknown command 'reboot'");
    assert_eq!(err.code(), 0);
    assert!(out.is_empty());

    // Matching is case-sensitive.
    assert!(matches!(
        m.run_command("HELP", &mut out),
        Err(MonitorError::UnknownCommand("HELP"))
    ));
}

#[test]
fn overlong_line_is_discarded() {
    let lookup = RecordingLookup::new();
    let m = monitor(&lookup, FakeStack::new(0));
    let line = format!("sm{}", " f0000000".repeat(15));
    let mut out = String::new();
    let err = m.run_command(&line, &mut out).unwrap_err();
    assert_eq!(err, MonitorError::TooManyArguments);
    assert_eq!(err.to_string(), "Too many arguments (max 16)");
    assert_eq!(err.code(), 0);
    assert!(lookup.lookups().is_empty());
}

#[test]
fn fifteen_tokens_still_dispatch() {
    let m = monitor(RecordingLookup::new(), FakeStack::new(0));
    let line = format!("help{}", " x".repeat(14));
    let (out, result) = run_line(&m, &line);
    assert_eq!(result, Ok(Flow::Continue));
    assert!(out.starts_with("help - "));
}
