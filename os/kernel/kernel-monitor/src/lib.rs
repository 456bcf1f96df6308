//! # Kernel Monitor
//!
//! An interactive diagnostic console that runs inside the kernel and inspects
//! live machine state: the page tables of the running kernel and the call
//! stack at the point the monitor was entered.
//!
//! ```text
//!  K> sm f0100000 f0102000
//!  VA [0xf0100000] mapped at PA [0x00100000], permission: --------(W)(P)
//!  VA [0xf0101000] mapped at PA [0x00101000], permission: --------(W)(P)
//!  VA [0xf0102000] mapped at PA [0x00102000], permission: --------(W)(P)
//! ```
//!
//! ## Pieces
//!
//! | Module | Role |
//! |---|---|
//! | [`tokenizer`] | Split one line into at most `MAX_ARGS - 1` borrowed tokens. |
//! | [`commands`] | The fixed [`COMMANDS`] table and `help`. |
//! | [`Monitor`] | Dispatch a line to the matching command. |
//! | [`mappings`] | `showmappings`: hex parsing, page walk, permission summary. |
//! | [`backtrace`] | Frame-pointer unwinder ([`FrameChain`]) and its report. |
//! | [`symbols`] | The [`SymbolResolver`] seam and the in-memory [`FunctionTable`]. |
//! | [`kerninfo`] | Kernel image layout report. |
//! | [`console`] | The [`Console`] seam and the read/dispatch loop. |
//! | [`logging`] | Installing the `log` sink. |
//! | `live` | Glue for a running i386 kernel (CR3, `ebp`, COM1). |
//!
//! All collaborators are traits ([`EntryLookup`], [`StackMemory`],
//! [`SymbolResolver`], [`Console`]), so every command runs on the host against
//! fakes.
//!
//! ## Failure model
//!
//! Nothing the operator types can end the monitor. Malformed input surfaces as
//! a [`MonitorError`], which the loop prints as one line before prompting again.
//! Only a handler returning [`Flow::Exit`], or the console closing its input,
//! leaves the loop.

#![cfg_attr(not(test), no_std)]
#![allow(unsafe_code)]

pub mod backtrace;
pub mod commands;
pub mod config;
pub mod console;
mod dispatch;
mod error;
pub mod kerninfo;
#[cfg(all(feature = "qemu", target_arch = "x86"))]
pub mod live;
pub mod logging;
pub mod mappings;
pub mod symbols;
pub mod tokenizer;

pub use crate::backtrace::{ChainEnd, FrameChain, FrameRecord, StackBounds, StackMemory, UnwindConfig};
pub use crate::commands::{COMMANDS, Command, CommandKind};
pub use crate::config::MonitorConfig;
pub use crate::console::Console;
pub use crate::dispatch::Monitor;
pub use crate::error::{Bound, E_INVAL, E_UNSPECIFIED, Flow, MonitorError};
pub use crate::symbols::{
    FunctionSymbol, FunctionTable, LineEntry, SymbolInfo, SymbolResolver, SymbolTableError,
};
pub use kernel_info::KernelLayout;
pub use kernel_vmem::EntryLookup;
