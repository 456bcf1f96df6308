use crate::backtrace::{StackMemory, backtrace};
use crate::commands::{self, CommandKind, help};
use crate::config::MonitorConfig;
use crate::console::{self, Console};
use crate::error::{Flow, MonitorError};
use crate::kerninfo::kerninfo;
use crate::mappings::show_mappings;
use crate::symbols::SymbolResolver;
use crate::tokenizer::tokenize;
use core::fmt;
use kernel_info::KernelLayout;
use kernel_vmem::EntryLookup;
use log::debug;

/// A monitor session: the collaborators every command reads from.
pub struct Monitor<L, S, R> {
    lookup: L,
    stack: S,
    symbols: R,
    layout: KernelLayout,
    config: MonitorConfig,
}

impl<L, S, R> Monitor<L, S, R>
where
    L: EntryLookup,
    S: StackMemory,
    R: SymbolResolver,
{
    pub const fn new(
        lookup: L,
        stack: S,
        symbols: R,
        layout: KernelLayout,
        config: MonitorConfig,
    ) -> Self {
        Self {
            lookup,
            stack,
            symbols,
            layout,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Tokenize `line` and run the command it names.
    ///
    /// A blank line does nothing. Tokens after the command name are passed to
    /// `showmappings`; the other commands ignore them.
    ///
    /// # Errors
    /// - [`MonitorError::TooManyArguments`] and [`MonitorError::UnknownCommand`]
    ///   for lines that are discarded without running anything.
    /// - Whatever the command itself reports.
    pub fn run_command<'l, W>(&self, line: &'l str, out: &mut W) -> Result<Flow, MonitorError<'l>>
    where
        W: fmt::Write + ?Sized,
    {
        let args = tokenize(line)?;
        let Some(name) = args.command() else {
            return Ok(Flow::Continue);
        };
        let Some(command) = commands::find(name) else {
            return Err(MonitorError::UnknownCommand(name));
        };

        debug!("running {} with {} argument(s)", command.name, args.rest().len());
        match command.kind {
            CommandKind::Help => help(out),
            CommandKind::KernInfo => kerninfo(out, &self.layout),
            CommandKind::Backtrace => backtrace(out, &self.stack, &self.symbols, self.config.unwind),
            CommandKind::ShowMappings => show_mappings(out, &self.lookup, args.rest()),
        }
    }

    /// Greet the operator and serve commands until a command asks to exit or
    /// the console closes.
    pub fn run<C: Console + ?Sized>(&self, console: &mut C) {
        console::run(console, self.config.prompt, |line, out| {
            self.run_command(line, out)
        });
    }
}
