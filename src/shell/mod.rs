/*!
 * Interactive Shell
 * Command loop driving a memory manager from line-oriented input
 *
 * Input is read as whitespace-separated tokens, so `alloc 1 150 first` on a
 * single line answers every prompt of the `alloc` command at once.
 */

mod command;
mod tokens;

pub use command::Command;
pub use tokens::TokenReader;

use crate::core::types::{AllocationId, Size};
use crate::memory::visual::{render_map, render_table};
use crate::memory::{MemoryError, MemoryManager, Strategy};
use crate::monitoring::span_command;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// Outcome of a prompted argument
enum Arg<T> {
    Value(T),
    Invalid(String),
    Eof,
}

pub struct Shell<R, W> {
    manager: MemoryManager,
    input: TokenReader<R>,
    output: W,
    commands_run: u64,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(manager: MemoryManager, input: R, output: W) -> Self {
        Self {
            manager,
            input: TokenReader::new(input),
            output,
            commands_run: 0,
        }
    }

    pub fn manager(&self) -> &MemoryManager {
        &self.manager
    }

    /// Run until `exit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        self.banner()?;

        loop {
            write!(self.output, "\n> ")?;
            self.output.flush()?;

            let Some(token) = self.input.next_token()? else {
                debug!("End of input, leaving shell");
                break;
            };

            let command = Command::parse(&token);
            self.commands_run += 1;
            let span = span_command(command.name(), self.commands_run);

            let keep_going = match command {
                Command::Exit => false,
                command => {
                    let result = span.in_scope(|| self.dispatch(command));
                    match result {
                        Ok(keep_going) => keep_going,
                        Err(e) => {
                            span.finish(false);
                            return Err(e);
                        }
                    }
                }
            };
            span.finish(true);

            if !keep_going {
                break;
            }
        }

        self.output.flush()
    }

    fn banner(&mut self) -> io::Result<()> {
        writeln!(self.output, "=== Virtual Memory Allocator ===")?;
        self.help()
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(self.output, "Commands:")?;
        for command in Command::ALL {
            writeln!(self.output, "  {} - {}", command.name(), command.summary())?;
        }
        Ok(())
    }

    /// Execute one command; `Ok(false)` means input ran out mid-command
    fn dispatch(&mut self, command: Command) -> io::Result<bool> {
        match command {
            Command::Alloc => self.alloc(),
            Command::Free => self.free(),
            Command::Show => self.show().map(|_| true),
            Command::Map => self.map().map(|_| true),
            Command::Stats => self.stats().map(|_| true),
            Command::Dump => self.dump().map(|_| true),
            Command::Help => self.help().map(|_| true),
            Command::Exit => Ok(false),
            Command::Unknown(name) => {
                warn!(command = %name, "Unknown command");
                writeln!(self.output, "Unknown command.")?;
                Ok(true)
            }
        }
    }

    fn prompt_number<T: std::str::FromStr>(&mut self, prompt: &str) -> io::Result<Arg<T>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        Ok(match self.input.next_token()? {
            None => Arg::Eof,
            Some(token) => match token.parse::<T>() {
                Ok(value) => Arg::Value(value),
                Err(_) => Arg::Invalid(token),
            },
        })
    }

    fn prompt_word(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.input.next_token()
    }

    fn alloc(&mut self) -> io::Result<bool> {
        let id = match self.prompt_number::<AllocationId>("Enter id: ")? {
            Arg::Value(id) => id,
            Arg::Invalid(token) => return self.invalid_number(&token),
            Arg::Eof => return Ok(false),
        };
        let size = match self.prompt_number::<Size>("Enter size: ")? {
            Arg::Value(size) => size,
            Arg::Invalid(token) => return self.invalid_number(&token),
            Arg::Eof => return Ok(false),
        };
        let prompt = format!("Strategy ({}): ", strategy_names().join("/"));
        let Some(strategy) = self.prompt_word(&prompt)? else {
            return Ok(false);
        };

        match self.manager.allocate_named(id, size, &strategy) {
            Ok(allocation) => {
                if !allocation.evicted.is_empty() {
                    writeln!(self.output, "No space, attempting swap...")?;
                }
                for victim in &allocation.evicted {
                    writeln!(self.output, "Swapped out id {}", victim)?;
                }
                writeln!(
                    self.output,
                    "Allocated {} units (in {} pages) to id {} at address {}",
                    allocation.size, allocation.pages, allocation.id, allocation.address
                )?;
            }
            Err(e @ MemoryError::OutOfSpace { .. }) => {
                writeln!(self.output, "No space, swap failed: {}", e)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(true)
    }

    fn free(&mut self) -> io::Result<bool> {
        let id = match self.prompt_number::<AllocationId>("Enter id: ")? {
            Arg::Value(id) => id,
            Arg::Invalid(token) => return self.invalid_number(&token),
            Arg::Eof => return Ok(false),
        };

        match self.manager.deallocate(id) {
            Ok(freed) => {
                for block in freed {
                    writeln!(
                        self.output,
                        "Freed memory of id {} at address {}",
                        id, block.start
                    )?;
                }
            }
            Err(e) => self.report(&e)?,
        }
        Ok(true)
    }

    fn show(&mut self) -> io::Result<()> {
        let blocks = self.manager.snapshot();
        writeln!(self.output, "\n--- Memory Blocks ---")?;
        write!(self.output, "{}", render_table(&blocks))
    }

    fn map(&mut self) -> io::Result<()> {
        let config = *self.manager.config();
        let blocks = self.manager.snapshot();
        writeln!(self.output, "\n--- Memory Map ---")?;
        writeln!(
            self.output,
            "{}",
            render_map(&blocks, config.total_size, config.map_cells)
        )?;
        writeln!(self.output, "Legend: # = Allocated, . = Free")
    }

    fn stats(&mut self) -> io::Result<()> {
        let stats = self.manager.stats();
        writeln!(self.output, "\n--- Memory Stats ---")?;
        writeln!(
            self.output,
            "Used: {} / {} units ({:.1}%, {} available)",
            stats.used_memory, stats.total_memory, stats.usage_percentage, stats.available_memory
        )?;
        writeln!(self.output, "Pressure: {}", stats.memory_pressure())?;
        writeln!(
            self.output,
            "Blocks: {} allocated, {} free (largest free: {})",
            stats.allocated_blocks, stats.free_blocks, stats.largest_free_block
        )?;
        writeln!(
            self.output,
            "Allocations: {}, swap-outs: {}",
            stats.allocation_count, stats.eviction_count
        )
    }

    fn dump(&mut self) -> io::Result<()> {
        let blocks = self.manager.snapshot();
        let json = serde_json::to_string_pretty(&blocks)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(self.output, "{}", json)
    }

    fn report(&mut self, error: &MemoryError) -> io::Result<()> {
        writeln!(self.output, "Error: {}", error)
    }

    fn invalid_number(&mut self, token: &str) -> io::Result<bool> {
        warn!(input = %token, "Expected a non-negative number");
        writeln!(self.output, "Invalid number: {}", token)?;
        Ok(true)
    }
}

/// Strategy names accepted by `alloc`, in prompt order
fn strategy_names() -> Vec<&'static str> {
    Strategy::ALL.iter().map(Strategy::as_str).collect()
}
