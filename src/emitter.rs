//! Human-readable buildpack output
//!
//! The lifecycle shows whatever a buildpack prints to stdout, indented by
//! nesting level. Diagnostics go through `tracing` instead; a failed write
//! here is logged and otherwise ignored.

use std::fmt;
use std::io::Write;
use tracing::warn;

use crate::launch::Process;

pub struct Emitter<W: Write> {
    writer: W,
}

impl<W: Write> Emitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Top-level line, e.g. the buildpack name and version
    pub fn title(&mut self, message: impl fmt::Display) {
        self.line(0, message);
    }

    pub fn process(&mut self, message: impl fmt::Display) {
        self.line(1, message);
    }

    pub fn subprocess(&mut self, message: impl fmt::Display) {
        self.line(2, message);
    }

    pub fn break_line(&mut self) {
        self.line(0, "");
    }

    /// Lists the processes assigned to the image
    ///
    /// The `(default)` marker is only shown when there is more than one
    /// process to choose from.
    pub fn launch_processes(&mut self, processes: &[Process]) {
        self.process("Assigning launch processes:");
        let mark_default = processes.len() > 1;
        for process in processes {
            if mark_default && process.default {
                self.subprocess(format_args!(
                    "{} (default): {}",
                    process.process_type, process.command
                ));
            } else {
                self.subprocess(process);
            }
        }
    }

    fn line(&mut self, level: usize, message: impl fmt::Display) {
        let indent = "  ".repeat(level);
        if let Err(e) = writeln!(self.writer, "{indent}{message}") {
            warn!(error = %e, "Failed to write buildpack output");
        }
    }
}
