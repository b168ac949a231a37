//! Usage, version and error rendering, plus the process-exit shell.
//!
//! Rendering consumes the descriptor description strings and is a pure
//! formatting concern; every writer is injected so the output is
//! testable. Only [`Registry::parse`] touches the real process: stdio
//! and `process::exit`.

use std::env;
use std::io;
use std::process;

use crate::flag::Descriptor;

use super::Registry;

/// What the caller should do after [`Registry::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Resolution succeeded; continue with the populated flags.
    Proceed,
    /// Help or version output was printed; exit successfully.
    ExitSuccess,
    /// Errors were printed; exit with a failure status.
    ExitFailure,
}

impl Registry {
    /// Write the usage text: a `Usage:` line listing required flags first
    /// and optional flags bracketed, then one aligned line per flag.
    /// Flags are name-sorted in both sections.
    ///
    /// # Errors
    ///
    /// Propagates failures from the writer.
    pub fn write_usage<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        let app = self
            .app_name
            .clone()
            .or_else(|| env::args().next())
            .unwrap_or_default();

        let mut flags: Vec<&dyn Descriptor> = self.descriptors.iter().map(Box::as_ref).collect();
        flags.sort_by(|a, b| a.name().cmp(&b.name()));

        write!(w, "Usage: {app}")?;
        for flag in flags.iter().filter(|f| f.is_required()) {
            write!(w, " {}", flag.short_description())?;
        }
        for flag in flags.iter().filter(|f| !f.is_required()) {
            write!(w, " [{}]", flag.short_description())?;
        }
        writeln!(w)?;
        writeln!(w)?;
        writeln!(w, "Flags:")?;

        let rows: Vec<(String, String)> = flags
            .iter()
            .map(|flag| {
                let line = flag.long_description();
                match line.split_once('\t') {
                    Some((left, right)) => (left.to_owned(), right.to_owned()),
                    None => (line, String::new()),
                }
            })
            .collect();
        let width = rows.iter().map(|(left, _)| left.chars().count()).max().unwrap_or(0);
        for (left, right) in rows {
            writeln!(w, "{left:<width$}  {right}")?;
        }
        Ok(())
    }

    /// Write the configured version string.
    ///
    /// # Errors
    ///
    /// Propagates failures from the writer.
    pub fn write_version<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{}", self.version.as_deref().unwrap_or_default())
    }

    /// Write each aggregated error on its own line, followed by a hint
    /// naming the help flag.
    ///
    /// # Errors
    ///
    /// Propagates failures from the writer.
    pub fn write_errors<W: io::Write>(&self, w: &mut W, errors: &crate::Errors) -> io::Result<()> {
        for error in errors {
            writeln!(w, "{error}")?;
        }
        writeln!(w)?;
        writeln!(w, "Use '--{}' flag for more info.", self.help_flag_name)
    }

    /// Resolve `args` and decide the process outcome: resolution errors
    /// and missing required flags are written to `stderr`, help and
    /// version output to `stdout`.
    ///
    /// # Errors
    ///
    /// Propagates failures from the writers.
    pub fn run<I, S, O, E>(
        &mut self,
        args: I,
        stdout: &mut O,
        stderr: &mut E,
    ) -> io::Result<RunOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        O: io::Write,
        E: io::Write,
    {
        if let Err(errs) = self.resolve(args) {
            self.write_errors(stderr, &errs)?;
            return Ok(RunOutcome::ExitFailure);
        }

        if self.help_requested() {
            self.write_usage(stdout)?;
            return Ok(RunOutcome::ExitSuccess);
        }

        if self.version_requested() {
            self.write_version(stdout)?;
            return Ok(RunOutcome::ExitSuccess);
        }

        if let Err(errs) = self.check_required() {
            self.write_errors(stderr, &errs)?;
            return Ok(RunOutcome::ExitFailure);
        }

        Ok(RunOutcome::Proceed)
    }

    /// Resolve the process arguments against real stdio and exit unless
    /// the program should proceed.
    ///
    /// Convenience shell for binaries; everything it composes is also
    /// available piecewise for callers that manage exit themselves.
    pub fn parse(&mut self) {
        let mut stdout = io::stdout().lock();
        let mut stderr = io::stderr().lock();
        let outcome = self
            .run(env::args().skip(1), &mut stdout, &mut stderr)
            .unwrap_or(RunOutcome::ExitFailure);
        match outcome {
            RunOutcome::Proceed => {}
            RunOutcome::ExitSuccess => process::exit(0),
            RunOutcome::ExitFailure => process::exit(1),
        }
    }
}
