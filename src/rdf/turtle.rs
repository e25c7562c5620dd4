// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::io::Write;
use std::sync::Mutex;

use anyhow::Result;

use crate::errors::Error;
use crate::rdf::{Namespaces, Statement};

/// Line oriented Turtle serializer: one statement per line, one blank line
/// after each block.
pub struct TurtleWriter<W: Write> {
    inner: W,
}

impl<W: Write> TurtleWriter<W> {
    pub fn new(inner: W) -> Self {
        TurtleWriter { inner }
    }

    pub fn write_prefixes(&mut self, namespaces: &Namespaces) -> Result<()> {
        for (name, namespace) in namespaces.declarations() {
            writeln!(self.inner, "@prefix {}: <{}> .", name, namespace)?;
        }
        writeln!(self.inner)?;
        Ok(())
    }

    pub fn write_statement(&mut self, statement: Statement) -> Result<()> {
        writeln!(self.inner, "{}", statement)?;
        Ok(())
    }

    pub fn write_block(&mut self, statements: Vec<Statement>) -> Result<()> {
        if statements.is_empty() {
            return Ok(());
        }
        for statement in statements {
            self.write_statement(statement)?;
        }
        writeln!(self.inner)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// The single output stream shared by all workers.
pub struct SharedOutput<W: Write> {
    writer: Mutex<TurtleWriter<W>>,
}

impl<W: Write + Send> SharedOutput<W> {
    pub fn new(writer: TurtleWriter<W>) -> Self {
        SharedOutput {
            writer: Mutex::new(writer),
        }
    }

    /// Write all statements of one record while holding the lock, so blocks of
    /// different records never interleave.
    pub fn emit(&self, statements: Vec<Statement>) -> Result<()> {
        let mut writer = self.writer.lock().map_err(|_| Error::OutputPoisoned)?;
        writer.write_block(statements)
    }

    pub fn into_inner(self) -> Result<TurtleWriter<W>> {
        Ok(self.writer.into_inner().map_err(|_| Error::OutputPoisoned)?)
    }
}
