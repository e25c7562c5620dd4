// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Genomic positions in the FALDO sense: exact points, in-between
//! (confidence) intervals and ranged positions. Positions are not ordered;
//! the only comparison ever needed is whether two of them lie on the same
//! chromosome.

use crate::rdf::{Class, Description, Iri, Namespaces, Predicate, Prefix, Statement, Term};

/// A single 1-based coordinate on a chromosome.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExactPosition {
    chromosome: String,
    position: u64,
}

impl ExactPosition {
    pub fn new(chromosome: impl Into<String>, position: u64) -> Self {
        ExactPosition {
            chromosome: chromosome.into(),
            position,
        }
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn is_valid(&self) -> bool {
        !self.chromosome.is_empty()
    }

    pub fn is_on_same_chromosome(&self, other: &ExactPosition) -> bool {
        self.chromosome == other.chromosome
    }

    /// Release the chromosome name. The position is invalid afterwards.
    pub fn reset(&mut self) {
        self.chromosome = String::new();
        self.position = 0;
    }
}

/// Uncertainty window around a point: the point lies after `before` and
/// before `after`.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct InBetweenPosition {
    before: ExactPosition,
    after: ExactPosition,
}

impl InBetweenPosition {
    pub fn before(&self) -> &ExactPosition {
        &self.before
    }

    pub fn after(&self) -> &ExactPosition {
        &self.after
    }

    pub fn is_valid(&self) -> bool {
        self.before.is_valid() && self.after.is_valid()
    }

    pub fn reset(&mut self) {
        self.before.reset();
        self.after.reset();
    }
}

/// A contiguous stretch from `begin` to `end`.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RangedPosition {
    begin: ExactPosition,
    end: ExactPosition,
}

impl RangedPosition {
    pub fn begin(&self) -> &ExactPosition {
        &self.begin
    }

    pub fn end(&self) -> &ExactPosition {
        &self.end
    }

    pub fn is_valid(&self) -> bool {
        self.begin.is_valid() && self.end.is_valid()
    }

    pub fn reset(&mut self) {
        self.begin.reset();
        self.end.reset();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    Exact(ExactPosition),
    InBetween(InBetweenPosition),
    Ranged(RangedPosition),
}

impl Position {
    pub fn is_valid(&self) -> bool {
        match self {
            Position::Exact(pos) => pos.is_valid(),
            Position::InBetween(pos) => pos.is_valid(),
            Position::Ranged(pos) => pos.is_valid(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Position::Exact(pos) => pos.reset(),
            Position::InBetween(pos) => pos.reset(),
            Position::Ranged(pos) => pos.reset(),
        }
    }

    pub fn node_prefix(&self) -> Prefix {
        match self {
            Position::Exact(_) => Prefix::ExactPosition,
            Position::InBetween(_) => Prefix::InBetweenPosition,
            Position::Ranged(_) => Prefix::RangedPosition,
        }
    }

    /// Statements describing this position as `node`, including the exact
    /// positions it is composed of. Invalid positions yield no statements.
    pub fn statements(&self, node: &Iri, namespaces: &Namespaces) -> Vec<Statement> {
        let mut statements = Vec::new();
        if !self.is_valid() {
            return statements;
        }
        self.describe(node, namespaces, &mut statements);
        statements
    }

    fn describe(&self, node: &Iri, namespaces: &Namespaces, statements: &mut Vec<Statement>) {
        match self {
            Position::Exact(pos) => {
                Description::new(node.clone(), statements)
                    .class(Class::ExactPosition)
                    .add(Predicate::FaldoPosition, Term::integer(pos.position as i64))
                    .add(
                        Predicate::FaldoReference,
                        chromosome_term(&pos.chromosome, namespaces),
                    );
            }
            Position::InBetween(pos) => {
                // FALDO reads "after the lower bound, before the upper bound".
                let lower = node.derive(Prefix::ExactPosition, "before");
                let upper = node.derive(Prefix::ExactPosition, "after");
                Description::new(node.clone(), statements)
                    .class(Class::InBetweenPosition)
                    .add(Predicate::FaldoAfter, lower.clone())
                    .add(Predicate::FaldoBefore, upper.clone());
                Position::Exact(pos.before.clone()).describe(&lower, namespaces, statements);
                Position::Exact(pos.after.clone()).describe(&upper, namespaces, statements);
            }
            Position::Ranged(pos) => {
                let begin = node.derive(Prefix::ExactPosition, "begin");
                let end = node.derive(Prefix::ExactPosition, "end");
                Description::new(node.clone(), statements)
                    .class(Class::RangedPosition)
                    .add(Predicate::FaldoBegin, begin.clone())
                    .add(Predicate::FaldoEnd, end.clone());
                Position::Exact(pos.begin.clone()).describe(&begin, namespaces, statements);
                Position::Exact(pos.end.clone()).describe(&end, namespaces, statements);
            }
        }
    }
}

impl From<ExactPosition> for Position {
    fn from(pos: ExactPosition) -> Self {
        Position::Exact(pos)
    }
}

impl From<InBetweenPosition> for Position {
    fn from(pos: InBetweenPosition) -> Self {
        Position::InBetween(pos)
    }
}

impl From<RangedPosition> for Position {
    fn from(pos: RangedPosition) -> Self {
        Position::Ranged(pos)
    }
}

/// Chromosomes of known reference genomes are linked to the published
/// chromosome IRIs (without any "chr" prefix), everything else is kept as a
/// plain name.
pub(crate) fn chromosome_term(chromosome: &str, namespaces: &Namespaces) -> Term {
    match namespaces.reference() {
        Some(prefix) => Term::iri(prefix, chromosome.trim_start_matches("chr")),
        None => Term::string(chromosome),
    }
}
