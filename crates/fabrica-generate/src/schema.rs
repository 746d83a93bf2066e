use std::collections::BTreeMap;

use tracing::info;

use fabrica_core::FieldValue;

use crate::errors::{FieldError, Result};
use crate::field::FieldEngine;

/// One generated record: field names to resolved values.
pub type Record = BTreeMap<String, FieldValue>;

/// A reusable record blueprint over a [`FieldEngine`].
///
/// The builder closure is invoked once per record; records are built
/// fully or the whole call fails. The only state carried between
/// invocations is whatever randomness advances the engine's stream, so
/// equal seeds and equal call sequences reproduce equal batches.
pub struct Schema<F>
where
    F: FnMut(&mut FieldEngine) -> Result<Record>,
{
    engine: FieldEngine,
    builder: F,
}

impl<F> Schema<F>
where
    F: FnMut(&mut FieldEngine) -> Result<Record>,
{
    pub fn new(engine: FieldEngine, builder: F) -> Self {
        Self { engine, builder }
    }

    pub fn engine_mut(&mut self) -> &mut FieldEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> FieldEngine {
        self.engine
    }

    /// Eagerly build exactly `count` records.
    pub fn create(&mut self, count: usize) -> Result<Vec<Record>> {
        if count < 1 {
            return Err(FieldError::NonPositiveCount { context: "create" });
        }
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push((self.builder)(&mut self.engine)?);
        }
        info!(records = records.len(), "schema batch created");
        Ok(records)
    }

    /// Lazy single-pass sequence of exactly `count` records.
    /// Restartable only by creating a new iterator.
    pub fn iterator(&mut self, count: usize) -> Result<SchemaIterator<'_, F>> {
        if count < 1 {
            return Err(FieldError::NonPositiveCount { context: "iterator" });
        }
        Ok(SchemaIterator {
            schema: self,
            remaining: Some(count),
        })
    }

    /// Unbounded lazy sequence. The caller must bound consumption
    /// (e.g. with `take`); the sequence never stops on its own.
    pub fn looped(&mut self) -> SchemaIterator<'_, F> {
        SchemaIterator {
            schema: self,
            remaining: None,
        }
    }
}

/// Lazy record sequence over a [`Schema`].
pub struct SchemaIterator<'a, F>
where
    F: FnMut(&mut FieldEngine) -> Result<Record>,
{
    schema: &'a mut Schema<F>,
    remaining: Option<usize>,
}

impl<F> Iterator for SchemaIterator<'_, F>
where
    F: FnMut(&mut FieldEngine) -> Result<Record>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.remaining {
            Some(0) => return None,
            Some(remaining) => *remaining -= 1,
            None => {}
        }
        Some((self.schema.builder)(&mut self.schema.engine))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}
