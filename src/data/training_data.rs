use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::data::table::{Table, TableView};
use crate::error::{Error, Result};

/// Paired input/output examples for training and testing.
///
/// Inputs and outputs live in two contiguous tables, so every input has the
/// same width and every output has the same width. The dataset always holds
/// its own copy of the examples; buffers passed to `load` stay with the
/// caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingData {
    inputs: Table,
    outputs: Table,
}

impl TrainingData {
    /// An empty dataset; fill it with `load` or `load_flat`.
    pub fn new() -> TrainingData {
        TrainingData::default()
    }

    pub fn from_rows<R: AsRef<[f64]>>(inputs: &[R], outputs: &[R]) -> Result<TrainingData> {
        let mut data = TrainingData::new();
        data.load(inputs, outputs)?;
        Ok(data)
    }

    /// Replaces every example with copies of `inputs[i] -> outputs[i]`.
    ///
    /// Fails without touching the current examples when the example counts
    /// differ or the rows are ragged.
    pub fn load<R: AsRef<[f64]>>(&mut self, inputs: &[R], outputs: &[R]) -> Result<()> {
        if inputs.len() != outputs.len() {
            warn!(
                "refusing to load training data: {} inputs but {} outputs",
                inputs.len(),
                outputs.len()
            );
            return Err(Error::mismatch("output examples", inputs.len(), outputs.len()));
        }
        let new_inputs = Table::from_rows(inputs, "input row")?;
        let new_outputs = Table::from_rows(outputs, "output row")?;
        self.inputs = new_inputs;
        self.outputs = new_outputs;
        Ok(())
    }

    /// Flat variant of `load`: `inputs` holds `len * num_input` values row by
    /// row, `outputs` holds `len * num_output`.
    pub fn load_flat(
        &mut self,
        inputs: &[f64],
        num_input: usize,
        outputs: &[f64],
        num_output: usize,
    ) -> Result<()> {
        let new_inputs = Table::from_flat(inputs, num_input, "inputs")?;
        let new_outputs = Table::from_flat(outputs, num_output, "outputs")?;
        if new_inputs.len() != new_outputs.len() {
            warn!(
                "refusing to load training data: {} inputs but {} outputs",
                new_inputs.len(),
                new_outputs.len()
            );
            return Err(Error::mismatch("output examples", new_inputs.len(), new_outputs.len()));
        }
        self.inputs = new_inputs;
        self.outputs = new_outputs;
        Ok(())
    }

    /// Independent deep copy; nothing is shared with `self`.
    pub fn duplicate(&self) -> TrainingData {
        self.clone()
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn num_input(&self) -> usize {
        self.inputs.width()
    }

    pub fn num_output(&self) -> usize {
        self.outputs.width()
    }

    /// Borrowed view over the input examples.
    pub fn inputs(&self) -> TableView<'_> {
        self.inputs.view()
    }

    /// Borrowed view over the output examples.
    pub fn outputs(&self) -> TableView<'_> {
        self.outputs.view()
    }

    /// Panics if `idx >= len`.
    pub fn input(&self, idx: usize) -> &[f64] {
        self.inputs.row(idx)
    }

    /// Panics if `idx >= len`.
    pub fn output(&self, idx: usize) -> &[f64] {
        self.outputs.row(idx)
    }

    /// (input, output) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &[f64])> + '_ {
        (0..self.len()).map(move |idx| (self.input(idx), self.output(idx)))
    }

    /// Reorders the examples, keeping every input paired with its output.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);
        self.inputs = self.inputs.permuted(&order);
        self.outputs = self.outputs.permuted(&order);
    }

    /// A new dataset holding the examples of `self` followed by those of `other`.
    pub fn merge(&self, other: &TrainingData) -> Result<TrainingData> {
        if !self.is_empty() && !other.is_empty() {
            if self.num_input() != other.num_input() {
                return Err(Error::mismatch("merged input width", self.num_input(), other.num_input()));
            }
            if self.num_output() != other.num_output() {
                return Err(Error::mismatch("merged output width", self.num_output(), other.num_output()));
            }
        }
        let mut merged = self.clone();
        merged.inputs.append(&other.inputs);
        merged.outputs.append(&other.outputs);
        Ok(merged)
    }

    /// A new dataset holding `length` examples starting at `pos`.
    pub fn subset(&self, pos: usize, length: usize) -> Result<TrainingData> {
        let end = pos.saturating_add(length);
        if end > self.len() {
            return Err(Error::mismatch("subset end", self.len(), end));
        }
        let order: Vec<usize> = (pos..end).collect();
        Ok(TrainingData {
            inputs: self.inputs.permuted(&order),
            outputs: self.outputs.permuted(&order),
        })
    }

    /// Serializes the examples to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a dataset previously written by `save_json`.
    ///
    /// Files whose tables disagree with their declared shapes, or whose
    /// input and output example counts differ, are rejected.
    pub fn load_json(path: &str) -> Result<TrainingData> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let data: TrainingData = serde_json::from_reader(reader)?;
        if let Err(err) = data.validate() {
            warn!("refusing training data from {path}: {err}");
            return Err(err);
        }
        Ok(data)
    }

    fn validate(&self) -> Result<()> {
        self.inputs.validate("input examples")?;
        self.outputs.validate("output examples")?;
        if self.inputs.len() != self.outputs.len() {
            return Err(Error::mismatch("output examples", self.inputs.len(), self.outputs.len()));
        }
        Ok(())
    }
}
