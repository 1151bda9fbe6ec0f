use serde::{Serialize, Deserialize};

use crate::buffer::Buffer;
use crate::error::{Error, Result};

/// Fixed-width rows stored back to back in one allocation.
///
/// Row `i` occupies `data[i * width..(i + 1) * width]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    data: Vec<f64>,
    width: usize,
    len: usize,
}

impl Table {
    /// Copies `rows` into contiguous storage. Every row must have the width of the first.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R], what: &'static str) -> Result<Table> {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * width);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(Error::mismatch(what, width, row.len()));
            }
            data.extend_from_slice(row);
        }
        Ok(Table { data, width, len: rows.len() })
    }

    /// Copies a flat row-major buffer of `width`-wide rows.
    pub fn from_flat(data: &[f64], width: usize, what: &'static str) -> Result<Table> {
        if width == 0 {
            if !data.is_empty() {
                return Err(Error::mismatch(what, 0, data.len()));
            }
            return Ok(Table::default());
        }
        if data.len() % width != 0 {
            return Err(Error::mismatch(what, data.len() - data.len() % width, data.len()));
        }
        Ok(Table { data: data.to_vec(), width, len: data.len() / width })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Panics if `idx >= len`.
    pub fn row(&self, idx: usize) -> &[f64] {
        assert!(idx < self.len, "row {idx} out of range for {} rows", self.len);
        let start = idx * self.width;
        &self.data[start..start + self.width]
    }

    pub fn view(&self) -> TableView<'_> {
        TableView {
            buffer: Buffer::Borrowed(&self.data),
            width: self.width,
            len: self.len,
        }
    }

    /// Checks that the storage holds exactly `len` rows of `width` values.
    pub(crate) fn validate(&self, what: &'static str) -> Result<()> {
        let expected = self.width * self.len;
        if self.data.len() != expected {
            return Err(Error::mismatch(what, expected, self.data.len()));
        }
        Ok(())
    }

    /// New table with rows taken in `order`.
    pub(crate) fn permuted(&self, order: &[usize]) -> Table {
        let mut data = Vec::with_capacity(self.data.len());
        for &idx in order {
            data.extend_from_slice(self.row(idx));
        }
        Table { data, width: self.width, len: order.len() }
    }

    pub(crate) fn append(&mut self, other: &Table) {
        if self.len == 0 {
            self.width = other.width;
        }
        self.data.extend_from_slice(&other.data);
        self.len += other.len;
    }
}

/// Borrowed, strided view over a table's rows.
///
/// Valid only while the owning dataset is alive and unmodified; the borrow
/// checker rejects any `load` while a view is held.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    buffer: Buffer<'a, f64>,
    width: usize,
    len: usize,
}

impl<'a> TableView<'a> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The whole table as one flat buffer. Never owned.
    pub fn buffer(&self) -> &Buffer<'a, f64> {
        &self.buffer
    }

    pub fn row(&self, idx: usize) -> &[f64] {
        let start = idx * self.width;
        &self.buffer[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.len).map(move |idx| self.row(idx))
    }

    /// Copies every row into a caller-owned vector.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}
