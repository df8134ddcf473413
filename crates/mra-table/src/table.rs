//! Arrow-backed in-memory table
//!
//! `Table` is the tabular capability the relation algebra consumes: group-by
//! yielding (key, sub-table) pairs, whole-table and per-group aggregation,
//! column projection, cross-join of column-disjoint tables and row counts.
//! Data lives in a single [`RecordBatch`]; cells cross the boundary as
//! [`Value`]s.

use crate::aggregate::Aggregation;
use crate::column::{build_array, infer_type, unify, value_at};
use crate::error::{TableError, TableResult};
use crate::value::Value;
use arrow::array::{new_null_array, Array, ArrayRef, UInt64Array};
use arrow::compute::{cast, concat, take, take_record_batch};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow::row::{OwnedRow, RowConverter, SortField};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// A table: uniquely named, nullable, typed columns
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    batch: RecordBatch,
}

impl Table {
    fn from_arrays(names: Vec<String>, arrays: Vec<ArrayRef>, num_rows: usize) -> TableResult<Self> {
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn {
                    column: name.clone(),
                });
            }
        }
        let fields: Vec<Field> = names
            .iter()
            .zip(&arrays)
            .map(|(name, array)| Field::new(name.as_str(), array.data_type().clone(), true))
            .collect();
        let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
        let batch = RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), arrays, &options)?;
        Ok(Self { batch })
    }

    /// Create an empty table with the given column names
    pub fn new<I, S>(columns: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = columns.into_iter().map(Into::into).collect();
        let arrays = names
            .iter()
            .map(|_| new_null_array(&DataType::Null, 0))
            .collect();
        Self::from_arrays(names, arrays, 0)
    }

    /// Create a table from column names and rows.
    ///
    /// Each column takes the type of its non-null cells; integers and floats
    /// in one column widen to float, any other mix is rejected.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> TableResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = columns.into_iter().map(Into::into).collect();
        if let Some(row) = rows.iter().find(|r| r.len() != names.len()) {
            return Err(TableError::RowArity {
                expected: names.len(),
                found: row.len(),
            });
        }
        let mut arrays = Vec::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            let cells: Vec<Value> = rows.iter().map(|r| r[idx].clone()).collect();
            let data_type = infer_type(name, &cells)?;
            arrays.push(build_array(name, &data_type, &cells)?);
        }
        Self::from_arrays(names, arrays, rows.len())
    }

    /// The underlying record batch
    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Column names in order
    pub fn columns(&self) -> Vec<String> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// Every row as cells, in order
    pub fn rows(&self) -> Vec<Vec<Value>> {
        (0..self.num_rows()).map(|i| self.row(i)).collect()
    }

    fn row(&self, index: usize) -> Vec<Value> {
        self.batch
            .columns()
            .iter()
            .map(|array| value_at(array, index))
            .collect()
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Position of a column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.batch.schema_ref().index_of(name).ok()
    }

    /// Whether the table has a column
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn require_column(&self, name: &str) -> TableResult<usize> {
        self.column_index(name)
            .ok_or_else(|| TableError::UnknownColumn {
                column: name.to_string(),
            })
    }

    pub(crate) fn array(&self, name: &str) -> TableResult<&ArrayRef> {
        Ok(self.batch.column(self.require_column(name)?))
    }

    /// Cell at `row` in column `name`
    pub fn value(&self, row: usize, name: &str) -> Option<Value> {
        let idx = self.column_index(name)?;
        (row < self.num_rows()).then(|| value_at(self.batch.column(idx), row))
    }

    /// The cells of one column
    pub fn column_values(&self, name: &str) -> TableResult<Vec<Value>> {
        let array = self.array(name)?;
        Ok((0..array.len()).map(|i| value_at(array, i)).collect())
    }

    /// Keep only the named columns, in the given order
    pub fn project<S: AsRef<str>>(&self, columns: &[S]) -> TableResult<Table> {
        let mut names = Vec::with_capacity(columns.len());
        let mut arrays = Vec::with_capacity(columns.len());
        for column in columns {
            let column = column.as_ref();
            arrays.push(Arc::clone(self.array(column)?));
            names.push(column.to_string());
        }
        Self::from_arrays(names, arrays, self.num_rows())
    }

    /// Partition rows by the values of `keys`.
    ///
    /// Groups are returned in ascending key order; each sub-table keeps every
    /// column of `self` and the original relative row order. Rows with a null
    /// in any key column belong to no group.
    pub fn group_by<S: AsRef<str>>(&self, keys: &[S]) -> TableResult<Vec<(Vec<Value>, Table)>> {
        let key_arrays = keys
            .iter()
            .map(|k| self.array(k.as_ref()).cloned())
            .collect::<TableResult<Vec<ArrayRef>>>()?;
        if self.is_empty() || key_arrays.iter().any(|a| a.data_type() == &DataType::Null) {
            return Ok(Vec::new());
        }

        if key_arrays.is_empty() {
            return Ok(vec![(Vec::new(), self.clone())]);
        }

        let converter = RowConverter::new(
            key_arrays
                .iter()
                .map(|a| SortField::new(a.data_type().clone()))
                .collect(),
        )?;
        let rows = converter.convert_columns(&key_arrays)?;
        let mut groups: BTreeMap<OwnedRow, Vec<u64>> = BTreeMap::new();
        for i in 0..self.num_rows() {
            if key_arrays.iter().any(|a| a.is_null(i)) {
                continue;
            }
            groups.entry(rows.row(i).owned()).or_default().push(i as u64);
        }

        groups
            .into_values()
            .map(|indices| -> TableResult<(Vec<Value>, Table)> {
                let first = indices[0] as usize;
                let key = key_arrays.iter().map(|a| value_at(a, first)).collect();
                let batch = take_record_batch(&self.batch, &UInt64Array::from(indices))?;
                Ok((key, Table { batch }))
            })
            .collect()
    }

    /// Aggregate the whole table into a single row
    pub fn aggregate(&self, aggregations: &[Aggregation]) -> TableResult<Table> {
        let row = self.aggregate_row(aggregations)?;
        Self::from_rows(aggregations.iter().map(|a| a.output.clone()), vec![row])
    }

    /// Group by `keys` and aggregate within each group.
    ///
    /// The result has the key columns followed by one column per aggregation,
    /// one row per group in ascending key order.
    pub fn group_aggregate<S: AsRef<str>>(
        &self,
        keys: &[S],
        aggregations: &[Aggregation],
    ) -> TableResult<Table> {
        let columns: Vec<String> = keys
            .iter()
            .map(|k| k.as_ref().to_string())
            .chain(aggregations.iter().map(|a| a.output.clone()))
            .collect();
        let mut rows = Vec::new();
        for (key, group) in self.group_by(keys)? {
            let mut row = key;
            row.extend(group.aggregate_row(aggregations)?);
            rows.push(row);
        }
        Self::from_rows(columns, rows)
    }

    fn aggregate_row(&self, aggregations: &[Aggregation]) -> TableResult<Vec<Value>> {
        aggregations
            .iter()
            .map(|agg| agg.evaluate(self.array(&agg.source)?))
            .collect()
    }

    /// Cartesian product with a table that shares no columns
    pub fn cross_join(&self, other: &Table) -> TableResult<Table> {
        let shared: Vec<String> = self
            .columns()
            .into_iter()
            .filter(|c| other.has_column(c))
            .collect();
        if !shared.is_empty() {
            return Err(TableError::SharedColumns {
                columns: shared.join(", "),
            });
        }
        let (n, m) = (self.num_rows() as u64, other.num_rows() as u64);
        let left = UInt64Array::from_iter_values((0..n).flat_map(|i| (0..m).map(move |_| i)));
        let right = UInt64Array::from_iter_values((0..n).flat_map(|_| 0..m));

        let mut arrays = Vec::with_capacity(self.num_columns() + other.num_columns());
        for array in self.batch.columns() {
            arrays.push(take(array.as_ref(), &left, None)?);
        }
        for array in other.batch.columns() {
            arrays.push(take(array.as_ref(), &right, None)?);
        }
        let names = self.columns().into_iter().chain(other.columns()).collect();
        Self::from_arrays(names, arrays, (n * m) as usize)
    }

    /// Stack tables vertically.
    ///
    /// The output columns are the union of the input columns in first-seen
    /// order; cells for columns a table lacks are `Null`. A column present in
    /// several tables takes their common type.
    pub fn concat<'a, I>(tables: I) -> TableResult<Table>
    where
        I: IntoIterator<Item = &'a Table>,
    {
        let tables: Vec<&Table> = tables.into_iter().collect();
        let mut names: Vec<String> = Vec::new();
        let mut types: Vec<DataType> = Vec::new();
        for table in &tables {
            for field in table.batch.schema_ref().fields() {
                match names.iter().position(|n| n == field.name()) {
                    Some(pos) => {
                        let unified = unify(field.name(), &types[pos], field.data_type())?;
                        types[pos] = unified;
                    }
                    None => {
                        names.push(field.name().clone());
                        types.push(field.data_type().clone());
                    }
                }
            }
        }

        let num_rows = tables.iter().map(|t| t.num_rows()).sum();
        let mut arrays = Vec::with_capacity(names.len());
        for (name, data_type) in names.iter().zip(&types) {
            let parts = tables
                .iter()
                .map(|t| -> TableResult<ArrayRef> {
                    match t.column_index(name) {
                        Some(idx) => Ok(cast(t.batch.column(idx).as_ref(), data_type)?),
                        None => Ok(new_null_array(data_type, t.num_rows())),
                    }
                })
                .collect::<TableResult<Vec<ArrayRef>>>()?;
            let parts: Vec<&dyn Array> = parts.iter().map(|a| a.as_ref()).collect();
            arrays.push(concat(&parts)?);
        }
        Self::from_arrays(names, arrays, num_rows)
    }

    /// Return a copy with `name` set to `values`, replacing an existing
    /// column of the same name or appending a new one
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> TableResult<Table> {
        if values.len() != self.num_rows() {
            return Err(TableError::RowArity {
                expected: self.num_rows(),
                found: values.len(),
            });
        }
        let data_type = infer_type(name, &values)?;
        let array = build_array(name, &data_type, &values)?;
        let mut names = self.columns();
        let mut arrays = self.batch.columns().to_vec();
        match self.column_index(name) {
            Some(idx) => arrays[idx] = array,
            None => {
                names.push(name.to_string());
                arrays.push(array);
            }
        }
        Self::from_arrays(names, arrays, self.num_rows())
    }

    /// Order-insensitive normal form: columns sorted by name, rows sorted.
    ///
    /// Two tables holding the same data with different column or row order
    /// have equal canonical forms.
    pub fn canonical(&self) -> TableResult<Table> {
        let names = self.columns();
        let mut order: Vec<usize> = (0..names.len()).collect();
        order.sort_by(|&a, &b| names[a].cmp(&names[b]));
        let sorted = Table {
            batch: self.batch.project(&order)?,
        };

        let rows = sorted.rows();
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        indices.sort_by(|&a, &b| rows[a].cmp(&rows[b]));
        let indices = UInt64Array::from_iter_values(indices.into_iter().map(|i| i as u64));
        Ok(Table {
            batch: take_record_batch(&sorted.batch, &indices)?,
        })
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
