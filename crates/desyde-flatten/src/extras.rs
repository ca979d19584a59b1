//! Extras cross-product expansion.
//!
//! A row referencing elements of replicated designs is repeated for every
//! combination of their clones. The first reference column varies slowest.

use desyde_model::extras::{Extras, TableEntry};

use crate::error::FlattenError;
use crate::registry::Registries;

/// Expand every table of `source` against the flattened designs.
pub fn expand_extras(source: &Extras, registries: &Registries) -> Result<Extras, FlattenError> {
    let mut out = Extras::default();
    for table in &source.tables {
        let mut expanded = table.empty_like();
        for entry in &table.entries {
            let columns = entry
                .references
                .iter()
                .map(|r| registries.counterparts(r))
                .collect::<Result<Vec<_>, _>>()?;
            for references in cross_product(&columns) {
                expanded.push(TableEntry::new(entry.values.clone(), references));
            }
        }
        out.tables.push(expanded);
    }
    Ok(out)
}

/// All combinations picking one item per column, first column outermost.
///
/// No columns yields a single empty combination.
pub fn cross_product<T: Clone>(columns: &[Vec<T>]) -> Vec<Vec<T>> {
    let mut rows: Vec<Vec<T>> = vec![Vec::new()];
    for column in columns {
        rows = rows
            .iter()
            .flat_map(|row| {
                column.iter().map(move |item| {
                    let mut row = row.clone();
                    row.push(item.clone());
                    row
                })
            })
            .collect();
    }
    rows
}
