/// A table column: generated name, unit label and description
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ColumnDef {
    pub name: String,
    pub unit: String,
    pub description: String,
}

impl ColumnDef {
    /// A column without unit or description metadata
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: String::new(),
            description: String::new(),
        }
    }
}

/// Tabular projection of measurement records
///
/// Ordered columns and ordered rows of string cells; cells are never
/// coerced to numbers so the projection round-trips losslessly through
/// any renderer.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct TableSpec {
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Vec<String>>,
}

impl TableSpec {
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding or truncating to the column count
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
