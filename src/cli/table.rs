use colored::Colorize;

use crate::cli::output::current_preferences;

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub width: usize,
    pub align_right: bool,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, width: usize) -> Self {
        Self {
            header: header.into(),
            width,
            align_right: false,
        }
    }

    pub fn numeric(header: impl Into<String>, width: usize) -> Self {
        Self {
            align_right: true,
            ..Self::new(header, width)
        }
    }
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(|value| value.into()),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    /// Renders the table into lines, widening columns to fit their content.
    pub fn render_lines(&self) -> Vec<String> {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain([column.width, column.header.chars().count()])
                    .max()
                    .unwrap_or(column.width)
            })
            .collect();

        let mut lines = Vec::new();
        if let Some(title) = &self.title {
            lines.push(title.clone());
        }
        let header = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| pad(&column.header, *width, column.align_right))
            .collect::<Vec<_>>()
            .join(" ");
        let total_width = widths.iter().map(|width| width + 1).sum::<usize>().max(1) - 1;
        lines.push(header.trim_end().to_string());
        lines.push("-".repeat(total_width));
        for row in &self.rows {
            let line = self
                .columns
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(idx, (column, width))| {
                    let cell = row.get(idx).map(String::as_str).unwrap_or("");
                    pad(cell, *width, column.align_right)
                })
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(line.trim_end().to_string());
        }
        lines
    }
}

/// Prints [`Table`] instances using padded columns.
pub struct TableRenderer;

impl TableRenderer {
    pub fn render(table: &Table) {
        let color = current_preferences().color_enabled;
        for (idx, line) in table.render_lines().into_iter().enumerate() {
            let is_heading = idx == 0 || (table.title.is_some() && idx == 1);
            if color && is_heading {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }
}

fn pad(value: &str, width: usize, align_right: bool) -> String {
    let len = value.chars().count();
    let fill = " ".repeat(width.saturating_sub(len));
    if align_right {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}
