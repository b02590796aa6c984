// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// Rows of `T` rendered through a set of columns and a style.
pub struct Table<'a, T, C: TableColumn<T>, S: TableStyle> {
    style: S,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, T, C: TableColumn<T>, S: TableStyle> Table<'a, T, C, S> {
    pub fn new(style: S, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }
}

impl<T, C: TableColumn<T>, S: TableStyle> fmt::Display for Table<'_, T, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<Cow<'_, str>>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();
        self.style.write(f, self.columns, self.data, &cells)
    }
}

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;
    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

pub trait TableStyle {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
        cells: &[Vec<Cow<'_, str>>],
    ) -> fmt::Result;
}

/// Space separated, padded and colored columns for terminals.
#[derive(Debug, Clone)]
pub struct TableStyleBasic {
    separator: &'static str,
    padding: bool,
    header: bool,
}

impl TableStyleBasic {
    pub fn new() -> Self {
        Self {
            separator: " ",
            padding: true,
            header: false,
        }
    }

    pub fn with_header(mut self) -> Self {
        self.header = true;
        self
    }
}

impl TableStyle for TableStyleBasic {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
        cells: &[Vec<Cow<'_, str>>],
    ) -> fmt::Result {
        let names: Vec<Cow<'_, str>> = columns.iter().map(|a| a.name()).collect();
        let widths = match self.padding {
            true => column_max_width(columns.len(), self.header.then_some(&names), cells),
            false => vec![0; columns.len()],
        };

        if self.header {
            let line: Vec<String> = names
                .iter()
                .zip(columns)
                .enumerate()
                .map(|(i, (name, col))| {
                    pad(name, widths[i], col.padding_direction(), i, columns.len())
                })
                .collect();
            writeln!(f, "{}", line.join(self.separator).bold())?;
        }

        for (row, item) in cells.iter().zip(data) {
            for (i, (cell, col)) in row.iter().zip(columns).enumerate() {
                let text = pad(cell, widths[i], col.padding_direction(), i, columns.len());
                match col.get_color(item) {
                    Some(color) => write!(f, "{}", text.color(color))?,
                    None => write!(f, "{text}")?,
                }

                if i + 1 < columns.len() {
                    write!(f, "{}", self.separator)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A JSON array of objects keyed by column name.
#[derive(Debug, Clone, Default)]
pub struct TableStyleJson;

impl TableStyleJson {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleJson {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        _data: &[T],
        cells: &[Vec<Cow<'_, str>>],
    ) -> fmt::Result {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = cells
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .zip(row)
                    .map(|(col, cell)| (col.name().into_owned(), cell.to_string().into()))
                    .collect()
            })
            .collect();
        let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        writeln!(f, "{json}")
    }
}

fn pad(cell: &str, width: usize, direction: PaddingDirection, i: usize, count: usize) -> String {
    // Last column does not need padding if it's left-aligned
    if width == 0 || (i + 1 == count && direction == PaddingDirection::Left) {
        return cell.to_string();
    }

    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match direction {
        PaddingDirection::Left => format!("{cell}{fill}"),
        PaddingDirection::Right => format!("{fill}{cell}"),
    }
}

fn column_max_width(
    count: usize,
    header: Option<&Vec<Cow<'_, str>>>,
    cells: &[Vec<Cow<'_, str>>],
) -> Vec<usize> {
    let mut max_width = vec![0; count];
    for row in header.into_iter().chain(cells) {
        for (i, cell) in row.iter().enumerate() {
            max_width[i] = max_width[i].max(cell.width());
        }
    }
    max_width
}
