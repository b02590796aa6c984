// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::table::{Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::ArgOutputFormat;

/// Renders rows through a fixed set of columns, as a table or as JSON.
#[derive(Debug)]
pub struct Formatter<C> {
    columns: Vec<C>,
    format: ArgOutputFormat,
    header: bool,
}

impl<C> Formatter<C> {
    pub fn new(columns: Vec<C>) -> Self {
        Self {
            columns,
            format: ArgOutputFormat::Table,
            header: false,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_header(mut self) -> Self {
        self.header = true;
        self
    }

    pub fn format<'a, T>(&'a self, rows: &'a [T]) -> Display<'a, T, C>
    where
        C: TableColumn<T>,
    {
        Display {
            rows,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a, T, C> {
    rows: &'a [T],
    formatter: &'a Formatter<C>,
}

impl<T, C: TableColumn<T>> fmt::Display for Display<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            ArgOutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.rows)
            ),
            ArgOutputFormat::Table => {
                let style = match self.formatter.header {
                    true => TableStyleBasic::new().with_header(),
                    false => TableStyleBasic::new(),
                };
                write!(f, "{}", Table::new(style, columns, self.rows))
            }
        }
    }
}
