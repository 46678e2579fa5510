//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column widths fit the widest cell; cells may contain emoji or accented
    /// names, so widths are display widths.
    fn widths(&self) -> Vec<usize> {
        let mut w: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(cw) = w.get_mut(i) {
                    *cw = (*cw).max(cell.width());
                }
            }
        }
        w
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        push_line(&mut out, &self.headers, &widths);
        let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
        out.push_str(&"-".repeat(total));
        out.push('\n');

        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push_str(cell);
        if i + 1 < widths.len() {
            line.push_str(&" ".repeat(w.saturating_sub(cell.width()) + 2));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
