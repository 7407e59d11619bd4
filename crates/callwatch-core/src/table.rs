/// Minimal bordered table renderer for report output. Column widths size
/// themselves to the widest cell; every row is framed so multi-row reports
/// stay readable in a plain terminal.
#[derive(Clone, Debug)]
pub struct TableView {
    columns: usize,
    rows: Vec<Vec<String>>,
    padding: usize,
    border: bool,
}

impl TableView {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            padding: 1,
            border: true,
        }
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    /// Add one row. Missing cells render empty; extra cells are ignored.
    pub fn add_row(&mut self, cells: Vec<String>) {
        let mut row = cells;
        row.resize(self.columns, String::new());
        row.truncate(self.columns);
        self.rows.push(row);
    }

    pub fn draw(&self) -> String {
        let mut widths = vec![0usize; self.columns];
        for row in &self.rows {
            for (index, cell) in row.iter().enumerate() {
                widths[index] = widths[index].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let rule = self.horizontal_rule(&widths);
        if self.border {
            out.push_str(&rule);
            out.push('\n');
        }
        for row in &self.rows {
            out.push_str(&self.render_row(row, &widths));
            out.push('\n');
            if self.border {
                out.push_str(&rule);
                out.push('\n');
            }
        }
        out
    }

    fn horizontal_rule(&self, widths: &[usize]) -> String {
        let mut rule = String::from("+");
        for width in widths {
            rule.push_str(&"-".repeat(width + self.padding * 2));
            rule.push('+');
        }
        rule
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let pad = " ".repeat(self.padding);
        let mut line = String::new();
        let separator = if self.border { "|" } else { " " };
        line.push_str(separator);
        for (index, cell) in row.iter().enumerate() {
            let fill = " ".repeat(widths[index] - cell.chars().count());
            line.push_str(&pad);
            line.push_str(cell);
            line.push_str(&fill);
            line.push_str(&pad);
            line.push_str(separator);
        }
        line
    }
}
