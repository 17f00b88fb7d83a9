use tabled::{settings::Style, Table, Tabled};

use crate::graph::GraphStats;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: impl ToString) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &GraphStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Components", stats.components);
    builder.add_row("Max depth", stats.max_depth);
    builder.add_row("Contribution bindings", stats.contribution_bindings);
    builder.add_row("Members-injection bindings", stats.members_injection_bindings);
    builder.add_row("Unsatisfied keys", stats.unsatisfied_keys);
    builder.build()
}
