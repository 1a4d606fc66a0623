//! Table rendering for CLI output

use super::colors::table_color_to_colored_str;
use super::{ColorTheme, StatusIcon};
use crate::domain::config::{ConfigMap, Value};
use crate::shared::Diagnostics;
use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the read-back state of one resource as field/value rows
    pub fn render_resource(
        &self,
        type_name: &str,
        id: &str,
        block: Option<&Value>,
        created: Option<DateTime<Utc>>,
    ) -> String {
        let mut rows = Vec::new();
        if let Some(Value::List(items)) = block {
            if let Some(Value::Map(fields)) = items.first() {
                flatten_map("", fields, &mut rows);
            }
        } else if let Some(Value::Map(fields)) = block {
            flatten_map("", fields, &mut rows);
        }

        if rows.is_empty() {
            return format!("No state recorded for {} {}", type_name, id);
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("FIELD").set_alignment(CellAlignment::Left),
                Cell::new("VALUE").set_alignment(CellAlignment::Left),
            ]);

        for (field, value) in &rows {
            let color = self.theme.get_value_color(value);
            table.add_row(vec![Cell::new(field), Cell::new(value).fg(color)]);
        }

        let age = created
            .map(|created| format_age(created, Utc::now()))
            .unwrap_or_else(|| "-".to_string());

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ {} {} {} ─╮\n",
            type_name,
            id.bold(),
            format!("[age {}]", age).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Render diagnostics, one entry per line pair
    pub fn render_diagnostics(&self, diagnostics: &Diagnostics) -> String {
        let mut output = String::new();
        for diagnostic in diagnostics.iter() {
            let color = table_color_to_colored_str(self.theme.get_severity_color(diagnostic.severity));
            output.push_str(&format!(
                "{} {}\n  {}\n",
                format!(
                    "{} {}:",
                    StatusIcon::get_severity_icon(diagnostic.severity),
                    StatusIcon::get_severity_text(diagnostic.severity)
                )
                .color(color),
                diagnostic.summary.bold(),
                diagnostic.detail
            ));
        }
        output
    }

    /// One-line confirmation for a finished operation
    pub fn render_success(&self, message: &str) -> String {
        let color = table_color_to_colored_str(self.theme.success);
        format!("{} {}", StatusIcon::SUCCESS.color(color), message)
    }
}

fn flatten_map(prefix: &str, map: &ConfigMap, rows: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        flatten_value(&path, value, rows);
    }
}

fn flatten_value(path: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Map(map) => flatten_map(path, map, rows),
        Value::List(items) if items.iter().any(|item| matches!(item, Value::Map(_))) => {
            for (i, item) in items.iter().enumerate() {
                flatten_value(&format!("{}[{}]", path, i), item, rows);
            }
        }
        other => rows.push((path.to_string(), other.to_string())),
    }
}

/// Kubectl-style age: `42s`, `5m`, `3h`, `12d`.
pub fn format_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - created).num_seconds().max(0);
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h", seconds / 3600)
    } else {
        format!("{}d", seconds / 86400)
    }
}
