//! Plain-text rendering of a table page

use std::fmt::Write;

use dispatch_lib::api::Settings;
use dispatch_lib::table::TableView;
use unicode_width::UnicodeWidthStr;

/// Renders the page as aligned columns followed by a status line.
pub fn render_table(view: &TableView<'_>) -> String {
    let cells: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            view.columns
                .iter()
                .map(|column| row.get(column).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = view
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(column.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, view.columns.iter().map(|c| c.to_string()), &widths);
    push_line(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);
    for row in cells {
        push_line(&mut out, row.into_iter(), &widths);
    }

    let _ = writeln!(
        out,
        "\nPage {}/{} ({} per page), {} records, {} selected",
        view.current_page,
        view.total_pages,
        view.per_page,
        view.total_records,
        view.selection.selected_count
    );
    if !view.page_sizes.is_empty() {
        let _ = writeln!(out, "Page sizes: {}", join_sizes(view.page_sizes));
    }
    out
}

/// Formats page sizes as `5, 10, 15`.
pub fn join_sizes(sizes: &[usize]) -> String {
    sizes.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    // Padded by display width; wide glyphs take two cells
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(padding))
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Renders settings as `key: value` lines.
pub fn render_settings(settings: &Settings) -> String {
    let depot = match settings.depot_coordinates() {
        Some((lat, lng)) => format!("{}, {}", lat, lng),
        None => settings.depot_location.clone(),
    };
    let iterations = settings
        .routing_algo_iterations
        .map(|n| n.to_string())
        .unwrap_or_else(|| "default".to_string());

    let mut out = String::new();
    let _ = writeln!(out, "depot location:      {}", depot);
    let _ = writeln!(out, "routing key:         {}", settings.routing_key);
    let _ = writeln!(out, "algorithm iterations: {}", iterations);
    out
}

#[cfg(test)]
mod tests {
    use dispatch_lib::model::Row;
    use dispatch_lib::table::TableController;

    use super::*;

    #[test]
    fn test_render_table() {
        let mut table = TableController::default();
        table.load(vec![
            Row::new(1).set("name", "Truck").set("capacity", 10),
            Row::new(2).set("name", "Van").set("capacity", 4),
        ]);
        table.toggle_column("capacity", false);

        let text = render_table(&table.view());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id  name");
        assert_eq!(lines[1], "--  -----");
        assert_eq!(lines[2], "1   Truck");
        assert_eq!(lines[3], "2   Van");
        assert_eq!(lines[5], "Page 1/1 (5 per page), 2 records, 0 selected");
        assert_eq!(lines[6], "Page sizes: 5, 10, 15, 20");
    }

    #[test]
    fn test_render_table_aligns_wide_glyphs() {
        let mut table = TableController::default();
        table.load(vec![
            Row::new(1).set("name", "東京倉庫").set("demand", 5),
            Row::new(2).set("name", "Depot").set("demand", 3),
        ]);

        let text = render_table(&table.view());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id  name      demand");
        assert_eq!(lines[2], "1   東京倉庫  5");
        assert_eq!(lines[3], "2   Depot     3");

        let demand_column = lines[0].width() - "demand".width();
        for line in &lines[2..4] {
            assert_eq!(line.width() - 1, demand_column);
        }
    }

    #[test]
    fn test_render_settings() {
        let settings = Settings {
            id: 1,
            depot_location: "[55.75, 37.61]".to_string(),
            routing_key: "key".to_string(),
            routing_algo_iterations: None,
        };
        let text = render_settings(&settings);
        assert!(text.contains("55.75, 37.61"));
        assert!(text.contains("default"));
    }
}
