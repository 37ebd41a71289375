//! Terminal rendering of board snapshots for the CLI.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};

use std::path::Path;

use stockpile_core::{InventorySummary, LaneQuantityRule, Product, ProductStatus, SkipReason};

use crate::state::{BoardSnapshot, ConfigState, DropOutcome};

/// Renders the three lanes, one table per lane.
pub fn board(snapshot: &BoardSnapshot) -> String {
    let mut out = String::new();

    if !snapshot.filters.is_empty() {
        out.push_str(&format!(
            "Showing {} of {} products\n",
            snapshot.visible.total, snapshot.totals.total
        ));
    }

    for lane in &snapshot.view.lanes {
        out.push_str(&format!("\n{} ({})\n", lane.status, lane.products.len()));
        if lane.products.is_empty() {
            out.push_str("  (empty)\n");
            continue;
        }
        let mut table = product_table();
        for product in &lane.products {
            let mut row = product_row(product);
            if snapshot.animating.contains(&product.id) {
                row[1] = Cell::new(format!("{} (moving)", product.name));
            }
            table.add_row(row);
        }
        out.push_str(&table.to_string());
        out.push('\n');
    }

    out
}

/// Renders one product as a two-column detail table.
pub fn product(product: &Product) -> String {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    table.add_row(vec![Cell::new("ID"), Cell::new(product.id)]);
    table.add_row(vec![Cell::new("Name"), Cell::new(&product.name)]);
    table.add_row(vec![Cell::new("Category"), Cell::new(&product.category)]);
    table.add_row(vec![Cell::new("Supplier"), Cell::new(&product.supplier)]);
    table.add_row(vec![Cell::new("Quantity"), Cell::new(product.quantity)]);
    table.add_row(vec![Cell::new("Status"), status_cell(product.status)]);
    table.to_string()
}

/// Renders lane counts with a total row.
pub fn summary(summary: &InventorySummary) -> String {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Lane"), header_cell("Products")]);
    for status in ProductStatus::ALL {
        table.add_row(vec![status_cell(status), Cell::new(summary.count(status))]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(summary.total).add_attribute(Attribute::Bold),
    ]);
    align_column(&mut table, 1, CellAlignment::Right);
    table.to_string()
}

/// Renders the effective configuration.
pub fn config(config: &ConfigState, data_dir: &Path) -> String {
    let rule = match config.lane_quantity_rule {
        LaneQuantityRule::Preserve => "keep quantity",
        LaneQuantityRule::ZeroOutOfStock => "zero when moved to Out of Stock",
    };

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    table.add_row(vec![
        Cell::new("Data directory"),
        Cell::new(data_dir.display()),
    ]);
    table.add_row(vec![
        Cell::new("Enter delay"),
        Cell::new(format!("{} ms", config.enter_delay_ms)),
    ]);
    table.add_row(vec![
        Cell::new("Settle delay"),
        Cell::new(format!("{} ms", config.settle_delay_ms)),
    ]);
    table.add_row(vec![Cell::new("Export file"), Cell::new(&config.export_file)]);
    table.add_row(vec![Cell::new("Lane change"), Cell::new(rule)]);
    table.to_string()
}

/// One-line description of a drop result.
pub fn drop_outcome(id: i64, target: ProductStatus, outcome: &DropOutcome) -> String {
    match outcome {
        DropOutcome::Moved(product) => format!(
            "Moved {} (id {}) to {} (quantity {})",
            product.name, product.id, product.status, product.quantity
        ),
        DropOutcome::Skipped(SkipReason::UnknownProduct) => {
            format!("Nothing to move: no product with id {id}")
        }
        DropOutcome::Skipped(SkipReason::SameLane) => {
            format!("Nothing to move: product {id} is already in {target}")
        }
        DropOutcome::Skipped(SkipReason::InFlight) => {
            format!("Nothing to move: product {id} is already moving")
        }
    }
}

fn product_table() -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Category"),
        header_cell("Supplier"),
        header_cell("Qty"),
    ]);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    table
}

fn product_row(product: &Product) -> Vec<Cell> {
    vec![
        Cell::new(product.id),
        Cell::new(&product.name),
        Cell::new(&product.category),
        Cell::new(&product.supplier),
        Cell::new(product.quantity),
    ]
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: ProductStatus) -> Cell {
    let color = match status {
        ProductStatus::InStock => Color::Green,
        ProductStatus::LowStock => Color::Yellow,
        ProductStatus::OutOfStock => Color::Red,
    };
    Cell::new(status.label()).fg(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockpile_core::view::{compute_view, summarize};
    use stockpile_core::{seed_products, FilterCriteria};

    fn snapshot(filters: FilterCriteria) -> BoardSnapshot {
        let products = seed_products();
        let view = compute_view(&products, &filters);
        BoardSnapshot {
            filters,
            visible: view.summary(),
            view,
            totals: summarize(&products),
            categories: vec![],
            suppliers: vec![],
            animating: vec![3],
            dark_mode: false,
        }
    }

    #[test]
    fn test_board_lists_every_lane() {
        let text = board(&snapshot(FilterCriteria::none()));
        assert!(text.contains("In Stock (3)"));
        assert!(text.contains("Low Stock (3)"));
        assert!(text.contains("Out of Stock (2)"));
        assert!(text.contains("Gaming Chair (moving)"));
        assert!(!text.contains("Showing"));
    }

    #[test]
    fn test_filtered_board_shows_counts_and_empty_lanes() {
        let text = board(&snapshot(FilterCriteria::search("iphone")));
        assert!(text.starts_with("Showing 1 of 8 products"));
        assert!(text.contains("(empty)"));
    }

    #[test]
    fn test_summary_and_product() {
        let text = summary(&summarize(&seed_products()));
        assert!(text.contains("Total"));
        assert!(text.contains("Out of Stock"));

        let text = product(&seed_products()[0]);
        assert!(text.contains("Apple Inc"));
    }

    #[test]
    fn test_config_table() {
        let config = ConfigState {
            lane_quantity_rule: LaneQuantityRule::ZeroOutOfStock,
            ..ConfigState::default()
        };
        let text = super::config(&config, Path::new("/tmp/stockpile"));
        assert!(text.contains("/tmp/stockpile"));
        assert!(text.contains("300 ms"));
        assert!(text.contains("inventory.json"));
        assert!(text.contains("zero when moved to Out of Stock"));
    }

    #[test]
    fn test_drop_outcome_text() {
        let text = drop_outcome(
            1,
            ProductStatus::InStock,
            &DropOutcome::Skipped(SkipReason::SameLane),
        );
        assert_eq!(text, "Nothing to move: product 1 is already in In Stock");
    }
}
