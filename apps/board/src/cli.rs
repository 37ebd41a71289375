//! CLI argument definitions for the `stockpile` binary.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use stockpile_core::{FilterCriteria, ProductDraft, ProductPatch, ProductStatus};

#[derive(Debug, Parser)]
#[command(
    name = "stockpile",
    version,
    about = "Stockpile - inventory board with In Stock, Low Stock and Out of Stock lanes",
    long_about = "Track products on a three-lane inventory board.\n\n\
                  Products are stored in the platform data directory (or --data-dir)\n\
                  and can be exported to and imported from a JSON file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Storage directory (overrides STOCKPILE_DATA_DIR).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print JSON instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the board, optionally filtered.
    List(ListArgs),

    /// Count products per lane.
    Summary,

    /// Show one product.
    Show {
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Add a product.
    Add(AddArgs),

    /// Edit fields of a product.
    Edit(EditArgs),

    /// Move a product to another lane.
    Move {
        #[arg(value_name = "ID")]
        id: i64,

        /// Target lane: "In Stock", low-stock, out, ...
        #[arg(value_name = "STATUS")]
        status: ProductStatus,
    },

    /// Write the inventory to a JSON file.
    Export {
        /// Output file (default: STOCKPILE_EXPORT_FILE or inventory.json).
        #[arg(long = "out", value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Replace the inventory with a JSON file.
    Import {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Restore the sample products.
    Reset,

    /// Remove every product.
    Clear,

    /// Show or change dark mode.
    Theme {
        #[arg(value_enum, value_name = "MODE")]
        mode: Option<ThemeArg>,
    },

    /// Show the effective configuration.
    Config,

    /// Retry saving changes that an earlier write could not store.
    Flush,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Case-insensitive match on product name.
    #[arg(long = "search", short = 's', value_name = "TEXT")]
    pub search: Option<String>,

    /// Exact category.
    #[arg(long = "category", value_name = "NAME")]
    pub category: Option<String>,

    /// Exact supplier.
    #[arg(long = "supplier", value_name = "NAME")]
    pub supplier: Option<String>,
}

impl ListArgs {
    pub fn filters(&self) -> FilterCriteria {
        FilterCriteria {
            search_text: self.search.clone().unwrap_or_default(),
            category_filter: self.category.clone().unwrap_or_default(),
            supplier_filter: self.supplier.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(long = "name")]
    pub name: String,

    #[arg(long = "category")]
    pub category: String,

    #[arg(long = "supplier")]
    pub supplier: String,

    #[arg(long = "quantity", default_value_t = 0)]
    pub quantity: u32,

    /// Lane (default: In Stock).
    #[arg(long = "status")]
    pub status: Option<ProductStatus>,
}

impl From<AddArgs> for ProductDraft {
    fn from(args: AddArgs) -> Self {
        ProductDraft {
            name: args.name,
            category: args.category,
            supplier: args.supplier,
            quantity: args.quantity,
            status: args.status,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    #[arg(value_name = "ID")]
    pub id: i64,

    #[arg(long = "name")]
    pub name: Option<String>,

    #[arg(long = "category")]
    pub category: Option<String>,

    #[arg(long = "supplier")]
    pub supplier: Option<String>,

    #[arg(long = "quantity")]
    pub quantity: Option<u32>,

    #[arg(long = "status")]
    pub status: Option<ProductStatus>,
}

impl EditArgs {
    pub fn patch(&self) -> ProductPatch {
        ProductPatch {
            name: self.name.clone(),
            category: self.category.clone(),
            supplier: self.supplier.clone(),
            quantity: self.quantity,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    On,
    Off,
    Toggle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_move_with_loose_status() {
        let cli = Cli::try_parse_from(["stockpile", "move", "4", "low-stock"]).unwrap();
        match cli.command {
            Command::Move { id, status } => {
                assert_eq!(id, 4);
                assert_eq!(status, ProductStatus::LowStock);
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(Cli::try_parse_from(["stockpile", "move", "4", "sold"]).is_err());
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from([
            "stockpile",
            "list",
            "--search",
            "iphone",
            "--supplier",
            "Apple Inc",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        let filters = args.filters();
        assert_eq!(filters.search_text, "iphone");
        assert_eq!(filters.supplier_filter, "Apple Inc");
        assert!(filters.category_filter.is_empty());
    }

    #[test]
    fn test_edit_args_to_patch() {
        let cli = Cli::try_parse_from([
            "stockpile", "edit", "2", "--quantity", "0", "--status", "out",
        ])
        .unwrap();
        let Command::Edit(args) = cli.command else {
            panic!("expected edit");
        };
        let patch = args.patch();
        assert_eq!(patch.quantity, Some(0));
        assert_eq!(patch.status, Some(ProductStatus::OutOfStock));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_parse_config_and_flush() {
        let cli = Cli::try_parse_from(["stockpile", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config));
        let cli = Cli::try_parse_from(["stockpile", "flush"]).unwrap();
        assert!(matches!(cli.command, Command::Flush));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["stockpile", "-q", "-v", "summary"]).is_err());
    }
}
