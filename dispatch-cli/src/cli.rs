//! Command-line arguments

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use dispatch_lib::api::DEFAULT_BASE_URL;
use dispatch_lib::api::Resource;
use dispatch_lib::model::RowId;
use dispatch_lib::table::Direction;
use dispatch_lib::table::SortState;
use dispatch_lib::table::TableConfig;
use simplelog::LevelFilter;

use crate::render::join_sizes;

/// Command-line arguments for dispatch
#[derive(Debug, Clone, Parser)]
#[command(name = "dispatch", version, about = "Dispatch back-office from the terminal")]
pub struct Args {
    /// Backend base URL
    #[arg(long, env = "DISPATCH_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Bearer token for the backend
    #[arg(long, env = "DISPATCH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log level written to the log file
    #[arg(long = "log-level", env = "DISPATCH_LOG", value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print one page of a resource collection
    List(ListArgs),

    /// Delete rows of a resource by id
    Delete {
        /// Resource collection (tasks, vehicles, jobs, users, assignments, routing)
        resource: Resource,

        /// Ids to delete
        #[arg(required = true, num_args = 1.., value_parser = parse_row_id)]
        ids: Vec<RowId>,
    },

    /// Print the system settings
    Settings,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// Resource collection (tasks, vehicles, jobs, users, assignments, routing)
    pub resource: Resource,

    /// Field to sort by
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort direction
    #[arg(long, value_enum, default_value = "asc", requires = "sort")]
    pub order: SortOrder,

    /// Filter as FIELD=VALUE; comma separated values match any of them
    #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page
    #[arg(long = "per-page", value_name = "N")]
    pub per_page: Option<usize>,

    /// Columns to hide
    #[arg(long, value_name = "FIELD", value_delimiter = ',')]
    pub hide: Vec<String>,
}

impl ListArgs {
    /// Table setup for this listing. Fails on a page size the table does not offer.
    pub fn table_config(&self) -> Result<TableConfig, String> {
        let mut config = TableConfig::default();
        if let Some(per_page) = self.per_page {
            if !config.allows_per_page(per_page) {
                return Err(format!(
                    "invalid --per-page {}: choose one of {}",
                    per_page,
                    join_sizes(&config.page_sizes)
                ));
            }
            config = config.with_per_page(per_page);
        }
        if let Some(field) = &self.sort {
            config = config.with_sort(SortState::new(field.clone(), self.order.into()));
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<SortOrder> for Direction {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Direction::Asc,
            SortOrder::Desc => Direction::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok((field.to_string(), value.to_string()))
}

// Numeric ids must reach the backend as integers.
fn parse_row_id(raw: &str) -> Result<RowId, String> {
    raw.parse::<RowId>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let args = Args::try_parse_from([
            "dispatch",
            "--url",
            "http://dispatch.local/",
            "list",
            "tasks",
            "--sort",
            "demand",
            "--order",
            "desc",
            "--filter",
            "demand=3,8",
            "--hide",
            "latitude,longitude",
        ])
        .unwrap();

        assert_eq!(args.url, "http://dispatch.local/");
        let Command::List(list) = args.command else {
            panic!("expected list");
        };
        assert_eq!(list.resource, Resource::Tasks);
        assert_eq!(list.sort.as_deref(), Some("demand"));
        assert_eq!(list.order, SortOrder::Desc);
        assert_eq!(list.filters, [("demand".to_string(), "3,8".to_string())]);
        assert_eq!(list.hide, ["latitude", "longitude"]);
        assert_eq!(list.page, 1);
    }

    #[test]
    fn test_parse_delete_ids() {
        let args = Args::try_parse_from(["dispatch", "delete", "vehicles", "4", "v-9"]).unwrap();
        let Command::Delete { resource, ids } = args.command else {
            panic!("expected delete");
        };
        assert_eq!(resource, Resource::Vehicles);
        assert_eq!(ids, [RowId::Int(4), RowId::Str("v-9".to_string())]);
    }

    #[test]
    fn test_table_config_checks_page_size() {
        let args = Args::try_parse_from(["dispatch", "list", "jobs", "--per-page", "10", "--sort", "name"]).unwrap();
        let Command::List(list) = args.command else {
            panic!("expected list");
        };
        let config = list.table_config().unwrap();
        assert_eq!(config.per_page, 10);
        assert_eq!(config.sort, Some(SortState::asc("name")));

        let args = Args::try_parse_from(["dispatch", "list", "jobs", "--per-page", "7"]).unwrap();
        let Command::List(list) = args.command else {
            panic!("expected list");
        };
        let err = list.table_config().unwrap_err();
        assert!(err.contains("5, 10, 15, 20"));
    }

    #[test]
    fn test_rejects_unknown_resource_and_bad_filter() {
        assert!(Args::try_parse_from(["dispatch", "list", "planets"]).is_err());
        assert!(Args::try_parse_from(["dispatch", "list", "tasks", "--filter", "demand"]).is_err());
    }
}
