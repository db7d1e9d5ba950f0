mod cli;
mod paths;
mod render;

use std::fs;
use std::fs::File;
use std::process::ExitCode;
use std::time::Duration;

use async_trait::async_trait;
use clap::CommandFactory;
use clap::Parser;
use clap::error::ErrorKind;
use dispatch_lib::api::AccessToken;
use dispatch_lib::api::Backend;
use dispatch_lib::api::DispatchClient;
use dispatch_lib::api::TokenProvider;
use dispatch_lib::error::AuthError;
use dispatch_lib::error::Error;
use dispatch_lib::session::ResourceView;
use log::info;
use log::warn;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::cli::Args;
use crate::cli::Command;
use crate::cli::ListArgs;

/// Token from the command line or environment, if any.
struct CliToken(Option<String>);

#[async_trait]
impl TokenProvider for CliToken {
    async fn get_token(&self, _base_url: &str) -> Result<AccessToken, AuthError> {
        self.0
            .as_deref()
            .map(AccessToken::new)
            .ok_or(AuthError::NotAuthenticated)
    }
}

fn init_logging(level: LevelFilter) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
        }
        Err(e) => eprintln!("Warning: cannot write log file {}: {}", path.display(), e),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_logging(args.log_level.into());

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Error> {
    let client = DispatchClient::builder()
        .url(&args.url)
        .token_provider(CliToken(args.token))
        .timeout(Duration::from_secs(args.timeout))
        .build()?;
    info!("Using backend at {}", client.base_url());

    match args.command {
        Command::List(list) => list_rows(client, list).await,
        Command::Delete { resource, ids } => {
            let mut view = ResourceView::new(client, resource);
            view.refresh().await?;
            for id in &ids {
                if !view.table().rows().iter().any(|row| row.id() == id) {
                    warn!("{} {} not found", resource, id);
                    eprintln!("Skipping unknown id {}", id);
                }
                view.table_mut().toggle_row(id, true);
            }
            let deleted = view.delete_selected().await?;
            println!("Deleted {} {}", deleted.len(), resource);
            Ok(())
        }
        Command::Settings => {
            let settings = client.settings().await?;
            print!("{}", render::render_settings(&settings));
            Ok(())
        }
    }
}

async fn list_rows(client: DispatchClient, list: ListArgs) -> Result<(), Error> {
    let config = match list.table_config() {
        Ok(config) => config,
        Err(message) => {
            warn!("{}", message);
            Args::command().error(ErrorKind::ValueValidation, message).exit()
        }
    };

    let mut view = ResourceView::with_config(client, list.resource, config);
    view.refresh().await?;

    for (field, input) in &list.filters {
        if !view.set_filter_input(field, input) {
            eprintln!("Ignoring filter {}={}: not a valid {:?} value", field, input, view.field_type(field));
        }
    }
    view.table_mut().apply_filter();

    let table = view.table_mut();
    for field in &list.hide {
        table.toggle_column(field, false);
    }
    table.set_page(list.page);

    print!("{}", render::render_table(&table.view()));
    Ok(())
}
