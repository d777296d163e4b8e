use anyhow::Result;
use clap::Parser;
use mead_rust::{cli, config, render};

use cli::{Cli, Commands, ConditionsCommand, RegionsCommand};
use config::Config;
use mead_common::format::RegionTypeFilter;
use mead_common::{paginate, ConditionsClient, GeographyClient, QueryState, RegionSummary};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Conditions { command } => {
            let client = ConditionsClient::new(config.conditions_base());
            match command {
                ConditionsCommand::List {
                    search,
                    page,
                    page_size,
                } => {
                    if cli.verbose {
                        println!("conditions API: {:?}", config.conditions_base());
                    }
                    println!("Loading conditions...");
                    let conditions = client.list().await?;

                    let mut query = QueryState::new();
                    query.set_search_query(search);
                    query.page_number = page.max(1);
                    query.apply_page_size(page_size);

                    print!("{}", render::render_condition_page(&paginate(&conditions, &query)));
                }
                ConditionsCommand::Show { id } => {
                    println!("Loading condition details...");
                    let detail = client.detail(&id).await?;
                    print!("{}", render::render_condition_detail(&detail));
                }
            }
        }

        Commands::Regions { command } => {
            let client = GeographyClient::new(config.geography_base());
            match command {
                RegionsCommand::List {
                    search,
                    region_type,
                    page,
                    page_size,
                } => {
                    if cli.verbose {
                        println!("geography API: {:?}", config.geography_base());
                    }
                    println!("Loading regions...");
                    let regions = client.list().await?;

                    // タイプ絞り込みを検索より先に適用（Web版と同じ順序）
                    let type_filter: RegionTypeFilter = region_type.into();
                    let typed: Vec<RegionSummary> = regions
                        .into_iter()
                        .filter(|region| type_filter.matches(&region.schema_type))
                        .collect();

                    let mut query = QueryState::new();
                    query.set_search_query(search);
                    query.page_number = page.max(1);
                    query.apply_page_size(page_size);

                    print!("{}", render::render_region_page(&paginate(&typed, &query)));
                }
                RegionsCommand::Show { id } => {
                    println!("Loading region details...");
                    let detail = client.detail(&id).await?;
                    print!("{}", render::render_region_detail(&detail));
                }
            }
        }

        Commands::Config {
            set_conditions_url,
            set_geography_url,
        } => {
            let mut config = config;
            let mut changed = false;
            if let Some(url) = set_conditions_url {
                config.conditions_api_base_url = Some(url);
                changed = true;
            }
            if let Some(url) = set_geography_url {
                config.geography_api_base_url = Some(url);
                changed = true;
            }
            if changed {
                config.save()?;
                println!("設定を保存: {}", Config::config_path()?.display());
            }
            println!(
                "conditions API: {}",
                config.conditions_base().unwrap_or_else(|| "(未設定)".to_string())
            );
            println!(
                "geography API:  {}",
                config.geography_base().unwrap_or_else(|| "(未設定)".to_string())
            );
        }
    }

    Ok(())
}
