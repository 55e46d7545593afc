//! `woodcore` - call the WoodCore core-banking API from the command line

mod config;
mod params;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use futures::StreamExt;
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use woodcore_sdk::groups::{self, GROUPS};
use woodcore_sdk::{Endpoint, Verb, WoodCore};

use crate::config::CliConfig;
use crate::params::{build_params, parse_param};

#[derive(Debug, Parser)]
#[command(name = "woodcore", version)]
#[command(about = "Call the WoodCore core-banking API", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file [default: woodcore.yaml if present]
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API key, overrides WOODCORE_API_KEY and the config file
    #[arg(long, global = true, value_name = "KEY")]
    api_key: Option<String>,

    /// Base URL, overrides the environment derived from the key
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the endpoint tables
    Endpoints {
        /// Only list this group
        #[arg(long, value_name = "GROUP")]
        group: Option<String>,
    },

    /// Execute one call and print the response body
    Call {
        #[arg(value_name = "GROUP")]
        group: String,

        #[arg(value_name = "ENDPOINT")]
        endpoint: String,

        /// Call parameter (repeatable: -p loanAccountId=42 -p perPage=50)
        #[arg(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
        params: Vec<(String, Value)>,

        /// Parameters as one JSON object; -p values take precedence
        #[arg(long, value_name = "OBJECT")]
        json: Option<String>,
    },

    /// Fetch every page of a list endpoint, one JSON document per line
    Pages {
        #[arg(value_name = "GROUP")]
        group: String,

        #[arg(value_name = "ENDPOINT")]
        endpoint: String,

        /// Call parameter (repeatable)
        #[arg(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
        params: Vec<(String, Value)>,

        /// Parameters as one JSON object; -p values take precedence
        #[arg(long, value_name = "OBJECT")]
        json: Option<String>,

        /// Stop after this many pages
        #[arg(long, value_name = "N")]
        max_pages: Option<usize>,
    },
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info,woodcore_sdk=debug",
        _ => "debug,woodcore_sdk=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        config,
        api_key,
        base_url,
        command,
        ..
    } = cli;

    let connect = || -> anyhow::Result<WoodCore> {
        let settings = CliConfig::load(config.as_deref())?.with_overrides(api_key, base_url);
        let client = WoodCore::from_config(settings.into_client_config()?)?;
        debug!(
            environment = client.environment().as_str(),
            base_url = client.base_url(),
            "client ready"
        );
        Ok(client)
    };

    match command {
        Command::Endpoints { group } => {
            for line in endpoint_lines(group.as_deref())? {
                println!("{line}");
            }
        }
        Command::Call {
            group,
            endpoint,
            params,
            json,
        } => {
            let endpoint = find_endpoint(&group, &endpoint)?;
            let params = build_params(json.as_deref(), params)?;
            let client = connect()?;
            let body = client
                .executor()
                .call(endpoint, &params)
                .await
                .with_context(|| format!("{group}.{} failed", endpoint.name))?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Command::Pages {
            group,
            endpoint,
            params,
            json,
            max_pages,
        } => {
            let endpoint = find_endpoint(&group, &endpoint)?;
            if endpoint.verb != Verb::Get {
                bail!("{group}.{} is a {} endpoint and has no pages", endpoint.name, endpoint.verb.as_str());
            }
            let params = build_params(json.as_deref(), params)?;
            let client = connect()?;
            let descriptor = endpoint.descriptor(&params)?;
            let mut pages = client.executor().pages(descriptor);

            let mut fetched = 0_usize;
            while let Some(page) = pages.next().await {
                let page = page.with_context(|| format!("{group}.{} failed", endpoint.name))?;
                println!("{}", serde_json::to_string(&page)?);
                fetched += 1;
                if max_pages.is_some_and(|max| fetched >= max) {
                    break;
                }
            }
            info!(pages = fetched, "page stream finished");
        }
    }
    Ok(())
}

fn find_endpoint(group: &str, name: &str) -> anyhow::Result<&'static Endpoint> {
    if groups::group(group).is_none() {
        let known: Vec<_> = GROUPS.iter().map(|(name, _)| *name).collect();
        bail!("unknown group '{group}' (expected one of: {})", known.join(", "));
    }
    groups::lookup(group, name).with_context(|| {
        format!("unknown endpoint '{name}' in group '{group}', see `woodcore endpoints --group {group}`")
    })
}

fn endpoint_lines(only: Option<&str>) -> anyhow::Result<Vec<String>> {
    if let Some(group) = only {
        anyhow::ensure!(groups::group(group).is_some(), "unknown group '{group}'");
    }

    let mut lines = Vec::new();
    for (group, endpoints) in GROUPS {
        if only.is_some_and(|only| only != *group) {
            continue;
        }
        for endpoint in *endpoints {
            let mut line = format!(
                "{group:<15} {:<40} {:<5} {}",
                endpoint.name,
                endpoint.verb.as_str(),
                endpoint.path
            );
            let path_params = endpoint.path_params();
            if !path_params.is_empty() {
                line.push_str(&format!("  path=[{}]", path_params.join(",")));
            }
            if let Some(query) = endpoint.query {
                line.push_str(&format!("  query=[{}]", query.join(",")));
            }
            if let Some(body) = endpoint.body {
                line.push_str(&format!("  body=[{}]", body.join(",")));
            }
            lines.push(line);
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_call_params_are_parsed() {
        let cli = Cli::try_parse_from([
            "woodcore",
            "call",
            "loans",
            "retrieve_loan_account",
            "-p",
            "loanAccountId=42",
            "--param",
            "note=hello world",
        ])
        .unwrap();

        let Command::Call { group, endpoint, params, json } = cli.command else {
            panic!("expected call");
        };
        assert_eq!(group, "loans");
        assert_eq!(endpoint, "retrieve_loan_account");
        assert_eq!(
            params,
            vec![
                ("loanAccountId".to_owned(), json!(42)),
                ("note".to_owned(), json!("hello world"))
            ]
        );
        assert!(json.is_none());
    }

    #[test]
    fn test_json_params_are_accepted() {
        let cli = Cli::try_parse_from([
            "woodcore",
            "call",
            "savings",
            "make_deposit",
            "--json",
            r#"{"accountId": 4, "transactionAmount": 500}"#,
        ])
        .unwrap();

        let Command::Call { json, params, .. } = cli.command else {
            panic!("expected call");
        };
        assert!(params.is_empty());
        let params = build_params(json.as_deref(), params).unwrap();
        assert_eq!(params.get("accountId"), Some(&json!(4)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "woodcore",
            "pages",
            "clients",
            "retrieve_customers",
            "--max-pages",
            "2",
            "-vv",
            "--api-key",
            "wc_test_x",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.api_key.as_deref(), Some("wc_test_x"));
        assert!(matches!(cli.command, Command::Pages { max_pages: Some(2), .. }));
    }

    #[test]
    fn test_find_endpoint() {
        assert_eq!(find_endpoint("savings", "post_no_debit").unwrap().name, "post_no_debit");
        assert!(find_endpoint("bank", "post_no_debit").unwrap_err().to_string().contains("unknown group"));
        assert!(find_endpoint("savings", "nope").unwrap_err().to_string().contains("unknown endpoint"));
    }

    #[test]
    fn test_endpoint_lines() {
        let lines = endpoint_lines(Some("products")).unwrap();
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|line| line.starts_with("products")));

        let all = endpoint_lines(None).unwrap();
        assert!(all.iter().any(|line| line.contains("/ledger/{glAccountId}") && line.contains("path=[glAccountId]")));
        assert!(
            lines.iter().any(|line| !line.contains("path=[")),
            "endpoints without path parameters have no path column"
        );
        assert!(all.iter().any(|line| line.contains("query=[command]") && line.contains("body=[comment]")));

        assert!(endpoint_lines(Some("bank")).is_err());
    }
}
