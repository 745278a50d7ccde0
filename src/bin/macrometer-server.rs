// ABOUTME: MacroMeter server binary entry point
// ABOUTME: Loads configuration, initializes logging, and runs the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MacroMeter server
//!
//! Natural-language nutrition tracking backed by the USDA `FoodData`
//! Central database.

#![allow(clippy::print_stdout)]

use anyhow::Result;
use clap::Parser;
use macrometer::config::ServerConfig;
use macrometer::server::{self, ServerResources};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "macrometer-server",
    about = "Natural-language nutrition tracking server",
    version
)]
struct Args {
    /// HTTP listen port (overrides HTTP_PORT)
    #[arg(long)]
    http_port: Option<u16>,

    /// Data directory for history and favorites (overrides DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    macrometer::logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }

    info!("{}", config.summary());
    display_available_endpoints(&config);

    let resources = Arc::new(ServerResources::new(config)?);
    server::run(resources).await
}

fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}:{}", config.host, config.http_port);
    println!("Available endpoints:");
    println!("  GET    {base}/health");
    println!("  GET    {base}/ready");
    println!("  GET    {base}/api/nutrition/query?query=<meal phrase>");
    println!("  GET    {base}/api/meals");
    println!("  POST   {base}/api/meals");
    println!("  DELETE {base}/api/meals");
    println!("  DELETE {base}/api/meals/<id>");
    println!("  GET    {base}/api/goals");
    println!("  PUT    {base}/api/goals");
    println!("  GET    {base}/api/history?days=<n>");
    println!("  GET    {base}/api/history/export?days=<n>");
    println!("  GET    {base}/api/favorites");
    println!("  POST   {base}/api/favorites");
    println!("  DELETE {base}/api/favorites/<id>");
    println!("  POST   {base}/api/favorites/<id>/log");
    println!("  POST   {base}/api/recipes/analyze");
}
