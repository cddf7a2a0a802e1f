use anyhow::{Context, Result};
use scene_provision::cli::{CliCommand, CliOptions, RequestSource};
use scene_provision::{Dispatcher, ProvisionConfig, Response, Scene};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process;

const DEFAULT_CONFIG_PATH: &str = "config/provision.json";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let options = match CliOptions::parse_from_env() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            print_usage();
            process::exit(2);
        }
    };
    if let Err(err) = run(options) {
        eprintln!("error: {err:?}");
        process::exit(1);
    }
}

fn run(options: CliOptions) -> Result<()> {
    let CliCommand::Run { scene: scene_path, request } = &options.command else {
        print_usage();
        return Ok(());
    };

    let mut config = match &options.config {
        Some(path) => ProvisionConfig::load(path)?,
        None => ProvisionConfig::load_or_default(DEFAULT_CONFIG_PATH),
    };
    if !options.overrides.is_empty() {
        log::info!("[scene_tool] overriding config fields: {}", options.overrides.applied_fields().join(", "));
        config.apply_overrides(&options.overrides);
    }

    let mut scene = Scene::load_from_path(scene_path)?;
    let raw = read_request(request)?;
    let mut dispatcher = Dispatcher::new(config);

    let output = match raw {
        Value::Array(batch) => {
            let responses: Vec<Response> =
                batch.into_iter().map(|item| dispatch_logged(&mut dispatcher, &mut scene, item)).collect();
            serde_json::to_value(&responses)?
        }
        single => dispatch_logged(&mut dispatcher, &mut scene, single).to_json(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    if options.dry_run {
        log::info!("[scene_tool] dry run, leaving '{}' untouched", scene_path.display());
    } else {
        scene.save_to_path(scene_path)?;
    }
    Ok(())
}

fn dispatch_logged(dispatcher: &mut Dispatcher, scene: &mut Scene, raw: Value) -> Response {
    let response = dispatcher.dispatch_json(scene, raw);
    for event in dispatcher.provisioner_mut().drain_events() {
        log::info!("[scene_tool] {event}");
    }
    response
}

fn read_request(source: &RequestSource) -> Result<Value> {
    let text = match source {
        RequestSource::Stdin => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("Failed to read request from stdin")?;
            text
        }
        RequestSource::File(path) => read_file(path)?,
    };
    serde_json::from_str(&text).context("Failed to parse request JSON")
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read request file {}", path.display()))
}

fn print_usage() {
    eprintln!(
        "Scene Tool

Usage:
  scene_tool [flags] <scene_path> <request_path|->   Run one request (or an array of requests) against a scene
  scene_tool help                                      Show this message

Flags:
  --config <path>          Provisioning config (default: {DEFAULT_CONFIG_PATH} when present)
  --search-limit <n>       Maximum asset search results
  --validate-sample <n>    Index entries validated when no paths are given
  --dry-run                Print responses without saving the scene
"
    );
}
