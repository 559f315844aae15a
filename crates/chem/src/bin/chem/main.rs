mod cli;

use anyhow::Context;
use chem::environment::{self, Config, EnvironmentStore};
use chem::patch::{self, Action, Mutation};
use chem::value::Object;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("CHEM_LOG"))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let patch = load_patch(&cli.patch, cli.action)
        .with_context(|| format!("Unable to use {}", cli.patch))?;

    let environments = match &cli.environment_group {
        Some(group) => {
            let config_file = cli
                .config_file
                .as_deref()
                .context("--environment-group requires a config file (-c or CHEM_SPORK_CONFIG)")?;
            Config::load(config_file)?.group(group)?.to_vec()
        }
        None => cli.environments.clone(),
    };

    let store = EnvironmentStore::new(cli.env_path.clone());
    let mut failed = 0;

    for environment in
        environment::select_environments(&environments, cli.environment_exclude.as_deref())
    {
        println!("Processing: {environment}");

        let result = match cli.action.mutation() {
            Some(mutation) => modify(&store, environment, &patch, mutation),
            None => view(&store, environment, &patch),
        };

        // keep going, other environments are independent
        if let Err(e) = result {
            failed += 1;
            tracing::error!(%environment, "failed");
            for error in e.chain() {
                eprintln!("{error}")
            }
        }
    }

    anyhow::ensure!(failed == 0, "{failed} environment(s) failed");
    Ok(())
}

fn load_patch(args: &cli::PatchArgs, action: Action) -> anyhow::Result<Object> {
    if let Some(attribute) = &args.attribute {
        let parsed = chem::path::parse_path(attribute)?;
        if parsed.defaulted && action != Action::Get {
            tracing::warn!(
                %attribute,
                "no value given, using `{}`",
                chem::path::UNDEFINED
            );
        }
        return Ok(parsed.patch);
    }

    anyhow::ensure!(
        action != Action::Get,
        "`get` needs an attribute path (--attribute)"
    );

    let patch = match &args.file {
        Some(file) => chem::patch_source::from_file(file)?,
        None => chem::patch_source::from_editor()?,
    };
    Ok(patch)
}

fn modify(
    store: &EnvironmentStore,
    environment: &str,
    patch: &Object,
    mutation: Mutation,
) -> anyhow::Result<()> {
    let document = store
        .load(environment)
        .with_context(|| format!("Unable to load environment {environment}"))?;

    let document = patch::apply_patch(document, patch, mutation);

    store
        .write(environment, &document)
        .with_context(|| format!("Unable to write environment {environment}"))
}

fn view(store: &EnvironmentStore, environment: &str, patch: &Object) -> anyhow::Result<()> {
    let document = store
        .load(environment)
        .with_context(|| format!("Unable to load environment {environment}"))?;

    match patch::view_patch(&document, patch) {
        Some(lookup) => println!("{lookup}"),
        None => println!("{environment}: not found"),
    }

    Ok(())
}
