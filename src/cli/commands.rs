use crate::{
    cli::args::{AksArgs, GenerateArgs, ListArgs, PromptArgs, ScaffoldArgs, ScaffoldTarget},
    core::{
        catalog::{route, Catalog},
        compose::compose,
        config::{BlueprintConfig, ConfigLoader},
        package::package_to_file,
        prompt::parse_prompt,
        render::{document_digest, render},
        scaffold::{generate_aks, write_files, AksParams, AzureEnvironment},
        state::{decode_state, encode_state, SelectionState},
        types::ErrorCategory,
        AppError,
    },
    Result,
};
use anyhow::Context;
use blueprint_types::{Practice, Runner, Selector, Workload};
use std::{env, fs, io::Write, path::Path};
use tracing::{debug, info};

fn load_config(explicit: Option<&Path>) -> Result<BlueprintConfig> {
    let config = match explicit {
        Some(path) => ConfigLoader::load_explicit(path)?,
        None => {
            let cwd = env::current_dir().context("failed to resolve current directory")?;
            ConfigLoader::load_from_workspace(&cwd)?
        }
    };
    Ok(config)
}

/// Flags win over the state query, which wins over configured defaults.
pub fn resolve_selection(args: &GenerateArgs, config: &BlueprintConfig) -> SelectionState {
    let defaults = SelectionState {
        provider: config.defaults.provider.clone(),
        workload: config.defaults.workload,
        practice: config.defaults.practice,
        runner: config.defaults.runner,
        addons: config.defaults.addons.clone(),
    };
    let from_state = args.state.as_deref().map(decode_state).unwrap_or_default();
    let mut selection = from_state.complete(defaults);

    if let Some(provider) = &args.provider {
        selection.provider = provider.clone();
    }
    if let Some(runner) = args.runner {
        selection.runner = runner;
    }
    if let Some(workload) = args.workload {
        selection.workload = workload;
    }
    if let Some(practice) = args.practice {
        selection.practice = practice;
    }
    if !args.addons.is_empty() {
        selection.addons = args.addons.clone();
    }
    selection
}

pub fn generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let selection = resolve_selection(&args, &config);
    let catalog = Catalog::with_overlay(config.catalog.dir.as_deref())?;

    let resolution = catalog.template(&selection.selector())?;
    let addons = catalog.addons(&selection.addons)?;
    let merged = compose(resolution.template, &addons);
    let document = render(&merged.template, args.format)?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(output = %path.display(), "wrote pipeline document");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }

    if let Some(archive) = &args.archive {
        let archive_path = archive.as_deref().unwrap_or(&config.output.archive);
        package_to_file(
            archive_path,
            config.output.document_path(args.format),
            &document,
            &merged.files,
        )?;
    }

    info!(
        template = resolution.name,
        fallback = resolution.fallback,
        addons = selection.addons.len(),
        state = %encode_state(&selection),
        digest = %document_digest(&document),
        "generated pipeline"
    );
    Ok(())
}

pub fn list(args: ListArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let catalog = Catalog::with_overlay(config.catalog.dir.as_deref())?;

    println!("Templates:");
    for name in catalog.template_names() {
        println!("  {}", name);
    }

    println!("\nRoutes:");
    for runner in Runner::ALL {
        for workload in Workload::ALL {
            for practice in Practice::ALL {
                let selector = Selector::new(runner, workload, practice);
                if let Some(name) = route(&selector) {
                    println!("  {:<32} {}", selector.to_string(), name);
                }
            }
        }
    }

    println!("\nAdd-ons:");
    for id in catalog.addon_ids() {
        println!("  {}", id);
    }
    Ok(())
}

pub fn prompt(args: PromptArgs) -> Result<()> {
    let params = parse_prompt(&args.text);
    debug!(?params, "parsed prompt");
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

pub fn scaffold(args: ScaffoldArgs) -> Result<()> {
    match args.target {
        ScaffoldTarget::Aks(aks) => scaffold_aks(aks),
    }
}

fn scaffold_aks(args: AksArgs) -> Result<()> {
    let params = AksParams {
        name: args.name,
        env: args.env,
        region: args.region,
        azure_environment: if args.gov {
            AzureEnvironment::UsGovernment
        } else {
            AzureEnvironment::Public
        },
        private_cluster: args.private,
    };
    let files = generate_aks(&params).map_err(|err| {
        AppError::new(ErrorCategory::ValidationError, err.to_string())
            .with_suggestion("Use letters, digits, '-' and '_' for --name, --env and --region")
    })?;

    let written = write_files(&args.out, &files)?;
    for path in &written {
        println!("{}", path.display());
    }
    info!(files = written.len(), out = %args.out.display(), "scaffolded AKS cluster");
    Ok(())
}
