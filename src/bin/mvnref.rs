use anyhow::{Context, Result};
use clap::Parser;

use mvnref::{
    cli::{Cli, Commands, PrepareArgs, ResolveArgs},
    diagnostics::{CollectingSink, Diagnostic},
    manifest::DeclarationFile,
    model::RepositoryLayoutResolver,
    pipeline::{self, RawDeclaration},
    resolver::ResolvedReferenceItem,
};

fn main() {
    if let Err(error) = real_main() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Prepare(args) => handle_prepare(args),
        Commands::Resolve(args) => handle_resolve(args),
    }
}

fn handle_prepare(args: PrepareArgs) -> Result<()> {
    let declarations = load_declarations(&args)?;
    let mut sink = CollectingSink::new();

    match pipeline::prepare(&declarations, &mut sink) {
        Ok(prepared) => {
            if args.json {
                let payload = serde_json::to_string_pretty(&prepared)
                    .context("failed to serialize prepared items")?;
                println!("{payload}");
            } else {
                for item in &prepared {
                    println!("{}  =>  {}", item.item_spec, item.coordinate);
                }
            }
            Ok(())
        }
        Err(error) => {
            report_diagnostics(sink.diagnostics());
            Err(error.into())
        }
    }
}

fn handle_resolve(args: ResolveArgs) -> Result<()> {
    let file = DeclarationFile::load(&args.file)
        .with_context(|| format!("could not load {}", args.file.display()))?;
    let declarations = file.to_declarations();

    let mut model = RepositoryLayoutResolver::new(&args.repository);
    if args.require_artifacts {
        model = model.require_artifacts();
    }

    let mut sink = CollectingSink::new();
    match pipeline::resolve(&declarations, &model, &mut sink) {
        Ok(resolved) => {
            if args.json {
                let payload = serde_json::to_string_pretty(&resolved)
                    .context("failed to serialize resolved items")?;
                println!("{payload}");
            } else {
                render_resolved(&resolved);
            }
            Ok(())
        }
        Err(error) => {
            report_diagnostics(sink.diagnostics());
            Err(error.into())
        }
    }
}

fn load_declarations(args: &PrepareArgs) -> Result<Vec<RawDeclaration>> {
    let file = DeclarationFile::load(&args.file)
        .with_context(|| format!("could not load {}", args.file.display()))?;
    Ok(file.to_declarations())
}

fn render_resolved(resolved: &[ResolvedReferenceItem]) {
    for item in resolved {
        println!("{}", item.coordinate);
        for entry in &item.entries {
            match &entry.file_path {
                Some(path) => println!("  [{:?}] {}  ({})", entry.kind, entry.identity, path),
                None => println!("  [{:?}] {}", entry.kind, entry.identity),
            }
        }
    }
}

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        if diagnostic.args.is_empty() {
            eprintln!("{}: {}", diagnostic.code, diagnostic.item_spec);
        } else {
            eprintln!(
                "{}: {} ({})",
                diagnostic.code,
                diagnostic.item_spec,
                diagnostic.args.join(", ")
            );
        }
    }
}
