use std::{fs, io::Write, path::PathBuf};

use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use protodoc::{generate_doc, schema::Definition, RenderOptions};
use protox::Compiler;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(version, about)]
pub struct Args {
    /// The source file(s) to document
    #[clap(value_name = "PROTO_FILES", required = true, value_parser)]
    files: Vec<PathBuf>,
    /// The directory in which to search for imports.
    #[clap(
        short = 'I',
        long = "include",
        visible_alias = "proto_path",
        value_name = "PATH",
        default_value = ".",
        value_parser
    )]
    includes: Vec<PathBuf>,
    /// The path to write the HTML documentation to. Defaults to stdout.
    #[clap(short = 'o', long = "output", value_name = "PATH", value_parser)]
    output: Option<PathBuf>,
    /// A CSS file to embed in the page instead of the default style.
    #[clap(long, value_name = "PATH", value_parser)]
    style: Option<PathBuf>,
    /// The title of the generated page.
    #[clap(long)]
    title: Option<String>,
}

pub fn main() -> Result<()> {
    miette::set_panic_hook();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut options = RenderOptions {
        title: args.title,
        ..Default::default()
    };
    if let Some(style) = &args.style {
        let css = fs::read_to_string(style)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read style '{}'", style.display()))?;
        options.custom_style = Some(css);
    }

    let mut compiler = Compiler::new(args.includes)?;
    compiler.include_source_info(true);
    compiler.include_imports(false);
    for file in &args.files {
        compiler.open_file(file)?;
    }

    let definitions = Definition::from_file_descriptor_set(&compiler.file_descriptor_set());
    tracing::info!(files = definitions.len(), "compiled schema files");

    let html = generate_doc(&definitions, &options)?;
    match args.output {
        Some(output) => fs::write(&output, html)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write '{}'", output.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(html.as_bytes())
            .into_diagnostic()?,
    }
    Ok(())
}
