// pydantic-gen/src/commands/generate.rs
//
// USE CASE: Generate the Pydantic module(s) of a file or a directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pydantic_gen_core::GeneratorError;
use pydantic_gen_core::application::{ClassGenerator, GenerateOptions};
use pydantic_gen_core::infrastructure::compiler::JinjaRenderer;
use pydantic_gen_core::infrastructure::config::load_generator_config;
use pydantic_gen_core::infrastructure::error::InfrastructureError;

pub fn execute(
    config_path: Option<&Path>,
    input: PathBuf,
    output: Option<PathBuf>,
    runtime_import: Option<String>,
    with_defaults: bool,
    no_init: bool,
    stdout: bool,
) -> anyhow::Result<()> {
    let config = load_generator_config(Path::new("."), config_path)?;
    tracing::debug!(?config, "Generator configuration");

    // CLI flags win over file and environment
    let mut options = GenerateOptions::from(&config);
    if runtime_import.is_some() {
        options.runtime_import = runtime_import;
    }
    if with_defaults {
        options.with_defaults = true;
    }
    if no_init {
        options.init_files = false;
    }

    let engine = Arc::new(JinjaRenderer::new(config.template_dir.clone()));
    let generator = ClassGenerator::new(engine, options);

    if input.is_dir() {
        if stdout {
            anyhow::bail!("❌ --stdout needs a single input file, '{}' is a directory", input.display());
        }
        let output_dir = output.unwrap_or_else(|| PathBuf::from(&config.output_dir));
        println!(
            "🏗️  Generating classes for '{}' into '{}'...",
            input.display(),
            output_dir.display()
        );

        let report = generator.generate_class_code_from_dir(&input, &output_dir)?;
        for module in &report.generated {
            println!(
                "   ✅ {} -> {} ({} classes)",
                module.input.display(),
                module.output.display(),
                module.classes
            );
        }
        for skipped in &report.skipped {
            println!("   ⏭️  {} (unsupported format)", skipped.display());
        }
        println!("✨ {} module(s) generated.", report.generated.len());
        return Ok(());
    }

    if stdout {
        let root = generator
            .parse_file(&input)?
            .ok_or_else(|| unsupported(&input))?;
        print!("{}", generator.generate_all_classes(&root)?);
        return Ok(());
    }

    let output = output.unwrap_or_else(|| default_output(&input));
    match generator.generate_class_code(&input, &output)? {
        Some(module) => {
            println!(
                "✨ {} generated: {} classes, root {}",
                module.output.display(),
                module.classes,
                module.root_class
            );
            Ok(())
        }
        None => Err(unsupported(&input).into()),
    }
}

fn unsupported(input: &Path) -> GeneratorError {
    GeneratorError::from(InfrastructureError::UnsupportedFormat(input.to_path_buf()))
}

/// `configs/app.yaml` -> `app.py` in the working directory.
fn default_output(input: &Path) -> PathBuf {
    let file_name = input.file_name().map(PathBuf::from).unwrap_or_default();
    file_name.with_extension("py")
}
