// pydantic-gen/src/commands/inspect.rs
//
// USE CASE: Show the classes of a configuration file without writing anything.

use comfy_table::{Table, presets::UTF8_FULL};
use std::path::{Path, PathBuf};

use pydantic_gen_core::GeneratorError;
use pydantic_gen_core::application::{ClassSummary, inspect};
use pydantic_gen_core::domain::BuildOptions;
use pydantic_gen_core::infrastructure::compiler::ConfigDiscovery;
use pydantic_gen_core::infrastructure::config::load_generator_config;
use pydantic_gen_core::infrastructure::error::InfrastructureError;

use crate::cli::InspectFormat;

pub fn execute(config_path: Option<&Path>, input: PathBuf, format: InspectFormat) -> anyhow::Result<()> {
    let config = load_generator_config(Path::new("."), config_path)?;
    let options = BuildOptions {
        with_defaults: config.with_defaults,
    };

    let root = ConfigDiscovery::parse_file(&input, options)?.ok_or_else(|| {
        GeneratorError::from(InfrastructureError::UnsupportedFormat(input.clone()))
    })?;

    match format {
        InspectFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&root)?);
        }
        InspectFormat::Table => {
            let classes = inspect(&root);
            println!("🔍 {} -> {} class(es)", input.display(), classes.len());
            println!("{}", render_table(&classes));

            let adjusted = classes.iter().filter(|c| c.needs_adjustment).count();
            if adjusted > 0 {
                println!("⚠️  {} class name(s) need a manual adjustment", adjusted);
            }
        }
    }
    Ok(())
}

fn render_table(classes: &[ClassSummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Class", "Field", "Type", "Alias", "Default"]);

    for class in classes {
        let mut title = class.class_type.clone();
        if class.needs_adjustment {
            title.push_str(" ⚠️");
        }
        if class.reused > 0 {
            title.push_str(&format!(" (x{})", class.reused + 1));
        }

        if class.fields.is_empty() {
            table.add_row(vec![title, String::new(), String::new(), String::new(), String::new()]);
            continue;
        }
        for (i, field) in class.fields.iter().enumerate() {
            table.add_row(vec![
                if i == 0 { title.clone() } else { String::new() },
                field.name.clone(),
                field.annotation.clone(),
                field.alias.clone().unwrap_or_default(),
                field.default.clone().unwrap_or_default(),
            ]);
        }
    }
    table
}
