// pydantic-gen/src/commands/convert.rs
//
// USE CASE: Rewrite a configuration file in another format.

use std::path::PathBuf;

use pydantic_gen_core::application::convert_file;

pub fn execute(input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    println!("🔁 Converting '{}' to '{}'...", input.display(), output.display());

    let summary = convert_file(&input, &output)?;

    println!("✨ Converted {} -> {}", summary.from, summary.to);
    Ok(())
}
