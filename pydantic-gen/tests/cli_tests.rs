use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// A copy of the demo configuration files in a temp dir, used as working directory.
struct GenTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl GenTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .context("Workspace root not found")?
            .join("demos/config_files");

        let dest = tmp.path().join("config_files");
        Self::copy_dir(&demos, &dest)?;

        Ok(Self {
            _tmp: tmp,
            root: dest,
        })
    }

    fn copy_dir(src: &PathBuf, dst: &PathBuf) -> std::io::Result<()> {
        let mut options = fs_extra::dir::CopyOptions::new();
        options.skip_exist = true;
        options.content_only = true;

        std::fs::create_dir_all(dst)?;
        fs_extra::dir::copy(src, dst, &options)
            .map(|_| ())
            .map_err(|e| std::io::Error::other(e.to_string()))
    }

    fn pydantic_gen(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pydantic-gen"));
        cmd.current_dir(&self.root);
        for key in [
            "PYDANTIC_GEN_CONFIG",
            "PYDANTIC_GEN_RUNTIME_IMPORT",
            "PYDANTIC_GEN_WITH_DEFAULTS",
            "PYDANTIC_GEN_OUTPUT_DIR",
            "RUST_LOG",
        ] {
            cmd.env_remove(key);
        }
        cmd
    }
}

#[test]
fn test_generate_module_to_stdout() -> Result<()> {
    let env = GenTestEnv::new()?;

    let output = env
        .pydantic_gen()
        .args(["generate", "yaml_connection.yaml", "--stdout"])
        .output()?;
    assert!(output.status.success());

    let module = String::from_utf8(output.stdout)?;
    insta::assert_snapshot!("yaml_connection_module", module);
    Ok(())
}

#[test]
fn test_generate_single_file_default_output() -> Result<()> {
    let env = GenTestEnv::new()?;

    env.pydantic_gen()
        .args(["generate", "json_connection.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("json_connection.py generated"));

    let module = fs::read_to_string(env.root.join("json_connection.py"))?;
    assert!(module.contains("class JsonConnection(BaseModel):"));
    assert!(module.contains("class Database(BaseModel):"));
    assert!(module.contains("class Replica(BaseModel):"));
    assert!(module.contains("alias='maxConnections'"));
    assert!(module.contains("def load_json_connection_from_file("));
    Ok(())
}

#[test]
fn test_generate_ini_with_defaults() -> Result<()> {
    let env = GenTestEnv::new()?;

    env.pydantic_gen()
        .args(["generate", "ini_connection.ini", "-o", "models/ini.py", "--with-defaults"])
        .assert()
        .success();

    let module = fs::read_to_string(env.root.join("models/ini.py"))?;
    assert!(module.contains("    port: int = Field(5432)\n"));
    assert!(module.contains("    ratio: float = Field(0.75)\n"));
    assert!(module.contains("    enabled: bool = Field(True)\n"));
    assert!(module.contains("    timeout: int = Field(30)"));
    assert_eq!(fs::read_to_string(env.root.join("models/__init__.py"))?, "\n");
    Ok(())
}

#[test]
fn test_generate_directory() -> Result<()> {
    let env = GenTestEnv::new()?;

    env.pydantic_gen()
        .args(["generate", ".", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 module(s) generated"));

    for name in ["__init__.py", "ini_connection.py", "json_connection.py", "yaml_connection.py"] {
        assert!(env.root.join("out").join(name).exists(), "{name} missing");
    }
    Ok(())
}

#[test]
fn test_generate_directory_uses_config_file() -> Result<()> {
    let env = GenTestEnv::new()?;
    let project = env.root.parent().context("no parent")?;
    fs::write(
        project.join("pydantic-gen.yaml"),
        "runtime_import: shared.config\ninit_files: false\noutput_dir: python_models\n",
    )?;

    let mut cmd = env.pydantic_gen();
    cmd.current_dir(project)
        .args(["generate", "config_files"])
        .assert()
        .success();

    let module = fs::read_to_string(project.join("python_models/yaml_connection.py"))?;
    assert!(module.contains("from shared.config import configuration_file_to_dict\n"));
    assert!(!module.contains("def configuration_file_to_dict("));
    assert!(!project.join("python_models/__init__.py").exists());
    Ok(())
}

#[test]
fn test_generate_with_template_dir_from_config() -> Result<()> {
    let env = GenTestEnv::new()?;
    fs::create_dir_all(env.root.join("templates"))?;
    fs::write(
        env.root.join("templates/module.py.j2"),
        "# custom module for {{ root_class }}\n",
    )?;
    fs::write(env.root.join("pydantic-gen.yaml"), "template_dir: templates\n")?;

    env.pydantic_gen()
        .args(["generate", "ini_connection.ini", "--stdout"])
        .assert()
        .success()
        .stdout("# custom module for IniConnection\n");
    Ok(())
}

#[test]
fn test_runtime_import_flag_wins_over_config() -> Result<()> {
    let env = GenTestEnv::new()?;
    fs::write(env.root.join("pydantic-gen.yaml"), "runtime_import: from_file\n")?;

    env.pydantic_gen()
        .args(["generate", "yaml_connection.yaml", "--stdout", "--runtime-import", "from_flag"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from from_flag import configuration_file_to_dict"));
    Ok(())
}

#[test]
fn test_convert_ini_to_yaml() -> Result<()> {
    let env = GenTestEnv::new()?;

    env.pydantic_gen()
        .args(["convert", "ini_connection.ini", "converted/connection.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted ini -> yaml"));

    let yaml = fs::read_to_string(env.root.join("converted/connection.yaml"))?;
    assert!(yaml.starts_with("Database:\n  host: localhost\n"));
    assert!(yaml.contains("Cache:\n"));
    assert!(!yaml.contains("DEFAULT"));
    Ok(())
}

#[test]
fn test_inspect_table_and_json() -> Result<()> {
    let env = GenTestEnv::new()?;

    env.pydantic_gen()
        .args(["inspect", "yaml_connection.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DatabaseConnection"))
        .stdout(predicate::str::contains("ServersListItem (x2)"));

    let output = env
        .pydantic_gen()
        .args(["inspect", "yaml_connection.yaml", "--format", "json"])
        .output()?;
    assert!(output.status.success());

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(tree["class_type"], "YamlConnection");
    assert_eq!(tree["children"][0]["original_name"], "Database Connection");
    Ok(())
}

#[test]
fn test_missing_input_fails() -> Result<()> {
    let env = GenTestEnv::new()?;

    env.pydantic_gen()
        .args(["generate", "missing.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
    Ok(())
}

#[test]
fn test_broken_input_reports_file() -> Result<()> {
    let env = GenTestEnv::new()?;
    fs::write(env.root.join("broken.yaml"), "key: [unclosed\n")?;

    env.pydantic_gen()
        .args(["generate", "broken.yaml", "--stdout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error while parsing"));
    Ok(())
}

#[test]
fn test_unsupported_input_fails() -> Result<()> {
    let env = GenTestEnv::new()?;
    fs::write(env.root.join("notes.txt"), "hello")?;

    env.pydantic_gen()
        .args(["generate", "notes.txt"])
        .assert()
        .failure();
    assert!(!env.root.join("notes.py").exists());
    Ok(())
}
