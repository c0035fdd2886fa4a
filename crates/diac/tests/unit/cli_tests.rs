//! Tests for the `diac` command

use clap::Parser;
use diac::cli::{Cli, Command, run};
use diac::domain::error::Result;
use diac::infrastructure::config::ConfigBuilder;
use diac::{Binder, ClassDefinition, ClassRegistry, DependencyKey, Module, Param, init_app};
use std::path::Path;
use std::process::Command as Process;
use std::sync::Arc;
use tempfile::TempDir;

const GREETER: &str = "demo::Greeter";
const GREETING: &str = "demo::Greeting";

struct Greeter;

fn registry() -> ClassRegistry {
    let mut classes = ClassRegistry::new();
    classes.register(
        ClassDefinition::new(GREETER, |args| {
            args.str(0)?;
            Ok(Greeter)
        })
        .constructor_param(Param::new("greeting", GREETING)),
    );
    classes
}

struct GreeterModule;

impl Module for GreeterModule {
    fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
        binder.bind(GREETER).to_self()?;
        binder.bind(GREETING).named("en").to_instance("hello");
        binder.bind(GREETING).to_instance("hi");
        Ok(())
    }
}

/// Compile the demo module into `cache`
fn populate(cache: &Path) {
    let config = ConfigBuilder::new().with_cache_dir(cache).build().unwrap();
    init_app(config)
        .unwrap()
        .compiler(&GreeterModule, Arc::new(registry()))
        .unwrap()
        .get_instance(&DependencyKey::new(GREETER))
        .unwrap();
}

fn execute(cache: &Path, args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["diac", "--cache-dir", cache.to_str().unwrap()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;
    let config = ConfigBuilder::new().with_cache_dir(cache).build()?;

    let mut out = Vec::new();
    run(&cli, config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_parse_show_with_name() {
    let cli = Cli::try_parse_from(["diac", "show", GREETING, "--name", "en"]).unwrap();
    assert_eq!(
        cli.command,
        Command::Show {
            interface: GREETING.to_string(),
            name: Some("en".to_string()),
        }
    );
    assert!(cli.config.is_none());
}

#[test]
fn test_cache_dir_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("diac.toml");
    std::fs::write(&config_path, "[compiler]\ncache_dir = \"elsewhere\"\n").unwrap();
    let cli = Cli::try_parse_from([
        "diac",
        "list",
        "--config",
        config_path.to_str().unwrap(),
        "--cache-dir",
        "here",
    ])
    .unwrap();

    let config = cli.load_config().unwrap();

    assert_eq!(config.compiler.cache_dir, Path::new("here"));
}

#[test]
fn test_list_prints_tokens() {
    let dir = TempDir::new().unwrap();
    populate(dir.path());

    let listed = execute(dir.path(), &["list"]).unwrap();

    assert_eq!(listed, "demo.Greeter-\ndemo.Greeting-\ndemo.Greeting-en\n");
}

#[test]
fn test_show_prints_unit_code() {
    let dir = TempDir::new().unwrap();
    populate(dir.path());

    let greeter = execute(dir.path(), &["show", GREETER]).unwrap();
    assert!(greeter.starts_with("// demo::Greeter (prototype)\n"));
    assert!(greeter.contains("new demo::Greeter("));
    assert!(greeter.ends_with("return instance;\n"));

    let greeting = execute(dir.path(), &["show", GREETING, "--name", "en"]).unwrap();
    assert!(greeting.contains("return \"hello\";"));
}

#[test]
fn test_show_missing_unit_fails() {
    let dir = TempDir::new().unwrap();

    let error = execute(dir.path(), &["show", "demo::Missing"]).unwrap_err();

    assert!(error.to_string().contains("no unit for demo::Missing"));
}

#[test]
fn test_compile_restores_deleted_units() {
    let dir = TempDir::new().unwrap();
    populate(dir.path());
    std::fs::remove_file(dir.path().join("demo.Greeter-.json")).unwrap();

    let output = execute(dir.path(), &["compile"]).unwrap();

    assert!(output.contains("compiled demo::Greeter\n"));
    assert!(output.ends_with("1 compiled, 2 already present\n"));
    assert!(dir.path().join("demo.Greeter-.json").is_file());
}

#[test]
fn test_compile_without_snapshot_fails() {
    let dir = TempDir::new().unwrap();

    assert!(execute(dir.path(), &["compile"]).is_err());
}

#[test]
fn test_snapshot_lists_bindings() {
    let dir = TempDir::new().unwrap();
    populate(dir.path());

    let summary = execute(dir.path(), &["snapshot"]).unwrap();

    assert!(summary.starts_with("format 1 generated "));
    assert!(summary.contains("(3 bindings)"));
    assert!(summary.contains("demo::Greeter -> class demo::Greeter\n"));
    assert!(summary.contains("demo::Greeting#en -> instance \"hello\"\n"));
}

#[test]
fn test_compile_processes_share_one_cache() {
    let dir = TempDir::new().unwrap();
    let cache = dir.path().join("cache");
    populate(&cache);
    for token in ["demo.Greeter-", "demo.Greeting-", "demo.Greeting-en"] {
        std::fs::remove_file(cache.join(format!("{token}.json"))).unwrap();
    }

    let children: Vec<_> = (0..4)
        .map(|_| {
            Process::new(env!("CARGO_BIN_EXE_diac"))
                .current_dir(dir.path())
                .env("DIAC_LOG", "error")
                .args(["compile", "--cache-dir", cache.to_str().unwrap()])
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::piped())
                .spawn()
                .unwrap()
        })
        .collect();
    for child in children {
        let output = child.wait_with_output().unwrap();
        assert!(
            output.status.success(),
            "{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let listed = execute(&cache, &["list"]).unwrap();
    assert_eq!(listed, "demo.Greeter-\ndemo.Greeting-\ndemo.Greeting-en\n");
    let greeting = execute(&cache, &["show", GREETING, "--name", "en"]).unwrap();
    assert!(greeting.contains("return \"hello\";"));
    let leftovers = std::fs::read_dir(&cache)
        .unwrap()
        .filter(|entry| {
            let name = entry.as_ref().unwrap().file_name();
            name.to_string_lossy().starts_with(".tmp-")
        })
        .count();
    assert_eq!(leftovers, 0);
}
