//! Library integration tests.

use toolgate::ToolgateError;

#[test]
fn error_types_are_public() {
    let err = ToolgateError::UnknownTool {
        name: "test".into(),
        known: "maid".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> toolgate::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use toolgate::cli::{Cli, Commands};

    let cli = Cli::parse_from(["toolgate", "check", "--json"]);

    if let Some(Commands::Check(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Check command");
    }
}

#[test]
fn registry_knows_maid() {
    use toolgate::requirements::ToolRegistry;

    let registry = ToolRegistry::new();
    let maid = registry.get("maid").unwrap();
    assert_eq!(maid.package, "maid-lang");
    assert_eq!(maid.manager, "cargo");
    assert_eq!(maid.install_args, vec!["install", "maid-lang", "--force"]);
}
