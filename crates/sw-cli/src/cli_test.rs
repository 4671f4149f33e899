use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_run_group() {
    let cli = Cli::try_parse_from(["sw", "run", "baseline-data", "-d", "dev.duckdb"]).unwrap();
    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.group, ScriptGroupKind::BaselineData);
            assert_eq!(args.database.as_deref(), Some("dev.duckdb"));
            assert!(!args.continue_on_error);
            assert_eq!(ScriptEncoding::from(args.encoding), ScriptEncoding::Utf8);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_parse_rejects_unknown_group() {
    assert!(Cli::try_parse_from(["sw", "run", "patches"]).is_err());
}

#[test]
fn test_global_args_after_subcommand() {
    let cli = Cli::try_parse_from(["sw", "plan", "-o", "json", "-p", "proj", "--verbose"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, "proj");
    assert!(matches!(
        cli.command,
        Commands::Plan(PlanArgs {
            output: PlanOutput::Json
        })
    ));
}
