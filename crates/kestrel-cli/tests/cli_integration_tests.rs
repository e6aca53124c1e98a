//! CLI integration tests
//!
//! Tests the CLI surface itself:
//! - Command aliases
//! - Help messages and examples
//! - Shell completions
//! - Argument errors
//! - Version metadata
//!
//! End-to-end pipeline behavior lives in cli_e2e_tests.rs.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn kestrel_cmd() -> Command {
    Command::cargo_bin("kestrel").unwrap()
}

// ══════════════════════════════════════════════════════════════════════════════
// HELP MESSAGE TESTS
// ══════════════════════════════════════════════════════════════════════════════

mod help_messages {
    use super::*;

    #[test]
    fn test_main_help_shows_all_commands() {
        let mut cmd = kestrel_cmd();
        cmd.arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("run"))
            .stdout(predicate::str::contains("parse"))
            .stdout(predicate::str::contains("ast"))
            .stdout(predicate::str::contains("repl"))
            .stdout(predicate::str::contains("completions"));
    }

    #[test]
    fn test_main_help_shows_examples() {
        let mut cmd = kestrel_cmd();
        cmd.arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("EXAMPLES"))
            .stdout(predicate::str::contains("kestrel run main.kes"));
    }

    #[test]
    fn test_main_help_shows_environment_variables() {
        let mut cmd = kestrel_cmd();
        cmd.arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("ENVIRONMENT VARIABLES"))
            .stdout(predicate::str::contains("KESTREL_NO_HISTORY"))
            .stdout(predicate::str::contains("NO_COLOR"));
    }

    #[test]
    fn test_run_help_shows_exit_codes() {
        let mut cmd = kestrel_cmd();
        cmd.args(["run", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("EXAMPLES"))
            .stdout(predicate::str::contains("65"))
            .stdout(predicate::str::contains("70"));
    }

    #[test]
    fn test_parse_help_shows_format_flag() {
        let mut cmd = kestrel_cmd();
        cmd.args(["parse", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--format"))
            .stdout(predicate::str::contains("json"));
    }

    #[test]
    fn test_ast_help_shows_format_flag() {
        let mut cmd = kestrel_cmd();
        cmd.args(["ast", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("AST"))
            .stdout(predicate::str::contains("--format"));
    }

    #[test]
    fn test_repl_help_comprehensive() {
        let mut cmd = kestrel_cmd();
        cmd.args(["repl", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("REPL COMMANDS"))
            .stdout(predicate::str::contains(":quit"))
            .stdout(predicate::str::contains("--no-history"));
    }

    #[test]
    fn test_completions_help_comprehensive() {
        let mut cmd = kestrel_cmd();
        cmd.args(["completions", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("bash"))
            .stdout(predicate::str::contains("zsh"))
            .stdout(predicate::str::contains("fish"));
    }

    #[test]
    fn test_all_commands_have_help() {
        let commands = ["run", "parse", "ast", "repl", "completions"];

        for cmd_name in commands {
            let mut cmd = kestrel_cmd();
            cmd.args([cmd_name, "--help"]).assert().success();
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// COMMAND ALIAS TESTS
// ══════════════════════════════════════════════════════════════════════════════

mod command_aliases {
    use super::*;

    #[test]
    fn test_alias_r_equivalent_to_run() {
        // Both should show same help content
        let run_help = kestrel_cmd().args(["run", "--help"]).output().unwrap();
        let r_help = kestrel_cmd().args(["r", "--help"]).output().unwrap();

        assert_eq!(
            String::from_utf8_lossy(&run_help.stdout),
            String::from_utf8_lossy(&r_help.stdout)
        );
    }

    #[test]
    fn test_alias_shown_in_main_help() {
        let mut cmd = kestrel_cmd();
        cmd.arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("[aliases: r]"));
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// SHELL COMPLETION TESTS
// ══════════════════════════════════════════════════════════════════════════════

mod shell_completions {
    use super::*;

    #[test]
    fn test_bash_completion_generated() {
        let mut cmd = kestrel_cmd();
        cmd.args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("_kestrel"))
            .stdout(predicate::str::contains("COMPREPLY"));
    }

    #[test]
    fn test_zsh_completion_generated() {
        let mut cmd = kestrel_cmd();
        cmd.args(["completions", "zsh"])
            .assert()
            .success()
            .stdout(predicate::str::contains("#compdef kestrel"))
            .stdout(predicate::str::contains("_kestrel"));
    }

    #[test]
    fn test_fish_completion_generated() {
        let mut cmd = kestrel_cmd();
        cmd.args(["completions", "fish"])
            .assert()
            .success()
            .stdout(predicate::str::contains("complete -c kestrel"));
    }

    #[test]
    fn test_bash_completion_includes_commands() {
        let mut cmd = kestrel_cmd();
        cmd.args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("run"))
            .stdout(predicate::str::contains("parse"))
            .stdout(predicate::str::contains("repl"));
    }

    #[test]
    fn test_completion_invalid_shell() {
        let mut cmd = kestrel_cmd();
        cmd.args(["completions", "invalid-shell"]).assert().failure();
    }

    #[test]
    fn test_completion_no_shell_arg() {
        let mut cmd = kestrel_cmd();
        cmd.args(["completions"]).assert().failure();
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// VERSION AND METADATA TESTS
// ══════════════════════════════════════════════════════════════════════════════

mod version_metadata {
    use super::*;

    #[test]
    fn test_version_flag() {
        let mut cmd = kestrel_cmd();
        cmd.arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("kestrel"));
    }

    #[test]
    fn test_version_short_flag() {
        let mut cmd = kestrel_cmd();
        cmd.arg("-V")
            .assert()
            .success()
            .stdout(predicate::str::contains("kestrel"));
    }

    #[test]
    fn test_subcommand_version_propagated() {
        let mut cmd = kestrel_cmd();
        cmd.args(["run", "--version"])
            .assert()
            .success()
            .stdout(predicate::str::contains("kestrel"));
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// ERROR HANDLING TESTS
// ══════════════════════════════════════════════════════════════════════════════

mod error_handling {
    use super::*;

    #[test]
    fn test_unknown_command_error() {
        let mut cmd = kestrel_cmd();
        cmd.arg("unknown-command")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn test_missing_required_arg_run() {
        let mut cmd = kestrel_cmd();
        cmd.arg("run")
            .assert()
            .failure()
            .stderr(predicate::str::contains("required"));
    }

    #[test]
    fn test_missing_required_arg_parse() {
        let mut cmd = kestrel_cmd();
        cmd.arg("parse")
            .assert()
            .failure()
            .stderr(predicate::str::contains("required"));
    }

    #[test]
    fn test_missing_required_arg_ast() {
        let mut cmd = kestrel_cmd();
        cmd.arg("ast")
            .assert()
            .failure()
            .stderr(predicate::str::contains("required"));
    }

    #[test]
    fn test_invalid_format_value() {
        let mut cmd = kestrel_cmd();
        cmd.args(["ast", "main.kes", "--format", "yaml"])
            .assert()
            .failure();
    }

    #[test]
    fn test_no_command_shows_usage() {
        let mut cmd = kestrel_cmd();
        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Usage"));
    }
}
