//! Tests for upload, secrets, rls and rate-limit subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_upload() {
    match parse(&["vibesec", "upload", "avatar.png", "--mime", "image/png"]) {
        CliCommand::Upload { path, mime, json } => {
            assert_eq!(path, Path::new("avatar.png"));
            assert_eq!(mime.as_deref(), Some("image/png"));
            assert!(!json);
        }
        _ => panic!("expected Upload"),
    }
    assert!(Cli::try_parse_from(["vibesec", "upload"]).is_err());
}

#[test]
fn cli_parse_secrets() {
    match parse(&["vibesec", "secrets", ".env", "--json"]) {
        CliCommand::Secrets { path, list, json } => {
            assert_eq!(path.as_deref(), Some(".env"));
            assert!(!list);
            assert!(json);
        }
        _ => panic!("expected Secrets"),
    }
    match parse(&["vibesec", "secrets", "--list"]) {
        CliCommand::Secrets { path, list, .. } => {
            assert!(path.is_none());
            assert!(list);
        }
        _ => panic!("expected Secrets --list"),
    }
    assert!(Cli::try_parse_from(["vibesec", "secrets"]).is_err());
}

#[test]
fn cli_parse_rls_defaults() {
    match parse(&["vibesec", "rls"]) {
        CliCommand::Rls {
            user,
            no_rls,
            add,
            empty,
            json,
        } => {
            assert_eq!(user, "User A");
            assert!(!no_rls);
            assert!(add.is_empty());
            assert!(!empty);
            assert!(!json);
        }
        _ => panic!("expected Rls"),
    }
}

#[test]
fn cli_parse_rls_options() {
    match parse(&[
        "vibesec",
        "rls",
        "--as",
        "User B",
        "--no-rls",
        "--add",
        "User C=draft",
        "--add",
        "User B=todo",
        "--empty",
    ]) {
        CliCommand::Rls {
            user,
            no_rls,
            add,
            empty,
            ..
        } => {
            assert_eq!(user, "User B");
            assert!(no_rls);
            assert_eq!(add, vec!["User C=draft", "User B=todo"]);
            assert!(empty);
        }
        _ => panic!("expected Rls with options"),
    }
}

#[test]
fn cli_parse_rate_limit() {
    match parse(&["vibesec", "rate-limit"]) {
        CliCommand::RateLimit {
            requests,
            interval_ms,
            limit,
            window_ms,
            json,
        } => {
            assert_eq!(requests, 10);
            assert_eq!(interval_ms, 100);
            assert!(limit.is_none());
            assert!(window_ms.is_none());
            assert!(!json);
        }
        _ => panic!("expected RateLimit"),
    }
    match parse(&[
        "vibesec",
        "rate-limit",
        "--requests",
        "3",
        "--limit",
        "1",
        "--window-ms",
        "500",
    ]) {
        CliCommand::RateLimit {
            requests,
            limit,
            window_ms,
            ..
        } => {
            assert_eq!(requests, 3);
            assert_eq!(limit, Some(1));
            assert_eq!(window_ms, Some(500));
        }
        _ => panic!("expected RateLimit with options"),
    }
}
