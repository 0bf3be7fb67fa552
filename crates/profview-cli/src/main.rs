// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, bail};
use config::Config;
use profview_app::BrowserState;
use profview_tui::UiOptions;
use runtime::DataSource;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `profview --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    let schema = Arc::new(config.schema().with_context(|| {
        format!(
            "invalid [[sections]]/[[fields]] in {}",
            options.config_path.display()
        )
    })?);

    let source = if options.demo {
        DataSource::Demo
    } else {
        match &options.data_path {
            Some(path) => {
                profview_data::validate_data_path(&path.to_string_lossy())?;
                DataSource::File(path.clone())
            }
            None => DataSource::File(config.data_path()),
        }
    };

    let log_path = config.log_path()?;
    let _log_guard = logging::init(config.log_level(), &log_path)
        .with_context(|| format!("start logging to {}", log_path.display()))?;
    tracing::info!(
        config = %options.config_path.display(),
        source = %source.describe(),
        "starting"
    );

    let resolver = runtime::resolver_for(&config, &source);
    let mut browser = runtime::open_browser(&source, schema, resolver);

    if options.check_only {
        return match &browser {
            BrowserState::Ready(session) => {
                println!(
                    "ok: {} profiles from {}",
                    session.record_count(),
                    source.describe()
                );
                Ok(())
            }
            BrowserState::Unavailable { reason } => bail!("profile data unavailable: {reason}"),
        };
    }

    if let Some(target) = &options.dump_target {
        let Some(session) = browser.session_mut() else {
            bail!(
                "cannot dump {target:?}: no profiles loaded from {}",
                source.describe()
            );
        };
        println!("{}", runtime::dump_profile(session, target)?);
        return Ok(());
    }

    profview_tui::run_app(
        &mut browser,
        UiOptions {
            show_roster: config.show_roster(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    data_path: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    demo: bool,
    check_only: bool,
    dump_target: Option<String>,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        data_path: None,
        print_config_path: false,
        print_example: false,
        demo: false,
        check_only: false,
        dump_target: None,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--data" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--data requires a CSV file path"))?;
                options.data_path = Some(PathBuf::from(value.as_ref()));
            }
            "--dump" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--dump requires a profile index or name"))?;
                options.dump_target = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if options.demo && options.data_path.is_some() {
        bail!("--demo and --data are mutually exclusive");
    }

    Ok(options)
}

fn print_help() {
    println!("profview: browse faculty profiles one at a time");
    println!("  --config <path>          Use a specific config path");
    println!("  --data <path>            Read profiles from this CSV file");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Browse a built-in demo roster");
    println!("  --check                  Validate config + data and exit");
    println!("  --dump <index|name>      Print one profile as JSON (index is zero-based)");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/profview-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                data_path: None,
                print_config_path: false,
                print_example: false,
                demo: false,
                check_only: false,
                dump_target: None,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_and_data_overrides() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml", "--data", "faculty.csv"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        assert_eq!(options.data_path, Some(PathBuf::from("faculty.csv")));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));

        let error = parse_cli_args(vec!["--data"], default_options_path())
            .expect_err("missing data value should fail");
        assert!(error.to_string().contains("--data requires"));

        let error = parse_cli_args(vec!["--dump"], default_options_path())
            .expect_err("missing dump value should fail");
        assert!(error.to_string().contains("index or name"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.demo);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_keeps_dump_target_verbatim() -> Result<()> {
        let options = parse_cli_args(
            vec!["--demo", "--dump", "Dr. Jordan Hill"],
            default_options_path(),
        )?;
        assert!(options.demo);
        assert_eq!(options.dump_target.as_deref(), Some("Dr. Jordan Hill"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_rejects_demo_with_data() {
        let error = parse_cli_args(vec!["--demo", "--data", "x.csv"], default_options_path())
            .expect_err("demo with data should fail");
        assert!(error.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }
}
