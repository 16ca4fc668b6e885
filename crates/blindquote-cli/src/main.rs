// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod report;
mod runtime;

use anyhow::{Context, Result};
use blindquote_app::{QuoteMeta, QuoteSession};
use config::Config;
use runtime::ScriptRuntime;
use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use time::{Date, OffsetDateTime};
use tracing_subscriber::EnvFilter;

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

    init_tracing()?;

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
            "load config {}; run `blindquote --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    let settings = config.settings()?;
    if options.check_only {
        return Ok(());
    }

    let issued_on = options
        .issued_on
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let session =
        QuoteSession::new(settings).with_meta(QuoteMeta::issued(issued_on, config.due_days()));
    let mut runtime = ScriptRuntime::new(session);

    let input: Box<dyn BufRead> = match &options.script_path {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!(
                "open script {} -- check the path passed to --script",
                path.display()
            )
        })?)),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    runtime.run(input, &mut out)?;

    let summary = if options.json {
        let mut json = report::render_json(runtime.session())?;
        json.push('\n');
        json
    } else {
        report::render_table(runtime.session())?
    };
    out.write_all(summary.as_bytes())
        .context("write quote summary")?;
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_env("BLINDQUOTE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("initialize logging: {error}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    script_path: Option<PathBuf>,
    issued_on: Option<Date>,
    json: bool,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        script_path: None,
        issued_on: None,
        json: false,
        print_config_path: false,
        print_example: false,
        check_only: false,
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
            "--script" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--script requires a file path"))?;
                options.script_path = Some(PathBuf::from(value.as_ref()));
            }
            "--date" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--date requires a YYYY-MM-DD value"))?;
                options.issued_on = Some(report::parse_date(value.as_ref())?);
            }
            "--json" => {
                options.json = true;
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
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

    Ok(options)
}

fn print_help() {
    println!("blindquote: price a blinds quote from line commands on stdin");
    println!("  --config <path>          Use a specific config path");
    println!("  --script <path>          Read commands from a file instead of stdin");
    println!("  --date <YYYY-MM-DD>      Issue date for the quote (default today)");
    println!("  --json                   Print the final summary as JSON");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config and exit");
    println!("  --help                   Show this help");
    println!();
    println!("Script commands (rows are numbered from 1):");
    println!("  add | insert N | remove N | clear-row N");
    println!("  set N width|height VALUE");
    println!("  type N B1|B2|B3|B4|B5|SN|next|none");
    println!("  drive N winder|motor|none");
    println!("  dual on|off | toggle N");
    println!("  counter winder|motor|remote|charger|cord on|off | + | -");
    println!("  count KIND QTY | sync-drives");
    println!("  distribute 1ch=QTY 16ch=QTY | prompt");
    println!("  clear | show");
}
