use clap::Parser;
use colored::*;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use mdconform_lib::Scanner;
use mdconform_lib::cli_types::{Cli, Commands, CommonArgs};
use mdconform_lib::config::{CONFIG_FILE_NAME, Config};
use mdconform_lib::exit_codes::{self, exit};
use mdconform_lib::file_processor::{self, DiscoveryOptions, ProcessError};
use mdconform_lib::output::{FileReport, FixReport};
use mdconform_lib::parallel::{FileParallelProcessor, ParallelConfig};
use mdconform_lib::repair::FenceRewriter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn report_error(message: impl std::fmt::Display) {
    eprintln!("{}: {}", "Error".red().bold(), message);
}

/// Resolve config and discover files; any failure here ends the run with exit 2
fn prepare(common: &CommonArgs) -> (Config, Vec<PathBuf>, PathBuf) {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = match Config::load_with_discovery(common.config.as_deref().map(Path::new), &cwd) {
        Ok(config) => config,
        Err(e) => {
            report_error(e);
            exit::tool_error();
        }
    };

    if common.paths.is_empty() {
        report_error("No paths given. Usage: mdconform <check|fix> [PATHS]...");
        exit::tool_error();
    }

    let options = DiscoveryOptions {
        exclude: config.global.exclude.clone(),
        respect_gitignore: config.global.respect_gitignore,
        base: cwd.clone(),
    };
    let discovered = match file_processor::find_markdown_files(&common.paths, &options) {
        Ok(discovered) => discovered,
        Err(e) => {
            report_error(e);
            exit::tool_error();
        }
    };

    for path in &discovered.missing {
        eprintln!("{} Path not found: {}", "Warning:".yellow().bold(), path);
    }

    (config, discovered.files, cwd)
}

fn processor(common: &CommonArgs) -> FileParallelProcessor {
    FileParallelProcessor::new(ParallelConfig {
        thread_count: common.jobs,
        ..Default::default()
    })
}

fn emit(common: &CommonArgs, text: String) {
    if !common.quiet && !text.is_empty() {
        println!("{text}");
    }
}

fn run_check(common: &CommonArgs) -> i32 {
    let (config, files, cwd) = prepare(common);

    let disabled = match config.disabled_kinds(common.config.as_deref().unwrap_or(CONFIG_FILE_NAME)) {
        Ok(kinds) => kinds,
        Err(e) => {
            report_error(e);
            return exit_codes::TOOL_ERROR;
        }
    };
    let scanner = Scanner::default().with_disabled(disabled);

    let results = processor(common)
        .process_files(&files, |path| file_processor::check_file(path, &scanner));

    let (reports, had_errors) = collect(results, &cwd, |path, violations| {
        (!violations.is_empty()).then_some(FileReport { path, violations })
    });

    let use_colors = std::io::stdout().is_terminal();
    let formatter = common.output_format.create_formatter(use_colors);
    emit(common, formatter.format_check(&reports));

    exit_codes::for_run(had_errors, !reports.is_empty())
}

fn run_fix(common: &CommonArgs, dry_run: bool) -> i32 {
    let (_config, files, cwd) = prepare(common);
    let rewriter = FenceRewriter::default();

    let results = processor(common)
        .process_files(&files, |path| file_processor::fix_file(path, &rewriter, dry_run));

    let (reports, had_errors) = collect(results, &cwd, |path, fixes| {
        (!fixes.is_empty()).then_some(FixReport { path, fixes })
    });

    let use_colors = std::io::stdout().is_terminal();
    let formatter = common.output_format.create_formatter(use_colors);
    emit(common, formatter.format_fixes(&reports, dry_run));

    exit_codes::for_run(had_errors, dry_run && !reports.is_empty())
}

/// Turn per-file results into reports; read/write failures go to stderr
fn collect<T, R>(
    results: Vec<(PathBuf, Result<T, ProcessError>)>,
    cwd: &Path,
    to_report: impl Fn(String, T) -> Option<R>,
) -> (Vec<R>, bool) {
    let mut reports = Vec::new();
    let mut had_errors = false;

    for (path, result) in results {
        match result {
            Ok(found) => {
                let display = file_processor::to_display_path(&path, cwd);
                reports.extend(to_report(display, found));
            }
            Err(e) => {
                report_error(e);
                had_errors = true;
            }
        }
    }

    (reports, had_errors)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.command.common().verbose);

    let code = match &cli.command {
        Commands::Check(args) => run_check(&args.common),
        Commands::Fix(args) => run_fix(&args.common, args.dry_run),
    };

    match code {
        exit_codes::SUCCESS => exit::success(),
        exit_codes::VIOLATIONS_FOUND => exit::violations_found(),
        _ => exit::tool_error(),
    }
}
