mod cli;

use anyhow::Context;
use cli::{Args, Command};
use depsight::adapters::outbound::console::StderrProgressReporter;
use depsight::adapters::outbound::filesystem::FileSystemReader;
use depsight::adapters::outbound::github::GhCliPullRequestSource;
use depsight::adapters::outbound::process::TokioCommandRunner;
use depsight::adapters::outbound::source::TreeSitterImportScanner;
use depsight::analysis::domain::DependabotError;
use depsight::application::dto::{AnalysisRequest, RiskRequest};
use depsight::application::factories::{PresenterFactory, ReportDestination};
use depsight::application::use_cases::{
    AnalyzeDependenciesUseCase, AssessQualityUseCase, AssessRiskUseCase,
    AuditDependenciesUseCase, DetectPackageManagerUseCase, ListDependabotUpdatesUseCase,
    ScanUsageUseCase,
};
use depsight::config::{discover_config, load_config_from_path, ConfigFile};
use depsight::ports::outbound::{ProgressReporter, DEFAULT_COMMAND_TIMEOUT};
use depsight::shared::error::ExitCode;
use depsight::shared::logging::{self, Logger};
use depsight::shared::security::validate_project_dir;
use depsight::shared::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version come through here too
            if !e.use_stderr() {
                let _ = e.print();
                process::exit(ExitCode::Success.as_i32());
            }
            report_error(&anyhow::anyhow!(e.to_string().trim_end().to_string()), false);
            process::exit(ExitCode::Failure.as_i32());
        }
    };

    let debug = args.debug;
    let code = match run(args) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            report_error(&e, debug);
            ExitCode::Failure
        }
    };
    process::exit(code.as_i32());
}

/// Prints the error as a single JSON document on stderr.
fn report_error(error: &anyhow::Error, debug: bool) {
    let document = match error.downcast_ref::<DependabotError>() {
        Some(dependabot) => serde_json::to_string(dependabot),
        None => serde_json::to_string(&serde_json::json!({ "error": error.to_string() })),
    };
    match document {
        Ok(json) => eprintln!("{}", json),
        Err(_) => eprintln!("{}", error),
    }

    if debug {
        for cause in error.chain().skip(1) {
            eprintln!("Caused by: {}", cause);
        }
    }
}

fn run(args: Args) -> Result<()> {
    let project_path = args.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
    validate_project_dir(&project_path)?;

    let config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(&project_path)?.unwrap_or_default(),
    };

    logging::init(&logging::resolve_filter(
        args.log_level.as_deref(),
        config.log_level.as_deref(),
    ));
    config.warn_unknown_fields();

    let timeout = args
        .timeout
        .map(Duration::from_millis)
        .or_else(|| config.timeout())
        .unwrap_or(DEFAULT_COMMAND_TIMEOUT);
    let request = AnalysisRequest::new(project_path).with_timeout(timeout);

    let progress = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let logger = Logger::root(args.command.name());
    let result = runtime.block_on(dispatch(&args.command, &request, &config, &progress, &logger));
    progress.finish();

    let presenter = PresenterFactory::create(ReportDestination::from_output_flag(args.output));
    presenter.present(&result?)
}

/// Runs one subcommand and renders its report.
async fn dispatch(
    command: &Command,
    request: &AnalysisRequest,
    config: &ConfigFile,
    progress: &StderrProgressReporter,
    logger: &Logger,
) -> Result<String> {
    let project_reader = FileSystemReader::new(logger.clone());
    let command_runner = TokioCommandRunner::new(logger.clone());

    match command {
        Command::Detect => render(
            &DetectPackageManagerUseCase::new(&project_reader, logger)
                .execute(&request.project_path),
        ),
        Command::Deps => {
            let report =
                AnalyzeDependenciesUseCase::new(&project_reader, &command_runner, progress, logger)
                    .execute(request)
                    .await?;
            render(&report)
        }
        Command::Audit => {
            let report =
                AuditDependenciesUseCase::new(&project_reader, &command_runner, progress, logger)
                    .execute(request)
                    .await?;
            render(&report)
        }
        Command::Usage { package } => {
            let scanner = import_scanner(config, logger);
            let report = ScanUsageUseCase::new(&scanner, progress, logger)
                .execute(&request.project_path, package)?;
            render(&report)
        }
        Command::Quality => {
            let weights = config.weights.unwrap_or_default();
            let report = AssessQualityUseCase::new(
                &project_reader,
                &command_runner,
                progress,
                weights,
                logger,
            )
            .execute(request)
            .await?;
            render(&report)
        }
        Command::Risk { package, from, to } => {
            let scanner = import_scanner(config, logger);
            let risk = RiskRequest::new(package.clone(), from.clone(), to.clone());
            let assessment = AssessRiskUseCase::new(
                &project_reader,
                &command_runner,
                &scanner,
                progress,
                logger,
            )
            .execute(request, &risk)
            .await?;
            render(&assessment)
        }
        Command::Dependabot => {
            let source = GhCliPullRequestSource::new(command_runner, request.timeout, logger.clone());
            let report = ListDependabotUpdatesUseCase::new(&source, progress, logger)
                .execute(&request.project_path)
                .await?;
            render(&report)
        }
    }
}

fn import_scanner(config: &ConfigFile, logger: &Logger) -> TreeSitterImportScanner {
    let scanner = TreeSitterImportScanner::new(logger.clone());
    match &config.exclude_dirs {
        Some(dirs) => scanner.with_extra_excluded_dirs(dirs),
        None => scanner,
    }
}

/// Pretty JSON with a trailing newline.
fn render<T: Serialize>(report: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    json.push('\n');
    Ok(json)
}
