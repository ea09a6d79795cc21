use std::process;

use quizmark::{
    application::{
        error::AppError,
        quiz::QuizSheetService,
        render::{
            RenderMode, RenderPipelineConfig, RenderRequest, RenderService,
            configure_render_service, render_service,
        },
    },
    config::{self, Command, QuizArgs, RenderArgs},
    domain::quiz::QuizDocument,
    infra::{input::read_source, telemetry},
};
use tracing::{Dispatch, Level, debug, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let chain = error.chain().join(": ");
    if dispatcher::has_been_set() {
        error!(error = %chain, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %chain, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;
    configure_render_service(RenderPipelineConfig::from(&settings.render))?;
    debug!(
        escape = %settings.render.escape,
        table_class = %settings.render.table_class,
        "configured render service"
    );

    match cli_args.command {
        Command::Render(args) => run_render(args),
        Command::Quiz(args) => run_quiz(args),
    }
}

fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let text = read_source(args.file.as_deref())?;
    let mode = RenderMode::from(args.mode);

    let output = render_service().render(&RenderRequest::new(mode, text));
    info!(
        mode = %mode,
        tables = output.tables.len(),
        contains_code = output.contains_code,
        "rendered input"
    );

    println!("{}", output.html);
    Ok(())
}

fn run_quiz(args: QuizArgs) -> Result<(), AppError> {
    let json = read_source(Some(args.file.as_path()))?;
    let document = QuizDocument::from_json(&json)?;
    info!(
        file = %args.file.display(),
        questions = document.questions().len(),
        "loaded quiz document"
    );

    let service = QuizSheetService::new(render_service());
    let html = if args.results {
        service.render_results(&document)?
    } else {
        service.render_sheet(&document)?
    };

    println!("{html}");
    Ok(())
}
