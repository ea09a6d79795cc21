use std::io::Write;

use tempfile::Builder as TempFileBuilder;

use super::*;

#[test]
fn defaults_escape_and_warn() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.render.escape, EscapePolicy::Escape);
    assert_eq!(settings.render.table_class, DEFAULT_TABLE_CLASS);
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("info".to_string());
    raw.render.escape = Some("raw".to_string());

    raw.apply_logging_overrides(&LoggingOverrides {
        log_level: Some("debug".to_string()),
        ..Default::default()
    });
    raw.apply_render_overrides(&RenderOverrides {
        escape: Some("sanitize".to_string()),
        ..Default::default()
    });
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.render.escape, EscapePolicy::Sanitize);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    raw.apply_logging_overrides(&LoggingOverrides {
        log_json: Some(true),
        ..Default::default()
    });
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn unknown_escape_policy_is_rejected() {
    let mut raw = RawSettings::default();
    raw.render.escape = Some("trusted".to_string());

    let err = Settings::from_raw(raw).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "render.escape",
            ..
        }
    ));
}

#[test]
fn table_class_rejects_markup() {
    let mut raw = RawSettings::default();
    raw.render.table_class = Some("x\" onclick=\"y".to_string());

    let err = Settings::from_raw(raw).unwrap_err();
    assert!(err.to_string().contains("render.table_class"));
}

#[test]
fn table_class_accepts_several_classes() {
    let mut raw = RawSettings::default();
    raw.render.table_class = Some(" quiz-table truth_table ".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.render.table_class, "quiz-table truth_table");
}

#[test]
fn invalid_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());

    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn config_file_is_layered_under_cli() {
    let mut file = TempFileBuilder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp file");
    writeln!(
        file,
        "[render]\nescape = \"raw\"\ntable_class = \"from-file\"\n\n[logging]\nlevel = \"error\""
    )
    .expect("write config");

    let path = file.path().to_str().expect("utf-8 path");
    let args = CliArgs::parse_from([
        "quizmark",
        "--config-file",
        path,
        "render",
        "--table-class",
        "from-cli",
    ]);
    let settings = load(&args).expect("valid settings");

    assert_eq!(settings.render.escape, EscapePolicy::Raw);
    assert_eq!(settings.render.table_class, "from-cli");
    assert_eq!(settings.logging.level, LevelFilter::ERROR);
}

#[test]
fn parse_render_arguments() {
    let args = CliArgs::parse_from([
        "quizmark",
        "render",
        "--mode",
        "markdown",
        "--escape",
        "raw",
        "/tmp/explanation.md",
    ]);

    match args.command {
        Command::Render(render) => {
            assert_eq!(render.mode, ModeArg::Markdown);
            assert_eq!(render.overrides.escape.as_deref(), Some("raw"));
            assert_eq!(
                render.file.as_deref(),
                Some(std::path::Path::new("/tmp/explanation.md"))
            );
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn render_defaults_to_table_mode_on_stdin() {
    let args = CliArgs::parse_from(["quizmark", "render"]);

    match args.command {
        Command::Render(render) => {
            assert_eq!(render.mode, ModeArg::Table);
            assert!(render.file.is_none());
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_quiz_arguments_with_global_logging() {
    let args = CliArgs::parse_from([
        "quizmark",
        "quiz",
        "--results",
        "--log-level",
        "debug",
        "/tmp/quiz.json",
    ]);

    assert_eq!(args.logging.log_level.as_deref(), Some("debug"));
    match args.command {
        Command::Quiz(quiz) => {
            assert!(quiz.results);
            assert_eq!(quiz.file, std::path::Path::new("/tmp/quiz.json"));
        }
        _ => panic!("wrong command parsed"),
    }
}
