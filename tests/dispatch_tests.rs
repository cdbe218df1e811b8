use pagecmd::command::{CommandError, MAX_ARGS, ParseError};
use pagecmd::inputs::{InputEvent, InputKind, Modifiers};
use pagecmd::test_utils::test_helpers::create_test_app;
use pagecmd::viewer::command_table;

fn args_for(arity: usize) -> String {
    if arity == 0 {
        return String::new();
    }
    let args = match arity {
        // setSelection(page, x0, y0, x1, y1)
        5 => "1,0,0,100,100".to_string(),
        n => vec!["1"; n].join(","),
    };
    format!("({args})")
}

fn click() -> InputEvent {
    InputEvent::new(InputKind::MousePress(1), 20, 20, Modifiers::NONE)
}

#[test]
fn every_builtin_command_resolves() {
    let table = command_table().unwrap();
    let names: Vec<&str> = table.names().collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);

    for name in names {
        let entry = table.resolve(name).unwrap();
        assert_eq!(entry.name(), name);
        assert!(entry.arity() <= MAX_ARGS);
    }
    assert!(table.resolve("gotopage").is_none());
    assert!(table.resolve("").is_none());
}

#[test]
fn every_builtin_command_runs_with_valid_arguments() {
    let table = command_table().unwrap();
    for entry in table.iter() {
        let mut app = create_test_app(5);
        let cmd = format!("{}{}", entry.name(), args_for(entry.arity()));
        let event = click();
        let result = app.dispatch(&cmd, Some(&event));
        assert_eq!(result, Ok(entry.name()), "{cmd}");
    }
}

#[test]
fn wrong_argument_count_is_a_syntax_error() {
    let table = command_table().unwrap();
    for entry in table.iter() {
        let mut app = create_test_app(5);
        let cmd = format!("{}{}", entry.name(), args_for(entry.arity() + 1));
        let event = click();
        let result = app.dispatch(&cmd, Some(&event));
        assert!(
            matches!(result, Err(CommandError::InvalidSyntax { .. })),
            "{cmd}: {result:?}"
        );
    }
}

#[test]
fn event_commands_need_an_event() {
    let table = command_table().unwrap();
    for entry in table.iter().filter(|e| e.needs_event()) {
        let mut app = create_test_app(5);
        let result = app.execute(entry.name());
        assert!(
            matches!(result, Err(CommandError::InvalidSyntax { .. })),
            "{}: {result:?}",
            entry.name()
        );
    }
}

#[test]
fn document_commands_are_skipped_silently_without_a_document() {
    let table = command_table().unwrap();
    for entry in table.iter().filter(|e| e.needs_document()) {
        let mut app = create_test_app(0);
        let before = serde_json::to_value(app.viewer.snapshot()).unwrap();

        let cmd = format!("{}{}", entry.name(), args_for(entry.arity()));
        let event = click();
        let errors = app.execute_all([cmd.as_str()], Some(&event));
        assert!(errors.is_empty(), "{cmd}: {errors:?}");

        let result = app.dispatch(&cmd, Some(&event));
        assert_eq!(
            result,
            Err(CommandError::DocumentNotReady(entry.name().to_string()))
        );
        assert_eq!(serde_json::to_value(app.viewer.snapshot()).unwrap(), before);
    }
}

#[test]
fn goto_page_round_trip() {
    let mut app = create_test_app(10);
    assert_eq!(app.execute("gotoPage(5)"), Ok(()));
    assert_eq!(app.viewer.tab().page, 5);

    assert_eq!(app.execute("gotoLastPage"), Ok(()));
    assert_eq!(app.viewer.tab().page, 10);

    assert_eq!(app.execute("goBackward"), Ok(()));
    assert_eq!(app.viewer.tab().page, 5);
    assert_eq!(app.execute("goForward"), Ok(()));
    assert_eq!(app.viewer.tab().page, 10);

    // out of range and non-numeric pages leave the view alone
    assert_eq!(app.execute("gotoPage(11)"), Ok(()));
    assert_eq!(app.execute("gotoPage(abc)"), Ok(()));
    assert_eq!(app.viewer.tab().page, 10);
}

#[test]
fn malformed_commands_are_reported() {
    let mut app = create_test_app(3);

    assert_eq!(
        app.execute("gotoPage(2"),
        Err(CommandError::Parse {
            command: "gotoPage(2".into(),
            source: ParseError::MissingCloseParen,
        })
    );
    assert!(matches!(
        app.execute("zoomPercent(1,2,3,4,5,6,7,8,9)"),
        Err(CommandError::Parse {
            source: ParseError::TooManyArguments { .. },
            ..
        })
    ));
    assert_eq!(
        app.execute("noSuchCommand"),
        Err(CommandError::UnknownCommand("noSuchCommand".into()))
    );
    assert_eq!(app.viewer.tab().page, 1);
}

#[test]
fn binding_list_runs_in_order_despite_failures() {
    let mut app = create_test_app(10);
    let errors = app.execute_all(
        ["gotoPage(3)", "unknownCmd", "nextPage(", "nextPage", "quit"],
        None,
    );

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], CommandError::UnknownCommand("unknownCmd".into()));
    assert!(matches!(errors[1], CommandError::Parse { .. }));
    assert_eq!(app.viewer.tab().page, 4);
    assert!(app.should_quit());
}

#[test]
fn zoom_commands_without_document_still_apply() {
    let mut app = create_test_app(0);
    assert_eq!(app.execute("zoomPercent(200)"), Ok(()));
    assert_eq!(app.execute("singlePageMode"), Ok(()));
    let json = serde_json::to_value(app.viewer.snapshot()).unwrap();
    assert_eq!(json["display_mode"], "single");
    assert_eq!(json["context"], "window,singlePage,offLink,scrLockOff");
}
