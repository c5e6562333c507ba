use std::path::PathBuf;

use super::common::setup;
use crate::emulation::vi::{EX_INPUT, ExCommand, ExError, Mode};
use crate::event::{ControlEvent, Key};
use crate::text::Cursor;

#[test]
fn parse_should_accept_the_command_surface() {
	assert_eq!(ExCommand::parse("  "), Ok(ExCommand::Nothing));
	assert_eq!(ExCommand::parse("12"), Ok(ExCommand::GotoLine(12)));
	assert_eq!(ExCommand::parse(" $ "), Ok(ExCommand::GotoEnd));
	assert_eq!(ExCommand::parse("q"), Ok(ExCommand::Quit { force: false }));
	assert_eq!(ExCommand::parse("q!"), Ok(ExCommand::Quit { force: true }));
	assert_eq!(ExCommand::parse("w"), Ok(ExCommand::Write { name: None, force: false, quit: false }));
	assert_eq!(
		ExCommand::parse("w! out.txt"),
		Ok(ExCommand::Write { name: Some(PathBuf::from("out.txt")), force: true, quit: false })
	);
	assert_eq!(ExCommand::parse("wq"), Ok(ExCommand::Write { name: None, force: false, quit: true }));
	assert_eq!(ExCommand::parse("x!"), Ok(ExCommand::Write { name: None, force: true, quit: true }));
	assert_eq!(ExCommand::parse("99999999999999999999999"), Ok(ExCommand::GotoLine(usize::MAX)));
}

#[test]
fn parse_should_reject_trailing_arguments_and_unknown_commands() {
	assert_eq!(ExCommand::parse("q now"), Err(ExError::TrailingCharacters("now".to_string())));
	assert_eq!(ExCommand::parse("w a b"), Err(ExError::TrailingCharacters("b".to_string())));
	assert_eq!(ExCommand::parse("12 x"), Err(ExError::TrailingCharacters("x".to_string())));
	assert_eq!(ExCommand::parse("frob"), Err(ExError::NotAnEditorCommand("frob".to_string())));
}

#[test]
fn colon_should_ask_for_input_and_echo_typing() {
	let mut h = setup(Mode::Command, 0, 0, &["abc"]);
	h.keys(":");
	h.ex_type("wq");
	h.ex_key(Key::Left);
	assert_eq!(
		h.control_events(),
		vec![
			ControlEvent::AskInput { id: EX_INPUT, prompt: ":".to_string() },
			ControlEvent::UpdateInput { id: EX_INPUT, text: "w".to_string(), pos: 1 },
			ControlEvent::UpdateInput { id: EX_INPUT, text: "wq".to_string(), pos: 2 },
			ControlEvent::UpdateInput { id: EX_INPUT, text: "wq".to_string(), pos: 1 },
		]
	);
}

#[test]
fn enter_should_close_input_and_run_command() {
	let mut h = setup(Mode::Command, 0, 0, &["a", "b", "c"]);
	h.ex("2");
	assert_eq!(h.cursor(), Cursor::new(1, 0));
	let events = h.control_events();
	assert_eq!(events.last(), Some(&ControlEvent::CloseInput { id: EX_INPUT }));

	h.ex("40");
	assert_eq!(h.cursor(), Cursor::new(2, 0));
	h.ex("0");
	assert_eq!(h.cursor(), Cursor::new(0, 0));
	h.ex("$");
	assert_eq!(h.cursor(), Cursor::new(2, 0));
}

#[test]
fn backspace_on_empty_input_should_cancel() {
	let mut h = setup(Mode::Command, 0, 0, &["abc"]);
	h.keys(":");
	h.ex_type("q");
	h.ex_key(Key::Backspace);
	h.ex_key(Key::Backspace);
	let events = h.control_events();
	assert_eq!(events.last(), Some(&ControlEvent::CloseInput { id: EX_INPUT }));
	assert!(!events.iter().any(|e| matches!(e, ControlEvent::Quit { .. })));
}

#[test]
fn escape_should_cancel_without_running() {
	let mut h = setup(Mode::Command, 0, 0, &["abc"]);
	h.keys(":");
	h.ex_type("q!");
	h.ex_key(Key::Escape);
	let events = h.control_events();
	assert_eq!(events.last(), Some(&ControlEvent::CloseInput { id: EX_INPUT }));
	assert!(!events.iter().any(|e| matches!(e, ControlEvent::Quit { .. })));
}

#[test]
fn write_commands_should_request_save() {
	let mut h = setup(Mode::Command, 0, 0, &["abc"]);
	h.ex("wq out.txt");
	h.ex("w!");
	h.ex("q!");
	let requests: Vec<ControlEvent> = h
		.control_events()
		.into_iter()
		.filter(|e| matches!(e, ControlEvent::Save { .. } | ControlEvent::Quit { .. }))
		.collect();
	assert_eq!(
		requests,
		vec![
			ControlEvent::Save { name: Some(PathBuf::from("out.txt")), force: false, quit_after: true },
			ControlEvent::Save { name: None, force: true, quit_after: false },
			ControlEvent::Quit { force: true },
		]
	);
}

#[test]
fn bad_command_should_report_error_and_do_nothing() {
	let mut h = setup(Mode::Command, 0, 0, &["abc"]);
	h.ex("w a b");
	let events = h.control_events();
	assert!(events.contains(&ControlEvent::Error { message: "Trailing characters: b".to_string() }));
	assert!(!events.iter().any(|e| matches!(e, ControlEvent::Save { .. })));
}
