use std::ops::ControlFlow;

use super::common::setup;
use crate::emulation::vi::Mode;
use crate::emulation::{CursorShape, Emulation};
use crate::event::{Event, Key};
use crate::text::Cursor;

#[test]
fn insert_then_escape_should_return_to_command_mode() {
	let mut h = setup(Mode::Command, 0, 1, &["ac"]);
	h.keys("ib");
	assert_eq!(h.lines(), vec!["abc"]);
	assert_eq!(h.cursor(), Cursor::new(0, 2));
	assert_eq!(h.vi.mode(), Mode::Edit);
	h.key(Key::Escape);
	assert_eq!(h.vi.mode(), Mode::Command);
	assert_eq!(h.cursor(), Cursor::new(0, 2));
}

#[test]
fn append_at_end_should_be_clamped_back_on_escape() {
	let mut h = setup(Mode::Command, 0, 0, &["abc"]);
	h.keys("Ad");
	assert_eq!(h.lines(), vec!["abcd"]);
	assert_eq!(h.cursor(), Cursor::new(0, 4));
	h.key(Key::Escape);
	assert_eq!(h.cursor(), Cursor::new(0, 3));
}

#[test]
fn a_and_big_i_should_position_cursor() {
	let mut h = setup(Mode::Command, 0, 2, &["abc"]);
	h.keys("a");
	assert_eq!(h.cursor(), Cursor::new(0, 3));
	h.key(Key::Escape);
	h.keys("I");
	assert_eq!(h.cursor(), Cursor::new(0, 0));
	assert_eq!(h.vi.mode(), Mode::Edit);
}

#[test]
fn o_should_open_line_below_and_shift_later_cursors() {
	let mut h = setup(Mode::Command, 0, 1, &["one", "two"]);
	h.set_cursors(&[(0, 1), (1, 2)]);
	h.keys("o");
	assert_eq!(h.lines(), vec!["one", "", "two"]);
	assert_eq!(h.cursors(), vec![(1, 0), (2, 2)]);
	assert_eq!(h.vi.mode(), Mode::Edit);
}

#[test]
fn big_o_should_open_line_above() {
	let mut h = setup(Mode::Command, 1, 1, &["one", "two"]);
	h.keys("O");
	assert_eq!(h.lines(), vec!["one", "", "two"]);
	assert_eq!(h.cursor(), Cursor::new(1, 0));
}

#[test]
fn typing_at_several_cursors_should_insert_everywhere() {
	let mut h = setup(Mode::Edit, 0, 0, &["ab", "cd"]);
	h.set_cursors(&[(0, 1), (1, 0), (0, 2)]);
	h.keys("-");
	assert_eq!(h.lines(), vec!["a-b-", "-cd"]);
	assert_eq!(h.cursors(), vec![(0, 2), (1, 1), (0, 4)]);
}

#[test]
fn edit_enter_should_split_at_every_cursor() {
	let mut h = setup(Mode::Edit, 0, 0, &["abc", "def"]);
	h.set_cursors(&[(0, 1), (1, 2)]);
	h.key(Key::Enter);
	assert_eq!(h.lines(), vec!["a", "bc", "de", "f"]);
	assert_eq!(h.cursors(), vec![(1, 0), (3, 0)]);
}

#[test]
fn edit_enter_with_two_cursors_on_one_line_should_split_twice() {
	let mut h = setup(Mode::Edit, 0, 0, &["abcdefg"]);
	h.set_cursors(&[(0, 2), (0, 5)]);
	h.key(Key::Enter);
	assert_eq!(h.lines(), vec!["ab", "cde", "fg"]);
	assert_eq!(h.cursors(), vec![(1, 0), (2, 0)]);
}

#[test]
fn backspace_at_column_zero_should_join_and_shift_later_cursors_up() {
	let mut h = setup(Mode::Edit, 0, 0, &["one", "two", "three", "four"]);
	h.set_cursors(&[(2, 0), (0, 0), (3, 2)]);
	h.key(Key::Backspace);
	assert_eq!(h.lines(), vec!["one", "twothree", "fur"]);
	assert_eq!(h.cursors(), vec![(1, 3), (0, 0), (2, 1)]);
}

#[test]
fn backspace_in_edit_mode_should_remove_previous_char() {
	let mut h = setup(Mode::Edit, 0, 2, &["abc"]);
	h.key(Key::Backspace);
	assert_eq!(h.lines(), vec!["ac"]);
	assert_eq!(h.cursor(), Cursor::new(0, 1));
}

#[test]
fn backspace_in_command_mode_should_only_move() {
	let mut h = setup(Mode::Command, 1, 0, &["ab", "cd"]);
	h.key(Key::Backspace);
	assert_eq!(h.cursor(), Cursor::new(0, 1));
	h.key(Key::Delete);
	assert_eq!(h.cursor(), Cursor::new(0, 0));
	assert_eq!(h.lines(), vec!["ab", "cd"]);
	assert!(!h.editor.buffer.modified);
}

#[test]
fn command_enter_should_move_to_start_of_next_line() {
	let mut h = setup(Mode::Command, 0, 1, &["ab", "  cd"]);
	h.key(Key::Enter);
	assert_eq!(h.cursor(), Cursor::new(1, 0));
}

#[test]
fn arrows_should_respect_mode_ceiling() {
	let mut h = setup(Mode::Command, 0, 0, &["abc"]);
	h.key(Key::End);
	assert_eq!(h.cursor(), Cursor::new(0, 2));
	h.key(Key::Right);
	assert_eq!(h.cursor(), Cursor::new(0, 2));
	h.keys("i");
	h.key(Key::Right);
	assert_eq!(h.cursor(), Cursor::new(0, 3));
	h.key(Key::Home);
	assert_eq!(h.cursor(), Cursor::new(0, 0));
	h.key(Key::Left);
	assert_eq!(h.cursor(), Cursor::new(0, 0));
}

#[test]
fn tab_in_edit_mode_should_insert_tab() {
	let mut h = setup(Mode::Edit, 0, 0, &["x"]);
	h.key(Key::Tab);
	assert_eq!(h.lines(), vec!["\tx"]);
}

#[test]
fn unhandled_events_should_be_ignored() {
	let mut h = setup(Mode::Command, 0, 1, &["abc"]);
	assert_eq!(h.key(Key::F5), ControlFlow::Continue(()));
	assert_eq!(h.keys("q"), ControlFlow::Continue(()));
	assert_eq!(h.press(Event::ctrl('s')), ControlFlow::Continue(()));
	assert_eq!(h.lines(), vec!["abc"]);
	assert_eq!(h.cursor(), Cursor::new(0, 1));
	assert_eq!(h.vi.pending_command(), "");
	assert!(h.control_events().is_empty());
}

#[test]
fn cursor_shape_should_follow_mode() {
	let mut h = setup(Mode::Command, 0, 0, &["abc"]);
	assert_eq!(h.vi.cursor_shape(), CursorShape::Block);
	h.keys("i");
	assert_eq!(h.vi.cursor_shape(), CursorShape::Bar);
	h.key(Key::Escape);
	h.keys("v");
	assert_eq!(h.vi.cursor_shape(), CursorShape::Block);
}
