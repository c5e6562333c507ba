use super::common::buffer;
use crate::text::{Cursor, CursorSet, LineEdit};

#[test]
fn validate_should_clamp_line_and_pos_into_buffer() {
	let b = buffer(&["abc", "de"]);
	let mut c = Cursor::new(7, 9);
	assert!(!c.validate(&b));
	assert_eq!(c, Cursor::new(1, 2));

	let mut c = Cursor::new(1, 1);
	assert!(c.validate(&b));
	assert_eq!(c, Cursor::new(1, 1));
}

#[test]
fn validate_without_past_end_should_stop_on_last_char() {
	let b = buffer(&["abc", ""]);
	let mut c = Cursor::new(0, 3);
	assert!(!c.validate_bounds(&b, false));
	assert_eq!(c, Cursor::new(0, 2));
	let mut c = Cursor::new(1, 4);
	c.validate_bounds(&b, false);
	assert_eq!(c, Cursor::new(1, 0));
}

#[test]
fn validated_cursors_should_always_be_in_bounds() {
	let b = buffer(&["a", "", "long line here"]);
	for line in 0..6 {
		for pos in 0..20 {
			let mut c = Cursor::new(line, pos);
			c.validate(&b);
			assert!(c.line < b.len());
			assert!(c.pos <= b.line_len(c.line));
		}
	}
}

#[test]
fn before_and_after_should_partition_by_line_then_pos() {
	let set = CursorSet::new(vec![
		Cursor::new(0, 5),
		Cursor::new(1, 0),
		Cursor::new(1, 3),
		Cursor::new(2, 1),
		Cursor::new(1, 3),
	]);
	assert_eq!(set.before(Cursor::new(1, 3)), vec![0, 1]);
	assert_eq!(set.after(Cursor::new(1, 3)), vec![3]);
	assert_eq!(set.after(Cursor::new(0, 0)), vec![0, 1, 2, 3, 4]);
}

#[test]
fn reindex_after_split_should_shift_later_cursors_down() {
	let mut set = CursorSet::new(vec![Cursor::new(1, 2), Cursor::new(0, 4), Cursor::new(1, 6), Cursor::new(3, 0)]);
	set.reindex(LineEdit::Split { line: 1, pos: 2 }, Some(0));
	assert_eq!(
		set.as_slice(),
		&[Cursor::new(1, 2), Cursor::new(0, 4), Cursor::new(2, 4), Cursor::new(4, 0)]
	);
}

#[test]
fn reindex_after_join_should_shift_later_cursors_up() {
	let mut set = CursorSet::new(vec![Cursor::new(0, 1), Cursor::new(2, 0), Cursor::new(2, 3), Cursor::new(4, 2)]);
	set.reindex(LineEdit::Joined { line: 2, prev_len: 5 }, Some(1));
	assert_eq!(
		set.as_slice(),
		&[Cursor::new(0, 1), Cursor::new(2, 0), Cursor::new(1, 8), Cursor::new(3, 2)]
	);
}

#[test]
fn reindex_after_insert_and_remove_should_move_following_lines() {
	let mut set = CursorSet::new(vec![Cursor::new(0, 0), Cursor::new(1, 1), Cursor::new(2, 2)]);
	set.reindex(LineEdit::Inserted { line: 1 }, None);
	assert_eq!(set.as_slice(), &[Cursor::new(0, 0), Cursor::new(2, 1), Cursor::new(3, 2)]);
	set.reindex(LineEdit::Removed { line: 2 }, None);
	assert_eq!(set.as_slice(), &[Cursor::new(0, 0), Cursor::new(2, 1), Cursor::new(2, 2)]);
}

#[test]
fn reindex_after_range_removal_should_collapse_and_shift() {
	let edit = LineEdit::RangeRemoved { start: Cursor::new(0, 3), end: Cursor::new(2, 1) };
	assert_eq!(edit.apply(Cursor::new(0, 1)), Cursor::new(0, 1));
	assert_eq!(edit.apply(Cursor::new(1, 4)), Cursor::new(0, 3));
	assert_eq!(edit.apply(Cursor::new(2, 5)), Cursor::new(0, 6));
	assert_eq!(edit.apply(Cursor::new(4, 2)), Cursor::new(2, 2));
}

#[test]
fn empty_set_should_fall_back_to_origin() {
	let set = CursorSet::new(Vec::new());
	assert_eq!(set.len(), 1);
	assert_eq!(set.primary(), Cursor::new(0, 0));
}

#[test]
fn cursor_order_should_compare_line_then_column() {
	let a = Cursor::new(0, 9);
	let b = Cursor::new(1, 0);
	assert!(a.is_before(&b));
	assert!(b.is_after(&a));
	assert!(!a.is_before(&a) && !a.is_after(&a));

	let mut set = CursorSet::single(a);
	set.push(b);
	assert_eq!(set.len(), 2);
	assert_eq!(set.after(a), vec![1]);
}
