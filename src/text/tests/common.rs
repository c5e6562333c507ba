use crate::text::Buffer;

pub(super) fn buffer(lines: &[&str]) -> Buffer {
	Buffer::from_lines(lines.iter().copied())
}

#[track_caller]
pub(super) fn assert_lines(buffer: &Buffer, expected: &[&str]) {
	assert_eq!(buffer.to_lines(), expected.iter().map(|l| l.to_string()).collect::<Vec<_>>());
}
