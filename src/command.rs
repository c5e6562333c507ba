//! Repeat-count parsing for the pending command buffer.

/// Splits a pending keystroke string into `(count, command)`.
///
/// Digit runs multiply into the count and the non-digit runs are concatenated
/// into the command, so `"2d3d"` becomes `(6, "dd")`. A count that does not
/// fit clamps to `usize::MAX`. Whether the command is complete is up to the
/// caller.
pub fn parse_command(pending: &str) -> (usize, String) {
	let mut count: usize = 1;
	let mut command = String::new();
	let mut digits = String::new();

	for ch in pending.chars() {
		if ch.is_ascii_digit() {
			digits.push(ch);
			continue;
		}
		if !digits.is_empty() {
			count = multiply_count(count, &digits);
			digits.clear();
		}
		command.push(ch);
	}
	if !digits.is_empty() {
		count = multiply_count(count, &digits);
	}
	(count, command)
}

fn multiply_count(count: usize, digits: &str) -> usize {
	match digits.parse::<usize>() {
		Ok(n) => count.saturating_mul(n),
		Err(_) => usize::MAX,
	}
}

#[cfg(test)]
mod tests {
	use super::parse_command;

	#[test]
	fn counts_should_multiply_across_runs() {
		assert_eq!(parse_command("2d3d"), (6, "dd".to_string()));
		assert_eq!(parse_command("d3d"), (3, "dd".to_string()));
		assert_eq!(parse_command("d10d"), (10, "dd".to_string()));
	}

	#[test]
	fn empty_input_should_default_to_one() {
		assert_eq!(parse_command(""), (1, String::new()));
	}

	#[test]
	fn plain_commands_should_keep_count_one() {
		assert_eq!(parse_command("x"), (1, "x".to_string()));
		assert_eq!(parse_command("gg"), (1, "gg".to_string()));
		assert_eq!(parse_command("5G"), (5, "G".to_string()));
	}

	#[test]
	fn digits_only_should_yield_empty_command() {
		assert_eq!(parse_command("999"), (999, String::new()));
	}

	#[test]
	fn overflowing_count_should_clamp() {
		assert_eq!(parse_command("99999999999999999999999999j"), (usize::MAX, "j".to_string()));
		assert_eq!(parse_command("99999999999d99999999999d"), (usize::MAX, "dd".to_string()));
	}
}
