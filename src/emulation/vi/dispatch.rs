//! The vi rule table. The first rule whose mode filter and pattern match the
//! event gets it; a handler that returns [`Outcome::Unhandled`] passes the
//! event on to the rules after it.

use super::{Mode, Vi};
use crate::editor::Editor;
use crate::emulation::Outcome;
use crate::event::{Event, Key, Pattern};

type Handler = fn(&mut Vi, &mut Editor, &Event) -> Outcome;

pub(super) struct Rule {
	modes: &'static [Mode],
	patterns: &'static [Pattern],
	handler: Handler,
}

impl Rule {
	fn matches(&self, mode: Mode, event: &Event) -> bool {
		self.modes.contains(&mode) && self.patterns.iter().any(|p| p.matches(event))
	}
}

const COMMAND: &[Mode] = &[Mode::Command];
const EDIT: &[Mode] = &[Mode::Edit];
const SELECT: &[Mode] = &[Mode::Select];
const NOT_EDIT: &[Mode] = &[Mode::Command, Mode::Select];
const ANY: &[Mode] = &[Mode::Command, Mode::Edit, Mode::Select];

pub(super) static RULES: &[Rule] = &[
	Rule { modes: COMMAND, patterns: &[Pattern::character(':')], handler: Vi::to_ex_command },
	Rule { modes: EDIT, patterns: &[Pattern::key(Key::Escape)], handler: Vi::to_command_mode },
	Rule { modes: NOT_EDIT, patterns: &[Pattern::key(Key::Escape)], handler: Vi::clear_command },
	Rule { modes: NOT_EDIT, patterns: &[Pattern::key(Key::Enter)], handler: Vi::command_enter },
	Rule { modes: EDIT, patterns: &[Pattern::key(Key::Enter)], handler: Vi::edit_enter },
	Rule {
		modes: COMMAND,
		patterns: &[
			Pattern::character('i'),
			Pattern::character('I'),
			Pattern::character('o'),
			Pattern::character('O'),
			Pattern::character('a'),
			Pattern::character('A'),
		],
		handler: Vi::insertion_key,
	},
	Rule { modes: NOT_EDIT, patterns: &[Pattern::ctrl('v')], handler: Vi::selection_block },
	Rule { modes: NOT_EDIT, patterns: &[Pattern::character('v')], handler: Vi::selection_fluid },
	Rule { modes: NOT_EDIT, patterns: &[Pattern::character('V')], handler: Vi::selection_lines },
	Rule {
		modes: SELECT,
		patterns: &[Pattern::character('d'), Pattern::character('x'), Pattern::key(Key::Delete)],
		handler: Vi::select_remove,
	},
	Rule { modes: SELECT, patterns: &[Pattern::character('c')], handler: Vi::select_change },
	Rule {
		modes: ANY,
		patterns: &[
			Pattern::key(Key::Left),
			Pattern::key(Key::Right),
			Pattern::key(Key::Up),
			Pattern::key(Key::Down),
			Pattern::key(Key::Home),
			Pattern::key(Key::End),
		],
		handler: Vi::move_cursors,
	},
	Rule {
		modes: ANY,
		patterns: &[Pattern::key(Key::Backspace), Pattern::key(Key::Delete)],
		handler: Vi::backspace,
	},
	Rule { modes: EDIT, patterns: &[Pattern::key(Key::Tab)], handler: Vi::insert_tab },
	Rule { modes: NOT_EDIT, patterns: &[Pattern::ANY_CHARACTER], handler: Vi::command_key },
	Rule { modes: EDIT, patterns: &[Pattern::ANY_CHARACTER], handler: Vi::insert_character },
];

pub(super) fn dispatch(vi: &mut Vi, editor: &mut Editor, event: &Event) -> Outcome {
	for rule in RULES {
		if rule.matches(vi.mode, event) && (rule.handler)(vi, editor, event) == Outcome::Handled {
			return Outcome::Handled;
		}
	}
	Outcome::Unhandled
}
