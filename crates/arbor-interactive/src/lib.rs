//! Interactive selection for arbor.
//!
//! A [`SelectionSession`] walks a built tree, toggling entries in and out of
//! a selection. The finished selection can be turned into a smaller tree with
//! [`prune`] and into a reusable command line with [`emit_filter_command`].

mod command;
mod emit;
mod input;
mod prune;
mod render;
mod session;

pub use command::{Command, parse_command, parse_indices};
pub use emit::{BASE_COMMAND, emit_filter_command};
pub use input::{CommandSource, LineReader, PROMPT, ScriptThenReader, ScriptedCommands};
pub use prune::prune;
pub use render::{KEYBINDINGS, SessionRenderer, filter_summary};
pub use session::{SelectionSession, SessionNotice, SessionOutcome, Transition, run_session};
