//! The selection state machine.

use std::collections::BTreeSet;
use std::io::{self, Write};

use thiserror::Error;

use arbor_core::path::normalize_relative_path;
use arbor_core::{FilterPolicy, TreeNode};

use crate::command::{Command, parse_command, parse_indices};
use crate::emit::emit_filter_command;
use crate::input::CommandSource;
use crate::render::SessionRenderer;

/// A command that could not be carried out. The session keeps browsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionNotice {
    #[error("No valid indices provided.")]
    NoValidIndices,
    #[error("Already at root.")]
    AlreadyAtRoot,
    #[error("No nodes selected. Use `select <index>` before exporting.")]
    NothingSelected,
    #[error("Unknown command: {0}. Type `help` for options.")]
    UnknownCommand(String),
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user exported a non-empty selection.
    Exported {
        selected: BTreeSet<String>,
        /// Command line reproducing the selection.
        command: Option<String>,
    },
    /// The user quit or input ran out.
    Quit { selected: BTreeSet<String> },
}

impl SessionOutcome {
    pub fn selected(&self) -> &BTreeSet<String> {
        match self {
            SessionOutcome::Exported { selected, .. } | SessionOutcome::Quit { selected } => {
                selected
            }
        }
    }
}

/// Result of applying one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Still browsing.
    Browsing,
    /// Still browsing; the caller should show the help text.
    ShowHelp,
    /// The session is over.
    Finished(SessionOutcome),
}

/// Navigation and selection state over a borrowed tree.
///
/// Selected entries are keyed by normalized relative path.
#[derive(Debug, Clone)]
pub struct SelectionSession<'a> {
    root: &'a TreeNode,
    policy: &'a FilterPolicy,
    current: &'a TreeNode,
    breadcrumb: Vec<&'a TreeNode>,
    selected: BTreeSet<String>,
}

impl<'a> SelectionSession<'a> {
    pub fn new(root: &'a TreeNode, policy: &'a FilterPolicy) -> Self {
        Self {
            root,
            policy,
            current: root,
            breadcrumb: Vec::new(),
            selected: BTreeSet::new(),
        }
    }

    pub fn root(&self) -> &'a TreeNode {
        self.root
    }

    /// Directory whose children are displayed.
    pub fn current(&self) -> &'a TreeNode {
        self.current
    }

    /// Ancestors of the current directory, outermost first.
    pub fn breadcrumb(&self) -> &[&'a TreeNode] {
        &self.breadcrumb
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn policy(&self) -> &'a FilterPolicy {
        self.policy
    }

    /// Parse and apply a command line.
    pub fn apply_line(&mut self, line: &str) -> Result<Transition, SessionNotice> {
        self.apply(parse_command(line))
    }

    /// Apply one command.
    pub fn apply(&mut self, command: Command) -> Result<Transition, SessionNotice> {
        let current = self.current;
        let children = &current.children;

        match command {
            Command::Empty | Command::List => {}
            Command::Help => return Ok(Transition::ShowHelp),
            Command::Select(argument) => {
                let indices = parse_indices(&argument, children.len());
                if indices.is_empty() {
                    return Err(SessionNotice::NoValidIndices);
                }
                for index in indices {
                    self.toggle(&children[index]);
                }
            }
            Command::Open(argument) => {
                let Some(&index) = parse_indices(&argument, children.len()).first() else {
                    return Err(SessionNotice::NoValidIndices);
                };
                let child = &children[index];
                if child.is_dir() {
                    self.breadcrumb.push(current);
                    self.current = child;
                } else {
                    self.toggle(child);
                }
            }
            Command::Up => {
                let parent = self.breadcrumb.pop().ok_or(SessionNotice::AlreadyAtRoot)?;
                self.current = parent;
            }
            Command::SelectAll => self.selected.extend(children.iter().map(selection_key)),
            Command::Clear => self.selected.clear(),
            Command::Export => {
                if self.selected.is_empty() {
                    return Err(SessionNotice::NothingSelected);
                }
                let selected = self.selected.clone();
                let command =
                    emit_filter_command(&selected, self.policy, self.root, &self.root.name);
                tracing::debug!(target: "arbor::interactive", count = selected.len(), "selection exported");
                return Ok(Transition::Finished(SessionOutcome::Exported {
                    selected,
                    command,
                }));
            }
            Command::Quit => {
                return Ok(Transition::Finished(SessionOutcome::Quit {
                    selected: self.selected.clone(),
                }));
            }
            Command::Unknown(verb) => return Err(SessionNotice::UnknownCommand(verb)),
        }

        Ok(Transition::Browsing)
    }

    fn toggle(&mut self, node: &TreeNode) {
        let key = selection_key(node);
        if !self.selected.remove(&key) {
            self.selected.insert(key);
        }
    }
}

fn selection_key(node: &TreeNode) -> String {
    normalize_relative_path(&node.relative_path)
}

/// Drive `session` with commands from `source` until it finishes or input
/// runs out, drawing the view to `out` before each command.
pub fn run_session(
    session: &mut SelectionSession<'_>,
    source: &mut dyn CommandSource,
    out: &mut dyn Write,
) -> io::Result<SessionOutcome> {
    let renderer = SessionRenderer::new(session.policy().options());

    loop {
        renderer.render(out, session.current(), session.selected())?;

        let Some(line) = source.next_command(out)? else {
            tracing::debug!(target: "arbor::interactive", "input exhausted");
            return Ok(SessionOutcome::Quit {
                selected: session.selected().clone(),
            });
        };

        match session.apply_line(&line) {
            Ok(Transition::Browsing) => {}
            Ok(Transition::ShowHelp) => renderer.render_help(out)?,
            Ok(Transition::Finished(outcome)) => return Ok(outcome),
            Err(notice) => writeln!(out, "{notice}")?,
        }
    }
}
