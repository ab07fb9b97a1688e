//! Session command parsing.

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank input.
    Empty,
    /// Show the command help.
    Help,
    /// Redraw the current listing.
    List,
    /// Toggle the entries named by the index list.
    Select(String),
    /// Enter the directory at the first valid index.
    Open(String),
    /// Go back to the parent directory.
    Up,
    /// Select every displayed entry.
    SelectAll,
    /// Clear all selections.
    Clear,
    /// Finish with the current selection.
    Export,
    /// Finish without exporting.
    Quit,
    /// Any other verb, lower-cased.
    Unknown(String),
}

/// Parse a command line. The verb is case-insensitive; everything after the
/// first run of whitespace is the argument.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    let (verb, argument) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };

    match verb.to_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "ls" | "list" => Command::List,
        "select" => Command::Select(argument.to_string()),
        "open" | "cd" => Command::Open(argument.to_string()),
        "up" | "back" => Command::Up,
        "select-all" => Command::SelectAll,
        "clear" => Command::Clear,
        "export" => Command::Export,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Parse an index list separated by `,` or spaces. Tokens that are not
/// integers in `0..count` are skipped.
pub fn parse_indices(argument: &str, count: usize) -> Vec<usize> {
    argument
        .split([',', ' '])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<usize>().ok())
        .filter(|&index| index < count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verbs() {
        assert_eq!(parse_command("  "), Command::Empty);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command("LS"), Command::List);
        assert_eq!(parse_command("Select 0,1"), Command::Select("0,1".into()));
        assert_eq!(parse_command("cd 2"), Command::Open("2".into()));
        assert_eq!(parse_command("back"), Command::Up);
        assert_eq!(parse_command("select-all"), Command::SelectAll);
        assert_eq!(parse_command("exit"), Command::Quit);
        assert_eq!(parse_command("Frobnicate now"), Command::Unknown("frobnicate".into()));
    }

    #[test]
    fn test_argument_keeps_inner_spacing() {
        assert_eq!(
            parse_command("select   0, 2  3 "),
            Command::Select("0, 2  3".into())
        );
        assert_eq!(parse_command("select"), Command::Select(String::new()));
    }

    #[test]
    fn test_parse_indices() {
        assert_eq!(parse_indices("0,2 1", 3), vec![0, 2, 1]);
        assert_eq!(parse_indices("0, 5, -1, x, 1", 3), vec![0, 1]);
        assert!(parse_indices("", 3).is_empty());
        assert!(parse_indices("0", 0).is_empty());
    }
}
