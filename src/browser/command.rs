/// Prefix chat-style commands are typed with
pub const COMMAND_PREFIX: &str = "::";

pub const DEFAULT_OPEN_COMMAND: &str = "cache";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    OpenBrowser,
}

/// Parse a command line such as `::cache`. Arguments after the name are ignored.
pub fn parse_command(line: &str, open_command: &str) -> Option<ViewerCommand> {
    let line = line.trim();
    let line = line.strip_prefix(COMMAND_PREFIX).unwrap_or(line);
    let name = line.split_whitespace().next()?;
    if name.eq_ignore_ascii_case(open_command.trim()) {
        Some(ViewerCommand::OpenBrowser)
    } else {
        None
    }
}
