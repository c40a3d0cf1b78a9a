/// One line read from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Toggle,
    Quit,
    /// Raw line; trimming and empty checks belong to the widget.
    Submit(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "/toggle" => Self::Toggle,
            "/quit" | "/exit" => Self::Quit,
            _ => Self::Submit(line.to_string()),
        }
    }
}
