/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Anything that is not a command is text to formalize.
    Formalize(String),
    Clear,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":hapus" | ":clear" => Command::Clear,
            ":keluar" | ":quit" | ":q" => Command::Quit,
            _ => Command::Formalize(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}
