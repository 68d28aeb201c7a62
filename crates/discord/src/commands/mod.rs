//! Chat commands.
//!
//! A command message is the prefix, a command name, and free-form
//! arguments. Ledger commands join their arguments with single spaces
//! into a tab title, so `$ledger March 3` reads the `March 3` tab.

pub mod ledger;
pub mod ping;

/// Known command names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Summary cell as text.
    LedgerText,
    /// Cropped snapshot image.
    LedgerImage,
    /// Snapshot image, then summary text.
    Ledger,
    /// Settlement resolved from the ledger table.
    LedgerOwes,
    /// Latency check, rate limited per channel.
    Ping,
}

impl Command {
    /// All commands.
    pub const ALL: [Self; 5] = [
        Self::LedgerText,
        Self::LedgerImage,
        Self::Ledger,
        Self::LedgerOwes,
        Self::Ping,
    ];

    /// Name typed after the prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LedgerText => "ledger_text",
            Self::LedgerImage => "ledger_img",
            Self::Ledger => "ledger",
            Self::LedgerOwes => "ledger_owes",
            Self::Ping => "ping",
        }
    }

    /// Looks up a command by exact name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// A parsed command message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Command to run.
    pub command: Command,
    /// Arguments after the command name.
    pub args: Vec<String>,
}

impl Invocation {
    /// Parses `content`, returning `None` for non-commands and unknown names.
    #[must_use]
    pub fn parse(content: &str, prefix: &str) -> Option<Self> {
        let rest = content.strip_prefix(prefix)?;
        let rest = rest.trim_start();
        let (name, args) = match rest.find(char::is_whitespace) {
            Some(at) => (&rest[..at], &rest[at..]),
            None => (rest, ""),
        };
        let command = Command::from_name(name)?;
        Some(Self {
            command,
            args: split_args(args),
        })
    }

    /// Arguments joined by single spaces.
    #[must_use]
    pub fn joined_args(&self) -> String {
        self.args.join(" ")
    }
}

/// Splits on whitespace; a double-quoted word may contain spaces.
fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for ch in input.chars() {
        match ch {
            '"' if quoted => {
                quoted = false;
                args.push(std::mem::take(&mut current));
                in_word = false;
            }
            '"' if !in_word => {
                quoted = true;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        args.push(current);
    }
    args
}
