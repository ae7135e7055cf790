use crate::client::view::Field;

pub const HELP: &str = "commands: refresh | add | set <field> <value> | confirm | cancel | \
delete <n> | move <from> <to> | drag <n> <over>... | toggle | help | quit";

/// A line typed into the terminal client. Row numbers are 1-based as shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refresh,
    Add,
    Set(Field, String),
    Confirm,
    Cancel,
    Delete(usize),
    Move(usize, usize),
    Drag(usize, Vec<usize>),
    Toggle,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word {
            "refresh" | "list" => Ok(Command::Refresh),
            "add" => Ok(Command::Add),
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = Field::from_name(name).ok_or_else(|| format!("unknown field `{}`", name))?;
                Ok(Command::Set(field, value.trim().to_string()))
            }
            "confirm" => Ok(Command::Confirm),
            "cancel" => Ok(Command::Cancel),
            "delete" | "rm" => Ok(Command::Delete(row(rest)?)),
            "move" | "mv" => match rows(rest)?.as_slice() {
                [from, to] => Ok(Command::Move(*from, *to)),
                _ => Err("usage: move <from> <to>".to_string()),
            },
            "drag" => match rows(rest)?.split_first() {
                Some((start, hovers)) if !hovers.is_empty() => Ok(Command::Drag(*start, hovers.to_vec())),
                _ => Err("usage: drag <n> <over>...".to_string()),
            },
            "toggle" | "summary" => Ok(Command::Toggle),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err(HELP.to_string()),
            other => Err(format!("unknown command `{}`", other)),
        }
    }
}

/// Parses a 1-based row number into an index.
fn row(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("`{}` is not a row number", raw)),
    }
}

fn rows(raw: &str) -> Result<Vec<usize>, String> {
    raw.split_whitespace().map(row).collect()
}
