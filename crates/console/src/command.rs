use std::path::PathBuf;

use crate::errors::ConsoleError;
use crate::state::Tab;

pub const HELP: &str = "\
commands:
  login <username> <password>   start a session
  logout                        end the session
  tab menu|add                  switch tab (add starts a fresh item)
  list                          show the menu
  edit <n>                      edit item n
  delete <n>                    ask to delete item n
  confirm | cancel              answer a delete question
  set <field> <value>           title, description, ingredients, price, currency
  image <path>                  attach an image to the form
  remove-image                  drop the image from the form
  submit                        save the form
  cancel-edit                   clear the form
  logo <path>                   upload a restaurant logo
  rename <name>                 rename the restaurant
  refresh                       reload menu and settings
  help                          this text
  quit                          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    Tab(Tab),
    List,
    Edit(usize),
    Delete(usize),
    Confirm,
    Cancel,
    Set { field: String, value: String },
    Image(PathBuf),
    RemoveImage,
    Logo(PathBuf),
    Rename(String),
    Submit,
    CancelEdit,
    Refresh,
    Help,
    Quit,
}

fn position(arg: Option<&str>) -> Result<usize, ConsoleError> {
    arg.and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| ConsoleError::usage("expected an item number, as shown by `list`"))
}

fn rest_required(rest: &str, what: &str) -> Result<String, ConsoleError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(ConsoleError::usage(format!("missing {what}")));
    }
    Ok(rest.to_string())
}

impl Command {
    /// Command word, safe to log.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Logout => "logout",
            Command::Tab(_) => "tab",
            Command::List => "list",
            Command::Edit(_) => "edit",
            Command::Delete(_) => "delete",
            Command::Confirm => "confirm",
            Command::Cancel => "cancel",
            Command::Set { .. } => "set",
            Command::Image(_) => "image",
            Command::RemoveImage => "remove-image",
            Command::Logo(_) => "logo",
            Command::Rename(_) => "rename",
            Command::Submit => "submit",
            Command::CancelEdit => "cancel-edit",
            Command::Refresh => "refresh",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }

    /// Parse one input line; `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Command>, ConsoleError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let mut args = rest.split_whitespace();
        let cmd = match word {
            "login" => {
                let username = args.next().ok_or_else(|| ConsoleError::usage("usage: login <username> <password>"))?;
                let password = args.next().ok_or_else(|| ConsoleError::usage("usage: login <username> <password>"))?;
                Command::Login { username: username.to_string(), password: password.to_string() }
            }
            "logout" => Command::Logout,
            "tab" => Command::Tab(args.next().unwrap_or_default().parse::<Tab>().map_err(ConsoleError::Usage)?),
            "list" => Command::List,
            "edit" => Command::Edit(position(args.next())?),
            "delete" => Command::Delete(position(args.next())?),
            "confirm" => Command::Confirm,
            "cancel" => Command::Cancel,
            "set" => {
                let rest = rest.trim_start();
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(ConsoleError::usage("usage: set <field> <value>"));
                }
                Command::Set { field: field.to_string(), value: value.trim().to_string() }
            }
            "remove-image" => Command::RemoveImage,
            "image" => Command::Image(PathBuf::from(rest_required(rest, "image path")?)),
            "logo" => Command::Logo(PathBuf::from(rest_required(rest, "logo path")?)),
            "rename" => Command::Rename(rest_required(rest, "restaurant name")?),
            "submit" => Command::Submit,
            "cancel-edit" => Command::CancelEdit,
            "refresh" => Command::Refresh,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ConsoleError::usage(format!("unknown command `{other}`; try `help`"))),
        };
        Ok(Some(cmd))
    }
}
