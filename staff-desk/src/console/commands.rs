//! Console command parsing
//!
//! Commands are route-specific; a word valid on the listing is unknown on
//! the login screen.

use crate::core::Route;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Login
    Login {
        username: String,
        password: String,
        remember_me: bool,
    },
    Signup,

    // Signup
    /// `username` is `None` when left to the remembered one
    Register {
        username: Option<String>,
        password: String,
        confirm: String,
        remember_me: bool,
    },
    Back,

    // Listing
    Search(String),
    Page(u32),
    Filter,
    Department(String),
    Designation(String),
    Reset,
    Apply,
    Close,
    Export(Option<PathBuf>),
    Refresh,
    Logout,

    // Everywhere
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command '{0}', type 'help' for the list")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Not a page number: {0}")]
    InvalidPage(String),
}

const LOGIN_USAGE: &str = "login <username> <password> [--remember]";
const REGISTER_USAGE: &str = "register [username] <password> <confirm> [--remember]";
const PAGE_USAGE: &str = "page <n>";

/// Parse one input line; `Ok(None)` for a blank line
pub fn parse(route: Route, line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match (route, word) {
        (_, "help") => Command::Help,
        (_, "quit" | "exit") => Command::Quit,

        (Route::Login, "login") => parse_login(&args)?,
        (Route::Login, "signup") => Command::Signup,

        (Route::Signup, "register") => parse_register(&args)?,
        (Route::Signup, "back") => Command::Back,

        // Free text keeps inner spaces
        (Route::Employees, "search") => Command::Search(rest.to_string()),
        (Route::Employees, "page") => match args.as_slice() {
            [page] => Command::Page(
                page.parse()
                    .map_err(|_| ParseError::InvalidPage(page.to_string()))?,
            ),
            _ => return Err(ParseError::Usage(PAGE_USAGE)),
        },
        (Route::Employees, "filter") => Command::Filter,
        (Route::Employees, "department") => Command::Department(rest.to_string()),
        (Route::Employees, "designation") => Command::Designation(rest.to_string()),
        (Route::Employees, "reset") => Command::Reset,
        (Route::Employees, "apply") => Command::Apply,
        (Route::Employees, "close") => Command::Close,
        (Route::Employees, "export") => {
            Command::Export((!rest.is_empty()).then(|| PathBuf::from(rest)))
        }
        (Route::Employees, "refresh") => Command::Refresh,
        (Route::Employees, "logout") => Command::Logout,

        (_, other) => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_login(args: &[&str]) -> Result<Command, ParseError> {
    let remember_me = args.contains(&"--remember");
    let positional: Vec<&str> = args.iter().copied().filter(|a| *a != "--remember").collect();
    match positional.as_slice() {
        [username, password] => Ok(Command::Login {
            username: username.to_string(),
            password: password.to_string(),
            remember_me,
        }),
        _ => Err(ParseError::Usage(LOGIN_USAGE)),
    }
}

fn parse_register(args: &[&str]) -> Result<Command, ParseError> {
    let remember_me = args.contains(&"--remember");
    let positional: Vec<&str> = args.iter().copied().filter(|a| *a != "--remember").collect();
    let (username, password, confirm) = match positional.as_slice() {
        [username, password, confirm] => (Some(username.to_string()), password, confirm),
        [password, confirm] => (None, password, confirm),
        _ => return Err(ParseError::Usage(REGISTER_USAGE)),
    };
    Ok(Command::Register {
        username,
        password: password.to_string(),
        confirm: confirm.to_string(),
        remember_me,
    })
}

/// Command list shown by `help`
pub fn help(route: Route) -> &'static str {
    match route {
        Route::Login => {
            "login <username> <password> [--remember]   sign in\n\
             signup                                     create an account\n\
             quit                                       exit"
        }
        Route::Signup => {
            "register [username] <password> <confirm> [--remember]   create an account\n\
             back                                                    return to login\n\
             quit                                                    exit"
        }
        Route::Employees => {
            "search [text]          filter by name (empty clears)\n\
             page <n>               go to page n\n\
             filter                 open the filter panel\n\
             department [value]     stage a department (empty clears)\n\
             designation [value]    stage a designation (empty clears)\n\
             reset                  clear the staged filter\n\
             apply                  apply the staged filter\n\
             close                  close the panel without applying\n\
             export [path]          write the current page as CSV\n\
             refresh                reload the current page\n\
             logout                 end the session\n\
             quit                   exit"
        }
    }
}
