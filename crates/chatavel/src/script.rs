//! Session command lines.

use chatavel_core::features::GroupToggle;
use chatavel_core::{Feature, MemberRole, WindowId};

/// One parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Open(Feature),
    Close(WindowId),
    Minimize(WindowId),
    Restore(WindowId),
    /// Taskbar click.
    Click(WindowId),
    /// Taskbar right-click.
    RightClick(WindowId),
    Backdrop(WindowId),
    Body(WindowId),
    Escape,
    Clear,
    Show,
    /// Send a chat message. Blank text is allowed and ignored by the thread.
    Say(String),
    Invite(String),
    /// Accept a pending invitation.
    Join {
        email: String,
        name: String,
    },
    Role {
        member: String,
        role: MemberRole,
    },
    /// Ask to remove a member; `confirm` or `cancel` settles it.
    Remove(String),
    Confirm,
    Cancel,
    Rename(String),
    Describe(String),
    Toggle {
        toggle: GroupToggle,
        enabled: bool,
    },
    SignUp {
        email: String,
        password: String,
        display_name: String,
    },
    SignIn {
        email: String,
        password: String,
    },
    Google {
        email: String,
        display_name: Option<String>,
    },
    Guest,
    SignOut,
    WhoAmI,
    Help,
    Quit,
}

pub const HELP: &str = "\
Window commands:
  open <feature>           Open (or bring back) a feature window
  close <id>               Press a window's close button
  minimize <id>            Press a window's minimize button
  restore <id>             Restore a minimized window
  click <id>               Click a taskbar icon
  right-click <id>         Right-click a taskbar icon
  backdrop <id>            Click the backdrop around a window
  body <id>                Click inside a window
  esc                      Press escape
  clear                    Close every window
  show                     Render the current state
Chat window:
  say <text...>            Send a message
Group window:
  invite <email>           Invite by email
  join <email> <name...>   Accept an invitation
  role <member> <admin|member>
  remove <member>          Ask to remove a member
  confirm | cancel         Settle a pending removal
  rename <name...>         Rename the group
  describe [text...]       Set the group description
  set <public|member-invites> <on|off>
Account commands:
  signup <email> <password> <name...>
  signin <email> <password>
  google <email> [name...]
  guest
  signout
  whoami
Other:
  help
  quit";

/// Parse a session line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();
    let rest = line
        .split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default();

    let command = match verb.to_lowercase().as_str() {
        "open" => {
            let name = single(verb, &args)?;
            let feature = Feature::parse(name).ok_or_else(|| {
                let known: Vec<&str> = Feature::all().iter().map(|f| f.as_str()).collect();
                format!("Unknown feature '{}'. Known: {}", name, known.join(", "))
            })?;
            ScriptCommand::Open(feature)
        }
        "close" => ScriptCommand::Close(single(verb, &args)?.into()),
        "minimize" | "min" => ScriptCommand::Minimize(single(verb, &args)?.into()),
        "restore" => ScriptCommand::Restore(single(verb, &args)?.into()),
        "click" => ScriptCommand::Click(single(verb, &args)?.into()),
        "right-click" => ScriptCommand::RightClick(single(verb, &args)?.into()),
        "backdrop" => ScriptCommand::Backdrop(single(verb, &args)?.into()),
        "body" => ScriptCommand::Body(single(verb, &args)?.into()),
        "esc" | "escape" => none(verb, &args, ScriptCommand::Escape)?,
        "clear" => none(verb, &args, ScriptCommand::Clear)?,
        "show" => none(verb, &args, ScriptCommand::Show)?,
        "say" => ScriptCommand::Say(rest.to_string()),
        "invite" => ScriptCommand::Invite(single_as(verb, &args, "<email>")?.to_string()),
        "join" => match args.as_slice() {
            [email, name @ ..] if !name.is_empty() => ScriptCommand::Join {
                email: email.to_string(),
                name: name.join(" "),
            },
            _ => return Err(usage(verb, "<email> <name...>")),
        },
        "role" => match args.as_slice() {
            [member, role] => ScriptCommand::Role {
                member: member.to_string(),
                role: MemberRole::parse(role)
                    .ok_or_else(|| format!("Unknown role '{}'. Known: admin, member", role))?,
            },
            _ => return Err(usage(verb, "<member> <admin|member>")),
        },
        "remove" => ScriptCommand::Remove(single_as(verb, &args, "<member>")?.to_string()),
        "confirm" => none(verb, &args, ScriptCommand::Confirm)?,
        "cancel" => none(verb, &args, ScriptCommand::Cancel)?,
        "rename" if !rest.is_empty() => ScriptCommand::Rename(rest.to_string()),
        "rename" => return Err(usage(verb, "<name...>")),
        "describe" => ScriptCommand::Describe(rest.to_string()),
        "set" => match args.as_slice() {
            [toggle, state] => ScriptCommand::Toggle {
                toggle: GroupToggle::parse(toggle).ok_or_else(|| {
                    format!("Unknown setting '{}'. Known: public, member-invites", toggle)
                })?,
                enabled: parse_switch(state)?,
            },
            _ => return Err(usage(verb, "<public|member-invites> <on|off>")),
        },
        "signup" => match args.as_slice() {
            [email, password, name @ ..] if !name.is_empty() => ScriptCommand::SignUp {
                email: email.to_string(),
                password: password.to_string(),
                display_name: name.join(" "),
            },
            _ => return Err(usage(verb, "<email> <password> <name...>")),
        },
        "signin" => match args.as_slice() {
            [email, password] => ScriptCommand::SignIn {
                email: email.to_string(),
                password: password.to_string(),
            },
            _ => return Err(usage(verb, "<email> <password>")),
        },
        "google" => match args.as_slice() {
            [email, name @ ..] => ScriptCommand::Google {
                email: email.to_string(),
                display_name: (!name.is_empty()).then(|| name.join(" ")),
            },
            [] => return Err(usage(verb, "<email> [name...]")),
        },
        "guest" => none(verb, &args, ScriptCommand::Guest)?,
        "signout" => none(verb, &args, ScriptCommand::SignOut)?,
        "whoami" => none(verb, &args, ScriptCommand::WhoAmI)?,
        "help" | "?" => ScriptCommand::Help,
        "quit" | "exit" => ScriptCommand::Quit,
        _ => return Err(format!("Unknown command '{}'. Type 'help'.", verb)),
    };

    Ok(Some(command))
}

fn single<'a>(verb: &str, args: &[&'a str]) -> Result<&'a str, String> {
    single_as(verb, args, "<id>")
}

fn single_as<'a>(verb: &str, args: &[&'a str], shape: &str) -> Result<&'a str, String> {
    match args {
        [arg] => Ok(*arg),
        _ => Err(usage(verb, shape)),
    }
}

fn parse_switch(state: &str) -> Result<bool, String> {
    match state.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(format!("Expected on or off, got '{}'", state)),
    }
}

fn none(verb: &str, args: &[&str], command: ScriptCommand) -> Result<ScriptCommand, String> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(format!("'{}' takes no arguments", verb))
    }
}

fn usage(verb: &str, shape: &str) -> String {
    format!("Usage: {} {}", verb, shape)
}
