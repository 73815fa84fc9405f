use crate::app::TechNerd;
use crate::display;
use crate::error::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
Type a keyword to search repositories and jobs, or one of:
  :featured        pick a random featured repository
  :suggest         regenerate school suggestions for the current repository
  :history         show previous repositories and jobs
  :ban <label>     hide a topic or job tag
  :unban <label>   show it again
  :banned          list banned labels
  :help            this text
  :quit            leave the session";

#[derive(Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Query(String),
    Featured,
    Suggest,
    History,
    Ban(String),
    Unban(String),
    Banned,
    Help,
    Quit,
    Unknown(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return SessionCommand::Query(line.to_string());
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match name {
            "featured" => SessionCommand::Featured,
            "suggest" => SessionCommand::Suggest,
            "history" => SessionCommand::History,
            "ban" => SessionCommand::Ban(arg.to_string()),
            "unban" => SessionCommand::Unban(arg.to_string()),
            "banned" => SessionCommand::Banned,
            "help" | "h" => SessionCommand::Help,
            "quit" | "q" | "exit" => SessionCommand::Quit,
            _ => SessionCommand::Unknown(name.to_string()),
        }
    }
}

/// Runs until `:quit` or end of input. Query failures are shown and the
/// session carries on.
pub async fn run_session<R>(app: &mut TechNerd, input: R) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    println!("{}", HELP);
    let mut lines = input.lines();

    loop {
        print!("\ntechnerd> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match SessionCommand::parse(&line) {
            SessionCommand::Query(query) => {
                let _ = app.search(&query).await;
                display::render_report(app);
            }
            SessionCommand::Featured => {
                if app.featured().await.is_ok() {
                    display::render_report(app);
                } else {
                    display::render_messages(app);
                }
            }
            SessionCommand::Suggest => {
                if app.store().current_repository().is_none() {
                    println!("No repository selected yet.");
                    continue;
                }
                app.refresh_suggestions().await;
                display::render_suggestions(app.suggestions());
                display::render_messages(app);
            }
            SessionCommand::History => display::render_history(app.store()),
            SessionCommand::Ban(label) => {
                if app.store_mut().ban_label(&label) {
                    println!("Banned '{}'", label);
                } else {
                    println!("Nothing to ban.");
                }
            }
            SessionCommand::Unban(label) => {
                if app.store_mut().unban_label(&label) {
                    println!("Unbanned '{}'", label);
                } else {
                    println!("'{}' was not banned.", label);
                }
            }
            SessionCommand::Banned => display::render_banned(app.store()),
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Quit => break,
            SessionCommand::Unknown(name) => {
                println!("Unknown command ':{}'. Type :help for the list.", name)
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_queries() {
        assert_eq!(
            SessionCommand::parse("  machine learning "),
            SessionCommand::Query("machine learning".into())
        );
        assert_eq!(SessionCommand::parse(""), SessionCommand::Query(String::new()));
    }

    #[test]
    fn colon_commands() {
        assert_eq!(SessionCommand::parse(":featured"), SessionCommand::Featured);
        assert_eq!(SessionCommand::parse(":q"), SessionCommand::Quit);
        assert_eq!(
            SessionCommand::parse(":ban   Full-time  "),
            SessionCommand::Ban("Full-time".into())
        );
        assert_eq!(
            SessionCommand::parse(":unban via LinkedIn"),
            SessionCommand::Unban("via LinkedIn".into())
        );
        assert_eq!(SessionCommand::parse(":ban"), SessionCommand::Ban(String::new()));
        assert_eq!(
            SessionCommand::parse(":wat"),
            SessionCommand::Unknown("wat".into())
        );
    }
}
