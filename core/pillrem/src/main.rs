mod adapter;
mod cli;
mod dispatch;
mod domain;
mod ports;
mod render;
mod shell;
mod store;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::io::{self, IsTerminal, Write};
use std::process;

use cli::{config_to_plan, parse_args, print_completion, Config, ParseOutcome, Plan};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use ports::inbound::UseCaseRunner;
use wiring::{wire_pillrem, App};

/// Plan を実行する Runner
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let plan = config_to_plan(&config)?;
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "cli", "lifecycle", "pillrem started")
                .field("command", config.command_name.clone().unwrap_or_else(|| "shell".to_string())),
        );
        match plan {
            Plan::Help => {
                print_help();
                Ok(0)
            }
            Plan::Shell => {
                let mut state = self.app.session_use_case.start();
                let stdin = io::stdin();
                let show_prompt = stdin.is_terminal();
                shell::run_shell(&self.app, &mut state, stdin.lock(), &mut io::stdout(), show_prompt)
            }
            Plan::Run(invocations) => {
                let mut state = self.app.session_use_case.start();
                let mut last = None;
                for inv in &invocations {
                    last = Some(
                        self.app
                            .dispatcher
                            .dispatch(&self.app, &mut state, inv.action, &inv.args)?,
                    );
                }
                if let Some(reply) = last {
                    let text = render::render(&reply);
                    let mut out = io::stdout();
                    out.write_all(text.as_bytes())?;
                    out.flush()?;
                }
                Ok(0)
            }
        }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("pillrem: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn print_usage() {
    eprintln!("Usage: pillrem [-h] [-y|--yes] [-d|--home-dir directory] [<command> [args...]]");
}

fn print_help() {
    println!("Usage: pillrem [-h] [-y|--yes] [-d|--home-dir directory] [<command> [args...]]");
    println!("  -h, --help            Display this help message.");
    println!("  -d, --home-dir        Keep data and logs under this directory (overrides PILLREM_HOME).");
    println!("  -y, --yes             Answer yes to delete confirmations.");
    println!("  --generate <shell>    Generate shell completion script (bash, zsh, fish).");
    println!("  <command>             Command to execute. Omit to start the interactive shell.");
    println!();
    println!("Environment:");
    println!("  PILLREM_HOME    Data under $PILLREM_HOME/data, logs under $PILLREM_HOME/state.");
    println!("                  Default: $XDG_DATA_HOME/pillrem and $XDG_STATE_HOME/pillrem");
    println!("                  (~/.local/share/pillrem, ~/.local/state/pillrem).");
    println!();
    println!("Commands:");
    println!("  today                              Show today's medications");
    println!("  add <slot> <name...> [-t HH:MM]    Add a medication to morning/afternoon/evening");
    println!("  status <slot> <id> <taken|missed>  Mark a medication as taken or missed");
    println!("  remove <slot> <id>                 Remove a medication from today");
    println!("  reconcile                          Re-sync today's records from today's medications");
    println!("  calendar [YYYY-MM]                 Show the month calendar");
    println!("  show <YYYY-MM-DD>                  Show records for a date");
    println!("  edit <YYYY-MM-DD> <id> [--name <text>] [--status <taken|missed>]");
    println!("  delete <YYYY-MM-DD> <id>           Delete a record");
    println!("  settings                           Show display settings");
    println!("  set <key> <value>                  Change a display setting");
    println!("  export [-o file]                   Export all records as CSV");
    println!("  shell                              Start the interactive shell (default)");
    println!();
    println!("Inside the shell (no subcommand) each line is one of:");
    print!("{}", render::help_text());
}

pub fn run() -> Result<i32, Error> {
    let outcome = parse_args()?;
    let config = match outcome {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    if config.help {
        print_help();
        return Ok(0);
    }
    let app = wire_pillrem(config.home_dir.as_deref(), config.assume_yes)?;
    let runner = Runner { app };
    runner.run(config)
}
