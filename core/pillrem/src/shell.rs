//! 対話シェル
//!
//! 1 行を 1 アクションとして実行する。セッション状態（表示月・選択日）は行をまたいで残る。
//! 失敗はその行だけの通知にとどめ、シェルは続ける。

use crate::cli::tokenize;
use crate::ports::outbound::Severity;
use crate::render::render;
use crate::usecase::SessionState;
use crate::wiring::App;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use std::io::{BufRead, Write};

const PROMPT: &str = "pillrem> ";

pub fn run_shell<R: BufRead, W: Write>(
    app: &App,
    state: &mut SessionState,
    input: R,
    output: &mut W,
    show_prompt: bool,
) -> Result<i32, Error> {
    let _ = app.logger.log(&LogRecord::new(LogLevel::Info, "cli", "lifecycle", "shell started"));
    if show_prompt {
        writeln!(output, "Type 'help' for commands, 'quit' to exit.")?;
    }
    let mut lines = input.lines();
    loop {
        if show_prompt {
            write!(output, "{}", PROMPT)?;
            output.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let tokens = match tokenize(&line?) {
            Ok(t) => t,
            Err(e) => {
                app.notifier.notify(&e.to_string(), Severity::Danger);
                continue;
            }
        };
        let Some((name, args)) = tokens.split_first() else {
            continue;
        };
        if matches!(name.as_str(), "quit" | "exit") {
            break;
        }
        match app.dispatcher.dispatch_named(app, state, name, args) {
            Ok(reply) => {
                let text = render(&reply);
                if !text.is_empty() {
                    write!(output, "{}", text)?;
                }
            }
            Err(e) => app.notifier.notify(&e.to_string(), Severity::Danger),
        }
    }
    if show_prompt {
        writeln!(output)?;
    }
    let _ = app.logger.log(&LogRecord::new(LogLevel::Info, "cli", "lifecycle", "shell finished"));
    Ok(0)
}
