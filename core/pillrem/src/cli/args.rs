use crate::domain::ActionId;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;
use std::ffi::OsString;

/// CLI から受け取った生の設定（command は文字列のまま保持）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    pub home_dir: Option<String>,
    /// 削除の確認に常に yes と答える
    pub assume_yes: bool,
    /// コマンド名（None の場合は Shell）
    pub command_name: Option<String>,
    pub command_args: Vec<String>,
}

/// 解析結果: 通常の Config または補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

/// ディスパッチ 1 回分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub action: ActionId,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(action: ActionId, args: Vec<String>) -> Self {
        Self { action, args }
    }
}

/// Config から決まる実行内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Help,
    Shell,
    /// 順に実行し、最後の結果を表示する
    Run(Vec<Invocation>),
}

fn global_args(cmd: clap::Command) -> clap::Command {
    cmd.disable_help_flag(true)
        .disable_help_subcommand(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Print help")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("home-dir")
                .short('d')
                .long("home-dir")
                .value_name("directory")
                .help("Keep data and logs under this directory (overrides PILLREM_HOME)")
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Answer yes to delete confirmations")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn slot_arg() -> clap::Arg {
    clap::Arg::new("slot")
        .required(true)
        .value_name("slot")
        .help("morning, afternoon or evening")
}

fn id_arg() -> clap::Arg {
    clap::Arg::new("id").required(true).value_name("id")
}

fn date_arg() -> clap::Arg {
    clap::Arg::new("date").required(true).value_name("YYYY-MM-DD")
}

/// サブコマンド（-h は全体のフラグに任せる）
fn sub(name: &'static str) -> clap::Command {
    clap::Command::new(name).disable_help_flag(true)
}

fn build_clap_command() -> clap::Command {
    global_args(
        clap::Command::new("pillrem")
            .about("Medication reminder: daily intake log, record history and calendar")
            .subcommand_required(false)
            .subcommand(sub("shell").about("Start the interactive shell (default)"))
            .subcommand(sub("help").about("Display this help message"))
            .subcommand(sub("today").about("Show today's medications"))
            .subcommand(
                sub("add")
                    .about("Add a medication to today's morning/afternoon/evening list")
                    .arg(slot_arg())
                    .arg(clap::Arg::new("name").required(true).num_args(1..).value_name("name"))
                    .arg(
                        clap::Arg::new("time")
                            .short('t')
                            .long("time")
                            .value_name("HH:MM")
                            .num_args(1),
                    ),
            )
            .subcommand(
                sub("status")
                    .about("Mark today's medication as taken or missed")
                    .arg(slot_arg())
                    .arg(id_arg())
                    .arg(clap::Arg::new("status").required(true).value_name("taken|missed")),
            )
            .subcommand(
                sub("remove")
                    .about("Remove a medication from today")
                    .arg(slot_arg())
                    .arg(id_arg()),
            )
            .subcommand(sub("reconcile").about("Re-sync today's records from today's medications"))
            .subcommand(
                sub("calendar")
                    .about("Show the month calendar")
                    .arg(clap::Arg::new("month").value_name("YYYY-MM")),
            )
            .subcommand(
                sub("show")
                    .about("Show records for a date")
                    .arg(date_arg()),
            )
            .subcommand(
                sub("edit")
                    .about("Edit a record")
                    .arg(date_arg())
                    .arg(id_arg())
                    .arg(clap::Arg::new("name").long("name").value_name("text").num_args(1))
                    .arg(
                        clap::Arg::new("status")
                            .long("status")
                            .value_name("taken|missed")
                            .num_args(1),
                    ),
            )
            .subcommand(
                sub("delete")
                    .about("Delete a record")
                    .arg(date_arg())
                    .arg(id_arg()),
            )
            .subcommand(sub("settings").about("Show display settings"))
            .subcommand(
                sub("set")
                    .about("Change a display setting")
                    .arg(clap::Arg::new("key").required(true).value_name("key"))
                    .arg(clap::Arg::new("value").required(true).value_name("value")),
            )
            .subcommand(
                sub("export")
                    .about("Export all records as CSV")
                    .arg(
                        clap::Arg::new("output")
                            .short('o')
                            .long("output")
                            .value_name("file")
                            .num_args(1),
                    ),
            ),
    )
}

fn strings(m: &clap::ArgMatches, ids: &[&str]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| m.get_one::<String>(id).cloned())
        .collect()
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let help = matches.get_flag("help") || matches.subcommand_matches("help").is_some();
    let home_dir = matches.get_one::<String>("home-dir").cloned();
    let assume_yes = matches.get_flag("yes");

    let (command_name, command_args) = match matches.subcommand() {
        None | Some(("help", _)) | Some(("shell", _)) => (None, Vec::new()),
        Some(("add", m)) => {
            let name = m
                .get_many::<String>("name")
                .map(|i| i.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            let mut args = strings(m, &["slot"]);
            args.push(name);
            args.extend(strings(m, &["time"]));
            (Some("add".to_string()), args)
        }
        Some(("status", m)) => (Some("status".to_string()), strings(m, &["slot", "id", "status"])),
        Some(("remove", m)) => (Some("remove".to_string()), strings(m, &["slot", "id"])),
        Some(("calendar", m)) => (Some("calendar".to_string()), strings(m, &["month"])),
        Some(("show", m)) => (Some("show".to_string()), strings(m, &["date"])),
        Some(("edit", m)) => {
            let mut args = strings(m, &["date", "id"]);
            if let Some(name) = m.get_one::<String>("name") {
                args.push(format!("name={}", name));
            }
            if let Some(status) = m.get_one::<String>("status") {
                args.push(format!("status={}", status));
            }
            (Some("edit".to_string()), args)
        }
        Some(("delete", m)) => (Some("delete".to_string()), strings(m, &["date", "id"])),
        Some(("set", m)) => (Some("set".to_string()), strings(m, &["key", "value"])),
        Some(("export", m)) => (Some("export".to_string()), strings(m, &["output"])),
        Some((name, _)) => (Some(name.to_string()), vec![]),
    };

    Config {
        help,
        home_dir,
        assume_yes,
        command_name,
        command_args,
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_args_from(std::env::args_os())
}

pub fn parse_args_from<I, T>(args: I) -> Result<ParseOutcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "pillrem", &mut std::io::stdout());
}

/// Config を実行内容に変換する。
/// edit / delete は対象日付の選択を先に行う。
pub fn config_to_plan(config: &Config) -> Result<Plan, Error> {
    if config.help {
        return Ok(Plan::Help);
    }
    let Some(name) = config.command_name.as_deref() else {
        return Ok(Plan::Shell);
    };
    let action = ActionId::parse(name)
        .ok_or_else(|| Error::invalid_argument(format!("Command '{}' is not implemented.", name)))?;
    let args = config.command_args.clone();

    match (action, args.split_first()) {
        (ActionId::Edit | ActionId::Delete, Some((date, rest))) => Ok(Plan::Run(vec![
            Invocation::new(ActionId::Select, vec![date.clone()]),
            Invocation::new(action, rest.to_vec()),
        ])),
        _ => Ok(Plan::Run(vec![Invocation::new(action, args)])),
    }
}
