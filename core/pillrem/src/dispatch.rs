//! アクション → ハンドラのディスパッチテーブル
//!
//! CLI・シェルはどちらも (ActionId, 引数列) をここに渡す。ハンドラは結果を Reply で返し、
//! 表示は render が受け持つ。

use crate::domain::dates::{parse_date_key, parse_year_month};
use crate::domain::{ActionId, ClockTime, IntakeStatus, Settings, TimeOfDay};
use crate::usecase::{
    DayListing, EditOutcome, ExportOutcome, MonthGrid, ReconcileSummary, SessionState, TodayView,
};
use crate::wiring::App;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use std::collections::HashMap;
use std::path::Path;

/// ハンドラの戻り値（表示用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Today(TodayView),
    Reconciled(ReconcileSummary),
    Month(MonthGrid),
    Day(DayListing),
    Edited(EditOutcome, DayListing),
    Settings(Settings),
    Export(ExportOutcome),
    /// 確認で取りやめた
    Cancelled,
    Help,
}

pub type Handler = fn(&App, &mut SessionState, &[String]) -> Result<Reply, Error>;

pub struct Dispatcher {
    handlers: HashMap<ActionId, Handler>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// 全アクションを登録済みのテーブル
    pub fn new() -> Self {
        let mut d = Self::empty();
        d.register(ActionId::Today, handle_today);
        d.register(ActionId::Add, handle_add);
        d.register(ActionId::Status, handle_status);
        d.register(ActionId::Remove, handle_remove);
        d.register(ActionId::Reconcile, handle_reconcile);
        d.register(ActionId::Calendar, handle_calendar);
        d.register(ActionId::NextMonth, handle_next_month);
        d.register(ActionId::PrevMonth, handle_prev_month);
        d.register(ActionId::Select, handle_select);
        d.register(ActionId::Edit, handle_edit);
        d.register(ActionId::Delete, handle_delete);
        d.register(ActionId::Settings, handle_settings);
        d.register(ActionId::Set, handle_set);
        d.register(ActionId::Export, handle_export);
        d.register(ActionId::Help, handle_help);
        d
    }

    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, action: ActionId, handler: Handler) {
        self.handlers.insert(action, handler);
    }

    pub fn dispatch(
        &self,
        app: &App,
        state: &mut SessionState,
        action: ActionId,
        args: &[String],
    ) -> Result<Reply, Error> {
        let handler = self.handlers.get(&action).ok_or_else(|| {
            Error::invalid_argument(format!("Action '{}' is not available.", action.as_str()))
        })?;
        let result = handler(app, state, args);
        let level = match (&result, action.is_mutation()) {
            (Err(_), _) => LogLevel::Warn,
            (Ok(_), true) => LogLevel::Info,
            (Ok(_), false) => LogLevel::Debug,
        };
        let mut rec = LogRecord::new(level, "cli", "dispatch", "action dispatched")
            .field("action", action.as_str())
            .field("args", args.len());
        if let Err(e) = &result {
            rec = rec.field("error", e.to_string());
        }
        let _ = app.logger.log(&rec);
        result
    }

    /// 名前で引く（シェル入力用）
    pub fn dispatch_named(
        &self,
        app: &App,
        state: &mut SessionState,
        name: &str,
        args: &[String],
    ) -> Result<Reply, Error> {
        let action = ActionId::parse(name).ok_or_else(|| {
            Error::invalid_argument(format!("Unknown command '{}'. Type 'help' for a list.", name))
        })?;
        self.dispatch(app, state, action, args)
    }
}

fn expect_args(action: ActionId, args: &[String], min: usize, max: usize) -> Result<(), Error> {
    if args.len() < min || args.len() > max {
        return Err(Error::invalid_argument(format!("usage: {}", action.usage())));
    }
    Ok(())
}

fn parse_id(s: &str) -> Result<i64, Error> {
    s.trim()
        .parse()
        .map_err(|_| Error::invalid_argument(format!("Invalid id '{}'", s)))
}

fn parse_status(s: &str) -> Result<IntakeStatus, Error> {
    IntakeStatus::parse(s)
        .ok_or_else(|| Error::validation(format!("Invalid status '{}' (use taken or missed)", s.trim())))
}

/// "key=value" を分ける
fn split_assignment(arg: &str) -> Option<(&str, &str)> {
    let (k, v) = arg.split_once('=')?;
    Some((k.trim(), v))
}

fn handle_today(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::Today, args, 0, 0)?;
    Ok(Reply::Today(app.entry_use_case.today(&state.store)))
}

/// add <slot> <name...> [HH:MM]
fn handle_add(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::Add, args, 2, usize::MAX)?;
    let slot = TimeOfDay::parse(&args[0])?;
    let mut name_parts = &args[1..];
    let mut time = None;
    if name_parts.len() > 1 {
        if let Some((last, rest)) = name_parts.split_last() {
            if let Ok(t) = ClockTime::parse(last) {
                time = Some(t);
                name_parts = rest;
            }
        }
    }
    let name = name_parts.join(" ");
    app.entry_use_case.add(&mut state.store, slot, &name, time)?;
    Ok(Reply::Today(app.entry_use_case.today(&state.store)))
}

fn handle_status(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::Status, args, 3, 3)?;
    let slot = TimeOfDay::parse(&args[0])?;
    let id = parse_id(&args[1])?;
    let status = parse_status(&args[2])?;
    app.entry_use_case.set_status(&mut state.store, slot, id, status)?;
    Ok(Reply::Today(app.entry_use_case.today(&state.store)))
}

fn handle_remove(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::Remove, args, 2, 2)?;
    let slot = TimeOfDay::parse(&args[0])?;
    let id = parse_id(&args[1])?;
    match app.entry_use_case.remove(&mut state.store, slot, id)? {
        Some(_) => Ok(Reply::Today(app.entry_use_case.today(&state.store))),
        None => Ok(Reply::Cancelled),
    }
}

fn handle_reconcile(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::Reconcile, args, 0, 0)?;
    Ok(Reply::Reconciled(
        app.reconcile_use_case.reconcile_today(&mut state.store),
    ))
}

fn handle_calendar(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::Calendar, args, 0, 1)?;
    match args.first() {
        Some(ym) => {
            let (year, month) = parse_year_month(ym)?;
            Ok(Reply::Month(app.calendar_use_case.show(state, year, month)?))
        }
        None => Ok(Reply::Month(app.calendar_use_case.current(state))),
    }
}

fn handle_next_month(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::NextMonth, args, 0, 0)?;
    Ok(Reply::Month(app.calendar_use_case.change_month(state, 1)))
}

fn handle_prev_month(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::PrevMonth, args, 0, 0)?;
    Ok(Reply::Month(app.calendar_use_case.change_month(state, -1)))
}

fn handle_select(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::Select, args, 1, 1)?;
    let date = parse_date_key(&args[0])?;
    Ok(Reply::Day(app.records_use_case.select_date(state, date)))
}

/// edit <id> [name=<text>] [status=<taken|missed>]
fn handle_edit(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::Edit, args, 2, 3)?;
    let id = parse_id(&args[0])?;
    let mut name = None;
    let mut status = None;
    for arg in &args[1..] {
        match split_assignment(arg) {
            Some(("name", v)) => name = Some(v),
            Some(("status", v)) => status = Some(v),
            _ => {
                return Err(Error::invalid_argument(format!(
                    "Unexpected '{}'. usage: {}",
                    arg,
                    ActionId::Edit.usage()
                )))
            }
        }
    }
    let outcome = app.records_use_case.edit(state, id, name, status)?;
    let listing = app.records_use_case.listing(&state.store, state.active_date);
    Ok(Reply::Edited(outcome, listing))
}

fn handle_delete(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::Delete, args, 1, 1)?;
    let id = parse_id(&args[0])?;
    match app.records_use_case.delete(state, id)? {
        Some(_) => Ok(Reply::Day(
            app.records_use_case.listing(&state.store, state.active_date),
        )),
        None => Ok(Reply::Cancelled),
    }
}

fn handle_settings(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::Settings, args, 0, 0)?;
    Ok(Reply::Settings(app.settings_use_case.show(&state.store)))
}

/// set <key> <value> または set <key>=<value>
fn handle_set(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    let usage = || Error::invalid_argument(format!("usage: {}", ActionId::Set.usage()));
    let (key, value) = match args {
        [k, v] => (k.as_str(), v.as_str()),
        [kv] => split_assignment(kv).ok_or_else(usage)?,
        _ => return Err(usage()),
    };
    Ok(Reply::Settings(
        app.settings_use_case.set(&mut state.store, key, value)?,
    ))
}

fn handle_export(app: &App, state: &mut SessionState, args: &[String]) -> Result<Reply, Error> {
    expect_args(ActionId::Export, args, 0, 1)?;
    let output = args.first().map(Path::new);
    Ok(Reply::Export(
        app.export_use_case.export(&state.store, output)?,
    ))
}

fn handle_help(_app: &App, _state: &mut SessionState, _args: &[String]) -> Result<Reply, Error> {
    Ok(Reply::Help)
}
