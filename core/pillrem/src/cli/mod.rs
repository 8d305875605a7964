//! CLI 境界: コマンドライン解析・シェル入力の分割

mod args;
mod tokenize;

pub use args::{config_to_plan, parse_args, print_completion, Config, Invocation, ParseOutcome, Plan};
pub use tokenize::tokenize;
