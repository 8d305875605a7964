//! アクション識別子（ディスパッチテーブルのキー）
//!
//! CLI のサブコマンド・シェルの入力行はどちらもこの識別子と引数列に落とし、
//! `Dispatcher` が対応するハンドラを呼ぶ。

/// 利用者が起こせる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    /// 今日の服用予定を表示
    Today,
    /// 服用予定を追加（add <slot> <name> [HH:MM]）
    Add,
    /// 服用状態を設定（status <slot> <id> <taken|missed>）
    Status,
    /// 服用予定を削除（remove <slot> <id>）
    Remove,
    /// 今日の homepage レコードを同期し直す
    Reconcile,
    /// 月カレンダーを表示（calendar [YYYY-MM]）
    Calendar,
    NextMonth,
    PrevMonth,
    /// 日付を選択してレコード一覧を表示（select <YYYY-MM-DD>）
    Select,
    /// 選択中の日付のレコードを編集（edit <id> [name=..] [status=..]）
    Edit,
    /// 選択中の日付のレコードを削除（delete <id>）
    Delete,
    /// 設定を表示
    Settings,
    /// 設定を変更（set <key> <value>）
    Set,
    /// 全レコードを CSV で出力（export [path]）
    Export,
    Help,
}

impl ActionId {
    pub const ALL: [ActionId; 15] = [
        ActionId::Today,
        ActionId::Add,
        ActionId::Status,
        ActionId::Remove,
        ActionId::Reconcile,
        ActionId::Calendar,
        ActionId::NextMonth,
        ActionId::PrevMonth,
        ActionId::Select,
        ActionId::Edit,
        ActionId::Delete,
        ActionId::Settings,
        ActionId::Set,
        ActionId::Export,
        ActionId::Help,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::Today => "today",
            ActionId::Add => "add",
            ActionId::Status => "status",
            ActionId::Remove => "remove",
            ActionId::Reconcile => "reconcile",
            ActionId::Calendar => "calendar",
            ActionId::NextMonth => "next-month",
            ActionId::PrevMonth => "prev-month",
            ActionId::Select => "select",
            ActionId::Edit => "edit",
            ActionId::Delete => "delete",
            ActionId::Settings => "settings",
            ActionId::Set => "set",
            ActionId::Export => "export",
            ActionId::Help => "help",
        }
    }

    /// 使い方の 1 行
    pub fn usage(&self) -> &'static str {
        match self {
            ActionId::Today => "today                              Show today's medications",
            ActionId::Add => "add <slot> <name> [HH:MM]          Add a medication to morning/afternoon/evening",
            ActionId::Status => "status <slot> <id> <taken|missed>  Mark a medication as taken or missed",
            ActionId::Remove => "remove <slot> <id>                 Remove a medication from today",
            ActionId::Reconcile => "reconcile                          Re-sync today's records from today's medications",
            ActionId::Calendar => "calendar [YYYY-MM]                 Show the month calendar",
            ActionId::NextMonth => "next-month                         Move the calendar one month forward",
            ActionId::PrevMonth => "prev-month                         Move the calendar one month back",
            ActionId::Select => "select <YYYY-MM-DD>                Show records for a date",
            ActionId::Edit => "edit <id> [name=<text>] [status=<taken|missed>]  Edit a record of the selected date",
            ActionId::Delete => "delete <id>                        Delete a record of the selected date",
            ActionId::Settings => "settings                           Show display settings",
            ActionId::Set => "set <key> <value>                  Change a display setting (quote values starting with #)",
            ActionId::Export => "export [path]                      Export all records as CSV",
            ActionId::Help => "help                               Show this list",
        }
    }

    /// 文字列から解析する（別名: next / prev / show / rm / del）
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "next" => return Some(ActionId::NextMonth),
            "prev" => return Some(ActionId::PrevMonth),
            "show" => return Some(ActionId::Select),
            "rm" => return Some(ActionId::Remove),
            "del" => return Some(ActionId::Delete),
            _ => {}
        }
        ActionId::ALL.into_iter().find(|a| a.as_str() == s)
    }

    /// 状態を変更するアクションか（ログの kind 判定に使う）
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ActionId::Add
                | ActionId::Status
                | ActionId::Remove
                | ActionId::Reconcile
                | ActionId::Edit
                | ActionId::Delete
                | ActionId::Set
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_action_by_name() {
        for a in ActionId::ALL {
            assert_eq!(ActionId::parse(a.as_str()), Some(a));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(ActionId::parse("next"), Some(ActionId::NextMonth));
        assert_eq!(ActionId::parse("prev"), Some(ActionId::PrevMonth));
        assert_eq!(ActionId::parse("show"), Some(ActionId::Select));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(ActionId::parse("fly"), None);
        assert_eq!(ActionId::parse(""), None);
    }

    #[test]
    fn test_is_mutation() {
        assert!(ActionId::Delete.is_mutation());
        assert!(!ActionId::Calendar.is_mutation());
    }
}
