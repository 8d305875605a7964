//! 表示設定（テーマ・文字サイズ・配色など）
//!
//! 永続形式は `pillReminderSettings` キーの JSON オブジェクト（camelCase）。
//! 文字サイズは数値・文字列どちらでも読み、12〜24 に丸める。

use common::error::Error;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

pub const MIN_FONT_SIZE: u8 = 12;
pub const MAX_FONT_SIZE: u8 = 24;
pub const DEFAULT_FONT_SIZE: u8 = 16;
pub const DEFAULT_PRIMARY_COLOR: &str = "#28a745";

const DARKEN_PERCENT: u32 = 15;
const LIGHTEN_PERCENT: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotificationSound {
    #[default]
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextToSpeech {
    #[default]
    Enabled,
    Disabled,
}

/// 設定キー（set コマンドで変更できるもの）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Theme,
    FontSize,
    NotificationSound,
    TextToSpeech,
    HighContrast,
    PrimaryColor,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        SettingKey::Theme,
        SettingKey::FontSize,
        SettingKey::NotificationSound,
        SettingKey::TextToSpeech,
        SettingKey::HighContrast,
        SettingKey::PrimaryColor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Theme => "theme",
            SettingKey::FontSize => "fontSize",
            SettingKey::NotificationSound => "notificationSound",
            SettingKey::TextToSpeech => "textToSpeech",
            SettingKey::HighContrast => "highContrast",
            SettingKey::PrimaryColor => "primaryColor",
        }
    }

    /// キー名を解析する（"fontSize" / "font-size" / "fontsize" を同一視）
    pub fn parse(s: &str) -> Result<Self, Error> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "theme" => Ok(SettingKey::Theme),
            "fontsize" => Ok(SettingKey::FontSize),
            "notificationsound" | "notification" => Ok(SettingKey::NotificationSound),
            "texttospeech" | "tts" => Ok(SettingKey::TextToSpeech),
            "highcontrast" => Ok(SettingKey::HighContrast),
            "primarycolor" | "color" => Ok(SettingKey::PrimaryColor),
            _ => Err(Error::validation(format!(
                "Unknown setting '{}' (expected one of: {})",
                s.trim(),
                SettingKey::ALL.map(|k| k.as_str()).join(", ")
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_font_size", deserialize_with = "lenient_font_size")]
    pub font_size: u8,
    #[serde(default)]
    pub notification_sound: NotificationSound,
    #[serde(default)]
    pub text_to_speech: TextToSpeech,
    #[serde(default)]
    pub high_contrast: bool,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_primary_dark")]
    pub primary_dark: String,
    #[serde(default = "default_light_color")]
    pub light_color: String,
    #[serde(default = "default_true")]
    pub vibration: bool,
    #[serde(default)]
    pub reminder_advanced: bool,
}

fn default_font_size() -> u8 {
    DEFAULT_FONT_SIZE
}

fn default_primary_color() -> String {
    DEFAULT_PRIMARY_COLOR.to_string()
}

fn default_primary_dark() -> String {
    darken_color(DEFAULT_PRIMARY_COLOR, DARKEN_PERCENT).unwrap_or_else(default_primary_color)
}

fn default_light_color() -> String {
    lighten_color(DEFAULT_PRIMARY_COLOR, LIGHTEN_PERCENT).unwrap_or_else(default_primary_color)
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: DEFAULT_FONT_SIZE,
            notification_sound: NotificationSound::default(),
            text_to_speech: TextToSpeech::default(),
            high_contrast: false,
            primary_color: default_primary_color(),
            primary_dark: default_primary_dark(),
            light_color: default_light_color(),
            vibration: true,
            reminder_advanced: false,
        }
    }
}

impl Settings {
    /// 読み込み後の正規化（文字サイズの丸め・不正な色の差し戻し）
    pub fn normalized(mut self) -> Self {
        self.font_size = clamp_font_size(i64::from(self.font_size));
        if !is_valid_color(&self.primary_color) {
            self.primary_color = default_primary_color();
        }
        self.refresh_derived_colors();
        self
    }

    /// 1 項目を更新する。値が不正なら ValidationError で、設定は変わらない。
    pub fn apply(&mut self, key: SettingKey, value: &str) -> Result<(), Error> {
        let v = value.trim();
        match key {
            SettingKey::Theme => {
                self.theme = match v.to_ascii_lowercase().as_str() {
                    "light" => Theme::Light,
                    "dark" => Theme::Dark,
                    _ => return Err(invalid_value(key, v, "Light or Dark")),
                }
            }
            SettingKey::FontSize => {
                let n: i64 = v
                    .parse()
                    .map_err(|_| invalid_value(key, v, "a number between 12 and 24"))?;
                self.font_size = clamp_font_size(n);
            }
            SettingKey::NotificationSound => {
                self.notification_sound = match v.to_ascii_lowercase().as_str() {
                    "on" => NotificationSound::On,
                    "off" => NotificationSound::Off,
                    _ => return Err(invalid_value(key, v, "On or Off")),
                }
            }
            SettingKey::TextToSpeech => {
                self.text_to_speech = match v.to_ascii_lowercase().as_str() {
                    "enabled" => TextToSpeech::Enabled,
                    "disabled" => TextToSpeech::Disabled,
                    _ => return Err(invalid_value(key, v, "Enabled or Disabled")),
                }
            }
            SettingKey::HighContrast => {
                self.high_contrast = match v.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(invalid_value(key, v, "true or false")),
                }
            }
            SettingKey::PrimaryColor => {
                if !is_valid_color(v) {
                    return Err(invalid_value(key, v, "a hex color like #28a745"));
                }
                self.primary_color = v.to_ascii_lowercase();
                self.refresh_derived_colors();
            }
        }
        Ok(())
    }

    fn refresh_derived_colors(&mut self) {
        if let Some(dark) = darken_color(&self.primary_color, DARKEN_PERCENT) {
            self.primary_dark = dark;
        }
        if let Some(light) = lighten_color(&self.primary_color, LIGHTEN_PERCENT) {
            self.light_color = light;
        }
    }
}

fn invalid_value(key: SettingKey, value: &str, expected: &str) -> Error {
    Error::validation(format!(
        "Invalid value '{}' for {} (expected {})",
        value,
        key.as_str(),
        expected
    ))
}

pub fn clamp_font_size(n: i64) -> u8 {
    n.clamp(i64::from(MIN_FONT_SIZE), i64::from(MAX_FONT_SIZE)) as u8
}

fn lenient_font_size<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let n = match raw {
        serde_json::Value::Number(n) => n.as_f64().map(|f| f as i64),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(n.map(clamp_font_size).unwrap_or(DEFAULT_FONT_SIZE))
}

fn color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("color regex is valid")
    })
}

/// "#rrggbb" / "#rgb" 形式か
pub fn is_valid_color(color: &str) -> bool {
    color_regex().is_match(color)
}

fn parse_rgb(color: &str) -> Option<(i32, i32, i32)> {
    if !is_valid_color(color) {
        return None;
    }
    let hex = &color[1..];
    let full: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };
    let num = i32::from_str_radix(&full, 16).ok()?;
    Some(((num >> 16) & 0xff, (num >> 8) & 0xff, num & 0xff))
}

fn shift_color(color: &str, percent: u32, sign: i32) -> Option<String> {
    let (r, g, b) = parse_rgb(color)?;
    let amt = (2.55 * f64::from(percent)).round() as i32 * sign;
    let ch = |v: i32| (v + amt).clamp(0, 255);
    Some(format!("#{:02x}{:02x}{:02x}", ch(r), ch(g), ch(b)))
}

/// 各チャンネルから 2.55 * percent を引いた色
pub fn darken_color(color: &str, percent: u32) -> Option<String> {
    shift_color(color, percent, -1)
}

/// 各チャンネルに 2.55 * percent を足した色
pub fn lighten_color(color: &str, percent: u32) -> Option<String> {
    shift_color(color, percent, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.theme, Theme::Light);
        assert_eq!(s.font_size, 16);
        assert_eq!(s.primary_color, "#28a745");
        assert_eq!(s.primary_dark, "#02811f");
        assert_eq!(s.light_color, "#ffffff");
        assert!(s.vibration);
    }

    #[test]
    fn test_color_validation() {
        assert!(is_valid_color("#28a745"));
        assert!(is_valid_color("#ABC"));
        assert!(!is_valid_color("28a745"));
        assert!(!is_valid_color("#28a74"));
        assert!(!is_valid_color("#gggggg"));
    }

    #[test]
    fn test_short_color_expanded_before_shift() {
        assert_eq!(darken_color("#fff", 15).unwrap(), "#d9d9d9");
        assert_eq!(lighten_color("#000", 15).unwrap(), "#262626");
    }

    #[test]
    fn test_font_size_clamped_from_string_or_number() {
        let s: Settings = serde_json::from_str(r#"{"fontSize":"30"}"#).unwrap();
        assert_eq!(s.font_size, 24);
        let s: Settings = serde_json::from_str(r#"{"fontSize":8}"#).unwrap();
        assert_eq!(s.font_size, 12);
        let s: Settings = serde_json::from_str(r#"{"fontSize":"big"}"#).unwrap();
        assert_eq!(s.font_size, 16);
    }

    #[test]
    fn test_apply_rejects_bad_values_without_change() {
        let mut s = Settings::default();
        assert!(s.apply(SettingKey::PrimaryColor, "red").is_err());
        assert_eq!(s.primary_color, "#28a745");
        assert!(s.apply(SettingKey::Theme, "Sepia").is_err());
        assert_eq!(s.theme, Theme::Light);
    }

    #[test]
    fn test_apply_updates_and_derives() {
        let mut s = Settings::default();
        s.apply(SettingKey::Theme, "dark").unwrap();
        s.apply(SettingKey::FontSize, "40").unwrap();
        s.apply(SettingKey::PrimaryColor, "#FFFFFF").unwrap();
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(s.font_size, 24);
        assert_eq!(s.primary_color, "#ffffff");
        assert_eq!(s.primary_dark, "#d9d9d9");
    }

    #[test]
    fn test_setting_key_aliases() {
        assert_eq!(SettingKey::parse("font-size").unwrap(), SettingKey::FontSize);
        assert_eq!(SettingKey::parse("tts").unwrap(), SettingKey::TextToSpeech);
        assert!(SettingKey::parse("volume").is_err());
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"fontSize\":16"));
        assert!(json.contains("\"theme\":\"Light\""));
        assert!(json.contains("\"textToSpeech\":\"Enabled\""));
    }
}
