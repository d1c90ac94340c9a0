use serde::{Deserialize, Serialize};

use crate::core::kind::ResourceKind;

/// Environment variable selecting the reply language.
pub const LANG_ENV: &str = "BOBO_LANG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    #[default]
    English,
    Japanese,
}

impl Lang {
    /// Anything other than "ja" falls back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "ja" | "ja_jp" | "ja-jp" | "japanese" => Self::Japanese,
            _ => Self::English,
        }
    }

    pub fn is_known_code(code: &str) -> bool {
        matches!(
            code.trim().to_lowercase().as_str(),
            "en" | "english" | "ja" | "ja_jp" | "ja-jp" | "japanese"
        )
    }

    pub fn from_env() -> Option<Self> {
        std::env::var(LANG_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| Self::from_code(&v))
    }
}

/// User-facing sentences with their translations.
#[derive(Debug, Clone, Copy)]
pub enum Message<'a> {
    GettingStats { kind: ResourceKind, query: &'a str },
    NoMatch { kind: ResourceKind, query: &'a str },
    GettingCosts { date: &'a str },
    InvalidDate { text: &'a str },
    InvalidChartEndpoint { url: &'a str },
    CostHeader { date: &'a str },
    ChartTitle { kind: ResourceKind, name: &'a str },
}

impl Message<'_> {
    pub fn render(&self, lang: Lang) -> String {
        match (self, lang) {
            (Self::GettingStats { kind, query }, Lang::English) => {
                format!("Getting {} stats of [{}] ...", kind.command(), query)
            }
            (Self::GettingStats { kind, query }, Lang::Japanese) => {
                format!("[{}] の {} 情報を取得中...", query, kind.command())
            }
            (Self::NoMatch { kind, query }, Lang::English) => {
                let noun = match kind {
                    ResourceKind::Queue => "queues",
                    ResourceKind::Table => "tables",
                };
                format!("[{}] does not match any {}.", query, noun)
            }
            (Self::NoMatch { kind, query }, Lang::Japanese) => {
                let noun = match kind {
                    ResourceKind::Queue => "キュー",
                    ResourceKind::Table => "テーブル",
                };
                format!("[{}] に一致する{}はありません。", query, noun)
            }
            (Self::GettingCosts { date }, Lang::English) => {
                format!("Getting costs on [{}]...", date)
            }
            (Self::GettingCosts { date }, Lang::Japanese) => {
                format!("[{}] のコストを取得中...", date)
            }
            (Self::InvalidDate { text }, Lang::English) => {
                format!("Invalid date format: [{}]", text)
            }
            (Self::InvalidDate { text }, Lang::Japanese) => {
                format!("日付の指定が不正です: [{}]", text)
            }
            (Self::InvalidChartEndpoint { url }, Lang::English) => {
                format!("Invalid chart endpoint. It must begin with [http/https]: [{}]", url)
            }
            (Self::InvalidChartEndpoint { url }, Lang::Japanese) => {
                format!("[http/https] で始まるチャートURLを指定してください: [{}]", url)
            }
            (Self::CostHeader { date }, Lang::English) => format!("[AWS Estimate Costs] {}", date),
            (Self::CostHeader { date }, Lang::Japanese) => format!("[AWS概算コスト] {}", date),
            (Self::ChartTitle { kind, name }, Lang::English) => {
                format!("{} Metrics (Maximum): {}", kind.profile().chart_label, name)
            }
            (Self::ChartTitle { kind, name }, Lang::Japanese) => {
                format!("{} メトリクス (Maximum): {}", kind.profile().chart_label, name)
            }
        }
    }
}

/// Integer with `,` thousands separators: `1234567` -> `"1,234,567"`.
pub fn comma_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
