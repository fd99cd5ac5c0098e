use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 集計モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum ModeArg {
    /// 行数を数える
    #[default]
    Lines,
    /// 単語数を数える（空白区切り）
    Words,
    /// バイト数を数える
    Bytes,
    /// 重複行と最後に出現した入力元を表示
    Dup,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 重複行の並び順
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum SortOrder {
    /// 集計順（不定）
    #[default]
    None,
    /// 出現回数の降順、同数は行内容の昇順
    Count,
    /// 行内容の昇順
    Line,
}
