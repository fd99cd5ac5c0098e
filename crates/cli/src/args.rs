// crates/cli/src/args.rs
use std::ffi::OsString;

use clap::{ArgAction, Parser, ValueHint};

use crate::options::{ModeArg, OutputFormat, SortOrder};

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version = crate::VERSION,
    about = "行数/単語数/バイト数の集計と重複行の検出",
    long_about = "入力元（ファイルまたは標準入力）を先頭から順に読み、行数・単語数・バイト数を数えるか、\n\
                  2回以上現れた行を最後に出現した入力元とともに表示します。\n\
                  入力元を省略した場合、または `-` を指定した場合は標準入力を読みます。",
    group(
        clap::ArgGroup::new("mode_select")
            .args(["mode", "lines", "words", "bytes", "dup"])
            .multiple(false)
    )
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// 入力元（省略時は標準入力）
    #[arg(value_hint = ValueHint::FilePath)]
    pub sources: Vec<OsString>,

    /// 集計モード
    #[arg(short, long, value_enum, help_heading = "モード")]
    pub mode: Option<ModeArg>,

    /// 行数を数える（--mode lines と同じ）
    #[arg(short = 'l', long, help_heading = "モード")]
    pub lines: bool,

    /// 単語数を数える（--mode words と同じ）
    #[arg(short = 'w', long, help_heading = "モード")]
    pub words: bool,

    /// バイト数を数える（--mode bytes と同じ）
    #[arg(short = 'c', long, help_heading = "モード")]
    pub bytes: bool,

    /// 重複行を表示する（--mode dup と同じ）
    #[arg(short = 'd', long, help_heading = "モード")]
    pub dup: bool,

    /// 出力フォーマット
    #[arg(long, value_enum, default_value = "text", help_heading = "出力")]
    pub format: OutputFormat,

    /// 重複行の並び順
    #[arg(long, value_enum, default_value = "none", help_heading = "出力")]
    pub sort: SortOrder,

    /// 入力元ごとの件数も表示（集計モードのみ）
    #[arg(long, help_heading = "出力")]
    pub per_source: bool,

    /// 読み込みバッファサイズ（バイト）
    #[arg(long, value_name = "BYTES", help_heading = "動作")]
    pub buffer_size: Option<usize>,

    /// 行・バイト集計でもトークン単位で処理する（高速経路を無効化）
    #[arg(long, help_heading = "動作")]
    pub no_fast_count: bool,

    /// ログを詳細化（-v, -vv, -vvv）
    #[arg(short, long, action = ArgAction::Count, help_heading = "動作")]
    pub verbose: u8,

    /// 入力元ごとのエラー表示を抑制
    #[arg(short, long, help_heading = "動作")]
    pub quiet: bool,
}

impl Args {
    /// Mode selected by `--mode` or one of the shorthand flags.
    #[must_use]
    pub fn mode(&self) -> ModeArg {
        if let Some(mode) = self.mode {
            return mode;
        }
        if self.words {
            ModeArg::Words
        } else if self.bytes {
            ModeArg::Bytes
        } else if self.dup {
            ModeArg::Dup
        } else {
            ModeArg::Lines
        }
    }
}
