use clap::{Parser, Subcommand, ValueEnum};
use mead_common::format::RegionTypeFilter;

#[derive(Parser)]
#[command(name = "mead")]
#[command(about = "MeAd - 医療条件・地域データ閲覧ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 医療条件（conditions API）を閲覧
    Conditions {
        #[command(subcommand)]
        command: ConditionsCommand,
    },

    /// 地域（geography API）を閲覧
    Regions {
        #[command(subcommand)]
        command: RegionsCommand,
    },

    /// ベースURL設定の表示・変更
    Config {
        /// conditions APIのベースURLを設定
        #[arg(long)]
        set_conditions_url: Option<String>,

        /// geography APIのベースURLを設定
        #[arg(long)]
        set_geography_url: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConditionsCommand {
    /// 一覧を検索・ページ表示
    List {
        /// 検索語（名前またはidの部分一致）
        #[arg(short, long, default_value = "")]
        search: String,

        /// ページ番号
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// 1ページの件数
        #[arg(long, default_value = "8")]
        page_size: usize,
    },

    /// 1件の詳細を表示
    Show {
        /// 条件のid
        #[arg(required = true)]
        id: String,
    },
}

#[derive(Subcommand)]
pub enum RegionsCommand {
    /// 一覧を検索・ページ表示
    List {
        /// 検索語（名前またはidの部分一致）
        #[arg(short, long, default_value = "")]
        search: String,

        /// 地域タイプで絞り込み
        #[arg(short = 't', long = "type", default_value = "all")]
        region_type: RegionTypeArg,

        /// ページ番号
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// 1ページの件数
        #[arg(long, default_value = "8")]
        page_size: usize,
    },

    /// 1件の詳細を表示
    Show {
        /// 地域のid
        #[arg(required = true)]
        id: String,
    },
}

/// clap用の地域タイプ（common側のフィルタに変換する）
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RegionTypeArg {
    All,
    City,
    Country,
    Continent,
}

impl From<RegionTypeArg> for RegionTypeFilter {
    fn from(arg: RegionTypeArg) -> Self {
        match arg {
            RegionTypeArg::All => RegionTypeFilter::All,
            RegionTypeArg::City => RegionTypeFilter::City,
            RegionTypeArg::Country => RegionTypeFilter::Country,
            RegionTypeArg::Continent => RegionTypeFilter::Continent,
        }
    }
}
