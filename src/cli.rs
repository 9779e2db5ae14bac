use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mvnref")]
#[command(about = "Maven reference coordinate helper", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 宣言を解析・検証・重複排除して整形済み項目を表示する
    Prepare(PrepareArgs),
    /// 宣言をローカルリポジトリ配置に基づいて参照項目へ解決する
    Resolve(ResolveArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PrepareArgs {
    /// 参照宣言ファイル（TOML）へのパス
    #[arg(value_name = "file")]
    pub file: PathBuf,
    /// JSON形式で出力する
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// 参照宣言ファイル（TOML）へのパス
    #[arg(value_name = "file")]
    pub file: PathBuf,
    /// ローカルリポジトリのルートディレクトリ
    #[arg(long = "repository", value_name = "dir")]
    pub repository: PathBuf,
    /// アーティファクト実体が存在しない座標を失敗として扱う
    #[arg(long = "require-artifacts")]
    pub require_artifacts: bool,
    /// JSON形式で出力する
    #[arg(long)]
    pub json: bool,
}
