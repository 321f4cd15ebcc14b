//! 命令行参数

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::orchestrator::Command;

#[derive(Debug, Parser)]
#[command(name = "zhihu_export", version, about = "知乎问题回答抓取与导出")]
pub struct Args {
    #[command(subcommand)]
    pub command: CliCommand,

    /// 配置文件路径（默认 zhihu_export.toml）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 保留网页原始顺序，不按时间排序
    #[arg(long, global = true)]
    pub no_sort: bool,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum CliCommand {
    /// 启动浏览器，滚动问题页面并导出回答
    Crawl,
    /// 启动浏览器，滚动问题页面并保存快照
    Scroll,
    /// 解析已保存的快照并导出回答
    Parse,
}

impl From<CliCommand> for Command {
    fn from(command: CliCommand) -> Self {
        match command {
            CliCommand::Crawl => Command::Crawl,
            CliCommand::Scroll => Command::Scroll,
            CliCommand::Parse => Command::Parse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommand_with_global_flags() {
        let args = Args::try_parse_from(["zhihu_export", "parse", "--no-sort"]).unwrap();
        assert!(matches!(args.command, CliCommand::Parse));
        assert!(args.no_sort);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["zhihu_export"]).is_err());
    }
}
