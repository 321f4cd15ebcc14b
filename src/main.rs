use anyhow::Result;
use clap::Parser;

use zhihu_export::cli::Args;
use zhihu_export::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 加载配置
    let mut config = Config::load(args.config.as_deref())?;
    if args.no_sort {
        config.sort_by_time = false;
    }
    config.verbose_logging |= args.verbose;

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);

    // 初始化并运行应用
    App::new(config)?.run(args.command.into()).await?;

    Ok(())
}
