use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use rust_sniff::cli::Cli;
use rust_sniff::finder::{sink, Finder};

fn main() -> Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志（输出到标准错误）
    env_logger::Builder::new()
        .filter_level(if cli.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    info!("开始运行 rust-sniff");
    let start_time = Instant::now();

    // 在开始遍历之前完成所有参数检查
    let request = cli.build_request().context("无效的命令行参数")?;
    debug!("搜索请求: {:?}", request);

    let mut sink = sink::open_sink(cli.output.as_deref()).context("无法准备输出")?;

    let finder = Finder::new(request);
    let summary = finder
        .find_into(sink.as_mut())
        .context("写入搜索结果失败")?;

    let elapsed = start_time.elapsed();
    info!(
        "搜索完成，找到 {} 个文件，{} 个目录无法读取，耗时 {:.2?}",
        summary.found, summary.unreadable, elapsed
    );

    Ok(())
}
