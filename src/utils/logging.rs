use anyhow::Result;
/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::fs;
use tracing::info;

use crate::config::Config;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
///
/// # 返回
/// 返回是否成功初始化
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n教授抓取日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - RateMyProfessors 教授抓取");
    info!("🏫 目标学校: {}", config.school_name);
    info!("📄 输出文件: {}", config.output_file);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `total`: 实际拉取的教授数量
/// - `pages`: 实际请求的页数
/// - `server_count`: 服务端报告的总数
/// - `output_file`: 输出文件路径
pub fn print_final_stats(total: usize, pages: usize, server_count: Option<i64>, output_file: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 共找到 {} 位教授 (拉取 {} 页)", total, pages);
    if let Some(count) = server_count {
        if count as usize != total {
            info!("⚠️ 服务端报告 {} 条，实际拉取 {} 条", count, total);
        }
    }
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", output_file);
}
