use crate::clients::RmpClient;
use crate::config::Config;
use crate::services::{FetchOutcome, ProfessorFetch, ProfessorWriter, SchoolSearch, StopReason};
use crate::utils::logging;
use anyhow::Result;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    client: RmpClient,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        logging::log_startup(&config);

        // 创建 API 客户端
        let client = RmpClient::new(&config)?;

        Ok(Self { config, client })
    }

    /// 运行应用主逻辑
    ///
    /// 失败路径只记录日志并提前返回，不向进程传播失败信号
    pub async fn run(&self) -> Result<()> {
        // 搜索学校
        info!("🔍 正在搜索学校: {}", self.config.school_name);

        let schools = match SchoolSearch::new()
            .search(&self.client, &self.config.school_name)
            .await
        {
            Ok(schools) => schools,
            Err(e) => {
                error!("❌ 学校搜索失败: {}", e);
                return Ok(());
            }
        };

        if schools.is_empty() {
            warn!("⚠️ 未找到匹配的学校，程序结束");
            return Ok(());
        }

        // 无条件选择第一条作为最佳匹配
        let best_match = &schools[0].node;
        info!("✓ 选定学校: {} (id: {})", best_match, best_match.id);

        // 翻页拉取全部教授
        info!("📥 开始拉取教授列表...");
        let fetcher = ProfessorFetch::with_page_size(self.config.page_size);
        let outcome = fetcher
            .fetch_all(&self.client, &best_match.id, &self.config.professor_filter)
            .await;

        self.log_fetch_outcome(&outcome);

        // 写出结果（截断时写已累积的部分，可能是空数组）
        let writer = ProfessorWriter::with_path(&self.config.output_file);
        if let Err(e) = writer.write(&outcome.edges).await {
            error!("❌ 写入输出文件失败: {}", e);
            return Ok(());
        }

        logging::print_final_stats(
            outcome.edges.len(),
            outcome.pages,
            outcome.result_count,
            &self.config.output_file,
        );

        Ok(())
    }

    // ========== 日志辅助函数 ==========

    fn log_fetch_outcome(&self, outcome: &FetchOutcome) {
        match &outcome.stop {
            StopReason::Exhausted => {
                info!("✓ 翻页完成: 共 {} 页", outcome.pages);
            }
            reason => {
                warn!("⚠️ 翻页提前终止 ({}): 已拉取 {} 页", reason, outcome.pages);
            }
        }

        if self.config.verbose_logging {
            for edge in outcome.edges.iter().take(5) {
                info!("  - {}", edge.node);
            }
        }
    }
}
