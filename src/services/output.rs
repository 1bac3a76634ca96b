//! 教授列表输出服务 - 业务能力层
//!
//! 只负责"写 professors.json"能力，不关心流程

use crate::error::{AppError, AppResult};
use crate::models::teacher::TeacherEdge;
use std::fs;
use tracing::debug;

/// 教授列表写入服务
///
/// 职责：
/// - 将累积的教授列表一次性写入 JSON 文件
/// - 整文件覆盖，不追加
pub struct ProfessorWriter {
    output_path: String,
}

impl ProfessorWriter {
    /// 创建新的写入服务
    pub fn new() -> Self {
        Self {
            output_path: "professors.json".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            output_path: path.into(),
        }
    }

    /// 写入教授列表
    ///
    /// # 参数
    /// - `edges`: 累积的教授 edge 列表
    ///
    /// # 返回
    /// 返回是否成功写入（2 空格缩进的 JSON 数组）
    pub async fn write(&self, edges: &[TeacherEdge]) -> AppResult<()> {
        debug!("写入教授列表: {} 条 → {}", edges.len(), self.output_path);

        let json_text = serde_json::to_string_pretty(edges)?;

        fs::write(&self.output_path, json_text)
            .map_err(|e| AppError::file_write_failed(&self.output_path, e))?;

        Ok(())
    }
}

impl Default for ProfessorWriter {
    fn default() -> Self {
        Self::new()
    }
}
