/// RateMyProfessors API 客户端
///
/// 封装所有与 GraphQL 接口相关的调用逻辑
use crate::config::Config;
use crate::error::{AppError, AppResult};
use reqwest::header;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// 固定的浏览器伪装头
const ACCEPT: &str = "application/json, text/plain, */*";
const ORIGIN: &str = "https://www.ratemyprofessors.com";
const REFERER: &str = "https://www.ratemyprofessors.com/";

/// RateMyProfessors API 客户端
pub struct RmpClient {
    http: reqwest::Client,
    graphql_url: String,
    auth_token: String,
}

impl RmpClient {
    /// 创建新的 API 客户端
    ///
    /// 唯一持有 reqwest::Client，超时由配置决定
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::api_request_failed(&config.graphql_url, e))?;

        Ok(Self {
            http,
            graphql_url: config.graphql_url.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// 发送一次 GraphQL POST 请求
    ///
    /// # 参数
    /// - `operation`: 操作名（只用于日志与错误信息）
    /// - `body`: 完整的请求体（query + variables）
    ///
    /// # 返回
    /// 返回完整的响应 JSON
    pub async fn post_graphql(&self, operation: &str, body: Value) -> AppResult<Value> {
        debug!("GraphQL 请求 ({})", operation);

        let response = self
            .http
            .post(&self.graphql_url)
            .header(header::AUTHORIZATION, format!("Basic {}", self.auth_token))
            .header(header::ACCEPT, ACCEPT)
            .header(header::ORIGIN, ORIGIN)
            .header(header::REFERER, REFERER)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.ok();
            return Err(AppError::bad_response(operation, status.as_u16(), message));
        }

        let result: Value = response
            .json()
            .await
            .map_err(|e| AppError::api_request_failed(operation, e))?;

        if result.is_null() {
            return Err(AppError::empty_response(operation));
        }

        debug!("GraphQL 响应 ({}) 已接收", operation);

        Ok(result)
    }
}
