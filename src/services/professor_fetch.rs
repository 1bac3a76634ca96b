//! 教授分页拉取服务 - 业务能力层
//!
//! 只负责"按游标翻页拉取教授列表"能力，不关心流程
//!
//! 翻页协议：afterCursor 从空字符串开始，每页结束后取
//! pageInfo.endCursor 作为下一页的游标，直到 hasNextPage 为 false

use crate::clients::RmpClient;
use crate::error::{AppError, AppResult};
use crate::models::teacher::{PageInfo, TeacherEdge};
use serde_json::{json, Value};
use std::future::Future;
use tracing::{debug, info, warn};

/// 每页默认拉取数量
const DEFAULT_PAGE_SIZE: usize = 1000;

/// 教授搜索的 GraphQL 查询模板
///
/// first 与 after 直接内插进文档（after 经过 JSON 转义），
/// 其余参数通过 variables 传递
const TEACHER_SEARCH_QUERY_TEMPLATE: &str = r#"query TeacherSearchPaginationQuery($query: TeacherSearchQuery!) {
  search: newSearch {
    teachers(query: $query, first: {FIRST}, after: {AFTER}) {
      didFallback
      edges {
        cursor
        node {
          id
          legacyId
          firstName
          lastName
          department
          avgRating
          avgDifficulty
          numRatings
          wouldTakeAgainPercentRounded
          school {
            id
            name
          }
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
      resultCount
      filters {
        field
        options {
          value
          id
        }
      }
    }
  }
}"#;

/// 翻页循环的终止原因
#[derive(Debug)]
pub enum StopReason {
    /// hasNextPage 为 false，正常结束
    Exhausted,
    /// 响应缺少 teachers 字段
    MissingTeachersField,
    /// hasNextPage 为 true 但没有可用的 endCursor
    MissingCursor,
    /// 某一页请求或解析失败
    PageFailed(AppError),
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Exhausted => write!(f, "已拉取全部页"),
            StopReason::MissingTeachersField => write!(f, "响应缺少 teachers 字段"),
            StopReason::MissingCursor => write!(f, "hasNextPage 为 true 但缺少 endCursor"),
            StopReason::PageFailed(e) => write!(f, "翻页请求失败: {}", e),
        }
    }
}

/// 翻页拉取的结果
///
/// 提前终止时 edges 保留已累积的部分，终止原因由 stop 携带，
/// 调用方（包括测试）不需要去抓日志
#[derive(Debug)]
pub struct FetchOutcome {
    /// 按响应顺序累积的全部 edge
    pub edges: Vec<TeacherEdge>,
    /// 实际请求的页数
    pub pages: usize,
    /// 首页报告的服务端总数
    pub result_count: Option<i64>,
    /// 终止原因
    pub stop: StopReason,
}

impl FetchOutcome {
    /// 是否完整拉取（未被截断）
    pub fn is_complete(&self) -> bool {
        matches!(self.stop, StopReason::Exhausted)
    }
}

/// 教授分页拉取服务
///
/// 职责：
/// - 顺序翻页，页 N+1 只在页 N 处理完后发出
/// - 游标作为不透明令牌原样转发，不检查、不构造
/// - 单页失败不重试，返回已累积的结果
pub struct ProfessorFetch {
    page_size: usize,
}

impl ProfessorFetch {
    /// 创建新的拉取服务
    pub fn new() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// 使用自定义页大小创建
    pub fn with_page_size(page_size: usize) -> Self {
        Self { page_size }
    }

    /// 拉取指定学校的全部教授
    ///
    /// # 参数
    /// - `client`: API 客户端
    /// - `school_id`: 学校 ID（来自学校搜索结果）
    /// - `text`: 教授姓名过滤，空字符串表示全部
    pub async fn fetch_all(
        &self,
        client: &RmpClient,
        school_id: &str,
        text: &str,
    ) -> FetchOutcome {
        self.fetch_all_with(school_id, |cursor| {
            let request = self.build_page_request(text, school_id, &cursor);
            async move { client.post_graphql("teacher-search", request?).await }
        })
        .await
    }

    /// 用外部提供的取页函数执行翻页循环
    ///
    /// 循环本身不触网，取页方式由 next_page 决定，测试可以直接注入模拟页
    pub async fn fetch_all_with<F, Fut>(&self, school_id: &str, mut next_page: F) -> FetchOutcome
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = AppResult<Value>>,
    {
        let mut edges: Vec<TeacherEdge> = Vec::new();
        let mut after_cursor = String::new();
        let mut pages = 0usize;
        let mut result_count: Option<i64> = None;

        let stop = loop {
            let response = match next_page(after_cursor.clone()).await {
                Ok(v) => v,
                Err(e) => {
                    warn!("⚠️ 第 {} 页请求失败: {}", pages + 1, e);
                    break StopReason::PageFailed(e);
                }
            };
            pages += 1;

            // teachers 字段缺失视为本轮循环的致命条件
            let teachers = match response
                .get("data")
                .and_then(|d| d.get("search"))
                .and_then(|s| s.get("teachers"))
            {
                Some(t) if !t.is_null() => t,
                _ => {
                    warn!("⚠️ 第 {} 页响应缺少 teachers 字段，停止翻页", pages);
                    break StopReason::MissingTeachersField;
                }
            };

            // 首页记录服务端报告的总数
            if result_count.is_none() {
                if let Some(count) = teachers.get("resultCount").and_then(|v| v.as_i64()) {
                    result_count = Some(count);
                    info!("📊 服务端报告共 {} 条教授记录", count);
                }
            }

            let page_info = match Self::parse_page_info(teachers) {
                Ok(p) => p,
                Err(e) => {
                    warn!("⚠️ 第 {} 页 pageInfo 解析失败: {}", pages, e);
                    break StopReason::PageFailed(e);
                }
            };

            let page_edges = match Self::parse_page_edges(teachers) {
                Ok(v) => v,
                Err(e) => {
                    warn!("⚠️ 第 {} 页 edges 解析失败: {}", pages, e);
                    break StopReason::PageFailed(e);
                }
            };

            debug!("第 {} 页解析到 {} 条", pages, page_edges.len());

            self.warn_on_school_mismatch(school_id, &page_edges);

            // 按响应顺序追加，不去重、不排序
            edges.extend(page_edges);

            if !page_info.has_next_page {
                break StopReason::Exhausted;
            }

            // 游标缺失时继续请求只会重复同一页
            match page_info.end_cursor {
                Some(cursor) if !cursor.is_empty() => after_cursor = cursor,
                _ => {
                    warn!("⚠️ 第 {} 页缺少 endCursor，停止翻页", pages);
                    break StopReason::MissingCursor;
                }
            }
        };

        FetchOutcome {
            edges,
            pages,
            result_count,
            stop,
        }
    }

    /// 构建单页请求体
    fn build_page_request(
        &self,
        text: &str,
        school_id: &str,
        after_cursor: &str,
    ) -> AppResult<Value> {
        let query = TEACHER_SEARCH_QUERY_TEMPLATE
            .replace("{FIRST}", &self.page_size.to_string())
            .replace("{AFTER}", &serde_json::to_string(after_cursor)?);

        Ok(json!({
            "query": query,
            "variables": {
                "query": {
                    "text": text,
                    "schoolID": school_id,
                    "fallback": true,
                    "departmentID": null
                }
            }
        }))
    }

    /// 解析页信息
    fn parse_page_info(teachers: &Value) -> AppResult<PageInfo> {
        let value = teachers
            .get("pageInfo")
            .cloned()
            .ok_or_else(|| AppError::schema_mismatch("data.search.teachers", "pageInfo", None))?;

        Ok(serde_json::from_value(value)?)
    }

    /// 解析本页的 edges
    ///
    /// 整页一起解析，解析失败的页不贡献任何 edge
    fn parse_page_edges(teachers: &Value) -> AppResult<Vec<TeacherEdge>> {
        let raw = teachers
            .get("edges")
            .and_then(|e| e.as_array())
            .ok_or_else(|| AppError::schema_mismatch("data.search.teachers", "edges", None))?;

        let mut parsed = Vec::with_capacity(raw.len());
        for edge in raw {
            parsed.push(serde_json::from_value(edge.clone())?);
        }

        Ok(parsed)
    }

    /// 教授应当都属于查询的学校，不一致时只告警不过滤
    fn warn_on_school_mismatch(&self, school_id: &str, page_edges: &[TeacherEdge]) {
        for edge in page_edges {
            if let Some(school) = &edge.node.school {
                if school.id != school_id {
                    warn!(
                        "⚠️ 教授 {} 属于其他学校 (id: {})",
                        edge.node.full_name(),
                        school.id
                    );
                }
            }
        }
    }
}

impl Default for ProfessorFetch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    const SCHOOL_ID: &str = "U2Nob29sLTEwNzk=";

    fn mk_edge(cursor: &str, id: &str) -> Value {
        json!({
            "cursor": cursor,
            "node": {
                "id": id,
                "legacyId": 1,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "department": "Computer Science",
                "avgRating": 4.5,
                "avgDifficulty": 2.8,
                "numRatings": 42,
                "wouldTakeAgainPercentRounded": 93.0,
                "school": {"id": SCHOOL_ID, "name": "Test University"}
            }
        })
    }

    fn mk_page(edges: Vec<Value>, has_next: bool, end_cursor: Option<&str>, count: i64) -> Value {
        json!({
            "data": {
                "search": {
                    "teachers": {
                        "didFallback": false,
                        "edges": edges,
                        "pageInfo": {"hasNextPage": has_next, "endCursor": end_cursor},
                        "resultCount": count,
                        "filters": []
                    }
                }
            }
        })
    }

    #[test]
    fn test_first_page_without_next_stops_immediately() {
        tokio_test::block_on(async {
            let fetcher = ProfessorFetch::new();
            let seen = RefCell::new(Vec::new());
            let mut pages =
                VecDeque::from([mk_page(vec![mk_edge("c1", "VGVhY2hlci0x")], false, None, 1)]);

            let outcome = fetcher
                .fetch_all_with(SCHOOL_ID, |cursor| {
                    seen.borrow_mut().push(cursor);
                    let next = pages.pop_front();
                    async move { Ok(next.expect("模拟页面耗尽")) }
                })
                .await;

            // 首页 hasNextPage=false 时只应发出一次请求
            assert_eq!(seen.borrow().len(), 1);
            assert_eq!(seen.borrow()[0], "");
            assert_eq!(outcome.pages, 1);
            assert_eq!(outcome.edges.len(), 1);
            assert!(outcome.is_complete());
        });
    }

    #[tokio::test]
    async fn test_accumulates_across_pages_in_order() {
        let fetcher = ProfessorFetch::new();
        let seen = RefCell::new(Vec::new());
        let mut pages = VecDeque::from([
            mk_page(
                vec![mk_edge("c1", "VGVhY2hlci0x"), mk_edge("c2", "VGVhY2hlci0y")],
                true,
                Some("c2"),
                3,
            ),
            mk_page(vec![mk_edge("c3", "VGVhY2hlci0z")], false, None, 3),
        ]);

        let outcome = fetcher
            .fetch_all_with(SCHOOL_ID, |cursor| {
                seen.borrow_mut().push(cursor);
                let next = pages.pop_front();
                async move { Ok(next.expect("模拟页面耗尽")) }
            })
            .await;

        // 总数等于各页 edge 数之和，顺序保持响应顺序
        assert_eq!(outcome.edges.len(), 3);
        assert_eq!(outcome.pages, 2);
        assert_eq!(outcome.result_count, Some(3));
        let cursors: Vec<&str> = outcome.edges.iter().map(|e| e.cursor.as_str()).collect();
        assert_eq!(cursors, vec!["c1", "c2", "c3"]);
        // 第二次请求带上了上一页的 endCursor
        assert_eq!(*seen.borrow(), vec!["".to_string(), "c2".to_string()]);
        assert!(outcome.is_complete());
    }

    #[tokio::test]
    async fn test_missing_teachers_field_keeps_prior_pages() {
        let fetcher = ProfessorFetch::new();
        let mut pages = VecDeque::from([
            mk_page(vec![mk_edge("c1", "VGVhY2hlci0x")], true, Some("c1"), 2),
            json!({"data": {"search": {}}}),
        ]);

        let outcome = fetcher
            .fetch_all_with(SCHOOL_ID, |_cursor| {
                let next = pages.pop_front();
                async move { Ok(next.expect("模拟页面耗尽")) }
            })
            .await;

        // 缺少 teachers 的页不贡献任何 edge
        assert_eq!(outcome.edges.len(), 1);
        assert_eq!(outcome.pages, 2);
        assert!(matches!(outcome.stop, StopReason::MissingTeachersField));
    }

    #[tokio::test]
    async fn test_page_error_returns_accumulated() {
        let fetcher = ProfessorFetch::new();
        let mut pages: VecDeque<AppResult<Value>> = VecDeque::from([
            Ok(mk_page(vec![mk_edge("c1", "VGVhY2hlci0x")], true, Some("c1"), 2)),
            Err(AppError::Other("网络中断".to_string())),
        ]);

        let outcome = fetcher
            .fetch_all_with(SCHOOL_ID, |_cursor| {
                let next = pages.pop_front().expect("模拟页面耗尽");
                async move { next }
            })
            .await;

        assert_eq!(outcome.edges.len(), 1);
        assert!(matches!(outcome.stop, StopReason::PageFailed(_)));
        assert!(!outcome.is_complete());
    }

    #[tokio::test]
    async fn test_missing_cursor_stops_loop() {
        let fetcher = ProfessorFetch::new();
        let mut pages =
            VecDeque::from([mk_page(vec![mk_edge("c1", "VGVhY2hlci0x")], true, None, 2)]);

        let outcome = fetcher
            .fetch_all_with(SCHOOL_ID, |_cursor| {
                let next = pages.pop_front();
                async move { Ok(next.expect("模拟页面耗尽")) }
            })
            .await;

        // 本页已正常解析，edge 保留；继续请求只会重复同一页
        assert_eq!(outcome.edges.len(), 1);
        assert_eq!(outcome.pages, 1);
        assert!(matches!(outcome.stop, StopReason::MissingCursor));
    }

    #[tokio::test]
    async fn test_deterministic_accumulation() {
        let fetcher = ProfessorFetch::new();

        let run = || async {
            let mut pages = VecDeque::from([
                mk_page(vec![mk_edge("c1", "VGVhY2hlci0x")], true, Some("c1"), 2),
                mk_page(vec![mk_edge("c2", "VGVhY2hlci0y")], false, None, 2),
            ]);
            fetcher
                .fetch_all_with(SCHOOL_ID, move |_cursor| {
                    let next = pages.pop_front();
                    async move { Ok(next.expect("模拟页面耗尽")) }
                })
                .await
        };

        let first = run().await;
        let second = run().await;

        // 相同的页序列两次运行产出完全相同的列表
        assert_eq!(
            serde_json::to_value(&first.edges).unwrap(),
            serde_json::to_value(&second.edges).unwrap()
        );
        assert_eq!(first.edges.len(), 2);
    }

    #[test]
    fn test_build_page_request_escapes_cursor() {
        let fetcher = ProfessorFetch::with_page_size(25);
        let body = fetcher
            .build_page_request("", SCHOOL_ID, "YXJyYXk6MQ==")
            .unwrap();

        let query = body.get("query").and_then(|q| q.as_str()).unwrap();
        assert!(query.contains("first: 25"));
        assert!(query.contains(r#"after: "YXJyYXk6MQ==""#));

        let variables = body.get("variables").unwrap();
        assert_eq!(variables["query"]["schoolID"], SCHOOL_ID);
        assert_eq!(variables["query"]["fallback"], true);
        assert_eq!(variables["query"]["departmentID"], Value::Null);
    }
}
