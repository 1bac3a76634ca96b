//! 学校搜索服务 - 业务能力层
//!
//! 只负责"按名称搜索学校"能力，不关心流程

use crate::clients::RmpClient;
use crate::error::{AppError, AppResult};
use crate::models::school::{validate_summary, SchoolEdge};
use serde_json::{json, Value};
use tracing::debug;

/// 学校搜索的 GraphQL 查询文档
///
/// summary 中请求的字段名以线上接口为准，与声明结构的差异
/// 在解析阶段由字段校验统一暴露
const SCHOOL_SEARCH_QUERY: &str = r#"query NewSearchSchoolsQuery($query: SchoolSearchQuery!) {
  newSearch {
    schools(query: $query) {
      edges {
        cursor
        node {
          id
          legacyId
          name
          city
          state
          departments {
            id
            name
          }
          numRatings
          avgRatingRounded
          summary {
            campusCondition
            campusLocation
            careerOpportunities
            clubAndEventActivities
            foodQuality
            internetSpeed
            libraryCondition
            schoolReputation
            schoolSafety
            schoolSatisfaction
            socialActivities
          }
        }
      }
    }
  }
}"#;

/// 学校搜索服务
///
/// 职责：
/// - 提供按名称搜索学校的能力
/// - 只发送一次请求，不重试
/// - 不选择"最佳匹配"，排序交给调用方
pub struct SchoolSearch;

impl SchoolSearch {
    /// 创建新的搜索服务
    pub fn new() -> Self {
        Self
    }

    /// 按名称搜索学校
    ///
    /// # 参数
    /// - `client`: API 客户端
    /// - `school_name`: 学校名称关键词
    ///
    /// # 返回
    /// 返回 data.newSearch.schools.edges 下的全部 edge（保持响应顺序）
    pub async fn search(
        &self,
        client: &RmpClient,
        school_name: &str,
    ) -> AppResult<Vec<SchoolEdge>> {
        debug!("学校搜索 - 关键词: {}", school_name);

        let body = json!({
            "query": SCHOOL_SEARCH_QUERY,
            "variables": {
                "query": {
                    "text": school_name
                }
            }
        });

        let response = client.post_graphql("school-search", body).await?;

        Self::parse_search_response(&response)
    }

    /// 解析学校搜索响应
    ///
    /// 逐条做声明结构校验后再反序列化，结构不符时返回结构化错误
    pub fn parse_search_response(response: &Value) -> AppResult<Vec<SchoolEdge>> {
        let edges = response
            .get("data")
            .and_then(|d| d.get("newSearch"))
            .and_then(|s| s.get("schools"))
            .and_then(|s| s.get("edges"))
            .and_then(|e| e.as_array())
            .ok_or_else(|| {
                AppError::schema_mismatch("data.newSearch.schools", "edges", None)
            })?;

        let mut results = Vec::with_capacity(edges.len());

        for edge in edges {
            if let Some(summary) = edge
                .get("node")
                .and_then(|n| n.get("summary"))
                .and_then(|s| s.as_object())
            {
                validate_summary(summary)?;
            }

            let parsed: SchoolEdge = serde_json::from_value(edge.clone())?;
            results.push(parsed);
        }

        debug!("学校搜索解析完成: {} 条", results.len());

        Ok(results)
    }
}

impl Default for SchoolSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn summary_json() -> Value {
        json!({
            "campusConditions": 3.5,
            "campusLocation": 4.0,
            "careerOpportunities": 3.8,
            "clubAndEventActivities": 4.2,
            "foodQuality": 3.1,
            "internetSpeed": 3.9,
            "libraryCondition": 4.4,
            "schoolReputation": 4.1,
            "schoolSafety": 3.6,
            "schoolSatisfaction": 3.7,
            "socialActivities": 4.0
        })
    }

    fn school_response(summary: Value) -> Value {
        json!({
            "data": {
                "newSearch": {
                    "schools": {
                        "edges": [
                            {
                                "cursor": "YXJyYXljb25uZWN0aW9uOjA=",
                                "node": {
                                    "id": "U2Nob29sLTEwNzk=",
                                    "legacyId": 1079,
                                    "name": "Test University",
                                    "city": "New York",
                                    "state": "NY",
                                    "departments": [],
                                    "numRatings": 1234,
                                    "avgRatingRounded": 3.9,
                                    "summary": summary
                                }
                            }
                        ]
                    }
                }
            }
        })
    }

    #[test]
    fn test_parse_search_response() {
        let response = school_response(summary_json());
        let edges = SchoolSearch::parse_search_response(&response).unwrap();

        assert_eq!(edges.len(), 1);
        assert!(!edges[0].node.id.is_empty());
        assert_eq!(edges[0].node.id, "U2Nob29sLTEwNzk=");
    }

    #[test]
    fn test_parse_search_response_surfaces_field_mismatch() {
        // 接口按查询文档回显 campusCondition 时，不猜测字段名，直接报错
        let mut summary = summary_json();
        let obj = summary.as_object_mut().unwrap();
        let value = obj.remove("campusConditions").unwrap();
        obj.insert("campusCondition".to_string(), value);

        let err = SchoolSearch::parse_search_response(&school_response(summary)).unwrap_err();
        assert!(matches!(
            err,
            AppError::Api(ApiError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_search_response_missing_shape() {
        let err = SchoolSearch::parse_search_response(&json!({"data": {}})).unwrap_err();
        assert!(matches!(
            err,
            AppError::Api(ApiError::SchemaMismatch { .. })
        ));
    }
}
