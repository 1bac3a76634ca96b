use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// 学校搜索结果中声明的 summary 字段集合
///
/// 校验响应结构时逐一检查这些字段是否存在
pub const SUMMARY_FIELDS: [&str; 11] = [
    "campusConditions",
    "campusLocation",
    "careerOpportunities",
    "clubAndEventActivities",
    "foodQuality",
    "internetSpeed",
    "libraryCondition",
    "schoolReputation",
    "schoolSafety",
    "schoolSatisfaction",
    "socialActivities",
];

/// 学校搜索结果的一条 edge（游标 + 节点）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolEdge {
    pub cursor: String,
    pub node: SchoolNode,
}

/// 学校节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolNode {
    pub id: String,

    #[serde(rename = "legacyId")]
    pub legacy_id: Option<i64>,

    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,

    pub departments: Option<Vec<Department>>,

    #[serde(rename = "numRatings")]
    pub num_ratings: Option<i64>,

    #[serde(rename = "avgRatingRounded")]
    pub avg_rating_rounded: Option<f64>,

    pub summary: Option<SchoolSummary>,
}

impl std::fmt::Display for SchoolNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.city, &self.state) {
            (Some(city), Some(state)) => write!(f, "{} ({}, {})", self.name, city, state),
            _ => write!(f, "{}", self.name),
        }
    }
}

/// 院系
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
}

/// 学校各分项评分的汇总
///
/// 字段名以声明的结果结构为准，与查询文档是否一致由 validate_summary 校验
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolSummary {
    #[serde(rename = "campusConditions")]
    pub campus_conditions: Option<f64>,

    #[serde(rename = "campusLocation")]
    pub campus_location: Option<f64>,

    #[serde(rename = "careerOpportunities")]
    pub career_opportunities: Option<f64>,

    #[serde(rename = "clubAndEventActivities")]
    pub club_and_event_activities: Option<f64>,

    #[serde(rename = "foodQuality")]
    pub food_quality: Option<f64>,

    #[serde(rename = "internetSpeed")]
    pub internet_speed: Option<f64>,

    #[serde(rename = "libraryCondition")]
    pub library_condition: Option<f64>,

    #[serde(rename = "schoolReputation")]
    pub school_reputation: Option<f64>,

    #[serde(rename = "schoolSafety")]
    pub school_safety: Option<f64>,

    #[serde(rename = "schoolSatisfaction")]
    pub school_satisfaction: Option<f64>,

    #[serde(rename = "socialActivities")]
    pub social_activities: Option<f64>,
}

/// 校验 summary 对象是否包含全部声明字段
///
/// 缺少某个声明字段时返回结构化错误，并附带响应中第一个
/// 未声明的字段名作为提示（不猜测、不改名）
pub fn validate_summary(summary: &Map<String, Value>) -> AppResult<()> {
    for field in SUMMARY_FIELDS {
        if !summary.contains_key(field) {
            let found = summary
                .keys()
                .find(|k| !SUMMARY_FIELDS.contains(&k.as_str()))
                .cloned();
            return Err(AppError::schema_mismatch(
                "newSearch.schools.edges.node.summary",
                field,
                found,
            ));
        }
    }
    Ok(())
}
