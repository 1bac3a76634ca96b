use serde::{Deserialize, Serialize};

/// 教授搜索结果的一条 edge（游标 + 节点）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherEdge {
    pub cursor: String,
    pub node: TeacherNode,
}

/// 教授节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherNode {
    pub id: String,

    #[serde(rename = "legacyId")]
    pub legacy_id: Option<i64>,

    #[serde(rename = "firstName")]
    pub first_name: String,

    #[serde(rename = "lastName")]
    pub last_name: String,

    pub department: Option<String>,

    #[serde(rename = "avgRating")]
    pub avg_rating: Option<f64>,

    #[serde(rename = "avgDifficulty")]
    pub avg_difficulty: Option<f64>,

    #[serde(rename = "numRatings")]
    pub num_ratings: Option<i64>,

    #[serde(rename = "wouldTakeAgainPercentRounded")]
    pub would_take_again_percent_rounded: Option<f64>,

    pub school: Option<TeacherSchoolRef>,
}

impl TeacherNode {
    /// 拼接完整姓名用于日志显示
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl std::fmt::Display for TeacherNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rating) = self.avg_rating {
            write!(f, "{} [评分: {:.1}]", self.full_name(), rating)
        } else {
            write!(f, "{} [评分: 未知]", self.full_name())
        }
    }
}

/// 教授所属学校的引用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherSchoolRef {
    pub id: String,
    pub name: Option<String>,
}

/// 游标分页的页信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,

    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}
