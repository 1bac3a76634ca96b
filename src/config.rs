/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// GraphQL 接口地址
    pub graphql_url: String,
    /// Authorization: Basic 的固定凭证
    pub auth_token: String,
    /// 模拟浏览器的 User-Agent
    pub user_agent: String,
    /// 要搜索的学校名称
    pub school_name: String,
    /// 教授姓名过滤（空字符串表示全部）
    pub professor_filter: String,
    /// 每页拉取的教授数量
    pub page_size: usize,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 教授列表输出文件
    pub output_file: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graphql_url: "https://www.ratemyprofessors.com/graphql".to_string(),
            auth_token: "dGVzdDp0ZXN0".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            school_name: "New York University".to_string(),
            professor_filter: String::new(),
            page_size: 1000,
            request_timeout_secs: 30,
            output_file: "professors.json".to_string(),
            output_log_file: "output.txt".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            graphql_url: std::env::var("RMP_GRAPHQL_URL").unwrap_or(default.graphql_url),
            auth_token: std::env::var("RMP_AUTH_TOKEN").unwrap_or(default.auth_token),
            user_agent: std::env::var("RMP_USER_AGENT").unwrap_or(default.user_agent),
            school_name: std::env::var("SCHOOL_NAME").unwrap_or(default.school_name),
            professor_filter: std::env::var("PROFESSOR_FILTER").unwrap_or(default.professor_filter),
            page_size: std::env::var("PAGE_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.page_size),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            output_file: std::env::var("OUTPUT_FILE").unwrap_or(default.output_file),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.graphql_url, "https://www.ratemyprofessors.com/graphql");
        assert_eq!(config.output_file, "professors.json");
        assert_eq!(config.page_size, 1000);
        assert!(config.professor_filter.is_empty());
    }
}
