//! Today's to-do list from the Todoist REST API.

use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use super::error_body;
use crate::errors::DailyError;

pub const TODOIST_HEADER: &str = "今日待办：";
pub const TODOIST_EMPTY: &str = "今日待办：暂无待办事项，享受生活吧";
pub const DEFAULT_TODOIST: &str = "获取待办事项失败";

const TODAY_FILTER: &str = "today | overdue";

#[derive(Debug, Clone, Deserialize)]
pub struct TodoistTask {
    pub content: String,
    /// 1 (normal) to 4 (urgent).
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub due: Option<TodoistDue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TodoistDue {
    #[serde(default)]
    pub string: Option<String>,
}

const fn default_priority() -> u8 {
    1
}

/// Renders tasks most urgent first, numbered from 1.
#[must_use]
pub fn format_tasks(tasks: &[TodoistTask]) -> String {
    if tasks.is_empty() {
        return TODOIST_EMPTY.to_string();
    }

    let mut sorted: Vec<&TodoistTask> = tasks.iter().collect();
    // stable: equal priorities keep API order
    sorted.sort_by(|a, b| b.priority.cmp(&a.priority));

    let lines: Vec<String> = sorted
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let due = task
                .due
                .as_ref()
                .and_then(|d| d.string.as_deref())
                .filter(|s| !s.is_empty());
            match due {
                Some(due) => format!("{}. {} ({})", i + 1, task.content, due),
                None => format!("{}. {}", i + 1, task.content),
            }
        })
        .collect();

    format!("{TODOIST_HEADER}\r\n{}", lines.join("\r\n"))
}

pub struct TodoistClient {
    http: Client,
    api_base: String,
    api_token: String,
}

impl TodoistClient {
    #[must_use]
    pub fn new(http: Client, api_base: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            api_token: api_token.into(),
        }
    }

    pub async fn fetch_todos(&self) -> String {
        info!("Start making todoist...");
        match self.try_fetch_tasks().await {
            Ok(tasks) => {
                info!("Fetched {} todoist tasks", tasks.len());
                format_tasks(&tasks)
            }
            Err(e) => {
                error!("Todoist lookup failed: {}", e);
                DEFAULT_TODOIST.to_string()
            }
        }
    }

    async fn try_fetch_tasks(&self) -> Result<Vec<TodoistTask>, DailyError> {
        let url = format!("{}/rest/v2/tasks", self.api_base.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(&[("filter", TODAY_FILTER)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(DailyError::ApiError(format!(
                "Todoist status {status}: {body}"
            )));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(content: &str, priority: u8, due: Option<&str>) -> TodoistTask {
        TodoistTask {
            content: content.to_string(),
            priority,
            due: due.map(|s| TodoistDue {
                string: Some(s.to_string()),
            }),
        }
    }

    #[test]
    fn test_format_tasks_empty() {
        assert_eq!(format_tasks(&[]), TODOIST_EMPTY);
    }

    #[test]
    fn test_format_tasks_sorted_by_priority() {
        let tasks = vec![
            task("买菜", 1, None),
            task("交房租", 4, Some("today")),
            task("回邮件", 2, None),
        ];
        assert_eq!(
            format_tasks(&tasks),
            "今日待办：\r\n1. 交房租 (today)\r\n2. 回邮件\r\n3. 买菜"
        );
    }

    #[test]
    fn test_task_deserializes_without_optional_fields() {
        let parsed: Vec<TodoistTask> =
            serde_json::from_str(r#"[{"content": "写日记"}]"#).unwrap();
        assert_eq!(parsed[0].priority, 1);
        assert!(parsed[0].due.is_none());
    }
}
