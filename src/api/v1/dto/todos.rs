/*
 * Responsibility
 * - todo request/response DTOs (camelCase on the wire)
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::repos::todo_repo::TodoRow;

pub const CONTENT_MAX_CHARS: usize = 200;

fn validate_content(content: &str) -> Result<(), &'static str> {
    if content.trim().is_empty() {
        return Err("content is required");
    }
    if content.chars().count() > CONTENT_MAX_CHARS {
        return Err("content must be <= 200 chars");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub content: String,
    // defaults to today
    pub add_date: Option<NaiveDate>,
}

impl CreateTodoRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_content(&self.content)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub content: Option<String>,
    pub is_complete: Option<bool>,
}

impl UpdateTodoRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        if self.content.is_none() && self.is_complete.is_none() {
            return Err("nothing to update");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub todo_id: i64,
    pub content: String,
    pub is_complete: bool,
    pub add_date: String,
}

impl From<TodoRow> for TodoResponse {
    fn from(row: TodoRow) -> Self {
        Self {
            todo_id: row.id,
            content: row.content,
            is_complete: row.is_complete,
            add_date: row.add_date.format("%Y-%m-%d").to_string(),
        }
    }
}
