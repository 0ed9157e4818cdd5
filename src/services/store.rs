use redis::{AsyncCommands, Client};
use std::sync::Arc;

use crate::models::{Staff, Student, TaskRecord};

// External key-document store. Records are serde-JSON documents under typed
// key prefixes; index sets make the collections enumerable.
pub struct CenterStore {
    client: Arc<Client>,
}

impl CenterStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub async fn get_staff(&self, username: &str) -> Result<Option<Staff>, redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let raw: Option<String> = conn.get(format!("staff:{}", username)).await?;
        raw.map(|data| parse_document(&data, "staff")).transpose()
    }

    pub async fn save_staff(&self, staff: &Staff) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set(
            format!("staff:{}", staff.username),
            encode_document(staff, "staff")?,
        )
        .await
    }

    pub async fn get_student(&self, id: &str) -> Result<Option<Student>, redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let raw: Option<String> = conn.get(format!("student:{}", id)).await?;
        raw.map(|data| parse_document(&data, "student")).transpose()
    }

    pub async fn save_student(&self, student: &Student) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set::<_, _, ()>(
            format!("student:{}", student.id),
            encode_document(student, "student")?,
        )
        .await?;
        conn.sadd("students:index", &student.id).await
    }

    // Full roster snapshot. Index entries whose document has gone missing are
    // skipped with a warning rather than failing the whole read.
    pub async fn list_students(&self) -> Result<Vec<Student>, redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let ids: Vec<String> = conn.smembers("students:index").await?;

        let mut students = Vec::with_capacity(ids.len());
        for id in ids {
            let raw: Option<String> = conn.get(format!("student:{}", id)).await?;
            match raw {
                Some(data) => students.push(parse_document(&data, "student")?),
                None => tracing::warn!("Student {} is indexed but has no document", id),
            }
        }
        Ok(students)
    }

    pub async fn save_task(&self, task: &TaskRecord) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set::<_, _, ()>(format!("task:{}", task.id), encode_document(task, "task")?)
            .await?;
        conn.sadd("tasks:index", &task.id).await
    }

    pub async fn list_tasks(&self) -> Result<Vec<TaskRecord>, redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let ids: Vec<String> = conn.smembers("tasks:index").await?;

        let mut tasks = Vec::with_capacity(ids.len());
        for id in ids {
            let raw: Option<String> = conn.get(format!("task:{}", id)).await?;
            match raw {
                Some(data) => tasks.push(parse_document(&data, "task")?),
                None => tracing::warn!("Task {} is indexed but has no document", id),
            }
        }
        Ok(tasks)
    }
}

// Parse the JSON into the record type
fn parse_document<T: serde::de::DeserializeOwned>(
    raw: &str,
    what: &'static str,
) -> Result<T, redis::RedisError> {
    serde_json::from_str(raw).map_err(|e| {
        redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "Failed to parse document",
            format!("{}: {}", what, e),
        ))
    })
}

fn encode_document<T: serde::Serialize>(
    value: &T,
    what: &'static str,
) -> Result<String, redis::RedisError> {
    serde_json::to_string(value).map_err(|e| {
        redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "Failed to encode document",
            format!("{}: {}", what, e),
        ))
    })
}

impl Clone for CenterStore {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}
