//! Local store: one keyed JSON-document table per entity on top of SQLite.
//!
//! Each table supports point lookups and full scans and is mutated
//! independently. There are no cross-entity transactions.

pub mod seed;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;

use crate::jobs::reorder::move_item;
use crate::models::assessment::{Assessment, AssessmentStats, Submission};
use crate::models::candidate::Candidate;
use crate::models::job::Job;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// An entity that lives in its own table.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;

    fn key(&self) -> &str;

    /// Sort key used by full scans. Entities without an explicit order share 0.
    fn position(&self) -> i64 {
        0
    }
}

impl Record for Job {
    const TABLE: &'static str = "jobs";

    fn key(&self) -> &str {
        &self.id
    }

    fn position(&self) -> i64 {
        self.order
    }
}

impl Record for Candidate {
    const TABLE: &'static str = "candidates";

    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for Assessment {
    const TABLE: &'static str = "assessments";

    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for Submission {
    const TABLE: &'static str = "submissions";

    fn key(&self) -> &str {
        &self.job_id
    }
}

/// Typed handle on one entity table.
pub struct Table<T> {
    pool: SqlitePool,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Table {
            pool: self.pool.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Table<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Table {
            pool,
            _record: PhantomData,
        }
    }

    pub async fn get(&self, id: &str) -> StoreResult<Option<T>> {
        let sql = format!("SELECT data FROM {} WHERE id = ?", T::TABLE);
        let data: Option<String> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        data.map(|d| serde_json::from_str(&d))
            .transpose()
            .map_err(StoreError::from)
    }

    /// Full scan ordered by position, then key.
    pub async fn list(&self) -> StoreResult<Vec<T>> {
        let sql = format!("SELECT data FROM {} ORDER BY position, id", T::TABLE);
        let rows: Vec<String> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|d| serde_json::from_str(d).map_err(StoreError::from))
            .collect()
    }

    pub async fn count(&self) -> StoreResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", T::TABLE);
        Ok(sqlx::query_scalar(&sql).fetch_one(&self.pool).await?)
    }

    /// Insert or replace by key.
    pub async fn put(&self, record: &T) -> StoreResult<()> {
        let data = serde_json::to_string(record)?;
        sqlx::query(&upsert_sql(T::TABLE))
            .bind(record.key())
            .bind(record.position())
            .bind(data)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Upserts every record in one transaction.
    pub async fn put_all(&self, records: &[T]) -> StoreResult<()> {
        let sql = upsert_sql(T::TABLE);
        let mut tx = self.pool.begin().await?;
        for record in records {
            let data = serde_json::to_string(record)?;
            sqlx::query(&sql)
                .bind(record.key())
                .bind(record.position())
                .bind(data)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        debug!("Wrote {} records to {}", records.len(), T::TABLE);
        Ok(())
    }

    /// Returns whether a record was removed.
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn clear(&self) -> StoreResult<()> {
        let sql = format!("DELETE FROM {}", T::TABLE);
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }
}

fn upsert_sql(table: &str) -> String {
    format!(
        "INSERT INTO {table} (id, position, data) VALUES (?, ?, ?)
         ON CONFLICT(id) DO UPDATE SET position = excluded.position, data = excluded.data"
    )
}

/// All entity tables sharing one pool.
#[derive(Clone)]
pub struct Store {
    pub jobs: Table<Job>,
    pub candidates: Table<Candidate>,
    pub assessments: Table<Assessment>,
    pub submissions: Table<Submission>,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Store {
            jobs: Table::new(pool.clone()),
            candidates: Table::new(pool.clone()),
            assessments: Table::new(pool.clone()),
            submissions: Table::new(pool),
        }
    }

    /// Next free ordinal for a newly created job.
    pub async fn next_job_order(&self) -> StoreResult<i64> {
        let jobs = self.jobs.list().await?;
        Ok(jobs.iter().map(|j| j.order).max().map_or(0, |max| max + 1))
    }

    /// Moves a job to the slot currently held by the job with `order ==
    /// to_order` and renumbers every job densely. Without an exact match the
    /// first job ordered after `to_order` is used, else the last slot.
    /// Returns `None` for an unknown id.
    ///
    /// Read, move and write share one transaction.
    pub async fn reorder_job(&self, id: &str, to_order: i64) -> StoreResult<Option<Job>> {
        let mut tx = self.jobs.pool.begin().await?;

        let sql = format!("SELECT data FROM {} ORDER BY position, id", Job::TABLE);
        let rows: Vec<String> = sqlx::query_scalar(&sql).fetch_all(&mut *tx).await?;
        let mut jobs = rows
            .iter()
            .map(|d| serde_json::from_str::<Job>(d))
            .collect::<Result<Vec<_>, _>>()?;

        let Some(from) = jobs.iter().position(|j| j.id == id) else {
            return Ok(None);
        };
        let to = jobs
            .iter()
            .position(|j| j.order == to_order)
            .or_else(|| jobs.iter().position(|j| j.order > to_order))
            .unwrap_or(jobs.len() - 1);
        move_item(&mut jobs, from, to);

        let upsert = upsert_sql(Job::TABLE);
        for (order, job) in jobs.iter_mut().enumerate() {
            job.order = order as i64;
            sqlx::query(&upsert)
                .bind(&job.id)
                .bind(job.order)
                .bind(serde_json::to_string(&*job)?)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        debug!("Moved job {id} from slot {from} to {to}");
        Ok(jobs.into_iter().nth(to))
    }

    pub async fn assessment_for_job(&self, job_id: &str) -> StoreResult<Option<Assessment>> {
        let assessments = self.assessments.list().await?;
        Ok(assessments.into_iter().find(|a| a.job_id == job_id))
    }

    /// An assessment counts as completed once its job has a stored submission.
    pub async fn assessment_stats(&self) -> StoreResult<AssessmentStats> {
        let assessments = self.assessments.list().await?;
        let mut completed = 0;
        for assessment in &assessments {
            if self.submissions.get(&assessment.job_id).await?.is_some() {
                completed += 1;
            }
        }
        Ok(AssessmentStats {
            total_assessments: assessments.len(),
            completed_assessments: completed,
            pending_assessments: assessments.len() - completed,
        })
    }
}
