use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{Deal, ProductsSold, ReportCriteria, UpdateDeal};

const DEAL_COLUMNS: &str = r#"id, deal_date, stock_number, last_name, first_name, financed,
    reserve, vsc, gap, tw, tricare, "key", manager"#;

#[derive(Debug, Clone, FromRow)]
pub struct DealSummaryRow {
    pub total_deals: i64,
    pub total_profit: f64,
    pub vsc_sold: i64,
    pub gap_sold: i64,
    pub tw_sold: i64,
    pub tricare_sold: i64,
    pub key_sold: i64,
}

impl DealSummaryRow {
    pub fn products_sold(&self) -> ProductsSold {
        ProductsSold {
            vsc_sold: self.vsc_sold,
            gap_sold: self.gap_sold,
            tw_sold: self.tw_sold,
            tricare_sold: self.tricare_sold,
            key_sold: self.key_sold,
        }
    }
}

pub async fn fetch_recent(pool: &PgPool, limit: i64) -> Result<Vec<Deal>, sqlx::Error> {
    let sql = format!("SELECT {DEAL_COLUMNS} FROM deals ORDER BY deal_date DESC LIMIT $1");
    sqlx::query_as::<_, Deal>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Deal>, sqlx::Error> {
    let sql = format!("SELECT {DEAL_COLUMNS} FROM deals WHERE id = $1");
    sqlx::query_as::<_, Deal>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &PgPool, input: Deal) -> Result<Deal, sqlx::Error> {
    let sql = format!(
        r#"INSERT INTO deals ({DEAL_COLUMNS})
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
           RETURNING {DEAL_COLUMNS}"#
    );
    sqlx::query_as::<_, Deal>(&sql)
        .bind(input.id)
        .bind(input.deal_date)
        .bind(input.stock_number)
        .bind(input.last_name)
        .bind(input.first_name)
        .bind(input.financed)
        .bind(input.reserve)
        .bind(input.vsc)
        .bind(input.gap)
        .bind(input.tw)
        .bind(input.tricare)
        .bind(input.key)
        .bind(input.manager.as_str())
        .fetch_one(pool)
        .await
}

pub async fn update(pool: &PgPool, id: Uuid, input: UpdateDeal) -> Result<Option<Deal>, sqlx::Error> {
    let sql = format!(
        r#"UPDATE deals
           SET stock_number = $1, last_name = $2, first_name = $3, financed = $4,
               reserve = $5, vsc = $6, gap = $7, tw = $8, tricare = $9, "key" = $10,
               manager = $11
           WHERE id = $12
           RETURNING {DEAL_COLUMNS}"#
    );
    sqlx::query_as::<_, Deal>(&sql)
        .bind(input.stock_number)
        .bind(input.last_name)
        .bind(input.first_name)
        .bind(input.financed)
        .bind(input.reserve)
        .bind(input.vsc)
        .bind(input.gap)
        .bind(input.tw)
        .bind(input.tricare)
        .bind(input.key)
        .bind(input.manager.as_str())
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM deals WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn fetch_filtered(pool: &PgPool, criteria: &ReportCriteria) -> Result<Vec<Deal>, sqlx::Error> {
    let mut qb = filtered_query(criteria);
    qb.build_query_as::<Deal>().fetch_all(pool).await
}

/// Profit sum, deal count and per-product sold counts over the matching deals, computed in SQL.
pub async fn fetch_summary(pool: &PgPool, criteria: &ReportCriteria) -> Result<DealSummaryRow, sqlx::Error> {
    let mut qb = summary_query(criteria);
    qb.build_query_as::<DealSummaryRow>().fetch_one(pool).await
}

fn filtered_query(criteria: &ReportCriteria) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {DEAL_COLUMNS} FROM deals"));
    push_criteria(&mut qb, criteria);
    qb.push(" ORDER BY deal_date ASC, stock_number ASC");
    qb
}

fn summary_query(criteria: &ReportCriteria) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(
        r#"SELECT
          COUNT(*) AS total_deals,
          COALESCE(SUM(reserve + vsc + gap + tw + tricare + "key"), 0)::double precision AS total_profit,
          COUNT(*) FILTER (WHERE vsc > 0) AS vsc_sold,
          COUNT(*) FILTER (WHERE gap > 0) AS gap_sold,
          COUNT(*) FILTER (WHERE tw > 0) AS tw_sold,
          COUNT(*) FILTER (WHERE tricare > 0) AS tricare_sold,
          COUNT(*) FILTER (WHERE "key" > 0) AS key_sold
        FROM deals"#,
    );
    push_criteria(&mut qb, criteria);
    qb
}

fn push_criteria(qb: &mut QueryBuilder<'_, Postgres>, criteria: &ReportCriteria) {
    qb.push(" WHERE TRUE");
    if let Some(start) = criteria.start_date {
        qb.push(" AND deal_date >= ").push_bind(start);
    }
    if let Some(end) = criteria.end_date {
        qb.push(" AND deal_date <= ").push_bind(end);
    }
    if !criteria.managers.is_empty() {
        let names: Vec<String> = criteria
            .managers
            .iter()
            .map(|m| m.as_str().to_string())
            .collect();
        qb.push(" AND manager = ANY(").push_bind(names).push(")");
    }
}
