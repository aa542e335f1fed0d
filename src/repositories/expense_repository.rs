use crate::models::expense::{CreateExpenseRequest, Expense, UpdateExpenseRequest};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_shift(&self, shift_id: Uuid) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses WHERE shift_id = $1 ORDER BY created_at",
        )
        .bind(shift_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn list_by_shifts(&self, shift_ids: &[Uuid]) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses WHERE shift_id = ANY($1) ORDER BY created_at",
        )
        .bind(shift_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn find_for_driver(&self, id: Uuid, driver_id: Uuid) -> Result<Option<Expense>, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            SELECT e.* FROM expenses e
            JOIN shifts s ON s.id = e.shift_id
            WHERE e.id = $1 AND s.driver_id = $2
            "#,
        )
        .bind(id)
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn create(&self, shift_id: Uuid, request: &CreateExpenseRequest) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (id, shift_id, expense_type, amount, payment_method, description, created_at)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'cash'), $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(shift_id)
        .bind(request.expense_type.trim())
        .bind(request.amount)
        .bind(&request.payment_method)
        .bind(&request.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateExpenseRequest) -> Result<Option<Expense>, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET expense_type = COALESCE($2, expense_type),
                amount = COALESCE($3, amount),
                payment_method = COALESCE($4, payment_method),
                description = COALESCE($5, description)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.expense_type)
        .bind(request.amount)
        .bind(&request.payment_method)
        .bind(&request.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
