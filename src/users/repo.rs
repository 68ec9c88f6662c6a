use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// User record in the t_user table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub mail: String,
    pub password: String, // argon2 hash; responses go through to_shaped, which drops it
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub is_activated: bool,
    pub liked_movie_id: Option<Vec<Uuid>>,
}

/// Field values for an INSERT; the id is generated by the database.
#[derive(Debug)]
pub struct NewUser {
    pub mail: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub is_activated: bool,
}

impl User {
    /// Renders the record as a JSON object without the columns in `omit`.
    /// Callers always omit at least `password`.
    pub fn to_shaped(&self, omit: &[&str]) -> Value {
        let mut map = Map::new();
        map.insert("id".into(), json!(self.id));
        map.insert("mail".into(), json!(self.mail));
        map.insert("password".into(), json!(self.password));
        map.insert("first_name".into(), json!(self.first_name));
        map.insert("last_name".into(), json!(self.last_name));
        map.insert("is_admin".into(), json!(self.is_admin));
        map.insert("is_activated".into(), json!(self.is_activated));
        map.insert("liked_movie_id".into(), json!(self.liked_movie_id));
        for key in omit {
            map.remove(*key);
        }
        Value::Object(map)
    }

    /// Login lookup: mail is stored lower-cased, only activated users count.
    pub async fn find_activated_by_mail(db: &PgPool, mail: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, mail, password, first_name, last_name, is_admin, is_activated, liked_movie_id
            FROM t_user
            WHERE mail = $1 AND is_activated = TRUE
            "#,
        )
        .bind(mail)
        .fetch_optional(db)
        .await
    }

    /// Token-resolution lookup, filtered to activated users.
    pub async fn find_activated_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, mail, password, first_name, last_name, is_admin, is_activated, liked_movie_id
            FROM t_user
            WHERE id = $1 AND is_activated = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, mail, password, first_name, last_name, is_admin, is_activated, liked_movie_id
            FROM t_user
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(db: &PgPool, new: &NewUser) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO t_user (mail, password, first_name, last_name, is_admin, is_activated)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&new.mail)
        .bind(&new.password)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.is_admin)
        .bind(new.is_activated)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Replaces every profile column in one statement; returns affected rows
    /// so the caller can distinguish a missing target.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        mail: &str,
        first_name: &str,
        last_name: &str,
        is_admin: bool,
        is_activated: bool,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE t_user
            SET mail = $2, first_name = $3, last_name = $4, is_admin = $5, is_activated = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(mail)
        .bind(first_name)
        .bind(last_name)
        .bind(is_admin)
        .bind(is_activated)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn update_password(db: &PgPool, id: Uuid, password_hash: &str) -> sqlx::Result<u64> {
        let result = sqlx::query("UPDATE t_user SET password = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn deactivate(db: &PgPool, id: Uuid) -> sqlx::Result<u64> {
        let result = sqlx::query("UPDATE t_user SET is_activated = FALSE WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
