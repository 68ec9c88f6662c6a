use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Movie record in the t_movie table. Populated offline; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub release_year: Option<i32>,
    pub production_company: Option<String>,
    pub distributor: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actor_1: Option<String>,
    pub actor_2: Option<String>,
    pub actor_3: Option<String>,
    pub location_funfact: Value, // location name -> fun-fact text
    pub movie_like_counter: Option<i32>,
}

impl Movie {
    /// Full record as a JSON object, ids rendered as strings.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("id".into(), json!(self.id));
        map.insert("title".into(), json!(self.title));
        map.insert("release_year".into(), json!(self.release_year));
        map.insert(
            "production_company".into(),
            json!(self.production_company),
        );
        map.insert("distributor".into(), json!(self.distributor));
        map.insert("director".into(), json!(self.director));
        map.insert("writer".into(), json!(self.writer));
        map.insert("actor_1".into(), json!(self.actor_1));
        map.insert("actor_2".into(), json!(self.actor_2));
        map.insert("actor_3".into(), json!(self.actor_3));
        map.insert("location_funfact".into(), self.location_funfact.clone());
        map.insert("movie_like_counter".into(), json!(self.movie_like_counter));
        Value::Object(map)
    }

    /// Titles matching any token as a case-insensitive substring. Matching
    /// happens in SQL; tokens arrive raw and are wrapped in % here.
    pub async fn find_by_title_tokens(
        db: &PgPool,
        tokens: &[String],
    ) -> sqlx::Result<Vec<(Uuid, String)>> {
        let patterns: Vec<String> = tokens
            .iter()
            .map(|t| format!("%{}%", t.to_uppercase()))
            .collect();
        sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, title FROM t_movie WHERE upper(title) LIKE ANY($1)",
        )
        .bind(&patterns)
        .fetch_all(db)
        .await
    }

    /// Every movie's location map. Location search filters in-process over
    /// the full catalogue; no index is maintained.
    pub async fn all_location_maps(db: &PgPool) -> sqlx::Result<Vec<(Uuid, Value)>> {
        sqlx::query_as::<_, (Uuid, Value)>("SELECT id, location_funfact FROM t_movie")
            .fetch_all(db)
            .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Movie>> {
        sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, release_year, production_company, distributor, director,
                   writer, actor_1, actor_2, actor_3, location_funfact, movie_like_counter
            FROM t_movie
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_value_renders_id_as_string_and_keeps_funfacts() {
        let id = Uuid::new_v4();
        let movie = Movie {
            id,
            title: "GirlBoss".into(),
            release_year: Some(2017),
            production_company: None,
            distributor: None,
            director: None,
            writer: None,
            actor_1: Some("Britt Robertson".into()),
            actor_2: None,
            actor_3: None,
            location_funfact: json!({"Bay Bridge": "Opened in 1936."}),
            movie_like_counter: Some(0),
        };
        let value = movie.to_value();
        assert_eq!(value["id"], json!(id.to_string()));
        assert_eq!(value["title"], "GirlBoss");
        assert_eq!(value["location_funfact"]["Bay Bridge"], "Opened in 1936.");
    }
}
