use sqlx::FromRow;

#[derive(Debug, FromRow, Clone)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub position: String,
    pub rating: f64,
    pub shirt_number: i32,
    pub goals: i64,
    pub image: String,
    pub image1: String,
    pub image2: String,
    pub created_at: i64,
    pub updated_at: i64,
}
