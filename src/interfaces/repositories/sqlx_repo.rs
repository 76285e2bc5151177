use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxCvRepo {
    pub pool: PgPool,
}
