use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxApplicationRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxMentorshipRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxBlogRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxMessageRepo {
    pub pool: SqlitePool,
}
