mod user;
pub use user::*;
mod group;
pub use group::*;
mod post;
pub use post::*;
mod comment;
pub use comment::*;
mod follow;
pub use follow::*;

use sqlx::{Executor, SqlitePool};

pub async fn prepare_db(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(include_str!("sql/schema.sql")).await?;
    Ok(())
}
