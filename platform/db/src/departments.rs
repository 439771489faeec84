//! Department mapper. Departments are read-only over HTTP; `ensure` exists
//! for fixture seeding.

use entity::department;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::DbResult;

pub async fn select_all<C: ConnectionTrait>(db: &C) -> DbResult<Vec<department::Model>> {
    let rows = department::Entity::find()
        .order_by_asc(department::Column::DeptId)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn insert<C: ConnectionTrait>(db: &C, dept_name: &str) -> DbResult<department::Model> {
    let model = department::ActiveModel {
        dept_name: Set(dept_name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(model)
}

/// Return the department called `dept_name`, creating it when missing.
pub async fn ensure<C: ConnectionTrait>(db: &C, dept_name: &str) -> DbResult<department::Model> {
    let existing = department::Entity::find()
        .filter(department::Column::DeptName.eq(dept_name))
        .one(db)
        .await?;
    match existing {
        Some(model) => Ok(model),
        None => insert(db, dept_name).await,
    }
}
