//! Employee mapper: every statement issued against `tbl_emp`.

use entity::{
    department,
    employee::{self, Gender},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use serde::Serialize;
use tracing::debug;

use crate::{
    DbError, DbResult,
    page::{PageInfo, PageRequest},
};

/// An employee row with its department joined in when one is assigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Employee {
    #[serde(flatten)]
    pub record: employee::Model,
    pub department: Option<department::Model>,
}

impl From<(employee::Model, Option<department::Model>)> for Employee {
    fn from((record, department): (employee::Model, Option<department::Model>)) -> Self {
        Self { record, department }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEmployee {
    pub emp_name: String,
    pub gender: Gender,
    pub email: String,
    pub d_id: Option<i32>,
}

/// Fields to write in a selective update; `None` leaves the column alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub emp_name: Option<String>,
    pub gender: Option<Gender>,
    pub email: Option<String>,
    pub d_id: Option<i32>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.emp_name.is_none() && self.gender.is_none() && self.email.is_none() && self.d_id.is_none()
    }

    fn into_active_model(self) -> employee::ActiveModel {
        employee::ActiveModel {
            emp_name: self.emp_name.map_or(NotSet, Set),
            gender: self.gender.map_or(NotSet, Set),
            email: self.email.map_or(NotSet, Set),
            d_id: self.d_id.map_or(NotSet, |d_id| Set(Some(d_id))),
            ..Default::default()
        }
    }
}

/// Insert one employee; the store assigns `emp_id`.
pub async fn insert<C: ConnectionTrait>(db: &C, new: NewEmployee) -> DbResult<employee::Model> {
    let (emp_name, d_id) = (new.emp_name.clone(), new.d_id);
    let model = employee::ActiveModel {
        emp_name: Set(new.emp_name),
        gender: Set(new.gender),
        email: Set(new.email),
        d_id: Set(new.d_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| write_error(err, &emp_name, d_id))?;
    debug!(emp_id = model.emp_id, "employee inserted");
    Ok(model)
}

/// Multi-row insert used by fixture seeding. Returns the number of rows written.
pub async fn insert_batch<C: ConnectionTrait>(db: &C, rows: Vec<NewEmployee>) -> DbResult<u64> {
    if rows.is_empty() {
        return Ok(0);
    }
    let count = rows.len() as u64;
    let models = rows.into_iter().map(|new| employee::ActiveModel {
        emp_name: Set(new.emp_name),
        gender: Set(new.gender),
        email: Set(new.email),
        d_id: Set(new.d_id),
        ..Default::default()
    });
    employee::Entity::insert_many(models).exec(db).await?;
    Ok(count)
}

/// Write only the supplied columns of `emp_id`. No statement is issued when
/// `changes` is empty. Returns the affected row count.
pub async fn update_selective<C: ConnectionTrait>(
    db: &C,
    emp_id: i32,
    changes: EmployeeChanges,
) -> DbResult<u64> {
    if changes.is_empty() {
        debug!(emp_id, "selective update without fields skipped");
        return Ok(0);
    }
    let emp_name = changes.emp_name.clone().unwrap_or_default();
    let d_id = changes.d_id;
    let active = changes.into_active_model();
    let result = employee::Entity::update_many()
        .set(active)
        .filter(employee::Column::EmpId.eq(emp_id))
        .exec(db)
        .await
        .map_err(|err| write_error(err, &emp_name, d_id))?;
    Ok(result.rows_affected)
}

pub async fn select_by_id_with_dept<C: ConnectionTrait>(
    db: &C,
    emp_id: i32,
) -> DbResult<Option<Employee>> {
    let row = employee::Entity::find_by_id(emp_id)
        .find_also_related(department::Entity)
        .one(db)
        .await?;
    Ok(row.map(Employee::from))
}

/// Count the full result set, then load only the requested page, ordered by
/// `emp_id`.
pub async fn select_page_with_dept<C: ConnectionTrait>(
    db: &C,
    request: PageRequest,
) -> DbResult<PageInfo<Employee>> {
    let paginator = employee::Entity::find()
        .find_also_related(department::Entity)
        .order_by_asc(employee::Column::EmpId)
        .paginate(db, request.page_size);
    let counts = paginator.num_items_and_pages().await?;
    let page_num = request.resolve(counts.number_of_pages);
    let rows = paginator.fetch_page(page_num - 1).await?;
    let list = rows.into_iter().map(Employee::from).collect();
    Ok(PageInfo::new(request, counts.number_of_items, list))
}

pub async fn exists_by_name<C: ConnectionTrait>(db: &C, emp_name: &str) -> DbResult<bool> {
    let count = employee::Entity::find()
        .filter(employee::Column::EmpName.eq(emp_name))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, emp_id: i32) -> DbResult<u64> {
    let result = employee::Entity::delete_by_id(emp_id).exec(db).await?;
    Ok(result.rows_affected)
}

/// Remove every listed id with a single `DELETE ... WHERE emp_id IN (..)`.
pub async fn delete_batch<C: ConnectionTrait>(db: &C, emp_ids: &[i32]) -> DbResult<u64> {
    if emp_ids.is_empty() {
        return Ok(0);
    }
    let result = employee::Entity::delete_many()
        .filter(employee::Column::EmpId.is_in(emp_ids.iter().copied()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

fn write_error(err: DbErr, emp_name: &str, d_id: Option<i32>) -> DbError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DbError::NameTaken(emp_name.to_string()),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => DbError::UnknownDepartment(d_id),
        _ => DbError::Query(err),
    }
}
