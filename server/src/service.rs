//! One method per use case, forwarding to the mappers in `platform_db`.

use anyhow::{Context, Result};
use entity::department;
use platform_db::{
    DbError, DbPool, Employee, EmployeeChanges, NewEmployee, PageInfo, PageRequest, departments,
    employees,
};
use tracing::{info, instrument};

/// Result of a write that may collide with an existing employee name or
/// point at a missing department.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOutcome<T> {
    Written(T),
    NameTaken,
    UnknownDepartment,
}

#[derive(Clone)]
pub struct EmployeeService {
    pool: DbPool,
}

impl EmployeeService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    #[instrument(name = "service.get_all", skip(self))]
    pub async fn get_all(&self, request: PageRequest) -> Result<PageInfo<Employee>> {
        employees::select_page_with_dept(&self.pool, request)
            .await
            .context("loading employee page")
    }

    #[instrument(name = "service.get_emp", skip(self))]
    pub async fn get_emp(&self, emp_id: i32) -> Result<Option<Employee>> {
        employees::select_by_id_with_dept(&self.pool, emp_id)
            .await
            .context("loading employee")
    }

    /// `true` when no employee is called `emp_name` yet. Advisory only.
    #[instrument(name = "service.check_user", skip(self))]
    pub async fn check_user(&self, emp_name: &str) -> Result<bool> {
        let taken = employees::exists_by_name(&self.pool, emp_name)
            .await
            .context("checking employee name")?;
        Ok(!taken)
    }

    /// Insert after a name pre-check; the unique index decides races.
    #[instrument(name = "service.save_emp", skip(self, new), fields(emp_name = %new.emp_name))]
    pub async fn save_emp(&self, new: NewEmployee) -> Result<WriteOutcome<i32>> {
        if !self.check_user(&new.emp_name).await? {
            return Ok(WriteOutcome::NameTaken);
        }
        match employees::insert(&self.pool, new).await {
            Ok(model) => {
                info!(emp_id = model.emp_id, "employee created");
                Ok(WriteOutcome::Written(model.emp_id))
            }
            Err(DbError::NameTaken(_)) => Ok(WriteOutcome::NameTaken),
            Err(DbError::UnknownDepartment(_)) => Ok(WriteOutcome::UnknownDepartment),
            Err(err) => Err(err).context("inserting employee"),
        }
    }

    #[instrument(name = "service.update_emp", skip(self, changes))]
    pub async fn update_emp(
        &self,
        emp_id: i32,
        changes: EmployeeChanges,
    ) -> Result<WriteOutcome<u64>> {
        match employees::update_selective(&self.pool, emp_id, changes).await {
            Ok(rows) => Ok(WriteOutcome::Written(rows)),
            Err(DbError::NameTaken(_)) => Ok(WriteOutcome::NameTaken),
            Err(DbError::UnknownDepartment(_)) => Ok(WriteOutcome::UnknownDepartment),
            Err(err) => Err(err).context("updating employee"),
        }
    }

    #[instrument(name = "service.delete_emp", skip(self))]
    pub async fn delete_emp(&self, emp_id: i32) -> Result<u64> {
        employees::delete_by_id(&self.pool, emp_id)
            .await
            .context("deleting employee")
    }

    #[instrument(name = "service.delete_batch", skip(self))]
    pub async fn delete_batch(&self, emp_ids: &[i32]) -> Result<u64> {
        employees::delete_batch(&self.pool, emp_ids)
            .await
            .context("deleting employees")
    }
}

#[derive(Clone)]
pub struct DepartmentService {
    pool: DbPool,
}

impl DepartmentService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    #[instrument(name = "service.get_depts", skip(self))]
    pub async fn get_depts(&self) -> Result<Vec<department::Model>> {
        departments::select_all(&self.pool)
            .await
            .context("loading departments")
    }
}
