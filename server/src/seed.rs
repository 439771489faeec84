//! Fixture data: a few departments and generated employees.

use anyhow::{Context, Result};
use entity::employee::Gender;
use platform_db::{DbPool, NewEmployee, departments, employees};
use rand::{Rng, seq::SliceRandom};
use tracing::info;
use uuid::Uuid;

const DEPARTMENTS: &[&str] = &["Development", "Testing", "Human Resources"];
const BATCH_SIZE: usize = 200;

pub async fn run(pool: &DbPool, employee_count: usize) -> Result<()> {
    let mut dept_ids = Vec::with_capacity(DEPARTMENTS.len());
    for name in DEPARTMENTS {
        let dept = departments::ensure(pool, name)
            .await
            .with_context(|| format!("seeding department {name}"))?;
        dept_ids.push(dept.dept_id);
    }

    let rows = generate_employees(employee_count, &dept_ids);
    let mut inserted = 0;
    for chunk in rows.chunks(BATCH_SIZE) {
        inserted += employees::insert_batch(pool, chunk.to_vec())
            .await
            .context("seeding employees")?;
    }
    info!(departments = dept_ids.len(), employees = inserted, "seed data written");
    Ok(())
}

/// Names are a random 5-character prefix plus the row index, which keeps
/// them unique within one run and inside the latin name rule.
fn generate_employees(count: usize, dept_ids: &[i32]) -> Vec<NewEmployee> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let prefix = Uuid::new_v4().simple().to_string();
            let emp_name = format!("{}{}", &prefix[..5], i);
            let gender = if rng.gen_bool(0.5) {
                Gender::Male
            } else {
                Gender::Female
            };
            NewEmployee {
                email: format!("{emp_name}@example.com"),
                emp_name,
                gender,
                d_id: dept_ids.choose(&mut rng).copied(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::is_valid_emp_name;

    #[test]
    fn generated_names_pass_the_name_rule() {
        let rows = generate_employees(50, &[1, 2, 3]);
        assert_eq!(rows.len(), 50);
        for row in &rows {
            assert!(is_valid_emp_name(&row.emp_name), "{}", row.emp_name);
            assert!(matches!(row.d_id, Some(1..=3)));
        }
    }
}
