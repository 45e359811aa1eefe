// src/services/student_service.rs
use crate::{
    error::{AppError, AppResult},
    models::student::{NewStudent, Student},
};
use sqlx::SqlitePool;

pub async fn find_all_students(db_pool: &SqlitePool) -> AppResult<Vec<Student>> {
    let students = sqlx::query_as::<_, Student>(
        "SELECT id, name, class_id FROM students ORDER BY id ASC",
    )
    .fetch_all(db_pool)
    .await?;
    Ok(students)
}

/// Alunos de uma turma, por ordem de inserção.
pub async fn find_students_by_class(db_pool: &SqlitePool, class_id: i64) -> AppResult<Vec<Student>> {
    tracing::debug!("Buscando alunos da turma {}", class_id);
    let students = sqlx::query_as::<_, Student>(
        "SELECT id, name, class_id FROM students WHERE class_id = ?1 ORDER BY id ASC",
    )
    .bind(class_id)
    .fetch_all(db_pool)
    .await?;
    Ok(students)
}

pub async fn find_student_by_id(db_pool: &SqlitePool, student_id: i64) -> AppResult<Option<Student>> {
    let student = sqlx::query_as::<_, Student>(
        "SELECT id, name, class_id FROM students WHERE id = ?1",
    )
    .bind(student_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(student)
}

pub async fn create_student(db_pool: &SqlitePool, new_student: &NewStudent) -> AppResult<Student> {
    tracing::info!("Criando aluno '{}' na turma {}", new_student.name, new_student.class_id);
    let student = sqlx::query_as::<_, Student>(
        "INSERT INTO students (name, class_id) VALUES (?1, ?2) RETURNING id, name, class_id",
    )
    .bind(&new_student.name)
    .bind(new_student.class_id)
    .fetch_one(db_pool)
    .await?;
    Ok(student)
}

/// Insere vários alunos numa só transação, devolvendo-os pela ordem de entrada.
/// Lista vazia não toca na base de dados.
pub async fn create_many_students(
    db_pool: &SqlitePool,
    new_students: &[NewStudent],
) -> AppResult<Vec<Student>> {
    if new_students.is_empty() {
        return Ok(Vec::new());
    }
    tracing::info!("Importando {} alunos...", new_students.len());

    let mut tx = db_pool.begin().await?;
    let mut inserted = Vec::with_capacity(new_students.len());
    for new_student in new_students {
        let student = sqlx::query_as::<_, Student>(
            "INSERT INTO students (name, class_id) VALUES (?1, ?2) RETURNING id, name, class_id",
        )
        .bind(&new_student.name)
        .bind(new_student.class_id)
        .fetch_one(&mut *tx)
        .await?;
        inserted.push(student);
    }
    tx.commit().await?;

    tracing::info!("✅ {} alunos importados.", inserted.len());
    Ok(inserted)
}

/// Substitui nome e turma de um aluno.
pub async fn update_student(
    db_pool: &SqlitePool,
    student_id: i64,
    data: &NewStudent,
) -> AppResult<Student> {
    tracing::info!("Atualizando aluno {}", student_id);
    let updated = sqlx::query_as::<_, Student>(
        r#"
        UPDATE students SET name = ?1, class_id = ?2
        WHERE id = ?3
        RETURNING id, name, class_id
        "#,
    )
    .bind(&data.name)
    .bind(data.class_id)
    .bind(student_id)
    .fetch_optional(db_pool)
    .await?;

    updated.ok_or_else(|| {
        tracing::warn!("Falha ao atualizar: aluno {} não encontrado.", student_id);
        AppError::NotFound("Aluno não encontrado".into())
    })
}

/// Remove os relatórios do aluno e depois o próprio aluno, na mesma transação.
pub async fn delete_student(db_pool: &SqlitePool, student_id: i64) -> AppResult<()> {
    tracing::info!("Removendo aluno {} e os seus relatórios", student_id);
    let mut tx = db_pool.begin().await?;

    let removed_reports = sqlx::query("DELETE FROM reports WHERE student_id = ?1")
        .bind(student_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let removed_students = sqlx::query("DELETE FROM students WHERE id = ?1")
        .bind(student_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed_students == 0 {
        tx.rollback().await?;
        tracing::warn!("Falha ao remover: aluno {} não encontrado.", student_id);
        return Err(AppError::NotFound("Aluno não encontrado".into()));
    }

    tx.commit().await?;
    tracing::info!(
        "✅ Aluno {} removido ({} relatórios apagados).",
        student_id,
        removed_reports
    );
    Ok(())
}

pub async fn count_students(db_pool: &SqlitePool) -> AppResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
        .fetch_one(db_pool)
        .await?;
    Ok(total)
}
