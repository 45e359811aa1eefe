// src/services/report_service.rs
use crate::{
    error::AppResult,
    models::report::{NewReport, Report},
};
use sqlx::SqlitePool;

const REPORT_COLUMNS: &str =
    "id, student_id, content, date, reporter_type, created_by, reporter_name";

pub async fn find_all_reports(db_pool: &SqlitePool) -> AppResult<Vec<Report>> {
    let sql = format!("SELECT {} FROM reports ORDER BY id ASC", REPORT_COLUMNS);
    let reports = sqlx::query_as::<_, Report>(&sql).fetch_all(db_pool).await?;
    Ok(reports)
}

pub async fn find_reports_by_student(db_pool: &SqlitePool, student_id: i64) -> AppResult<Vec<Report>> {
    let sql = format!(
        "SELECT {} FROM reports WHERE student_id = ?1 ORDER BY id ASC",
        REPORT_COLUMNS
    );
    let reports = sqlx::query_as::<_, Report>(&sql)
        .bind(student_id)
        .fetch_all(db_pool)
        .await?;
    Ok(reports)
}

/// Relatórios de todos os alunos da turma, agrupados por aluno (ordem de
/// inserção dos alunos e, dentro de cada um, dos relatórios).
pub async fn find_reports_by_class(db_pool: &SqlitePool, class_id: i64) -> AppResult<Vec<Report>> {
    tracing::debug!("Buscando relatórios da turma {}", class_id);
    let reports = sqlx::query_as::<_, Report>(
        r#"
        SELECT r.id, r.student_id, r.content, r.date, r.reporter_type, r.created_by, r.reporter_name
        FROM reports r
        JOIN students s ON s.id = r.student_id
        WHERE s.class_id = ?1
        ORDER BY s.id ASC, r.id ASC
        "#,
    )
        .bind(class_id)
        .fetch_all(db_pool)
        .await?;
    Ok(reports)
}

pub async fn create_report(db_pool: &SqlitePool, new_report: &NewReport) -> AppResult<Report> {
    tracing::info!(
        "Registando ocorrência para aluno {} ({} por {})",
        new_report.student_id,
        new_report.reporter_type.as_str(),
        new_report.reporter_name
    );
    let sql = format!(
        r#"
        INSERT INTO reports (student_id, content, date, reporter_type, created_by, reporter_name)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING {}
        "#,
        REPORT_COLUMNS
    );
    let report = sqlx::query_as::<_, Report>(&sql)
        .bind(new_report.student_id)
        .bind(&new_report.content)
        .bind(new_report.date)
        .bind(new_report.reporter_type)
        .bind(new_report.created_by)
        .bind(&new_report.reporter_name)
        .fetch_one(db_pool)
        .await?;
    Ok(report)
}

pub async fn count_reports(db_pool: &SqlitePool) -> AppResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reports")
        .fetch_one(db_pool)
        .await?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::test_pool,
        models::{report::ReporterType, student::NewStudent},
        services::{student_service, test_support},
    };
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn created_report_round_trips_through_the_table() {
        let pool = test_pool().await;
        let fixture = test_support::seed_class_with_student(&pool, "7A", "Clara").await;
        let date = Utc.with_ymd_and_hms(2025, 3, 10, 13, 45, 0).unwrap();

        let created = create_report(
            &pool,
            &NewReport {
                student_id: fixture.student.id,
                content: "Saiu da sala sem autorização".into(),
                date,
                reporter_type: ReporterType::Lider,
                created_by: fixture.user.id,
                reporter_name: fixture.user.username.clone(),
            },
        )
        .await
        .unwrap();

        let stored = find_reports_by_student(&pool, fixture.student.id).await.unwrap();
        assert_eq!(stored, vec![created.clone()]);
        assert_eq!(created.date, date);
        assert_eq!(created.reporter_type, ReporterType::Lider);
    }

    #[tokio::test]
    async fn reports_by_class_unions_students() {
        let pool = test_pool().await;
        let fixture = test_support::seed_class_with_student(&pool, "6A", "Ana").await;
        let beto = student_service::create_student(&pool, &NewStudent::new("Beto", fixture.class.id))
            .await
            .unwrap();
        let other = test_support::seed_class_with_student(&pool, "6B", "Caio").await;

        test_support::add_report(&pool, beto.id, fixture.user.id, "b1").await;
        test_support::add_report(&pool, fixture.student.id, fixture.user.id, "a1").await;
        test_support::add_report(&pool, other.student.id, other.user.id, "c1").await;
        test_support::add_report(&pool, fixture.student.id, fixture.user.id, "a2").await;

        let contents: Vec<String> = find_reports_by_class(&pool, fixture.class.id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(contents, vec!["a1", "a2", "b1"]);
        assert_eq!(count_reports(&pool).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn class_without_students_has_no_reports() {
        let pool = test_pool().await;
        assert!(find_reports_by_class(&pool, 12345).await.unwrap().is_empty());
    }
}
