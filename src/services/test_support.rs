// src/services/test_support.rs
// Dados de apoio partilhados pelos testes dos serviços.
use crate::models::{
    class::{Class, NewClass},
    report::{NewReport, Report, ReporterType},
    student::{NewStudent, Student},
    user::{NewUser, User},
};
use crate::services::{class_service, report_service, student_service, user_service};
use chrono::Utc;
use sqlx::SqlitePool;

pub struct Fixture {
    pub class: Class,
    pub student: Student,
    pub user: User,
}

/// Cria uma turma, um aluno nela e um professor (`prof.<turma>`).
pub async fn seed_class_with_student(pool: &SqlitePool, class_name: &str, student_name: &str) -> Fixture {
    let class = class_service::create_class(pool, &NewClass { name: class_name.into() })
        .await
        .expect("turma criada");
    let student = student_service::create_student(pool, &NewStudent::new(student_name, class.id))
        .await
        .expect("aluno criado");
    let user = user_service::create_user(
        pool,
        &NewUser {
            username: format!("prof.{}", class_name.to_lowercase()),
            password: "1234".into(),
            is_admin: false,
        },
        4,
    )
    .await
    .expect("professor criado");
    Fixture { class, student, user }
}

pub async fn add_report(pool: &SqlitePool, student_id: i64, user_id: i64, content: &str) -> Report {
    report_service::create_report(
        pool,
        &NewReport {
            student_id,
            content: content.into(),
            date: Utc::now(),
            reporter_type: ReporterType::Professor,
            created_by: user_id,
            reporter_name: "prof".into(),
        },
    )
    .await
    .expect("relatório criado")
}
