// src/services/dashboard_service.rs
use crate::{
    error::AppResult,
    models::{
        class::Class,
        dashboard::{ClassWithStudents, StudentWithReports},
        report::Report,
        student::Student,
    },
    services::{class_service, report_service, student_service},
};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Todas as turmas (ordenadas pelo nome), cada uma com os seus alunos e os
/// relatórios de cada aluno.
///
/// Faz uma consulta por tabela e junta tudo em memória. O resultado é o
/// mesmo que buscar os relatórios aluno a aluno.
pub async fn classes_with_students(db_pool: &SqlitePool) -> AppResult<Vec<ClassWithStudents>> {
    tracing::debug!("Montando dashboard completo...");
    let classes = class_service::find_all_classes(db_pool).await?;
    let students = student_service::find_all_students(db_pool).await?;
    let reports = report_service::find_all_reports(db_pool).await?;
    Ok(assemble(classes, students, reports))
}

/// O mesmo formato para uma única turma; `None` se a turma não existir.
pub async fn class_with_students(
    db_pool: &SqlitePool,
    class_id: i64,
) -> AppResult<Option<ClassWithStudents>> {
    let Some(class) = class_service::find_class_by_id(db_pool, class_id).await? else {
        return Ok(None);
    };
    let students = students_with_reports(db_pool, class_id).await?;
    Ok(Some(ClassWithStudents { class, students }))
}

/// Alunos de uma turma com os respetivos relatórios e contagem.
pub async fn students_with_reports(
    db_pool: &SqlitePool,
    class_id: i64,
) -> AppResult<Vec<StudentWithReports>> {
    let students = student_service::find_students_by_class(db_pool, class_id).await?;
    let reports = report_service::find_reports_by_class(db_pool, class_id).await?;

    let mut by_student = group_reports(reports);
    Ok(students
        .into_iter()
        .map(|student| {
            let reports = by_student.remove(&student.id).unwrap_or_default();
            StudentWithReports::new(student, reports)
        })
        .collect())
}

/// Junta as três listas planas na árvore turma → alunos → relatórios.
/// Mantém a ordem recebida em cada nível.
pub fn assemble(classes: Vec<Class>, students: Vec<Student>, reports: Vec<Report>) -> Vec<ClassWithStudents> {
    let mut reports_by_student = group_reports(reports);

    let mut students_by_class: HashMap<i64, Vec<StudentWithReports>> = HashMap::new();
    for student in students {
        let reports = reports_by_student.remove(&student.id).unwrap_or_default();
        students_by_class
            .entry(student.class_id)
            .or_default()
            .push(StudentWithReports::new(student, reports));
    }

    classes
        .into_iter()
        .map(|class| {
            let students = students_by_class.remove(&class.id).unwrap_or_default();
            ClassWithStudents { class, students }
        })
        .collect()
}

fn group_reports(reports: Vec<Report>) -> HashMap<i64, Vec<Report>> {
    let mut grouped: HashMap<i64, Vec<Report>> = HashMap::new();
    for report in reports {
        grouped.entry(report.student_id).or_default().push(report);
    }
    grouped
}
