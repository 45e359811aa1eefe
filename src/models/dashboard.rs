// src/models/dashboard.rs
use crate::models::{class::Class, report::Report, student::Student};
use serde::Serialize;

/// Aluno com os seus relatórios. `report_count` é sempre `reports.len()`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentWithReports {
    #[serde(flatten)]
    pub student: Student,
    pub reports: Vec<Report>,
    pub report_count: usize,
}

impl StudentWithReports {
    pub fn new(student: Student, reports: Vec<Report>) -> Self {
        let report_count = reports.len();
        Self { student, reports, report_count }
    }
}

/// Turma com todos os seus alunos (e respetivos relatórios).
#[derive(Debug, Clone, Serialize)]
pub struct ClassWithStudents {
    #[serde(flatten)]
    pub class: Class,
    pub students: Vec<StudentWithReports>,
}
