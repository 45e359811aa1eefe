// src/models/report.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Quem presenciou a ocorrência.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum ReporterType {
    #[serde(rename = "Líder")]
    #[sqlx(rename = "Líder")]
    Lider,
    Vice,
    Professor,
}

impl ReporterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReporterType::Lider => "Líder",
            ReporterType::Vice => "Vice",
            ReporterType::Professor => "Professor",
        }
    }
}

/// Relatório de ocorrência. Imutável depois de criado.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    pub student_id: i64,
    pub content: String,
    pub date: DateTime<Utc>,
    pub reporter_type: ReporterType,
    pub created_by: i64,
    pub reporter_name: String,
}

// Corpo do POST /api/reports
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewReportPayload {
    #[validate(range(min = 1, message = "Selecione um aluno"))]
    pub student_id: i64,
    #[serde(alias = "description")]
    #[validate(length(min = 1, max = 5000, message = "Descreva a ocorrência"))]
    pub content: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    pub reporter_type: ReporterType,
}

/// Registo pronto a inserir, já com o autor resolvido a partir da sessão.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub student_id: i64,
    pub content: String,
    pub date: DateTime<Utc>,
    pub reporter_type: ReporterType,
    pub created_by: i64,
    pub reporter_name: String,
}

impl NewReport {
    pub fn from_payload(payload: NewReportPayload, created_by: i64, reporter_name: String) -> Self {
        Self {
            student_id: payload.student_id,
            content: payload.content.trim().to_string(),
            date: payload.date.unwrap_or_else(Utc::now),
            reporter_type: payload.reporter_type,
            created_by,
            reporter_name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    #[serde(default, deserialize_with = "super::lenient_id")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "super::lenient_id")]
    pub class_id: Option<i64>,
}
