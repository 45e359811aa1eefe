// src/models/student.rs
use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub class_id: i64,
}

/// Dados para criar ou substituir um aluno (nome + turma).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    #[validate(length(min = 1, max = 120, message = "O nome do aluno é obrigatório"))]
    pub name: String,
    #[validate(range(min = 1, message = "Turma inválida"))]
    pub class_id: i64,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, class_id: i64) -> Self {
        Self { name: name.into(), class_id }
    }

    /// Devolve uma cópia com o nome sem espaços nas pontas.
    pub fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.class_id)
    }
}

// Corpo do POST /api/students/bulk
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkStudentsPayload {
    #[validate(range(min = 1, message = "Selecione uma turma"))]
    pub class_id: i64,
    #[validate(length(min = 1, message = "Digite pelo menos um nome de aluno"))]
    pub names: Vec<String>,
}

impl BulkStudentsPayload {
    /// Nomes sem espaços nas pontas, descartando linhas vazias.
    pub fn to_new_students(&self) -> Vec<NewStudent> {
        self.names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| NewStudent::new(name, self.class_id))
            .collect()
    }

    /// Aplica a cada nome as mesmas regras da criação individual.
    /// As linhas são contadas a partir de 1, incluindo as vazias.
    pub fn invalid_names(&self) -> Vec<FieldError> {
        self.names
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.trim().is_empty())
            .filter(|(_, name)| NewStudent::new(name.trim(), self.class_id).validate().is_err())
            .map(|(line, _)| FieldError {
                field: "names".into(),
                message: format!(
                    "O nome na linha {} tem mais de {} caracteres",
                    line + 1,
                    MAX_STUDENT_NAME_LEN
                ),
            })
            .collect()
    }
}

// Tem de acompanhar o `max` de `NewStudent::name`
pub const MAX_STUDENT_NAME_LEN: usize = 120;

// `?classId=` vazio ou não numérico conta como ausente
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentQuery {
    #[serde(default, deserialize_with = "super::lenient_id")]
    pub class_id: Option<i64>,
}
