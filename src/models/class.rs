// src/models/class.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::cmp::Ordering;
use validator::Validate;

/// Turma (ex: "6A").
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewClass {
    #[validate(length(min = 1, max = 32, message = "O nome da turma é obrigatório"))]
    pub name: String,
}

/// Comparação de nomes de turma sensível ao idioma: ignora acentos e
/// maiúsculas na primeira passagem, e desempata pelo texto original.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn collation_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}
