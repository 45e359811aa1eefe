// src/lib.rs
//! Serviço de registo de ocorrências escolares: turmas, alunos, relatórios e
//! administração, expostos como API JSON em `/api`.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod web;
