// src/web/report_handlers.rs
use crate::{
    error::{AppError, AppResult, FieldError},
    models::report::{NewReport, NewReportPayload, Report, ReportQuery},
    services::{report_service, student_service, user_service},
    state::AppState,
    web::{
        extract::{ApiQuery, ValidatedJson},
        mw_auth::UserId,
    },
};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};

// GET /api/reports?studentId=|classId=
pub async fn list_reports(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> AppResult<Json<Vec<Report>>> {
    let reports = match (query.student_id, query.class_id) {
        (Some(student_id), _) => report_service::find_reports_by_student(&state.db_pool, student_id).await?,
        (None, Some(class_id)) => report_service::find_reports_by_class(&state.db_pool, class_id).await?,
        (None, None) => report_service::find_all_reports(&state.db_pool).await?,
    };
    Ok(Json(reports))
}

// POST /api/reports
pub async fn create_report(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    ValidatedJson(payload): ValidatedJson<NewReportPayload>,
) -> AppResult<(StatusCode, Json<Report>)> {
    if payload.content.trim().is_empty() {
        return Err(AppError::Validation(vec![FieldError {
            field: "content".into(),
            message: "Descreva a ocorrência".into(),
        }]));
    }
    if student_service::find_student_by_id(&state.db_pool, payload.student_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest("Aluno não encontrado".into()));
    }

    let author = user_service::find_user_by_id(&state.db_pool, user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let new_report = NewReport::from_payload(payload, author.id, author.username);
    let report = report_service::create_report(&state.db_pool, &new_report).await?;
    Ok((StatusCode::CREATED, Json(report)))
}
