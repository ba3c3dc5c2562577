use axum::{
    Router,
    body::Body,
    extract::Multipart,
    http::{StatusCode, header},
    response::Response,
    routing::post,
};
use std::collections::HashSet;
use std::error::Error;
use std::io::Write;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::grouping;
use crate::loader;
use crate::renderer;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Build the application router
///
/// Two endpoints, both multipart uploads answered with a DOCX attachment:
/// * `POST /generate` - attendance top sheet
/// * `POST /generate-subject-rolls` - subject-wise roster
pub fn router() -> Router {
    Router::new()
        .route("/generate", post(generate_top_sheet))
        .route("/generate-subject-rolls", post(generate_subject_roster))
        .layer(CorsLayer::permissive())
}

/// Bind and serve the application
///
/// # Arguments
/// * `addr` - Socket address to listen on, e.g. `127.0.0.1:5000`
pub async fn run(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, router()).await?;

    Ok(())
}

async fn generate_top_sheet(mut multipart: Multipart) -> Response {
    let mut excel = Vec::new();
    let mut subject_code = String::new();
    let mut absent_json = String::from("[]");

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        let name = field.name().unwrap_or("unknown").to_string();

        match name.as_str() {
            "excel" => excel = field.bytes().await.unwrap_or_default().to_vec(),
            "subjectCode" => subject_code = field.text().await.unwrap_or_default(),
            "absentRolls" => absent_json = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }

    match build_top_sheet(&excel, &subject_code, &absent_json) {
        Ok(buffer) => attachment_response(buffer, "TopSheet.docx"),
        Err(e) => {
            log::error!("Top sheet generation failed: {}", e);
            error_response("Error generating top sheet")
        }
    }
}

async fn generate_subject_roster(mut multipart: Multipart) -> Response {
    let mut excel = Vec::new();
    let mut subject_code = String::new();

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        let name = field.name().unwrap_or("unknown").to_string();

        match name.as_str() {
            "excel" => excel = field.bytes().await.unwrap_or_default().to_vec(),
            "subjectCode" => subject_code = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }

    match build_subject_roster(&excel, &subject_code) {
        Ok(buffer) => {
            let filename = format!("Subject-{}.docx", subject_code.trim());
            attachment_response(buffer, &filename)
        }
        Err(e) => {
            log::error!("Subject roster generation failed: {}", e);
            error_response("Error generating subject-wise roll list")
        }
    }
}

// Full top-sheet pipeline: spill the upload to a scoped temp file, extract
// the matching rolls, group at the present threshold, render. The temp file
// is removed when the handle drops, on the error path included.
fn build_top_sheet(
    excel: &[u8],
    subject_code: &str,
    absent_json: &str,
) -> Result<Vec<u8>, Box<dyn Error>> {
    if excel.is_empty() {
        return Err("No spreadsheet file received".into());
    }

    let subject_code: i64 = subject_code.trim().parse()?;
    let absent: HashSet<String> = serde_json::from_str::<Vec<String>>(absent_json)?
        .into_iter()
        .collect();

    let mut upload = tempfile::NamedTempFile::new()?;
    upload.write_all(excel)?;
    upload.flush()?;

    let rolls = loader::rolls_for_subject(upload.path(), subject_code)?;
    let groups = grouping::group_by_present(&rolls, &absent, grouping::PRESENT_THRESHOLD);

    renderer::top_sheet(&groups)
}

// Roster pipeline: same upload handling, no absentee semantics.
fn build_subject_roster(excel: &[u8], subject_code: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    if excel.is_empty() {
        return Err("No spreadsheet file received".into());
    }

    let subject_code: i64 = subject_code.trim().parse()?;

    let mut upload = tempfile::NamedTempFile::new()?;
    upload.write_all(excel)?;
    upload.flush()?;

    let rolls = loader::rolls_for_subject(upload.path(), subject_code)?;

    renderer::subject_roster(&rolls)
}

fn attachment_response(buffer: Vec<u8>, filename: &str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, DOCX_MIME)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", filename),
        )
        .body(Body::from(buffer))
        .unwrap()
}

fn error_response(message: &'static str) -> Response {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(message))
        .unwrap()
}
