use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use rust_xlsxwriter::Workbook;
use tower::ServiceExt;

use topsheet::app::router;

const BOUNDARY: &str = "----topsheet-test-boundary";

// Enrollment workbook: rolls 101..=105, rolls 101-103 and 105 in subject 7.
fn enrollment_fixture() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.write_string(0, 0, "roll").unwrap();
    worksheet.write_string(0, 1, "code").unwrap();

    let rows = [(101.0, 7.0), (102.0, 7.0), (103.0, 7.0), (104.0, 9.0), (105.0, 7.0)];
    for (i, (roll, code)) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_number(r, 0, *roll).unwrap();
        worksheet.write_number(r, 1, *code).unwrap();
    }

    workbook.save_to_buffer().unwrap()
}

fn text_part(name: &str, value: &str) -> Vec<u8> {
    format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
        BOUNDARY, name, value
    )
    .into_bytes()
}

fn file_part(name: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut part = format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
        BOUNDARY, name, filename
    )
    .into_bytes();
    part.extend_from_slice(bytes);
    part.extend_from_slice(b"\r\n");
    part
}

fn multipart_request(uri: &str, parts: Vec<Vec<u8>>) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(&part);
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn generate_returns_top_sheet_attachment() {
    let request = multipart_request(
        "/generate",
        vec![
            file_part("excel", "enrollment.xlsx", &enrollment_fixture()),
            text_part("subjectCode", "7"),
            text_part("absentRolls", "[\"102\"]"),
        ],
    );

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(disposition, "attachment; filename=TopSheet.docx");

    let body = response.into_body().collect().await.unwrap().to_bytes();
    // DOCX is a ZIP archive.
    assert_eq!(&body[..2], b"PK");
}

#[tokio::test]
async fn generate_subject_rolls_names_file_after_subject() {
    let request = multipart_request(
        "/generate-subject-rolls",
        vec![
            file_part("excel", "enrollment.xlsx", &enrollment_fixture()),
            text_part("subjectCode", "7"),
        ],
    );

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(disposition, "attachment; filename=Subject-7.docx");

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..2], b"PK");
}

#[tokio::test]
async fn missing_upload_answers_with_fixed_error_text() {
    let request = multipart_request("/generate", vec![text_part("subjectCode", "7")]);

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Error generating top sheet");
}

#[tokio::test]
async fn malformed_absent_rolls_json_is_terminal() {
    let request = multipart_request(
        "/generate",
        vec![
            file_part("excel", "enrollment.xlsx", &enrollment_fixture()),
            text_part("subjectCode", "7"),
            text_part("absentRolls", "not json"),
        ],
    );

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unmatched_subject_code_is_not_an_error() {
    let request = multipart_request(
        "/generate",
        vec![
            file_part("excel", "enrollment.xlsx", &enrollment_fixture()),
            text_part("subjectCode", "999"),
            text_part("absentRolls", "[]"),
        ],
    );

    let response = router().oneshot(request).await.unwrap();
    // Zero matching rows degenerate to an empty document, not a failure.
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..2], b"PK");
}
