use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use retailflow_server::{build_router, AppState};

const SAMPLE_CSV: &str = "\
store_name,product_code,product_name,color,size,units_sold,units_in_stock
Harbor District,P-1001,Oxford Shirt,White,M,8,40
Midtown Central,P-1001,Oxford Shirt,White,M,15,25
";

const BOUNDARY: &str = "retailflow-test-boundary";

fn app() -> Router {
    build_router(AppState::new())
}

fn multipart_upload(filename: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {content}\r\n\
         --{b}--\r\n",
        b = BOUNDARY,
        name = filename,
        content = content,
    );
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_reports_the_service() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("RetailFlow Transfer API"));
    assert!(body.contains("healthy"));
}

#[tokio::test]
async fn analyze_before_upload_is_rejected() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("no usable rows"));
}

#[tokio::test]
async fn export_before_analysis_is_rejected() {
    let response = app()
        .oneshot(Request::builder().uri("/export").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("no analysis has been run yet"));
}

#[tokio::test]
async fn template_is_a_csv_download() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/template")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(disposition.contains("attachment"));
    let body = body_string(response).await;
    assert!(body.starts_with("store_name,product_code,product_name"));
}

#[tokio::test]
async fn non_csv_upload_is_rejected() {
    let response = app()
        .oneshot(multipart_upload("inventory.xlsx", SAMPLE_CSV))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("only CSV files are supported"));
}

#[tokio::test]
async fn upload_with_missing_columns_names_them() {
    let bad_csv = "store_name,units_sold\nHarbor District,8\n";
    let response = app()
        .oneshot(multipart_upload("inventory.csv", bad_csv))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("missing required columns"));
    assert!(body.contains("product_name"));
    assert!(body.contains("units_in_stock"));
}

#[tokio::test]
async fn upload_analyze_stores_export_flow() {
    // One router instance so every request shares the same session.
    let app = app();

    let response = app
        .clone()
        .oneshot(multipart_upload("inventory.csv", SAMPLE_CSV))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("\"record_count\":2"));
    assert!(body.contains("\"store_count\":2"));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Oxford Shirt"));
    assert!(body.contains("\"quantity\":5"));
    assert!(body.contains("\"binding_rule\":\"flat_unit_cap\""));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/stores").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Harbor District"));
    assert!(body.contains("\"sell_through_pct\":16.7"));

    let response = app
        .oneshot(Request::builder().uri("/export").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("# Transfer Recommendations"));
    assert!(body.contains("Harbor District,Midtown Central,5"));
}

#[tokio::test]
async fn top_parameter_truncates_but_keeps_totals() {
    let app = app();

    let csv_data = "\
store_name,product_code,product_name,color,size,units_sold,units_in_stock
Harbor District,P-1001,Oxford Shirt,White,M,8,40
Midtown Central,P-1001,Oxford Shirt,White,M,15,25
Harbor District,P-6006,Field Cap,Olive,,1,20
Midtown Central,P-6006,Field Cap,Olive,,12,8
";
    let response = app
        .clone()
        .oneshot(multipart_upload("inventory.csv", csv_data))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze?top=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("\"total_recommendations\":2"));
    assert!(body.contains("\"shown_recommendations\":1"));
}
