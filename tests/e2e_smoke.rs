// tests/e2e_smoke.rs
//
// Upload → dashboard → report → delete, all through the Router.

use ev_sentiment_explorer::api::{self, AppState};
use serde_json::{json, Value};
use shuttle_axum::axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt; // for `oneshot` (tower 0.5 with features=["util"])

const DATASET: &str = "\u{FEFF}ID,Date,Region,Source,User,text,Aspect_Category,Keywords_Extracted\r\n\
1,2024-05-01,Jakarta,Twitter,@a,\"Gesits puas, irit dan mau beli lagi\",Price,irit\r\n\
2,2024-05-02,Bandung,Tiktok,@b,Viar Q1 di Bandung bikin ragu soal baterai,Product,baterai\r\n\
3,2024-05-03,Medan,Youtube,@c,Polytron Fox-R takut mogok pas banjir,Product,banjir\r\n\
4,2024-05-04,Bali,Twitter,@d,  ,Price,\r\n\
5,2024-05-05,Jakarta,Twitter,@e,\"Selis aman, garansi jelas, percaya\",People,garansi\r\n";

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn smoke_upload_dashboard_report() {
    let app: Router = api::create_router(AppState::in_memory());

    let req = Request::builder()
        .method("POST")
        .uri("/upload")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "filename": "reviews.csv", "content": DATASET }).to_string(),
        ))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let up: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(up["valid_count"], 4);
    assert_eq!(up["skipped_count"], 1);

    let (status, body) = send(&app, Request::get("/dashboard").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let dash: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(dash["total_documents"], 4);

    let intention = &dash["intention"];
    let total = intention["high"].as_u64().unwrap()
        + intention["medium"].as_u64().unwrap()
        + intention["low"].as_u64().unwrap();
    assert_eq!(total, 4);

    // one document per emotion except interest
    let emotions = dash["emotions"].as_array().unwrap();
    let count = |name: &str| {
        emotions
            .iter()
            .find(|e| e["emotion"] == name)
            .and_then(|e| e["count"].as_u64())
            .unwrap()
    };
    assert_eq!(count("satisfaction"), 1);
    assert_eq!(count("skepticism"), 1);
    assert_eq!(count("fear"), 1);
    assert_eq!(count("trust"), 1);
    assert_eq!(count("interest"), 0);

    // four brands tied at one mention, canonical order preserved
    let brands = dash["brands"].as_array().unwrap();
    let names: Vec<&str> = brands.iter().take(4).map(|b| b["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Gesits", "Viar", "Selis", "Polytron"]);

    let matrix = &dash["psycho_social_matrix"];
    assert_eq!(matrix["rows"].as_array().unwrap().len(), 6);
    assert!(matrix["cells"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r.as_array().unwrap().len() == 5));

    let (status, body) = send(&app, Request::get("/report").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let md = String::from_utf8(body).unwrap();
    assert!(md.contains("**Documents analyzed:** 4"));
    assert!(md.contains("| Gesits | 1 |"));

    let del = Request::builder()
        .method("DELETE")
        .uri("/documents/0")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, del).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Request::get("/dashboard").body(Body::empty()).unwrap()).await;
    let dash: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(dash["total_documents"], 3);
}
