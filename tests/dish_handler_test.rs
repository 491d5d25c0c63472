mod common;

use axum::http::{Method, StatusCode};
use bson::oid::ObjectId;
use serde_json::json;

use common::TestApp;

fn soup() -> serde_json::Value {
    json!({
        "name": "Soup",
        "ingredients": [{ "name": "Water", "amount": 1, "unit": "L" }]
    })
}

#[tokio::test]
async fn test_create_dish_returns_generated_id() {
    let (app, token) = TestApp::with_auth();
    let (status, body) = app.request(Method::POST, "/api/dishes", Some(soup()), Some(&token)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Dish created successfully");
    let dish = &body["dish"];
    assert!(ObjectId::parse_str(dish["id"].as_str().unwrap()).is_ok());
    assert_eq!(dish["name"], "Soup");
    assert_eq!(dish["ingredients"].as_array().unwrap().len(), 1);
    assert_eq!(dish["ingredients"][0]["name"], "Water");
    assert!(dish["ingredients"][0]["id"].is_string());

    let (status, fetched) = app.get(&format!("/api/dishes/{}", dish["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Soup");
}

#[tokio::test]
async fn test_create_dish_reports_every_validation_error() {
    let (app, token) = TestApp::with_auth();
    let payload = json!({ "name": "", "category": 5, "ingredients": [{ "name": "Salt", "amount": -1, "unit": "g" }] });
    let (status, body) = app.request(Method::POST, "/api/dishes", Some(payload), Some(&token)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Dish name must be a non-empty string"));
    assert!(message.contains("Dish category must be a string"));
    assert!(message.contains("ingredients[0]: Ingredient amount must not be negative"));
    assert_eq!(app.get("/api/dishes").await.1["totalCount"], 0);
}

#[tokio::test]
async fn test_create_dish_with_malformed_json() {
    let (app, token) = TestApp::with_auth();
    let req = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/dishes")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_dish_id_is_not_found() {
    let (app, token) = TestApp::with_auth();
    let uri = format!("/api/dishes/{}", ObjectId::new().to_hex());

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Dish not found");

    let (status, _) = app.request(Method::PUT, &uri, Some(soup()), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.request(Method::PATCH, &uri, Some(json!({ "name": "X" })), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.request(Method::DELETE, &uri, None, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_dish_id_is_bad_request() {
    let (app, token) = TestApp::with_auth();

    let (status, body) = app.get("/api/dishes/not-an-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid dish id");

    let (status, _) = app.request(Method::DELETE, "/api/dishes/123", None, Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_undecodable_path_segment_gets_json_error() {
    let (app, token) = TestApp::with_auth();

    let (status, body) = app.get("/api/dishes/%FF").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
    assert!(body["message"].as_str().unwrap().starts_with("Invalid path"));

    let (status, body) = app.request(Method::DELETE, "/api/dishes/%FF%FE", None, Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
}

#[tokio::test]
async fn test_patch_requires_exactly_one_field() {
    let (app, token) = TestApp::with_auth();
    let dish = app.create_dish(soup(), Some(&token)).await;
    let uri = format!("/api/dishes/{}", dish["id"].as_str().unwrap());

    for payload in [json!({}), json!({ "name": "A", "price": 3 })] {
        let (status, body) = app.request(Method::PATCH, &uri, Some(payload), Some(&token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Only one field can be updated at a time");
    }
}

#[tokio::test]
async fn test_patch_category_changes_only_category() {
    let (app, token) = TestApp::with_auth();
    let dish = app
        .create_dish(
            json!({ "name": "Soup", "category": "Starter", "country": "France", "price": 4.5,
                    "ingredients": [{ "name": "Water", "amount": 1, "unit": "L" }] }),
            Some(&token),
        )
        .await;
    let uri = format!("/api/dishes/{}", dish["id"].as_str().unwrap());

    let (status, body) = app.request(Method::PATCH, &uri, Some(json!({ "category": "X" })), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Dish updated successfully");

    let mut expected = dish.clone();
    expected["category"] = json!("X");
    assert_eq!(body["dish"], expected);
}

#[tokio::test]
async fn test_patch_unknown_field_is_rejected() {
    let (app, token) = TestApp::with_auth();
    let dish = app.create_dish(soup(), Some(&token)).await;
    let uri = format!("/api/dishes/{}", dish["id"].as_str().unwrap());

    let (status, body) = app.request(Method::PATCH, &uri, Some(json!({ "colour": "red" })), Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Unknown dish field 'colour'"));
}

#[tokio::test]
async fn test_put_replaces_whole_dish() {
    let (app, token) = TestApp::with_auth();
    let dish = app
        .create_dish(json!({ "name": "Soup", "category": "Starter", "price": 4 }), Some(&token))
        .await;
    let id = dish["id"].as_str().unwrap();
    let uri = format!("/api/dishes/{}", id);

    let payload = json!({
        "name": "Stew",
        "price": "12.5",
        "ingredients": [{ "name": "Beef", "amount": 300, "unit": "grams" }]
    });
    let (status, body) = app.request(Method::PUT, &uri, Some(payload), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Dish updated successfully");
    assert_eq!(body["dish"]["id"], id);
    assert_eq!(body["dish"]["name"], "Stew");
    assert_eq!(body["dish"]["price"], 12.5);
    assert!(body["dish"]["category"].is_null());
    assert_eq!(body["dish"]["ingredients"][0]["name"], "Beef");
}

#[tokio::test]
async fn test_delete_returns_removed_dish() {
    let (app, token) = TestApp::with_auth();
    let dish = app.create_dish(soup(), Some(&token)).await;
    let uri = format!("/api/dishes/{}", dish["id"].as_str().unwrap());

    let (status, body) = app.request(Method::DELETE, &uri, None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Dish deleted successfully");
    assert_eq!(body["dish"], dish);

    assert_eq!(app.get(&uri).await.0, StatusCode::NOT_FOUND);
    let ingredients_uri = format!("{}/ingredients", uri);
    assert_eq!(app.get(&ingredients_uri).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_dishes_pagination() {
    let (app, token) = TestApp::with_auth();
    for i in 0..7 {
        app.create_dish(json!({ "name": format!("Dish {}", i) }), Some(&token)).await;
    }

    let (status, body) = app.get("/api/dishes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["count"], 5);
    assert_eq!(body["totalCount"], 7);
    assert_eq!(body["dishes"].as_array().unwrap().len(), 5);

    let (_, body) = app.get("/api/dishes?offset=5&count=5").await;
    let names: Vec<_> = body["dishes"].as_array().unwrap().iter().map(|d| d["name"].clone()).collect();
    assert_eq!(names, vec![json!("Dish 5"), json!("Dish 6")]);
    assert_eq!(body["totalCount"], 7);
}

#[tokio::test]
async fn test_list_dishes_rejects_bad_paging() {
    let app = TestApp::new(false);
    assert_eq!(app.get("/api/dishes?count=0").await.0, StatusCode::BAD_REQUEST);
    assert_eq!(app.get("/api/dishes?count=101").await.0, StatusCode::BAD_REQUEST);
    assert_eq!(app.get("/api/dishes?offset=-1").await.0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let (app, token) = TestApp::with_auth();
    for name in ["Chicken Curry", "Fried CHICKEN", "Beef Stew"] {
        app.create_dish(json!({ "name": name }), Some(&token)).await;
    }

    let (status, body) = app.get("/api/dishes?search=chick").await;
    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<_> = body["dishes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Chicken Curry", "Fried CHICKEN"]);
    assert!(body.get("totalCount").is_none());

    let (_, body) = app.get("/api/dishes?search=").await;
    assert_eq!(body["totalCount"], 3);
}

#[tokio::test]
async fn test_mutating_routes_require_token() {
    let (app, token) = TestApp::with_auth();

    let (status, _) = app.request(Method::POST, "/api/dishes", Some(soup()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.request(Method::POST, "/api/dishes", Some(soup()), Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication error");

    let dish = app.create_dish(soup(), Some(&token)).await;
    let uri = format!("/api/dishes/{}", dish["id"].as_str().unwrap());
    let (status, _) = app.request(Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Reads stay public.
    assert_eq!(app.get(&uri).await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_auth_can_be_disabled() {
    let app = TestApp::new(false);
    let dish = app.create_dish(soup(), None).await;
    assert_eq!(dish["name"], "Soup");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new(true);
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
}
