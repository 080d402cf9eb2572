//! Handler tests for the Toys domain
//!
//! The router runs over an in-memory repository so these cover routing,
//! extraction, status codes and JSON shapes without a MongoDB instance.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use domain_toys::document::ToyDocument;
use domain_toys::{
    DeleteAck, InsertAck, NewToy, PriceSort, Toy, ToyQuery, ToyRepository, ToyResult, ToyService,
    UpdateAck, UpdateToy, handlers,
};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use serde_json::{Value, json};
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // For oneshot()

#[derive(Clone, Default)]
struct InMemoryToyRepository {
    toys: Arc<Mutex<Vec<Toy>>>,
}

impl InMemoryToyRepository {
    fn seeded(toys: Vec<Toy>) -> Self {
        Self {
            toys: Arc::new(Mutex::new(toys)),
        }
    }
}

fn price_of(toy: &Toy) -> f64 {
    toy.price.as_f64().unwrap_or(f64::NAN)
}

#[async_trait]
impl ToyRepository for InMemoryToyRepository {
    async fn find(&self, query: ToyQuery) -> ToyResult<Vec<Toy>> {
        let toys = self.toys.lock().unwrap().clone();

        let mut matched: Vec<Toy> = toys
            .into_iter()
            .filter(|toy| match &query {
                ToyQuery::All => true,
                ToyQuery::NameContains(text) => toy
                    .name
                    .as_str()
                    .is_some_and(|name| name.to_lowercase().contains(&text.to_lowercase())),
                ToyQuery::BySeller { seller_mail, .. } => {
                    toy.seller_mail.as_str() == Some(seller_mail.as_str())
                }
                ToyQuery::BySubCategory(sub) => toy.sub_category.as_str() == Some(sub.as_str()),
            })
            .collect();

        match query {
            ToyQuery::BySeller { sort: Some(sort), .. } => matched.sort_by(|a, b| {
                let ordering = match sort {
                    PriceSort::Highest => price_of(b).partial_cmp(&price_of(a)),
                    PriceSort::Lowest => price_of(a).partial_cmp(&price_of(b)),
                };
                ordering.unwrap_or(Ordering::Equal)
            }),
            ToyQuery::BySeller { sort: None, .. } => {}
            _ => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        Ok(matched)
    }

    async fn get_by_id(&self, id: ObjectId) -> ToyResult<Option<Toy>> {
        let toys = self.toys.lock().unwrap();
        Ok(toys.iter().find(|toy| toy.id == id).cloned())
    }

    async fn insert(&self, toy: NewToy) -> ToyResult<InsertAck> {
        let id = ObjectId::new();
        let stored = Toy::from(ToyDocument::from_new(id, toy)?);
        self.toys.lock().unwrap().push(stored);

        Ok(InsertAck {
            acknowledged: true,
            inserted_id: id.to_hex(),
        })
    }

    async fn overwrite(&self, id: ObjectId, update: UpdateToy) -> ToyResult<UpdateAck> {
        let mut toys = self.toys.lock().unwrap();
        let (matched, modified) = match toys.iter_mut().find(|toy| toy.id == id) {
            Some(toy) => {
                let before = toy.clone();
                toy.name = Value::from(update.name);
                toy.photo = Value::from(update.photo);
                toy.seller_mail = Value::from(update.seller_mail);
                toy.category = Value::from(update.category);
                toy.sub_category = Value::from(update.sub_category);
                toy.price = update.price;
                toy.rating = update.rating;
                toy.available_quantity = update.available_quantity;
                toy.seller_name = Value::from(update.seller_name);
                toy.details_description = Value::from(update.details_description);
                (1, u64::from(*toy != before))
            }
            None => (0, 0),
        };

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: matched,
            modified_count: modified,
            upserted_count: 0,
            upserted_id: None,
        })
    }

    async fn delete(&self, id: ObjectId) -> ToyResult<DeleteAck> {
        let mut toys = self.toys.lock().unwrap();
        let before = toys.len();
        toys.retain(|toy| toy.id != id);

        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: (before - toys.len()) as u64,
        })
    }
}

fn app_with(repo: InMemoryToyRepository) -> Router {
    handlers::router(ToyService::new(repo))
}

fn app() -> Router {
    app_with(InMemoryToyRepository::default())
}

fn toy(name: &str, seller_mail: &str, sub_category: &str, price: f64, age_minutes: i64) -> Toy {
    Toy {
        id: ObjectId::new(),
        name: json!(name),
        photo: json!(format!("https://img.example/{}.png", name)),
        seller_mail: json!(seller_mail),
        seller_name: json!("Seller"),
        category: json!("Vehicles"),
        sub_category: json!(sub_category),
        price: json!(price),
        rating: json!(4),
        available_quantity: json!(10),
        details_description: Value::Null,
        created_at: Some(Utc::now() - Duration::minutes(age_minutes)),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn create(app: &Router, body: Value) -> String {
    let (status, ack) = send(app, with_json("POST", "/addToy", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    ack["insertedId"].as_str().unwrap().to_string()
}

fn as_toys(body: Value) -> Vec<Toy> {
    serde_json::from_value(body).unwrap()
}

fn names(body: Value) -> Vec<String> {
    as_toys(body)
        .into_iter()
        .filter_map(|t| t.name.as_str().map(String::from))
        .collect()
}

#[tokio::test]
async fn test_list_toys_newest_first() {
    let repo = InMemoryToyRepository::seeded(vec![
        toy("Old car", "a@x.com", "cars", 5.0, 30),
        toy("New car", "a@x.com", "cars", 7.0, 1),
        toy("Mid car", "b@x.com", "cars", 6.0, 10),
    ]);
    let app = app_with(repo);

    let (status, body) = send(&app, get("/toys")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(names(body), vec!["New car", "Mid car", "Old car"]);
}

#[tokio::test]
async fn test_list_toys_returns_every_created_toy() {
    let app = app();
    for i in 0..4 {
        create(&app, json!({ "name": format!("Toy {}", i), "price": i })).await;
    }

    let (_, body) = send(&app, get("/toys")).await;
    let toys = as_toys(body);
    assert_eq!(toys.len(), 4);
    assert!(toys.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn test_create_coerces_price() {
    let app = app();

    let numeric = create(&app, json!({ "name": "Kite", "price": "12.5" })).await;
    let (_, toy) = send(&app, get(&format!("/toyDetails/{}", numeric))).await;
    assert_eq!(toy["price"], json!(12.5));

    // NaN has no JSON form and is rendered as null
    let garbage = create(&app, json!({ "name": "Yo-yo", "price": "abc" })).await;
    let (status, toy) = send(&app, get(&format!("/toyDetails/{}", garbage))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toy["price"], Value::Null);
}

#[tokio::test]
async fn test_create_stamps_created_at() {
    let app = app();

    let before = Utc::now();
    let id = create(&app, json!({ "name": "Puzzle" })).await;
    let after = Utc::now();

    let (_, body) = send(&app, get(&format!("/toyDetails/{}", id))).await;
    let toy: Toy = serde_json::from_value(body).unwrap();
    let created = toy.created_at.unwrap().timestamp_millis();

    assert!(created >= before.timestamp_millis());
    assert!(created <= after.timestamp_millis());
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let repo = InMemoryToyRepository::seeded(vec![
        toy("Red Car", "a@x.com", "cars", 10.0, 2),
        toy("Blue Truck", "a@x.com", "trucks", 12.0, 1),
    ]);
    let app = app_with(repo);

    let (status, body) = send(&app, get("/toys/CAR")).await;
    assert_eq!(status, StatusCode::OK);
    let toys = as_toys(body);
    assert_eq!(toys.len(), 1);
    assert_eq!(toys[0].name, "Red Car");
}

#[tokio::test]
async fn test_search_without_matches_is_empty_list() {
    let app = app_with(InMemoryToyRepository::seeded(vec![toy(
        "Red Car", "a@x.com", "cars", 10.0, 1,
    )]));

    let (status, body) = send(&app, get("/toys/helicopter")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_get_missing_toy_is_404() {
    let app = app();
    let (status, body) = send(&app, get(&format!("/toyDetails/{}", ObjectId::new()))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_id_is_400() {
    let app = app();

    for request in [
        get("/toyDetails/not-an-id"),
        delete("/toyDetails/1234"),
        with_json("PATCH", "/toyUpdate/xyz", json!({})),
    ] {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_OBJECT_ID");
    }
}

#[tokio::test]
async fn test_update_overwrites_all_ten_fields() {
    let app = app();
    let id = create(
        &app,
        json!({
            "name": "Robot",
            "photo": "https://img.example/robot.png",
            "sellerMail": "a@x.com",
            "sellerName": "Ann",
            "category": "Science",
            "subCategory": "robots",
            "price": 30,
            "rating": 5,
            "availableQuantity": 2,
            "detailsDescription": "Beeps"
        }),
    )
    .await;
    let (_, original) = send(&app, get(&format!("/toyDetails/{}", id))).await;

    let (status, ack) = send(
        &app,
        with_json(
            "PATCH",
            &format!("/toyUpdate/{}", id),
            json!({
                "name": "Robot v2",
                "sellerMail": "b@x.com",
                "price": "25",
                "rating": "4.8"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["matchedCount"], 1);
    assert_eq!(ack["modifiedCount"], 1);

    let (_, updated) = send(&app, get(&format!("/toyDetails/{}", id))).await;
    assert_eq!(updated["_id"], original["_id"]);
    assert_eq!(updated["createdAt"], original["createdAt"]);
    assert_eq!(updated["name"], "Robot v2");
    assert_eq!(updated["sellerMail"], "b@x.com");
    // Stored as given, not coerced
    assert_eq!(updated["price"], "25");
    assert_eq!(updated["rating"], "4.8");
    // Absent from the payload, so overwritten with null
    assert_eq!(updated["photo"], Value::Null);
    assert_eq!(updated["sellerName"], Value::Null);
    assert_eq!(updated["detailsDescription"], Value::Null);
    assert_eq!(updated["availableQuantity"], Value::Null);
}

#[tokio::test]
async fn test_update_unknown_id_is_zero_count_success() {
    let app = app();
    let (status, ack) = send(
        &app,
        with_json(
            "PATCH",
            &format!("/toyUpdate/{}", ObjectId::new()),
            json!({ "name": "Ghost" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["matchedCount"], 0);
    assert_eq!(ack["modifiedCount"], 0);
}

#[tokio::test]
async fn test_delete_twice_succeeds_both_times() {
    let app = app();
    let id = create(&app, json!({ "name": "Ball" })).await;
    let uri = format!("/toyDetails/{}", id);

    let (status, first) = send(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, json!({ "acknowledged": true, "deletedCount": 1 }));

    let (status, second) = send(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["deletedCount"], 0);

    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seller_toys_sorted_by_price() {
    let repo = InMemoryToyRepository::seeded(vec![
        toy("B", "a@x.com", "cars", 20.0, 3),
        toy("A", "a@x.com", "cars", 5.0, 2),
        toy("C", "a@x.com", "cars", 12.0, 1),
        toy("Other", "z@x.com", "cars", 1.0, 1),
    ]);
    let app = app_with(repo);

    let (_, body) = send(&app, get("/myToys/a@x.com?sort=highest")).await;
    let prices: Vec<f64> = as_toys(body).iter().map(price_of).collect();
    assert_eq!(prices, vec![20.0, 12.0, 5.0]);

    let (_, body) = send(&app, get("/myToys/a@x.com?sort=lowest")).await;
    let prices: Vec<f64> = as_toys(body).iter().map(price_of).collect();
    assert_eq!(prices, vec![5.0, 12.0, 20.0]);
}

#[tokio::test]
async fn test_seller_toys_unknown_sort_returns_same_set() {
    let repo = InMemoryToyRepository::seeded(vec![
        toy("B", "a@x.com", "cars", 20.0, 3),
        toy("A", "a@x.com", "cars", 5.0, 2),
    ]);
    let app = app_with(repo);

    for uri in ["/myToys/a@x.com", "/myToys/a@x.com?sort=cheapest"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK);

        let mut found = names(body);
        found.sort();
        assert_eq!(found, vec!["A", "B"]);
    }
}

#[tokio::test]
async fn test_toy_list_filters_by_sub_category() {
    let repo = InMemoryToyRepository::seeded(vec![
        toy("Old car", "a@x.com", "cars", 5.0, 20),
        toy("Truck", "a@x.com", "trucks", 9.0, 5),
        toy("New car", "b@x.com", "cars", 8.0, 1),
    ]);
    let app = app_with(repo);

    let (status, body) = send(&app, get("/toyList/cars")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(names(body), vec!["New car", "Old car"]);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/addToy")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_add_then_fetch_end_to_end() {
    let app = app();

    let (status, ack) = send(
        &app,
        with_json(
            "POST",
            "/addToy",
            json!({
                "name": "Red Car",
                "sellerMail": "a@x.com",
                "price": "10",
                "subCategory": "cars"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ack["acknowledged"], true);

    let id = ack["insertedId"].as_str().unwrap();
    assert!(ObjectId::parse_str(id).is_ok());

    let (status, toy) = send(&app, get(&format!("/toyDetails/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toy["_id"], id);
    assert_eq!(toy["price"], json!(10.0));
    assert!(toy["price"].is_number());
    assert!(toy["createdAt"].is_string());

    let (_, listed) = send(&app, get("/toyList/cars")).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_legacy_listing_renders_every_field() {
    let mut legacy = toy("ignored", "a@x.com", "cars", 3.0, 0);
    legacy.name = json!(42);
    legacy.created_at = None;
    let id = legacy.id;
    let app = app_with(InMemoryToyRepository::seeded(vec![legacy]));

    let (status, body) = send(&app, get("/toys")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], 42);

    let (_, toy) = send(&app, get(&format!("/toyDetails/{}", id))).await;
    let fields = toy.as_object().unwrap();
    assert_eq!(fields.len(), 12);
    assert_eq!(fields["createdAt"], Value::Null);
    assert_eq!(fields["detailsDescription"], Value::Null);
}
