use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use axum_helpers::{
    JsonBody, ObjectIdPath,
    errors::responses::{
        BadRequestJsonResponse, BadRequestObjectIdResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ToyResult;
use crate::models::{
    CreateToy, DeleteAck, InsertAck, PriceSort, SellerToysParams, Toy, UpdateAck, UpdateToy,
};
use crate::repository::ToyRepository;
use crate::service::ToyService;

/// OpenAPI documentation for the catalog routes
#[derive(OpenApi)]
#[openapi(
    paths(
        list_toys,
        search_toys,
        seller_toys,
        toys_by_category,
        get_toy,
        create_toy,
        update_toy,
        delete_toy,
    ),
    components(
        schemas(Toy, CreateToy, UpdateToy, InsertAck, UpdateAck, DeleteAck, PriceSort),
        responses(
            NotFoundResponse,
            BadRequestObjectIdResponse,
            BadRequestJsonResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Toys", description = "Toy catalog endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

type SharedService<R> = State<Arc<ToyService<R>>>;

/// Catalog router. Paths are absolute, merge it at the root.
pub fn router<R: ToyRepository + 'static>(service: ToyService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/toys", get(list_toys))
        .route("/toys/{text}", get(search_toys))
        .route("/myToys/{email}", get(seller_toys))
        .route("/toyList/{category}", get(toys_by_category))
        .route("/toyDetails/{id}", get(get_toy).delete(delete_toy))
        .route("/addToy", post(create_toy))
        .route("/toyUpdate/{id}", patch(update_toy))
        .with_state(shared_service)
}

/// List every toy, newest first
#[utoipa::path(
    get,
    path = "/toys",
    tag = "Toys",
    responses(
        (status = 200, description = "All toys ordered by createdAt descending", body = Vec<Toy>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_toys<R: ToyRepository>(State(service): SharedService<R>) -> ToyResult<Json<Vec<Toy>>> {
    Ok(Json(service.list_toys().await?))
}

/// Search toys by a case-insensitive substring of their name
#[utoipa::path(
    get,
    path = "/toys/{text}",
    tag = "Toys",
    params(
        ("text" = String, Path, description = "Fragment of the toy name")
    ),
    responses(
        (status = 200, description = "Matching toys, newest first", body = Vec<Toy>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_toys<R: ToyRepository>(
    State(service): SharedService<R>,
    Path(text): Path<String>,
) -> ToyResult<Json<Vec<Toy>>> {
    Ok(Json(service.search_toys(text).await?))
}

/// List a seller's toys, optionally ordered by price
#[utoipa::path(
    get,
    path = "/myToys/{email}",
    tag = "Toys",
    params(
        ("email" = String, Path, description = "Seller email"),
        SellerToysParams
    ),
    responses(
        (status = 200, description = "The seller's toys", body = Vec<Toy>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seller_toys<R: ToyRepository>(
    State(service): SharedService<R>,
    Path(email): Path<String>,
    Query(params): Query<SellerToysParams>,
) -> ToyResult<Json<Vec<Toy>>> {
    let toys = service.seller_toys(email, params.price_sort()).await?;
    Ok(Json(toys))
}

/// List toys of one sub-category, newest first
#[utoipa::path(
    get,
    path = "/toyList/{category}",
    tag = "Toys",
    params(
        ("category" = String, Path, description = "Sub-category to match")
    ),
    responses(
        (status = 200, description = "Toys in the sub-category", body = Vec<Toy>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn toys_by_category<R: ToyRepository>(
    State(service): SharedService<R>,
    Path(category): Path<String>,
) -> ToyResult<Json<Vec<Toy>>> {
    Ok(Json(service.toys_by_category(category).await?))
}

/// Get one toy by ID
#[utoipa::path(
    get,
    path = "/toyDetails/{id}",
    tag = "Toys",
    params(
        ("id" = String, Path, description = "Toy ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Toy found", body = Toy),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_toy<R: ToyRepository>(
    State(service): SharedService<R>,
    ObjectIdPath(id): ObjectIdPath,
) -> ToyResult<Json<Toy>> {
    Ok(Json(service.get_toy(id).await?))
}

/// Create a toy listing
#[utoipa::path(
    post,
    path = "/addToy",
    tag = "Toys",
    request_body = CreateToy,
    responses(
        (status = 201, description = "Toy created", body = InsertAck),
        (status = 400, response = BadRequestJsonResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_toy<R: ToyRepository>(
    State(service): SharedService<R>,
    JsonBody(input): JsonBody<CreateToy>,
) -> ToyResult<impl IntoResponse> {
    let ack = service.create_toy(input).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

/// Overwrite the ten editable fields of a toy
///
/// Fields missing from the body are stored as `null`.
#[utoipa::path(
    patch,
    path = "/toyUpdate/{id}",
    tag = "Toys",
    params(
        ("id" = String, Path, description = "Toy ObjectId (24 hex characters)")
    ),
    request_body = UpdateToy,
    responses(
        (status = 200, description = "Update acknowledgement; zero counts when the id is unknown", body = UpdateAck),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_toy<R: ToyRepository>(
    State(service): SharedService<R>,
    ObjectIdPath(id): ObjectIdPath,
    JsonBody(update): JsonBody<UpdateToy>,
) -> ToyResult<Json<UpdateAck>> {
    Ok(Json(service.update_toy(id, update).await?))
}

/// Delete a toy
#[utoipa::path(
    delete,
    path = "/toyDetails/{id}",
    tag = "Toys",
    params(
        ("id" = String, Path, description = "Toy ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Delete acknowledgement; deletedCount is 0 when nothing matched", body = DeleteAck),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_toy<R: ToyRepository>(
    State(service): SharedService<R>,
    ObjectIdPath(id): ObjectIdPath,
) -> ToyResult<Json<DeleteAck>> {
    Ok(Json(service.delete_toy(id).await?))
}
