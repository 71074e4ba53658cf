use grubdash_hex::application::dish_service::DishService;
use grubdash_hex::application::order_service::OrderService;
use grubdash_hex::inbound::http::{HttpServer, HttpServerConfig};
use grubdash_repo::memory::InMemoryRepo;
use grubdash_types::domain::dish::Dish;
use grubdash_types::domain::envelope::Envelope;
use grubdash_types::domain::order::{Order, OrderStatus};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

async fn spawn_server() -> (String, tokio::task::JoinHandle<()>) {
    let port = find_free_port();
    let config = HttpServerConfig {
        host: "127.0.0.1".into(),
        port: port.to_string(),
    };
    let repo = InMemoryRepo::new();
    let server = HttpServer::new(
        DishService::new(repo.clone()),
        OrderService::new(repo),
        config,
    )
    .await
    .unwrap();
    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });

    // Give the server a moment to start.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    (format!("http://127.0.0.1:{}", port), handle)
}

async fn expect_error(res: reqwest::Response, status: StatusCode, message: &str) {
    assert_eq!(res.status(), status);
    let body: ErrorBody = res.json().await.unwrap();
    assert_eq!(body.error, message);
}

fn pasta() -> Value {
    json!({
        "data": {
            "name": "Pasta",
            "description": "Tasty",
            "price": 10,
            "image_url": "http://x/img.png"
        }
    })
}

fn order_body(status: &str) -> Value {
    json!({
        "data": {
            "deliverTo": "308 Negra Arroyo Lane",
            "mobileNumber": "(505) 143-3369",
            "status": status,
            "dishes": [{ "id": "d1", "name": "Pasta", "price": 10, "quantity": 2 }]
        }
    })
}

#[tokio::test]
async fn dish_create_read_update_list_over_http() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/dishes", addr))
        .json(&pasta())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Envelope<Dish> = res.json().await.unwrap();
    let dish = created.data;
    assert!(!dish.id.is_empty());
    assert_eq!(dish.name, "Pasta");
    assert_eq!(dish.description, "Tasty");
    assert_eq!(dish.price, 10);
    assert_eq!(dish.image_url, "http://x/img.png");

    let fetched: Envelope<Dish> = client
        .get(format!("{}/dishes/{}", addr, dish.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched.data, dish);

    let res = client
        .put(format!("{}/dishes/{}", addr, dish.id))
        .json(&json!({
            "data": {
                "id": dish.id,
                "name": "Soup",
                "description": "Warm",
                "price": 7,
                "image_url": "http://x/soup.png"
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Envelope<Dish> = res.json().await.unwrap();
    assert_eq!(updated.data.id, dish.id);
    assert_eq!(updated.data.name, "Soup");

    client
        .post(format!("{}/dishes", addr))
        .json(&pasta())
        .send()
        .await
        .unwrap();
    let list: Envelope<Vec<Dish>> = client
        .get(format!("{}/dishes", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.data.len(), 2);
    assert_eq!(list.data[0].id, dish.id);
    assert_eq!(list.data[1].name, "Pasta");

    handle.abort();
}

#[tokio::test]
async fn dish_validation_and_not_found_paths() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/dishes", addr))
        .json(&json!({ "data": { "name": "Pasta", "description": "Tasty", "price": "10", "image_url": "x" } }))
        .send()
        .await
        .unwrap();
    expect_error(
        res,
        StatusCode::BAD_REQUEST,
        "Dish must have a price that is an integer greater than 0",
    )
    .await;

    let res = client
        .post(format!("{}/dishes", addr))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    expect_error(res, StatusCode::BAD_REQUEST, "Dish must include a name").await;

    let list: Envelope<Vec<Dish>> = client
        .get(format!("{}/dishes", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.data.is_empty());

    let res = client
        .get(format!("{}/dishes/missing-dish", addr))
        .send()
        .await
        .unwrap();
    expect_error(
        res,
        StatusCode::NOT_FOUND,
        "Dish not found with ID: missing-dish",
    )
    .await;

    let created: Envelope<Dish> = client
        .post(format!("{}/dishes", addr))
        .json(&pasta())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created.data.id;
    let mut body = pasta();
    body["data"]["id"] = json!("something-else");
    let res = client
        .put(format!("{}/dishes/{}", addr, id))
        .json(&body)
        .send()
        .await
        .unwrap();
    expect_error(
        res,
        StatusCode::BAD_REQUEST,
        &format!("Dish id does not match route id. Dish: something-else, Route: {id}"),
    )
    .await;

    let res = client
        .delete(format!("{}/dishes/{}", addr, id))
        .send()
        .await
        .unwrap();
    expect_error(
        res,
        StatusCode::METHOD_NOT_ALLOWED,
        &format!("DELETE not allowed for /dishes/{id}"),
    )
    .await;

    handle.abort();
}

#[tokio::test]
async fn bodies_without_a_data_record_are_validation_errors() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    for body in [json!({ "data": "x" }), json!({ "data": [] }), json!("x")] {
        let res = client
            .post(format!("{}/dishes", addr))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(
            res.headers()["content-type"],
            "application/json",
            "body {body}"
        );
        expect_error(res, StatusCode::BAD_REQUEST, "Dish must include a name").await;
    }

    let res = client
        .post(format!("{}/orders", addr))
        .json(&json!({ "data": "x" }))
        .send()
        .await
        .unwrap();
    expect_error(res, StatusCode::BAD_REQUEST, "Order must include a deliverTo").await;

    // Without a JSON content type the body is not read at all.
    let res = client
        .post(format!("{}/dishes", addr))
        .body(pasta().to_string())
        .send()
        .await
        .unwrap();
    expect_error(res, StatusCode::BAD_REQUEST, "Dish must include a name").await;

    let res = client
        .post(format!("{}/dishes", addr))
        .header("content-type", "application/json")
        .body("{\"data\": {")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = res.json().await.unwrap();
    assert!(body.error.starts_with("Malformed JSON body"), "{}", body.error);

    let list: Envelope<Vec<Dish>> = client
        .get(format!("{}/dishes", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.data.is_empty());

    handle.abort();
}

#[tokio::test]
async fn fallback_messages_omit_query_strings() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/menu?token=secret", addr))
        .send()
        .await
        .unwrap();
    expect_error(res, StatusCode::NOT_FOUND, "Path not found: /menu").await;

    let res = client
        .delete(format!("{}/dishes/d1?token=secret", addr))
        .send()
        .await
        .unwrap();
    expect_error(
        res,
        StatusCode::METHOD_NOT_ALLOWED,
        "DELETE not allowed for /dishes/d1",
    )
    .await;

    handle.abort();
}

#[tokio::test]
async fn order_lifecycle_over_http() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/orders", addr))
        .json(&order_body("pending"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Envelope<Order> = res.json().await.unwrap();
    let id = created.data.id.clone();
    assert_eq!(created.data.status, Some(OrderStatus::Pending));
    assert_eq!(created.data.dishes[0].quantity, 2);

    let res = client
        .put(format!("{}/orders/{}", addr, id))
        .json(&order_body("preparing"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Envelope<Order> = res.json().await.unwrap();
    assert_eq!(updated.data.status, Some(OrderStatus::Preparing));

    let res = client
        .delete(format!("{}/orders/{}", addr, id))
        .send()
        .await
        .unwrap();
    expect_error(
        res,
        StatusCode::BAD_REQUEST,
        "An order cannot be deleted unless it is pending",
    )
    .await;
    let still_there = client
        .get(format!("{}/orders/{}", addr, id))
        .send()
        .await
        .unwrap();
    assert_eq!(still_there.status(), StatusCode::OK);

    client
        .put(format!("{}/orders/{}", addr, id))
        .json(&order_body("pending"))
        .send()
        .await
        .unwrap();
    let res = client
        .delete(format!("{}/orders/{}", addr, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await.unwrap().is_empty());

    let res = client
        .delete(format!("{}/orders/{}", addr, id))
        .send()
        .await
        .unwrap();
    expect_error(
        res,
        StatusCode::NOT_FOUND,
        &format!("Order not found with ID: {id}"),
    )
    .await;

    let list: Envelope<Vec<Order>> = client
        .get(format!("{}/orders", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.data.is_empty());

    handle.abort();
}

#[tokio::test]
async fn order_validation_paths() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let mut empty = order_body("pending");
    empty["data"]["dishes"] = json!([]);
    let res = client
        .post(format!("{}/orders", addr))
        .json(&empty)
        .send()
        .await
        .unwrap();
    expect_error(
        res,
        StatusCode::BAD_REQUEST,
        "Order must include at least one dish",
    )
    .await;

    let mut zero = order_body("pending");
    zero["data"]["dishes"] = json!([{ "quantity": 0 }]);
    let res = client
        .post(format!("{}/orders", addr))
        .json(&zero)
        .send()
        .await
        .unwrap();
    expect_error(
        res,
        StatusCode::BAD_REQUEST,
        "Dish 0 must have a quantity that is an integer greater than 0",
    )
    .await;

    let delivered: Envelope<Order> = client
        .post(format!("{}/orders", addr))
        .json(&order_body("delivered"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let res = client
        .put(format!("{}/orders/{}", addr, delivered.data.id))
        .json(&order_body("pending"))
        .send()
        .await
        .unwrap();
    expect_error(
        res,
        StatusCode::BAD_REQUEST,
        "A delivered order cannot be changed",
    )
    .await;

    let pending: Envelope<Order> = client
        .post(format!("{}/orders", addr))
        .json(&order_body("pending"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let res = client
        .put(format!("{}/orders/{}", addr, pending.data.id))
        .json(&order_body("shipped"))
        .send()
        .await
        .unwrap();
    expect_error(
        res,
        StatusCode::BAD_REQUEST,
        "Order must have a status of pending, preparing, out-for-delivery, delivered",
    )
    .await;

    let list: Envelope<Vec<Order>> = client
        .get(format!("{}/orders", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<&str> = list.data.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec![delivered.data.id.as_str(), pending.data.id.as_str()]);

    let res = client.get(format!("{}/menu", addr)).send().await.unwrap();
    expect_error(res, StatusCode::NOT_FOUND, "Path not found: /menu").await;

    handle.abort();
}
