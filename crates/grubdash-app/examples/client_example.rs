///  To run :
///  cargo r --example client_example
use grubdash_client::{ApiError, DishRequest, GrubDashClient, OrderRequest};
use grubdash_hex::application::dish_service::DishService;
use grubdash_hex::application::order_service::OrderService;
use grubdash_hex::inbound::http::{HttpServer, HttpServerConfig};
use grubdash_repo::build_repo;
use grubdash_types::domain::order::{OrderLine, OrderStatus};
use reqwest::StatusCode;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Start server on ephemeral port with in-memory repo.
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/");

    let repo = build_repo();
    let server = HttpServer::new(
        DishService::new(repo.clone()),
        OrderService::new(repo),
        HttpServerConfig {
            host: "127.0.0.1".into(),
            port: port.to_string(),
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    // Use client against the running server.
    let client = GrubDashClient::new(&addr)?;
    let dish = client
        .create_dish(&DishRequest {
            id: None,
            name: "Century eggs".into(),
            description: "Whole eggs preserved in clay and ash for a few months".into(),
            price: 17,
            image_url: "https://images.pexels.com/photos/5848627/pexels-photo-5848627.jpeg".into(),
        })
        .await?;
    println!("Created dish id={} price={}", dish.id, dish.price);

    let mut line = serde_json::Map::new();
    line.insert("id".into(), serde_json::Value::String(dish.id.clone()));
    line.insert("name".into(), serde_json::Value::String(dish.name.clone()));
    let mut request = OrderRequest {
        id: None,
        deliver_to: "Rick Sanchez (C-132)".into(),
        mobile_number: "(202) 456-1111".into(),
        status: Some(OrderStatus::Pending),
        dishes: vec![OrderLine {
            quantity: 2,
            dish: line,
        }],
    };
    let created = client.create_order(&request).await?;
    println!("Created order id={}", created.id);

    request.status = Some(OrderStatus::Preparing);
    let updated = client.update_order(&created.id, &request).await?;
    println!("Updated status={:?} for id {}", updated.status, updated.id);

    // Deleting a preparing order is refused; move it back to pending first.
    match client.delete_order(&created.id).await {
        Ok(()) => println!("Deleted order"),
        Err(err) => {
            if err.downcast_ref::<ApiError>().map(|e| e.status) == Some(StatusCode::BAD_REQUEST) {
                println!("Delete refused: {err}");
                request.status = Some(OrderStatus::Pending);
                client.update_order(&created.id, &request).await?;
                client.delete_order(&created.id).await?;
                println!("Deleted order id={} after resetting it to pending", created.id);
            } else {
                return Err(err);
            }
        }
    }

    println!("Orders left: {}", client.list_orders().await?.len());

    handle.abort();
    Ok(())
}
