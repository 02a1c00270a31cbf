mod common;

use axum::http::StatusCode;
use common::TempDb;
use itemdesk::ItemsClient;
use itemdesk::ItemdeskError;
use itemdesk::schema::{CreateItemRequest, ItemStatus, UpdateItemRequest};
use itemdesk::server::router::{ItemdeskState, itemdesk_router};
use tokio::net::TcpListener;
use url::Url;

async fn serve(tmp: &TempDb) -> ItemsClient {
    let app = itemdesk_router(ItemdeskState::new(tmp.spawn().await));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base = Url::parse(&format!("http://{addr}/")).unwrap();
    ItemsClient::new(base).unwrap()
}

#[tokio::test]
async fn client_round_trips_crud() {
    let tmp = TempDb::new("client-crud");
    let client = serve(&tmp).await;

    assert!(client.list_items().await.unwrap().is_empty());

    let created = client
        .create_item(&CreateItemRequest {
            title: Some("Kettle".to_string()),
            description: Some("1.7L".to_string()),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(created.status, ItemStatus::Active);

    let updated = client
        .update_item(
            created.id,
            &UpdateItemRequest {
                status: "inactive".to_string().into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Kettle");
    assert_eq!(updated.status, ItemStatus::Inactive);

    assert_eq!(client.get_item(created.id).await.unwrap(), updated);
    assert_eq!(client.list_items().await.unwrap(), vec![updated]);

    client.delete_item(created.id).await.unwrap();
    assert!(client.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn client_surfaces_server_errors() {
    let tmp = TempDb::new("client-errors");
    let client = serve(&tmp).await;

    match client.get_item(77).await {
        Err(ItemdeskError::UpstreamStatus { status, message }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "Item not found");
        }
        other => panic!("expected UpstreamStatus, got {other:?}"),
    }

    match client.create_item(&CreateItemRequest::default()).await {
        Err(ItemdeskError::UpstreamStatus { status, .. }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
        other => panic!("expected UpstreamStatus, got {other:?}"),
    }

    let err = client.delete_item(77).await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
}
