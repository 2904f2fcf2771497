use std::time::Duration;

use futures::StreamExt;
use manta_broker::{BrokerClient, InMemoryBroker, Qos};
use manta_client::{Store, Wallet};
use manta_types::{AckMessage, MerchantOrderRequest, Status};
use rust_decimal::Decimal;

#[tokio::test]
async fn store_gets_back_the_payproc_ack() {
    let broker = InMemoryBroker::new();
    let responder_client = broker.client();

    let responder = tokio::spawn(async move {
        responder_client
            .subscribe("merchant_order_request/+", Qos::AtLeastOnce)
            .await
            .unwrap();
        let mut requests = responder_client.messages();

        let msg = requests.next().await.unwrap();
        let order: MerchantOrderRequest = serde_json::from_slice(&msg.payload).unwrap();
        let session_id = msg.topic.rsplit('/').next().unwrap().to_string();
        let _ = order;

        let mut ack = AckMessage::new("1", Status::New);
        ack.url = Some(format!("manta://127.0.0.1:8000/{session_id}"));

        responder_client
            .publish(
                &format!("acks/{session_id}"),
                serde_json::to_vec(&ack).unwrap(),
                Qos::AtLeastOnce,
                false,
            )
            .await
            .unwrap();
    });

    let store = Store::new(broker.client());
    let ack = store
        .merchant_order_request(Decimal::from(10), "EUR", None)
        .await
        .unwrap();

    assert_eq!(ack.status, Status::New);
    assert!(ack.url.unwrap().starts_with("manta://"));
    responder.await.unwrap();
}

#[tokio::test]
async fn store_times_out_without_a_responder() {
    let broker = InMemoryBroker::new();
    let store = Store::new(broker.client());

    let result = tokio::time::timeout(
        Duration::from_millis(500),
        store.merchant_order_request(Decimal::from(10), "EUR", None),
    )
    .await;

    // The real 3s timeout hasn't elapsed yet, so the outer test timeout
    // fires first; either way no ack arrives.
    assert!(result.is_err() || result.unwrap().is_err());
}

#[tokio::test]
async fn wallet_receives_payment_request_reply() {
    let broker = InMemoryBroker::new();
    let payproc = broker.client();
    payproc.subscribe("payment_requests/+/+", Qos::AtLeastOnce).await.unwrap();
    let mut requests = payproc.messages();

    let wallet = Wallet::new(broker.client(), "sid-1");

    let responder = tokio::spawn(async move {
        let msg = requests.next().await.unwrap();
        let sid = msg.topic.split('/').nth(1).unwrap().to_string();
        payproc
            .publish(&format!("payment_requests/{sid}"), b"{\"message\":\"{}\",\"signature\":\"sig\",\"version\":\"1\"}".to_vec(), Qos::AtLeastOnce, false)
            .await
            .unwrap();
    });

    let envelope = wallet.get_payment_request("all").await.unwrap();
    assert_eq!(envelope.signature, "sig");
    responder.await.unwrap();
}
