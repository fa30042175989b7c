mod common;

use chrono::Utc;
use common::{chat_client, chat_reply, mount_listings, mount_quality};
use inventory_finder::ai::prompts::ListingSchema;
use inventory_finder::{
    Availability, Category, City, InventoryQuery, InventoryService, ListingSource,
    PipelineError, PipelineOptions, Price, Quality,
};
use wiremock::{MockServer, ResponseTemplate};

fn macon_firewood() -> InventoryQuery {
    InventoryQuery::new(City::Macon, Category::Firewood)
}

fn service(server: &MockServer, options: PipelineOptions) -> InventoryService {
    InventoryService::new(Some(chat_client(server)), None, options)
}

#[tokio::test]
async fn prose_wrapped_listing_is_normalized() {
    let server = MockServer::start().await;
    mount_listings(
        &server,
        chat_reply(
            r#"Here you go: [{"store":"A","address":"1 St","price":"$5","quantity":"10"}] hope that helps!"#,
        ),
    )
    .await;
    mount_quality(&server, chat_reply("I am not able to rate these stores.")).await;

    let before = Utc::now();
    let (records, source) = service(&server, PipelineOptions::default())
        .listings(&macon_firewood())
        .await;

    assert_eq!(source, ListingSource::Live);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.store, "A");
    assert_eq!(record.address, "1 St");
    assert_eq!(
        record.availability,
        Availability::Priced {
            price: Price::Amount(5.0),
            quantity: "10".to_string(),
        }
    );
    assert_eq!(record.quality, Some(Quality::Unknown));
    assert!(record.last_checked >= before);
    assert!(record.last_checked <= Utc::now());
}

#[tokio::test]
async fn listings_sort_by_price_with_unknown_last() {
    let server = MockServer::start().await;
    mount_listings(
        &server,
        chat_reply(
            r#"[{"store":"Pricey","price":"$12.50","quantity":"2"},
                {"store":"Mystery","price":"Unknown","quantity":"1"},
                {"store":"Cheap","price":"$3","quantity":"9"}]"#,
        ),
    )
    .await;

    let options = PipelineOptions {
        quality_labels: false,
        ..PipelineOptions::default()
    };
    let (records, source) = service(&server, options).listings(&macon_firewood()).await;

    assert_eq!(source, ListingSource::Live);
    let prices: Vec<Price> = records.iter().map(|r| r.price()).collect();
    assert_eq!(
        prices,
        vec![Price::Amount(3.0), Price::Amount(12.5), Price::Unknown]
    );
    assert!(records.iter().all(|r| r.quality.is_none()));
}

#[tokio::test]
async fn quality_labels_are_attached_by_position() {
    let server = MockServer::start().await;
    mount_listings(
        &server,
        chat_reply(r#"[{"store":"A","price":"$9","quantity":"1"},{"store":"B","price":"$4","quantity":"3"}]"#),
    )
    .await;
    mount_quality(
        &server,
        chat_reply(
            r#"Ratings: [{"store":"A renamed","price":"$1","quality":"Excellent"},{"store":"B","quality":"meh"}]"#,
        ),
    )
    .await;

    let (records, _) = service(&server, PipelineOptions::default())
        .listings(&macon_firewood())
        .await;

    // Sorted by price, so B comes first; the model cannot rewrite fields.
    assert_eq!(records[0].store, "B");
    assert_eq!(records[0].quality, Some(Quality::Unknown));
    assert_eq!(records[1].store, "A");
    assert_eq!(records[1].price(), Price::Amount(9.0));
    assert_eq!(records[1].quality, Some(Quality::Excellent));
}

#[tokio::test]
async fn quality_count_mismatch_degrades_to_unknown() {
    let server = MockServer::start().await;
    mount_listings(
        &server,
        chat_reply(r#"[{"store":"A","status":"In Stock"},{"store":"B","status":"Low Stock"}]"#),
    )
    .await;
    mount_quality(&server, chat_reply(r#"[{"quality":"Good"}]"#)).await;

    let options = PipelineOptions {
        schema: ListingSchema::Status,
        ..PipelineOptions::default()
    };
    let (records, source) = service(&server, options).listings(&macon_firewood()).await;

    assert_eq!(source, ListingSource::Live);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.quality == Some(Quality::Unknown)));
    assert_eq!(
        records[1].availability,
        Availability::Status {
            status: "Low Stock".to_string()
        }
    );
}

#[tokio::test]
async fn reply_without_brackets_falls_back() {
    let server = MockServer::start().await;
    mount_listings(&server, chat_reply("Sorry, I don't have live inventory data.")).await;

    let svc = service(&server, PipelineOptions::default());
    let err = svc.live_listings(&macon_firewood(), Utc::now()).await.unwrap_err();
    assert!(matches!(err, PipelineError::Extraction(_)));

    let (records, source) = svc.listings(&macon_firewood()).await;
    assert_eq!(source, ListingSource::Fallback);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].store, "Example Supply Co.");
    assert_eq!(records[0].address, "123 Main St, Macon, GA");
}

#[tokio::test]
async fn invalid_json_between_brackets_falls_back() {
    let server = MockServer::start().await;
    mount_listings(&server, chat_reply(r#"[{"store": "A", price: $5}]"#)).await;

    let (records, source) = service(&server, PipelineOptions::default())
        .listings(&macon_firewood())
        .await;
    assert_eq!(source, ListingSource::Fallback);
    assert!(!records.is_empty());
}

#[tokio::test]
async fn empty_array_falls_back() {
    let server = MockServer::start().await;
    mount_listings(&server, chat_reply("[]")).await;

    let svc = service(&server, PipelineOptions::default());
    let err = svc.live_listings(&macon_firewood(), Utc::now()).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoListings));
    let (_, source) = svc.listings(&macon_firewood()).await;
    assert_eq!(source, ListingSource::Fallback);
}

#[tokio::test]
async fn upstream_error_falls_back() {
    let server = MockServer::start().await;
    mount_listings(
        &server,
        ResponseTemplate::new(429).set_body_string(r#"{"error":"quota"}"#),
    )
    .await;

    let svc = service(&server, PipelineOptions::default());
    let err = svc.live_listings(&macon_firewood(), Utc::now()).await.unwrap_err();
    assert!(matches!(err, PipelineError::Upstream(_)));
    let (records, source) = svc.listings(&macon_firewood()).await;
    assert_eq!(source, ListingSource::Fallback);
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn unconfigured_service_serves_fallback() {
    let svc = InventoryService::new(None, None, PipelineOptions::default());
    let query = InventoryQuery::new(City::Byron, Category::DistilledWater);

    let page = svc.page(&query).await;
    assert_eq!(page.source, ListingSource::Fallback);
    assert_eq!(page.city, "Byron");
    assert_eq!(page.category, "Distilled Water");
    assert_eq!(page.listings.len(), 3);
    assert_eq!(
        page.intro,
        "Check back soon for more tips about finding distilled water in Byron."
    );
}

#[tokio::test]
async fn mixed_field_types_keep_every_record() {
    let server = MockServer::start().await;
    mount_listings(
        &server,
        chat_reply(
            r#"Found these: [{"store":"A","address":{"street":"1 St"},"price":"$7","quantity":3,"notes":["call ahead"]},
                {"store":"B","address":"2 Ave","price":"$4","quantity":"5","notes":"ok"}]"#,
        ),
    )
    .await;

    let options = PipelineOptions {
        quality_labels: false,
        ..PipelineOptions::default()
    };
    let (records, source) = service(&server, options).listings(&macon_firewood()).await;

    assert_eq!(source, ListingSource::Live);
    let stores: Vec<&str> = records.iter().map(|r| r.store.as_str()).collect();
    assert_eq!(stores, vec!["B", "A"]);
    assert_eq!(records[1].notes, "call ahead");
    assert_eq!(
        records[1].availability,
        Availability::Priced {
            price: Price::Amount(7.0),
            quantity: "3".to_string(),
        }
    );
    assert_eq!(records[0].notes, "ok");
}

#[tokio::test]
async fn stray_scalars_in_the_array_are_skipped() {
    let server = MockServer::start().await;
    mount_listings(
        &server,
        chat_reply(r#"["Here are stores:", {"store":"A","price":"$2","quantity":"1"}, 42, null]"#),
    )
    .await;

    let options = PipelineOptions {
        quality_labels: false,
        ..PipelineOptions::default()
    };
    let (records, source) = service(&server, options).listings(&macon_firewood()).await;

    assert_eq!(source, ListingSource::Live);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].store, "A");
}

#[tokio::test]
async fn array_without_objects_falls_back() {
    let server = MockServer::start().await;
    mount_listings(&server, chat_reply(r#"["Store One", "Store Two"]"#)).await;

    let svc = service(&server, PipelineOptions::default());
    let err = svc.live_listings(&macon_firewood(), Utc::now()).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoListings));
}

#[tokio::test]
async fn non_string_quality_labels_degrade_per_record() {
    let server = MockServer::start().await;
    mount_listings(
        &server,
        chat_reply(r#"[{"store":"A","price":"$1","quantity":"1"},{"store":"B","price":"$2","quantity":"1"}]"#),
    )
    .await;
    mount_quality(&server, chat_reply(r#"[{"quality":5},{"quality":"Good"}]"#)).await;

    let (records, source) = service(&server, PipelineOptions::default())
        .listings(&macon_firewood())
        .await;

    assert_eq!(source, ListingSource::Live);
    assert_eq!(records[0].quality, Some(Quality::Unknown));
    assert_eq!(records[1].quality, Some(Quality::Good));
}
