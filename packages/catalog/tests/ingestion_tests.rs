//! End-to-end ingestion runs against a mock marketplace.

use std::path::Path;
use std::sync::Arc;

use catalog::testing::{fixtures, MockFetcher, MockIngestor};
use catalog::{
    build_ingestor, read_catalog, run_ingestion, write_catalog, CatalogError, CatalogIngestor,
    CatalogItem, EtsyApiIngestor, FetchResponse, IngestConfig, SiteConfig, Strategy,
};
use serde_json::json;

const API_BASE: &str = "https://api.test/v3/application";
const SHOP_URL: &str = "https://www.etsy.com/ca/shop/HeartfeltDesigns1";

fn api_config(dir: &Path) -> IngestConfig {
    IngestConfig::new()
        .with_api_key("test-key")
        .with_api_base(API_BASE)
        .with_catalog_path(dir.join("src/data/patterns.json"))
        .with_site_config_path(dir.join("config.json"))
}

fn scrape_config(dir: &Path) -> IngestConfig {
    api_config(dir)
        .with_strategy(Strategy::Scrape)
        .with_shop_url(SHOP_URL)
}

fn shop_url() -> String {
    format!("{API_BASE}/shops?shop_name=HeartfeltDesigns1")
}

fn listings_url(offset: usize) -> String {
    format!("{API_BASE}/shops/77/listings/active?limit=100&offset={offset}&includes=Images")
}

const SHOP_HTML: &str = r#"
<html><body>
  <div class="listings">
    <a class="listing-link" title="Fox Sampler" href="/ca/listing/1/fox?ref=shop_home_active_1">
      <img src="https://i.etsystatic.com/1/fox.jpg">
      <span class="currency-value">8.00</span>
    </a>
    <a class="listing-link" href="/ca/listing/2/owl?ref=shop_home_active_2">
      <p class="wt-text-caption">Owl Sampler</p>
      <img data-src="//i.etsystatic.com/2/owl.jpg">
    </a>
    <a class="listing-link" href="/ca/listing/3/blank">
      <img src="https://i.etsystatic.com/3/blank.jpg">
    </a>
  </div>
</body></html>
"#;

#[tokio::test]
async fn pagination_stops_after_short_page() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path());
    let mock = MockFetcher::new()
        .with_json(shop_url(), &fixtures::shop_found(77))
        .with_json(listings_url(0), &fixtures::listings_page(1, 100))
        .with_json(listings_url(100), &fixtures::listings_page(101, 100))
        .with_json(listings_url(200), &fixtures::listings_page(201, 30));

    let ingestor = build_ingestor(&config, Arc::new(mock.clone())).unwrap();
    let report = run_ingestion(ingestor.as_ref(), &config).await.unwrap();

    assert_eq!(report.items, 230);
    assert_eq!(
        mock.called_urls(),
        vec![shop_url(), listings_url(0), listings_url(100), listings_url(200)]
    );
    assert!(!mock.called_urls().contains(&listings_url(300)));

    let saved = read_catalog(&config.catalog_path).unwrap();
    assert_eq!(saved.len(), 230);
    assert_eq!(saved[0].title, "Pattern 1");
    assert_eq!(saved[229].title, "Pattern 230");
}

#[tokio::test]
async fn pagination_stops_on_empty_page() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path());
    let mock = MockFetcher::new()
        .with_json(shop_url(), &fixtures::shop_found(77))
        .with_json(listings_url(0), &fixtures::listings_page(1, 100))
        .with_json(listings_url(100), &fixtures::page(vec![]));

    let ingestor = build_ingestor(&config, Arc::new(mock.clone())).unwrap();
    let items = ingestor.ingest().await.unwrap();

    assert_eq!(items.len(), 100);
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn api_key_sent_on_every_request() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path());
    let mock = MockFetcher::new()
        .with_json(shop_url(), &fixtures::shop_found(77))
        .with_json(listings_url(0), &fixtures::listings_page(1, 3));

    let ingestor = EtsyApiIngestor::new(&config, Arc::new(mock.clone())).unwrap();
    ingestor.ingest().await.unwrap();

    for call in mock.calls() {
        assert_eq!(call.header_value("x-api-key"), Some("test-key"));
    }
}

#[tokio::test]
async fn listings_without_images_are_dropped_and_prices_formatted() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path());
    let page = fixtures::page(vec![
        fixtures::listing(1, 2500),
        fixtures::listing_without_images(2),
        fixtures::listing(3, 1999),
    ]);
    let mock = MockFetcher::new()
        .with_json(shop_url(), &fixtures::shop_found(77))
        .with_json(listings_url(0), &page);

    let ingestor = build_ingestor(&config, Arc::new(mock)).unwrap();
    let items = ingestor.ingest().await.unwrap();

    let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Pattern 1", "Pattern 3"]);
    assert_eq!(items[0].price, "CA$25");
    assert_eq!(items[1].price, "CA$19.99");
    assert_eq!(items[0].image_url, "https://i.etsystatic.com/1/il_fullxfull.jpg");
}

#[tokio::test]
async fn shop_lookup_404_aborts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path());
    let mock = MockFetcher::new().with_response(shop_url(), FetchResponse::new(404, "shop gone"));

    let ingestor = build_ingestor(&config, Arc::new(mock.clone())).unwrap();
    let err = run_ingestion(ingestor.as_ref(), &config).await.unwrap_err();

    match err {
        CatalogError::Upstream { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "shop gone");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(mock.call_count(), 1);
    assert!(!config.catalog_path.exists());
}

#[tokio::test]
async fn unknown_shop_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path());
    let mock = MockFetcher::new().with_json(shop_url(), &fixtures::shop_missing());

    let ingestor = build_ingestor(&config, Arc::new(mock)).unwrap();
    let err = run_ingestion(ingestor.as_ref(), &config).await.unwrap_err();

    assert!(matches!(err, CatalogError::UpstreamNotFound { .. }));
    assert!(!config.catalog_path.exists());
}

#[tokio::test]
async fn malformed_page_is_parse_error_and_keeps_old_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path());
    let previous = vec![CatalogItem::new("Old", "https://x/old", "https://x/old.jpg")];
    write_catalog(&config.catalog_path, &previous).unwrap();

    let mock = MockFetcher::new()
        .with_json(shop_url(), &fixtures::shop_found(77))
        .with_json(listings_url(0), &fixtures::listings_page(1, 100))
        .with_response(listings_url(100), FetchResponse::ok("<html>rate limited</html>"));

    let ingestor = build_ingestor(&config, Arc::new(mock)).unwrap();
    let err = run_ingestion(ingestor.as_ref(), &config).await.unwrap_err();

    assert!(matches!(err, CatalogError::Parse(_)));
    assert_eq!(read_catalog(&config.catalog_path).unwrap(), previous);
}

#[tokio::test]
async fn scrape_run_writes_normalized_items() {
    let dir = tempfile::tempdir().unwrap();
    let config = scrape_config(dir.path());
    let mock = MockFetcher::new().with_response(SHOP_URL, FetchResponse::ok(SHOP_HTML));

    let ingestor = build_ingestor(&config, Arc::new(mock.clone())).unwrap();
    let report = run_ingestion(ingestor.as_ref(), &config).await.unwrap();
    assert_eq!(report.items, 2);
    assert_eq!(report.ingestor, "shop-page");

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].header_value("user-agent").unwrap().starts_with("Mozilla/5.0"));

    let saved = read_catalog(&config.catalog_path).unwrap();
    assert_eq!(saved[0].title, "Fox Sampler");
    assert_eq!(saved[0].detail_url, "https://www.etsy.com/ca/listing/1/fox");
    assert_eq!(saved[0].price, "CA$8.00");
    assert_eq!(saved[1].title, "Owl Sampler");
    assert_eq!(saved[1].image_url, "https://i.etsystatic.com/2/owl.jpg");
    assert_eq!(saved[1].price, "N/A");
}

#[tokio::test]
async fn scrape_with_no_cards_keeps_previous_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let config = scrape_config(dir.path());
    let previous = vec![CatalogItem::new("Old", "https://x/old", "https://x/old.jpg")];
    write_catalog(&config.catalog_path, &previous).unwrap();

    let mock = MockFetcher::new()
        .with_response(SHOP_URL, FetchResponse::ok("<html><body>redesigned</body></html>"));

    let ingestor = build_ingestor(&config, Arc::new(mock)).unwrap();
    let err = run_ingestion(ingestor.as_ref(), &config).await.unwrap_err();

    assert!(matches!(err, CatalogError::TooFewItems { found: 0, expected: 1 }));
    assert_eq!(read_catalog(&config.catalog_path).unwrap(), previous);
}

#[tokio::test]
async fn scrape_rejected_by_marketplace() {
    let dir = tempfile::tempdir().unwrap();
    let config = scrape_config(dir.path());
    let mock = MockFetcher::new().with_response(SHOP_URL, FetchResponse::new(403, "blocked"));

    let ingestor = build_ingestor(&config, Arc::new(mock)).unwrap();
    let err = run_ingestion(ingestor.as_ref(), &config).await.unwrap_err();

    assert!(matches!(err, CatalogError::Upstream { status: 403, .. }));
    assert!(!config.catalog_path.exists());
}

fn items(n: usize) -> Vec<CatalogItem> {
    (1..=n)
        .map(|i| CatalogItem::new(format!("Item {i}"), format!("https://x/{i}"), format!("https://img/{i}.jpg")))
        .collect()
}

fn write_site_config(path: &Path, hero: &[&str]) {
    let config = json!({
        "siteTitle": "Heartfelt Designs",
        "heroImages": hero,
        "theme": "lavender"
    });
    std::fs::write(path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
}

#[tokio::test]
async fn hero_images_seeded_when_opted_in_and_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path()).with_hero_seeding(true);
    write_site_config(&config.site_config_path, &[]);

    let report = run_ingestion(&MockIngestor::with_items(items(8)), &config)
        .await
        .unwrap();
    assert!(report.hero_seeded);

    let site = SiteConfig::load(&config.site_config_path).unwrap();
    assert_eq!(site.hero_images.len(), 5);
    assert_eq!(site.hero_images[0], "https://img/1.jpg");
    assert_eq!(site.extra["theme"], "lavender");
}

#[tokio::test]
async fn hero_images_left_alone_without_opt_in() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path());
    write_site_config(&config.site_config_path, &[]);
    let before = std::fs::read_to_string(&config.site_config_path).unwrap();

    let report = run_ingestion(&MockIngestor::with_items(items(3)), &config)
        .await
        .unwrap();

    assert!(!report.hero_seeded);
    assert_eq!(std::fs::read_to_string(&config.site_config_path).unwrap(), before);
}

#[tokio::test]
async fn hero_images_not_replaced_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path()).with_hero_seeding(true);
    write_site_config(&config.site_config_path, &["https://mine/hero.jpg"]);

    let report = run_ingestion(&MockIngestor::with_items(items(3)), &config)
        .await
        .unwrap();

    assert!(!report.hero_seeded);
    let site = SiteConfig::load(&config.site_config_path).unwrap();
    assert_eq!(site.hero_images, vec!["https://mine/hero.jpg"]);
}

#[tokio::test]
async fn unreadable_site_config_aborts_before_catalog_write() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path()).with_hero_seeding(true);
    std::fs::write(&config.site_config_path, "{ not json").unwrap();

    let err = run_ingestion(&MockIngestor::with_items(items(3)), &config)
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Json(_)));
    assert!(!config.catalog_path.exists());
}

#[tokio::test]
async fn seeding_rewrites_only_hero_images() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path()).with_hero_seeding(true);
    std::fs::write(&config.site_config_path, r#"{"heroImages":[],"siteTitle":"X"}"#).unwrap();

    let report = run_ingestion(&MockIngestor::with_items(items(2)), &config)
        .await
        .unwrap();
    assert!(report.hero_seeded);

    let text = std::fs::read_to_string(&config.site_config_path).unwrap();
    let written: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        written,
        json!({ "heroImages": ["https://img/1.jpg", "https://img/2.jpg"], "siteTitle": "X" })
    );
    assert!(text.find("heroImages").unwrap() < text.find("siteTitle").unwrap());
}

#[tokio::test]
async fn null_hero_images_are_seeded() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path()).with_hero_seeding(true);
    std::fs::write(&config.site_config_path, r#"{"heroImages": null}"#).unwrap();

    let report = run_ingestion(&MockIngestor::with_items(items(1)), &config)
        .await
        .unwrap();

    assert!(report.hero_seeded);
    let site = SiteConfig::load(&config.site_config_path).unwrap();
    assert_eq!(site.hero_images, vec!["https://img/1.jpg"]);
}

#[tokio::test]
async fn non_list_hero_images_abort_before_catalog_write() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path()).with_hero_seeding(true);
    std::fs::write(&config.site_config_path, r#"{"heroImages": "hero.jpg"}"#).unwrap();

    let err = run_ingestion(&MockIngestor::with_items(items(1)), &config)
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Config(_)));
    assert!(!config.catalog_path.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn rewrites_keep_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path()).with_hero_seeding(true);
    write_site_config(&config.site_config_path, &[]);
    std::fs::set_permissions(&config.site_config_path, std::fs::Permissions::from_mode(0o644))
        .unwrap();

    run_ingestion(&MockIngestor::with_items(items(1)), &config)
        .await
        .unwrap();

    let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&config.site_config_path), 0o644);
    assert_eq!(mode(&config.catalog_path), 0o644);
}

#[tokio::test]
async fn failed_ingest_never_writes() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path());
    let ingestor = MockIngestor::failing(500);

    assert!(run_ingestion(&ingestor, &config).await.is_err());
    assert_eq!(ingestor.call_count(), 1);
    assert!(!config.catalog_path.exists());
}

#[tokio::test]
async fn min_items_zero_allows_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let config = api_config(dir.path()).with_min_items(0);

    let report = run_ingestion(&MockIngestor::with_items(vec![]), &config)
        .await
        .unwrap();

    assert_eq!(report.items, 0);
    assert!(read_catalog(&config.catalog_path).unwrap().is_empty());
}
