mod common;

use std::sync::atomic::Ordering;

use chrono::NaiveDate;
use common::*;
use rust_decimal::Decimal;
use shop_inventory::{
    dto::{
        catalog::CatalogView,
        intake::{ImageFile, ImageMode, ImageSource, IntakeForm},
    },
    error::AppError,
    models::Category,
    response::{Notice, NoticeLevel},
    services::{
        catalog_service::load_catalog,
        image_service::{object_key, upload_image},
        intake_service::{PRODUCT_SAVED_MESSAGE, submit_product, validate},
    },
};

fn levels(notices: &[Notice]) -> Vec<NoticeLevel> {
    notices.iter().map(|n| n.level).collect()
}

#[tokio::test]
async fn pasted_url_is_stored_verbatim() {
    let h = harness(vec![]);
    let url = "http://example.com/x.png";

    let submitted = submit_product(
        &h.state,
        form("iPhone Case", ImageSource::PasteUrl(url.to_string())),
    )
    .await
    .expect("submitted");

    assert_eq!(submitted.record.image_url.as_deref(), Some(url));
    assert_eq!(h.products.inserted()[0].image_url.as_deref(), Some(url));
    assert!(h.images.objects().is_empty());
}

#[tokio::test]
async fn pasted_url_is_not_validated() {
    let h = harness(vec![]);

    let submitted = submit_product(
        &h.state,
        form("Cable", ImageSource::PasteUrl("not really a url".to_string())),
    )
    .await
    .expect("submitted");

    assert_eq!(submitted.record.image_url.as_deref(), Some("not really a url"));
}

#[tokio::test]
async fn upload_mode_without_file_saves_without_image() {
    let h = harness(vec![]);

    let submitted = submit_product(&h.state, form("Charger", ImageSource::Upload(None)))
        .await
        .expect("submission must not be blocked");

    assert_eq!(submitted.record.image_url, None);
    assert_eq!(h.products.inserted().len(), 1);
    assert_eq!(levels(&submitted.notices), vec![NoticeLevel::Success]);
}

#[tokio::test]
async fn uploaded_file_resolves_to_public_url() {
    let h = harness(vec![]);

    let submitted = submit_product(
        &h.state,
        form("Screen", ImageSource::Upload(Some(png("screen.png")))),
    )
    .await
    .expect("submitted");

    let objects = h.images.objects();
    assert_eq!(objects.len(), 1);
    assert!(objects[0].key.starts_with("items/img_"));
    assert!(objects[0].key.ends_with("_screen.png"));
    assert_eq!(objects[0].content_type, "image/png");

    let expected = format!("{PUBLIC_BASE}/{}", objects[0].key);
    assert_eq!(submitted.record.image_url, Some(expected));
}

#[tokio::test]
async fn upload_failure_degrades_to_no_image() {
    let h = harness(vec![]);
    h.images.fail_upload.store(true, Ordering::SeqCst);

    let submitted = submit_product(
        &h.state,
        form("Battery", ImageSource::Upload(Some(png("battery.png")))),
    )
    .await
    .expect("upload failure must not abort the submission");

    assert_eq!(submitted.record.image_url, None);
    assert_eq!(h.products.inserted().len(), 1);
    assert_eq!(
        levels(&submitted.notices),
        vec![NoticeLevel::Warning, NoticeLevel::Success]
    );
    assert!(submitted.notices[0].text.starts_with("Image upload failed"));
}

#[tokio::test]
async fn insert_failure_keeps_entered_values() {
    let h = harness(vec![]);
    h.products.fail_insert.store(true, Ordering::SeqCst);
    let entered = form("Headset", ImageSource::PasteUrl("http://example.com/h.png".into()));

    let rejected = submit_product(&h.state, entered.clone())
        .await
        .expect_err("insert failure");

    assert_eq!(rejected.form, entered);
    assert!(matches!(rejected.error, AppError::Insert(_)));
    assert_eq!(levels(&rejected.notices), vec![NoticeLevel::Error]);
    assert!(
        rejected
            .notices
            .iter()
            .all(|n| n.text != PRODUCT_SAVED_MESSAGE)
    );
    assert!(h.products.inserted().is_empty());
}

#[tokio::test]
async fn change_signal_follows_successful_insert_only() {
    let h = harness(vec![]);
    let mut events = h.state.events.subscribe();

    h.products.fail_insert.store(true, Ordering::SeqCst);
    let _ = submit_product(&h.state, form("Case", ImageSource::Upload(None))).await;
    assert!(events.try_recv().is_err());
    assert_eq!(h.state.events.revision(), 0);

    h.products.fail_insert.store(false, Ordering::SeqCst);
    let submitted = submit_product(&h.state, form("Case", ImageSource::Upload(None)))
        .await
        .expect("submitted");

    let change = events.try_recv().expect("catalog change");
    assert_eq!(change, submitted.event);
    assert_eq!(change.revision, 1);
}

#[tokio::test]
async fn inserted_product_is_searchable_end_to_end() {
    let h = harness(vec![]);
    let entered = IntakeForm {
        name: "iPhone Case".to_string(),
        category: "Phones".to_string(),
        price: "25.0".to_string(),
        stock: "10".to_string(),
        image: ImageSource::Upload(None),
    };

    let submitted = submit_product(&h.state, entered).await.expect("submitted");
    assert_eq!(submitted.record.category, Category::Phones);
    assert_eq!(submitted.record.price, Decimal::new(250, 1));
    assert_eq!(submitted.record.stock, 10);

    for query in ["case", "CASE", "Case"] {
        match load_catalog(&h.state, query).await.expect("catalog") {
            CatalogView::Grid { matches, columns, .. } => {
                assert_eq!(matches, 1);
                assert_eq!(columns[0][0].name, "iPhone Case");
            }
            other => panic!("expected grid, got {other:?}"),
        }
    }

    match load_catalog(&h.state, "batt").await.expect("catalog") {
        CatalogView::Grid { matches, .. } => assert_eq!(matches, 0),
        other => panic!("expected grid, got {other:?}"),
    }
}

#[test]
fn validation_rejects_bad_fields() {
    let base = form("Case", ImageSource::Upload(None));
    let cases = [
        IntakeForm {
            name: "   ".into(),
            ..base.clone()
        },
        IntakeForm {
            category: "Tablets".into(),
            ..base.clone()
        },
        IntakeForm {
            price: "-1".into(),
            ..base.clone()
        },
        IntakeForm {
            price: "79228162514264337593543950336".into(),
            ..base.clone()
        },
        IntakeForm {
            price: "ten".into(),
            ..base.clone()
        },
        IntakeForm {
            stock: "0".into(),
            ..base.clone()
        },
        IntakeForm {
            stock: "2.5".into(),
            ..base.clone()
        },
        IntakeForm {
            image: ImageSource::Upload(Some(png("photo.gif"))),
            ..base.clone()
        },
    ];

    for case in cases {
        assert!(
            matches!(validate(&case), Err(AppError::BadRequest(_))),
            "expected rejection for {case:?}"
        );
    }
}

#[test]
fn validation_accepts_any_non_negative_price() {
    let base = form("Case", ImageSource::Upload(None));
    for (typed, expected) in [
        ("19.90", Decimal::new(1990, 2)),
        ("10.25", Decimal::new(1025, 2)),
        ("0", Decimal::ZERO),
        ("79228162514264337593543950335", Decimal::MAX),
    ] {
        let fields = validate(&IntakeForm {
            price: typed.into(),
            ..base.clone()
        })
        .unwrap_or_else(|err| panic!("{typed} rejected: {err}"));
        assert_eq!(fields.price, expected);
    }
}

#[test]
fn validation_trims_and_applies_defaults() {
    let fields = validate(&IntakeForm {
        name: " Case ".into(),
        price: "12.5".into(),
        ..IntakeForm::default()
    })
    .expect("valid");

    assert_eq!(fields.name, "Case");
    assert_eq!(fields.category, Category::Phones);
    assert_eq!(fields.price, Decimal::new(125, 1));
    assert_eq!(fields.stock, 1);
}

#[tokio::test]
async fn validation_failure_calls_no_external_service() {
    let h = harness(vec![]);
    let entered = IntakeForm {
        stock: "0".into(),
        ..form("Case", ImageSource::Upload(Some(png("case.png"))))
    };

    let rejected = submit_product(&h.state, entered.clone())
        .await
        .expect_err("invalid");

    assert_eq!(rejected.form, entered);
    assert!(h.images.objects().is_empty());
    assert!(h.products.inserted().is_empty());
}

#[test]
fn defaults_pick_first_category_and_upload_mode() {
    let form = IntakeForm::default();
    assert_eq!(form.category, "Phones");
    assert_eq!(form.stock, "1");
    assert_eq!(form.image, ImageSource::Upload(None));
}

#[test]
fn switching_modes_discards_other_input() {
    let source = ImageSource::PasteUrl("http://example.com/a.png".into());
    assert_eq!(source.clone().switch_to(ImageMode::PasteUrl), source);

    let switched = source.switch_to(ImageMode::Upload);
    assert_eq!(switched, ImageSource::Upload(None));

    let back = switched.switch_to(ImageMode::PasteUrl);
    assert_eq!(back, ImageSource::PasteUrl(String::new()));
}

#[test]
fn object_key_uses_folder_timestamp_and_filename() {
    let at = NaiveDate::from_ymd_opt(2024, 1, 5)
        .and_then(|d| d.and_hms_opt(9, 30, 7))
        .expect("valid timestamp");

    assert_eq!(object_key(at, "case.png"), "items/img_20240105_093007_case.png");
    assert_eq!(
        object_key(at, "C:\\fakepath\\case.png"),
        "items/img_20240105_093007_case.png"
    );
}

#[tokio::test]
async fn same_second_same_name_uploads_share_a_key() {
    let h = harness(vec![]);
    let at = NaiveDate::from_ymd_opt(2024, 1, 5)
        .and_then(|d| d.and_hms_opt(9, 30, 7))
        .expect("valid timestamp");
    let file: ImageFile = png("case.png");

    let first = upload_image(&*h.images, &file, at).await.expect("upload");
    let second = upload_image(&*h.images, &file, at).await.expect("upload");

    assert_eq!(first, second);
}

#[test]
fn content_type_is_guessed_from_extension() {
    assert_eq!(ImageFile::guess_content_type("a.PNG"), "image/png");
    assert_eq!(ImageFile::guess_content_type("a.jpeg"), "image/jpeg");
    assert_eq!(ImageFile::guess_content_type("a.webp"), "image/webp");
    assert_eq!(
        ImageFile::guess_content_type("a"),
        "application/octet-stream"
    );
}
