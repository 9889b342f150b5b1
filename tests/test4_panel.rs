mod common;

use actix_web::web::Data;
use actix_web::{App, http::StatusCode, test};
use scraper::{Html, Selector};
use std::sync::Arc;

use common::{PARS_72, sample_course};
use golf_league::controller::{
    self,
    store::{add_course, add_event, add_player, add_scorecard, load_scorecard},
};
use golf_league::db::{LeagueDb, MemoryDb};
use golf_league::model::{Event, IdPrefix, Player, RecordId, Scorecard};

async fn seeded_db() -> Arc<MemoryDb> {
    let db = Arc::new(MemoryDb::new());
    add_course(db.as_ref(), &mut sample_course("Pebble Beach"))
        .await
        .unwrap();
    db
}

fn app_data(db: &Arc<MemoryDb>) -> Data<dyn LeagueDb> {
    let shared: Arc<dyn LeagueDb> = db.clone();
    Data::from(shared)
}

fn pars_form(values: &[&str]) -> Vec<(String, String)> {
    let mut form = vec![
        ("course".to_string(), "C0001".to_string()),
        ("record".to_string(), "pars".to_string()),
    ];
    for (idx, value) in values.iter().enumerate() {
        form.push((format!("h{}", idx + 1), (*value).to_string()));
    }
    form
}

fn input_attr(doc: &Html, name: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(&format!("input[name=\"{name}\"]")).unwrap();
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr).map(str::to_string))
}

#[actix_web::test]
async fn test4_get_panel_renders_slots_in_focus_order() {
    let db = seeded_db().await;
    let app = test::init_service(
        App::new()
            .app_data(app_data(&db))
            .configure(controller::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/panel?course=C0001&record=pars")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let doc = Html::parse_document(std::str::from_utf8(&body).unwrap());

    let inputs = Selector::parse("table.holes-table input").unwrap();
    let names: Vec<&str> = doc
        .select(&inputs)
        .filter_map(|el| el.value().attr("name"))
        .collect();
    assert_eq!(names.len(), 21);
    assert_eq!(names[8], "h9");
    assert_eq!(names[9], "out");
    assert_eq!(names[19], "in");
    assert_eq!(names[20], "total");

    assert_eq!(input_attr(&doc, "h1", "tabindex").as_deref(), Some("1"));
    assert_eq!(input_attr(&doc, "h10", "tabindex").as_deref(), Some("10"));
    assert_eq!(input_attr(&doc, "out", "tabindex").as_deref(), Some("-1"));
    assert!(input_attr(&doc, "total", "readonly").is_some());
    assert_eq!(input_attr(&doc, "h2", "value").as_deref(), Some("5"));
    assert_eq!(input_attr(&doc, "out", "value").as_deref(), Some("36"));
    assert_eq!(input_attr(&doc, "total", "value").as_deref(), Some("72"));
}

#[actix_web::test]
async fn test4_get_teebox_panel_has_title_first() {
    let db = seeded_db().await;
    let app = test::init_service(
        App::new()
            .app_data(app_data(&db))
            .configure(controller::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/panel?course=C0001&record=yardage&tee=1")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let doc = Html::parse_document(std::str::from_utf8(&body).unwrap());
    assert_eq!(input_attr(&doc, "title", "value").as_deref(), Some("Blue Tees"));
    assert_eq!(input_attr(&doc, "title", "tabindex").as_deref(), Some("1"));
    assert_eq!(input_attr(&doc, "h1", "tabindex").as_deref(), Some("2"));
    assert_eq!(input_attr(&doc, "total", "value").as_deref(), Some("6841"));
    assert_eq!(input_attr(&doc, "tee", "value").as_deref(), Some("1"));
}

#[actix_web::test]
async fn test4_get_panel_json() {
    let db = seeded_db().await;
    let app = test::init_service(
        App::new()
            .app_data(app_data(&db))
            .configure(controller::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/panel?course=C0001&record=pars&json=1")
        .to_request();
    let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(json["kind"], "pars");
    assert_eq!(json["total"], 72);
    assert_eq!(json["holes"][1], "5");
}

#[actix_web::test]
async fn test4_post_valid_pars_saves() {
    let db = seeded_db().await;
    let app = test::init_service(
        App::new()
            .app_data(app_data(&db))
            .configure(controller::configure),
    )
    .await;

    let mut values = PARS_72.to_vec();
    values[0] = "5";
    values[17] = " 4 ";
    let req = test::TestRequest::post()
        .uri("/panel")
        .set_form(pars_form(&values))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let doc = Html::parse_document(std::str::from_utf8(&body).unwrap());
    assert_eq!(input_attr(&doc, "total", "value").as_deref(), Some("72"));
    assert_eq!(input_attr(&doc, "out", "value").as_deref(), Some("37"));
    assert!(doc.select(&Selector::parse("p.error").unwrap()).next().is_none());

    let req = test::TestRequest::get()
        .uri("/panel?course=C0001&record=pars&json=1")
        .to_request();
    let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(json["holes"][0], "5");
    assert_eq!(json["holes"][17], "4");
}

#[actix_web::test]
async fn test4_post_invalid_pars_shows_message() {
    let db = seeded_db().await;
    let app = test::init_service(
        App::new()
            .app_data(app_data(&db))
            .configure(controller::configure),
    )
    .await;

    let mut values = PARS_72.to_vec();
    values[4] = "6";
    let req = test::TestRequest::post()
        .uri("/panel")
        .set_form(pars_form(&values))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    let doc = Html::parse_document(std::str::from_utf8(&body).unwrap());
    let message: String = doc
        .select(&Selector::parse("p.error").unwrap())
        .next()
        .map(|el| el.text().collect())
        .unwrap_or_default();
    assert_eq!(message, "pars: Hole 5: '6' must be between 3 and 5");
    // what was typed stays on the page
    assert_eq!(input_attr(&doc, "h5", "value").as_deref(), Some("6"));

    let req = test::TestRequest::get()
        .uri("/panel?course=C0001&record=pars&json=1")
        .to_request();
    let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(json["holes"][4], "4");
}

#[actix_web::test]
async fn test4_error_statuses() {
    let db = seeded_db().await;
    let app = test::init_service(
        App::new()
            .app_data(app_data(&db))
            .configure(controller::configure),
    )
    .await;

    let cases = [
        ("/panel?record=pars", StatusCode::BAD_REQUEST),
        ("/panel?course=C0001", StatusCode::BAD_REQUEST),
        ("/panel?course=C0001&record=yardage", StatusCode::BAD_REQUEST),
        ("/panel?course=C0001&record=bogus", StatusCode::BAD_REQUEST),
        ("/panel?course=C0009&record=pars", StatusCode::NOT_FOUND),
        ("/panel?course=C0001&record=yardage&tee=4", StatusCode::NOT_FOUND),
    ];
    for (uri, status) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status, "{uri}");
    }

    db.set_online(false);
    let req = test::TestRequest::get()
        .uri("/panel?course=C0001&record=pars")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test4_index_and_health() {
    let db = seeded_db().await;
    let app = test::init_service(
        App::new()
            .app_data(app_data(&db))
            .configure(controller::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let doc = Html::parse_document(std::str::from_utf8(&body).unwrap());
    let link = doc
        .select(&Selector::parse("ul.courses a").unwrap())
        .next()
        .unwrap();
    assert_eq!(link.text().collect::<String>(), "Pebble Beach");
    assert_eq!(
        link.value().attr("href"),
        Some("/panel?course=C0001&record=pars")
    );
}

#[actix_web::test]
async fn test4_scorecard_panel_posts_strokes() {
    let db = seeded_db().await;
    let course = RecordId::parse("C0001").unwrap();
    let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 9).unwrap();
    let blank = |prefix| RecordId::from_parts(prefix, 0).unwrap();
    let event = add_event(
        db.as_ref(),
        &mut Event::new(blank(IdPrefix::Event), "Club Champs", date, course),
    )
    .await
    .unwrap();
    let player = add_player(db.as_ref(), &mut Player::new(blank(IdPrefix::Player), "Bo Park"))
        .await
        .unwrap();
    let card = add_scorecard(
        db.as_ref(),
        &mut Scorecard::new(blank(IdPrefix::Scorecard), event, player),
    )
    .await
    .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(app_data(&db))
            .configure(controller::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/panel")
        .set_form(vec![
            ("scorecard", card.value()),
            ("record", "strokes"),
            ("h1", "5"),
            ("h2", "4"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let doc = Html::parse_document(std::str::from_utf8(&body).unwrap());
    assert_eq!(input_attr(&doc, "out", "value").as_deref(), Some("9"));
    assert_eq!(input_attr(&doc, "h3", "value").as_deref(), Some(""));

    let stored = load_scorecard(db.as_ref(), &card).await.unwrap();
    assert_eq!(stored.holes_played(), 2);

    let req = test::TestRequest::get()
        .uri("/panel?scorecard=S0001&event=E0001&record=strokes")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
