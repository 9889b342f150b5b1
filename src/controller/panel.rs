use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use maud::html;
use serde_json::json;
use std::collections::HashMap;
use std::hash::BuildHasher;
use tracing::warn;

use crate::controller::store::{
    list_courses, load_course, load_event, load_scorecard, save_course, save_event, save_scorecard,
};
use crate::db::LeagueDb;
use crate::error::LeagueError;
use crate::model::{FocusChain, HoleKind, HoleRecord, RecordId};
use crate::view::panel::{DEFAULT_PAGE_TITLE, PanelContext, render_hole_panel, render_page};

pub const PANEL_PATH: &str = "/panel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Course(RecordId),
    Event(RecordId),
    Scorecard(RecordId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRequest {
    pub owner: Owner,
    pub kind: HoleKind,
    /// 1-based teebox, only for yardage.
    pub tee: Option<usize>,
    pub want_json: bool,
}

impl PanelRequest {
    #[must_use]
    pub fn panel_name(&self) -> String {
        match (self.kind, self.tee) {
            (HoleKind::Yardage, Some(tee)) => format!("tee{tee}"),
            (kind, _) => kind.to_string(),
        }
    }

    fn hidden(&self) -> Vec<(String, String)> {
        let mut hidden = match &self.owner {
            Owner::Course(id) => vec![("course".to_string(), id.to_string())],
            Owner::Event(id) => vec![("event".to_string(), id.to_string())],
            Owner::Scorecard(id) => vec![("scorecard".to_string(), id.to_string())],
        };
        hidden.push(("record".to_string(), self.kind.to_string()));
        if let Some(tee) = self.tee {
            hidden.push(("tee".to_string(), tee.to_string()));
        }
        hidden
    }
}

/// Parse `course`/`event`/`scorecard`, `record`, `tee` and `json` parameters.
///
/// # Errors
/// Returns an error if the owner id or record kind is missing or invalid.
pub fn parse_panel_request<S: BuildHasher>(
    query: &HashMap<String, String, S>,
) -> Result<PanelRequest, LeagueError> {
    let owner = match (query.get("course"), query.get("event"), query.get("scorecard")) {
        (Some(id), None, None) => Owner::Course(RecordId::parse(id)?),
        (None, Some(id), None) => Owner::Event(RecordId::parse(id)?),
        (None, None, Some(id)) => Owner::Scorecard(RecordId::parse(id)?),
        _ => {
            return Err(LeagueError::Other(
                "exactly one of course, event or scorecard is required".into(),
            ));
        }
    };
    let kind = query
        .get("record")
        .ok_or_else(|| LeagueError::Other("record parameter is required".into()))
        .and_then(|r| HoleKind::parse(r).map_err(LeagueError::Other))?;
    let tee = query.get("tee").and_then(|s| s.trim().parse().ok());
    if kind == HoleKind::Yardage && tee.is_none() {
        return Err(LeagueError::Other("tee parameter is required for yardage".into()));
    }
    let want_json = matches!(query.get("json").map(String::as_str), Some("1" | "true"));
    Ok(PanelRequest {
        owner,
        kind,
        tee,
        want_json,
    })
}

fn error_response(err: &LeagueError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        LeagueError::NotFound(_) => HttpResponse::NotFound().json(body),
        LeagueError::CollaboratorUnavailable(_) => HttpResponse::ServiceUnavailable().json(body),
        LeagueError::Db(_) | LeagueError::MalformedWireLine(_) => {
            HttpResponse::InternalServerError().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn render(request: &PanelRequest, record: &HoleRecord, message: Option<String>) -> String {
    let panel = request.panel_name();
    let mut chain = FocusChain::new();
    chain.chain(&panel, record.format());
    let ctx = PanelContext {
        heading: format!("{} {}", record.policy().label(), panel),
        panel,
        action: PANEL_PATH.to_string(),
        hidden: request.hidden(),
        message,
    };
    render_page(DEFAULT_PAGE_TITLE, render_hole_panel(record, &chain, &ctx)).into_string()
}

/// Copy posted values onto the record's surface, editable slots only.
fn apply_form<S: BuildHasher>(record: &mut HoleRecord, form: &HashMap<String, String, S>) {
    let slots = record.format().slots();
    let surface = record.bind();
    for slot in slots.into_iter().filter(|s| s.is_editable()) {
        if let Some(value) = form.get(&slot.name()) {
            surface.set(slot, value.trim());
        }
    }
}

/// Apply `form` to the addressed record and save its owner. Returns the
/// record as it now stands, or the rejection message with the edited record.
async fn post_record<S: BuildHasher>(
    db: &dyn LeagueDb,
    request: &PanelRequest,
    form: &HashMap<String, String, S>,
) -> Result<(HoleRecord, Option<String>), LeagueError> {
    match &request.owner {
        Owner::Course(id) => {
            let mut course = load_course(db, id).await?;
            let record = course
                .record_mut(request.kind, request.tee)
                .ok_or_else(|| LeagueError::NotFound(format!("{} on course {id}", request.panel_name())))?;
            apply_form(record, form);
            let outcome = save_course(db, &mut course).await;
            finish(outcome, course.record(request.kind, request.tee))
        }
        Owner::Event(id) => {
            let mut event = load_event(db, id).await?;
            let record = event
                .record_mut(request.kind)
                .ok_or_else(|| LeagueError::NotFound(format!("{} on event {id}", request.kind)))?;
            apply_form(record, form);
            let outcome = save_event(db, &mut event).await;
            finish(outcome, event.record(request.kind))
        }
        Owner::Scorecard(id) => {
            let mut card = load_scorecard(db, id).await?;
            let record = card
                .record_mut(request.kind)
                .ok_or_else(|| LeagueError::NotFound(format!("{} on scorecard {id}", request.kind)))?;
            apply_form(record, form);
            let outcome = save_scorecard(db, &mut card).await;
            finish(outcome, card.record(request.kind))
        }
    }
}

fn finish(
    outcome: Result<(), LeagueError>,
    record: Option<&HoleRecord>,
) -> Result<(HoleRecord, Option<String>), LeagueError> {
    let record = record.ok_or_else(|| LeagueError::NotFound("record".into()))?;
    match outcome {
        Ok(()) => Ok((record.clone(), None)),
        Err(LeagueError::Validation(err)) => {
            // keep the rejected surface so the page shows what was typed
            let mut shown = record.clone();
            if let Some(surface) = record.surface() {
                let live = shown.bind();
                *live = surface.clone();
            }
            Ok((shown, Some(err.to_string())))
        }
        Err(err) => Err(err),
    }
}

async fn get_record(db: &dyn LeagueDb, request: &PanelRequest) -> Result<HoleRecord, LeagueError> {
    match &request.owner {
        Owner::Course(id) => {
            let course = load_course(db, id).await?;
            course
                .record(request.kind, request.tee)
                .cloned()
                .ok_or_else(|| LeagueError::NotFound(format!("{} on course {id}", request.panel_name())))
        }
        Owner::Event(id) => {
            let event = load_event(db, id).await?;
            event
                .record(request.kind)
                .cloned()
                .ok_or_else(|| LeagueError::NotFound(format!("{} on event {id}", request.kind)))
        }
        Owner::Scorecard(id) => {
            let card = load_scorecard(db, id).await?;
            card.record(request.kind)
                .cloned()
                .ok_or_else(|| LeagueError::NotFound(format!("{} on scorecard {id}", request.kind)))
        }
    }
}

pub async fn panel(
    query: web::Query<HashMap<String, String>>,
    db: Data<dyn LeagueDb>,
) -> impl Responder {
    let query = query.into_inner();
    let request = match parse_panel_request(&query) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };
    match get_record(db.get_ref(), &request).await {
        Ok(record) if request.want_json => HttpResponse::Ok().json(&record),
        Ok(record) => HttpResponse::Ok()
            .content_type("text/html")
            .body(render(&request, &record, None)),
        Err(e) => {
            warn!("panel load failed: {e}");
            error_response(&e)
        }
    }
}

pub async fn panel_post(
    form: web::Form<HashMap<String, String>>,
    db: Data<dyn LeagueDb>,
) -> impl Responder {
    let form = form.into_inner();
    let request = match parse_panel_request(&form) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };
    match post_record(db.get_ref(), &request, &form).await {
        Ok((record, None)) => HttpResponse::Ok()
            .content_type("text/html")
            .body(render(&request, &record, None)),
        Ok((record, Some(message))) => HttpResponse::BadRequest()
            .content_type("text/html")
            .body(render(&request, &record, Some(message))),
        Err(e) => {
            warn!("panel save failed: {e}");
            error_response(&e)
        }
    }
}

pub async fn index(db: Data<dyn LeagueDb>) -> impl Responder {
    match list_courses(db.get_ref()).await {
        Ok(courses) => {
            let body = html! {
                ul class="courses" {
                    @for (id, name) in &courses {
                        li {
                            a href=(format!("{PANEL_PATH}?course={id}&record=pars")) { (name) }
                            " (" (id) ")"
                        }
                    }
                }
            };
            HttpResponse::Ok()
                .content_type("text/html")
                .body(render_page(DEFAULT_PAGE_TITLE, body).into_string())
        }
        Err(e) => error_response(&e),
    }
}
