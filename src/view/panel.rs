use maud::{Markup, html};

use crate::model::{FocusChain, HoleRecord, Slot};

pub const DEFAULT_PAGE_TITLE: &str = "League Admin";

/// Where a panel posts back to and what it carries along.
#[derive(Debug, Clone, Default)]
pub struct PanelContext {
    pub heading: String,
    /// Stable name of the panel on the page, e.g. `pars` or `tee1`.
    pub panel: String,
    pub action: String,
    pub hidden: Vec<(String, String)>,
    pub message: Option<String>,
}

fn header_text(slot: Slot) -> String {
    match slot {
        Slot::Title => "Tee".to_string(),
        Slot::Hole(hole) => hole.to_string(),
        Slot::Sigma(sigma) => {
            let name = sigma.to_string();
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => name,
            }
        }
    }
}

/// Text a slot shows: the live surface when bound, otherwise the stored cells.
fn slot_text(record: &HoleRecord, slot: Slot) -> String {
    if let Some(surface) = record.surface() {
        return surface.display(slot);
    }
    match slot {
        Slot::Title => record.title().to_string(),
        Slot::Hole(hole) => record.value(hole).unwrap_or_default().to_string(),
        Slot::Sigma(sigma) => record
            .sigma(sigma)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    }
}

/// One hole panel: every slot of the record's format, in focus order, with
/// tab stops taken from `chain`.
#[must_use]
pub fn render_hole_panel(record: &HoleRecord, chain: &FocusChain, ctx: &PanelContext) -> Markup {
    let slots = record.format().slots();
    html! {
        form class="hole-panel" method="post" action=(ctx.action) data-panel=(ctx.panel) {
            @for (name, value) in &ctx.hidden {
                input type="hidden" name=(name) value=(value);
            }
            h3 class="panel-heading" { (ctx.heading) }
            table class="holes-table" {
                thead {
                    tr {
                        th { (record.policy().label()) }
                        @for slot in &slots {
                            th class=(if slot.is_editable() { "hole" } else { "sigma" }) { (header_text(*slot)) }
                        }
                    }
                }
                tbody {
                    tr {
                        th { (record.kind()) }
                        @for slot in &slots {
                            td {
                                @if slot.is_editable() {
                                    @let tab = chain.tab_index(&ctx.panel, *slot).unwrap_or_default();
                                    input type="text" name=(slot.name()) value=(slot_text(record, *slot)) tabindex=(tab) size="3";
                                } @else {
                                    input type="text" class="sigma" name=(slot.name()) value=(slot_text(record, *slot)) readonly tabindex="-1" size="3";
                                }
                            }
                        }
                    }
                }
            }
            @if let Some(message) = &ctx.message {
                p class="error" { (message) }
            }
            button type="submit" { "Save" }
        }
    }
}

#[must_use]
pub fn render_page(title: &str, body: Markup) -> Markup {
    html! {
        (maud::DOCTYPE)
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (title) }
        }
        body {
            h1 { (title) }
            (body)
        }
    }
}
