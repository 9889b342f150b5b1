use crate::model::format::{HoleFormat, Slot};

/// Tab order across every panel on a page. Each panel hangs its editable
/// slots off the current tail, in the format's slot order.
#[derive(Debug, Clone, Default)]
pub struct FocusChain {
    stops: Vec<String>,
}

impl FocusChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `panel`'s editable slots and return the new tail position.
    pub fn chain(&mut self, panel: &str, format: HoleFormat) -> Option<usize> {
        self.stops.extend(
            format
                .slots()
                .into_iter()
                .filter(|slot| slot.is_editable())
                .map(|slot| stop_name(panel, slot)),
        );
        self.tail()
    }

    #[must_use]
    pub fn tail(&self) -> Option<usize> {
        self.stops.len().checked_sub(1)
    }

    /// 1-based tab index of a slot, if it is a stop.
    #[must_use]
    pub fn tab_index(&self, panel: &str, slot: Slot) -> Option<usize> {
        let name = stop_name(panel, slot);
        self.stops.iter().position(|s| *s == name).map(|p| p + 1)
    }

    #[must_use]
    pub fn stops(&self) -> &[String] {
        &self.stops
    }
}

fn stop_name(panel: &str, slot: Slot) -> String {
    format!("{panel}.{}", slot.name())
}
