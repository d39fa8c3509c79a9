//! Metadata panel state: visibility, pin and collapse.
//!
//! All transitions go through [`PanelState::dispatch`], so event handlers
//! never need to capture the pin flag themselves.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::format::format_metadata;
use super::types::{MetadataSection, ValidatedMetadata};
use super::validation::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Hidden,
    Shown { pinned: bool },
}

/// How the sidebar should be laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelLayout {
    /// Narrow strip with an expand handle
    Collapsed,
    /// Pinned: full height, attached to the right edge
    Docked,
    /// Unpinned card in the top right corner
    Floating,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// A scene node was hit and its metadata passed validation
    Selected(ValidatedMetadata),
    /// Click on empty space
    NoHit,
    /// A node was hit but its metadata failed validation
    Rejected,
    Close,
    TogglePin,
    ToggleCollapse,
}

impl PanelEvent {
    /// Build the event for a viewer click.
    ///
    /// `raw` is the metadata of the first hit, if any. A hit whose record
    /// fails validation becomes [`PanelEvent::Rejected`].
    pub fn from_hit(raw: Option<&Value>) -> Self {
        let Some(raw) = raw else {
            return PanelEvent::NoHit;
        };
        match validate(raw) {
            Ok(metadata) => PanelEvent::Selected(metadata),
            Err(e) => {
                log::warn!("Selected node has no usable metadata: {}", e);
                PanelEvent::Rejected
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelState {
    visibility: Visibility,
    collapsed: bool,
    content: Option<ValidatedMetadata>,
    selection_seq: u64,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_shown(&self) -> bool {
        matches!(self.visibility, Visibility::Shown { .. })
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self.visibility, Visibility::Shown { pinned: true })
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn content(&self) -> Option<&ValidatedMetadata> {
        self.content.as_ref()
    }

    /// Incremented on every accepted selection; the view scrolls to the top
    /// when it changes.
    pub fn selection_seq(&self) -> u64 {
        self.selection_seq
    }

    /// Sections for the current content. Empty while hidden.
    pub fn sections(&self) -> Vec<MetadataSection> {
        self.content.as_ref().map(format_metadata).unwrap_or_default()
    }

    pub fn layout(&self) -> PanelLayout {
        if self.collapsed {
            PanelLayout::Collapsed
        } else if self.is_pinned() {
            PanelLayout::Docked
        } else {
            PanelLayout::Floating
        }
    }

    /// Apply an event. Returns `true` if the state changed.
    pub fn dispatch(&mut self, event: PanelEvent) -> bool {
        let before = self.clone();

        match (event, self.visibility) {
            (PanelEvent::Selected(metadata), visibility) => {
                let pinned = matches!(visibility, Visibility::Shown { pinned: true });
                log::debug!("Showing metadata for component {}", metadata.id);
                self.visibility = Visibility::Shown { pinned };
                self.content = Some(metadata);
                self.selection_seq += 1;
            }
            // Закреплённая панель не скрывается по клику мимо модели
            (PanelEvent::NoHit, Visibility::Shown { pinned: true }) => {}
            // Нечего показывать для нового выбора: пустая панель, пин остаётся
            (PanelEvent::Rejected, Visibility::Shown { pinned: true }) => {
                if self.content.take().is_some() {
                    self.selection_seq += 1;
                }
            }
            (PanelEvent::NoHit, _) | (PanelEvent::Rejected, _) | (PanelEvent::Close, _) => {
                self.hide()
            }
            (PanelEvent::TogglePin, Visibility::Shown { pinned }) => {
                self.visibility = Visibility::Shown { pinned: !pinned };
            }
            (PanelEvent::ToggleCollapse, Visibility::Shown { .. }) => {
                self.collapsed = !self.collapsed;
            }
            (PanelEvent::TogglePin, Visibility::Hidden)
            | (PanelEvent::ToggleCollapse, Visibility::Hidden) => {}
        }

        *self != before
    }

    fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
        self.collapsed = false;
        self.content = None;
    }
}
