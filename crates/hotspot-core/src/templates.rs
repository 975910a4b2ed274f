// ── Voucher template store and editor ──
//
// The store holds committed templates in insertion order. The editor
// holds one draft, a full copy of a stored template, which every field
// edit is merged into so the preview can render uncommitted values.
// Nothing reaches the store until `save()` validates the draft.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{EntityId, TemplateEdit, VoucherTemplate};

/// Committed templates keyed by id, in seed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateStore {
    templates: IndexMap<EntityId, VoucherTemplate>,
}

impl TemplateStore {
    /// Build a store from a list. Later duplicates replace earlier ones.
    pub fn new(templates: impl IntoIterator<Item = VoucherTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    pub fn get(&self, id: &EntityId) -> Option<&VoucherTemplate> {
        self.templates.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoucherTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn position(&self, id: &EntityId) -> Option<usize> {
        self.templates.get_index_of(id)
    }

    pub fn get_index(&self, index: usize) -> Option<&VoucherTemplate> {
        self.templates.get_index(index).map(|(_, t)| t)
    }

    /// Replace the record with the same id. Never inserts.
    fn replace(&mut self, template: VoucherTemplate) -> Result<(), CoreError> {
        let slot = self
            .templates
            .get_mut(&template.id)
            .ok_or_else(|| CoreError::not_found("template", template.id.as_str()))?;
        *slot = template;
        Ok(())
    }
}

/// Outcome of switching the draft to another template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// The previous draft had edits that were thrown away.
    pub discarded: bool,
}

#[derive(Debug, Clone)]
pub struct TemplateEditor {
    store: TemplateStore,
    draft: Option<VoucherTemplate>,
}

impl TemplateEditor {
    /// Start editing the first stored template, if any.
    pub fn new(store: TemplateStore) -> Self {
        let draft = store.get_index(0).cloned();
        Self { store, draft }
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    pub fn draft(&self) -> Option<&VoucherTemplate> {
        self.draft.as_ref()
    }

    /// Index of the drafted template within the store.
    pub fn selected_index(&self) -> Option<usize> {
        self.draft.as_ref().and_then(|d| self.store.position(&d.id))
    }

    /// Replace the draft with the stored record for `id`. Pending edits
    /// are dropped; the result says whether there were any. On a miss the
    /// draft is left as it was.
    pub fn select(&mut self, id: &EntityId) -> Result<Selection, CoreError> {
        let stored = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("template", id.as_str()))?;
        let discarded = self.is_dirty();
        debug!(template = %id, discarded, "template selected");
        self.draft = Some(stored);
        Ok(Selection { discarded })
    }

    /// Merge a single field change into the draft.
    pub fn update(&mut self, edit: TemplateEdit) {
        if let Some(draft) = self.draft.as_mut() {
            draft.apply(edit);
        }
    }

    /// Validate the draft and write it over the stored record with the
    /// same id.
    pub fn save(&mut self) -> Result<&VoucherTemplate, CoreError> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| CoreError::not_found("template", "<none selected>"))?;
        draft.validate()?;
        self.store.replace(draft.clone())?;
        debug!(template = %draft.id, "template saved");
        Ok(draft)
    }

    /// Whether the draft differs from its stored record.
    pub fn is_dirty(&self) -> bool {
        match &self.draft {
            Some(draft) => self.store.get(&draft.id) != Some(draft),
            None => false,
        }
    }

    /// Throw away pending edits.
    pub fn revert(&mut self) {
        let stored = self
            .draft
            .as_ref()
            .and_then(|d| self.store.get(&d.id))
            .cloned();
        if stored.is_some() {
            self.draft = stored;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed::Seed;
    use pretty_assertions::assert_eq;

    fn editor() -> TemplateEditor {
        TemplateEditor::new(TemplateStore::new(Seed::builtin().templates))
    }

    fn id(s: &str) -> EntityId {
        EntityId::from(s)
    }

    #[test]
    fn starts_with_first_template_clean() {
        let editor = editor();
        assert_eq!(editor.draft().unwrap().name, "Default Template");
        assert_eq!(editor.selected_index(), Some(0));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn update_changes_draft_not_store() {
        let mut editor = editor();
        editor.update(TemplateEdit::HeaderText("Guest WiFi".into()));

        assert_eq!(editor.draft().unwrap().header_text, "Guest WiFi");
        assert_eq!(
            editor.store().get(&id("1")).unwrap().header_text,
            "WiFi Hotspot Voucher"
        );
        assert!(editor.is_dirty());
    }

    #[test]
    fn save_then_select_returns_saved_values() {
        let mut editor = editor();
        editor.update(TemplateEdit::AccentColor("#ff8800".into()));
        editor.update(TemplateEdit::ShowLogo(false));
        let saved = editor.save().unwrap().clone();

        editor.select(&id("2")).unwrap();
        editor.select(&id("1")).unwrap();
        assert_eq!(editor.draft(), Some(&saved));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn select_before_save_discards_edits() {
        let mut editor = editor();
        editor.update(TemplateEdit::Name("Scratch".into()));

        let selection = editor.select(&id("2")).unwrap();
        assert!(selection.discarded);

        let selection = editor.select(&id("1")).unwrap();
        assert!(!selection.discarded);
        assert_eq!(editor.draft().unwrap().name, "Default Template");
    }

    #[test]
    fn select_unknown_keeps_draft() {
        let mut editor = editor();
        editor.update(TemplateEdit::FooterText("Bye".into()));
        let err = editor.select(&id("42")).unwrap_err();
        assert_eq!(
            err,
            CoreError::NotFound {
                entity_type: "template",
                identifier: "42".into(),
            }
        );
        assert_eq!(editor.draft().unwrap().footer_text, "Bye");
    }

    #[test]
    fn malformed_color_fails_and_store_is_untouched() {
        let mut editor = editor();
        let before = editor.store().clone();
        editor.update(TemplateEdit::BackgroundColor("navy".into()));

        let err = editor.save().unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "background color", .. }));
        assert_eq!(editor.store(), &before);
        assert!(editor.is_dirty());
    }

    #[test]
    fn empty_name_fails_validation() {
        let mut editor = editor();
        editor.update(TemplateEdit::Name(String::new()));
        assert!(matches!(
            editor.save(),
            Err(CoreError::Validation { field: "template name", .. })
        ));
    }

    #[test]
    fn save_of_unknown_id_surfaces_not_found() {
        let mut template = Seed::builtin().templates.remove(0);
        template.id = id("orphan");
        let mut editor = TemplateEditor {
            store: TemplateStore::new(Seed::builtin().templates),
            draft: Some(template),
        };
        let before = editor.store().clone();
        assert!(matches!(editor.save(), Err(CoreError::NotFound { .. })));
        assert_eq!(editor.store(), &before);
    }

    #[test]
    fn revert_restores_stored_record() {
        let mut editor = editor();
        editor.update(TemplateEdit::ShowQr(false));
        editor.revert();
        assert!(!editor.is_dirty());
        assert!(editor.draft().unwrap().show_qr);
    }

    #[test]
    fn empty_store_has_no_draft() {
        let mut editor = TemplateEditor::new(TemplateStore::default());
        assert!(editor.draft().is_none());
        editor.update(TemplateEdit::Name("x".into()));
        assert!(!editor.is_dirty());
        assert!(editor.save().is_err());
    }
}
