use modelcat_core::{
    CatalogClient, CatalogPage, CatalogSource, ComparePage, DetailPage, ModelId, ModelRecord,
    PageError, Panel, RangeField, SortColumn,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    ProviderPopup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Table,
    Detail,
    Compare,
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub view: View,

    // Data
    client: Box<dyn CatalogSource>,
    pub catalog: Result<CatalogPage, PageError>,
    pub detail: Option<Result<DetailPage, PageError>>,
    pub compare: Option<Result<ComparePage, PageError>>,

    // Table state
    pub selected_row: usize,
    pub focused_range: RangeField,

    // Provider popup
    pub provider_cursor: usize,

    /// First model picked with 'c'; the second pick opens the comparison.
    pub compare_mark: Option<ModelId>,
    pub status: Option<String>,
}

impl App {
    pub fn new(client: CatalogClient) -> Self {
        Self::with_source(Box::new(client))
    }

    pub fn with_source(client: Box<dyn CatalogSource>) -> Self {
        let catalog = CatalogPage::load(client.as_ref(), &[]);
        App {
            should_quit: false,
            input_mode: InputMode::Normal,
            view: View::Table,
            client,
            catalog,
            detail: None,
            compare: None,
            selected_row: 0,
            focused_range: RangeField::ParameterCount,
            provider_cursor: 0,
            compare_mark: None,
            status: None,
        }
    }

    /// Replace the whole catalog with a fresh fetch.
    pub fn reload(&mut self) {
        self.catalog = CatalogPage::load(self.client.as_ref(), &[]);
        self.selected_row = 0;
        self.provider_cursor = 0;
        self.compare_mark = None;
        self.status = match &self.catalog {
            Ok(page) => Some(format!("Reloaded {} models", page.all_models().len())),
            Err(e) => Some(e.message(Panel::Catalog).to_string()),
        };
    }

    pub fn catalog_message(&self) -> Option<&'static str> {
        self.catalog.as_ref().err().map(|e| e.message(Panel::Catalog))
    }

    pub fn visible_len(&self) -> usize {
        self.catalog.as_ref().map_or(0, |page| page.visible_len())
    }

    pub fn selected_model(&self) -> Option<&ModelRecord> {
        self.catalog
            .as_ref()
            .ok()
            .and_then(|page| page.visible_model(self.selected_row))
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= len {
            self.selected_row = len - 1;
        }
    }

    /// Run a filter/sort change against the catalog page, if it loaded.
    /// The previous action's status message no longer applies.
    fn with_catalog(&mut self, change: impl FnOnce(&mut CatalogPage)) {
        self.status = None;
        if let Ok(page) = self.catalog.as_mut() {
            change(page);
        }
        self.clamp_selection();
    }

    pub fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.visible_len();
        if len > 0 && self.selected_row < len - 1 {
            self.selected_row += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(10);
    }

    pub fn page_down(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.selected_row = (self.selected_row + 10).min(len - 1);
        }
    }

    pub fn home(&mut self) {
        self.selected_row = 0;
    }

    pub fn end(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.selected_row = len - 1;
        }
    }

    pub fn cycle_sort_column(&mut self) {
        self.with_catalog(|page| {
            let next = page.sort_column().map_or(SortColumn::Name, |c| c.next());
            page.sort_by(next);
        });
    }

    pub fn cycle_license(&mut self) {
        self.with_catalog(|page| page.cycle_license());
    }

    pub fn toggle_range_focus(&mut self) {
        self.status = None;
        self.focused_range = self.focused_range.other();
    }

    pub fn nudge_low(&mut self, steps: i64) {
        let field = self.focused_range;
        self.with_catalog(|page| {
            page.update_slider(field, |s| s.nudge_low(steps));
        });
    }

    pub fn nudge_high(&mut self, steps: i64) {
        let field = self.focused_range;
        self.with_catalog(|page| {
            page.update_slider(field, |s| s.nudge_high(steps));
        });
    }

    pub fn reset_filters(&mut self) {
        self.with_catalog(|page| page.reset_filters());
        self.status = Some("Filters cleared".to_string());
    }

    pub fn open_provider_popup(&mut self) {
        if self.catalog.is_ok() {
            self.input_mode = InputMode::ProviderPopup;
        }
    }

    pub fn close_provider_popup(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn provider_count(&self) -> usize {
        self.catalog
            .as_ref()
            .map_or(0, |page| page.domains().providers.len())
    }

    pub fn provider_popup_up(&mut self) {
        self.provider_cursor = self.provider_cursor.saturating_sub(1);
    }

    pub fn provider_popup_down(&mut self) {
        if self.provider_cursor + 1 < self.provider_count() {
            self.provider_cursor += 1;
        }
    }

    pub fn provider_popup_toggle(&mut self) {
        let cursor = self.provider_cursor;
        self.with_catalog(|page| {
            let name = page
                .domains()
                .provider_names()
                .nth(cursor)
                .map(str::to_string);
            if let Some(name) = name {
                page.toggle_provider(&name);
            }
        });
    }

    pub fn provider_popup_clear(&mut self) {
        self.with_catalog(|page| page.clear_providers());
    }

    pub fn open_detail(&mut self) {
        let id = self.selected_model().map(|m| m.id);
        self.detail = Some(DetailPage::load(self.client.as_ref(), id));
        self.view = View::Detail;
        self.status = None;
    }

    /// First press marks the selected model, second press compares.
    pub fn mark_for_compare(&mut self) {
        let Some(id) = self.selected_model().map(|m| m.id) else {
            return;
        };
        match self.compare_mark.take() {
            None => {
                self.compare_mark = Some(id);
                self.status = Some(format!("Marked model {} for comparison", id));
            }
            Some(first) => {
                self.compare = Some(ComparePage::load(self.client.as_ref(), Some(first), Some(id)));
                self.view = View::Compare;
                self.status = None;
            }
        }
    }

    /// Leave a sub-view, or quit from the table.
    pub fn back(&mut self) {
        match self.view {
            View::Table => self.should_quit = true,
            View::Detail | View::Compare => self.view = View::Table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelcat_core::{ClientError, PerformanceRecord};

    struct StaticCatalog(Vec<ModelRecord>);

    fn record(id: ModelId, provider: &str, params: Option<u64>) -> ModelRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("model-{}", id),
            "provider_name": provider,
            "parameter_count": params,
            "context_size": 4096,
        }))
        .unwrap()
    }

    impl CatalogSource for StaticCatalog {
        fn list_models(&self, _: &[(String, String)]) -> Result<Vec<ModelRecord>, ClientError> {
            Ok(self.0.clone())
        }

        fn get_model(&self, id: ModelId) -> Result<ModelRecord, ClientError> {
            self.0
                .iter()
                .find(|m| m.id == id)
                .cloned()
                .ok_or_else(|| ClientError::Status {
                    url: format!("models/{}", id),
                    code: 404,
                    reason: "Not Found".to_string(),
                })
        }

        fn get_model_performance(&self, _: ModelId) -> Result<Vec<PerformanceRecord>, ClientError> {
            Ok(Vec::new())
        }

        fn compare_models(&self, ids: [ModelId; 2]) -> Result<Vec<ModelRecord>, ClientError> {
            Ok(self.0.iter().filter(|m| ids.contains(&m.id)).cloned().collect())
        }
    }

    fn app() -> App {
        App::with_source(Box::new(StaticCatalog(vec![
            record(1, "Meta", Some(70000)),
            record(2, "Mistral", Some(7000)),
            record(3, "Meta", None),
        ])))
    }

    #[test]
    fn test_selection_clamps_after_filtering() {
        let mut app = app();
        app.end();
        assert_eq!(app.selected_row, 2);
        app.provider_cursor = 1;
        app.provider_popup_toggle();
        assert_eq!(app.visible_len(), 1);
        assert_eq!(app.selected_row, 0);
        assert_eq!(app.selected_model().map(|m| m.id), Some(2));
    }

    #[test]
    fn test_sort_cycle_starts_at_name() {
        let mut app = app();
        app.cycle_sort_column();
        let page = app.catalog.as_ref().unwrap();
        assert_eq!(page.sort_column(), Some(SortColumn::Name));
        app.cycle_sort_column();
        let page = app.catalog.as_ref().unwrap();
        assert_eq!(page.sort_column(), Some(SortColumn::Provider));
    }

    #[test]
    fn test_slider_nudge_narrows_parameter_range() {
        let mut app = app();
        app.nudge_high(-1);
        let page = app.catalog.as_ref().unwrap();
        let ids: Vec<ModelId> = page.visible_models().map(|m| m.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_status_clears_on_next_filter_change() {
        let mut app = app();
        app.reset_filters();
        assert_eq!(app.status.as_deref(), Some("Filters cleared"));
        app.cycle_license();
        assert_eq!(app.status, None);

        app.reload();
        assert!(app.status.is_some());
        app.toggle_range_focus();
        assert_eq!(app.status, None);
    }

    #[test]
    fn test_compare_needs_two_marks() {
        let mut app = app();
        app.mark_for_compare();
        assert_eq!(app.compare_mark, Some(1));
        assert_eq!(app.view, View::Table);
        app.move_down();
        app.mark_for_compare();
        assert_eq!(app.view, View::Compare);
        let ids: Vec<ModelId> = app
            .compare
            .as_ref()
            .unwrap()
            .as_ref()
            .unwrap()
            .models
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
        app.back();
        assert_eq!(app.view, View::Table);
        assert!(!app.should_quit);
        app.back();
        assert!(app.should_quit);
    }

    #[test]
    fn test_detail_with_empty_catalog_reports_missing_id() {
        let mut app = App::with_source(Box::new(StaticCatalog(Vec::new())));
        assert_eq!(
            app.catalog_message(),
            Some("No models found matching the criteria.")
        );
        app.open_detail();
        assert!(matches!(
            app.detail,
            Some(Err(PageError::MissingInput(_)))
        ));
    }
}
