//! Page controllers: each owns one view's fetched data and transient state.
//!
//! Loads never panic. Failures are logged here and handed back as a
//! [`PageError`] for the caller to render in place of the content.

use crate::aggregate::FilterDomains;
use crate::client::CatalogSource;
use crate::error::{PageError, Panel};
use crate::filter::{FilterState, LicenseChoice, filter_indices};
use crate::models::{ModelId, ModelRecord, PerformanceRecord};
use crate::slider::RangeSlider;
use crate::sort::{Direction, SortColumn, sort_indices};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    ParameterCount,
    ContextSize,
}

impl RangeField {
    pub fn label(&self) -> &'static str {
        match self {
            RangeField::ParameterCount => "Params",
            RangeField::ContextSize => "Context",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            RangeField::ParameterCount => RangeField::ContextSize,
            RangeField::ContextSize => RangeField::ParameterCount,
        }
    }
}

/// The model table with its filter controls.
///
/// `all_models` is replaced only by a fresh [`CatalogPage::load`]; the
/// visible rows are positions into it.
pub struct CatalogPage {
    all_models: Vec<ModelRecord>,
    domains: FilterDomains,
    state: FilterState,
    parameter_slider: Option<RangeSlider>,
    context_slider: Option<RangeSlider>,
    visible: Vec<usize>,
    sort_column: Option<SortColumn>,
}

impl CatalogPage {
    pub fn load(
        source: &dyn CatalogSource,
        server_filters: &[(String, String)],
    ) -> Result<Self, PageError> {
        let models = source.list_models(server_filters).map_err(|e| {
            tracing::warn!(error = %e, "failed to fetch models");
            PageError::from(e)
        })?;
        let page = Self::from_models(models)?;
        tracing::info!(
            models = page.all_models.len(),
            providers = page.domains.providers.len(),
            "catalog loaded"
        );
        Ok(page)
    }

    pub fn from_models(models: Vec<ModelRecord>) -> Result<Self, PageError> {
        if models.is_empty() {
            tracing::info!("catalog query returned no models");
            return Err(PageError::Empty);
        }
        let domains = FilterDomains::from_models(&models);
        let state = FilterState::unrestricted(&domains);
        let parameter_slider = domains.parameter_range.map(RangeSlider::spanning);
        let context_slider = domains.context_range.map(RangeSlider::spanning);
        let visible = (0..models.len()).collect();

        Ok(Self {
            all_models: models,
            domains,
            state,
            parameter_slider,
            context_slider,
            visible,
            sort_column: None,
        })
    }

    pub fn all_models(&self) -> &[ModelRecord] {
        &self.all_models
    }

    pub fn domains(&self) -> &FilterDomains {
        &self.domains
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    pub fn sort_column(&self) -> Option<SortColumn> {
        self.sort_column
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn visible_model(&self, row: usize) -> Option<&ModelRecord> {
        self.visible.get(row).map(|&idx| &self.all_models[idx])
    }

    pub fn visible_models(&self) -> impl Iterator<Item = &ModelRecord> {
        self.visible.iter().map(|&idx| &self.all_models[idx])
    }

    /// Recompute the visible rows from the full list.
    ///
    /// Rows come back in catalog order; a previous column sort is dropped.
    pub fn apply_filters(&mut self) {
        self.visible = filter_indices(&self.all_models, &self.state);
        self.sort_column = None;
    }

    /// Re-sort the visible rows ascending by `column`.
    pub fn sort_by(&mut self, column: SortColumn) {
        sort_indices(
            &mut self.visible,
            &self.all_models,
            column,
            Direction::Ascending,
        );
        self.sort_column = Some(column);
    }

    pub fn is_provider_selected(&self, name: &str) -> bool {
        self.state.providers.contains(name)
    }

    pub fn toggle_provider(&mut self, name: &str) {
        if !self.state.providers.remove(name) {
            self.state.providers.insert(name.to_string());
        }
        self.apply_filters();
    }

    pub fn clear_providers(&mut self) {
        self.state.providers.clear();
        self.apply_filters();
    }

    pub fn set_license(&mut self, choice: LicenseChoice) {
        self.state.license = choice;
        self.apply_filters();
    }

    pub fn cycle_license(&mut self) {
        let next = self.state.license.next(&self.domains.licenses);
        self.set_license(next);
    }

    pub fn slider(&self, field: RangeField) -> Option<&RangeSlider> {
        match field {
            RangeField::ParameterCount => self.parameter_slider.as_ref(),
            RangeField::ContextSize => self.context_slider.as_ref(),
        }
    }

    /// Run `change` against one slider and re-filter if it moved.
    pub fn update_slider(
        &mut self,
        field: RangeField,
        change: impl FnOnce(&mut RangeSlider) -> bool,
    ) -> bool {
        let slider = match field {
            RangeField::ParameterCount => self.parameter_slider.as_mut(),
            RangeField::ContextSize => self.context_slider.as_mut(),
        };
        let Some(slider) = slider else {
            return false;
        };
        if !change(slider) {
            return false;
        }
        let filter = Some(slider.to_filter());
        match field {
            RangeField::ParameterCount => self.state.parameter_count = filter,
            RangeField::ContextSize => self.state.context_size = filter,
        }
        self.apply_filters();
        true
    }

    pub fn set_parameter_range(&mut self, low: u64, high: u64) -> bool {
        self.update_slider(RangeField::ParameterCount, |s| s.set(low, high))
    }

    pub fn set_context_range(&mut self, low: u64, high: u64) -> bool {
        self.update_slider(RangeField::ContextSize, |s| s.set(low, high))
    }

    pub fn reset_filters(&mut self) {
        for slider in [&mut self.parameter_slider, &mut self.context_slider]
            .into_iter()
            .flatten()
        {
            slider.reset();
        }
        self.state = FilterState::unrestricted(&self.domains);
        self.apply_filters();
    }
}

/// One model's details and benchmark scores, fetched independently.
pub struct DetailPage {
    pub id: ModelId,
    pub model: Result<ModelRecord, PageError>,
    pub performance: Result<Vec<PerformanceRecord>, PageError>,
}

impl DetailPage {
    pub fn load(source: &dyn CatalogSource, id: Option<ModelId>) -> Result<Self, PageError> {
        let Some(id) = id else {
            tracing::warn!("no model id provided");
            return Err(PageError::MissingInput("id"));
        };

        let model = source.get_model(id).map_err(|e| {
            tracing::warn!(id, error = %e, "failed to fetch model details");
            PageError::from(e)
        });

        let performance = match source.get_model_performance(id) {
            Ok(records) if records.is_empty() => Err(PageError::Empty),
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to fetch model performance");
                Err(PageError::from(e))
            }
        };

        Ok(Self {
            id,
            model,
            performance,
        })
    }

    pub fn model_message(&self) -> Option<&'static str> {
        self.model.as_ref().err().map(|e| e.message(Panel::Details))
    }

    pub fn performance_message(&self) -> Option<&'static str> {
        self.performance
            .as_ref()
            .err()
            .map(|e| e.message(Panel::Performance))
    }
}

/// Two models side by side, in the order they were requested.
pub struct ComparePage {
    pub models: Vec<ModelRecord>,
}

impl ComparePage {
    pub fn load(
        source: &dyn CatalogSource,
        first: Option<ModelId>,
        second: Option<ModelId>,
    ) -> Result<Self, PageError> {
        let (Some(first), Some(second)) = (first, second) else {
            tracing::warn!("comparison needs two model ids");
            return Err(PageError::MissingInput("model1 and model2"));
        };

        let records = source.compare_models([first, second]).map_err(|e| {
            tracing::warn!(first, second, error = %e, "failed to fetch comparison data");
            PageError::from(e)
        })?;
        if records.is_empty() {
            tracing::info!(first, second, "comparison returned no models");
            return Err(PageError::Empty);
        }

        let models = order_by_request([first, second], records);
        if models.len() < 2 {
            tracing::warn!(first, second, found = models.len(), "comparison is incomplete");
        }
        Ok(Self { models })
    }
}

/// Match records to the requested ids by identity rather than position.
/// Falls back to response order when no id matches.
fn order_by_request(ids: [ModelId; 2], records: Vec<ModelRecord>) -> Vec<ModelRecord> {
    let ordered: Vec<ModelRecord> = ids
        .iter()
        .filter_map(|id| records.iter().find(|r| r.id == *id).cloned())
        .collect();
    if ordered.is_empty() { records } else { ordered }
}
