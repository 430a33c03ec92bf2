use super::CalendarApp;
use crate::error::{LayoutError, Result};
use crate::models::layout::LayoutSnapshot;
use crate::models::ui::Direction;
use chrono::Local;
use std::sync::Arc;

impl CalendarApp {
    /// Move the pivot date by the selected view's navigation step
    pub fn navigate(&mut self, direction: Direction) -> Result<Arc<LayoutSnapshot>> {
        let view = self
            .state
            .find_view(&self.state.selected_view)
            .ok_or_else(|| LayoutError::UnknownView(self.state.selected_view.clone()))?;
        let date = view.step(self.state.selected_date, direction)?;
        self.select_date(date)
    }

    pub fn navigate_previous(&mut self) -> Result<Arc<LayoutSnapshot>> {
        self.navigate(Direction::Backwards)
    }

    pub fn navigate_next(&mut self) -> Result<Arc<LayoutSnapshot>> {
        self.navigate(Direction::Forwards)
    }

    pub fn jump_to_today(&mut self) -> Result<Arc<LayoutSnapshot>> {
        self.select_date(Local::now().date_naive())
    }
}
