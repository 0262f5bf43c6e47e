use bevy::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AssetStatus {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

impl AssetStatus {
    /// Loaded or failed; nothing more will happen to this asset.
    pub fn is_settled(&self) -> bool {
        !matches!(self, AssetStatus::Pending)
    }

    fn describe(&self) -> String {
        match self {
            AssetStatus::Pending => "loading".to_string(),
            AssetStatus::Loaded => "ready".to_string(),
            AssetStatus::Failed(reason) => format!("failed ({})", reason),
        }
    }
}

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub environment: AssetStatus,
    pub model: AssetStatus,
    last_reported_percent: Option<u32>,
}

impl LoadingProgress {
    pub fn percent_loaded(&self) -> u32 {
        let loaded = [&self.environment, &self.model]
            .into_iter()
            .filter(|status| **status == AssetStatus::Loaded)
            .count() as u32;
        loaded * 100 / 2
    }

    pub fn all_loaded(&self) -> bool {
        self.environment == AssetStatus::Loaded && self.model == AssetStatus::Loaded
    }

    /// Status for the overlay, or `None` once everything is ready.
    pub fn status_line(&self) -> Option<String> {
        if self.all_loaded() {
            return None;
        }
        Some(format!(
            "{}% loaded | environment: {} | model: {}",
            self.percent_loaded(),
            self.environment.describe(),
            self.model.describe()
        ))
    }
}

/// Log the loaded percentage whenever it changes.
pub fn report_loading_progress(mut progress: ResMut<LoadingProgress>) {
    let percent = progress.percent_loaded();
    if progress.last_reported_percent == Some(percent) {
        return;
    }

    info!("{}% loaded", percent);
    // Reporting is bookkeeping; it must not retrigger the status overlay.
    progress.bypass_change_detection().last_reported_percent = Some(percent);
}
