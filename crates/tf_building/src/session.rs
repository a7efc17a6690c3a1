//! Generation session: owns everything spawned for one building.

use std::fmt::Debug;
use std::time::Duration;

use bevy::log::{debug, info};
use tf_core::{PrefabCategory, RandomSource, SceneHost};

use crate::error::SettingsError;
use crate::placement::{plan_building, Placement};
use crate::settings::{BuildingSettings, BuildingType};
use crate::signs::plan_signs;

/// Result of one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub building_type: BuildingType,
    /// Instances tracked by the session after the pass.
    pub instance_count: usize,
    /// Instances spawned by this pass.
    pub spawned: usize,
    /// Signs spawned by this pass.
    pub signs: usize,
    /// Placements the host failed to instantiate.
    pub skipped: usize,
}

/// Tracks the anchor and instances of a generated building.
///
/// `H` is the scene host's handle type, `R` the injected random source.
#[derive(Debug)]
pub struct GenerationSession<H, R> {
    rng: R,
    instances: Vec<H>,
    anchor: Option<H>,
    /// Time left before a scheduled generation runs.
    pending: Option<Duration>,
    clear_previous: bool,
}

impl<H, R> GenerationSession<H, R>
where
    H: Copy + Eq + Debug,
    R: RandomSource,
{
    /// Create an empty session that clears before every generation.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            instances: Vec::new(),
            anchor: None,
            pending: None,
            clear_previous: true,
        }
    }

    /// Whether `generate` tears down the previous building first.
    pub fn clear_previous(&self) -> bool {
        self.clear_previous
    }

    pub fn set_clear_previous(&mut self, clear_previous: bool) {
        self.clear_previous = clear_previous;
    }

    /// Replace the random source, e.g. after a seed change.
    pub fn set_rng(&mut self, rng: R) {
        self.rng = rng;
    }

    pub fn instances(&self) -> &[H] {
        &self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn anchor(&self) -> Option<H> {
        self.anchor
    }

    /// Whether a scheduled generation is waiting to run.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Generate the building described by `settings`.
    ///
    /// Invalid settings are rejected before anything is torn down. Any
    /// scheduled generation is superseded.
    pub fn generate<S>(
        &mut self,
        settings: &BuildingSettings,
        host: &mut S,
    ) -> Result<GenerationReport, SettingsError>
    where
        S: SceneHost<Handle = H>,
    {
        settings.validate()?;
        self.pending = None;

        if self.clear_previous {
            self.clear(host);
        }

        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => {
                let anchor = host.create_anchor(&format!("Building_{}", settings.building_type.name()));
                self.anchor = Some(anchor);
                anchor
            }
        };

        let mut placements = plan_building(settings, &mut self.rng);
        if settings.signs.enabled {
            placements.extend(plan_signs(settings, &mut self.rng));
        }

        let mut report = GenerationReport {
            building_type: settings.building_type,
            instance_count: 0,
            spawned: 0,
            signs: 0,
            skipped: 0,
        };
        self.spawn_all(&placements, anchor, host, &mut report);
        report.instance_count = self.instances.len();

        info!(
            "Generated {} building with {} objects",
            settings.building_type.name(),
            report.instance_count
        );
        Ok(report)
    }

    fn spawn_all<S>(
        &mut self,
        placements: &[Placement],
        anchor: H,
        host: &mut S,
        report: &mut GenerationReport,
    ) where
        S: SceneHost<Handle = H>,
    {
        for placement in placements {
            match host.spawn(placement.prefab, placement.position, placement.rotation, anchor) {
                Some(instance) => {
                    self.instances.push(instance);
                    report.spawned += 1;
                    if placement.category == PrefabCategory::Sign {
                        report.signs += 1;
                    }
                }
                None => {
                    debug!(
                        "Host could not spawn {} prefab {:?} at {}",
                        placement.category.name(),
                        placement.prefab,
                        placement.position
                    );
                    report.skipped += 1;
                }
            }
        }
    }

    /// Destroy every tracked instance and the anchor. Calling this on an
    /// empty session is a no-op.
    pub fn clear<S>(&mut self, host: &mut S)
    where
        S: SceneHost<Handle = H>,
    {
        self.pending = None;
        for instance in self.instances.drain(..) {
            host.destroy(instance);
        }
        if let Some(anchor) = self.anchor.take() {
            host.destroy(anchor);
        }
    }

    /// Clear now and generate after `delay`.
    ///
    /// A zero delay generates immediately and returns the report. Otherwise
    /// the run happens in [`poll_scheduled`](Self::poll_scheduled).
    pub fn schedule_generate<S>(
        &mut self,
        delay: Duration,
        settings: &BuildingSettings,
        host: &mut S,
    ) -> Result<Option<GenerationReport>, SettingsError>
    where
        S: SceneHost<Handle = H>,
    {
        settings.validate()?;
        if delay.is_zero() {
            return self.generate(settings, host).map(Some);
        }

        if self.clear_previous {
            self.clear(host);
        }
        self.pending = Some(delay);
        Ok(None)
    }

    /// Advance a scheduled generation by `elapsed`; runs it once due.
    ///
    /// Returns `None` while nothing is due.
    pub fn poll_scheduled<S>(
        &mut self,
        elapsed: Duration,
        settings: &BuildingSettings,
        host: &mut S,
    ) -> Option<Result<GenerationReport, SettingsError>>
    where
        S: SceneHost<Handle = H>,
    {
        let remaining = self.pending?.saturating_sub(elapsed);
        if !remaining.is_zero() {
            self.pending = Some(remaining);
            return None;
        }

        self.pending = None;
        Some(self.generate(settings, host))
    }
}
