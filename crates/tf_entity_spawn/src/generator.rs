use std::time::Duration;

use bevy::ecs::schedule::SystemConfigs;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use tf_building::{BuildingSettings, GenerationReport, GenerationSession, SettingsError};
use tf_core::SeededRandom;

use crate::world_host::WorldSceneHost;

/// Generator behaviour that is not part of the building itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Tear down the previous building before generating.
    pub clear_previous: bool,
    /// Generate once when the app starts.
    pub auto_generate_on_start: bool,
    /// Seconds to wait between clearing and generating.
    pub build_delay_secs: f32,
    /// Draw the building volume with gizmos.
    pub show_gizmos: bool,
    /// Fixed seed for reproducible buildings; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            clear_previous: true,
            auto_generate_on_start: true,
            build_delay_secs: 0.0,
            show_gizmos: true,
            seed: None,
        }
    }
}

impl GeneratorOptions {
    /// Build delay as a duration. Negative, NaN and out-of-range values mean no delay.
    pub fn build_delay(&self) -> Duration {
        Duration::try_from_secs_f32(self.build_delay_secs.max(0.0)).unwrap_or_default()
    }
}

/// The building generator: settings, options and the live session.
#[derive(Resource, Debug)]
pub struct BuildingGenerator {
    pub settings: BuildingSettings,
    pub options: GeneratorOptions,
    /// Where the building anchor is placed.
    pub origin: Transform,
    session: GenerationSession<Entity, SeededRandom>,
    last_report: Option<GenerationReport>,
    last_error: Option<SettingsError>,
}

impl Default for BuildingGenerator {
    fn default() -> Self {
        Self::new(BuildingSettings::default(), GeneratorOptions::default())
    }
}

impl BuildingGenerator {
    pub fn new(settings: BuildingSettings, options: GeneratorOptions) -> Self {
        let session = GenerationSession::new(SeededRandom::from_optional_seed(options.seed));
        Self {
            settings,
            options,
            origin: Transform::default(),
            session,
            last_report: None,
            last_error: None,
        }
    }

    /// Number of instances currently spawned.
    pub fn instance_count(&self) -> usize {
        self.session.instance_count()
    }

    pub fn anchor(&self) -> Option<Entity> {
        self.session.anchor()
    }

    pub fn is_pending(&self) -> bool {
        self.session.is_pending()
    }

    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.last_report.as_ref()
    }

    pub fn last_error(&self) -> Option<&SettingsError> {
        self.last_error.as_ref()
    }

    /// Generate now, or schedule it when a build delay is configured.
    pub fn generate(&mut self, world: &mut World) -> Option<GenerationReport> {
        self.session.set_clear_previous(self.options.clear_previous);
        if let Some(seed) = self.options.seed {
            self.session.set_rng(SeededRandom::new(seed));
        }

        let delay = self.options.build_delay();
        let mut host = WorldSceneHost::new(world, self.origin);
        let result = self.session.schedule_generate(delay, &self.settings, &mut host);
        self.record(result)
    }

    /// Destroy the generated building.
    pub fn clear(&mut self, world: &mut World) {
        let mut host = WorldSceneHost::new(world, self.origin);
        self.session.clear(&mut host);
        self.last_report = None;
        info!("Cleared building");
    }

    /// Advance a scheduled generation.
    pub fn tick(&mut self, elapsed: Duration, world: &mut World) -> Option<GenerationReport> {
        let mut host = WorldSceneHost::new(world, self.origin);
        let result = self
            .session
            .poll_scheduled(elapsed, &self.settings, &mut host)?;
        self.record(result.map(Some))
    }

    fn record(
        &mut self,
        result: Result<Option<GenerationReport>, SettingsError>,
    ) -> Option<GenerationReport> {
        match result {
            Ok(report) => {
                self.last_error = None;
                if report.is_some() {
                    self.last_report = report.clone();
                }
                report
            }
            Err(err) => {
                error!("Building generation rejected: {}", err);
                self.last_error = Some(err);
                None
            }
        }
    }
}

/// Pending generator actions, set by UI or gameplay code and applied in `Update`.
#[derive(Resource, Debug, Default)]
pub struct BuildingRequest {
    pub generate: bool,
    pub clear: bool,
}

/// Generate the building held by the [`BuildingGenerator`] resource.
///
/// Returns the report when generation ran immediately.
pub fn generate_building(world: &mut World) -> Option<GenerationReport> {
    if !world.contains_resource::<BuildingGenerator>() {
        warn!("generate_building called without a BuildingGenerator resource");
        return None;
    }
    world.resource_scope(|world, mut generator: Mut<BuildingGenerator>| generator.generate(world))
}

/// Destroy the building held by the [`BuildingGenerator`] resource.
pub fn clear_building(world: &mut World) {
    if !world.contains_resource::<BuildingGenerator>() {
        return;
    }
    world.resource_scope(|world, mut generator: Mut<BuildingGenerator>| generator.clear(world));
}

/// Startup system: queue a generation when auto-generate is on.
pub fn auto_generate_on_start(
    generator: Res<BuildingGenerator>,
    mut request: ResMut<BuildingRequest>,
) {
    if generator.options.auto_generate_on_start {
        request.generate = true;
    }
}

/// Apply queued [`BuildingRequest`] flags. Clear runs before generate.
pub fn process_building_requests(world: &mut World) {
    let (generate, clear) = {
        let mut request = world.resource_mut::<BuildingRequest>();
        let flags = (request.generate, request.clear);
        request.generate = false;
        request.clear = false;
        flags
    };

    if clear {
        clear_building(world);
    }
    if generate {
        generate_building(world);
    }
}

/// `Update` systems in run order.
///
/// Scheduled work is ticked before new requests are applied, so a delay
/// starts counting on the frame after it was requested.
pub fn update_systems() -> SystemConfigs {
    (tick_scheduled_generation, process_building_requests).chain()
}

/// Run a delayed generation once its delay has elapsed.
pub fn tick_scheduled_generation(world: &mut World) {
    let elapsed = world.resource::<Time>().delta();
    world.resource_scope(|world, mut generator: Mut<BuildingGenerator>| {
        if generator.is_pending() {
            generator.tick(elapsed, world);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::schedule::ExecutorKind;
    use crate::prefab_library::{PrefabAsset, PrefabLibrary};
    use crate::world_host::{BuildingAnchor, BuildingPart};
    use tf_building::{BuildingType, PrefabPool};
    use tf_core::{PrefabCategory, PrefabId};

    fn library() -> (PrefabLibrary, Vec<PrefabId>) {
        let mut library = PrefabLibrary::default();
        let ids = [PrefabCategory::Wall, PrefabCategory::Corner, PrefabCategory::Window]
            .into_iter()
            .map(|category| {
                library.register(PrefabAsset {
                    name: category.name().to_string(),
                    category,
                    mesh: Handle::default(),
                    material: Handle::default(),
                })
            })
            .collect();
        (library, ids)
    }

    fn world_with(building_type: BuildingType, options: GeneratorOptions) -> World {
        let (library, _) = library();
        let mut settings = BuildingSettings {
            building_type,
            width: 3,
            depth: 2,
            height: 4,
            ..BuildingSettings::default()
        };
        library.fill_pools(&mut settings);

        let mut world = World::new();
        world.insert_resource(library);
        world.insert_resource(BuildingGenerator::new(settings, options));
        world.init_resource::<BuildingRequest>();
        world.init_resource::<Time>();
        world
    }

    fn run_update(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(update_systems());
        schedule.run(world);
    }

    fn part_count(world: &mut World) -> usize {
        world.query::<&BuildingPart>().iter(world).count()
    }

    fn anchor_count(world: &mut World) -> usize {
        world.query::<&BuildingAnchor>().iter(world).count()
    }

    #[test]
    fn generate_spawns_parts_under_anchor() {
        let mut world = world_with(BuildingType::CornerWalls, GeneratorOptions::default());
        let report = generate_building(&mut world).unwrap();

        assert_eq!(report.instance_count, 4 * 4);
        assert_eq!(part_count(&mut world), 16);
        assert_eq!(anchor_count(&mut world), 1);

        let anchor = world.resource::<BuildingGenerator>().anchor().unwrap();
        let children = world.get::<Children>(anchor).unwrap();
        assert_eq!(children.len(), 16);
    }

    #[test]
    fn regenerate_replaces_previous() {
        let mut world = world_with(BuildingType::HeightBasedPrefabs, GeneratorOptions::default());
        generate_building(&mut world);
        let first = part_count(&mut world);
        generate_building(&mut world);

        assert_eq!(part_count(&mut world), first);
        assert_eq!(anchor_count(&mut world), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let mut world = world_with(BuildingType::CornerWallsWithWindows, GeneratorOptions::default());
        generate_building(&mut world);
        clear_building(&mut world);
        clear_building(&mut world);

        assert_eq!(part_count(&mut world), 0);
        assert_eq!(anchor_count(&mut world), 0);
        assert_eq!(world.resource::<BuildingGenerator>().instance_count(), 0);
    }

    #[test]
    fn unknown_prefabs_are_skipped() {
        let mut world = world_with(BuildingType::CornerWalls, GeneratorOptions::default());
        world.resource_mut::<BuildingGenerator>().settings.corner_prefabs =
            PrefabPool::new(vec![PrefabId(99)]);

        let report = generate_building(&mut world).unwrap();
        assert_eq!(report.instance_count, 0);
        assert_eq!(report.skipped, 16);
    }

    #[test]
    fn seeded_generation_is_repeatable() {
        let options = GeneratorOptions {
            seed: Some(5),
            ..GeneratorOptions::default()
        };
        let mut world = world_with(BuildingType::CornerWallsWithWindows, options);
        world.resource_mut::<BuildingGenerator>().settings.signs.enabled = true;

        let first = generate_building(&mut world).unwrap();
        let second = generate_building(&mut world).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_settings_are_recorded() {
        let mut world = world_with(BuildingType::CornerWalls, GeneratorOptions::default());
        world.resource_mut::<BuildingGenerator>().settings.window_interval = 0;

        assert!(generate_building(&mut world).is_none());
        let generator = world.resource::<BuildingGenerator>();
        assert_eq!(generator.last_error(), Some(&SettingsError::ZeroWindowInterval));
    }

    #[test]
    fn requests_are_processed_once() {
        let mut world = world_with(BuildingType::CornerWalls, GeneratorOptions::default());
        world.resource_mut::<BuildingRequest>().generate = true;
        process_building_requests(&mut world);
        assert_eq!(part_count(&mut world), 16);

        world.resource_mut::<BuildingRequest>().clear = true;
        process_building_requests(&mut world);
        assert_eq!(part_count(&mut world), 0);

        process_building_requests(&mut world);
        assert_eq!(part_count(&mut world), 0);
    }

    #[test]
    fn delayed_generation_waits_for_time() {
        let options = GeneratorOptions {
            build_delay_secs: 0.5,
            ..GeneratorOptions::default()
        };
        let mut world = world_with(BuildingType::CornerWalls, options);

        assert!(generate_building(&mut world).is_none());
        assert!(world.resource::<BuildingGenerator>().is_pending());

        world.resource_mut::<Time>().advance_by(Duration::from_millis(300));
        tick_scheduled_generation(&mut world);
        assert_eq!(part_count(&mut world), 0);

        world.resource_mut::<Time>().advance_by(Duration::from_millis(300));
        tick_scheduled_generation(&mut world);
        assert_eq!(part_count(&mut world), 16);
        assert!(!world.resource::<BuildingGenerator>().is_pending());
    }

    #[test]
    fn delay_counts_from_the_request_frame() {
        let options = GeneratorOptions {
            build_delay_secs: 0.5,
            ..GeneratorOptions::default()
        };
        let mut world = world_with(BuildingType::CornerWalls, options);

        // A long frame passes before the request arrives.
        world.resource_mut::<Time>().advance_by(Duration::from_millis(600));
        world.resource_mut::<BuildingRequest>().generate = true;
        run_update(&mut world);
        assert_eq!(part_count(&mut world), 0);
        assert!(world.resource::<BuildingGenerator>().is_pending());

        world.resource_mut::<Time>().advance_by(Duration::from_millis(300));
        run_update(&mut world);
        assert_eq!(part_count(&mut world), 0);

        world.resource_mut::<Time>().advance_by(Duration::from_millis(300));
        run_update(&mut world);
        assert_eq!(part_count(&mut world), 16);
        assert!(!world.resource::<BuildingGenerator>().is_pending());
    }

    #[test]
    fn unrepresentable_delay_builds_immediately() {
        for build_delay_secs in [f32::INFINITY, f32::MAX, f32::NAN, -2.0] {
            let options = GeneratorOptions {
                build_delay_secs,
                ..GeneratorOptions::default()
            };
            assert_eq!(options.build_delay(), Duration::ZERO);

            let mut world = world_with(BuildingType::CornerWalls, options);
            let report = generate_building(&mut world).unwrap();
            assert_eq!(report.instance_count, 16);
        }
    }

    #[test]
    fn options_round_trip_through_ron() {
        let options = GeneratorOptions {
            clear_previous: false,
            build_delay_secs: 1.5,
            seed: Some(42),
            ..GeneratorOptions::default()
        };
        let text = ron::ser::to_string_pretty(&options, ron::ser::PrettyConfig::new()).unwrap();
        assert_eq!(ron::from_str::<GeneratorOptions>(&text).unwrap(), options);

        let partial: GeneratorOptions = ron::from_str("(seed: Some(7))").unwrap();
        assert_eq!(partial.seed, Some(7));
        assert!(partial.clear_previous);
        assert_eq!(partial.build_delay(), Duration::ZERO);
    }
}
