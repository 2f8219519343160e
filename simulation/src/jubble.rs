//! The jubble: a circular agent that wanders, grows, chases, fights and rots.

use std::f64::consts::PI;
use std::sync::Arc;

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use thiserror::Error;
use tracing::trace;

use crate::colour::{random_colour, Colour};
use crate::components::{AgentId, Goal, Sighting, Vitality};
use crate::config::SimConfig;
use crate::geometry::{angle_between, circles_touching, distance, to_polar, Point, EPSILON};

const ANGLE_RIGHT: f64 = 0.0;
const ANGLE_DOWN: f64 = PI / 2.0;
const ANGLE_LEFT: f64 = PI;
const ANGLE_UP: f64 = PI * 1.5;

/// A goal request the jubble refused. The goal state is left untouched.
#[derive(Debug, Error, PartialEq)]
pub enum GoalError {
    #[error("goal ({x}, {y}) lies outside the playable area")]
    OutOfBounds { x: f64, y: f64 },
}

#[derive(Debug, Clone)]
pub struct Jubble {
    id: AgentId,
    pub position: Point,
    /// Heading in radians; 0 is +x and angles grow clockwise on screen.
    pub angle: f64,
    pub speed: f64,
    pub detection_radius: f64,
    /// Full width of the forward viewing cone.
    pub detection_slice: f64,
    /// Ticks since creation. Keeps counting after death to drive decay.
    pub age: u32,
    pub colour: Colour,
    vitality: Vitality,
    goal: Goal,
    config: Arc<SimConfig>,
}

impl Jubble {
    /// A newborn at `position` with the default heading, speed and senses.
    pub fn new(id: AgentId, position: Point, colour: Colour, config: Arc<SimConfig>) -> Self {
        Self {
            id,
            position,
            angle: config.default_angle,
            speed: config.default_speed,
            detection_radius: config.detection_radius,
            detection_slice: config.detection_slice,
            age: 0,
            colour,
            vitality: Vitality::Alive,
            goal: Goal::None,
            config,
        }
    }

    /// A newborn with random identity, colour and position inside the
    /// playable area.
    pub fn spawn<R: Rng + ?Sized>(config: &Arc<SimConfig>, rng: &mut R) -> Self {
        let area = config.playable_area();
        let id = AgentId::random(rng);
        let position = Point::new(
            rng.gen_range(area.min_x..=area.max_x),
            rng.gen_range(area.min_y..=area.max_y),
        );
        let colour = random_colour(rng);
        Self::new(id, position, colour, Arc::clone(config))
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.vitality.is_alive()
    }

    /// Age at the moment of death; `None` while alive.
    pub fn age_of_death(&self) -> Option<u32> {
        self.vitality.age_of_death()
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn has_coord_goal(&self) -> bool {
        matches!(self.goal, Goal::Coord(_))
    }

    pub fn has_agent_goal(&self) -> bool {
        matches!(self.goal, Goal::Agent(_))
    }

    pub fn agent_goal(&self) -> Option<AgentId> {
        match self.goal {
            Goal::Agent(target) => Some(target),
            _ => None,
        }
    }

    /// Snapshot of this jubble as seen by something chasing it.
    pub fn sighting(&self) -> Sighting {
        Sighting {
            alive: self.is_alive(),
            position: self.position,
        }
    }

    /// Advance one tick.
    ///
    /// `target` is the current state of the agent-goal's target, or `None`
    /// when there is no agent-goal or the target has left the population.
    pub fn update<R: Rng + ?Sized>(&mut self, target: Option<Sighting>, rng: &mut R) {
        if self.is_alive() {
            let dropped_chase = self.reevaluate_agent_goal(target);

            let goal = self.goal;
            match goal {
                Goal::Coord(point) => self.steer_towards(point, true),
                Goal::Agent(_) => {
                    if let Some(sighting) = target {
                        self.steer_towards(sighting.position, false);
                    }
                }
                Goal::None if !dropped_chase => self.wander(rng),
                Goal::None => {}
            }

            self.move_one_step();
        }

        self.get_older();
    }

    /// Drop an agent-goal whose target died or escaped. Returns whether a
    /// goal was dropped this tick.
    fn reevaluate_agent_goal(&mut self, target: Option<Sighting>) -> bool {
        let Goal::Agent(target_id) = self.goal else {
            return false;
        };
        match target {
            Some(sighting) if sighting.alive && self.can_chase_point(sighting.position) => false,
            _ => {
                trace!(id = self.id.0, target = target_id.0, "dropping chase");
                self.goal = Goal::None;
                true
            }
        }
    }

    /// Face `point`; if it is within one step, jump onto it.
    fn steer_towards(&mut self, point: Point, clear_on_arrival: bool) {
        self.angle = to_polar(point.x - self.position.x, point.y - self.position.y).0;

        if distance(self.position, point) <= self.speed {
            self.position = point;
            if clear_on_arrival {
                self.goal = Goal::None;
            }
        }
    }

    fn wander<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if rng.gen::<f64>() < self.config.chance_of_turn {
            let turn = self.config.turn_angle;
            self.angle += Uniform::new_inclusive(-turn, turn).sample(rng);
        }
    }

    fn move_one_step(&mut self) {
        let area = self.config.playable_area();
        self.position = area.clamp(self.position.offset(self.angle, self.speed));

        // Heading off the map: point straight back in.
        if self.position.x <= area.min_x {
            self.angle = ANGLE_RIGHT;
        }
        if self.position.x >= area.max_x {
            self.angle = ANGLE_LEFT;
        }
        if self.position.y <= area.min_y {
            self.angle = ANGLE_DOWN;
        }
        if self.position.y >= area.max_y {
            self.angle = ANGLE_UP;
        }
    }

    fn get_older(&mut self) {
        self.age = self.age.saturating_add(1);
        if self.age >= self.config.death_age && self.is_alive() {
            self.kill();
        }
    }

    /// Head for `(x, y)`, replacing any current goal. Points outside the
    /// playable area are refused.
    pub fn set_coord_goal(&mut self, x: f64, y: f64) -> Result<(), GoalError> {
        if !self.config.playable_area().contains(x, y) {
            return Err(GoalError::OutOfBounds { x, y });
        }
        self.goal = Goal::Coord(Point::new(x, y));
        Ok(())
    }

    /// Chase `target`, replacing any current goal. Range is re-checked every
    /// tick in [`Jubble::update`], not here.
    pub fn set_agent_goal(&mut self, target: AgentId) {
        self.goal = Goal::Agent(target);
    }

    /// Within detection radius and inside the forward viewing cone.
    pub fn can_detect(&self, other: &Jubble) -> bool {
        self.can_detect_point(other.position)
    }

    fn can_detect_point(&self, point: Point) -> bool {
        let (bearing, _) = to_polar(point.x - self.position.x, point.y - self.position.y);
        let off_heading = angle_between(self.angle, bearing).abs();
        self.can_chase_point(point) && off_heading <= self.detection_slice / 2.0 + EPSILON
    }

    /// Within detection radius. Once targeted, prey does not have to stay in
    /// the viewing cone to be chased.
    pub fn can_chase(&self, other: &Jubble) -> bool {
        self.can_chase_point(other.position)
    }

    fn can_chase_point(&self, point: Point) -> bool {
        distance(self.position, point) <= self.detection_radius + EPSILON
    }

    /// A jubble only picks fights with jubbles no older than itself.
    ///
    /// Must stay deterministic: the same pair is evaluated every tick while
    /// they can see each other and has to get the same answer each time.
    pub fn will_fight_with(&self, other: &Jubble) -> bool {
        self.age >= other.age
    }

    /// The winner must be at least as old as its victim and be looking at it,
    /// so nothing is killed by accident from behind.
    pub fn will_win_against(&self, other: &Jubble) -> bool {
        self.will_fight_with(other) && self.can_detect(other)
    }

    pub fn is_colliding_with(&self, other: &Jubble) -> bool {
        self.is_alive()
            && other.is_alive()
            && circles_touching(self.position, other.position, self.radius(), other.radius())
    }

    /// Alive, or not yet fully decomposed.
    pub fn should_be_rendered(&self) -> bool {
        match self.vitality {
            Vitality::Alive => true,
            Vitality::Dead { age_of_death } => {
                self.age.saturating_sub(age_of_death) < self.config.decompose_ticks
            }
        }
    }

    /// How far decomposition has progressed, in `0.0..`; `None` while alive.
    pub fn decomposition_fraction(&self) -> Option<f64> {
        self.age_of_death().map(|age_of_death| {
            f64::from(self.age.saturating_sub(age_of_death)) / f64::from(self.config.decompose_ticks)
        })
    }

    /// Die. Only the first call records the age of death.
    pub fn kill(&mut self) {
        if self.is_alive() {
            self.vitality = Vitality::Dead { age_of_death: self.age };
            self.goal = Goal::None;
        }
    }

    /// Body radius, growing linearly from birth size to mature size.
    /// A corpse keeps the size it died at.
    pub fn radius(&self) -> f64 {
        let config = &self.config;
        let age = self.age_of_death().unwrap_or(self.age).min(config.mature_age);
        f64::from(age) / f64::from(config.mature_age) * (config.mature_size - config.birth_size)
            + config.birth_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    fn still_config() -> Arc<SimConfig> {
        Arc::new(SimConfig {
            chance_of_turn: 0.0,
            ..SimConfig::default()
        })
    }

    fn jubble_at(id: u64, x: f64, y: f64, config: &Arc<SimConfig>) -> Jubble {
        Jubble::new(AgentId(id), Point::new(x, y), Colour::grey(0), Arc::clone(config))
    }

    #[test]
    fn test_radius_grows_then_plateaus() {
        let config = still_config();
        let mut jubble = jubble_at(1, 100.0, 100.0, &config);

        assert_eq!(jubble.radius(), config.birth_size);
        let mut previous = jubble.radius();
        for age in 1..=config.mature_age {
            jubble.age = age;
            assert!(jubble.radius() > previous, "radius shrank at age {}", age);
            previous = jubble.radius();
        }
        assert_eq!(previous, config.mature_size);

        jubble.age = config.mature_age * 3;
        assert_eq!(jubble.radius(), config.mature_size);
    }

    #[test]
    fn test_corpse_size_is_frozen() {
        let config = still_config();
        let mut jubble = jubble_at(1, 100.0, 100.0, &config);
        jubble.age = 300;
        jubble.kill();
        let at_death = jubble.radius();

        jubble.age = 500;
        assert_eq!(jubble.radius(), at_death);
    }

    #[test]
    fn test_kill_is_idempotent() {
        let config = still_config();
        let mut jubble = jubble_at(1, 100.0, 100.0, &config);
        jubble.age = 42;
        jubble.kill();
        jubble.age = 50;
        jubble.kill();

        assert!(!jubble.is_alive());
        assert_eq!(jubble.age_of_death(), Some(42));
    }

    #[test]
    fn test_wandering_stays_inside_playable_area() {
        let config = Arc::new(SimConfig {
            chance_of_turn: 1.0,
            default_speed: 4.0,
            ..SimConfig::default()
        });
        let area = config.playable_area();
        let mut rng = create_rng(3);

        for _ in 0..8 {
            let mut jubble = Jubble::spawn(&config, &mut rng);
            for _ in 0..2_000 {
                jubble.update(None, &mut rng);
                assert!(
                    area.contains(jubble.position.x, jubble.position.y),
                    "escaped to {:?}",
                    jubble.position
                );
            }
        }
    }

    #[test]
    fn test_coord_goal_acceptance() {
        let config = still_config();
        let mut jubble = jubble_at(1, 100.0, 100.0, &config);

        assert!(jubble.set_coord_goal(30.0, 450.0).is_ok());
        assert!(jubble.has_coord_goal());
        assert_eq!(jubble.goal(), Goal::Coord(Point::new(30.0, 450.0)));

        assert_eq!(
            jubble.set_coord_goal(10.0, 200.0),
            Err(GoalError::OutOfBounds { x: 10.0, y: 200.0 })
        );
        assert_eq!(jubble.goal(), Goal::Coord(Point::new(30.0, 450.0)));

        let mut idle = jubble_at(2, 100.0, 100.0, &config);
        assert!(idle.set_coord_goal(200.0, 470.0).is_err());
        assert_eq!(idle.goal(), Goal::None);
    }

    #[test]
    fn test_coord_goal_is_reached_and_dropped() {
        let config = still_config();
        let mut jubble = jubble_at(1, 100.0, 100.0, &config);
        jubble.set_coord_goal(100.0, 103.0).unwrap();
        let mut rng = create_rng(0);

        jubble.update(None, &mut rng);
        assert!(jubble.has_coord_goal());
        assert!((jubble.angle - PI / 2.0).abs() < 1e-12);

        jubble.update(None, &mut rng);
        jubble.update(None, &mut rng);
        assert!(!jubble.has_coord_goal());
        // Snaps onto the goal, then still takes its step.
        assert!((jubble.position.y - 104.0).abs() < 1e-9);
    }

    #[test]
    fn test_detection_cone_edges_are_inclusive() {
        let config = still_config();
        let watcher = jubble_at(1, 300.0, 240.0, &config);
        let half = watcher.detection_slice / 2.0;
        let reach = watcher.detection_radius;

        for edge in [-half, half] {
            let spot = watcher.position.offset(edge, reach);
            let other = jubble_at(2, spot.x, spot.y, &config);
            assert!(watcher.can_detect(&other), "edge {} not detected", edge);
        }

        let outside = watcher.position.offset(half + 0.01, reach * 0.5);
        let other = jubble_at(3, outside.x, outside.y, &config);
        assert!(!watcher.can_detect(&other));
        assert!(watcher.can_chase(&other));

        let far = watcher.position.offset(0.0, reach + 0.5);
        let other = jubble_at(4, far.x, far.y, &config);
        assert!(!watcher.can_detect(&other));
        assert!(!watcher.can_chase(&other));
    }

    #[test]
    fn test_detection_with_unwrapped_heading() {
        let config = still_config();
        let mut watcher = jubble_at(1, 300.0, 240.0, &config);
        watcher.angle = 3.0 * PI / 2.0 + 4.0 * PI;
        let above = jubble_at(2, 300.0, 200.0, &config);
        let below = jubble_at(3, 300.0, 280.0, &config);

        assert!(watcher.can_detect(&above));
        assert!(!watcher.can_detect(&below));
    }

    #[test]
    fn test_fight_predicates() {
        let config = still_config();
        let mut old = jubble_at(1, 100.0, 100.0, &config);
        let mut young = jubble_at(2, 110.0, 100.0, &config);
        old.age = 100;
        young.age = 50;
        young.angle = 0.0;

        assert!(old.will_fight_with(&young));
        assert!(!young.will_fight_with(&old));
        assert!(old.will_win_against(&young));
        // Older, but facing away.
        assert!(!young.will_win_against(&old));

        young.age = 100;
        assert!(young.will_fight_with(&old));
        assert!(!young.will_win_against(&old));
    }

    #[test]
    fn test_collisions_need_two_live_bodies() {
        let config = still_config();
        let a = jubble_at(1, 100.0, 100.0, &config);
        let mut b = jubble_at(2, 110.0, 100.0, &config);
        assert!(a.is_colliding_with(&b));

        b.position.x = 110.1;
        assert!(!a.is_colliding_with(&b));

        b.position.x = 105.0;
        b.kill();
        assert!(!a.is_colliding_with(&b));
        assert!(!b.is_colliding_with(&a));
    }

    #[test]
    fn test_decomposition_window() {
        let config = still_config();
        let mut jubble = jubble_at(1, 100.0, 100.0, &config);
        assert!(jubble.should_be_rendered());

        jubble.age = 20;
        jubble.kill();
        jubble.age = 20 + config.decompose_ticks - 1;
        assert!(jubble.should_be_rendered());

        jubble.age = 20 + config.decompose_ticks;
        assert!(!jubble.should_be_rendered());
        assert_eq!(jubble.decomposition_fraction(), Some(1.0));
    }

    #[test]
    fn test_dies_of_old_age_and_keeps_aging() {
        let config = still_config();
        let mut jubble = jubble_at(1, 100.0, 100.0, &config);
        let mut rng = create_rng(0);
        jubble.age = config.death_age - 1;

        jubble.update(None, &mut rng);
        assert!(!jubble.is_alive());
        assert_eq!(jubble.age_of_death(), Some(config.death_age));

        let resting = jubble.position;
        jubble.update(None, &mut rng);
        assert_eq!(jubble.position, resting);
        assert_eq!(jubble.age, config.death_age + 1);
        assert_eq!(jubble.age_of_death(), Some(config.death_age));
    }

    #[test]
    fn test_chase_follows_live_target() {
        let config = still_config();
        let mut hunter = jubble_at(1, 100.0, 100.0, &config);
        hunter.set_agent_goal(AgentId(2));
        let mut rng = create_rng(0);

        let prey = Sighting { alive: true, position: Point::new(100.0, 150.0) };
        hunter.update(Some(prey), &mut rng);
        assert_eq!(hunter.agent_goal(), Some(AgentId(2)));
        assert!((hunter.angle - PI / 2.0).abs() < 1e-12);
        assert!((hunter.position.y - 101.0).abs() < 1e-9);
    }

    #[test]
    fn test_chase_dropped_when_target_dead_escaped_or_gone() {
        let config = still_config();
        let mut rng = create_rng(0);
        let cases = [
            Some(Sighting { alive: false, position: Point::new(110.0, 100.0) }),
            Some(Sighting { alive: true, position: Point::new(400.0, 100.0) }),
            None,
        ];

        for target in cases {
            let mut hunter = jubble_at(1, 100.0, 100.0, &config);
            hunter.angle = 1.0;
            hunter.set_agent_goal(AgentId(2));
            hunter.update(target, &mut rng);

            assert_eq!(hunter.goal(), Goal::None);
            // Keeps its heading for the tick the chase ends.
            assert_eq!(hunter.angle, 1.0);
        }
    }

    #[test]
    fn test_spawn_uses_defaults() {
        let config = Arc::new(SimConfig::default());
        let jubble = Jubble::spawn(&config, &mut create_rng(11));

        assert!(jubble.is_alive());
        assert_eq!(jubble.age, 0);
        assert_eq!(jubble.goal(), Goal::None);
        assert_eq!(jubble.angle, config.default_angle);
        assert_eq!(jubble.speed, config.default_speed);
        assert!(config.playable_area().contains(jubble.position.x, jubble.position.y));
    }
}
