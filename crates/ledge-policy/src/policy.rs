//! The per-frame game policy
//!
//! [`step`] is a pure function: it owns the incoming state, reads the host's
//! resolved frame and the frame input, and returns the next state together
//! with the events describing what changed. Nothing else is mutated.

use crate::animation::select_hero_animation;
use crate::frame::ResolvedFrame;
use crate::patrol::patrol_velocity;
use crate::state::{GameState, Phase};
use crate::tuning::Tuning;
use ledge_core::{EnemyAnimation, EntityId, Facing, Vec2};
use ledge_level::Level;
use ledge_runtime::{EventBus, FrameInput, GameEvent};

/// Result of one policy step
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub state: GameState,
    /// Transitions in the order they happened
    pub events: Vec<GameEvent>,
}

impl FrameOutcome {
    /// Did this frame reset the level?
    pub fn restarted(&self) -> bool {
        self.events.contains(&GameEvent::LevelRestarted)
    }
}

/// How the hero's spider overlaps ended this frame
enum Encounter {
    Survived,
    Killed(EntityId),
}

/// Advance the game by one frame.
///
/// Order: sync bodies, tick dying spiders, patrol, coins, key, spiders
/// (a fatal hit respawns the level and ends the frame), door, input,
/// animation.
pub fn step(
    mut state: GameState,
    frame: &ResolvedFrame,
    input: FrameInput,
    level: &Level,
    tuning: &Tuning,
) -> FrameOutcome {
    if state.phase == Phase::Complete {
        return FrameOutcome {
            state,
            events: Vec::new(),
        };
    }

    let mut bus = EventBus::new();
    let dt = frame_dt(frame, tuning);

    sync_bodies(&mut state, frame);
    tick_dying(&mut state, dt, &mut bus);
    patrol(&mut state, frame, tuning, &mut bus);
    collect_coins(&mut state, frame, &mut bus);
    collect_key(&mut state, frame, &mut bus);

    if let Encounter::Killed(enemy) = resolve_spiders(&mut state, frame, tuning, &mut bus) {
        let had_score = state.score.value() > 0;
        bus.push(GameEvent::HeroKilled { enemy });
        tracing::info!(%enemy, score = state.score.value(), "hero killed, restarting level");

        let state = GameState::spawn(level, tuning);
        bus.push(GameEvent::LevelRestarted);
        if had_score {
            bus.push(GameEvent::ScoreChanged {
                score: state.score.value(),
            });
        }
        return FrameOutcome {
            state,
            events: bus.drain(),
        };
    }

    if frame.door_overlap && state.door.is_some() && state.door_unlocked() {
        state.phase = Phase::Complete;
        bus.push(GameEvent::LevelCompleted);
        tracing::info!(score = state.score.value(), "level complete");
        return FrameOutcome {
            state,
            events: bus.drain(),
        };
    }

    apply_input(&mut state, input, tuning, &mut bus);
    update_animation(&mut state, &mut bus);

    FrameOutcome {
        state,
        events: bus.drain(),
    }
}

/// The frame's reported dt, or the fixed timestep when it is missing, negative or not finite
fn frame_dt(frame: &ResolvedFrame, tuning: &Tuning) -> f32 {
    match frame.dt {
        Some(dt) if dt.is_finite() && dt >= 0.0 => dt,
        Some(dt) => {
            tracing::warn!(dt, "frame reports an unusable dt, using the fixed timestep");
            tuning.fixed_timestep
        }
        None => tuning.fixed_timestep,
    }
}

fn sync_bodies(state: &mut GameState, frame: &ResolvedFrame) {
    state.hero.position = frame.hero.position;
    state.hero.velocity = frame.hero.velocity;
    state.hero.grounded = frame.hero.grounded();

    for body in &frame.enemies {
        match state.enemy_mut(body.id) {
            Some(enemy) => {
                enemy.position = body.position;
                if enemy.alive {
                    enemy.velocity = body.velocity;
                }
            }
            None => tracing::warn!(enemy = %body.id, "frame reports unknown spider, skipped"),
        }
    }
}

fn tick_dying(state: &mut GameState, dt: f32, bus: &mut EventBus) {
    for enemy in state.enemies.iter_mut().filter(|e| e.is_dying()) {
        enemy.dying_remaining -= dt;
    }

    state.enemies.retain(|enemy| {
        let finished = enemy.is_dying() && enemy.dying_remaining <= 0.0;
        if finished {
            tracing::debug!(enemy = %enemy.id, "spider removed");
            bus.push(GameEvent::EnemyRemoved { enemy: enemy.id });
        }
        !finished
    });
}

fn patrol(state: &mut GameState, frame: &ResolvedFrame, tuning: &Tuning, bus: &mut EventBus) {
    for body in &frame.enemies {
        let Some(enemy) = state.enemy_mut(body.id) else {
            continue;
        };
        if !enemy.alive {
            continue;
        }

        let vx = patrol_velocity(enemy.velocity.x, &body.touching, tuning.spider_speed);
        if vx != enemy.velocity.x {
            enemy.velocity.x = vx;
            tracing::debug!(enemy = %enemy.id, velocity_x = vx, "spider turned");
            bus.push(GameEvent::EnemyTurned {
                enemy: enemy.id,
                velocity_x: vx,
            });
        }
    }
}

fn collect_coins(state: &mut GameState, frame: &ResolvedFrame, bus: &mut EventBus) {
    for &id in &frame.coin_overlaps {
        let Some(coin) = state.coin_mut(id) else {
            tracing::warn!(coin = %id, "frame reports unknown coin, skipped");
            continue;
        };
        if coin.collected {
            continue;
        }

        coin.collected = true;
        state.score.increment();
        bus.push(GameEvent::CoinCollected { coin: id });
        bus.push(GameEvent::ScoreChanged {
            score: state.score.value(),
        });
    }
}

fn collect_key(state: &mut GameState, frame: &ResolvedFrame, bus: &mut EventBus) {
    if !frame.key_overlap {
        return;
    }
    if let Some(key) = state.key.as_mut().filter(|k| !k.collected) {
        key.collected = true;
        state.hero.has_key = true;
        bus.push(GameEvent::KeyCollected { key: key.id });
    }
}

/// Stomp or die. The hero's vertical velocity is judged as the host resolved
/// it, so a bounce off one spider does not change the outcome for another
/// spider overlapped in the same frame.
fn resolve_spiders(
    state: &mut GameState,
    frame: &ResolvedFrame,
    tuning: &Tuning,
    bus: &mut EventBus,
) -> Encounter {
    let falling = frame.hero.velocity.y > 0.0;

    for &id in &frame.enemy_overlaps {
        let Some(enemy) = state.enemy_mut(id) else {
            tracing::warn!(enemy = %id, "frame reports unknown spider overlap, skipped");
            continue;
        };
        if !enemy.alive {
            continue;
        }
        if !falling {
            return Encounter::Killed(id);
        }

        enemy.alive = false;
        enemy.animation = EnemyAnimation::Dying;
        enemy.velocity = Vec2::ZERO;
        enemy.dying_remaining = tuning.spider_death_duration;
        state.hero.velocity.y = -tuning.bounce_speed;

        tracing::debug!(enemy = %id, "spider stomped");
        bus.push(GameEvent::EnemyKilled { enemy: id });
        bus.push(GameEvent::HeroBounced { enemy: id });
    }

    Encounter::Survived
}

fn apply_input(state: &mut GameState, input: FrameInput, tuning: &Tuning, bus: &mut EventBus) {
    let hero = &mut state.hero;
    let direction = input.horizontal.direction();
    hero.velocity.x = direction * tuning.hero_speed;

    if let Some(facing) = Facing::from_direction(direction) {
        if facing != hero.facing {
            hero.facing = facing;
            bus.push(GameEvent::HeroFacingChanged { facing });
        }
    }

    if input.jump_pressed {
        if hero.grounded {
            hero.velocity.y = -tuning.jump_speed;
            bus.push(GameEvent::HeroJumped);
        } else {
            tracing::debug!("jump pressed while airborne, ignored");
        }
    }
}

fn update_animation(state: &mut GameState, bus: &mut EventBus) {
    let hero = &mut state.hero;
    let animation = select_hero_animation(hero.velocity, hero.grounded);
    if animation != hero.animation {
        hero.animation = animation;
        bus.push(GameEvent::HeroAnimationChanged { animation });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{EnemyBody, Touching};
    use ledge_core::HeroAnimation;
    use ledge_level::{LevelFile, PlatformDef, SpawnDef};
    use ledge_runtime::Horizontal;

    fn level() -> Level {
        Level::from_file(LevelFile {
            hero: Some(SpawnDef::at(21.0, 525.0)),
            platforms: Some(vec![PlatformDef::new(0.0, 546.0, "ground")]),
            coins: vec![SpawnDef::at(100.0, 500.0), SpawnDef::at(140.0, 500.0)],
            spiders: vec![SpawnDef::at(400.0, 520.0)],
            key: Some(SpawnDef::at(600.0, 300.0)),
            door: Some(SpawnDef::at(900.0, 546.0)),
            ..Default::default()
        })
        .unwrap()
    }

    struct Fixture {
        level: Level,
        tuning: Tuning,
        state: GameState,
    }

    impl Fixture {
        fn new() -> Self {
            let level = level();
            let tuning = Tuning::default();
            let state = GameState::spawn(&level, &tuning);
            Self {
                level,
                tuning,
                state,
            }
        }

        fn step(&mut self, frame: &ResolvedFrame, input: FrameInput) -> Vec<GameEvent> {
            let state = std::mem::take(&mut self.state);
            let outcome = step(state, frame, input, &self.level, &self.tuning);
            self.state = outcome.state;
            outcome.events
        }

        fn spider(&self) -> EntityId {
            self.state.enemies[0].id
        }

        fn coin(&self, i: usize) -> EntityId {
            self.state.coins[i].id
        }
    }

    fn on_ground() -> ResolvedFrame {
        ResolvedFrame::grounded_at(Vec2::new(50.0, 525.0))
    }

    fn spider_body(id: EntityId, vx: f32, touching: Touching) -> EnemyBody {
        EnemyBody {
            id,
            position: Vec2::new(400.0, 520.0),
            velocity: Vec2::new(vx, 0.0),
            touching,
        }
    }

    #[test]
    fn test_coin_collected_once() {
        let mut fx = Fixture::new();
        let coin = fx.coin(0);

        let events = fx.step(&on_ground().with_coin_overlap(coin), FrameInput::idle());
        assert!(events.contains(&GameEvent::CoinCollected { coin }));
        assert!(events.contains(&GameEvent::ScoreChanged { score: 1 }));
        assert_eq!(fx.state.score.value(), 1);

        let events = fx.step(&on_ground().with_coin_overlap(coin), FrameInput::idle());
        assert!(events.is_empty());
        assert_eq!(fx.state.score.value(), 1);
    }

    #[test]
    fn test_duplicate_coin_overlap_in_one_frame() {
        let mut fx = Fixture::new();
        let coin = fx.coin(1);
        let frame = on_ground().with_coin_overlap(coin).with_coin_overlap(coin);
        fx.step(&frame, FrameInput::idle());
        assert_eq!(fx.state.score.value(), 1);
        assert_eq!(fx.state.score.value() as usize, fx.state.collected_coins());
    }

    #[test]
    fn test_unknown_coin_ignored() {
        let mut fx = Fixture::new();
        let events = fx.step(
            &on_ground().with_coin_overlap(EntityId::from_raw(999)),
            FrameInput::idle(),
        );
        assert!(events.is_empty());
        assert_eq!(fx.state.score.value(), 0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut fx = Fixture::new();
        let events = fx.step(&on_ground(), FrameInput::idle().with_jump());
        assert_eq!(fx.state.hero.velocity.y, -600.0);
        assert!(events.contains(&GameEvent::HeroJumped));
        assert_eq!(fx.state.hero.animation, HeroAnimation::Jumping);

        let mut fx = Fixture::new();
        let airborne = ResolvedFrame::airborne(Vec2::new(50.0, 300.0), Vec2::new(0.0, 40.0));
        let events = fx.step(&airborne, FrameInput::idle().with_jump());
        assert_eq!(fx.state.hero.velocity.y, 40.0);
        assert!(!events.contains(&GameEvent::HeroJumped));
        assert_eq!(fx.state.hero.animation, HeroAnimation::Falling);
    }

    #[test]
    fn test_no_jump_without_press() {
        let mut fx = Fixture::new();
        fx.step(&on_ground(), FrameInput::idle());
        assert_eq!(fx.state.hero.velocity.y, 0.0);
        assert_eq!(fx.state.hero.animation, HeroAnimation::Stopped);
    }

    #[test]
    fn test_horizontal_input_and_facing() {
        let mut fx = Fixture::new();

        let events = fx.step(&on_ground(), FrameInput::moving(Horizontal::Left));
        assert_eq!(fx.state.hero.velocity.x, -200.0);
        assert_eq!(fx.state.hero.facing, Facing::Left);
        assert!(events.contains(&GameEvent::HeroFacingChanged {
            facing: Facing::Left
        }));
        assert!(events.contains(&GameEvent::HeroAnimationChanged {
            animation: HeroAnimation::Running
        }));

        // Releasing keeps the facing but stops the hero
        let events = fx.step(&on_ground(), FrameInput::idle());
        assert_eq!(fx.state.hero.velocity.x, 0.0);
        assert_eq!(fx.state.hero.facing, Facing::Left);
        assert_eq!(
            events,
            vec![GameEvent::HeroAnimationChanged {
                animation: HeroAnimation::Stopped
            }]
        );
    }

    #[test]
    fn test_spider_patrol_flips() {
        let mut fx = Fixture::new();
        let spider = fx.spider();
        assert_eq!(fx.state.enemies[0].velocity.x, 100.0);

        let frame = on_ground().with_enemy(spider_body(spider, 100.0, Touching::right()));
        let events = fx.step(&frame, FrameInput::idle());
        assert_eq!(fx.state.enemies[0].velocity.x, -100.0);
        assert!(events.contains(&GameEvent::EnemyTurned {
            enemy: spider,
            velocity_x: -100.0
        }));

        let frame = on_ground().with_enemy(spider_body(spider, -100.0, Touching::none()));
        fx.step(&frame, FrameInput::idle());
        assert_eq!(fx.state.enemies[0].velocity.x, -100.0);

        let frame = on_ground().with_enemy(spider_body(spider, -100.0, Touching::left()));
        fx.step(&frame, FrameInput::idle());
        assert_eq!(fx.state.enemies[0].velocity.x, 100.0);
    }

    #[test]
    fn test_stomp_kills_spider_and_bounces() {
        let mut fx = Fixture::new();
        let spider = fx.spider();
        let frame = ResolvedFrame::airborne(Vec2::new(400.0, 480.0), Vec2::new(0.0, 50.0))
            .with_enemy_overlap(spider);

        let events = fx.step(&frame, FrameInput::idle());
        let enemy = fx.state.enemy(spider).unwrap();
        assert!(!enemy.alive);
        assert_eq!(enemy.animation, EnemyAnimation::Dying);
        assert_eq!(enemy.velocity, Vec2::ZERO);
        assert_eq!(fx.state.hero.velocity.y, -200.0);
        assert_eq!(fx.state.score.value(), 0);
        assert!(events.contains(&GameEvent::EnemyKilled { enemy: spider }));
        assert!(events.contains(&GameEvent::HeroBounced { enemy: spider }));
        assert!(!events.contains(&GameEvent::LevelRestarted));
    }

    #[test]
    fn test_walking_into_spider_restarts() {
        let mut fx = Fixture::new();
        let spider = fx.spider();
        let coin = fx.coin(0);
        fx.step(&on_ground().with_coin_overlap(coin), FrameInput::idle());
        assert_eq!(fx.state.score.value(), 1);

        let frame = on_ground()
            .with_hero_velocity(Vec2::new(200.0, 0.0))
            .with_enemy_overlap(spider);
        let events = fx.step(&frame, FrameInput::moving(Horizontal::Right));

        assert_eq!(
            events,
            vec![
                GameEvent::HeroKilled { enemy: spider },
                GameEvent::LevelRestarted,
                GameEvent::ScoreChanged { score: 0 },
            ]
        );
        assert_eq!(fx.state.score.value(), 0);
        assert_eq!(fx.state, GameState::spawn(&fx.level, &fx.tuning));
    }

    #[test]
    fn test_dying_spider_is_harmless_and_removed() {
        let mut fx = Fixture::new();
        let spider = fx.spider();
        let stomp = ResolvedFrame::airborne(Vec2::new(400.0, 480.0), Vec2::new(0.0, 50.0))
            .with_dt(0.25)
            .with_enemy_overlap(spider);
        fx.step(&stomp, FrameInput::idle());

        // Touching the corpse while standing still does not kill the hero
        let touch = on_ground().with_dt(0.25).with_enemy_overlap(spider);
        let events = fx.step(&touch, FrameInput::idle());
        assert!(!events.contains(&GameEvent::LevelRestarted));

        for _ in 0..2 {
            let events = fx.step(&on_ground().with_dt(0.25), FrameInput::idle());
            assert!(!events.contains(&GameEvent::EnemyRemoved { enemy: spider }));
        }
        let events = fx.step(&on_ground().with_dt(0.25), FrameInput::idle());
        assert!(events.contains(&GameEvent::EnemyRemoved { enemy: spider }));
        assert!(fx.state.enemies.is_empty());
    }

    #[test]
    fn test_unusable_dt_falls_back_to_fixed_timestep() {
        let mut fx = Fixture::new();
        let spider = fx.spider();
        let stomp = ResolvedFrame::airborne(Vec2::new(400.0, 480.0), Vec2::new(0.0, 50.0))
            .with_enemy_overlap(spider);
        fx.step(&stomp, FrameInput::idle());

        for dt in [f32::NAN, f32::INFINITY, -5.0] {
            fx.step(&on_ground().with_dt(dt), FrameInput::idle());
            let remaining = fx.state.enemies[0].dying_remaining;
            assert!(remaining.is_finite());
            assert!(remaining < 1.0);
        }
        let expected = 1.0 - 3.0 * fx.tuning.fixed_timestep;
        assert!((fx.state.enemies[0].dying_remaining - expected).abs() < 1e-4);

        let events = fx.step(&on_ground().with_dt(0.5), FrameInput::idle());
        assert!(!events.contains(&GameEvent::EnemyRemoved { enemy: spider }));
        let events = fx.step(&on_ground().with_dt(0.5), FrameInput::idle());
        assert!(events.contains(&GameEvent::EnemyRemoved { enemy: spider }));
        assert!(fx.state.enemies.is_empty());
    }

    #[test]
    fn test_bounce_does_not_protect_against_second_spider() {
        let level = Level::from_file(LevelFile {
            hero: Some(SpawnDef::at(0.0, 0.0)),
            platforms: Some(vec![PlatformDef::new(0.0, 546.0, "ground")]),
            spiders: vec![SpawnDef::at(10.0, 0.0), SpawnDef::at(20.0, 0.0)],
            ..Default::default()
        })
        .unwrap();
        let tuning = Tuning::default();
        let state = GameState::spawn(&level, &tuning);
        let (a, b) = (state.enemies[0].id, state.enemies[1].id);

        let frame = ResolvedFrame::airborne(Vec2::ZERO, Vec2::new(0.0, 30.0))
            .with_enemy_overlap(a)
            .with_enemy_overlap(b);
        let outcome = step(state, &frame, FrameInput::idle(), &level, &tuning);
        assert!(!outcome.restarted());
        assert!(outcome.state.live_enemies().next().is_none());
    }

    #[test]
    fn test_door_needs_key() {
        let mut fx = Fixture::new();
        let events = fx.step(&on_ground().with_door_overlap(), FrameInput::idle());
        assert!(!events.contains(&GameEvent::LevelCompleted));
        assert_eq!(fx.state.phase, Phase::Playing);

        let events = fx.step(&on_ground().with_key_overlap(), FrameInput::idle());
        let key = fx.state.key.as_ref().unwrap().id;
        assert!(events.contains(&GameEvent::KeyCollected { key }));
        assert!(fx.state.hero.has_key);

        let events = fx.step(&on_ground().with_door_overlap(), FrameInput::idle());
        assert_eq!(events, vec![GameEvent::LevelCompleted]);
        assert!(fx.state.is_complete());
    }

    #[test]
    fn test_key_collected_once() {
        let mut fx = Fixture::new();
        fx.step(&on_ground().with_key_overlap(), FrameInput::idle());
        let events = fx.step(&on_ground().with_key_overlap(), FrameInput::idle());
        assert!(events.is_empty());
    }

    #[test]
    fn test_complete_state_is_inert() {
        let mut fx = Fixture::new();
        fx.state.phase = Phase::Complete;
        let before = fx.state.clone();
        let coin = fx.coin(0);
        let events = fx.step(
            &on_ground().with_coin_overlap(coin),
            FrameInput::moving(Horizontal::Right).with_jump(),
        );
        assert!(events.is_empty());
        assert_eq!(fx.state, before);
    }

    #[test]
    fn test_unknown_spider_body_skipped() {
        let mut fx = Fixture::new();
        let ghost = EntityId::from_raw(77);
        let frame = on_ground()
            .with_enemy(spider_body(ghost, 100.0, Touching::right()))
            .with_enemy_overlap(ghost);
        let events = fx.step(&frame, FrameInput::idle());
        assert!(events.is_empty());
        assert_eq!(fx.state.enemies[0].velocity.x, 100.0);
    }
}
