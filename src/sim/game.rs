//! Game orchestration
//!
//! One [`Game`] owns every actor. A render frame feeds input, and the
//! [`PhysicsClock`] decides when a physics tick runs. Each tick:
//!
//! 1. camera
//! 2. actor updates (player, monster AI, platform strategies, bonuses)
//! 3. monster attacks
//! 4. collision resolution and feature dispatch
//! 5. consumed actors are recycled or removed
//! 6. actors spawned during the tick are spliced in
//! 7. events are dispatched to the HUD and observers
//!
//! Actors added during a tick wait in a pending list, so nothing created
//! mid-tick is processed in the tick that created it.

use rand::Rng;

use super::actor::{Actor, ActorState, Combatant};
use super::bonus::{Bonus, BonusManager};
use super::collision::Solid;
use super::context::WorldContext;
use super::events::{EventDispatcher, GameEvent, Hud, Observer};
use super::monster::{AiContext, Monster};
use super::platform::{BehaviorKind, Platform, RandomizePosition};
use super::player::Player;
use super::tick::PhysicsClock;
use crate::consts::TILE_SIZE;
use crate::platform::InputState;
use crate::render::{Canvas, Color};
use crate::scene::{PresetLibrary, Scene};
use crate::{Rect, Settings};

/// Any actor the game owns
pub enum Entity {
    Player(Player),
    Monster(Monster),
    Platform(Platform),
    Bonus(Bonus),
}

impl Entity {
    pub fn actor(&self) -> &dyn Actor {
        match self {
            Entity::Player(p) => p,
            Entity::Monster(m) => m,
            Entity::Platform(p) => p,
            Entity::Bonus(b) => b,
        }
    }

    /// Actors that platform features can affect
    pub fn combatant_mut(&mut self) -> Option<&mut dyn Combatant> {
        match self {
            Entity::Player(p) => Some(p as &mut dyn Combatant),
            Entity::Monster(m) => Some(m as &mut dyn Combatant),
            _ => None,
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, view: &Rect) {
        match self {
            Entity::Player(p) => p.draw(canvas, view),
            Entity::Monster(m) => m.draw(canvas, view),
            Entity::Platform(p) => p.draw(canvas, view),
            Entity::Bonus(b) => b.draw(canvas, view),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    /// Endless descent at a fixed speed
    Scroll { speed: f32 },
    /// Keep the player vertically centered
    Follow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
}

pub struct Game {
    ctx: WorldContext,
    actors: Vec<Entity>,
    pending: Vec<Entity>,
    clock: PhysicsClock,
    dispatcher: EventDispatcher,
    hud: Hud,
    bonus_manager: Option<BonusManager>,
    camera_mode: CameraMode,
    phase: GamePhase,
    is_running: bool,
}

/// Two distinct mutable elements of one slice
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

impl Game {
    fn empty(settings: Settings, seed: u64, camera_mode: CameraMode) -> Self {
        let hud = Hud {
            health: settings.max_health,
            lives: settings.lives,
            ..Hud::default()
        };
        let clock = PhysicsClock::new(settings.physics_interval, settings.max_physics_delta);
        Self {
            ctx: WorldContext::new(settings, seed),
            actors: Vec::new(),
            pending: Vec::new(),
            clock,
            dispatcher: EventDispatcher::new(),
            hud,
            bonus_manager: None,
            camera_mode,
            phase: GamePhase::Playing,
            is_running: true,
        }
    }

    /// Procedural endless descent: recycled platforms, wrap-around side
    /// borders and periodic bonuses under a scrolling camera.
    pub fn endless(settings: Settings, seed: u64) -> Self {
        let camera_mode = CameraMode::Scroll {
            speed: settings.scroll_speed,
        };
        let mut game = Self::empty(settings, seed, camera_mode);
        game.ctx.scrolling = true;

        let s = game.ctx.settings.clone();
        let (w, h) = (s.game_width, s.game_height);
        let start_y = h * 0.6;

        game.actors.push(Entity::Player(Player::new(w / 2.0, start_y, &s)));

        let start_width = s.platform_max_width;
        game.actors.push(Entity::Platform(
            Platform::new(
                Rect::new((w - start_width) / 2.0, start_y, start_width, s.platform_height),
                Color::GRAY,
            )
            .with_reuse(Box::new(RandomizePosition)),
        ));

        let spacing = h / s.platform_count.max(1) as f32;
        for i in 1..s.platform_count {
            let rng = &mut game.ctx.rng;
            let width = rng.random_range(s.platform_min_width..=s.platform_max_width.max(s.platform_min_width));
            let max_x = (w - s.border_width - width).max(s.border_width);
            let x = rng.random_range(s.border_width..=max_x);
            let kind = match rng.random_range(0..10) {
                0..=5 => BehaviorKind::Static,
                6 | 7 => BehaviorKind::Horizontal,
                8 => BehaviorKind::EightTurn,
                _ => BehaviorKind::OscillatingSize,
            };
            let rect = Rect::new(x, start_y + i as f32 * spacing, width, s.platform_height);
            game.actors.push(Entity::Platform(
                Platform::new(rect, Color::GRAY)
                    .with_behavior(kind.build(&Default::default()))
                    .with_reuse(Box::new(RandomizePosition)),
            ));
        }

        // Two stacked segments per side form the vertical conveyor
        for x in [0.0, w - s.border_width] {
            for k in 0..2 {
                game.actors.push(Entity::Platform(
                    Platform::new(Rect::new(x, k as f32 * h, s.border_width, h), Color::PURPLE)
                        .with_reuse(Box::new(RandomizePosition))
                        .repeated(),
                ));
            }
        }

        game.bonus_manager = Some(BonusManager::new(s.bonus_spawn_interval));
        log::info!(
            "Endless game ready: {} actors, seed {}",
            game.actors.len(),
            game.ctx.seed
        );
        game
    }

    /// Authored level: scene platforms, preset monsters and a fixed fall
    /// plane below the lowest platform.
    pub fn from_scene(settings: Settings, scene: &Scene, presets: &PresetLibrary, seed: u64) -> Self {
        let mut game = Self::empty(settings, seed, CameraMode::Follow);
        let s = game.ctx.settings.clone();

        let spawn_x = scene.player_spawn.x as f32 * TILE_SIZE + TILE_SIZE / 2.0;
        let spawn_y = scene.player_spawn.y as f32 * TILE_SIZE + TILE_SIZE;
        game.actors.push(Entity::Player(Player::new(spawn_x, spawn_y, &s)));

        let mut lowest = spawn_y;
        for data in &scene.platforms {
            let platform = Platform::from_data(data, &s);
            lowest = lowest.max(platform.rectangle().bottom());
            game.actors.push(Entity::Platform(platform));
        }

        for spawn in &scene.monsters {
            let preset = presets.get_or_default(&spawn.preset_name);
            let x = spawn.x as f32 * TILE_SIZE + TILE_SIZE / 2.0;
            let y = spawn.y as f32 * TILE_SIZE + TILE_SIZE;
            match Monster::new(&preset, x, y) {
                Ok(monster) => game.actors.push(Entity::Monster(monster)),
                Err(e) => log::error!("Skipping monster '{}': {}", spawn.preset_name, e),
            }
        }

        game.ctx.kill_y = Some(lowest + s.game_height);
        game.update_camera(0.0);
        log::info!(
            "Scene '{}' ready: {} actors, seed {}",
            scene.name,
            game.actors.len(),
            game.ctx.seed
        );
        game
    }

    /// Register an extra observer for dispatched events
    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.dispatcher.subscribe(observer);
    }

    /// Queue an actor. It joins the live set after the current tick.
    pub fn add_actor(&mut self, entity: Entity) {
        self.pending.push(entity);
    }

    pub fn actors(&self) -> &[Entity] {
        &self.actors
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn stop(&mut self) {
        self.is_running = false;
    }

    pub fn camera(&self) -> Rect {
        self.ctx.camera
    }

    pub fn context(&self) -> &WorldContext {
        &self.ctx
    }

    pub fn physics_ticks(&self) -> u64 {
        self.clock.ticks()
    }

    fn player_index(&self) -> Option<usize> {
        self.actors.iter().position(|e| matches!(e, Entity::Player(_)))
    }

    pub fn player(&self) -> Option<&Player> {
        self.actors.iter().find_map(|e| match e {
            Entity::Player(p) => Some(p),
            _ => None,
        })
    }

    fn player_mut(&mut self) -> Option<&mut Player> {
        self.actors.iter_mut().find_map(|e| match e {
            Entity::Player(p) => Some(p),
            _ => None,
        })
    }

    /// Center x of the closest platform below the player, for the demo pilot
    pub fn demo_target(&self) -> Option<f32> {
        let feet = self.player()?.rectangle();
        self.actors
            .iter()
            .filter_map(|e| match e {
                Entity::Platform(p) if !p.repeated_y() && p.rectangle().y >= feet.bottom() => {
                    Some(p.rectangle())
                }
                _ => None,
            })
            .min_by(|a, b| a.y.total_cmp(&b.y))
            .map(|r| r.center().x)
    }

    /// One render frame. Returns false once the game should stop.
    pub fn frame(&mut self, frame_dt: f32, input: &InputState) -> bool {
        if !self.is_running {
            return false;
        }
        if input.quit {
            log::info!("Quit requested");
            self.is_running = false;
            return false;
        }

        if let Some(player) = self.player_mut() {
            player.process_input(input);
        }
        if self.phase == GamePhase::Playing {
            if let Some(dt) = self.clock.advance(frame_dt) {
                self.tick(dt);
            }
        }
        self.is_running
    }

    /// One physics tick of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.update_camera(dt);
        self.update_actors(dt);
        self.monster_attacks();
        self.resolve_collisions();
        self.player_contacts();
        self.sweep();
        self.actors.append(&mut self.pending);

        if let Some(manager) = self.bonus_manager.as_mut() {
            manager.update(&mut self.ctx, dt);
        }
        self.handle_events();
    }

    fn update_camera(&mut self, dt: f32) {
        match self.camera_mode {
            CameraMode::Scroll { speed } => {
                self.ctx.camera.y += speed * dt;
                // Respawn near the top of whatever is visible now
                let (x, y) = (
                    self.ctx.settings.game_width / 2.0,
                    self.ctx.view_top() + self.ctx.camera.height * 0.3,
                );
                if let Some(player) = self.player_mut() {
                    player.set_spawn(x, y);
                }
            }
            CameraMode::Follow => {
                let half = self.ctx.camera.height / 2.0;
                if let Some(center) = self.player().map(|p| p.rectangle().center().y) {
                    self.ctx.camera.y = center - half;
                }
            }
        }
    }

    fn update_actors(&mut self, dt: f32) {
        let ai = AiContext {
            player: self
                .player()
                .filter(|p| !p.is_game_over())
                .map(|p| p.rectangle()),
            bounds: self.ctx.bounds,
            gravity: self.ctx.settings.gravity,
        };
        for entity in &mut self.actors {
            match entity {
                Entity::Player(p) => p.update(&mut self.ctx, dt),
                Entity::Monster(m) => m.update(&ai, dt),
                Entity::Platform(p) => p.update(&self.ctx, dt),
                Entity::Bonus(b) => b.update(&self.ctx, dt),
            }
        }
    }

    fn monster_attacks(&mut self) {
        let Some(pi) = self.player_index() else {
            return;
        };
        for j in 0..self.actors.len() {
            if j == pi {
                continue;
            }
            let (Entity::Player(player), Entity::Monster(monster)) = pair_mut(&mut self.actors, pi, j)
            else {
                continue;
            };
            let Some(damage) = monster.take_attack() else {
                continue;
            };
            if monster.core().distance_to(&player.rectangle()) <= monster.attack_range() {
                player.take_damage(damage, &monster.rectangle(), &mut self.ctx);
            }
        }
    }

    /// Push movers out of platforms and let touched platforms' features react
    fn resolve_collisions(&mut self) {
        let solids: Vec<Solid> = self
            .actors
            .iter()
            .enumerate()
            .filter_map(|(index, e)| match e {
                Entity::Platform(p) if !p.body().is_consumed() => Some(Solid {
                    index,
                    rect: p.rectangle(),
                    delta_x: p.delta_x(),
                }),
                _ => None,
            })
            .collect();
        let view_top = self.ctx.view_top();

        for i in 0..self.actors.len() {
            let touched = match &mut self.actors[i] {
                Entity::Player(p) if !p.is_game_over() && p.rectangle().y >= view_top => {
                    p.resolve(&solids).touched
                }
                Entity::Monster(m) if !m.body().is_consumed() && m.rectangle().y >= view_top => {
                    m.resolve(&solids).touched
                }
                _ => continue,
            };

            for j in touched {
                let (mover, other) = pair_mut(&mut self.actors, i, j);
                if let (Some(actor), Entity::Platform(platform)) = (mover.combatant_mut(), other) {
                    platform.notify_features(actor, &mut self.ctx);
                }
            }
        }
    }

    /// Player against bonuses and monsters
    fn player_contacts(&mut self) {
        let Some(pi) = self.player_index() else {
            return;
        };
        let view_top = self.ctx.view_top();
        for j in 0..self.actors.len() {
            if j == pi {
                continue;
            }
            let (Entity::Player(player), other) = pair_mut(&mut self.actors, pi, j) else {
                continue;
            };
            if player.is_game_over() || player.rectangle().y < view_top {
                return;
            }
            match other {
                Entity::Bonus(bonus) if bonus.check_collision(&*player) => {
                    bonus.collect(&mut self.ctx);
                }
                Entity::Monster(monster)
                    if !monster.is_dying()
                        && !monster.body().is_consumed()
                        && monster.check_collision(&*player) =>
                {
                    if player.is_dashing() {
                        monster.take_damage(1, &player.rectangle(), &mut self.ctx);
                    } else {
                        player.take_damage(monster.damage(), &monster.rectangle(), &mut self.ctx);
                    }
                }
                _ => {}
            }
        }
    }

    /// Recycle or remove consumed actors
    fn sweep(&mut self) {
        let mut removal = Vec::new();
        for (index, entity) in self.actors.iter_mut().enumerate() {
            if entity.actor().state() != ActorState::Consumed {
                continue;
            }
            let live = match entity {
                Entity::Platform(p) => p.reuse(&mut self.ctx),
                Entity::Player(_) => true,
                Entity::Monster(_) | Entity::Bonus(_) => false,
            };
            if !live {
                removal.push(index);
            }
        }
        for index in removal.into_iter().rev() {
            self.actors.remove(index);
        }
    }

    fn handle_events(&mut self) {
        let events = std::mem::take(&mut self.ctx.outbox);
        for event in &events {
            match *event {
                GameEvent::BonusSpawn { x, y } => {
                    let (wx, wy) = BonusManager::world_position(x, y, &self.ctx);
                    self.add_actor(Entity::Bonus(Bonus::new(wx, wy, self.ctx.settings.bonus_score)));
                }
                GameEvent::GameOver => self.phase = GamePhase::GameOver,
                _ => {}
            }
        }

        self.dispatcher.extend(events);
        for event in self.dispatcher.dispatch() {
            self.hud.on_event(&event);
        }
    }

    /// Render every live actor relative to the camera
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let view = self.ctx.camera;
        canvas.fill_rect(Rect::new(0.0, 0.0, view.width, view.height), Color::SKY);
        for entity in &self.actors {
            entity.draw(canvas, &view);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::render::DrawList;
    use crate::scene::{MonsterPreset, MonsterSpawnData, PlatformData, PlayerSpawnData};
    use crate::sim::monster::StateKind;

    const DT: f32 = 1.0 / 60.0;

    fn floor_scene() -> Scene {
        Scene {
            name: "floor".into(),
            player_spawn: PlayerSpawnData { x: 5, y: 9 },
            platforms: vec![PlatformData {
                x: 0,
                y: 10,
                width: 20.0,
                height: 1.0,
                behavior: "static".into(),
                behavior_params: BTreeMap::new(),
                features: Vec::new(),
                feature_params: BTreeMap::new(),
            }],
            monsters: Vec::new(),
        }
    }

    fn count_platforms(game: &Game) -> usize {
        game.actors()
            .iter()
            .filter(|e| matches!(e, Entity::Platform(_)))
            .count()
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut v = vec![1, 2, 3];
        let (a, b) = pair_mut(&mut v, 0, 2);
        std::mem::swap(a, b);
        let (c, d) = pair_mut(&mut v, 2, 1);
        *c += 10;
        *d += 20;
        assert_eq!(v, vec![3, 22, 11]);
    }

    #[test]
    fn test_endless_layout() {
        let settings = Settings::default();
        let game = Game::endless(settings.clone(), 11);
        assert!(game.player().is_some());
        assert_eq!(count_platforms(&game), settings.platform_count + 4);
        let borders = game
            .actors()
            .iter()
            .filter(|e| matches!(e, Entity::Platform(p) if p.repeated_y()))
            .count();
        assert_eq!(borders, 4);
    }

    #[test]
    fn test_pending_actor_skips_creation_tick() {
        let mut game = Game::from_scene(Settings::default(), &floor_scene(), &PresetLibrary::new(), 1);
        game.add_actor(Entity::Bonus(Bonus::new(400.0, 250.0, 10)));
        let before = game.actors().len();
        assert_eq!(game.pending_len(), 1);

        game.tick(DT);
        assert_eq!(game.pending_len(), 0);
        assert_eq!(game.actors().len(), before + 1);
        // Spliced after the update pass, so it has not bobbed yet
        let Some(Entity::Bonus(bonus)) = game.actors().last() else {
            panic!("bonus not spliced");
        };
        assert_eq!(bonus.rectangle().y, 250.0);
    }

    #[test]
    fn test_bonus_pickup_scores() {
        let mut game = Game::from_scene(Settings::default(), &floor_scene(), &PresetLibrary::new(), 1);
        game.add_actor(Entity::Bonus(Bonus::new(170.0, 300.0, 10)));
        game.tick(DT);
        game.tick(DT);
        assert_eq!(game.hud().score, 10);
        assert!(!game.actors().iter().any(|e| matches!(e, Entity::Bonus(_))));
    }

    #[test]
    fn test_player_lands_on_scene_floor() {
        let mut game = Game::from_scene(Settings::default(), &floor_scene(), &PresetLibrary::new(), 1);
        for _ in 0..10 {
            game.tick(DT);
        }
        let player = game.player().unwrap();
        assert!(player.grounded());
        assert!((player.rectangle().bottom() - 320.0).abs() < 1e-2);
    }

    #[test]
    fn test_spiked_floor_hurts_landing_player() {
        let mut scene = floor_scene();
        scene.platforms[0].features = vec!["spikes".into()];
        scene.platforms[0]
            .feature_params
            .insert("spikes_damage".into(), 2.0);
        let mut game = Game::from_scene(Settings::default(), &scene, &PresetLibrary::new(), 1);
        for _ in 0..10 {
            game.tick(DT);
        }
        // One hit, then invincibility covers the following contacts
        assert_eq!(game.hud().health, Settings::default().max_health - 2);
        assert!(game.player().unwrap().is_invincible());
    }

    #[test]
    fn test_checkpoint_becomes_respawn_point() {
        let mut scene = floor_scene();
        scene.platforms[0].features = vec!["checkpoint".into()];
        let mut game = Game::from_scene(Settings::default(), &scene, &PresetLibrary::new(), 1);
        for _ in 0..10 {
            game.tick(DT);
        }
        assert_eq!(game.context().checkpoint, Some((320.0, 320.0)));
        assert_eq!(game.hud().last_checkpoint, Some((320.0, 320.0)));

        let pi = game.player_index().unwrap();
        if let Entity::Player(player) = &mut game.actors[pi] {
            player.take_damage(100, &Rect::new(0.0, 0.0, 1.0, 1.0), &mut game.ctx);
        }
        let feet = game.player().unwrap().rectangle();
        assert!((feet.center().x - 320.0).abs() < 1e-3);
        assert!((feet.bottom() - 320.0).abs() < 1e-3);

        game.tick(DT);
        assert_eq!(game.hud().lives, Settings::default().lives - 1);
    }

    /// Put the player 12 units deep into the starting platform and scroll
    /// the camera so that the next tick's view top lands at `view_top`
    fn sunk_player(view_top_offset: f32) -> (Game, Rect) {
        let settings = Settings::default();
        let scroll = settings.scroll_speed * DT;
        let mut game = Game::endless(settings, 3);
        let Entity::Platform(start) = &game.actors()[1] else {
            panic!("starting platform missing");
        };
        let plat = start.rectangle();

        let player = game.player_mut().unwrap();
        let mut r = player.rectangle();
        r.x = plat.x + 10.0;
        r.y = plat.y + 12.0 - r.height;
        player.set_rectangle(r);
        game.ctx.camera.y = plat.y + view_top_offset - scroll;
        (game, plat)
    }

    #[test]
    fn test_resolution_skipped_above_view_top() {
        // View top cuts through the player: top above it, feet below
        let (mut game, plat) = sunk_player(4.0);
        game.tick(DT);
        let player = game.player().unwrap();
        assert!(!player.grounded());
        assert!(player.rectangle().bottom() > plat.y + 10.0);
        assert_eq!(game.hud().lives, Settings::default().lives);
    }

    #[test]
    fn test_resolution_runs_inside_view() {
        let (mut game, plat) = sunk_player(-200.0);
        game.tick(DT);
        let player = game.player().unwrap();
        assert!(player.grounded());
        assert!((player.rectangle().bottom() - plat.y).abs() < 1e-2);
    }

    #[test]
    fn test_scene_platform_retired_above_view() {
        let mut scene = floor_scene();
        scene.platforms.push(PlatformData {
            x: 2,
            y: -40,
            width: 3.0,
            height: 0.5,
            behavior: "static".into(),
            behavior_params: BTreeMap::new(),
            features: Vec::new(),
            feature_params: BTreeMap::new(),
        });
        let mut game = Game::from_scene(Settings::default(), &scene, &PresetLibrary::new(), 1);
        assert_eq!(count_platforms(&game), 2);
        game.tick(DT);
        assert_eq!(count_platforms(&game), 1);
    }

    #[test]
    fn test_endless_platforms_are_pooled() {
        let mut game = Game::endless(Settings::default(), 5);
        let platforms = count_platforms(&game);
        game.ctx.camera.y = 5000.0;
        game.tick(DT);
        assert_eq!(count_platforms(&game), platforms);
        let view_top = game.camera().y;
        for entity in game.actors() {
            if let Entity::Platform(p) = entity {
                if !p.repeated_y() {
                    assert!(p.rectangle().y >= view_top);
                }
            }
        }
    }

    #[test]
    fn test_frame_waits_for_physics_interval() {
        let mut game = Game::endless(Settings::default(), 5);
        assert!(game.frame(0.001, &InputState::default()));
        assert_eq!(game.physics_ticks(), 0);
        game.frame(0.02, &InputState::default());
        assert_eq!(game.physics_ticks(), 1);
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut game = Game::endless(Settings::default(), 5);
        let quit = InputState {
            quit: true,
            ..Default::default()
        };
        assert!(!game.frame(DT, &quit));
        assert!(!game.is_running());
    }

    #[test]
    fn test_falling_off_last_life_ends_game() {
        let settings = Settings {
            lives: 1,
            ..Settings::default()
        };
        let mut scene = floor_scene();
        scene.platforms.clear();
        let mut game = Game::from_scene(settings, &scene, &PresetLibrary::new(), 1);
        for _ in 0..300 {
            game.tick(DT);
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(game.hud().game_over);
    }

    #[test]
    fn test_scene_monsters_from_presets() {
        let mut presets = PresetLibrary::new();
        let mut broken = MonsterPreset {
            name: "broken".into(),
            ..MonsterPreset::default()
        };
        broken.state_config.available_states = vec!["patrol".into()];
        presets.insert(broken);

        let mut scene = floor_scene();
        scene.monsters = vec![
            MonsterSpawnData {
                x: 15,
                y: 9,
                preset_name: "broken".into(),
            },
            MonsterSpawnData {
                x: 12,
                y: 9,
                preset_name: "unknown".into(),
            },
        ];
        let game = Game::from_scene(Settings::default(), &scene, &presets, 1);
        let monsters: Vec<_> = game
            .actors()
            .iter()
            .filter_map(|e| match e {
                Entity::Monster(m) => Some(m),
                _ => None,
            })
            .collect();
        assert_eq!(monsters.len(), 1);
        assert_eq!(monsters[0].name(), "unknown");
        assert_eq!(monsters[0].current_state(), StateKind::Idle);
    }

    #[test]
    fn test_dash_defeats_monster() {
        let mut presets = PresetLibrary::new();
        let mut weak = MonsterPreset::default();
        weak.name = "weak".into();
        weak.stats.max_health = 1;
        presets.insert(weak);

        let mut scene = floor_scene();
        scene.monsters = vec![MonsterSpawnData {
            x: 6,
            y: 9,
            preset_name: "weak".into(),
        }];
        let mut game = Game::from_scene(Settings::default(), &scene, &presets, 1);
        let dash = InputState {
            dash: true,
            ..Default::default()
        };
        game.frame(0.02, &dash);
        for _ in 0..5 {
            game.frame(0.02, &InputState::default());
        }
        assert_eq!(game.hud().monsters_defeated, 1);
        assert_eq!(game.hud().score, 50);
        assert_eq!(game.hud().health, Settings::default().max_health);
    }

    #[test]
    fn test_draw_covers_every_actor() {
        let game = Game::from_scene(Settings::default(), &floor_scene(), &PresetLibrary::new(), 1);
        let mut list = DrawList::new();
        game.draw(&mut list);
        // Background, player sprite, platform
        assert_eq!(list.len(), 3);
    }
}
