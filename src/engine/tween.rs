// engine/tween.rs
//
// Tween scheduler. Each tween animates one or more properties of a single
// sprite and may carry a completion cue `C` that `tick` hands back to the
// caller once the tween's full duration has elapsed.
//
// Usage:
//   let mut tweens: TweenState<Cue> = TweenState::new();
//   let id = tweens.add(Tween::new(sprite, 500.0, Easing::CubicOut)
//       .track(Prop::Alpha, 1.0, 0.0)
//       .with_on_complete(Cue::Faded));
//   for cue in tweens.tick(dt_ms, &mut stage) { /* react */ }

use std::collections::BTreeMap;

use super::easing::{Easing, ease};
use super::stage::{Prop, SpriteId, Stage};

/// One animated property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub prop: Prop,
    pub from: f32,
    pub to: f32,
}

#[derive(Debug, Clone)]
pub struct Tween<C> {
    pub sprite: SpriteId,
    pub tracks: Vec<Track>,
    /// Duration of one pass in milliseconds.
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
    /// Play forward then back; total run time is twice `duration`.
    pub yoyo: bool,
    pub on_complete: Option<C>,
}

impl<C> Tween<C> {
    pub fn new(sprite: SpriteId, duration: f32, easing: Easing) -> Self {
        Self {
            sprite,
            tracks: Vec::new(),
            duration,
            elapsed: 0.0,
            easing,
            yoyo: false,
            on_complete: None,
        }
    }

    // -- Builder methods --

    pub fn track(mut self, prop: Prop, from: f32, to: f32) -> Self {
        self.tracks.push(Track { prop, from, to });
        self
    }

    /// Track from the sprite's current value. Missing sprites contribute no track.
    pub fn track_to(self, stage: &Stage, prop: Prop, to: f32) -> Self {
        match stage.get(self.sprite).map(|s| s.get(prop)) {
            Some(from) => self.track(prop, from, to),
            None => self,
        }
    }

    pub fn with_yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    pub fn with_on_complete(mut self, cue: C) -> Self {
        self.on_complete = Some(cue);
        self
    }

    pub fn total_duration(&self) -> f32 {
        if self.yoyo {
            self.duration * 2.0
        } else {
            self.duration
        }
    }

    /// Normalized position along the tracks in [0, 1], folded back for yoyo.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.yoyo { 0.0 } else { 1.0 };
        }
        let raw = self.elapsed / self.duration;
        if self.yoyo && raw > 1.0 {
            (2.0 - raw).clamp(0.0, 1.0)
        } else {
            raw.clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.total_duration()
    }

    fn apply(&self, stage: &mut Stage) {
        let t = self.progress();
        if let Some(sprite) = stage.get_mut(self.sprite) {
            for track in &self.tracks {
                sprite.set(track.prop, ease(track.from, track.to, t, self.easing));
            }
        }
    }
}

/// Handle to a scheduled tween, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u32);

#[derive(Debug)]
pub struct TweenState<C> {
    tweens: BTreeMap<TweenId, Tween<C>>,
    next_id: u32,
}

impl<C> Default for TweenState<C> {
    fn default() -> Self {
        Self {
            tweens: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<C> TweenState<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tween: Tween<C>) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, tween);
        id
    }

    /// Like `add`, for tweens whose cue has to carry their own handle.
    pub fn add_with(&mut self, build: impl FnOnce(TweenId) -> Tween<C>) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, build(id));
        id
    }

    /// Stop a tween where it is. Its cue is dropped. Returns false if the
    /// tween already finished or was cancelled.
    pub fn cancel(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    pub fn contains(&self, id: TweenId) -> bool {
        self.tweens.contains_key(&id)
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween<C>> {
        self.tweens.get(&id)
    }

    /// Advance every tween by `dt` milliseconds and write the new values into
    /// the stage. Cues of tweens that finished this tick are returned in
    /// scheduling order, after all updates for the tick have been applied.
    pub fn tick(&mut self, dt: f32, stage: &mut Stage) -> Vec<C> {
        let mut finished = Vec::new();
        for (&id, tween) in self.tweens.iter_mut() {
            tween.elapsed += dt;
            tween.apply(stage);
            if tween.is_complete() {
                finished.push(id);
            }
        }

        let mut cues = Vec::new();
        for id in finished {
            if let Some(tween) = self.tweens.remove(&id) {
                cues.extend(tween.on_complete);
            }
        }
        cues
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stage::Sprite;

    fn stage_with_sprite() -> (Stage, SpriteId) {
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.spawn(Sprite::new("s", 10.0, 10.0));
        (stage, id)
    }

    #[test]
    fn tween_position() {
        let (mut stage, id) = stage_with_sprite();
        let mut tweens: TweenState<()> = TweenState::new();
        tweens.add(Tween::new(id, 1000.0, Easing::Linear).track(Prop::X, 0.0, 100.0));

        tweens.tick(500.0, &mut stage);
        assert!((stage.get(id).unwrap().x - 50.0).abs() < 0.01);

        tweens.tick(500.0, &mut stage);
        assert!((stage.get(id).unwrap().x - 100.0).abs() < 0.01);
        assert!(tweens.is_empty());
    }

    #[test]
    fn cue_fires_only_after_full_duration() {
        let (mut stage, id) = stage_with_sprite();
        let mut tweens = TweenState::new();
        tweens.add(
            Tween::new(id, 500.0, Easing::CubicOut)
                .track(Prop::Alpha, 1.0, 0.0)
                .with_on_complete("faded"),
        );
        assert!(tweens.tick(499.0, &mut stage).is_empty());
        assert_eq!(tweens.tick(1.0, &mut stage), vec!["faded"]);
        assert_eq!(stage.get(id).unwrap().alpha, 0.0);
    }

    #[test]
    fn yoyo_returns_to_start_and_doubles_runtime() {
        let (mut stage, id) = stage_with_sprite();
        let mut tweens = TweenState::new();
        tweens.add(
            Tween::new(id, 200.0, Easing::Linear)
                .track(Prop::Y, 0.0, 20.0)
                .with_yoyo()
                .with_on_complete(1u8),
        );
        assert!(tweens.tick(200.0, &mut stage).is_empty());
        assert!((stage.get(id).unwrap().y - 20.0).abs() < 1e-4);
        assert!(tweens.tick(100.0, &mut stage).is_empty());
        assert!((stage.get(id).unwrap().y - 10.0).abs() < 1e-4);
        assert_eq!(tweens.tick(100.0, &mut stage), vec![1u8]);
        assert!(stage.get(id).unwrap().y.abs() < 1e-4);
    }

    #[test]
    fn cancelled_tween_drops_its_cue() {
        let (mut stage, id) = stage_with_sprite();
        let mut tweens = TweenState::new();
        let handle = tweens.add(
            Tween::new(id, 100.0, Easing::Linear)
                .track(Prop::X, 0.0, 10.0)
                .with_on_complete(()),
        );
        tweens.tick(50.0, &mut stage);
        assert!(tweens.cancel(handle));
        assert!(!tweens.cancel(handle));
        assert!(tweens.tick(100.0, &mut stage).is_empty());
        assert!((stage.get(id).unwrap().x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn track_to_reads_current_value() {
        let (mut stage, id) = stage_with_sprite();
        stage.get_mut(id).unwrap().x = 40.0;
        let tween: Tween<()> = Tween::new(id, 10.0, Easing::Linear).track_to(&stage, Prop::X, 80.0);
        assert_eq!(
            tween.tracks,
            vec![Track {
                prop: Prop::X,
                from: 40.0,
                to: 80.0
            }]
        );
    }

    #[test]
    fn cues_come_back_in_scheduling_order() {
        let (mut stage, id) = stage_with_sprite();
        let mut tweens = TweenState::new();
        tweens.add(Tween::new(id, 10.0, Easing::Linear).with_on_complete('a'));
        tweens.add(Tween::new(id, 5.0, Easing::Linear).with_on_complete('b'));
        assert_eq!(tweens.tick(10.0, &mut stage), vec!['a', 'b']);
    }
}
