// Character animation: parameter sink and a headless animation player

use std::collections::HashMap;

/// Animator parameter names shared by the controller and the animation data
pub mod params {
    pub const IS_WALKING: &str = "isWalking";
    pub const IS_RUNNING: &str = "isRunning";
    pub const IS_FALLING: &str = "isFalling";
    pub const IS_CLIMBING: &str = "isClimbing";
    pub const IS_CROUCHING: &str = "isCrouching";
    pub const IS_LEDGING: &str = "isLedging";
    pub const KNOCKED_BACK: &str = "knockedBack";
    pub const IS_DEAD: &str = "isDead";

    pub const JUMP: &str = "jump";
    pub const LANDED: &str = "landed";
    pub const LANDED_NO_ROLL: &str = "landed_Noroll";
    pub const ROLL: &str = "roll";
    pub const PUNCH: &str = "punch";
    pub const KICK: &str = "kick";
    pub const TAKE_DAMAGE: &str = "takeDamage";

    /// Clip name played while rolling
    pub const ROLL_CLIP: &str = "Roll";
}

/// Receives animation parameters from gameplay code
///
/// Rendering and blending stay outside this crate; the only thing gameplay
/// reads back is the playing clip's label and the playback speed.
pub trait AnimationSink {
    fn set_bool(&mut self, name: &str, value: bool);
    fn get_bool(&self, name: &str) -> bool;
    fn set_trigger(&mut self, name: &str);
    fn set_float(&mut self, name: &str, value: f32);
    /// Playback speed (0.0 = paused, 1.0 = normal)
    fn set_speed(&mut self, speed: f32);
    fn speed(&self) -> f32;
    /// Label of the clip currently playing
    fn current_clip(&self) -> &str;
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "Idle", "Roll")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Headless animation player implementing `AnimationSink`
///
/// Triggers mapped to a clip restart that clip; finished one-shot clips fall
/// back to the default clip.
#[derive(Debug)]
pub struct AnimationPlayer {
    /// All available animations
    animations: HashMap<String, AnimationClip>,
    /// Trigger name -> clip it starts
    trigger_clips: HashMap<String, String>,
    /// Clip to return to after a one-shot finishes
    default_clip: String,
    /// Currently playing animation name
    current_animation: String,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Whether the animation is playing
    playing: bool,
    /// Playback speed multiplier (1.0 = normal)
    playback_speed: f32,
    /// Whether the sprite should be flipped horizontally
    flip_horizontal: bool,
    bools: HashMap<String, bool>,
    floats: HashMap<String, f32>,
    /// Every trigger fired since the last `take_fired_triggers`
    fired_triggers: Vec<String>,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            trigger_clips: HashMap::new(),
            default_clip: String::new(),
            current_animation: String::new(),
            current_frame: 0,
            frame_timer: 0.0,
            playing: true,
            playback_speed: 1.0,
            flip_horizontal: false,
            bools: HashMap::new(),
            floats: HashMap::new(),
            fired_triggers: Vec::new(),
        }
    }

    /// Create an animation player with the player character's clips
    pub fn with_player_animations() -> Self {
        let mut player = Self::new();

        player.add_animation(AnimationClip::looping("Idle", 4, 8.0));
        player.add_animation(AnimationClip::looping("Walk", 8, 12.0));
        player.add_animation(AnimationClip::one_shot("Jump", 4, 12.0));
        player.add_animation(AnimationClip::one_shot("Land", 3, 12.0));
        player.add_animation(AnimationClip::one_shot("LandRoll", 6, 12.0));
        player.add_animation(AnimationClip::one_shot(params::ROLL_CLIP, 6, 12.0));
        player.add_animation(AnimationClip::one_shot("Punch", 4, 16.0));
        player.add_animation(AnimationClip::one_shot("Kick", 5, 16.0));
        player.add_animation(AnimationClip::one_shot("Hurt", 3, 12.0));

        player.map_trigger(params::JUMP, "Jump");
        player.map_trigger(params::LANDED_NO_ROLL, "Land");
        player.map_trigger(params::LANDED, "LandRoll");
        player.map_trigger(params::ROLL, params::ROLL_CLIP);
        player.map_trigger(params::PUNCH, "Punch");
        player.map_trigger(params::KICK, "Kick");
        player.map_trigger(params::TAKE_DAMAGE, "Hurt");

        player.set_default_clip("Idle");
        player
    }

    /// Create an animation player for the floating ghost enemy
    pub fn with_ghost_animations() -> Self {
        let mut player = Self::new();

        player.add_animation(AnimationClip::looping("Float", 4, 8.0));
        player.add_animation(AnimationClip::one_shot("Hurt", 3, 12.0));
        player.map_trigger(params::TAKE_DAMAGE, "Hurt");

        player.set_default_clip("Float");
        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Make a trigger start a clip
    pub fn map_trigger(&mut self, trigger: &str, clip: &str) {
        self.trigger_clips
            .insert(trigger.to_string(), clip.to_string());
    }

    /// Set the clip played when nothing else is, and start it
    pub fn set_default_clip(&mut self, name: &str) {
        self.default_clip = name.to_string();
        self.play(name);
    }

    /// Play an animation by name
    pub fn play(&mut self, name: &str) {
        if self.current_animation != name {
            self.play_from_start(name);
        }
    }

    /// Play an animation from the beginning, even if it's the same
    pub fn play_from_start(&mut self, name: &str) {
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
    }

    /// Set horizontal flip state
    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    /// Get horizontal flip state
    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Update the animation (called every tick)
    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return;
        };

        self.frame_timer += dt * self.playback_speed;

        let mut finished = false;
        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    self.current_frame = clip.frame_count - 1;
                    finished = true;
                    break;
                }
            }
        }

        if finished {
            if self.default_clip.is_empty() || self.current_animation == self.default_clip {
                self.playing = false;
            } else {
                let default_clip = self.default_clip.clone();
                self.play_from_start(&default_clip);
            }
        }
    }

    /// Get the current animation name
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Check if the animation is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Read a float parameter
    pub fn get_float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    /// Count how many times a trigger fired since the last drain
    pub fn trigger_count(&self, name: &str) -> usize {
        self.fired_triggers.iter().filter(|t| *t == name).count()
    }

    /// Drain the fired trigger log
    pub fn take_fired_triggers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.fired_triggers)
    }
}

impl AnimationSink for AnimationPlayer {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }

    fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    fn set_trigger(&mut self, name: &str) {
        self.fired_triggers.push(name.to_string());
        if let Some(clip) = self.trigger_clips.get(name).cloned() {
            self.play_from_start(&clip);
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    fn set_speed(&mut self, speed: f32) {
        self.playback_speed = speed.max(0.0);
    }

    fn speed(&self) -> f32 {
        self.playback_speed
    }

    fn current_clip(&self) -> &str {
        &self.current_animation
    }
}
