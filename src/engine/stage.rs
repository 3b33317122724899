// engine/stage.rs
//
// Flat display list: textured sprites, an optional stretched background, one
// text banner and the viewport size. The renderer reads it, tweens write it.

/// Handle to a sprite on the stage. Stable for the stage's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u32);

/// Animatable sprite properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prop {
    X,
    Y,
    ScaleX,
    ScaleY,
    Alpha,
}

/// Axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && py >= self.y && px <= self.x + self.width && py <= self.y + self.height
    }
}

/// A textured quad. Position is the origin point; origin (0.5, 0.5) centres
/// the texture on it.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub texture: String,
    /// Source texture size in pixels (before scaling).
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub alpha: f32,
    pub visible: bool,
    pub depth: i32,
    pub interactive: bool,
    pub origin: (f32, f32),
}

impl Sprite {
    pub fn new(texture: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            texture: texture.into(),
            width,
            height,
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            alpha: 1.0,
            visible: true,
            depth: 0,
            interactive: false,
            origin: (0.5, 0.5),
        }
    }

    // -- Builder methods --

    pub fn with_pos(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale_x = scale;
        self.scale_y = scale;
        self
    }

    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale_x = scale;
        self.scale_y = scale;
    }

    pub fn display_width(&self) -> f32 {
        self.width * self.scale_x.abs()
    }

    pub fn display_height(&self) -> f32 {
        self.height * self.scale_y.abs()
    }

    /// Rendered bounds in viewport pixels.
    pub fn bounds(&self) -> Rect {
        let w = self.display_width();
        let h = self.display_height();
        Rect {
            x: self.x - w * self.origin.0,
            y: self.y - h * self.origin.1,
            width: w,
            height: h,
        }
    }

    pub fn get(&self, prop: Prop) -> f32 {
        match prop {
            Prop::X => self.x,
            Prop::Y => self.y,
            Prop::ScaleX => self.scale_x,
            Prop::ScaleY => self.scale_y,
            Prop::Alpha => self.alpha,
        }
    }

    pub fn set(&mut self, prop: Prop, value: f32) {
        match prop {
            Prop::X => self.x = value,
            Prop::Y => self.y = value,
            Prop::ScaleX => self.scale_x = value,
            Prop::ScaleY => self.scale_y = value,
            Prop::Alpha => self.alpha = value,
        }
    }
}

/// Centred text overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_px: f32,
    pub color: String,
}

#[derive(Debug, Default)]
pub struct Stage {
    sprites: Vec<Sprite>,
    background: Option<String>,
    banner: Option<Banner>,
    width: f32,
    height: f32,
}

impl Stage {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn spawn(&mut self, sprite: Sprite) -> SpriteId {
        let id = SpriteId(self.sprites.len() as u32);
        self.sprites.push(sprite);
        id
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprites in draw order: ascending depth, spawn order within a depth.
    pub fn draw_order(&self) -> Vec<(SpriteId, &Sprite)> {
        let mut out: Vec<(SpriteId, &Sprite)> = self
            .sprites
            .iter()
            .enumerate()
            .map(|(i, s)| (SpriteId(i as u32), s))
            .collect();
        out.sort_by_key(|(id, s)| (s.depth, *id));
        out
    }

    /// Top-most visible interactive sprite under the point, if any.
    pub fn pick(&self, x: f32, y: f32) -> Option<SpriteId> {
        self.draw_order()
            .into_iter()
            .rev()
            .find(|(_, s)| s.visible && s.interactive && s.bounds().contains(x, y))
            .map(|(id, _)| id)
    }

    /// Texture drawn stretched over the whole viewport beneath all sprites.
    pub fn set_background(&mut self, texture: impl Into<String>) {
        self.background = Some(texture.into());
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn show_banner(&mut self, banner: Banner) {
        self.banner = Some(banner);
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}
