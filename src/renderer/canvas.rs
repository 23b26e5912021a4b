//! Canvas 2D surface backed by preloaded sprite images

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Sprite, Surface, TextStyle};
use crate::error::AssetError;
use crate::sim::Rect;

/// Every sprite image, fully decoded
pub struct SpriteSheet {
    images: HashMap<Sprite, HtmlImageElement>,
}

impl SpriteSheet {
    /// Load all sprites under `base` (e.g. `""` or `"assets/"`); resolves
    /// only once every image has loaded
    pub async fn load(base: &str) -> Result<Self, AssetError> {
        let mut images = HashMap::new();
        for sprite in Sprite::ALL {
            let src = format!("{}{}", base, sprite.path());
            let image = load_image(&src).await.map_err(|e| {
                log::error!("Sprite {} failed: {:?}", sprite.name(), e);
                AssetError::Load {
                    sprite: sprite.name(),
                    src: src.clone(),
                }
            })?;
            images.insert(sprite, image);
        }
        log::info!("Loaded {} sprites", images.len());
        Ok(Self { images })
    }

    pub fn get(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        self.images.get(&sprite)
    }
}

async fn load_image(src: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);
    JsFuture::from(promise).await?;
    image.set_onload(None);
    image.set_onerror(None);
    Ok(image)
}

/// Draws onto an HTML canvas through its 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
    sprites: SpriteSheet,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement, sprites: SpriteSheet) -> Result<Self, AssetError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| AssetError::Js("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AssetError::Js("not a CanvasRenderingContext2d".into()))?;
        Ok(Self {
            ctx,
            width: canvas.width() as f32,
            height: canvas.height() as f32,
            sprites,
        })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
        let Some(image) = self.sprites.get(sprite) else {
            log::warn!("Sprite {} not loaded", sprite.name());
            return;
        };
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        ) {
            log::warn!("drawImage({}) failed: {:?}", sprite.name(), e);
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.ctx.set_font(&style.font);
        self.ctx.set_fill_style_str(&style.color);
        if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("fillText failed: {:?}", e);
        }
    }
}
