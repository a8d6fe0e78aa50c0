//! Window front-end: click a container, then click where to pour it.

use std::collections::HashMap;
use std::sync::Mutex;

use clipboard_rs::{Clipboard, ClipboardContext};
use macroquad::prelude::*;
use tracing::{debug, warn};

use crate::gameplay::Game;
use crate::model::{Board, Container, Move};
use crate::palette::{FLUID_COLORS, color_index};

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
struct TextCacheKey {
    text: String,
    w_px: u16,
    h_px: u16,
}
type TextMaxSize = (f32, f32, f32);

/// Finds the largest font size that fits text inside a rectangle.
pub struct CachedTextSizer {
    final_size_cache: Mutex<HashMap<TextCacheKey, TextMaxSize>>,
}

impl CachedTextSizer {
    pub fn new() -> Self {
        Self {
            final_size_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_text_max_size(&self, text: &str, rect_width: f32, rect_height: f32) -> TextMaxSize {
        let key = TextCacheKey {
            text: text.to_string(),
            w_px: rect_width.round().clamp(0.0, u16::MAX as f32) as u16,
            h_px: rect_height.round().clamp(0.0, u16::MAX as f32) as u16,
        };
        if let Ok(cache) = self.final_size_cache.lock()
            && let Some(cached_size) = cache.get(&key)
        {
            return *cached_size;
        }

        let reference_size = 100u16;
        let dimensions = measure_text(text, None, reference_size, 1.0);
        let scale = (rect_width / dimensions.width).min(rect_height / dimensions.height);
        let optimal_size = reference_size as f32 * scale;
        let offset_x = (rect_width - dimensions.width * scale) / 2.0;
        // draw_text positions the baseline, so shift down by the text height.
        let offset_y = (rect_height + dimensions.height * scale) / 2.0;
        let text_size = (optimal_size, offset_x, offset_y);

        if let Ok(mut cache) = self.final_size_cache.lock() {
            cache.insert(key, text_size);
        }
        text_size
    }
}

impl Default for CachedTextSizer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitRecord {
    pub rect: Rect,
    pub container_index: usize,
}

/// Screen areas of the containers drawn in the last frame.
#[derive(Default)]
pub struct HitTestRegistry {
    items: Vec<HitRecord>,
}

impl HitTestRegistry {
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn push(&mut self, rect: Rect, container_index: usize) {
        self.items.push(HitRecord {
            rect,
            container_index,
        });
    }

    /// Returns the last drawn container under the point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self.items
            .iter()
            .rev()
            .find(|r| r.rect.contains(vec2(x, y)))
            .map(|r| r.container_index)
    }
}

fn block_color(symbols: &[char], symbol: char) -> Color {
    let [r, g, b] = FLUID_COLORS[color_index(symbols, symbol)];
    Color::from_rgba(r, g, b, 255)
}

pub struct Renderer {
    cached_text_sizer: CachedTextSizer,
    hit_test: HitTestRegistry,
    symbols: Vec<char>,
}

impl Renderer {
    pub fn new(symbols: Vec<char>) -> Self {
        Self {
            cached_text_sizer: CachedTextSizer::new(),
            hit_test: HitTestRegistry::default(),
            symbols,
        }
    }

    pub fn get_hit_test_registry(&self) -> &HitTestRegistry {
        &self.hit_test
    }

    pub fn render_text(&self, text: &str, rect: Rect, color: Color) {
        let (optimal_size, x, y) = self
            .cached_text_sizer
            .get_text_max_size(text, rect.w, rect.h);
        draw_text(text, rect.x + x, rect.y + y, optimal_size, color);
    }

    pub fn render_game(
        &mut self,
        board: &Board<char>,
        selected: Option<usize>,
        targets: &[usize],
        status_line: &str,
    ) {
        self.hit_test.clear();
        clear_background(BLACK);

        let (width, height) = (screen_width(), screen_height());
        let padding = 10.0;
        let status_height = height * 0.1;
        self.render_container_grid(
            board.containers(),
            selected,
            targets,
            4,
            Rect::new(0.0, 0.0, width, height - status_height - padding),
        );
        self.render_text(
            status_line,
            Rect::new(0.0, height - status_height, width, status_height),
            WHITE,
        );
    }

    fn render_container(
        &mut self,
        container: &Container<char>,
        container_index: usize,
        highlight: Option<Color>,
        rect: Rect,
    ) {
        self.hit_test.push(rect, container_index);

        let capacity = container.get_capacity().max(1);
        let cell_height = rect.h / capacity as f32;
        for i in 0..capacity {
            let cell_y = rect.y + rect.h - (i as f32 + 1.0) * cell_height;
            let cell = Rect::new(rect.x, cell_y, rect.w, cell_height);
            match container.get_cells().get(i) {
                Some(symbol) => {
                    draw_rectangle(cell.x, cell.y, cell.w, cell.h, block_color(&self.symbols, *symbol));
                    draw_rectangle_lines(cell.x, cell.y, cell.w, cell.h, 2.0, BLACK);
                    self.render_text(&symbol.to_string(), cell, BLACK);
                }
                None => draw_rectangle_lines(cell.x, cell.y, cell.w, cell.h, 2.0, DARKGRAY),
            }
        }
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 3.0, GRAY);
        if let Some(color) = highlight {
            draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 5.0, color);
        }
        self.render_text(
            &(container_index + 1).to_string(),
            Rect::new(rect.x, rect.y + rect.h, rect.w, 20.0),
            LIGHTGRAY,
        );
    }

    fn render_container_grid(
        &mut self,
        containers: &[Container<char>],
        selected: Option<usize>,
        targets: &[usize],
        max_columns: usize,
        rect: Rect,
    ) {
        let count = containers.len();
        if count == 0 {
            return;
        }
        let columns = count.min(max_columns);
        let rows = count.div_ceil(max_columns);
        let spacing = 30.0;
        let width = (rect.w - spacing * (columns as f32 + 1.0)) / columns as f32;
        let height = (rect.h - spacing * (rows as f32 + 1.0)) / rows as f32;

        for (index, container) in containers.iter().enumerate() {
            let (row, column) = (index / max_columns, index % max_columns);
            let highlight = if selected == Some(index) {
                Some(WHITE)
            } else if targets.contains(&index) {
                Some(GREEN)
            } else {
                None
            };
            self.render_container(
                container,
                index,
                highlight,
                Rect::new(
                    rect.x + spacing + column as f32 * (width + spacing),
                    rect.y + spacing + row as f32 * (height + spacing),
                    width,
                    height,
                ),
            );
        }
    }
}

/// Selection state and game for the window front-end.
pub struct GuiApp {
    game: Game<char>,
    renderer: Renderer,
    selected: Option<usize>,
    message: Option<String>,
}

impl GuiApp {
    pub fn new(game: Game<char>, symbols: Vec<char>) -> Self {
        Self {
            game,
            renderer: Renderer::new(symbols),
            selected: None,
            message: None,
        }
    }

    pub fn render(&mut self) {
        let targets = match self.selected {
            Some(from) => self.game.board().legal_targets(from),
            None => Vec::new(),
        };
        let status_line = if self.game.is_won() {
            format!("You won! ({} moves)", self.game.moves_made())
        } else if let Some(message) = &self.message {
            message.clone()
        } else {
            format!("{} legal moves", self.game.legal_moves().len())
        };
        self.renderer
            .render_game(self.game.board(), self.selected, &targets, &status_line);
    }

    pub fn handle_click(&mut self, x: f32, y: f32) {
        let Some(index) = self.renderer.get_hit_test_registry().hit_test(x, y) else {
            self.selected = None;
            return;
        };
        match self.selected {
            None => self.selected = Some(index),
            Some(from) if from == index => self.selected = None,
            Some(from) => match self.game.apply(Move::new(from, index)) {
                Ok(turn) => {
                    debug!(action = %turn.action, moved = turn.moved, "turn played");
                    self.selected = None;
                    self.message = None;
                }
                Err(err) => {
                    self.message = Some(err.to_string());
                    self.selected = Some(index);
                }
            },
        }
    }

    /// Puts the current layout on the clipboard so the deal can be replayed
    /// with `--layout`.
    pub fn copy_layout(&mut self) {
        let layout = self.game.board().layout();
        let copied = ClipboardContext::new().and_then(|ctx| ctx.set_text(layout.clone()));
        match copied {
            Ok(()) => self.message = Some(format!("copied layout {layout}")),
            Err(err) => {
                warn!(%err, "clipboard unavailable");
                self.message = Some("clipboard unavailable".to_string());
            }
        }
    }
}
